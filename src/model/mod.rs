//! Model module for the CNN architecture using the Burn framework
//!
//! This module provides:
//! - The VGG-style classifier architecture
//! - Hyperparameter configuration with validation
//!
//! ## Architecture
//!
//! The model is a compact VGG-style network for 200×200 RGB inputs:
//! - Two feature stages of three 3×3 convolutions each, with ReLU
//!   activations, a 5×5/stride-5 max-pool, and dropout
//! - A two-layer fully connected head producing per-class logits

pub mod cnn;
pub mod config;

// Re-export main types for convenience
pub use cnn::{VggSimple, VggSimpleConfig};
pub use config::ModelConfig;

/// Default dropout rate for regularization
pub const DEFAULT_DROPOUT: f64 = 0.15;

/// Default number of output classes
pub const DEFAULT_NUM_CLASSES: usize = 10;
