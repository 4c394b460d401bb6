//! # VggSimple
//!
//! A VGG-style convolutional image classifier built with the Burn framework.
//!
//! The crate defines a compact feed-forward architecture for classifying
//! fixed-size 200×200 RGB images: two convolutional feature stages (each
//! three 3×3 convolutions followed by a 5×5/stride-5 max-pool and dropout)
//! and a two-layer fully connected head producing per-class logits.
//!
//! ## Modules
//!
//! - `model`: the CNN architecture and its hyperparameter configuration
//! - `backend`: Burn backend selection (NdArray by default, CUDA/wgpu opt-in)
//! - `inference`: single-image prediction and latency benchmarking
//! - `utils`: logging and error handling
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use vggsimple::backend::{default_device, DefaultBackend};
//! use vggsimple::model::cnn::{VggSimple, VggSimpleConfig};
//!
//! let device = default_device();
//! let config = VggSimpleConfig::new();
//! let model = VggSimple::<DefaultBackend>::new(&config, &device);
//! ```
//!
//! Training, dataset handling, and weight persistence are external
//! collaborators: the model is a pure function of its input, its current
//! weights, and the backend's train/eval mode.

pub mod backend;
pub mod inference;
pub mod model;
pub mod utils;

// Re-export commonly used items for convenience
pub use backend::{default_device, DefaultBackend, TrainingBackend};
pub use inference::benchmark::{run_benchmark, BenchmarkConfig, BenchmarkResult, LatencyStats};
pub use inference::predictor::{PredictionResult, Predictor};
pub use model::cnn::{VggSimple, VggSimpleConfig};
pub use model::config::ModelConfig;
pub use utils::error::{Result, VggSimpleError};

/// Default number of output classes
pub const DEFAULT_NUM_CLASSES: usize = 10;

/// Expected input image size (width and height)
pub const IMAGE_SIZE: usize = 200;

/// Number of input channels (RGB)
pub const IN_CHANNELS: usize = 3;

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
