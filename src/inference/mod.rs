//! Inference module for model prediction and benchmarking
//!
//! This module provides:
//! - Single image and batch prediction with the preprocessing the
//!   architecture expects (resize to 200×200, ImageNet normalization)
//! - Forward-pass latency benchmarking
//!
//! Weights are supplied by the caller when constructing a [`Predictor`];
//! weight persistence and training are external collaborators.

pub mod benchmark;
pub mod predictor;

// Re-export main types for convenience
pub use benchmark::{run_benchmark, BenchmarkConfig, BenchmarkResult, LatencyStats, Timer};
pub use predictor::{PredictionResult, Predictor};

/// Default number of warmup iterations for benchmarking
pub const WARMUP_ITERATIONS: usize = 10;

/// Default number of benchmark iterations
pub const BENCHMARK_ITERATIONS: usize = 100;
