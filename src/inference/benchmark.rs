//! Benchmark Module for Inference Latency Testing
//!
//! Measures forward-pass latency over random input. Randomly initialized
//! weights are fine for timing purposes since the computation does not
//! depend on the weight values.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use burn::tensor::{backend::Backend, Distribution, Tensor};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::cnn::VggSimple;
use crate::utils::error::{Result, VggSimpleError};
use crate::{IMAGE_SIZE, IN_CHANNELS};

/// Configuration for benchmarking
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkConfig {
    /// Number of warmup iterations (excluded from measurements)
    pub warmup_iterations: usize,

    /// Number of benchmark iterations
    pub iterations: usize,

    /// Batch size for inference
    pub batch_size: usize,

    /// Whether to keep individual iteration times in the result
    pub verbose: bool,

    /// Output file for results (optional)
    pub output_path: Option<PathBuf>,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            warmup_iterations: super::WARMUP_ITERATIONS,
            iterations: super::BENCHMARK_ITERATIONS,
            batch_size: 1,
            verbose: false,
            output_path: None,
        }
    }
}

impl BenchmarkConfig {
    /// Create a quick benchmark config for testing
    pub fn quick() -> Self {
        Self {
            warmup_iterations: 5,
            iterations: 20,
            ..Default::default()
        }
    }

    /// Create a thorough benchmark config
    pub fn thorough() -> Self {
        Self {
            warmup_iterations: 20,
            iterations: 500,
            verbose: true,
            ..Default::default()
        }
    }
}

/// Latency statistics from benchmark
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LatencyStats {
    /// Mean latency in milliseconds
    pub mean_ms: f64,
    /// Standard deviation in milliseconds
    pub std_ms: f64,
    /// Minimum latency
    pub min_ms: f64,
    /// Maximum latency
    pub max_ms: f64,
    /// Median (50th percentile)
    pub p50_ms: f64,
    /// 95th percentile
    pub p95_ms: f64,
    /// 99th percentile
    pub p99_ms: f64,
}

impl LatencyStats {
    /// Calculate statistics from a list of durations
    pub fn from_durations(durations: &[Duration]) -> Self {
        if durations.is_empty() {
            return Self::default();
        }

        let mut times_ms: Vec<f64> = durations.iter().map(|d| d.as_secs_f64() * 1000.0).collect();
        times_ms.sort_by(|a, b| a.partial_cmp(b).unwrap());

        let n = times_ms.len();
        let sum: f64 = times_ms.iter().sum();
        let mean = sum / n as f64;

        let variance: f64 = times_ms.iter().map(|t| (t - mean).powi(2)).sum::<f64>() / n as f64;
        let std = variance.sqrt();

        Self {
            mean_ms: mean,
            std_ms: std,
            min_ms: times_ms[0],
            max_ms: times_ms[n - 1],
            p50_ms: percentile(&times_ms, 50.0),
            p95_ms: percentile(&times_ms, 95.0),
            p99_ms: percentile(&times_ms, 99.0),
        }
    }
}

/// Calculate percentile from sorted data
fn percentile(sorted_data: &[f64], p: f64) -> f64 {
    if sorted_data.is_empty() {
        return 0.0;
    }

    let idx = (p / 100.0 * (sorted_data.len() - 1) as f64).round() as usize;
    sorted_data[idx.min(sorted_data.len() - 1)]
}

/// Simple stopwatch collecting per-iteration durations
pub struct Timer {
    start: Instant,
    times: Vec<Duration>,
}

impl Timer {
    /// Create a new timer
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            times: Vec::new(),
        }
    }

    /// Start timing
    pub fn start(&mut self) {
        self.start = Instant::now();
    }

    /// Stop timing and record the duration
    pub fn stop(&mut self) -> Duration {
        let elapsed = self.start.elapsed();
        self.times.push(elapsed);
        elapsed
    }

    /// Get all recorded times
    pub fn times(&self) -> &[Duration] {
        &self.times
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

/// Results from a benchmark run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkResult {
    /// Latency statistics
    pub latency: LatencyStats,

    /// Throughput (images per second)
    pub throughput: f64,

    /// Individual iteration times (if verbose)
    pub iteration_times_ms: Vec<f64>,

    /// Configuration used for this benchmark
    pub config: BenchmarkConfig,

    /// Device the benchmark ran on
    pub device: String,

    /// Timestamp of when the benchmark was run
    pub timestamp: String,
}

impl BenchmarkResult {
    /// Build a result from raw timing data
    pub fn from_timings(timings: &[Duration], config: BenchmarkConfig, device: String) -> Self {
        let latency = LatencyStats::from_durations(timings);

        let throughput = if latency.mean_ms > 0.0 {
            config.batch_size as f64 / (latency.mean_ms / 1000.0)
        } else {
            0.0
        };

        let iteration_times_ms = if config.verbose {
            timings.iter().map(|d| d.as_secs_f64() * 1000.0).collect()
        } else {
            Vec::new()
        };

        Self {
            latency,
            throughput,
            iteration_times_ms,
            config,
            device,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Save results to a JSON file
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| VggSimpleError::Serialization(e.to_string()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load results from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        serde_json::from_str(&json).map_err(|e| VggSimpleError::Serialization(e.to_string()))
    }
}

/// Run a latency benchmark on a model with random input
///
/// Runs warmup iterations first, then measures the configured number of
/// forward passes. If `config.output_path` is set, the result is also
/// written to disk as JSON.
pub fn run_benchmark<B: Backend>(
    model: &VggSimple<B>,
    config: &BenchmarkConfig,
    device: &B::Device,
) -> Result<BenchmarkResult> {
    let input = Tensor::<B, 4>::random(
        [config.batch_size, IN_CHANNELS, IMAGE_SIZE, IMAGE_SIZE],
        Distribution::Uniform(-1.0, 1.0),
        device,
    );

    debug!("warmup: {} iterations", config.warmup_iterations);
    for _ in 0..config.warmup_iterations {
        let _ = model.forward(input.clone());
    }

    debug!("benchmark: {} iterations", config.iterations);
    let mut timer = Timer::new();
    for i in 0..config.iterations {
        timer.start();
        let _ = model.forward(input.clone());
        let elapsed = timer.stop();

        debug!("iteration {}/{}: {:.2} ms", i + 1, config.iterations, elapsed.as_secs_f64() * 1000.0);
    }

    let result = BenchmarkResult::from_timings(
        timer.times(),
        config.clone(),
        format!("{:?}", device),
    );

    if let Some(path) = &config.output_path {
        result.save(path)?;
    }

    Ok(result)
}
