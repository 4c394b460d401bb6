//! VggSimple CLI
//!
//! Entry point for inspecting and benchmarking the VGG-style classifier.
//! Training, datasets, and weight files are external collaborators; the
//! commands here work with freshly initialized weights.

use std::path::PathBuf;

use anyhow::Result;
use burn::module::Module;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use vggsimple::backend::{backend_name, default_device, DefaultBackend};
use vggsimple::inference::benchmark::{run_benchmark, BenchmarkConfig};
use vggsimple::model::cnn::{VggSimple, VggSimpleConfig, FLATTENED_FEATURES};
use vggsimple::utils::logging::{init_logging, LogConfig};
use vggsimple::utils::{format_duration, format_number};

/// VGG-style image classifier built with Burn
#[derive(Parser, Debug)]
#[command(name = "vggsimple")]
#[command(version = vggsimple::VERSION)]
#[command(about = "VGG-style image classifier built with Burn", long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, default_value = "false")]
    verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the architecture and parameter count
    Summary {
        /// Number of output classes
        #[arg(short, long, default_value = "10")]
        num_classes: usize,
    },

    /// Benchmark forward-pass latency with random weights and input
    Benchmark {
        /// Number of inference iterations for timing
        #[arg(short, long, default_value = "100")]
        iterations: usize,

        /// Number of warmup iterations
        #[arg(long, default_value = "10")]
        warmup: usize,

        /// Batch size for inference
        #[arg(short, long, default_value = "1")]
        batch_size: usize,

        /// Number of output classes
        #[arg(short, long, default_value = "10")]
        num_classes: usize,

        /// Output JSON file for benchmark results
        #[arg(short, long)]
        output: Option<String>,

        /// Keep individual iteration times in the result
        #[arg(long, default_value = "false")]
        verbose: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_config = if cli.verbose {
        LogConfig::verbose()
    } else {
        LogConfig::default()
    };
    let _ = init_logging(&log_config);

    match cli.command {
        Commands::Summary { num_classes } => cmd_summary(num_classes),
        Commands::Benchmark {
            iterations,
            warmup,
            batch_size,
            num_classes,
            output,
            verbose,
        } => cmd_benchmark(iterations, warmup, batch_size, num_classes, output, verbose),
    }
}

fn cmd_summary(num_classes: usize) -> Result<()> {
    let device = default_device();
    let config = VggSimpleConfig::new().with_num_classes(num_classes);
    let model = VggSimple::<DefaultBackend>::new(&config, &device);

    println!("{}", "VggSimple architecture".green().bold());
    println!("  Input:    [N, 3, 200, 200]");
    println!("  Stage 1:  3 -> 64 -> 64 -> 64    (3x3 conv + ReLU), 5x5/5 max-pool, dropout");
    println!("  Stage 2:  64 -> 64 -> 128 -> 128 (3x3 conv + ReLU), 5x5/5 max-pool, dropout");
    println!(
        "  Flatten:  8 x 8 x 128 = {} features",
        format_number(FLATTENED_FEATURES)
    );
    println!(
        "  Head:     {} -> 80 -> {} (dropout between)",
        format_number(FLATTENED_FEATURES),
        num_classes
    );
    println!();
    println!("  Backend:     {}", backend_name());
    println!("  Dropout:     {}", config.dropout_rate);
    println!(
        "  Parameters:  {}",
        format_number(model.num_params()).bold()
    );

    Ok(())
}

fn cmd_benchmark(
    iterations: usize,
    warmup: usize,
    batch_size: usize,
    num_classes: usize,
    output: Option<String>,
    verbose: bool,
) -> Result<()> {
    info!("Running benchmark");
    info!("  Iterations: {}", iterations);
    info!("  Warmup: {}", warmup);
    info!("  Batch size: {}", batch_size);

    let device = default_device();
    let model_config = VggSimpleConfig::new().with_num_classes(num_classes);

    println!("{}", "Creating model (randomly initialized)...".cyan());
    let model = VggSimple::<DefaultBackend>::new(&model_config, &device);

    let config = BenchmarkConfig {
        warmup_iterations: warmup,
        iterations,
        batch_size,
        verbose,
        output_path: output.as_ref().map(PathBuf::from),
    };

    println!("{}", "Running benchmark...".green().bold());
    let start = std::time::Instant::now();
    let result = run_benchmark(&model, &config, &device)?;
    let total = start.elapsed().as_secs_f64();

    println!();
    println!("{}", "Benchmark Results:".cyan().bold());
    println!("  Backend: {}", backend_name());
    println!("  Batch size: {}", result.config.batch_size);
    println!();
    println!(
        "  {} {} ± {} ms",
        "Mean latency:".green(),
        format!("{:.2}", result.latency.mean_ms).bold(),
        format!("{:.2}", result.latency.std_ms)
    );
    println!(
        "  P50/P95/P99: {:.2}/{:.2}/{:.2} ms",
        result.latency.p50_ms, result.latency.p95_ms, result.latency.p99_ms
    );
    println!(
        "  Min/Max: {:.2}/{:.2} ms",
        result.latency.min_ms, result.latency.max_ms
    );
    println!();
    println!(
        "  {} {} images/s",
        "Throughput:".green(),
        format!("{:.1}", result.throughput).bold()
    );
    println!("  Total time: {}", format_duration(total));

    if let Some(path) = &result.config.output_path {
        println!();
        println!("{} {}", "Results saved to".yellow(), path.display());
    }

    Ok(())
}
