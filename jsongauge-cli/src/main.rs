// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! CLI runner: benchmark all registered JSON codecs and generate reports.

use std::path::PathBuf;

use clap::Parser;
use jsongauge_core::config::{Config, DEFAULT_CONFIG_FILE};
use jsongauge_core::reporter::Reporter;
use jsongauge_core::{harness, NormalizeContext, RunReport};

#[derive(Parser)]
#[command(name = "jsongauge")]
#[command(about = "Benchmark JSON codecs against a shared fixture and verify correctness")]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Output directory for report artifacts
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Iteration count override for the main fixture
    #[arg(short, long)]
    iterations: Option<u64>,

    /// Run in quick mode (fewer iterations)
    #[arg(long)]
    quick: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt().with_env_filter(log_level).init();

    let mut config = Config::load_or_default(&args.config)?;
    if let Some(output) = args.output {
        config.output_dir = output;
    }
    if let Some(iterations) = args.iterations {
        anyhow::ensure!(iterations > 0, "iterations must be positive");
        config.iterations = iterations;
    }
    if args.quick {
        config.iterations = config.iterations.min(10_000);
        config.stress_iterations = config.stress_iterations.min(100);
    }
    tracing::debug!(?config, "resolved configuration");

    println!("jsongauge benchmark suite");
    println!("=========================");
    println!(
        "Iterations: {} (stress: {})",
        config.iterations, config.stress_iterations
    );
    println!("Throughput basis: {}", config.basis);
    println!("Output directory: {}", config.output_dir.display());
    println!();

    let (report, ctx) = harness::run_suite(&config)?;

    let reporter = Reporter::new(&config.output_dir);
    let paths = reporter.write(&report, &ctx)?;
    println!();
    for path in &paths {
        println!("Wrote {}", path.display());
    }

    print_summary(&report, &ctx);

    Ok(())
}

fn print_summary(report: &RunReport, ctx: &NormalizeContext) {
    println!();
    println!("Summary");
    println!("-------");

    for record in &report.backends {
        let roundtrip = record
            .text
            .roundtrip_s
            .map(|s| format!("{s:.2} s"))
            .unwrap_or_else(|| "N/A".to_string());
        let read = ctx
            .document_throughput(record.text.bytes, record.text.read_s, record.iterations)
            .map(|mbps| format!("{} MB/s", mbps as u64))
            .unwrap_or_else(|| "N/A".to_string());
        println!("{}: roundtrip={}, read={}", record.name, roundtrip, read);
    }
}
