use std::path::PathBuf;

use cardioseg_app::pipeline;
use cardioseg_foundation::PipelineConfig;
use clap::Parser;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::writer::MakeWriterExt;

#[derive(Parser, Debug)]
#[command(
    name = "cardioseg",
    about = "Segments annotated ECG records into a labeled training dataset"
)]
struct Cli {
    /// TOML config file; the flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory holding the .hea/.dat/.atr file triples.
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Directory receiving the per-record .npy pairs.
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Record ids to process (default: the malignant ventricular ectopy set).
    #[arg(long, num_args = 1..)]
    records: Vec<String>,

    /// Process records but skip the final combine step.
    #[arg(long)]
    skip_combine: bool,
}

fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    std::fs::create_dir_all("logs")?;
    let file_appender = RollingFileAppender::new(Rotation::DAILY, "logs", "cardioseg.log");
    let (non_blocking_file, _guard) = tracing_appender::non_blocking(file_appender);
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::fmt()
        .with_writer(std::io::stdout.and(non_blocking_file))
        .with_env_filter(log_level)
        .init();
    std::mem::forget(_guard);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    init_logging().map_err(|e| anyhow::anyhow!("logging setup failed: {}", e))?;
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => PipelineConfig::from_toml_file(path)?,
        None => PipelineConfig::default(),
    };
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    if let Some(dir) = cli.output_dir {
        config.output_dir = dir;
    }
    if !cli.records.is_empty() {
        config.records = cli.records;
    }

    tracing::info!(
        "Starting batch: {} records from {:?}",
        config.records.len(),
        config.data_dir
    );

    let summary = pipeline::run_batch(&config);
    tracing::info!(
        "Batch finished: {} processed, {} failed, {} segments",
        summary.processed.len(),
        summary.failed.len(),
        summary.total_segments
    );
    if summary.processed.is_empty() {
        anyhow::bail!("no record processed successfully");
    }

    if !cli.skip_combine {
        // Combine only what this run actually produced.
        let combined = pipeline::combine_outputs(&config, &summary.processed)?;
        tracing::info!(
            "Combined dataset written: {} segments to {:?}",
            combined,
            config.combined_segments_path
        );
    }

    Ok(())
}
