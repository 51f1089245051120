// ==========================================
// Zuidplas Logistics - CLI Entry Point
// ==========================================
// Reads an order-row JSON dump (array or { "data": [...] }),
// runs the pipeline and prints the report to stdout.
// ==========================================

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use zuidplas_logistics::config::LogisticsConfig;
use zuidplas_logistics::export;
use zuidplas_logistics::importer::rows_from_file;
use zuidplas_logistics::logging::{self, LogFormat};
use zuidplas_logistics::{LogisticsPipeline, PipelineOptions};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Csv,
}

/// Order rows -> carts, trucks and ranked allocation options
#[derive(Debug, Parser)]
#[command(name = "zuidplas-logistics", version, about)]
struct Args {
    /// Order-row JSON dump
    #[arg(long)]
    orders: PathBuf,

    /// Configuration JSON (built-in business tables when omitted)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Report format: full JSON report, or the per-route breakdown as CSV
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Stop after the cart calculation
    #[arg(long)]
    skip_allocation: bool,

    /// Also write the rejected rows as CSV to this file
    #[arg(long)]
    rejections: Option<PathBuf>,

    /// Log as JSON lines (stderr)
    #[arg(long)]
    log_json: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init_with(if args.log_json { LogFormat::Json } else { LogFormat::Text });

    tracing::info!(version = zuidplas_logistics::VERSION, "{}", zuidplas_logistics::APP_NAME);

    let config = match &args.config {
        Some(path) => LogisticsConfig::from_json_file(path)
            .with_context(|| format!("loading configuration {}", path.display()))?,
        None => LogisticsConfig::default(),
    };
    let pipeline = LogisticsPipeline::new(config).context("invalid configuration")?;

    let raw = rows_from_file(&args.orders)
        .with_context(|| format!("reading orders {}", args.orders.display()))?;
    let report = pipeline.run(
        &raw,
        PipelineOptions {
            skip_allocation: args.skip_allocation,
        },
    );

    if let Some(path) = &args.rejections {
        let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
        export::write_rejections(&report.validation, BufWriter::new(file))
            .with_context(|| format!("writing rejected rows to {}", path.display()))?;
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match args.format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, &report).context("writing JSON report")?;
            writeln!(out)?;
        }
        OutputFormat::Csv => {
            export::write_breakdown(&report.cart_result, &mut out).context("writing CSV report")?;
        }
    }
    out.flush()?;
    Ok(())
}
