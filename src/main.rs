// src/main.rs

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{debug, info};

use percent_core::FixedSizeHandler;

mod description;
mod report;

use description::{DescriptionAdapter, LayoutDescription};
use report::LayoutReport;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the JSON layout description
    #[arg(value_name = "FILE")]
    description: PathBuf,

    /// Container width (defaults to the preferred width)
    #[arg(long)]
    width: Option<i32>,

    /// Container height (defaults to the preferred height)
    #[arg(long)]
    height: Option<i32>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: Format,

    /// Font size in pixels, used for dialog units
    #[arg(long, default_value = "12")]
    font_size: f64,

    /// Screen resolution in dots per inch
    #[arg(long, default_value = "96")]
    resolution: u32,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Logs go to stderr, the report to stdout
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(if args.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    if args.font_size.is_nan() || args.font_size <= 0.0 {
        anyhow::bail!("Font size must be positive: {}", args.font_size);
    }

    info!("Loading layout description: {}", args.description.display());
    let description = LayoutDescription::load(&args.description)?;
    let mut layout = description.build()?;

    let handler = FixedSizeHandler::new(args.font_size, args.resolution);
    let adapter = DescriptionAdapter::new(&description, handler);
    debug!("Using {:?}", handler);

    let report = LayoutReport::compute(&mut layout, &adapter, args.width, args.height);
    match args.format {
        Format::Text => println!("{}", report.to_text()),
        Format::Json => println!(
            "{}",
            serde_json::to_string_pretty(&report).context("Failed to serialize layout report")?
        ),
    }
    Ok(())
}
