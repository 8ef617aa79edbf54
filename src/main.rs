//! `imgnorm` CLI - Load an image as canonical grayscale or BGR.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Load an image as grayscale or BGR with 8/16-bit depth and report its layout.
#[derive(Parser, Debug)]
#[command(name = "imgnorm")]
#[command(version, about, long_about = None)]
struct Args {
    /// Input image path.
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Write the normalized image here (format from extension, PNG if none).
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("imgnorm={log_level}").into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    if let Err(err) = run(&args) {
        tracing::error!("{err:#}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn run(args: &Args) -> Result<()> {
    let image = imgnorm::read(&args.input)
        .with_context(|| format!("Failed to load {}", args.input.display()))?;

    println!(
        "{}: {} {}",
        args.input.display(),
        image.element_type(),
        image.shape()
    );

    if let Some(output) = &args.output {
        tracing::info!("Saving normalized image to: {}", output.display());
        imgnorm::save_image(&image, output).context("Failed to save image")?;
    }

    Ok(())
}
