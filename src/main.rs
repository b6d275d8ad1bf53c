use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rasterlab::codec;
use rasterlab::models::AppConfig;
use rasterlab::services::{CompositeOperator, ImageInfo, Operation, Processor};

#[derive(Parser)]
#[command(name = "rasterlab")]
#[command(about = "Rasterlab - quantize, dither, composite, filter and paint RGBA images")]
struct Cli {
    /// YAML config file (falls back to $RASTERLAB_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Fixed RNG seed for random dithering and painterly rendering
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply a single operation
    Apply {
        input: PathBuf,
        output: PathBuf,
        #[arg(value_enum)]
        operation: Operation,
    },
    /// Blur with an N x N Gaussian kernel
    Gaussian {
        input: PathBuf,
        output: PathBuf,
        /// Kernel size (odd)
        #[arg(long)]
        size: usize,
    },
    /// Combine two images of the same size
    Composite {
        input: PathBuf,
        other: PathBuf,
        output: PathBuf,
        #[arg(value_enum)]
        operator: CompositeOperator,
    },
    /// Scale an image
    Resize {
        input: PathBuf,
        output: PathBuf,
        #[arg(long)]
        scale: f32,
    },
    /// Rotate an image
    Rotate {
        input: PathBuf,
        output: PathBuf,
        /// Angle in degrees
        #[arg(long, allow_hyphen_values = true)]
        angle: f32,
    },
    /// Print size and color count
    Info { input: PathBuf },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "rasterlab=debug,raster_core=debug"
    } else {
        "rasterlab=info,raster_core=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    let config_path = AppConfig::resolve_path(cli.config);
    let config = AppConfig::load(config_path.as_deref());
    let mut processor = Processor::new(config, cli.seed);

    match cli.command {
        Commands::Apply {
            input,
            output,
            operation,
        } => transform(&input, &output, |image| {
            processor
                .apply(image, operation)
                .with_context(|| format!("{operation:?} failed"))
        }),
        Commands::Gaussian {
            input,
            output,
            size,
        } => transform(&input, &output, |image| {
            processor
                .gaussian_n(image, size)
                .with_context(|| format!("Gaussian {size}x{size} failed"))
        }),
        Commands::Composite {
            input,
            other,
            output,
            operator,
        } => {
            let second = load(&other)?;
            transform(&input, &output, |image| {
                processor
                    .composite(image, operator, &second)
                    .with_context(|| format!("Composite {operator:?} failed"))
            })
        }
        Commands::Resize {
            input,
            output,
            scale,
        } => transform(&input, &output, |image| {
            Ok(processor.resize(image, scale)?)
        }),
        Commands::Rotate {
            input,
            output,
            angle,
        } => transform(&input, &output, |image| {
            Ok(processor.rotate(image, angle)?)
        }),
        Commands::Info { input } => {
            let info = ImageInfo::of(&load(&input)?);
            println!("{}", input.display());
            println!("  size:   {}x{}", info.width, info.height);
            println!("  colors: {}", info.distinct_colors);
            Ok(())
        }
    }
}

fn load(path: &Path) -> anyhow::Result<raster_core::RasterImage> {
    codec::load(path).with_context(|| format!("Failed to load {}", path.display()))
}

/// Load `input`, run `op`, and write `output` only if `op` succeeded
fn transform<F>(input: &Path, output: &Path, op: F) -> anyhow::Result<()>
where
    F: FnOnce(&mut raster_core::RasterImage) -> anyhow::Result<()>,
{
    let mut image = load(input)?;
    op(&mut image)?;
    codec::save(output, &image).with_context(|| format!("Failed to save {}", output.display()))?;
    println!("Wrote {} ({}x{})", output.display(), image.width(), image.height());
    Ok(())
}
