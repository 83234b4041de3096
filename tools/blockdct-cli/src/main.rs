//! Command-line front end: compress an image and report its fidelity

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use blockdct::consts::{DEFAULT_BLOCK_SIZE, DEFAULT_QUALITY};
use blockdct::{
    channel_metrics, decode_image, load_image, metrics, save_image, Channel, CompressOptions,
    CompressionReport, Compressor,
};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "blockdct", version, about = "Block DCT compression simulator")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compress and reconstruct an image, then report MSE/PSNR and sizes
    Compress {
        input: PathBuf,
        /// Where to write the reconstruction (format from extension)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Quality, 1-100
        #[arg(short, long, default_value_t = DEFAULT_QUALITY)]
        quality: u32,
        /// Block edge length in pixels
        #[arg(short, long, default_value_t = DEFAULT_BLOCK_SIZE)]
        block_size: usize,
        /// Run on the current thread only
        #[arg(long, default_value_t = false)]
        sequential: bool,
        /// Print the report as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Compare two images of the same size
    Metrics {
        original: PathBuf,
        reconstructed: PathBuf,
        /// Also print per-channel figures
        #[arg(long, default_value_t = false)]
        channels: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match args.command {
        Command::Compress {
            input,
            output,
            quality,
            block_size,
            sequential,
            json,
        } => {
            let options = CompressOptions::new()
                .quality(quality)
                .block_size(block_size)
                .parallel(!sequential);
            run_compress(&input, output.as_deref(), options, json)
        }
        Command::Metrics {
            original,
            reconstructed,
            channels,
        } => run_metrics(&original, &reconstructed, channels),
    }
}

fn run_compress(
    input: &Path,
    output: Option<&Path>,
    options: CompressOptions,
    json: bool,
) -> Result<()> {
    let source = fs::read(input).with_context(|| format!("Failed to read {}", input.display()))?;
    let image =
        decode_image(&source).with_context(|| format!("Failed to decode {}", input.display()))?;
    info!(
        "Loaded {}: {}, quality={}, block_size={}",
        input.display(),
        image.dimensions(),
        options.quality,
        options.block_size
    );

    let quality = options.quality;
    let compression = Compressor::new(options)
        .compress(&image)
        .context("Compression failed")?;
    let report = CompressionReport::build(source.len(), &compression, quality)
        .context("Failed to re-encode reconstruction")?;

    if let Some(path) = output {
        save_image(compression.reconstructed(), path, quality)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("Wrote {}", path.display());
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("PSNR:              {:.2} dB ({})", report.psnr, report.rating);
        println!("MSE:               {:.2}", report.mse);
        println!("Original size:     {} bytes", report.original_size);
        println!("Compressed size:   {} bytes", report.compressed_size);
        println!("Compression ratio: {:.2}", report.compression_ratio);
        println!("Space saved:       {:.1}%", report.space_saved);
    }
    Ok(())
}

fn run_metrics(original: &Path, reconstructed: &Path, per_channel: bool) -> Result<()> {
    let a = load_image(original).with_context(|| format!("Failed to load {}", original.display()))?;
    let b = load_image(reconstructed)
        .with_context(|| format!("Failed to load {}", reconstructed.display()))?;

    let overall = metrics(&a, &b).context("Cannot compare images")?;
    println!("PSNR: {:.2} dB ({})", overall.psnr, overall.rating());
    println!("MSE:  {:.2}", overall.mse);

    if per_channel {
        for (channel, m) in Channel::ALL.iter().zip(channel_metrics(&a, &b)?) {
            println!("  {:<5} PSNR {:>6.2} dB, MSE {:.2}", channel.name(), m.psnr, m.mse);
        }
    }
    Ok(())
}
