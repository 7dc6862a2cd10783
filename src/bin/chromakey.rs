//! Chroma-key background removal CLI.
//!
//! Decodes one input image, keys out pixels matching the given threshold
//! rule, optionally softens the cut-out edge, and writes a transparent PNG.

use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, Context, Result};
use chromakey::{ChromaKeyRule, EdgeSmoothing, ExtractBackgroundExt};
use clap::Parser;
use image::ImageFormat;
use tracing::{debug, info};

/// Remove a near-uniform background from an image and write a transparent PNG
#[derive(Parser)]
#[command(name = "chromakey", version, about)]
struct Cli {
    /// Input image (any decodable format, e.g. JPEG or PNG)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output PNG path
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Background threshold: one value for all channels, or R,G,B.
    /// A pixel is background when every channel strictly exceeds its bound.
    #[arg(
        short,
        long,
        value_name = "MIN",
        value_delimiter = ',',
        num_args = 1..=3,
        required = true
    )]
    threshold: Vec<u8>,

    /// Alpha box-blur radius for softer edges (0 disables smoothing)
    #[arg(short, long, value_name = "RADIUS", default_value_t = 0)]
    smooth: u32,

    /// Increase log verbosity (-v: INFO, -vv: DEBUG, -vvv: TRACE)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let rule = rule_from_args(&cli.threshold)?;
    let smoothing = (cli.smooth > 0).then(|| EdgeSmoothing::new(cli.smooth));

    let started = Instant::now();
    let decoded = image::open(&cli.input)
        .with_context(|| format!("failed to decode {}", cli.input.display()))?;
    let bitmap = decoded.into_rgba8();
    debug!(
        width = bitmap.width(),
        height = bitmap.height(),
        "decoded input"
    );

    let cut = bitmap
        .extract_background(rule, smoothing)
        .context("background extraction failed")?;
    debug!(
        transparent = cut.pixels().filter(|p| p[3] == 0).count(),
        smooth = cli.smooth,
        "keyed background"
    );

    // Encode fully in memory and persist through a temp-file rename, so a
    // failed run never leaves a truncated file at the output path.
    let mut encoded = Vec::new();
    cut.write_to(&mut Cursor::new(&mut encoded), ImageFormat::Png)
        .context("failed to encode PNG")?;
    write_atomic(&cli.output, &encoded)
        .with_context(|| format!("failed to write {}", cli.output.display()))?;

    info!(
        elapsed_ms = started.elapsed().as_millis() as u64,
        bytes = encoded.len(),
        "finished"
    );
    println!("Background removed and saved to {}", cli.output.display());
    Ok(())
}

fn rule_from_args(threshold: &[u8]) -> Result<ChromaKeyRule> {
    match *threshold {
        [min] => Ok(ChromaKeyRule::uniform(min)),
        [red, green, blue] => Ok(ChromaKeyRule::new(red, green, blue)),
        _ => bail!("--threshold takes one uniform value or an R,G,B triple"),
    }
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.persist(path)?;
    Ok(())
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
