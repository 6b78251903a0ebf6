//! Photo sphere sidecar tool.
//!
//! Reads a panorama descriptor from JSON, validates it, and writes the
//! GPano properties into a new or existing `.xmp` sidecar packet. Image
//! containers themselves are never rewritten.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use gpano::{write_photo_sphere, PanoramaDescriptor, PanoramaParams};
use xmp_document::XmpDocument;

#[derive(Parser, Debug)]
#[command(name = "panotool")]
#[command(about = "Write photo sphere (GPano) metadata into XMP sidecar files")]
struct Args {
    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check a descriptor JSON file and report every violated constraint
    Validate {
        /// Path to the descriptor JSON file
        params: PathBuf,
    },

    /// Write a descriptor into a new or merged .xmp sidecar
    Write {
        /// Path to the descriptor JSON file
        params: PathBuf,

        /// Output sidecar path
        #[arg(short, long)]
        output: PathBuf,

        /// Existing sidecar packet to merge into
        #[arg(long)]
        merge: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level: Level = args.log_level.parse().unwrap_or(Level::INFO);
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match args.command {
        Command::Validate { params } => validate(&params),
        Command::Write {
            params,
            output,
            merge,
        } => write_sidecar(&params, &output, merge.as_deref()),
    }
}

fn load_descriptor(path: &Path) -> Result<PanoramaDescriptor> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let params: PanoramaParams =
        serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;
    params
        .into_descriptor()
        .with_context(|| format!("invalid descriptor in {}", path.display()))
}

fn validate(params: &Path) -> Result<()> {
    let text =
        fs::read_to_string(params).with_context(|| format!("reading {}", params.display()))?;
    let params: PanoramaParams = serde_json::from_str(&text).context("parsing descriptor JSON")?;

    match params.into_descriptor() {
        Ok(_) => {
            info!("descriptor is valid");
            Ok(())
        }
        Err(err) => {
            for violation in &err.violations {
                warn!(%violation, "constraint violated");
            }
            bail!("descriptor failed validation ({} violations)", err.violations.len());
        }
    }
}

fn write_sidecar(params: &Path, output: &Path, merge: Option<&Path>) -> Result<()> {
    let descriptor = load_descriptor(params)?;

    let mut doc = match merge {
        Some(path) => {
            let packet = fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            XmpDocument::from_packet(&packet)
                .with_context(|| format!("parsing sidecar {}", path.display()))?
        }
        None => XmpDocument::new(),
    };

    write_photo_sphere(&descriptor, &mut doc).context("writing photo sphere metadata")?;

    fs::write(output, doc.to_packet())
        .with_context(|| format!("writing {}", output.display()))?;
    info!(output = %output.display(), "wrote sidecar");
    Ok(())
}
