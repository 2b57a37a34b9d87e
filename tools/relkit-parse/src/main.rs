//! relkit-parse
//!
//! Reads a release artifact from a file or stdin and prints the decoded
//! record as JSON.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use relkit_core::{IngestConfig, Ingestor, SummaryConfig};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// CLI arguments
#[derive(Parser)]
#[command(name = "relkit-parse")]
#[command(about = "Decode BBCode specs, MediaInfo reports and torrent files to JSON")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    /// Separator between summary segments
    #[arg(long, env = "RELKIT_SUMMARY_SEPARATOR", default_value = " | ")]
    separator: String,

    /// Distinct audio descriptors kept in the summary
    #[arg(long, env = "RELKIT_MAX_AUDIO", default_value_t = 2)]
    max_audio: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract outermost quote/spoiler blocks rendered to HTML
    Bbcode {
        /// Input file, or `-` for stdin
        #[arg(default_value = "-")]
        input: PathBuf,

        /// Print raw block content instead of HTML
        #[arg(long)]
        raw: bool,
    },
    /// Parse a MediaInfo text report
    Mediainfo {
        /// Input file, or `-` for stdin
        #[arg(default_value = "-")]
        input: PathBuf,

        /// Print only the summary line
        #[arg(long)]
        summary_only: bool,
    },
    /// Decode a .torrent file
    Torrent {
        /// Input file, or `-` for stdin
        #[arg(default_value = "-")]
        input: PathBuf,
    },
    /// Resolve unique language flags for the given labels
    Flags {
        /// Language labels, e.g. "English (SDH)"
        #[arg(required = true)]
        labels: Vec<String>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_env("RELKIT_LOG"))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = IngestConfig::new().with_summary(
        SummaryConfig::new()
            .with_separator(cli.separator.clone())
            .with_max_audio_descriptors(cli.max_audio),
    );
    let ingestor = Ingestor::new(config).context("invalid configuration")?;

    match &cli.command {
        Commands::Bbcode { input, raw } => {
            let text = read_text(input)?;
            if *raw {
                let blocks = relkit_core::extract_blocks(&text);
                info!(blocks = blocks.len(), "extracted bbcode blocks");
                emit(&blocks, cli.pretty)
            } else {
                let specs = ingestor.specs(&text);
                info!(blocks = specs.len(), "extracted bbcode specs");
                emit(&specs, cli.pretty)
            }
        }
        Commands::Mediainfo {
            input,
            summary_only,
        } => {
            let report = ingestor.mediainfo(&read_text(input)?);
            if *summary_only {
                writeln!(io::stdout(), "{}", report.summary)?;
                Ok(())
            } else {
                emit(&report, cli.pretty)
            }
        }
        Commands::Torrent { input } => {
            let bytes = read_bytes(input)?;
            let entry = ingestor
                .torrent(&bytes)
                .with_context(|| format!("failed to decode torrent {}", input.display()))?;
            info!(name = %entry.name, files = entry.files.len(), "decoded torrent");
            emit(&entry, cli.pretty)
        }
        Commands::Flags { labels } => emit(&ingestor.flags(labels), cli.pretty),
    }
}

fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    if path.as_os_str() == "-" {
        let mut buf = Vec::new();
        io::stdin()
            .read_to_end(&mut buf)
            .context("failed to read stdin")?;
        debug!(bytes = buf.len(), "read stdin");
        Ok(buf)
    } else {
        let buf = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
        debug!(bytes = buf.len(), path = %path.display(), "read file");
        Ok(buf)
    }
}

/// Text inputs tolerate invalid UTF-8 the same way the parsers tolerate
/// malformed markup.
fn read_text(path: &Path) -> Result<String> {
    let bytes = read_bytes(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn emit<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    writeln!(io::stdout(), "{json}")?;
    Ok(())
}
