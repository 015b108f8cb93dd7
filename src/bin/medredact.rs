//! CLI binary for medredact.
//!
//! A thin shim over the library crate: `redact` runs the merge/redact core
//! over saved detector output, `derive-key` prints output-key derivation,
//! and `poll` exercises the client submit-and-poll flow against a local
//! filesystem store.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use medredact::adapters::fs::FsStore;
use medredact::adapters::ObjectStore;
use medredact::{
    build_layout, derive_output_key, filter_entities, redact, submit_and_poll, Entity,
    PollOutcome, RedactionConfig,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const AFTER_HELP: &str = r#"EXAMPLES:
  # Redact a text file using saved detector output (stdout)
  medredact redact notes.txt --pii pii.json --phi phi.json

  # Write the redacted text to a file, with a custom threshold
  medredact redact notes.txt --pii pii.json --phi phi.json \
      --threshold 0.9 -o notes_redacted.txt

  # Emit the two-page document layout as JSON instead of plain text
  medredact redact notes.txt --pii pii.json --phi phi.json --layout

  # Show the output key a processed document will appear under
  medredact derive-key "uploads/patient chart.pdf"

  # Upload a document into a local store root and wait for its redacted
  # counterpart (written by a separately running pipeline)
  medredact poll --root /var/medredact scan.pdf --interval-secs 2 --attempts 30

DETECTOR JSON:
  --pii/--phi files contain an array of entities. Both this crate's field
  names and raw detector response casing are accepted:

    [{"category": "NAME", "score": 0.97, "begin": 8, "end": 16}]
    [{"Type": "DATE", "Score": 0.92, "BeginOffset": 23, "EndOffset": 33}]

ENVIRONMENT VARIABLES:
  RUST_LOG    Log filter, e.g. RUST_LOG=medredact=debug
"#;

/// Redact PII/PHI from documents using saved detector output.
#[derive(Parser, Debug)]
#[command(
    name = "medredact",
    version,
    about = "Redact PII/PHI from medical documents",
    after_help = AFTER_HELP
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Merge detector results and redact a text file.
    Redact {
        /// Path to the extracted text file.
        text: PathBuf,

        /// JSON file with PII detector entities.
        #[arg(long)]
        pii: PathBuf,

        /// JSON file with PHI detector entities.
        #[arg(long)]
        phi: PathBuf,

        /// Confidence threshold; entities must score strictly above it.
        #[arg(long, default_value_t = medredact::DEFAULT_SCORE_THRESHOLD)]
        threshold: f32,

        /// Marker substituted for each redacted span.
        #[arg(long, default_value = medredact::DEFAULT_MARKER)]
        marker: String,

        /// Write output here instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Emit the two-page document layout as JSON (summary page left
        /// empty) instead of plain redacted text.
        #[arg(long)]
        layout: bool,
    },

    /// Print the derived output key for an input object key.
    DeriveKey {
        /// Input object key, e.g. "uploads/scan.pdf".
        key: String,

        /// Suffix replacing ".pdf".
        #[arg(long, default_value = "_redacted.pdf")]
        suffix: String,
    },

    /// Upload a document to a filesystem store and poll for the redacted
    /// counterpart.
    Poll {
        /// Local file to upload.
        file: PathBuf,

        /// Root directory of the filesystem object store.
        #[arg(long)]
        root: PathBuf,

        /// Seconds between existence checks.
        #[arg(long, default_value_t = 1)]
        interval_secs: u64,

        /// Number of checks before giving up.
        #[arg(long, default_value_t = 60)]
        attempts: u32,

        /// Where to write the downloaded redacted document.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse().command {
        Command::Redact {
            text,
            pii,
            phi,
            threshold,
            marker,
            output,
            layout,
        } => {
            let source = std::fs::read_to_string(&text)
                .with_context(|| format!("reading text file {}", text.display()))?;
            let pii = read_entities(&pii)?;
            let phi = read_entities(&phi)?;

            let pii = filter_entities(pii, threshold);
            let phi = filter_entities(phi, threshold);
            let redacted = redact(&source, &pii, &phi, &marker)?;

            let rendered = if layout {
                serde_json::to_string_pretty(&build_layout(&redacted, ""))? + "\n"
            } else {
                redacted
            };

            match output {
                Some(path) => std::fs::write(&path, rendered)
                    .with_context(|| format!("writing {}", path.display()))?,
                None => print!("{rendered}"),
            }
        }

        Command::DeriveKey { key, suffix } => {
            println!("{}", derive_output_key(&key, &suffix));
        }

        Command::Poll {
            file,
            root,
            interval_secs,
            attempts,
            output,
        } => {
            let bytes = std::fs::read(&file)
                .with_context(|| format!("reading {}", file.display()))?;
            let filename = file
                .file_name()
                .and_then(|n| n.to_str())
                .context("file name is not valid UTF-8")?
                .to_string();

            let config = RedactionConfig::builder()
                .poll_interval(Duration::from_secs(interval_secs))
                .poll_max_attempts(attempts)
                .build()?;
            let store: Arc<dyn ObjectStore> = Arc::new(FsStore::new(root));

            match submit_and_poll(&store, &config, &filename, bytes).await? {
                PollOutcome::Ready { key, bytes } => {
                    let out = output.unwrap_or_else(|| PathBuf::from(&key));
                    std::fs::write(&out, bytes)
                        .with_context(|| format!("writing {}", out.display()))?;
                    eprintln!("Redacted document saved to {}", out.display());
                }
                PollOutcome::StillProcessing { key, attempts } => {
                    eprintln!(
                        "'{key}' not ready after {attempts} checks. \
                         Processing may still be running — check back later."
                    );
                }
            }
        }
    }

    Ok(())
}

fn read_entities(path: &PathBuf) -> Result<Vec<Entity>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading entity file {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing entities in {}", path.display()))
}
