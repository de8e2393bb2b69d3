//! Tilebox OpenAPI generator — merges buf-generated YAML fragments into the
//! single published API document.
//!
//! Usage:
//!   generate-openapi [OUTPUT]
//!
//! `buf generate` emits one OpenAPI fragment per service into an ephemeral
//! directory; the fragments are folded together with a recursive merge, the
//! fixed Tilebox metadata is folded in last, and the result is written to
//! OUTPUT (default: openapi.yaml).

mod fragments;
mod merge;
mod overrides;

use anyhow::{Context, Result};
use clap::Parser;
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// Merge buf-generated OpenAPI fragments into one document.
#[derive(Parser, Debug)]
#[command(name = "generate-openapi")]
#[command(about = "Merge buf-generated OpenAPI fragments into one document")]
struct Args {
    /// Path of the merged OpenAPI document to write.
    #[arg(default_value = "openapi.yaml")]
    output: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    // Dropped on every exit path, taking the generated fragments with it.
    let fragment_dir = tempfile::tempdir().context("Failed to create fragment directory")?;

    tracing::info!("Generating protobuf to {}", fragment_dir.path().display());
    fragments::generate(fragment_dir.path());

    let document = merged_document(fragment_dir.path())?;

    tracing::info!("Writing merged output to {}", args.output.display());
    let yaml =
        serde_yaml::to_string(&document).context("Failed to serialize merged document")?;
    fs::write(&args.output, yaml)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    Ok(())
}

/// Fold every fragment under `fragment_dir` into one document, then fold the
/// metadata overrides in last so they win at every key they define.
fn merged_document(fragment_dir: &Path) -> Result<Value> {
    let mut document = Value::Mapping(Mapping::new());

    for path in fragments::collect(fragment_dir)? {
        tracing::info!("Merging {}", path.display());
        let fragment = fragments::load(&path)?;
        merge::merge_into(&mut document, &fragment);
    }

    merge::merge_into(&mut document, &overrides::metadata_overrides()?);

    Ok(document)
}
