use std::{fs, path::PathBuf, process::ExitCode};

use anyhow::Context;
use argh::FromArgs;
use ayushmaan_registry::{BatchMetadata, BatchService, InMemoryLedger, InMemoryMetadataStore};

/// Validates a batch metadata document and prints the receipt to publish
#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand, name = "register")]
pub struct RegisterArgs {
    /// batch metadata JSON (schemaVersion 1)
    #[argh(positional)]
    metadata: PathBuf,
}

pub fn register(args: RegisterArgs) -> anyhow::Result<ExitCode> {
    let raw = fs::read(&args.metadata)
        .with_context(|| format!("reading metadata {}", args.metadata.display()))?;
    let metadata = BatchMetadata::decode(&raw).context("decoding metadata")?;

    // The receipt is what gets written to the ledger and pinned; this run only
    // computes it.
    let svc = BatchService::new(InMemoryLedger::new(), InMemoryMetadataStore::new());
    let receipt = svc.register_batch(&metadata)?;
    println!("{}", serde_json::to_string_pretty(&receipt)?);
    Ok(ExitCode::SUCCESS)
}
