use std::{fs, path::Path, path::PathBuf};

use anyhow::{bail, Context};
use argh::FromArgs;

pub mod commit;
pub mod labels;
pub mod proof;
pub mod register;
pub mod seal;
pub mod unseal;
pub mod verify;

/// Batch commitment and strip label tooling
#[derive(FromArgs, PartialEq, Debug)]
pub struct TopLevel {
    /// path to a TOML config file
    #[argh(option, short = 'c')]
    pub config: Option<PathBuf>,

    #[argh(subcommand)]
    pub cmd: Commands,
}

#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand)]
pub enum Commands {
    Commit(commit::CommitArgs),
    Proof(proof::ProofArgs),
    Verify(verify::VerifyArgs),
    Seal(seal::SealArgs),
    Unseal(unseal::UnsealArgs),
    Labels(labels::LabelsArgs),
    Register(register::RegisterArgs),
}

/// Reads one identifier per line. Surrounding whitespace is dropped and blank
/// lines are skipped; order is kept since it decides the tree shape.
pub fn read_identifiers(path: &Path) -> anyhow::Result<Vec<String>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading identifiers from {}", path.display()))?;
    let ids: Vec<String> = raw
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_owned)
        .collect();

    if ids.is_empty() {
        bail!("no identifiers in {}", path.display());
    }
    Ok(ids)
}
