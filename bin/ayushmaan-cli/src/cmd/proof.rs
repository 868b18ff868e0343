use std::{path::PathBuf, process::ExitCode};

use argh::FromArgs;
use ayushmaan_merkle::build_tree;

use super::read_identifiers;

/// Prints the inclusion proof for one unit as JSON
#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand, name = "proof")]
pub struct ProofArgs {
    /// file with one unit identifier per line, in batch order
    #[argh(positional)]
    ids: PathBuf,

    /// unit to prove
    #[argh(positional)]
    unit: String,
}

pub fn proof(args: ProofArgs) -> anyhow::Result<ExitCode> {
    let ids = read_identifiers(&args.ids)?;
    let tree = build_tree(&ids)?;
    let proof = tree.get_proof(&args.unit)?;
    println!("{}", serde_json::to_string_pretty(&proof)?);
    Ok(ExitCode::SUCCESS)
}
