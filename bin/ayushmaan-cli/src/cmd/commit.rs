use std::{path::PathBuf, process::ExitCode};

use argh::FromArgs;
use ayushmaan_merkle::build_tree;

use super::read_identifiers;

/// Builds the batch tree and prints its root
#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand, name = "commit")]
pub struct CommitArgs {
    /// file with one unit identifier per line
    #[argh(positional)]
    ids: PathBuf,
}

pub fn commit(args: CommitArgs) -> anyhow::Result<ExitCode> {
    let ids = read_identifiers(&args.ids)?;
    let tree = build_tree(&ids)?;
    println!("{}", tree.root());
    Ok(ExitCode::SUCCESS)
}
