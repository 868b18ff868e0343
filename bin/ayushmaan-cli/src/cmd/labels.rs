use std::{
    io::{self, Write},
    ops::ControlFlow,
    path::PathBuf,
    process::ExitCode,
};

use argh::FromArgs;
use ayushmaan_merkle::build_tree;
use ayushmaan_registry::seal_labels;
use ayushmaan_seal::PayloadGuard;
use tracing::*;

use super::read_identifiers;
use crate::settings::Settings;

/// Seals a label for every unit of a batch, printing one JSON label per line
#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand, name = "labels")]
pub struct LabelsArgs {
    /// file with one unit identifier per line, in batch order
    #[argh(positional)]
    ids: PathBuf,

    /// batch reference to bind into every label
    #[argh(positional)]
    batch: String,

    /// labels per chunk (default from config)
    #[argh(option)]
    chunk_size: Option<usize>,
}

pub fn labels(args: LabelsArgs, settings: &Settings) -> anyhow::Result<ExitCode> {
    let guard = PayloadGuard::new(settings.seal_key()?.clone());
    let chunk_size = args.chunk_size.unwrap_or(settings.chunk_size());
    labels_to(&args, &guard, chunk_size, &mut io::stdout().lock())
}

fn labels_to(
    args: &LabelsArgs,
    guard: &PayloadGuard,
    chunk_size: usize,
    out: &mut impl Write,
) -> anyhow::Result<ExitCode> {
    let ids = read_identifiers(&args.ids)?;
    let tree = build_tree(&ids)?;

    let mut write_err: Option<anyhow::Error> = None;
    let issued = seal_labels(&tree, &ids, &args.batch, guard, chunk_size, |chunk| {
        for label in chunk {
            let res = serde_json::to_string(label)
                .map_err(anyhow::Error::from)
                .and_then(|line| writeln!(out, "{line}").map_err(anyhow::Error::from));
            if let Err(e) = res {
                write_err = Some(e);
                return ControlFlow::Break(());
            }
        }
        ControlFlow::Continue(())
    })?;

    if let Some(e) = write_err {
        return Err(e);
    }

    info!(batch = %args.batch, %issued, root = %tree.root(), "issued labels");
    Ok(ExitCode::SUCCESS)
}
