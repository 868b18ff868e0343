use std::{
    fs,
    io::{self, Write},
    path::PathBuf,
    process::ExitCode,
};

use anyhow::Context;
use argh::FromArgs;
use ayushmaan_merkle::MerkleProof;
use ayushmaan_primitives::buf::Buf32;

/// Checks a unit against a published root
#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand, name = "verify")]
pub struct VerifyArgs {
    /// published batch root, hex
    #[argh(positional)]
    root: String,

    /// unit identifier
    #[argh(positional)]
    unit: String,

    /// proof JSON as printed by `proof`
    #[argh(positional)]
    proof: PathBuf,
}

pub fn verify(args: VerifyArgs) -> anyhow::Result<ExitCode> {
    verify_to(&args, &mut io::stdout().lock())
}

fn verify_to(args: &VerifyArgs, out: &mut impl Write) -> anyhow::Result<ExitCode> {
    let root: Buf32 = args.root.parse().context("parsing root")?;
    let raw = fs::read_to_string(&args.proof)
        .with_context(|| format!("reading proof {}", args.proof.display()))?;

    // A proof file that doesn't parse is a usage error, not a negative answer.
    let proof: MerkleProof = serde_json::from_str(&raw).context("parsing proof")?;

    if ayushmaan_merkle::verify(&root, &args.unit, &proof.siblings()) {
        writeln!(out, "genuine")?;
        Ok(ExitCode::SUCCESS)
    } else {
        writeln!(out, "not genuine")?;
        Ok(ExitCode::FAILURE)
    }
}
