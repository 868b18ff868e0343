use std::process::ExitCode;

use argh::FromArgs;
use ayushmaan_seal::PayloadGuard;

use crate::settings::Settings;

/// Seals a batch reference and unit reference into label text
#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand, name = "seal")]
pub struct SealArgs {
    /// batch or token reference
    #[argh(positional)]
    primary: String,

    /// unit reference
    #[argh(positional)]
    secondary: String,
}

pub fn seal(args: SealArgs, settings: &Settings) -> anyhow::Result<ExitCode> {
    let guard = PayloadGuard::new(settings.seal_key()?.clone());
    println!("{}", guard.seal(&args.primary, &args.secondary)?);
    Ok(ExitCode::SUCCESS)
}
