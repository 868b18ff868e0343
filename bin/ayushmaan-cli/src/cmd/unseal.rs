use std::{
    io::{self, Write},
    process::ExitCode,
};

use argh::FromArgs;
use ayushmaan_seal::{PayloadGuard, SealError};

use crate::settings::Settings;

/// Opens label text and prints the refs inside as JSON
#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand, name = "unseal")]
pub struct UnsealArgs {
    /// sealed label text
    #[argh(positional)]
    code: String,
}

pub fn unseal(args: UnsealArgs, settings: &Settings) -> anyhow::Result<ExitCode> {
    let guard = PayloadGuard::new(settings.seal_key()?.clone());
    unseal_to(&guard, &args.code, &mut io::stdout().lock())
}

fn unseal_to(guard: &PayloadGuard, code: &str, out: &mut impl Write) -> anyhow::Result<ExitCode> {
    match guard.unseal(code) {
        Ok(refs) => {
            writeln!(out, "{}", serde_json::to_string_pretty(&refs)?)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(e @ (SealError::Decode(_) | SealError::Tampered)) => {
            writeln!(out, "rejected: {e}")?;
            Ok(ExitCode::FAILURE)
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use ayushmaan_seal::SealKey;

    use super::*;

    fn run(guard: &PayloadGuard, code: &str) -> (ExitCode, String) {
        let mut out = Vec::new();
        let exit = unseal_to(guard, code, &mut out).unwrap();
        (exit, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_unseal_prints_refs() {
        let guard = PayloadGuard::new(SealKey::new([0x42; 32]));
        let code = guard.seal("batch-7", "A3").unwrap();

        let (exit, out) = run(&guard, &code);
        assert_eq!(exit, ExitCode::SUCCESS);
        let refs: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(refs["primaryRef"], "batch-7");
        assert_eq!(refs["secondaryRef"], "A3");
    }

    #[test]
    fn test_garbage_code_rejected() {
        let guard = PayloadGuard::new(SealKey::new([0x42; 32]));
        let (exit, out) = run(&guard, "definitely not a label!");
        assert_eq!(exit, ExitCode::FAILURE);
        assert!(out.starts_with("rejected: "), "{out}");
    }

    #[test]
    fn test_wrong_key_rejected() {
        let code = PayloadGuard::new(SealKey::new([0x42; 32]))
            .seal("batch-7", "A3")
            .unwrap();
        let (exit, out) = run(&PayloadGuard::new(SealKey::new([0x43; 32])), &code);
        assert_eq!(exit, ExitCode::FAILURE);
        assert!(out.starts_with("rejected: "), "{out}");
    }
}
