pub mod cmd;
pub mod settings;

use std::process::ExitCode;

use ayushmaan_common::logging::{self, LoggerConfig};
use cmd::{
    commit::commit, labels::labels, proof::proof, register::register, seal::seal, unseal::unseal,
    verify::verify, Commands, TopLevel,
};
use settings::Settings;
use tracing::*;

fn main() -> ExitCode {
    let TopLevel { config, cmd } = argh::from_env();

    logging::init(LoggerConfig::with_base_name("ayushmaan"));

    let settings = match Settings::load(config.as_deref()) {
        Ok(s) => s,
        Err(e) => {
            error!(err = %e, "failed to load settings");
            eprintln!("error: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let res = match cmd {
        Commands::Commit(args) => commit(args),
        Commands::Proof(args) => proof(args),
        Commands::Verify(args) => verify(args),
        Commands::Seal(args) => seal(args, &settings),
        Commands::Unseal(args) => unseal(args, &settings),
        Commands::Labels(args) => labels(args, &settings),
        Commands::Register(args) => register(args),
    };

    match res {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
