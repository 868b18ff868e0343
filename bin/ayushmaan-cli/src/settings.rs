use std::{fs, path::Path};

use anyhow::{anyhow, Context};
use ayushmaan_common::env::non_empty_env;
use ayushmaan_config::{Config, SEAL_KEY_ENVVAR};
use ayushmaan_seal::SealKey;

#[derive(Debug)]
pub struct Settings {
    pub config: Config,
    seal_key: Option<SealKey>,
}

impl Settings {
    /// Loads the TOML config at `path`, or defaults when no path is given,
    /// and resolves the seal key.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let config = match path {
            Some(path) => {
                let raw = fs::read_to_string(path)
                    .with_context(|| format!("reading config {}", path.display()))?;
                toml::from_str::<Config>(&raw)
                    .with_context(|| format!("parsing config {}", path.display()))?
            }
            None => Config::default(),
        };
        config.validate()?;

        let seal_key = resolve_seal_key(
            non_empty_env(SEAL_KEY_ENVVAR),
            config.seal.key_file.as_deref(),
        )?;

        Ok(Self { config, seal_key })
    }

    pub fn seal_key(&self) -> anyhow::Result<&SealKey> {
        self.seal_key.as_ref().ok_or_else(|| {
            anyhow!("no seal key configured, set {SEAL_KEY_ENVVAR} or seal.key_file")
        })
    }

    pub fn chunk_size(&self) -> usize {
        self.config.issuance.chunk_size
    }
}

/// Picks the seal key, the env value first and then the key file. Neither
/// being set isn't an error here; commands that need a key ask for it.
pub fn resolve_seal_key(
    env: Option<String>,
    key_file: Option<&Path>,
) -> anyhow::Result<Option<SealKey>> {
    if let Some(hex) = env {
        let key = SealKey::from_hex(&hex).with_context(|| format!("parsing {SEAL_KEY_ENVVAR}"))?;
        return Ok(Some(key));
    }

    let Some(file) = key_file else {
        return Ok(None);
    };
    let hex = fs::read_to_string(file)
        .with_context(|| format!("reading seal key {}", file.display()))?;
    let key =
        SealKey::from_hex(&hex).with_context(|| format!("parsing seal key {}", file.display()))?;
    Ok(Some(key))
}
