use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default value for `chunk_size` in [`IssuanceConfig`].
const DEFAULT_CHUNK_SIZE: usize = 256;

/// Envvar holding the hex seal key. Takes precedence over `seal.key_file`.
pub const SEAL_KEY_ENVVAR: &str = "AYUSHMAAN_SEAL_KEY";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("issuance.chunk_size must be greater than zero")]
    ZeroChunkSize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SealConfig {
    /// File holding the hex-encoded 32-byte seal key.
    pub key_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssuanceConfig {
    /// How many proofs/labels to produce per chunk during bulk issuance.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
}

impl Default for IssuanceConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub seal: SealConfig,

    #[serde(default)]
    pub issuance: IssuanceConfig,
}

impl Config {
    /// Checks values serde can't.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.issuance.chunk_size == 0 {
            return Err(ConfigError::ZeroChunkSize);
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_config_load() {
        let config_string = r#"
            [seal]
            key_file = "/etc/ayushmaan/seal.key"

            [issuance]
            chunk_size = 64
        "#;

        let config = toml::from_str::<Config>(config_string);
        assert!(
            config.is_ok(),
            "should be able to load TOML config but got: {:?}",
            config.err()
        );
        let config = config.unwrap();
        assert_eq!(
            config.seal.key_file,
            Some(PathBuf::from("/etc/ayushmaan/seal.key"))
        );
        assert_eq!(config.issuance.chunk_size, 64);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_defaults() {
        let config = toml::from_str::<Config>("").unwrap();
        assert_eq!(config.seal.key_file, None);
        assert_eq!(config.issuance.chunk_size, DEFAULT_CHUNK_SIZE);

        let partial = toml::from_str::<Config>("[issuance]\n").unwrap();
        assert_eq!(partial.issuance.chunk_size, DEFAULT_CHUNK_SIZE);
    }

    #[test]
    fn test_zero_chunk_size_invalid() {
        let config = toml::from_str::<Config>("[issuance]\nchunk_size = 0\n").unwrap();
        assert_eq!(config.validate(), Err(ConfigError::ZeroChunkSize));
    }
}
