use ayushmaan_merkle::MerkleError;
use ayushmaan_seal::SealError;
use thiserror::Error;

use crate::metadata::MetadataError;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("merkle: {0}")]
    Merkle(#[from] MerkleError),

    #[error("seal: {0}")]
    Seal(#[from] SealError),

    #[error("metadata: {0}")]
    Metadata(#[from] MetadataError),

    #[error("batch {0} was never published")]
    UnknownBatch(String),

    #[error("batch {0} is already published")]
    AlreadyPublished(String),

    #[error("no document stored under {0}")]
    MissingDocument(String),

    #[error("document under {0} doesn't match its reference")]
    CorruptDocument(String),

    #[error("metadata is for batch {found}, expected {expected}")]
    BatchIdMismatch { expected: String, found: String },

    #[error("tree has {tree} leaves but {units} units were given")]
    UnitCountMismatch { tree: usize, units: usize },
}
