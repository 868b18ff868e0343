//! Batch metadata as kept in the content-addressed store.
//!
//! Documents are JSON tagged with `schemaVersion` and only ever handed out
//! after they've been decoded into one of the known versions and validated.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetadataError {
    #[error("malformed metadata document: {0}")]
    Malformed(String),

    #[error("batch id is empty")]
    EmptyBatchId,

    #[error("batch {0} has no units")]
    NoUnits(String),

    #[error("batch {0} expires before it was manufactured")]
    InvalidExpiry(String),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "schemaVersion")]
pub enum BatchMetadata {
    #[serde(rename = "1")]
    V1(BatchMetadataV1),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchMetadataV1 {
    pub batch_id: String,
    pub drug_name: String,
    pub manufacturer: String,

    /// Unix seconds.
    pub manufactured_at: i64,

    /// Unix seconds.
    pub expires_at: i64,

    /// Strip identifiers in tree order.
    pub units: Vec<String>,
}

impl BatchMetadata {
    /// Parses and validates a stored document.
    pub fn decode(doc: &[u8]) -> Result<Self, MetadataError> {
        let meta: Self =
            serde_json::from_slice(doc).map_err(|e| MetadataError::Malformed(e.to_string()))?;
        meta.validate()?;
        Ok(meta)
    }

    pub fn encode(&self) -> Result<Vec<u8>, MetadataError> {
        serde_json::to_vec(self).map_err(|e| MetadataError::Malformed(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), MetadataError> {
        match self {
            BatchMetadata::V1(m) => {
                if m.batch_id.trim().is_empty() {
                    return Err(MetadataError::EmptyBatchId);
                }
                if m.units.is_empty() {
                    return Err(MetadataError::NoUnits(m.batch_id.clone()));
                }
                if m.expires_at <= m.manufactured_at {
                    return Err(MetadataError::InvalidExpiry(m.batch_id.clone()));
                }
                Ok(())
            }
        }
    }

    pub fn batch_id(&self) -> &str {
        match self {
            BatchMetadata::V1(m) => &m.batch_id,
        }
    }

    pub fn units(&self) -> &[String] {
        match self {
            BatchMetadata::V1(m) => &m.units,
        }
    }
}

impl From<BatchMetadataV1> for BatchMetadata {
    fn from(value: BatchMetadataV1) -> Self {
        BatchMetadata::V1(value)
    }
}
