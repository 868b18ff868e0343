//! Plaintext body of a sealed payload and the framing around its ciphertext.
//!
//! Wire layout, before base64url (no padding):
//!
//! ```text
//! version (1) | nonce (12) | ciphertext + tag (body len + 16)
//! ```
//!
//! The version byte is also fed to the cipher as associated data.

use ayushmaan_primitives::{buf::Buf32, hash};
use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use crate::error::DecodeFailure;

pub const FORMAT_VERSION: u8 = 1;
pub const NONCE_LEN: usize = 12;
pub const TAG_LEN: usize = 16;
pub const HEADER_LEN: usize = 1 + NONCE_LEN;

/// What gets encrypted. Field order is part of the format.
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub(crate) struct SealedBody {
    pub primary_ref: String,
    pub secondary_ref: String,
    pub integrity_digest: Buf32,
    /// Unix millis at sealing time.
    pub issued_at: i64,
}

impl SealedBody {
    pub(crate) fn new(primary_ref: &str, secondary_ref: &str, issued_at: i64) -> Self {
        Self {
            primary_ref: primary_ref.to_owned(),
            secondary_ref: secondary_ref.to_owned(),
            integrity_digest: hash::integrity_digest(primary_ref, secondary_ref),
            issued_at,
        }
    }

    /// Whether the embedded digest still matches the refs.
    pub(crate) fn is_intact(&self) -> bool {
        hash::integrity_digest(&self.primary_ref, &self.secondary_ref) == self.integrity_digest
    }

    pub(crate) fn into_refs(self) -> UnsealedRefs {
        UnsealedRefs {
            primary_ref: self.primary_ref,
            secondary_ref: self.secondary_ref,
            issued_at: self.issued_at,
        }
    }
}

/// The refs recovered from a valid sealed payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnsealedRefs {
    /// Batch or token reference.
    pub primary_ref: String,
    /// Unit reference within the batch.
    pub secondary_ref: String,
    pub issued_at: i64,
}

/// Splits raw wire bytes into `(version, nonce, ciphertext)`.
pub(crate) fn split_frame(raw: &[u8]) -> Result<(u8, &[u8], &[u8]), DecodeFailure> {
    if raw.len() < HEADER_LEN + TAG_LEN {
        return Err(DecodeFailure::Truncated);
    }

    let version = raw[0];
    if version != FORMAT_VERSION {
        return Err(DecodeFailure::UnsupportedVersion(version));
    }

    let (nonce, ciphertext) = raw[1..].split_at(NONCE_LEN);
    Ok((version, nonce, ciphertext))
}
