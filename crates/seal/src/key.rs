use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::SealError;

pub const SEAL_KEY_LEN: usize = 32;

/// Shared AES-256 key used to seal and open strip labels.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SealKey([u8; SEAL_KEY_LEN]);

impl SealKey {
    pub fn new(bytes: [u8; SEAL_KEY_LEN]) -> Self {
        Self(bytes)
    }

    /// Parses 64 hex chars, surrounding whitespace and a `0x` prefix allowed.
    pub fn from_hex(s: &str) -> Result<Self, SealError> {
        let s = s.trim();
        let s = s.strip_prefix("0x").unwrap_or(s);
        let mut bytes = hex::decode(s).map_err(|e| SealError::InvalidKey(e.to_string()))?;
        if bytes.len() != SEAL_KEY_LEN {
            let len = bytes.len();
            bytes.zeroize();
            return Err(SealError::InvalidKey(format!(
                "expected {SEAL_KEY_LEN} bytes, got {len}"
            )));
        }

        let mut key = [0u8; SEAL_KEY_LEN];
        key.copy_from_slice(&bytes);
        bytes.zeroize();
        Ok(Self(key))
    }

    pub(crate) fn as_bytes(&self) -> &[u8; SEAL_KEY_LEN] {
        &self.0
    }
}

impl fmt::Debug for SealKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SealKey(<redacted>)")
    }
}
