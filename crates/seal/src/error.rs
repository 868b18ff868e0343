use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SealError {
    /// Couldn't be opened at all: bad encoding, wrong key or corrupted bytes.
    #[error("invalid code: {0}")]
    Decode(DecodeFailure),

    /// Opened fine but the refs don't match the embedded digest.
    #[error("tampered or forged code")]
    Tampered,

    #[error("invalid seal key: {0}")]
    InvalidKey(String),

    #[error("encryption failed")]
    Encrypt,
}

/// Why a code couldn't be decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodeFailure {
    #[error("not base64")]
    Encoding,

    #[error("too short")]
    Truncated,

    #[error("unsupported format version {0}")]
    UnsupportedVersion(u8),

    #[error("decryption failed")]
    Decrypt,

    #[error("malformed body")]
    Body,
}

impl From<DecodeFailure> for SealError {
    fn from(value: DecodeFailure) -> Self {
        SealError::Decode(value)
    }
}
