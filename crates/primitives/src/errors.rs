//! Errors during parsing/handling/conversion of primitives.

use thiserror::Error;

/// Parsing errors for the fixed-size buffers.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    /// The provided string is not valid hex.
    #[error("supplied string is not valid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    /// The decoded bytes have the wrong length.
    #[error("expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
}
