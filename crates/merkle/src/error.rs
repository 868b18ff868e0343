use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MerkleError {
    #[error("cannot build tree from zero identifiers")]
    EmptyBatch,

    #[error("unit not part of this batch")]
    NotFound,

    #[error("leaf index {0} exceeds the batch size {1}")]
    IndexOutOfBounds(usize, usize),

    #[error("chunk size must be non-zero")]
    ZeroChunkSize,
}
