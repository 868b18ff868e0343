//! Batch commitment crate.
//!
//! A batch of unit identifiers is hashed into a sorted-pair Merkle tree whose
//! root gets published once. Later, any unit can be checked against that root
//! with a short inclusion proof and nothing else.

pub mod error;
pub mod issuance;
pub mod proof;
pub mod tree;

pub use error::MerkleError;
pub use issuance::{issue_chunked, IssuedProof};
pub use proof::{verify, MerkleProof, ProofStep};
pub use tree::{build_tree, BatchTree};
