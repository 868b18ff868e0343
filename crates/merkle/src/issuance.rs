//! Bulk proof issuance for whole batches.
//!
//! Proofs are produced a chunk at a time and handed to a sink, so peak memory
//! is bounded by the chunk size and the caller can stop between chunks.

use std::ops::ControlFlow;

use ayushmaan_primitives::buf::Buf32;
use tracing::*;

use crate::{error::MerkleError, proof::MerkleProof, tree::BatchTree};

/// A proof along with the leaf it was issued for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IssuedProof {
    pub index: usize,
    pub leaf: Buf32,
    pub proof: MerkleProof,
}

/// Issues a proof for every leaf of `tree`, in leaf order, `chunk_size` at a
/// time. Returns how many proofs were handed to the sink before it finished
/// or asked to stop.
pub fn issue_chunked<F>(
    tree: &BatchTree,
    chunk_size: usize,
    mut sink: F,
) -> Result<usize, MerkleError>
where
    F: FnMut(&[IssuedProof]) -> ControlFlow<()>,
{
    if chunk_size == 0 {
        return Err(MerkleError::ZeroChunkSize);
    }

    let mut issued = 0;
    let mut chunk = Vec::with_capacity(chunk_size.min(tree.len()));
    for start in (0..tree.len()).step_by(chunk_size) {
        let end = (start + chunk_size).min(tree.len());

        chunk.clear();
        for index in start..end {
            chunk.push(IssuedProof {
                index,
                leaf: tree.leaves()[index],
                proof: tree.proof_at(index)?,
            });
        }

        issued += chunk.len();
        if sink(&chunk).is_break() {
            debug!(%issued, total = tree.len(), "proof issuance stopped by caller");
            break;
        }
    }

    Ok(issued)
}
