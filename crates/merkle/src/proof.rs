use arbitrary::Arbitrary;
use ayushmaan_primitives::{buf::Buf32, hash};
use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

/// One level of an inclusion proof.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Arbitrary, BorshSerialize, BorshDeserialize, Serialize,
    Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub struct ProofStep {
    sibling: Buf32,

    /// Informational only. Pairs are sorted before hashing, so verification
    /// never looks at this.
    sibling_on_right: bool,
}

impl ProofStep {
    pub fn new(sibling: Buf32, sibling_on_right: bool) -> Self {
        Self {
            sibling,
            sibling_on_right,
        }
    }

    pub fn sibling(&self) -> &Buf32 {
        &self.sibling
    }

    pub fn sibling_on_right(&self) -> bool {
        self.sibling_on_right
    }
}

/// Inclusion proof of one unit in a batch tree.
#[derive(
    Clone, Debug, PartialEq, Eq, Arbitrary, BorshSerialize, BorshDeserialize, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub struct MerkleProof {
    leaf_index: u64,
    steps: Vec<ProofStep>,
}

impl MerkleProof {
    pub fn new(leaf_index: u64, steps: Vec<ProofStep>) -> Self {
        Self { leaf_index, steps }
    }

    pub fn leaf_index(&self) -> u64 {
        self.leaf_index
    }

    pub fn steps(&self) -> &[ProofStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The bare sibling hashes, which is all [`verify`] needs.
    pub fn siblings(&self) -> Vec<Buf32> {
        self.steps.iter().map(|s| s.sibling).collect()
    }

    /// Recomputes the root the proof leads to for the given identifier.
    pub fn compute_root(&self, identifier: &str) -> Buf32 {
        fold_root(identifier, self.steps.iter().map(|s| &s.sibling))
    }

    /// Checks the proof for `identifier` against a published root.
    pub fn verify(&self, identifier: &str, root: &Buf32) -> bool {
        self.compute_root(identifier) == *root
    }
}

/// Decides whether `identifier` belongs to the batch committed to by `root`.
///
/// This never fails: a malformed, truncated or foreign proof just doesn't
/// reproduce the root and the answer is `false`.
pub fn verify(root: &Buf32, identifier: &str, proof: &[Buf32]) -> bool {
    fold_root(identifier, proof.iter()) == *root
}

fn fold_root<'a>(identifier: &str, siblings: impl Iterator<Item = &'a Buf32>) -> Buf32 {
    siblings.fold(hash::leaf(identifier), |acc, sibling| {
        hash::sorted_pair(&acc, sibling)
    })
}
