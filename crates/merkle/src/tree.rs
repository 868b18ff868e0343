use std::collections::HashSet;

use ayushmaan_primitives::{buf::Buf32, hash};
use tracing::*;

use crate::{
    error::MerkleError,
    proof::{MerkleProof, ProofStep},
};

/// Fully materialized tree over one batch, kept level by level so proofs can
/// be read straight out of it.
///
/// `levels[0]` holds the leaf hashes in batch order and the last level holds
/// only the root. An unpaired node at the end of a level is carried up to the
/// next level unchanged.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchTree {
    levels: Vec<Vec<Buf32>>,
    duplicates: usize,
}

/// Builds the tree for an ordered batch of unit identifiers.
///
/// Order matters: it decides which leaves get paired together. Duplicate
/// identifiers are accepted but reported through [`BatchTree::duplicate_count`].
pub fn build_tree<S: AsRef<str>>(identifiers: &[S]) -> Result<BatchTree, MerkleError> {
    if identifiers.is_empty() {
        return Err(MerkleError::EmptyBatch);
    }

    let leaves: Vec<Buf32> = identifiers
        .iter()
        .map(|id| hash::leaf(id.as_ref()))
        .collect();

    let distinct = leaves.iter().collect::<HashSet<_>>().len();
    let duplicates = leaves.len() - distinct;
    if duplicates > 0 {
        warn!(%duplicates, batch_size = leaves.len(), "batch contains duplicate identifiers");
    }

    let mut levels = vec![leaves];
    while let Some(cur) = levels.last().filter(|l| l.len() > 1) {
        let next = cur
            .chunks(2)
            .map(|pair| match pair {
                [a, b] => hash::sorted_pair(a, b),
                [single] => *single,
                _ => unreachable!("merkle: chunk of two"),
            })
            .collect::<Vec<_>>();
        levels.push(next);
    }

    let tree = BatchTree { levels, duplicates };
    debug!(batch_size = tree.len(), height = tree.height(), root = %tree.root(), "built batch tree");
    Ok(tree)
}

impl BatchTree {
    /// The batch commitment.
    pub fn root(&self) -> Buf32 {
        // Construction guarantees a final level with exactly one node.
        self.levels[self.levels.len() - 1][0]
    }

    /// Number of leaves.
    pub fn len(&self) -> usize {
        self.levels[0].len()
    }

    /// Always false, a tree can't be built over zero identifiers.
    pub fn is_empty(&self) -> bool {
        self.levels[0].is_empty()
    }

    /// Number of levels above the leaves.
    pub fn height(&self) -> usize {
        self.levels.len() - 1
    }

    pub fn leaves(&self) -> &[Buf32] {
        &self.levels[0]
    }

    pub fn levels(&self) -> &[Vec<Buf32>] {
        &self.levels
    }

    pub fn duplicate_count(&self) -> usize {
        self.duplicates
    }

    /// Index of the first leaf for the identifier, if it's in the batch.
    pub fn position(&self, identifier: &str) -> Option<usize> {
        let leaf = hash::leaf(identifier);
        self.leaves().iter().position(|l| *l == leaf)
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.position(identifier).is_some()
    }

    /// Inclusion proof for an identifier. With duplicates, the first
    /// occurrence is used.
    pub fn get_proof(&self, identifier: &str) -> Result<MerkleProof, MerkleError> {
        let index = self.position(identifier).ok_or(MerkleError::NotFound)?;
        self.proof_at(index)
    }

    /// Inclusion proof for the leaf at `index`.
    pub fn proof_at(&self, index: usize) -> Result<MerkleProof, MerkleError> {
        if index >= self.len() {
            return Err(MerkleError::IndexOutOfBounds(index, self.len()));
        }

        let mut steps = Vec::with_capacity(self.height());
        let mut idx = index;
        for level in &self.levels[..self.height()] {
            let sibling_idx = idx ^ 1;
            // No sibling means this node was promoted as-is.
            if let Some(sibling) = level.get(sibling_idx) {
                steps.push(ProofStep::new(*sibling, sibling_idx > idx));
            }
            idx >>= 1;
        }

        Ok(MerkleProof::new(index as u64, steps))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("A{i}")).collect()
    }

    #[test]
    fn test_empty_batch_rejected() {
        let empty: Vec<String> = Vec::new();
        assert_eq!(build_tree(&empty), Err(MerkleError::EmptyBatch));
    }

    #[test]
    fn test_single_leaf_is_root() {
        let tree = build_tree(&["only"]).unwrap();
        assert_eq!(tree.root(), hash::leaf("only"));
        assert_eq!(tree.height(), 0);
        assert!(tree.proof_at(0).unwrap().steps().is_empty());
    }

    #[test]
    fn test_deterministic_root() {
        let batch = ids(11);
        let a = build_tree(&batch).unwrap();
        let b = build_tree(&batch).unwrap();
        assert_eq!(a.root(), b.root());
        assert_eq!(a, b);
    }

    #[test]
    fn test_level_shapes_with_promotion() {
        let tree = build_tree(&ids(5)).unwrap();
        let shape: Vec<usize> = tree.levels().iter().map(|l| l.len()).collect();
        assert_eq!(shape, vec![5, 3, 2, 1]);

        // A5 has no partner on the first two levels.
        assert_eq!(tree.levels()[1][2], hash::leaf("A5"));
        assert_eq!(tree.levels()[2][1], hash::leaf("A5"));
    }

    #[test]
    fn test_three_leaf_root_by_hand() {
        let tree = build_tree(&["x", "y", "z"]).unwrap();
        let xy = hash::sorted_pair(&hash::leaf("x"), &hash::leaf("y"));
        let expected = hash::sorted_pair(&xy, &hash::leaf("z"));
        assert_eq!(tree.root(), expected);
    }

    #[test]
    fn test_reversal_keeps_root_for_power_of_two() {
        for n in [2, 4, 8] {
            let batch = ids(n);
            let mut rev = batch.clone();
            rev.reverse();
            assert_eq!(
                build_tree(&batch).unwrap().root(),
                build_tree(&rev).unwrap().root(),
                "n = {n}"
            );
        }
    }

    #[test]
    fn test_reversal_changes_root_for_odd_count() {
        for n in [3, 5, 7] {
            let batch = ids(n);
            let mut rev = batch.clone();
            rev.reverse();
            assert_ne!(
                build_tree(&batch).unwrap().root(),
                build_tree(&rev).unwrap().root(),
                "n = {n}"
            );
        }
    }

    #[test]
    fn test_adjacent_swap_across_pair_boundary_changes_root() {
        let batch = ids(4);
        let swapped = vec!["A1", "A3", "A2", "A4"];
        assert_ne!(
            build_tree(&batch).unwrap().root(),
            build_tree(&swapped).unwrap().root()
        );

        // Swapping within a pair doesn't.
        let within = vec!["A2", "A1", "A3", "A4"];
        assert_eq!(
            build_tree(&batch).unwrap().root(),
            build_tree(&within).unwrap().root()
        );
    }

    #[test]
    fn test_duplicates_are_counted() {
        let tree = build_tree(&["A1", "A2", "A1", "A1"]).unwrap();
        assert_eq!(tree.duplicate_count(), 2);
        assert_eq!(tree.position("A1"), Some(0));
        assert_eq!(build_tree(&ids(4)).unwrap().duplicate_count(), 0);
    }

    #[test]
    fn test_proof_at_out_of_bounds() {
        let tree = build_tree(&ids(3)).unwrap();
        assert_eq!(tree.proof_at(3), Err(MerkleError::IndexOutOfBounds(3, 3)));
    }
}
