//! Sealing strip labels for a whole batch.

use std::ops::ControlFlow;

use ayushmaan_merkle::{issue_chunked, BatchTree, MerkleProof};
use ayushmaan_seal::{PayloadGuard, SealError};
use serde::Serialize;

use crate::errors::RegistryError;

/// Everything printed on one strip.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Label {
    pub unit: String,
    pub code: String,
    pub proof: MerkleProof,
}

/// Seals a label binding `batch_ref` to every unit of `tree`, `chunk_size`
/// at a time, in leaf order. `units` must be the identifiers `tree` was built
/// from. The sink can stop issuance between chunks. Returns how many labels
/// were handed to it.
pub fn seal_labels<S, F>(
    tree: &BatchTree,
    units: &[S],
    batch_ref: &str,
    guard: &PayloadGuard,
    chunk_size: usize,
    mut sink: F,
) -> Result<usize, RegistryError>
where
    S: AsRef<str>,
    F: FnMut(&[Label]) -> ControlFlow<()>,
{
    if units.len() != tree.len() {
        return Err(RegistryError::UnitCountMismatch {
            tree: tree.len(),
            units: units.len(),
        });
    }

    let mut failure: Option<SealError> = None;
    let mut labels = Vec::with_capacity(chunk_size.min(units.len()));
    let issued = issue_chunked(tree, chunk_size, |chunk| {
        labels.clear();
        for item in chunk {
            let unit = units[item.index].as_ref();
            match guard.seal(batch_ref, unit) {
                Ok(code) => labels.push(Label {
                    unit: unit.to_owned(),
                    code,
                    proof: item.proof.clone(),
                }),
                Err(e) => {
                    failure = Some(e);
                    return ControlFlow::Break(());
                }
            }
        }
        sink(&labels)
    })?;

    if let Some(e) = failure {
        return Err(e.into());
    }
    Ok(issued)
}

#[cfg(test)]
mod tests {
    use ayushmaan_merkle::{build_tree, MerkleError};
    use ayushmaan_seal::SealKey;
    use ayushmaan_test_utils::batch::{gen_unit_ids, TEST_SEAL_KEY};

    use super::*;

    #[test]
    fn test_labels_open_and_prove() {
        let guard = PayloadGuard::new(SealKey::new(TEST_SEAL_KEY));
        let units = gen_unit_ids("L", 5);
        let tree = build_tree(&units).unwrap();

        let mut chunks = Vec::new();
        let mut labels = Vec::new();
        let issued = seal_labels(&tree, &units, "batch-5", &guard, 2, |chunk| {
            chunks.push(chunk.len());
            labels.extend_from_slice(chunk);
            ControlFlow::Continue(())
        })
        .unwrap();

        assert_eq!(issued, 5);
        assert_eq!(chunks, [2, 2, 1]);
        for (label, unit) in labels.iter().zip(&units) {
            assert_eq!(&label.unit, unit);
            let refs = guard.unseal(&label.code).unwrap();
            assert_eq!(refs.primary_ref, "batch-5");
            assert_eq!(&refs.secondary_ref, unit);
            assert!(label.proof.verify(unit, &tree.root()));
        }
    }

    #[test]
    fn test_unit_list_must_match_tree() {
        let guard = PayloadGuard::new(SealKey::new(TEST_SEAL_KEY));
        let units = gen_unit_ids("L", 4);
        let tree = build_tree(&units).unwrap();
        assert!(matches!(
            seal_labels(&tree, &units[..3], "b", &guard, 2, |_| ControlFlow::Continue(())),
            Err(RegistryError::UnitCountMismatch { tree: 4, units: 3 })
        ));
    }

    #[test]
    fn test_zero_chunk_size() {
        let guard = PayloadGuard::new(SealKey::new(TEST_SEAL_KEY));
        let units = gen_unit_ids("L", 2);
        let tree = build_tree(&units).unwrap();
        assert!(matches!(
            seal_labels(&tree, &units, "b", &guard, 0, |_| ControlFlow::Continue(())),
            Err(RegistryError::Merkle(MerkleError::ZeroChunkSize))
        ));
    }
}
