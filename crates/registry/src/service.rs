use std::ops::ControlFlow;

use ayushmaan_merkle::{build_tree, verify, BatchTree, MerkleError};
use ayushmaan_primitives::buf::Buf32;
use ayushmaan_seal::{PayloadGuard, UnsealedRefs};
use serde::Serialize;
use tracing::*;

use crate::{
    errors::RegistryError,
    labels::{seal_labels, Label},
    ledger::{LedgerEntry, RootLedger},
    metadata::BatchMetadata,
    store::MetadataStore,
};

/// Outcome of checking a unit against its batch's published root.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Genuine,

    /// The unit isn't one of the batch's leaves.
    NotInBatch,

    /// The stored metadata no longer reproduces the published root.
    RootMismatch,
}

/// Returned once a batch has been committed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReceipt {
    pub batch_id: String,
    pub root: Buf32,
    pub metadata_ref: String,
    pub units: usize,
}

/// Result of verifying a scanned label.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanReport {
    pub refs: UnsealedRefs,
    pub verdict: Verdict,
}

/// Ties the committer, the ledger and the metadata store together.
#[derive(Debug)]
pub struct BatchService<L, M> {
    ledger: L,
    store: M,
}

impl<L: RootLedger, M: MetadataStore> BatchService<L, M> {
    pub fn new(ledger: L, store: M) -> Self {
        Self { ledger, store }
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    pub fn store(&self) -> &M {
        &self.store
    }

    /// Commits a batch: builds its tree, stores the metadata and publishes
    /// the root.
    pub fn register_batch(&self, metadata: &BatchMetadata) -> Result<BatchReceipt, RegistryError> {
        metadata.validate()?;
        let batch_id = metadata.batch_id();

        if self.ledger.lookup(batch_id)?.is_some() {
            return Err(RegistryError::AlreadyPublished(batch_id.to_owned()));
        }

        let tree = build_tree(metadata.units())?;
        let metadata_ref = self.store.put(&metadata.encode()?)?;
        let entry = LedgerEntry {
            root: tree.root(),
            metadata_ref: metadata_ref.clone(),
        };
        self.ledger.publish(batch_id, entry)?;

        info!(%batch_id, root = %tree.root(), units = tree.len(), %metadata_ref, "registered batch");
        Ok(BatchReceipt {
            batch_id: batch_id.to_owned(),
            root: tree.root(),
            metadata_ref,
            units: tree.len(),
        })
    }

    /// Rebuilds a published batch's tree from the metadata store.
    pub fn load_batch(
        &self,
        batch_id: &str,
    ) -> Result<(LedgerEntry, BatchMetadata, BatchTree), RegistryError> {
        let entry = self
            .ledger
            .lookup(batch_id)?
            .ok_or_else(|| RegistryError::UnknownBatch(batch_id.to_owned()))?;

        let doc = self.store.fetch(&entry.metadata_ref)?;
        let metadata = BatchMetadata::decode(&doc)?;
        if metadata.batch_id() != batch_id {
            return Err(RegistryError::BatchIdMismatch {
                expected: batch_id.to_owned(),
                found: metadata.batch_id().to_owned(),
            });
        }

        let tree = build_tree(metadata.units())?;
        Ok((entry, metadata, tree))
    }

    /// Checks one unit against the root on the ledger.
    pub fn verify_unit(&self, batch_id: &str, unit: &str) -> Result<Verdict, RegistryError> {
        let (entry, _, tree) = self.load_batch(batch_id)?;

        if tree.root() != entry.root {
            warn!(%batch_id, published = %entry.root, rebuilt = %tree.root(), "stored batch doesn't match published root");
            return Ok(Verdict::RootMismatch);
        }

        let proof = match tree.get_proof(unit) {
            Ok(proof) => proof,
            Err(MerkleError::NotFound) => {
                debug!(%batch_id, %unit, "unit not in batch");
                return Ok(Verdict::NotInBatch);
            }
            Err(e) => return Err(e.into()),
        };

        if verify(&entry.root, unit, &proof.siblings()) {
            Ok(Verdict::Genuine)
        } else {
            Ok(Verdict::RootMismatch)
        }
    }

    /// Opens a scanned label and checks the unit it names.
    pub fn verify_scan(
        &self,
        code: &str,
        guard: &PayloadGuard,
    ) -> Result<ScanReport, RegistryError> {
        let refs = guard.unseal(code)?;
        let verdict = self.verify_unit(&refs.primary_ref, &refs.secondary_ref)?;
        Ok(ScanReport { refs, verdict })
    }

    /// Seals a label for every unit of a batch, `chunk_size` at a time. The
    /// sink can stop issuance between chunks. Returns the number of labels
    /// handed out.
    pub fn issue_labels<F>(
        &self,
        batch_id: &str,
        guard: &PayloadGuard,
        chunk_size: usize,
        sink: F,
    ) -> Result<usize, RegistryError>
    where
        F: FnMut(&[Label]) -> ControlFlow<()>,
    {
        let (_, metadata, tree) = self.load_batch(batch_id)?;
        let issued = seal_labels(&tree, metadata.units(), batch_id, guard, chunk_size, sink)?;

        debug!(%batch_id, %issued, "issued labels");
        Ok(issued)
    }
}
