use std::collections::HashMap;

use ayushmaan_primitives::buf::Buf32;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::errors::RegistryError;

/// What the ledger holds for one batch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntry {
    pub root: Buf32,
    pub metadata_ref: String,
}

/// Write-once registry of batch roots, normally the on-chain drug registry.
pub trait RootLedger {
    /// Records a batch root. A batch can only be published once.
    fn publish(&self, batch_id: &str, entry: LedgerEntry) -> Result<(), RegistryError>;

    fn lookup(&self, batch_id: &str) -> Result<Option<LedgerEntry>, RegistryError>;
}

#[derive(Debug, Default)]
pub struct InMemoryLedger {
    entries: RwLock<HashMap<String, LedgerEntry>>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl RootLedger for InMemoryLedger {
    fn publish(&self, batch_id: &str, entry: LedgerEntry) -> Result<(), RegistryError> {
        let mut entries = self.entries.write();
        if entries.contains_key(batch_id) {
            return Err(RegistryError::AlreadyPublished(batch_id.to_owned()));
        }
        entries.insert(batch_id.to_owned(), entry);
        Ok(())
    }

    fn lookup(&self, batch_id: &str) -> Result<Option<LedgerEntry>, RegistryError> {
        Ok(self.entries.read().get(batch_id).cloned())
    }
}

impl<T: RootLedger + ?Sized> RootLedger for &T {
    fn publish(&self, batch_id: &str, entry: LedgerEntry) -> Result<(), RegistryError> {
        (**self).publish(batch_id, entry)
    }

    fn lookup(&self, batch_id: &str) -> Result<Option<LedgerEntry>, RegistryError> {
        (**self).lookup(batch_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_once() {
        let ledger = InMemoryLedger::new();
        let entry = LedgerEntry {
            root: Buf32::from([1; 32]),
            metadata_ref: "ref-1".to_owned(),
        };
        ledger.publish("b1", entry.clone()).unwrap();
        assert_eq!(ledger.lookup("b1").unwrap(), Some(entry));
        assert_eq!(ledger.lookup("b2").unwrap(), None);

        let again = LedgerEntry {
            root: Buf32::from([2; 32]),
            metadata_ref: "ref-2".to_owned(),
        };
        assert!(matches!(
            ledger.publish("b1", again),
            Err(RegistryError::AlreadyPublished(id)) if id == "b1"
        ));
        assert_eq!(ledger.lookup("b1").unwrap().unwrap().root, Buf32::from([1; 32]));
        assert_eq!(ledger.len(), 1);
    }
}
