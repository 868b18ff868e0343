use std::collections::HashMap;

use ayushmaan_primitives::hash;
use parking_lot::RwLock;

use crate::errors::RegistryError;

/// Content-addressed document storage, normally an IPFS-style pinning
/// service. A reference is derived from the bytes it points to.
pub trait MetadataStore {
    fn put(&self, doc: &[u8]) -> Result<String, RegistryError>;

    fn fetch(&self, reference: &str) -> Result<Vec<u8>, RegistryError>;
}

/// Reference for a document: hex Keccak-256 of its bytes.
pub fn content_ref(doc: &[u8]) -> String {
    hash::raw(doc).to_hex()
}

#[derive(Debug, Default)]
pub struct InMemoryMetadataStore {
    docs: RwLock<HashMap<String, Vec<u8>>>,
}

impl InMemoryMetadataStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrites whatever sits under `reference`. Only for simulating a
    /// misbehaving store in tests.
    pub fn insert_raw(&self, reference: &str, doc: Vec<u8>) {
        self.docs.write().insert(reference.to_owned(), doc);
    }
}

impl MetadataStore for InMemoryMetadataStore {
    fn put(&self, doc: &[u8]) -> Result<String, RegistryError> {
        let reference = content_ref(doc);
        self.docs
            .write()
            .entry(reference.clone())
            .or_insert_with(|| doc.to_vec());
        Ok(reference)
    }

    fn fetch(&self, reference: &str) -> Result<Vec<u8>, RegistryError> {
        let doc = self
            .docs
            .read()
            .get(reference)
            .cloned()
            .ok_or_else(|| RegistryError::MissingDocument(reference.to_owned()))?;

        if content_ref(&doc) != reference {
            return Err(RegistryError::CorruptDocument(reference.to_owned()));
        }
        Ok(doc)
    }
}

impl<T: MetadataStore + ?Sized> MetadataStore for &T {
    fn put(&self, doc: &[u8]) -> Result<String, RegistryError> {
        (**self).put(doc)
    }

    fn fetch(&self, reference: &str) -> Result<Vec<u8>, RegistryError> {
        (**self).fetch(reference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_fetch() {
        let store = InMemoryMetadataStore::new();
        let r = store.put(b"hello").unwrap();
        assert_eq!(r, content_ref(b"hello"));
        assert_eq!(store.put(b"hello").unwrap(), r);
        assert_eq!(store.fetch(&r).unwrap(), b"hello");
    }

    #[test]
    fn test_missing_and_corrupt() {
        let store = InMemoryMetadataStore::new();
        assert!(matches!(
            store.fetch("abc"),
            Err(RegistryError::MissingDocument(_))
        ));

        let r = store.put(b"hello").unwrap();
        store.insert_raw(&r, b"goodbye".to_vec());
        assert!(matches!(
            store.fetch(&r),
            Err(RegistryError::CorruptDocument(_))
        ));
    }
}
