//! Registration and verification of strip batches.
//!
//! The pieces that live outside this process (the root ledger, the metadata
//! store, the login challenge cache) sit behind traits here, with in-memory
//! implementations for tests and local tooling.

pub mod challenge;
pub mod errors;
pub mod labels;
pub mod ledger;
pub mod metadata;
pub mod service;
pub mod store;

pub use errors::RegistryError;
pub use labels::{seal_labels, Label};
pub use ledger::{InMemoryLedger, LedgerEntry, RootLedger};
pub use metadata::{BatchMetadata, BatchMetadataV1, MetadataError};
pub use service::{BatchReceipt, BatchService, ScanReport, Verdict};
pub use store::{InMemoryMetadataStore, MetadataStore};
