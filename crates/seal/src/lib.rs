//! Sealed payloads binding a batch reference to a unit reference.
//!
//! The sealed text goes into a QR code or URL. Opening it needs the shared
//! key, and the refs inside must still match the digest that was computed
//! when the label was printed.

pub mod error;
pub mod guard;
pub mod key;
pub mod payload;

pub use error::SealError;
pub use guard::{seal, unseal, PayloadGuard};
pub use key::SealKey;
pub use payload::UnsealedRefs;
