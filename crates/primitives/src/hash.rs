//! Common wrapper around whatever we choose our native hash function to be.
//!
//! Everything here is Keccak-256, matching the roots already published by the
//! on-chain drug registry. The same function is used for leaves, inner nodes,
//! payload digests and content references with no domain tag.

use alloy_primitives::keccak256;

use crate::buf::Buf32;

/// Direct untagged hash.
pub fn raw(buf: &[u8]) -> Buf32 {
    Buf32::from(keccak256(buf))
}

/// Leaf hash for a unit identifier, over its UTF-8 bytes.
pub fn leaf(identifier: &str) -> Buf32 {
    raw(identifier.as_bytes())
}

/// Combines two nodes into their parent. The pair is ordered by byte value
/// before concatenation, so the result doesn't depend on which side each
/// input came from.
pub fn sorted_pair(a: &Buf32, b: &Buf32) -> Buf32 {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    let mut buf = [0u8; 64];
    buf[..32].copy_from_slice(lo.as_slice());
    buf[32..].copy_from_slice(hi.as_slice());
    raw(&buf)
}

/// Integrity digest carried inside a sealed payload: `H(secondary ‖ primary)`.
///
/// There's no separator between the refs, so splits of the same bytes
/// collide. Only meaningful for refs that already passed the AEAD tag.
pub fn integrity_digest(primary_ref: &str, secondary_ref: &str) -> Buf32 {
    let mut buf = Vec::with_capacity(primary_ref.len() + secondary_ref.len());
    buf.extend_from_slice(secondary_ref.as_bytes());
    buf.extend_from_slice(primary_ref.as_bytes());
    raw(&buf)
}
