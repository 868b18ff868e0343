//! Fixtures for batches of strip identifiers and seal keys.

use rand::{rngs::OsRng, RngCore};

/// Fixed key material so failures reproduce.
pub const TEST_SEAL_KEY: [u8; 32] = [0x42; 32];

/// `n` identifiers shaped like the ones printed on strips, `"{prefix}-0001"`
/// onwards.
pub fn gen_unit_ids(prefix: &str, n: usize) -> Vec<String> {
    (1..=n).map(|i| format!("{prefix}-{i:04}")).collect()
}

/// Fresh random key material, for tests that need a key nobody else has.
pub fn random_key_bytes() -> [u8; 32] {
    let mut key = [0u8; 32];
    OsRng.fill_bytes(&mut key);
    key
}
