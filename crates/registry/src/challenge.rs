//! Short-lived single-use login challenges.
//!
//! A wallet asks for a challenge, signs it, and presents it back once. The
//! store behind this is a trait so a shared cache can replace the in-process
//! map without touching callers.

use std::{
    collections::HashMap,
    time::{Duration, Instant},
};

use parking_lot::Mutex;
use rand::RngCore;

const CHALLENGE_PREFIX: &str = "AyushmaanChain login challenge";

/// Upper bound on how long any entry may live.
pub const MAX_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Key-value store where every entry expires and can be read at most once.
pub trait NonceStore {
    fn put(&self, key: &str, value: String, ttl: Duration);

    /// Removes the entry and returns it if it hadn't expired yet.
    fn take_once(&self, key: &str) -> Option<String>;
}

#[derive(Debug, Default)]
pub struct InMemoryNonceStore {
    entries: Mutex<HashMap<String, (String, Instant)>>,
}

impl InMemoryNonceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops expired entries, returning how many went.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.lock();
        let before = entries.len();
        entries.retain(|_, (_, expires_at)| *expires_at > now);
        before - entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl NonceStore for InMemoryNonceStore {
    /// Expired entries are dropped on every insert. `ttl` is clamped to
    /// [`MAX_TTL`].
    fn put(&self, key: &str, value: String, ttl: Duration) {
        let now = Instant::now();
        let expires_at = now.checked_add(ttl.min(MAX_TTL)).unwrap_or(now);

        let mut entries = self.entries.lock();
        entries.retain(|_, (_, exp)| *exp > now);
        entries.insert(key.to_owned(), (value, expires_at));
    }

    fn take_once(&self, key: &str) -> Option<String> {
        let (value, expires_at) = self.entries.lock().remove(key)?;
        (Instant::now() < expires_at).then_some(value)
    }
}

/// Creates a fresh challenge message for `subject` (a wallet address) and
/// remembers it for `ttl`. Any earlier challenge for the subject is replaced.
pub fn issue_challenge(
    store: &impl NonceStore,
    subject: &str,
    ttl: Duration,
    rng: &mut impl RngCore,
) -> String {
    let mut nonce = [0u8; 16];
    rng.fill_bytes(&mut nonce);
    let message = format!("{CHALLENGE_PREFIX} {}", hex::encode(nonce));
    store.put(&subject.to_lowercase(), message.clone(), ttl);
    message
}

/// Consumes the challenge for `subject`, returning true only if `presented`
/// is the live challenge. A wrong answer still burns the challenge.
pub fn redeem_challenge(store: &impl NonceStore, subject: &str, presented: &str) -> bool {
    store
        .take_once(&subject.to_lowercase())
        .is_some_and(|expected| expected == presented)
}
