use aes_gcm_siv::{
    aead::{Aead, KeyInit, Payload},
    Aes256GcmSiv, Key, Nonce,
};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use rand::{thread_rng, RngCore};
use tracing::*;

use crate::{
    error::{DecodeFailure, SealError},
    key::SealKey,
    payload::{split_frame, SealedBody, UnsealedRefs, FORMAT_VERSION, HEADER_LEN, NONCE_LEN},
};

/// Seals and opens strip payloads under one shared key.
#[derive(Clone, Debug)]
pub struct PayloadGuard {
    key: SealKey,
}

impl PayloadGuard {
    pub fn new(key: SealKey) -> Self {
        Self { key }
    }

    /// Seals the pair with the current time and a fresh random nonce.
    pub fn seal(&self, primary_ref: &str, secondary_ref: &str) -> Result<String, SealError> {
        let issued_at = chrono::Utc::now().timestamp_millis();
        self.seal_with(primary_ref, secondary_ref, issued_at, &mut thread_rng())
    }

    pub fn seal_with(
        &self,
        primary_ref: &str,
        secondary_ref: &str,
        issued_at: i64,
        rng: &mut impl RngCore,
    ) -> Result<String, SealError> {
        let body = SealedBody::new(primary_ref, secondary_ref, issued_at);
        self.seal_body(&body, rng)
    }

    pub(crate) fn seal_body(
        &self,
        body: &SealedBody,
        rng: &mut impl RngCore,
    ) -> Result<String, SealError> {
        let plaintext = borsh::to_vec(body).map_err(|_| SealError::Encrypt)?;

        let mut nonce = [0u8; NONCE_LEN];
        rng.fill_bytes(&mut nonce);

        let ciphertext = self
            .cipher()
            .encrypt(
                Nonce::from_slice(&nonce),
                Payload {
                    msg: &plaintext,
                    aad: &[FORMAT_VERSION],
                },
            )
            .map_err(|_| SealError::Encrypt)?;

        let mut raw = Vec::with_capacity(HEADER_LEN + ciphertext.len());
        raw.push(FORMAT_VERSION);
        raw.extend_from_slice(&nonce);
        raw.extend_from_slice(&ciphertext);
        Ok(URL_SAFE_NO_PAD.encode(raw))
    }

    /// Opens a sealed payload and checks the refs against the embedded digest.
    pub fn unseal(&self, code: &str) -> Result<UnsealedRefs, SealError> {
        let raw = URL_SAFE_NO_PAD
            .decode(code.trim())
            .map_err(|_| DecodeFailure::Encoding)?;
        let (version, nonce, ciphertext) = split_frame(&raw)?;

        let plaintext = self
            .cipher()
            .decrypt(
                Nonce::from_slice(nonce),
                Payload {
                    msg: ciphertext,
                    aad: &[version],
                },
            )
            .map_err(|_| DecodeFailure::Decrypt)?;

        let body: SealedBody = borsh::from_slice(&plaintext).map_err(|_| DecodeFailure::Body)?;

        if !body.is_intact() {
            warn!(
                primary_ref = %body.primary_ref,
                secondary_ref = %body.secondary_ref,
                "sealed payload failed integrity check"
            );
            return Err(SealError::Tampered);
        }

        Ok(body.into_refs())
    }

    fn cipher(&self) -> Aes256GcmSiv {
        Aes256GcmSiv::new(Key::<Aes256GcmSiv>::from_slice(self.key.as_bytes()))
    }
}

/// Seals `(primary_ref, secondary_ref)` under `key`.
pub fn seal(primary_ref: &str, secondary_ref: &str, key: &SealKey) -> Result<String, SealError> {
    PayloadGuard::new(key.clone()).seal(primary_ref, secondary_ref)
}

/// Opens a code produced by [`seal`].
pub fn unseal(code: &str, key: &SealKey) -> Result<UnsealedRefs, SealError> {
    PayloadGuard::new(key.clone()).unseal(code)
}

#[cfg(test)]
mod tests {
    use ayushmaan_test_utils::batch::{random_key_bytes, TEST_SEAL_KEY};

    use super::*;

    fn guard() -> PayloadGuard {
        PayloadGuard::new(SealKey::new(TEST_SEAL_KEY))
    }

    #[test]
    fn test_batch_seven_scenario() {
        let key = SealKey::new(TEST_SEAL_KEY);
        let code = seal("batch-7", "A3", &key).unwrap();

        let refs = unseal(&code, &key).unwrap();
        assert_eq!(refs.primary_ref, "batch-7");
        assert_eq!(refs.secondary_ref, "A3");

        let wrong = SealKey::new(random_key_bytes());
        assert_eq!(
            unseal(&code, &wrong),
            Err(SealError::Decode(DecodeFailure::Decrypt))
        );
    }

    #[test]
    fn test_round_trip_keeps_timestamp() {
        let guard = guard();
        let pairs = [("batch-1", "S-0001"), ("", ""), ("ब्याच", "पट्टी-९"), ("x", "y|z")];
        for (primary, secondary) in pairs {
            let code = guard
                .seal_with(primary, secondary, 1_700_000_000_000, &mut thread_rng())
                .unwrap();
            let refs = guard.unseal(&code).unwrap();
            assert_eq!(refs.primary_ref, primary);
            assert_eq!(refs.secondary_ref, secondary);
            assert_eq!(refs.issued_at, 1_700_000_000_000);
        }
    }

    #[test]
    fn test_code_is_url_safe() {
        let code = guard().seal("batch-7", "A3").unwrap();
        assert!(code
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn test_fresh_nonce_per_seal() {
        let guard = guard();
        let a = guard.seal_with("b", "u", 0, &mut thread_rng()).unwrap();
        let b = guard.seal_with("b", "u", 0, &mut thread_rng()).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_any_flipped_byte_is_rejected() {
        let guard = guard();
        let code = guard.seal("batch-7", "A3").unwrap();
        let raw = URL_SAFE_NO_PAD.decode(&code).unwrap();

        for i in 0..raw.len() {
            let mut flipped = raw.clone();
            flipped[i] ^= 0x01;
            let res = guard.unseal(&URL_SAFE_NO_PAD.encode(&flipped));
            assert!(
                matches!(res, Err(SealError::Decode(_)) | Err(SealError::Tampered)),
                "byte {i} flip accepted: {res:?}"
            );
        }
    }

    #[test]
    fn test_swapped_refs_detected() {
        let guard = guard();
        let honest = SealedBody::new("batch-7", "A3", 0);
        let forged = SealedBody {
            primary_ref: "batch-9".to_owned(),
            ..honest.clone()
        };
        let swapped = SealedBody {
            primary_ref: honest.secondary_ref.clone(),
            secondary_ref: honest.primary_ref.clone(),
            ..honest
        };

        for body in [forged, swapped] {
            let code = guard.seal_body(&body, &mut thread_rng()).unwrap();
            assert_eq!(guard.unseal(&code), Err(SealError::Tampered));
        }
    }

    #[test]
    fn test_garbage_is_decode_error() {
        let guard = guard();
        assert_eq!(
            guard.unseal("not*base64"),
            Err(SealError::Decode(DecodeFailure::Encoding))
        );
        assert_eq!(
            guard.unseal("AQID"),
            Err(SealError::Decode(DecodeFailure::Truncated))
        );
    }
}
