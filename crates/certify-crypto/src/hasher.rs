use certify_types::Fingerprint;

/// Domain-separated BLAKE3 content hasher.
///
/// Each hasher carries a domain tag (e.g., `"certify-content-v1"`) that is
/// prepended to every hash computation. This prevents cross-type hash
/// collisions: certificate content and a submission payload with identical
/// bytes produce different digests.
pub struct ContentHasher {
    domain: &'static str,
}

impl ContentHasher {
    /// Hasher for canonical certificate content — the fingerprint domain.
    pub const CONTENT: Self = Self {
        domain: "certify-content-v1",
    };
    /// Hasher for ledger submission payloads.
    pub const SUBMISSION: Self = Self {
        domain: "certify-submission-v1",
    };

    /// Create a hasher with a custom domain tag.
    pub const fn new(domain: &'static str) -> Self {
        Self { domain }
    }

    /// Hash raw bytes with domain separation.
    pub fn hash(&self, data: &[u8]) -> Fingerprint {
        let mut hasher = blake3::Hasher::new();
        hasher.update(self.domain.as_bytes());
        hasher.update(b":");
        hasher.update(data);
        Fingerprint::from_hash(*hasher.finalize().as_bytes())
    }

    /// Hash a serializable value as JSON with domain separation.
    pub fn hash_json<T: serde::Serialize>(&self, value: &T) -> Result<Fingerprint, HasherError> {
        let data =
            serde_json::to_vec(value).map_err(|e| HasherError::Serialization(e.to_string()))?;
        Ok(self.hash(&data))
    }

    /// Verify that data produces the expected fingerprint.
    pub fn verify(&self, data: &[u8], expected: &Fingerprint) -> bool {
        self.hash(data) == *expected
    }

    /// The domain tag used by this hasher.
    pub fn domain(&self) -> &str {
        self.domain
    }
}

/// Errors from hashing operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum HasherError {
    #[error("serialization error: {0}")]
    Serialization(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_deterministic() {
        let data = b"hello world";
        assert_eq!(ContentHasher::CONTENT.hash(data), ContentHasher::CONTENT.hash(data));
    }

    #[test]
    fn different_domains_produce_different_hashes() {
        let data = b"same content";
        assert_ne!(
            ContentHasher::CONTENT.hash(data),
            ContentHasher::SUBMISSION.hash(data)
        );
    }

    #[test]
    fn verify_correct_data() {
        let data = b"test data";
        let fp = ContentHasher::CONTENT.hash(data);
        assert!(ContentHasher::CONTENT.verify(data, &fp));
    }

    #[test]
    fn verify_incorrect_data() {
        let fp = ContentHasher::CONTENT.hash(b"original");
        assert!(!ContentHasher::CONTENT.verify(b"tampered", &fp));
    }

    #[test]
    fn hash_json_works() {
        let value = serde_json::json!({"key": "value", "num": 42});
        let fp = ContentHasher::SUBMISSION.hash_json(&value).unwrap();
        assert_eq!(fp.to_hex().len(), 66);
    }

    #[test]
    fn custom_domain() {
        let hasher = ContentHasher::new("my-custom-domain-v1");
        assert_ne!(hasher.hash(b"data"), ContentHasher::CONTENT.hash(b"data"));
    }
}
