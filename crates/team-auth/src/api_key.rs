//! Organization API keys
//!
//! Keys are random alphanumeric strings. Only the SHA-256 digest
//! (base64url, unpadded) is persisted; lookups digest the presented key and
//! compare digests.

use rand::Rng;
use sha2::{Digest, Sha256};

/// A freshly generated API key and its digest.
#[derive(Clone)]
pub struct ApiKey {
    /// Plaintext key, shown to the caller once
    pub plaintext: String,

    /// Digest to persist
    pub digest: String,
}

impl ApiKey {
    /// Generate a new random key of `length` alphanumeric characters.
    ///
    /// # Examples
    ///
    /// ```
    /// use team_auth::ApiKey;
    ///
    /// let key = ApiKey::generate(40);
    /// assert_eq!(key.plaintext.len(), 40);
    /// assert_eq!(ApiKey::digest(&key.plaintext), key.digest);
    /// ```
    pub fn generate(length: usize) -> Self {
        let plaintext: String = rand::thread_rng()
            .sample_iter(&rand::distributions::Alphanumeric)
            .take(length)
            .map(char::from)
            .collect();
        let digest = Self::digest(&plaintext);

        Self { plaintext, digest }
    }

    /// Compute the storage digest of a presented key.
    pub fn digest(key: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(key.as_bytes());
        let hash = hasher.finalize();
        base64::Engine::encode(&base64::engine::general_purpose::URL_SAFE_NO_PAD, hash)
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKey")
            .field("digest", &self.digest)
            .finish_non_exhaustive()
    }
}
