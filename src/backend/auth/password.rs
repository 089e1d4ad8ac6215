/**
 * Password Hashing
 *
 * This module wraps bcrypt for one-way password storage.
 *
 * # Digest Format
 *
 * Digests are modular-crypt strings (`$2b$<cost>$<salt+hash>`), so the cost
 * and salt travel with the digest. Raising the configured cost only affects
 * new hashes; stored digests keep verifying with the cost they were made with.
 *
 * # Blocking
 *
 * bcrypt is deliberately slow. The `*_async` variants move the work onto
 * tokio's blocking pool so request tasks keep the runtime free.
 */

use bcrypt::BcryptError;

/// Password hasher with a fixed work factor
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    /// Create a hasher using the given bcrypt cost
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Hash a plaintext password
    ///
    /// # Returns
    /// A self-describing bcrypt digest, or an error if bcrypt rejects the cost
    pub fn hash(&self, plaintext: &str) -> Result<String, BcryptError> {
        bcrypt::hash(plaintext, self.cost)
    }

    /// Check a plaintext password against a stored digest
    ///
    /// Returns `false` on mismatch. A malformed or empty digest is also a
    /// mismatch rather than an error.
    pub fn verify(&self, plaintext: &str, digest: &str) -> bool {
        match bcrypt::verify(plaintext, digest) {
            Ok(valid) => valid,
            Err(e) => {
                tracing::warn!("Stored password digest could not be parsed: {}", e);
                false
            }
        }
    }

    /// [`hash`](Self::hash) on the blocking pool
    pub async fn hash_async(&self, plaintext: String) -> Result<String, PasswordError> {
        let hasher = *self;
        let digest = tokio::task::spawn_blocking(move || hasher.hash(&plaintext)).await??;
        Ok(digest)
    }

    /// [`verify`](Self::verify) on the blocking pool
    pub async fn verify_async(&self, plaintext: String, digest: String) -> Result<bool, PasswordError> {
        let hasher = *self;
        let valid = tokio::task::spawn_blocking(move || hasher.verify(&plaintext, &digest)).await?;
        Ok(valid)
    }
}

/// Failures while hashing
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("bcrypt failed: {0}")]
    Bcrypt(#[from] BcryptError),
    #[error("hashing task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}
