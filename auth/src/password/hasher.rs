use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use rand::rngs::OsRng;
use rand::RngCore;

use super::errors::PasswordError;
use super::kdf::KeyDerivation;
use super::kdf::KEY_LEN;
use super::timing::constant_time_eq;

/// Length of the random salt prepended to every digest.
pub const SALT_LEN: usize = 16;

/// Password hashing implementation.
///
/// Digests are `base64(salt ‖ derived_key)` with a 16-byte salt and a
/// 32-byte key; PBKDF2-HMAC-SHA256 is used unless configured otherwise.
#[derive(Debug, Clone, Default)]
pub struct PasswordHasher {
    kdf: KeyDerivation,
}

impl PasswordHasher {
    /// Create a new password hasher with the default key derivation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a hasher with an explicit key derivation function.
    ///
    /// # Arguments
    /// * `kdf` - Function used for both hashing and verification
    pub fn with_kdf(kdf: KeyDerivation) -> Self {
        Self { kdf }
    }

    /// Key derivation function this hasher applies.
    pub fn kdf(&self) -> KeyDerivation {
        self.kdf
    }

    /// Hash a plaintext password with a fresh random salt.
    ///
    /// Any string is accepted, including the empty one.
    ///
    /// # Arguments
    /// * `password` - Plaintext password
    ///
    /// # Returns
    /// Base64 (standard alphabet, padded) encoding of `salt ‖ key`
    ///
    /// # Errors
    /// * `HashingFailed` - The key derivation function failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let mut salt = [0u8; SALT_LEN];
        OsRng.fill_bytes(&mut salt);

        let key = self.kdf.derive(password.as_bytes(), &salt)?;

        let mut combined = Vec::with_capacity(SALT_LEN + KEY_LEN);
        combined.extend_from_slice(&salt);
        combined.extend_from_slice(&key);

        Ok(STANDARD.encode(combined))
    }

    /// Verify a password against a stored digest.
    ///
    /// Malformed digests and mismatches both yield `false`; this never errors.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to check
    /// * `digest` - Stored digest produced by [`PasswordHasher::hash`]
    ///
    /// # Returns
    /// `true` only when the re-derived key matches the stored one
    pub fn verify(&self, password: &str, digest: &str) -> bool {
        match self.try_verify(password, digest) {
            Ok(matches) => matches,
            Err(e) => {
                tracing::debug!(error = %e, "Password verification rejected stored digest");
                false
            }
        }
    }

    fn try_verify(&self, password: &str, digest: &str) -> Result<bool, PasswordError> {
        let (salt, stored_key) = split_digest(digest)?;
        let derived = self.kdf.derive(password.as_bytes(), &salt)?;

        Ok(constant_time_eq(&derived, &stored_key))
    }
}

fn split_digest(digest: &str) -> Result<(Vec<u8>, Vec<u8>), PasswordError> {
    let mut combined = STANDARD
        .decode(digest)
        .map_err(|e| PasswordError::MalformedDigest(format!("not base64: {}", e)))?;

    if combined.len() != SALT_LEN + KEY_LEN {
        return Err(PasswordError::MalformedDigest(format!(
            "expected {} bytes, got {}",
            SALT_LEN + KEY_LEN,
            combined.len()
        )));
    }

    let key = combined.split_off(SALT_LEN);
    Ok((combined, key))
}
