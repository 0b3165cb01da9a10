use argon2::Argon2;
use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;

use super::errors::PasswordError;

/// Length of the derived key stored after the salt (256 bits).
pub const KEY_LEN: usize = 32;

/// PBKDF2 rounds used when no explicit count is configured.
pub const DEFAULT_PBKDF2_ITERATIONS: u32 = 100_000;

/// Key derivation function used to turn a password and salt into a key.
///
/// The digest format does not record which function produced it, so every
/// service reading the same credential store must be configured alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDerivation {
    /// PBKDF2-HMAC-SHA256.
    Pbkdf2Sha256 { iterations: u32 },
    /// Argon2id with the crate's default memory and time costs.
    Argon2id,
}

impl KeyDerivation {
    /// PBKDF2-HMAC-SHA256 with [`DEFAULT_PBKDF2_ITERATIONS`] rounds.
    pub fn pbkdf2() -> Self {
        Self::Pbkdf2Sha256 {
            iterations: DEFAULT_PBKDF2_ITERATIONS,
        }
    }

    /// Derive a [`KEY_LEN`]-byte key.
    ///
    /// # Errors
    /// * `HashingFailed` - Argon2 rejected its inputs (PBKDF2 cannot fail)
    pub fn derive(&self, password: &[u8], salt: &[u8]) -> Result<[u8; KEY_LEN], PasswordError> {
        let mut key = [0u8; KEY_LEN];

        match *self {
            KeyDerivation::Pbkdf2Sha256 { iterations } => {
                pbkdf2_hmac::<Sha256>(password, salt, iterations, &mut key);
            }
            KeyDerivation::Argon2id => {
                Argon2::default()
                    .hash_password_into(password, salt, &mut key)
                    .map_err(|e| PasswordError::HashingFailed(e.to_string()))?;
            }
        }

        Ok(key)
    }
}

impl Default for KeyDerivation {
    fn default() -> Self {
        Self::pbkdf2()
    }
}
