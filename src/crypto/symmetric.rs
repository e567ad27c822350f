//! # Symmetric Encryption
//!
//! AES-256-GCM for bulk confidentiality and integrity.
//!
//! ## Blob Layout
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         AEAD BLOB FORMAT                                │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  ┌──────────────┬──────────────────────────────┬──────────────────┐    │
//! │  │ Nonce (12 B) │ Ciphertext (len(plaintext))  │ Tag (16 B)       │    │
//! │  └──────────────┴──────────────────────────────┴──────────────────┘    │
//! │                                                                         │
//! │  • Nonce: fresh from a CSPRNG on every call                            │
//! │  • Tag: 128-bit GCM tag, appended by the AEAD primitive                │
//! │  • No associated data                                                  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Tag verification is done inside `aes-gcm` in constant time; a failed
//! check surfaces as [`Error::AuthenticationError`] and nothing else.

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce as AesNonce,
};
use rand::{CryptoRng, RngCore};
use sha2::{Digest, Sha256};
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::random::secure_rng;
use crate::error::{Error, Result};

/// Size of the AES-GCM nonce in bytes (96 bits)
pub const NONCE_SIZE: usize = 12;

/// Size of the AES-GCM authentication tag in bytes (128 bits)
pub const TAG_SIZE: usize = 16;

/// Size of the symmetric key in bytes (256 bits)
pub const KEY_SIZE: usize = 32;

/// A nonce (number used once) for AES-GCM encryption
///
/// **Never reuse a nonce with the same key.** Nonces here are always drawn
/// fresh from the caller's CSPRNG, which is safe for up to 2^32 messages per
/// key. Envelope keys are single-use anyway.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Nonce([u8; NONCE_SIZE]);

impl Nonce {
    /// Draw a random nonce
    pub fn random<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        let mut bytes = [0u8; NONCE_SIZE];
        rng.fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// Get the raw bytes
    pub fn as_bytes(&self) -> &[u8; NONCE_SIZE] {
        &self.0
    }
}

/// A 256-bit AES key
///
/// Zeroized when dropped.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SymmetricKey([u8; KEY_SIZE]);

impl SymmetricKey {
    /// Create from raw bytes
    pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self(bytes)
    }

    /// Create from a slice, which must be exactly 32 bytes
    pub fn from_slice(slice: &[u8]) -> Result<Self> {
        let bytes: [u8; KEY_SIZE] = slice.try_into().map_err(|_| {
            Error::InvalidArgument(format!(
                "Symmetric key must be {} bytes, got {}",
                KEY_SIZE,
                slice.len()
            ))
        })?;
        Ok(Self(bytes))
    }

    /// Generate a fresh random key
    pub fn generate<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        let mut bytes = [0u8; KEY_SIZE];
        rng.fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// Get the raw key bytes
    ///
    /// Only for key wrapping. Never log or persist these bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.0
    }
}

impl std::fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SymmetricKey(..)")
    }
}

/// Derive a key as `SHA-256(UTF-8(passphrase))`
///
/// ## Security Note
///
/// This is a convenience mapping from a string to a key, not a password
/// hashing KDF: there is no salt and no work factor. Callers protecting
/// human-chosen passwords must stretch them first and pass the result to
/// [`SymmetricKey::from_bytes`].
pub fn derive_key(passphrase: &str) -> SymmetricKey {
    SymmetricKey(Sha256::digest(passphrase.as_bytes()).into())
}

/// Encrypt with AES-256-GCM under a fresh OS-random nonce
///
/// Returns `nonce ‖ ciphertext ‖ tag`.
pub fn encrypt(key: &SymmetricKey, plaintext: &[u8]) -> Result<Vec<u8>> {
    encrypt_with_rng(&mut secure_rng(), key, plaintext)
}

/// Encrypt with AES-256-GCM, drawing the nonce from `rng`
pub fn encrypt_with_rng<R: RngCore + CryptoRng>(
    rng: &mut R,
    key: &SymmetricKey,
    plaintext: &[u8],
) -> Result<Vec<u8>> {
    let nonce = Nonce::random(rng);
    let cipher = Aes256Gcm::new_from_slice(&key.0)
        .map_err(|e| Error::EncryptionFailed(format!("Invalid key: {}", e)))?;

    let ciphertext = cipher
        .encrypt(AesNonce::from_slice(&nonce.0), plaintext)
        .map_err(|e| Error::EncryptionFailed(format!("AES-GCM encryption failed: {}", e)))?;

    let mut blob = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
    blob.extend_from_slice(&nonce.0);
    blob.extend_from_slice(&ciphertext);
    Ok(blob)
}

/// Decrypt a `nonce ‖ ciphertext ‖ tag` blob
///
/// ## Errors
///
/// - `EnvelopeMalformed` if the blob cannot even hold a nonce and a tag
/// - `AuthenticationError` if the tag does not verify (tampering, wrong key)
pub fn decrypt(key: &SymmetricKey, blob: &[u8]) -> Result<Vec<u8>> {
    if blob.len() < NONCE_SIZE + TAG_SIZE {
        return Err(Error::EnvelopeMalformed(format!(
            "AEAD blob is {} bytes, need at least {}",
            blob.len(),
            NONCE_SIZE + TAG_SIZE
        )));
    }

    let (nonce, ciphertext) = blob.split_at(NONCE_SIZE);
    let cipher = Aes256Gcm::new_from_slice(&key.0)
        .map_err(|e| Error::InvalidArgument(format!("Invalid key: {}", e)))?;

    cipher
        .decrypt(AesNonce::from_slice(nonce), ciphertext)
        .map_err(|_| Error::AuthenticationError)
}

// ============================================================================
// TESTS
// ============================================================================
