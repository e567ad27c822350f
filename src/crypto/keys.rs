//! # Key Pair Lifecycle
//!
//! Generation, DER serialization and fingerprinting in one unit.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        KEY PAIR LIFECYCLE                               │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  strength, rng ──► RSA keygen ──► PKCS#8 DER (private, zeroized)       │
//! │                                └─► SPKI DER  (public)                  │
//! │                                       │                                 │
//! │                                       ▼                                 │
//! │                               SHA-256 ──► Fingerprint                  │
//! │                                                                         │
//! │  The caller owns storage. Nothing here persists keys.                  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use rand::{CryptoRng, RngCore};
use rsa::RsaPrivateKey;
use zeroize::Zeroizing;

use super::asymmetric::{check_strength, PrivateKey};
use super::fingerprint::Fingerprint;
use super::random::{secure_rng, seeded_rng};
use crate::error::{Error, Result};

/// An RSA key pair in DER form plus the fingerprint of its public half
///
/// Immutable once created. The private key bytes are zeroized on drop.
#[derive(Clone)]
pub struct KeyPair {
    public_key: Vec<u8>,
    private_key: Zeroizing<Vec<u8>>,
    fingerprint: Fingerprint,
    strength: usize,
}

impl KeyPair {
    /// Generate a new key pair from the OS CSPRNG
    pub fn generate(strength_bits: usize) -> Result<Self> {
        Self::generate_with_rng(&mut secure_rng(), strength_bits)
    }

    /// Generate a deterministic key pair from `seed`
    ///
    /// ## Security Warning
    ///
    /// Anyone who knows the seed can regenerate the private key. This exists
    /// for reproducible tests only.
    pub fn generate_seeded(strength_bits: usize, seed: &[u8]) -> Result<Self> {
        Self::generate_with_rng(&mut seeded_rng(seed), strength_bits)
    }

    /// Generate a key pair drawing randomness from `rng`
    pub fn generate_with_rng<R: RngCore + CryptoRng>(rng: &mut R, strength_bits: usize) -> Result<Self> {
        check_strength(strength_bits)?;

        let rsa = RsaPrivateKey::new(rng, strength_bits)
            .map_err(|e| Error::KeyGenerationFailed(e.to_string()))?;
        let keypair = Self::from_private(&PrivateKey::from_rsa(rsa))?;

        tracing::debug!(
            "Generated {}-bit key pair {}",
            keypair.strength,
            keypair.fingerprint
        );
        Ok(keypair)
    }

    /// Rebuild a key pair from a DER PKCS#8 private key
    ///
    /// The public key is re-derived and re-encoded, so the fingerprint always
    /// matches what [`KeyPair::generate`] would have produced.
    pub fn from_private_key_der(der: &[u8]) -> Result<Self> {
        Self::from_private(&PrivateKey::from_der(der)?)
    }

    fn from_private(private: &PrivateKey) -> Result<Self> {
        let public = private.public_key()?;
        Ok(Self {
            public_key: public.to_der()?,
            private_key: private.to_der()?,
            fingerprint: *public.fingerprint(),
            strength: private.modulus_bytes() * 8,
        })
    }

    /// DER `SubjectPublicKeyInfo`; safe to share
    pub fn public_key(&self) -> &[u8] {
        &self.public_key
    }

    /// DER PKCS#8 private key
    ///
    /// Only hand this to secure storage. Never log or transmit it.
    pub fn private_key(&self) -> &[u8] {
        &self.private_key
    }

    /// SHA-256 of [`KeyPair::public_key`]
    pub fn fingerprint(&self) -> &Fingerprint {
        &self.fingerprint
    }

    /// Modulus size in bits
    pub fn strength(&self) -> usize {
        self.strength
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("strength", &self.strength)
            .field("fingerprint", &self.fingerprint)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// TESTS
// ============================================================================
