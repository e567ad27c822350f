//! Random number sources.
//!
//! Operations that consume randomness take `&mut R` where
//! `R: RngCore + CryptoRng` instead of reaching for a process-wide
//! generator. [`secure_rng`] is the production source. [`seeded_rng`] exists
//! only for reproducible key generation in tests.

use rand::rngs::OsRng;
use rand_chacha::ChaCha20Rng;
use rand_core::SeedableRng;
use sha2::{Digest, Sha256};

/// The operating system CSPRNG
///
/// `OsRng` holds no state, so every handle draws independently and handles
/// can be created freely on any thread.
pub fn secure_rng() -> OsRng {
    OsRng
}

/// A deterministic generator seeded from `SHA-256(seed)`
///
/// ## Security Warning
///
/// Output is fully predictable from the seed. Use it to make test keys
/// reproducible, never for production keys or nonces, and never share one
/// instance between concurrent callers.
pub fn seeded_rng(seed: &[u8]) -> ChaCha20Rng {
    tracing::warn!("Using a deterministic seeded RNG; output is predictable");
    ChaCha20Rng::from_seed(Sha256::digest(seed).into())
}
