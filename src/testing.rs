//! Shared fixtures for unit tests.
//!
//! RSA generation dominates test time, so each test binary generates its
//! key pairs once.

use once_cell::sync::Lazy;

use crate::crypto::KeyPair;

/// Sender-side fixture
pub(crate) static KEYPAIR_1024_A: Lazy<KeyPair> =
    Lazy::new(|| KeyPair::generate_seeded(1024, b"fixture-a").expect("fixture key A"));

/// Recipient-side fixture
pub(crate) static KEYPAIR_1024_B: Lazy<KeyPair> =
    Lazy::new(|| KeyPair::generate_seeded(1024, b"fixture-b").expect("fixture key B"));

/// Unrelated third party
pub(crate) static KEYPAIR_1024_C: Lazy<KeyPair> =
    Lazy::new(|| KeyPair::generate_seeded(1024, b"fixture-c").expect("fixture key C"));

/// Production-strength fixture
pub(crate) static KEYPAIR_2048: Lazy<KeyPair> =
    Lazy::new(|| KeyPair::generate_seeded(2048, b"fixture-2048").expect("fixture key 2048"));
