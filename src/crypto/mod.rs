//! # Cryptography Module
//!
//! The two primitive engines the envelope protocol is built from, plus
//! fingerprints, key pairs and RNG handles.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    CRYPTOGRAPHIC ARCHITECTURE                           │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  ┌───────────────────────┐          ┌───────────────────────┐          │
//! │  │  Symmetric (AEAD)     │          │  Asymmetric (RSA)     │          │
//! │  │                       │          │                       │          │
//! │  │ • AES-256-GCM         │          │ • PKCS#1 v1.5 wrap    │          │
//! │  │ • 96-bit random nonce │          │ • PKCS#1 v1.5 sign    │          │
//! │  │ • 128-bit tag         │          │ • SHA-1/2, MD5 digest │          │
//! │  └───────────────────────┘          └───────────┬───────────┘          │
//! │                                                 │                       │
//! │                                     ┌───────────▼───────────┐          │
//! │                                     │  KeyPair              │          │
//! │                                     │ • DER public/private  │          │
//! │                                     │ • Fingerprint (SHA256)│          │
//! │                                     └───────────────────────┘          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Algorithm Choices
//!
//! | Algorithm | Purpose | Notes |
//! |-----------|---------|-------|
//! | AES-256-GCM | Bulk encryption | AEAD, constant-time tag check |
//! | RSA PKCS#1 v1.5 | Key wrapping | Message ≤ modulus − 11 bytes |
//! | RSA PKCS#1 v1.5 | Signatures | SHA-256 default |
//! | SHA-256 | Fingerprints, passphrase keys | Not a password KDF |
//!
//! ## Security Considerations
//!
//! 1. **Key Zeroization**: symmetric keys and private key DER are zeroized on drop
//! 2. **Explicit Randomness**: `_with_rng` variants take every random draw
//!    (keys, nonces, padding, blinding) from the RNG passed in; the plain
//!    variants use the OS RNG
//! 3. **No Nonce Reuse**: a fresh nonce per encryption, a fresh key per envelope

pub mod asymmetric;
mod fingerprint;
mod keys;
pub mod random;
pub mod symmetric;

pub use asymmetric::{generate_key_pair, DigestAlgorithm, PrivateKey, PublicKey};
pub use fingerprint::{fingerprint, from_display_string, to_display_string, Fingerprint, FINGERPRINT_SIZE};
pub use keys::KeyPair;
pub use symmetric::{derive_key, Nonce, SymmetricKey, KEY_SIZE, NONCE_SIZE, TAG_SIZE};
