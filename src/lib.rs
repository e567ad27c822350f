//! # Seal Core
//!
//! Signed, confidential one-to-one message envelopes over RSA and
//! AES-256-GCM.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          SEAL CORE MODULES                              │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │  Slots (named operations, JSON in / JSON out, base64 bytes)     │   │
//! │  └──────────────┬──────────────────────────────────┬───────────────┘   │
//! │                 │                                  │                    │
//! │  ┌──────────────▼──────────────┐    ┌──────────────▼──────────────┐    │
//! │  │  Envelope                   │    │  Config                     │    │
//! │  │ - Sealer: sign, wrap, AEAD  │    │ - Default strength/digest   │    │
//! │  │ - Opener: unwrap, decrypt   │    │ - Legacy digest policy      │    │
//! │  │ - Verify sender             │    └─────────────────────────────┘    │
//! │  └──────────────┬──────────────┘                                       │
//! │                 │                                                       │
//! │  ┌──────────────▼──────────────────────────────────────────────────┐   │
//! │  │  Crypto                                                         │   │
//! │  │ - AES-256-GCM    - RSA PKCS#1 v1.5    - Fingerprints            │   │
//! │  │ - KeyPair        - RNG handles                                  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Hierarchy
//!
//! - [`error`] - Error types for the entire library
//! - [`crypto`] - Cryptographic primitives (ciphers, signatures, fingerprints)
//! - [`envelope`] - The sealed envelope protocol
//! - [`content`] - Text-or-bytes message input
//! - [`config`] - Process-wide defaults
//! - [`slots`] - Name-keyed operation registry
//!
//! ## Quick Start
//!
//! ```no_run
//! use seal_core::{envelope, KeyPair};
//!
//! # fn main() -> seal_core::Result<()> {
//! let alice = KeyPair::generate(2048)?;
//! let bob = KeyPair::generate(2048)?;
//!
//! let sealed = envelope::seal(
//!     "hello bob",
//!     alice.private_key(),
//!     alice.fingerprint().as_bytes(),
//!     bob.public_key(),
//! )?;
//!
//! let opened = envelope::open(&sealed, bob.private_key())?;
//! opened.verify(alice.public_key())?;
//! assert_eq!(opened.plaintext(), b"hello bob");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod config;
pub mod content;
pub mod crypto;
pub mod envelope;
pub mod error;
pub mod slots;

#[cfg(test)]
mod proptests;
#[cfg(test)]
mod testing;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use config::{config, initialize, CryptoConfig};
pub use content::Content;
pub use crypto::{DigestAlgorithm, Fingerprint, KeyPair};
pub use envelope::{open, seal, verify_envelope, OpenedEnvelope, Opener, Sealer};
pub use error::{Error, Result};
pub use slots::dispatch;

// ============================================================================
// VERSION INFO
// ============================================================================

/// Returns the version of Seal Core
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
