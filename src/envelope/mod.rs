//! # Envelope Module
//!
//! Sign-then-wrap-then-encrypt delivery of one message to one recipient.
//!
//! ## Wire Format
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           ENVELOPE                                      │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  ┌──────────────┬──────────┬─────────────┬────────────────────────────┐ │
//! │  │ Recipient FP │ Len (BE) │ Wrapped Key │ Nonce ‖ AES-GCM ct ‖ Tag   │ │
//! │  │   32 bytes   │ 4 bytes  │ modulus len │ 12 + package + 16 bytes    │ │
//! │  └──────────────┴──────────┴─────────────┴─────────────┬──────────────┘ │
//! │                                                        │ decrypts to    │
//! │                                                        ▼                │
//! │  ┌──────────────┬──────────┬─────────────┬────────────────────────────┐ │
//! │  │  Sender FP   │ Len (BE) │  Signature  │ Plaintext                  │ │
//! │  │   32 bytes   │ 4 bytes  │ modulus len │ rest of package            │ │
//! │  └──────────────┴──────────┴─────────────┴────────────────────────────┘ │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Lifecycle
//!
//! ```text
//! Plaintext ─► Signed ─► Wrapped+Encrypted ─► (transmit) ─► Decrypted ─► Verified
//!             Sealer::seal ────────────────┘                Opener::open   verify
//! ```
//!
//! `open` stops at *Decrypted*. The sender fingerprint inside an opened
//! envelope is only a claim until [`OpenedEnvelope::verify`] succeeds with
//! that sender's public key.
//!
//! ## Error Kinds
//!
//! | Failure | Error |
//! |---------|-------|
//! | Truncated framing, bad length field | `EnvelopeMalformed` |
//! | Wrapped key does not unwrap (wrong key) | `DecryptionError` |
//! | Ciphertext, nonce or tag altered | `AuthenticationError` |
//! | Signature or signer fingerprint wrong | `SignatureMismatch` |

mod frame;
mod open;
mod package;
mod seal;

pub use frame::LENGTH_PREFIX_SIZE;
pub use open::{open, recipient_fingerprint, verify_envelope, EnvelopeView, OpenedEnvelope, Opener};
pub use package::{InnerPackage, ENVELOPE_DIGEST};
pub use seal::{seal, Sealer};
