//! # Error Handling
//!
//! This module provides the error types for Seal Core.
//!
//! ## Error Hierarchy
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           ERROR HIERARCHY                               │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  Error (top-level)                                                     │
//! │  │                                                                      │
//! │  ├── Argument Errors (100-199)                                         │
//! │  │   ├── InvalidArgument       - Bad length, oversized RSA input,     │
//! │  │   │                           unknown digest name                   │
//! │  │   └── InvalidKey            - Key bytes are not valid DER           │
//! │  │                                                                      │
//! │  ├── Framing Errors (200-299)                                          │
//! │  │   └── EnvelopeMalformed     - Truncated or inconsistent framing     │
//! │  │                                                                      │
//! │  ├── Crypto Errors (300-399)                                           │
//! │  │   ├── AuthenticationError   - AEAD tag did not verify               │
//! │  │   ├── DecryptionError       - Asymmetric unwrap failed              │
//! │  │   ├── SignatureMismatch     - Signature did not verify              │
//! │  │   ├── EncryptionFailed      - Primitive failed while encrypting     │
//! │  │   └── KeyGenerationFailed   - RSA key generation failed             │
//! │  │                                                                      │
//! │  └── Internal Errors (900-999)                                         │
//! │      ├── AlreadyInitialized    - Config was already installed          │
//! │      └── UnknownOperation      - No slot registered under that name    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Crypto failures are never transient, so nothing in this crate retries.
//! Messages carry lengths and names only, never key material or plaintext.

use thiserror::Error;

/// Result type alias for Seal Core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for Seal Core
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Argument Errors (100-199)
    // ========================================================================

    /// Malformed argument: wrong fingerprint length, oversized RSA plaintext,
    /// unknown algorithm name
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Key material could not be decoded
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    // ========================================================================
    // Framing Errors (200-299)
    // ========================================================================

    /// Envelope or inner package framing is truncated or self-inconsistent
    #[error("Malformed envelope: {0}")]
    EnvelopeMalformed(String),

    // ========================================================================
    // Crypto Errors (300-399)
    // ========================================================================

    /// The AEAD authentication tag did not verify
    #[error("Authentication failed: ciphertext was tampered with or the key is wrong")]
    AuthenticationError,

    /// Asymmetric decryption (key unwrapping) failed
    #[error("Decryption failed: {0}")]
    DecryptionError(String),

    /// Signature verification failed
    #[error("Signature mismatch")]
    SignatureMismatch,

    /// The underlying primitive refused to encrypt
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    /// RSA key generation failed
    #[error("Key generation failed: {0}")]
    KeyGenerationFailed(String),

    // ========================================================================
    // Internal Errors (900-999)
    // ========================================================================

    /// [`crate::initialize`] was called twice
    #[error("Seal Core has already been initialized.")]
    AlreadyInitialized,

    /// No operation is registered under the requested name
    #[error("Unknown operation: {0}")]
    UnknownOperation(String),
}

impl Error {
    /// Get the numeric error code
    ///
    /// Error codes are organized by category:
    /// - 100-199: Arguments
    /// - 200-299: Envelope framing
    /// - 300-399: Crypto
    /// - 900-999: Internal
    pub fn code(&self) -> i32 {
        match self {
            Error::InvalidArgument(_) => 100,
            Error::InvalidKey(_) => 101,

            Error::EnvelopeMalformed(_) => 200,

            Error::AuthenticationError => 300,
            Error::DecryptionError(_) => 301,
            Error::SignatureMismatch => 302,
            Error::EncryptionFailed(_) => 303,
            Error::KeyGenerationFailed(_) => 304,

            Error::AlreadyInitialized => 900,
            Error::UnknownOperation(_) => 901,
        }
    }

    /// Check if this error means the data was altered in transit
    ///
    /// Lets callers tell "tampered data" apart from "wrong key" or
    /// "garbage input".
    pub fn is_tamper_evidence(&self) -> bool {
        matches!(self, Error::AuthenticationError | Error::SignatureMismatch)
    }
}

// ============================================================================
// TESTS
// ============================================================================
