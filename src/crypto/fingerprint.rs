//! # Fingerprints
//!
//! A fingerprint is the SHA-256 digest of a key's DER encoding (or of any
//! content) and serves as the key's stable identity inside envelopes.
//!
//! ## Display Format
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       FINGERPRINT DISPLAY FORMAT                        │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  Raw:      32 bytes (SHA-256)                                          │
//! │                                                                         │
//! │  Display:  lowercase hex, 2 bytes (4 chars) per group, '-' separated   │
//! │                                                                         │
//! │            3f2a-9b10-77c4-...-01e4                                     │
//! │            └──┘                                                        │
//! │           1 group = 2 bytes, 16 groups total, no leading/trailing '-'  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};

use crate::error::{Error, Result};

/// Size of a fingerprint in bytes
pub const FINGERPRINT_SIZE: usize = 32;

/// Bytes per display group
const GROUP_BYTES: usize = 2;

/// A 32-byte SHA-256 fingerprint
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint([u8; FINGERPRINT_SIZE]);

impl Fingerprint {
    /// Fingerprint arbitrary data
    pub fn of(data: &[u8]) -> Self {
        Self(Sha256::digest(data).into())
    }

    /// Create from raw digest bytes
    pub fn from_bytes(bytes: [u8; FINGERPRINT_SIZE]) -> Self {
        Self(bytes)
    }

    /// Create from a slice, rejecting anything that is not exactly 32 bytes
    pub fn from_slice(slice: &[u8]) -> Result<Self> {
        let bytes: [u8; FINGERPRINT_SIZE] = slice.try_into().map_err(|_| {
            Error::InvalidArgument(format!(
                "Fingerprint must be {} bytes, got {}",
                FINGERPRINT_SIZE,
                slice.len()
            ))
        })?;
        Ok(Self(bytes))
    }

    /// Get the raw bytes
    pub fn as_bytes(&self) -> &[u8; FINGERPRINT_SIZE] {
        &self.0
    }

    /// Render in the grouped display format
    pub fn to_display_string(&self) -> String {
        self.0
            .chunks(GROUP_BYTES)
            .map(hex::encode)
            .collect::<Vec<_>>()
            .join("-")
    }
}

/// SHA-256 of `data`
pub fn fingerprint(data: &[u8]) -> Fingerprint {
    Fingerprint::of(data)
}

/// Format a raw digest for humans
///
/// Fails with `InvalidArgument` unless `digest` is exactly 32 bytes.
pub fn to_display_string(digest: &[u8]) -> Result<String> {
    Ok(Fingerprint::from_slice(digest)?.to_display_string())
}

/// Parse the display format back into raw bytes
///
/// Separators are stripped before decoding, so the grouping itself is not
/// validated; the decoded length must still be exactly 32 bytes.
pub fn from_display_string(s: &str) -> Result<Fingerprint> {
    let compact: String = s.chars().filter(|c| *c != '-').collect();
    let bytes = hex::decode(&compact)
        .map_err(|e| Error::InvalidArgument(format!("Invalid fingerprint hex: {}", e)))?;
    Fingerprint::from_slice(&bytes)
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_display_string())
    }
}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fingerprint({})", self)
    }
}

impl FromStr for Fingerprint {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        from_display_string(s)
    }
}

impl TryFrom<&[u8]> for Fingerprint {
    type Error = Error;

    fn try_from(slice: &[u8]) -> Result<Self> {
        Self::from_slice(slice)
    }
}

impl AsRef<[u8]> for Fingerprint {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Serialize for Fingerprint {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_display_string())
    }
}

impl<'de> Deserialize<'de> for Fingerprint {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        from_display_string(&s).map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// TESTS
// ============================================================================
