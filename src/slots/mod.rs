//! # Operation Registry
//!
//! Named operations invoked with a JSON argument object, for hosts that
//! route requests by name (a CLI, an RPC surface, a plugin runtime).
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          REQUEST FLOW                                   │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  dispatch("crypto.encrypt", "{...}")                                   │
//! │      │                                                                  │
//! │      ├─► parse JSON ─► REGISTRY lookup by name ─► Slot::signal         │
//! │      │                                              │                   │
//! │      │                     base64 ─► bytes ─► envelope / crypto         │
//! │      │                                              │                   │
//! │      └─◄ Ok(json)  or  Err((code, message)) ◄──────┘                   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Operations
//!
//! | Name | Slot |
//! |------|------|
//! | `crypto.rsa.create-key` | [`asymmetric::CreateKey`] |
//! | `crypto.rsa.encrypt` | [`asymmetric::Encrypt`] |
//! | `crypto.rsa.decrypt` | [`asymmetric::Decrypt`] |
//! | `crypto.rsa.sign` | [`asymmetric::Sign`] |
//! | `crypto.rsa.verify` | [`asymmetric::Verify`] |
//! | `crypto.aes.encrypt` | [`symmetric::Encrypt`] |
//! | `crypto.aes.decrypt` | [`symmetric::Decrypt`] |
//! | `crypto.encrypt` | [`envelope::Seal`] |
//! | `crypto.decrypt` | [`envelope::Open`] |
//! | `crypto.verify` | [`envelope::Verify`] |
//! | `crypto.get-key` | [`envelope::GetKey`] |
//! | `crypto.fingerprint` | [`fingerprint::Fingerprint`] |
//!
//! Binary values cross this boundary as standard base64 strings and
//! fingerprints as display strings. Message arguments are
//! [`Content`](crate::content::Content) objects: `{"text": "..."}` or
//! `{"bytes": "<base64>"}`.

pub mod asymmetric;
pub mod envelope;
pub mod fingerprint;
pub mod symmetric;

use std::collections::BTreeMap;

use base64::Engine as _;
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;

use crate::config::{config, CryptoConfig};
use crate::error::{Error, Result};

/// Result of [`dispatch`]: a JSON string or `(error code, message)`
pub type DResult = std::result::Result<String, (i32, String)>;

/// One named operation
pub trait Slot: Send + Sync {
    /// Registry name, e.g. `crypto.rsa.sign`
    fn name(&self) -> &'static str;

    /// Run the operation
    fn signal(&self, args: &serde_json::Value, config: &CryptoConfig) -> Result<serde_json::Value>;
}

static REGISTRY: Lazy<BTreeMap<&'static str, Box<dyn Slot>>> = Lazy::new(|| {
    let slots: Vec<Box<dyn Slot>> = vec![
        Box::new(asymmetric::CreateKey),
        Box::new(asymmetric::Encrypt),
        Box::new(asymmetric::Decrypt),
        Box::new(asymmetric::Sign),
        Box::new(asymmetric::Verify),
        Box::new(symmetric::Encrypt),
        Box::new(symmetric::Decrypt),
        Box::new(envelope::Seal),
        Box::new(envelope::Open),
        Box::new(envelope::Verify),
        Box::new(envelope::GetKey),
        Box::new(fingerprint::Fingerprint),
    ];

    let registry: BTreeMap<_, _> = slots.into_iter().map(|slot| (slot.name(), slot)).collect();
    tracing::debug!("Registered {} operations", registry.len());
    registry
});

/// Look up an operation by name
pub fn lookup(name: &str) -> Option<&'static dyn Slot> {
    REGISTRY.get(name).map(|slot| slot.as_ref())
}

/// Names of all registered operations, sorted
pub fn names() -> impl Iterator<Item = &'static str> {
    REGISTRY.keys().copied()
}

/// Run `name` with already-parsed arguments and the installed configuration
pub fn signal(name: &str, args: &serde_json::Value) -> Result<serde_json::Value> {
    let slot = lookup(name).ok_or_else(|| Error::UnknownOperation(name.to_string()))?;
    tracing::debug!("Signal {}", name);
    slot.signal(args, &config())
}

/// Route a JSON request to its operation
///
/// Returns the JSON result, or the error's [`Error::code`] and message.
pub fn dispatch(method: &str, args: &str) -> DResult {
    let parsed: serde_json::Value = if args.trim().is_empty() {
        serde_json::Value::Object(Default::default())
    } else {
        serde_json::from_str(args).map_err(|e| err(Error::InvalidArgument(format!("Invalid JSON: {}", e))))?
    };

    signal(method, &parsed)
        .map(|value| value.to_string())
        .map_err(err)
}

fn err(e: Error) -> (i32, String) {
    (e.code(), e.to_string())
}

// ============================================================================
// HELPERS  (pub(super) so slot modules can use them)
// ============================================================================

/// Deserialize a slot's argument struct
pub(super) fn parse_args<T: DeserializeOwned>(args: &serde_json::Value) -> Result<T> {
    <T as serde::Deserialize>::deserialize(args)
        .map_err(|e| Error::InvalidArgument(format!("Invalid arguments: {}", e)))
}

/// Decode a base64 argument
pub(super) fn decode_b64(field: &str, value: &str) -> Result<Vec<u8>> {
    base64::engine::general_purpose::STANDARD
        .decode(value)
        .map_err(|e| Error::InvalidArgument(format!("{} is not valid base64: {}", field, e)))
}

/// Encode a binary result
pub(super) fn encode_b64(bytes: &[u8]) -> String {
    base64::engine::general_purpose::STANDARD.encode(bytes)
}
