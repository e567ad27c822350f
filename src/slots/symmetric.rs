//! `crypto.aes.*` slots.
//!
//! The key is either `"key"` (base64, 32 bytes) or `"passphrase"`, which is
//! hashed with SHA-256. Exactly one must be given.

use serde::Deserialize;
use serde_json::json;

use super::{decode_b64, encode_b64, parse_args, Slot};
use crate::config::CryptoConfig;
use crate::content::Content;
use crate::crypto::{derive_key, symmetric, SymmetricKey};
use crate::error::{Error, Result};

#[derive(Deserialize)]
struct KeyArgs {
    key: Option<String>,
    passphrase: Option<String>,
}

impl KeyArgs {
    fn resolve(&self) -> Result<SymmetricKey> {
        match (&self.key, &self.passphrase) {
            (Some(key), None) => {
                let bytes = zeroize::Zeroizing::new(decode_b64("key", key)?);
                SymmetricKey::from_slice(&bytes)
            }
            (None, Some(passphrase)) => Ok(derive_key(passphrase)),
            _ => Err(Error::InvalidArgument(
                "Exactly one of key or passphrase is required".into(),
            )),
        }
    }
}

/// `crypto.aes.encrypt`
///
/// Args: `{"key" | "passphrase", "message": Content}`. Result:
/// `{"data": b64}` holding `nonce ‖ ciphertext ‖ tag`.
pub struct Encrypt;

#[derive(Deserialize)]
struct EncryptArgs {
    #[serde(flatten)]
    key: KeyArgs,
    message: Content,
}

impl Slot for Encrypt {
    fn name(&self) -> &'static str {
        "crypto.aes.encrypt"
    }

    fn signal(&self, args: &serde_json::Value, _config: &CryptoConfig) -> Result<serde_json::Value> {
        let args: EncryptArgs = parse_args(args)?;
        let blob = symmetric::encrypt(&args.key.resolve()?, args.message.as_bytes())?;
        Ok(json!({ "data": encode_b64(&blob) }))
    }
}

/// `crypto.aes.decrypt`
///
/// Args: `{"key" | "passphrase", "data": b64}`. Result: `{"data": b64}`.
pub struct Decrypt;

#[derive(Deserialize)]
struct DecryptArgs {
    #[serde(flatten)]
    key: KeyArgs,
    data: String,
}

impl Slot for Decrypt {
    fn name(&self) -> &'static str {
        "crypto.aes.decrypt"
    }

    fn signal(&self, args: &serde_json::Value, _config: &CryptoConfig) -> Result<serde_json::Value> {
        let args: DecryptArgs = parse_args(args)?;
        let blob = decode_b64("data", &args.data)?;
        let plaintext = symmetric::decrypt(&args.key.resolve()?, &blob)?;
        Ok(json!({ "data": encode_b64(&plaintext) }))
    }
}
