//! `crypto.rsa.*` slots.

use serde::Deserialize;
use serde_json::json;

use super::{decode_b64, encode_b64, parse_args, Slot};
use crate::config::CryptoConfig;
use crate::content::Content;
use crate::crypto::{asymmetric, DigestAlgorithm, KeyPair};
use crate::error::{Error, Result};

fn digest_or_default(name: Option<&str>, config: &CryptoConfig) -> Result<DigestAlgorithm> {
    let algorithm = match name {
        Some(name) => name.parse()?,
        None => config.default_digest,
    };
    config.check_digest(algorithm)
}

// ============================================================================
// KEY GENERATION
// ============================================================================

/// `crypto.rsa.create-key`
///
/// Args: `{"strength"?: bits, "seed"?: Content}`. Without `strength` the
/// configured default is used. A `seed` makes generation deterministic and
/// is refused with `InvalidArgument` unless
/// [`CryptoConfig::allow_seeded_keys`] is set.
///
/// Result: `{"public_key", "private_key"}` as base64 DER, plus
/// `"fingerprint"` and `"strength"`.
pub struct CreateKey;

#[derive(Deserialize)]
struct CreateKeyArgs {
    strength: Option<usize>,
    seed: Option<Content>,
}

impl Slot for CreateKey {
    fn name(&self) -> &'static str {
        "crypto.rsa.create-key"
    }

    fn signal(&self, args: &serde_json::Value, config: &CryptoConfig) -> Result<serde_json::Value> {
        let args: CreateKeyArgs = parse_args(args)?;
        let strength = args.strength.unwrap_or(config.default_strength);

        let keypair = match &args.seed {
            Some(_) if !config.allow_seeded_keys => {
                tracing::warn!("crypto.rsa.create-key refused a seed");
                return Err(Error::InvalidArgument(
                    "Seeded key generation is disabled by configuration".into(),
                ));
            }
            Some(seed) => {
                tracing::warn!("crypto.rsa.create-key called with a seed; the key is predictable");
                KeyPair::generate_seeded(strength, seed.as_bytes())?
            }
            None => KeyPair::generate(strength)?,
        };

        Ok(json!({
            "public_key": encode_b64(keypair.public_key()),
            "private_key": encode_b64(keypair.private_key()),
            "fingerprint": keypair.fingerprint().to_display_string(),
            "strength": keypair.strength(),
        }))
    }
}

// ============================================================================
// BLOCK ENCRYPTION
// ============================================================================

/// `crypto.rsa.encrypt`
///
/// Args: `{"public_key": b64, "message": Content}`. Result: `{"data": b64}`.
pub struct Encrypt;

#[derive(Deserialize)]
struct EncryptArgs {
    public_key: String,
    message: Content,
}

impl Slot for Encrypt {
    fn name(&self) -> &'static str {
        "crypto.rsa.encrypt"
    }

    fn signal(&self, args: &serde_json::Value, _config: &CryptoConfig) -> Result<serde_json::Value> {
        let args: EncryptArgs = parse_args(args)?;
        let public_key = decode_b64("public_key", &args.public_key)?;

        let block = asymmetric::encrypt(&public_key, args.message.as_bytes())?;
        Ok(json!({ "data": encode_b64(&block) }))
    }
}

/// `crypto.rsa.decrypt`
///
/// Args: `{"private_key": b64, "data": b64}`. Result: `{"data": b64}`.
pub struct Decrypt;

#[derive(Deserialize)]
struct DecryptArgs {
    private_key: String,
    data: String,
}

impl Slot for Decrypt {
    fn name(&self) -> &'static str {
        "crypto.rsa.decrypt"
    }

    fn signal(&self, args: &serde_json::Value, _config: &CryptoConfig) -> Result<serde_json::Value> {
        let args: DecryptArgs = parse_args(args)?;
        let private_key = zeroize::Zeroizing::new(decode_b64("private_key", &args.private_key)?);
        let block = decode_b64("data", &args.data)?;

        let message = asymmetric::decrypt(&private_key, &block)?;
        Ok(json!({ "data": encode_b64(&message) }))
    }
}

// ============================================================================
// SIGNATURES
// ============================================================================

/// `crypto.rsa.sign`
///
/// Args: `{"private_key": b64, "message": Content, "algorithm"?: "SHA256"}`.
/// Result: `{"signature": b64, "algorithm": name}`.
pub struct Sign;

#[derive(Deserialize)]
struct SignArgs {
    private_key: String,
    message: Content,
    algorithm: Option<String>,
}

impl Slot for Sign {
    fn name(&self) -> &'static str {
        "crypto.rsa.sign"
    }

    fn signal(&self, args: &serde_json::Value, config: &CryptoConfig) -> Result<serde_json::Value> {
        let args: SignArgs = parse_args(args)?;
        let algorithm = digest_or_default(args.algorithm.as_deref(), config)?;
        let private_key = zeroize::Zeroizing::new(decode_b64("private_key", &args.private_key)?);

        let signature = asymmetric::sign(&private_key, args.message.as_bytes(), algorithm)?;
        Ok(json!({
            "signature": encode_b64(&signature),
            "algorithm": algorithm.name(),
        }))
    }
}

/// `crypto.rsa.verify`
///
/// Args: `{"public_key": b64, "message": Content, "signature": b64,
/// "algorithm"?: "SHA256"}`. Result: `{"valid": bool}`. A signature that
/// does not verify is `valid: false`, not an error.
pub struct Verify;

#[derive(Deserialize)]
struct VerifyArgs {
    public_key: String,
    message: Content,
    signature: String,
    algorithm: Option<String>,
}

impl Slot for Verify {
    fn name(&self) -> &'static str {
        "crypto.rsa.verify"
    }

    fn signal(&self, args: &serde_json::Value, config: &CryptoConfig) -> Result<serde_json::Value> {
        let args: VerifyArgs = parse_args(args)?;
        let algorithm = digest_or_default(args.algorithm.as_deref(), config)?;
        let public_key = decode_b64("public_key", &args.public_key)?;
        let signature = decode_b64("signature", &args.signature)?;

        let valid = match asymmetric::verify(&public_key, args.message.as_bytes(), &signature, algorithm) {
            Ok(()) => true,
            Err(Error::SignatureMismatch) => false,
            Err(e) => return Err(e),
        };
        Ok(json!({ "valid": valid }))
    }
}
