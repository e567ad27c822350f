//! Envelope slots: `crypto.encrypt`, `crypto.decrypt`, `crypto.verify`,
//! `crypto.get-key`.

use serde::Deserialize;
use serde_json::json;

use super::{decode_b64, encode_b64, parse_args, Slot};
use crate::config::CryptoConfig;
use crate::content::Content;
use crate::crypto::Fingerprint;
use crate::envelope::{self, InnerPackage};
use crate::error::{Error, Result};

/// `crypto.encrypt`: sign and seal a message
///
/// Args: `{"message": Content, "signing_private_key": b64,
/// "signing_key_fingerprint": "ab12-…", "recipient_public_key": b64}`.
/// Result: `{"envelope": b64}`.
///
/// Randomness always comes from the OS. A `seed` argument is rejected.
pub struct Seal;

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct SealArgs {
    message: Content,
    signing_private_key: String,
    signing_key_fingerprint: String,
    recipient_public_key: String,
}

impl Slot for Seal {
    fn name(&self) -> &'static str {
        "crypto.encrypt"
    }

    fn signal(&self, args: &serde_json::Value, _config: &CryptoConfig) -> Result<serde_json::Value> {
        let args: SealArgs = parse_args(args)?;
        let signing_key = zeroize::Zeroizing::new(decode_b64("signing_private_key", &args.signing_private_key)?);
        let signing_fingerprint: Fingerprint = args.signing_key_fingerprint.parse()?;
        let recipient = decode_b64("recipient_public_key", &args.recipient_public_key)?;

        let sealed = envelope::seal(
            args.message.as_bytes(),
            &signing_key,
            signing_fingerprint.as_bytes(),
            &recipient,
        )?;
        Ok(json!({ "envelope": encode_b64(&sealed) }))
    }
}

/// `crypto.decrypt`: open an envelope without verifying the sender
///
/// Args: `{"envelope": b64, "private_key": b64}`. Result:
/// `{"plaintext": b64, "signature": b64, "sender_fingerprint",
/// "recipient_fingerprint"}`. Pass the result to `crypto.verify` with the
/// sender's public key before trusting the plaintext.
pub struct Open;

#[derive(Deserialize)]
struct OpenArgs {
    envelope: String,
    private_key: String,
}

impl Slot for Open {
    fn name(&self) -> &'static str {
        "crypto.decrypt"
    }

    fn signal(&self, args: &serde_json::Value, _config: &CryptoConfig) -> Result<serde_json::Value> {
        let args: OpenArgs = parse_args(args)?;
        let sealed = decode_b64("envelope", &args.envelope)?;
        let private_key = zeroize::Zeroizing::new(decode_b64("private_key", &args.private_key)?);

        let opened = envelope::open(&sealed, &private_key)?;
        Ok(json!({
            "plaintext": encode_b64(opened.plaintext()),
            "signature": encode_b64(opened.signature()),
            "sender_fingerprint": opened.sender_fingerprint(),
            "recipient_fingerprint": opened.recipient_fingerprint,
        }))
    }
}

/// `crypto.verify`: check the signature of an opened envelope
///
/// Args: `{"plaintext": b64, "signature": b64, "public_key": b64,
/// "sender_fingerprint"?: "ab12-…"}`. With `sender_fingerprint`, the key's
/// fingerprint must match it too. Result: `{"valid": bool}`.
pub struct Verify;

#[derive(Deserialize)]
struct VerifyArgs {
    plaintext: String,
    signature: String,
    public_key: String,
    sender_fingerprint: Option<Fingerprint>,
}

impl Slot for Verify {
    fn name(&self) -> &'static str {
        "crypto.verify"
    }

    fn signal(&self, args: &serde_json::Value, _config: &CryptoConfig) -> Result<serde_json::Value> {
        let args: VerifyArgs = parse_args(args)?;
        let plaintext = decode_b64("plaintext", &args.plaintext)?;
        let signature = decode_b64("signature", &args.signature)?;
        let public_key = decode_b64("public_key", &args.public_key)?;

        let result = match args.sender_fingerprint {
            Some(sender_fingerprint) => InnerPackage {
                sender_fingerprint,
                signature,
                plaintext,
            }
            .verify(&public_key),
            None => envelope::verify_envelope(&plaintext, &signature, &public_key),
        };

        let valid = match result {
            Ok(()) => true,
            Err(Error::SignatureMismatch) => false,
            Err(e) => return Err(e),
        };
        Ok(json!({ "valid": valid }))
    }
}

/// `crypto.get-key`: which key an envelope is addressed to
///
/// Args: `{"envelope": b64}`. Result: `{"fingerprint": "ab12-…"}`.
pub struct GetKey;

#[derive(Deserialize)]
struct GetKeyArgs {
    envelope: String,
}

impl Slot for GetKey {
    fn name(&self) -> &'static str {
        "crypto.get-key"
    }

    fn signal(&self, args: &serde_json::Value, _config: &CryptoConfig) -> Result<serde_json::Value> {
        let args: GetKeyArgs = parse_args(args)?;
        let sealed = decode_b64("envelope", &args.envelope)?;
        Ok(json!({ "fingerprint": envelope::recipient_fingerprint(&sealed)? }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{KEYPAIR_1024_A, KEYPAIR_1024_B, KEYPAIR_1024_C};

    fn seal_args(message: serde_json::Value) -> serde_json::Value {
        json!({
            "message": message,
            "signing_private_key": encode_b64(KEYPAIR_1024_A.private_key()),
            "signing_key_fingerprint": KEYPAIR_1024_A.fingerprint().to_display_string(),
            "recipient_public_key": encode_b64(KEYPAIR_1024_B.public_key()),
        })
    }

    #[test]
    fn test_seal_open_verify() {
        let config = CryptoConfig::default();
        let sealed = Seal.signal(&seal_args(json!({"text": "hello"})), &config).unwrap();

        let key = GetKey.signal(&json!({"envelope": sealed["envelope"]}), &config).unwrap();
        assert_eq!(key["fingerprint"], KEYPAIR_1024_B.fingerprint().to_display_string());

        let opened = Open
            .signal(
                &json!({
                    "envelope": sealed["envelope"],
                    "private_key": encode_b64(KEYPAIR_1024_B.private_key()),
                }),
                &config,
            )
            .unwrap();
        assert_eq!(opened["plaintext"], encode_b64(b"hello"));
        assert_eq!(opened["sender_fingerprint"], KEYPAIR_1024_A.fingerprint().to_display_string());

        let verify = |public_key: &[u8]| {
            Verify
                .signal(
                    &json!({
                        "plaintext": opened["plaintext"],
                        "signature": opened["signature"],
                        "public_key": encode_b64(public_key),
                        "sender_fingerprint": opened["sender_fingerprint"],
                    }),
                    &config,
                )
                .unwrap()["valid"]
                .clone()
        };
        assert_eq!(verify(KEYPAIR_1024_A.public_key()), true);
        assert_eq!(verify(KEYPAIR_1024_C.public_key()), false);
    }

    #[test]
    fn test_seal_rejects_seed() {
        let mut args = seal_args(json!({"text": "hello"}));
        args["seed"] = json!({"text": "predictable"});

        let result = Seal.signal(&args, &CryptoConfig::default());
        assert!(matches!(result, Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_seal_rejects_short_fingerprint() {
        let mut args = seal_args(json!({"text": "hello"}));
        args["signing_key_fingerprint"] = json!("ab12-cd34");

        let result = Seal.signal(&args, &CryptoConfig::default());
        assert!(matches!(result, Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_open_with_wrong_key() {
        let config = CryptoConfig::default();
        let sealed = Seal.signal(&seal_args(json!({"text": "hello"})), &config).unwrap();

        let result = Open.signal(
            &json!({
                "envelope": sealed["envelope"],
                "private_key": encode_b64(KEYPAIR_1024_C.private_key()),
            }),
            &config,
        );
        assert!(matches!(
            result,
            Err(Error::DecryptionError(_)) | Err(Error::AuthenticationError)
        ));
    }

    #[test]
    fn test_get_key_on_truncated_envelope() {
        let result = GetKey.signal(&json!({"envelope": encode_b64(&[0u8; 20])}), &CryptoConfig::default());
        assert!(matches!(result, Err(Error::EnvelopeMalformed(_))));
    }
}
