//! The signed inner package carried inside an envelope's encrypted region.

use serde::Serialize;

use super::frame::{FrameReader, FrameWriter, LENGTH_PREFIX_SIZE};
use crate::content::base64_bytes;
use crate::crypto::{DigestAlgorithm, Fingerprint, PublicKey, FINGERPRINT_SIZE};
use crate::error::{Error, Result};

/// Digest used for envelope signatures
pub const ENVELOPE_DIGEST: DigestAlgorithm = DigestAlgorithm::Sha256;

/// `SigningKeyFingerprint(32) ‖ SignatureLen(i32 BE) ‖ Signature ‖ Plaintext`
///
/// A decoded package is **unverified**: the fingerprint is whatever the
/// sender claimed. Call [`InnerPackage::verify`] with the sender's public key
/// before trusting the plaintext.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InnerPackage {
    /// Claimed fingerprint of the sender's public key
    pub sender_fingerprint: Fingerprint,
    /// Signature over `plaintext`
    #[serde(with = "base64_bytes")]
    pub signature: Vec<u8>,
    /// The message
    #[serde(with = "base64_bytes")]
    pub plaintext: Vec<u8>,
}

impl InnerPackage {
    /// Serialize to wire form
    pub fn encode(&self) -> Result<Vec<u8>> {
        let mut writer = FrameWriter::with_capacity(
            FINGERPRINT_SIZE + LENGTH_PREFIX_SIZE + self.signature.len() + self.plaintext.len(),
        );
        writer
            .put(self.sender_fingerprint.as_bytes())
            .put_prefixed(&self.signature)?
            .put(&self.plaintext);
        Ok(writer.finish())
    }

    /// Parse wire form; everything after the signature is plaintext
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let mut reader = FrameReader::new(bytes);
        let sender_fingerprint =
            Fingerprint::from_slice(reader.take(FINGERPRINT_SIZE, "signing key fingerprint")?)?;
        let signature = reader.take_prefixed("signature")?.to_vec();
        let plaintext = reader.rest().to_vec();

        Ok(Self {
            sender_fingerprint,
            signature,
            plaintext,
        })
    }

    /// Verify against the sender's DER public key
    ///
    /// The key's fingerprint must match [`InnerPackage::sender_fingerprint`]
    /// and the signature must verify over the plaintext with SHA-256.
    /// Either failure is `SignatureMismatch`.
    pub fn verify(&self, sender_public_key: &[u8]) -> Result<()> {
        let public = PublicKey::from_der(sender_public_key)?;
        if public.fingerprint() != &self.sender_fingerprint {
            tracing::debug!(
                "Package claims signer {} but key is {}",
                self.sender_fingerprint,
                public.fingerprint()
            );
            return Err(Error::SignatureMismatch);
        }
        public.verify(&self.plaintext, &self.signature, ENVELOPE_DIGEST)
    }
}
