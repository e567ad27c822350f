//! Sign, wrap, encrypt.

use rand::{CryptoRng, RngCore};

use super::frame::{FrameWriter, LENGTH_PREFIX_SIZE};
use super::package::{InnerPackage, ENVELOPE_DIGEST};
use crate::crypto::random::secure_rng;
use crate::crypto::{symmetric, Fingerprint, PrivateKey, PublicKey, SymmetricKey, FINGERPRINT_SIZE};
use crate::error::Result;

/// Seals messages from one sender to one recipient
///
/// Keys are parsed once at construction, so a `Sealer` can seal many
/// messages. Every call draws a fresh symmetric key and nonce. A `Sealer` is
/// `Send + Sync` and holds no RNG of its own.
pub struct Sealer {
    signing_key: PrivateKey,
    signing_fingerprint: Fingerprint,
    recipient: PublicKey,
}

impl Sealer {
    /// Create a sealer
    ///
    /// `signing_key_fingerprint` is the caller's claim about its own public
    /// key. It is checked to be exactly 32 bytes (`InvalidArgument`
    /// otherwise) but not re-derived from the private key.
    pub fn new(
        signing_private_key: &[u8],
        signing_key_fingerprint: &[u8],
        recipient_public_key: &[u8],
    ) -> Result<Self> {
        let signing_fingerprint = Fingerprint::from_slice(signing_key_fingerprint)?;
        Ok(Self {
            signing_key: PrivateKey::from_der(signing_private_key)?,
            signing_fingerprint,
            recipient: PublicKey::from_der(recipient_public_key)?,
        })
    }

    /// Fingerprint written at the head of every envelope
    pub fn recipient_fingerprint(&self) -> &Fingerprint {
        self.recipient.fingerprint()
    }

    /// Seal with randomness from the OS CSPRNG
    pub fn seal(&self, plaintext: impl AsRef<[u8]>) -> Result<Vec<u8>> {
        self.seal_with_rng(&mut secure_rng(), plaintext)
    }

    /// Seal drawing the symmetric key and nonce from `rng`
    ///
    /// ```text
    /// signature   = RSA-Sign(signing_key, plaintext, SHA-256)
    /// package     = signer_fp ‖ len(signature) ‖ signature ‖ plaintext
    /// key         = 32 random bytes
    /// wrapped     = RSA-Encrypt(recipient, key)
    /// envelope    = recipient_fp ‖ len(wrapped) ‖ wrapped ‖ AES-GCM(key, package)
    /// ```
    pub fn seal_with_rng<R: RngCore + CryptoRng>(
        &self,
        rng: &mut R,
        plaintext: impl AsRef<[u8]>,
    ) -> Result<Vec<u8>> {
        let plaintext = plaintext.as_ref();

        let signature = self.signing_key.sign_with_rng(rng, plaintext, ENVELOPE_DIGEST)?;
        let package = InnerPackage {
            sender_fingerprint: self.signing_fingerprint,
            signature,
            plaintext: plaintext.to_vec(),
        }
        .encode()?;

        let key = SymmetricKey::generate(rng);
        let wrapped_key = self.recipient.encrypt(rng, key.as_bytes())?;
        let ciphertext = symmetric::encrypt_with_rng(rng, &key, &package)?;

        let mut writer = FrameWriter::with_capacity(
            FINGERPRINT_SIZE + LENGTH_PREFIX_SIZE + wrapped_key.len() + ciphertext.len(),
        );
        writer
            .put(self.recipient.fingerprint().as_bytes())
            .put_prefixed(&wrapped_key)?
            .put(&ciphertext);
        let envelope = writer.finish();

        tracing::debug!(
            "Sealed {} bytes from {} to {} ({} byte envelope)",
            plaintext.len(),
            self.signing_fingerprint,
            self.recipient.fingerprint(),
            envelope.len()
        );
        Ok(envelope)
    }
}

impl std::fmt::Debug for Sealer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sealer")
            .field("signer", &self.signing_fingerprint)
            .field("recipient", self.recipient.fingerprint())
            .finish_non_exhaustive()
    }
}

/// Sign `plaintext` and seal it for `recipient_public_key`
///
/// One-shot form of [`Sealer`].
pub fn seal(
    plaintext: impl AsRef<[u8]>,
    signing_private_key: &[u8],
    signing_key_fingerprint: &[u8],
    recipient_public_key: &[u8],
) -> Result<Vec<u8>> {
    Sealer::new(signing_private_key, signing_key_fingerprint, recipient_public_key)?.seal(plaintext)
}
