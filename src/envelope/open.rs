//! Unwrap, decrypt, parse. Verification is a separate step.

use serde::Serialize;

use super::frame::FrameReader;
use super::package::{InnerPackage, ENVELOPE_DIGEST};
use crate::crypto::{symmetric, Fingerprint, PrivateKey, PublicKey, SymmetricKey, FINGERPRINT_SIZE, KEY_SIZE};
use crate::error::{Error, Result};

/// An envelope split into its outer fields, nothing decrypted
#[derive(Debug, Clone, Copy)]
pub struct EnvelopeView<'a> {
    /// SHA-256 of the recipient's public key
    pub recipient_fingerprint: Fingerprint,
    /// The RSA-wrapped symmetric key
    pub wrapped_key: &'a [u8],
    /// `nonce ‖ ciphertext ‖ tag` of the inner package
    pub ciphertext: &'a [u8],
}

impl<'a> EnvelopeView<'a> {
    /// Split `envelope` without any key
    ///
    /// Fails with `EnvelopeMalformed` if the framing is truncated.
    pub fn parse(envelope: &'a [u8]) -> Result<Self> {
        let mut reader = FrameReader::new(envelope);
        let recipient_fingerprint =
            Fingerprint::from_slice(reader.take(FINGERPRINT_SIZE, "encryption key fingerprint")?)?;
        let wrapped_key = reader.take_prefixed("wrapped key")?;
        let ciphertext = reader.rest();

        Ok(Self {
            recipient_fingerprint,
            wrapped_key,
            ciphertext,
        })
    }
}

/// Read which key an envelope was sealed for
///
/// Lets a recipient holding several private keys pick the right one before
/// attempting any RSA operation.
pub fn recipient_fingerprint(envelope: &[u8]) -> Result<Fingerprint> {
    Ok(EnvelopeView::parse(envelope)?.recipient_fingerprint)
}

/// The result of opening an envelope
///
/// **Not yet authenticated as coming from anyone.** The AEAD proves the
/// package was not altered after sealing, but anyone holding the recipient's
/// public key can seal. Call [`OpenedEnvelope::verify`] with the sender's
/// public key, looked up by [`OpenedEnvelope::sender_fingerprint`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OpenedEnvelope {
    /// Fingerprint the envelope was addressed to
    pub recipient_fingerprint: Fingerprint,
    /// The decrypted, unverified inner package
    pub package: InnerPackage,
}

impl OpenedEnvelope {
    /// The message
    pub fn plaintext(&self) -> &[u8] {
        &self.package.plaintext
    }

    /// The sender's signature over the message
    pub fn signature(&self) -> &[u8] {
        &self.package.signature
    }

    /// The fingerprint the sender claimed
    pub fn sender_fingerprint(&self) -> &Fingerprint {
        &self.package.sender_fingerprint
    }

    /// Verify the sender; see [`InnerPackage::verify`]
    pub fn verify(&self, sender_public_key: &[u8]) -> Result<()> {
        self.package.verify(sender_public_key)
    }

    /// Verify the sender, then yield the plaintext
    pub fn into_verified_plaintext(self, sender_public_key: &[u8]) -> Result<Vec<u8>> {
        self.verify(sender_public_key)?;
        Ok(self.package.plaintext)
    }
}

/// Opens envelopes addressed to one private key
pub struct Opener {
    private_key: PrivateKey,
    fingerprint: Fingerprint,
}

impl Opener {
    /// Create an opener from a DER PKCS#8 private key
    pub fn new(recipient_private_key: &[u8]) -> Result<Self> {
        let private_key = PrivateKey::from_der(recipient_private_key)?;
        let fingerprint = *private_key.public_key()?.fingerprint();
        Ok(Self {
            private_key,
            fingerprint,
        })
    }

    /// Fingerprint of this opener's public key in canonical DER
    pub fn fingerprint(&self) -> &Fingerprint {
        &self.fingerprint
    }

    /// True if `envelope` is addressed to this opener's key
    pub fn is_recipient(&self, envelope: &[u8]) -> Result<bool> {
        Ok(recipient_fingerprint(envelope)? == self.fingerprint)
    }

    /// Unwrap and decrypt, returning the raw inner package bytes
    ///
    /// ## Errors
    ///
    /// - `EnvelopeMalformed`: truncated framing
    /// - `DecryptionError`: the wrapped key does not unwrap to a 256-bit key
    ///   under this private key (typically the wrong key)
    /// - `AuthenticationError`: the encrypted region was altered
    pub fn decrypt_package(&self, envelope: &[u8]) -> Result<Vec<u8>> {
        let view = EnvelopeView::parse(envelope)?;

        let unwrapped = zeroize::Zeroizing::new(self.private_key.decrypt(view.wrapped_key)?);
        if unwrapped.len() != KEY_SIZE {
            return Err(Error::DecryptionError(format!(
                "Wrapped key unwrapped to {} bytes, expected {}",
                unwrapped.len(),
                KEY_SIZE
            )));
        }
        let key = SymmetricKey::from_slice(&unwrapped)?;

        symmetric::decrypt(&key, view.ciphertext)
    }

    /// Unwrap, decrypt and parse the inner package, unverified
    ///
    /// Nothing is parsed unless the AEAD tag verified.
    pub fn open_package(&self, envelope: &[u8]) -> Result<InnerPackage> {
        InnerPackage::decode(&self.decrypt_package(envelope)?)
    }

    /// Open `envelope`, keeping the recipient fingerprint alongside the package
    pub fn open(&self, envelope: &[u8]) -> Result<OpenedEnvelope> {
        let recipient_fingerprint = recipient_fingerprint(envelope)?;
        let package = self.open_package(envelope)?;

        tracing::debug!(
            "Opened {} byte envelope for {}, claimed signer {}",
            envelope.len(),
            recipient_fingerprint,
            package.sender_fingerprint
        );
        Ok(OpenedEnvelope {
            recipient_fingerprint,
            package,
        })
    }
}

impl std::fmt::Debug for Opener {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Opener")
            .field("fingerprint", &self.fingerprint)
            .finish_non_exhaustive()
    }
}

/// Open `envelope` with `recipient_private_key`
///
/// One-shot form of [`Opener`].
pub fn open(envelope: &[u8], recipient_private_key: &[u8]) -> Result<OpenedEnvelope> {
    Opener::new(recipient_private_key)?.open(envelope)
}

/// Verify a signature taken from an opened envelope
///
/// Checks the signature only; compare the sender fingerprint yourself or use
/// [`OpenedEnvelope::verify`], which does both.
pub fn verify_envelope(plaintext: &[u8], signature: &[u8], sender_public_key: &[u8]) -> Result<()> {
    PublicKey::from_der(sender_public_key)?.verify(plaintext, signature, ENVELOPE_DIGEST)
}
