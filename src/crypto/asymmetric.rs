//! # Asymmetric Cipher
//!
//! RSA for key wrapping and signatures.
//!
//! ## Operations
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         RSA OPERATIONS                                  │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  Key Wrapping (PKCS#1 v1.5 encryption)                                 │
//! │  ─────────────────────────────────────                                  │
//! │  Public Key ─► encrypt(message) ─► block (modulus_bytes long)          │
//! │  Private Key ─► decrypt(block)  ─► message                             │
//! │                                                                         │
//! │  Capacity: message ≤ modulus_bytes − 11                                │
//! │    1024-bit key → 117 bytes     2048-bit key → 245 bytes               │
//! │  Only ever used for 32-byte symmetric keys, never bulk data.           │
//! │                                                                         │
//! │  Signatures (PKCS#1 v1.5 with DigestInfo)                              │
//! │  ────────────────────────────────────────                               │
//! │  Private Key ─► sign(digest(message))    ─► signature                  │
//! │  Public Key  ─► verify(digest(message), signature) ─► ok / mismatch    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Encoding
//!
//! | Key | Encoding |
//! |-----|----------|
//! | Public | DER `SubjectPublicKeyInfo` |
//! | Private | DER PKCS#8 `PrivateKeyInfo` |

use std::fmt;
use std::str::FromStr;

use md5::Md5;
use rand::{CryptoRng, RngCore};
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePrivateKey, EncodePublicKey};
use rsa::traits::PublicKeyParts;
use rsa::{Pkcs1v15Encrypt, Pkcs1v15Sign, RsaPrivateKey, RsaPublicKey};
use serde::{Deserialize, Serialize};
use sha1::Sha1;
use sha2::{Digest, Sha256, Sha384, Sha512};
use zeroize::Zeroizing;

use super::fingerprint::Fingerprint;
use super::keys::KeyPair;
use super::random::{secure_rng, seeded_rng};
use super::symmetric::KEY_SIZE;
use crate::error::{Error, Result};

/// PKCS#1 v1.5 encryption padding overhead in bytes
pub const PKCS1_PADDING_OVERHEAD: usize = 11;

// ============================================================================
// DIGEST ALGORITHMS
// ============================================================================

/// Digest used inside a PKCS#1 v1.5 signature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DigestAlgorithm {
    /// SHA-1. Collision-broken; kept for verifying old signatures.
    #[serde(rename = "SHA1")]
    Sha1,
    /// SHA-256 (default)
    #[default]
    #[serde(rename = "SHA256")]
    Sha256,
    /// SHA-384
    #[serde(rename = "SHA384")]
    Sha384,
    /// SHA-512
    #[serde(rename = "SHA512")]
    Sha512,
    /// MD5. **Weak**: legacy interoperability only.
    #[serde(rename = "MD5")]
    Md5,
}

impl DigestAlgorithm {
    /// Canonical name
    pub fn name(&self) -> &'static str {
        match self {
            DigestAlgorithm::Sha1 => "SHA1",
            DigestAlgorithm::Sha256 => "SHA256",
            DigestAlgorithm::Sha384 => "SHA384",
            DigestAlgorithm::Sha512 => "SHA512",
            DigestAlgorithm::Md5 => "MD5",
        }
    }

    /// True for digests that must not be used for new signatures
    pub fn is_weak(&self) -> bool {
        matches!(self, DigestAlgorithm::Md5 | DigestAlgorithm::Sha1)
    }

    fn digest(&self, message: &[u8]) -> Vec<u8> {
        match self {
            DigestAlgorithm::Sha1 => Sha1::digest(message).to_vec(),
            DigestAlgorithm::Sha256 => Sha256::digest(message).to_vec(),
            DigestAlgorithm::Sha384 => Sha384::digest(message).to_vec(),
            DigestAlgorithm::Sha512 => Sha512::digest(message).to_vec(),
            DigestAlgorithm::Md5 => Md5::digest(message).to_vec(),
        }
    }

    fn scheme(&self) -> Pkcs1v15Sign {
        match self {
            DigestAlgorithm::Sha1 => Pkcs1v15Sign::new::<Sha1>(),
            DigestAlgorithm::Sha256 => Pkcs1v15Sign::new::<Sha256>(),
            DigestAlgorithm::Sha384 => Pkcs1v15Sign::new::<Sha384>(),
            DigestAlgorithm::Sha512 => Pkcs1v15Sign::new::<Sha512>(),
            DigestAlgorithm::Md5 => Pkcs1v15Sign::new::<Md5>(),
        }
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DigestAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "SHA1" => Ok(DigestAlgorithm::Sha1),
            "SHA256" => Ok(DigestAlgorithm::Sha256),
            "SHA384" => Ok(DigestAlgorithm::Sha384),
            "SHA512" => Ok(DigestAlgorithm::Sha512),
            "MD5" => Ok(DigestAlgorithm::Md5),
            other => Err(Error::InvalidArgument(format!(
                "'{}' is an unknown digest algorithm",
                other
            ))),
        }
    }
}

// ============================================================================
// PARSED KEYS
// ============================================================================

/// A parsed RSA public key together with the fingerprint of its DER bytes
#[derive(Clone)]
pub struct PublicKey {
    inner: RsaPublicKey,
    fingerprint: Fingerprint,
}

impl PublicKey {
    /// Parse a DER `SubjectPublicKeyInfo`
    ///
    /// The fingerprint is taken over the canonical re-encoding, so any
    /// accepted encoding of the same key has the same fingerprint.
    pub fn from_der(der: &[u8]) -> Result<Self> {
        let inner = RsaPublicKey::from_public_key_der(der)
            .map_err(|e| Error::InvalidKey(format!("Invalid RSA public key: {}", e)))?;
        let canonical = inner
            .to_public_key_der()
            .map_err(|e| Error::InvalidKey(format!("Cannot encode public key: {}", e)))?;
        Ok(Self {
            fingerprint: Fingerprint::of(canonical.as_bytes()),
            inner,
        })
    }

    /// Fingerprint of the DER encoding
    pub fn fingerprint(&self) -> &Fingerprint {
        &self.fingerprint
    }

    /// Modulus length in bytes
    pub fn modulus_bytes(&self) -> usize {
        self.inner.size()
    }

    /// Largest message [`PublicKey::encrypt`] accepts
    pub fn max_message_len(&self) -> usize {
        self.modulus_bytes().saturating_sub(PKCS1_PADDING_OVERHEAD)
    }

    /// PKCS#1 v1.5 encrypt a short message
    ///
    /// Fails with `InvalidArgument` if `message` exceeds
    /// [`PublicKey::max_message_len`].
    pub fn encrypt<R: RngCore + CryptoRng>(&self, rng: &mut R, message: &[u8]) -> Result<Vec<u8>> {
        let capacity = self.max_message_len();
        if message.len() > capacity {
            return Err(Error::InvalidArgument(format!(
                "Message of {} bytes exceeds RSA block capacity of {} bytes",
                message.len(),
                capacity
            )));
        }

        self.inner
            .encrypt(rng, Pkcs1v15Encrypt, message)
            .map_err(|e| Error::EncryptionFailed(format!("RSA encryption failed: {}", e)))
    }

    /// Verify a PKCS#1 v1.5 signature over `message`
    ///
    /// Returns `Err(SignatureMismatch)` if the signature does not verify.
    pub fn verify(&self, message: &[u8], signature: &[u8], algorithm: DigestAlgorithm) -> Result<()> {
        let hashed = algorithm.digest(message);
        self.inner
            .verify(algorithm.scheme(), &hashed, signature)
            .map_err(|_| Error::SignatureMismatch)
    }

    /// Re-encode as DER `SubjectPublicKeyInfo`
    pub fn to_der(&self) -> Result<Vec<u8>> {
        let doc = self
            .inner
            .to_public_key_der()
            .map_err(|e| Error::InvalidKey(format!("Cannot encode public key: {}", e)))?;
        Ok(doc.as_bytes().to_vec())
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PublicKey")
            .field("bits", &(self.modulus_bytes() * 8))
            .field("fingerprint", &self.fingerprint)
            .finish()
    }
}

/// A parsed RSA private key
pub struct PrivateKey {
    inner: RsaPrivateKey,
}

impl PrivateKey {
    /// Parse a DER PKCS#8 `PrivateKeyInfo`
    pub fn from_der(der: &[u8]) -> Result<Self> {
        let inner = RsaPrivateKey::from_pkcs8_der(der)
            .map_err(|e| Error::InvalidKey(format!("Invalid RSA private key: {}", e)))?;
        Ok(Self { inner })
    }

    pub(crate) fn from_rsa(inner: RsaPrivateKey) -> Self {
        Self { inner }
    }

    /// Modulus length in bytes
    pub fn modulus_bytes(&self) -> usize {
        self.inner.size()
    }

    /// The matching public key
    pub fn public_key(&self) -> Result<PublicKey> {
        let der = self
            .inner
            .to_public_key()
            .to_public_key_der()
            .map_err(|e| Error::InvalidKey(format!("Cannot encode public key: {}", e)))?;
        PublicKey::from_der(der.as_bytes())
    }

    /// Encode as DER PKCS#8
    pub fn to_der(&self) -> Result<Zeroizing<Vec<u8>>> {
        let doc = self
            .inner
            .to_pkcs8_der()
            .map_err(|e| Error::InvalidKey(format!("Cannot encode private key: {}", e)))?;
        Ok(Zeroizing::new(doc.as_bytes().to_vec()))
    }

    /// PKCS#1 v1.5 decrypt a block
    ///
    /// Fails with `DecryptionError` on padding or length mismatch, which is
    /// also what a block encrypted for a different key produces.
    pub fn decrypt(&self, block: &[u8]) -> Result<Vec<u8>> {
        self.decrypt_with_rng(&mut secure_rng(), block)
    }

    /// [`PrivateKey::decrypt`] with blinding drawn from `rng`
    pub fn decrypt_with_rng<R: RngCore + CryptoRng>(&self, rng: &mut R, block: &[u8]) -> Result<Vec<u8>> {
        self.inner
            .decrypt_blinded(rng, Pkcs1v15Encrypt, block)
            .map_err(|_| Error::DecryptionError("RSA block did not decrypt under this key".into()))
    }

    /// Sign `message` with PKCS#1 v1.5 over the chosen digest
    pub fn sign(&self, message: &[u8], algorithm: DigestAlgorithm) -> Result<Vec<u8>> {
        self.sign_with_rng(&mut secure_rng(), message, algorithm)
    }

    /// [`PrivateKey::sign`] with blinding drawn from `rng`
    ///
    /// PKCS#1 v1.5 signatures are deterministic; `rng` only blinds the
    /// private-key operation.
    pub fn sign_with_rng<R: RngCore + CryptoRng>(
        &self,
        rng: &mut R,
        message: &[u8],
        algorithm: DigestAlgorithm,
    ) -> Result<Vec<u8>> {
        if algorithm.is_weak() {
            tracing::warn!("Signing with weak digest {}", algorithm);
        }

        let hashed = algorithm.digest(message);
        self.inner
            .sign_with_rng(rng, algorithm.scheme(), &hashed)
            .map_err(|e| Error::EncryptionFailed(format!("RSA signing failed: {}", e)))
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("bits", &(self.modulus_bytes() * 8))
            .finish_non_exhaustive()
    }
}

// ============================================================================
// BYTE-LEVEL OPERATIONS
// ============================================================================

/// Generate a key pair of `strength_bits`
///
/// With `seed`, generation is deterministic (see
/// [`super::random::seeded_rng`]): for reproducible tests only.
pub fn generate_key_pair(strength_bits: usize, seed: Option<&[u8]>) -> Result<KeyPair> {
    match seed {
        Some(seed) => KeyPair::generate_with_rng(&mut seeded_rng(seed), strength_bits),
        None => KeyPair::generate_with_rng(&mut secure_rng(), strength_bits),
    }
}

/// Smallest strength that can still wrap a symmetric key
pub(crate) fn check_strength(strength_bits: usize) -> Result<()> {
    if strength_bits / 8 < KEY_SIZE + PKCS1_PADDING_OVERHEAD {
        return Err(Error::InvalidArgument(format!(
            "RSA strength of {} bits cannot wrap a {}-byte key",
            strength_bits, KEY_SIZE
        )));
    }
    Ok(())
}

/// PKCS#1 v1.5 encrypt `message` under a DER public key
pub fn encrypt(public_key: &[u8], message: &[u8]) -> Result<Vec<u8>> {
    PublicKey::from_der(public_key)?.encrypt(&mut secure_rng(), message)
}

/// PKCS#1 v1.5 decrypt `block` with a DER private key
pub fn decrypt(private_key: &[u8], block: &[u8]) -> Result<Vec<u8>> {
    PrivateKey::from_der(private_key)?.decrypt(block)
}

/// Sign `message` with a DER private key
pub fn sign(private_key: &[u8], message: &[u8], algorithm: DigestAlgorithm) -> Result<Vec<u8>> {
    PrivateKey::from_der(private_key)?.sign(message, algorithm)
}

/// Verify `signature` over `message` with a DER public key
pub fn verify(
    public_key: &[u8],
    message: &[u8],
    signature: &[u8],
    algorithm: DigestAlgorithm,
) -> Result<()> {
    PublicKey::from_der(public_key)?.verify(message, signature, algorithm)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::random::seeded_rng;
    use crate::testing::{KEYPAIR_1024_A, KEYPAIR_1024_B, KEYPAIR_2048};

    #[test]
    fn test_encrypt_decrypt_round_trip() {
        let kp = &*KEYPAIR_1024_A;
        let block = encrypt(kp.public_key(), b"wrapped key material").unwrap();

        assert_eq!(block.len(), 128);
        assert_eq!(decrypt(kp.private_key(), &block).unwrap(), b"wrapped key material");
    }

    #[test]
    fn test_capacity_boundary() {
        let kp = &*KEYPAIR_1024_A;
        let public = PublicKey::from_der(kp.public_key()).unwrap();
        let modulus = public.modulus_bytes();
        assert_eq!(modulus, 128);

        let fits = vec![0x5au8; modulus - 11];
        let block = encrypt(kp.public_key(), &fits).unwrap();
        assert_eq!(decrypt(kp.private_key(), &block).unwrap(), fits);

        let too_long = vec![0x5au8; modulus - 10];
        assert!(matches!(
            encrypt(kp.public_key(), &too_long),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_capacity_boundary_2048() {
        let kp = &*KEYPAIR_2048;
        let public = PublicKey::from_der(kp.public_key()).unwrap();
        assert_eq!(public.modulus_bytes(), 256);
        assert_eq!(public.max_message_len(), 245);

        let fits = vec![0xc3u8; 245];
        let block = encrypt(kp.public_key(), &fits).unwrap();
        assert_eq!(block.len(), 256);
        assert_eq!(decrypt(kp.private_key(), &block).unwrap(), fits);

        assert!(matches!(
            encrypt(kp.public_key(), &[0xc3u8; 246]),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_sign_verify_2048() {
        let kp = &*KEYPAIR_2048;
        let signature = sign(kp.private_key(), b"hello", DigestAlgorithm::Sha256).unwrap();

        assert_eq!(signature.len(), 256);
        assert!(verify(kp.public_key(), b"hello", &signature, DigestAlgorithm::Sha256).is_ok());
        assert!(matches!(
            verify(KEYPAIR_1024_A.public_key(), b"hello", &signature, DigestAlgorithm::Sha256),
            Err(Error::SignatureMismatch)
        ));
    }

    #[test]
    fn test_explicit_rng_operations() {
        let private = PrivateKey::from_der(KEYPAIR_1024_A.private_key()).unwrap();
        let public = private.public_key().unwrap();

        let with_rng = private
            .sign_with_rng(&mut seeded_rng(b"blinding"), b"hello", DigestAlgorithm::Sha256)
            .unwrap();
        assert_eq!(with_rng, private.sign(b"hello", DigestAlgorithm::Sha256).unwrap());

        let block = public.encrypt(&mut seeded_rng(b"padding"), &[9u8; 32]).unwrap();
        let unwrapped = private.decrypt_with_rng(&mut seeded_rng(b"blinding"), &block).unwrap();
        assert_eq!(unwrapped, vec![9u8; 32]);
    }

    #[test]
    fn test_decrypt_with_wrong_key_fails() {
        let block = encrypt(KEYPAIR_1024_A.public_key(), &[7u8; 32]).unwrap();
        let result = decrypt(KEYPAIR_1024_B.private_key(), &block);

        // PKCS#1 v1.5 padding almost always rejects a foreign block; if it
        // does not, the unwrapped bytes cannot match.
        match result {
            Err(Error::DecryptionError(_)) => {}
            Ok(bytes) => assert_ne!(bytes, vec![7u8; 32]),
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_decrypt_garbage_fails() {
        let result = decrypt(KEYPAIR_1024_A.private_key(), &[1u8; 17]);
        assert!(matches!(result, Err(Error::DecryptionError(_))));
    }

    #[test]
    fn test_sign_verify_all_digests() {
        let kp = &*KEYPAIR_1024_A;
        for algorithm in [
            DigestAlgorithm::Sha1,
            DigestAlgorithm::Sha256,
            DigestAlgorithm::Sha384,
            DigestAlgorithm::Sha512,
            DigestAlgorithm::Md5,
        ] {
            let signature = sign(kp.private_key(), b"hello", algorithm).unwrap();
            assert!(verify(kp.public_key(), b"hello", &signature, algorithm).is_ok());
        }
    }

    #[test]
    fn test_signature_tamper() {
        let kp = &*KEYPAIR_1024_A;
        let signature = sign(kp.private_key(), b"hello", DigestAlgorithm::Sha256).unwrap();

        let result = verify(kp.public_key(), b"hellO", &signature, DigestAlgorithm::Sha256);
        assert!(matches!(result, Err(Error::SignatureMismatch)));
    }

    #[test]
    fn test_digest_mismatch_fails() {
        let kp = &*KEYPAIR_1024_A;
        let signature = sign(kp.private_key(), b"hello", DigestAlgorithm::Sha256).unwrap();

        let result = verify(kp.public_key(), b"hello", &signature, DigestAlgorithm::Sha512);
        assert!(matches!(result, Err(Error::SignatureMismatch)));
    }

    #[test]
    fn test_seeded_scenario() {
        let kp = generate_key_pair(1024, Some(b"test-seed".as_slice())).unwrap();
        let signature = sign(kp.private_key(), "hello".as_bytes(), DigestAlgorithm::Sha256).unwrap();

        assert!(verify(kp.public_key(), b"hello", &signature, DigestAlgorithm::Sha256).is_ok());

        let unrelated = generate_key_pair(1024, None).unwrap();
        let result = verify(unrelated.public_key(), b"hello", &signature, DigestAlgorithm::Sha256);
        assert!(matches!(result, Err(Error::SignatureMismatch)));
    }

    #[test]
    fn test_digest_names() {
        assert_eq!("SHA256".parse::<DigestAlgorithm>().unwrap(), DigestAlgorithm::Sha256);
        assert_eq!("MD5".parse::<DigestAlgorithm>().unwrap(), DigestAlgorithm::Md5);
        assert!(matches!(
            "SHA3".parse::<DigestAlgorithm>(),
            Err(Error::InvalidArgument(_))
        ));
        assert!(DigestAlgorithm::Md5.is_weak());
        assert!(!DigestAlgorithm::Sha256.is_weak());
        assert_eq!(DigestAlgorithm::default(), DigestAlgorithm::Sha256);
    }

    #[test]
    fn test_invalid_key_bytes() {
        assert!(matches!(
            encrypt(b"not a key", b"x"),
            Err(Error::InvalidKey(_))
        ));
        assert!(matches!(
            sign(b"not a key", b"x", DigestAlgorithm::Sha256),
            Err(Error::InvalidKey(_))
        ));
    }

    #[test]
    fn test_public_key_der_is_stable() {
        let kp = &*KEYPAIR_1024_A;
        let public = PublicKey::from_der(kp.public_key()).unwrap();

        assert_eq!(public.to_der().unwrap(), kp.public_key());
        assert_eq!(public.fingerprint(), kp.fingerprint());
    }

    #[test]
    fn test_fingerprint_ignores_encoding_of_parameters() {
        // Same SPKI with the NULL algorithm parameters dropped
        let der = KEYPAIR_1024_A.public_key();
        let public = PublicKey::from_der(der).unwrap();
        assert_eq!(public.fingerprint(), &Fingerprint::of(&public.to_der().unwrap()));

        assert_eq!(&der[..5], &[0x30, 0x81, 0x9f, 0x30, 0x0d]);
        assert_eq!(&der[16..18], &[0x05, 0x00]);

        let mut stripped = vec![0x30, 0x81, 0x9d, 0x30, 0x0b];
        stripped.extend_from_slice(&der[5..16]);
        stripped.extend_from_slice(&der[18..]);

        match PublicKey::from_der(&stripped) {
            Ok(public) => {
                assert_eq!(public.fingerprint(), KEYPAIR_1024_A.fingerprint());
                assert_eq!(public.to_der().unwrap(), der);
            }
            Err(e) => assert!(matches!(e, Error::InvalidKey(_))),
        }
    }

    #[test]
    fn test_strength_too_small() {
        assert!(matches!(check_strength(256), Err(Error::InvalidArgument(_))));
        assert!(check_strength(1024).is_ok());
    }
}
