//! Process-wide defaults for the operation registry.
//!
//! The protocol functions take every parameter explicitly and never read
//! this. Only [`crate::slots`] consults it, to fill in arguments a caller
//! left out and to enforce the legacy digest policy.
//!
//! The configuration holds no seeds or secrets. Seeded key generation through
//! the registry is refused unless [`CryptoConfig::allow_seeded_keys`] is set.

use once_cell::sync::OnceCell;
use serde::Deserialize;

use crate::crypto::DigestAlgorithm;
use crate::error::{Error, Result};

static CONFIG: OnceCell<CryptoConfig> = OnceCell::new();

/// Defaults applied when a request omits a parameter
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CryptoConfig {
    /// RSA modulus size for generated keys, in bits
    pub default_strength: usize,
    /// Digest for sign/verify requests that name none
    pub default_digest: DigestAlgorithm,
    /// Whether MD5 and SHA-1 signatures are accepted
    pub allow_legacy_digests: bool,
    /// Whether `crypto.rsa.create-key` honours a `seed` argument
    ///
    /// A seeded key is reproducible by anyone who knows the seed. Leave this
    /// off outside test harnesses.
    pub allow_seeded_keys: bool,
}

impl Default for CryptoConfig {
    fn default() -> Self {
        Self {
            default_strength: 2048,
            default_digest: DigestAlgorithm::Sha256,
            allow_legacy_digests: true,
            allow_seeded_keys: false,
        }
    }
}

impl CryptoConfig {
    /// Reject `algorithm` if it is weak and legacy digests are disabled
    pub fn check_digest(&self, algorithm: DigestAlgorithm) -> Result<DigestAlgorithm> {
        if algorithm.is_weak() && !self.allow_legacy_digests {
            return Err(Error::InvalidArgument(format!(
                "Digest {} is disabled by configuration",
                algorithm
            )));
        }
        Ok(algorithm)
    }
}

/// Install the process-wide configuration
///
/// Call once at startup. A second call fails with `AlreadyInitialized` and
/// leaves the first configuration in place.
pub fn initialize(config: CryptoConfig) -> Result<()> {
    tracing::info!(
        "Initializing seal-core v{} (default strength {}, default digest {})",
        env!("CARGO_PKG_VERSION"),
        config.default_strength,
        config.default_digest
    );

    CONFIG.set(config).map_err(|_| Error::AlreadyInitialized)
}

/// The installed configuration, or the defaults if none was installed
pub fn config() -> CryptoConfig {
    CONFIG.get().cloned().unwrap_or_default()
}

/// Whether [`initialize`] has been called
pub fn is_initialized() -> bool {
    CONFIG.get().is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CryptoConfig::default();
        assert_eq!(config.default_strength, 2048);
        assert_eq!(config.default_digest, DigestAlgorithm::Sha256);
        assert!(config.allow_legacy_digests);
        assert!(!config.allow_seeded_keys);
    }

    #[test]
    fn test_deserialize_partial() {
        let config: CryptoConfig =
            serde_json::from_str(r#"{"default_digest": "SHA512", "allow_legacy_digests": false}"#).unwrap();
        assert_eq!(config.default_strength, 2048);
        assert_eq!(config.default_digest, DigestAlgorithm::Sha512);
        assert!(!config.allow_legacy_digests);
        assert!(!config.allow_seeded_keys);

        let seeded: CryptoConfig = serde_json::from_str(r#"{"allow_seeded_keys": true}"#).unwrap();
        assert!(seeded.allow_seeded_keys);
    }

    #[test]
    fn test_legacy_digest_policy() {
        let strict = CryptoConfig {
            allow_legacy_digests: false,
            ..CryptoConfig::default()
        };
        assert!(matches!(strict.check_digest(DigestAlgorithm::Md5), Err(Error::InvalidArgument(_))));
        assert!(matches!(strict.check_digest(DigestAlgorithm::Sha1), Err(Error::InvalidArgument(_))));
        assert_eq!(strict.check_digest(DigestAlgorithm::Sha384).unwrap(), DigestAlgorithm::Sha384);

        assert!(CryptoConfig::default().check_digest(DigestAlgorithm::Md5).is_ok());
    }

    // The only test in this binary that touches the global
    #[test]
    fn test_initialize_once() {
        let config = CryptoConfig {
            default_strength: 1024,
            ..CryptoConfig::default()
        };
        initialize(config.clone()).unwrap();
        assert!(is_initialized());
        assert_eq!(self::config(), config);

        assert!(matches!(
            initialize(CryptoConfig::default()),
            Err(Error::AlreadyInitialized)
        ));
        assert_eq!(self::config().default_strength, 1024);
    }
}
