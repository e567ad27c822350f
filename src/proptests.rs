//! Property tests for ciphers, fingerprints and envelopes.

use proptest::prelude::*;

use crate::crypto::{fingerprint, from_display_string, symmetric, SymmetricKey, FINGERPRINT_SIZE};
use crate::envelope::{open, seal};
use crate::error::Error;
use crate::testing::{KEYPAIR_1024_A, KEYPAIR_1024_B};

fn is_display_format(s: &str) -> bool {
    let groups: Vec<&str> = s.split('-').collect();
    let (last, full) = match groups.split_last() {
        Some(split) => split,
        None => return false,
    };
    let hex = |g: &str| g.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b));

    full.iter().all(|g| g.len() == 4 && hex(g)) && (1..=4).contains(&last.len()) && hex(last)
}

proptest! {
    #[test]
    fn prop_symmetric_round_trip(key in any::<[u8; 32]>(), plaintext in prop::collection::vec(any::<u8>(), 0..2048)) {
        let key = SymmetricKey::from_bytes(key);
        let blob = symmetric::encrypt(&key, &plaintext).unwrap();
        prop_assert_eq!(symmetric::decrypt(&key, &blob).unwrap(), plaintext);
    }

    #[test]
    fn prop_symmetric_tamper(plaintext in prop::collection::vec(any::<u8>(), 1..256), index in any::<prop::sample::Index>()) {
        let key = SymmetricKey::from_bytes([3u8; 32]);
        let mut blob = symmetric::encrypt(&key, &plaintext).unwrap();
        let i = index.index(blob.len());
        blob[i] ^= 0x80;
        prop_assert!(matches!(symmetric::decrypt(&key, &blob), Err(Error::AuthenticationError)));
    }

    #[test]
    fn prop_fingerprint_format(data in prop::collection::vec(any::<u8>(), 0..512)) {
        let fp = fingerprint(&data);
        prop_assert_eq!(fp.as_bytes().len(), FINGERPRINT_SIZE);
        prop_assert_eq!(fp, fingerprint(&data));

        let display = fp.to_display_string();
        prop_assert!(is_display_format(&display), "bad display string {}", display);
        prop_assert_eq!(from_display_string(&display).unwrap(), fp);
    }
}

proptest! {
    // RSA signing and unwrapping dominate; keep the case count low
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn prop_envelope_round_trip(plaintext in prop::collection::vec(any::<u8>(), 0..1024)) {
        let sender = &*KEYPAIR_1024_A;
        let recipient = &*KEYPAIR_1024_B;

        let sealed = seal(&plaintext, sender.private_key(), sender.fingerprint().as_bytes(), recipient.public_key()).unwrap();
        let opened = open(&sealed, recipient.private_key()).unwrap();

        prop_assert_eq!(opened.plaintext(), plaintext.as_slice());
        prop_assert!(opened.verify(sender.public_key()).is_ok());
    }

    #[test]
    fn prop_envelope_tamper(plaintext in prop::collection::vec(any::<u8>(), 0..128), index in any::<prop::sample::Index>()) {
        let sender = &*KEYPAIR_1024_A;
        let recipient = &*KEYPAIR_1024_B;

        let mut sealed = seal(&plaintext, sender.private_key(), sender.fingerprint().as_bytes(), recipient.public_key()).unwrap();
        // 1024-bit recipient: the AEAD region starts after fp, length and wrapped key
        let start = FINGERPRINT_SIZE + 4 + 128;
        let i = start + index.index(sealed.len() - start);
        sealed[i] ^= 0x01;

        prop_assert!(matches!(open(&sealed, recipient.private_key()), Err(Error::AuthenticationError)));
    }
}

#[test]
fn test_display_format_checker() {
    assert!(is_display_format("ab12-cd34-e5"));
    assert!(!is_display_format("ab12-cd34-"));
    assert!(!is_display_format("-ab12"));
    assert!(!is_display_format("AB12"));
}
