//! `crypto.fingerprint`

use serde::Deserialize;
use serde_json::json;

use super::{parse_args, Slot};
use crate::config::CryptoConfig;
use crate::content::Content;
use crate::crypto;
use crate::error::Result;

/// SHA-256 fingerprint of arbitrary content, as a display string
///
/// Args: `{"data": Content}`. Result: `{"fingerprint": "ab12-…"}`.
pub struct Fingerprint;

#[derive(Deserialize)]
struct Args {
    data: Content,
}

impl Slot for Fingerprint {
    fn name(&self) -> &'static str {
        "crypto.fingerprint"
    }

    fn signal(&self, args: &serde_json::Value, _config: &CryptoConfig) -> Result<serde_json::Value> {
        let Args { data } = parse_args(args)?;
        Ok(json!({ "fingerprint": crypto::fingerprint(data.as_bytes()).to_display_string() }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_and_bytes_agree() {
        let config = CryptoConfig::default();
        let text = Fingerprint.signal(&json!({"data": {"text": "hi"}}), &config).unwrap();
        let bytes = Fingerprint.signal(&json!({"data": {"bytes": "aGk="}}), &config).unwrap();
        assert_eq!(text, bytes);
    }
}
