//! Tagged message input.
//!
//! Callers hand the crate either raw bytes or UTF-8 text. Both collapse into
//! one canonical byte view before any cryptography runs, so there is exactly
//! one code path per operation.

use serde::{Deserialize, Serialize};

/// A message supplied either as raw bytes or as UTF-8 text
///
/// Serialized externally tagged, with bytes as base64:
///
/// ```text
/// { "text": "hello" }
/// { "bytes": "aGVsbG8=" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Content {
    /// Arbitrary binary data
    Bytes(#[serde(with = "base64_bytes")] Vec<u8>),
    /// Text, encoded as UTF-8
    Text(String),
}

impl Content {
    /// The canonical byte view of this content
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Content::Bytes(bytes) => bytes,
            Content::Text(text) => text.as_bytes(),
        }
    }

    /// Consume into owned bytes
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Content::Bytes(bytes) => bytes,
            Content::Text(text) => text.into_bytes(),
        }
    }

    /// Number of bytes in the canonical view
    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    /// True if the canonical view is empty
    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }
}

impl AsRef<[u8]> for Content {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl From<&str> for Content {
    fn from(text: &str) -> Self {
        Content::Text(text.to_owned())
    }
}

impl From<String> for Content {
    fn from(text: String) -> Self {
        Content::Text(text)
    }
}

impl From<Vec<u8>> for Content {
    fn from(bytes: Vec<u8>) -> Self {
        Content::Bytes(bytes)
    }
}

impl From<&[u8]> for Content {
    fn from(bytes: &[u8]) -> Self {
        Content::Bytes(bytes.to_vec())
    }
}

/// Serde helper for byte vectors as standard base64
pub(crate) mod base64_bytes {
    use base64::Engine as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&base64::engine::general_purpose::STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        base64::engine::general_purpose::STANDARD
            .decode(s)
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_and_bytes_share_byte_view() {
        let text = Content::from("hello");
        let bytes = Content::from(b"hello".as_slice());

        assert_eq!(text.as_bytes(), bytes.as_bytes());
        assert_eq!(text.len(), 5);
    }

    #[test]
    fn test_serde_representation() {
        let text: Content = serde_json::from_str(r#"{"text":"hi"}"#).unwrap();
        assert_eq!(text, Content::Text("hi".into()));

        let bytes: Content = serde_json::from_str(r#"{"bytes":"aGk="}"#).unwrap();
        assert_eq!(bytes.into_bytes(), b"hi".to_vec());

        let json = serde_json::to_string(&Content::Bytes(vec![0xff])).unwrap();
        assert_eq!(json, r#"{"bytes":"/w=="}"#);
    }

    #[test]
    fn test_rejects_bad_base64() {
        let result: std::result::Result<Content, _> =
            serde_json::from_str(r#"{"bytes":"***"}"#);
        assert!(result.is_err());
    }
}
