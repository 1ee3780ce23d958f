//! Inline `data:` references.
//!
//! [RFC 2397](https://www.rfc-editor.org/rfc/rfc2397)
//!
//! Transcoded images are embedded straight into the HTML as base64 `data:`
//! URLs so the converted document is self-contained.

use base64::Engine;
use thiserror::Error;

/// Errors from decoding a `data:` URL.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DataUrlError {
    /// The string does not start with `data:`.
    #[error("not a data URL")]
    MissingScheme,
    /// No comma separates the metadata from the payload.
    #[error("invalid data URL: missing comma")]
    MissingComma,
    /// Only base64 payloads are produced and accepted.
    #[error("unsupported data URL encoding: {0}")]
    UnsupportedEncoding(String),
    /// The payload is not valid base64.
    #[error("base64 decode error: {0}")]
    Base64(String),
}

/// A `data:` URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUrl {
    /// The full raw URL string (e.g. `data:image/png;base64,...`).
    raw: String,
}

impl DataUrl {
    /// Build a base64 `data:` URL for `bytes` with the given media type.
    #[must_use]
    pub fn encode(media_type: &str, bytes: &[u8]) -> Self {
        let payload = base64::engine::general_purpose::STANDARD.encode(bytes);
        Self {
            raw: format!("data:{media_type};base64,{payload}"),
        }
    }

    /// Wrap an existing `data:` URL string.
    #[must_use]
    pub const fn from_raw(raw: String) -> Self {
        Self { raw }
    }

    /// The URL as a string, suitable for an `src` attribute.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Consume into the raw URL string.
    #[must_use]
    pub fn into_string(self) -> String {
        self.raw
    }

    /// Media type declared in the metadata (e.g. `image/png`).
    #[must_use]
    pub fn media_type(&self) -> Option<&str> {
        let rest = self.raw.strip_prefix("data:")?;
        let (metadata, _) = rest.split_once(',')?;
        Some(metadata.split(';').next().unwrap_or(metadata))
    }

    /// Decode the payload into raw bytes.
    ///
    /// # Errors
    ///
    /// Returns a [`DataUrlError`] if the URL is malformed, not base64
    /// encoded, or the payload fails to decode.
    pub fn decode(&self) -> Result<Vec<u8>, DataUrlError> {
        let rest = self
            .raw
            .strip_prefix("data:")
            .ok_or(DataUrlError::MissingScheme)?;
        let (metadata, data) = rest.split_once(',').ok_or(DataUrlError::MissingComma)?;

        if !metadata.ends_with(";base64") {
            return Err(DataUrlError::UnsupportedEncoding(metadata.to_string()));
        }
        base64::engine::general_purpose::STANDARD
            .decode(data)
            .map_err(|e| DataUrlError::Base64(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_then_decode() {
        let url = DataUrl::encode("image/png", b"\x89PNG");
        assert!(url.as_str().starts_with("data:image/png;base64,"));
        assert_eq!(url.media_type(), Some("image/png"));
        assert_eq!(url.decode().unwrap(), b"\x89PNG");
    }

    #[test]
    fn test_decode_rejects_plain_payload() {
        let url = DataUrl::from_raw("data:text/plain,hello".to_string());
        assert_eq!(
            url.decode(),
            Err(DataUrlError::UnsupportedEncoding("text/plain".to_string()))
        );
    }

    #[test]
    fn test_decode_rejects_missing_comma() {
        let url = DataUrl::from_raw("data:image/png;base64".to_string());
        assert_eq!(url.decode(), Err(DataUrlError::MissingComma));
    }

    #[test]
    fn test_decode_rejects_other_scheme() {
        let url = DataUrl::from_raw("https://example.com/a.png".to_string());
        assert_eq!(url.decode(), Err(DataUrlError::MissingScheme));
    }
}
