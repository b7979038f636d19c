//! JSON bodies exchanged between client and proxy

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

/// Extraction request body
///
/// Missing keys read as empty strings so the proxy can answer with its own
/// validation error instead of a parse failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExtractRequest {
    /// Base64 image bytes, no data-URL prefix
    #[serde(rename = "imageB64")]
    pub image_b64: String,
    /// Image MIME type, e.g. `image/png`
    pub mime_type: String,
}

impl ExtractRequest {
    /// Encode raw image bytes
    #[must_use]
    pub fn from_image(image: &[u8], mime_type: impl Into<String>) -> Self {
        Self {
            image_b64: STANDARD.encode(image),
            mime_type: mime_type.into(),
        }
    }

    /// Whether both the image and its type are present
    #[inline]
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.image_b64.is_empty() && !self.mime_type.is_empty()
    }
}

/// Error body returned by the proxy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable message
    pub error: String,
}

impl ErrorBody {
    /// Wrap a message
    pub fn new(error: impl Into<String>) -> Self {
        Self { error: error.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_uses_camel_case_key_names() {
        let request = ExtractRequest::from_image(b"img", "image/png");
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json, serde_json::json!({"imageB64": "aW1n", "mimeType": "image/png"}));
    }

    #[test]
    fn missing_keys_read_as_incomplete() {
        let request: ExtractRequest = serde_json::from_str(r#"{"mimeType":"image/png"}"#).unwrap();
        assert!(!request.is_complete());
    }
}
