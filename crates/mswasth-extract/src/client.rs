//! Extraction client

use crate::wire::ExtractRequest;
use crate::{mime_for_path, ExtractError, Result};
use mswasth_record::PartialRecord;
use std::path::Path;
use std::time::Duration;

/// Default request timeout; model calls on large scans are slow
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Turns a document image into a partial policy record
#[async_trait::async_trait]
pub trait Extractor: Send + Sync {
    /// Extract whatever fields the image yields
    async fn extract(&self, image: &[u8], mime_type: &str) -> Result<PartialRecord>;

    /// Read an image file and extract from it
    async fn extract_file(&self, path: &Path) -> Result<PartialRecord> {
        let mime_type = mime_for_path(path).ok_or_else(|| ExtractError::UnsupportedImage(path.to_path_buf()))?;
        let image = tokio::fs::read(path)
            .await
            .map_err(|e| ExtractError::io_error(path, e))?;
        self.extract(&image, mime_type).await
    }
}

/// Posts images to an extraction proxy
#[derive(Debug, Clone)]
pub struct HttpExtractor {
    http_client: reqwest::Client,
    endpoint: String,
}

impl HttpExtractor {
    /// Client for `endpoint` with the default timeout
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        Self::with_timeout(endpoint, DEFAULT_TIMEOUT)
    }

    /// Client for `endpoint` with an overall request timeout
    pub fn with_timeout(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(15))
            .timeout(timeout)
            .build()
            .map_err(|e| ExtractError::Transport(e.to_string()))?;
        Ok(Self {
            http_client,
            endpoint: endpoint.into(),
        })
    }

    /// Endpoint URL
    #[inline]
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait::async_trait]
impl Extractor for HttpExtractor {
    async fn extract(&self, image: &[u8], mime_type: &str) -> Result<PartialRecord> {
        let payload = ExtractRequest::from_image(image, mime_type);
        tracing::debug!(endpoint = %self.endpoint, mime_type, bytes = image.len(), "sending extraction request");

        let response = self
            .http_client
            .post(&self.endpoint)
            .json(&payload)
            .send()
            .await
            .map_err(|e| ExtractError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = remote_message(&body)
                .unwrap_or_else(|| format!("Request failed with status {}", status.as_u16()));
            tracing::warn!(status = status.as_u16(), %message, "extraction rejected");
            return Err(ExtractError::Remote {
                status: status.as_u16(),
                message,
            });
        }

        let partial = PartialRecord::from_json(&body).map_err(|e| ExtractError::Decode(e.to_string()))?;
        tracing::info!(fields = partial.present_count(), "extraction succeeded");
        Ok(partial)
    }
}

/// Non-empty `error` string of a JSON error body
fn remote_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("error")
        .and_then(serde_json::Value::as_str)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_message_prefers_error_field() {
        assert_eq!(remote_message(r#"{"error":"quota"}"#).as_deref(), Some("quota"));
        assert_eq!(remote_message(r#"{"error":""}"#), None);
        assert_eq!(remote_message("Method Not Allowed"), None);
    }
}
