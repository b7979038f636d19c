//! Generative model backends

use crate::{ExtractError, Result};
use mswasth_record::Field;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use std::time::Duration;

/// Model used when none is configured
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Public Gemini API base URL
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Instruction sent alongside the image
pub const EXTRACTION_PROMPT: &str =
    "Analyze the document image and extract customer and policy information. Use YYYY-MM-DD format for dates.";

/// Fields the model is asked to fill
///
/// Tenure and agent are derived from the lookup table and remarks are
/// operator notes, so none of them are requested.
pub const EXTRACTABLE_FIELDS: [Field; 20] = [
    Field::PartnerName,
    Field::ProductDetails,
    Field::Premium,
    Field::BranchName,
    Field::BranchCode,
    Field::Region,
    Field::CustomerName,
    Field::Gender,
    Field::DateOfBirth,
    Field::MobileNumber,
    Field::CustomerId,
    Field::EnrolmentDate,
    Field::SavingsAcNo,
    Field::CsbCode,
    Field::D2cCode,
    Field::NomineeName,
    Field::NomineeDob,
    Field::NomineeRelationship,
    Field::NomineeMobileNumber,
    Field::NomineeGender,
];

/// Structured-output schema for [`EXTRACTABLE_FIELDS`]
#[must_use]
pub fn response_schema() -> Value {
    let mut properties = Map::new();
    for field in EXTRACTABLE_FIELDS {
        let kind = if field == Field::Premium { "NUMBER" } else { "STRING" };
        let mut property = json!({ "type": kind });
        let description = match field {
            Field::Gender | Field::NomineeGender => Some(r#"Should be "Male", "Female", or "Other""#),
            Field::DateOfBirth | Field::EnrolmentDate | Field::NomineeDob => Some("Date in YYYY-MM-DD format"),
            _ => None,
        };
        if let Some(description) = description {
            property["description"] = json!(description);
        }
        properties.insert(field.name().to_string(), property);
    }
    json!({ "type": "OBJECT", "properties": properties })
}

/// A model that reads a document image and answers with record JSON
#[async_trait::async_trait]
pub trait GenerativeBackend: Send + Sync {
    /// JSON object text describing the document
    async fn generate(&self, image_b64: &str, mime_type: &str) -> Result<String>;
}

/// Gemini `generateContent` over REST
#[derive(Debug, Clone)]
pub struct GeminiBackend {
    http_client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiBackend {
    /// Backend for the public API with the default model
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(15))
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|e| ExtractError::Transport(e.to_string()))?;
        Ok(Self {
            http_client,
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: api_key.into(),
        })
    }

    /// Use another model
    #[inline]
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Use another API root (e.g. a regional endpoint or a test server)
    #[inline]
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Model name
    #[inline]
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }

    fn request_body(image_b64: &str, mime_type: &str) -> Value {
        json!({
            "contents": [{
                "parts": [
                    { "inlineData": { "mimeType": mime_type, "data": image_b64 } },
                    { "text": EXTRACTION_PROMPT },
                ],
            }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": response_schema(),
            },
        })
    }
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl GenerateResponse {
    /// Concatenated text parts of the first candidate
    fn text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();
        (!text.is_empty()).then_some(text)
    }
}

#[async_trait::async_trait]
impl GenerativeBackend for GeminiBackend {
    async fn generate(&self, image_b64: &str, mime_type: &str) -> Result<String> {
        let response = self
            .http_client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&Self::request_body(image_b64, mime_type))
            .send()
            .await
            .map_err(|e| ExtractError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unable to read model response body".to_string());
            return Err(ExtractError::Remote {
                status: status.as_u16(),
                message,
            });
        }

        let payload: GenerateResponse = response.json().await?;
        payload
            .text()
            .ok_or_else(|| ExtractError::Decode("model returned no text".to_string()))
    }
}
