//! Claude API integration for AI-phrased recommendations

use serde_json::json;

use super::{InsightPromptBuilder, InsightSource};
use crate::SiteAnalysis;

/// Environment variable holding the API key
pub const API_KEY_VAR: &str = "ANTHROPIC_API_KEY";

const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
const MESSAGES_URL: &str = "https://api.anthropic.com/v1/messages";
const MAX_TOKENS: u32 = 4096;

/// Claude API client for generating SEO insight text
pub struct ClaudeClient {
    api_key: String,
    model: String,
    base_url: String,
}

/// Result from the Claude API
#[derive(Debug)]
pub struct InsightResponse {
    pub text: String,
    pub tokens_used: Option<u32>,
}

/// Error from insight generation
#[derive(Debug)]
pub enum InsightError {
    NoApiKey,
    RequestFailed(String),
    InvalidResponse(String),
    RateLimited,
    ApiError(String),
}

impl std::fmt::Display for InsightError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InsightError::NoApiKey => {
                write!(f, "{API_KEY_VAR} environment variable not set")
            }
            InsightError::RequestFailed(e) => write!(f, "Request failed: {e}"),
            InsightError::InvalidResponse(e) => write!(f, "Invalid response: {e}"),
            InsightError::RateLimited => write!(f, "Rate limited - try again later"),
            InsightError::ApiError(e) => write!(f, "API error: {e}"),
        }
    }
}

impl std::error::Error for InsightError {}

impl ClaudeClient {
    /// Create a client using the API key from the environment
    pub fn from_env() -> Result<Self, InsightError> {
        let api_key = std::env::var(API_KEY_VAR).map_err(|_| InsightError::NoApiKey)?;
        Ok(Self::with_key(api_key))
    }

    /// Create a client with a specific API key
    pub fn with_key(api_key: String) -> Self {
        Self {
            api_key,
            model: DEFAULT_MODEL.to_string(),
            base_url: MESSAGES_URL.to_string(),
        }
    }

    /// Set the model to use
    pub fn model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    /// Send a prompt and return the response text
    pub fn send_request(&self, prompt: &str) -> Result<InsightResponse, InsightError> {
        let client = reqwest::blocking::Client::new();

        let body = json!({
            "model": self.model,
            "max_tokens": MAX_TOKENS,
            "messages": [
                {
                    "role": "user",
                    "content": prompt
                }
            ]
        });

        let response = client
            .post(&self.base_url)
            .header("Content-Type", "application/json")
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .json(&body)
            .send()
            .map_err(|e| InsightError::RequestFailed(e.to_string()))?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(InsightError::RateLimited);
        }

        if !status.is_success() {
            let error_text = response.text().unwrap_or_default();
            return Err(InsightError::ApiError(format!("{status}: {error_text}")));
        }

        let body: serde_json::Value = response
            .json()
            .map_err(|e| InsightError::InvalidResponse(e.to_string()))?;

        let text = body["content"]
            .as_array()
            .and_then(|blocks| blocks.first())
            .and_then(|block| block["text"].as_str())
            .ok_or_else(|| InsightError::InvalidResponse("No content in response".to_string()))?
            .to_string();

        let tokens = body["usage"]["output_tokens"].as_u64().map(|t| t as u32);

        Ok(InsightResponse {
            text,
            tokens_used: tokens,
        })
    }
}

impl InsightSource for ClaudeClient {
    fn name(&self) -> &'static str {
        "claude"
    }

    fn generate(&self, analysis: &SiteAnalysis) -> Result<String, InsightError> {
        let prompt = InsightPromptBuilder::new().build(analysis);
        self.send_request(&prompt).map(|response| response.text)
    }

    fn generate_comparison(&self, analyses: &[SiteAnalysis]) -> Result<String, InsightError> {
        if analyses.len() < 2 {
            return Ok("Need at least 2 URLs for comparison".to_string());
        }
        let prompt = InsightPromptBuilder::new().build_comparison(analyses);
        self.send_request(&prompt).map(|response| response.text)
    }
}
