//! Client for the external summarization service.
//!
//! Talks to an OpenAI-compatible chat-completions endpoint. One request per
//! summary, no retry: if the call fails the caller surfaces the error and the
//! user may trigger the action again.

use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::LlmConfig;
use crate::{Error, Result};

/// Service wrapping the hosted summarization API.
#[derive(Clone)]
pub struct LlmService {
    client: Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

/// Response from the chat-completions API.
#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Option<Vec<Choice>>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

impl LlmService {
    /// Create the service from config.
    pub fn new(config: &LlmConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
        }
    }

    /// Whether an API credential is configured.
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// The configured model identifier.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Complete a prompt. Fails with `SummaryUnavailable` when no credential
    /// is configured or the external call does not produce a summary.
    pub async fn complete(&self, prompt: &str, max_tokens: u32) -> Result<String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| Error::SummaryUnavailable("No API credential configured".into()))?;

        debug!(model = %self.model, "Calling summarization provider");

        let url = format!("{}/chat/completions", self.base_url);
        let body = json!({
            "model": self.model,
            "messages": [
                {"role": "user", "content": prompt}
            ],
            "max_tokens": max_tokens,
            "temperature": 0.3
        });

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::SummaryUnavailable(format!("Request failed: {}", e)))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| Error::SummaryUnavailable(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            warn!(%status, "Summarization provider returned an error");
            return Err(Error::SummaryUnavailable(format!(
                "Provider returned {}: {}",
                status, text
            )));
        }

        Self::parse_response(&text)
    }

    /// Extract the summary text from the completion response.
    fn parse_response(text: &str) -> Result<String> {
        let response: CompletionResponse = serde_json::from_str(text)
            .map_err(|e| Error::SummaryUnavailable(format!("Failed to parse response: {}", e)))?;

        if let Some(error) = response.error {
            return Err(Error::SummaryUnavailable(error.message));
        }

        response
            .choices
            .and_then(|choices| choices.into_iter().next())
            .and_then(|choice| choice.message)
            .map(|message| message.content)
            .ok_or_else(|| Error::SummaryUnavailable("No content in response".into()))
    }
}
