//! Gemini `generateContent` client.

use std::fmt;
use std::time::Duration;

use tracing::debug;
use url::Url;

use crate::error::{Error, Result, api_error};
use crate::types::{GenerateContentRequest, GenerateContentResponse};

/// Default model.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Default thinking budget in tokens.
pub const DEFAULT_THINKING_BUDGET: i32 = 2048;

/// Default per-request timeout. Thinking models answer slowly.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/";

/// Client for one model and API key.
#[derive(Clone)]
pub struct GeminiClient {
    api_key: String,
    model: String,
    thinking_budget: Option<i32>,
    base_url: Url,
    http_client: reqwest::Client,
}

impl fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiClient")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("thinking_budget", &self.thinking_budget)
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    /// Creates a client for [`DEFAULT_MODEL`] with the default timeout and
    /// thinking budget.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if the API key is blank, or an HTTP
    /// error if the client cannot be built.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(Error::InvalidConfig("Gemini API key is empty".to_string()));
        }

        Ok(Self {
            api_key,
            model: DEFAULT_MODEL.to_string(),
            thinking_budget: Some(DEFAULT_THINKING_BUDGET),
            base_url: Url::parse(DEFAULT_BASE_URL)?,
            http_client: reqwest::Client::builder().timeout(DEFAULT_TIMEOUT).build()?,
        })
    }

    /// Sets the model name (e.g., `gemini-2.5-pro`).
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the thinking budget; `None` leaves it to the model default.
    #[must_use]
    pub const fn with_thinking_budget(mut self, budget: Option<i32>) -> Self {
        self.thinking_budget = budget;
        self
    }

    /// Sets the per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be rebuilt.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self> {
        self.http_client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(self)
    }

    /// Overrides the API base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid.
    pub fn with_base_url(mut self, base_url: impl AsRef<str>) -> Result<Self> {
        let mut raw = base_url.as_ref().to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        self.base_url = Url::parse(&raw)?;
        Ok(self)
    }

    /// Returns the configured model name.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Sends `prompt` as a single user turn and returns the answer text.
    ///
    /// The text is returned as generated (not trimmed). A response without
    /// candidates yields an empty string.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-success status, an
    /// undecodable body, or a blocked prompt.
    pub async fn generate_text(&self, prompt: &str) -> Result<String> {
        let url = self.endpoint()?;
        let request = GenerateContentRequest::from_prompt(prompt, self.thinking_budget);

        debug!(model = %self.model, prompt_chars = prompt.chars().count(), "Calling generateContent");

        let response = self
            .http_client
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(api_error(status.as_u16(), status.canonical_reason(), &body));
        }

        let bytes = response.bytes().await?;
        let parsed: GenerateContentResponse = serde_json::from_slice(&bytes)?;

        if let Some(reason) = parsed.block_reason() {
            return Err(Error::Blocked(reason.to_string()));
        }

        let text = parsed.text();
        debug!(
            finish_reason = ?parsed.candidates.first().and_then(|c| c.finish_reason.as_deref()),
            answer_chars = text.chars().count(),
            "generateContent finished"
        );
        Ok(text)
    }

    fn endpoint(&self) -> Result<Url> {
        Ok(self
            .base_url
            .join(&format!("models/{}:generateContent", self.model))?)
    }
}
