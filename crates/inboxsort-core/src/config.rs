//! Runtime configuration.
//!
//! Loaded from an optional JSON file and then overridden by environment
//! variables. Every field has a default except the Gemini API key.
//!
//! ```json
//! {
//!   "max_items": 20,
//!   "excerpt_chars": 1500,
//!   "excerpt_source": "snippet",
//!   "gemini": { "model": "gemini-2.5-flash", "thinking_budget": 2048 }
//! }
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};

/// Hard upper bound on items visited per run.
pub const MAX_ITEMS_CAP: usize = 20;

/// Default body excerpt length in characters.
pub const DEFAULT_EXCERPT_CHARS: usize = 1500;

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "INBOXSORT_CONFIG";

/// Where the body excerpt comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExcerptSource {
    /// Provider-generated snippet.
    #[default]
    Snippet,
    /// First `text/plain` MIME part, falling back to the snippet.
    PlainText,
}

impl ExcerptSource {
    /// Parse from the config/env string representation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for unknown values.
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "snippet" => Ok(Self::Snippet),
            "plain-text" | "plain_text" | "plaintext" => Ok(Self::PlainText),
            other => Err(Error::Config(format!("unknown excerpt source: {other}"))),
        }
    }
}

/// Gemini oracle settings.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct GeminiConfig {
    /// API key. Required.
    pub api_key: Option<String>,
    /// Model name.
    pub model: String,
    /// Thinking budget in tokens; `None` uses the model default.
    pub thinking_budget: Option<i32>,
    /// HTTP timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: inboxsort_gemini::DEFAULT_MODEL.to_string(),
            thinking_budget: Some(inboxsort_gemini::DEFAULT_THINKING_BUDGET),
            timeout_secs: inboxsort_gemini::DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

impl fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("thinking_budget", &self.thinking_budget)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl GeminiConfig {
    /// Build the Gemini client described by this section.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the API key is missing, or a Gemini
    /// error if the client cannot be built.
    pub fn build_client(&self) -> Result<inboxsort_gemini::GeminiClient> {
        let api_key = self
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| Error::Config("Gemini API key is not set (GEMINI_API_KEY)".into()))?;

        Ok(inboxsort_gemini::GeminiClient::new(api_key)?
            .with_model(&self.model)
            .with_thinking_budget(self.thinking_budget)
            .with_timeout(Duration::from_secs(self.timeout_secs))?)
    }
}

/// Gmail client settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GmailConfig {
    /// HTTP timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for GmailConfig {
    fn default() -> Self {
        Self {
            timeout_secs: inboxsort_gmail::DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

impl GmailConfig {
    /// Build a Gmail client for the given bearer token.
    ///
    /// # Errors
    ///
    /// Returns a Gmail error if the token is empty or the client cannot
    /// be built.
    pub fn build_client(&self, token: inboxsort_gmail::Token) -> Result<inboxsort_gmail::GmailClient> {
        Ok(inboxsort_gmail::GmailClient::with_timeout(
            token,
            Duration::from_secs(self.timeout_secs),
        )?)
    }
}

/// Settings the orchestrator needs for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    /// Maximum items visited.
    pub max_items: usize,
    /// Body excerpt bound in characters.
    pub excerpt_chars: usize,
    /// Candidate search expression.
    pub query: String,
    /// Deadline for a single oracle call.
    pub oracle_timeout: Duration,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            max_items: MAX_ITEMS_CAP,
            excerpt_chars: DEFAULT_EXCERPT_CHARS,
            query: inboxsort_gmail::SearchQuery::unread_primary_inbox().to_string(),
            oracle_timeout: Duration::from_secs(90),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Maximum items visited per run (1..=20).
    pub max_items: usize,
    /// Body excerpt bound in characters.
    pub excerpt_chars: usize,
    /// Where the excerpt comes from.
    pub excerpt_source: ExcerptSource,
    /// Candidate search expression.
    pub query: String,
    /// Deadline for a single oracle call, in seconds.
    pub oracle_timeout_secs: u64,
    /// Gemini settings.
    pub gemini: GeminiConfig,
    /// Gmail settings.
    pub gmail: GmailConfig,
}

impl Default for Config {
    fn default() -> Self {
        let run = RunOptions::default();
        Self {
            max_items: run.max_items,
            excerpt_chars: run.excerpt_chars,
            excerpt_source: ExcerptSource::default(),
            query: run.query,
            oracle_timeout_secs: run.oracle_timeout.as_secs(),
            gemini: GeminiConfig::default(),
            gmail: GmailConfig::default(),
        }
    }
}

impl Config {
    /// Default config file location (`<config_dir>/inboxsort/config.json`).
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("inboxsort").join("config.json"))
    }

    /// Load the config file (if any) and apply environment overrides.
    ///
    /// The file named by `INBOXSORT_CONFIG` must exist; the default
    /// location is optional.
    ///
    /// # Errors
    ///
    /// Returns an error if a file cannot be read or parsed, or an
    /// override is malformed.
    pub fn load() -> Result<Self> {
        let mut config = match std::env::var_os(CONFIG_PATH_ENV) {
            Some(path) => Self::from_file(Path::new(&path))?,
            None => match Self::default_path().filter(|p| p.is_file()) {
                Some(path) => Self::from_file(&path)?,
                None => Self::default(),
            },
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Parse a JSON config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&raw)?;
        debug!(path = %path.display(), "Loaded config file");
        Ok(config)
    }

    /// Apply overrides from a key lookup (the environment in production).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if a numeric or enum value does not parse.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(key) = lookup("GEMINI_API_KEY") {
            self.gemini.api_key = Some(key);
        }
        if let Some(model) = lookup("INBOXSORT_MODEL") {
            self.gemini.model = model;
        }
        if let Some(raw) = lookup("INBOXSORT_MAX_ITEMS") {
            self.max_items = parse_number("INBOXSORT_MAX_ITEMS", &raw)?;
        }
        if let Some(raw) = lookup("INBOXSORT_EXCERPT_CHARS") {
            self.excerpt_chars = parse_number("INBOXSORT_EXCERPT_CHARS", &raw)?;
        }
        if let Some(raw) = lookup("INBOXSORT_EXCERPT_SOURCE") {
            self.excerpt_source = ExcerptSource::parse(&raw)?;
        }
        Ok(())
    }

    /// Check the values a run depends on.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] describing the first invalid value.
    pub fn validate(&self) -> Result<()> {
        if self
            .gemini
            .api_key
            .as_deref()
            .is_none_or(|k| k.trim().is_empty())
        {
            return Err(Error::Config(
                "Gemini API key is not set (GEMINI_API_KEY)".into(),
            ));
        }
        if !(1..=MAX_ITEMS_CAP).contains(&self.max_items) {
            return Err(Error::Config(format!(
                "max_items must be between 1 and {MAX_ITEMS_CAP}, got {}",
                self.max_items
            )));
        }
        if self.excerpt_chars == 0 {
            return Err(Error::Config("excerpt_chars must be positive".into()));
        }
        if self.query.trim().is_empty() {
            return Err(Error::Config("query must not be empty".into()));
        }
        if self.oracle_timeout_secs == 0 {
            return Err(Error::Config("oracle_timeout_secs must be positive".into()));
        }
        if self.gemini.timeout_secs == 0 {
            return Err(Error::Config("gemini.timeout_secs must be positive".into()));
        }
        if self.gmail.timeout_secs == 0 {
            return Err(Error::Config("gmail.timeout_secs must be positive".into()));
        }
        Ok(())
    }

    /// The subset of settings used by the orchestrator.
    #[must_use]
    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            max_items: self.max_items.min(MAX_ITEMS_CAP),
            excerpt_chars: self.excerpt_chars,
            query: self.query.clone(),
            oracle_timeout: Duration::from_secs(self.oracle_timeout_secs),
        }
    }
}

fn parse_number(key: &str, raw: &str) -> Result<usize> {
    raw.trim()
        .parse()
        .map_err(|_| Error::Config(format!("{key} must be a non-negative integer, got {raw:?}")))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.max_items, 20);
        assert_eq!(config.excerpt_chars, 1500);
        assert_eq!(config.excerpt_source, ExcerptSource::Snippet);
        assert_eq!(
            config.query,
            "in:inbox -category:{promotions,social,updates,forums} is:unread"
        );
        assert_eq!(config.gemini.model, "gemini-2.5-flash");
        assert_eq!(config.gemini.thinking_budget, Some(2048));
    }

    #[test]
    fn test_missing_api_key_is_config_error() {
        let config = Config::default();
        assert!(matches!(config.validate(), Err(Error::Config(_))));
        assert!(matches!(
            config.gemini.build_client(),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_overrides() {
        let mut config = Config::default();
        config
            .apply_overrides(lookup(&[
                ("GEMINI_API_KEY", "key-123"),
                ("INBOXSORT_MODEL", "gemini-2.5-pro"),
                ("INBOXSORT_MAX_ITEMS", "5"),
                ("INBOXSORT_EXCERPT_SOURCE", "plain-text"),
            ]))
            .unwrap();

        assert_eq!(config.gemini.api_key.as_deref(), Some("key-123"));
        assert_eq!(config.gemini.model, "gemini-2.5-pro");
        assert_eq!(config.max_items, 5);
        assert_eq!(config.excerpt_source, ExcerptSource::PlainText);
        config.validate().unwrap();
        assert_eq!(config.run_options().max_items, 5);
    }

    #[test]
    fn test_bad_override_rejected() {
        let mut config = Config::default();
        let err = config
            .apply_overrides(lookup(&[("INBOXSORT_MAX_ITEMS", "many")]))
            .unwrap_err();
        assert!(err.to_string().contains("INBOXSORT_MAX_ITEMS"));
    }

    #[test]
    fn test_max_items_above_cap_rejected() {
        let mut config = Config::default();
        config.gemini.api_key = Some("k".into());
        config.max_items = 50;
        assert!(matches!(config.validate(), Err(Error::Config(_))));
        assert_eq!(config.run_options().max_items, MAX_ITEMS_CAP);
    }

    #[test]
    fn test_zero_http_timeouts_rejected() {
        let mut config = Config::default();
        config.gemini.api_key = Some("k".into());
        config.validate().unwrap();

        config.gemini.timeout_secs = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("gemini.timeout_secs"));

        config.gemini.timeout_secs = 60;
        config.gmail.timeout_secs = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("gmail.timeout_secs"));
    }

    #[test]
    fn test_zero_timeout_from_file_rejected() {
        let config: Config = serde_json::from_str(
            r#"{"gemini": {"api_key": "abc", "timeout_secs": 0}, "gmail": {"timeout_secs": 0}}"#,
        )
        .unwrap();
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_partial_json() {
        let config: Config = serde_json::from_str(
            r#"{"excerpt_chars": 500, "gemini": {"api_key": "abc"}}"#,
        )
        .unwrap();
        assert_eq!(config.excerpt_chars, 500);
        assert_eq!(config.max_items, 20);
        assert_eq!(config.gemini.model, "gemini-2.5-flash");
        config.validate().unwrap();
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let mut config = Config::default();
        config.gemini.api_key = Some("very-secret".into());
        assert!(!format!("{config:?}").contains("very-secret"));
    }

    #[test]
    fn test_build_gemini_client() {
        let mut config = Config::default();
        config.gemini.api_key = Some("abc".into());
        config.gemini.model = "gemini-2.5-pro".into();
        let client = config.gemini.build_client().unwrap();
        assert_eq!(client.model(), "gemini-2.5-pro");
    }

    #[test]
    fn test_from_file() {
        let dir = std::env::temp_dir().join(format!("inboxsort-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.json");
        std::fs::write(&path, r#"{"max_items": 7, "excerpt_source": "plain-text"}"#).unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.max_items, 7);
        assert_eq!(config.excerpt_source, ExcerptSource::PlainText);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
