//! `InboxSort` - files unread inbox mail into your own Gmail labels.
//!
//! Reads configuration from `$INBOXSORT_CONFIG` (or the default config
//! path) plus environment overrides, runs one classification pass and
//! prints the run report as JSON on stdout.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use inboxsort_core::{Classifier, Config, GmailMailbox};
use inboxsort_gmail::Token;

/// Environment variable holding the Gmail `OAuth2` access token.
const TOKEN_ENV: &str = "GMAIL_ACCESS_TOKEN";

/// Optional RFC 3339 expiry of the access token.
const TOKEN_EXPIRES_ENV: &str = "GMAIL_TOKEN_EXPIRES_AT";

/// Log filter used when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str =
    "inboxsort=info,inboxsort_core=info,inboxsort_gmail=debug,inboxsort_gemini=debug";

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout stays valid JSON.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::load().context("Failed to load configuration")?;
    config.validate()?;

    let token = access_token()?;
    let gmail = config.gmail.build_client(token)?;
    let gemini = config.gemini.build_client()?;
    info!(model = gemini.model(), "Starting InboxSort");

    let mailbox = GmailMailbox::new(gmail, config.excerpt_source);
    let classifier = Classifier::new(Arc::new(gemini), config.run_options());
    let report = classifier.run(&mailbox).await?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn access_token() -> Result<Token> {
    let access_token = std::env::var(TOKEN_ENV)
        .ok()
        .filter(|t| !t.trim().is_empty())
        .with_context(|| format!("{TOKEN_ENV} is not set"))?;

    let mut token = Token::bearer(access_token);
    if let Ok(raw) = std::env::var(TOKEN_EXPIRES_ENV) {
        let expires_at = DateTime::parse_from_rfc3339(raw.trim())
            .with_context(|| format!("{TOKEN_EXPIRES_ENV} is not an RFC 3339 timestamp"))?
            .with_timezone(&Utc);
        token = token.with_expires_at(expires_at);
    }
    Ok(token)
}
