//! # inboxsort-gemini
//!
//! Plain text in, plain text out client for Google's Gemini
//! `models.generateContent` endpoint.
//!
//! ```ignore
//! use inboxsort_gemini::GeminiClient;
//!
//! let client = GeminiClient::new(std::env::var("GEMINI_API_KEY")?)?
//!     .with_model("gemini-2.5-flash")
//!     .with_thinking_budget(Some(2048));
//! let answer = client.generate_text("Reply with the word OK").await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod client;
mod error;
pub mod types;

pub use client::{DEFAULT_MODEL, DEFAULT_THINKING_BUDGET, DEFAULT_TIMEOUT, GeminiClient};
pub use error::{Error, Result};
