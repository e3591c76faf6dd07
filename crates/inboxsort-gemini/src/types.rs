//! Wire types for `models.generateContent`.

use serde::{Deserialize, Serialize};

/// A piece of content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Part {
    /// Text of the part.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Set on reasoning summaries returned by thinking models.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub thought: bool,
}

/// A turn of content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Content {
    /// Author role (`user` or `model`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Ordered parts.
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// Thinking configuration for 2.5-series models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThinkingConfig {
    /// Token budget the model may spend reasoning before answering.
    pub thinking_budget: i32,
}

/// Generation parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// Thinking configuration; omitted to use the model default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thinking_config: Option<ThinkingConfig>,
}

/// Request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    /// Conversation contents.
    pub contents: Vec<Content>,
    /// Generation parameters.
    pub generation_config: GenerationConfig,
}

impl GenerateContentRequest {
    /// Single user turn holding one text part.
    #[must_use]
    pub fn from_prompt(prompt: impl Into<String>, thinking_budget: Option<i32>) -> Self {
        Self {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(prompt.into()),
                    thought: false,
                }],
            }],
            generation_config: GenerationConfig {
                thinking_config: thinking_budget.map(|thinking_budget| ThinkingConfig {
                    thinking_budget,
                }),
            },
        }
    }
}

/// One generated candidate.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// Generated content; absent when generation stopped early.
    #[serde(default)]
    pub content: Option<Content>,
    /// Why generation stopped (`STOP`, `MAX_TOKENS`, `SAFETY`, ...).
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Feedback about the prompt itself.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    /// Set when the prompt was blocked.
    #[serde(default)]
    pub block_reason: Option<String>,
}

/// Response body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    /// Generated candidates.
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    /// Prompt feedback.
    #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>,
}

impl GenerateContentResponse {
    /// Concatenated answer text of the first candidate, skipping thought parts.
    ///
    /// Empty when there is no candidate or it carries no text.
    #[must_use]
    pub fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter(|p| !p.thought)
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }

    /// The block reason, if the prompt was rejected.
    #[must_use]
    pub fn block_reason(&self) -> Option<&str> {
        self.prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.as_deref())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serialization() {
        let request = GenerateContentRequest::from_prompt("Pick a label", Some(2048));
        let body = serde_json::to_value(&request).unwrap();

        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "Pick a label");
        assert!(body["contents"][0]["parts"][0].get("thought").is_none());
        assert_eq!(
            body["generationConfig"]["thinkingConfig"]["thinkingBudget"],
            2048
        );
    }

    #[test]
    fn test_request_without_thinking_budget() {
        let request = GenerateContentRequest::from_prompt("hi", None);
        let body = serde_json::to_value(&request).unwrap();
        assert!(body["generationConfig"].get("thinkingConfig").is_none());
    }

    #[test]
    fn test_response_text_skips_thoughts() {
        let json = r#"{
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [
                        {"text": "The email mentions an invoice...", "thought": true},
                        {"text": "Fin"},
                        {"text": "ance\n"}
                    ]
                },
                "finishReason": "STOP"
            }],
            "usageMetadata": {"promptTokenCount": 120}
        }"#;
        let response: GenerateContentResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.text(), "Finance\n");
        assert!(response.block_reason().is_none());
    }

    #[test]
    fn test_response_without_candidates() {
        let json = r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#;
        let response: GenerateContentResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.text(), "");
        assert_eq!(response.block_reason(), Some("SAFETY"));
    }

    #[test]
    fn test_candidate_without_content() {
        let json = r#"{"candidates": [{"finishReason": "MAX_TOKENS"}]}"#;
        let response: GenerateContentResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.text(), "");
        assert_eq!(
            response.candidates[0].finish_reason.as_deref(),
            Some("MAX_TOKENS")
        );
    }
}
