//! Types for `POST /{version}/{model}:generateContent`

use serde::{Deserialize, Serialize};

use super::content::{Content, Part};
use super::tools::Tool;

/// Request body for `generateContent`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateContentRequest {
    /// Full conversation history, oldest first
    pub contents: Vec<Content>,
    /// Tools offered to the model
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<Tool>,
}

impl GenerateContentRequest {
    /// A request whose conversation is a single user text turn
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            contents: vec![Content::user_text(query)],
            tools: Vec::new(),
        }
    }

    /// Sets the tools offered to the model
    #[must_use]
    pub fn with_tools(mut self, tools: Vec<Tool>) -> Self {
        self.tools = tools;
        self
    }
}

/// Response from `generateContent`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    /// Proposed continuations; only the first is used
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

/// One proposed continuation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// Generated content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,
    /// Why generation stopped
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<FinishReason>,
}

impl Candidate {
    /// Whether the candidate carries any content parts
    #[must_use]
    pub fn has_parts(&self) -> bool {
        self.content.as_ref().is_some_and(|c| !c.parts.is_empty())
    }

    /// Consumes the candidate, returning its parts
    #[must_use]
    pub fn into_parts(self) -> Vec<Part> {
        self.content.map(|c| c.parts).unwrap_or_default()
    }
}

/// Reason the model stopped generating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FinishReason {
    /// Unspecified
    FinishReasonUnspecified,
    /// Natural stop point
    Stop,
    /// Token limit reached
    MaxTokens,
    /// Blocked by safety filters
    Safety,
    /// Blocked for reproducing training data
    Recitation,
    /// Unsupported language
    Language,
    /// Blocked for another reason
    Other,
    /// Blocked by a term blocklist
    Blocklist,
    /// Blocked as prohibited content
    ProhibitedContent,
    /// Blocked for sensitive personal information
    Spii,
    /// The model produced an invalid function call
    MalformedFunctionCall,
    /// A reason this client does not know about
    #[serde(other)]
    Unknown,
}

impl FinishReason {
    /// Terminations that mean the model produced no usable answer
    #[must_use]
    pub const fn is_non_answer(self) -> bool {
        matches!(self, Self::Other | Self::Recitation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn response_parses_finish_reason_without_content() {
        let resp: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{ "finishReason": "RECITATION", "index": 0 }]
        }))
        .unwrap();

        let c = &resp.candidates[0];
        assert!(!c.has_parts());
        assert_eq!(c.finish_reason, Some(FinishReason::Recitation));
        assert!(FinishReason::Recitation.is_non_answer());
        assert!(FinishReason::Other.is_non_answer());
        assert!(!FinishReason::Stop.is_non_answer());
    }

    #[test]
    fn unknown_finish_reason_is_tolerated() {
        let c: Candidate = serde_json::from_value(json!({ "finishReason": "IMAGE_SAFETY" })).unwrap();
        assert_eq!(c.finish_reason, Some(FinishReason::Unknown));
    }

    #[test]
    fn missing_candidates_defaults_to_empty() {
        let resp: GenerateContentResponse =
            serde_json::from_value(json!({ "promptFeedback": { "blockReason": "SAFETY" } })).unwrap();
        assert!(resp.candidates.is_empty());
    }
}
