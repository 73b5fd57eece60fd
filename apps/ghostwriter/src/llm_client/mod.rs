//! LLM Client: the single point of entry for chat-completion calls in Ghostwriter.
//!
//! Drafting is the only caller. The learning engine never talks to the LLM.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

const OPENAI_CHAT_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
const TEMPERATURE: f32 = 0.4;
const MAX_RETRIES: u32 = 3;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },

    #[error("LLM returned empty content")]
    EmptyContent,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<Choice>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

impl ChatResponse {
    /// Text of the first choice, if any.
    pub fn text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Wraps the chat-completions API with retry logic.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    model: String,
}

impl LlmClient {
    pub fn new(api_key: String, model: String) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()?;
        Ok(Self {
            client,
            api_key,
            model,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Makes a raw call, returning the full response object.
    /// Retries on 429 (rate limit) and 5xx errors with exponential backoff.
    pub async fn call(&self, system: &str, user: &str) -> Result<ChatResponse, LlmError> {
        let request_body = ChatRequest {
            model: &self.model,
            temperature: TEMPERATURE,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
        };

        let mut last_error: Option<LlmError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s
                let delay = Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "LLM call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(OPENAI_CHAT_URL)
                .bearer_auth(&self.api_key)
                .json(&request_body)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(LlmError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("LLM API returned {}: {}", status, body);
                last_error = Some(LlmError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<ApiError>(&body)
                    .map(|e| e.error.message)
                    .unwrap_or(body);
                return Err(LlmError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let body = response.text().await?;
            let chat: ChatResponse = serde_json::from_str(&body)?;

            if let Some(usage) = &chat.usage {
                debug!(
                    "LLM call succeeded: prompt_tokens={}, completion_tokens={}",
                    usage.prompt_tokens, usage.completion_tokens
                );
            }

            return Ok(chat);
        }

        Err(last_error.unwrap_or(LlmError::RateLimited {
            retries: MAX_RETRIES,
        }))
    }

    /// Calls the model and returns its text with any wrapping Markdown fence removed.
    pub async fn complete(&self, system: &str, user: &str) -> Result<String, LlmError> {
        let response = self.call(system, user).await?;
        let text = response.text().ok_or(LlmError::EmptyContent)?;
        let text = strip_markdown_fence(text);
        if text.is_empty() {
            return Err(LlmError::EmptyContent);
        }
        Ok(text.to_string())
    }
}

/// Strips a ```markdown / ```md / ``` fence that wraps the whole reply.
fn strip_markdown_fence(text: &str) -> &str {
    let text = text.trim();
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let rest = rest
        .strip_prefix("markdown")
        .or_else(|| rest.strip_prefix("md"))
        .unwrap_or(rest);
    rest.trim_start()
        .strip_suffix("```")
        .map(str::trim)
        .unwrap_or(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_fence_with_markdown_tag() {
        let input = "```markdown\n# Quick Start\n\n1. Plug it in\n```";
        assert_eq!(strip_markdown_fence(input), "# Quick Start\n\n1. Plug it in");
    }

    #[test]
    fn test_strip_fence_with_md_tag() {
        let input = "```md\n# FAQ\n```";
        assert_eq!(strip_markdown_fence(input), "# FAQ");
    }

    #[test]
    fn test_strip_fence_without_tag() {
        let input = "```\n## Safety\n```";
        assert_eq!(strip_markdown_fence(input), "## Safety");
    }

    #[test]
    fn test_no_fence_is_trimmed_only() {
        assert_eq!(strip_markdown_fence("  # Title\n"), "# Title");
    }

    #[test]
    fn test_unterminated_fence_is_left_alone() {
        let input = "```markdown\n# Title";
        assert_eq!(strip_markdown_fence(input), input);
    }

    #[test]
    fn test_response_text_reads_first_choice() {
        let raw = r##"{"choices":[{"message":{"role":"assistant","content":"# Draft"}}],"usage":{"prompt_tokens":10,"completion_tokens":3}}"##;
        let parsed: ChatResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.text(), Some("# Draft"));
    }

    #[test]
    fn test_response_without_choices_has_no_text() {
        let parsed: ChatResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert_eq!(parsed.text(), None);
    }
}
