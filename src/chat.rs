//! OpenAI chat completions client
//!
//! Thin reqwest wrapper around /v1/chat/completions with both a
//! buffered and a streaming (SSE) call path. Model and sampling knobs
//! match what the assistant was tuned on: gpt-4o-mini, temperature
//! 0.4, max 1000 tokens.

use futures::StreamExt;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const MODEL: &str = "gpt-4o-mini";
const TEMPERATURE: f64 = 0.4;
const MAX_TOKENS: u32 = 1000;

/// One message in the conversation sent to the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: "system".to_string(), content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: "user".to_string(), content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: "assistant".to_string(), content: content.into() }
    }
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f64,
    max_tokens: u32,
    stream: bool,
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct StreamChunk {
    choices: Vec<StreamChoice>,
}

#[derive(Deserialize)]
struct StreamChoice {
    delta: Delta,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct Delta {
    content: Option<String>,
}

pub struct ChatClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl ChatClient {
    /// Build a client from OPENAI_API_KEY. OPENAI_BASE_URL overrides
    /// the endpoint for proxies and tests.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| Error::MissingApiKey)?;
        if api_key.trim().is_empty() {
            return Err(Error::MissingApiKey);
        }
        let base_url = std::env::var("OPENAI_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Ok(Self::new(api_key, base_url))
    }

    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: base_url.into(),
        }
    }

    /// Buffered completion: one request, full reply back.
    pub async fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
        let response = self.post(messages, false).await?;
        let body: CompletionResponse = response
            .json()
            .await
            .map_err(|e| Error::ChatApi { message: e.to_string() })?;
        body.choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| Error::ChatApi {
                message: "response contained no choices".to_string(),
            })
    }

    /// Streaming completion. Each content delta is handed to `on_token`
    /// as it arrives; the assembled reply is returned at the end.
    pub async fn complete_stream<F>(
        &self,
        messages: &[ChatMessage],
        mut on_token: F,
    ) -> Result<String>
    where
        F: FnMut(&str),
    {
        let response = self.post(messages, true).await?;
        let mut stream = response.bytes_stream();
        let mut buffer = String::new();
        let mut reply = String::new();

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| Error::ChatApi { message: e.to_string() })?;
            buffer.push_str(&String::from_utf8_lossy(&chunk));

            // SSE events are newline-delimited "data: {...}" lines
            while let Some(pos) = buffer.find('\n') {
                let line = buffer[..pos].trim().to_string();
                buffer.drain(..=pos);
                let Some(payload) = line.strip_prefix("data: ") else {
                    continue;
                };
                if payload == "[DONE]" {
                    return Ok(reply);
                }
                match serde_json::from_str::<StreamChunk>(payload) {
                    Ok(chunk) => {
                        if let Some(token) =
                            chunk.choices.first().and_then(|c| c.delta.content.as_deref())
                        {
                            reply.push_str(token);
                            on_token(token);
                        }
                    }
                    Err(e) => warn!(error = %e, "skipping malformed stream chunk"),
                }
            }
        }
        Ok(reply)
    }

    async fn post(&self, messages: &[ChatMessage], stream: bool) -> Result<reqwest::Response> {
        let request = CompletionRequest {
            model: MODEL,
            messages,
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
            stream,
        };
        debug!(model = MODEL, count = messages.len(), stream, "sending chat request");
        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::ChatApi { message: e.to_string() })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::ChatApi {
                message: format!("HTTP {status}: {body}"),
            });
        }
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serialization_shape() {
        let messages = vec![
            ChatMessage::system("be helpful"),
            ChatMessage::user("plan my workout"),
        ];
        let request = CompletionRequest {
            model: MODEL,
            messages: &messages,
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
            stream: false,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "gpt-4o-mini");
        assert_eq!(json["temperature"], 0.4);
        assert_eq!(json["max_tokens"], 1000);
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "plan my workout");
    }

    #[test]
    fn test_stream_chunk_parsing() {
        let payload = r#"{"choices":[{"delta":{"content":"Bench"}}]}"#;
        let chunk: StreamChunk = serde_json::from_str(payload).unwrap();
        assert_eq!(chunk.choices[0].delta.content.as_deref(), Some("Bench"));

        // role-only first chunk has no content
        let payload = r#"{"choices":[{"delta":{"role":"assistant"}}]}"#;
        let chunk: StreamChunk = serde_json::from_str(payload).unwrap();
        assert!(chunk.choices[0].delta.content.is_none());
    }

    #[test]
    fn test_response_parsing() {
        let payload = r#"{
            "choices": [
                {"message": {"role": "assistant", "content": "1. Squat: 3 sets of 8 reps"}}
            ]
        }"#;
        let body: CompletionResponse = serde_json::from_str(payload).unwrap();
        assert_eq!(body.choices[0].message.content, "1. Squat: 3 sets of 8 reps");
    }

    #[test]
    fn test_from_env_requires_key() {
        // empty key is as bad as a missing one
        unsafe { std::env::set_var("OPENAI_API_KEY", "") };
        assert!(matches!(ChatClient::from_env(), Err(Error::MissingApiKey)));
        unsafe { std::env::remove_var("OPENAI_API_KEY") };
    }
}
