//! LLM (OpenAI) API client module
//!
//! Encapsulates the chat-completion call used to summarize email chains.

use async_trait::async_trait;
use openai_api_rs::v1::chat_completion::{ChatCompletionMessage, Content, MessageRole};
use reqwest::Client;
use serde_json::{Value, json};
use tracing::info;
use url::Url;

use crate::core::config::AppConfig;
use crate::core::models::ModelQuery;
use crate::errors::SummarizerError;

/// Anything that can answer a chat prompt with a single text completion.
#[async_trait]
pub trait ChatCompletion: Send + Sync {
    async fn complete(&self, prompt: Vec<ChatCompletionMessage>) -> Result<String, SummarizerError>;
}

/// Convert a query into the ordered system + user messages.
pub fn build_prompt(query: &ModelQuery) -> Vec<ChatCompletionMessage> {
    vec![
        ChatCompletionMessage {
            role: MessageRole::system,
            content: Content::Text(query.system_instruction.clone()),
            name: None,
            tool_calls: None,
            tool_call_id: None,
        },
        ChatCompletionMessage {
            role: MessageRole::user,
            content: Content::Text(query.user_prompt.clone()),
            name: None,
            tool_calls: None,
            tool_call_id: None,
        },
    ]
}

fn role_name(role: &MessageRole) -> &'static str {
    match role {
        MessageRole::system => "system",
        MessageRole::user => "user",
        MessageRole::assistant => "assistant",
        MessageRole::function => "function",
        MessageRole::tool => "tool",
    }
}

/// Serialize prompt messages into the `messages` array of a chat-completion request.
pub fn messages_json(prompt: &[ChatCompletionMessage]) -> Vec<Value> {
    prompt
        .iter()
        .filter_map(|msg| match &msg.content {
            Content::Text(text) => Some(json!({
                "role": role_name(&msg.role),
                "content": text
            })),
            // Only text messages are ever built for this service
            _ => None,
        })
        .collect()
}

/// Pull `choices[0].message.content` out of a chat-completion response.
pub fn extract_content(response_json: &Value) -> Option<String> {
    response_json
        .get("choices")
        .and_then(|c| c.as_array())
        .and_then(|choices| choices.first())
        .and_then(|choice| choice.get("message"))
        .and_then(|message| message.get("content"))
        .and_then(|content| content.as_str())
        .map(ToString::to_string)
}

/// Best-effort error text from a failed API response body.
pub fn api_error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .map(ToString::to_string)
        })
        .unwrap_or_else(|| body.trim().to_string())
}

/// LLM API client for generating summaries
pub struct LlmClient {
    http: Client,
    api_key: String,
    org_id: Option<String>,
    model_name: String,
    endpoint: Url,
}

impl LlmClient {
    pub fn new(
        api_key: String,
        org_id: Option<String>,
        model_name: String,
        base_url: &Url,
        http: Client,
    ) -> Result<Self, SummarizerError> {
        Ok(Self {
            http,
            api_key,
            org_id,
            model_name,
            endpoint: completions_endpoint(base_url)?,
        })
    }

    /// Build a client from configuration; `None` when no credential is set.
    pub fn from_config(config: &AppConfig) -> Result<Option<Self>, SummarizerError> {
        let Some(api_key) = config.openai_api_key.clone() else {
            return Ok(None);
        };

        let mut builder = Client::builder();
        if let Some(timeout) = config.openai_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        Self::new(
            api_key,
            config.openai_org_id.clone(),
            config.openai_model.clone(),
            &config.openai_base_url,
            http,
        )
        .map(Some)
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

fn completions_endpoint(base_url: &Url) -> Result<Url, SummarizerError> {
    let mut base = base_url.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join("chat/completions")
        .map_err(|e| SummarizerError::ConfigError(format!("OPENAI_BASE_URL: {}", e)))
}

#[async_trait]
impl ChatCompletion for LlmClient {
    async fn complete(&self, prompt: Vec<ChatCompletionMessage>) -> Result<String, SummarizerError> {
        #[cfg(feature = "debug-logs")]
        info!("Using ChatGPT prompt:\n{:?}", prompt);

        #[cfg(not(feature = "debug-logs"))]
        info!(
            model = %self.model_name,
            messages = prompt.len(),
            "Requesting chat completion"
        );

        let request_body = json!({
            "model": self.model_name,
            "messages": messages_json(&prompt),
        });

        let mut request = self
            .http
            .post(self.endpoint.clone())
            .bearer_auth(&self.api_key)
            .json(&request_body);

        if let Some(org) = &self.org_id {
            request = request.header("OpenAI-Organization", org);
        }

        let response = request
            .send()
            .await
            .map_err(|e| SummarizerError::HttpError(format!("OpenAI API request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(SummarizerError::OpenAIError(format!(
                "{}: {}",
                status,
                api_error_message(&error_text)
            )));
        }

        let response_json: Value = response.json().await.map_err(|e| {
            SummarizerError::OpenAIError(format!("Failed to parse OpenAI response: {}", e))
        })?;

        extract_content(&response_json)
            .ok_or_else(|| SummarizerError::OpenAIError("No text in response".to_string()))
    }
}
