//! Shared stubs for integration tests.
#![allow(dead_code)]

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use email_summarizer::clients::ChatCompletion;
use email_summarizer::errors::SummarizerError;
use openai_api_rs::v1::chat_completion::{ChatCompletionMessage, Content};

/// Chat-completion stand-in that replays a fixed reply and records prompts.
pub struct StubClient {
    reply: Result<String, String>,
    calls: AtomicUsize,
    prompts: Mutex<Vec<Vec<String>>>,
}

impl StubClient {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Ok(reply.to_string()),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Text of every message of the most recent prompt.
    pub fn last_prompt(&self) -> Vec<String> {
        self.prompts.lock().unwrap().last().cloned().unwrap_or_default()
    }
}

#[async_trait]
impl ChatCompletion for StubClient {
    async fn complete(&self, prompt: Vec<ChatCompletionMessage>) -> Result<String, SummarizerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let texts = prompt
            .iter()
            .filter_map(|msg| match &msg.content {
                Content::Text(text) => Some(text.clone()),
                _ => None,
            })
            .collect();
        self.prompts.lock().unwrap().push(texts);

        self.reply
            .clone()
            .map_err(SummarizerError::HttpError)
    }
}

pub const FULL_REPLY: &str = r#"Here is the summary you asked for:
{
  "summary": "Budget review moved to Friday.",
  "people": ["Alice", "Bob"],
  "actions": "- Alice books the room\n- Bob sends the deck",
  "response": "Hi _____, Friday works for me."
}
Let me know if you need anything else."#;
