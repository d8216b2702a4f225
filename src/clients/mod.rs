//! External API clients

pub mod llm_client;

pub use llm_client::{ChatCompletion, LlmClient};
