use thiserror::Error;

#[derive(Debug, Error)]
pub enum SummarizerError {
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("Failed to send HTTP request: {0}")]
    HttpError(String),

    #[error("Failed to access OpenAI API: {0}")]
    OpenAIError(String),

    #[error("Invalid JSON response from API")]
    InvalidJson,

    #[error("Failed to render page: {0}")]
    TemplateError(String),
}

impl From<reqwest::Error> for SummarizerError {
    fn from(error: reqwest::Error) -> Self {
        SummarizerError::HttpError(error.to_string())
    }
}

impl From<askama::Error> for SummarizerError {
    fn from(error: askama::Error) -> Self {
        SummarizerError::TemplateError(error.to_string())
    }
}
