/// Email Chain Summarizer - a small web app that summarizes pasted email threads with ChatGPT.
///
/// A single page accepts an email chain, forwards it to an OpenAI-compatible
/// chat-completion endpoint and renders the model's structured answer:
/// a summary, the people involved, action items and a reply template.
///
/// # Architecture
///
/// The system uses:
/// - axum for the HTTP surface and askama for the page template
/// - reqwest for the chat-completion call, with openai-api-rs message types
/// - Tokio for async runtime
///
/// No state is kept between requests.
///
/// # Example
///
/// ```no_run
/// use email_summarizer::core::config::AppConfig;
///
/// #[tokio::main]
/// async fn main() -> anyhow::Result<()> {
///     email_summarizer::setup_logging();
///
///     let config = AppConfig::from_env().map_err(anyhow::Error::msg)?;
///     email_summarizer::api::serve(&config).await
/// }
/// ```
// Module declarations
pub mod api;
pub mod clients;
pub mod core;
pub mod errors;
pub mod features;
pub mod prompt;
pub mod reply;
pub mod views;

/// Configure structured logging with JSON format.
///
/// The filter is taken from `RUST_LOG` and defaults to `info`. Calling this
/// more than once is harmless; later calls leave the first subscriber in place.
///
/// # Example
///
/// ```
/// email_summarizer::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
