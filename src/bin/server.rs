use email_summarizer::core::config::AppConfig;
use tracing::error;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    email_summarizer::setup_logging();

    let config = AppConfig::from_env().map_err(|e| {
        error!("Config error: {}", e);
        anyhow::Error::msg(e)
    })?;

    email_summarizer::api::serve(&config).await
}
