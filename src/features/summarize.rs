use tracing::{error, info, warn};

use crate::clients::llm_client::{ChatCompletion, build_prompt};
use crate::core::config::SummaryOptions;
use crate::core::models::SummaryOutcome;
use crate::prompt::build_query;
use crate::reply::interpret_reply;

/// Summarize one pasted email chain.
///
/// Short-circuits to [`SummaryOutcome::NotProcessed`] without calling the
/// model when the input is empty or no client is configured. Every failure
/// after that point is folded into [`SummaryOutcome::Failed`].
pub async fn summarize_email_chain(
    client: Option<&dyn ChatCompletion>,
    options: SummaryOptions,
    email_chain: &str,
) -> SummaryOutcome {
    let client = match client {
        Some(client) if !email_chain.is_empty() => client,
        Some(_) => {
            info!("Empty email chain submitted");
            return SummaryOutcome::NotProcessed;
        }
        None => {
            warn!("OPENAI_API_KEY not set, skipping summarization");
            return SummaryOutcome::NotProcessed;
        }
    };

    info!(
        chars = email_chain.chars().count(),
        language = ?options.language,
        "Summarizing email chain"
    );

    let prompt = build_prompt(&build_query(options.language, email_chain));

    let content = match client.complete(prompt).await {
        Ok(content) => content,
        Err(e) => {
            error!("Chat completion failed: {}", e);
            return SummaryOutcome::failed(e);
        }
    };

    match interpret_reply(&content, options.fallback) {
        Ok(result) => {
            info!(
                has_summary = result.summary.is_some(),
                has_people = result.people.is_some(),
                has_actions = result.actions.is_some(),
                "Summary generated"
            );
            SummaryOutcome::Completed(result)
        }
        Err(e) => {
            error!(reply_chars = content.chars().count(), "Unusable model reply: {}", e);
            SummaryOutcome::failed(e)
        }
    }
}
