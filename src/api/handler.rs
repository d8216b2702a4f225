//! HTTP surface: the summarizer page and a health probe.

use std::sync::Arc;

use axum::{
    Form, Json, Router,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use serde_json::json;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use uuid::Uuid;

use crate::clients::{ChatCompletion, LlmClient};
use crate::core::config::{AppConfig, SummaryOptions};
use crate::core::models::{SubmissionRequest, SummaryOutcome};
use crate::errors::SummarizerError;
use crate::features::summarize::summarize_email_chain;
use crate::views::render_page;

/// Immutable per-process state shared by every request.
#[derive(Clone)]
pub struct AppState {
    pub client: Option<Arc<dyn ChatCompletion>>,
    pub options: SummaryOptions,
}

impl AppState {
    pub fn new(client: Option<Arc<dyn ChatCompletion>>, options: SummaryOptions) -> Self {
        Self { client, options }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, SummarizerError> {
        let client = LlmClient::from_config(config)?
            .map(|client| Arc::new(client) as Arc<dyn ChatCompletion>);
        Ok(Self::new(client, config.summary))
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index).post(summarize))
        .route("/healthz", get(health))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Bind the configured address and serve until Ctrl-C / SIGTERM.
pub async fn serve(config: &AppConfig) -> anyhow::Result<()> {
    let state = AppState::from_config(config)?;
    if state.client.is_none() {
        info!("OPENAI_API_KEY not set; submissions will not be summarized");
    }

    info!(
        addr = %config.bind_addr,
        model = %config.openai_model,
        language = ?config.summary.language,
        fallback = ?config.summary.fallback,
        "Binding HTTP listener"
    );
    let listener = TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("HTTP server exited");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = signal::ctrl_c().await;
    };
    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        if let Ok(mut stream) = signal(SignalKind::terminate()) {
            let _ = stream.recv().await;
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

async fn index() -> Response {
    page_response("", &SummaryOutcome::Idle)
}

#[tracing::instrument(level = "info", skip_all, fields(request_id = %Uuid::new_v4()))]
async fn summarize(State(state): State<AppState>, Form(form): Form<SubmissionRequest>) -> Response {
    let outcome =
        summarize_email_chain(state.client.as_deref(), state.options, &form.email_chain).await;
    info!(outcome = outcome.kind(), "Request handled");
    page_response(&form.email_chain, &outcome)
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok", "service": "email-summarizer" }))
}

fn page_response(email_chain: &str, outcome: &SummaryOutcome) -> Response {
    match render_page(email_chain, outcome) {
        Ok(body) => Html(body).into_response(),
        Err(e) => {
            error!("{}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to render page").into_response()
        }
    }
}
