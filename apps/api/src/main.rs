mod assist;
mod config;
mod errors;
mod llm_client;
mod matching;
mod models;
mod routes;
mod state;
mod store;
mod workflow;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::assist::{ContentAssist, LlmContentAssist};
use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::matching::JobMatchAnalyzer;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::DocumentStore;
use crate::workflow::EditingWorkflow;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (panics on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting ResumeCraft API v{}", env!("CARGO_PKG_VERSION"));

    // Open the document store (falls back to the default document on a
    // missing or corrupt persisted value — never fatal)
    let store = Arc::new(DocumentStore::open(config.data_dir.clone())?);

    // Initialize LLM client and the content assist facade over it
    let llm = LlmClient::new(config.anthropic_api_key.clone());
    let assist: Arc<dyn ContentAssist> = Arc::new(LlmContentAssist::new(llm));
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let workflow = Arc::new(EditingWorkflow::new(store.clone(), assist.clone()));
    let analyzer = Arc::new(JobMatchAnalyzer::new(assist));

    // Build app state
    let state = AppState {
        store,
        workflow,
        analyzer,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // browser client runs on another origin

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
