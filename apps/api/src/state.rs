use std::sync::Arc;

use crate::config::Config;
use crate::matching::JobMatchAnalyzer;
use crate::store::DocumentStore;
use crate::workflow::EditingWorkflow;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The single source of truth for the current resume document.
    pub store: Arc<DocumentStore>,
    /// Sequences assist calls and writes results back into the store.
    pub workflow: Arc<EditingWorkflow>,
    /// One-shot ATS analyzer; its result never feeds back into the store.
    pub analyzer: Arc<JobMatchAnalyzer>,
    pub config: Config,
}
