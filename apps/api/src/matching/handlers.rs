//! Axum route handlers for the job match analyzer.

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::errors::AppError;
use crate::matching::{AnalyzerStatus, AtsAnalysisResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub job_description: String,
}

/// POST /api/v1/match/analyze
///
/// Runs one analysis of the current resume against the supplied job
/// description. The previous result (if any) is discarded the moment the run
/// starts.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AtsAnalysisResult>, AppError> {
    let doc = state.store.current();
    let result = state.analyzer.analyze(&doc, &request.job_description).await?;
    Ok(Json(result))
}

/// GET /api/v1/match/status
///
/// Current analyzer state, for UI display between triggers.
pub async fn handle_status(State(state): State<AppState>) -> Json<AnalyzerStatus> {
    Json(state.analyzer.status())
}
