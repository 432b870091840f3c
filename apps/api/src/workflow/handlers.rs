//! Axum route handlers for the AI-assisted editing workflow.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::resume::Skill;
use crate::state::AppState;
use crate::workflow::FieldPath;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GenerateRequest {
    pub target_job_title: Option<String>,
    pub industry_keywords: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RefineRequest {
    /// Optional edit instruction; each field has its own default.
    pub instruction: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TextResponse {
    pub text: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SuggestSkillsRequest {
    pub target_job_title: String,
    pub industry_keywords: String,
}

#[derive(Debug, Serialize)]
pub struct SuggestSkillsResponse {
    /// Entries actually appended; case-insensitive duplicates were dropped.
    pub added: Vec<Skill>,
}

#[derive(Debug, Serialize)]
pub struct InflightResponse {
    pub inflight: Vec<FieldPath>,
}

/// POST /api/v1/assist/summary
pub async fn handle_generate_summary(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<TextResponse>, AppError> {
    let text = state
        .workflow
        .generate_summary(request.target_job_title, request.industry_keywords)
        .await?;
    Ok(Json(TextResponse { text }))
}

/// POST /api/v1/assist/summary/refine
pub async fn handle_refine_summary(
    State(state): State<AppState>,
    Json(request): Json<RefineRequest>,
) -> Result<Json<TextResponse>, AppError> {
    let text = state.workflow.refine_summary(request.instruction).await?;
    Ok(Json(TextResponse { text }))
}

/// POST /api/v1/assist/experience/:id/optimize
pub async fn handle_optimize_experience(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<TextResponse>, AppError> {
    let text = state
        .workflow
        .optimize_experience(&id, request.target_job_title, request.industry_keywords)
        .await?;
    Ok(Json(TextResponse { text }))
}

/// POST /api/v1/assist/experience/:id/refine
pub async fn handle_refine_experience(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<RefineRequest>,
) -> Result<Json<TextResponse>, AppError> {
    let text = state
        .workflow
        .refine_experience(&id, request.instruction)
        .await?;
    Ok(Json(TextResponse { text }))
}

/// POST /api/v1/assist/skills/suggest
pub async fn handle_suggest_skills(
    State(state): State<AppState>,
    Json(request): Json<SuggestSkillsRequest>,
) -> Result<Json<SuggestSkillsResponse>, AppError> {
    let added = state
        .workflow
        .suggest_skills(&request.target_job_title, &request.industry_keywords)
        .await?;
    Ok(Json(SuggestSkillsResponse { added }))
}

/// GET /api/v1/assist/inflight
///
/// Fields currently mid-generation, so a client can disable exactly the
/// affected controls. Advisory only.
pub async fn handle_inflight(State(state): State<AppState>) -> Json<InflightResponse> {
    Json(InflightResponse {
        inflight: state.workflow.inflight_fields(),
    })
}
