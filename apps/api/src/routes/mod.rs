pub mod health;

use axum::{
    routing::{get, patch, post, put},
    Router,
};

use crate::matching::handlers as match_handlers;
use crate::state::AppState;
use crate::store::handlers as document_handlers;
use crate::workflow::handlers as assist_handlers;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Resume document
        .route("/api/v1/resume", get(document_handlers::handle_get_resume))
        .route("/api/v1/resume", put(document_handlers::handle_put_resume))
        .route(
            "/api/v1/resume/personal",
            patch(document_handlers::handle_patch_personal),
        )
        .route(
            "/api/v1/resume/experience",
            post(document_handlers::handle_add_experience),
        )
        .route(
            "/api/v1/resume/experience/:id",
            put(document_handlers::handle_update_experience)
                .delete(document_handlers::handle_remove_experience),
        )
        .route(
            "/api/v1/resume/education",
            post(document_handlers::handle_add_education),
        )
        .route(
            "/api/v1/resume/education/:id",
            put(document_handlers::handle_update_education)
                .delete(document_handlers::handle_remove_education),
        )
        .route(
            "/api/v1/resume/projects",
            post(document_handlers::handle_add_project),
        )
        .route(
            "/api/v1/resume/projects/:id",
            put(document_handlers::handle_update_project)
                .delete(document_handlers::handle_remove_project),
        )
        .route(
            "/api/v1/resume/skills",
            post(document_handlers::handle_add_skill),
        )
        .route(
            "/api/v1/resume/skills/:id",
            put(document_handlers::handle_update_skill)
                .delete(document_handlers::handle_remove_skill),
        )
        // Content assist
        .route(
            "/api/v1/assist/summary",
            post(assist_handlers::handle_generate_summary),
        )
        .route(
            "/api/v1/assist/summary/refine",
            post(assist_handlers::handle_refine_summary),
        )
        .route(
            "/api/v1/assist/experience/:id/optimize",
            post(assist_handlers::handle_optimize_experience),
        )
        .route(
            "/api/v1/assist/experience/:id/refine",
            post(assist_handlers::handle_refine_experience),
        )
        .route(
            "/api/v1/assist/skills/suggest",
            post(assist_handlers::handle_suggest_skills),
        )
        .route(
            "/api/v1/assist/inflight",
            get(assist_handlers::handle_inflight),
        )
        // Job match analysis
        .route("/api/v1/match/analyze", post(match_handlers::handle_analyze))
        .route("/api/v1/match/status", get(match_handlers::handle_status))
        .with_state(state)
}
