//! Axum route handlers for the resume document API.
//!
//! Every mutation goes through `DocumentStore::mutate`, so each request that
//! changes anything produces a fully built replacement document and a
//! synchronous persistence write.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::errors::AppError;
use crate::models::resume::{Education, PersonalInfo, Project, ResumeDocument, Skill, WorkExperience};
use crate::state::AppState;
use crate::store::LoadOutcome;

#[derive(Debug, Serialize)]
pub struct ResumeEnvelope {
    pub document: ResumeDocument,
    /// How this session's starting document was obtained. Lets a client
    /// distinguish a fresh session from recovery after corruption.
    pub load_outcome: LoadOutcome,
}

/// GET /api/v1/resume
pub async fn handle_get_resume(State(state): State<AppState>) -> Json<ResumeEnvelope> {
    Json(ResumeEnvelope {
        document: (*state.store.current()).clone(),
        load_outcome: state.store.load_outcome(),
    })
}

/// PUT /api/v1/resume
///
/// Wholesale replacement — the only mutation shape the document supports at
/// the top level.
pub async fn handle_put_resume(
    State(state): State<AppState>,
    Json(document): Json<ResumeDocument>,
) -> Result<Json<ResumeDocument>, AppError> {
    let doc = state.store.replace(document)?;
    Ok(Json((*doc).clone()))
}

/// Partial update of `personalInfo`. Absent fields are left alone; for the
/// optional fields an explicit `null` clears the value.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfoPatch {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub summary: Option<String>,
    #[serde(deserialize_with = "present", default)]
    pub website: Option<Option<String>>,
    #[serde(deserialize_with = "present", default)]
    pub linkedin: Option<Option<String>>,
    #[serde(deserialize_with = "present", default)]
    pub profile_picture: Option<Option<String>>,
}

/// Distinguishes "field present (possibly null)" from "field absent".
/// A bare `Option<Option<T>>` collapses `null` into the outer `None`.
fn present<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

impl PersonalInfoPatch {
    pub fn apply(self, info: &mut PersonalInfo) {
        if let Some(v) = self.full_name {
            info.full_name = v;
        }
        if let Some(v) = self.email {
            info.email = v;
        }
        if let Some(v) = self.phone {
            info.phone = v;
        }
        if let Some(v) = self.location {
            info.location = v;
        }
        if let Some(v) = self.summary {
            info.summary = v;
        }
        if let Some(v) = self.website {
            info.website = v;
        }
        if let Some(v) = self.linkedin {
            info.linkedin = v;
        }
        if let Some(v) = self.profile_picture {
            info.profile_picture = v;
        }
    }
}

/// PATCH /api/v1/resume/personal
pub async fn handle_patch_personal(
    State(state): State<AppState>,
    Json(patch): Json<PersonalInfoPatch>,
) -> Result<Json<PersonalInfo>, AppError> {
    let doc = state.store.mutate(|doc| patch.apply(&mut doc.personal_info))?;
    Ok(Json(doc.personal_info.clone()))
}

macro_rules! entry_handlers {
    ($add:ident, $put:ident, $del:ident, $push:ident, $update:ident, $remove:ident, $ty:ty, $label:literal) => {
        pub async fn $add(
            State(state): State<AppState>,
            Json(entry): Json<$ty>,
        ) -> Result<Json<Value>, AppError> {
            let mut id = String::new();
            state.store.mutate(|doc| id = doc.$push(entry))?;
            Ok(Json(json!({ "id": id })))
        }

        pub async fn $put(
            State(state): State<AppState>,
            Path(id): Path<String>,
            Json(entry): Json<$ty>,
        ) -> Result<Json<Value>, AppError> {
            let mut found = false;
            state.store.mutate(|doc| found = doc.$update(&id, entry))?;
            if !found {
                return Err(AppError::NotFound(format!(
                    "{} entry {id} not found",
                    $label
                )));
            }
            Ok(Json(json!({ "id": id })))
        }

        pub async fn $del(
            State(state): State<AppState>,
            Path(id): Path<String>,
        ) -> Result<Json<Value>, AppError> {
            let mut removed = false;
            state.store.mutate(|doc| removed = doc.$remove(&id))?;
            if !removed {
                return Err(AppError::NotFound(format!(
                    "{} entry {id} not found",
                    $label
                )));
            }
            Ok(Json(json!({ "removed": id })))
        }
    };
}

entry_handlers!(
    handle_add_experience,
    handle_update_experience,
    handle_remove_experience,
    push_experience,
    update_experience,
    remove_experience,
    WorkExperience,
    "experience"
);
entry_handlers!(
    handle_add_education,
    handle_update_education,
    handle_remove_education,
    push_education,
    update_education,
    remove_education,
    Education,
    "education"
);
entry_handlers!(
    handle_add_project,
    handle_update_project,
    handle_remove_project,
    push_project,
    update_project,
    remove_project,
    Project,
    "project"
);
entry_handlers!(
    handle_add_skill,
    handle_update_skill,
    handle_remove_skill,
    push_skill,
    update_skill,
    remove_skill,
    Skill,
    "skill"
);
