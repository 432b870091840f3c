//! Editing workflow — sequences content-assist calls and writes results back
//! into the document store.
//!
//! The two-step refinement pattern: Generate/Optimize populates a field from
//! structured facts; the user hand-edits it; Refine re-submits the field's
//! *current* text — never a remembered pre-edit copy — for polishing.
//!
//! In-flight tracking is a set of field paths, purely advisory for UI
//! disablement. It never blocks a second trigger: concurrent requests on the
//! same field race and the last response to arrive wins. That matches the
//! original behavior and is kept deliberately; there is no cancellation.

pub mod handlers;

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use serde::Serialize;
use tracing::debug;

use crate::assist::{ContentAssist, ExperienceFacts, SummaryFacts};
use crate::errors::AppError;
use crate::models::resume::{new_entry_id, Skill, SkillLevel};
use crate::store::DocumentStore;

/// Default refine instruction for the summary field.
pub const REFINE_SUMMARY_INSTRUCTION: &str = "Make it more professional and concise";
/// Default refine instruction for experience descriptions.
pub const REFINE_EXPERIENCE_INSTRUCTION: &str = "Improve action verbs and clarity based on user edits";

/// Typed identity of a field a generation can target. Keys the in-flight
/// registry so each field's busy state is tracked independently.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldPath {
    Summary,
    ExperienceDescription(String),
    Skills,
}

pub struct EditingWorkflow {
    store: Arc<DocumentStore>,
    assist: Arc<dyn ContentAssist>,
    inflight: Mutex<HashSet<FieldPath>>,
}

/// Clears the field's in-flight mark on drop, including the error path.
struct InflightGuard<'a> {
    registry: &'a Mutex<HashSet<FieldPath>>,
    field: FieldPath,
}

impl Drop for InflightGuard<'_> {
    fn drop(&mut self) {
        if let Ok(mut set) = self.registry.lock() {
            set.remove(&self.field);
        }
    }
}

impl EditingWorkflow {
    pub fn new(store: Arc<DocumentStore>, assist: Arc<dyn ContentAssist>) -> Self {
        Self {
            store,
            assist,
            inflight: Mutex::new(HashSet::new()),
        }
    }

    fn begin(&self, field: FieldPath) -> InflightGuard<'_> {
        self.inflight
            .lock()
            .expect("inflight registry lock poisoned")
            .insert(field.clone());
        InflightGuard {
            registry: &self.inflight,
            field,
        }
    }

    /// Fields currently mid-generation. Advisory only.
    pub fn inflight_fields(&self) -> Vec<FieldPath> {
        self.inflight
            .lock()
            .expect("inflight registry lock poisoned")
            .iter()
            .cloned()
            .collect()
    }

    /// Generates a fresh summary from the document's structured facts and
    /// writes it into `personalInfo.summary`.
    pub async fn generate_summary(
        &self,
        target_job_title: Option<String>,
        industry_keywords: Option<String>,
    ) -> Result<String, AppError> {
        let _guard = self.begin(FieldPath::Summary);

        let doc = self.store.current();
        let facts = SummaryFacts {
            full_name: doc.personal_info.full_name.clone(),
            roles: doc.experience.iter().map(|e| e.role.clone()).collect(),
            skills: doc.skills.iter().map(|s| s.name.clone()).collect(),
            target_job_title,
            industry_keywords,
        };

        let summary = self.assist.generate_summary(&facts).await?;
        self.store
            .mutate(|d| d.personal_info.summary = summary.clone())?;
        Ok(summary)
    }

    /// Rewrites one experience entry's description as optimized bullets.
    /// The returned text replaces the description verbatim.
    pub async fn optimize_experience(
        &self,
        id: &str,
        target_job_title: Option<String>,
        industry_keywords: Option<String>,
    ) -> Result<String, AppError> {
        let doc = self.store.current();
        let entry = doc
            .experience
            .iter()
            .find(|e| e.id == id)
            .ok_or_else(|| AppError::NotFound(format!("experience entry {id} not found")))?;

        let _guard = self.begin(FieldPath::ExperienceDescription(id.to_string()));
        let facts = ExperienceFacts {
            role: entry.role.clone(),
            company: entry.company.clone(),
            description: entry.description.clone(),
            target_job_title,
            industry_keywords,
        };

        let description = self.assist.optimize_experience(&facts).await?;
        self.write_experience_description(id, &description)?;
        Ok(description)
    }

    /// Learn-from-edits for the summary: refines whatever the summary field
    /// holds right now.
    pub async fn refine_summary(&self, instruction: Option<String>) -> Result<String, AppError> {
        let current = self.store.current().personal_info.summary.clone();
        if current.trim().is_empty() {
            return Err(AppError::Validation(
                "Summary is empty; nothing to refine".to_string(),
            ));
        }

        let _guard = self.begin(FieldPath::Summary);
        let instruction = non_empty(instruction).unwrap_or_else(|| REFINE_SUMMARY_INSTRUCTION.to_string());
        let refined = self.assist.refine_content(&current, &instruction).await?;
        self.store
            .mutate(|d| d.personal_info.summary = refined.clone())?;
        Ok(refined)
    }

    /// Learn-from-edits for one experience description.
    pub async fn refine_experience(
        &self,
        id: &str,
        instruction: Option<String>,
    ) -> Result<String, AppError> {
        let doc = self.store.current();
        let current = doc
            .experience
            .iter()
            .find(|e| e.id == id)
            .map(|e| e.description.clone())
            .ok_or_else(|| AppError::NotFound(format!("experience entry {id} not found")))?;
        if current.trim().is_empty() {
            return Err(AppError::Validation(
                "Description is empty; nothing to refine".to_string(),
            ));
        }

        let _guard = self.begin(FieldPath::ExperienceDescription(id.to_string()));
        let instruction =
            non_empty(instruction).unwrap_or_else(|| REFINE_EXPERIENCE_INSTRUCTION.to_string());
        let refined = self.assist.refine_content(&current, &instruction).await?;
        self.write_experience_description(id, &refined)?;
        Ok(refined)
    }

    /// Suggests skills for the target job and appends the ones not already
    /// present (case-insensitive name match; duplicates are dropped
    /// silently). Returns the entries actually appended.
    pub async fn suggest_skills(
        &self,
        target_job_title: &str,
        industry_keywords: &str,
    ) -> Result<Vec<Skill>, AppError> {
        if target_job_title.trim().is_empty() && industry_keywords.trim().is_empty() {
            // Precondition: never send an unconstrained suggestion request.
            return Err(AppError::Validation(
                "Enter a target job title or industry keywords to suggest skills".to_string(),
            ));
        }

        let _guard = self.begin(FieldPath::Skills);
        let suggestions = self
            .assist
            .suggest_skills(target_job_title.trim(), industry_keywords.trim())
            .await?;
        debug!("skill suggestion returned {} names", suggestions.len());

        let mut added = Vec::new();
        self.store.mutate(|doc| {
            let mut seen: HashSet<String> =
                doc.skills.iter().map(|s| s.name.to_lowercase()).collect();
            for name in suggestions {
                if seen.insert(name.to_lowercase()) {
                    let skill = Skill {
                        id: new_entry_id(),
                        name,
                        level: SkillLevel::Intermediate,
                    };
                    doc.skills.push(skill.clone());
                    added.push(skill);
                }
            }
        })?;
        Ok(added)
    }

    /// Writes a generated description into the addressed entry. If the entry
    /// was removed while the request was in flight the write is dropped — a
    /// stale response never resurrects a deleted entry.
    fn write_experience_description(&self, id: &str, text: &str) -> Result<(), AppError> {
        self.store.mutate(|doc| {
            if let Some(e) = doc.experience.iter_mut().find(|e| e.id == id) {
                e.description = text.to_string();
            }
        })?;
        Ok(())
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assist::testing::{RecordedCall, ScriptedAssist};
    use tempfile::tempdir;

    fn workflow_with(assist: ScriptedAssist) -> (tempfile::TempDir, Arc<ScriptedAssist>, EditingWorkflow) {
        let dir = tempdir().unwrap();
        let store = Arc::new(DocumentStore::open(dir.path()).unwrap());
        let assist = Arc::new(assist);
        let workflow = EditingWorkflow::new(store, assist.clone());
        (dir, assist, workflow)
    }

    #[tokio::test]
    async fn test_generate_summary_builds_facts_and_writes_back() {
        let (_dir, assist, workflow) =
            workflow_with(ScriptedAssist::new().with_text("Seasoned engineer."));

        let summary = workflow.generate_summary(Some("Staff Engineer".to_string()), None).await.unwrap();
        assert_eq!(summary, "Seasoned engineer.");
        assert_eq!(workflow.store.current().personal_info.summary, "Seasoned engineer.");

        match &assist.calls()[0] {
            RecordedCall::GenerateSummary(facts) => {
                assert_eq!(facts.full_name, "Alex Rivera");
                assert_eq!(facts.roles[0], "Senior Frontend Developer");
                assert!(facts.skills.contains(&"React".to_string()));
                assert_eq!(facts.target_job_title.as_deref(), Some("Staff Engineer"));
            }
            other => panic!("unexpected call {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_optimize_replaces_description_verbatim() {
        let bullets = "• Architected the thing\n• Shipped the thing";
        let (_dir, assist, workflow) = workflow_with(ScriptedAssist::new().with_text(bullets));

        let text = workflow.optimize_experience("1", None, None).await.unwrap();
        assert_eq!(text, bullets);
        assert_eq!(workflow.store.current().experience[0].description, bullets);

        match &assist.calls()[0] {
            RecordedCall::OptimizeExperience(facts) => {
                assert_eq!(facts.role, "Senior Frontend Developer");
                assert_eq!(facts.company, "Tech Solutions Inc.");
            }
            other => panic!("unexpected call {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_optimize_unknown_entry_is_not_found_without_dispatch() {
        let (_dir, assist, workflow) = workflow_with(ScriptedAssist::new());
        let err = workflow.optimize_experience("missing", None, None).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert!(assist.calls().is_empty());
    }

    #[tokio::test]
    async fn test_refine_submits_the_hand_edited_text() {
        let (_dir, assist, workflow) = workflow_with(ScriptedAssist::new().with_text("polished"));

        // Generate populated the field with "Built stuff"...
        workflow
            .store
            .mutate(|d| d.experience[0].description = "Built stuff".to_string())
            .unwrap();
        // ...then the user hand-edits it.
        let edited = "Built a payments pipeline handling 10k tx/day";
        workflow
            .store
            .mutate(|d| d.experience[0].description = edited.to_string())
            .unwrap();

        workflow.refine_experience("1", None).await.unwrap();

        match &assist.calls()[0] {
            RecordedCall::RefineContent {
                current_text,
                instruction,
            } => {
                assert_eq!(current_text, edited);
                assert_eq!(instruction, REFINE_EXPERIENCE_INSTRUCTION);
            }
            other => panic!("unexpected call {other:?}"),
        }
        assert_eq!(workflow.store.current().experience[0].description, "polished");
    }

    #[tokio::test]
    async fn test_refine_empty_summary_is_rejected_without_dispatch() {
        let (_dir, assist, workflow) = workflow_with(ScriptedAssist::new());
        workflow
            .store
            .mutate(|d| d.personal_info.summary = String::new())
            .unwrap();

        let err = workflow.refine_summary(None).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(assist.calls().is_empty());
    }

    #[tokio::test]
    async fn test_suggest_skills_precondition_blocks_dispatch() {
        let (_dir, assist, workflow) = workflow_with(ScriptedAssist::new());
        let err = workflow.suggest_skills("  ", "").await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(assist.calls().is_empty());
    }

    #[tokio::test]
    async fn test_suggest_skills_dedups_case_insensitively() {
        let (_dir, _assist, workflow) =
            workflow_with(ScriptedAssist::new().with_skills(&["react", "Go", "node.js"]));

        // Pin the existing skills to exactly the scenario's fixture.
        workflow
            .store
            .mutate(|d| {
                d.skills.clear();
                d.push_skill(Skill {
                    id: String::new(),
                    name: "React".to_string(),
                    level: SkillLevel::Expert,
                });
                d.push_skill(Skill {
                    id: String::new(),
                    name: "Node.js".to_string(),
                    level: SkillLevel::Intermediate,
                });
            })
            .unwrap();

        let added = workflow.suggest_skills("Backend Engineer", "").await.unwrap();
        assert_eq!(added.len(), 1);
        assert_eq!(added[0].name, "Go");
        assert_eq!(added[0].level, SkillLevel::Intermediate);

        let names: Vec<String> = workflow
            .store
            .current()
            .skills
            .iter()
            .map(|s| s.name.clone())
            .collect();
        assert_eq!(names, vec!["React", "Node.js", "Go"]);
    }

    #[tokio::test]
    async fn test_failed_generation_leaves_document_untouched() {
        let (_dir, _assist, workflow) = workflow_with(ScriptedAssist::new().failing());
        let before = workflow.store.current();

        let err = workflow.generate_summary(None, None).await.unwrap_err();
        assert!(matches!(err, AppError::Generation(_)));
        assert_eq!(*workflow.store.current(), *before);
        assert!(workflow.inflight_fields().is_empty());
    }

    #[tokio::test]
    async fn test_inflight_marks_are_per_field_and_cleared_on_drop() {
        let (_dir, _assist, workflow) = workflow_with(ScriptedAssist::new());

        let summary_guard = workflow.begin(FieldPath::Summary);
        let exp_guard = workflow.begin(FieldPath::ExperienceDescription("1".to_string()));

        let fields = workflow.inflight_fields();
        assert_eq!(fields.len(), 2);
        assert!(fields.contains(&FieldPath::Summary));

        drop(summary_guard);
        assert_eq!(
            workflow.inflight_fields(),
            vec![FieldPath::ExperienceDescription("1".to_string())]
        );
        drop(exp_guard);
        assert!(workflow.inflight_fields().is_empty());
    }
}
