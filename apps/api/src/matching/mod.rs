//! Job match analysis — scores the current resume against a pasted job
//! description via the structured assist operation.
//!
//! The analyzer is a one-shot consumer: each run produces a fresh
//! [`AtsAnalysisResult`] that is never persisted and is discarded the moment
//! a new run starts (optimistic clear). Scoring itself is delegated to the
//! model; locally we only flatten, truncate, dispatch, and validate.

pub mod handlers;

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::assist::ContentAssist;
use crate::errors::AppError;
use crate::models::resume::ResumeDocument;

/// Both analyzer inputs are silently truncated to this many characters
/// before dispatch, to bound request cost and latency.
pub const MAX_INPUT_CHARS: usize = 5000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordAnalysis {
    /// Plain lists — the producer does not guarantee deduplication.
    pub matched_terms: Vec<String>,
    pub missing_terms: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImprovementSuggestion {
    /// Resume section label the suggestion applies to.
    pub section: String,
    pub suggestion: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtsAnalysisResult {
    /// Contractually 0-100; anything else is a schema violation.
    pub match_score: i64,
    pub analysis_summary: String,
    pub keyword_analysis: KeywordAnalysis,
    pub improvement_suggestions: Vec<ImprovementSuggestion>,
}

impl AtsAnalysisResult {
    /// Enforces the score bound the remote schema is supposed to guarantee.
    /// No partial recovery: an out-of-range score rejects the whole result.
    pub fn validate(&self) -> Result<(), AppError> {
        if !(0..=100).contains(&self.match_score) {
            return Err(AppError::Schema(format!(
                "match_score {} outside 0-100",
                self.match_score
            )));
        }
        Ok(())
    }
}

/// Flattens the document into the plain-text projection the analyzer sends:
/// name, summary, experience as "<role> at <company>. <description>", joined
/// skill names, education as "<degree> in <field> from <institution>".
pub fn flatten_resume(doc: &ResumeDocument) -> String {
    let experience = doc
        .experience
        .iter()
        .map(|e| format!("{} at {}. {}", e.role, e.company, e.description))
        .collect::<Vec<_>>()
        .join("\n");
    let skills = doc
        .skills
        .iter()
        .map(|s| s.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    let education = doc
        .education
        .iter()
        .map(|e| format!("{} in {} from {}", e.degree, e.field, e.institution))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "{}\n{}\n\nEXPERIENCE:\n{experience}\n\nSKILLS:\n{skills}\n\nEDUCATION:\n{education}",
        doc.personal_info.full_name, doc.personal_info.summary
    )
}

/// Silent, lossy truncation to at most `max` characters.
pub fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

/// UI-facing analyzer state. `Loading` is entered only on an explicit
/// trigger; `Error` has no automatic recovery — only a new trigger leaves it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "result", rename_all = "snake_case")]
pub enum AnalyzerStatus {
    Idle,
    Loading,
    Success(AtsAnalysisResult),
    Error,
}

pub struct JobMatchAnalyzer {
    assist: Arc<dyn ContentAssist>,
    status: Mutex<AnalyzerStatus>,
}

impl JobMatchAnalyzer {
    pub fn new(assist: Arc<dyn ContentAssist>) -> Self {
        Self {
            assist,
            status: Mutex::new(AnalyzerStatus::Idle),
        }
    }

    pub fn status(&self) -> AnalyzerStatus {
        self.status.lock().expect("analyzer status lock poisoned").clone()
    }

    fn set_status(&self, status: AnalyzerStatus) {
        *self.status.lock().expect("analyzer status lock poisoned") = status;
    }

    /// Runs one analysis. An empty job description (after trimming) is
    /// rejected without touching the current state; otherwise any previous
    /// result is discarded immediately on entry to `Loading`, not after the
    /// replacement arrives.
    pub async fn analyze(
        &self,
        doc: &ResumeDocument,
        job_description: &str,
    ) -> Result<AtsAnalysisResult, AppError> {
        if job_description.trim().is_empty() {
            return Err(AppError::Validation(
                "Job description must not be empty".to_string(),
            ));
        }

        self.set_status(AnalyzerStatus::Loading);

        let resume_text = truncate_chars(&flatten_resume(doc), MAX_INPUT_CHARS);
        let job_description = truncate_chars(job_description, MAX_INPUT_CHARS);
        debug!(
            "dispatching ATS analysis (resume {} chars, jd {} chars)",
            resume_text.chars().count(),
            job_description.chars().count()
        );

        let outcome = self
            .assist
            .analyze_job_match(&resume_text, &job_description)
            .await
            .and_then(|result| {
                result.validate()?;
                Ok(result)
            });

        match outcome {
            Ok(result) => {
                self.set_status(AnalyzerStatus::Success(result.clone()));
                Ok(result)
            }
            Err(e) => {
                self.set_status(AnalyzerStatus::Error);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assist::testing::{RecordedCall, ScriptedAssist};
    use crate::models::resume::default_document;

    fn sample_result(score: i64) -> AtsAnalysisResult {
        AtsAnalysisResult {
            match_score: score,
            analysis_summary: "Decent fit.".to_string(),
            keyword_analysis: KeywordAnalysis {
                matched_terms: vec!["React".to_string()],
                missing_terms: vec!["Terraform".to_string()],
            },
            improvement_suggestions: vec![ImprovementSuggestion {
                section: "Experience".to_string(),
                suggestion: "Mention Terraform.".to_string(),
            }],
        }
    }

    #[test]
    fn test_flatten_resume_projection_format() {
        let doc = default_document();
        let flat = flatten_resume(&doc);
        assert!(flat.starts_with("Alex Rivera\n"));
        assert!(flat.contains("Senior Frontend Developer at Tech Solutions Inc.. •"));
        assert!(flat.contains("SKILLS:\nReact, TypeScript, Node.js, Tailwind CSS"));
        assert!(flat.contains("Bachelor of Science in Computer Science from University of Technology"));
    }

    #[test]
    fn test_truncate_chars_is_exact_and_char_safe() {
        let long = "é".repeat(6000);
        let cut = truncate_chars(&long, MAX_INPUT_CHARS);
        assert_eq!(cut.chars().count(), 5000);

        let short = "short";
        assert_eq!(truncate_chars(short, MAX_INPUT_CHARS), "short");
    }

    #[test]
    fn test_validate_score_bounds() {
        assert!(sample_result(0).validate().is_ok());
        assert!(sample_result(100).validate().is_ok());
        assert!(matches!(sample_result(-1).validate(), Err(AppError::Schema(_))));
        assert!(matches!(sample_result(101).validate(), Err(AppError::Schema(_))));
    }

    #[tokio::test]
    async fn test_analyze_success_transition() {
        let assist = Arc::new(ScriptedAssist::new().with_analysis(sample_result(72)));
        let analyzer = JobMatchAnalyzer::new(assist.clone());
        assert_eq!(analyzer.status(), AnalyzerStatus::Idle);

        let result = analyzer
            .analyze(&default_document(), "Rust engineer wanted")
            .await
            .unwrap();
        assert_eq!(result.match_score, 72);
        assert_eq!(analyzer.status(), AnalyzerStatus::Success(result));
    }

    #[tokio::test]
    async fn test_analyze_truncates_both_inputs_to_exactly_5000() {
        let assist = Arc::new(ScriptedAssist::new().with_analysis(sample_result(50)));
        let analyzer = JobMatchAnalyzer::new(assist.clone());

        let mut doc = default_document();
        doc.personal_info.summary = "x".repeat(8000);
        let jd = "y".repeat(7000);

        analyzer.analyze(&doc, &jd).await.unwrap();

        match &assist.calls()[0] {
            RecordedCall::AnalyzeJobMatch {
                resume_text,
                job_description,
            } => {
                assert_eq!(resume_text.chars().count(), 5000);
                assert_eq!(job_description.chars().count(), 5000);
            }
            other => panic!("unexpected call {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_empty_job_description_is_rejected_before_dispatch() {
        let assist = Arc::new(ScriptedAssist::new().with_analysis(sample_result(50)));
        let analyzer = JobMatchAnalyzer::new(assist.clone());

        let err = analyzer.analyze(&default_document(), "   ").await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(analyzer.status(), AnalyzerStatus::Idle);
        assert!(assist.calls().is_empty());
    }

    #[tokio::test]
    async fn test_failure_transitions_to_error_and_discards_previous_result() {
        let ok_assist = Arc::new(ScriptedAssist::new().with_analysis(sample_result(60)));
        let analyzer = JobMatchAnalyzer::new(ok_assist);
        analyzer.analyze(&default_document(), "jd").await.unwrap();
        assert!(matches!(analyzer.status(), AnalyzerStatus::Success(_)));

        // New trigger with a failing backend: the old result must be gone,
        // not retained alongside the error.
        let failing = JobMatchAnalyzer {
            assist: Arc::new(ScriptedAssist::new().failing()),
            status: Mutex::new(analyzer.status()),
        };
        let err = failing.analyze(&default_document(), "jd").await.unwrap_err();
        assert!(matches!(err, AppError::Generation(_)));
        assert_eq!(failing.status(), AnalyzerStatus::Error);
    }

    #[tokio::test]
    async fn test_retrigger_from_error_can_succeed() {
        let analyzer = JobMatchAnalyzer::new(Arc::new(ScriptedAssist::new().failing()));
        analyzer.analyze(&default_document(), "jd").await.unwrap_err();
        assert_eq!(analyzer.status(), AnalyzerStatus::Error);

        let recovered = JobMatchAnalyzer {
            assist: Arc::new(ScriptedAssist::new().with_analysis(sample_result(40))),
            status: Mutex::new(AnalyzerStatus::Error),
        };
        recovered.analyze(&default_document(), "jd").await.unwrap();
        assert!(matches!(recovered.status(), AnalyzerStatus::Success(_)));
    }

    #[tokio::test]
    async fn test_out_of_range_score_is_schema_violation() {
        let assist = Arc::new(ScriptedAssist::new().with_analysis(sample_result(150)));
        let analyzer = JobMatchAnalyzer::new(assist);

        let err = analyzer.analyze(&default_document(), "jd").await.unwrap_err();
        assert!(matches!(err, AppError::Schema(_)));
        assert_eq!(analyzer.status(), AnalyzerStatus::Error);
    }
}
