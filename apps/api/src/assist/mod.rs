//! Content assist — stateless façade over the hosted model.
//!
//! Four text operations (summary generation, experience-bullet optimization,
//! refine-from-edits, skill suggestion) plus the structured job-match
//! analysis. Each operation is one independent request/response exchange;
//! there is no session state and no automatic retry.
//!
//! The trait is object-safe and carried in `AppState` as
//! `Arc<dyn ContentAssist>`, so the workflow and analyzer can be tested
//! against a scripted double.

pub mod prompts;

use async_trait::async_trait;
use tracing::debug;

use crate::assist::prompts::*;
use crate::errors::AppError;
use crate::llm_client::prompts::{BARE_TEXT_SYSTEM, JSON_ONLY_SYSTEM};
use crate::llm_client::{LlmClient, LlmError};
use crate::matching::AtsAnalysisResult;

/// Maximum number of skill names a suggestion call may return.
pub const MAX_SUGGESTED_SKILLS: usize = 10;

/// Structured facts a summary is generated from. The summary always starts
/// from these, never from previous summary text — that is what distinguishes
/// it from [`ContentAssist::refine_content`].
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryFacts {
    pub full_name: String,
    pub roles: Vec<String>,
    pub skills: Vec<String>,
    pub target_job_title: Option<String>,
    pub industry_keywords: Option<String>,
}

/// Structured facts one experience entry's bullets are optimized from.
#[derive(Debug, Clone, PartialEq)]
pub struct ExperienceFacts {
    pub role: String,
    pub company: String,
    pub description: String,
    pub target_job_title: Option<String>,
    pub industry_keywords: Option<String>,
}

#[async_trait]
pub trait ContentAssist: Send + Sync {
    /// 2-3 sentence professional summary, bare text, inserted verbatim.
    async fn generate_summary(&self, facts: &SummaryFacts) -> Result<String, AppError>;

    /// 3-4 action-verb bullet lines replacing the entry description verbatim.
    async fn optimize_experience(&self, facts: &ExperienceFacts) -> Result<String, AppError>;

    /// Polishes whatever the caller currently has — the learn-from-edits loop.
    async fn refine_content(&self, current_text: &str, instruction: &str)
        -> Result<String, AppError>;

    /// Up to [`MAX_SUGGESTED_SKILLS`] skill names. The caller enforces the
    /// non-empty-input precondition and dedups against existing skills.
    async fn suggest_skills(
        &self,
        target_job_title: &str,
        industry_keywords: &str,
    ) -> Result<Vec<String>, AppError>;

    /// Schema-constrained ATS analysis. Inputs are already truncated by the
    /// analyzer; a malformed response is a schema violation, never partially
    /// recovered.
    async fn analyze_job_match(
        &self,
        resume_text: &str,
        job_description: &str,
    ) -> Result<AtsAnalysisResult, AppError>;
}

/// The production implementation over the single [`LlmClient`].
pub struct LlmContentAssist {
    llm: LlmClient,
}

impl LlmContentAssist {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

fn generation_error(operation: &str, e: LlmError) -> AppError {
    AppError::Generation(format!("{operation}: {e}"))
}

#[async_trait]
impl ContentAssist for LlmContentAssist {
    async fn generate_summary(&self, facts: &SummaryFacts) -> Result<String, AppError> {
        let prompt = build_summary_prompt(facts);
        debug!("generate_summary for '{}'", facts.full_name);
        self.llm
            .call_text(&prompt, SUMMARY_SYSTEM)
            .await
            .map_err(|e| generation_error("summary generation", e))
    }

    async fn optimize_experience(&self, facts: &ExperienceFacts) -> Result<String, AppError> {
        let prompt = build_optimize_prompt(facts);
        debug!("optimize_experience for '{}' at '{}'", facts.role, facts.company);
        self.llm
            .call_text(&prompt, OPTIMIZE_SYSTEM)
            .await
            .map_err(|e| generation_error("experience optimization", e))
    }

    async fn refine_content(
        &self,
        current_text: &str,
        instruction: &str,
    ) -> Result<String, AppError> {
        let instruction = if instruction.trim().is_empty() {
            DEFAULT_REFINE_INSTRUCTION
        } else {
            instruction
        };
        let prompt = REFINE_PROMPT_TEMPLATE
            .replace("{instruction}", instruction)
            .replace("{current_text}", current_text);
        self.llm
            .call_text(&prompt, BARE_TEXT_SYSTEM)
            .await
            .map_err(|e| generation_error("content refinement", e))
    }

    async fn suggest_skills(
        &self,
        target_job_title: &str,
        industry_keywords: &str,
    ) -> Result<Vec<String>, AppError> {
        let prompt = build_skills_prompt(target_job_title, industry_keywords);
        let mut skills: Vec<String> = self
            .llm
            .call_json(&prompt, JSON_ONLY_SYSTEM)
            .await
            .map_err(|e| generation_error("skill suggestion", e))?;
        skills.truncate(MAX_SUGGESTED_SKILLS);
        Ok(skills)
    }

    async fn analyze_job_match(
        &self,
        resume_text: &str,
        job_description: &str,
    ) -> Result<AtsAnalysisResult, AppError> {
        let prompt = ATS_PROMPT_TEMPLATE
            .replace("{job_description}", job_description)
            .replace("{resume_text}", resume_text);
        self.llm
            .call_json::<AtsAnalysisResult>(&prompt, ATS_SYSTEM)
            .await
            .map_err(|e| match e {
                // The response arrived but did not fit the schema
                LlmError::Parse(e) => AppError::Schema(format!("ATS analysis response: {e}")),
                other => generation_error("ATS analysis", other),
            })
    }
}

fn build_summary_prompt(facts: &SummaryFacts) -> String {
    let job_context = match facts.target_job_title.as_deref().map(str::trim) {
        Some(title) if !title.is_empty() => format!("Targeting the role of: {title}"),
        _ => String::new(),
    };
    let keyword_context = match facts.industry_keywords.as_deref().map(str::trim) {
        Some(kw) if !kw.is_empty() => {
            format!("Integrate these specific technical keywords/jargon naturally: {kw}")
        }
        _ => "Use industry-standard terminology.".to_string(),
    };
    SUMMARY_PROMPT_TEMPLATE
        .replace("{job_context}", &job_context)
        .replace("{keyword_context}", &keyword_context)
        .replace("{full_name}", &facts.full_name)
        .replace("{roles}", &facts.roles.join(", "))
        .replace("{skills}", &facts.skills.join(", "))
}

fn build_optimize_prompt(facts: &ExperienceFacts) -> String {
    let job_context = match facts.target_job_title.as_deref().map(str::trim) {
        Some(title) if !title.is_empty() => format!("Target Role: {title}."),
        _ => String::new(),
    };
    let keyword_context = match facts.industry_keywords.as_deref().map(str::trim) {
        Some(kw) if !kw.is_empty() => {
            format!("MUST include these specific technical keywords/jargon: {kw}.")
        }
        _ => "Include high-value industry-specific jargon and technical terminology.".to_string(),
    };
    OPTIMIZE_PROMPT_TEMPLATE
        .replace("{job_context}", &job_context)
        .replace("{keyword_context}", &keyword_context)
        .replace("{role}", &facts.role)
        .replace("{company}", &facts.company)
        .replace("{description}", &facts.description)
}

fn build_skills_prompt(target_job_title: &str, industry_keywords: &str) -> String {
    let keyword_context = if industry_keywords.trim().is_empty() {
        String::new()
    } else {
        format!("Focus areas/Keywords: \"{}\"", industry_keywords.trim())
    };
    SKILLS_PROMPT_TEMPLATE
        .replace("{job_input}", target_job_title.trim())
        .replace("{keyword_context}", &keyword_context)
}


#[cfg(test)]
mod tests {
    use super::*;

    fn facts() -> SummaryFacts {
        SummaryFacts {
            full_name: "Alex Rivera".to_string(),
            roles: vec!["Senior Frontend Developer".to_string(), "Web Developer".to_string()],
            skills: vec!["React".to_string(), "TypeScript".to_string()],
            target_job_title: Some("Staff Engineer".to_string()),
            industry_keywords: None,
        }
    }

    #[test]
    fn test_summary_prompt_includes_facts_and_target() {
        let prompt = build_summary_prompt(&facts());
        assert!(prompt.contains("Name: Alex Rivera"));
        assert!(prompt.contains("Senior Frontend Developer, Web Developer"));
        assert!(prompt.contains("React, TypeScript"));
        assert!(prompt.contains("Targeting the role of: Staff Engineer"));
        assert!(prompt.contains("Use industry-standard terminology."));
        assert!(!prompt.contains("{job_context}"));
    }

    #[test]
    fn test_summary_prompt_without_optional_inputs() {
        let mut f = facts();
        f.target_job_title = None;
        f.industry_keywords = Some("  ".to_string());
        let prompt = build_summary_prompt(&f);
        assert!(!prompt.contains("Targeting the role of"));
        assert!(prompt.contains("Use industry-standard terminology."));
    }

    #[test]
    fn test_optimize_prompt_carries_original_description() {
        let f = ExperienceFacts {
            role: "Web Developer".to_string(),
            company: "WebCorp".to_string(),
            description: "• Built sites".to_string(),
            target_job_title: None,
            industry_keywords: Some("Kubernetes, Kafka".to_string()),
        };
        let prompt = build_optimize_prompt(&f);
        assert!(prompt.contains("Role: Web Developer at WebCorp"));
        assert!(prompt.contains("• Built sites"));
        assert!(prompt.contains("MUST include these specific technical keywords/jargon: Kubernetes, Kafka."));
    }

    #[test]
    fn test_skills_prompt_omits_empty_keyword_line() {
        let prompt = build_skills_prompt("Backend Engineer", "");
        assert!(prompt.contains("Job Context: \"Backend Engineer\""));
        assert!(!prompt.contains("Focus areas/Keywords"));
    }
}
