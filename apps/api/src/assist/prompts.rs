// All LLM prompt constants for the content-assist module.
// Cross-cutting fragments live in llm_client::prompts.

/// System prompt for summary generation — bare text only, the output is
/// inserted into the summary field verbatim.
pub const SUMMARY_SYSTEM: &str = "You are an expert career coach and resume writer. \
    Return ONLY the summary paragraph text. \
    Do NOT include 'Here is a summary', 'Summary:', or any conversational filler. \
    Do NOT use markdown code fences.";

/// Summary prompt template.
/// Replace: {job_context}, {keyword_context}, {full_name}, {roles}, {skills}
pub const SUMMARY_PROMPT_TEMPLATE: &str = r#"Write a concise, high-impact professional resume summary (MAXIMUM 40-50 WORDS) for the following candidate.
{job_context}
{keyword_context}

Candidate Info:
Name: {full_name}
Current/Past Roles: {roles}
Key Skills: {skills}

STRICT OUTPUT RULES:
1. Return ONLY the summary paragraph text.
2. The summary MUST be short (2-3 sentences max) to fit in a resume header without overlapping.
3. Focus on years of experience and key achievements."#;

/// System prompt for experience optimization — bare bullet list only.
pub const OPTIMIZE_SYSTEM: &str = "You are an expert technical resume writer. \
    Return ONLY the list of bullet points. \
    Do NOT include 'Here is the rewritten description', 'Revised version:', or any conversational text. \
    Do NOT wrap the output in markdown code blocks.";

/// Experience optimization prompt template.
/// Replace: {job_context}, {keyword_context}, {role}, {company}, {description}
pub const OPTIMIZE_PROMPT_TEMPLATE: &str = r#"Rewrite the following job description to be concise, high-impact, and results-driven.

Context:
{job_context}
{keyword_context}

Guidelines:
1. STRICTLY use bullet points (•).
2. LIMIT to 3-4 bullet points maximum.
3. Keep each bullet point concise (max 1-2 lines) to prevent layout overflow.
4. Start every bullet with a power verb (e.g., Architected, Deployed, Optimized).
5. Quantify results where possible (numbers, percentages).
6. Replace generic terms with specific industry jargon.

Role: {role} at {company}
Original Description:
{description}"#;

/// Refinement prompt template — the learn-from-edits loop. The caller always
/// supplies the field's current (possibly hand-edited) text.
/// Replace: {instruction}, {current_text}
pub const REFINE_PROMPT_TEMPLATE: &str = r#"Act as a professional editor. Refine the following resume content based on this instruction: "{instruction}".
Maintain the core facts but improve flow, grammar, and professional tone.
Ensure keywords relevant to the industry are preserved.
Keep the output concise and suitable for a resume layout.

Content to refine:
{current_text}"#;

/// Generic refinement instruction when the caller gives none.
pub const DEFAULT_REFINE_INSTRUCTION: &str = "Improve clarity and impact";

/// Skill suggestion prompt template. Returns a JSON array of strings.
/// Replace: {job_input}, {keyword_context}
pub const SKILLS_PROMPT_TEMPLATE: &str = r#"Identify the top 10 most valuable hard and soft skills for the following job context.

Job Context: "{job_input}"
{keyword_context}

Instructions:
1. If the input is a Job Description, extract the most critical matching skills.
2. If the input is just a Job Title, infer the most in-demand high-value skills in that specific industry.
3. Prioritize specific tools, frameworks, and methodologies (jargon) over generic terms (e.g., use "Kubernetes" instead of "Containerization" if applicable).

Return ONLY a JSON array of strings."#;

/// System prompt for ATS analysis — enforces JSON-only output.
pub const ATS_SYSTEM: &str = "You are an expert Resume Analyst specializing in \
    Applicant Tracking Systems (ATS) and professional resume optimization. \
    You MUST respond with a single valid JSON object that strictly adheres to the requested schema. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

/// ATS analysis prompt template.
/// Replace: {job_description}, {resume_text} (both pre-truncated by the caller)
pub const ATS_PROMPT_TEMPLATE: &str = r#"Analyze the candidate's existing resume content against the job description below.

--- JOB DESCRIPTION ---
{job_description}

--- CANDIDATE RESUME CONTENT ---
{resume_text}

--- TASK INSTRUCTIONS ---
1. Calculate Match Score: assess the candidate's content alignment with the JD's core skills and responsibilities. Score must be an integer (0-100).
2. Identify Key Match Terms: extract the top 5 most critical keywords from the JD that are explicitly present in the resume.
3. Identify Gaps/Missing Terms: extract the top 3 most critical keywords/requirements from the JD that are missing or under-emphasized in the resume.
4. Provide High-Impact Suggestions: give 2-3 specific, high-impact action items (using the STAR or XYZ method) that the candidate should implement to raise the score, referencing the missing terms.

Return a JSON object with this EXACT schema (no extra fields):
{
  "match_score": 72,
  "analysis_summary": "One-paragraph assessment of the fit.",
  "keyword_analysis": {
    "matched_terms": ["Rust", "Kubernetes"],
    "missing_terms": ["Terraform"]
  },
  "improvement_suggestions": [
    {"section": "Experience", "suggestion": "Quantify the migration work and mention Terraform explicitly."}
  ]
}"#;
