// Shared prompt constants and prompt-building utilities.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// System prompt fragment that enforces bare-text output. Generated text is
/// inserted verbatim into a form field, so conversational wrapping is a
/// contract violation, not a style issue.
pub const BARE_TEXT_SYSTEM: &str = "You are a precise writing assistant. \
    Return ONLY the requested text. \
    Do NOT include any preamble such as 'Here is', 'Sure', or a heading. \
    Do NOT wrap the output in markdown code fences. \
    Do NOT append explanations or follow-up questions.";
