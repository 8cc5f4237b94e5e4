// All LLM prompt constants for the Letter module.

/// System prompt for cover-letter generation.
pub const COVER_LETTER_SYSTEM: &str =
    "You are an expert career coach and professional writer. \
    Write personalized, specific cover letters grounded in the candidate's \
    actual resume. Do not invent experience the resume does not contain. \
    Respond with the letter text only — no preamble, no markdown fences.";

/// Cover-letter prompt template. Replace `{job_title}` and `{resume}` before sending.
pub const COVER_LETTER_PROMPT_TEMPLATE: &str = r#"Write a personalized cover letter for the role '{job_title}' based on this resume:
{resume}"#;
