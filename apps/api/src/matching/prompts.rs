// Prompt constants for the matching pipeline.

/// Resume scoring prompt. Replace `{job_description}` and `{resume_text}`
/// before sending. Both are embedded verbatim — no escaping or truncation —
/// so an adversarial resume can steer the model; accepted limitation.
pub const RESUME_MATCH_PROMPT_TEMPLATE: &str = r#"
You are an expert recruiter assistant.

Here is the job description:

{job_description}

Now evaluate the following resume:

{resume_text}

Return ONLY a JSON object structured like this:
{
  "FullName": "",
  "Email": "",
  "Phone": "",
  "SkillsMatched": [],
  "TotalExperienceYears": "",
  "FitScoreOutOf100": ""
}
ONLY return valid JSON, no extra explanation.
"#;

/// Builds the per-document prompt from the job description and extracted text.
pub fn build_match_prompt(job_description: &str, resume_text: &str) -> String {
    RESUME_MATCH_PROMPT_TEMPLATE
        .replace("{job_description}", job_description)
        .replace("{resume_text}", resume_text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_both_texts_verbatim() {
        let prompt = build_match_prompt("Need a Rust dev; 5+ yrs", "Jane Doe <jane@x.com>");
        assert!(prompt.contains("Need a Rust dev; 5+ yrs"));
        assert!(prompt.contains("Jane Doe <jane@x.com>"));
        assert!(prompt.contains("\"FitScoreOutOf100\""));
    }

    #[test]
    fn test_prompt_has_no_leftover_placeholders() {
        let prompt = build_match_prompt("jd", "resume");
        assert!(!prompt.contains("{job_description}"));
        assert!(!prompt.contains("{resume_text}"));
    }
}
