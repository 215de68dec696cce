//! Prompt templates for document review.

/// System message for the analysis call.
pub const ANALYSIS_SYSTEM_PROMPT: &str =
    "You are an expert in grammar scoring, tone analysis, and compliance evaluation.";

/// System message for the correction call.
pub const CORRECTION_SYSTEM_PROMPT: &str =
    "You are an expert copy editor and compliance writer.";

/// Build the analysis instruction for an (already truncated) excerpt.
pub fn analysis_prompt(text: &str) -> String {
    format!(
        r#"You are an AI compliance and linguistic analysis expert.
Analyze the following text for:
- Grammar correctness (0-100 score)
- Tone and sentiment (positive, neutral, negative)
- Clarity and professionalism
- Structural and formatting recommendations

Return your output strictly in JSON format:
{{
  "summary": "<Brief overview of document>",
  "grammar_score": <number between 0 and 100>,
  "sentiment": "<positive | neutral | negative>",
  "recommendations": ["list of recommendations"],
  "compliance_score": "<percentage>"
}}

Text to analyze:
{}
"#,
        text
    )
}

/// Build the correction instruction for an (already truncated) excerpt.
pub fn correction_prompt(text: &str) -> String {
    format!(
        r#"You are a professional editor.
Correct the following text for:
- Grammar and punctuation
- Tone consistency and readability
- Clarity and professional compliance

Return only the corrected version - no JSON or explanation.

Text:
{}
"#,
        text
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_prompt_embeds_text_and_schema() {
        let prompt = analysis_prompt("Teh quick brown fox.");
        assert!(prompt.ends_with("Text to analyze:\nTeh quick brown fox.\n"));
        for key in ["summary", "grammar_score", "sentiment", "recommendations", "compliance_score"] {
            assert!(prompt.contains(&format!("\"{}\"", key)), "missing {}", key);
        }
    }

    #[test]
    fn test_correction_prompt_forbids_json() {
        let prompt = correction_prompt("their going home");
        assert!(prompt.contains("no JSON or explanation"));
        assert!(prompt.ends_with("Text:\ntheir going home\n"));
    }
}
