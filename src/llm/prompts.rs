//! Prompt templates for suggestion providers

use crate::llm::provider::SuggestionRequest;

/// How much of each document is quoted into the prompt
const DOCUMENT_EXCERPT_CHARS: usize = 500;

/// How many missing keywords are listed in the prompt
const PROMPT_MISSING_KEYWORDS: usize = 10;

#[derive(Debug, Clone)]
pub struct PromptTemplates {
    pub system: String,
    pub suggestions: String,
}

impl Default for PromptTemplates {
    fn default() -> Self {
        Self {
            system: SYSTEM_PROMPT.to_string(),
            suggestions: SUGGESTIONS_TEMPLATE.to_string(),
        }
    }
}

impl PromptTemplates {
    pub fn render_suggestions(&self, request: &SuggestionRequest) -> String {
        let missing_keywords: Vec<String> = request
            .missing_keywords
            .iter()
            .take(PROMPT_MISSING_KEYWORDS)
            .cloned()
            .collect();

        self.suggestions
            .replace("{score}", &request.match_percentage.to_string())
            .replace("{matched_skills}", &join_or_none(&request.matched_skills))
            .replace("{missing_skills}", &join_or_none(&request.missing_skills))
            .replace("{missing_keywords}", &join_or_none(&missing_keywords))
            .replace("{job}", &excerpt(&request.jd_text))
            .replace("{resume}", &excerpt(&request.resume_text))
    }
}

fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "None".to_string()
    } else {
        items.join(", ")
    }
}

fn excerpt(text: &str) -> String {
    text.chars().take(DOCUMENT_EXCERPT_CHARS).collect()
}

const SYSTEM_PROMPT: &str =
    "You are a professional resume coach. Provide specific, actionable advice in JSON format only.";

const SUGGESTIONS_TEMPLATE: &str = r#"You are an expert resume optimization assistant. Analyze the following data and provide actionable suggestions:

Match Percentage: {score}%
Matched Skills: {matched_skills}
Missing Skills: {missing_skills}
Missing Keywords: {missing_keywords}

Job Description Summary:
{job}...

Resume Summary:
{resume}...

Provide:
1. 5 specific, actionable suggestions to improve the resume match score (as a JSON array of strings)
2. A 2-3 sentence natural language insight about overall resume quality

Format your response as valid JSON only (no markdown, no code blocks):
{"suggestions": ["suggestion 1", "suggestion 2", "suggestion 3", "suggestion 4", "suggestion 5"], "insights": "your insight here"}"#;

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> SuggestionRequest {
        SuggestionRequest {
            match_percentage: 42,
            matched_keywords: vec!["python".to_string()],
            missing_keywords: (0..15).map(|i| format!("kw{i}")).collect(),
            matched_skills: vec!["python".to_string(), "react".to_string()],
            missing_skills: Vec::new(),
            resume_text: "é".repeat(600),
            jd_text: "Python role".to_string(),
        }
    }

    #[test]
    fn test_render_suggestions() {
        let prompt = PromptTemplates::default().render_suggestions(&request());

        assert!(prompt.contains("Match Percentage: 42%"));
        assert!(prompt.contains("Matched Skills: python, react"));
        assert!(prompt.contains("Missing Skills: None"));
        assert!(prompt.contains("kw9"));
        assert!(!prompt.contains("kw10"));
        assert!(prompt.contains("Python role..."));
        assert!(!prompt.contains("{score}"));
    }

    #[test]
    fn test_excerpt_is_char_bounded() {
        let prompt = PromptTemplates::default().render_suggestions(&request());
        let quoted = "é".repeat(DOCUMENT_EXCERPT_CHARS);

        assert!(prompt.contains(&format!("{quoted}...")));
        assert!(!prompt.contains(&"é".repeat(DOCUMENT_EXCERPT_CHARS + 1)));
    }
}
