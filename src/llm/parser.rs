//! Tolerant parsing of provider output into suggestions

use crate::error::{Result, ResumeMatchError};
use crate::llm::provider::AiSuggestions;
use log::debug;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

const MIN_SUGGESTIONS: usize = 3;
const MAX_SUGGESTIONS: usize = 5;
const MIN_SUGGESTION_CHARS: usize = 10;

#[derive(Debug, Deserialize)]
struct RawSuggestions {
    suggestions: Option<Value>,
    insights: Option<Value>,
}

/// Cleans up the usual model-output noise before JSON parsing: code fences,
/// a leading `json` tag, prose around the object, trailing commas.
pub struct ResponseParser {
    fence_json_regex: Regex,
    fence_regex: Regex,
    json_tag_regex: Regex,
    trailing_brace_regex: Regex,
    trailing_bracket_regex: Regex,
    whitespace_regex: Regex,
}

impl Default for ResponseParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseParser {
    pub fn new() -> Self {
        Self {
            fence_json_regex: Regex::new(r"(?i)```json\s*").expect("Invalid fence regex"),
            fence_regex: Regex::new(r"```\s*").expect("Invalid fence regex"),
            json_tag_regex: Regex::new(r"(?i)^json\s*").expect("Invalid json tag regex"),
            trailing_brace_regex: Regex::new(r",\s*\}").expect("Invalid trailing comma regex"),
            trailing_bracket_regex: Regex::new(r",\s*\]").expect("Invalid trailing comma regex"),
            whitespace_regex: Regex::new(r"\s{2,}").expect("Invalid whitespace regex"),
        }
    }

    pub fn clean(&self, response_text: &str) -> String {
        let mut cleaned = response_text.trim().to_string();

        cleaned = self.fence_json_regex.replace_all(&cleaned, "").into_owned();
        cleaned = self.fence_regex.replace_all(&cleaned, "").into_owned();
        cleaned = self.json_tag_regex.replace(&cleaned, "").into_owned();

        if let (Some(first), Some(last)) = (cleaned.find('{'), cleaned.rfind('}')) {
            if last > first {
                cleaned = cleaned[first..=last].to_string();
            }
        }

        cleaned = self.trailing_brace_regex.replace_all(&cleaned, "}").into_owned();
        cleaned = self.trailing_bracket_regex.replace_all(&cleaned, "]").into_owned();
        cleaned = cleaned.replace('\n', " ").replace('\t', " ").replace('\r', "");
        cleaned = self.whitespace_regex.replace_all(&cleaned, " ").into_owned();

        cleaned.trim().to_string()
    }

    /// Parse a provider response, rejecting it when fewer than three usable suggestions remain
    pub fn parse(&self, response_text: &str, match_percentage: u8) -> Result<AiSuggestions> {
        let cleaned = self.clean(response_text);
        debug!("Cleaned provider response: {}", cleaned.chars().take(200).collect::<String>());

        let raw: RawSuggestions = serde_json::from_str(&cleaned).map_err(|e| {
            ResumeMatchError::ExternalSuggestionFailure(format!("Malformed provider response: {}", e))
        })?;

        let suggestions: Vec<String> = match raw.suggestions {
            Some(Value::Array(items)) => items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(s) if s.chars().count() > MIN_SUGGESTION_CHARS => Some(s),
                    _ => None,
                })
                .take(MAX_SUGGESTIONS)
                .collect(),
            _ => {
                return Err(ResumeMatchError::ExternalSuggestionFailure(
                    "Invalid suggestions format".to_string(),
                ))
            }
        };

        if suggestions.len() < MIN_SUGGESTIONS {
            return Err(ResumeMatchError::ExternalSuggestionFailure(format!(
                "Not enough suggestions: {}",
                suggestions.len()
            )));
        }

        let insights = match raw.insights {
            Some(Value::String(s)) if !s.trim().is_empty() => s,
            _ => default_insight(match_percentage),
        };

        Ok(AiSuggestions { suggestions, insights })
    }
}

fn default_insight(match_percentage: u8) -> String {
    format!(
        "ATS Score: {}%. Focus on adding missing keywords for better matching.",
        match_percentage
    )
}
