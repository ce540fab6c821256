//! Text normalization and frequency-ranked keyword extraction

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Tokens at or below this length never become keywords.
pub const MIN_KEYWORD_LEN: usize = 4;

/// Default cap on the number of extracted keywords.
pub const DEFAULT_MAX_KEYWORDS: usize = 30;

/// Function words excluded from keyword extraction: articles, conjunctions,
/// prepositions, auxiliary verbs, demonstratives and pronouns.
pub const STOP_WORDS: &[&str] = &[
    // articles
    "the", "a", "an",
    // conjunctions
    "and", "or", "but",
    // prepositions
    "in", "on", "at", "to", "for", "of", "with", "by", "from", "as",
    // auxiliaries
    "is", "was", "are", "were", "be", "been", "being", "have", "has", "had",
    "do", "does", "did", "will", "would", "could", "should", "may", "might",
    "must", "can",
    // demonstratives
    "this", "that", "these", "those",
    // pronouns
    "we", "you", "your", "our",
];

/// Ordered keywords of one document, most frequent first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordSet {
    keywords: Vec<String>,
}

impl KeywordSet {
    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.keywords.iter()
    }

    pub fn contains(&self, keyword: &str) -> bool {
        self.keywords.iter().any(|k| k == keyword)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.keywords
    }

    pub fn into_vec(self) -> Vec<String> {
        self.keywords
    }
}

pub struct TextProcessor {
    stop_words: HashSet<&'static str>,
    non_word_regex: Regex,
    max_keywords: usize,
}

impl Default for TextProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextProcessor {
    pub fn new() -> Self {
        Self::with_max_keywords(DEFAULT_MAX_KEYWORDS)
    }

    pub fn with_max_keywords(max_keywords: usize) -> Self {
        // Word characters are ASCII letters, digits and underscore; everything
        // else that is not whitespace becomes a separator.
        let non_word_regex = Regex::new(r"[^a-z0-9_\s]").expect("Invalid non-word regex");

        Self {
            stop_words: STOP_WORDS.iter().copied().collect(),
            non_word_regex,
            max_keywords,
        }
    }

    /// Lowercase the text and replace every non-word, non-whitespace character with a space
    pub fn normalize(&self, text: &str) -> String {
        let lower = text.to_lowercase();
        self.non_word_regex.replace_all(&lower, " ").into_owned()
    }

    /// Split normalized text into keyword candidates, in document order
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        self.normalize(text)
            .split_whitespace()
            .filter(|token| token.chars().count() >= MIN_KEYWORD_LEN)
            .filter(|token| !self.stop_words.contains(token))
            .map(str::to_string)
            .collect()
    }

    /// Extract keywords that occur more than once, ranked by frequency.
    ///
    /// Ties keep first-occurrence order. At most `max_keywords` entries are
    /// returned; the set is empty when nothing repeats.
    pub fn extract_keywords(&self, text: &str) -> KeywordSet {
        let mut first_seen: Vec<String> = Vec::new();
        let mut word_freq: HashMap<String, usize> = HashMap::new();

        for token in self.tokenize(text) {
            let count = word_freq.entry(token.clone()).or_insert(0);
            if *count == 0 {
                first_seen.push(token);
            }
            *count += 1;
        }

        let mut ranked: Vec<(String, usize)> = first_seen
            .into_iter()
            .filter_map(|word| {
                let freq = word_freq[&word];
                (freq > 1).then_some((word, freq))
            })
            .collect();

        // sort_by is stable, so equal frequencies stay in first-seen order
        ranked.sort_by(|a, b| b.1.cmp(&a.1));

        KeywordSet {
            keywords: ranked
                .into_iter()
                .take(self.max_keywords)
                .map(|(word, _)| word)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalization() {
        let processor = TextProcessor::new();
        let normalized = processor.normalize("CI/CD, Node.js & C++!");

        assert_eq!(normalized, "ci cd  node js   c   ");
    }

    #[test]
    fn test_tokenization() {
        let processor = TextProcessor::new();
        let tokens = processor.tokenize("Rust programming with the language, which is awesome!");

        assert!(tokens.contains(&"rust".to_string()));
        assert!(tokens.contains(&"programming".to_string()));
        assert!(tokens.contains(&"language".to_string()));
        assert!(tokens.contains(&"awesome".to_string()));

        // Short tokens and stop words are dropped
        assert!(!tokens.contains(&"is".to_string()));
        assert!(!tokens.contains(&"with".to_string()));
        assert!(!tokens.contains(&"the".to_string()));
    }

    #[test]
    fn test_long_stop_words_filtered() {
        let processor = TextProcessor::new();
        let tokens = processor.tokenize("These those should would could might being");

        assert!(tokens.is_empty());
    }

    #[test]
    fn test_keyword_extraction_ranks_by_frequency() {
        let processor = TextProcessor::new();
        let text = "Kubernetes clusters. Python services. Kubernetes operators, Python tooling, Kubernetes upgrades.";

        let keywords = processor.extract_keywords(text);

        assert_eq!(keywords.as_slice(), &["kubernetes".to_string(), "python".to_string()]);
    }

    #[test]
    fn test_keyword_extraction_ties_keep_first_seen_order() {
        let processor = TextProcessor::new();
        let text = "zeta alpha mango zeta alpha mango";

        let keywords = processor.extract_keywords(text);

        assert_eq!(keywords.into_vec(), vec!["zeta", "alpha", "mango"]);
    }

    #[test]
    fn test_single_occurrences_are_not_keywords() {
        let processor = TextProcessor::new();
        let keywords = processor.extract_keywords("Looking for Python developer with React experience.");

        assert!(keywords.is_empty());
    }

    #[test]
    fn test_keyword_extraction_is_capped() {
        let processor = TextProcessor::new();
        let text: String = (0..40)
            .map(|i| format!("term{i:02} term{i:02} "))
            .collect();

        let keywords = processor.extract_keywords(&text);

        assert_eq!(keywords.len(), DEFAULT_MAX_KEYWORDS);
        assert_eq!(keywords.as_slice()[0], "term00");
        assert_eq!(keywords.as_slice()[29], "term29");
    }

    #[test]
    fn test_keywords_are_lowercase_and_case_folded() {
        let processor = TextProcessor::new();
        let keywords = processor.extract_keywords("Docker DOCKER docker");

        assert_eq!(keywords.into_vec(), vec!["docker"]);
    }
}
