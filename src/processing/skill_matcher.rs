//! Skill dictionary matching against a closed vocabulary

use crate::error::{Result, ResumeMatchError};
use aho_corasick::AhoCorasick;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Default vocabulary of technology and practice terms.
///
/// Entries are matched as case-insensitive substrings of the whole document, so
/// multi-word phrases ("machine learning") and punctuated terms ("ci/cd") work.
/// Very short terms such as "go" or "r" are left out because they would match
/// inside ordinary words.
pub const DEFAULT_SKILLS: &[&str] = &[
    // Languages
    "javascript", "typescript", "python", "java", "golang", "kotlin", "swift",
    "scala", "ruby", "php", "c++", "c#",
    // Web
    "react", "angular", "vue", "svelte", "next.js", "node", "express", "redux",
    "html", "css", "sass", "tailwind", "bootstrap",
    // Backend frameworks
    "django", "flask", "fastapi", "spring", "rails",
    // APIs
    "rest api", "graphql", "grpc", "microservices", "serverless",
    // Data stores
    "sql", "postgresql", "mysql", "mongodb", "redis", "elasticsearch",
    "dynamodb", "kafka", "rabbitmq",
    // Cloud and infrastructure
    "aws", "azure", "gcp", "docker", "kubernetes", "terraform", "ansible",
    "jenkins", "ci/cd", "github actions", "linux", "bash", "powershell",
    // Process and tooling
    "git", "agile", "scrum", "jira",
    // Data and ML
    "machine learning", "deep learning", "tensorflow", "pytorch", "pandas",
    "numpy", "data analysis", "tableau", "power bi",
    // Testing and design
    "unit testing", "selenium", "jest", "figma",
];

/// A closed, ordered list of skill terms with a prebuilt matcher.
#[derive(Debug, Clone)]
pub struct SkillVocabulary {
    terms: Vec<String>,
    matcher: AhoCorasick,
}

/// Skills from a vocabulary found in one document, in vocabulary order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillSet {
    skills: Vec<String>,
}

impl SkillSet {
    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    pub fn contains(&self, skill: &str) -> bool {
        self.skills.iter().any(|s| s == skill)
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.skills.iter()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.skills
    }

    pub fn into_vec(self) -> Vec<String> {
        self.skills
    }

    /// Skills present in both sets, in this set's order
    pub fn intersection(&self, other: &SkillSet) -> SkillSet {
        SkillSet {
            skills: self.skills.iter().filter(|s| other.contains(s)).cloned().collect(),
        }
    }

    /// Skills of this set that `other` lacks, in this set's order
    pub fn difference(&self, other: &SkillSet) -> SkillSet {
        SkillSet {
            skills: self.skills.iter().filter(|s| !other.contains(s)).cloned().collect(),
        }
    }
}

impl SkillVocabulary {
    /// Create the default vocabulary
    pub fn new() -> Result<Self> {
        Self::from_terms(DEFAULT_SKILLS.iter().map(|s| s.to_string()))
    }

    /// Create the default vocabulary extended with additional terms
    pub fn with_custom_skills(additional_skills: Vec<String>) -> Result<Self> {
        Self::from_terms(
            DEFAULT_SKILLS
                .iter()
                .map(|s| s.to_string())
                .chain(additional_skills),
        )
    }

    /// Build a vocabulary from arbitrary terms.
    ///
    /// Terms are trimmed and lowercased; blanks and repeats are dropped while
    /// the first occurrence keeps its position.
    pub fn from_terms<I>(terms: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut seen = HashSet::new();
        let terms: Vec<String> = terms
            .into_iter()
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .filter(|t| seen.insert(t.clone()))
            .collect();

        // Standard match kind so overlapping terms ("java" in "javascript") all report
        let matcher = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .build(&terms)
            .map_err(|e| ResumeMatchError::Processing(format!("Failed to build skill matcher: {}", e)))?;

        Ok(Self { terms, matcher })
    }

    /// Find every vocabulary term contained in `text`
    pub fn match_skills(&self, text: &str) -> SkillSet {
        let lower = text.to_lowercase();
        let mut found = vec![false; self.terms.len()];

        for mat in self.matcher.find_overlapping_iter(&lower) {
            found[mat.pattern().as_usize()] = true;
        }

        SkillSet {
            skills: self
                .terms
                .iter()
                .zip(found)
                .filter_map(|(term, hit)| hit.then(|| term.clone()))
                .collect(),
        }
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

impl PartialEq for SkillVocabulary {
    fn eq(&self, other: &Self) -> bool {
        self.terms == other.terms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_vocabulary() {
        let vocabulary = SkillVocabulary::new().unwrap();
        assert!(vocabulary.len() >= 65);
        assert_eq!(vocabulary.len(), DEFAULT_SKILLS.len());
    }

    #[test]
    fn test_case_insensitive_matching() {
        let vocabulary = SkillVocabulary::new().unwrap();
        let skills = vocabulary.match_skills("I have experience with PYTHON, JavaScript, and React development.");

        assert!(skills.contains("python"));
        assert!(skills.contains("javascript"));
        assert!(skills.contains("react"));
    }

    #[test]
    fn test_phrases_and_punctuated_terms() {
        let vocabulary = SkillVocabulary::new().unwrap();
        let skills = vocabulary.match_skills("Built CI/CD pipelines and Machine Learning models behind a REST API.");

        assert!(skills.contains("ci/cd"));
        assert!(skills.contains("machine learning"));
        assert!(skills.contains("rest api"));
    }

    #[test]
    fn test_overlapping_terms_all_match() {
        let vocabulary = SkillVocabulary::new().unwrap();
        let skills = vocabulary.match_skills("Senior JavaScript engineer, PostgreSQL");

        // Substring semantics: "java" sits inside "javascript", "sql" inside "postgresql"
        assert!(skills.contains("javascript"));
        assert!(skills.contains("java"));
        assert!(skills.contains("postgresql"));
        assert!(skills.contains("sql"));
    }

    #[test]
    fn test_output_follows_vocabulary_order() {
        let vocabulary = SkillVocabulary::from_terms(
            ["docker", "python", "react"].iter().map(|s| s.to_string()),
        )
        .unwrap();

        let skills = vocabulary.match_skills("react then python then docker");

        assert_eq!(skills.into_vec(), vec!["docker", "python", "react"]);
    }

    #[test]
    fn test_from_terms_normalizes_and_dedups() {
        let vocabulary = SkillVocabulary::from_terms(
            ["  Docker ", "docker", "", "Rust"].iter().map(|s| s.to_string()),
        )
        .unwrap();

        assert_eq!(vocabulary.terms(), &["docker".to_string(), "rust".to_string()]);
    }

    #[test]
    fn test_custom_skills_are_appended() {
        let vocabulary = SkillVocabulary::with_custom_skills(vec!["Haskell".to_string()]).unwrap();

        assert_eq!(vocabulary.terms().last().map(String::as_str), Some("haskell"));
        assert!(vocabulary.match_skills("Haskell and OCaml").contains("haskell"));
    }

    #[test]
    fn test_set_operations() {
        let vocabulary = SkillVocabulary::new().unwrap();
        let jd = vocabulary.match_skills("python docker react");
        let resume = vocabulary.match_skills("python react");

        assert_eq!(jd.intersection(&resume).into_vec(), vec!["python", "react"]);
        assert_eq!(jd.difference(&resume).into_vec(), vec!["docker"]);
    }

    #[test]
    fn test_no_skills() {
        let vocabulary = SkillVocabulary::new().unwrap();
        assert!(vocabulary.match_skills("Friendly barista wanted for weekend shifts").is_empty());
    }
}
