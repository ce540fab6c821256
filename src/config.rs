//! Configuration management for the resume matcher

use crate::error::{Result, ResumeMatchError};
use crate::processing::scoring::{
    KeywordMatchMode, ScoringWeights, SubScoreTable, DEFAULT_MAX_LISTED_KEYWORDS,
};
use crate::processing::signals::{MarkerLists, DEFAULT_EDUCATION_MARKERS, DEFAULT_EXPERIENCE_MARKERS};
use crate::processing::skill_matcher::{SkillVocabulary, DEFAULT_SKILLS};
use crate::processing::text_processor::DEFAULT_MAX_KEYWORDS;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scoring: ScoringConfig,
    pub vocabulary: VocabularyConfig,
    pub suggestions: SuggestionConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub weights: ScoringWeights,
    pub sub_scores: SubScoreTable,
    pub keyword_match_mode: KeywordMatchMode,
    pub max_keywords: usize,
    pub max_listed_keywords: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VocabularyConfig {
    pub skills: Vec<String>,
    /// Appended to `skills`, handy for keeping the defaults and adding a few
    pub extra_skills: Vec<String>,
    pub experience_markers: Vec<String>,
    pub education_markers: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    None,
    /// Any OpenAI-compatible chat completions endpoint (OpenAI, Groq, ...)
    OpenAi,
    Ollama,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestionConfig {
    pub provider: ProviderKind,
    pub base_url: Option<String>,
    pub model: Option<String>,
    /// Name of the environment variable that holds the API key
    pub api_key_env: String,
    pub timeout_secs: u64,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Console,
    Json,
    Markdown,
    Html,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weights: ScoringWeights::default(),
            sub_scores: SubScoreTable::default(),
            keyword_match_mode: KeywordMatchMode::default(),
            max_keywords: DEFAULT_MAX_KEYWORDS,
            max_listed_keywords: DEFAULT_MAX_LISTED_KEYWORDS,
        }
    }
}

impl Default for VocabularyConfig {
    fn default() -> Self {
        Self {
            skills: DEFAULT_SKILLS.iter().map(|s| s.to_string()).collect(),
            extra_skills: Vec::new(),
            experience_markers: DEFAULT_EXPERIENCE_MARKERS.iter().map(|s| s.to_string()).collect(),
            education_markers: DEFAULT_EDUCATION_MARKERS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::None,
            base_url: None,
            model: None,
            api_key_env: "OPENAI_API_KEY".to_string(),
            timeout_secs: 15,
            temperature: 0.4,
            max_tokens: 500,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Console,
            detailed: false,
            color_output: true,
        }
    }
}

impl SuggestionConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn base_url(&self) -> &str {
        match (&self.base_url, self.provider) {
            (Some(url), _) => url.trim_end_matches('/'),
            (None, ProviderKind::Ollama) => "http://127.0.0.1:11434",
            (None, _) => "https://api.openai.com/v1",
        }
    }

    pub fn model(&self) -> &str {
        match (&self.model, self.provider) {
            (Some(model), _) => model,
            (None, ProviderKind::Ollama) => "llama3.1",
            (None, _) => "gpt-4o-mini",
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load from `path`, writing the defaults there first if the file does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)
                .map_err(|e| ResumeMatchError::Configuration(format!("Failed to parse config: {}", e)))?;
            config.validate()?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| ResumeMatchError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-match")
            .join("config.toml")
    }

    /// Reject settings that would make every analysis meaningless
    pub fn validate(&self) -> Result<()> {
        self.scoring.weights.validate()?;

        if self.scoring.max_keywords == 0 {
            return Err(ResumeMatchError::Configuration(
                "scoring.max_keywords must be at least 1".to_string(),
            ));
        }
        if self.scoring.max_listed_keywords == 0 {
            return Err(ResumeMatchError::Configuration(
                "scoring.max_listed_keywords must be at least 1".to_string(),
            ));
        }
        if self.suggestions.timeout_secs == 0 {
            return Err(ResumeMatchError::Configuration(
                "suggestions.timeout_secs must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    pub fn skill_vocabulary(&self) -> Result<SkillVocabulary> {
        SkillVocabulary::from_terms(
            self.vocabulary
                .skills
                .iter()
                .chain(self.vocabulary.extra_skills.iter())
                .cloned(),
        )
    }

    pub fn marker_lists(&self) -> MarkerLists {
        MarkerLists {
            experience: self.vocabulary.experience_markers.clone(),
            education: self.vocabulary.education_markers.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.scoring.weights, ScoringWeights::ats_biased());
        assert_eq!(config.suggestions.provider, ProviderKind::None);
    }

    #[test]
    fn test_load_creates_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load_from(&path).unwrap();

        assert!(path.exists());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.scoring.weights = ScoringWeights::balanced();
        config.suggestions.provider = ProviderKind::Ollama;
        config.output.format = OutputFormat::Markdown;
        config.save_to(&path).unwrap();

        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded, config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[scoring]\nkeyword_match_mode = \"extracted_keywords\"\n\n[suggestions]\nprovider = \"openai\"\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();

        assert_eq!(config.scoring.keyword_match_mode, KeywordMatchMode::ExtractedKeywords);
        assert_eq!(config.scoring.weights, ScoringWeights::default());
        assert_eq!(config.suggestions.provider, ProviderKind::OpenAi);
        assert_eq!(config.suggestions.model(), "gpt-4o-mini");
    }

    #[test]
    fn test_invalid_weights_rejected_at_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[scoring.weights]\nkeyword = 0.5\nskills = 0.5\nexperience = 0.5\neducation = 0.5\n",
        )
        .unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, ResumeMatchError::InvalidWeights(_)));
    }

    #[test]
    fn test_unparseable_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "this is = = not toml").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, ResumeMatchError::Configuration(_)));
    }

    #[test]
    fn test_provider_defaults() {
        let mut suggestions = SuggestionConfig {
            provider: ProviderKind::Ollama,
            ..SuggestionConfig::default()
        };
        assert_eq!(suggestions.base_url(), "http://127.0.0.1:11434");
        assert_eq!(suggestions.model(), "llama3.1");

        suggestions.base_url = Some("https://api.groq.com/openai/v1/".to_string());
        assert_eq!(suggestions.base_url(), "https://api.groq.com/openai/v1");
        assert_eq!(suggestions.timeout(), Duration::from_secs(15));
    }

    #[test]
    fn test_extra_skills_extend_vocabulary() {
        let mut config = Config::default();
        config.vocabulary.extra_skills = vec!["Haskell".to_string()];

        let vocabulary = config.skill_vocabulary().unwrap();
        assert_eq!(vocabulary.len(), DEFAULT_SKILLS.len() + 1);
        assert!(vocabulary.match_skills("haskell").contains("haskell"));
    }
}
