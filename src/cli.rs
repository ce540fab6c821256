//! CLI interface for the resume matcher

use crate::config::OutputFormat;
use crate::processing::scoring::ScoringWeights;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

/// Extensions accepted for resume and job description files
pub const SUPPORTED_EXTENSIONS: &[&str] = &["txt", "text", "md", "markdown"];

#[derive(Parser)]
#[command(name = "resume-match")]
#[command(about = "ATS-style resume and job description match scoring")]
#[command(long_about = "Score how well a resume matches a job description using keyword overlap, a skill dictionary and experience/education markers, with optional AI-written suggestions")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score a resume against a job description
    Analyze {
        /// Path to resume file (TXT, MD)
        #[arg(short, long)]
        resume: PathBuf,

        /// Path to job description file (TXT, MD)
        #[arg(short, long, required_unless_present = "job_text", conflicts_with = "job_text")]
        job: Option<PathBuf>,

        /// Job description text given inline
        #[arg(long)]
        job_text: Option<String>,

        /// Output format: console, json, markdown, html (defaults to the configured format)
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Skip the AI suggestion provider and use rule-based suggestions only
        #[arg(long)]
        no_ai: bool,

        /// Weight preset: ats (50/35/10/5) or balanced (40/40/10/10)
        #[arg(short, long)]
        weights: Option<String>,

        /// Show full keyword lists and analysis details
        #[arg(short, long)]
        detailed: bool,
    },

    /// List the skill vocabulary in use
    Skills {
        /// Only show skills containing this text
        #[arg(short, long)]
        filter: Option<String>,
    },

    /// Show or reset configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file location
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" | "text" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        "html" => Ok(OutputFormat::Html),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json, markdown, html",
            format
        )),
    }
}

pub fn parse_weight_preset(preset: &str) -> Result<ScoringWeights, String> {
    match preset.to_lowercase().as_str() {
        "ats" | "ats-biased" | "default" => Ok(ScoringWeights::ats_biased()),
        "balanced" => Ok(ScoringWeights::balanced()),
        _ => Err(format!("Invalid weight preset: {}. Supported: ats, balanced", preset)),
    }
}

/// Validate file extension; files without one are allowed and read as plain text
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if allowed_extensions.contains(&ext.to_lowercase().as_str()) => Ok(()),
        Some(ext) => Err(format!(
            "Unsupported file extension: .{}. Allowed: {}. Convert the document to plain text first",
            ext,
            allowed_extensions.join(", ")
        )),
        None => Ok(()),
    }
}
