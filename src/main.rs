//! resume-match: ATS-style resume and job description match scoring

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info};
use resume_match::cli::{self, Cli, Commands, ConfigAction};
use resume_match::config::Config;
use resume_match::input::InputManager;
use resume_match::llm::build_provider;
use resume_match::output::{save_report_to_file, suggest_filename, MatchReport, ReportGenerator, ReportMetadata};
use resume_match::processing::AnalysisEngine;
use std::path::{Path, PathBuf};
use std::process;
use std::time::{Duration, Instant};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = match Config::load_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration from {}: {}", config_path.display(), e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, &config_path).await {
        error!("Command failed: {:#}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, mut config: Config, config_path: &Path) -> Result<()> {
    match command {
        Commands::Analyze {
            resume,
            job,
            job_text,
            output,
            save,
            no_ai,
            weights,
            detailed,
        } => {
            cli::validate_file_extension(&resume, cli::SUPPORTED_EXTENSIONS)
                .map_err(|e| anyhow::anyhow!("Resume file: {}", e))?;
            if let Some(job) = &job {
                cli::validate_file_extension(job, cli::SUPPORTED_EXTENSIONS)
                    .map_err(|e| anyhow::anyhow!("Job description file: {}", e))?;
            }

            let output_format = match output {
                Some(format) => cli::parse_output_format(&format).map_err(anyhow::Error::msg)?,
                None => config.output.format,
            };
            if let Some(preset) = weights {
                config.scoring.weights = cli::parse_weight_preset(&preset).map_err(anyhow::Error::msg)?;
            }

            let start_time = Instant::now();
            let mut input_manager = InputManager::new();

            let resume_text = input_manager
                .extract_text(&resume)
                .await
                .with_context(|| format!("Failed to read resume {}", resume.display()))?;

            let (job_text, job_label) = match (job, job_text) {
                (Some(path), _) => {
                    let text = input_manager
                        .extract_text(&path)
                        .await
                        .with_context(|| format!("Failed to read job description {}", path.display()))?;
                    (text, path.display().to_string())
                }
                (None, Some(text)) => (text, "inline job description".to_string()),
                (None, None) => anyhow::bail!("Provide a job description with --job or --job-text"),
            };

            info!(
                "Analyzing {} ({} chars) against {} ({} chars)",
                resume.display(),
                resume_text.len(),
                job_label,
                job_text.len()
            );

            let engine = AnalysisEngine::from_config(&config).context("Invalid scoring configuration")?;
            let provider = if no_ai {
                None
            } else {
                build_provider(&config.suggestions).context("Failed to set up suggestion provider")?
            };

            let spinner = provider
                .as_ref()
                .map(|p| spinner(format!("Generating suggestions with {}...", p.name())));

            let outcome = engine
                .analyze_with_suggestions(
                    &resume_text,
                    &job_text,
                    provider.as_deref(),
                    config.suggestions.timeout(),
                )
                .await;

            if let Some(spinner) = spinner {
                spinner.finish_and_clear();
            }

            let metadata = ReportMetadata::new(
                resume.display().to_string(),
                job_label,
                *engine.weights(),
                start_time.elapsed().as_millis() as u64,
            );
            let report = MatchReport::from_suggested(outcome?, metadata);

            let detailed = detailed || config.output.detailed;
            let use_colors = config.output.color_output && save.is_none();
            let generator = ReportGenerator::with_options(use_colors, detailed, true, true, true);
            let content = generator.generate_report(&report, &output_format)?;

            match save {
                Some(path) => {
                    let path = resolve_save_path(path, &output_format, &resume);
                    save_report_to_file(&content, &path)
                        .with_context(|| format!("Failed to save report to {}", path.display()))?;
                    println!("Report saved to {}", path.display());
                }
                None => println!("{}", content),
            }
        }

        Commands::Skills { filter } => {
            let vocabulary = config.skill_vocabulary()?;
            let filter = filter.map(|f| f.to_lowercase());

            let skills: Vec<&String> = vocabulary
                .terms()
                .iter()
                .filter(|skill| filter.as_ref().map_or(true, |f| skill.contains(f.as_str())))
                .collect();

            println!("Skill vocabulary ({} of {} terms)\n", skills.len(), vocabulary.len());
            for skill in skills {
                println!("  • {}", skill);
            }
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("Configuration: {}\n", config_path.display());
                let content = toml::to_string_pretty(&config).context("Failed to render configuration")?;
                println!("{}", content);
            }

            Some(ConfigAction::Reset) => {
                Config::default()
                    .save_to(config_path)
                    .with_context(|| format!("Failed to write {}", config_path.display()))?;
                println!("Configuration reset to defaults: {}", config_path.display());
            }

            Some(ConfigAction::Path) => {
                println!("{}", config_path.display());
            }
        },
    }

    Ok(())
}

fn spinner(message: String) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// A directory target gets a generated file name inside it
fn resolve_save_path(path: PathBuf, format: &resume_match::config::OutputFormat, resume: &Path) -> PathBuf {
    if path.is_dir() {
        path.join(suggest_filename(format, &resume.to_string_lossy(), true))
    } else {
        path
    }
}
