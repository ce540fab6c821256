//! Output formatters - console, JSON, markdown and HTML renderings of a match report

use crate::config::OutputFormat;
use crate::error::{Result, ResumeMatchError};
use crate::output::report::{MatchReport, ScoreBand};
use askama::Template;
use colored::{Color, Colorize};
use std::path::Path;

/// Keyword lists longer than this are cut in the non-detailed views
const SUMMARY_LIST_LIMIT: usize = 10;

/// Trait for rendering match reports
pub trait OutputFormatter {
    fn format_report(&self, report: &MatchReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with colors
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

/// JSON formatter for API integration and structured data
pub struct JsonFormatter {
    pretty: bool,
}

/// Markdown formatter for sharing and documentation
pub struct MarkdownFormatter {
    include_metadata: bool,
}

/// HTML formatter with embedded styling
pub struct HtmlFormatter {
    include_styles: bool,
}

/// Dispatches to the formatter for a given [`OutputFormat`]
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
    html_formatter: HtmlFormatter,
}

#[derive(Template)]
#[template(source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Resume Match Report</title>
    {% if include_styles %}
    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            line-height: 1.6;
            color: #333;
            max-width: 900px;
            margin: 0 auto;
            padding: 20px;
            background: #f8f9fa;
        }
        .container { background: white; padding: 30px; border-radius: 8px; box-shadow: 0 2px 10px rgba(0,0,0,0.1); }
        .header { text-align: center; margin-bottom: 30px; border-bottom: 3px solid #007acc; padding-bottom: 20px; }
        .score-badge { display: inline-block; padding: 8px 16px; border-radius: 20px; font-weight: bold; color: white; margin-left: 10px; }
        .score-excellent { background: #28a745; }
        .score-good { background: #17a2b8; }
        .score-fair { background: #ffc107; color: #000; }
        .score-poor { background: #dc3545; }
        .section h2 { color: #007acc; border-bottom: 2px solid #e9ecef; padding-bottom: 10px; }
        table { border-collapse: collapse; width: 100%; }
        th, td { text-align: left; padding: 8px; border-bottom: 1px solid #e9ecef; }
        .tag { display: inline-block; padding: 2px 10px; margin: 3px; border-radius: 12px; font-size: 0.9em; }
        .tag-matched { background: #d4edda; color: #155724; }
        .tag-missing { background: #f8d7da; color: #721c24; }
        .strengths, .weaknesses, .suggestions { background: #f8f9fa; padding: 15px; border-radius: 6px; margin: 10px 0; }
        .strengths { border-left: 4px solid #28a745; }
        .weaknesses { border-left: 4px solid #dc3545; }
        .suggestions { border-left: 4px solid #ffc107; }
        .metadata { background: #e9ecef; padding: 15px; border-radius: 6px; margin-top: 30px; font-size: 0.9em; color: #6c757d; }
    </style>
    {% endif %}
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>Resume Match Report</h1>
            <p>Generated: {{ generated_at }} | Processing time: {{ processing_time }}ms</p>
        </div>

        <div class="section">
            <h2>Summary</h2>
            <h3>Match Score: {{ match_percentage }}% <span class="score-badge {{ score_class }}">{{ score_label }}</span></h3>
            <p><strong>Verdict:</strong> {{ verdict }}</p>
            {% if has_insights %}
            <blockquote>{{ insights }}</blockquote>
            {% endif %}
            <table>
                <tr><th>Component</th><th>Score</th><th>Weight</th></tr>
                {% for row in score_rows %}
                <tr><td>{{ row.label }}</td><td>{{ row.score }}%</td><td>{{ row.weight }}%</td></tr>
                {% endfor %}
            </table>
        </div>

        <div class="section">
            <h2>Skills</h2>
            <p>
                {% for skill in matched_skills %}<span class="tag tag-matched">{{ skill }}</span> {% endfor %}
                {% for skill in missing_skills %}<span class="tag tag-missing">{{ skill }}</span> {% endfor %}
            </p>
        </div>

        <div class="section">
            <h2>Keywords</h2>
            <p>
                {% for keyword in matched_keywords %}<span class="tag tag-matched">{{ keyword }}</span> {% endfor %}
                {% for keyword in missing_keywords %}<span class="tag tag-missing">{{ keyword }}</span> {% endfor %}
            </p>
        </div>

        <div class="section">
            <h2>Strengths</h2>
            <div class="strengths"><ul>{% for item in strengths %}<li>{{ item }}</li>{% endfor %}</ul></div>
        </div>

        <div class="section">
            <h2>Weaknesses</h2>
            <div class="weaknesses"><ul>{% for item in weaknesses %}<li>{{ item }}</li>{% endfor %}</ul></div>
        </div>

        <div class="section">
            <h2>Suggestions</h2>
            <div class="suggestions"><ul>{% for item in suggestions %}<li>{{ item }}</li>{% endfor %}</ul></div>
            <p><small>Source: {{ suggestion_source }}</small></p>
        </div>

        <div class="metadata">
            <p><strong>Generated by resume-match v{{ version }}</strong></p>
            <p><strong>Resume:</strong> {{ resume_label }} | <strong>Job:</strong> {{ job_label }}</p>
        </div>
    </div>
</body>
</html>"#, ext = "html")]
struct HtmlTemplate {
    include_styles: bool,
    generated_at: String,
    processing_time: u64,
    match_percentage: u8,
    score_class: String,
    score_label: String,
    verdict: String,
    insights: String,
    has_insights: bool,
    score_rows: Vec<HtmlScoreRow>,
    matched_skills: Vec<String>,
    missing_skills: Vec<String>,
    matched_keywords: Vec<String>,
    missing_keywords: Vec<String>,
    strengths: Vec<String>,
    weaknesses: Vec<String>,
    suggestions: Vec<String>,
    suggestion_source: String,
    version: String,
    resume_label: String,
    job_label: String,
}

struct HtmlScoreRow {
    label: &'static str,
    score: u8,
    weight: String,
}

/// (label, score, weight) rows shared by every formatter
fn score_rows(report: &MatchReport) -> [(&'static str, u8, f64); 4] {
    let scores = &report.result.scores;
    let weights = &report.metadata.weights;
    [
        ("Keyword Match", scores.keyword_match, weights.keyword),
        ("Skills Match", scores.skills_match, weights.skills),
        ("Experience", scores.experience_match, weights.experience),
        ("Education", scores.education_match, weights.education),
    ]
}

fn limited(items: &[String], limit: usize) -> String {
    if items.is_empty() {
        return "none".to_string();
    }

    let shown = items.iter().take(limit).cloned().collect::<Vec<_>>().join(", ");
    if items.len() > limit {
        format!("{} (+{} more)", shown, items.len() - limit)
    } else {
        shown
    }
}

fn display_label(label: &str) -> String {
    Path::new(label)
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| label.to_string())
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_score_badge(&self, band: ScoreBand) -> String {
        let color = match band {
            ScoreBand::Excellent => Color::Green,
            ScoreBand::VeryGood => Color::BrightGreen,
            ScoreBand::Good => Color::Yellow,
            ScoreBand::Fair => Color::BrightYellow,
            ScoreBand::BelowAverage => Color::Red,
            ScoreBand::Poor => Color::BrightRed,
        };
        let badge = band.label().to_uppercase();

        if self.use_colors {
            format!("[{}]", badge.color(color).bold())
        } else {
            format!("[{}]", badge)
        }
    }

    fn push_bullets(&self, output: &mut String, items: &[String], color: Color) {
        for item in items {
            output.push_str(&format!("  • {}\n", self.colorize(item, color)));
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &MatchReport) -> Result<String> {
        let result = &report.result;
        let limit = if self.detailed { usize::MAX } else { SUMMARY_LIST_LIMIT };
        let mut output = String::new();

        output.push_str(&self.format_header("RESUME MATCH ANALYSIS", 1));
        output.push_str(&format!(
            "Generated: {} | Processing time: {}ms\n",
            report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            report.metadata.processing_time_ms
        ));

        output.push_str(&self.format_header("Summary", 2));
        output.push_str(&format!(
            "Match Score: {}% {}\n",
            result.match_percentage,
            self.format_score_badge(report.band())
        ));
        output.push_str(&format!("Verdict: {}\n", self.colorize(&report.verdict, Color::Cyan)));
        if let Some(insights) = &report.insights {
            output.push_str(&format!("{} {}\n", self.colorize("Insights:", Color::Cyan), insights));
        }

        output.push_str(&self.format_header("Score Breakdown", 3));
        for (label, score, weight) in score_rows(report) {
            output.push_str(&format!("  {:<14} {:>3}% (weight: {:.1}%)\n", label, score, weight * 100.0));
        }

        output.push_str(&self.format_header("Skills", 3));
        output.push_str(&format!(
            "  {} {}\n",
            self.colorize("Matched:", Color::Green),
            limited(&result.matched_skills, limit)
        ));
        output.push_str(&format!(
            "  {} {}\n",
            self.colorize("Missing:", Color::Red),
            limited(&result.missing_skills, limit)
        ));

        output.push_str(&self.format_header("Keywords", 3));
        output.push_str(&format!(
            "  {} {}\n",
            self.colorize("Matched:", Color::Green),
            limited(&result.matched_keywords, limit)
        ));
        output.push_str(&format!(
            "  {} {}\n",
            self.colorize("Missing:", Color::Red),
            limited(&result.missing_keywords, limit)
        ));

        output.push_str(&self.format_header("Strengths", 2));
        self.push_bullets(&mut output, &result.strengths, Color::Green);

        output.push_str(&self.format_header("Weaknesses", 2));
        self.push_bullets(&mut output, &result.weaknesses, Color::Yellow);

        output.push_str(&self.format_header("Suggestions", 2));
        for (i, suggestion) in result.suggestions.iter().enumerate() {
            output.push_str(&format!("  {}. {}\n", i + 1, suggestion));
        }

        if self.detailed {
            output.push_str(&self.format_header("Details", 2));
            output.push_str(&format!(
                "  Experience markers: {} | Education markers: {}\n",
                if result.signals.has_experience_markers { "found" } else { "not found" },
                if result.signals.has_education_markers { "found" } else { "not found" }
            ));
            output.push_str(&format!("  Suggestions by: {}\n", report.source_label()));
            output.push_str(&format!(
                "  Resume: {} | Job: {}\n",
                report.metadata.resume_label, report.metadata.job_label
            ));
        }

        output.push_str(&format!(
            "\n{} Generated by resume-match v{}\n",
            self.colorize("ℹ", Color::Blue),
            report.metadata.tool_version
        ));

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &MatchReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn markdown_score_badge(band: ScoreBand) -> String {
        let dot = match band {
            ScoreBand::Excellent => "🟢",
            ScoreBand::VeryGood => "🟡",
            ScoreBand::Good => "🟠",
            _ => "🔴",
        };
        format!("{} {}", dot, band.label())
    }

    fn push_list(output: &mut String, title: &str, items: &[String]) {
        output.push_str(&format!("## {}\n\n", title));
        for item in items {
            output.push_str(&format!("- {}\n", item));
        }
        output.push('\n');
    }

    fn code_list(items: &[String]) -> String {
        if items.is_empty() {
            "_none_".to_string()
        } else {
            format!("`{}`", items.join("`, `"))
        }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &MatchReport) -> Result<String> {
        let result = &report.result;
        let mut output = String::new();

        output.push_str("# Resume Match Report\n\n");

        if self.include_metadata {
            output.push_str(&format!(
                "**Generated:** {} | **Processing Time:** {}ms\n",
                report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                report.metadata.processing_time_ms
            ));
            output.push_str(&format!(
                "**Resume:** `{}` | **Job:** `{}`\n\n",
                display_label(&report.metadata.resume_label),
                display_label(&report.metadata.job_label)
            ));
        }

        output.push_str("## Summary\n\n");
        output.push_str(&format!(
            "**Match Score:** {}% {}\n\n",
            result.match_percentage,
            Self::markdown_score_badge(report.band())
        ));
        output.push_str(&format!("**Verdict:** {}\n\n", report.verdict));
        if let Some(insights) = &report.insights {
            output.push_str(&format!("> {}\n\n", insights));
        }

        output.push_str("| Component | Score | Weight |\n");
        output.push_str("|-----------|-------|--------|\n");
        for (label, score, weight) in score_rows(report) {
            output.push_str(&format!("| {} | {}% | {:.1}% |\n", label, score, weight * 100.0));
        }
        output.push('\n');

        output.push_str("## Skills\n\n");
        output.push_str(&format!("**Matched:** {}\n\n", Self::code_list(&result.matched_skills)));
        output.push_str(&format!("**Missing:** {}\n\n", Self::code_list(&result.missing_skills)));

        output.push_str("## Keywords\n\n");
        output.push_str(&format!("**Matched:** {}\n\n", Self::code_list(&result.matched_keywords)));
        output.push_str(&format!("**Missing:** {}\n\n", Self::code_list(&result.missing_keywords)));

        Self::push_list(&mut output, "Strengths", &result.strengths);
        Self::push_list(&mut output, "Weaknesses", &result.weaknesses);

        output.push_str("## Suggestions\n\n");
        for (i, suggestion) in result.suggestions.iter().enumerate() {
            output.push_str(&format!("{}. {}\n", i + 1, suggestion));
        }
        output.push('\n');

        if self.include_metadata {
            output.push_str("---\n\n");
            output.push_str(&format!(
                "*Generated by resume-match v{} | Suggestions: {}*\n",
                report.metadata.tool_version,
                report.source_label()
            ));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl HtmlFormatter {
    pub fn new(include_styles: bool) -> Self {
        Self { include_styles }
    }

    fn create_template_data(&self, report: &MatchReport) -> HtmlTemplate {
        let result = &report.result;
        let band = report.band();
        let score_class = match band {
            ScoreBand::Excellent => "score-excellent",
            ScoreBand::VeryGood | ScoreBand::Good => "score-good",
            ScoreBand::Fair => "score-fair",
            ScoreBand::BelowAverage | ScoreBand::Poor => "score-poor",
        };

        let score_rows = score_rows(report)
            .into_iter()
            .map(|(label, score, weight)| HtmlScoreRow {
                label,
                score,
                weight: format!("{:.1}", weight * 100.0),
            })
            .collect();

        HtmlTemplate {
            include_styles: self.include_styles,
            generated_at: report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            processing_time: report.metadata.processing_time_ms,
            match_percentage: result.match_percentage,
            score_class: score_class.to_string(),
            score_label: band.label().to_string(),
            verdict: report.verdict.clone(),
            insights: report.insights.clone().unwrap_or_default(),
            has_insights: report.insights.is_some(),
            score_rows,
            matched_skills: result.matched_skills.clone(),
            missing_skills: result.missing_skills.clone(),
            matched_keywords: result.matched_keywords.clone(),
            missing_keywords: result.missing_keywords.clone(),
            strengths: result.strengths.clone(),
            weaknesses: result.weaknesses.clone(),
            suggestions: result.suggestions.clone(),
            suggestion_source: report.source_label(),
            version: report.metadata.tool_version.clone(),
            resume_label: display_label(&report.metadata.resume_label),
            job_label: display_label(&report.metadata.job_label),
        }
    }
}

impl OutputFormatter for HtmlFormatter {
    fn format_report(&self, report: &MatchReport) -> Result<String> {
        self.create_template_data(report)
            .render()
            .map_err(|e| ResumeMatchError::OutputFormatting(e.to_string()))
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Html
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(true, false),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter::new(true),
            html_formatter: HtmlFormatter::new(true),
        }
    }

    pub fn with_options(
        use_colors: bool,
        detailed: bool,
        pretty_json: bool,
        include_metadata: bool,
        include_html_styles: bool,
    ) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(include_metadata),
            html_formatter: HtmlFormatter::new(include_html_styles),
        }
    }

    pub fn generate_report(&self, report: &MatchReport, format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
            OutputFormat::Html => self.html_formatter.format_report(report),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    if let Some(parent) = file_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    std::fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: &OutputFormat, resume_name: &str, timestamp: bool) -> String {
    let base_name = Path::new(resume_name)
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .filter(|stem| !stem.is_empty())
        .unwrap_or_else(|| "resume".to_string());

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    let extension = match format {
        OutputFormat::Console => "txt",
        OutputFormat::Json => "json",
        OutputFormat::Markdown => "md",
        OutputFormat::Html => "html",
    };

    format!("{}_match{}.{}", base_name, timestamp_suffix, extension)
}
