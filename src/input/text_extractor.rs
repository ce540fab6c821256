//! Text extraction from plain-text formats

use crate::error::Result;
use pulldown_cmark::{Event, Parser, Tag};
use std::path::Path;
use tokio::fs;

pub trait TextExtractor {
    fn extract(&self, path: &Path) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        Ok(fs::read_to_string(path).await?)
    }
}

/// Reads markdown and keeps only the words: text and inline code spans, one
/// line per block. Emphasis, link targets and list markers are dropped.
pub struct MarkdownExtractor;

impl MarkdownExtractor {
    pub fn strip_markup(&self, markdown: &str) -> String {
        let mut text = String::new();

        for event in Parser::new(markdown) {
            match event {
                Event::Text(content) | Event::Code(content) => text.push_str(&content),
                Event::SoftBreak | Event::HardBreak => text.push('\n'),
                Event::End(
                    Tag::Paragraph
                    | Tag::Heading(..)
                    | Tag::Item
                    | Tag::BlockQuote
                    | Tag::CodeBlock(_),
                ) => text.push('\n'),
                _ => {}
            }
        }

        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl TextExtractor for MarkdownExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let markdown_content = fs::read_to_string(path).await?;
        Ok(self.strip_markup(&markdown_content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_markup() {
        let markdown = "# Jane Doe\n\n## Skills\n- **Python**, `Docker`\n- See [my site](https://example.com)\n\n1. Led the *platform* team\n";

        let text = MarkdownExtractor.strip_markup(markdown);

        assert_eq!(
            text,
            "Jane Doe\nSkills\nPython, Docker\nSee my site\nLed the platform team"
        );
    }

    #[test]
    fn test_plain_prose_untouched() {
        let text = MarkdownExtractor.strip_markup("Built c++ tools and ci/cd pipelines.");
        assert_eq!(text, "Built c++ tools and ci/cd pipelines.");
    }

    #[test]
    fn test_underscore_emphasis_removed() {
        let markdown = "- _Kubernetes_ operators\n- __Kubernetes__ upgrades\n- Strong _Terraform_ and _Terraform_ modules\n";

        let text = MarkdownExtractor.strip_markup(markdown);

        assert_eq!(
            text,
            "Kubernetes operators\nKubernetes upgrades\nStrong Terraform and Terraform modules"
        );
        assert!(!text.contains('_'));
    }
}
