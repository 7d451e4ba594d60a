//! Text extraction from various file formats

use crate::error::{AtsError, Result};
use pulldown_cmark::{Event, Parser, Tag};
use std::path::Path;
use tokio::fs;

pub trait TextExtractor {
    fn extract(&self, path: &Path) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await?;

        let text = pdf_extract::extract_text_from_mem(&bytes).map_err(|e| {
            AtsError::PdfExtraction(format!("Failed to extract text from PDF '{}': {}", path.display(), e))
        })?;
        Ok(normalize_line_endings(&text))
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await?;
        Ok(decode_text(&bytes))
    }
}

pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await?;
        Ok(markdown_to_text(&decode_text(&bytes)))
    }
}

/// Decode bytes as UTF-8, replacing invalid sequences, dropping a leading
/// byte order mark and normalizing line endings to `\n`.
pub fn decode_text(bytes: &[u8]) -> String {
    let decoded = String::from_utf8_lossy(bytes);
    let without_bom = decoded.strip_prefix('\u{feff}').unwrap_or(&decoded);
    normalize_line_endings(without_bom)
}

fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Plain text from markdown. Headings and paragraphs keep their own lines and
/// list items are rendered with a `•` bullet.
pub fn markdown_to_text(markdown: &str) -> String {
    let mut output = String::new();

    for event in Parser::new(markdown) {
        match event {
            Event::Start(Tag::Item) => {
                start_line(&mut output);
                output.push_str("• ");
            }
            Event::Start(Tag::Heading(..)) | Event::Start(Tag::Paragraph) | Event::Start(Tag::CodeBlock(_)) => {
                start_line(&mut output)
            }
            Event::End(Tag::Heading(..)) | Event::End(Tag::Paragraph) | Event::End(Tag::Item) => output.push('\n'),
            Event::Text(text) | Event::Code(text) => output.push_str(&text),
            Event::SoftBreak | Event::HardBreak | Event::Rule => output.push('\n'),
            _ => {}
        }
    }

    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && *line != "•")
        .collect::<Vec<_>>()
        .join("\n")
}

fn start_line(output: &mut String) {
    if !output.is_empty() && !output.ends_with('\n') && !output.ends_with("• ") {
        output.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_structure_survives() {
        let markdown = "# Jane Doe\n\n## Experience\n\n- Led **platform** team\n- Built `ci` pipelines\n\n## Skills\n\nRust, *Python*";
        let text = markdown_to_text(markdown);

        assert_eq!(
            text,
            "Jane Doe\nExperience\n• Led platform team\n• Built ci pipelines\nSkills\nRust, Python"
        );
    }

    #[test]
    fn test_loose_list_items_stay_on_one_line() {
        let text = markdown_to_text("- first item\n\n- second item\n");

        assert_eq!(text, "• first item\n• second item");
    }

    #[test]
    fn test_decode_is_lossy_and_normalized() {
        let bytes = b"\xEF\xBB\xBFSkills\r\nRust\rGo \xFF done";
        let text = decode_text(bytes);

        assert!(text.starts_with("Skills\nRust\nGo "));
        assert!(text.contains('\u{FFFD}'));
        assert!(!text.contains('\r'));
    }
}
