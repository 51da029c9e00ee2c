//! Text extraction from job description files

use crate::error::{Result, ReadinessError};
use pulldown_cmark::{Event, Parser, Tag};
use std::path::Path;

pub trait TextExtractor {
    fn extract(&self, path: &Path) -> Result<String>;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn extract(&self, path: &Path) -> Result<String> {
        let bytes = std::fs::read(path)?;
        pdf_extract::extract_text_from_mem(&bytes).map_err(|e| {
            ReadinessError::PdfExtraction(format!("Failed to extract text from PDF '{}': {}", path.display(), e))
        })
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, path: &Path) -> Result<String> {
        Ok(std::fs::read_to_string(path)?)
    }
}

pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    fn extract(&self, path: &Path) -> Result<String> {
        let content = std::fs::read_to_string(path)?;
        Ok(markdown_to_text(&content))
    }
}

/// Flattens markdown to plain text, one block per line.
pub fn markdown_to_text(markdown: &str) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for event in Parser::new(markdown) {
        match event {
            Event::Text(text) | Event::Code(text) => current.push_str(&text),
            Event::SoftBreak => current.push(' '),
            Event::HardBreak => flush_line(&mut current, &mut lines),
            Event::Start(Tag::Item) => current.push_str("- "),
            Event::Start(Tag::List(_)) => flush_line(&mut current, &mut lines),
            Event::End(Tag::Paragraph | Tag::Heading(..) | Tag::Item | Tag::CodeBlock(_)) => {
                flush_line(&mut current, &mut lines)
            }
            _ => {}
        }
    }
    flush_line(&mut current, &mut lines);

    lines.join("\n")
}

fn flush_line(current: &mut String, lines: &mut Vec<String>) {
    let trimmed = current.trim();
    if !trimmed.is_empty() && trimmed != "-" {
        lines.push(trimmed.to_string());
    }
    current.clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_flattening() {
        let md = "# Backend Engineer\n\nWe use **Java** and `Redis`.\n\n- AWS\n- Docker\n";
        let text = markdown_to_text(md);
        assert_eq!(text, "Backend Engineer\nWe use Java and Redis.\n- AWS\n- Docker");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = PlainTextExtractor.extract(Path::new("/definitely/not/here.txt"));
        assert!(matches!(result, Err(ReadinessError::Io(_))));
    }
}
