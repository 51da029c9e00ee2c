//! Loads job description text from files, stdin or inline arguments

use crate::error::{Result, ReadinessError};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{MarkdownExtractor, PdfExtractor, PlainTextExtractor, TextExtractor};
use log::info;
use std::io::Read;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JdSource {
    Inline(String),
    File(PathBuf),
    Stdin,
}

impl JdSource {
    /// `-` selects stdin, anything else is a file path.
    pub fn from_arg(arg: &str) -> Self {
        if arg == "-" {
            JdSource::Stdin
        } else {
            JdSource::File(PathBuf::from(arg))
        }
    }
}

pub fn load_jd(source: &JdSource) -> Result<String> {
    match source {
        JdSource::Inline(text) => Ok(text.clone()),
        JdSource::File(path) => load_jd_file(path),
        JdSource::Stdin => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

pub fn load_jd_file(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(ReadinessError::InvalidInput(format!(
            "File does not exist: {}",
            path.display()
        )));
    }

    let text = match FileType::from_path(path) {
        FileType::Pdf => {
            info!("Extracting text from PDF: {}", path.display());
            PdfExtractor.extract(path)?
        }
        FileType::Text => {
            info!("Reading plain text file: {}", path.display());
            PlainTextExtractor.extract(path)?
        }
        FileType::Markdown => {
            info!("Processing markdown file: {}", path.display());
            MarkdownExtractor.extract(path)?
        }
        FileType::Unknown => {
            return Err(ReadinessError::UnsupportedFormat(format!(
                "Unsupported file type for: {}",
                path.display()
            )));
        }
    };

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_inline_source_passes_through() {
        let text = load_jd(&JdSource::Inline("React and SQL".to_string())).unwrap();
        assert_eq!(text, "React and SQL");
    }

    #[test]
    fn test_from_arg() {
        assert_eq!(JdSource::from_arg("-"), JdSource::Stdin);
        assert_eq!(JdSource::from_arg("jd.txt"), JdSource::File(PathBuf::from("jd.txt")));
    }

    #[test]
    fn test_unsupported_extension() {
        let mut file = Builder::new().suffix(".docx").tempfile().unwrap();
        writeln!(file, "content").unwrap();
        let result = load_jd_file(file.path());
        assert!(matches!(result, Err(ReadinessError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = load_jd_file(Path::new("/no/such/jd.txt"));
        assert!(matches!(result, Err(ReadinessError::InvalidInput(_))));
    }

    #[test]
    fn test_markdown_file() {
        let mut file = Builder::new().suffix(".md").tempfile().unwrap();
        write!(file, "## Stack\n\n* Kubernetes\n* Jest\n").unwrap();
        assert_eq!(load_jd_file(file.path()).unwrap(), "Stack\n- Kubernetes\n- Jest");
    }
}
