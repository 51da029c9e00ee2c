//! Output rendering: console, JSON and plain-text export

pub mod formatter;
pub mod export;

pub use export::{export_file_name, render_export, write_export};
pub use formatter::{AnalysisReport, ConsoleFormatter, JsonFormatter, OutputFormatter};
