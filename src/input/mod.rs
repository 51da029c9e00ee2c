//! Input processing module
//! Handles file detection and job description text loading

pub mod file_detector;
pub mod text_extractor;
pub mod loader;

pub use loader::{load_jd, load_jd_file, JdSource};
