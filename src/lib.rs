//! Placement readiness library

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod processing;
pub mod schema;
pub mod storage;

pub use config::Config;
pub use error::{ReadinessError, Result};
pub use processing::{analyze_jd, AnalysisRequest, Analyzer};
pub use schema::AnalysisEntry;
pub use storage::{FileStore, HistoryStore, KeyValueStore, MemoryStore, TestChecklist};
