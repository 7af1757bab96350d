//! codebase-genius - automated codebase documentation.
//!
//! Scans a directory for source files, extracts coarse structural facts and
//! writes them out as a Markdown report and a JSON dump.
//!
//! # Architecture
//!
//! Data flows one way, paths → records → aggregate → documents:
//!
//! - `discover`: lists files matching the extension allow-list
//! - `analysis`: per-file records (tree-sitter for Python, keyword
//!   heuristics for everything else)
//! - `summary`: project-wide counts and language histogram
//! - `report`: Markdown and JSON rendering
//! - `runner`: sequences the steps and narrates progress
//! - `config`: the explicit run configuration
//! - `cli`: argument parsing and exit codes

pub mod analysis;
pub mod cli;
pub mod config;
pub mod discover;
pub mod report;
pub mod runner;
pub mod summary;

pub use analysis::{
    AnalysisContext, AnalysisError, ClassInfo, DetectedPattern, FailedFile, FileDetails,
    FileOutcome, FileRecord, FunctionInfo, LanguageAnalyzer,
};
pub use config::ScanConfig;
pub use discover::discover_files;
pub use runner::{Narrator, RunError, RunReport, Runner};
pub use summary::{ProjectAnalysis, ProjectSummary};
