//! Per-file structural analysis.
//!
//! Every discovered file is turned into exactly one [`FileOutcome`]:
//!
//! ```text
//! ┌─────────────┐     ┌──────────────────┐     ┌──────────────────────┐
//! │ File bytes  │────▶│ LanguageAnalyzer │────▶│ FileOutcome          │
//! └─────────────┘     │ (Python, generic)│     │ Analyzed(FileRecord) │
//!                     └──────────────────┘     │ Failed(FailedFile)   │
//!                                              └──────────────────────┘
//! ```
//!
//! Python files get a real tree-sitter parse. Everything else goes through
//! the keyword heuristics of [`GenericAnalyzer`].

mod context;
mod facts;
mod languages;
mod traits;

pub use context::AnalysisContext;
pub use facts::{
    count_lines, ClassInfo, DetectedPattern, FailedFile, FileDetails, FileOutcome, FileRecord,
    FunctionInfo, SourceFacts,
};
pub use languages::{GenericAnalyzer, PythonAnalyzer};
pub use traits::LanguageAnalyzer;

use thiserror::Error;

/// Errors that can occur while analyzing a single file.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("{source}")]
    Read {
        #[from]
        source: std::io::Error,
    },
    #[error("file is not valid UTF-8: {source}")]
    Decode {
        #[from]
        source: std::str::Utf8Error,
    },
    #[error("failed to load grammar: {0}")]
    Language(#[from] tree_sitter::LanguageError),
    #[error("invalid structure query: {0}")]
    Query(#[from] tree_sitter::QueryError),
    #[error("parser produced no tree")]
    ParseAborted,
}

impl AnalysisError {
    /// Whether the failure belongs to the file rather than to the analyzer.
    ///
    /// Recoverable errors become a [`FailedFile`]; the rest abort the run.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, AnalysisError::Read { .. } | AnalysisError::Decode { .. })
    }
}
