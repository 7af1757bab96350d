//! Analysis context: analyzer selection and per-file failure isolation.

use std::fs;
use std::path::Path;

use chrono::Local;
use tracing::{debug, warn};

use crate::analysis::{
    AnalysisError, FailedFile, FileOutcome, FileRecord, GenericAnalyzer, LanguageAnalyzer,
    PythonAnalyzer,
};

/// Holds the analyzers and turns paths into [`FileOutcome`]s.
///
/// Files are read one at a time and fully released before the next one.
#[derive(Default)]
pub struct AnalysisContext {
    python: PythonAnalyzer,
    generic: GenericAnalyzer,
}

impl AnalysisContext {
    /// Create a new analysis context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pick the analyzer for a path based on its extension.
    pub fn analyzer_for(&self, path: &Path) -> &dyn LanguageAnalyzer {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        if self.python.handles_extension(ext) {
            &self.python
        } else {
            &self.generic
        }
    }

    /// Analyze one file.
    ///
    /// Read and decode failures are folded into `FileOutcome::Failed`. Only
    /// analyzer breakage (grammar or query setup) is returned as `Err`.
    pub fn analyze_file(&self, path: &Path) -> Result<FileOutcome, AnalysisError> {
        let path_str = path.to_string_lossy().to_string();
        let analyzer = self.analyzer_for(path);

        let result = fs::read(path)
            .map_err(AnalysisError::from)
            .and_then(|source| {
                let facts = analyzer.extract_facts(&source)?;
                Ok((source.len(), facts))
            });

        match result {
            Ok((byte_size, facts)) => {
                debug!(
                    path = %path_str,
                    analyzer = analyzer.language_id(),
                    lines = facts.line_count,
                    "analyzed file"
                );
                Ok(FileOutcome::Analyzed(FileRecord {
                    name: path
                        .file_name()
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_else(|| path_str.clone()),
                    path: path_str,
                    line_count: facts.line_count,
                    byte_size,
                    analyzed_at: Local::now(),
                    details: facts.details,
                }))
            }
            Err(e) if e.is_recoverable() => {
                warn!(path = %path_str, error = %e, "file analysis failed");
                Ok(FileOutcome::Failed(FailedFile {
                    path: path_str,
                    error: e.to_string(),
                }))
            }
            Err(e) => Err(e),
        }
    }
}
