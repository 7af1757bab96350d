//! Core traits for language analysis.

use super::{AnalysisError, SourceFacts};

/// Language-specific analyzer trait.
///
/// Each analyzer turns the raw bytes of one file into [`SourceFacts`].
/// Reading the file and stamping path/size metadata is the caller's job,
/// so implementations never touch the filesystem.
pub trait LanguageAnalyzer {
    /// Returns the analyzer identifier (e.g., "python", "generic").
    fn language_id(&self) -> &'static str;

    /// Returns file extensions this analyzer handles (without dot).
    ///
    /// An empty slice means the analyzer accepts any extension.
    fn file_extensions(&self) -> &'static [&'static str];

    /// Extract facts from source bytes.
    ///
    /// Syntax errors are reported inside the returned facts. An `Err` means
    /// the bytes could not be decoded or the analyzer itself is broken.
    fn extract_facts(&self, source: &[u8]) -> Result<SourceFacts, AnalysisError>;

    /// Check if this analyzer handles the given file extension.
    fn handles_extension(&self, ext: &str) -> bool {
        let exts = self.file_extensions();
        exts.is_empty() || exts.contains(&ext)
    }
}
