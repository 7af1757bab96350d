//! Run configuration.

use std::path::{Path, PathBuf};

/// Extensions scanned by default (with leading dot).
pub const DEFAULT_EXTENSIONS: &[&str] = &[".py", ".js", ".java", ".cpp", ".c", ".html", ".css", ".ts"];

/// Default Markdown report file name.
pub const DEFAULT_REPORT_NAME: &str = "CODEBASE_DOCUMENTATION.md";

/// Default JSON dump file name.
pub const DEFAULT_JSON_NAME: &str = "codebase_analysis.json";

/// Default prefix for progress lines.
pub const DEFAULT_LABEL: &str = "codebase-genius";

/// Everything a run needs to know, passed explicitly to each component.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Directory to scan.
    pub root: PathBuf,
    /// Allowed file extensions, each with its leading dot.
    pub extensions: Vec<String>,
    /// Whether to descend into subdirectories.
    pub recursive: bool,
    /// Directory the report and JSON dump are written to.
    pub output_dir: PathBuf,
    pub report_name: String,
    pub json_name: String,
    /// Prefix for progress lines.
    pub label: String,
}

impl ScanConfig {
    /// Configuration for scanning `root` with all defaults.
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            recursive: false,
            output_dir: PathBuf::from("."),
            report_name: DEFAULT_REPORT_NAME.to_string(),
            json_name: DEFAULT_JSON_NAME.to_string(),
            label: DEFAULT_LABEL.to_string(),
        }
    }

    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    pub fn output_dir<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.output_dir = dir.as_ref().to_path_buf();
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn report_path(&self) -> PathBuf {
        self.output_dir.join(&self.report_name)
    }

    pub fn json_path(&self) -> PathBuf {
        self.output_dir.join(&self.json_name)
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self::new(".")
    }
}
