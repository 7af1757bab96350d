//! Record structures produced by file analysis.

use std::fmt;
use std::path::Path;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// A function or method definition found in a parsed file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionInfo {
    /// The function name.
    pub name: String,
    /// Line of the `def` keyword (1-indexed).
    pub line: usize,
    /// Positional parameter names, in declaration order.
    pub args: Vec<String>,
    /// Cleaned docstring, if the body starts with one.
    pub docstring: Option<String>,
    /// Whether this is an `async def`.
    #[serde(default)]
    pub is_async: bool,
}

/// A class definition found in a parsed file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassInfo {
    /// The class name.
    pub name: String,
    /// Line of the `class` keyword (1-indexed).
    pub line: usize,
    /// Cleaned docstring, if the body starts with one.
    pub docstring: Option<String>,
    /// Names of functions defined directly in the class body.
    pub methods: Vec<String>,
}

/// A line flagged by keyword heuristics in a non-parsed file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectedPattern {
    /// Line number (1-indexed).
    pub line: usize,
    /// The line with surrounding whitespace removed.
    pub content: String,
}

/// Structural facts, depending on how the file was analyzed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum FileDetails {
    /// Facts from a real syntax tree.
    Parsed {
        functions: Vec<FunctionInfo>,
        classes: Vec<ClassInfo>,
        imports: Vec<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        syntax_error: Option<String>,
    },
    /// Facts from line-by-line keyword matching.
    Heuristic {
        detected_patterns: Vec<DetectedPattern>,
    },
}

/// What a language analyzer extracts from source bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFacts {
    /// Number of `\n`-separated segments in the decoded text.
    pub line_count: usize,
    pub details: FileDetails,
}

/// The record for one successfully analyzed file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileRecord {
    pub path: String,
    pub name: String,
    pub line_count: usize,
    pub byte_size: usize,
    pub analyzed_at: DateTime<Local>,
    #[serde(flatten)]
    pub details: FileDetails,
}

impl FileRecord {
    /// Functions found in the file (empty for heuristic records).
    pub fn functions(&self) -> &[FunctionInfo] {
        match &self.details {
            FileDetails::Parsed { functions, .. } => functions,
            FileDetails::Heuristic { .. } => &[],
        }
    }

    /// Classes found in the file (empty for heuristic records).
    pub fn classes(&self) -> &[ClassInfo] {
        match &self.details {
            FileDetails::Parsed { classes, .. } => classes,
            FileDetails::Heuristic { .. } => &[],
        }
    }

    /// Imported names (empty for heuristic records).
    pub fn imports(&self) -> &[String] {
        match &self.details {
            FileDetails::Parsed { imports, .. } => imports,
            FileDetails::Heuristic { .. } => &[],
        }
    }

    /// Parser message when the file did not parse cleanly.
    pub fn syntax_error(&self) -> Option<&str> {
        match &self.details {
            FileDetails::Parsed { syntax_error, .. } => syntax_error.as_deref(),
            FileDetails::Heuristic { .. } => None,
        }
    }

    /// Lines flagged by keyword heuristics (empty for parsed records).
    pub fn detected_patterns(&self) -> &[DetectedPattern] {
        match &self.details {
            FileDetails::Heuristic { detected_patterns } => detected_patterns,
            FileDetails::Parsed { .. } => &[],
        }
    }
}

/// A file that could not be read or decoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedFile {
    pub path: String,
    pub error: String,
}

/// The result of analyzing one discovered file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum FileOutcome {
    Analyzed(FileRecord),
    Failed(FailedFile),
}

impl FileOutcome {
    /// The path of the file this outcome describes.
    pub fn path(&self) -> &str {
        match self {
            FileOutcome::Analyzed(record) => &record.path,
            FileOutcome::Failed(failed) => &failed.path,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, FileOutcome::Failed(_))
    }

    pub fn as_record(&self) -> Option<&FileRecord> {
        match self {
            FileOutcome::Analyzed(record) => Some(record),
            FileOutcome::Failed(_) => None,
        }
    }

    /// File extension with its leading dot, e.g. `.py`.
    pub fn extension(&self) -> Option<String> {
        Path::new(self.path())
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
    }
}

impl fmt::Display for FileOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileOutcome::Analyzed(record) => write!(f, "{} ({} lines)", record.path, record.line_count),
            FileOutcome::Failed(failed) => write!(f, "{}: {}", failed.path, failed.error),
        }
    }
}

/// Count lines the way a plain `split('\n')` does: an empty text is one line
/// and a trailing newline adds a final empty line.
pub fn count_lines(text: &str) -> usize {
    text.split('\n').count()
}
