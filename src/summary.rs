//! Project-wide aggregation of per-file outcomes.

use std::collections::BTreeMap;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::analysis::FileOutcome;

/// Counts derived from all outcomes of one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSummary {
    pub total_files_analyzed: usize,
    pub total_files_failed: usize,
    pub total_lines_of_code: usize,
    pub total_functions: usize,
    pub total_classes: usize,
    /// Analyzed file count per extension (with leading dot).
    pub language_distribution: BTreeMap<String, usize>,
    pub analysis_completed_at: DateTime<Local>,
    pub tool_version: String,
}

impl ProjectSummary {
    /// Reduce outcomes into a summary. Failed outcomes only count toward
    /// `total_files_failed`.
    pub fn from_outcomes(outcomes: &[FileOutcome]) -> Self {
        let mut summary = ProjectSummary {
            total_files_analyzed: 0,
            total_files_failed: 0,
            total_lines_of_code: 0,
            total_functions: 0,
            total_classes: 0,
            language_distribution: BTreeMap::new(),
            analysis_completed_at: Local::now(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
        };

        for outcome in outcomes {
            let record = match outcome.as_record() {
                Some(record) => record,
                None => {
                    summary.total_files_failed += 1;
                    continue;
                }
            };

            summary.total_files_analyzed += 1;
            summary.total_lines_of_code += record.line_count;
            summary.total_functions += record.functions().len();
            summary.total_classes += record.classes().len();

            if let Some(ext) = outcome.extension() {
                *summary.language_distribution.entry(ext).or_insert(0) += 1;
            }
        }

        summary
    }

    /// Number of files that went into this summary.
    pub fn total_files(&self) -> usize {
        self.total_files_analyzed + self.total_files_failed
    }
}

/// The aggregate plus the unchanged per-file list; this is what gets
/// rendered and dumped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectAnalysis {
    pub summary: ProjectSummary,
    pub files: Vec<FileOutcome>,
}

impl ProjectAnalysis {
    pub fn new(files: Vec<FileOutcome>) -> Self {
        Self {
            summary: ProjectSummary::from_outcomes(&files),
            files,
        }
    }

    /// Outcomes that could not be analyzed.
    pub fn failures(&self) -> impl Iterator<Item = &FileOutcome> {
        self.files.iter().filter(|f| f.is_failed())
    }

    pub fn has_failures(&self) -> bool {
        self.summary.total_files_failed > 0
    }
}
