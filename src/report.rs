//! Output formatting for analysis results.
//!
//! Supports two output formats:
//! - Markdown: human-readable project documentation
//! - JSON: the full aggregate and every per-file record, untruncated

use crate::analysis::{ClassInfo, FileOutcome, FileRecord, FunctionInfo};
use crate::summary::ProjectAnalysis;

/// How many imports are listed per file in the Markdown report.
pub const MAX_RENDERED_IMPORTS: usize = 10;

// =============================================================================
// Markdown Format
// =============================================================================

/// Render the Markdown report.
///
/// Output depends only on `analysis`, so rendering the same value twice
/// gives identical text. Source text such as docstrings is copied verbatim.
pub fn render_markdown(analysis: &ProjectAnalysis) -> String {
    let mut out = Vec::new();

    write_header(&mut out);
    write_summary(&mut out, analysis);
    write_distribution(&mut out, analysis);
    write_file_details(&mut out, &analysis.files);
    if analysis.has_failures() {
        write_issues(&mut out, &analysis.files);
    }
    write_footer(&mut out);

    out.join("\n")
}

fn write_header(out: &mut Vec<String>) {
    out.push("# Codebase Documentation".to_string());
    out.push(String::new());
    out.push("> Generated automatically by codebase-genius".to_string());
    out.push(String::new());
}

fn write_summary(out: &mut Vec<String>, analysis: &ProjectAnalysis) {
    let s = &analysis.summary;
    out.push("## Project Summary".to_string());
    out.push(String::new());
    out.push(format!("- **Files Analyzed**: {}", s.total_files_analyzed));
    out.push(format!("- **Files Failed**: {}", s.total_files_failed));
    out.push(format!("- **Lines of Code**: {}", s.total_lines_of_code));
    out.push(format!("- **Functions**: {}", s.total_functions));
    out.push(format!("- **Classes**: {}", s.total_classes));
    out.push(format!(
        "- **Analysis Date**: {}",
        s.analysis_completed_at.to_rfc3339()
    ));
    out.push(format!("- **Tool Version**: {}", s.tool_version));
    out.push(String::new());
}

fn write_distribution(out: &mut Vec<String>, analysis: &ProjectAnalysis) {
    out.push("## Language Distribution".to_string());
    out.push(String::new());
    for (ext, count) in &analysis.summary.language_distribution {
        let plural = if *count != 1 { "s" } else { "" };
        out.push(format!("- {}: {} file{}", ext, count, plural));
    }
    out.push(String::new());
}

fn write_file_details(out: &mut Vec<String>, files: &[FileOutcome]) {
    out.push("## File Details".to_string());
    out.push(String::new());

    for record in files.iter().filter_map(FileOutcome::as_record) {
        write_record(out, record);
    }
}

fn write_record(out: &mut Vec<String>, record: &FileRecord) {
    out.push(format!("### {}", record.name));
    out.push(format!("- **Path**: {}", record.path));
    out.push(format!("- **Lines**: {}", record.line_count));
    out.push(format!("- **Size**: {} bytes", record.byte_size));

    if let Some(error) = record.syntax_error() {
        out.push(format!("- **Syntax Error**: {}", error));
    }

    if !record.functions().is_empty() {
        out.push("- **Functions**:".to_string());
        for func in record.functions() {
            write_function(out, func);
        }
    }

    if !record.classes().is_empty() {
        out.push("- **Classes**:".to_string());
        for class in record.classes() {
            write_class(out, class);
        }
    }

    if !record.imports().is_empty() {
        out.push("- **Imports**:".to_string());
        for import in record.imports().iter().take(MAX_RENDERED_IMPORTS) {
            out.push(format!("  - {}", import));
        }
    }

    out.push(String::new());
}

fn write_function(out: &mut Vec<String>, func: &FunctionInfo) {
    out.push(format!("  - `{}` (line {})", func.name, func.line));
    if let Some(doc) = &func.docstring {
        out.push(format!("    - {}", doc));
    }
}

fn write_class(out: &mut Vec<String>, class: &ClassInfo) {
    out.push(format!("  - `{}` (line {})", class.name, class.line));
    if let Some(doc) = &class.docstring {
        out.push(format!("    - {}", doc));
    }
}

fn write_issues(out: &mut Vec<String>, files: &[FileOutcome]) {
    out.push("## Analysis Issues".to_string());
    out.push(String::new());
    for outcome in files {
        if let FileOutcome::Failed(failed) = outcome {
            out.push(format!("- {}: {}", failed.path, failed.error));
        }
    }
    out.push(String::new());
}

fn write_footer(out: &mut Vec<String>) {
    out.push("---".to_string());
    out.push(format!(
        "Documentation generated by codebase-genius v{}",
        env!("CARGO_PKG_VERSION")
    ));
    out.push(String::new());
}

// =============================================================================
// JSON Format
// =============================================================================

/// Render the full analysis as pretty-printed JSON.
pub fn render_json(analysis: &ProjectAnalysis) -> serde_json::Result<String> {
    serde_json::to_string_pretty(analysis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{FailedFile, FileDetails};
    use chrono::Local;

    fn record(name: &str, details: FileDetails) -> FileOutcome {
        FileOutcome::Analyzed(FileRecord {
            path: format!("./{}", name),
            name: name.to_string(),
            line_count: 12,
            byte_size: 240,
            analyzed_at: Local::now(),
            details,
        })
    }

    fn sample() -> ProjectAnalysis {
        ProjectAnalysis::new(vec![
            record(
                "main.py",
                FileDetails::Parsed {
                    functions: vec![FunctionInfo {
                        name: "foo".to_string(),
                        line: 3,
                        args: vec!["a".to_string(), "b".to_string()],
                        docstring: Some("Adds *things* <b>verbatim</b>.".to_string()),
                        is_async: false,
                    }],
                    classes: vec![ClassInfo {
                        name: "Widget".to_string(),
                        line: 8,
                        docstring: None,
                        methods: vec![],
                    }],
                    imports: (0..15).map(|i| format!("mod{}", i)).collect(),
                    syntax_error: None,
                },
            ),
            record(
                "app.js",
                FileDetails::Heuristic {
                    detected_patterns: vec![],
                },
            ),
        ])
    }

    #[test]
    fn test_section_order() {
        let md = render_markdown(&sample());
        let header = md.find("# Codebase Documentation").unwrap();
        let summary = md.find("## Project Summary").unwrap();
        let dist = md.find("## Language Distribution").unwrap();
        let details = md.find("## File Details").unwrap();
        let footer = md.find("---").unwrap();

        assert!(header < summary && summary < dist && dist < details && details < footer);
        assert!(!md.contains("## Analysis Issues"));
    }

    #[test]
    fn test_record_details() {
        let md = render_markdown(&sample());

        assert!(md.contains("### main.py"));
        assert!(md.contains("- **Path**: ./main.py"));
        assert!(md.contains("- **Lines**: 12"));
        assert!(md.contains("- **Size**: 240 bytes"));
        assert!(md.contains("  - `foo` (line 3)"));
        assert!(md.contains("    - Adds *things* <b>verbatim</b>."));
        assert!(md.contains("  - `Widget` (line 8)"));
        assert!(md.contains("- .py: 1 file"));
        assert!(md.contains("- .js: 1 file"));
    }

    #[test]
    fn test_imports_truncated_in_markdown_only() {
        let analysis = sample();
        let md = render_markdown(&analysis);

        assert!(md.contains("  - mod9"));
        assert!(!md.contains("  - mod10"));
        let listed = md.lines().filter(|l| l.starts_with("  - mod")).count();
        assert_eq!(listed, MAX_RENDERED_IMPORTS);

        let json: serde_json::Value =
            serde_json::from_str(&render_json(&analysis).unwrap()).unwrap();
        assert_eq!(json["files"][0]["imports"].as_array().unwrap().len(), 15);
    }

    #[test]
    fn test_issues_section_lists_failures() {
        let mut files = sample().files;
        files.push(FileOutcome::Failed(FailedFile {
            path: "./secret.py".to_string(),
            error: "Permission denied (os error 13)".to_string(),
        }));
        let md = render_markdown(&ProjectAnalysis::new(files));

        let issues = md.find("## Analysis Issues").unwrap();
        assert!(issues > md.find("## File Details").unwrap());
        assert!(md.contains("- ./secret.py: Permission denied (os error 13)"));
        assert!(!md.contains("### secret.py"));
    }

    #[test]
    fn test_syntax_error_rendered() {
        let analysis = ProjectAnalysis::new(vec![record(
            "bad.py",
            FileDetails::Parsed {
                functions: vec![],
                classes: vec![],
                imports: vec![],
                syntax_error: Some("invalid syntax at line 1, column 11".to_string()),
            },
        )]);
        let md = render_markdown(&analysis);
        assert!(md.contains("- **Syntax Error**: invalid syntax at line 1, column 11"));
        assert!(!md.contains("## Analysis Issues"));
    }

    #[test]
    fn test_rendering_is_idempotent() {
        let analysis = sample();
        assert_eq!(render_markdown(&analysis), render_markdown(&analysis));
        assert_eq!(render_json(&analysis).unwrap(), render_json(&analysis).unwrap());
    }
}
