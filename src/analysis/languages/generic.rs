//! Keyword-heuristic analyzer for files without a real parser.

use crate::analysis::{
    count_lines, AnalysisError, DetectedPattern, FileDetails, LanguageAnalyzer, SourceFacts,
};

/// Substrings that mark a line as a likely function declaration in some
/// common language (JavaScript, Python, Go).
const FUNCTION_KEYWORDS: &[&str] = &["function ", "def ", "func "];

/// Analyzer that flags function-like lines by substring matching.
///
/// Undecodable bytes are replaced rather than rejected, so this analyzer
/// never fails on content.
#[derive(Debug, Default)]
pub struct GenericAnalyzer;

impl GenericAnalyzer {
    pub fn new() -> Self {
        Self
    }

    fn detect_patterns(text: &str) -> Vec<DetectedPattern> {
        text.split('\n')
            .enumerate()
            .filter(|(_, line)| FUNCTION_KEYWORDS.iter().any(|kw| line.contains(kw)))
            .map(|(i, line)| DetectedPattern {
                line: i + 1,
                content: line.trim().to_string(),
            })
            .collect()
    }
}

impl LanguageAnalyzer for GenericAnalyzer {
    fn language_id(&self) -> &'static str {
        "generic"
    }

    fn file_extensions(&self) -> &'static [&'static str] {
        &[]
    }

    fn extract_facts(&self, source: &[u8]) -> Result<SourceFacts, AnalysisError> {
        let text = String::from_utf8_lossy(source);

        Ok(SourceFacts {
            line_count: count_lines(&text),
            details: FileDetails::Heuristic {
                detected_patterns: Self::detect_patterns(&text),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patterns(source: &[u8]) -> Vec<DetectedPattern> {
        let facts = GenericAnalyzer::new().extract_facts(source).unwrap();
        match facts.details {
            FileDetails::Heuristic { detected_patterns } => detected_patterns,
            other => panic!("expected heuristic details, got {:?}", other),
        }
    }

    #[test]
    fn test_detects_keywords_across_languages() {
        let source = b"// app.js\nfunction greet(name) {\n  return name;\n}\nconst x = 1;\n  func main() {}\n";
        let found = patterns(source);

        assert_eq!(found.len(), 2);
        assert_eq!(found[0].line, 2);
        assert_eq!(found[0].content, "function greet(name) {");
        assert_eq!(found[1].line, 6);
        assert_eq!(found[1].content, "func main() {}");
    }

    #[test]
    fn test_keyword_needs_trailing_space() {
        let found = patterns(b"functional()\ndefault: 1\nfuncs\n");
        assert!(found.is_empty());
    }

    #[test]
    fn test_matches_regardless_of_language() {
        // A CSS comment that happens to contain "def " still counts.
        let found = patterns(b"/* def ault styles */\nbody { margin: 0; }\n");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].line, 1);
    }

    #[test]
    fn test_tolerates_invalid_utf8() {
        let facts = GenericAnalyzer::new()
            .extract_facts(b"function ok() {}\n\xff\xfe bad bytes\n")
            .unwrap();
        assert_eq!(facts.line_count, 3);
        match facts.details {
            FileDetails::Heuristic { detected_patterns } => assert_eq!(detected_patterns.len(), 1),
            other => panic!("expected heuristic details, got {:?}", other),
        }
    }

    #[test]
    fn test_handles_any_extension() {
        let analyzer = GenericAnalyzer::new();
        assert!(analyzer.handles_extension("js"));
        assert!(analyzer.handles_extension("css"));
    }
}
