//! Python language analyzer using tree-sitter.

use streaming_iterator::StreamingIterator;
use tree_sitter::{Language, Node, Parser, Query, QueryCursor};

use super::docstring;
use crate::analysis::{
    count_lines, AnalysisError, ClassInfo, FileDetails, FunctionInfo, LanguageAnalyzer,
    SourceFacts,
};

/// Tree-sitter query for the structural nodes we record.
///
/// Captures:
/// - `function`: every function definition, at any depth (methods and
///   nested functions included)
/// - `class`: every class definition
/// - `import`: plain, `from` and `__future__` imports
const STRUCTURE_QUERY: &str = r#"
(function_definition) @function
(class_definition) @class
(import_statement) @import
(import_from_statement) @import
(future_import_statement) @import
"#;

pub struct PythonAnalyzer {
    language: Language,
}

impl PythonAnalyzer {
    pub fn new() -> Self {
        Self {
            language: tree_sitter_python::LANGUAGE.into(),
        }
    }

    fn create_parser(&self) -> Result<Parser, AnalysisError> {
        let mut parser = Parser::new();
        parser.set_language(&self.language)?;
        Ok(parser)
    }

    fn extract_details(&self, root: Node, source: &[u8]) -> Result<FileDetails, AnalysisError> {
        let query = Query::new(&self.language, STRUCTURE_QUERY)?;
        let mut cursor = QueryCursor::new();
        let mut matches = cursor.matches(&query, root, source);

        let mut functions = Vec::new();
        let mut classes = Vec::new();
        let mut imports = Vec::new();

        while let Some(m) = matches.next() {
            for capture in m.captures {
                let node = capture.node;
                match query.capture_names()[capture.index as usize] {
                    "function" => {
                        if let Some(info) = function_info(node, source) {
                            functions.push((node.start_byte(), info));
                        }
                    }
                    "class" => {
                        if let Some(info) = class_info(node, source) {
                            classes.push((node.start_byte(), info));
                        }
                    }
                    "import" => {
                        imports.extend(
                            imported_names(node, source)
                                .into_iter()
                                .map(|name| (node.start_byte(), name)),
                        );
                    }
                    _ => {}
                }
            }
        }

        // Stable sorts keep the per-statement order of imported names.
        functions.sort_by_key(|(start, _)| *start);
        classes.sort_by_key(|(start, _)| *start);
        imports.sort_by_key(|(start, _)| *start);

        Ok(FileDetails::Parsed {
            functions: functions.into_iter().map(|(_, f)| f).collect(),
            classes: classes.into_iter().map(|(_, c)| c).collect(),
            imports: imports.into_iter().map(|(_, i)| i).collect(),
            syntax_error: None,
        })
    }
}

impl Default for PythonAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageAnalyzer for PythonAnalyzer {
    fn language_id(&self) -> &'static str {
        "python"
    }

    fn file_extensions(&self) -> &'static [&'static str] {
        &["py"]
    }

    fn extract_facts(&self, source: &[u8]) -> Result<SourceFacts, AnalysisError> {
        let text = std::str::from_utf8(source)?;
        let line_count = count_lines(text);
        let code = text.strip_prefix('\u{feff}').unwrap_or(text);

        let mut parser = self.create_parser()?;
        let tree = parser
            .parse(code, None)
            .ok_or(AnalysisError::ParseAborted)?;
        let root = tree.root_node();

        if let Some(message) = syntax_error_message(root) {
            return Ok(SourceFacts {
                line_count,
                details: FileDetails::Parsed {
                    functions: Vec::new(),
                    classes: Vec::new(),
                    imports: Vec::new(),
                    syntax_error: Some(message),
                },
            });
        }

        Ok(SourceFacts {
            line_count,
            details: self.extract_details(root, code.as_bytes())?,
        })
    }
}

fn node_text<'a>(node: Node, source: &'a [u8]) -> &'a str {
    node.utf8_text(source).unwrap_or("")
}

fn function_info(node: Node, source: &[u8]) -> Option<FunctionInfo> {
    let name = node.child_by_field_name("name")?;
    let args = node
        .child_by_field_name("parameters")
        .map(|params| positional_args(params, source))
        .unwrap_or_default();
    let is_async = node.child(0).is_some_and(|first| first.kind() == "async");

    Some(FunctionInfo {
        name: node_text(name, source).to_string(),
        line: node.start_position().row + 1,
        args,
        docstring: docstring_of(node, source),
        is_async,
    })
}

fn class_info(node: Node, source: &[u8]) -> Option<ClassInfo> {
    let name = node.child_by_field_name("name")?;
    let methods = node
        .child_by_field_name("body")
        .map(|body| method_names(body, source))
        .unwrap_or_default();

    Some(ClassInfo {
        name: node_text(name, source).to_string(),
        line: node.start_position().row + 1,
        docstring: docstring_of(node, source),
        methods,
    })
}

/// Names of the parameters that can be passed by position, in order.
///
/// Collection stops at the first `*`, `*args` or `**kwargs`; a `/` separator
/// is skipped so positional-only parameters are kept.
fn positional_args(params: Node, source: &[u8]) -> Vec<String> {
    let mut args = Vec::new();
    let mut cursor = params.walk();

    for param in params.named_children(&mut cursor) {
        let name = match param.kind() {
            "identifier" => Some(param),
            "default_parameter" | "typed_default_parameter" => param.child_by_field_name("name"),
            // `*args: int` is also a typed_parameter
            "typed_parameter" => match param.named_child(0) {
                Some(inner) if inner.kind() == "identifier" => Some(inner),
                _ => break,
            },
            "positional_separator" | "comment" => continue,
            _ => break,
        };

        if let Some(name) = name.filter(|n| n.kind() == "identifier") {
            args.push(node_text(name, source).to_string());
        }
    }

    args
}

fn method_names(body: Node, source: &[u8]) -> Vec<String> {
    let mut cursor = body.walk();
    body.named_children(&mut cursor)
        .filter_map(|child| match child.kind() {
            "function_definition" => Some(child),
            "decorated_definition" => child
                .child_by_field_name("definition")
                .filter(|def| def.kind() == "function_definition"),
            _ => None,
        })
        .filter_map(|def| def.child_by_field_name("name"))
        .map(|name| node_text(name, source).to_string())
        .collect()
}

/// The cleaned docstring of a function or class definition.
fn docstring_of(def: Node, source: &[u8]) -> Option<String> {
    let body = def.child_by_field_name("body")?;
    let mut cursor = body.walk();
    let first = body
        .named_children(&mut cursor)
        .find(|n| n.kind() != "comment")?;

    if first.kind() != "expression_statement" || first.named_child_count() != 1 {
        return None;
    }
    let expr = first.named_child(0)?;
    let value = match expr.kind() {
        "string" => docstring::literal_value(node_text(expr, source))?,
        // "a" "b" is one literal; any f-string or bytes part disqualifies it
        "concatenated_string" => {
            let mut cursor = expr.walk();
            let parts = expr
                .named_children(&mut cursor)
                .filter(|part| part.kind() == "string")
                .map(|part| docstring::literal_value(node_text(part, source)))
                .collect::<Option<Vec<_>>>()?;
            parts.concat()
        }
        _ => return None,
    };

    let cleaned = docstring::clean(&value);
    (!cleaned.is_empty()).then_some(cleaned)
}

/// Imported symbol names of one import statement.
fn imported_names(node: Node, source: &[u8]) -> Vec<String> {
    let mut names = Vec::new();

    let mut cursor = node.walk();
    for name in node.children_by_field_name("name", &mut cursor) {
        let target = if name.kind() == "aliased_import" {
            name.child_by_field_name("name")
        } else {
            Some(name)
        };
        if let Some(target) = target {
            names.push(node_text(target, source).split_whitespace().collect());
        }
    }

    let mut cursor = node.walk();
    if node
        .named_children(&mut cursor)
        .any(|child| child.kind() == "wildcard_import")
    {
        names.push("*".to_string());
    }

    names
}

/// Statement forms the grammar still accepts but Python 3 rejects.
const LEGACY_STATEMENTS: &[&str] = &["print_statement", "exec_statement"];

/// Describe the first syntax error in the tree, if any.
fn syntax_error_message(root: Node) -> Option<String> {
    if !root.has_error() {
        let legacy = first_legacy_statement(root)?;
        let pos = legacy.start_position();
        return Some(format!(
            "invalid syntax at line {}, column {}",
            pos.row + 1,
            pos.column + 1
        ));
    }

    let message = match first_error_node(root) {
        Some(node) => {
            let pos = node.start_position();
            if node.is_missing() {
                format!(
                    "missing '{}' at line {}, column {}",
                    node.kind(),
                    pos.row + 1,
                    pos.column + 1
                )
            } else {
                format!("invalid syntax at line {}, column {}", pos.row + 1, pos.column + 1)
            }
        }
        None => "invalid syntax".to_string(),
    };

    Some(message)
}

fn first_legacy_statement(node: Node) -> Option<Node> {
    if LEGACY_STATEMENTS.contains(&node.kind()) {
        return Some(node);
    }

    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        if let Some(found) = first_legacy_statement(child) {
            return Some(found);
        }
    }
    None
}

fn first_error_node(node: Node) -> Option<Node> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if let Some(found) = first_error_node(child) {
            return Some(found);
        }
    }
    None
}
