//! JS/TS Source Parsing
//!
//! Thin tree-sitter layer over the two syntactic concerns of the
//! fingerprinting core: dependency sources (`import ... from "x"`
//! declarations and `require("x")` calls with a single string-literal
//! argument) and plain string literals.
//!
//! Re-export-from syntax and dynamic `import()` are deliberately not
//! scanned. Tree-sitter trees are error-tolerant, so binary junk or exotic
//! syntax degrades to "fewer nodes found" instead of a hard failure.

use std::path::Path;
use tree_sitter::{Parser as TsParser, Query, QueryCursor, StreamingIterator, Tree};

/// Grammar selected per file, by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grammar {
    JavaScript,
    TypeScript,
    Tsx,
}

impl Grammar {
    /// Pick a grammar for a file path. Anything that is not clearly
    /// TypeScript is parsed with the JavaScript grammar, which also happens
    /// to be the permissive choice for .json and extensionless files.
    pub fn for_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("ts") | Some("mts") | Some("cts") => Self::TypeScript,
            Some("tsx") => Self::Tsx,
            _ => Self::JavaScript,
        }
    }

    fn language(&self) -> tree_sitter::Language {
        match self {
            Self::JavaScript => tree_sitter_javascript::LANGUAGE.into(),
            Self::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            Self::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
        }
    }
}

/// Parse source text. Returns None only when the parser itself gives up
/// (which tree-sitter essentially never does for text input).
pub fn parse_source(content: &str, grammar: Grammar) -> Option<Tree> {
    let mut parser = TsParser::new();
    parser.set_language(&grammar.language()).ok()?;
    parser.parse(content, None)
}

/// Strip the surrounding quote pair from a string node's text
fn unquote(text: &str) -> &str {
    text.trim_matches(|c| c == '"' || c == '\'')
}

/// Extract dependency source specifiers from one file, in document order.
///
/// Covers exactly two forms: static import declarations and calls whose
/// callee is the bare identifier `require` with a string literal as the
/// first argument.
pub fn import_sources(content: &str, grammar: Grammar) -> Vec<String> {
    let mut sources = Vec::new();
    let Some(tree) = parse_source(content, grammar) else {
        return sources;
    };
    let root = tree.root_node();

    let import_query = r#"
        (import_statement
            source: (string) @source
        )
    "#;
    if let Ok(query) = Query::new(&grammar.language(), import_query) {
        let mut cursor = QueryCursor::new();
        let mut matches = cursor.matches(&query, root, content.as_bytes());
        while let Some(m) = matches.next() {
            for cap in m.captures.iter() {
                let text = cap.node.utf8_text(content.as_bytes()).unwrap_or("");
                let source = unquote(text);
                if !source.is_empty() {
                    sources.push(source.to_string());
                }
            }
        }
    }

    let require_query = r#"
        (call_expression
            function: (identifier) @callee
            arguments: (arguments . (string) @source)
        )
    "#;
    if let Ok(query) = Query::new(&grammar.language(), require_query) {
        let callee_idx = query.capture_index_for_name("callee");
        let source_idx = query.capture_index_for_name("source");
        let mut cursor = QueryCursor::new();
        let mut matches = cursor.matches(&query, root, content.as_bytes());
        while let Some(m) = matches.next() {
            let mut callee = "";
            let mut source = "";
            for cap in m.captures.iter() {
                let text = cap.node.utf8_text(content.as_bytes()).unwrap_or("");
                if Some(cap.index) == callee_idx {
                    callee = text;
                } else if Some(cap.index) == source_idx {
                    source = text;
                }
            }
            let source = unquote(source);
            if callee == "require" && !source.is_empty() {
                sources.push(source.to_string());
            }
        }
    }

    sources
}

/// Extract the values of all string-literal nodes, in document order.
/// Template literals are excluded; their interpolations make them
/// unreliable fingerprints.
pub fn string_literals(content: &str, grammar: Grammar) -> Vec<String> {
    let mut literals = Vec::new();
    let Some(tree) = parse_source(content, grammar) else {
        return literals;
    };

    if let Ok(query) = Query::new(&grammar.language(), "(string) @s") {
        let mut cursor = QueryCursor::new();
        let mut matches = cursor.matches(&query, tree.root_node(), content.as_bytes());
        while let Some(m) = matches.next() {
            for cap in m.captures.iter() {
                let text = cap.node.utf8_text(content.as_bytes()).unwrap_or("");
                literals.push(unquote(text).to_string());
            }
        }
    }

    literals
}

// =============================================================================
// Tests
// =============================================================================
