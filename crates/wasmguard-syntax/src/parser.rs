//! Go syntax tree construction on top of Tree-sitter.
//!
//! Tree-sitter recovers from malformed input by inserting ERROR and MISSING
//! nodes. The rewriter must not edit a file it cannot read faithfully, so
//! [`GoParser::parse`] rejects any tree that needed recovery. Comments are
//! kept in the tree as `comment` extras and every node carries byte offsets
//! into the original content.

use std::ops::Range;

use crate::error::SyntaxError;
use crate::language::go_language;

/// Longest error context kept verbatim before it is truncated.
const CONTEXT_LIMIT: usize = 50;

/// A Go source file together with its syntax tree.
///
/// Node positions index into [`ParsedSource::source`], the content exactly as
/// it was handed to the parser.
#[derive(Debug)]
pub struct ParsedSource {
    tree: tree_sitter::Tree,
    source: Vec<u8>,
}

impl ParsedSource {
    /// Returns the parsed syntax tree.
    #[must_use]
    pub const fn tree(&self) -> &tree_sitter::Tree {
        &self.tree
    }

    /// Returns the original content.
    #[must_use]
    pub fn source(&self) -> &[u8] {
        &self.source
    }

    /// Returns the root node of the syntax tree.
    #[must_use]
    pub fn root_node(&self) -> tree_sitter::Node<'_> {
        self.tree.root_node()
    }

    /// Returns the exact original bytes spanned by `node`.
    ///
    /// This is a slice of the content, not a re-rendering of the node, so
    /// spacing and literal spelling survive unchanged.
    #[must_use]
    pub fn node_text(&self, node: tree_sitter::Node<'_>) -> &[u8] {
        self.source.get(node.byte_range()).unwrap_or_default()
    }

    /// Returns whether the tree contains ERROR or MISSING nodes.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.tree.root_node().has_error()
    }

    /// Collects every ERROR and MISSING node in source order.
    #[must_use]
    pub fn errors(&self) -> Vec<SyntaxErrorInfo> {
        let mut errors = Vec::new();
        collect_error_nodes(self.tree.root_node(), &self.source, &mut errors);
        errors
    }
}

/// Information about a syntax error found during parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxErrorInfo {
    /// Byte range of the error in the source.
    pub byte_range: Range<usize>,
    /// Line number (one-based) where the error starts.
    pub line: u32,
    /// Column number (one-based) where the error starts.
    pub column: u32,
    /// A snippet of the problematic source text.
    pub context: String,
    /// Human-readable description of the error.
    pub message: String,
}

impl SyntaxErrorInfo {
    fn from_node(node: tree_sitter::Node<'_>, source: &[u8]) -> Self {
        let byte_range = node.byte_range();
        let snippet = String::from_utf8_lossy(source.get(byte_range.clone()).unwrap_or_default());
        let context = if snippet.chars().count() > CONTEXT_LIMIT {
            let truncated: String = snippet.chars().take(CONTEXT_LIMIT - 3).collect();
            format!("{truncated}...")
        } else {
            snippet.into_owned()
        };

        let message = if node.is_missing() {
            format!("missing {}", node.kind())
        } else {
            "unexpected input".to_owned()
        };

        let (line, column) = point_to_one_based(node.start_position());

        Self {
            byte_range,
            line,
            column,
            context,
            message,
        }
    }
}

impl From<SyntaxErrorInfo> for SyntaxError {
    fn from(info: SyntaxErrorInfo) -> Self {
        Self::parse(info.line, info.column, info.message, info.context)
    }
}

/// Tree-sitter parser configured for Go.
pub struct GoParser {
    inner: tree_sitter::Parser,
}

impl GoParser {
    /// Creates a parser loaded with the Go grammar.
    ///
    /// # Errors
    ///
    /// Returns an error if the grammar is incompatible with the linked
    /// Tree-sitter runtime.
    pub fn new() -> Result<Self, SyntaxError> {
        let mut inner = tree_sitter::Parser::new();
        inner
            .set_language(&go_language())
            .map_err(|e| SyntaxError::parser_init(e.to_string()))?;
        Ok(Self { inner })
    }

    /// Parses `source` without judging its validity.
    ///
    /// The returned tree may contain recovered errors; see
    /// [`ParsedSource::has_errors`].
    ///
    /// # Errors
    ///
    /// Returns [`SyntaxError::NoTree`] if Tree-sitter gives up entirely.
    pub fn parse_tolerant(&mut self, source: &[u8]) -> Result<ParsedSource, SyntaxError> {
        let tree = self.inner.parse(source, None).ok_or(SyntaxError::NoTree)?;
        Ok(ParsedSource {
            tree,
            source: source.to_vec(),
        })
    }

    /// Parses `source` and rejects it unless it is valid Go.
    ///
    /// # Errors
    ///
    /// Returns [`SyntaxError::Parse`] describing the first error node when the
    /// content does not parse cleanly.
    pub fn parse(&mut self, source: &[u8]) -> Result<ParsedSource, SyntaxError> {
        let parsed = self.parse_tolerant(source)?;
        if !parsed.has_errors() {
            return Ok(parsed);
        }
        match parsed.errors().into_iter().next() {
            Some(first) => Err(first.into()),
            // `has_error` can be set on a node whose error child was elided.
            None => Err(SyntaxError::parse(1, 1, "unexpected input", "")),
        }
    }
}

/// Converts a Tree-sitter position (0-based) to one-based line and column.
pub(crate) fn point_to_one_based(pos: tree_sitter::Point) -> (u32, u32) {
    let line = u32::try_from(pos.row.saturating_add(1)).unwrap_or(u32::MAX);
    let column = u32::try_from(pos.column.saturating_add(1)).unwrap_or(u32::MAX);
    (line, column)
}

fn collect_error_nodes(
    node: tree_sitter::Node<'_>,
    source: &[u8],
    errors: &mut Vec<SyntaxErrorInfo>,
) {
    if node.is_error() || node.is_missing() {
        errors.push(SyntaxErrorInfo::from_node(node, source));
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_error_nodes(child, source, errors);
    }
}
