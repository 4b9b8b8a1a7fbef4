//! Guard-site detection over a Go syntax tree.
//!
//! Two statement shapes produce sites:
//!
//! - an expression statement that is exactly a call to a guarded primitive,
//!   e.g. `Syscall(SYS_SYNC, 0, 0, 0)`;
//! - a `:=` declaration or `=`/`op=` assignment whose right-hand side lists a
//!   call to a guarded primitive, e.g. `r1, _, err := Syscall(...)`. Each
//!   matching right-hand element yields its own site.
//!
//! The walk is depth-first and pre-order, so sites come out in ascending
//! source order, which [`crate::inject_guards`] relies on.

use std::ops::Range;

use tree_sitter::Node;

use crate::guard::guarded_primitive;
use crate::parser::{ParsedSource, point_to_one_based};

/// A statement that must be preceded by a guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuardSite<'tree> {
    line: u32,
    column: u32,
    call: Node<'tree>,
    primitive: &'static str,
}

impl<'tree> GuardSite<'tree> {
    fn new(statement: Node<'tree>, call: Node<'tree>, primitive: &'static str) -> Self {
        let (line, column) = point_to_one_based(statement.start_position());
        Self {
            line,
            column,
            call,
            primitive,
        }
    }

    /// One-based line of the statement in the original content.
    #[must_use]
    pub const fn line(&self) -> u32 {
        self.line
    }

    /// One-based column of the statement in the original content.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// The matched call expression.
    #[must_use]
    pub const fn call(&self) -> Node<'tree> {
        self.call
    }

    /// Byte range of the matched call in the original content.
    #[must_use]
    pub fn call_range(&self) -> Range<usize> {
        self.call.byte_range()
    }

    /// Name of the guarded primitive being called.
    #[must_use]
    pub const fn primitive(&self) -> &'static str {
        self.primitive
    }
}

/// Finds every guard site in `parsed`, in ascending source order.
#[must_use]
pub fn detect_guard_sites(parsed: &ParsedSource) -> Vec<GuardSite<'_>> {
    let mut sites = Vec::new();
    collect_sites(parsed.root_node(), parsed, &mut sites);
    sites
}

fn collect_sites<'tree>(
    node: Node<'tree>,
    parsed: &'tree ParsedSource,
    sites: &mut Vec<GuardSite<'tree>>,
) {
    match node.kind() {
        "expression_statement" => sites.extend(bare_call_site(node, parsed)),
        "short_var_declaration" | "assignment_statement" => {
            assigned_call_sites(node, parsed, sites);
        }
        _ => {}
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_sites(child, parsed, sites);
    }
}

fn bare_call_site<'tree>(
    statement: Node<'tree>,
    parsed: &'tree ParsedSource,
) -> Option<GuardSite<'tree>> {
    let mut cursor = statement.walk();
    let mut expressions = statement
        .named_children(&mut cursor)
        .filter(|child| !child.is_extra());
    let expression = expressions.next()?;
    if expressions.next().is_some() {
        return None;
    }
    let primitive = matching_primitive(expression, parsed)?;
    Some(GuardSite::new(statement, expression, primitive))
}

fn assigned_call_sites<'tree>(
    statement: Node<'tree>,
    parsed: &'tree ParsedSource,
    sites: &mut Vec<GuardSite<'tree>>,
) {
    let Some(right) = statement.child_by_field_name("right") else {
        return;
    };
    let mut cursor = right.walk();
    for expression in right.named_children(&mut cursor) {
        if let Some(primitive) = matching_primitive(expression, parsed) {
            sites.push(GuardSite::new(statement, expression, primitive));
        }
    }
}

/// Returns the primitive `call` invokes, if it is a direct call to one.
fn matching_primitive(call: Node<'_>, parsed: &ParsedSource) -> Option<&'static str> {
    if call.kind() != "call_expression" {
        return None;
    }
    let callee = call.child_by_field_name("function")?;
    if callee.kind() != "identifier" {
        return None;
    }
    guarded_primitive(parsed.node_text(callee))
}
