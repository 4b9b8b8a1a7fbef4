//! The per-file guard pipeline: parse, detect, inject, canonicalise.
//!
//! Everything here is in memory. Callers decide whether and where to write
//! the result, which keeps a file either untouched or fully replaced.

use crate::canonicalizer::{Canonicalizer, Rendered, render};
use crate::detector::detect_guard_sites;
use crate::error::{FormatError, SyntaxError};
use crate::injector::inject_guards;
use crate::parser::GoParser;

/// Result of running the pipeline over one source.
#[derive(Debug)]
pub enum GuardedSource {
    /// Nothing to insert; the input must be left byte-for-byte as it is.
    Unchanged {
        /// Sites found; all of them already guarded.
        sites: usize,
    },
    /// At least one guard was inserted.
    Rewritten(Rewrite),
}

impl GuardedSource {
    /// Returns whether the pipeline produced new content.
    #[must_use]
    pub const fn has_changes(&self) -> bool {
        matches!(self, Self::Rewritten(_))
    }
}

/// New content for a source with freshly inserted guards.
#[derive(Debug)]
pub struct Rewrite {
    rendered: Rendered,
    sites: usize,
    insertions: usize,
}

impl Rewrite {
    /// Returns the bytes to write.
    #[must_use]
    pub fn output(&self) -> &[u8] {
        self.rendered.bytes()
    }

    /// Consumes the rewrite and returns the bytes to write.
    #[must_use]
    pub fn into_output(self) -> Vec<u8> {
        self.rendered.into_bytes()
    }

    /// Number of guard sites detected.
    #[must_use]
    pub const fn sites(&self) -> usize {
        self.sites
    }

    /// Number of guards inserted.
    #[must_use]
    pub const fn insertions(&self) -> usize {
        self.insertions
    }

    /// Returns why formatting was skipped, if it was.
    #[must_use]
    pub const fn format_error(&self) -> Option<&FormatError> {
        self.rendered.format_error()
    }
}

/// Guards every guarded-primitive call in `source`.
///
/// # Errors
///
/// Returns a [`SyntaxError`] when `source` is not valid Go. Formatting
/// failures are not errors; see [`Rewrite::format_error`].
///
/// # Examples
///
/// ```
/// use wasmguard_syntax::{GuardedSource, Verbatim, guard_source};
///
/// let source = b"package unix\n\nfunc sync() {\n\tSyscall(SYS_SYNC, 0, 0, 0)\n}\n";
/// let GuardedSource::Rewritten(rewrite) = guard_source(source, &Verbatim)? else {
///     unreachable!("one site");
/// };
/// assert_eq!(rewrite.insertions(), 1);
/// # Ok::<(), wasmguard_syntax::SyntaxError>(())
/// ```
pub fn guard_source<C>(source: &[u8], canonicalizer: &C) -> Result<GuardedSource, SyntaxError>
where
    C: Canonicalizer + ?Sized,
{
    let parsed = GoParser::new()?.parse(source)?;
    let sites = detect_guard_sites(&parsed);
    if sites.is_empty() {
        return Ok(GuardedSource::Unchanged { sites: 0 });
    }

    let injected = inject_guards(parsed.source(), &sites);
    if injected.insertions == 0 {
        return Ok(GuardedSource::Unchanged { sites: sites.len() });
    }

    Ok(GuardedSource::Rewritten(Rewrite {
        rendered: render(canonicalizer, injected.output),
        sites: sites.len(),
        insertions: injected.insertions,
    }))
}
