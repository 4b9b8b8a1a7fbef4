//! Syscall guard injection for Go source trees.
//!
//! This crate finds calls to low-level syscall primitives in Go source and
//! inserts an unconditional `panic` directly above each one, so code built
//! for a target without those primitives fails loudly instead of silently.
//!
//! The per-file pipeline is:
//!
//! 1. **Parse** with Tree-sitter's Go grammar ([`GoParser`]); malformed files
//!    are rejected with a [`SyntaxError`].
//! 2. **Detect** guard sites ([`detect_guard_sites`]): bare calls and
//!    assignments whose right-hand side calls a name in
//!    [`GUARDED_PRIMITIVES`].
//! 3. **Inject** a guard above each site ([`inject_guards`]), skipping sites
//!    whose preceding line already holds one so repeated runs are stable.
//! 4. **Canonicalise** the result ([`Canonicalizer`]), falling back to the
//!    unformatted buffer when formatting fails.
//!
//! [`FileRewriter`] wraps the pipeline with file IO and directory traversal.
//!
//! # Example
//!
//! ```
//! use wasmguard_syntax::{GuardedSource, Verbatim, guard_source};
//!
//! let source = b"package unix\n\nfunc write() {\n\t\tr1, _, err := Syscall(SYS_WRITE, fd, ptr, len)\n}\n";
//! let GuardedSource::Rewritten(rewrite) = guard_source(source, &Verbatim)? else {
//!     unreachable!("one site");
//! };
//! let output = String::from_utf8_lossy(rewrite.output());
//! assert!(output.contains(
//!     "\t\tpanic(\"syscall not supported in wasm: Syscall(SYS_WRITE, fd, ptr, len)\")\n"
//! ));
//! # Ok::<(), wasmguard_syntax::SyntaxError>(())
//! ```

mod canonicalizer;
mod detector;
mod error;
mod guard;
mod injector;
mod language;
mod orchestrator;
mod parser;
mod pipeline;
mod text;

pub use canonicalizer::{Canonicalizer, DEFAULT_GOFMT, Gofmt, Rendered, Verbatim, render};
pub use detector::{GuardSite, detect_guard_sites};
pub use error::{FormatError, ProcessError, SyntaxError};
pub use guard::{
    GUARD_CALL, GUARD_MARKER, GUARD_PREFIX, GUARDED_PRIMITIVES, guard_line, guarded_primitive,
    is_guard_line,
};
pub use injector::{GuardInjector, Injected, SiteOutcome, inject_guards};
pub use language::{GO_EXTENSION, go_language, is_go_source};
pub use orchestrator::{FileOutcome, FileRewriter, TreeReport};
pub use parser::{GoParser, ParsedSource, SyntaxErrorInfo};
pub use pipeline::{GuardedSource, Rewrite, guard_source};
pub use text::{LineBuffer, leading_indent};

#[cfg(test)]
mod tests;
