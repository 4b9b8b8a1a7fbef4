//! Error types for the guard pipeline.
//!
//! Three failure families exist. [`SyntaxError`] means a file cannot be read
//! as Go and is fatal for that file. [`FormatError`] means the edited buffer
//! could not be canonicalised; the pipeline recovers by writing it verbatim.
//! [`ProcessError`] wraps filesystem failures and parse failures with the
//! path that produced them so the caller can report and halt.

use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;

use thiserror::Error;

/// Errors raised while building a Go syntax tree.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SyntaxError {
    /// Failed to initialise the Tree-sitter parser with the Go grammar.
    #[error("failed to initialise Go parser: {message}")]
    ParserInit {
        /// Description of the failure.
        message: String,
    },

    /// The source is not syntactically valid Go.
    #[error("syntax error at {line}:{column}: {message} near `{context}`")]
    Parse {
        /// One-based line of the first error.
        line: u32,
        /// One-based column of the first error.
        column: u32,
        /// Parser diagnostic.
        message: String,
        /// Snippet of the offending source.
        context: String,
    },

    /// Tree-sitter returned no tree at all.
    #[error("parser produced no syntax tree")]
    NoTree,
}

impl SyntaxError {
    /// Creates a parser initialisation error.
    #[must_use]
    pub fn parser_init(message: impl Into<String>) -> Self {
        Self::ParserInit {
            message: message.into(),
        }
    }

    /// Creates a parse error at a one-based position.
    #[must_use]
    pub fn parse(
        line: u32,
        column: u32,
        message: impl Into<String>,
        context: impl Into<String>,
    ) -> Self {
        Self::Parse {
            line,
            column,
            message: message.into(),
            context: context.into(),
        }
    }
}

/// Errors raised while canonicalising an edited buffer.
///
/// None of these abort a run: the caller writes the unformatted buffer and
/// logs the error as a warning.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FormatError {
    /// The edited buffer no longer parses as Go.
    #[error("edited source is not valid Go: {0}")]
    InvalidSyntax(#[source] SyntaxError),

    /// The formatter program could not be started.
    #[error("failed to run {}: {source}", program.display())]
    Spawn {
        /// Formatter executable.
        program: PathBuf,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },

    /// Streaming the buffer to or from the formatter failed.
    #[error("failed to exchange source with {}: {source}", program.display())]
    Pipe {
        /// Formatter executable.
        program: PathBuf,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },

    /// The formatter rejected the buffer.
    #[error("{} exited with {status}: {stderr}", program.display())]
    Rejected {
        /// Formatter executable.
        program: PathBuf,
        /// Exit status reported by the formatter.
        status: ExitStatus,
        /// Trimmed diagnostic output.
        stderr: String,
    },
}

/// Fatal per-file errors surfaced by the orchestrator.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProcessError {
    /// Reading the source file failed.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        /// File that could not be read.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },

    /// The source file is not valid Go.
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        /// File that failed to parse.
        path: PathBuf,
        /// Parser diagnostic.
        #[source]
        source: SyntaxError,
    },

    /// Writing the rewritten file failed.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        /// File that could not be written.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },

    /// Directory traversal failed.
    #[error("failed to traverse {}: {source}", path.display())]
    Walk {
        /// Entry (or root) that could not be visited.
        path: PathBuf,
        /// Underlying traversal error.
        #[source]
        source: walkdir::Error,
    },
}

impl ProcessError {
    /// Returns the path the error refers to.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Read { path, .. }
            | Self::Parse { path, .. }
            | Self::Write { path, .. }
            | Self::Walk { path, .. } => path,
        }
    }
}
