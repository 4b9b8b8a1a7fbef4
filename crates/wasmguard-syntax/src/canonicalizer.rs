//! Canonical formatting of edited sources.
//!
//! Formatting is fallible but never fatal: [`render`] folds a failure into
//! [`Rendered::Unformatted`], which carries the edited buffer verbatim so the
//! same write path handles both outcomes.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::error::FormatError;
use crate::parser::GoParser;

/// Default formatter program, looked up on `PATH`.
pub const DEFAULT_GOFMT: &str = "gofmt";

/// Rewrites Go source into its canonical layout.
pub trait Canonicalizer {
    /// Returns the canonical form of `source`.
    ///
    /// # Errors
    ///
    /// Returns a [`FormatError`] when `source` cannot be formatted.
    fn canonicalize(&self, source: &[u8]) -> Result<Vec<u8>, FormatError>;
}

impl<C: Canonicalizer + ?Sized> Canonicalizer for &C {
    fn canonicalize(&self, source: &[u8]) -> Result<Vec<u8>, FormatError> {
        (**self).canonicalize(source)
    }
}

impl<C: Canonicalizer + ?Sized> Canonicalizer for Box<C> {
    fn canonicalize(&self, source: &[u8]) -> Result<Vec<u8>, FormatError> {
        (**self).canonicalize(source)
    }
}

/// Formats through an external `gofmt`.
///
/// The buffer is checked with the Go grammar first so a broken edit is
/// reported with a position instead of gofmt's raw diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gofmt {
    program: PathBuf,
}

impl Gofmt {
    /// Uses `program` as the formatter executable.
    #[must_use]
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Returns the formatter executable.
    #[must_use]
    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl Default for Gofmt {
    fn default() -> Self {
        Self::new(DEFAULT_GOFMT)
    }
}

impl Canonicalizer for Gofmt {
    fn canonicalize(&self, source: &[u8]) -> Result<Vec<u8>, FormatError> {
        GoParser::new()
            .and_then(|mut parser| parser.parse(source))
            .map_err(FormatError::InvalidSyntax)?;

        let mut child = Command::new(&self.program)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| FormatError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        // gofmt reads all of stdin before writing, so a blocking write cannot
        // deadlock against its stdout.
        let written = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(source),
            None => Ok(()),
        };
        let output = child.wait_with_output().map_err(|source| FormatError::Pipe {
            program: self.program.clone(),
            source,
        })?;

        // A formatter that exits early closes its stdin; its status explains
        // the broken pipe better than the write error does.
        if !output.status.success() {
            return Err(FormatError::Rejected {
                program: self.program.clone(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
            });
        }
        written.map_err(|source| FormatError::Pipe {
            program: self.program.clone(),
            source,
        })?;
        Ok(output.stdout)
    }
}

/// Leaves sources exactly as they are.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Verbatim;

impl Canonicalizer for Verbatim {
    fn canonicalize(&self, source: &[u8]) -> Result<Vec<u8>, FormatError> {
        Ok(source.to_vec())
    }
}

/// The bytes to write after canonicalisation was attempted.
#[derive(Debug)]
pub enum Rendered {
    /// Canonical output.
    Formatted(Vec<u8>),
    /// The edited buffer, written as-is because formatting failed.
    Unformatted {
        /// Edited buffer.
        source: Vec<u8>,
        /// Why formatting failed.
        reason: FormatError,
    },
}

impl Rendered {
    /// Returns the bytes to write.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        match self {
            Self::Formatted(bytes) | Self::Unformatted { source: bytes, .. } => bytes,
        }
    }

    /// Returns the formatting failure, if any.
    #[must_use]
    pub const fn format_error(&self) -> Option<&FormatError> {
        match self {
            Self::Formatted(_) => None,
            Self::Unformatted { reason, .. } => Some(reason),
        }
    }

    /// Consumes the value and returns the bytes to write.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Self::Formatted(bytes) | Self::Unformatted { source: bytes, .. } => bytes,
        }
    }
}

/// Canonicalises `edited`, falling back to the raw buffer on failure.
#[must_use]
pub fn render<C: Canonicalizer + ?Sized>(canonicalizer: &C, edited: Vec<u8>) -> Rendered {
    match canonicalizer.canonicalize(&edited) {
        Ok(formatted) => Rendered::Formatted(formatted),
        Err(reason) => Rendered::Unformatted {
            source: edited,
            reason,
        },
    }
}
