//! File and directory traversal around the in-memory pipeline.
//!
//! Files are processed one at a time. The first fatal error stops the walk
//! and is returned; files rewritten before it stay rewritten.

use std::fs;
use std::path::Path;

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::canonicalizer::Canonicalizer;
use crate::error::ProcessError;
use crate::language::is_go_source;
use crate::pipeline::{GuardedSource, guard_source};

/// Outcome of processing one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    /// No guard was needed; the file was not written.
    Unchanged,
    /// Guards were inserted.
    Rewritten {
        /// Guards inserted.
        insertions: usize,
        /// Whether the output went through the canonicaliser.
        formatted: bool,
        /// Whether the file was written (false in dry-run mode).
        written: bool,
    },
}

/// Totals for a directory run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeReport {
    /// Go files visited.
    pub files_visited: usize,
    /// Files that received at least one guard.
    pub files_rewritten: usize,
    /// Guards inserted across all files.
    pub insertions: usize,
    /// Files written without formatting.
    pub format_fallbacks: usize,
}

impl TreeReport {
    fn record(&mut self, outcome: FileOutcome) {
        self.files_visited += 1;
        if let FileOutcome::Rewritten {
            insertions,
            formatted,
            ..
        } = outcome
        {
            self.files_rewritten += 1;
            self.insertions += insertions;
            if !formatted {
                self.format_fallbacks += 1;
            }
        }
    }
}

/// Rewrites Go files in place.
#[derive(Debug, Clone)]
pub struct FileRewriter<C> {
    canonicalizer: C,
    dry_run: bool,
}

impl<C: Canonicalizer> FileRewriter<C> {
    /// Creates a rewriter that formats output with `canonicalizer`.
    #[must_use]
    pub const fn new(canonicalizer: C) -> Self {
        Self {
            canonicalizer,
            dry_run: false,
        }
    }

    /// In dry-run mode files are analysed but never written.
    #[must_use]
    pub const fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Guards the file at `path` and writes it back if anything changed.
    ///
    /// # Errors
    ///
    /// Returns a [`ProcessError`] if the file cannot be read, is not valid
    /// Go, or cannot be written.
    pub fn rewrite_file(&self, path: &Path) -> Result<FileOutcome, ProcessError> {
        let content = fs::read(path).map_err(|source| ProcessError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let rewrite = match guard_source(&content, &self.canonicalizer) {
            Ok(GuardedSource::Rewritten(rewrite)) => rewrite,
            Ok(GuardedSource::Unchanged { sites }) => {
                debug!(path = %path.display(), sites, "no guards needed");
                return Ok(FileOutcome::Unchanged);
            }
            Err(source) => {
                return Err(ProcessError::Parse {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        if let Some(reason) = rewrite.format_error() {
            warn!(
                path = %path.display(),
                error = %reason,
                "formatting failed; writing unformatted source"
            );
        }
        let insertions = rewrite.insertions();
        let formatted = rewrite.format_error().is_none();

        if self.dry_run {
            info!(path = %path.display(), insertions, "would insert syscall guards");
        } else {
            fs::write(path, rewrite.into_output()).map_err(|source| ProcessError::Write {
                path: path.to_path_buf(),
                source,
            })?;
            info!(path = %path.display(), insertions, "inserted syscall guards");
        }

        Ok(FileOutcome::Rewritten {
            insertions,
            formatted,
            written: !self.dry_run,
        })
    }

    /// Guards every Go file under `root`, in file-name order.
    ///
    /// Symbolic links are not followed and non-Go files are ignored.
    ///
    /// # Errors
    ///
    /// Returns the first [`ProcessError`] encountered; the walk stops there.
    pub fn rewrite_tree(&self, root: &Path) -> Result<TreeReport, ProcessError> {
        let mut report = TreeReport::default();
        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = entry.map_err(|source| ProcessError::Walk {
                path: source.path().unwrap_or(root).to_path_buf(),
                source,
            })?;
            if !entry.file_type().is_file() || !is_go_source(entry.path()) {
                continue;
            }
            report.record(self.rewrite_file(entry.path())?);
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canonicalizer::Verbatim;
    use crate::error::FormatError;

    struct Rejecting;

    impl Canonicalizer for Rejecting {
        fn canonicalize(&self, _source: &[u8]) -> Result<Vec<u8>, FormatError> {
            Err(FormatError::InvalidSyntax(crate::SyntaxError::NoTree))
        }
    }

    #[test]
    fn report_counts_rewrites_and_fallbacks() {
        let mut report = TreeReport::default();
        report.record(FileOutcome::Unchanged);
        report.record(FileOutcome::Rewritten {
            insertions: 2,
            formatted: true,
            written: true,
        });
        report.record(FileOutcome::Rewritten {
            insertions: 1,
            formatted: false,
            written: true,
        });

        assert_eq!(
            report,
            TreeReport {
                files_visited: 3,
                files_rewritten: 2,
                insertions: 3,
                format_fallbacks: 1,
            }
        );
    }

    #[test]
    fn format_failure_still_writes() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("sys.go");
        fs::write(&path, "package unix\n\nfunc f() {\n\tSyscall(1, 0, 0, 0)\n}\n").expect("write");

        let outcome = FileRewriter::new(Rejecting)
            .rewrite_file(&path)
            .expect("rewrite");

        assert_eq!(
            outcome,
            FileOutcome::Rewritten {
                insertions: 1,
                formatted: false,
                written: true,
            }
        );
        let written = fs::read_to_string(&path).expect("read");
        assert!(written.contains("\tpanic(\"syscall not supported in wasm: Syscall(1, 0, 0, 0)\")\n\tSyscall(1, 0, 0, 0)"));
    }

    #[test]
    fn dry_run_leaves_file_alone() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("sys.go");
        let original = "package unix\n\nfunc f() {\n\tSyscall(1, 0, 0, 0)\n}\n";
        fs::write(&path, original).expect("write");

        let outcome = FileRewriter::new(Verbatim)
            .with_dry_run(true)
            .rewrite_file(&path)
            .expect("rewrite");

        assert!(matches!(outcome, FileOutcome::Rewritten { written: false, .. }));
        assert_eq!(fs::read_to_string(&path).expect("read"), original);
    }
}
