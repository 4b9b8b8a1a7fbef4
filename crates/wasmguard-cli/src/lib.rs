//! Command-line runtime for wasmguard.
//!
//! Parses arguments, installs logging, and runs the guard pipeline over a
//! directory of Go sources. IO streams are injected so tests can drive the
//! runtime without spawning a process.

use std::ffi::OsString;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use wasmguard_syntax::{
    Canonicalizer, DEFAULT_GOFMT, FileRewriter, Gofmt, TreeReport, Verbatim,
};

mod config;
mod errors;
pub mod telemetry;

pub use config::{DEFAULT_LOG_FILTER, LogFormat};
use errors::AppError;

/// Inserts `panic` guards above syscall primitives in Go sources.
#[derive(Debug, Parser)]
#[command(name = "wasmguard", version)]
struct Cli {
    /// Directory to rewrite recursively.
    root: PathBuf,

    /// Formatter used to canonicalise rewritten files.
    #[arg(long, value_name = "PATH", default_value = DEFAULT_GOFMT)]
    gofmt: PathBuf,

    /// Write rewritten files without running the formatter.
    #[arg(long)]
    no_format: bool,

    /// Report files that need guards without writing them.
    #[arg(long)]
    dry_run: bool,

    /// Log filter directive (e.g. `debug` or `wasmguard_syntax=trace`).
    #[arg(long, value_name = "EXPR", default_value = DEFAULT_LOG_FILTER)]
    log_filter: String,

    /// Log output format.
    #[arg(long, value_name = "FORMAT", default_value_t = LogFormat::Compact)]
    log_format: LogFormat,
}

impl Cli {
    fn canonicalizer(&self) -> Box<dyn Canonicalizer> {
        if self.no_format {
            Box::new(Verbatim)
        } else {
            Box::new(Gofmt::new(self.gofmt.clone()))
        }
    }
}

/// Runs the CLI using the provided arguments and IO handles.
///
/// Returns success when every file was processed. Usage errors and the
/// first fatal file error are written to `stderr` and yield a failure code.
#[must_use]
pub fn run<I, W, E>(args: I, stdout: &mut W, stderr: &mut E) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(error) => return report_parse_error(&error, stdout, stderr),
    };

    match execute(&cli, stdout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            let _ = writeln!(stderr, "error: {error}");
            ExitCode::FAILURE
        }
    }
}

/// Help and version requests go to stdout and succeed; real usage errors go
/// to stderr and fail.
fn report_parse_error<W: Write, E: Write>(
    error: &clap::Error,
    stdout: &mut W,
    stderr: &mut E,
) -> ExitCode {
    if error.use_stderr() {
        let _ = write!(stderr, "{error}");
        ExitCode::FAILURE
    } else {
        let _ = write!(stdout, "{error}");
        ExitCode::SUCCESS
    }
}

fn execute<W: Write>(cli: &Cli, stdout: &mut W) -> Result<(), AppError> {
    telemetry::initialise(&cli.log_filter, cli.log_format)?;

    let report = FileRewriter::new(cli.canonicalizer())
        .with_dry_run(cli.dry_run)
        .rewrite_tree(&cli.root)?;

    writeln!(stdout, "{}", summary(&report, cli.dry_run)).map_err(AppError::Summary)
}

fn summary(report: &TreeReport, dry_run: bool) -> String {
    let verb = if dry_run { "would insert" } else { "inserted" };
    let mut line = format!(
        "{verb} {} guard(s) in {} of {} Go file(s)",
        report.insertions, report.files_rewritten, report.files_visited
    );
    if report.format_fallbacks > 0 {
        line.push_str(&format!(
            "; {} file(s) left unformatted",
            report.format_fallbacks
        ));
    }
    line
}

#[cfg(test)]
mod tests;
