//! CLI entrypoint for the wasmguard syscall guard injector.
//!
//! The binary delegates to [`wasmguard_cli::run`], which parses arguments,
//! installs logging and rewrites the requested source tree.

use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr().lock();
    wasmguard_cli::run(std::env::args_os(), &mut stdout, &mut stderr)
}
