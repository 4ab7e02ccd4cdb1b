//! CLI entrypoint for sgrep.
//!
//! The binary delegates to [`sgrep_cli::run`], which loads configuration,
//! parses the search arguments, runs the search and renders the results.

use std::io::{self, StderrLock, StdoutLock};
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut stdout: StdoutLock<'_> = io::stdout().lock();
    let mut stderr: StderrLock<'_> = io::stderr().lock();
    sgrep_cli::run(std::env::args_os(), &mut stdout, &mut stderr)
}
