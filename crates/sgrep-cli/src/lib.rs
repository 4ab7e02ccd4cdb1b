//! Command-line runtime for sgrep.
//!
//! The runtime splits configuration flags from the search arguments, loads
//! layered configuration, compiles the query once, then fans the search out
//! over every discovered file and renders the results. IO streams and the
//! configuration loader are injectable so the whole pipeline can be driven
//! from tests.

use std::ffi::OsString;
use std::io::{self, IsTerminal, Write};
use std::process::ExitCode;

use clap::Parser;
use sgrep::{Engine, MatchOptions};
use sgrep_config::Config;
use tracing::info;

mod cli;
mod config;
mod discovery;
mod errors;
mod output;
mod search;
mod telemetry;

pub use cli::{OutputFormat, ResolvedOutputFormat};

use cli::Cli;
use config::{ConfigArgumentSplit, split_config_arguments};
pub(crate) use config::{ConfigLoader, OrthoConfigLoader};
use discovery::{DiscoveryOptions, FileFailure, discover};
pub(crate) use errors::AppError;
use output::Renderer;
use search::{FileOutcome, SearchSettings, search_files};

/// A match was found.
const EXIT_MATCHED: u8 = 0;
/// The search completed without finding anything.
const EXIT_NO_MATCH: u8 = 1;
/// The search could not run, or files failed and nothing matched.
const EXIT_ERROR: u8 = 2;

/// Bundles the IO streams provided to the CLI runtime.
pub(crate) struct IoStreams<'a, W: Write, E: Write> {
    pub(crate) stdout: &'a mut W,
    pub(crate) stderr: &'a mut E,
    stdout_is_terminal: bool,
}

impl<'a, W: Write, E: Write> IoStreams<'a, W, E> {
    pub(crate) const fn new(
        stdout: &'a mut W,
        stderr: &'a mut E,
        stdout_is_terminal: bool,
    ) -> Self {
        Self {
            stdout,
            stderr,
            stdout_is_terminal,
        }
    }

    pub(crate) const fn stdout_is_terminal(&self) -> bool {
        self.stdout_is_terminal
    }
}

/// Tallies of a finished search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Summary {
    matches: usize,
    failures: usize,
}

impl Summary {
    const fn exit_code(self) -> u8 {
        if self.matches > 0 {
            EXIT_MATCHED
        } else if self.failures > 0 {
            EXIT_ERROR
        } else {
            EXIT_NO_MATCH
        }
    }
}

struct CliRunner<'a, W: Write, E: Write, L: ConfigLoader> {
    io: &'a mut IoStreams<'a, W, E>,
    loader: &'a L,
}

impl<'a, W, E, L> CliRunner<'a, W, E, L>
where
    W: Write,
    E: Write,
    L: ConfigLoader,
{
    const fn new(io: &'a mut IoStreams<'a, W, E>, loader: &'a L) -> Self {
        Self { io, loader }
    }

    fn run<I>(&mut self, args: I) -> ExitCode
    where
        I: IntoIterator<Item = OsString>,
    {
        let args: Vec<OsString> = args.into_iter().collect();
        let split = split_config_arguments(&args);
        let cli_arguments = prepare_cli_arguments(&args, &split);

        let result = Cli::try_parse_from(cli_arguments)
            .map_err(AppError::CliUsage)
            .and_then(|cli| {
                self.loader
                    .load(&split.config_arguments)
                    .map(|config| (cli, config))
            })
            .and_then(|(cli, config)| {
                telemetry::initialise(&config)?;
                self.search(&cli, &config)
            });

        match result {
            Ok(summary) => ExitCode::from(summary.exit_code()),
            Err(AppError::CliUsage(error)) if !error.use_stderr() => {
                // --help and --version are successful requests for text.
                let _ = write!(self.io.stdout, "{error}");
                ExitCode::SUCCESS
            }
            Err(error) => {
                let _ = writeln!(self.io.stderr, "{error}");
                ExitCode::from(EXIT_ERROR)
            }
        }
    }

    fn search(&mut self, cli: &Cli, config: &Config) -> Result<Summary, AppError> {
        let engine = Engine::new(MatchOptions::anchored(config.anchored_identifiers()));
        let query = engine.compile(&cli.pattern)?;

        let discovered = discover(
            &cli.path,
            DiscoveryOptions {
                include_hidden: config.include_hidden(),
                language: cli.language,
            },
        )?;
        let settings = SearchSettings {
            jobs: config.jobs(),
            max_file_bytes: config.max_file_bytes(),
            search_recovered: config.search_recovered(),
        };
        let outcomes = search_files(&query, &discovered.files, settings)?;

        let format = cli.output.resolve(self.io.stdout_is_terminal());
        let renderer = Renderer::new(format, self.io.stdout_is_terminal());
        let mut summary = Summary {
            matches: 0,
            failures: discovered.failures.len(),
        };
        for failure in &discovered.failures {
            self.report_failure(failure);
        }
        for outcome in outcomes {
            match outcome {
                FileOutcome::Searched(report) => {
                    summary.matches += report.matches.len();
                    renderer
                        .write_report(self.io.stdout, &report)
                        .map_err(AppError::WriteOutput)?;
                }
                FileOutcome::Failed(failure) => {
                    summary.failures += 1;
                    self.report_failure(&failure);
                }
                FileOutcome::Skipped => {}
            }
        }
        self.io.stdout.flush().map_err(AppError::WriteOutput)?;

        info!(
            query = %query.query().kind(),
            files = discovered.files.len(),
            matches = summary.matches,
            failures = summary.failures,
            "search finished"
        );
        Ok(summary)
    }

    fn report_failure(&mut self, failure: &FileFailure) {
        let _ = writeln!(
            self.io.stderr,
            "{}: {}",
            failure.path.display(),
            failure.reason
        );
    }
}

/// Runs the CLI using the provided arguments and IO handles.
///
/// Exit status is 0 when something matched, 1 when nothing did and 2 when
/// the search could not run or files failed without any match.
#[must_use]
pub fn run<I, W, E>(args: I, stdout: &mut W, stderr: &mut E) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
{
    let mut io = IoStreams::new(stdout, stderr, io::stdout().is_terminal());
    run_with_loader(args, &mut io, &OrthoConfigLoader)
}

pub(crate) fn run_with_loader<'a, I, W, E, L>(
    args: I,
    io: &'a mut IoStreams<'a, W, E>,
    loader: &'a L,
) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
    L: ConfigLoader,
{
    CliRunner::new(io, loader).run(args)
}

fn prepare_cli_arguments(args: &[OsString], split: &ConfigArgumentSplit) -> Vec<OsString> {
    args.first()
        .into_iter()
        .chain(args.iter().skip(split.command_start))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests;
