//! Command-line argument definitions for sgrep.
//!
//! Configuration flags (`--log-filter`, `--jobs`, ...) are not declared
//! here; they are split off before clap sees the arguments and handed to
//! the configuration loader instead.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use sgrep_syntax::SupportedLanguage;

/// Query used when no pattern is given: every name reference.
pub(crate) const DEFAULT_PATTERN: &str = "$*";

/// Output format selection for search results.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// Selects `human` for terminal output and `json` for redirected output.
    #[default]
    Auto,
    /// Always render grouped, human-readable output.
    Human,
    /// Always emit one JSON object per match.
    Json,
}

/// Output format after resolving `auto` based on TTY detection.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ResolvedOutputFormat {
    /// Matches grouped under their file name.
    Human,
    /// JSON lines.
    Json,
}

impl OutputFormat {
    /// Resolves the output format based on whether stdout is a terminal.
    #[must_use]
    pub const fn resolve(self, stdout_is_terminal: bool) -> ResolvedOutputFormat {
        match self {
            Self::Auto => {
                if stdout_is_terminal {
                    ResolvedOutputFormat::Human
                } else {
                    ResolvedOutputFormat::Json
                }
            }
            Self::Human => ResolvedOutputFormat::Human,
            Self::Json => ResolvedOutputFormat::Json,
        }
    }
}

/// Structural search over Python, Rust and TypeScript sources.
#[derive(Parser, Debug)]
#[command(name = "sgrep", version)]
pub(crate) struct Cli {
    /// Only search files of this language (python, rust or typescript).
    #[arg(long, value_name = "LANGUAGE")]
    pub(crate) language: Option<SupportedLanguage>,
    /// Controls how matches are rendered.
    #[arg(long, value_enum, default_value_t = OutputFormat::Auto)]
    pub(crate) output: OutputFormat,
    /// The query, for example `def (args=2)` or `class $Model*`.
    #[arg(value_name = "PATTERN", default_value = DEFAULT_PATTERN)]
    pub(crate) pattern: String,
    /// File or directory to search.
    #[arg(value_name = "PATH", default_value = ".")]
    pub(crate) path: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(OutputFormat::Auto, true, ResolvedOutputFormat::Human)]
    #[case(OutputFormat::Auto, false, ResolvedOutputFormat::Json)]
    #[case(OutputFormat::Human, false, ResolvedOutputFormat::Human)]
    #[case(OutputFormat::Json, true, ResolvedOutputFormat::Json)]
    fn output_format_resolution(
        #[case] format: OutputFormat,
        #[case] terminal: bool,
        #[case] expected: ResolvedOutputFormat,
    ) {
        assert_eq!(format.resolve(terminal), expected);
    }

    #[test]
    fn pattern_and_path_default() {
        let cli = Cli::try_parse_from(["sgrep"]).expect("bare invocation parses");
        assert_eq!(cli.pattern, "$*");
        assert_eq!(cli.path, PathBuf::from("."));
        assert_eq!(cli.output, OutputFormat::Auto);
        assert!(cli.language.is_none());
    }

    #[test]
    fn language_flag_accepts_short_names() {
        let cli = Cli::try_parse_from(["sgrep", "--language", "rs", "def", "src"])
            .expect("arguments parse");
        assert_eq!(cli.language, Some(SupportedLanguage::Rust));
        assert_eq!(cli.pattern, "def");
        assert_eq!(cli.path, PathBuf::from("src"));
    }

    #[test]
    fn unknown_language_is_a_usage_error() {
        let error = Cli::try_parse_from(["sgrep", "--language", "go"])
            .expect_err("go is not supported");
        assert!(error.to_string().contains("unsupported language"));
    }
}
