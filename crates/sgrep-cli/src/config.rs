//! Separates configuration flags from the search arguments.
//!
//! Configuration flags lead the command line and are handed, together with
//! the program name, to `ortho-config`. Everything from the first other
//! token onwards belongs to the search itself.

use std::ffi::{OsStr, OsString};

use ortho_config::OrthoConfig;
use sgrep_config::Config;

use crate::errors::AppError;

/// Whether a configuration flag takes a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Arity {
    /// `--flag value` or `--flag=value`.
    Value,
    /// A boolean switch; presence alone means `true`.
    Switch,
}

/// Flags owned by the configuration loader.
///
/// MAINTENANCE: keep in step with the fields of `sgrep_config::Config`.
const CONFIG_FLAGS: &[(&str, Arity)] = &[
    ("--config-path", Arity::Value),
    ("--log-filter", Arity::Value),
    ("--log-format", Arity::Value),
    ("--jobs", Arity::Value),
    ("--max-file-bytes", Arity::Value),
    ("--anchored-identifiers", Arity::Switch),
    ("--include-hidden", Arity::Switch),
    ("--search-recovered", Arity::Switch),
];

pub(crate) trait ConfigLoader {
    /// Loads configuration from the program name plus the configuration
    /// flags split off by [`split_config_arguments`].
    fn load(&self, args: &[OsString]) -> Result<Config, AppError>;
}

/// Layers defaults, file, environment and flags via `ortho-config`.
pub(crate) struct OrthoConfigLoader;

impl ConfigLoader for OrthoConfigLoader {
    fn load(&self, args: &[OsString]) -> Result<Config, AppError> {
        Config::load_from_iter(args.iter().cloned()).map_err(AppError::LoadConfiguration)
    }
}

/// How many tokens a leading argument claims for the configuration loader:
/// `None` when it is not a configuration flag at all.
fn claimed_tokens(argument: &OsStr) -> Option<usize> {
    let text = argument.to_str()?;
    let (flag, inline_value) = match text.split_once('=') {
        Some((flag, _)) => (flag, true),
        None => (text, false),
    };
    let (_, arity) = CONFIG_FLAGS.iter().find(|(known, _)| *known == flag)?;
    match arity {
        Arity::Value if !inline_value => Some(2),
        Arity::Value | Arity::Switch => Some(1),
    }
}

pub(crate) struct ConfigArgumentSplit {
    /// Program name followed by the configuration flags and their values.
    pub(crate) config_arguments: Vec<OsString>,
    /// Index in the original arguments where the search arguments begin.
    pub(crate) command_start: usize,
}

pub(crate) fn split_config_arguments(args: &[OsString]) -> ConfigArgumentSplit {
    let mut command_start = args.len().min(1);
    while let Some(claimed) = args
        .get(command_start)
        .map(OsString::as_os_str)
        .and_then(claimed_tokens)
    {
        command_start = (command_start + claimed).min(args.len());
    }

    ConfigArgumentSplit {
        config_arguments: args.iter().take(command_start).cloned().collect(),
        command_start,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn os_args(args: &[&str]) -> Vec<OsString> {
        args.iter().map(OsString::from).collect()
    }

    #[rstest]
    #[case("--log-filter", Some(2))]
    #[case("--log-filter=debug", Some(1))]
    #[case("--jobs", Some(2))]
    #[case("--include-hidden", Some(1))]
    #[case("--search-recovered", Some(1))]
    #[case("--anchored-identifiers=true", Some(1))]
    #[case("--output", None)]
    #[case("--unknown", None)]
    #[case("def", None)]
    #[case("$*", None)]
    fn leading_tokens_are_classified(#[case] argument: &str, #[case] expected: Option<usize>) {
        assert_eq!(claimed_tokens(OsStr::new(argument)), expected);
    }

    #[test]
    fn configuration_flags_are_split_from_search_arguments() {
        let args = os_args(&[
            "sgrep",
            "--log-filter",
            "debug",
            "--jobs=2",
            "--include-hidden",
            "def",
            "src",
        ]);

        let split = split_config_arguments(&args);

        assert_eq!(
            split.config_arguments,
            os_args(&["sgrep", "--log-filter", "debug", "--jobs=2", "--include-hidden"])
        );
        assert_eq!(split.command_start, 5);
    }

    #[test]
    fn flags_after_the_query_stay_with_the_search() {
        let args = os_args(&["sgrep", "class", "--jobs", "2"]);

        let split = split_config_arguments(&args);

        assert_eq!(split.config_arguments, os_args(&["sgrep"]));
        assert_eq!(split.command_start, 1);
    }

    #[test]
    fn a_trailing_flag_without_its_value_goes_to_the_loader() {
        let args = os_args(&["sgrep", "--jobs"]);

        let split = split_config_arguments(&args);

        assert_eq!(split.config_arguments, args);
        assert_eq!(split.command_start, 2);
    }

    #[test]
    fn no_arguments_split_into_nothing() {
        let split = split_config_arguments(&[]);
        assert!(split.config_arguments.is_empty());
        assert_eq!(split.command_start, 0);
    }
}
