//! Layered configuration for sgrep.
//!
//! Values are resolved from defaults, then a configuration file
//! (`--config-path` or `SGREP_CONFIG_PATH`), then `SGREP_*` environment
//! variables, then command-line flags, with later layers winning.

mod defaults;
mod logging;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

pub use defaults::{
    DEFAULT_LOG_FILTER, DEFAULT_MAX_FILE_BYTES, default_jobs, default_log_filter_string,
    default_log_format, default_max_file_bytes,
};
pub use logging::{LogFormat, LogFormatParseError};

/// Runtime configuration shared by the CLI and the engine.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(prefix = "SGREP")]
pub struct Config {
    /// `tracing_subscriber::EnvFilter` expression for diagnostics.
    #[ortho_config(default = default_log_filter_string())]
    pub log_filter: String,
    /// Output format of diagnostic log lines.
    #[ortho_config(default = default_log_format())]
    pub log_format: LogFormat,
    /// Honour `*` markers in identifier patterns instead of matching by
    /// substring.
    #[ortho_config(default = false)]
    pub anchored_identifiers: bool,
    /// Worker threads for per-file matching; zero means one per core.
    #[ortho_config(default = default_jobs())]
    pub jobs: usize,
    /// Files larger than this many bytes are skipped.
    #[ortho_config(default = default_max_file_bytes())]
    pub max_file_bytes: u64,
    /// Descend into hidden files and directories.
    #[ortho_config(default = false)]
    pub include_hidden: bool,
    /// Search files whose syntax trees needed error recovery instead of
    /// reporting them as failures.
    #[ortho_config(default = false)]
    pub search_recovered: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
            anchored_identifiers: false,
            jobs: default_jobs(),
            max_file_bytes: default_max_file_bytes(),
            include_hidden: false,
            search_recovered: false,
        }
    }
}

impl Config {
    /// Returns the log filter expression.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// Returns the log output format.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Returns whether identifier patterns are anchored.
    #[must_use]
    pub const fn anchored_identifiers(&self) -> bool {
        self.anchored_identifiers
    }

    /// Returns the configured worker count, `None` meaning one per core.
    #[must_use]
    pub const fn jobs(&self) -> Option<usize> {
        match self.jobs {
            0 => None,
            jobs => Some(jobs),
        }
    }

    /// Returns the per-file size limit in bytes.
    #[must_use]
    pub const fn max_file_bytes(&self) -> u64 {
        self.max_file_bytes
    }

    /// Returns whether hidden entries are searched.
    #[must_use]
    pub const fn include_hidden(&self) -> bool {
        self.include_hidden
    }

    /// Returns whether files with syntax errors are searched anyway.
    #[must_use]
    pub const fn search_recovered(&self) -> bool {
        self.search_recovered
    }
}
