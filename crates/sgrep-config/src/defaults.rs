use crate::logging::LogFormat;

/// Default log filter expression used by the binary.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Files larger than this many bytes are skipped unless configured
/// otherwise.
pub const DEFAULT_MAX_FILE_BYTES: u64 = 4 * 1024 * 1024;

/// Owned log filter value used where allocation is required (e.g. serde).
#[must_use]
pub fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

/// Default logging format for the binary.
#[must_use]
pub const fn default_log_format() -> LogFormat {
    LogFormat::Compact
}

/// Default worker count; zero lets the pool pick one thread per core.
#[must_use]
pub const fn default_jobs() -> usize {
    0
}

/// Default per-file size limit.
#[must_use]
pub const fn default_max_file_bytes() -> u64 {
    DEFAULT_MAX_FILE_BYTES
}
