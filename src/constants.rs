/// Source names and fixed locations shared across the codebase

// Source names (used in CLI and log fields)
pub const KINGS_GIST_SOURCE: &str = "kings_gist";
pub const FILE_SOURCE: &str = "file";

// Hosted dataset of English and British monarchs
pub const KINGS_GIST_BASE_URL: &str = "https://gist.githubusercontent.com/";
pub const KINGS_GIST_PATH: &str =
    "christianpanton/10d65ccef9f29de3acd49d97ed423736/raw/b09563bc0c4b318132c7a738e679d4f984ef0048/kings";

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
pub const DEFAULT_CONFIG_FILE: &str = "monarch_stats.toml";
pub const LOG_FILE_NAME: &str = "monarch_stats.log";

// Environment overrides
pub const ENV_SOURCE_URL: &str = "MONARCH_STATS_URL";
pub const ENV_TIMEOUT_SECONDS: &str = "MONARCH_STATS_TIMEOUT_SECONDS";

/// Get all supported source names
pub fn get_supported_sources() -> Vec<&'static str> {
    vec![KINGS_GIST_SOURCE, FILE_SOURCE]
}
