use crate::apis::file::FileSource;
use crate::apis::kings_gist::KingsGistApi;
use crate::config::SourceConfig;
use crate::constants::*;
use crate::error::{Result, StatsError};
use crate::types::MonarchSource;
use std::path::Path;

/// Build the named source. The file source requires `file`.
pub fn create_source(
    source_name: &str,
    config: &SourceConfig,
    file: Option<&Path>,
) -> Result<Box<dyn MonarchSource>> {
    match source_name {
        KINGS_GIST_SOURCE => Ok(Box::new(KingsGistApi::new(config)?)),
        FILE_SOURCE => {
            let path = file.ok_or_else(|| {
                StatsError::Config("the file source needs a path (--file)".to_string())
            })?;
            Ok(Box::new(FileSource::new(path)))
        }
        other => Err(StatsError::Config(format!(
            "Unknown source '{}'. Available: {}",
            other,
            get_supported_sources().join(", ")
        ))),
    }
}
