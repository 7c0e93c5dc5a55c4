use crate::constants::FILE_SOURCE;
use crate::error::Result;
use crate::types::{MonarchSource, RawMonarch};
use std::path::PathBuf;
use tracing::{info, instrument};

/// Reads the monarch JSON array from a local file
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait::async_trait]
impl MonarchSource for FileSource {
    fn source_name(&self) -> &'static str {
        FILE_SOURCE
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn fetch_raw(&self) -> Result<Vec<RawMonarch>> {
        let bytes = tokio::fs::read(&self.path).await?;
        let records: Vec<RawMonarch> = serde_json::from_slice(&bytes)?;
        info!("Read {} monarch records", records.len());
        Ok(records)
    }
}
