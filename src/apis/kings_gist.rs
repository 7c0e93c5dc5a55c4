use crate::config::SourceConfig;
use crate::constants::KINGS_GIST_SOURCE;
use crate::error::{Result, StatsError};
use crate::types::{MonarchSource, RawMonarch};
use std::time::Duration;
use tracing::{debug, error, info, instrument};

/// Hosted JSON array of monarchs, fetched with a single GET
pub struct KingsGistApi {
    client: reqwest::Client,
    url: String,
}

impl KingsGistApi {
    pub fn new(config: &SourceConfig) -> Result<Self> {
        Self::with_url(config.url(), config.timeout())
    }

    pub fn with_url(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait::async_trait]
impl MonarchSource for KingsGistApi {
    fn source_name(&self) -> &'static str {
        KINGS_GIST_SOURCE
    }

    #[instrument(skip(self), fields(url = %self.url))]
    async fn fetch_raw(&self) -> Result<Vec<RawMonarch>> {
        debug!("Fetching monarchs");
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            error!("Monarch source responded with status {}", status.as_u16());
            return Err(StatsError::Status {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        let records: Vec<RawMonarch> = serde_json::from_slice(&body)?;

        info!("Successfully fetched {} monarch records", records.len());
        Ok(records)
    }
}
