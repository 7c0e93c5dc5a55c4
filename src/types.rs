use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Raw monarch record as returned by the data source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawMonarch {
    pub id: i64,
    #[serde(rename = "nm")]
    pub name: String,
    #[serde(rename = "cty", default)]
    pub country: String,
    #[serde(rename = "hse")]
    pub house: String,
    #[serde(rename = "yrs")]
    pub years: String,
}

/// Reign interval. `end` is `None` while the monarch is still reigning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reign {
    pub start: i32,
    pub end: Option<i32>,
}

/// Normalized monarch the statistics engine works on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Monarch {
    pub id: i64,
    pub first_name: String,
    pub full_name: String,
    pub reign: Reign,
    pub house: String,
}

/// A name paired with a number of years ruled
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleRecord {
    pub name: String,
    pub years: i64,
}

impl RuleRecord {
    pub fn new(name: impl Into<String>, years: i64) -> Self {
        Self {
            name: name.into(),
            years,
        }
    }
}

/// The four aggregates reported for a dataset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KingsStatistics {
    pub kings_count: usize,
    pub longest_ruling_monarch: RuleRecord,
    pub longest_ruling_house: RuleRecord,
    pub most_common_first_name: String,
}

/// Core trait that all monarch data sources must implement
#[async_trait::async_trait]
pub trait MonarchSource: Send + Sync {
    /// Unique identifier for this source
    fn source_name(&self) -> &'static str;

    /// Fetch every raw record from this source
    async fn fetch_raw(&self) -> Result<Vec<RawMonarch>>;

    /// Fetch and normalize; any malformed record aborts the whole batch
    async fn fetch_monarchs(&self) -> Result<Vec<Monarch>> {
        let raw = self.fetch_raw().await?;
        crate::parser::normalize_all(&raw)
    }
}
