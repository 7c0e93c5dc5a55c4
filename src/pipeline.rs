use crate::error::{Result, StatsError};
use crate::statistics;
use crate::types::{KingsStatistics, MonarchSource};
use chrono::{DateTime, Utc};
use metrics::{counter, histogram};
use serde::Serialize;
use std::future::Future;
use std::time::Instant;
use tracing::{error, info, instrument, warn};

/// Result of a complete pipeline run
#[derive(Debug, Clone, Serialize)]
pub struct PipelineResult {
    pub source_name: String,
    pub reference_year: i32,
    pub statistics: KingsStatistics,
    pub completed_at: DateTime<Utc>,
}

pub struct StatsPipeline;

impl StatsPipeline {
    /// Fetch, normalize and aggregate. Fails as a whole; no partial statistics.
    #[instrument(skip(source), fields(source_name = %source.source_name()))]
    pub async fn run(source: &dyn MonarchSource, reference_year: i32) -> Result<PipelineResult> {
        let source_name = source.source_name().to_string();
        counter!("monarch_stats_runs_total", "source" => source_name.clone()).increment(1);

        let outcome = Self::fetch_and_compute(source, reference_year).await;
        match &outcome {
            Ok(stats) => info!(
                "Computed statistics over {} monarchs (reference year {})",
                stats.kings_count, reference_year
            ),
            Err(e) => {
                error!("Pipeline failed: {}", e);
                counter!(
                    "monarch_stats_failures_total",
                    "source" => source_name.clone(),
                    "kind" => e.kind().as_str()
                )
                .increment(1);
            }
        }

        Ok(PipelineResult {
            source_name,
            reference_year,
            statistics: outcome?,
            completed_at: Utc::now(),
        })
    }

    /// Like [`StatsPipeline::run`], but abandons the fetch as soon as `cancel` resolves.
    pub async fn run_until<C>(
        source: &dyn MonarchSource,
        reference_year: i32,
        cancel: C,
    ) -> Result<PipelineResult>
    where
        C: Future<Output = ()>,
    {
        tokio::select! {
            result = Self::run(source, reference_year) => result,
            _ = cancel => {
                warn!("Run cancelled");
                let err = StatsError::Cancelled;
                counter!(
                    "monarch_stats_failures_total",
                    "source" => source.source_name(),
                    "kind" => err.kind().as_str()
                )
                .increment(1);
                Err(err)
            }
        }
    }

    async fn fetch_and_compute(
        source: &dyn MonarchSource,
        reference_year: i32,
    ) -> Result<KingsStatistics> {
        let fetch_start = Instant::now();
        let monarchs = source.fetch_monarchs().await?;
        histogram!("monarch_stats_fetch_duration_seconds", "source" => source.source_name())
            .record(fetch_start.elapsed().as_secs_f64());
        counter!("monarch_stats_records_total", "source" => source.source_name())
            .increment(monarchs.len() as u64);

        statistics::compute(&monarchs, reference_year)
    }
}

/// Resolves when `signal` fires. If the signal handler cannot be installed the
/// returned future never resolves, so a healthy run is not cancelled.
pub async fn cancel_on<F>(signal: F)
where
    F: Future<Output = std::io::Result<()>>,
{
    if let Err(e) = signal.await {
        warn!("Cancellation signal unavailable: {}", e);
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RawMonarch;
    use async_trait::async_trait;
    use metrics::{
        Counter, CounterFn, Gauge, Histogram, Key, KeyName, Metadata, Recorder, SharedString, Unit,
    };
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    struct StaticSource {
        records: Vec<RawMonarch>,
    }

    #[async_trait]
    impl MonarchSource for StaticSource {
        fn source_name(&self) -> &'static str {
            "static"
        }

        async fn fetch_raw(&self) -> Result<Vec<RawMonarch>> {
            Ok(self.records.clone())
        }
    }

    struct PendingSource;

    #[async_trait]
    impl MonarchSource for PendingSource {
        fn source_name(&self) -> &'static str {
            "pending"
        }

        async fn fetch_raw(&self) -> Result<Vec<RawMonarch>> {
            std::future::pending::<()>().await;
            Ok(Vec::new())
        }
    }

    fn raw(id: i64, name: &str, house: &str, years: &str) -> RawMonarch {
        RawMonarch {
            id,
            name: name.to_string(),
            country: "United Kingdom".to_string(),
            house: house.to_string(),
            years: years.to_string(),
        }
    }

    #[tokio::test]
    async fn test_pipeline_run() {
        let source = StaticSource {
            records: vec![
                raw(1, "George VI", "House of Windsor", "1936-1952"),
                raw(2, "Elizabeth II", "House of Windsor", "1952-"),
            ],
        };

        let result = StatsPipeline::run(&source, 2024).await.unwrap();

        assert_eq!(result.source_name, "static");
        assert_eq!(result.reference_year, 2024);
        assert_eq!(result.statistics.kings_count, 2);
        assert_eq!(result.statistics.longest_ruling_monarch.name, "Elizabeth II");
        assert_eq!(result.statistics.longest_ruling_house.years, 88);
    }

    #[tokio::test]
    async fn test_pipeline_rejects_malformed_record() {
        let source = StaticSource {
            records: vec![
                raw(1, "George VI", "House of Windsor", "1936-1952"),
                raw(2, "Elizabeth II", "House of Windsor", "1952-1962-1970"),
            ],
        };

        let err = StatsPipeline::run(&source, 2024).await.unwrap_err();
        assert!(matches!(err, StatsError::Format { record_id: 2, .. }));
    }

    #[tokio::test]
    async fn test_pipeline_empty_source() {
        let source = StaticSource { records: Vec::new() };
        let err = StatsPipeline::run(&source, 2024).await.unwrap_err();
        assert!(matches!(err, StatsError::EmptyInput));
    }

    #[tokio::test]
    async fn test_run_until_cancelled() {
        let err = StatsPipeline::run_until(&PendingSource, 2024, async {})
            .await
            .unwrap_err();
        assert!(matches!(err, StatsError::Cancelled));
    }

    #[tokio::test]
    async fn test_failed_signal_install_does_not_cancel() {
        let source = StaticSource {
            records: vec![raw(1, "Victoria", "House of Hanover", "1837-1901")],
        };
        let broken_signal = async {
            Err::<(), _>(std::io::Error::new(std::io::ErrorKind::Other, "no signal handler"))
        };

        let result = StatsPipeline::run_until(&source, 2024, cancel_on(broken_signal))
            .await
            .unwrap();
        assert_eq!(result.statistics.longest_ruling_monarch.years, 64);
    }

    #[tokio::test]
    async fn test_cancel_on_resolves_when_signal_fires() {
        let signal = async { Ok::<(), std::io::Error>(()) };
        let fired = tokio::time::timeout(Duration::from_secs(1), cancel_on(signal)).await;
        assert!(fired.is_ok());
    }

    #[tokio::test]
    async fn test_cancel_on_failed_signal_stays_pending() {
        let broken_signal = async {
            Err::<(), _>(std::io::Error::new(std::io::ErrorKind::Other, "no signal handler"))
        };
        let fired = tokio::time::timeout(Duration::from_millis(50), cancel_on(broken_signal)).await;
        assert!(fired.is_err());
    }

    /// Counts increments of the network-kind failure counter
    #[derive(Default)]
    struct FailureRecorder {
        network_failures: Arc<AtomicU64Counter>,
    }

    #[derive(Default)]
    struct AtomicU64Counter(AtomicU64);

    impl CounterFn for AtomicU64Counter {
        fn increment(&self, value: u64) {
            self.0.fetch_add(value, Ordering::SeqCst);
        }

        fn absolute(&self, value: u64) {
            self.0.store(value, Ordering::SeqCst);
        }
    }

    impl Recorder for FailureRecorder {
        fn describe_counter(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}
        fn describe_gauge(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}
        fn describe_histogram(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}

        fn register_counter(&self, key: &Key, _: &Metadata<'_>) -> Counter {
            let is_network_failure = key.name() == "monarch_stats_failures_total"
                && key
                    .labels()
                    .any(|l| l.key() == "kind" && l.value() == "network");
            if is_network_failure {
                Counter::from_arc(self.network_failures.clone())
            } else {
                Counter::noop()
            }
        }

        fn register_gauge(&self, _: &Key, _: &Metadata<'_>) -> Gauge {
            Gauge::noop()
        }

        fn register_histogram(&self, _: &Key, _: &Metadata<'_>) -> Histogram {
            Histogram::noop()
        }
    }

    #[test]
    fn test_cancelled_run_counts_as_network_failure() {
        let recorder = FailureRecorder::default();

        let err = metrics::with_local_recorder(&recorder, || {
            tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap()
                .block_on(StatsPipeline::run_until(&PendingSource, 2024, async {}))
                .unwrap_err()
        });

        assert!(matches!(err, StatsError::Cancelled));
        assert_eq!(recorder.network_failures.0.load(Ordering::SeqCst), 1);
    }
}
