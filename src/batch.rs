//! Concurrent analysis of several independent batches.

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use tracing::{info, warn};

use crate::pipeline::AnalysisPipeline;
use crate::types::{BatchFailure, BatchReport, NamedBatch};
use crate::DEFAULT_MAX_CONCURRENT_BATCHES;

/// Configuration for batch processing.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Maximum batches to analyze concurrently
    pub concurrency: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_MAX_CONCURRENT_BATCHES,
        }
    }
}

/// Result of processing several batches.
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    pub total_batches: usize,
    /// Reports for the batches that completed, in input order
    pub reports: Vec<BatchReport>,
    /// Batches whose analysis task failed
    pub errors: Vec<BatchFailure>,
}

/// Analyzes independent batches on the blocking pool.
pub struct BatchProcessor {
    pipeline: Arc<AnalysisPipeline>,
    config: BatchConfig,
}

impl BatchProcessor {
    /// Create a new batch processor.
    pub fn new(pipeline: Arc<AnalysisPipeline>, config: BatchConfig) -> Self {
        Self { pipeline, config }
    }

    /// Analyze every batch, at most `concurrency` at a time.
    pub async fn process(&self, batches: Vec<NamedBatch>) -> BatchOutcome {
        self.process_with(batches, |pipeline, batch| {
            pipeline.analyze(batch.query, &batch.texts)
        })
        .await
    }

    /// Run `analyze` for every batch on the blocking pool.
    ///
    /// A task that panics is reported in `errors` under its input index; the
    /// other batches still complete.
    async fn process_with(
        &self,
        batches: Vec<NamedBatch>,
        analyze: fn(&AnalysisPipeline, NamedBatch) -> BatchReport,
    ) -> BatchOutcome {
        let total_batches = batches.len();
        info!(total_batches, concurrency = self.config.concurrency, "Starting bulk analysis");

        let results: Vec<(usize, Result<BatchReport, String>)> = stream::iter(
            batches.into_iter().enumerate(),
        )
        .map(|(index, batch)| {
            let pipeline = Arc::clone(&self.pipeline);
            async move {
                let result = tokio::task::spawn_blocking(move || analyze(&pipeline, batch))
                    .await
                    .map_err(|e| e.to_string());
                (index, result)
            }
        })
        .buffered(self.config.concurrency.max(1))
        .collect()
        .await;

        let mut reports = Vec::with_capacity(total_batches);
        let mut errors = Vec::new();

        for (index, result) in results {
            match result {
                Ok(report) => reports.push(report),
                Err(error) => {
                    warn!(index, error = %error, "Batch analysis failed");
                    errors.push(BatchFailure { index, error });
                }
            }
        }

        info!(
            completed = reports.len(),
            failed = errors.len(),
            "Bulk analysis complete"
        );

        BatchOutcome {
            total_batches,
            reports,
            errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SentimentLabel;

    fn named(query: &str, texts: &[&str]) -> NamedBatch {
        NamedBatch::new(
            Some(query.to_string()),
            texts.iter().map(|t| t.to_string()).collect(),
        )
    }

    #[test]
    fn test_reports_keep_input_order() {
        let processor = BatchProcessor::new(
            Arc::new(AnalysisPipeline::default()),
            BatchConfig { concurrency: 2 },
        );
        let batches = vec![
            named("joy", &["happy happy :)"]),
            named("gloom", &["sad and terrible :("]),
            named("empty", &[]),
        ];

        let outcome = tokio_test::block_on(processor.process(batches));

        assert_eq!(outcome.total_batches, 3);
        assert!(outcome.errors.is_empty());
        let queries: Vec<_> = outcome
            .reports
            .iter()
            .map(|r| r.query.clone().unwrap())
            .collect();
        assert_eq!(queries, vec!["joy", "gloom", "empty"]);
        assert_eq!(outcome.reports[0].sentiment.label, SentimentLabel::Positive);
        assert_eq!(outcome.reports[1].sentiment.label, SentimentLabel::Negative);
        assert_eq!(outcome.reports[2].text_count, 0);
    }

    #[test]
    fn test_no_batches() {
        let processor =
            BatchProcessor::new(Arc::new(AnalysisPipeline::default()), BatchConfig::default());
        let outcome = tokio_test::block_on(processor.process(Vec::new()));

        assert_eq!(outcome.total_batches, 0);
        assert!(outcome.reports.is_empty());
    }

    #[test]
    fn test_failed_batch_is_reported() {
        let processor = BatchProcessor::new(
            Arc::new(AnalysisPipeline::default()),
            BatchConfig { concurrency: 2 },
        );
        let batches = vec![
            named("joy", &["happy"]),
            named("broken", &["whatever"]),
            named("gloom", &["sad"]),
        ];

        let outcome = tokio_test::block_on(processor.process_with(batches, |pipeline, batch| {
            if batch.query.as_deref() == Some("broken") {
                panic!("analyzer crashed");
            }
            pipeline.analyze(batch.query, &batch.texts)
        }));

        assert_eq!(outcome.total_batches, 3);
        assert_eq!(outcome.errors.len(), 1);
        assert_eq!(outcome.errors[0].index, 1);
        assert!(outcome.errors[0].error.contains("panic"));
        let queries: Vec<_> = outcome
            .reports
            .iter()
            .map(|r| r.query.clone().unwrap())
            .collect();
        assert_eq!(queries, vec!["joy", "gloom"]);
    }
}
