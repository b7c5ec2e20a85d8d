//! Analysis pipeline that composes the analyzers over one batch.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use crate::analyzers::{Analyzer, ReadabilityScorer, SentimentClassifier, WordFrequencyAnalyzer};
use crate::error::{AnalyticsError, AnalyticsResult};
use crate::types::{AnalysisSection, AnalyticsConfig, BatchReport};

/// Runs the readability, sentiment and word frequency analyzers over a batch.
///
/// The analyzers never see each other's output. The pipeline hands every one
/// of them the same batch and combines what they return.
pub struct AnalysisPipeline {
    /// Readability scorer
    readability: Arc<ReadabilityScorer>,
    /// Batch sentiment classifier
    sentiment: Arc<SentimentClassifier>,
    /// Word frequency analyzer
    word_frequency: Arc<WordFrequencyAnalyzer>,
    /// Ranked words shown to clients
    top_words: usize,
}

impl AnalysisPipeline {
    /// Create a new pipeline with the given configuration.
    pub fn new(config: &AnalyticsConfig) -> Self {
        Self {
            readability: Arc::new(ReadabilityScorer::new()),
            sentiment: Arc::new(SentimentClassifier::new()),
            word_frequency: Arc::new(
                WordFrequencyAnalyzer::new().with_extra_stop_words(&config.extra_stop_words),
            ),
            top_words: config.top_words,
        }
    }

    /// Analyze one batch with every analyzer.
    pub fn analyze(&self, query: Option<String>, texts: &[String]) -> BatchReport {
        debug!(query = ?query, texts = texts.len(), "Analyzing batch");

        let readability = self.readability.batch_average(texts);
        let sentiment = self.sentiment.report(texts);
        let word_frequencies = self.word_frequency.ranked_frequencies(texts);

        info!(
            query = ?query,
            texts = texts.len(),
            sentiment = %sentiment.label,
            avg_grade_level = readability.avg_grade_level,
            distinct_words = word_frequencies.len(),
            "Batch analyzed"
        );

        BatchReport {
            query,
            text_count: texts.len(),
            readability,
            sentiment,
            word_frequencies,
            analyzed_at: Utc::now(),
        }
    }

    /// Run only the named analyzers, returning their sections in request order.
    pub fn analyze_with(
        &self,
        names: &[&str],
        texts: &[String],
    ) -> AnalyticsResult<Vec<AnalysisSection>> {
        let analyzers = names
            .iter()
            .map(|name| {
                self.get_analyzer_by_name(name)
                    .ok_or_else(|| AnalyticsError::UnknownAnalyzer(name.to_string()))
            })
            .collect::<AnalyticsResult<Vec<_>>>()?;

        Ok(analyzers.iter().map(|a| a.analyze(texts)).collect())
    }

    /// Get an analyzer by name.
    pub fn get_analyzer_by_name(&self, name: &str) -> Option<Arc<dyn Analyzer>> {
        match name.to_lowercase().as_str() {
            "readability" => Some(Arc::clone(&self.readability) as Arc<dyn Analyzer>),
            "sentiment" => Some(Arc::clone(&self.sentiment) as Arc<dyn Analyzer>),
            "word_frequency" | "words" | "frequency" => {
                Some(Arc::clone(&self.word_frequency) as Arc<dyn Analyzer>)
            }
            _ => None,
        }
    }

    /// List all available analyzers.
    pub fn list_analyzers(&self) -> Vec<(&'static str, &'static str)> {
        vec![
            (self.readability.name(), self.readability.description()),
            (self.sentiment.name(), self.sentiment.description()),
            (self.word_frequency.name(), self.word_frequency.description()),
        ]
    }

    /// Number of ranked words shown to clients.
    pub fn top_words(&self) -> usize {
        self.top_words
    }
}

impl Default for AnalysisPipeline {
    fn default() -> Self {
        Self::new(&AnalyticsConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SentimentLabel;

    fn batch(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_full_report() {
        let pipeline = AnalysisPipeline::default();
        let texts = batch(&["I am so happy and joyful :)", "happy happy happy"]);
        let report = pipeline.analyze(Some("happy songs".to_string()), &texts);

        assert_eq!(report.query.as_deref(), Some("happy songs"));
        assert_eq!(report.text_count, 2);
        assert_eq!(report.readability.per_text.len(), 2);
        assert_eq!(report.sentiment.label, SentimentLabel::Positive);
        assert_eq!(report.word_frequencies.words()[0], "happy");
        assert_eq!(report.word_frequencies.get("happy"), Some(4));
    }

    #[test]
    fn test_empty_batch_defaults() {
        let pipeline = AnalysisPipeline::default();
        let report = pipeline.analyze(None, &[]);

        assert_eq!(report.text_count, 0);
        assert_eq!(report.readability.avg_grade_level, 0.0);
        assert_eq!(report.readability.avg_reading_ease, 0.0);
        assert_eq!(report.sentiment.label, SentimentLabel::Neutral);
        assert!(report.word_frequencies.is_empty());
    }

    #[test]
    fn test_extra_stop_words_from_config() {
        let config = AnalyticsConfig {
            extra_stop_words: vec!["official".to_string()],
            ..Default::default()
        };
        let pipeline = AnalysisPipeline::new(&config);
        let report = pipeline.analyze(None, &batch(&["Official trailer"]));

        assert_eq!(report.word_frequencies.words(), vec!["trailer"]);
    }

    #[test]
    fn test_analyzer_lookup() {
        let pipeline = AnalysisPipeline::default();
        assert_eq!(
            pipeline.get_analyzer_by_name("Sentiment").unwrap().name(),
            "sentiment"
        );
        assert_eq!(
            pipeline.get_analyzer_by_name("words").unwrap().name(),
            "word_frequency"
        );
        assert!(pipeline.get_analyzer_by_name("toxicity").is_none());
        assert_eq!(pipeline.list_analyzers().len(), 3);
    }

    #[test]
    fn test_analyze_with_selected() {
        let pipeline = AnalysisPipeline::default();
        let texts = batch(&["sad sad day"]);
        let sections = pipeline
            .analyze_with(&["sentiment", "readability"], &texts)
            .unwrap();

        assert_eq!(sections.len(), 2);
        assert!(matches!(
            &sections[0],
            AnalysisSection::Sentiment(report) if report.label == SentimentLabel::Negative
        ));
        assert!(matches!(&sections[1], AnalysisSection::Readability(_)));
    }

    #[test]
    fn test_analyze_with_unknown_name() {
        let pipeline = AnalysisPipeline::default();
        let err = pipeline.analyze_with(&["sentiment", "tone"], &[]).unwrap_err();
        assert!(matches!(err, AnalyticsError::UnknownAnalyzer(name) if name == "tone"));
    }
}
