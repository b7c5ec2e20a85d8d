//! Request and response definitions for the HTTP API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{BatchReport, SentimentLabel, WordFrequencyTable};

fn default_record() -> bool {
    true
}

/// Request to analyze one batch with every analyzer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    /// Query or label the texts were collected for
    #[serde(default)]
    pub query: Option<String>,

    /// Texts to analyze
    #[serde(default)]
    pub texts: Vec<String>,

    /// Whether to keep the report in the query history
    #[serde(default = "default_record")]
    pub record: bool,
}

/// Request to run a single analyzer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerRequest {
    #[serde(default)]
    pub texts: Vec<String>,
}

/// A labelled batch of texts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamedBatch {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub texts: Vec<String>,
}

impl NamedBatch {
    pub fn new(query: Option<String>, texts: Vec<String>) -> Self {
        Self { query, texts }
    }
}

/// Request to analyze several independent batches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkAnalyzeRequest {
    pub batches: Vec<NamedBatch>,
}

/// Display scores for one text, rounded to two decimal places.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextScore {
    pub index: usize,
    pub grade_level: f64,
    pub reading_ease: f64,
}

/// Sentiment as shown to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentView {
    pub label: SentimentLabel,
    pub emoticon: String,
    pub positive_hits: usize,
    pub negative_hits: usize,
}

/// Response for a full analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    /// History entry id, when the report was recorded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history_id: Option<Uuid>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,

    pub text_count: usize,

    pub scores: Vec<TextScore>,

    pub avg_grade_level: f64,

    pub avg_reading_ease: f64,

    pub sentiment: SentimentView,

    /// Highest-ranked words, limited to the configured display size
    pub word_frequencies: WordFrequencyTable,

    pub analyzed_at: DateTime<Utc>,
}

impl AnalyzeResponse {
    /// Build the client view of a report.
    pub fn from_report(
        report: &BatchReport,
        top_words: usize,
        history_id: Option<Uuid>,
    ) -> Self {
        let scores = report
            .readability
            .per_text
            .iter()
            .enumerate()
            .map(|(index, result)| TextScore {
                index,
                grade_level: round2(result.grade_level),
                reading_ease: round2(result.reading_ease),
            })
            .collect();

        Self {
            history_id,
            query: report.query.clone(),
            text_count: report.text_count,
            scores,
            avg_grade_level: round2(report.readability.avg_grade_level),
            avg_reading_ease: round2(report.readability.avg_reading_ease),
            sentiment: SentimentView {
                label: report.sentiment.label,
                emoticon: report.sentiment.label.emoticon().to_string(),
                positive_hits: report.sentiment.positive_hits,
                negative_hits: report.sentiment.negative_hits,
            },
            word_frequencies: report.word_frequencies.top(top_words),
            analyzed_at: report.analyzed_at,
        }
    }
}

/// Error for one batch of a bulk request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchFailure {
    pub index: usize,
    pub error: String,
}

/// Response for a bulk analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkAnalyzeResponse {
    pub total_batches: usize,
    pub results: Vec<AnalyzeResponse>,
    pub errors: Vec<BatchFailure>,
}

/// One line of the query history listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistorySummary {
    pub id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    pub text_count: usize,
    pub sentiment: SentimentLabel,
    pub avg_grade_level: f64,
    pub avg_reading_ease: f64,
    pub created_at: DateTime<Utc>,
}

/// Response for clearing the history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClearHistoryResponse {
    pub removed: usize,
}

/// Round a score to two decimal places for display.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(round2(-2.6199999), -2.62);
        assert_eq!(round2(119.19), 119.19);
        assert_eq!(round2(0.0), 0.0);
        assert_eq!(round2(1.005_1), 1.01);
    }

    #[test]
    fn test_analyze_request_defaults() {
        let request: AnalyzeRequest = serde_json::from_str(r#"{"texts": ["a"]}"#).unwrap();
        assert!(request.record);
        assert!(request.query.is_none());
        assert_eq!(request.texts, vec!["a".to_string()]);
    }
}
