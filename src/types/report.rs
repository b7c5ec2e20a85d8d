//! Analysis result types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Readability scores for a single text.
///
/// Both scores are `0.0` when the text has zero words or zero sentences.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ReadabilityResult {
    /// Flesch-Kincaid grade level
    pub grade_level: f64,

    /// Flesch reading ease
    pub reading_ease: f64,

    /// Whitespace-delimited word count
    pub words: usize,

    /// Segment count after splitting on `.`, `!` and `?`
    pub sentences: usize,

    /// Heuristic syllable count summed over all words
    pub syllables: usize,
}

impl ReadabilityResult {
    /// Whether the scores fell back to the neutral default.
    pub fn is_degenerate(&self) -> bool {
        self.words == 0 || self.sentences == 0
    }
}

/// Readability scores for a whole batch.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BatchReadability {
    /// Per-text results, in input order
    pub per_text: Vec<ReadabilityResult>,

    /// Mean grade level, `0.0` for an empty batch
    pub avg_grade_level: f64,

    /// Mean reading ease, `0.0` for an empty batch
    pub avg_reading_ease: f64,
}

/// Aggregate sentiment of a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    /// Face glyph used when displaying the label.
    pub fn emoticon(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => ":-)",
            SentimentLabel::Negative => ":-(",
            SentimentLabel::Neutral => ":-|",
        }
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SentimentLabel::Positive => write!(f, "POSITIVE"),
            SentimentLabel::Negative => write!(f, "NEGATIVE"),
            SentimentLabel::Neutral => write!(f, "NEUTRAL"),
        }
    }
}

/// Sentiment label together with the lexicon hit counts it was derived from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentReport {
    pub label: SentimentLabel,
    pub positive_hits: usize,
    pub negative_hits: usize,
    /// `positive_hits / total`, `0.0` when there were no hits
    pub positive_ratio: f64,
    /// `negative_hits / total`, `0.0` when there were no hits
    pub negative_ratio: f64,
}

impl SentimentReport {
    /// Total lexicon hits across the batch.
    pub fn total_hits(&self) -> usize {
        self.positive_hits + self.negative_hits
    }
}

/// A single word and its occurrence count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
}

/// Ordered word to count mapping.
///
/// Keys are unique. The order is whatever the producer established: first-seen
/// order out of frequency counting, descending count after ranking.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WordFrequencyTable {
    entries: Vec<WordCount>,
}

impl WordFrequencyTable {
    /// Build a table from already-unique entries, keeping their order.
    pub fn from_entries(entries: Vec<WordCount>) -> Self {
        Self { entries }
    }

    /// Count for `word`, if present.
    pub fn get(&self, word: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|entry| entry.word == word)
            .map(|entry| entry.count)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &WordCount> {
        self.entries.iter()
    }

    /// Words in table order.
    pub fn words(&self) -> Vec<&str> {
        self.entries.iter().map(|entry| entry.word.as_str()).collect()
    }

    /// Sum of all counts.
    pub fn total_count(&self) -> usize {
        self.entries.iter().map(|entry| entry.count).sum()
    }

    /// The first `n` entries, in table order.
    pub fn top(&self, n: usize) -> Self {
        Self {
            entries: self.entries.iter().take(n).cloned().collect(),
        }
    }

    pub fn as_slice(&self) -> &[WordCount] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<WordCount> {
        self.entries
    }
}

/// Output of a single analyzer, tagged with the analyzer that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "analyzer", content = "result", rename_all = "snake_case")]
pub enum AnalysisSection {
    Readability(BatchReadability),
    Sentiment(SentimentReport),
    WordFrequency(WordFrequencyTable),
}

/// Combined output of all three analyzers for one batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    /// Query or label the caller attached to the batch
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,

    /// Number of texts in the batch
    pub text_count: usize,

    pub readability: BatchReadability,

    pub sentiment: SentimentReport,

    /// Full ranked frequency table
    pub word_frequencies: WordFrequencyTable,

    /// When the batch was analyzed
    pub analyzed_at: DateTime<Utc>,
}
