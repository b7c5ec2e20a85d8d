//! Lexicon-based batch sentiment.
//!
//! Every text is lowercased and each lexicon term is counted as a literal,
//! non-overlapping substring, so emoticons such as `:)` match verbatim and
//! `"unhappy"` registers both `"happy"` and `"unhappy"`. Hits are summed over
//! the whole batch and a label is picked once for the batch.

use std::sync::Arc;

use lazy_static::lazy_static;
use tracing::debug;

use super::base::Analyzer;
use crate::types::{AnalysisSection, SentimentLabel, SentimentReport};

/// Share of hits one polarity needs before the batch gets its label.
pub const DEFAULT_DOMINANCE_THRESHOLD: f64 = 0.7;

/// Built-in positive words and emoticons.
pub const POSITIVE_TERMS: &[&str] = &[
    "happy", "joy", "awesome", "fantastic", "great", "wonderful", "love", "excited", "amazing",
    "glad", "delight", "positive", "cheerful", "smile", "grin", "yay", "cool", "fabulous",
    "splendid", "charming", "blissful", "content", "pleased", "satisfied", ":-)", ":)", ":D",
    "😊", "😃", "😁", "😄", "🥳", "😆", "🤗",
];

/// Built-in negative words and emoticons.
pub const NEGATIVE_TERMS: &[&str] = &[
    "sad", "down", "terrible", "unhappy", "disappointed", "upset", "depress", "bad", "negative",
    "gloomy", "heartbroken", "mourn", "sorrow", "cry", "miserable", "grief", "pain", "hurt",
    "broken-hearted", "unfortunate", "woeful", "dismal", ":-(", ":(", ":'(", "😢", "😭", "😞",
    "😔", "😟", "😩", "😫", "😖", "😿",
];

lazy_static! {
    static ref DEFAULT_LEXICON: Arc<Lexicon> = Arc::new(Lexicon::new(
        POSITIVE_TERMS.iter().copied(),
        NEGATIVE_TERMS.iter().copied(),
    ));
}

/// Positive and negative term sets plus the dominance threshold.
#[derive(Debug, Clone)]
pub struct Lexicon {
    positive: Vec<String>,
    negative: Vec<String>,
    threshold: f64,
}

impl Lexicon {
    /// Build a lexicon from term lists.
    ///
    /// Terms are lowercased to match the lowercased text; empty terms are dropped.
    pub fn new<'a>(
        positive: impl IntoIterator<Item = &'a str>,
        negative: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        Self {
            positive: normalize_terms(positive),
            negative: normalize_terms(negative),
            threshold: DEFAULT_DOMINANCE_THRESHOLD,
        }
    }

    /// The shared built-in lexicon.
    pub fn builtin() -> Arc<Self> {
        Arc::clone(&DEFAULT_LEXICON)
    }

    /// Set the dominance threshold.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn positive_terms(&self) -> &[String] {
        &self.positive
    }

    pub fn negative_terms(&self) -> &[String] {
        &self.negative
    }

    /// Positive hits in already-lowercased text.
    pub fn positive_hits(&self, lowered: &str) -> usize {
        count_terms(lowered, &self.positive)
    }

    /// Negative hits in already-lowercased text.
    pub fn negative_hits(&self, lowered: &str) -> usize {
        count_terms(lowered, &self.negative)
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::new(POSITIVE_TERMS.iter().copied(), NEGATIVE_TERMS.iter().copied())
    }
}

fn normalize_terms<'a>(terms: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    terms
        .into_iter()
        .filter(|t| !t.is_empty())
        .map(|t| t.to_lowercase())
        .collect()
}

fn count_terms(haystack: &str, terms: &[String]) -> usize {
    terms
        .iter()
        .map(|term| haystack.matches(term.as_str()).count())
        .sum()
}

/// Classifies a batch of texts into one sentiment label.
pub struct SentimentClassifier {
    lexicon: Arc<Lexicon>,
}

impl SentimentClassifier {
    /// Create a classifier backed by the built-in lexicon.
    pub fn new() -> Self {
        Self {
            lexicon: Lexicon::builtin(),
        }
    }

    /// Create a classifier with a custom lexicon.
    pub fn with_lexicon(lexicon: Lexicon) -> Self {
        Self {
            lexicon: Arc::new(lexicon),
        }
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Aggregate label for the batch.
    pub fn classify(&self, texts: &[String]) -> SentimentLabel {
        self.report(texts).label
    }

    /// Label plus the hit counts behind it.
    pub fn report(&self, texts: &[String]) -> SentimentReport {
        let (positive_hits, negative_hits) =
            texts.iter().fold((0, 0), |(positive, negative), text| {
                let lowered = text.to_lowercase();
                (
                    positive + self.lexicon.positive_hits(&lowered),
                    negative + self.lexicon.negative_hits(&lowered),
                )
            });

        let total = positive_hits + negative_hits;
        let (positive_ratio, negative_ratio) = if total == 0 {
            (0.0, 0.0)
        } else {
            (
                positive_hits as f64 / total as f64,
                negative_hits as f64 / total as f64,
            )
        };

        let label = if total == 0 {
            SentimentLabel::Neutral
        } else if positive_ratio > self.lexicon.threshold {
            SentimentLabel::Positive
        } else if negative_ratio > self.lexicon.threshold {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        };

        debug!(
            texts = texts.len(),
            positive_hits,
            negative_hits,
            label = %label,
            "Classified batch sentiment"
        );

        SentimentReport {
            label,
            positive_hits,
            negative_hits,
            positive_ratio,
            negative_ratio,
        }
    }
}

impl Default for SentimentClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer for SentimentClassifier {
    fn name(&self) -> &'static str {
        "sentiment"
    }

    fn description(&self) -> &'static str {
        "Single batch label from weighted positive/negative lexicon hits"
    }

    fn analyze(&self, texts: &[String]) -> AnalysisSection {
        AnalysisSection::Sentiment(self.report(texts))
    }
}
