//! Text analyzers.
//!
//! Three independent, stateless components run over the same batch:
//! readability scoring, lexicon sentiment and word frequency ranking.

mod base;
mod readability;
mod sentiment;
mod word_frequency;

pub use base::Analyzer;
pub use readability::{
    count_sentences, count_syllables, count_words, text_syllables, ReadabilityScorer,
};
pub use sentiment::{
    Lexicon, SentimentClassifier, DEFAULT_DOMINANCE_THRESHOLD, NEGATIVE_TERMS, POSITIVE_TERMS,
};
pub use word_frequency::{tokenize, WordFrequencyAnalyzer, DEFAULT_STOP_WORDS};
