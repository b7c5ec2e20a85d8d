//! Readability scoring with the Flesch-Kincaid grade level and Flesch reading ease.
//!
//! Grade level: `0.39 * (words/sentences) + 11.8 * (syllables/words) - 15.59`
//!
//! Reading ease: `206.835 - 1.015 * (words/sentences) - 84.6 * (syllables/words)`
//!
//! Sentence segmentation is a raw split on `.`, `!` and `?`. Empty segments,
//! including the one after a trailing terminator, are counted as sentences.
//! Scores published for existing snippets depend on this, so it must not be
//! tightened here.

use super::base::Analyzer;
use crate::types::{AnalysisSection, BatchReadability, ReadabilityResult};

const VOWELS: &str = "aeiouy";

/// Scores texts for readability.
pub struct ReadabilityScorer;

impl ReadabilityScorer {
    /// Create a new readability scorer.
    pub fn new() -> Self {
        Self
    }

    /// Score a single text.
    pub fn score(&self, text: &str) -> ReadabilityResult {
        let words = count_words(text);
        let sentences = count_sentences(text);
        let syllables = text_syllables(text);

        if words == 0 || sentences == 0 {
            return ReadabilityResult {
                grade_level: 0.0,
                reading_ease: 0.0,
                words,
                sentences,
                syllables,
            };
        }

        let words_per_sentence = words as f64 / sentences as f64;
        let syllables_per_word = syllables as f64 / words as f64;

        ReadabilityResult {
            grade_level: 0.39 * words_per_sentence + 11.8 * syllables_per_word - 15.59,
            reading_ease: 206.835 - 1.015 * words_per_sentence - 84.6 * syllables_per_word,
            words,
            sentences,
            syllables,
        }
    }

    /// Score every text and average both metrics over the batch.
    ///
    /// An empty batch averages to `0.0` for both metrics.
    pub fn batch_average(&self, texts: &[String]) -> BatchReadability {
        let per_text: Vec<ReadabilityResult> = texts.iter().map(|t| self.score(t)).collect();

        if per_text.is_empty() {
            return BatchReadability::default();
        }

        let n = per_text.len() as f64;
        let avg_grade_level = per_text.iter().map(|r| r.grade_level).sum::<f64>() / n;
        let avg_reading_ease = per_text.iter().map(|r| r.reading_ease).sum::<f64>() / n;

        BatchReadability {
            per_text,
            avg_grade_level,
            avg_reading_ease,
        }
    }
}

impl Default for ReadabilityScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer for ReadabilityScorer {
    fn name(&self) -> &'static str {
        "readability"
    }

    fn description(&self) -> &'static str {
        "Flesch-Kincaid grade level and Flesch reading ease per text, with batch averages"
    }

    fn analyze(&self, texts: &[String]) -> AnalysisSection {
        AnalysisSection::Readability(self.batch_average(texts))
    }
}

/// Count whitespace-delimited words. Blank text has no words.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Count segments produced by splitting on sentence terminators.
pub fn count_sentences(text: &str) -> usize {
    text.split(|c: char| matches!(c, '.' | '!' | '?')).count()
}

/// Heuristic syllable count for one word.
///
/// Counts maximal vowel runs (`y` included) in the lowercased, letters-only
/// word, drops a trailing silent `e` when more than one run was found, and
/// never returns less than 1.
pub fn count_syllables(word: &str) -> usize {
    let cleaned: String = word
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase())
        .collect();

    let mut count = 0;
    let mut last_was_vowel = false;
    for c in cleaned.chars() {
        let is_vowel = VOWELS.contains(c);
        if is_vowel && !last_was_vowel {
            count += 1;
        }
        last_was_vowel = is_vowel;
    }

    if cleaned.ends_with('e') && count > 1 {
        count -= 1;
    }

    count.max(1)
}

/// Syllables summed over every whitespace-delimited word of `text`.
pub fn text_syllables(text: &str) -> usize {
    text.split_whitespace().map(count_syllables).sum()
}
