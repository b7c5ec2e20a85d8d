//! Word frequency counting and ranking across a batch.

use std::collections::{HashMap, HashSet};

use lazy_static::lazy_static;
use regex::Regex;

use super::base::Analyzer;
use crate::types::{AnalysisSection, WordCount, WordFrequencyTable};

/// Common words excluded from frequency counts.
pub const DEFAULT_STOP_WORDS: &[&str] = &["the", "and", "is", "in", "with", "a", "of", "to"];

lazy_static! {
    // ASCII word characters only; any other character, accented letters
    // included, separates tokens.
    static ref NON_WORD: Regex = Regex::new(r"[^a-z0-9_]+").expect("non-word pattern is valid");
}

/// Lowercase `text` and split it on runs of characters outside `[a-z0-9_]`.
///
/// Empty tokens are discarded. Stop words are not removed here.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    NON_WORD
        .split(&lowered)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Counts and ranks words across a batch.
pub struct WordFrequencyAnalyzer {
    stop_words: HashSet<String>,
}

impl WordFrequencyAnalyzer {
    /// Create an analyzer with the built-in stop words.
    pub fn new() -> Self {
        Self::with_stop_words(DEFAULT_STOP_WORDS.iter().copied())
    }

    /// Create an analyzer with a custom stop word set.
    pub fn with_stop_words<'a>(stop_words: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            stop_words: stop_words.into_iter().map(|w| w.to_lowercase()).collect(),
        }
    }

    /// Add stop words on top of the current set.
    pub fn with_extra_stop_words<S: AsRef<str>>(mut self, extra: &[S]) -> Self {
        self.stop_words
            .extend(extra.iter().map(|w| w.as_ref().to_lowercase()));
        self
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    /// Count every non-stop-word token across the batch.
    ///
    /// The returned table is in first-seen order.
    pub fn frequencies(&self, texts: &[String]) -> WordFrequencyTable {
        let mut positions: HashMap<String, usize> = HashMap::new();
        let mut entries: Vec<WordCount> = Vec::new();

        for token in texts.iter().flat_map(|text| tokenize(text)) {
            if self.is_stop_word(&token) {
                continue;
            }

            match positions.get(&token) {
                Some(&index) => entries[index].count += 1,
                None => {
                    positions.insert(token.clone(), entries.len());
                    entries.push(WordCount {
                        word: token,
                        count: 1,
                    });
                }
            }
        }

        WordFrequencyTable::from_entries(entries)
    }

    /// Reorder by descending count.
    ///
    /// The sort is stable, so tied words keep their existing relative order.
    /// Nothing is filtered.
    pub fn rank(&self, table: &WordFrequencyTable) -> WordFrequencyTable {
        let mut entries = table.as_slice().to_vec();
        entries.sort_by(|a, b| b.count.cmp(&a.count));
        WordFrequencyTable::from_entries(entries)
    }

    /// Frequencies for the batch, already ranked.
    pub fn ranked_frequencies(&self, texts: &[String]) -> WordFrequencyTable {
        self.rank(&self.frequencies(texts))
    }
}

impl Default for WordFrequencyAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer for WordFrequencyAnalyzer {
    fn name(&self) -> &'static str {
        "word_frequency"
    }

    fn description(&self) -> &'static str {
        "Ranked word counts across the batch with stop words removed"
    }

    fn analyze(&self, texts: &[String]) -> AnalysisSection {
        AnalysisSection::WordFrequency(self.ranked_frequencies(texts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn batch(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|t| t.to_string()).collect()
    }

    fn pairs(table: &WordFrequencyTable) -> Vec<(&str, usize)> {
        table.iter().map(|e| (e.word.as_str(), e.count)).collect()
    }

    #[test]
    fn test_punctuation_separates_tokens() {
        assert_eq!(tokenize("great!!awesome??"), vec!["great", "awesome"]);
        assert_eq!(tokenize("  ...Leading, trailing!  "), vec!["leading", "trailing"]);
        assert_eq!(tokenize("top_10 videos 2024"), vec!["top_10", "videos", "2024"]);
        assert!(tokenize("?!... 😊").is_empty());
    }

    #[test]
    fn test_frequencies_across_batch() {
        let analyzer = WordFrequencyAnalyzer::new();
        let texts = batch(&["The cat and the dog", "A dog runs"]);
        let table = analyzer.frequencies(&texts);

        assert_eq!(pairs(&table), vec![("cat", 1), ("dog", 2), ("runs", 1)]);
    }

    #[test]
    fn test_rank_orders_by_count_then_first_seen() {
        let analyzer = WordFrequencyAnalyzer::new();
        let texts = batch(&["The cat and the dog", "A dog runs"]);
        let ranked = analyzer.ranked_frequencies(&texts);

        assert_eq!(pairs(&ranked), vec![("dog", 2), ("cat", 1), ("runs", 1)]);
    }

    #[test]
    fn test_rank_is_idempotent() {
        let analyzer = WordFrequencyAnalyzer::new();
        let texts = batch(&["b a c b c c d", "e d"]);
        let once = analyzer.ranked_frequencies(&texts);
        let twice = analyzer.rank(&once);

        assert_eq!(once, twice);
        assert_eq!(pairs(&once), vec![("c", 3), ("b", 2), ("d", 2), ("e", 1)]);
    }

    #[test]
    fn test_empty_batch() {
        let analyzer = WordFrequencyAnalyzer::new();
        assert!(analyzer.frequencies(&[]).is_empty());
        assert!(analyzer.ranked_frequencies(&batch(&["", "   "])).is_empty());
    }

    #[test]
    fn test_stop_words_never_appear() {
        let analyzer = WordFrequencyAnalyzer::new();
        let texts = batch(&["The IS in WITH of To a AND the"]);
        assert!(analyzer.frequencies(&texts).is_empty());
    }

    #[test]
    fn test_extra_stop_words() {
        let analyzer = WordFrequencyAnalyzer::new().with_extra_stop_words(&["Official", "video"]);
        let texts = batch(&["Official music video", "music video"]);
        let ranked = analyzer.ranked_frequencies(&texts);

        assert_eq!(pairs(&ranked), vec![("music", 2)]);
    }

    #[test]
    fn test_non_ascii_characters_split_words() {
        assert_eq!(tokenize("Café noir"), vec!["caf", "noir"]);
        assert_eq!(tokenize("top٣ naïve"), vec!["top", "na", "ve"]);

        let analyzer = WordFrequencyAnalyzer::new();
        let texts = batch(&["Café au lait, café noir"]);
        let ranked = analyzer.ranked_frequencies(&texts);

        assert_eq!(ranked.get("caf"), Some(2));
        assert_eq!(ranked.get("café"), None);
    }
}
