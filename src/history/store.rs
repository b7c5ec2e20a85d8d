//! Query history for past batch reports.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use crate::types::{BatchReport, HistorySummary};

/// A recorded report.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntry {
    pub id: Uuid,
    pub report: BatchReport,
    pub created_at: DateTime<Utc>,
}

impl HistoryEntry {
    /// Create a new history entry.
    pub fn new(report: BatchReport) -> Self {
        Self {
            id: Uuid::new_v4(),
            report,
            created_at: Utc::now(),
        }
    }

    /// Query the report was recorded under.
    pub fn query(&self) -> Option<&str> {
        self.report.query.as_deref()
    }

    /// Convert to the listing type.
    pub fn to_summary(&self) -> HistorySummary {
        HistorySummary {
            id: self.id,
            query: self.report.query.clone(),
            text_count: self.report.text_count,
            sentiment: self.report.sentiment.label,
            avg_grade_level: self.report.readability.avg_grade_level,
            avg_reading_ease: self.report.readability.avg_reading_ease,
            created_at: self.created_at,
        }
    }
}

/// In-memory, newest-first log of analyzed batches.
///
/// Recording a query that is already present moves it to the front, so each
/// query appears at most once. Unlabelled batches are always kept as new
/// entries. The log never grows beyond its capacity; the oldest entries fall
/// off the back.
pub struct QueryHistory {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
}

impl QueryHistory {
    /// Create a history holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    /// Prepend a report under its query and return the entry id.
    pub fn record(&mut self, report: BatchReport) -> Uuid {
        if let Some(query) = report.query.as_deref() {
            self.entries.retain(|entry| entry.query() != Some(query));
        }

        let entry = HistoryEntry::new(report);
        let id = entry.id;
        self.entries.push_front(entry);
        self.entries.truncate(self.capacity);

        debug!(entry_id = %id, size = self.entries.len(), "Recorded history entry");
        id
    }

    /// Entries, newest first.
    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// Listing of all entries, newest first.
    pub fn summaries(&self) -> Vec<HistorySummary> {
        self.entries.iter().map(HistoryEntry::to_summary).collect()
    }

    /// Get an entry by id.
    pub fn get(&self, id: Uuid) -> Option<&HistoryEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// Most recent entry for a query.
    pub fn latest_for(&self, query: &str) -> Option<&HistoryEntry> {
        self.entries
            .iter()
            .find(|entry| entry.query() == Some(query))
    }

    /// Remove every entry, returning how many were removed.
    pub fn clear(&mut self) -> usize {
        let removed = self.entries.len();
        self.entries.clear();
        removed
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for QueryHistory {
    fn default() -> Self {
        Self::new(crate::DEFAULT_HISTORY_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::AnalysisPipeline;
    use pretty_assertions::assert_eq;

    fn report(query: &str) -> BatchReport {
        AnalysisPipeline::default().analyze(Some(query.to_string()), &[format!("{} video", query)])
    }

    fn unlabelled(text: &str) -> BatchReport {
        AnalysisPipeline::default().analyze(None, &[text.to_string()])
    }

    fn queries(history: &QueryHistory) -> Vec<Option<String>> {
        history.entries().map(|e| e.query().map(str::to_string)).collect()
    }

    #[test]
    fn test_newest_first() {
        let mut history = QueryHistory::new(10);
        history.record(report("rust"));
        history.record(report("go"));

        assert_eq!(
            queries(&history),
            vec![Some("go".to_string()), Some("rust".to_string())]
        );
    }

    #[test]
    fn test_repeat_query_moves_to_front() {
        let mut history = QueryHistory::new(10);
        let first = history.record(report("rust"));
        history.record(report("go"));
        let second = history.record(report("rust"));

        assert_eq!(history.len(), 2);
        assert_ne!(first, second);
        assert!(history.get(first).is_none());
        assert_eq!(history.latest_for("rust").unwrap().id, second);
        assert_eq!(
            queries(&history),
            vec![Some("rust".to_string()), Some("go".to_string())]
        );
    }

    #[test]
    fn test_unlabelled_batches_are_kept() {
        let mut history = QueryHistory::new(10);
        history.record(unlabelled("a"));
        history.record(unlabelled("b"));
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_capacity_drops_oldest() {
        let mut history = QueryHistory::new(2);
        history.record(report("one"));
        history.record(report("two"));
        history.record(report("three"));

        assert_eq!(
            queries(&history),
            vec![Some("three".to_string()), Some("two".to_string())]
        );
    }

    #[test]
    fn test_clear() {
        let mut history = QueryHistory::new(5);
        let id = history.record(report("rust"));
        assert_eq!(history.summaries()[0].id, id);

        assert_eq!(history.clear(), 1);
        assert!(history.is_empty());
        assert!(history.get(id).is_none());
    }

    #[test]
    fn test_entry_query_comes_from_report() {
        let mut history = QueryHistory::new(5);
        let id = history.record(report("rust"));
        let entry = history.get(id).unwrap();

        assert_eq!(entry.query(), Some("rust"));
        assert_eq!(entry.to_summary().query.as_deref(), Some("rust"));

        let json = serde_json::to_value(entry).unwrap();
        assert!(json.get("query").is_none());
        assert_eq!(json["report"]["query"], "rust");
    }
}
