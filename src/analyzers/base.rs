//! Base trait for all analyzers.

use crate::types::AnalysisSection;

/// The core trait that all analyzers implement.
///
/// An analyzer consumes a whole batch and produces one section of the
/// combined report. Implementations hold only immutable configuration, so a
/// single instance can serve concurrent batches.
pub trait Analyzer: Send + Sync {
    /// Get the name of this analyzer.
    fn name(&self) -> &'static str;

    /// Analyze the given batch of texts.
    fn analyze(&self, texts: &[String]) -> AnalysisSection;

    /// Get the description of this analyzer.
    fn description(&self) -> &'static str {
        "A text analyzer"
    }
}
