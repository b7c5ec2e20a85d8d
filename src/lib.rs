//! Textlytics Service Library
//!
//! Readability, sentiment and word-frequency analytics over batches of short
//! texts such as video descriptions.

pub mod analyzers;
pub mod api;
pub mod batch;
pub mod error;
pub mod history;
pub mod pipeline;
pub mod types;

pub use analyzers::{Analyzer, ReadabilityScorer, SentimentClassifier, WordFrequencyAnalyzer};
pub use batch::{BatchConfig, BatchOutcome, BatchProcessor};
pub use error::{AnalyticsError, AnalyticsResult};
pub use history::QueryHistory;
pub use pipeline::AnalysisPipeline;
pub use types::{BatchReport, ReadabilityResult, SentimentLabel, WordFrequencyTable};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::analyzers::*;
    pub use crate::batch::*;
    pub use crate::error::*;
    pub use crate::history::*;
    pub use crate::pipeline::AnalysisPipeline;
    pub use crate::types::*;
}

/// Default listening port
pub const DEFAULT_PORT: u16 = 3020;

/// Default maximum texts per batch
pub const DEFAULT_MAX_BATCH_TEXTS: usize = 500;

/// Default maximum size of one text (64KB)
pub const DEFAULT_MAX_TEXT_BYTES: usize = 64 * 1024;

/// Default maximum batches per bulk request
pub const DEFAULT_MAX_BULK_BATCHES: usize = 16;

/// Default number of reports kept in the query history
pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

/// Default number of ranked words returned to clients
pub const DEFAULT_TOP_WORDS: usize = 50;

/// Default number of batches analyzed at once
pub const DEFAULT_MAX_CONCURRENT_BATCHES: usize = 4;
