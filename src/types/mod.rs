//! Core types for the analytics service.

mod config;
mod report;
mod request;

pub use self::config::{AnalyticsConfig, CONFIG_PATH_VAR, ENV_PREFIX};
pub use report::{
    AnalysisSection, BatchReadability, BatchReport, ReadabilityResult, SentimentLabel,
    SentimentReport, WordCount, WordFrequencyTable,
};
pub use request::{
    round2, AnalyzeRequest, AnalyzeResponse, AnalyzerRequest, BatchFailure, BulkAnalyzeRequest,
    BulkAnalyzeResponse, ClearHistoryResponse, HistorySummary, NamedBatch, SentimentView,
    TextScore,
};
