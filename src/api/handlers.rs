//! HTTP request handlers for the analytics service.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{info, warn};
use uuid::Uuid;

use crate::batch::{BatchConfig, BatchProcessor};
use crate::error::{AnalyticsError, AnalyticsResult};
use crate::history::{HistoryEntry, QueryHistory};
use crate::pipeline::AnalysisPipeline;
use crate::types::{
    AnalysisSection, AnalyticsConfig, AnalyzeRequest, AnalyzeResponse, AnalyzerRequest,
    BulkAnalyzeRequest, BulkAnalyzeResponse, ClearHistoryResponse, HistorySummary,
};

/// Application state shared across handlers.
pub struct AppState {
    pub pipeline: Arc<AnalysisPipeline>,
    pub batch_processor: BatchProcessor,
    pub history: RwLock<QueryHistory>,
    pub config: AnalyticsConfig,
}

impl AppState {
    /// Build the state from configuration.
    pub fn new(config: AnalyticsConfig) -> Self {
        let pipeline = Arc::new(AnalysisPipeline::new(&config));
        let batch_processor = BatchProcessor::new(
            Arc::clone(&pipeline),
            BatchConfig {
                concurrency: config.max_concurrent_batches,
            },
        );

        Self {
            pipeline,
            batch_processor,
            history: RwLock::new(QueryHistory::new(config.history_capacity)),
            config,
        }
    }
}

/// Reject batches that exceed the configured limits.
fn check_batch(config: &AnalyticsConfig, texts: &[String]) -> AnalyticsResult<()> {
    if texts.len() > config.max_batch_texts {
        warn!(count = texts.len(), limit = config.max_batch_texts, "Rejected oversized batch");
        return Err(AnalyticsError::BatchTooLarge {
            count: texts.len(),
            limit: config.max_batch_texts,
        });
    }

    if let Some((index, text)) = texts
        .iter()
        .enumerate()
        .find(|(_, text)| text.len() > config.max_text_bytes)
    {
        warn!(index, size = text.len(), limit = config.max_text_bytes, "Rejected oversized text");
        return Err(AnalyticsError::TextTooLarge {
            index,
            size: text.len(),
            limit: config.max_text_bytes,
        });
    }

    Ok(())
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: String,
    version: String,
}

/// Health check endpoint.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Analyze a batch with every analyzer and optionally record it.
pub async fn analyze(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AnalyzeRequest>,
) -> AnalyticsResult<Json<AnalyzeResponse>> {
    check_batch(&state.config, &request.texts)?;

    info!(
        query = ?request.query,
        texts = request.texts.len(),
        record = request.record,
        "Received analyze request"
    );

    let pipeline = Arc::clone(&state.pipeline);
    let AnalyzeRequest {
        query,
        texts,
        record,
    } = request;
    let report = tokio::task::spawn_blocking(move || pipeline.analyze(query, &texts))
        .await
        .map_err(|e| AnalyticsError::Internal(format!("analysis task failed: {}", e)))?;

    let history_id = if record {
        let mut history = state.history.write().await;
        Some(history.record(report.clone()))
    } else {
        None
    };

    Ok(Json(AnalyzeResponse::from_report(
        &report,
        state.pipeline.top_words(),
        history_id,
    )))
}

/// Run a single analyzer over a batch.
pub async fn run_analyzer(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    Json(request): Json<AnalyzerRequest>,
) -> AnalyticsResult<Json<AnalysisSection>> {
    check_batch(&state.config, &request.texts)?;

    let analyzer = state
        .pipeline
        .get_analyzer_by_name(&name)
        .ok_or(AnalyticsError::UnknownAnalyzer(name))?;

    info!(
        analyzer = analyzer.name(),
        texts = request.texts.len(),
        "Received analyzer request"
    );

    Ok(Json(analyzer.analyze(&request.texts)))
}

/// Analyze several independent batches concurrently.
pub async fn analyze_bulk(
    State(state): State<Arc<AppState>>,
    Json(request): Json<BulkAnalyzeRequest>,
) -> AnalyticsResult<Json<BulkAnalyzeResponse>> {
    if request.batches.len() > state.config.max_bulk_batches {
        return Err(AnalyticsError::TooManyBatches {
            count: request.batches.len(),
            limit: state.config.max_bulk_batches,
        });
    }

    for batch in &request.batches {
        check_batch(&state.config, &batch.texts)?;
    }

    info!(batches = request.batches.len(), "Received bulk analyze request");

    let outcome = state.batch_processor.process(request.batches).await;
    let top_words = state.pipeline.top_words();

    Ok(Json(BulkAnalyzeResponse {
        total_batches: outcome.total_batches,
        results: outcome
            .reports
            .iter()
            .map(|report| AnalyzeResponse::from_report(report, top_words, None))
            .collect(),
        errors: outcome.errors,
    }))
}

/// Analyzer info.
#[derive(Debug, Serialize)]
pub struct AnalyzerInfo {
    name: String,
    description: String,
}

/// List available analyzers.
pub async fn list_analyzers(State(state): State<Arc<AppState>>) -> Json<Vec<AnalyzerInfo>> {
    let analyzers: Vec<AnalyzerInfo> = state
        .pipeline
        .list_analyzers()
        .into_iter()
        .map(|(name, desc)| AnalyzerInfo {
            name: name.to_string(),
            description: desc.to_string(),
        })
        .collect();

    Json(analyzers)
}

/// List recorded reports, newest first.
pub async fn list_history(State(state): State<Arc<AppState>>) -> Json<Vec<HistorySummary>> {
    let history = state.history.read().await;
    Json(history.summaries())
}

/// Get one recorded report.
pub async fn get_history_entry(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> AnalyticsResult<Json<HistoryEntry>> {
    let history = state.history.read().await;

    history
        .get(id)
        .cloned()
        .map(Json)
        .ok_or(AnalyticsError::HistoryEntryNotFound(id))
}

/// Clear the query history.
pub async fn clear_history(State(state): State<Arc<AppState>>) -> Json<ClearHistoryResponse> {
    let removed = state.history.write().await.clear();
    info!(removed, "Cleared query history");
    Json(ClearHistoryResponse { removed })
}
