//! Prometheus scrape endpoint.

use axum::{extract::State, http::header, response::IntoResponse};

use crate::error::{AppError, Result};
use crate::metrics::{encode_metrics, TemplateMetrics};
use crate::server::AppState;

const PROMETHEUS_TEXT: &str = "text/plain; version=0.0.4; charset=utf-8";

/// GET /metrics - Prometheus text exposition
pub async fn prometheus_metrics(State(state): State<AppState>) -> Result<impl IntoResponse> {
    // Store writes update the gauge too; refresh before scraping
    TemplateMetrics::set_stored(state.template_store.count());

    let body =
        encode_metrics().map_err(|e| AppError::Internal(format!("metrics encoding failed: {}", e)))?;

    Ok(([(header::CONTENT_TYPE, PROMETHEUS_TEXT)], body))
}
