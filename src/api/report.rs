//! Stateless report endpoints: upload a dataset and a document, get diagnostics
//! or the filled-in document back.

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::domain::dataset::TableSource;
use crate::domain::document::Document;
use crate::domain::generator::{GenerationOutcome, Preview};
use crate::error::Result;
use crate::server::AppState;

use super::extract::JsonBody;

/// Dataset plus document template, as uploaded together
#[derive(Debug, Deserialize)]
pub struct ReportRequest {
    pub dataset: TableSource,
    pub document: Document,
}

/// POST /api/v1/reports/preview - Dataset rows, document text and key diagnostics
#[tracing::instrument(
    name = "http.preview_report",
    skip(state, request),
    fields(format = request.dataset.kind())
)]
pub async fn preview_report(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<ReportRequest>,
) -> Result<Json<Preview>> {
    let preview = state
        .generator
        .preview(&request.dataset, &request.document)?;

    Ok(Json(preview))
}

/// POST /api/v1/reports/generate - Fill the document from the dataset
#[tracing::instrument(
    name = "http.generate_report",
    skip(state, request),
    fields(format = request.dataset.kind())
)]
pub async fn generate_report(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<ReportRequest>,
) -> Result<Json<GenerationOutcome>> {
    let outcome = state
        .generator
        .generate_from_source(&request.dataset, request.document)?;

    Ok(Json(outcome))
}
