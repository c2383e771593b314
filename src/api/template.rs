//! Template CRUD endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::domain::dataset::TableSource;
use crate::domain::generator::GenerationOutcome;
use crate::domain::template::{
    CreateTemplateRequest, DocumentTemplate, TemplateListResponse, UpdateTemplateRequest,
};
use crate::error::{AppError, Result};
use crate::server::AppState;

use super::extract::JsonBody;

/// Dataset to render a stored template with
#[derive(Debug, Deserialize)]
pub struct RenderTemplateRequest {
    pub dataset: TableSource,
}

/// POST /api/v1/templates - Create a new template
#[tracing::instrument(
    name = "http.create_template",
    skip(state, request),
    fields(template_id = %request.id)
)]
pub async fn create_template(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<CreateTemplateRequest>,
) -> Result<(StatusCode, Json<DocumentTemplate>)> {
    let created = state.template_store.create(request.into())?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /api/v1/templates - List all templates
#[tracing::instrument(name = "http.list_templates", skip(state))]
pub async fn list_templates(State(state): State<AppState>) -> Json<TemplateListResponse> {
    let templates = state.template_store.list();
    let total = templates.len();

    Json(TemplateListResponse { templates, total })
}

/// GET /api/v1/templates/{id} - Get a specific template
#[tracing::instrument(name = "http.get_template", skip(state))]
pub async fn get_template(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DocumentTemplate>> {
    Ok(Json(state.template_store.get(&id)?))
}

/// PUT /api/v1/templates/{id} - Update an existing template
#[tracing::instrument(name = "http.update_template", skip(state, request))]
pub async fn update_template(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(request): JsonBody<UpdateTemplateRequest>,
) -> Result<Json<DocumentTemplate>> {
    if request.is_empty() {
        return Err(AppError::Validation(
            "Update must set at least one of name, description, document".to_string(),
        ));
    }

    Ok(Json(state.template_store.update(&id, request)?))
}

/// DELETE /api/v1/templates/{id} - Delete a template
#[tracing::instrument(name = "http.delete_template", skip(state))]
pub async fn delete_template(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    state.template_store.delete(&id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/templates/{id}/generate - Fill a stored template from a dataset
#[tracing::instrument(
    name = "http.generate_from_template",
    skip(state, request),
    fields(format = request.dataset.kind())
)]
pub async fn generate_from_template(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(request): JsonBody<RenderTemplateRequest>,
) -> Result<Json<GenerationOutcome>> {
    let template = state.template_store.get(&id)?;
    let outcome = state
        .generator
        .generate_from_source(&request.dataset, template.document)?;

    Ok(Json(outcome))
}
