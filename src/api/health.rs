//! Health check and statistics endpoints.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::domain::generator::GeneratorStatsSnapshot;
use crate::server::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub templates: usize,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub generator: GeneratorStatsSnapshot,
    pub templates: TemplateStats,
}

#[derive(Debug, Serialize)]
pub struct TemplateStats {
    pub stored: usize,
    pub capacity: usize,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        templates: state.template_store.count(),
    })
}

pub async fn stats(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse {
        generator: state.generator.stats(),
        templates: TemplateStats {
            stored: state.template_store.count(),
            capacity: state.settings.generator.max_templates,
        },
    })
}
