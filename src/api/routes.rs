use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::server::middleware::api_key_auth;
use crate::server::AppState;

use super::health::{health, stats};
use super::metrics::prometheus_metrics;
use super::report::{generate_report, preview_report};
use super::samples::{sample_dataset, sample_template};
use super::template::{
    create_template, delete_template, generate_from_template, get_template, list_templates,
    update_template,
};

pub fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        // Health, Stats & Metrics
        .route("/health", get(health))
        .route("/stats", get(stats))
        .route("/metrics", get(prometheus_metrics))
        .nest(
            "/api/v1",
            Router::new()
                // Stateless generation
                .route("/reports/preview", post(preview_report))
                .route("/reports/generate", post(generate_report))
                // Stored templates
                .route("/templates", post(create_template).get(list_templates))
                .route(
                    "/templates/{id}",
                    get(get_template).put(update_template).delete(delete_template),
                )
                .route("/templates/{id}/generate", post(generate_from_template))
                // Samples
                .route("/samples/dataset", get(sample_dataset))
                .route("/samples/document", get(sample_template))
                .route_layer(middleware::from_fn_with_state(state, api_key_auth)),
        )
}
