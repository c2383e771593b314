//! API layer - HTTP endpoint handlers organized by domain.

mod extract;
mod health;
mod metrics;
mod report;
mod routes;
mod samples;
mod template;

// Re-export all handlers for use in server/app.rs
pub use extract::JsonBody;
pub use health::{health, stats, HealthResponse, StatsResponse};
pub use metrics::prometheus_metrics;
pub use report::{generate_report, preview_report, ReportRequest};
pub use routes::api_routes;
pub use samples::{sample_dataset, sample_document, sample_template, SAMPLE_DATASET};
pub use template::{
    create_template, delete_template, generate_from_template, get_template, list_templates,
    update_template, RenderTemplateRequest,
};
