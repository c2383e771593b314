//! Sample files: a key/value dataset and a matching document template.

use axum::{
    http::header,
    response::IntoResponse,
    Json,
};

use crate::domain::document::{Cell, Document, Paragraph, Row, Table};

pub const SAMPLE_DATASET_FILENAME: &str = "Audit_Report_Variables_Example_Values.csv";

pub const SAMPLE_DATASET: &str = "\
key,value,description
company_name,ACME Corporation,Audited company
audit_period,2024-01-01 ~ 2024-12-31,Period under audit
auditor_name,Jiwoo Kim,Lead auditor
report_date,2025-02-14,Date the report was issued
finding_count,3,Number of findings
overall_rating,Satisfactory,Overall audit rating
";

/// The sample template, referencing every key of [`SAMPLE_DATASET`]
pub fn sample_document() -> Document {
    Document {
        paragraphs: vec![
            Paragraph::new("Audit Report: {{ company_name }}"),
            Paragraph::new("Audit period: {{audit_period}}"),
            Paragraph::new("Prepared by {{ auditor_name }} on {{report_date}}."),
        ],
        tables: vec![Table {
            rows: vec![
                Row {
                    cells: vec![Cell::with_text("Findings"), Cell::with_text("{{finding_count}}")],
                },
                Row {
                    cells: vec![
                        Cell::with_text("Overall rating"),
                        Cell::with_text("{{ overall_rating }}"),
                    ],
                },
            ],
        }],
    }
}

/// GET /api/v1/samples/dataset - Download the sample dataset as CSV
pub async fn sample_dataset() -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", SAMPLE_DATASET_FILENAME),
            ),
        ],
        SAMPLE_DATASET,
    )
}

/// GET /api/v1/samples/document - The sample document template
pub async fn sample_template() -> Json<Document> {
    Json(sample_document())
}
