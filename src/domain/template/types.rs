//! Template types and error definitions

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::extract::extract_document_keys;
use crate::domain::document::Document;

/// Template-specific error type
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Template not found: {0}")]
    NotFound(String),

    #[error("Template already exists: {0}")]
    AlreadyExists(String),

    #[error("Invalid template ID: {0}")]
    InvalidId(String),

    #[error("Invalid template: {0}")]
    InvalidTemplate(String),

    #[error("Template store is full ({0} templates)")]
    CapacityExceeded(usize),
}

/// Result type for template operations
pub type TemplateResult<T> = Result<T, TemplateError>;

/// A stored document template
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentTemplate {
    /// Unique template identifier (alphanumeric, dash, underscore)
    pub id: String,

    /// Human-readable template name
    pub name: String,

    /// Template description (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Document text tree with {{variable}} placeholders
    pub document: Document,

    /// Placeholder names referenced by the document
    #[serde(default)]
    pub placeholders: BTreeSet<String>,

    /// Creation timestamp
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl DocumentTemplate {
    /// Validate the template
    pub fn validate(&self) -> TemplateResult<()> {
        if self.id.is_empty() || self.id.len() > 64 {
            return Err(TemplateError::InvalidId(
                "ID must be 1-64 characters".to_string(),
            ));
        }

        if !self.id.chars().all(|c| c.is_alphanumeric() || c == '-' || c == '_') {
            return Err(TemplateError::InvalidId(
                "ID must contain only alphanumeric, dash, or underscore".to_string(),
            ));
        }

        if self.name.is_empty() || self.name.len() > 256 {
            return Err(TemplateError::InvalidTemplate(
                "Name must be 1-256 characters".to_string(),
            ));
        }

        if self.document.paragraph_count() == 0 {
            return Err(TemplateError::InvalidTemplate(
                "Document has no paragraphs".to_string(),
            ));
        }

        Ok(())
    }

    /// Recompute `placeholders` from the document
    pub fn refresh_placeholders(&mut self) {
        self.placeholders = extract_document_keys(&self.document);
    }
}

/// Request to create a new template
#[derive(Debug, Deserialize)]
pub struct CreateTemplateRequest {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub document: Document,
}

impl From<CreateTemplateRequest> for DocumentTemplate {
    fn from(req: CreateTemplateRequest) -> Self {
        let now = Utc::now();
        let mut template = DocumentTemplate {
            id: req.id,
            name: req.name,
            description: req.description,
            document: req.document,
            placeholders: BTreeSet::new(),
            created_at: now,
            updated_at: now,
        };
        template.refresh_placeholders();
        template
    }
}

/// Request to update an existing template
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTemplateRequest {
    /// Human-readable template name (optional)
    pub name: Option<String>,

    /// Template description (optional, use null to clear)
    #[serde(default, with = "double_option")]
    pub description: Option<Option<String>>,

    /// Replacement document (optional)
    pub document: Option<Document>,
}

impl UpdateTemplateRequest {
    /// True when the request changes nothing
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.document.is_none()
    }
}

/// Distinguishes an absent field (`None`) from an explicit `null` (`Some(None)`)
mod double_option {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
    where
        T: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        Deserialize::deserialize(deserializer).map(Some)
    }
}

/// Response for listing templates
#[derive(Debug, Serialize)]
pub struct TemplateListResponse {
    pub templates: Vec<DocumentTemplate>,
    pub total: usize,
}
