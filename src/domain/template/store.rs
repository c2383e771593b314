//! Template storage with CRUD operations

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::Utc;
use dashmap::DashMap;

use super::types::{DocumentTemplate, TemplateError, TemplateResult, UpdateTemplateRequest};
use crate::metrics::TemplateMetrics;

/// Default upper bound on stored templates
pub const DEFAULT_MAX_TEMPLATES: usize = 1000;

/// In-memory document template storage
pub struct TemplateStore {
    templates: DashMap<String, DocumentTemplate>,
    /// Slots claimed by stored templates and creates in flight
    reserved: AtomicUsize,
    max_templates: usize,
}

impl Default for TemplateStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateStore {
    /// Create a new template store
    pub fn new() -> Self {
        Self::with_capacity_limit(DEFAULT_MAX_TEMPLATES)
    }

    /// Create a store holding at most `max_templates` templates
    pub fn with_capacity_limit(max_templates: usize) -> Self {
        Self {
            templates: DashMap::new(),
            reserved: AtomicUsize::new(0),
            max_templates,
        }
    }

    /// Create a new template
    pub fn create(&self, template: DocumentTemplate) -> TemplateResult<DocumentTemplate> {
        template.validate()?;

        // Claim a slot before inserting so concurrent creates cannot overshoot
        self.reserved
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| {
                (n < self.max_templates).then_some(n + 1)
            })
            .map_err(|_| TemplateError::CapacityExceeded(self.max_templates))?;

        match self.templates.entry(template.id.clone()) {
            dashmap::mapref::entry::Entry::Occupied(_) => {
                self.reserved.fetch_sub(1, Ordering::AcqRel);
                Err(TemplateError::AlreadyExists(template.id))
            }
            dashmap::mapref::entry::Entry::Vacant(slot) => {
                slot.insert(template.clone());
                TemplateMetrics::set_stored(self.templates.len());
                tracing::info!(
                    template_id = %template.id,
                    placeholders = template.placeholders.len(),
                    "Template created"
                );
                Ok(template)
            }
        }
    }

    /// Get a template by ID
    pub fn get(&self, id: &str) -> TemplateResult<DocumentTemplate> {
        self.templates
            .get(id)
            .map(|t| t.clone())
            .ok_or_else(|| TemplateError::NotFound(id.to_string()))
    }

    /// List all templates, ordered by ID
    pub fn list(&self) -> Vec<DocumentTemplate> {
        let mut templates: Vec<DocumentTemplate> = self
            .templates
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        templates.sort_by(|a, b| a.id.cmp(&b.id));
        templates
    }

    /// Apply `updates` to a stored template.
    ///
    /// The change is validated before it is written; an invalid update
    /// leaves the stored template untouched.
    pub fn update(
        &self,
        id: &str,
        updates: UpdateTemplateRequest,
    ) -> TemplateResult<DocumentTemplate> {
        let mut stored = self
            .templates
            .get_mut(id)
            .ok_or_else(|| TemplateError::NotFound(id.to_string()))?;

        let mut candidate = stored.clone();
        if let Some(name) = updates.name {
            candidate.name = name;
        }
        if let Some(description) = updates.description {
            candidate.description = description;
        }
        if let Some(document) = updates.document {
            candidate.document = document;
            candidate.refresh_placeholders();
        }
        candidate.validate()?;
        candidate.updated_at = Utc::now();

        *stored = candidate.clone();
        drop(stored);

        tracing::info!(template_id = %id, "Template updated");
        Ok(candidate)
    }

    /// Delete a template by ID
    pub fn delete(&self, id: &str) -> TemplateResult<()> {
        if self.templates.remove(id).is_none() {
            return Err(TemplateError::NotFound(id.to_string()));
        }
        self.reserved.fetch_sub(1, Ordering::AcqRel);

        TemplateMetrics::set_stored(self.templates.len());
        tracing::info!(template_id = %id, "Template deleted");
        Ok(())
    }

    /// Check if a template exists
    pub fn exists(&self, id: &str) -> bool {
        self.templates.contains_key(id)
    }

    /// Get the number of templates
    pub fn count(&self) -> usize {
        self.templates.len()
    }
}

/// Create a shared template store
pub fn create_template_store(max_templates: usize) -> Arc<TemplateStore> {
    Arc::new(TemplateStore::with_capacity_limit(max_templates))
}
