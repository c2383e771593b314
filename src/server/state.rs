use std::sync::Arc;
use std::time::Instant;

use crate::config::Settings;
use crate::domain::generator::ReportGenerator;
use crate::domain::template::{create_template_store, TemplateStore};

#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub template_store: Arc<TemplateStore>,
    pub generator: Arc<ReportGenerator>,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        let template_store = create_template_store(settings.generator.max_templates);
        let generator = Arc::new(ReportGenerator::new(settings.generator.preview_chars));

        Self {
            settings: Arc::new(settings),
            template_store,
            generator,
            start_time: Instant::now(),
        }
    }
}
