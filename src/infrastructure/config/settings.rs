use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

use crate::domain::generator::DEFAULT_PREVIEW_CHARS;
use crate::domain::template::DEFAULT_MAX_TEMPLATES;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub generator: GeneratorConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub cors_origins: Vec<String>,
    /// Maximum request body size in bytes (datasets and documents are uploaded inline)
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiConfig {
    pub key: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeneratorConfig {
    /// Characters of document text returned by the preview endpoint
    #[serde(default = "default_preview_chars")]
    pub preview_chars: usize,
    /// Upper bound on stored document templates
    #[serde(default = "default_max_templates")]
    pub max_templates: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// Default filter when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8082
}

fn default_max_body_bytes() -> usize {
    10 * 1024 * 1024 // 10 MiB
}

fn default_preview_chars() -> usize {
    DEFAULT_PREVIEW_CHARS
}

fn default_max_templates() -> usize {
    DEFAULT_MAX_TEMPLATES
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        // Load .env file if exists
        let _ = dotenvy::dotenv();

        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let builder = Config::builder()
            // Start with default values
            .set_default("server.host", default_host())?
            .set_default("server.port", default_port() as i64)?
            .set_default("server.max_body_bytes", default_max_body_bytes() as i64)?
            .set_default("generator.preview_chars", default_preview_chars() as i64)?
            .set_default("generator.max_templates", default_max_templates() as i64)?
            .set_default("log.level", default_log_level())?
            .set_default("log.format", "pretty")?
            // Load config file if exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Load from environment variables
            // SERVER__HOST, SERVER__PORT, API__KEY, GENERATOR__PREVIEW_CHARS, LOG__FORMAT, etc.
            .add_source(
                Environment::default()
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("server.cors_origins"),
            );

        builder.build()?.try_deserialize()
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: vec![],
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            preview_chars: default_preview_chars(),
            max_templates: default_max_templates(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}
