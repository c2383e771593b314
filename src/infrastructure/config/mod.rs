mod settings;

pub use settings::{ApiConfig, GeneratorConfig, LogConfig, LogFormat, ServerConfig, Settings};
