//! Configuration management for rankplot

pub mod loader;
pub mod settings;
pub mod validation;

pub use loader::{ConfigError, ConfigLoader};
pub use settings::{Config, InputConfig, LoggingConfig, ReportConfig, ServerConfig};
