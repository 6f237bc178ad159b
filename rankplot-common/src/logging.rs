//! Structured logging infrastructure for rankplot

use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Boxed error returned by the logging initialisers
pub type LoggingError = Box<dyn std::error::Error + Send + Sync>;

/// Configuration for the logging system
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// `EnvFilter` directives, comma separated (e.g., "info", "rankplot_graphs=trace,warn")
    pub level: String,
    /// Whether to enable pretty formatting with colors
    pub pretty_format: bool,
    /// Whether to use the compact single-line format
    pub compact_format: bool,
    /// Optional file path for log output
    pub file_path: Option<String>,
    /// Whether to include spans in the output
    pub include_spans: bool,
    /// Whether to include target module information
    pub include_targets: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            pretty_format: false,
            compact_format: true,
            file_path: None,
            include_spans: false,
            include_targets: true,
        }
    }
}

impl LoggingConfig {
    fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_new(&self.level).unwrap_or_else(|_| EnvFilter::new("info"))
    }

    fn span_events(&self) -> FmtSpan {
        if self.include_spans {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        }
    }
}

fn open_log_file(path: &str) -> std::io::Result<std::fs::File> {
    std::fs::OpenOptions::new().create(true).append(true).open(path)
}

/// Initialize the tracing subscriber with the given configuration.
///
/// Logs go to stderr so that stdout stays free for command output.
pub fn init_logging(config: LoggingConfig) -> Result<(), LoggingError> {
    let registry = tracing_subscriber::registry().with(config.env_filter());
    let span_events = config.span_events();

    if config.pretty_format {
        let layer = fmt::layer()
            .pretty()
            .with_span_events(span_events)
            .with_target(config.include_targets);

        if let Some(path) = config.file_path.as_deref() {
            let file = open_log_file(path)?;
            registry
                .with(layer.with_ansi(false).with_writer(file))
                .try_init()?;
        } else {
            registry.with(layer.with_writer(std::io::stderr)).try_init()?;
        }
    } else if config.compact_format {
        let layer = fmt::layer()
            .compact()
            .with_span_events(span_events)
            .with_target(config.include_targets);

        if let Some(path) = config.file_path.as_deref() {
            let file = open_log_file(path)?;
            registry
                .with(layer.with_ansi(false).with_writer(file))
                .try_init()?;
        } else {
            registry.with(layer.with_writer(std::io::stderr)).try_init()?;
        }
    } else {
        let layer = fmt::layer()
            .with_span_events(span_events)
            .with_target(config.include_targets);

        if let Some(path) = config.file_path.as_deref() {
            let file = open_log_file(path)?;
            registry
                .with(layer.with_ansi(false).with_writer(file))
                .try_init()?;
        } else {
            registry.with(layer.with_writer(std::io::stderr)).try_init()?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "info");
        assert!(!config.pretty_format);
        assert!(config.compact_format);
        assert!(config.file_path.is_none());
        assert!(!config.include_spans);
        assert!(config.include_targets);
    }

    #[test]
    fn test_span_events_follow_config() {
        let mut config = LoggingConfig::default();
        assert_eq!(config.span_events(), FmtSpan::NONE);

        config.include_spans = true;
        assert_eq!(config.span_events(), FmtSpan::NEW | FmtSpan::CLOSE);
    }

    #[test]
    fn test_file_logging_creates_file() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("rankplot.log");

        let config = LoggingConfig {
            level: "debug".to_string(),
            file_path: Some(path.to_string_lossy().into_owned()),
            ..LoggingConfig::default()
        };

        // Another test in this binary may already own the global subscriber;
        // the file is opened before registration either way.
        let _ = init_logging(config);
        assert!(path.exists());
    }
}
