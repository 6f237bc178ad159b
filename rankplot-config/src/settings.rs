//! Application configuration structures

use rankplot_sim::SimulationParams;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use validator::{Validate, ValidationError, ValidationErrors};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where the results document is read from
    pub input: InputConfig,

    /// Report figure settings
    pub report: ReportConfig,

    /// Parameters for the `simulate` command
    pub simulation: SimulationParams,

    /// Simulation server settings
    pub server: ServerConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Input document configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct InputConfig {
    /// Path of the simulation results JSON document
    #[validate(custom(function = "crate::validation::validate_file_path", message = "Input path is empty or contains invalid characters"))]
    pub path: String,
}

/// Report rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ReportConfig {
    /// Output image path; the extension picks the backend (.png or .svg)
    #[validate(custom(function = "crate::validation::validate_image_path", message = "Output must be a .png or .svg path"))]
    pub output: String,

    /// Figure width in pixels
    #[validate(range(min = 300, max = 8000, message = "Width must be between 300 and 8000 pixels"))]
    pub width: u32,

    /// Figure height in pixels
    #[validate(range(min = 300, max = 8000, message = "Height must be between 300 and 8000 pixels"))]
    pub height: u32,

    /// Background color (hex format)
    #[validate(regex(path = "crate::validation::HEX_COLOR_REGEX", message = "Background color must be valid hex color"))]
    pub background_color: String,

    /// Font family looked up through the system font source
    #[validate(length(min = 1, message = "Font family cannot be empty"))]
    pub font_family: String,

    /// Font size for axis and legend labels
    #[validate(range(min = 6, max = 72, message = "Font size must be between 6 and 72"))]
    pub font_size: u32,

    /// Font size for panel titles
    #[validate(range(min = 6, max = 96, message = "Title font size must be between 6 and 96"))]
    pub title_font_size: u32,

    /// Label language ("en" or "zh")
    #[validate(custom(function = "crate::validation::validate_locale", message = "Locale must be one of: en, zh"))]
    pub locale: String,

    /// How the current candidate is found in `rankings` ("by_rank" or "last")
    #[validate(custom(function = "crate::validation::validate_locator", message = "Candidate locator must be one of: by_rank, last"))]
    pub candidate_locator: String,

    /// Series palette ("default", "monochrome" or "custom")
    #[validate(custom(function = "crate::validation::validate_color_scheme", message = "Color scheme must be one of: default, monochrome, custom"))]
    pub color_scheme: String,

    /// Hex colors for the `custom` scheme, by role: total, max/rank, min/interview, threshold
    #[validate(custom(function = "crate::validation::validate_hex_colors", message = "Colors must be valid hex colors"))]
    pub colors: Vec<String>,
}

/// Simulation server configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to listen on
    #[validate(custom(function = "crate::validation::validate_bind_address", message = "Bind address must look like 127.0.0.1:8080"))]
    pub bind: String,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log filter: a level (trace, debug, info, warn, error) or `target=level` directives
    #[validate(custom(function = "crate::validation::validate_log_level", message = "Log level must be a level or comma separated target=level directives"))]
    pub level: String,

    /// Optional log file path
    pub file: Option<String>,

    /// Whether to use the multi-line pretty format
    pub pretty: bool,

    /// Whether to include target module information
    pub include_targets: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            path: "/tmp/rank.json".to_string(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output: "rank_report.png".to_string(),
            width: 1200,
            height: 800,
            background_color: "#FFFFFF".to_string(),
            font_family: "sans-serif".to_string(),
            font_size: 12,
            title_font_size: 16,
            locale: "en".to_string(),
            candidate_locator: "by_rank".to_string(),
            color_scheme: "default".to_string(),
            colors: Vec::new(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8080".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
            pretty: false,
            include_targets: true,
        }
    }
}

impl LoggingConfig {
    /// Convert into the settings understood by the logging initialiser.
    pub fn to_logging_config(&self) -> rankplot_common::LoggingConfig {
        rankplot_common::LoggingConfig {
            level: self.level.clone(),
            pretty_format: self.pretty,
            compact_format: !self.pretty,
            file_path: self.file.clone(),
            include_targets: self.include_targets,
            ..rankplot_common::LoggingConfig::default()
        }
    }
}

impl Config {
    /// Comprehensive validation of the entire configuration
    pub fn validate_all(&self) -> Result<(), ValidationErrors> {
        self.input.validate()?;
        self.report.validate()?;
        self.server.validate()?;
        self.logging.validate()?;
        self.validate_palette()?;
        self.validate_simulation()?;
        Ok(())
    }

    fn validate_palette(&self) -> Result<(), ValidationErrors> {
        if self.report.color_scheme == "custom" && self.report.colors.is_empty() {
            let mut error = ValidationError::new("missing_custom_colors");
            error.message = Some(Cow::Borrowed("The custom color scheme needs at least one color"));

            let mut errors = ValidationErrors::new();
            errors.add("colors", error);
            return Err(errors);
        }
        Ok(())
    }

    fn validate_simulation(&self) -> Result<(), ValidationErrors> {
        match self.simulation.validate() {
            Ok(()) => Ok(()),
            Err(err) => {
                let mut error = ValidationError::new("invalid_simulation");
                error.message = Some(Cow::Owned(err.to_string()));

                let mut errors = ValidationErrors::new();
                errors.add("simulation", error);
                Err(errors)
            }
        }
    }
}
