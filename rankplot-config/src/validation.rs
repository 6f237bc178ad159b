//! Validation utilities and regex patterns

use regex::Regex;
use std::net::SocketAddr;
use std::sync::LazyLock;
use validator::ValidationError;

/// Regex pattern for validating hex color codes (e.g., #FFFFFF, #FF0000)
pub static HEX_COLOR_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("Invalid hex color regex pattern")
});

/// One `EnvFilter` directive: an optional `target=` prefix and a level.
pub static LOG_DIRECTIVE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[A-Za-z_][A-Za-z0-9_:-]*=)?(trace|debug|info|warn|error|off)$")
        .expect("Invalid log directive regex pattern")
});

/// Locales with a label table in the renderer.
pub const SUPPORTED_LOCALES: [&str; 2] = ["en", "zh"];

/// Accepted spellings of the candidate locator.
pub const SUPPORTED_LOCATORS: [&str; 3] = ["last", "by_rank", "by-rank"];

/// Palettes the renderer knows; `custom` reads `report.colors`.
pub const SUPPORTED_COLOR_SCHEMES: [&str; 3] = ["default", "monochrome", "custom"];

/// Validate file path (basic check for valid path characters)
pub fn validate_file_path(path: &str) -> Result<(), ValidationError> {
    if path.is_empty() {
        return Err(ValidationError::new("empty_file_path"));
    }

    // Colon stays allowed for Windows drive letters (C:\)
    let invalid_chars = ['<', '>', '"', '|', '?', '*'];
    if path.chars().any(|c| invalid_chars.contains(&c)) {
        return Err(ValidationError::new("invalid_file_path_characters"));
    }

    Ok(())
}

/// Validate that the report output has an extension the renderer can write.
pub fn validate_image_path(path: &str) -> Result<(), ValidationError> {
    validate_file_path(path)?;

    let lower = path.to_ascii_lowercase();
    if lower.ends_with(".png") || lower.ends_with(".svg") {
        Ok(())
    } else {
        Err(ValidationError::new("unsupported_image_extension"))
    }
}

/// Validate a socket address such as `127.0.0.1:8080`.
pub fn validate_bind_address(addr: &str) -> Result<(), ValidationError> {
    addr.parse::<SocketAddr>()
        .map(|_| ())
        .map_err(|_| ValidationError::new("invalid_bind_address"))
}

pub fn validate_locale(locale: &str) -> Result<(), ValidationError> {
    if SUPPORTED_LOCALES.contains(&locale) {
        Ok(())
    } else {
        Err(ValidationError::new("unsupported_locale"))
    }
}

pub fn validate_locator(locator: &str) -> Result<(), ValidationError> {
    if SUPPORTED_LOCATORS.contains(&locator) {
        Ok(())
    } else {
        Err(ValidationError::new("unsupported_candidate_locator"))
    }
}

pub fn validate_color_scheme(scheme: &str) -> Result<(), ValidationError> {
    if SUPPORTED_COLOR_SCHEMES.contains(&scheme) {
        Ok(())
    } else {
        Err(ValidationError::new("unsupported_color_scheme"))
    }
}

/// Every entry must be a `#RRGGBB` color.
pub fn validate_hex_colors(colors: &[String]) -> Result<(), ValidationError> {
    if colors.iter().all(|color| HEX_COLOR_REGEX.is_match(color)) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_hex_color"))
    }
}

/// Validate a log filter: a level, or comma separated `target=level` directives
pub fn validate_log_level(level: &str) -> Result<(), ValidationError> {
    if level.trim().is_empty() {
        return Err(ValidationError::new("invalid_log_level"));
    }

    if level
        .split(',')
        .all(|directive| LOG_DIRECTIVE_REGEX.is_match(directive.trim()))
    {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_log_level"))
    }
}
