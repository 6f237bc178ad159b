//! Figure configuration types

use crate::Locale;
use rankplot_common::RankplotError;
use rankplot_config::ReportConfig;
use serde::{Deserialize, Serialize};

/// Report figure configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphConfig {
    pub width: u32,
    pub height: u32,
    pub locale: Locale,
    pub style: StyleConfig,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 800,
            locale: Locale::default(),
            style: StyleConfig::default(),
        }
    }
}

impl GraphConfig {
    /// Label table for the configured locale
    pub fn labels(&self) -> &'static crate::Labels {
        self.locale.labels()
    }
}

impl TryFrom<&ReportConfig> for GraphConfig {
    type Error = RankplotError;

    fn try_from(report: &ReportConfig) -> Result<Self, Self::Error> {
        let locale = report.locale.parse::<Locale>()?;
        let color_scheme = ColorScheme::from_settings(&report.color_scheme, &report.colors)?;

        Ok(Self {
            width: report.width,
            height: report.height,
            locale,
            style: StyleConfig {
                color_scheme,
                background_color: Some(report.background_color.clone()),
                title_font: FontConfig {
                    family: report.font_family.clone(),
                    size: report.title_font_size,
                },
                label_font: FontConfig {
                    family: report.font_family.clone(),
                    size: report.font_size,
                },
                ..StyleConfig::default()
            },
        })
    }
}

/// Color scheme for the report series.
///
/// Series pick colors by role: total score, max/rank, min/interview, threshold.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub enum ColorScheme {
    #[default]
    Default,
    Monochrome,
    Custom(Vec<String>),
}

impl ColorScheme {
    /// Build a scheme from its configured name and the custom palette.
    pub fn from_settings(name: &str, colors: &[String]) -> Result<Self, RankplotError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "default" => Ok(Self::Default),
            "monochrome" => Ok(Self::Monochrome),
            "custom" if colors.is_empty() => Err(RankplotError::validation_field(
                "the custom color scheme needs at least one color",
                "colors",
            )),
            "custom" => Ok(Self::Custom(colors.to_vec())),
            other => Err(RankplotError::validation_field(
                format!("unknown color scheme '{other}'"),
                "color_scheme",
            )),
        }
    }
}

/// Font configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FontConfig {
    pub family: String,
    pub size: u32,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            family: "sans-serif".to_string(),
            size: 12,
        }
    }
}

/// Margin configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MarginConfig {
    pub outer: u32,
    pub x_label_area: u32,
    pub y_label_area: u32,
}

impl Default for MarginConfig {
    fn default() -> Self {
        Self {
            outer: 15,
            x_label_area: 40,
            y_label_area: 60,
        }
    }
}

/// Grid line configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GridConfig {
    pub show_x: bool,
    pub show_y: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            show_x: true,
            show_y: true,
        }
    }
}

/// Styling shared by the three panels
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StyleConfig {
    pub color_scheme: ColorScheme,
    pub background_color: Option<String>,
    pub title_font: FontConfig,
    pub label_font: FontConfig,
    pub margins: MarginConfig,
    pub grid: GridConfig,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            color_scheme: ColorScheme::Default,
            background_color: Some("#FFFFFF".to_string()),
            title_font: FontConfig {
                family: "sans-serif".to_string(),
                size: 16,
            },
            label_font: FontConfig::default(),
            margins: MarginConfig::default(),
            grid: GridConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_report_config() {
        let report = ReportConfig {
            width: 1000,
            height: 900,
            font_family: "Noto Sans CJK SC".to_string(),
            font_size: 11,
            title_font_size: 18,
            locale: "zh".to_string(),
            background_color: "#F0F0F0".to_string(),
            ..ReportConfig::default()
        };

        let config = GraphConfig::try_from(&report).unwrap();
        assert_eq!(config.width, 1000);
        assert_eq!(config.height, 900);
        assert_eq!(config.locale, Locale::Chinese);
        assert_eq!(config.style.title_font.family, "Noto Sans CJK SC");
        assert_eq!(config.style.title_font.size, 18);
        assert_eq!(config.style.label_font.size, 11);
        assert_eq!(config.style.background_color.as_deref(), Some("#F0F0F0"));
        assert_eq!(config.style.color_scheme, ColorScheme::Default);
    }

    #[test]
    fn test_from_report_config_rejects_unknown_locale() {
        let report = ReportConfig {
            locale: "fr".to_string(),
            ..ReportConfig::default()
        };
        assert!(GraphConfig::try_from(&report).is_err());
    }

    #[test]
    fn test_color_scheme_from_report_config() {
        let mono = ReportConfig {
            color_scheme: "monochrome".to_string(),
            ..ReportConfig::default()
        };
        assert_eq!(
            GraphConfig::try_from(&mono).unwrap().style.color_scheme,
            ColorScheme::Monochrome
        );

        let custom = ReportConfig {
            color_scheme: "custom".to_string(),
            colors: vec!["#000000".to_string(), "#FF0000".to_string()],
            ..ReportConfig::default()
        };
        assert_eq!(
            GraphConfig::try_from(&custom).unwrap().style.color_scheme,
            ColorScheme::Custom(vec!["#000000".to_string(), "#FF0000".to_string()])
        );
    }

    #[test]
    fn test_color_scheme_errors_name_the_field() {
        let err = ColorScheme::from_settings("custom", &[]).unwrap_err();
        assert!(matches!(
            err,
            RankplotError::Validation { field: Some(ref f), .. } if f == "colors"
        ));

        let err = ColorScheme::from_settings("rainbow", &[]).unwrap_err();
        assert!(matches!(
            err,
            RankplotError::Validation { field: Some(ref f), .. } if f == "color_scheme"
        ));
    }

    #[test]
    fn test_defaults_match_report_defaults() {
        let from_report = GraphConfig::try_from(&ReportConfig::default()).unwrap();
        let default = GraphConfig::default();
        assert_eq!(from_report.width, default.width);
        assert_eq!(from_report.height, default.height);
        assert_eq!(from_report.style, default.style);
    }
}
