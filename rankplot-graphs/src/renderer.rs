//! Graph rendering trait and color helpers

use crate::{ColorScheme, GraphConfig, ReportSeries};
use plotters::prelude::*;
use rankplot_common::Result;
use std::path::Path;

/// Color roles used by the report panels, indexes into the active scheme.
pub mod role {
    pub const TOTAL: usize = 0;
    pub const MAX_TOTAL: usize = 1;
    pub const RANK: usize = 1;
    pub const MIN_TOTAL: usize = 2;
    pub const INTERVIEW: usize = 2;
    pub const THRESHOLD: usize = 3;
}

const FALLBACK_COLOR: RGBColor = RGBColor(31, 119, 180);

/// Trait for rendering the report figure to different targets
pub trait GraphRenderer {
    /// Render the figure to a file; `.svg` paths use the SVG backend, anything else PNG
    fn render_to_file(&self, config: &GraphConfig, series: &ReportSeries, path: &Path)
        -> Result<()>;

    /// Render the figure to an in-memory SVG document
    fn render_to_bytes(&self, config: &GraphConfig, series: &ReportSeries) -> Result<Vec<u8>>;

    /// Fill the drawing area with the configured background
    fn apply_styling<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, plotters::coord::Shift>,
        config: &GraphConfig,
    ) -> Result<()>
    where
        DB::ErrorType: 'static,
    {
        let bg_color = self.get_background_color(config);
        root.fill(&bg_color)?;
        Ok(())
    }

    /// Get colors from color scheme
    fn get_colors(&self, scheme: &ColorScheme) -> Vec<RGBColor> {
        match scheme {
            ColorScheme::Default => vec![
                RGBColor(31, 119, 180),  // Blue
                RGBColor(255, 127, 14),  // Orange
                RGBColor(44, 160, 44),   // Green
                RGBColor(214, 39, 40),   // Red
                RGBColor(148, 103, 189), // Purple
            ],
            ColorScheme::Monochrome => vec![
                RGBColor(0, 0, 0),
                RGBColor(64, 64, 64),
                RGBColor(128, 128, 128),
                RGBColor(96, 96, 96),
            ],
            ColorScheme::Custom(colors) => colors
                .iter()
                .map(|color_str| self.parse_color(color_str))
                .collect(),
        }
    }

    /// Color for a series role, wrapping around short custom schemes
    fn role_color(&self, scheme: &ColorScheme, role: usize) -> RGBColor {
        let colors = self.get_colors(scheme);
        if colors.is_empty() {
            return FALLBACK_COLOR;
        }
        colors[role % colors.len()]
    }

    /// Parse a color string (hex format) to RGBColor
    fn parse_color(&self, color_str: &str) -> RGBColor {
        if let Some(hex) = color_str.strip_prefix('#') {
            if hex.len() == 6 && hex.is_ascii() {
                if let (Ok(r), Ok(g), Ok(b)) = (
                    u8::from_str_radix(&hex[0..2], 16),
                    u8::from_str_radix(&hex[2..4], 16),
                    u8::from_str_radix(&hex[4..6], 16),
                ) {
                    return RGBColor(r, g, b);
                }
            }
        }
        // Default to black if parsing fails
        RGBColor(0, 0, 0)
    }

    /// Get background color from style config
    fn get_background_color(&self, config: &GraphConfig) -> RGBColor {
        config
            .style
            .background_color
            .as_ref()
            .map(|color| self.parse_color(color))
            .unwrap_or(RGBColor(255, 255, 255))
    }
}
