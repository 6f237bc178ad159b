//! Three-panel rank report figure

use crate::renderer::role;
use crate::{CandidateLocator, GraphConfig, GraphRenderer, Labels, ReportSeries};
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use rankplot_common::{RankplotError, Result, SimulationResults};
use std::ops::Range;
use std::path::Path;
use tracing::{debug, info};

/// Rank at or below which the candidate counts as top five.
pub const RANK_THRESHOLD: f64 = 5.0;

const BAND_COLOR: RGBColor = RGBColor(128, 128, 128);
const BAND_ALPHA: f64 = 0.2;
const LINE_WIDTH: u32 = 2;
const DASH_SIZE: i32 = 6;
const DASH_SPACING: i32 = 4;
const LEGEND_LINE: i32 = 20;

type PanelChart<'a, DB> = ChartContext<'a, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

/// Whether a font family resolves to a usable face on this system.
pub fn font_available(family: &str) -> bool {
    FontDesc::new(FontFamily::from(family), 12.0, FontStyle::Normal)
        .box_size("0")
        .is_ok()
}

/// Read a results document, extract its series and write the report figure.
pub fn render_report(
    input: &Path,
    output: &Path,
    config: &GraphConfig,
    locator: CandidateLocator,
) -> Result<ReportSeries> {
    let doc = SimulationResults::from_path(input)?;
    debug!(input = %input.display(), records = doc.len(), "Loaded simulation results");

    let series = ReportSeries::from_results(&doc, locator)?;
    RankReportGraph::new().render_to_file(config, &series, output)?;
    Ok(series)
}

/// Renders total-score range, interview-score trend and rank trend panels
/// stacked vertically.
#[derive(Debug, Clone, Copy, Default)]
pub struct RankReportGraph;

impl RankReportGraph {
    pub fn new() -> Self {
        Self
    }

    fn draw_figure<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
        config: &GraphConfig,
        series: &ReportSeries,
    ) -> Result<()>
    where
        DB::ErrorType: 'static,
    {
        if series.is_empty() {
            return Err(RankplotError::graph("no simulation records to render"));
        }

        self.apply_styling(root, config)?;

        let panels = root.split_evenly((3, 1));
        let [total, interview, rank] = panels.as_slice() else {
            return Err(RankplotError::graph("failed to split figure into panels"));
        };

        let labels = config.labels();
        self.draw_total_panel(total, config, labels, series)?;
        self.draw_interview_panel(interview, config, labels, series)?;
        self.draw_rank_panel(rank, config, labels, series)?;
        Ok(())
    }

    fn draw_total_panel<DB: DrawingBackend>(
        &self,
        area: &DrawingArea<DB, Shift>,
        config: &GraphConfig,
        labels: &Labels,
        series: &ReportSeries,
    ) -> Result<()>
    where
        DB::ErrorType: 'static,
    {
        let y_range = padded_range(
            series
                .total_scores
                .iter()
                .chain(&series.max_scores)
                .chain(&series.min_scores)
                .copied(),
        );
        let mut chart = self.build_panel(area, config, labels.total_title, series.len(), y_range)?;
        self.draw_mesh(&mut chart, config, labels.simulation_axis, labels.total_axis)?;

        let scheme = &config.style.color_scheme;
        let total_style = self.role_color(scheme, role::TOTAL).stroke_width(LINE_WIDTH);
        let max_style = self.role_color(scheme, role::MAX_TOTAL).stroke_width(LINE_WIDTH);
        let min_style = self.role_color(scheme, role::MIN_TOTAL).stroke_width(LINE_WIDTH);

        if series.len() > 1 {
            let band: Vec<(f64, f64)> = indexed(&series.max_scores)
                .chain(indexed(&series.min_scores).rev())
                .collect();
            chart.draw_series(std::iter::once(Polygon::new(
                band,
                BAND_COLOR.mix(BAND_ALPHA).filled(),
            )))?;
        }

        chart
            .draw_series(LineSeries::new(indexed(&series.total_scores), total_style))?
            .label(labels.total_series)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + LEGEND_LINE, y)], total_style));

        chart
            .draw_series(DashedLineSeries::new(
                indexed(&series.max_scores),
                DASH_SIZE,
                DASH_SPACING,
                max_style,
            ))?
            .label(labels.max_total_series)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + LEGEND_LINE, y)], max_style));

        chart
            .draw_series(DashedLineSeries::new(
                indexed(&series.min_scores),
                DASH_SIZE,
                DASH_SPACING,
                min_style,
            ))?
            .label(labels.min_total_series)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + LEGEND_LINE, y)], min_style));

        self.draw_legend(&mut chart, config)
    }

    fn draw_interview_panel<DB: DrawingBackend>(
        &self,
        area: &DrawingArea<DB, Shift>,
        config: &GraphConfig,
        labels: &Labels,
        series: &ReportSeries,
    ) -> Result<()>
    where
        DB::ErrorType: 'static,
    {
        let y_range = padded_range(series.your_interview_scores.iter().copied());
        let mut chart =
            self.build_panel(area, config, labels.interview_title, series.len(), y_range)?;
        self.draw_mesh(&mut chart, config, labels.simulation_axis, labels.interview_axis)?;

        let style = self
            .role_color(&config.style.color_scheme, role::INTERVIEW)
            .stroke_width(LINE_WIDTH);
        chart
            .draw_series(LineSeries::new(indexed(&series.your_interview_scores), style))?
            .label(labels.interview_series)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + LEGEND_LINE, y)], style));

        self.draw_legend(&mut chart, config)
    }

    fn draw_rank_panel<DB: DrawingBackend>(
        &self,
        area: &DrawingArea<DB, Shift>,
        config: &GraphConfig,
        labels: &Labels,
        series: &ReportSeries,
    ) -> Result<()>
    where
        DB::ErrorType: 'static,
    {
        let ranks: Vec<f64> = series.your_ranks.iter().map(|&r| f64::from(r)).collect();
        let y_range = padded_range(ranks.iter().copied().chain(std::iter::once(RANK_THRESHOLD)));
        let title = labels.rank_title_with_probability(series.top5_probability);
        let mut chart = self.build_panel(area, config, &title, series.len(), y_range)?;
        self.draw_mesh(&mut chart, config, labels.simulation_axis, labels.rank_axis)?;

        let scheme = &config.style.color_scheme;
        let rank_style = self.role_color(scheme, role::RANK).stroke_width(LINE_WIDTH);
        let threshold_style = self.role_color(scheme, role::THRESHOLD).stroke_width(LINE_WIDTH);

        chart
            .draw_series(LineSeries::new(indexed(&ranks), rank_style))?
            .label(labels.rank_series)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + LEGEND_LINE, y)], rank_style));

        chart
            .draw_series(DashedLineSeries::new(
                threshold_line(series.len()),
                DASH_SIZE,
                DASH_SPACING,
                threshold_style,
            ))?
            .label(labels.threshold_series)
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + LEGEND_LINE, y)], threshold_style)
            });

        self.draw_legend(&mut chart, config)
    }

    fn build_panel<'a, DB: DrawingBackend>(
        &self,
        area: &'a DrawingArea<DB, Shift>,
        config: &GraphConfig,
        title: &str,
        len: usize,
        y_range: Range<f64>,
    ) -> Result<PanelChart<'a, DB>>
    where
        DB::ErrorType: 'static,
    {
        let style = &config.style;
        let title_font = (
            style.title_font.family.as_str(),
            f64::from(style.title_font.size),
        );

        let chart = ChartBuilder::on(area)
            .caption(title, title_font)
            .margin(style.margins.outer)
            .x_label_area_size(style.margins.x_label_area)
            .y_label_area_size(style.margins.y_label_area)
            .build_cartesian_2d(0f64..x_upper(len), y_range)?;
        Ok(chart)
    }

    fn draw_mesh<DB: DrawingBackend>(
        &self,
        chart: &mut PanelChart<'_, DB>,
        config: &GraphConfig,
        x_desc: &str,
        y_desc: &str,
    ) -> Result<()>
    where
        DB::ErrorType: 'static,
    {
        let label_font = (
            config.style.label_font.family.as_str(),
            f64::from(config.style.label_font.size),
        );

        let mut mesh = chart.configure_mesh();
        mesh.x_desc(x_desc)
            .y_desc(y_desc)
            .label_style(label_font)
            .axis_desc_style(label_font)
            .x_label_formatter(&|x| format!("{:.0}", x));

        if !config.style.grid.show_x {
            mesh.disable_x_mesh();
        }
        if !config.style.grid.show_y {
            mesh.disable_y_mesh();
        }

        mesh.draw()?;
        Ok(())
    }

    fn draw_legend<'a, DB: DrawingBackend + 'a>(
        &self,
        chart: &mut PanelChart<'a, DB>,
        config: &GraphConfig,
    ) -> Result<()>
    where
        DB::ErrorType: 'static,
    {
        let label_font = (
            config.style.label_font.family.as_str(),
            f64::from(config.style.label_font.size),
        );

        chart
            .configure_series_labels()
            .label_font(label_font)
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()?;
        Ok(())
    }
}

impl GraphRenderer for RankReportGraph {
    fn render_to_file(
        &self,
        config: &GraphConfig,
        series: &ReportSeries,
        path: &Path,
    ) -> Result<()> {
        if series.is_empty() {
            return Err(RankplotError::graph("no simulation records to render"));
        }

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let size = (config.width, config.height);
        if is_svg(path) {
            let root = SVGBackend::new(path, size).into_drawing_area();
            self.draw_figure(&root, config, series)?;
            root.present()?;
        } else {
            let root = BitMapBackend::new(path, size).into_drawing_area();
            self.draw_figure(&root, config, series)?;
            root.present()?;
        }

        info!(
            path = %path.display(),
            records = series.len(),
            top5_probability = %series.formatted_probability(),
            "Rendered rank report"
        );
        Ok(())
    }

    fn render_to_bytes(&self, config: &GraphConfig, series: &ReportSeries) -> Result<Vec<u8>> {
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, (config.width, config.height))
                .into_drawing_area();
            self.draw_figure(&root, config, series)?;
            root.present()?;
        }
        debug!(bytes = svg.len(), "Rendered rank report to SVG");
        Ok(svg.into_bytes())
    }
}

fn is_svg(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"))
}

fn indexed(values: &[f64]) -> impl DoubleEndedIterator<Item = (f64, f64)> + Clone + '_ {
    values.iter().enumerate().map(|(i, &v)| (i as f64, v))
}

/// Upper bound of the simulation axis; a single record still gets a unit-wide axis.
fn x_upper(len: usize) -> f64 {
    (len.saturating_sub(1)).max(1) as f64
}

fn threshold_line(len: usize) -> Vec<(f64, f64)> {
    vec![(0.0, RANK_THRESHOLD), (x_upper(len), RANK_THRESHOLD)]
}

/// Value range with 5% padding; flat or empty data still yields a non-empty range.
fn padded_range(values: impl Iterator<Item = f64>) -> Range<f64> {
    let (min, max) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });

    if min > max {
        return 0.0..1.0;
    }

    let span = max - min;
    let pad = if span > 0.0 {
        span * 0.05
    } else {
        (max.abs() * 0.05).max(1.0)
    };
    (min - pad)..(max + pad)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Locale;
    use tempfile::TempDir;

    fn sample_series() -> ReportSeries {
        ReportSeries {
            total_scores: vec![80.0, 82.5, 78.0, 85.0],
            max_scores: vec![88.0, 90.0, 86.0, 89.5],
            min_scores: vec![70.0, 72.0, 69.5, 71.0],
            your_ranks: vec![3, 2, 6, 1],
            your_interview_scores: vec![78.0, 82.0, 75.0, 88.0],
            top5_probability: 0.75,
        }
    }

    fn empty_series() -> ReportSeries {
        ReportSeries {
            total_scores: Vec::new(),
            max_scores: Vec::new(),
            min_scores: Vec::new(),
            your_ranks: Vec::new(),
            your_interview_scores: Vec::new(),
            top5_probability: 0.0,
        }
    }

    fn fonts_ready() -> bool {
        let ready = font_available("sans-serif");
        if !ready {
            eprintln!("skipping: no usable sans-serif font on this system");
        }
        ready
    }

    #[test]
    fn test_padded_range() {
        let range = padded_range([70.0, 90.0].into_iter());
        assert!((range.start - 69.0).abs() < 1e-9);
        assert!((range.end - 91.0).abs() < 1e-9);

        let flat = padded_range([80.0, 80.0].into_iter());
        assert!(flat.start < 80.0 && flat.end > 80.0);

        assert_eq!(padded_range(std::iter::empty()), 0.0..1.0);
        assert_eq!(padded_range([f64::NAN].into_iter()), 0.0..1.0);
    }

    #[test]
    fn test_threshold_line_is_fixed_at_five() {
        for len in [1, 2, 50] {
            let line = threshold_line(len);
            assert!(line.iter().all(|&(_, y)| y == RANK_THRESHOLD));
            assert_eq!(line[0].0, 0.0);
            assert!(line[1].0 >= 1.0);
        }
        assert_eq!(x_upper(1), 1.0);
        assert_eq!(x_upper(10), 9.0);
    }

    #[test]
    fn test_is_svg() {
        assert!(is_svg(Path::new("report.svg")));
        assert!(is_svg(Path::new("out/REPORT.SVG")));
        assert!(!is_svg(Path::new("report.png")));
        assert!(!is_svg(Path::new("report")));
    }

    #[test]
    fn test_render_empty_series_error() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("empty.png");

        let err = RankReportGraph::new()
            .render_to_file(&GraphConfig::default(), &empty_series(), &path)
            .unwrap_err();
        assert!(err.to_string().contains("no simulation records to render"));
        assert!(!path.exists());

        assert!(RankReportGraph::new()
            .render_to_bytes(&GraphConfig::default(), &empty_series())
            .is_err());
    }

    #[test]
    fn test_render_to_png() {
        if !fonts_ready() {
            return;
        }
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("nested").join("report.png");

        let result = RankReportGraph::new().render_to_file(&GraphConfig::default(), &sample_series(), &path);
        assert!(result.is_ok(), "Failed to render report: {:?}", result.err());

        let metadata = std::fs::metadata(&path).expect("Failed to read file metadata");
        assert!(metadata.len() > 1000, "Generated report is too small");
    }

    #[test]
    fn test_render_to_bytes_contains_titles() {
        if !fonts_ready() {
            return;
        }
        let bytes = RankReportGraph::new()
            .render_to_bytes(&GraphConfig::default(), &sample_series())
            .expect("Failed to render SVG");
        let svg = String::from_utf8(bytes).expect("SVG is not UTF-8");

        assert!(svg.contains("<svg"));
        assert!(svg.contains("Total score across simulations"));
        assert!(svg.contains("75.00%"));
    }

    #[test]
    fn test_render_single_record() {
        if !fonts_ready() {
            return;
        }
        let series = ReportSeries {
            total_scores: vec![80.0],
            max_scores: vec![80.0],
            min_scores: vec![75.0],
            your_ranks: vec![2],
            your_interview_scores: vec![78.0],
            top5_probability: 0.5,
        };
        let config = GraphConfig {
            locale: Locale::English,
            ..GraphConfig::default()
        };

        let svg = RankReportGraph::new()
            .render_to_bytes(&config, &series)
            .expect("Failed to render single record");
        assert!(!svg.is_empty());
    }
}
