//! Subcommand implementations

use rankplot_common::{Result, SimulationResults};
use rankplot_config::Config;
use rankplot_graphs::{font_available, render_report, CandidateLocator, GraphConfig, ReportSeries};
use rankplot_sim::{SimulationParams, Simulator};
use std::path::Path;
use tracing::{info, warn};

/// Render the report described by `config.input` and `config.report`.
pub fn render(config: &Config) -> Result<ReportSeries> {
    let graph_config = GraphConfig::try_from(&config.report)?;
    let locator: CandidateLocator = config.report.candidate_locator.parse()?;

    let family = &graph_config.style.label_font.family;
    if !font_available(family) {
        warn!(
            font_family = %family,
            "Font family not found on this system; text may fail to render"
        );
    }

    let series = render_report(
        Path::new(&config.input.path),
        Path::new(&config.report.output),
        &graph_config,
        locator,
    )?;

    info!(
        input = %config.input.path,
        output = %config.report.output,
        records = series.len(),
        mean_rank = ?series.mean_rank(),
        top5_probability = %series.formatted_probability(),
        "Report written"
    );
    Ok(series)
}

/// Run the simulation and write the results document to `output`.
pub fn simulate(params: &SimulationParams, output: &Path) -> Result<SimulationResults> {
    let results = Simulator::for_params(params).run(params)?;
    results.write_to_path(output)?;

    info!(
        output = %output.display(),
        records = results.len(),
        success_count = results.success_count,
        "Results document written"
    );
    Ok(results)
}
