//! Report chart generation for rankplot simulation results
//!
//! The crate turns a [`SimulationResults`](rankplot_common::SimulationResults)
//! document into the three stacked report panels: total-score range,
//! interview-score trend and rank trend.

pub mod labels;
pub mod rank_report;
pub mod renderer;
pub mod series;
pub mod types;

pub use labels::{Labels, Locale};
pub use rank_report::{font_available, render_report, RankReportGraph, RANK_THRESHOLD};
pub use renderer::GraphRenderer;
pub use series::{format_probability, CandidateLocator, ReportSeries};
pub use types::*;
