//! Monte Carlo ranking simulation for rankplot
//!
//! Each simulation draws interview scores for every candidate, combines them
//! with the written exam scores and ranks the field. The aggregated
//! [`SimulationResults`](rankplot_common::SimulationResults) document is what
//! the report renderer consumes.

pub mod engine;
pub mod params;

pub use engine::{Simulator, EXAM_WEIGHT, INTERVIEW_WEIGHT};
pub use params::{SimulationParams, MAX_CANDIDATES, MAX_RANKING_ENTRIES, MAX_SIMULATIONS};
