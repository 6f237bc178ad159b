//! The simulation results document shared by the simulator and the renderer

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::Result;

/// One candidate's outcome within a single simulation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CandidateScore {
    /// Written exam score. Older documents may omit it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exam_score: Option<f64>,
    pub interview_score: f64,
    pub total_score: f64,
}

/// One simulated exam outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationRecord {
    /// Every candidate in this simulation, the current candidate included.
    pub rankings: Vec<CandidateScore>,
    /// 1-based rank of the current candidate.
    pub your_rank: u32,
    /// The current candidate's total score.
    pub total_score: f64,
    #[serde(default)]
    pub entered_top_five: bool,
    #[serde(default)]
    pub is_first_place: bool,
}

/// Aggregated output of a simulation run; the input of the report renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResults {
    pub results: Vec<SimulationRecord>,
    #[serde(default)]
    pub success_count: u32,
    #[serde(default)]
    pub first_place_count: u32,
    pub top5_probability: f64,
    #[serde(default)]
    pub first_place_probability: f64,
}

impl SimulationResults {
    /// Parse a results document from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a results document from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// Write the document as pretty-printed JSON.
    pub fn write_to_path(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        Ok(())
    }

    /// Number of simulation records.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
