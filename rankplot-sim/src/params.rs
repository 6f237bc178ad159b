//! Simulation parameters

use rankplot_common::{RankplotError, Result};
use serde::{Deserialize, Serialize};

/// Upper bound on simulations per run.
pub const MAX_SIMULATIONS: u32 = 1_000_000;

/// Upper bound on candidates per simulation, the current one included.
pub const MAX_CANDIDATES: usize = 1_000;

/// Upper bound on ranking entries produced by one run (`simulations * field_size()`).
pub const MAX_RANKING_ENTRIES: u64 = 5_000_000;

/// Parameters of one simulation run. Field names match the `/simulate` request body;
/// omitted fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParams {
    /// The current candidate's written exam score.
    pub exam_score: f64,
    /// Written exam scores of the other candidates.
    pub other_exam_scores: Vec<f64>,
    /// Number of simulations to run.
    pub simulations: u32,
    /// Rank at or above which a simulation counts as a success.
    pub top_n: u32,
    /// Mean of the interview score distribution.
    pub average: f64,
    /// Standard deviation of the interview score distribution.
    pub stddev: f64,
    /// Lowest possible interview score.
    pub min: f64,
    /// Highest possible interview score.
    pub max: f64,
    /// Fixed RNG seed for reproducible runs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            exam_score: 80.0,
            other_exam_scores: vec![86.0, 84.5, 82.0, 79.0, 77.5, 75.0, 72.0],
            simulations: 1000,
            top_n: 5,
            average: 80.0,
            stddev: 8.0,
            min: 60.0,
            max: 100.0,
            seed: None,
        }
    }
}

fn ensure_finite(value: f64, field: &str) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(RankplotError::validation_field(
            format!("{field} must be a finite number"),
            field,
        ))
    }
}

impl SimulationParams {
    /// Check the parameters before a run.
    pub fn validate(&self) -> Result<()> {
        if self.simulations == 0 || self.simulations > MAX_SIMULATIONS {
            return Err(RankplotError::validation_field(
                format!("simulations must be between 1 and {MAX_SIMULATIONS}"),
                "simulations",
            ));
        }
        if self.field_size() > MAX_CANDIDATES {
            return Err(RankplotError::validation_field(
                format!(
                    "at most {} other candidates are supported, got {}",
                    MAX_CANDIDATES - 1,
                    self.other_exam_scores.len()
                ),
                "other_exam_scores",
            ));
        }
        let entries = u64::from(self.simulations) * self.field_size() as u64;
        if entries > MAX_RANKING_ENTRIES {
            return Err(RankplotError::validation_field(
                format!(
                    "{} simulations of {} candidates exceed the limit of {MAX_RANKING_ENTRIES} ranking entries",
                    self.simulations,
                    self.field_size()
                ),
                "other_exam_scores",
            ));
        }
        if self.top_n == 0 {
            return Err(RankplotError::validation_field(
                "top_n must be at least 1",
                "top_n",
            ));
        }

        ensure_finite(self.exam_score, "exam_score")?;
        ensure_finite(self.average, "average")?;
        ensure_finite(self.stddev, "stddev")?;
        ensure_finite(self.min, "min")?;
        ensure_finite(self.max, "max")?;
        for (i, score) in self.other_exam_scores.iter().enumerate() {
            ensure_finite(*score, &format!("other_exam_scores[{i}]"))?;
        }

        if self.stddev < 0.0 {
            return Err(RankplotError::validation_field(
                "stddev cannot be negative",
                "stddev",
            ));
        }
        if self.min > self.max {
            return Err(RankplotError::validation_field(
                format!("min ({}) is greater than max ({})", self.min, self.max),
                "min",
            ));
        }

        Ok(())
    }

    /// Number of candidates in each simulation, the current one included.
    pub fn field_size(&self) -> usize {
        self.other_exam_scores.len() + 1
    }
}
