//! Ranking simulation engine

use rankplot_common::{CandidateScore, RankplotError, Result, SimulationRecord, SimulationResults};
use tracing::{debug, info};

use crate::SimulationParams;

/// Weight of the written exam in the total score.
pub const EXAM_WEIGHT: f64 = 0.4;
/// Weight of the interview in the total score.
pub const INTERVIEW_WEIGHT: f64 = 0.6;

/// Draws per score before truncated sampling gives up.
const MAX_SAMPLE_ATTEMPTS: u32 = 100_000;

/// Runs ranking simulations with its own random number generator.
pub struct Simulator {
    rng: fastrand::Rng,
}

impl Simulator {
    /// Create a simulator seeded from system entropy.
    pub fn new() -> Self {
        Self {
            rng: fastrand::Rng::new(),
        }
    }

    /// Create a deterministic simulator.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    /// Create a simulator honouring the optional seed in `params`.
    pub fn for_params(params: &SimulationParams) -> Self {
        params.seed.map_or_else(Self::new, Self::with_seed)
    }

    /// Run `params.simulations` simulations and aggregate the outcome.
    pub fn run(&mut self, params: &SimulationParams) -> Result<SimulationResults> {
        params.validate()?;

        let mut results = Vec::with_capacity(params.simulations as usize);
        let mut success_count = 0u32;
        let mut first_place_count = 0u32;

        for _ in 0..params.simulations {
            let record = self.run_once(params)?;
            if record.entered_top_five {
                success_count += 1;
            }
            if record.is_first_place {
                first_place_count += 1;
            }
            results.push(record);
        }

        let simulations = f64::from(params.simulations);
        let top5_probability = f64::from(success_count) / simulations;
        let first_place_probability = f64::from(first_place_count) / simulations;

        info!(
            simulations = params.simulations,
            candidates = params.field_size(),
            top5_probability,
            first_place_probability,
            "Simulation run complete"
        );

        Ok(SimulationResults {
            results,
            success_count,
            first_place_count,
            top5_probability,
            first_place_probability,
        })
    }

    /// Simulate one exam: score every candidate, rank them, locate the current candidate.
    fn run_once(&mut self, params: &SimulationParams) -> Result<SimulationRecord> {
        let mut candidates = Vec::with_capacity(params.field_size());
        for &exam_score in &params.other_exam_scores {
            candidates.push(self.score_candidate(exam_score, params)?);
        }
        let own = self.score_candidate(params.exam_score, params)?;
        let own_index = candidates.len();
        candidates.push(own);

        // Stable sort, so on equal totals the current candidate stays behind the others.
        let mut order: Vec<usize> = (0..candidates.len()).collect();
        order.sort_by(|&a, &b| {
            candidates[b]
                .total_score
                .total_cmp(&candidates[a].total_score)
        });

        let position = order
            .iter()
            .position(|&i| i == own_index)
            .ok_or_else(|| RankplotError::simulation("current candidate missing from ranking"))?;
        let your_rank = u32::try_from(position + 1)
            .map_err(|_| RankplotError::simulation("rank does not fit in u32"))?;

        let rankings = order.into_iter().map(|i| candidates[i]).collect();

        Ok(SimulationRecord {
            rankings,
            your_rank,
            total_score: own.total_score,
            entered_top_five: your_rank <= params.top_n,
            is_first_place: your_rank == 1,
        })
    }

    fn score_candidate(&mut self, exam_score: f64, params: &SimulationParams) -> Result<CandidateScore> {
        let interview_score = self.sample_interview_score(params)?;
        Ok(CandidateScore {
            exam_score: Some(exam_score),
            interview_score,
            total_score: total_score(exam_score, interview_score),
        })
    }

    /// Draw from N(average, stddev) truncated to [min, max] by rejection.
    fn sample_interview_score(&mut self, params: &SimulationParams) -> Result<f64> {
        for _ in 0..MAX_SAMPLE_ATTEMPTS {
            let score = self.standard_normal() * params.stddev + params.average;
            if score >= params.min && score <= params.max {
                return Ok(score);
            }
        }

        debug!(
            average = params.average,
            stddev = params.stddev,
            min = params.min,
            max = params.max,
            "Interview score range is practically unreachable"
        );
        Err(RankplotError::simulation(format!(
            "no interview score within [{}, {}] after {MAX_SAMPLE_ATTEMPTS} draws from N({}, {})",
            params.min, params.max, params.average, params.stddev
        )))
    }

    /// Box-Muller transform.
    fn standard_normal(&mut self) -> f64 {
        // 1 - [0, 1) keeps the logarithm finite.
        let u1 = 1.0 - self.rng.f64();
        let u2 = self.rng.f64();
        (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos()
    }
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new()
    }
}

/// Weighted total of a written exam and an interview score.
pub fn total_score(exam_score: f64, interview_score: f64) -> f64 {
    exam_score * EXAM_WEIGHT + interview_score * INTERVIEW_WEIGHT
}
