//! Extraction of the plotted sequences from a results document

use rankplot_common::{CandidateScore, RankplotError, Result, SimulationRecord, SimulationResults};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

/// Relative tolerance when matching a ranking entry to the record's total score.
const SCORE_TOLERANCE: f64 = 1e-9;

fn scores_match(a: f64, b: f64) -> bool {
    (a - b).abs() <= SCORE_TOLERANCE * a.abs().max(b.abs()).max(1.0)
}

/// Render a fraction as a percentage with two decimals (0.4321 -> "43.21%").
pub fn format_probability(probability: f64) -> String {
    format!("{:.2}%", probability * 100.0)
}

/// Strategy for finding the current candidate inside `rankings`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateLocator {
    /// Take the last entry. Only correct when the candidate was appended after sorting.
    Last,
    /// Take `rankings[your_rank - 1]`, falling back to a search by total score.
    #[default]
    ByRank,
}

impl fmt::Display for CandidateLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Last => f.write_str("last"),
            Self::ByRank => f.write_str("by_rank"),
        }
    }
}

impl FromStr for CandidateLocator {
    type Err = RankplotError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "last" => Ok(Self::Last),
            "by_rank" | "by-rank" | "rank" => Ok(Self::ByRank),
            _ => Err(RankplotError::validation_field(
                format!("unknown candidate locator '{s}'"),
                "candidate_locator",
            )),
        }
    }
}

/// Where a located entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Located {
    /// The entry the locator points at carries the record's total score.
    Direct,
    /// The entry the locator points at does not carry the record's total score.
    Unverified,
    /// Found by searching for the record's total score.
    Searched,
}

impl CandidateLocator {
    fn locate<'a>(
        self,
        index: usize,
        record: &'a SimulationRecord,
    ) -> Result<(&'a CandidateScore, Located)> {
        let rankings = &record.rankings;

        match self {
            Self::Last => {
                let entry = rankings.last().ok_or_else(|| empty_rankings(index))?;
                if scores_match(entry.total_score, record.total_score) {
                    Ok((entry, Located::Direct))
                } else {
                    Ok((entry, Located::Unverified))
                }
            }
            Self::ByRank => {
                let direct = (record.your_rank as usize)
                    .checked_sub(1)
                    .and_then(|i| rankings.get(i))
                    .filter(|entry| scores_match(entry.total_score, record.total_score));
                if let Some(entry) = direct {
                    return Ok((entry, Located::Direct));
                }

                rankings
                    .iter()
                    .find(|entry| scores_match(entry.total_score, record.total_score))
                    .map(|entry| (entry, Located::Searched))
                    .ok_or_else(|| {
                        RankplotError::validation_field(
                            format!(
                                "no ranking entry carries the record's total score {}",
                                record.total_score
                            ),
                            format!("results[{index}].rankings"),
                        )
                    })
            }
        }
    }
}

fn empty_rankings(index: usize) -> RankplotError {
    RankplotError::validation_field(
        "rankings is empty",
        format!("results[{index}].rankings"),
    )
}

/// The per-simulation sequences plotted by the report, all of equal length.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportSeries {
    pub total_scores: Vec<f64>,
    pub max_scores: Vec<f64>,
    pub min_scores: Vec<f64>,
    pub your_ranks: Vec<u32>,
    pub your_interview_scores: Vec<f64>,
    pub top5_probability: f64,
}

impl ReportSeries {
    /// Extract the plotted sequences from a results document.
    pub fn from_results(doc: &SimulationResults, locator: CandidateLocator) -> Result<Self> {
        let n = doc.results.len();
        let mut series = Self {
            total_scores: Vec::with_capacity(n),
            max_scores: Vec::with_capacity(n),
            min_scores: Vec::with_capacity(n),
            your_ranks: Vec::with_capacity(n),
            your_interview_scores: Vec::with_capacity(n),
            top5_probability: doc.top5_probability,
        };

        let mut unverified = 0usize;
        let mut searched = 0usize;

        for (index, record) in doc.results.iter().enumerate() {
            if record.rankings.is_empty() {
                return Err(empty_rankings(index));
            }

            let (max, min) = record.rankings.iter().fold(
                (f64::NEG_INFINITY, f64::INFINITY),
                |(max, min), entry| (max.max(entry.total_score), min.min(entry.total_score)),
            );

            let (own, located) = locator.locate(index, record)?;
            match located {
                Located::Direct => {}
                Located::Unverified => unverified += 1,
                Located::Searched => searched += 1,
            }

            series.total_scores.push(record.total_score);
            series.max_scores.push(max);
            series.min_scores.push(min);
            series.your_ranks.push(record.your_rank);
            series.your_interview_scores.push(own.interview_score);
        }

        if unverified > 0 {
            warn!(
                records = n,
                mismatched = unverified,
                "Last rankings entry does not carry the record's total score; \
                 interview scores may belong to another candidate"
            );
        }
        if searched > 0 {
            warn!(
                records = n,
                searched,
                "your_rank did not point at the candidate; located by total score instead"
            );
        }
        debug!(records = n, %locator, "Extracted report series");

        Ok(series)
    }

    /// Number of simulations in the series.
    pub fn len(&self) -> usize {
        self.total_scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total_scores.is_empty()
    }

    /// Mean rank across simulations, `None` when there are none.
    pub fn mean_rank(&self) -> Option<f64> {
        if self.your_ranks.is_empty() {
            return None;
        }
        let sum: f64 = self.your_ranks.iter().map(|&r| f64::from(r)).sum();
        Some(sum / self.your_ranks.len() as f64)
    }

    /// The top-5 probability formatted for display.
    pub fn formatted_probability(&self) -> String {
        format_probability(self.top5_probability)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = r#"{"results":[{"total_score":80,"your_rank":2,"rankings":[{"total_score":75,"interview_score":70},{"total_score":80,"interview_score":78}]}],"top5_probability":0.5}"#;

    fn candidate(total_score: f64, interview_score: f64) -> CandidateScore {
        CandidateScore {
            exam_score: None,
            interview_score,
            total_score,
        }
    }

    fn record(your_rank: u32, total_score: f64, rankings: Vec<CandidateScore>) -> SimulationRecord {
        SimulationRecord {
            rankings,
            your_rank,
            total_score,
            entered_top_five: your_rank <= 5,
            is_first_place: your_rank == 1,
        }
    }

    fn doc(records: Vec<SimulationRecord>) -> SimulationResults {
        SimulationResults {
            results: records,
            success_count: 0,
            first_place_count: 0,
            top5_probability: 0.25,
            first_place_probability: 0.0,
        }
    }

    #[test]
    fn test_example_document_with_both_locators() {
        let doc = SimulationResults::from_json_str(EXAMPLE).unwrap();

        for locator in [CandidateLocator::Last, CandidateLocator::ByRank] {
            let series = ReportSeries::from_results(&doc, locator).unwrap();
            assert_eq!(series.total_scores, vec![80.0]);
            assert_eq!(series.max_scores, vec![80.0]);
            assert_eq!(series.min_scores, vec![75.0]);
            assert_eq!(series.your_ranks, vec![2]);
            assert_eq!(series.your_interview_scores, vec![78.0]);
            assert_eq!(series.formatted_probability(), "50.00%");
        }
    }

    #[test]
    fn test_format_probability() {
        assert_eq!(format_probability(0.4321), "43.21%");
        assert_eq!(format_probability(0.5), "50.00%");
        assert_eq!(format_probability(0.0), "0.00%");
        assert_eq!(format_probability(1.0), "100.00%");
    }

    #[test]
    fn test_sequences_have_equal_length_and_bound_rankings() {
        let doc = doc(vec![
            record(1, 90.0, vec![candidate(90.0, 88.0), candidate(85.0, 80.0), candidate(70.0, 65.0)]),
            record(3, 72.0, vec![candidate(88.0, 90.0), candidate(80.0, 70.0), candidate(72.0, 71.0)]),
            record(2, 81.5, vec![candidate(83.0, 79.0), candidate(81.5, 77.0)]),
        ]);

        let series = ReportSeries::from_results(&doc, CandidateLocator::ByRank).unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series.max_scores.len(), 3);
        assert_eq!(series.min_scores.len(), 3);
        assert_eq!(series.your_ranks.len(), 3);
        assert_eq!(series.your_interview_scores.len(), 3);

        for (i, rec) in doc.results.iter().enumerate() {
            for entry in &rec.rankings {
                assert!(series.max_scores[i] >= entry.total_score);
                assert!(series.min_scores[i] <= entry.total_score);
            }
        }
        assert_eq!(series.your_interview_scores, vec![88.0, 71.0, 77.0]);
        assert_eq!(series.top5_probability, 0.25);
    }

    #[test]
    fn test_last_locator_keeps_legacy_behaviour_on_sorted_rankings() {
        // Candidate is first, rankings sorted descending: "last" picks someone else.
        let doc = doc(vec![record(
            1,
            90.0,
            vec![candidate(90.0, 88.0), candidate(70.0, 65.0)],
        )]);

        let legacy = ReportSeries::from_results(&doc, CandidateLocator::Last).unwrap();
        assert_eq!(legacy.your_interview_scores, vec![65.0]);

        let by_rank = ReportSeries::from_results(&doc, CandidateLocator::ByRank).unwrap();
        assert_eq!(by_rank.your_interview_scores, vec![88.0]);
    }

    #[test]
    fn test_by_rank_falls_back_to_search() {
        // your_rank points at the wrong entry and a zero rank points at none.
        let doc = doc(vec![
            record(1, 70.0, vec![candidate(90.0, 88.0), candidate(70.0, 65.0)]),
            record(0, 90.0, vec![candidate(90.0, 88.0), candidate(70.0, 65.0)]),
        ]);

        let series = ReportSeries::from_results(&doc, CandidateLocator::ByRank).unwrap();
        assert_eq!(series.your_interview_scores, vec![65.0, 88.0]);
    }

    #[test]
    fn test_by_rank_without_match_is_error() {
        let doc = doc(vec![record(1, 50.0, vec![candidate(90.0, 88.0)])]);

        let err = ReportSeries::from_results(&doc, CandidateLocator::ByRank).unwrap_err();
        match err {
            RankplotError::Validation { field, .. } => {
                assert_eq!(field.as_deref(), Some("results[0].rankings"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_rankings_is_error() {
        let doc = doc(vec![
            record(1, 90.0, vec![candidate(90.0, 88.0)]),
            record(1, 90.0, Vec::new()),
        ]);

        for locator in [CandidateLocator::Last, CandidateLocator::ByRank] {
            let err = ReportSeries::from_results(&doc, locator).unwrap_err();
            assert!(err.to_string().contains("rankings is empty"));
            if let RankplotError::Validation { field, .. } = err {
                assert_eq!(field.as_deref(), Some("results[1].rankings"));
            }
        }
    }

    #[test]
    fn test_empty_document_gives_empty_series() {
        let series = ReportSeries::from_results(&doc(Vec::new()), CandidateLocator::ByRank).unwrap();
        assert!(series.is_empty());
        assert_eq!(series.mean_rank(), None);
    }

    #[test]
    fn test_mean_rank() {
        let doc = doc(vec![
            record(1, 90.0, vec![candidate(90.0, 88.0), candidate(70.0, 65.0)]),
            record(2, 70.0, vec![candidate(90.0, 88.0), candidate(70.0, 65.0)]),
        ]);
        let series = ReportSeries::from_results(&doc, CandidateLocator::ByRank).unwrap();
        assert_eq!(series.mean_rank(), Some(1.5));
    }

    #[test]
    fn test_locator_parsing() {
        assert_eq!("last".parse::<CandidateLocator>().unwrap(), CandidateLocator::Last);
        assert_eq!("by-rank".parse::<CandidateLocator>().unwrap(), CandidateLocator::ByRank);
        assert_eq!("BY_RANK".parse::<CandidateLocator>().unwrap(), CandidateLocator::ByRank);
        assert!("first".parse::<CandidateLocator>().is_err());
        assert_eq!(CandidateLocator::default().to_string(), "by_rank");
    }
}
