//! Integration tests for rankplot-sim crate.

use rankplot_common::SimulationResults;
use rankplot_sim::{SimulationParams, Simulator};

#[test]
fn test_results_document_round_trips_through_disk() {
    let params = SimulationParams {
        simulations: 25,
        seed: Some(42),
        ..SimulationParams::default()
    };
    let results = Simulator::for_params(&params).run(&params).expect("run failed");

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("rank.json");
    results.write_to_path(&path).expect("Failed to write results");

    let reread = SimulationResults::from_path(&path).expect("Failed to read results");
    assert_eq!(reread.len(), 25);
    assert_eq!(reread.success_count, results.success_count);
    assert_eq!(reread.results[0].your_rank, results.results[0].your_rank);
}

#[test]
fn test_strong_candidate_usually_reaches_top_five() {
    let params = SimulationParams {
        exam_score: 99.0,
        other_exam_scores: vec![60.0, 61.0, 62.0, 63.0, 64.0, 65.0],
        simulations: 500,
        top_n: 5,
        average: 75.0,
        stddev: 5.0,
        min: 60.0,
        max: 90.0,
        seed: Some(1),
    };
    let results = Simulator::for_params(&params).run(&params).expect("run failed");

    assert!(results.top5_probability > 0.9);
}
