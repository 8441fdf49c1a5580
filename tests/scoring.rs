//! Tests for path cost and best-path selection

use route_scorer::{
    analyze_batch, path_cost, score_paths, select_best, AnalysisConfig, CostWeights,
    RouteScoreError, Sample, SpeedCorrection, TrajectorySummary,
};

fn summary(name: &str, total_distance: f64, median_speed: f64, stops: i64) -> TrajectorySummary {
    TrajectorySummary {
        file_name: name.to_string(),
        total_distance,
        max_speed: 55.0,
        median_speed,
        stops,
        raw_stop_clusters: (stops + 2).max(0) as usize,
        no_times_deceleration: 6,
        speed_window: SpeedCorrection {
            start: 1,
            end: 98,
            threshold: Some(0.3),
        },
        sample_count: 100,
    }
}

#[test]
fn test_lower_time_wins_all_else_equal() {
    // Zero stops keeps the stop term out of it, so only time differs
    let longer = summary("longer", 12.0, 30.0, 0);
    let shorter = summary("shorter", 9.0, 30.0, 0);

    let best = select_best(&[longer.clone(), shorter.clone()], &CostWeights::default()).unwrap();
    assert_eq!(best.file_name, "shorter");

    let best = select_best(&[shorter, longer], &CostWeights::default()).unwrap();
    assert_eq!(best.file_name, "shorter");
}

#[test]
fn test_stop_density_penalized() {
    let calm = summary("calm", 10.0, 30.0, 1);
    let busy = summary("busy", 10.0, 30.0, 8);
    let best = select_best(&[busy, calm], &CostWeights::default()).unwrap();
    assert_eq!(best.file_name, "calm");
}

#[test]
fn test_negative_stop_count_lowers_cost() {
    let weights = CostWeights::default();
    let none = path_cost(&summary("a", 10.0, 30.0, 0), &weights).unwrap();
    let negative = path_cost(&summary("b", 10.0, 30.0, -2), &weights).unwrap();
    assert!(negative < none);
}

#[test]
fn test_degenerate_summaries_are_skipped() {
    let summaries = vec![
        summary("parked", 0.0, 0.0, -2),
        summary("real", 10.0, 30.0, 1),
        summary("crawl", 3.0, 0.0, 0),
    ];
    let report = score_paths(&summaries, &CostWeights::default());

    assert_eq!(report.costs.len(), 1);
    assert_eq!(report.best.as_ref().unwrap().file_name, "real");
    let skipped: Vec<_> = report.skipped.iter().map(|s| s.file_name.as_str()).collect();
    assert_eq!(skipped, vec!["parked", "crawl"]);
    assert!(report
        .skipped
        .iter()
        .all(|s| matches!(s.error, RouteScoreError::DegenerateTrajectory { .. })));
}

#[test]
fn test_nothing_scorable() {
    let err = select_best(&[summary("parked", 0.0, 0.0, -2)], &CostWeights::default()).unwrap_err();
    assert_eq!(err, RouteScoreError::NoScorableTrajectories { skipped: 1 });

    let err = select_best(&[], &CostWeights::default()).unwrap_err();
    assert_eq!(err, RouteScoreError::NoScorableTrajectories { skipped: 0 });
}

#[test]
fn test_custom_weights() {
    // Only the speed spread matters
    let weights = CostWeights {
        time_weight: 0.0,
        stop_weight: 0.0,
        speed_spread_weight: 1.0,
        ..CostWeights::default()
    };
    let steady = TrajectorySummary {
        max_speed: 32.0,
        ..summary("steady", 20.0, 30.0, 5)
    };
    let jumpy = summary("jumpy", 5.0, 30.0, 0);
    let best = select_best(&[jumpy, steady], &weights).unwrap();
    assert_eq!(best.file_name, "steady");
    assert!((best.cost - 2.0 / 52.13).abs() < 1e-12);
}

#[test]
fn test_weights_from_json() {
    let weights = CostWeights::from_json(r#"{"reference_duration": 45.0}"#).unwrap();
    assert_eq!(weights.reference_duration, 45.0);
    assert_eq!(weights.reference_speed_delta, 52.13);

    let result = CostWeights::from_json(r#"{"reference_speed_delta": -1.0}"#);
    assert!(matches!(result, Err(RouteScoreError::Config { .. })));
}

#[test]
fn test_analyze_then_score() {
    let trip = |speed: f64| -> Vec<Sample> {
        (0..30)
            .map(|i| {
                let v = if i == 0 || i == 29 { 0.0 } else { speed };
                Sample::new(-77.60, 43.30 + i as f64 * 0.005, v)
            })
            .collect()
    };
    let trajectories = vec![
        ("slow.kml".to_string(), trip(18.0)),
        ("empty.kml".to_string(), vec![]),
        ("fast.kml".to_string(), trip(36.0)),
    ];

    let batch = analyze_batch(&trajectories, &AnalysisConfig::default());
    assert_eq!(batch.skipped.len(), 1);

    let best = select_best(&batch.summaries, &CostWeights::default()).unwrap();
    assert_eq!(best.file_name, "fast.kml");
}
