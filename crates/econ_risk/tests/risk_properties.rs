//! Statistical and ordering properties of the risk tools.

use econ_risk::{
    evaluate, DecisionNode, Distribution, MonteCarloInput, MonteCarloSimulator,
    SensitivityAnalyzer, SensitivityInput, VariableRange,
};
use std::collections::BTreeMap;

#[test]
fn uniform_monte_carlo_converges() {
    let input = MonteCarloInput::new(100_000)
        .with_variable("cost", Distribution::uniform(0.0, 100.0).unwrap());
    let result = MonteCarloSimulator::default()
        .simulate_parallel(&input, 2024)
        .unwrap();
    let cost = &result.statistics["cost"];

    assert_eq!(result.iterations, 100_000);
    assert!((cost.mean - 50.0).abs() < 1.0, "mean = {}", cost.mean);
    assert!((cost.percentiles.p50 - 50.0).abs() < 2.0);
    assert!((cost.percentiles.p10 - 10.0).abs() < 2.0);
    assert!((cost.percentiles.p90 - 90.0).abs() < 2.0);
    // Uniform(0, 100) has standard deviation 100 / sqrt(12)
    assert!((cost.std_dev - 28.8675).abs() < 0.5);
}

#[test]
fn normal_monte_carlo_converges() {
    let input = MonteCarloInput::new(100_000)
        .with_variable("effort", Distribution::normal(120.0, 15.0).unwrap());
    let result = MonteCarloSimulator::default()
        .simulate_parallel(&input, 8)
        .unwrap();
    let effort = &result.statistics["effort"];
    assert!((effort.mean - 120.0).abs() < 0.5);
    assert!((effort.std_dev - 15.0).abs() < 0.5);
    // z(0.9) = 1.2816
    assert!((effort.percentiles.p90 - (120.0 + 15.0 * 1.2816)).abs() < 0.6);
}

#[test]
fn sensitivity_sign_follows_evaluation_direction() {
    let input = SensitivityInput {
        base_value: 10.0,
        variables: BTreeMap::from([("driver".to_string(), VariableRange { min: 5.0, max: 15.0 })]),
    };
    let analyzer = SensitivityAnalyzer::new();

    let increasing = analyzer.analyze(&input, |x| 3.0 * x).unwrap();
    assert!(increasing.variables[0].range > 0.0);

    let decreasing = analyzer.analyze(&input, |x| 100.0 - 3.0 * x).unwrap();
    assert!(decreasing.variables[0].range < 0.0);
}

#[test]
fn decision_picks_gamble_with_higher_expectation() {
    let tree: DecisionNode = serde_json::from_str(
        r#"{
            "name": "bid",
            "kind": "decision",
            "children": [
                {
                    "name": "gamble",
                    "kind": "chance",
                    "children": [
                        {"name": "win", "kind": "outcome", "probability": 0.5, "value": 100},
                        {"name": "lose", "kind": "outcome", "probability": 0.5, "value": 0}
                    ]
                },
                {"name": "sure", "kind": "outcome", "value": 40}
            ]
        }"#,
    )
    .unwrap();
    let result = evaluate(&tree).unwrap();
    assert_eq!(result.optimal_choice(), Some("gamble"));
    assert_eq!(result.expected_value, 50.0);
}
