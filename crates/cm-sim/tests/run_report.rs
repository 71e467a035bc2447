use cm_core::errors::codes;
use cm_graph::{DistanceSampling, Shape, ShapedDistribution};
use cm_sim::config::{DistributionConfig, RunConfig, SeedPolicy, SequenceSource};
use cm_sim::execute;

fn scenario_config(seed: u64) -> RunConfig {
    RunConfig {
        sequence: SequenceSource::Explicit {
            degrees: vec![1, 1, 2, 1, 2, 3, 4, 5, 6, 3, 4, 5, 6],
        },
        seed_policy: SeedPolicy { master_seed: seed },
        ..RunConfig::default()
    }
}

fn point_masses(shaped: &ShapedDistribution) -> f64 {
    match shaped {
        ShapedDistribution::PointMass(pmf) => pmf.total_mass(),
        other => panic!("expected point masses, got {other:?}"),
    }
}

#[test]
fn scenario_run_reports_structure_and_distributions() {
    let report = execute(&scenario_config(9)).unwrap();

    assert_eq!(report.summary.vertices, 13);
    assert_eq!(report.summary.edges, 19);
    assert_eq!(report.summary.stubs, 38);
    assert_eq!(report.provenance.seed, 9);
    assert_eq!(report.provenance.graph_hash.len(), 64);
    assert!(report.provenance.tool_versions.contains_key("cm-sim"));

    for shaped in [&report.degree, &report.size_biased, &report.friend] {
        assert!((point_masses(shaped) - 1.0).abs() < 1e-9);
    }
    assert!((report.typical_distance.pmf.total_mass() - 1.0).abs() < 1e-9);
    assert_eq!(report.typical_distance.draws, 169);
    assert_eq!(
        report.typical_distance.lengths + report.typical_distance.disconnected,
        169
    );
}

#[test]
fn same_seed_replays_the_same_report() {
    let first = execute(&scenario_config(1234)).unwrap();
    let second = execute(&scenario_config(1234)).unwrap();
    assert_eq!(first, second);

    let json = serde_json::to_string(&first).unwrap();
    let decoded: cm_sim::RunReport = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded.provenance, first.provenance);
    assert_eq!(decoded.summary, first.summary);
}

#[test]
fn tail_shape_starts_at_one() {
    let config = RunConfig {
        distributions: DistributionConfig { shape: Shape::Tail },
        ..scenario_config(5)
    };
    let report = execute(&config).unwrap();
    match &report.degree {
        ShapedDistribution::Tail(tail) => {
            assert!((tail.at(1).unwrap() - 1.0).abs() < 1e-9);
            assert!((tail.at(6).unwrap() - 2.0 / 13.0).abs() < 1e-9);
        }
        other => panic!("expected tail, got {other:?}"),
    }
}

#[test]
fn sampled_distance_collects_requested_pairs() {
    let config = RunConfig {
        distance: DistanceSampling::Sampled {
            pairs: 40,
            max_draws: None,
        },
        ..scenario_config(77)
    };
    let report = execute(&config).unwrap();
    assert_eq!(report.typical_distance.lengths, 40);
    assert_eq!(
        report.typical_distance.draws,
        40 + report.typical_distance.disconnected
    );
}

#[test]
fn invalid_sequence_aborts_the_run() {
    let config = RunConfig {
        sequence: SequenceSource::Explicit {
            degrees: vec![2, 1],
        },
        ..RunConfig::default()
    };
    assert_eq!(execute(&config).unwrap_err().code(), codes::ODD_SUM);
}

#[test]
fn report_json_exposes_every_section() {
    let report = execute(&scenario_config(3)).unwrap();
    let value = serde_json::to_value(&report).unwrap();
    let mut keys: Vec<&str> = value
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    keys.sort_unstable();
    assert_eq!(
        keys,
        [
            "degree",
            "friend",
            "provenance",
            "size_biased",
            "summary",
            "typical_distance"
        ]
    );
    assert_eq!(value["degree"]["shape"], "point-mass");
    assert_eq!(value["provenance"]["seed"], 3);
}
