//! Tests for solver configuration.

use super::*;

#[test]
fn test_toml_parsing() {
    let toml = r#"
        random_seed = 42

        [termination]
        seconds_spent_limit = 5
        unimproved_step_count_limit = 1000
        best_score_feasible = true

        [local_search]
        move_sample_size = 16
        tabu_size = 4

        [local_search.acceptor]
        type = "late_acceptance"
        late_acceptance_size = 100

        [manager]
        pool_size = 4
    "#;

    let config = SolverConfig::from_toml_str(toml).unwrap();
    assert_eq!(config.random_seed, Some(42));
    assert_eq!(config.termination.time_limit(), Duration::from_secs(5));
    assert_eq!(config.termination.unimproved_step_count_limit, Some(1000));
    assert!(config.termination.best_score_feasible);
    assert_eq!(config.local_search.move_sample_size, 16);
    assert_eq!(config.local_search.tabu_size, 4);
    assert_eq!(config.local_search.swap_move_ratio, 0.2);
    assert_eq!(
        config.local_search.acceptor,
        AcceptorConfig::LateAcceptance(LateAcceptanceConfig {
            late_acceptance_size: 100
        })
    );
    assert_eq!(config.manager.pool_size, 4);
    assert!(config.validate().is_ok());
}

#[test]
fn test_yaml_parsing() {
    let yaml = r#"
        random_seed: 42
        termination:
          minutes_spent_limit: 2
          step_count_limit: 5000
        local_search:
          acceptor:
            type: hill_climbing
    "#;

    let config = SolverConfig::from_yaml_str(yaml).unwrap();
    assert_eq!(config.random_seed, Some(42));
    assert_eq!(config.termination.time_limit(), Duration::from_secs(120));
    assert_eq!(config.termination.step_count_limit, Some(5000));
    assert_eq!(config.local_search.acceptor, AcceptorConfig::HillClimbing);
}

#[test]
fn test_empty_document_uses_defaults() {
    let config = SolverConfig::from_toml_str("").unwrap();
    assert_eq!(config, SolverConfig::default());
    assert_eq!(config.termination.time_limit(), DEFAULT_TIME_LIMIT);
    assert_eq!(config.local_search.move_sample_size, 64);
    assert_eq!(
        config.local_search.acceptor,
        AcceptorConfig::LateAcceptance(LateAcceptanceConfig {
            late_acceptance_size: 400
        })
    );
    assert_eq!(config.manager.pool_size, 2);
}

#[test]
fn test_simulated_annealing_defaults() {
    let config = SolverConfig::from_toml_str(
        r#"
        [local_search.acceptor]
        type = "simulated_annealing"
        "#,
    )
    .unwrap();

    assert_eq!(
        config.local_search.acceptor,
        AcceptorConfig::SimulatedAnnealing(SimulatedAnnealingConfig::default())
    );
}

#[test]
fn test_unknown_acceptor_is_a_parse_error() {
    let err = SolverConfig::from_toml_str(
        r#"
        [local_search.acceptor]
        type = "great_deluge"
        "#,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::Toml(_)));
}

#[test]
fn test_builder() {
    let config = SolverConfig::new()
        .with_random_seed(123)
        .with_termination_seconds(60)
        .with_step_limit(10_000)
        .with_pool_size(3)
        .with_acceptor(AcceptorConfig::HillClimbing);

    assert_eq!(config.random_seed, Some(123));
    assert_eq!(config.termination.time_limit(), Duration::from_secs(60));
    assert_eq!(config.termination.step_count_limit, Some(10_000));
    assert_eq!(config.manager.pool_size, 3);
    assert_eq!(config.local_search.acceptor, AcceptorConfig::HillClimbing);
}

#[test]
fn test_validate_rejects_bad_values() {
    let invalid = |config: SolverConfig| matches!(config.validate(), Err(ConfigError::Invalid(_)));

    assert!(invalid(SolverConfig::new().with_pool_size(0)));

    let mut zero_sample = SolverConfig::new();
    zero_sample.local_search.move_sample_size = 0;
    assert!(invalid(zero_sample));

    let mut bad_ratio = SolverConfig::new();
    bad_ratio.local_search.swap_move_ratio = 1.5;
    assert!(invalid(bad_ratio));

    for decay_rate in [0.0, -0.5, 1.01, f64::NAN] {
        let config = SolverConfig::new().with_acceptor(AcceptorConfig::SimulatedAnnealing(
            SimulatedAnnealingConfig {
                starting_temperature: 1.0,
                decay_rate,
            },
        ));
        assert!(invalid(config), "decay_rate {decay_rate}");
    }

    let no_decay = SolverConfig::new().with_acceptor(AcceptorConfig::SimulatedAnnealing(
        SimulatedAnnealingConfig {
            starting_temperature: 1.0,
            decay_rate: 1.0,
        },
    ));
    assert!(no_decay.validate().is_ok());

    let empty_history = SolverConfig::new().with_acceptor(AcceptorConfig::LateAcceptance(
        LateAcceptanceConfig {
            late_acceptance_size: 0,
        },
    ));
    assert!(invalid(empty_history));
}

#[test]
fn test_load_picks_format_by_extension() {
    let dir = std::env::temp_dir().join(format!("clubplan-config-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();

    let toml_path = dir.join("solver.toml");
    std::fs::write(&toml_path, "[manager]\npool_size = 3\n").unwrap();
    assert_eq!(SolverConfig::load(&toml_path).unwrap().manager.pool_size, 3);

    let yaml_path = dir.join("solver.yml");
    std::fs::write(&yaml_path, "manager:\n  pool_size: 5\n").unwrap();
    assert_eq!(SolverConfig::load(&yaml_path).unwrap().manager.pool_size, 5);

    let invalid_path = dir.join("invalid.toml");
    std::fs::write(&invalid_path, "[manager]\npool_size = 0\n").unwrap();
    assert!(matches!(
        SolverConfig::load(&invalid_path),
        Err(ConfigError::Invalid(_))
    ));

    assert!(matches!(
        SolverConfig::load(dir.join("missing.toml")),
        Err(ConfigError::Io(_))
    ));

    std::fs::remove_dir_all(&dir).unwrap();
}
