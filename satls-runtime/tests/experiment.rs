use satls_challenges::{satisfiability::Difficulty, Budget};
use satls_runtime::{
    experiment::{
        best_values_table, build_search_method, run_experiment, run_trial, trial_summary_csv,
    },
    instances::{GeneratedInstanceLoader, InstanceLoader},
};
use satls_structs::{
    config::{ExperimentConfig, InstanceConfig, SearchMethodConfig},
    core::RunData,
};

fn difficulty() -> Difficulty {
    Difficulty {
        num_variables: 40,
        clauses_to_variables_percent: 426,
    }
}

fn config(parallel: bool) -> ExperimentConfig {
    ExperimentConfig {
        instance: InstanceConfig::Generated {
            id: "uf40-test".to_string(),
            difficulty: difficulty(),
        },
        total_runs: 4,
        seeds: vec![123],
        seed_phrase: None,
        budget: Budget::evaluations(800),
        methods: vec![
            SearchMethodConfig::RandomWalk,
            SearchMethodConfig::IteratedLocalSearch {
                mutation_heuristic: 0,
                local_search_heuristic: 1,
                intensity_of_mutation: 2,
                depth_of_search: 1,
            },
            SearchMethodConfig::LocalSearch { heuristic: 2 },
        ],
        parallel,
    }
}

type Outcome = (usize, usize, u64, Option<u32>, Vec<u32>, Option<String>);

fn outcome(results: &[Vec<RunData>]) -> Vec<Outcome> {
    results
        .iter()
        .flatten()
        .map(|run| {
            (
                run.method_id,
                run.trial_id,
                run.seed,
                run.best_value,
                run.fitness_trace.clone(),
                run.best_solution.clone(),
            )
        })
        .collect()
}

#[test]
fn test_run_experiment_groups_by_method_and_trial() {
    let loader = GeneratedInstanceLoader::new(difficulty());
    let results = run_experiment(&config(false), &loader).unwrap();
    assert_eq!(results.len(), 3);
    let seeds = config(false).trial_seeds().unwrap();
    for (method_id, runs) in results.iter().enumerate() {
        assert_eq!(runs.len(), 4);
        for (trial_id, run) in runs.iter().enumerate() {
            assert_eq!(run.method_id, method_id);
            assert_eq!(run.trial_id, trial_id);
            assert_eq!(run.seed, seeds[trial_id]);
            assert_eq!(run.result.domain, "SAT");
            assert_eq!(run.result.instance_id, "uf40-test");
            assert_eq!(run.result.best_value, run.best_value);
            assert!(run.best_value <= run.fitness_trace.iter().min().copied());
            assert_eq!(run.best_solution.as_ref().map(|s| s.len()), Some(40));
        }
    }
    assert_eq!(results[0][0].method_name, "Random Walk");
    assert_eq!(results[1][0].method_name, "Iterated Local Search");
    assert_eq!(results[2][0].method_name, "Steepest Descent Hill Climbing");
}

#[test]
fn test_parallel_matches_sequential() {
    let loader = GeneratedInstanceLoader::new(difficulty());
    let sequential = run_experiment(&config(false), &loader).unwrap();
    let parallel = run_experiment(&config(true), &loader).unwrap();
    assert_eq!(outcome(&sequential), outcome(&parallel));
}

#[test]
fn test_run_trial_is_deterministic() {
    let instance = GeneratedInstanceLoader::new(difficulty())
        .load("uf40-test")
        .unwrap();
    let method = SearchMethodConfig::IteratedLocalSearch {
        mutation_heuristic: 0,
        local_search_heuristic: 2,
        intensity_of_mutation: 1,
        depth_of_search: 2,
    };
    let budget = Budget::evaluations(500);
    let a = run_trial(&instance, &budget, 0, &method, 0, 99).unwrap();
    let b = run_trial(&instance, &budget, 0, &method, 0, 99).unwrap();
    assert_eq!(a.fitness_trace, b.fitness_trace);
    assert_eq!(a.best_solution, b.best_solution);
    assert_eq!(a.result.nominal_time_budget, None);
}

#[test]
fn test_invalid_heuristic_id_is_a_config_error() {
    let err = build_search_method(&SearchMethodConfig::LocalSearch { heuristic: 7 })
        .err()
        .unwrap();
    assert_eq!(
        err.to_string(),
        "Invalid heuristic id '7'. Expected one of 0..3"
    );

    let mut config = config(false);
    config.methods.push(SearchMethodConfig::IteratedLocalSearch {
        mutation_heuristic: 3,
        local_search_heuristic: 1,
        intensity_of_mutation: 1,
        depth_of_search: 1,
    });
    let loader = GeneratedInstanceLoader::new(difficulty());
    assert!(run_experiment(&config, &loader).is_err());
}

#[test]
fn test_report_formatting() {
    let loader = GeneratedInstanceLoader::new(difficulty());
    let mut config = config(false);
    config.total_runs = 2;
    let results = run_experiment(&config, &loader).unwrap();

    let table = best_values_table(&results);
    let lines: Vec<&str> = table.lines().collect();
    assert_eq!(
        lines[0],
        "TrialId\tRandom Walk\tIterated Local Search\tSteepest Descent Hill Climbing"
    );
    assert_eq!(lines.len(), 3);
    assert!(lines[1].starts_with("0\t"));
    assert_eq!(lines[2].split('\t').count(), 4);

    let csv = trial_summary_csv(&results[0]);
    let rows: Vec<&str> = csv.lines().collect();
    assert_eq!(
        rows[0],
        "seed,f_best,time_taken(seconds),time_taken(nominal seconds)"
    );
    assert_eq!(rows.len(), 3);
    assert!(rows[1].starts_with(&format!("{},", results[0][0].seed)));
}

#[test]
fn test_oversized_time_budget_is_rejected() {
    let mut config = config(true);
    config.budget = Budget::nominal_seconds(1e20).with_max_evaluations(10);
    assert!(config.validate().is_err());
    let loader = GeneratedInstanceLoader::new(difficulty());
    assert!(run_experiment(&config, &loader).is_err());

    // run_trial does not validate, so the oversized limit is treated as no time limit
    let instance = loader.load("uf40-test").unwrap();
    let run = run_trial(&instance, &config.budget, 0, &config.methods[1], 0, 5).unwrap();
    assert_eq!(run.result.nominal_time_budget, Some(1e20));
    assert!(!run.fitness_trace.is_empty());
}
