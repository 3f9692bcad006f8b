use satls_challenges::satisfiability::{Challenge, Difficulty};
use satls_runtime::{
    instances::{loader_for, DimacsInstanceLoader, GeneratedInstanceLoader, InstanceLoader},
    settings::{load_config, load_solution},
};
use satls_structs::config::InstanceConfig;
use std::fs;

const UF4: &str = "c tiny instance
p cnf 4 3
1 -2 0
2 3 -4
0
-1 4 0
";

#[test]
fn test_dimacs_loader() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("tiny.cnf"), UF4).unwrap();
    let loader = DimacsInstanceLoader::new(dir.path());
    assert_eq!(loader.path_for("tiny"), dir.path().join("tiny.cnf"));

    let instance = loader.load("tiny").unwrap();
    assert_eq!(instance.domain, "SAT");
    assert_eq!(instance.instance_id, "tiny");
    assert_eq!(instance.formula.num_variables(), 4);
    assert_eq!(instance.formula.num_clauses(), 3);

    assert!(loader.load("missing").is_err());
    assert_eq!(
        loader.load("../tiny").unwrap_err().to_string(),
        "Invalid instance id '../tiny'"
    );
    assert!(loader.load("").is_err());
}

#[test]
fn test_generated_loader_is_seeded_by_id() {
    let difficulty = Difficulty {
        num_variables: 30,
        clauses_to_variables_percent: 300,
    };
    let loader = GeneratedInstanceLoader::new(difficulty);
    let a = loader.load("a").unwrap();
    let a2 = loader.load("a").unwrap();
    let b = loader.load("b").unwrap();
    assert_eq!(a.formula.num_clauses(), 90);
    assert_eq!(a.formula.clauses(), a2.formula.clauses());
    assert_ne!(a.formula.clauses(), b.formula.clauses());

    let boxed = loader_for(
        &InstanceConfig::Generated {
            id: "a".to_string(),
            difficulty,
        },
        std::path::Path::new("."),
    );
    assert_eq!(boxed.load("a").unwrap().formula.clauses(), a.formula.clauses());
}

#[test]
fn test_load_solution_formats() {
    let expected = vec![true, false, false, true];
    assert_eq!(load_solution("1001").unwrap().variables, expected);
    assert_eq!(load_solution("[1,0,0,1]").unwrap().variables, expected);
    assert_eq!(
        load_solution("{\"variables\":[1,0,0,1]}").unwrap().variables,
        expected
    );
    assert!(load_solution("[1,2]").is_err());
    assert!(load_solution("10x1").is_err());

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("solution.json");
    fs::write(&path, "[0,1]").unwrap();
    assert_eq!(
        load_solution(path.to_str().unwrap()).unwrap().variables,
        vec![false, true]
    );

    let challenge = Challenge::from_dimacs(UF4).unwrap();
    assert_eq!(
        challenge
            .evaluate_solution(&load_solution("0000").unwrap())
            .unwrap(),
        0
    );
}

#[test]
fn test_load_config() {
    let json = r#"{
        "instance": {"source": "dimacs", "id": "uf20-01"},
        "total_runs": 2,
        "seed_phrase": "lab 3",
        "budget": {"max_nominal_seconds": 0.5, "calibration": 2.0},
        "methods": [{"method": "random_walk"}],
        "parallel": true
    }"#;
    let config = load_config(json).unwrap();
    assert_eq!(config.instance.id(), "uf20-01");
    assert_eq!(config.budget.deadline(), Some(std::time::Duration::from_secs(1)));
    assert!(config.parallel);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, json).unwrap();
    assert_eq!(load_config(path.to_str().unwrap()).unwrap(), config);

    assert!(load_config("{").is_err());
    assert!(load_config("missing.json").is_err());
    let invalid = json.replace("\"total_runs\": 2", "\"total_runs\": 0");
    assert_eq!(
        load_config(&invalid).unwrap_err().to_string(),
        "total_runs must be greater than 0"
    );
}
