use satls_challenges::satisfiability::{Challenge, Difficulty, Formula, Solution};

const UF4: &str = "c a tiny instance
c with comments
p cnf 4 3
1 -2 0
2 3
-4 0
-1 4 0
%
0
";

#[test]
fn test_from_dimacs() {
    let challenge = Challenge::from_dimacs(UF4).unwrap();
    assert_eq!(challenge.num_variables, 4);
    assert_eq!(
        challenge.clauses,
        vec![vec![1, -2], vec![2, 3, -4], vec![-1, 4]]
    );
    let reparsed = Challenge::from_dimacs(&challenge.to_dimacs()).unwrap();
    assert_eq!(reparsed, challenge);
}

#[test]
fn test_from_dimacs_errors() {
    assert!(Challenge::from_dimacs("1 2 0\n").is_err());
    assert!(Challenge::from_dimacs("p cnf 2 1\np cnf 2 1\n1 2 0\n").is_err());
    assert!(Challenge::from_dimacs("p cnf 2 1\n1 3 0\n").is_err());
    assert!(Challenge::from_dimacs("p cnf 2 2\n1 2 0\n").is_err());
    assert!(Challenge::from_dimacs("p cnf 2 1\n1 2\n").is_err());
    assert!(Challenge::from_dimacs("p cnf 2 1\n1 x 0\n").is_err());
    assert!(Challenge::from_dimacs("p dnf 2 1\n1 2 0\n").is_err());
}

#[test]
fn test_evaluate_and_verify_solution() {
    let challenge = Challenge::from_dimacs(UF4).unwrap();
    let all_false = Solution::new(vec![false; 4]);
    // -2, -4 and -1 make every clause true
    assert_eq!(challenge.evaluate_solution(&all_false).unwrap(), 0);
    assert!(challenge.verify_solution(&all_false).is_ok());

    let solution = Solution::new(vec![true, true, false, false]);
    // (-1 v 4) is violated
    assert_eq!(challenge.evaluate_solution(&solution).unwrap(), 1);
    assert_eq!(
        challenge.verify_solution(&solution).unwrap_err().to_string(),
        "Clause '2' not satisfied"
    );
    assert!(challenge
        .evaluate_solution(&Solution::new(vec![true]))
        .is_err());
}

#[test]
fn test_generate_instance() {
    let difficulty = Difficulty {
        num_variables: 50,
        clauses_to_variables_percent: 426,
    };
    let a = Challenge::generate_instance(&[1u8; 32], &difficulty).unwrap();
    let b = Challenge::generate_instance(&[1u8; 32], &difficulty).unwrap();
    let c = Challenge::generate_instance(&[2u8; 32], &difficulty).unwrap();
    assert_eq!(a, b);
    assert_ne!(a.clauses, c.clauses);
    assert_eq!(a.num_clauses(), 213);
    assert!(a.clauses.iter().all(|clause| clause.len() == 3
        && clause
            .iter()
            .all(|&l| l != 0 && l.unsigned_abs() as usize <= 50)));
    assert!(Formula::try_from(&a).is_ok());

    let empty = Difficulty {
        num_variables: 0,
        clauses_to_variables_percent: 100,
    };
    assert!(Challenge::generate_instance(&[1u8; 32], &empty).is_err());

    // `n + 1` would not fit the i32 literal type
    let too_many = Difficulty {
        num_variables: i32::MAX as usize,
        clauses_to_variables_percent: 0,
    };
    assert_eq!(
        Challenge::generate_instance(&[1u8; 32], &too_many)
            .unwrap_err()
            .to_string(),
        format!("Invalid number of variables: {}", i32::MAX)
    );
    assert_eq!(difficulty.num_clauses(), 213);
}

#[test]
fn test_formula_rejects_out_of_range_literals() {
    assert!(Formula::new(2, vec![vec![1, 0]]).is_err());
    assert!(Formula::new(2, vec![vec![-3]]).is_err());
    let formula = Formula::new(2, vec![vec![1, -1], vec![]]).unwrap();
    // a tautology is always satisfied, an empty clause never is
    assert_eq!(formula.count_unsatisfied(&[false, false]), 1);
    assert_eq!(formula.count_unsatisfied(&[true, true]), 1);
}

#[test]
fn test_solution_encodings() {
    let solution = Solution::new(vec![true, false, false, true]);
    assert_eq!(solution.to_string(), "1001");
    assert_eq!(Solution::from_bit_string("1001\n").unwrap(), solution);
    assert!(Solution::from_bit_string("10x1").is_err());

    let json = serde_json::to_string(&solution).unwrap();
    assert_eq!(json, r#"{"variables":[1,0,0,1]}"#);
    let parsed: Solution = serde_json::from_str(r#"{"variables":[true,0,false,1]}"#).unwrap();
    assert_eq!(parsed, solution);
    assert!(serde_json::from_str::<Solution>(r#"{"variables":[1,2]}"#).is_err());
    assert!(serde_json::from_str::<Solution>(r#"{"variables":["1"]}"#).is_err());
}
