use anyhow::{anyhow, Result};
use ndarray::Array2;
use rand::{
    distributions::{Distribution, Uniform},
    rngs::{SmallRng, StdRng},
    Rng, SeedableRng,
};
use serde::{Deserialize, Serialize};
use std::fmt;

mod dimacs;
mod formula;
pub use formula::Formula;
mod problem;
pub use problem::*;

/// Objective value of a MAX-SAT assignment: the number of unsatisfied clauses.
pub type ObjectiveValue = u32;

#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
pub struct Difficulty {
    pub num_variables: usize,
    pub clauses_to_variables_percent: u32,
}

impl Difficulty {
    pub fn num_clauses(&self) -> usize {
        (self.num_variables as f64 * self.clauses_to_variables_percent as f64 / 100.0).floor()
            as usize
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    #[serde(with = "bits")]
    pub variables: Vec<bool>,
}

impl Solution {
    pub fn new(variables: Vec<bool>) -> Self {
        Self { variables }
    }

    /// Parses the encoding produced by `Display`: one `'0'`/`'1'` per variable.
    pub fn from_bit_string(bits: &str) -> Result<Self> {
        let variables = bits
            .trim()
            .chars()
            .enumerate()
            .map(|(idx, c)| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                _ => Err(anyhow!("Invalid character '{}' at position {}", c, idx)),
            })
            .collect::<Result<Vec<bool>>>()?;
        Ok(Self { variables })
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &value in &self.variables {
            f.write_str(if value { "1" } else { "0" })?;
        }
        Ok(())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Challenge {
    pub seed: [u8; 32],
    pub num_variables: usize,
    pub clauses: Vec<Vec<i32>>,
}

impl Challenge {
    /// Uniform random 3-SAT with `floor(n * percent / 100)` clauses.
    pub fn generate_instance(seed: &[u8; 32], difficulty: &Difficulty) -> Result<Self> {
        // literals are `±v` with `v` in 1..=n, so n must stay below i32::MAX
        if difficulty.num_variables == 0 || difficulty.num_variables >= i32::MAX as usize {
            return Err(anyhow!(
                "Invalid number of variables: {}",
                difficulty.num_variables
            ));
        }
        let mut rng = SmallRng::from_seed(StdRng::from_seed(*seed).gen());
        let variable = Uniform::new_inclusive(1, difficulty.num_variables as i32);

        let literals = Array2::from_shape_fn((difficulty.num_clauses(), 3), |_| {
            let var = variable.sample(&mut rng);
            if rng.gen::<bool>() {
                var
            } else {
                -var
            }
        });
        let clauses = literals.rows().into_iter().map(|row| row.to_vec()).collect();

        Ok(Self {
            seed: *seed,
            num_variables: difficulty.num_variables,
            clauses,
        })
    }

    pub fn from_dimacs(text: &str) -> Result<Self> {
        let (num_variables, clauses) = dimacs::parse(text)?;
        Ok(Self {
            seed: [0u8; 32],
            num_variables,
            clauses,
        })
    }

    pub fn to_dimacs(&self) -> String {
        dimacs::write(self.num_variables, &self.clauses)
    }

    pub fn num_clauses(&self) -> usize {
        self.clauses.len()
    }

    /// Counts unsatisfied clauses from scratch.
    pub fn evaluate_solution(&self, solution: &Solution) -> Result<ObjectiveValue> {
        self.check_length(solution)?;
        Ok(self
            .clauses
            .iter()
            .filter(|clause| !clause_satisfied(clause, &solution.variables))
            .count() as ObjectiveValue)
    }

    pub fn verify_solution(&self, solution: &Solution) -> Result<()> {
        self.check_length(solution)?;
        if let Some((idx, _)) = self
            .clauses
            .iter()
            .enumerate()
            .find(|(_, clause)| !clause_satisfied(clause, &solution.variables))
        {
            Err(anyhow!("Clause '{}' not satisfied", idx))
        } else {
            Ok(())
        }
    }

    fn check_length(&self, solution: &Solution) -> Result<()> {
        if solution.variables.len() != self.num_variables {
            return Err(anyhow!(
                "Invalid number of variables. Expected: {}, Actual: {}",
                self.num_variables,
                solution.variables.len()
            ));
        }
        Ok(())
    }
}

pub(crate) fn clause_satisfied(clause: &[i32], variables: &[bool]) -> bool {
    clause.iter().any(|&literal| {
        let var_idx = literal.unsigned_abs() as usize - 1;
        let var_value = variables[var_idx];
        (literal > 0 && var_value) || (literal < 0 && !var_value)
    })
}

/// `Vec<bool>` as a 0/1 array. Booleans are accepted on input too.
mod bits {
    use serde::{de, Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Bit {
        Int(u64),
        Bool(bool),
    }

    pub fn serialize<S: Serializer>(variables: &[bool], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(variables.iter().map(|&value| value as u8))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<bool>, D::Error> {
        Vec::<Bit>::deserialize(deserializer)?
            .into_iter()
            .enumerate()
            .map(|(idx, bit)| match bit {
                Bit::Int(0) | Bit::Bool(false) => Ok(false),
                Bit::Int(1) | Bit::Bool(true) => Ok(true),
                Bit::Int(n) => Err(de::Error::custom(format!(
                    "invalid bit '{}' at position {}",
                    n, idx
                ))),
            })
            .collect()
    }
}
