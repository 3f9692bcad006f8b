use super::{clause_satisfied, Challenge, ObjectiveValue};
use anyhow::{anyhow, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Occurrence {
    pub clause: usize,
    pub positive: bool,
}

/// Immutable clause structure of an instance, indexed for incremental evaluation.
///
/// A `Formula` is built once per loaded instance and shared read-only between
/// trials; every trial keeps its own mutable state in a `SatProblem`.
#[derive(Debug, Clone)]
pub struct Formula {
    num_variables: usize,
    clauses: Vec<Vec<i32>>,
    occurrences: Vec<Vec<Occurrence>>,
}

impl Formula {
    pub fn new(num_variables: usize, clauses: Vec<Vec<i32>>) -> Result<Self> {
        let mut occurrences = vec![Vec::new(); num_variables];
        for (clause_idx, clause) in clauses.iter().enumerate() {
            for &literal in clause {
                let var_idx = literal.unsigned_abs() as usize;
                if var_idx == 0 || var_idx > num_variables {
                    return Err(anyhow!(
                        "Clause '{}' has literal '{}' outside 1..={}",
                        clause_idx,
                        literal,
                        num_variables
                    ));
                }
                occurrences[var_idx - 1].push(Occurrence {
                    clause: clause_idx,
                    positive: literal > 0,
                });
            }
        }
        Ok(Self {
            num_variables,
            clauses,
            occurrences,
        })
    }

    pub fn num_variables(&self) -> usize {
        self.num_variables
    }

    pub fn num_clauses(&self) -> usize {
        self.clauses.len()
    }

    pub fn clauses(&self) -> &[Vec<i32>] {
        &self.clauses
    }

    pub(crate) fn occurrences(&self, var_idx: usize) -> &[Occurrence] {
        &self.occurrences[var_idx]
    }

    pub(crate) fn count_true_literals(&self, clause_idx: usize, variables: &[bool]) -> u32 {
        self.clauses[clause_idx]
            .iter()
            .filter(|&&literal| variables[literal.unsigned_abs() as usize - 1] == (literal > 0))
            .count() as u32
    }

    /// Full, non-incremental evaluation of an assignment.
    pub fn count_unsatisfied(&self, variables: &[bool]) -> ObjectiveValue {
        self.clauses
            .iter()
            .filter(|clause| !clause_satisfied(clause, variables))
            .count() as ObjectiveValue
    }
}

impl TryFrom<&Challenge> for Formula {
    type Error = anyhow::Error;

    fn try_from(challenge: &Challenge) -> Result<Self> {
        Formula::new(challenge.num_variables, challenge.clauses.clone())
    }
}
