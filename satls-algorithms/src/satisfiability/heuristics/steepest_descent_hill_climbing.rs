use super::{objective_within_budget, Heuristic};
use satls_challenges::{
    satisfiability::{SatProblem, Slot},
    ProblemError,
};

/// Best-improvement hill climbing.
///
/// Every single-bit neighbour is evaluated from the same baseline, in variable
/// order, and undone immediately. The flip with the lowest objective is then
/// applied, provided it is no worse than the baseline. Among equal candidates
/// the lowest index wins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SteepestDescentHillClimbing;

impl SteepestDescentHillClimbing {
    /// Scans all neighbours of `slot` and returns the index to flip, if any.
    /// The solution in `slot` is unchanged on return.
    pub fn best_flip(
        &self,
        problem: &mut SatProblem,
        slot: Slot,
    ) -> Result<Option<usize>, ProblemError> {
        let Some(mut best_value) = objective_within_budget(problem, slot)? else {
            return Ok(None);
        };
        let mut best_index = None;

        for var_idx in 0..problem.num_variables() {
            if problem.has_budget_expired() {
                break;
            }
            problem.bit_flip(var_idx, slot)?;
            let value = objective_within_budget(problem, slot)?;
            problem.bit_flip(var_idx, slot)?;

            match value {
                Some(value)
                    if value < best_value || (best_index.is_none() && value == best_value) =>
                {
                    best_value = value;
                    best_index = Some(var_idx);
                }
                Some(_) => {}
                None => break,
            }
        }
        Ok(best_index)
    }
}

impl Heuristic for SteepestDescentHillClimbing {
    fn name(&self) -> &'static str {
        "Steepest Descent Hill Climbing"
    }

    fn apply(&self, problem: &mut SatProblem, slot: Slot) -> Result<(), ProblemError> {
        if let Some(var_idx) = self.best_flip(problem, slot)? {
            problem.bit_flip(var_idx, slot)?;
        }
        Ok(())
    }
}
