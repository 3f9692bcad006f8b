use super::{objective_within_budget, Heuristic};
use rand::seq::SliceRandom;
use satls_challenges::{
    satisfiability::{SatProblem, Slot},
    ProblemError,
};

/// First-improvement hill climbing over a random permutation of the variables
/// (Davis's bit hill climbing).
///
/// One `apply` is one pass: every variable is flipped once, in permuted order,
/// and the flip is kept when the objective does not get worse than the best
/// value seen so far in the pass. Equal values are kept so the search can walk
/// across plateaus.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SingleBitHillClimbing;

impl Heuristic for SingleBitHillClimbing {
    fn name(&self) -> &'static str {
        "Single Bit Hill Climbing"
    }

    fn apply(&self, problem: &mut SatProblem, slot: Slot) -> Result<(), ProblemError> {
        let Some(mut best) = objective_within_budget(problem, slot)? else {
            return Ok(());
        };

        let mut order: Vec<usize> = (0..problem.num_variables()).collect();
        order.shuffle(problem.rng());

        for var_idx in order {
            if problem.has_budget_expired() {
                break;
            }
            problem.bit_flip(var_idx, slot)?;
            match objective_within_budget(problem, slot)? {
                Some(value) if value <= best => best = value,
                Some(_) => problem.bit_flip(var_idx, slot)?,
                None => {
                    problem.bit_flip(var_idx, slot)?;
                    break;
                }
            }
        }
        Ok(())
    }
}
