use super::Heuristic;
use rand::Rng;
use satls_challenges::{
    satisfiability::{SatProblem, Slot},
    ProblemError,
};

/// Flips one uniformly chosen variable. Pure perturbation: nothing is evaluated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RandomBitFlip;

impl Heuristic for RandomBitFlip {
    fn name(&self) -> &'static str {
        "Random Bit Flip"
    }

    fn apply(&self, problem: &mut SatProblem, slot: Slot) -> Result<(), ProblemError> {
        let num_variables = problem.num_variables();
        if num_variables == 0 {
            return Ok(());
        }
        // Draw as u32 so the stream does not depend on the platform's usize width.
        let var_idx = problem.rng().gen_range(0..num_variables as u32) as usize;
        problem.bit_flip(var_idx, slot)
    }
}
