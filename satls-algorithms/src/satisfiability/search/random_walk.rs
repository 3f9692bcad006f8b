use super::{SearchMethod, SearchState, StepOutcome};
use crate::satisfiability::heuristics::{objective_within_budget, Heuristic, RandomBitFlip};
use satls_challenges::{
    satisfiability::{ObjectiveValue, SatProblem, CURRENT_SOLUTION_INDEX},
    ProblemError,
};

/// Repeated random bit flips with no acceptance test. Uses only the current slot.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomWalk {
    mutation: RandomBitFlip,
}

impl RandomWalk {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SearchMethod for RandomWalk {
    fn name(&self) -> String {
        "Random Walk".to_string()
    }

    fn initialise(
        &mut self,
        problem: &mut SatProblem,
    ) -> Result<Option<ObjectiveValue>, ProblemError> {
        problem.create_random_solution(CURRENT_SOLUTION_INDEX)?;
        objective_within_budget(problem, CURRENT_SOLUTION_INDEX)
    }

    fn step(&mut self, problem: &mut SatProblem) -> Result<StepOutcome, ProblemError> {
        if problem.has_budget_expired() {
            return Ok(StepOutcome::expired(SearchState::Idle));
        }
        self.mutation.apply(problem, CURRENT_SOLUTION_INDEX)?;
        // The evaluation only feeds the budget and the best-solution record.
        Ok(StepOutcome {
            state: SearchState::Accepted,
            objective: objective_within_budget(problem, CURRENT_SOLUTION_INDEX)?,
        })
    }
}
