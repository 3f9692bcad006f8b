use super::{SearchMethod, SearchState, StepOutcome};
use crate::satisfiability::heuristics::{objective_within_budget, Heuristic};
use satls_challenges::{
    satisfiability::{ObjectiveValue, SatProblem, CURRENT_SOLUTION_INDEX},
    ProblemError,
};

/// Applies one heuristic to the current solution per step, e.g. to compare
/// hill climbers on their own.
#[derive(Debug, Clone)]
pub struct LocalSearch<H> {
    heuristic: H,
}

impl<H: Heuristic> LocalSearch<H> {
    pub fn new(heuristic: H) -> Self {
        Self { heuristic }
    }

    pub fn heuristic(&self) -> &H {
        &self.heuristic
    }
}

impl<H: Heuristic> SearchMethod for LocalSearch<H> {
    fn name(&self) -> String {
        self.heuristic.name().to_string()
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
        self.heuristic.apply(problem, CURRENT_SOLUTION_INDEX)?;
        Ok(StepOutcome {
            state: SearchState::Accepted,
            objective: objective_within_budget(problem, CURRENT_SOLUTION_INDEX)?,
        })
    }
}
