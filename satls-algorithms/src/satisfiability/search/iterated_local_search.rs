use super::{SearchMethod, SearchState, StepOutcome};
use crate::satisfiability::heuristics::{objective_within_budget, Heuristic};
use log::trace;
use satls_challenges::{
    satisfiability::{ObjectiveValue, SatProblem, BACKUP_SOLUTION_INDEX, CURRENT_SOLUTION_INDEX},
    ProblemError,
};

/// Iterated local search over the current/backup slot pair.
///
/// Each step perturbs the current solution `intensity_of_mutation` times,
/// intensifies it `depth_of_search` times, and then either commits it to the
/// backup slot (objective no worse than at the start of the step) or restores
/// it from the backup slot. Current and backup hold the same solution between
/// steps.
///
/// If the budget expires before the candidate can be evaluated, the step is
/// rejected, so the invariant also holds after the final step.
#[derive(Debug, Clone)]
pub struct IteratedLocalSearch<M, L> {
    mutation: M,
    local_search: L,
    intensity_of_mutation: usize,
    depth_of_search: usize,
    state: SearchState,
}

impl<M: Heuristic, L: Heuristic> IteratedLocalSearch<M, L> {
    pub fn new(
        mutation: M,
        local_search: L,
        intensity_of_mutation: usize,
        depth_of_search: usize,
    ) -> Self {
        Self {
            mutation,
            local_search,
            intensity_of_mutation,
            depth_of_search,
            state: SearchState::Idle,
        }
    }

    pub fn intensity_of_mutation(&self) -> usize {
        self.intensity_of_mutation
    }

    pub fn depth_of_search(&self) -> usize {
        self.depth_of_search
    }

    /// State reached by the last step.
    pub fn state(&self) -> SearchState {
        self.state
    }

    fn accept(&mut self, problem: &mut SatProblem) -> Result<(), ProblemError> {
        self.state = SearchState::Accepted;
        problem.copy_solution(CURRENT_SOLUTION_INDEX, BACKUP_SOLUTION_INDEX)
    }

    fn reject(&mut self, problem: &mut SatProblem) -> Result<(), ProblemError> {
        self.state = SearchState::Rejected;
        problem.copy_solution(BACKUP_SOLUTION_INDEX, CURRENT_SOLUTION_INDEX)
    }
}

impl<M: Heuristic, L: Heuristic> SearchMethod for IteratedLocalSearch<M, L> {
    fn name(&self) -> String {
        "Iterated Local Search".to_string()
    }

    fn initialise(
        &mut self,
        problem: &mut SatProblem,
    ) -> Result<Option<ObjectiveValue>, ProblemError> {
        self.state = SearchState::Idle;
        problem.create_random_solution(CURRENT_SOLUTION_INDEX)?;
        let value = objective_within_budget(problem, CURRENT_SOLUTION_INDEX)?;
        problem.copy_solution(CURRENT_SOLUTION_INDEX, BACKUP_SOLUTION_INDEX)?;
        Ok(value)
    }

    fn step(&mut self, problem: &mut SatProblem) -> Result<StepOutcome, ProblemError> {
        self.state = SearchState::Idle;
        let Some(best) = objective_within_budget(problem, CURRENT_SOLUTION_INDEX)? else {
            return Ok(StepOutcome::expired(self.state));
        };

        self.state = SearchState::Perturbing;
        for _ in 0..self.intensity_of_mutation {
            self.mutation.apply(problem, CURRENT_SOLUTION_INDEX)?;
        }

        self.state = SearchState::Intensifying;
        for _ in 0..self.depth_of_search {
            if problem.has_budget_expired() {
                break;
            }
            self.local_search.apply(problem, CURRENT_SOLUTION_INDEX)?;
        }

        match objective_within_budget(problem, CURRENT_SOLUTION_INDEX)? {
            Some(candidate) if candidate <= best => {
                trace!("accepted {} (was {})", candidate, best);
                self.accept(problem)?;
                Ok(StepOutcome {
                    state: self.state,
                    objective: Some(candidate),
                })
            }
            Some(candidate) => {
                trace!("rejected {} (keeping {})", candidate, best);
                self.reject(problem)?;
                Ok(StepOutcome {
                    state: self.state,
                    objective: Some(best),
                })
            }
            None => {
                self.reject(problem)?;
                Ok(StepOutcome::expired(self.state))
            }
        }
    }
}
