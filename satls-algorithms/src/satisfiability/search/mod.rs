use satls_challenges::{
    satisfiability::{ObjectiveValue, SatProblem},
    ProblemError,
};
use serde::{Deserialize, Serialize};

mod iterated_local_search;
pub use iterated_local_search::IteratedLocalSearch;
mod local_search;
pub use local_search::LocalSearch;
mod random_walk;
pub use random_walk::RandomWalk;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchState {
    Idle,
    Perturbing,
    Intensifying,
    Accepted,
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepOutcome {
    pub state: SearchState,
    /// Objective of the solution in hand after the step, or `None` when the
    /// budget expired before the step could evaluate it.
    pub objective: Option<ObjectiveValue>,
}

impl StepOutcome {
    pub fn expired(state: SearchState) -> Self {
        Self {
            state,
            objective: None,
        }
    }
}

/// A single-point search method driven one step at a time.
///
/// The caller owns termination: it calls `initialise` once, then `step` until
/// `SatProblem::has_budget_expired` holds. `run` is that loop.
pub trait SearchMethod {
    fn name(&self) -> String;

    /// Creates the initial solution(s) and evaluates the solution in hand.
    fn initialise(
        &mut self,
        problem: &mut SatProblem,
    ) -> Result<Option<ObjectiveValue>, ProblemError>;

    fn step(&mut self, problem: &mut SatProblem) -> Result<StepOutcome, ProblemError>;

    /// Runs to budget expiry and returns the fitness trace: the initial
    /// objective followed by one value per completed step.
    fn run(&mut self, problem: &mut SatProblem) -> Result<Vec<ObjectiveValue>, ProblemError> {
        let mut trace = Vec::new();
        trace.extend(self.initialise(problem)?);
        while !problem.has_budget_expired() {
            match self.step(problem)?.objective {
                Some(value) => trace.push(value),
                None => break,
            }
        }
        Ok(trace)
    }
}

impl<S: SearchMethod + ?Sized> SearchMethod for Box<S> {
    fn name(&self) -> String {
        (**self).name()
    }

    fn initialise(
        &mut self,
        problem: &mut SatProblem,
    ) -> Result<Option<ObjectiveValue>, ProblemError> {
        (**self).initialise(problem)
    }

    fn step(&mut self, problem: &mut SatProblem) -> Result<StepOutcome, ProblemError> {
        (**self).step(problem)
    }
}
