use anyhow::{anyhow, Result};
use satls_challenges::{
    satisfiability::{ObjectiveValue, SatProblem, Slot, CURRENT_SOLUTION_INDEX},
    ProblemError,
};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

mod random_bit_flip;
pub use random_bit_flip::RandomBitFlip;
mod single_bit_hill_climbing;
pub use single_bit_hill_climbing::SingleBitHillClimbing;
mod steepest_descent_hill_climbing;
pub use steepest_descent_hill_climbing::SteepestDescentHillClimbing;

/// A move operator over one solution slot.
///
/// Operators hold no per-trial state; any randomness is drawn from the
/// problem's random source.
pub trait Heuristic {
    fn name(&self) -> &'static str;

    fn apply(&self, problem: &mut SatProblem, slot: Slot) -> Result<(), ProblemError>;

    fn apply_to_current(&self, problem: &mut SatProblem) -> Result<(), ProblemError> {
        self.apply(problem, CURRENT_SOLUTION_INDEX)
    }
}

impl<H: Heuristic + ?Sized> Heuristic for Box<H> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn apply(&self, problem: &mut SatProblem, slot: Slot) -> Result<(), ProblemError> {
        (**self).apply(problem, slot)
    }
}

/// Polls the budget and evaluates `slot`, or returns `None` if it has expired.
///
/// A `BudgetExpired` error from the evaluation itself is a contract violation
/// and is propagated.
pub fn objective_within_budget(
    problem: &mut SatProblem,
    slot: Slot,
) -> Result<Option<ObjectiveValue>, ProblemError> {
    if problem.has_budget_expired() {
        return Ok(None);
    }
    problem.objective_value(slot).map(Some)
}

/// The closed set of operators, addressable by id or name from configuration.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum HeuristicKind {
    RandomBitFlip,
    SingleBitHillClimbing,
    SteepestDescentHillClimbing,
}

impl HeuristicKind {
    pub const ALL: [HeuristicKind; 3] = [
        HeuristicKind::RandomBitFlip,
        HeuristicKind::SingleBitHillClimbing,
        HeuristicKind::SteepestDescentHillClimbing,
    ];

    pub fn from_id(id: usize) -> Result<Self> {
        Self::ALL.get(id).copied().ok_or_else(|| {
            anyhow!(
                "Invalid heuristic id '{}'. Expected one of 0..{}",
                id,
                Self::ALL.len()
            )
        })
    }

    pub fn id(&self) -> usize {
        match self {
            HeuristicKind::RandomBitFlip => 0,
            HeuristicKind::SingleBitHillClimbing => 1,
            HeuristicKind::SteepestDescentHillClimbing => 2,
        }
    }

    fn key(&self) -> &'static str {
        match self {
            HeuristicKind::RandomBitFlip => "random_bit_flip",
            HeuristicKind::SingleBitHillClimbing => "single_bit_hill_climbing",
            HeuristicKind::SteepestDescentHillClimbing => "steepest_descent_hill_climbing",
        }
    }
}

impl Heuristic for HeuristicKind {
    fn name(&self) -> &'static str {
        match self {
            HeuristicKind::RandomBitFlip => RandomBitFlip.name(),
            HeuristicKind::SingleBitHillClimbing => SingleBitHillClimbing.name(),
            HeuristicKind::SteepestDescentHillClimbing => SteepestDescentHillClimbing.name(),
        }
    }

    fn apply(&self, problem: &mut SatProblem, slot: Slot) -> Result<(), ProblemError> {
        match self {
            HeuristicKind::RandomBitFlip => RandomBitFlip.apply(problem, slot),
            HeuristicKind::SingleBitHillClimbing => SingleBitHillClimbing.apply(problem, slot),
            HeuristicKind::SteepestDescentHillClimbing => {
                SteepestDescentHillClimbing.apply(problem, slot)
            }
        }
    }
}

impl FromStr for HeuristicKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .find(|kind| kind.key() == s || kind.name().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| anyhow!("Unknown heuristic '{}'", s))
    }
}

impl fmt::Display for HeuristicKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
