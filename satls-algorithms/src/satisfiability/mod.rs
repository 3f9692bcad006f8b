pub mod heuristics;
pub use heuristics::{
    Heuristic, HeuristicKind, RandomBitFlip, SingleBitHillClimbing, SteepestDescentHillClimbing,
};
pub mod search;
pub use search::{
    IteratedLocalSearch, LocalSearch, RandomWalk, SearchMethod, SearchState, StepOutcome,
};
