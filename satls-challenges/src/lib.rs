pub mod budget;
pub use budget::Budget;
pub mod error;
pub use error::ProblemError;
pub mod satisfiability;
