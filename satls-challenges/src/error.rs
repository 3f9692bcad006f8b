#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProblemError {
    BudgetExpired {
        evaluations: u64,
    },
    EmptySlot {
        slot: usize,
    },
    InvalidSlot {
        slot: usize,
        num_slots: usize,
    },
    InvalidSolutionLength {
        expected: usize,
        actual: usize,
    },
    VariableOutOfRange {
        index: usize,
        num_variables: usize,
    },
}

impl std::fmt::Display for ProblemError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProblemError::BudgetExpired { evaluations } => write!(
                f,
                "Objective value requested after the budget expired (evaluations: {})",
                evaluations
            ),
            ProblemError::EmptySlot { slot } => {
                write!(f, "Solution slot '{}' has not been initialised", slot)
            }
            ProblemError::InvalidSlot { slot, num_slots } => write!(
                f,
                "Invalid solution slot '{}'. Expected one of 0..{}",
                slot, num_slots
            ),
            ProblemError::InvalidSolutionLength { expected, actual } => write!(
                f,
                "Invalid number of variables. Expected: {}, Actual: {}",
                expected, actual
            ),
            ProblemError::VariableOutOfRange {
                index,
                num_variables,
            } => write!(
                f,
                "Variable index '{}' is out of range for {} variables",
                index, num_variables
            ),
        }
    }
}

impl std::error::Error for ProblemError {}
