use super::{Formula, ObjectiveValue, Solution};
use crate::{
    budget::{Budget, BudgetClock},
    error::ProblemError,
};
use log::trace;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::{fmt, sync::Arc, time::Duration};

/// Index of a solution in the problem's memory.
pub type Slot = usize;

pub const CURRENT_SOLUTION_INDEX: Slot = 0;
pub const BACKUP_SOLUTION_INDEX: Slot = 1;
pub const DEFAULT_MEMORY_SIZE: usize = 2;

#[derive(Debug, Clone)]
struct SlotState {
    variables: Vec<bool>,
    // Per-clause count of true literals, valid once `synced` is set.
    true_literals: Vec<u32>,
    num_unsatisfied: ObjectiveValue,
    synced: bool,
    // Variables flipped an odd number of times since the last evaluation.
    pending: Vec<usize>,
    is_pending: Vec<bool>,
}

impl SlotState {
    fn new(variables: Vec<bool>) -> Self {
        let num_variables = variables.len();
        Self {
            variables,
            true_literals: Vec::new(),
            num_unsatisfied: 0,
            synced: false,
            pending: Vec::new(),
            is_pending: vec![false; num_variables],
        }
    }

    fn flip(&mut self, var_idx: usize) {
        self.variables[var_idx] = !self.variables[var_idx];
        if !self.synced {
            return;
        }
        self.is_pending[var_idx] = !self.is_pending[var_idx];
        if self.is_pending[var_idx] {
            self.pending.push(var_idx);
        }
        if self.pending.len() > self.variables.len() {
            self.desync();
        }
    }

    fn desync(&mut self) {
        self.synced = false;
        for &var_idx in &self.pending {
            self.is_pending[var_idx] = false;
        }
        self.pending.clear();
    }

    fn evaluate(&mut self, formula: &Formula) -> ObjectiveValue {
        if !self.synced {
            self.true_literals = (0..formula.num_clauses())
                .map(|clause_idx| formula.count_true_literals(clause_idx, &self.variables))
                .collect();
            self.num_unsatisfied =
                self.true_literals.iter().filter(|&&n| n == 0).count() as ObjectiveValue;
            self.synced = true;
            return self.num_unsatisfied;
        }

        let mut pending = std::mem::take(&mut self.pending);
        for &var_idx in &pending {
            if !self.is_pending[var_idx] {
                continue;
            }
            self.is_pending[var_idx] = false;
            let value = self.variables[var_idx];
            for occurrence in formula.occurrences(var_idx) {
                let count = &mut self.true_literals[occurrence.clause];
                if occurrence.positive == value {
                    *count += 1;
                    if *count == 1 {
                        self.num_unsatisfied -= 1;
                    }
                } else {
                    *count -= 1;
                    if *count == 0 {
                        self.num_unsatisfied += 1;
                    }
                }
            }
        }
        pending.clear();
        self.pending = pending;
        self.num_unsatisfied
    }
}

/// MAX-SAT problem state for a single trial.
///
/// Owns a fixed number of solution slots, the trial's random source, the
/// evaluation counter and the best solution seen so far. Mutation is cheap
/// (`bit_flip` only toggles a bit) and evaluation is incremental: only clauses
/// touching variables flipped since the slot was last evaluated are revisited.
///
/// The budget is a hard precondition of `objective_value`: callers must poll
/// `has_budget_expired` and stop before evaluating past it. The time limit is
/// enforced as of the last poll.
#[derive(Debug, Clone)]
pub struct SatProblem {
    formula: Arc<Formula>,
    slots: Vec<Option<SlotState>>,
    clock: BudgetClock,
    rng: StdRng,
    best_value: Option<ObjectiveValue>,
    best_solution: Option<Solution>,
}

impl SatProblem {
    pub fn new(formula: Arc<Formula>, budget: Budget, seed: u64) -> Self {
        Self::with_memory_size(formula, budget, seed, DEFAULT_MEMORY_SIZE)
    }

    pub fn with_memory_size(
        formula: Arc<Formula>,
        budget: Budget,
        seed: u64,
        memory_size: usize,
    ) -> Self {
        Self {
            formula,
            slots: vec![None; memory_size],
            clock: BudgetClock::start(budget),
            rng: StdRng::seed_from_u64(seed),
            best_value: None,
            best_solution: None,
        }
    }

    pub fn formula(&self) -> &Formula {
        &self.formula
    }

    pub fn num_variables(&self) -> usize {
        self.formula.num_variables()
    }

    pub fn num_clauses(&self) -> usize {
        self.formula.num_clauses()
    }

    pub fn memory_size(&self) -> usize {
        self.slots.len()
    }

    /// The trial's random source. Operators draw from it so that a trial is
    /// fully determined by its seed.
    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    pub fn create_random_solution(&mut self, slot: Slot) -> Result<(), ProblemError> {
        self.check_slot(slot)?;
        let num_variables = self.num_variables();
        let variables: Vec<bool> = (0..num_variables).map(|_| self.rng.gen::<bool>()).collect();
        self.slots[slot] = Some(SlotState::new(variables));
        Ok(())
    }

    pub fn load_solution(&mut self, slot: Slot, solution: &Solution) -> Result<(), ProblemError> {
        self.check_slot(slot)?;
        if solution.variables.len() != self.num_variables() {
            return Err(ProblemError::InvalidSolutionLength {
                expected: self.num_variables(),
                actual: solution.variables.len(),
            });
        }
        self.slots[slot] = Some(SlotState::new(solution.variables.clone()));
        Ok(())
    }

    /// Number of unsatisfied clauses of the solution in `slot`.
    ///
    /// Consumes one evaluation even when the solution is unchanged since the
    /// last call, and updates the best solution seen.
    pub fn objective_value(&mut self, slot: Slot) -> Result<ObjectiveValue, ProblemError> {
        if self.clock.has_expired_at_last_poll() {
            return Err(ProblemError::BudgetExpired {
                evaluations: self.clock.evaluations(),
            });
        }
        self.check_slot(slot)?;
        let state = self.slots[slot]
            .as_mut()
            .ok_or(ProblemError::EmptySlot { slot })?;
        let value = state.evaluate(&self.formula);
        self.clock.record_evaluation();

        if self.best_value.map_or(true, |best| value < best) {
            trace!(
                "new best {} at evaluation {}",
                value,
                self.clock.evaluations()
            );
            self.best_value = Some(value);
            self.best_solution = Some(Solution::new(state.variables.clone()));
        }
        Ok(value)
    }

    pub fn bit_flip(&mut self, var_idx: usize, slot: Slot) -> Result<(), ProblemError> {
        if var_idx >= self.num_variables() {
            return Err(ProblemError::VariableOutOfRange {
                index: var_idx,
                num_variables: self.num_variables(),
            });
        }
        self.slot_mut(slot)?.flip(var_idx);
        Ok(())
    }

    pub fn copy_solution(&mut self, from: Slot, to: Slot) -> Result<(), ProblemError> {
        self.check_slot(to)?;
        let source = self.slot(from)?.clone();
        if from != to {
            self.slots[to] = Some(source);
        }
        Ok(())
    }

    pub fn variables(&self, slot: Slot) -> Result<&[bool], ProblemError> {
        Ok(&self.slot(slot)?.variables)
    }

    pub fn solution(&self, slot: Slot) -> Result<Solution, ProblemError> {
        Ok(Solution::new(self.slot(slot)?.variables.clone()))
    }

    pub fn has_budget_expired(&self) -> bool {
        self.clock.has_expired()
    }

    pub fn evaluations(&self) -> u64 {
        self.clock.evaluations()
    }

    pub fn budget(&self) -> &Budget {
        self.clock.budget()
    }

    pub fn elapsed(&self) -> Duration {
        self.clock.elapsed()
    }

    pub fn elapsed_nominal_seconds(&self) -> f64 {
        self.clock.elapsed_nominal_seconds()
    }

    pub fn best_value(&self) -> Option<ObjectiveValue> {
        self.best_value
    }

    pub fn best_solution(&self) -> Option<&Solution> {
        self.best_solution.as_ref()
    }

    pub fn best_solution_as_string(&self) -> Option<String> {
        self.best_solution.as_ref().map(|solution| solution.to_string())
    }

    fn check_slot(&self, slot: Slot) -> Result<(), ProblemError> {
        if slot >= self.slots.len() {
            return Err(ProblemError::InvalidSlot {
                slot,
                num_slots: self.slots.len(),
            });
        }
        Ok(())
    }

    fn slot(&self, slot: Slot) -> Result<&SlotState, ProblemError> {
        self.check_slot(slot)?;
        self.slots[slot]
            .as_ref()
            .ok_or(ProblemError::EmptySlot { slot })
    }

    fn slot_mut(&mut self, slot: Slot) -> Result<&mut SlotState, ProblemError> {
        self.check_slot(slot)?;
        self.slots[slot]
            .as_mut()
            .ok_or(ProblemError::EmptySlot { slot })
    }
}

impl fmt::Display for SatProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SAT")
    }
}
