use crate::serializable_struct_with_getters;
use anyhow::{anyhow, Result};
use satls_challenges::{satisfiability::Difficulty, Budget};
use satls_utils::{expand_seeds, seed_from_str};
use serde::{Deserialize, Serialize};

serializable_struct_with_getters! {
    ExperimentConfig {
        instance: InstanceConfig,
        total_runs: usize,
        #[serde(default)]
        seeds: Vec<u64>,
        seed_phrase: Option<String>,
        budget: Budget,
        methods: Vec<SearchMethodConfig>,
        #[serde(default)]
        parallel: bool,
    }
}

impl ExperimentConfig {
    pub fn validate(&self) -> Result<()> {
        if self.total_runs == 0 {
            return Err(anyhow!("total_runs must be greater than 0"));
        }
        if self.seeds.is_empty() && self.seed_phrase.is_none() {
            return Err(anyhow!("Either seeds or seed_phrase must be provided"));
        }
        if self.methods.is_empty() {
            return Err(anyhow!("At least one search method must be configured"));
        }
        if !self.budget.is_bounded() {
            return Err(anyhow!(
                "Budget must set max_evaluations and/or max_nominal_seconds"
            ));
        }
        if !(self.budget.calibration.is_finite() && self.budget.calibration > 0.0) {
            return Err(anyhow!(
                "Invalid calibration '{}'. Expected a positive number",
                self.budget.calibration
            ));
        }
        if let Some(seconds) = self.budget.max_nominal_seconds {
            if !(seconds.is_finite() && seconds >= 0.0) {
                return Err(anyhow!(
                    "Invalid max_nominal_seconds '{}'. Expected a non-negative number",
                    seconds
                ));
            }
            if !self.budget.has_valid_deadline() {
                return Err(anyhow!(
                    "Time budget of {} nominal seconds at calibration {} is too large",
                    seconds,
                    self.budget.calibration
                ));
            }
        }
        Ok(())
    }

    /// One seed per trial. Explicit seeds take precedence over the seed phrase.
    pub fn trial_seeds(&self) -> Result<Vec<u64>> {
        match (&self.seeds[..], &self.seed_phrase) {
            ([], Some(phrase)) => expand_seeds(&[seed_from_str(phrase)], self.total_runs),
            (seeds, _) => expand_seeds(seeds, self.total_runs),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum InstanceConfig {
    /// Random 3-SAT, seeded by hashing `id`.
    Generated { id: String, difficulty: Difficulty },
    /// `<instances dir>/<id>.cnf`
    Dimacs { id: String },
}

impl InstanceConfig {
    pub fn id(&self) -> &str {
        match self {
            InstanceConfig::Generated { id, .. } | InstanceConfig::Dimacs { id } => id,
        }
    }
}

/// A search method to test. Heuristics are referenced by id:
/// 0 = random bit flip, 1 = single bit hill climbing, 2 = steepest descent.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum SearchMethodConfig {
    RandomWalk,
    IteratedLocalSearch {
        mutation_heuristic: usize,
        local_search_heuristic: usize,
        intensity_of_mutation: usize,
        depth_of_search: usize,
    },
    LocalSearch {
        heuristic: usize,
    },
}
