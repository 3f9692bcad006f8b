use crate::serializable_struct_with_getters;
use satls_challenges::satisfiability::ObjectiveValue;
use serde::{Deserialize, Serialize};

serializable_struct_with_getters! {
    TrialResult {
        domain: String,
        instance_id: String,
        trial_id: usize,
        seed: u64,
        best_value: Option<ObjectiveValue>,
        elapsed_seconds: f64,
        elapsed_nominal_seconds: f64,
        nominal_time_budget: Option<f64>,
    }
}

serializable_struct_with_getters! {
    RunData {
        method_id: usize,
        method_name: String,
        trial_id: usize,
        seed: u64,
        best_value: Option<ObjectiveValue>,
        fitness_trace: Vec<ObjectiveValue>,
        best_solution: Option<String>,
        result: TrialResult,
    }
}

impl RunData {
    /// CSV row matching `RunData::CSV_HEADER`. Missing values are left empty.
    pub fn to_csv_row(&self) -> String {
        format!(
            "{},{},{},{}",
            self.seed,
            self.best_value.map(|v| v.to_string()).unwrap_or_default(),
            self.result.elapsed_seconds,
            self.result.elapsed_nominal_seconds
        )
    }

    pub const CSV_HEADER: &'static str =
        "seed,f_best,time_taken(seconds),time_taken(nominal seconds)";
}
