use serde::{Deserialize, Serialize};
use std::{
    cell::Cell,
    time::{Duration, Instant},
};

/// Calibration factor of the reference benchmark machine itself.
pub const DEFAULT_CALIBRATION: f64 = 1.0;

/// Resource limit for one trial.
///
/// `max_nominal_seconds` is wall-clock time on the reference benchmark machine;
/// the local deadline is `max_nominal_seconds * calibration`, where `calibration`
/// is how many local seconds one nominal second takes. The budget has expired as
/// soon as any configured limit is reached.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Budget {
    pub max_evaluations: Option<u64>,
    pub max_nominal_seconds: Option<f64>,
    #[serde(default = "default_calibration")]
    pub calibration: f64,
}

fn default_calibration() -> f64 {
    DEFAULT_CALIBRATION
}

impl Budget {
    pub fn evaluations(limit: u64) -> Self {
        Self {
            max_evaluations: Some(limit),
            max_nominal_seconds: None,
            calibration: DEFAULT_CALIBRATION,
        }
    }

    pub fn nominal_seconds(seconds: f64) -> Self {
        Self {
            max_evaluations: None,
            max_nominal_seconds: Some(seconds),
            calibration: DEFAULT_CALIBRATION,
        }
    }

    pub fn with_calibration(mut self, calibration: f64) -> Self {
        self.calibration = calibration;
        self
    }

    pub fn with_max_evaluations(mut self, limit: u64) -> Self {
        self.max_evaluations = Some(limit);
        self
    }

    pub fn is_bounded(&self) -> bool {
        self.max_evaluations.is_some() || self.max_nominal_seconds.is_some()
    }

    /// Local wall-clock limit. `None` when no time limit is set or when
    /// `max_nominal_seconds * calibration` does not fit a `Duration`.
    pub fn deadline(&self) -> Option<Duration> {
        self.max_nominal_seconds.and_then(|seconds| {
            Duration::try_from_secs_f64((seconds * self.calibration).max(0.0)).ok()
        })
    }

    /// Whether the time limit, if any, translates to a representable deadline.
    pub fn has_valid_deadline(&self) -> bool {
        self.max_nominal_seconds.is_none() || self.deadline().is_some()
    }
}

/// Evaluation counter and wall clock for one trial, started when the problem is created.
///
/// Time expiry is latched when `has_expired` first observes it, so a trial
/// that polled the clock and saw budget left may still spend one evaluation.
#[derive(Debug, Clone)]
pub(crate) struct BudgetClock {
    budget: Budget,
    deadline: Option<Duration>,
    start: Instant,
    evaluations: u64,
    out_of_time: Cell<bool>,
}

impl BudgetClock {
    pub fn start(budget: Budget) -> Self {
        Self {
            deadline: budget.deadline(),
            budget,
            start: Instant::now(),
            evaluations: 0,
            out_of_time: Cell::new(false),
        }
    }

    pub fn budget(&self) -> &Budget {
        &self.budget
    }

    pub fn evaluations(&self) -> u64 {
        self.evaluations
    }

    pub fn record_evaluation(&mut self) {
        self.evaluations += 1;
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    pub fn elapsed_nominal_seconds(&self) -> f64 {
        self.elapsed().as_secs_f64() / self.budget.calibration
    }

    pub fn has_expired(&self) -> bool {
        if self.evaluation_limit_reached() || self.out_of_time.get() {
            return true;
        }
        let out_of_time = match self.deadline {
            Some(deadline) => self.elapsed() >= deadline,
            None => false,
        };
        self.out_of_time.set(out_of_time);
        out_of_time
    }

    /// Expiry as of the last `has_expired` poll. Evaluations are refused on this.
    pub fn has_expired_at_last_poll(&self) -> bool {
        self.evaluation_limit_reached() || self.out_of_time.get()
    }

    fn evaluation_limit_reached(&self) -> bool {
        self.budget
            .max_evaluations
            .map_or(false, |limit| self.evaluations >= limit)
    }
}
