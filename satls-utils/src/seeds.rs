use anyhow::{anyhow, Result};
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Returns exactly `num_trials` seeds.
///
/// Explicit seeds are used first, in order. If fewer than `num_trials` are given,
/// the remainder is drawn from a `StdRng` seeded with the first explicit seed, so
/// the expansion is a pure function of its inputs.
pub fn expand_seeds(explicit: &[u64], num_trials: usize) -> Result<Vec<u64>> {
    if num_trials == 0 {
        return Ok(Vec::new());
    }
    let first = *explicit
        .first()
        .ok_or_else(|| anyhow!("At least one seed is required to run {} trials", num_trials))?;

    let mut seeds: Vec<u64> = explicit.iter().take(num_trials).cloned().collect();
    if seeds.len() < num_trials {
        let mut rng = StdRng::seed_from_u64(first);
        while seeds.len() < num_trials {
            seeds.push(rng.gen::<u64>());
        }
    }
    Ok(seeds)
}
