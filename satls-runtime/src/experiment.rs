use crate::instances::{InstanceLoader, LoadedInstance};
use anyhow::Result;
use log::{debug, info};
use logging_timer::time;
use rayon::prelude::*;
use satls_algorithms::satisfiability::{
    HeuristicKind, IteratedLocalSearch, LocalSearch, RandomWalk, SearchMethod,
};
use satls_challenges::{satisfiability::SatProblem, Budget};
use satls_structs::{
    config::{ExperimentConfig, SearchMethodConfig},
    core::{RunData, TrialResult},
};

pub fn build_search_method(config: &SearchMethodConfig) -> Result<Box<dyn SearchMethod + Send>> {
    let method: Box<dyn SearchMethod + Send> = match config {
        SearchMethodConfig::RandomWalk => Box::new(RandomWalk::new()),
        SearchMethodConfig::IteratedLocalSearch {
            mutation_heuristic,
            local_search_heuristic,
            intensity_of_mutation,
            depth_of_search,
        } => Box::new(IteratedLocalSearch::new(
            HeuristicKind::from_id(*mutation_heuristic)?,
            HeuristicKind::from_id(*local_search_heuristic)?,
            *intensity_of_mutation,
            *depth_of_search,
        )),
        SearchMethodConfig::LocalSearch { heuristic } => {
            Box::new(LocalSearch::new(HeuristicKind::from_id(*heuristic)?))
        }
    };
    Ok(method)
}

/// Runs one trial of `method` to budget expiry on a fresh problem seeded with `seed`.
#[time]
pub fn run_trial(
    instance: &LoadedInstance,
    budget: &Budget,
    method_id: usize,
    method: &SearchMethodConfig,
    trial_id: usize,
    seed: u64,
) -> Result<RunData> {
    let mut search = build_search_method(method)?;
    let mut problem = SatProblem::new(instance.formula.clone(), *budget, seed);
    let fitness_trace = search.run(&mut problem)?;

    let best_value = problem.best_value();
    let best_solution = problem.best_solution_as_string();
    info!(
        "{} trial {} (seed {}): best {:?} after {} evaluations",
        search.name(),
        trial_id,
        seed,
        best_value,
        problem.evaluations()
    );

    Ok(RunData {
        method_id,
        method_name: search.name(),
        trial_id,
        seed,
        best_value,
        fitness_trace,
        best_solution,
        result: TrialResult {
            domain: instance.domain.clone(),
            instance_id: instance.instance_id.clone(),
            trial_id,
            seed,
            best_value,
            elapsed_seconds: problem.elapsed().as_secs_f64(),
            elapsed_nominal_seconds: problem.elapsed_nominal_seconds(),
            nominal_time_budget: budget.max_nominal_seconds,
        },
    })
}

/// Runs every configured method for `total_runs` trials and returns the run
/// data grouped by method, in configuration order, each group in trial order.
///
/// Trials are independent: in parallel mode each task owns its problem, and
/// the results match a sequential run exactly apart from timings.
#[time]
pub fn run_experiment(
    config: &ExperimentConfig,
    loader: &dyn InstanceLoader,
) -> Result<Vec<Vec<RunData>>> {
    config.validate()?;
    for method in config.methods.iter() {
        build_search_method(method)?;
    }
    let seeds = config.trial_seeds()?;
    let instance = loader.load(config.instance.id())?;
    debug!(
        "running {} methods x {} trials on '{}'",
        config.methods.len(),
        seeds.len(),
        instance.instance_id
    );

    let tasks: Vec<(usize, usize)> = (0..config.methods.len())
        .flat_map(|method_id| (0..seeds.len()).map(move |trial_id| (method_id, trial_id)))
        .collect();
    let run = |&(method_id, trial_id): &(usize, usize)| {
        run_trial(
            &instance,
            &config.budget,
            method_id,
            &config.methods[method_id],
            trial_id,
            seeds[trial_id],
        )
    };
    let runs = if config.parallel {
        tasks.par_iter().map(run).collect::<Result<Vec<RunData>>>()?
    } else {
        tasks.iter().map(run).collect::<Result<Vec<RunData>>>()?
    };

    let mut results: Vec<Vec<RunData>> = vec![Vec::new(); config.methods.len()];
    for run in runs {
        results[run.method_id].push(run);
    }
    Ok(results)
}

/// Best value per trial, one column per method.
pub fn best_values_table(results: &[Vec<RunData>]) -> String {
    let mut lines = Vec::new();
    let header: Vec<String> = std::iter::once("TrialId".to_string())
        .chain(
            results
                .iter()
                .filter_map(|runs| runs.first().map(|run| run.method_name.clone())),
        )
        .collect();
    lines.push(header.join("\t"));

    let num_trials = results.iter().map(|runs| runs.len()).max().unwrap_or(0);
    for trial_id in 0..num_trials {
        let mut row = vec![trial_id.to_string()];
        for runs in results.iter().filter(|runs| !runs.is_empty()) {
            row.push(
                runs.get(trial_id)
                    .and_then(|run| run.best_value)
                    .map(|value| value.to_string())
                    .unwrap_or_default(),
            );
        }
        lines.push(row.join("\t"));
    }
    lines.join("\n")
}

pub fn trial_summary_csv(runs: &[RunData]) -> String {
    std::iter::once(RunData::CSV_HEADER.to_string())
        .chain(runs.iter().map(RunData::to_csv_row))
        .collect::<Vec<String>>()
        .join("\n")
}
