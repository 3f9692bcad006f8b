use anyhow::{anyhow, Result};
use clap::{arg, Command};
use satls_challenges::satisfiability::{Challenge, Difficulty};
use satls_runtime::{
    experiment::{best_values_table, run_experiment, trial_summary_csv},
    instances::{load_dimacs, loader_for},
    settings::{load_config, load_solution},
};
use satls_utils::{jsonify_pretty, u8s_from_str};
use std::{fs, path::PathBuf};
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    Command::new("satls-runtime")
        .about("Runs MAX-SAT local search experiments")
        .arg_required_else_help(true)
        .subcommand(
            Command::new("run_experiment")
                .about("Runs every configured search method for every trial")
                .arg(
                    arg!(<CONFIG> "Experiment config json string or path to json file")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(--instances [INSTANCES_DIR] "Directory holding <id>.cnf instance files")
                        .default_value(".")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    arg!(--output [OUTPUT_FILE] "If set, all run data is saved to this file path as json")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    arg!(--threads [THREADS] "Number of worker threads for parallel experiments")
                        .value_parser(clap::value_parser!(usize)),
                ),
        )
        .subcommand(
            Command::new("evaluate_solution")
                .about("Counts the clauses a solution leaves unsatisfied")
                .arg(
                    arg!(<INSTANCE> "Path to a DIMACS cnf file")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    arg!(<SOLUTION> "Solution json string, bit string, or path to json file")
                        .value_parser(clap::value_parser!(String)),
                ),
        )
        .subcommand(
            Command::new("generate_instance")
                .about("Prints a random 3-SAT instance in DIMACS format")
                .arg(
                    arg!(<NUM_VARIABLES> "Number of variables")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    arg!(<CLAUSE_PERCENT> "Clauses per 100 variables, e.g. 426")
                        .value_parser(clap::value_parser!(u32)),
                )
                .arg(
                    arg!(<SEED_PHRASE> "A string used in seed generation")
                        .value_parser(clap::value_parser!(String)),
                ),
        )
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let matches = cli().get_matches();

    if let Err(e) = match matches.subcommand() {
        Some(("run_experiment", sub_m)) => run_experiment_cmd(
            sub_m.get_one::<String>("CONFIG").unwrap().clone(),
            sub_m.get_one::<PathBuf>("instances").unwrap().clone(),
            sub_m.get_one::<PathBuf>("output").cloned(),
            sub_m.get_one::<usize>("threads").cloned(),
        ),
        Some(("evaluate_solution", sub_m)) => evaluate_solution(
            sub_m.get_one::<PathBuf>("INSTANCE").unwrap().clone(),
            sub_m.get_one::<String>("SOLUTION").unwrap().clone(),
        ),
        Some(("generate_instance", sub_m)) => generate_instance(
            *sub_m.get_one::<usize>("NUM_VARIABLES").unwrap(),
            *sub_m.get_one::<u32>("CLAUSE_PERCENT").unwrap(),
            sub_m.get_one::<String>("SEED_PHRASE").unwrap().clone(),
        ),
        _ => Err(anyhow!("Invalid subcommand")),
    } {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run_experiment_cmd(
    config: String,
    instances_dir: PathBuf,
    output_file: Option<PathBuf>,
    threads: Option<usize>,
) -> Result<()> {
    let config = load_config(&config)?;
    if let Some(threads) = threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .map_err(|e| anyhow!("Failed to configure thread pool: {}", e))?;
    }

    let loader = loader_for(&config.instance, &instances_dir);
    let results = run_experiment(&config, loader.as_ref())?;

    println!("{}", best_values_table(&results));
    for runs in results.iter() {
        if let Some(first) = runs.first() {
            println!();
            println!("{}", first.method_name);
            println!("{}", trial_summary_csv(runs));
        }
    }

    if let Some(path) = output_file {
        fs::write(&path, jsonify_pretty(&results)?)
            .map_err(|e| anyhow!("Failed to write output file {}: {}", path.display(), e))?;
    }
    Ok(())
}

fn evaluate_solution(instance_path: PathBuf, solution: String) -> Result<()> {
    let challenge = load_dimacs(&instance_path)?;
    let solution = load_solution(&solution)?;
    println!("{}", challenge.evaluate_solution(&solution)?);
    Ok(())
}

fn generate_instance(
    num_variables: usize,
    clauses_to_variables_percent: u32,
    seed_phrase: String,
) -> Result<()> {
    let challenge = Challenge::generate_instance(
        &u8s_from_str(&seed_phrase),
        &Difficulty {
            num_variables,
            clauses_to_variables_percent,
        },
    )?;
    print!("{}", challenge.to_dimacs());
    Ok(())
}
