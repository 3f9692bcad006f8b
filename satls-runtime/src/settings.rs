use anyhow::{anyhow, Result};
use satls_challenges::satisfiability::Solution;
use satls_structs::config::ExperimentConfig;
use satls_utils::dejsonify;
use std::fs;

/// Reads `input` as a file when it names a `.json` file, otherwise returns it as is.
fn read_json_arg(input: &str) -> Result<String> {
    if input.ends_with(".json") {
        fs::read_to_string(input).map_err(|e| anyhow!("Failed to read file {}: {}", input, e))
    } else {
        Ok(input.to_string())
    }
}

/// Loads an experiment config from a json string or path to a json file, and validates it.
pub fn load_config(input: &str) -> Result<ExperimentConfig> {
    let json = read_json_arg(input)?;
    let config = dejsonify::<ExperimentConfig>(&json)
        .map_err(|e| anyhow!("Failed to parse experiment config: {}", e))?;
    config.validate()?;
    Ok(config)
}

/// Accepts a solution as `{"variables": [..]}`, a bare 0/1 array, a bit string,
/// or a path to a json file holding either json form.
pub fn load_solution(input: &str) -> Result<Solution> {
    let text = read_json_arg(input)?;
    let text = text.trim();
    if text.starts_with('{') {
        dejsonify::<Solution>(text).map_err(|e| anyhow!("Failed to parse solution: {}", e))
    } else if text.starts_with('[') {
        let values = dejsonify::<Vec<u8>>(text)
            .map_err(|e| anyhow!("Failed to parse solution: {}", e))?;
        let variables = values
            .into_iter()
            .enumerate()
            .map(|(idx, value)| match value {
                0 => Ok(false),
                1 => Ok(true),
                _ => Err(anyhow!("Invalid value '{}' at position {}", value, idx)),
            })
            .collect::<Result<Vec<bool>>>()?;
        Ok(Solution::new(variables))
    } else {
        Solution::from_bit_string(text)
    }
}
