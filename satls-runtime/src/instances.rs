use anyhow::{anyhow, Result};
use log::debug;
use satls_challenges::satisfiability::{Challenge, Difficulty, Formula};
use satls_structs::config::InstanceConfig;
use satls_utils::u8s_from_str;
use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

pub const DOMAIN: &str = "SAT";

/// Immutable instance data shared by every trial of an experiment.
#[derive(Debug, Clone)]
pub struct LoadedInstance {
    pub domain: String,
    pub instance_id: String,
    pub formula: Arc<Formula>,
}

pub trait InstanceLoader: Sync {
    fn load(&self, instance_id: &str) -> Result<LoadedInstance>;
}

/// Random 3-SAT instances, seeded by the hash of the instance id.
#[derive(Debug, Clone)]
pub struct GeneratedInstanceLoader {
    difficulty: Difficulty,
}

impl GeneratedInstanceLoader {
    pub fn new(difficulty: Difficulty) -> Self {
        Self { difficulty }
    }
}

impl InstanceLoader for GeneratedInstanceLoader {
    fn load(&self, instance_id: &str) -> Result<LoadedInstance> {
        check_instance_id(instance_id)?;
        let challenge = Challenge::generate_instance(&u8s_from_str(instance_id), &self.difficulty)?;
        debug!(
            "generated instance '{}' with {} variables and {} clauses",
            instance_id,
            challenge.num_variables,
            challenge.num_clauses()
        );
        Ok(LoadedInstance {
            domain: DOMAIN.to_string(),
            instance_id: instance_id.to_string(),
            formula: Arc::new(Formula::try_from(&challenge)?),
        })
    }
}

/// DIMACS CNF files stored as `<directory>/<instance_id>.cnf`.
#[derive(Debug, Clone)]
pub struct DimacsInstanceLoader {
    directory: PathBuf,
}

impl DimacsInstanceLoader {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn path_for(&self, instance_id: &str) -> PathBuf {
        self.directory.join(format!("{}.cnf", instance_id))
    }
}

impl InstanceLoader for DimacsInstanceLoader {
    fn load(&self, instance_id: &str) -> Result<LoadedInstance> {
        check_instance_id(instance_id)?;
        let path = self.path_for(instance_id);
        let challenge = load_dimacs(&path)?;
        debug!(
            "loaded instance '{}' from {}",
            instance_id,
            path.display()
        );
        Ok(LoadedInstance {
            domain: DOMAIN.to_string(),
            instance_id: instance_id.to_string(),
            formula: Arc::new(Formula::try_from(&challenge)?),
        })
    }
}

pub fn load_dimacs(path: &Path) -> Result<Challenge> {
    let text = fs::read_to_string(path)
        .map_err(|e| anyhow!("Failed to read instance file {}: {}", path.display(), e))?;
    Challenge::from_dimacs(&text)
        .map_err(|e| anyhow!("Failed to parse instance file {}: {}", path.display(), e))
}

pub fn loader_for(instance: &InstanceConfig, instances_dir: &Path) -> Box<dyn InstanceLoader> {
    match instance {
        InstanceConfig::Generated { difficulty, .. } => {
            Box::new(GeneratedInstanceLoader::new(*difficulty))
        }
        InstanceConfig::Dimacs { .. } => Box::new(DimacsInstanceLoader::new(instances_dir)),
    }
}

fn check_instance_id(instance_id: &str) -> Result<()> {
    if instance_id.is_empty()
        || instance_id
            .chars()
            .any(|c| c == '/' || c == '\\' || c.is_whitespace())
        || instance_id.starts_with('.')
    {
        return Err(anyhow!("Invalid instance id '{}'", instance_id));
    }
    Ok(())
}
