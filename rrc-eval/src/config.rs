use crate::args::Args;
use anyhow::{Context, Result};
use rrc_core::EvaluatorConfig;
use rrc_py_env::{CubeTrajectoryEnvConfig, EnvType};
use serde::{Deserialize, Serialize};
use std::{fs::File, io::BufReader, path::Path};

/// Configuration of an evaluation run.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct EvalConfig {
    /// Path of the policy artifact.
    pub model_path: String,

    /// Seed of the action space of the target environment.
    pub seed: i64,

    pub evaluator: EvaluatorConfig,

    pub env: CubeTrajectoryEnvConfig,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            model_path: "/userhome/policy.bincode".to_string(),
            seed: 42,
            evaluator: EvaluatorConfig::default(),
            env: CubeTrajectoryEnvConfig::default(),
        }
    }
}

impl EvalConfig {
    /// Constructs [`EvalConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("failed to open config {}", path.display()))?;
        let rdr = BufReader::new(file);
        Ok(serde_yaml::from_reader(rdr)?)
    }

    /// Builds the configuration of a run from the command line.
    ///
    /// The goal trajectory must be valid JSON; it is forwarded as text to the
    /// environment.
    pub fn from_args(args: &Args) -> Result<Self> {
        serde_json::from_str::<serde_json::Value>(&args.goal)
            .with_context(|| format!("goal trajectory is not valid JSON: {}", args.goal))?;

        let mut config = match &args.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };

        if let Some(model) = &args.model {
            config.model_path = model.clone();
        }
        if let Some(seed) = args.seed {
            config.seed = seed;
        }
        if let Some(difficulty) = args.difficulty {
            config.evaluator = config.evaluator.difficulty(difficulty);
        }
        if let Some(max_steps) = args.max_steps {
            config.evaluator = config.evaluator.max_steps(Some(max_steps));
        }
        if let Some(env_type) = &args.env_type {
            let env_type: EnvType = env_type.parse().map_err(anyhow::Error::msg)?;
            config.env = config.env.env_type(env_type);
        }
        if let Some(step_size) = args.step_size {
            config.env = config.env.step_size(step_size);
        }
        if args.visualization {
            config.env = config.env.visualization(true);
        }
        config.env = config.env.goal_trajectory(Some(args.goal.clone()));

        Ok(config)
    }
}
