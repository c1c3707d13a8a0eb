use clap::Parser;
use serde::{Deserialize, Serialize};

/// Evaluate a policy on the cube trajectory task
#[derive(Clone, Parser, Debug, Serialize, Deserialize)]
#[command(version, about)]
pub struct Args {
    /// Goal trajectory as JSON, e.g. '[[0, [0, 0, 0.08]], [10000, [0, 0.07, 0.08]]]'
    pub goal: String,

    /// YAML file with the evaluation configuration.
    /// Options given on the command line take precedence.
    #[arg(long)]
    pub config: Option<String>,

    /// Path of the policy artifact
    #[arg(long)]
    pub model: Option<String>,

    /// "sim" or "real" (default)
    #[arg(long)]
    pub env_type: Option<String>,

    /// Difficulty level of the task
    #[arg(long)]
    pub difficulty: Option<u32>,

    /// Number of robot control steps per environment step
    #[arg(long)]
    pub step_size: Option<usize>,

    /// Render the simulation
    #[arg(long, default_value_t = false)]
    pub visualization: bool,

    /// Stop after this number of steps
    #[arg(long)]
    pub max_steps: Option<usize>,

    /// Seed of the action space used for recovery actions
    #[arg(long)]
    pub seed: Option<i64>,

    /// Print the configuration and exit
    #[arg(long, default_value_t = false)]
    pub show_config: bool,
}
