//! Configuration of [`CubeTrajectoryEnv`](super::CubeTrajectoryEnv).
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Backend of the environment.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EnvType {
    /// Simulation.
    Sim,

    /// Physical robot.
    Real,
}

impl EnvType {
    /// Name of the backend understood by the Python environment.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sim => "sim",
            Self::Real => "real",
        }
    }
}

impl std::str::FromStr for EnvType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sim" => Ok(Self::Sim),
            "real" => Ok(Self::Real),
            _ => Err(format!("unknown environment type: {}", s)),
        }
    }
}

/// Configuration of [`CubeTrajectoryEnv`](super::CubeTrajectoryEnv).
///
/// Fields other than `module` and `class` are passed as keyword arguments to
/// the constructor of the Python environment.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct CubeTrajectoryEnvConfig {
    /// Python module providing the environment.
    pub module: String,

    /// Name of the environment class in `module`.
    pub class: String,

    pub visualization: bool,

    pub max_steps: usize,

    /// If `true`, the task ignores the height of the goal.
    pub xy_only: bool,

    pub steps_per_goal: usize,

    /// Number of robot control steps per environment step.
    pub step_size: usize,

    /// Backend, the physical robot by default.
    pub env_type: EnvType,

    pub obs_type: String,

    pub env_wrapped: bool,

    pub increase_fps: bool,

    /// Goal trajectory as JSON text, decoded in Python with `json.loads`.
    pub goal_trajectory: Option<String>,
}

impl Default for CubeTrajectoryEnvConfig {
    fn default() -> Self {
        Self {
            module: "rrc_example_package.cube_trajectory_env".to_string(),
            class: "SimtoRealEnv".to_string(),
            visualization: false,
            max_steps: 1_000_000,
            xy_only: false,
            steps_per_goal: 100,
            step_size: 50,
            env_type: EnvType::Real,
            obs_type: "default".to_string(),
            env_wrapped: false,
            increase_fps: false,
            goal_trajectory: None,
        }
    }
}

impl CubeTrajectoryEnvConfig {
    /// Sets the backend.
    pub fn env_type(mut self, v: EnvType) -> Self {
        self.env_type = v;
        self
    }

    /// Enables rendering.
    pub fn visualization(mut self, v: bool) -> Self {
        self.visualization = v;
        self
    }

    /// Sets the number of robot control steps per environment step.
    pub fn step_size(mut self, v: usize) -> Self {
        self.step_size = v;
        self
    }

    /// Sets the goal trajectory, given as JSON text.
    pub fn goal_trajectory(mut self, v: Option<String>) -> Self {
        self.goal_trajectory = v;
        self
    }

    /// Configuration of the disposable environment used to read shapes.
    ///
    /// Same task as `self`, but simulated and without rendering.
    pub fn probe_config(&self) -> Self {
        self.clone().env_type(EnvType::Sim).visualization(false)
    }

    /// Constructs [`CubeTrajectoryEnvConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`CubeTrajectoryEnvConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}
