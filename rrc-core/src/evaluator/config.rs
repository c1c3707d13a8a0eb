//! Configuration of [`Evaluator`](super::Evaluator).
use crate::{NormalizerConfig, StuckMonitorConfig};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Configuration of [`Evaluator`](super::Evaluator).
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
#[serde(default)]
pub struct EvaluatorConfig {
    /// Difficulty level passed to the environment at reset.
    pub difficulty: u32,

    /// Initial state mode passed to the environment at reset.
    pub init_state: String,

    /// Height written into the goal at difficulty 1, where only planar position is tracked.
    pub floor_height: f32,

    /// If set, the episode is cut after this number of steps.
    pub max_steps: Option<usize>,

    /// Configuration of the input normalizer.
    pub normalizer: NormalizerConfig,

    /// Configuration of the stuck-state monitor.
    pub monitor: StuckMonitorConfig,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            difficulty: 3,
            init_state: "normal".to_string(),
            floor_height: 0.0325,
            max_steps: None,
            normalizer: NormalizerConfig::default(),
            monitor: StuckMonitorConfig::default(),
        }
    }
}

impl EvaluatorConfig {
    /// Sets the difficulty level.
    pub fn difficulty(mut self, v: u32) -> Self {
        self.difficulty = v;
        self
    }

    /// Sets the initial state mode.
    pub fn init_state(mut self, v: impl Into<String>) -> Self {
        self.init_state = v.into();
        self
    }

    /// Sets the floor height used at difficulty 1.
    pub fn floor_height(mut self, v: f32) -> Self {
        self.floor_height = v;
        self
    }

    /// Sets the maximum number of steps.
    pub fn max_steps(mut self, v: Option<usize>) -> Self {
        self.max_steps = v;
        self
    }

    /// Sets the configuration of the normalizer.
    pub fn normalizer(mut self, v: NormalizerConfig) -> Self {
        self.normalizer = v;
        self
    }

    /// Sets the configuration of the stuck-state monitor.
    pub fn monitor(mut self, v: StuckMonitorConfig) -> Self {
        self.monitor = v;
        self
    }

    /// Constructs [`EvaluatorConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`EvaluatorConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}
