//! Environment.
use super::{Act, GoalObs, Step};
use crate::{error::RrcError, record::Record};
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Represents the cube trajectory environment, either simulated or physical.
///
/// The environment owns physics, rendering, reward computation and the timing
/// of each step. Errors returned by [`Env::reset`] and [`Env::step`] are
/// propagated to the caller without interpretation.
pub trait Env {
    /// Configurations.
    type Config: Clone;

    /// Builds an environment with a given random seed.
    fn build(config: &Self::Config, seed: i64) -> Result<Self>
    where
        Self: Sized;

    /// Resets the environment and returns the first observation of an episode.
    ///
    /// `difficulty` selects the task constraints and `init_state` the initial
    /// placement of the cube (e.g. `"normal"`).
    fn reset(&mut self, difficulty: u32, init_state: &str) -> Result<GoalObs>;

    /// Performes an environment step.
    fn step(&mut self, a: &Act) -> Result<(Step, Record)>;

    /// Returns the action space.
    fn action_space(&self) -> &BoxSpace;

    /// Samples an action uniformly from the action space.
    fn sample_action(&mut self) -> Result<Act>;
}

/// Constructs environments in two phases.
///
/// The target environment may be expensive to construct or unsafe to probe,
/// e.g. a physical robot. [`EnvFactory::env_params`] reads the shape metadata
/// without touching the target; only [`EnvFactory::build`] constructs it.
pub trait EnvFactory {
    /// The environment constructed by this factory.
    type Env: Env;

    /// Returns the shape metadata of the environment.
    fn env_params(&self, difficulty: u32, init_state: &str) -> Result<EnvParams>;

    /// Constructs the target environment.
    fn build(&self) -> Result<Self::Env>;
}

/// Shape metadata of an environment.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq)]
pub struct EnvParams {
    /// Dimension of the observation vector.
    pub obs: usize,

    /// Dimension of the goal vector.
    pub goal: usize,

    /// Dimension of the action vector.
    pub action: usize,

    /// Magnitude bound of each action component.
    pub action_max: f32,
}

impl EnvParams {
    /// Resets `env` and reads the dimensions of its observation, goal and action.
    pub fn probe<E: Env>(env: &mut E, difficulty: u32, init_state: &str) -> Result<Self> {
        let obs = env.reset(difficulty, init_state)?;
        let space = env.action_space();
        let action_max = match space.high().first() {
            Some(v) => *v,
            None => {
                return Err(RrcError::Configuration("empty action space".to_string()).into())
            }
        };

        Ok(Self {
            obs: obs.observation.len(),
            goal: obs.desired_goal.len(),
            action: space.len(),
            action_max,
        })
    }

    /// Length of the input vector of a policy, observation half followed by goal half.
    pub fn input_dim(&self) -> usize {
        self.obs + self.goal
    }
}

/// A box in the space of continuous actions.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct BoxSpace {
    low: Vec<f32>,
    high: Vec<f32>,
}

impl BoxSpace {
    /// Constructs a box with given lower and upper bounds.
    pub fn new(low: Vec<f32>, high: Vec<f32>) -> Result<Self> {
        if low.len() != high.len() {
            return Err(RrcError::InvalidInput(format!(
                "bounds of different lengths: {} and {}",
                low.len(),
                high.len()
            ))
            .into());
        }
        Ok(Self { low, high })
    }

    /// Constructs a box bounded by `[-action_max, action_max]` in every component.
    pub fn symmetric(dim: usize, action_max: f32) -> Self {
        Self {
            low: vec![-action_max; dim],
            high: vec![action_max; dim],
        }
    }

    /// Lower bounds.
    pub fn low(&self) -> &[f32] {
        &self.low
    }

    /// Upper bounds.
    pub fn high(&self) -> &[f32] {
        &self.high
    }

    /// Dimension of the space.
    pub fn len(&self) -> usize {
        self.high.len()
    }

    /// Returns `true` if the space has no component.
    pub fn is_empty(&self) -> bool {
        self.high.is_empty()
    }

    /// Draws an action uniformly from the box.
    pub fn sample(&self, rng: &mut fastrand::Rng) -> Act {
        self.low
            .iter()
            .zip(self.high.iter())
            .map(|(lo, hi)| lo + rng.f32() * (hi - lo))
            .collect()
    }

    /// Returns `true` if every component of `a` lies in the box.
    pub fn contains(&self, a: &[f32]) -> bool {
        a.len() == self.len()
            && a
                .iter()
                .zip(self.low.iter().zip(self.high.iter()))
                .all(|(v, (lo, hi))| lo <= v && v <= hi)
    }
}
