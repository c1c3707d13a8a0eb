//! Core functionalities.
mod env;
mod policy;
mod step;
pub use env::{BoxSpace, Env, EnvFactory, EnvParams};
pub use policy::{NormalizationStats, Policy, PolicyAdapter};
pub use step::{Step, StepInfo};

/// Action sent to the environment.
pub type Act = Vec<f32>;

/// Observation of the cube trajectory environment.
///
/// `observation` is a feature vector of stable order (joint angles, cube pose, ...)
/// and `desired_goal` the cube pose of the current trajectory waypoint.
#[derive(Clone, Debug, PartialEq)]
pub struct GoalObs {
    /// Observation vector.
    pub observation: Vec<f32>,

    /// Goal vector.
    pub desired_goal: Vec<f32>,
}

impl GoalObs {
    /// Constructs an observation.
    pub fn new(observation: Vec<f32>, desired_goal: Vec<f32>) -> Self {
        Self {
            observation,
            desired_goal,
        }
    }
}
