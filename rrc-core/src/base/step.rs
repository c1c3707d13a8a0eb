//! Environment step.
use super::{Act, GoalObs};

/// Feedback of the environment at every step.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StepInfo {
    /// Time index of the step.
    pub time_index: i64,

    /// `true` when the commanded action produced no planar progress toward the goal.
    pub xy_fail: bool,

    /// Secondary reward used to score the episode.
    pub rrc_reward: f32,
}

/// Represents an action, observation and reward tuple `(a_t, o_t+1, r_t)`
/// with some additional information.
///
/// An environment emits [`Step`] object at every interaction steps.
#[derive(Clone, Debug)]
pub struct Step {
    /// Action.
    pub act: Act,

    /// Observation.
    pub obs: GoalObs,

    /// Reward.
    pub reward: f32,

    /// Flag denoting if the episode is finished.
    pub is_done: bool,

    /// Information of the step.
    pub info: StepInfo,
}

impl Step {
    /// Constructs a [`Step`] object.
    pub fn new(obs: GoalObs, act: Act, reward: f32, is_done: bool, info: StepInfo) -> Self {
        Step {
            act,
            obs,
            reward,
            is_done,
            info,
        }
    }

    #[inline]
    /// Terminated or truncated.
    pub fn is_done(&self) -> bool {
        self.is_done
    }
}
