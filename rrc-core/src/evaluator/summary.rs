use crate::record::{Record, RecordValue};
use chrono::prelude::{DateTime, Local};
use std::time::Duration;

/// Statistics of an evaluated episode.
#[derive(Clone, Debug)]
pub struct EpisodeSummary {
    /// Time at which the episode started.
    pub started_at: DateTime<Local>,

    /// Wall-clock time from reset to the last step.
    pub elapsed: Duration,

    /// Number of environment steps.
    pub n_steps: usize,

    /// Number of actions computed by the policy.
    pub n_policy_actions: usize,

    /// Number of random actions taken while recovering.
    pub n_random_actions: usize,

    /// Sum of rewards.
    pub episode_return: f32,

    /// Secondary reward reported at the last step.
    pub rrc_reward: f32,

    /// `true` if the environment reported the end of the episode.
    pub is_done: bool,
}

impl From<&EpisodeSummary> for Record {
    fn from(s: &EpisodeSummary) -> Self {
        Record::from_slice(&[
            ("Start time", RecordValue::DateTime(s.started_at)),
            ("Elapsed time", RecordValue::Scalar(s.elapsed.as_secs_f32())),
            ("Steps", RecordValue::Scalar(s.n_steps as f32)),
            ("Policy actions", RecordValue::Scalar(s.n_policy_actions as f32)),
            ("Random actions", RecordValue::Scalar(s.n_random_actions as f32)),
            ("Episode return", RecordValue::Scalar(s.episode_return)),
            ("RRC reward", RecordValue::Scalar(s.rrc_reward)),
        ])
    }
}
