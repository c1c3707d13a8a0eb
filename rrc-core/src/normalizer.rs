//! Standardization of observations and goals.
use crate::{error::RrcError, NormalizationStats};
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Configuration of [`Normalizer`].
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq)]
pub struct NormalizerConfig {
    /// Absolute bound applied to raw values before standardization.
    pub clip_obs: f32,

    /// Absolute bound applied to standardized values.
    pub clip_range: f32,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            clip_obs: 200.0,
            clip_range: 5.0,
        }
    }
}

impl NormalizerConfig {
    /// Sets the bound of raw values.
    pub fn clip_obs(mut self, v: f32) -> Self {
        self.clip_obs = v;
        self
    }

    /// Sets the bound of standardized values.
    pub fn clip_range(mut self, v: f32) -> Self {
        self.clip_range = v;
        self
    }
}

/// Maps raw observations and goals to the input vector of a policy.
#[derive(Clone, Copy, Debug)]
pub struct Normalizer {
    clip_obs: f32,
    clip_range: f32,
}

impl Normalizer {
    /// Constructs the normalizer.
    pub fn new(config: NormalizerConfig) -> Self {
        Self {
            clip_obs: config.clip_obs,
            clip_range: config.clip_range,
        }
    }

    /// Returns the input vector for `obs` and `goal`.
    ///
    /// Each half is clipped to `[-clip_obs, clip_obs]`, standardized with the
    /// corresponding statistics and clipped to `[-clip_range, clip_range]`.
    /// The observation half comes first, the policy was trained on that layout.
    pub fn normalize(&self, obs: &[f32], goal: &[f32], stats: &NormalizationStats) -> Result<Vec<f32>> {
        if obs.len() != stats.obs_mean.len() || obs.len() != stats.obs_std.len() {
            return Err(RrcError::InvalidInput(format!(
                "observation of length {}, statistics of length {}",
                obs.len(),
                stats.obs_mean.len()
            ))
            .into());
        }
        if goal.len() != stats.goal_mean.len() || goal.len() != stats.goal_std.len() {
            return Err(RrcError::InvalidInput(format!(
                "goal of length {}, statistics of length {}",
                goal.len(),
                stats.goal_mean.len()
            ))
            .into());
        }

        let mut input = Vec::with_capacity(obs.len() + goal.len());
        self.extend(&mut input, obs, &stats.obs_mean, &stats.obs_std);
        self.extend(&mut input, goal, &stats.goal_mean, &stats.goal_std);
        Ok(input)
    }

    fn extend(&self, input: &mut Vec<f32>, xs: &[f32], mean: &[f32], std: &[f32]) {
        input.extend(xs.iter().zip(mean.iter().zip(std.iter())).map(|(x, (m, s))| {
            let x = x.clamp(-self.clip_obs, self.clip_obs);
            ((x - m) / s).clamp(-self.clip_range, self.clip_range)
        }));
    }
}
