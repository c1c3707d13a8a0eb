//! Policy.
use super::{Act, EnvParams};
use crate::{error::RrcError, Normalizer};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A deterministic policy.
///
/// Policy is a mapping from a normalized input vector, observation half followed
/// by goal half, to an action. Implementations run in inference mode: calling
/// [`Policy::infer`] never changes the state of the policy, so identical inputs
/// produce identical actions.
pub trait Policy {
    /// Computes an action for a normalized input vector.
    fn infer(&self, input: &[f32]) -> Act;
}

impl<P: Policy + ?Sized> Policy for Box<P> {
    fn infer(&self, input: &[f32]) -> Act {
        (**self).infer(input)
    }
}

impl<P: Policy + ?Sized> Policy for Arc<P> {
    fn infer(&self, input: &[f32]) -> Act {
        (**self).infer(input)
    }
}

/// Statistics used to standardize observations and goals.
///
/// Loaded once together with the policy and never mutated. Components of the
/// standard deviations are expected to be strictly positive.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct NormalizationStats {
    /// Mean of observations.
    pub obs_mean: Vec<f32>,

    /// Standard deviation of observations.
    pub obs_std: Vec<f32>,

    /// Mean of goals.
    pub goal_mean: Vec<f32>,

    /// Standard deviation of goals.
    pub goal_std: Vec<f32>,
}

impl NormalizationStats {
    /// Statistics with zero mean and unit standard deviation.
    pub fn identity(obs_dim: usize, goal_dim: usize) -> Self {
        Self {
            obs_mean: vec![0.0; obs_dim],
            obs_std: vec![1.0; obs_dim],
            goal_mean: vec![0.0; goal_dim],
            goal_std: vec![1.0; goal_dim],
        }
    }

    /// Dimension of observations.
    pub fn obs_dim(&self) -> usize {
        self.obs_mean.len()
    }

    /// Dimension of goals.
    pub fn goal_dim(&self) -> usize {
        self.goal_mean.len()
    }

    /// Checks that the statistics agree with the shapes of the environment.
    ///
    /// Standard deviations must also be finite and strictly positive.
    pub fn check(&self, params: &EnvParams) -> Result<()> {
        let mut stds = self.obs_std.iter().chain(self.goal_std.iter());
        if let Some(s) = stds.find(|s| !(s.is_finite() && **s > 0.0)) {
            return Err(RrcError::Configuration(format!(
                "standard deviation must be positive, got {}",
                s
            ))
            .into());
        }

        let lens = [
            ("obs_mean", self.obs_mean.len(), params.obs),
            ("obs_std", self.obs_std.len(), params.obs),
            ("goal_mean", self.goal_mean.len(), params.goal),
            ("goal_std", self.goal_std.len(), params.goal),
        ];
        for (name, len, expected) in lens.iter() {
            if len != expected {
                return Err(RrcError::Configuration(format!(
                    "length of {} is {}, environment reports {}",
                    name, len, expected
                ))
                .into());
            }
        }
        Ok(())
    }
}

/// Wraps a [`Policy`] with its normalization statistics.
///
/// The adapter is read-only after construction. It can be shared, e.g. in an
/// [`Arc`], by evaluation runs executed concurrently.
pub struct PolicyAdapter<P> {
    policy: P,
    stats: NormalizationStats,
    normalizer: Normalizer,
}

impl<P: Policy> PolicyAdapter<P> {
    /// Constructs the adapter.
    ///
    /// Fails with [`RrcError::Configuration`] if the statistics or the output of
    /// the policy disagree with the shapes reported by the environment. The
    /// output length is checked here once, with an all-zero input, and not on
    /// every call.
    pub fn new(
        policy: P,
        stats: NormalizationStats,
        normalizer: Normalizer,
        params: &EnvParams,
    ) -> Result<Self> {
        stats.check(params)?;

        let probe = policy.infer(&vec![0f32; params.input_dim()]);
        if probe.len() != params.action {
            return Err(RrcError::Configuration(format!(
                "policy emits actions of dimension {}, environment expects {}",
                probe.len(),
                params.action
            ))
            .into());
        }

        Ok(Self {
            policy,
            stats,
            normalizer,
        })
    }

    /// Normalizes the observation and goal, then computes the action.
    pub fn act(&self, obs: &[f32], goal: &[f32]) -> Result<Act> {
        let input = self.normalizer.normalize(obs, goal, &self.stats)?;
        Ok(self.policy.infer(&input))
    }

    /// Computes the action for an already normalized input vector.
    pub fn infer(&self, input: &[f32]) -> Act {
        self.policy.infer(input)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::NormalizerConfig;

    struct SumPolicy {
        dim_act: usize,
    }

    impl Policy for SumPolicy {
        fn infer(&self, input: &[f32]) -> Act {
            vec![input.iter().sum::<f32>().tanh(); self.dim_act]
        }
    }

    fn params() -> EnvParams {
        EnvParams {
            obs: 4,
            goal: 3,
            action: 2,
            action_max: 1.0,
        }
    }

    fn normalizer() -> Normalizer {
        Normalizer::new(NormalizerConfig::default())
    }

    #[test]
    fn test_check_rejects_non_positive_std() {
        let mut stats = NormalizationStats::identity(4, 3);
        assert!(stats.check(&params()).is_ok());
        stats.goal_std[1] = 0.0;
        let err = stats.check(&params()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RrcError>(),
            Some(RrcError::Configuration(_))
        ));
    }

    #[test]
    fn test_adapter_deterministic() -> Result<()> {
        let adapter = PolicyAdapter::new(
            SumPolicy { dim_act: 2 },
            NormalizationStats::identity(4, 3),
            normalizer(),
            &params(),
        )?;
        let obs = [0.1f32, -0.4, 2.0, 300.0];
        let goal = [0.0f32, 0.0, 0.0325];
        let a1 = adapter.act(&obs, &goal)?;
        let a2 = adapter.act(&obs, &goal)?;
        assert_eq!(a1, a2);
        assert_eq!(a1.len(), 2);
        Ok(())
    }

    #[test]
    fn test_adapter_action_dim_mismatch() {
        let err = PolicyAdapter::new(
            SumPolicy { dim_act: 3 },
            NormalizationStats::identity(4, 3),
            normalizer(),
            &params(),
        )
        .err()
        .unwrap();
        assert!(matches!(
            err.downcast_ref::<RrcError>(),
            Some(RrcError::Configuration(_))
        ));
    }

    #[test]
    fn test_adapter_stats_mismatch() {
        let err = PolicyAdapter::new(
            SumPolicy { dim_act: 2 },
            NormalizationStats::identity(5, 3),
            normalizer(),
            &params(),
        )
        .err()
        .unwrap();
        assert!(matches!(
            err.downcast_ref::<RrcError>(),
            Some(RrcError::Configuration(_))
        ));
    }

    #[test]
    fn test_adapter_invalid_input() -> Result<()> {
        let adapter = PolicyAdapter::new(
            SumPolicy { dim_act: 2 },
            NormalizationStats::identity(4, 3),
            normalizer(),
            &params(),
        )?;
        let err = adapter.act(&[0.0; 3], &[0.0; 3]).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RrcError>(),
            Some(RrcError::InvalidInput(_))
        ));
        Ok(())
    }
}
