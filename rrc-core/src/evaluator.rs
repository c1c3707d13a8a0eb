//! Evaluation of a policy on the cube trajectory task.
use crate::{
    error::RrcError,
    record::{Record, RecordValue, Recorder},
    Env, EnvFactory, EnvParams, MonitorMode, Normalizer, Policy, PolicyAdapter, Step,
    StuckMonitor,
};
use anyhow::Result;
use chrono::Local;
use log::{info, trace};
use std::time::Instant;
mod config;
mod summary;
pub use config::EvaluatorConfig;
pub use summary::EpisodeSummary;

/// Overwrites the height of the goal at difficulty 1.
///
/// The policy for difficulty 1 tracks the planar position only, so the height
/// component of the goal is replaced by `floor_height` before normalization.
/// Goals of other difficulty levels are left untouched.
pub fn project_goal(difficulty: u32, goal: &mut [f32], floor_height: f32) -> Result<()> {
    if difficulty == 1 {
        match goal.get_mut(2) {
            Some(z) => *z = floor_height,
            None => {
                return Err(RrcError::InvalidInput(format!(
                    "goal of length {} has no height component",
                    goal.len()
                ))
                .into())
            }
        }
    }
    Ok(())
}

/// Runs a policy on an environment until the end of an episode.
///
/// A progress record is written to the recorder after every step, and the
/// [`EpisodeSummary`] once at the end of the episode. At every step, the action of the policy is used unless the [`StuckMonitor`]
/// detected a stuck state, in which case an action is sampled from the action
/// space of the environment. Errors of the environment or the policy abort the
/// episode; they are not retried.
pub struct Evaluator {
    config: EvaluatorConfig,
}

impl Evaluator {
    /// Constructs the evaluator.
    pub fn new(config: EvaluatorConfig) -> Self {
        Self { config }
    }

    /// Returns the normalizer to be used by the policy.
    pub fn normalizer(&self) -> Normalizer {
        Normalizer::new(self.config.normalizer)
    }

    /// Evaluates a policy from scratch.
    ///
    /// Shape metadata is read through `factory` before the target environment
    /// is built, then `load_policy` constructs the policy for these shapes.
    /// Any error in these phases aborts the evaluation before the first step.
    pub fn evaluate<F, P, L, R>(
        &self,
        factory: &F,
        load_policy: L,
        recorder: &mut R,
    ) -> Result<EpisodeSummary>
    where
        F: EnvFactory,
        P: Policy,
        L: FnOnce(&EnvParams) -> Result<PolicyAdapter<P>>,
        R: Recorder,
    {
        self.config.monitor.check()?;
        let params = factory.env_params(self.config.difficulty, &self.config.init_state)?;
        info!("Environment parameters: {:?}", params);

        let policy = load_policy(&params)?;
        let mut env = factory.build()?;
        self.run_episode(&mut env, &policy, recorder)
    }

    /// Runs an episode on a constructed environment.
    pub fn run_episode<E, P, R>(
        &self,
        env: &mut E,
        policy: &PolicyAdapter<P>,
        recorder: &mut R,
    ) -> Result<EpisodeSummary>
    where
        E: Env,
        P: Policy,
        R: Recorder,
    {
        self.config.monitor.check()?;
        let difficulty = self.config.difficulty;
        let mut monitor = StuckMonitor::new(self.config.monitor);
        let mut n_steps = 0;
        let mut n_policy_actions = 0;
        let mut n_random_actions = 0;
        let mut episode_return = 0f32;
        let mut rrc_reward = 0f32;
        let mut is_done = false;

        info!("Beginning evaluation");
        let started_at = Local::now();
        let t0 = Instant::now();
        let mut obs = env.reset(difficulty, &self.config.init_state)?;

        loop {
            if let Some(max_steps) = self.config.max_steps {
                if n_steps >= max_steps {
                    info!("Reached the maximum number of steps ({})", max_steps);
                    break;
                }
            }

            let mut goal = obs.desired_goal;
            project_goal(difficulty, &mut goal, self.config.floor_height)?;

            let mode = monitor.mode();
            let act = match mode {
                MonitorMode::Following => {
                    n_policy_actions += 1;
                    policy.act(&obs.observation, &goal)?
                }
                MonitorMode::Recovering => {
                    n_random_actions += 1;
                    env.sample_action()?
                }
            };
            trace!("Evaluator::run_episode(): mode = {:?}, act = {:?}", mode, act);

            let (step, record) = env.step(&act)?;
            monitor.update(step.info.xy_fail);
            n_steps += 1;
            episode_return += step.reward;
            rrc_reward = step.info.rrc_reward;
            is_done = step.is_done();

            recorder.write(progress_record(&step, goal, mode).merge(record));

            if is_done {
                break;
            }
            obs = step.obs;
        }

        let summary = EpisodeSummary {
            started_at,
            elapsed: t0.elapsed(),
            n_steps,
            n_policy_actions,
            n_random_actions,
            episode_return,
            rrc_reward,
            is_done,
        };
        recorder.write(Record::from(&summary));

        Ok(summary)
    }
}

fn progress_record(step: &Step, goal: Vec<f32>, mode: MonitorMode) -> Record {
    let mode = match mode {
        MonitorMode::Following => "Following",
        MonitorMode::Recovering => "Recovering",
    };
    Record::from_slice(&[
        ("time_index", RecordValue::Scalar(step.info.time_index as f32)),
        ("goal", RecordValue::Array1(goal)),
        ("reward", RecordValue::Scalar(step.reward)),
        ("rrc_reward", RecordValue::Scalar(step.info.rrc_reward)),
        ("xy_fail", RecordValue::Scalar(step.info.xy_fail as i32 as f32)),
        ("mode", RecordValue::String(mode.to_string())),
    ])
}
