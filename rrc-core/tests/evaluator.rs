use anyhow::{bail, Result};
use rrc_core::{
    error::RrcError,
    record::{BufferedRecorder, NullRecorder, Record},
    Act, BoxSpace, Env, EnvFactory, EnvParams, Evaluator, EvaluatorConfig, GoalObs,
    NormalizationStats, Policy, PolicyAdapter, Step, StepInfo, StuckMonitorConfig,
};
use std::cell::Cell;

const DIM_OBS: usize = 6;
const DIM_GOAL: usize = 3;
const DIM_ACT: usize = 9;
const ACTION_MAX: f32 = 0.397;

#[derive(Clone, Debug)]
struct ScriptedEnvConfig {
    /// Steps `1..=xy_fail_steps` report a lateral failure.
    xy_fail_steps: usize,

    /// The episode ends at this step.
    done_at: Option<usize>,

    /// Step raising an error.
    fault_at: Option<usize>,

    goal: Vec<f32>,
}

impl Default for ScriptedEnvConfig {
    fn default() -> Self {
        Self {
            xy_fail_steps: 0,
            done_at: Some(10),
            fault_at: None,
            goal: vec![0.05, -0.02, 0.3],
        }
    }
}

struct ScriptedEnv {
    config: ScriptedEnvConfig,
    action_space: BoxSpace,
    rng: fastrand::Rng,
    t: usize,
}

impl Env for ScriptedEnv {
    type Config = ScriptedEnvConfig;

    fn build(config: &Self::Config, seed: i64) -> Result<Self> {
        Ok(Self {
            config: config.clone(),
            action_space: BoxSpace::symmetric(DIM_ACT, ACTION_MAX),
            rng: fastrand::Rng::with_seed(seed as u64),
            t: 0,
        })
    }

    fn reset(&mut self, _difficulty: u32, _init_state: &str) -> Result<GoalObs> {
        self.t = 0;
        Ok(GoalObs::new(vec![0.0; DIM_OBS], self.config.goal.clone()))
    }

    fn step(&mut self, a: &Act) -> Result<(Step, Record)> {
        assert_eq!(a.len(), DIM_ACT);
        self.t += 1;
        if self.config.fault_at == Some(self.t) {
            bail!("robot connection lost at step {}", self.t);
        }

        let obs = GoalObs::new(vec![self.t as f32; DIM_OBS], self.config.goal.clone());
        let info = StepInfo {
            time_index: self.t as i64,
            xy_fail: self.t <= self.config.xy_fail_steps,
            rrc_reward: -(self.t as f32),
        };
        let is_done = self.config.done_at.map_or(false, |t| self.t >= t);
        Ok((Step::new(obs, a.clone(), -1.0, is_done, info), Record::empty()))
    }

    fn action_space(&self) -> &BoxSpace {
        &self.action_space
    }

    fn sample_action(&mut self) -> Result<Act> {
        Ok(self.action_space.sample(&mut self.rng))
    }
}

#[derive(Debug)]
struct ScriptedEnvFactory {
    config: ScriptedEnvConfig,
    n_probes: Cell<usize>,
    n_builds: Cell<usize>,
}

impl ScriptedEnvFactory {
    fn new(config: ScriptedEnvConfig) -> Self {
        Self {
            config,
            n_probes: Cell::new(0),
            n_builds: Cell::new(0),
        }
    }
}

impl EnvFactory for ScriptedEnvFactory {
    type Env = ScriptedEnv;

    fn env_params(&self, difficulty: u32, init_state: &str) -> Result<EnvParams> {
        self.n_probes.set(self.n_probes.get() + 1);
        let mut env = ScriptedEnv::build(&self.config, 0)?;
        EnvParams::probe(&mut env, difficulty, init_state)
    }

    fn build(&self) -> Result<ScriptedEnv> {
        self.n_builds.set(self.n_builds.get() + 1);
        ScriptedEnv::build(&self.config, 42)
    }
}

/// Returns a constant action and checks the layout of its input.
struct ConstPolicy {
    dim_act: usize,
}

impl Policy for ConstPolicy {
    fn infer(&self, input: &[f32]) -> Act {
        assert_eq!(input.len(), DIM_OBS + DIM_GOAL);
        assert!(input.iter().all(|x| x.abs() <= 5.0));
        vec![0.1; self.dim_act]
    }
}

fn evaluate(
    env_config: ScriptedEnvConfig,
    config: EvaluatorConfig,
    recorder: &mut BufferedRecorder,
) -> Result<(rrc_core::EpisodeSummary, ScriptedEnvFactory)> {
    let factory = ScriptedEnvFactory::new(env_config);
    let evaluator = Evaluator::new(config);
    let normalizer = evaluator.normalizer();
    let summary = evaluator.evaluate(
        &factory,
        |params| {
            PolicyAdapter::new(
                ConstPolicy { dim_act: DIM_ACT },
                NormalizationStats::identity(params.obs, params.goal),
                normalizer,
                params,
            )
        },
        recorder,
    )?;
    Ok((summary, factory))
}

/// Records written after each step.
fn progress(recorder: &BufferedRecorder) -> Vec<&Record> {
    recorder.iter().filter(|r| r.get("mode").is_some()).collect()
}

/// Summary records written at the end of an episode.
fn summaries(recorder: &BufferedRecorder) -> Vec<&Record> {
    recorder
        .iter()
        .filter(|r| r.get("Elapsed time").is_some())
        .collect()
}

#[test]
fn test_stuck_then_done() -> Result<()> {
    let env_config = ScriptedEnvConfig {
        xy_fail_steps: 50,
        done_at: Some(51),
        ..Default::default()
    };
    let mut recorder = BufferedRecorder::new();
    let (summary, factory) = evaluate(env_config, EvaluatorConfig::default(), &mut recorder)?;

    assert_eq!(factory.n_probes.get(), 1);
    assert_eq!(factory.n_builds.get(), 1);
    assert!(summary.is_done);
    assert_eq!(summary.n_steps, 51);
    assert_eq!(summary.n_policy_actions, 50);
    assert_eq!(summary.n_random_actions, 1);
    assert_eq!(summary.rrc_reward, -51.0);
    assert_eq!(summary.episode_return, -51.0);

    // 51 progress records followed by the summary
    assert_eq!(recorder.len(), 52);
    assert_eq!(summaries(&recorder).len(), 1);
    let record = recorder.iter().last().unwrap();
    assert!(record.get("Elapsed time").is_some());
    assert_eq!(record.get_scalar("Steps")?, 51.0);
    assert_eq!(record.get_scalar("Policy actions")?, 50.0);
    assert_eq!(record.get_scalar("Random actions")?, 1.0);
    assert_eq!(record.get_scalar("Episode return")?, -51.0);
    assert_eq!(record.get_scalar("RRC reward")?, -51.0);
    assert!(record.get_scalar("Elapsed time")? >= 0.0);

    let modes: Vec<String> = progress(&recorder)
        .iter()
        .map(|r| r.get_string("mode"))
        .collect::<Result<_, _>>()?;
    assert!(modes[..50].iter().all(|m| m == "Following"));
    assert_eq!(modes[50], "Recovering");
    Ok(())
}

#[test]
fn test_recovery_returns_to_policy() -> Result<()> {
    let env_config = ScriptedEnvConfig {
        xy_fail_steps: usize::MAX,
        done_at: Some(50 + 55 + 3),
        ..Default::default()
    };
    let mut recorder = BufferedRecorder::new();
    let (summary, _) = evaluate(env_config, EvaluatorConfig::default(), &mut recorder)?;

    assert_eq!(summary.n_random_actions, 55);
    assert_eq!(summary.n_policy_actions, 53);
    assert_eq!(summaries(&recorder).len(), 1);
    let progress = progress(&recorder);
    assert_eq!(progress.len(), 108);
    let last = progress.last().unwrap();
    assert_eq!(last.get_string("mode")?, "Following");
    assert_eq!(last.get_scalar("xy_fail")?, 1.0);
    Ok(())
}

#[test]
fn test_goal_projection_at_difficulty_1() -> Result<()> {
    let mut recorder = BufferedRecorder::new();
    let config = EvaluatorConfig::default().difficulty(1);
    let (summary, _) = evaluate(ScriptedEnvConfig::default(), config, &mut recorder)?;

    assert_eq!(summary.n_steps, 10);
    for record in progress(&recorder) {
        assert_eq!(record.get_array1("goal")?, vec![0.05, -0.02, 0.0325]);
    }

    let mut recorder = BufferedRecorder::new();
    let config = EvaluatorConfig::default().difficulty(3);
    let _ = evaluate(ScriptedEnvConfig::default(), config, &mut recorder)?;
    for record in progress(&recorder) {
        assert_eq!(record.get_array1("goal")?, vec![0.05, -0.02, 0.3]);
    }
    Ok(())
}

#[test]
fn test_max_steps() -> Result<()> {
    let env_config = ScriptedEnvConfig {
        done_at: None,
        ..Default::default()
    };
    let mut recorder = BufferedRecorder::new();
    let config = EvaluatorConfig::default().max_steps(Some(20));
    let (summary, _) = evaluate(env_config, config, &mut recorder)?;

    assert!(!summary.is_done);
    assert_eq!(summary.n_steps, 20);
    assert_eq!(progress(&recorder).len(), 20);
    assert_eq!(summaries(&recorder).len(), 1);
    Ok(())
}

#[test]
fn test_shape_mismatch_aborts_before_build() {
    let factory = ScriptedEnvFactory::new(ScriptedEnvConfig::default());
    let evaluator = Evaluator::new(EvaluatorConfig::default());
    let normalizer = evaluator.normalizer();
    let err = evaluator
        .evaluate(
            &factory,
            |params| {
                PolicyAdapter::new(
                    ConstPolicy { dim_act: DIM_ACT - 1 },
                    NormalizationStats::identity(params.obs, params.goal),
                    normalizer,
                    params,
                )
            },
            &mut NullRecorder::new(),
        )
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<RrcError>(),
        Some(RrcError::Configuration(_))
    ));
    assert_eq!(factory.n_probes.get(), 1);
    assert_eq!(factory.n_builds.get(), 0);
}

#[test]
fn test_environment_fault_is_propagated() {
    let env_config = ScriptedEnvConfig {
        fault_at: Some(3),
        ..Default::default()
    };
    let mut recorder = BufferedRecorder::new();
    let err = evaluate(env_config, EvaluatorConfig::default(), &mut recorder).unwrap_err();

    assert_eq!(err.to_string(), "robot connection lost at step 3");
    assert_eq!(recorder.len(), 2);
    assert!(summaries(&recorder).is_empty());
}

#[test]
fn test_zero_fails_threshold_aborts_before_probe() {
    let config = EvaluatorConfig::default()
        .monitor(StuckMonitorConfig::default().fails_threshold(0));
    let mut recorder = BufferedRecorder::new();
    let factory = ScriptedEnvFactory::new(ScriptedEnvConfig::default());
    let evaluator = Evaluator::new(config);
    let err = evaluator
        .evaluate(
            &factory,
            |params| {
                PolicyAdapter::new(
                    ConstPolicy { dim_act: DIM_ACT },
                    NormalizationStats::identity(params.obs, params.goal),
                    evaluator.normalizer(),
                    params,
                )
            },
            &mut recorder,
        )
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<RrcError>(),
        Some(RrcError::Configuration(_))
    ));
    assert_eq!(factory.n_probes.get(), 0);
    assert!(recorder.is_empty());
}

#[test]
fn test_probe_env_params() -> Result<()> {
    let mut env = ScriptedEnv::build(&ScriptedEnvConfig::default(), 0)?;
    let params = EnvParams::probe(&mut env, 3, "normal")?;
    assert_eq!(
        params,
        EnvParams {
            obs: DIM_OBS,
            goal: DIM_GOAL,
            action: DIM_ACT,
            action_max: ACTION_MAX,
        }
    );
    assert_eq!(params.input_dim(), DIM_OBS + DIM_GOAL);
    Ok(())
}
