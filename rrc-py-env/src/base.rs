//! Wrapper of the cube trajectory environment implemented in Python.
use crate::CubeTrajectoryEnvConfig;
use anyhow::Result;
use log::{info, trace, warn};
use numpy::PyArray1;
use pyo3::{
    types::{IntoPyDict, PyDict, PyTuple},
    IntoPy, PyAny, PyObject, Python, ToPyObject,
};
use rrc_core::{record::Record, Act, BoxSpace, Env, GoalObs, Step, StepInfo};

/// The cube trajectory environment, simulated or on the physical robot.
pub struct CubeTrajectoryEnv {
    env: PyObject,
    action_space: BoxSpace,
}

fn to_vec(obj: &PyAny) -> Result<Vec<f32>> {
    Ok(obj.call_method0("tolist")?.extract()?)
}

/// Converts a Python dict with `observation` and `desired_goal` arrays.
fn goal_obs(obj: &PyAny) -> Result<GoalObs> {
    Ok(GoalObs::new(
        to_vec(obj.get_item("observation")?)?,
        to_vec(obj.get_item("desired_goal")?)?,
    ))
}

fn step_info(info: &PyAny) -> Result<StepInfo> {
    Ok(StepInfo {
        time_index: info.get_item("time_index")?.extract()?,
        // numpy.bool_ is not a subclass of bool
        xy_fail: info.get_item("xy_fail")?.is_true()?,
        rrc_reward: info.get_item("rrc_reward")?.extract()?,
    })
}

impl Env for CubeTrajectoryEnv {
    type Config = CubeTrajectoryEnvConfig;

    /// Constructs the environment.
    ///
    /// * `seed` - Seed of the action space, used by [`Env::sample_action`].
    fn build(config: &Self::Config, seed: i64) -> Result<Self> {
        Python::with_gil(|py| {
            // sys.argv can be empty depending on the interpreter, pybullet reads it.
            let locals = [("sys", py.import("sys")?)].into_py_dict(py);
            py.eval("sys.argv.insert(0, 'rrc')", None, Some(locals))?;
            let ver = py.eval("sys.version", None, Some(locals))?;
            info!("Python version = {}", ver);
            info!(
                "Building {}.{} ({})",
                config.module,
                config.class,
                config.env_type.as_str()
            );

            let goal_trajectory = match &config.goal_trajectory {
                Some(json) => py
                    .import("json")?
                    .call_method1("loads", (json.as_str(),))?
                    .to_object(py),
                None => py.None(),
            };
            let kwargs = PyDict::new(py);
            kwargs.set_item("visualization", config.visualization)?;
            kwargs.set_item("max_steps", config.max_steps)?;
            kwargs.set_item("xy_only", config.xy_only)?;
            kwargs.set_item("steps_per_goal", config.steps_per_goal)?;
            kwargs.set_item("step_size", config.step_size)?;
            kwargs.set_item("env_type", config.env_type.as_str())?;
            kwargs.set_item("obs_type", config.obs_type.as_str())?;
            kwargs.set_item("env_wrapped", config.env_wrapped)?;
            kwargs.set_item("increase_fps", config.increase_fps)?;
            kwargs.set_item("goal_trajectory", goal_trajectory)?;

            let env = py
                .import(config.module.as_str())?
                .getattr(config.class.as_str())?
                .call((), Some(kwargs))?;

            let space = env.getattr("action_space")?;
            if space.hasattr("seed")? {
                space.call_method1("seed", (seed,))?;
            }
            let action_space = BoxSpace::new(
                to_vec(space.getattr("low")?)?,
                to_vec(space.getattr("high")?)?,
            )?;

            Ok(Self {
                env: env.into(),
                action_space,
            })
        })
    }

    fn reset(&mut self, difficulty: u32, init_state: &str) -> Result<GoalObs> {
        trace!("CubeTrajectoryEnv::reset()");
        Python::with_gil(|py| {
            let kwargs = vec![
                ("difficulty", difficulty.to_object(py)),
                ("init_state", init_state.to_object(py)),
            ]
            .into_py_dict(py);
            let obs = self.env.call_method(py, "reset", (), Some(kwargs))?;
            goal_obs(obs.as_ref(py))
        })
    }

    /// Runs a step of the environment's dynamics.
    ///
    /// The returned [`Record`] is empty; progress is recorded by the evaluator.
    fn step(&mut self, a: &Act) -> Result<(Step, Record)> {
        trace!("CubeTrajectoryEnv::step()");
        Python::with_gil(|py| {
            let a_py: PyObject = PyArray1::<f32>::from_slice(py, a).into_py(py);
            let ret = self.env.call_method1(py, "step", (a_py,))?;
            let ret: &PyTuple = ret.extract(py)?;

            let obs = goal_obs(ret.get_item(0))?;
            let reward: f32 = ret.get_item(1).extract()?;
            let is_done = ret.get_item(2).is_true()?;
            let info = step_info(ret.get_item(3))?;

            Ok((
                Step::new(obs, a.clone(), reward, is_done, info),
                Record::empty(),
            ))
        })
    }

    fn action_space(&self) -> &BoxSpace {
        &self.action_space
    }

    fn sample_action(&mut self) -> Result<Act> {
        Python::with_gil(|py| {
            let a = self
                .env
                .getattr(py, "action_space")?
                .call_method0(py, "sample")?;
            to_vec(a.as_ref(py))
        })
    }
}

impl Drop for CubeTrajectoryEnv {
    fn drop(&mut self) {
        Python::with_gil(|py| {
            if let Err(e) = self.env.call_method0(py, "close") {
                warn!("Failed to close the environment: {}", e);
            }
        });
    }
}
