//! A wrapper of the cube trajectory environment implemented in Python.
//!
//! [`CubeTrajectoryEnv`] drives the environment class of the challenge package
//! through [`PyO3`](https://github.com/PyO3/pyo3). The same class backs the
//! simulated and the physical robot, selected by [`EnvType`].
//!
//! Observations are Python dicts with the keys `observation` and
//! `desired_goal`. Actions are passed to Python as `numpy` arrays of `f32`.
//! [`CubeTrajectoryEnvFactory`] reads the shapes of observations and actions
//! from a simulated copy of the configured environment, so that a physical
//! robot is never started just to inspect array shapes.
mod base;
mod config;
mod factory;
pub use base::CubeTrajectoryEnv;
pub use config::{CubeTrajectoryEnvConfig, EnvType};
pub use factory::CubeTrajectoryEnvFactory;
