#![warn(missing_docs)]
//! Core of the cube trajectory policy evaluation.
//!
//! A learned policy is driven against an environment, simulated or physical,
//! in which a cube has to follow a moving goal trajectory. Per step, the
//! entities of this crate interact as follows:
//!
//! ```text
//! Env -> GoalObs -> Normalizer -> Policy -> act --------------+
//!                                                             |
//!                   StuckMonitor (Recovering) -> random act --+--> Env::step
//!                        ^                                            |
//!                        +---------------- StepInfo::xy_fail ---------+
//! ```
//!
//! [`Evaluator`] orchestrates one episode: it discovers [`EnvParams`] through an
//! [`EnvFactory`], builds the [`PolicyAdapter`], constructs the target
//! environment and runs the loop until the environment reports the end of the
//! episode.
pub mod error;
pub mod record;

mod base;
pub use base::{
    Act, BoxSpace, Env, EnvFactory, EnvParams, GoalObs, NormalizationStats, Policy,
    PolicyAdapter, Step, StepInfo,
};

mod normalizer;
pub use normalizer::{Normalizer, NormalizerConfig};

mod monitor;
pub use monitor::{MonitorMode, MonitorState, StuckMonitor, StuckMonitorConfig};

mod evaluator;
pub use evaluator::{project_goal, EpisodeSummary, Evaluator, EvaluatorConfig};
