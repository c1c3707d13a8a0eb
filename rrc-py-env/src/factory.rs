use crate::{CubeTrajectoryEnv, CubeTrajectoryEnvConfig};
use anyhow::Result;
use log::info;
use rrc_core::{Env, EnvFactory, EnvParams};

/// Builds [`CubeTrajectoryEnv`] in two phases.
///
/// Shapes are read from a simulated, non-rendered copy of the configured
/// environment, which is dropped before the target environment is built.
pub struct CubeTrajectoryEnvFactory {
    config: CubeTrajectoryEnvConfig,
    seed: i64,
}

impl CubeTrajectoryEnvFactory {
    /// Constructs the factory.
    pub fn new(config: CubeTrajectoryEnvConfig, seed: i64) -> Self {
        Self { config, seed }
    }
}

impl EnvFactory for CubeTrajectoryEnvFactory {
    type Env = CubeTrajectoryEnv;

    fn env_params(&self, difficulty: u32, init_state: &str) -> Result<EnvParams> {
        info!("Reading environment parameters from a simulated environment");
        let mut env = CubeTrajectoryEnv::build(&self.config.probe_config(), self.seed)?;
        let params = EnvParams::probe(&mut env, difficulty, init_state)?;
        drop(env);
        Ok(params)
    }

    fn build(&self) -> Result<CubeTrajectoryEnv> {
        CubeTrajectoryEnv::build(&self.config, self.seed)
    }
}
