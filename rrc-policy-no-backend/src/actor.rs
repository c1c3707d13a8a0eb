use crate::Mlp;
use rrc_core::{Act, Policy};

/// Deterministic actor: an [`Mlp`] whose `tanh` output is scaled by `action_max`.
#[derive(Clone, Debug)]
pub struct MlpActor {
    mlp: Mlp,
    action_max: f32,
}

impl MlpActor {
    /// Constructs the actor.
    pub fn new(mlp: Mlp, action_max: f32) -> Self {
        Self { mlp, action_max }
    }

    /// Returns the network.
    pub fn mlp(&self) -> &Mlp {
        &self.mlp
    }
}

impl Policy for MlpActor {
    fn infer(&self, input: &[f32]) -> Act {
        self.mlp
            .forward(&input.to_vec().into())
            .scale(self.action_max)
            .into_vec()
    }
}
