use crate::{Mlp, MlpActor};
use anyhow::Result;
use log::info;
use rrc_core::{
    error::RrcError, EnvParams, NormalizationStats, Normalizer, PolicyAdapter,
};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

/// Persisted policy: actor weights with the statistics it was trained with.
///
/// `env_params` are the shapes of the environment the policy was trained on.
/// They are compared with the shapes reported by the live environment before
/// the policy is used.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct PolicyArtifact {
    pub env_params: EnvParams,
    pub stats: NormalizationStats,
    pub actor: Mlp,
}

impl PolicyArtifact {
    /// Loads an artifact serialized with `bincode`.
    ///
    /// Fails with [`RrcError::ArtifactLoad`] if the file cannot be read, cannot
    /// be decoded or is not internally consistent.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let load_error = |reason: String| RrcError::ArtifactLoad {
            path: path.display().to_string(),
            reason,
        };

        let buf = fs::read(path).map_err(|e| load_error(e.to_string()))?;
        let artifact: Self =
            bincode::deserialize(&buf[..]).map_err(|e| load_error(e.to_string()))?;
        artifact.validate().map_err(load_error)?;
        info!("Loaded policy from {}", path.display());

        Ok(artifact)
    }

    /// Saves the artifact with `bincode`.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path, bincode::serialize(self)?)?;
        Ok(())
    }

    fn validate(&self) -> Result<(), String> {
        self.actor.validate()?;
        self.stats
            .check(&self.env_params)
            .map_err(|e| e.to_string())?;
        if self.actor.in_dim() != self.env_params.input_dim() {
            return Err(format!(
                "actor takes inputs of dimension {}, statistics cover {}",
                self.actor.in_dim(),
                self.env_params.input_dim()
            ));
        }
        if self.actor.out_dim() != self.env_params.action {
            return Err(format!(
                "actor emits actions of dimension {}, declared {}",
                self.actor.out_dim(),
                self.env_params.action
            ));
        }
        Ok(())
    }

    /// Consumes the artifact and builds the policy for the live environment.
    ///
    /// Fails with [`RrcError::Configuration`] if the declared dimensions differ
    /// from `params`. Actions are scaled by the `action_max` of the live
    /// environment.
    pub fn into_adapter(
        self,
        params: &EnvParams,
        normalizer: Normalizer,
    ) -> Result<PolicyAdapter<MlpActor>> {
        let declared = &self.env_params;
        if (declared.obs, declared.goal, declared.action) != (params.obs, params.goal, params.action)
        {
            return Err(RrcError::Configuration(format!(
                "policy was trained with {:?}, environment reports {:?}",
                declared, params
            ))
            .into());
        }

        let actor = MlpActor::new(self.actor, params.action_max);
        PolicyAdapter::new(actor, self.stats, normalizer, params)
    }
}
