//! Policy for cube trajectory evaluation without a deep learning backend.
//!
//! The actor network is evaluated with plain matrix operations in [`Mat`], so
//! evaluation does not depend on the framework the policy was trained with.
//! Weights and normalization statistics are stored together in a
//! [`PolicyArtifact`], serialized with `bincode`.
mod actor;
mod artifact;
mod mat;
mod mlp;
pub use actor::MlpActor;
pub use artifact::PolicyArtifact;
pub use mat::Mat;
pub use mlp::{Mlp, MlpConfig};
