//! Error type shared across the workspace.

use crate::ids::EntityId;

/// Workspace-wide error enum.
///
/// Per-frame anomalies (bad timestep, despawned entity mid-frame) are handled
/// by skipping, not by erroring; this type covers the failures that should
/// stop a caller, which in practice means construction and lookup.
#[derive(Debug, thiserror::Error)]
pub enum FlockError {
    /// Simulation configuration failed validation.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A handle referred to an entity the world does not know.
    #[error("unknown entity {0}")]
    EntityNotFound(EntityId),
}

pub type FlockResult<T> = Result<T, FlockError>;
