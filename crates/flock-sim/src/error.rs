use flock_core::{AgentId, FlockError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("unknown agent {0}")]
    UnknownAgent(AgentId),

    #[error("simulation has no player entity")]
    NoPlayer,

    #[error("world error: {0}")]
    World(#[from] FlockError),
}

pub type SimResult<T> = Result<T, SimError>;
