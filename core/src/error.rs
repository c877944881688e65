use thiserror::Error;

#[derive(Error, Debug)]
pub enum LemonError {
    #[error("Invalid argument: {reason}")]
    InvalidArgument { reason: String },

    #[error("Subsystem '{name}' is already registered")]
    AlreadyRegistered { name: String },

    #[error("Subsystem '{name}' was shut down and cannot be registered again")]
    Retired { name: String },

    #[error("Game instance is not ready")]
    NotReady,

    #[error("A game instance is already live")]
    InstanceAlreadyLive,

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LemonError {
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidArgument { reason: reason.into() }
    }
}

pub type LemonResult<T> = Result<T, LemonError>;
