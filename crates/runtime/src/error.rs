//! Error types surfaced by the runtime API.
use targeting_core::{ConfigError, ErrorSeverity, TargetingError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    /// A thread panicked while holding the registry lock.
    #[error("strategy registry lock poisoned")]
    RegistryPoisoned,

    #[error("invalid targeting configuration")]
    InvalidConfig(#[from] ConfigError),
}

impl TargetingError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            RuntimeError::RegistryPoisoned => ErrorSeverity::Internal,
            RuntimeError::InvalidConfig(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            RuntimeError::RegistryPoisoned => "RUNTIME_REGISTRY_POISONED",
            RuntimeError::InvalidConfig(inner) => inner.error_code(),
        }
    }
}
