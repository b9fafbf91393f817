//! Common error infrastructure for targeting-core.
//!
//! A lookup that finds nothing is not an error: it is reported as `None`.
//! Errors here cover invalid setup, such as a configuration that cannot
//! describe a usable world.

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ErrorSeverity {
    /// Invalid input that should be rejected without retry.
    Validation,
    /// Unexpected state inconsistency; indicates a bug.
    Internal,
}

impl ErrorSeverity {
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Common trait for all targeting errors.
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait TargetingError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Errors reported by [`crate::TargetingConfig::validate`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("cell size must be positive")]
    ZeroCellSize,

    #[error("reach range must not be negative (x: {x}, y: {y})")]
    NegativeRange { x: i32, y: i32 },

    #[error("reach range exceeds {max} cells (x: {x}, y: {y})")]
    RangeTooLarge { x: i32, y: i32, max: i32 },

    #[error("world {width}x{height} leaves no room inside a margin of {margin}")]
    WorldTooSmall { width: i32, height: i32, margin: i32 },
}

impl TargetingError for ConfigError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            ConfigError::ZeroCellSize => "CONFIG_ZERO_CELL_SIZE",
            ConfigError::NegativeRange { .. } => "CONFIG_NEGATIVE_RANGE",
            ConfigError::RangeTooLarge { .. } => "CONFIG_RANGE_TOO_LARGE",
            ConfigError::WorldTooSmall { .. } => "CONFIG_WORLD_TOO_SMALL",
        }
    }
}
