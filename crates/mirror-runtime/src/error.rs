use thiserror::Error;

pub type Result<T> = std::result::Result<T, MirrorError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MirrorError {
    #[error("invalid capacity {capacity}: a mirror must hold at least one item")]
    InvalidCapacity { capacity: i64 },

    #[error("invalid configuration: {message}")]
    Configuration { message: String },
}

impl MirrorError {
    #[must_use]
    pub const fn invalid_capacity(capacity: i64) -> Self {
        Self::InvalidCapacity { capacity }
    }

    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Whether this error was raised while validating configuration.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::InvalidCapacity { .. } | Self::Configuration { .. }
        )
    }
}
