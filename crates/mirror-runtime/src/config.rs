#![forbid(unsafe_code)]

//! Mirror configuration.
//!
//! The only tunable is the window capacity. It defaults to
//! [`DEFAULT_CAPACITY`] and can be overridden through the
//! `MIRROR_CAPACITY` environment variable.

use crate::error::{MirrorError, Result};

/// Number of leading items mirrored when nothing else is configured.
pub const DEFAULT_CAPACITY: usize = 12;

/// Environment variable consulted by [`MirrorConfig::from_env`].
pub const CAPACITY_ENV: &str = "MIRROR_CAPACITY";

/// Configuration for a [`BoundedMirror`](crate::reactive::BoundedMirror).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MirrorConfig {
    /// Maximum number of leading source items held by the mirror.
    pub capacity: usize,
}

impl Default for MirrorConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
        }
    }
}

impl MirrorConfig {
    /// Create a validated configuration.
    pub fn new(capacity: usize) -> Result<Self> {
        let config = Self { capacity };
        config.validate()?;
        Ok(config)
    }

    /// Reject capacities that cannot hold a single item.
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(MirrorError::invalid_capacity(0));
        }
        Ok(())
    }

    /// Load from the process environment.
    ///
    /// Unset means [`DEFAULT_CAPACITY`]. Set but unparsable, zero, or
    /// negative is an error.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let Some(raw) = lookup(CAPACITY_ENV) else {
            return Ok(Self::default());
        };
        let trimmed = raw.trim();
        let parsed: i64 = trimmed.parse().map_err(|_| {
            MirrorError::configuration(format!("{CAPACITY_ENV}={trimmed:?} is not an integer"))
        })?;
        if parsed <= 0 {
            return Err(MirrorError::invalid_capacity(parsed));
        }
        let capacity = usize::try_from(parsed).map_err(|_| {
            MirrorError::configuration(format!("{CAPACITY_ENV}={parsed} does not fit in usize"))
        })?;
        Self::new(capacity)
    }
}
