//! Board configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading a [`BoardConfig`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The configuration document could not be parsed.
    #[error("invalid board configuration: {0}")]
    Parse(String),

    /// A step or spacing value was zero or negative.
    #[error("{field} must be at least 1, got {value}")]
    NonPositive {
        /// Offending field name.
        field: &'static str,
        /// Offending value.
        value: i64,
    },
}

/// Position arithmetic used by the ordering engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BoardConfig {
    /// Position given to the first task dropped into an empty column.
    pub seed_position: i64,
    /// Distance below the first or above the last neighbour when a task is
    /// dropped at either end of a column.
    pub edge_step: i64,
    /// Spacing between consecutive tasks after a column renumber.
    pub renumber_spacing: i64,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            seed_position: 1,
            edge_step: 1,
            renumber_spacing: 1024,
        }
    }
}

impl BoardConfig {
    /// Parses and validates a JSON configuration document.
    ///
    /// Missing fields take their default values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed documents or unknown
    /// fields, and [`ConfigError::NonPositive`] for invalid step values.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()
    }

    /// Checks the step values, returning the configuration unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NonPositive`] when `edge_step` or
    /// `renumber_spacing` is below 1.
    pub const fn validate(self) -> Result<Self, ConfigError> {
        if self.edge_step < 1 {
            return Err(ConfigError::NonPositive {
                field: "edge_step",
                value: self.edge_step,
            });
        }
        if self.renumber_spacing < 1 {
            return Err(ConfigError::NonPositive {
                field: "renumber_spacing",
                value: self.renumber_spacing,
            });
        }
        Ok(self)
    }
}
