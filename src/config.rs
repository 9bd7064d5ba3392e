use std::env;

use strum::{Display, EnumString};

use crate::error::ConfigError;

const ENV_SEARCH_DEPTH: &str = "MASYU_SEARCH_DEPTH";

/// How hard [`Board::solve_with`](crate::Board::solve_with) works.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, EnumString, Display)]
#[strum(ascii_case_insensitive)]
pub enum SearchDepth {
    /// No deduction at all; solving only clears what was deduced before.
    #[strum(to_string = "off", serialize = "none")]
    Off,
    /// Pattern propagation from the circles, and nothing else.
    #[strum(to_string = "propagation", serialize = "0")]
    Propagation,
    /// Propagation, then a trial segment on every undecided edge, blocking those that lead to a contradiction.
    #[default]
    #[strum(to_string = "shallow", serialize = "1")]
    Shallow,
}

/// Settings read from the environment.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Config {
    /// Search depth, from `MASYU_SEARCH_DEPTH`.
    pub depth: SearchDepth,
}

impl Config {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read the configuration through `lookup`, which maps a variable name to its value, if set.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(depth) = lookup(ENV_SEARCH_DEPTH).filter(|value| !value.trim().is_empty()) {
            config.depth = depth.trim().parse().map_err(|_| {
                ConfigError::InvalidConfiguration(format!("{ENV_SEARCH_DEPTH} must be `off`, `propagation` or `shallow`, not {depth:?}"))
            })?;
        }

        Ok(config)
    }
}
