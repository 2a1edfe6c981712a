use serde::{Deserialize, Serialize};
use std::{fs::File, io::BufReader, path::Path};

use crate::error::ConfigError;

/// Selection policy of the `Or` combinator.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
pub enum OrMode {
    /// Longest match wins, first seen on ties
    #[default]
    Safe,
    /// First match wins
    Fast,
    /// First match wins, but divergence from `Safe` is reported
    TryFast,
}

/// Options recognized by a [`ParseContext`](crate::analyzer::ParseContext).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseConfig {
    /// Recursion ceiling; 0 means unlimited
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    #[serde(default)]
    pub trace_enable: bool,

    #[serde(default)]
    pub or_mode: OrMode,

    #[serde(default)]
    pub check_transform_safety: bool,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            trace_enable: false,
            or_mode: OrMode::default(),
            check_transform_safety: false,
        }
    }
}

impl ParseConfig {
    pub fn from_json(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }
}

pub const DEFAULT_MAX_DEPTH: usize = 1000;

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}
