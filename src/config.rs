//! Engine configuration.
//!
//! Every search policy knob lives here rather than in module-level state,
//! so concurrent searches can run with different policies. The struct is
//! serde-deserializable with every field defaulted; an empty JSON object
//! yields the stock policy.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ConfigError;
use crate::scheduler::TravelPolicy;

/// Default ceiling on schedules returned by one search.
pub const DEFAULT_MAX_RESULTS: usize = 50;

/// Search policy for a [`SchedulingEngine`](crate::scheduler::SchedulingEngine).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Stop after this many complete schedules.
    pub max_results: usize,
    /// Stop after this many section placements, marking the run truncated.
    /// `None` = unbounded.
    pub node_limit: Option<u64>,
    /// Inter-campus travel buffers.
    pub travel: TravelPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_results: DEFAULT_MAX_RESULTS,
            node_limit: None,
            travel: TravelPolicy::default(),
        }
    }
}

impl EngineConfig {
    /// Parses and validates a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let config = Self::from_json_str(&content)?;
        info!(path = %path.display(), max_results = config.max_results, "loaded engine config");
        Ok(config)
    }

    /// Rejects configs the engine cannot run meaningfully.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_results == 0 {
            return Err(ConfigError::invalid("max_results must be at least 1"));
        }
        if self.node_limit == Some(0) {
            return Err(ConfigError::invalid("node_limit must be at least 1 when set"));
        }
        if self.travel.short_minutes > self.travel.standard_minutes {
            return Err(ConfigError::invalid(format!(
                "short travel allowance ({} min) exceeds standard allowance ({} min)",
                self.travel.short_minutes, self.travel.standard_minutes
            )));
        }
        Ok(())
    }
}
