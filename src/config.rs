use crate::error::RiskError;
use crate::risk::{AverageThresholds, RowThresholds};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Classification settings for one analysis run
///
/// Both threshold pairs are configured independently. Any field left out of a
/// config file keeps its default; unknown keys are rejected.
///
/// ```json
/// { "row": { "medium_above": 4, "high_above": 12 },
///   "average": { "medium_from": 6, "high_from": 12 } }
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RiskConfig {
    pub row: RowThresholds,
    pub average: AverageThresholds,
}

impl RiskConfig {
    pub fn from_json_str(json: &str) -> Result<Self, RiskError> {
        let config: RiskConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, RiskError> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn validate(&self) -> Result<(), RiskError> {
        self.row.validate()?;
        self.average.validate()
    }
}
