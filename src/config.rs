use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::heuristics::HeuristicsConfig;
use crate::stages::{DedupeConfig, MatchConfig, RenderConfig};

/// All tunables of a run, loadable from a JSON file
///
/// Every section is optional in the file; missing fields keep their
/// defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub heuristics: HeuristicsConfig,
    pub matching: MatchConfig,
    pub dedupe: DedupeConfig,
    pub render: RenderConfig,
}

impl PipelineConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        Self::from_json(&content).with_context(|| format!("Invalid config file: {:?}", path))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse config JSON")
    }
}
