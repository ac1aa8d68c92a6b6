//! Report configuration, loadable from JSON.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calibration::Subfolder;
use crate::cipher::{default_catalog, Cipher, DEFAULT_QUERY_LIMIT_EXP};
use crate::cost::{CostMetric, CostModel, CostProjection};
use crate::simon::{DEFAULT_DEPTH_LIMIT, DEFAULT_SUCCESS_PROB_EXP};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Everything a report run needs besides the calibration data itself.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    /// Root of the calibration tables.
    pub data_dir: PathBuf,
    pub subfolder: Subfolder,
    /// Depth budget, log2.
    pub depth_limit: f64,
    /// Failure probability, log2. Must be negative.
    pub success_prob_exp: f64,
    /// Query limit for the unrestricted pass, log2.
    pub unrestricted_query_limit: u32,
    pub projection: CostProjection,
    pub parallel_search: bool,
    pub ciphers: Vec<Cipher>,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("Simon"),
            subfolder: Subfolder::default(),
            depth_limit: DEFAULT_DEPTH_LIMIT,
            success_prob_exp: DEFAULT_SUCCESS_PROB_EXP,
            unrestricted_query_limit: DEFAULT_QUERY_LIMIT_EXP,
            projection: CostProjection::default(),
            parallel_search: true,
            ciphers: default_catalog(),
        }
    }
}

impl EstimatorConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Default::default()
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Model used to pick `u`; totals are re-evaluated under T gates after.
    pub fn search_model(&self) -> CostModel {
        CostModel::new(CostMetric::AllGates, self.projection)
    }
}
