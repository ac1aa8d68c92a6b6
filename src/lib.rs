//! # simon-estimator - quantum attack cost estimates for block ciphers
//!
//! Compares the offline Simon attack against plain Grover key search on a
//! depth-limited fault-tolerant quantum computer.
//!
//! Gate counts run far past 2^64, so every cost is carried as a base-2
//! logarithm and combined with the log-domain helpers in [`log_math`].
//!
//! ## Modules
//!
//! - [`log_math`] - `log_add` / `log_subtract` with `-inf` as zero
//! - [`cost`] - `QuantumCost` and its sequential/parallel composition
//! - [`gates`] - per-gate costs under each metric
//! - [`calibration`] - simulated circuit costs loaded from CSV tables
//! - [`estimators`] - table lookup and rank-test circuits
//! - [`cipher`] - ciphers under attack and the default catalog
//! - [`simon`] - offline Simon cost for one `u`, and the search over `u`
//! - [`grover`] - exhaustive search baseline
//! - [`config`] - JSON configuration for report runs
//! - [`report`] - batch report over a catalog, as TeX, table or JSON

pub mod calibration;
pub mod cipher;
pub mod config;
pub mod cost;
pub mod estimators;
pub mod gates;
pub mod grover;
pub mod log_math;
pub mod report;
pub mod simon;

#[cfg(test)]
mod test_log;

pub use calibration::{
    CalibrationError, CalibrationRow, CalibrationSource, CalibrationStore, Subfolder, TableId,
    TableKind,
};
pub use cipher::{default_catalog, Cipher, CipherType};
pub use config::{ConfigError, EstimatorConfig};
pub use cost::{CostMetric, CostModel, CostProjection, QuantumCost};
pub use estimators::{dummy_key_cost, lookup_cost, rank_cost};
pub use grover::evaluate_grover;
pub use log_math::{log2, log_add, log_subtract, LOG_ZERO};
pub use report::{
    render_json, render_table, render_tex, run_grover_report, run_offline_report, ReportRow,
};
pub use simon::{SimonAttack, SimonAttackCost, SimonError};
