//! Pre-simulated circuit costs.
//!
//! The estimators only see the [`CalibrationSource`] trait; [`CalibrationStore`]
//! is the file-backed implementation used by the report binary.

mod store;
mod table;

pub use store::{parse_calibration_csv, read_calibration_csv, CalibrationError, CalibrationStore};
pub use table::{
    table_key, CalibrationRow, CalibrationSource, Subfolder, TableId, TableKind,
};
