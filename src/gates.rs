//! Per-gate costs (log2) of the primitives the closed-form estimators are built from.

use crate::cost::CostMetric;
use crate::log_math::{LOG_ADD_THRESHOLD, LOG_ZERO};

/// Log2 gate counts and depths for one [`CostMetric`].
///
/// "Both AND" is a compute-AND together with its measurement-based uncompute.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GateCosts {
    pub and_gates: f64,
    pub and_depth: f64,
    pub unand_gates: f64,
    pub unand_depth: f64,
    pub both_and_gates: f64,
    pub both_and_depth: f64,
    pub cnot_gates: f64,
    pub cnot_depth: f64,
    pub clifford_gates: f64,
}

impl GateCosts {
    /// Every gate counts: an AND pair is 20 gates at depth 11, a CNOT or
    /// single-qubit Clifford is one gate at depth one.
    pub fn all_gates() -> Self {
        Self {
            and_gates: 15f64.log2(),
            and_depth: 3.0,
            unand_gates: 5f64.log2(),
            unand_depth: 3f64.log2(),
            both_and_gates: 20f64.log2(),
            both_and_depth: 11f64.log2(),
            cnot_gates: 0.0,
            cnot_depth: 0.0,
            clifford_gates: 0.0,
        }
    }

    /// Only T gates count: an AND pair is 4 T gates at T-depth one and the
    /// uncompute is T-free. Cliffords vanish.
    pub fn t_gates() -> Self {
        // uncompute uses no T gates; -threshold stands in for zero so that
        // log_add still drops it against any real term
        let free = -LOG_ADD_THRESHOLD;
        Self {
            and_gates: 2.0,
            and_depth: 0.0,
            unand_gates: free,
            unand_depth: free,
            both_and_gates: 2.0,
            both_and_depth: 0.0,
            cnot_gates: LOG_ZERO,
            cnot_depth: LOG_ZERO,
            clifford_gates: LOG_ZERO,
        }
    }

    pub fn for_metric(metric: CostMetric) -> Self {
        match metric {
            CostMetric::AllGates => Self::all_gates(),
            CostMetric::TGates => Self::t_gates(),
        }
    }
}
