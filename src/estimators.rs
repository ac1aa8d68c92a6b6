//! Closed-form costs of the sub-circuits the offline Simon attack is built from.

use crate::calibration::{table_key, CalibrationSource, TableId};
use crate::cipher::Cipher;
use crate::cost::{CostMetric, QuantumCost};
use crate::gates::GateCosts;
use crate::log_math::{log2, log_add};

/// Cost of a table lookup returning `word_size`-bit words from a table of
/// `2^log_table_size` entries.
///
/// Only the unary-iteration construction is modelled; its depth grows linearly
/// in the table size.
pub fn lookup_cost(log_table_size: f64, word_size: f64, metric: CostMetric) -> QuantumCost {
    let g = GateCosts::for_metric(metric);
    let qubits = log_add(log2(log_table_size), log2(word_size));
    QuantumCost {
        depth: log_table_size
            + log_add(g.both_and_depth, 1.0 + log2(log2(word_size) - 1.0) + g.cnot_depth),
        width: qubits,
        gates: log_table_size + log_add(g.both_and_gates, log2(1.5) + log2(word_size) + g.cnot_gates),
        ancilla: qubits,
    }
}

/// Cost of deciding whether a `2^log_n x 2^log_m` binary matrix has full rank.
///
/// A simulated circuit of exactly that shape is used when the calibration
/// source has one; otherwise a regression fit over simulated sizes.
pub fn rank_cost(
    calibration: &dyn CalibrationSource,
    metric: CostMetric,
    log_n: f64,
    log_m: f64,
) -> QuantumCost {
    let (log_n, log_m) = if log_m > log_n {
        (log_m, log_n)
    } else {
        (log_n, log_m)
    };
    let n = size_from_log(log_n);
    let m = size_from_log(log_m);
    calibration
        .lookup(
            &TableId::rank(metric),
            &table_key(m),
            Some(&table_key(n)),
            log_n + log_m,
            true,
        )
        .unwrap_or_else(|| rank_cost_fit(metric, log_n, log_m))
}

/// Regression fit for [`rank_cost`], with `log_m <= log_n`.
pub fn rank_cost_fit(metric: CostMetric, log_n: f64, log_m: f64) -> QuantumCost {
    let g = GateCosts::for_metric(metric);
    let n = size_from_log(log_n);
    let m = size_from_log(log_m);
    let cells = n * m * (m - 1.0);

    let gates = log_add(
        log_add(
            log2(14.0 * cells + 60.0),
            g.cnot_gates + log2(23.7 * cells - 1435.0),
        ),
        g.clifford_gates + log2(4.0 * cells + 230.0),
    );
    let (slope, intercept) = match metric {
        CostMetric::TGates => (2.06, 363.0),
        CostMetric::AllGates => (6.61, 1086.0),
    };
    let depth = log2(slope * (m + n) * (log_m + log_n + 1.0) + intercept);

    QuantumCost {
        depth,
        width: log_n + log_m,
        gates,
        ancilla: log2(m * (3.0 * m - 1.0) / 2.0 + n),
    }
}

/// Holds the key register without doing any work on it.
pub fn dummy_key_cost(cipher: &Cipher) -> QuantumCost {
    QuantumCost::width_only(log2(cipher.key_size_exp as f64))
}

// Sizes are whole numbers; exp2 of their log can pick up rounding noise that
// would break table keys.
fn size_from_log(log_size: f64) -> f64 {
    let size = log_size.exp2();
    if (size - size.round()).abs() < 1e-6 {
        size.round()
    } else {
        size
    }
}
