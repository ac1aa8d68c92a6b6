//! Plain Grover key search, as the baseline the Simon attack is compared to.

use std::f64::consts::PI;

use tracing::warn;

use crate::calibration::{CalibrationSource, TableId};
use crate::cipher::Cipher;
use crate::cost::{CostModel, QuantumCost};
use crate::log_math::{log2, LOG_ZERO};

/// Extra bits of plaintext-ciphertext pairs demanded beyond the key size, so
/// that a false key survives every query with probability at most 2^-20.
pub const FALSE_KEY_MARGIN: u32 = 20;

/// Cost of exhaustive search over the whole key of `cipher`.
///
/// Enough known pairs are queried to pin down a unique key. The search runs
/// in stages: stage `n` evaluates the cipher on `n + 1` pairs and amplifies
/// whatever candidates earlier stages left.
pub fn evaluate_grover(
    calibration: &dyn CalibrationSource,
    cipher: &Cipher,
    model: CostModel,
) -> QuantumCost {
    if cipher.block_size_exp == 0 {
        warn!(cipher = %cipher.label(), "zero block size; Grover search is unbounded");
        return QuantumCost::max_cost();
    }
    let key_bits = cipher.key_size_exp + cipher.pre_key_size_exp;
    let num_queries = (key_bits + FALSE_KEY_MARGIN).div_ceil(cipher.block_size_exp);

    let query = calibration
        .lookup(
            &TableId::grover(cipher.name.as_str(), model.metric),
            &cipher.parameter_exp().to_string(),
            Some("1"),
            LOG_ZERO,
            false,
        )
        .unwrap_or_default();

    let mut cost = QuantumCost::empty();
    for n in 0..num_queries {
        let unresolved = f64::from(key_bits) - f64::from(n) * f64::from(cipher.block_size_exp);
        let iterates = f64::from(num_queries - n) * log2(PI / 4.0) + (unresolved / 2.0).max(0.0);
        let step = query.sequential_repeat(log2(f64::from(n + 1)));
        cost = cost.sequential(&step.sequential_repeat(iterates));
    }
    cost
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calibration::{CalibrationRow, CalibrationStore};
    use crate::cipher::CipherType;
    use crate::cost::CostMetric;
    use crate::log_math::log_add;

    fn store_with(name: &str, metric: CostMetric, t_count: u64) -> CalibrationStore {
        let mut store = CalibrationStore::new();
        store.insert(
            TableId::grover(name, metric),
            vec![CalibrationRow {
                first_arg: "64".to_string(),
                second_arg: "1".to_string(),
                full_width: 300,
                full_depth: 1 << 10,
                cnot_count: 1 << 14,
                clifford_count: 1 << 12,
                measure_count: 0,
                t_count,
                t_depth: 1 << 6,
            }],
        );
        store
    }

    #[test]
    fn test_prince_stages() {
        let model = CostModel::new(CostMetric::TGates, Default::default());
        let store = store_with("Prince", CostMetric::TGates, 1 << 12);
        let prince = Cipher::new("Prince", 64, 64, 64, CipherType::Fx);
        let cost = evaluate_grover(&store, &prince, model);

        // 148 key bits need three 64-bit blocks
        let quarter = (PI / 4.0).log2();
        let stages = [
            3.0 * quarter + 64.0,
            2.0 * quarter + 32.0 + 1.0,
            quarter + 3f64.log2(),
        ];
        let gates = stages
            .iter()
            .fold(LOG_ZERO, |acc, s| log_add(acc, 12.0 + s));
        let depth = stages
            .iter()
            .fold(LOG_ZERO, |acc, s| log_add(acc, 6.0 + s));
        assert!((cost.gates - gates).abs() < 1e-9);
        assert!((cost.depth - depth).abs() < 1e-9);
        // 300 qubits, none of them counted as input
        assert!((cost.ancilla - 300f64.log2()).abs() < 1e-9);
        assert_eq!(cost.width, LOG_ZERO);
    }

    #[test]
    fn test_all_gates_cost_more() {
        let prince = Cipher::new("Prince", 64, 64, 64, CipherType::Fx);
        let t = evaluate_grover(
            &store_with("Prince", CostMetric::TGates, 1 << 12),
            &prince,
            CostModel::new(CostMetric::TGates, Default::default()),
        );
        let all = evaluate_grover(
            &store_with("Prince", CostMetric::AllGates, 1 << 12),
            &prince,
            CostModel::default(),
        );
        assert!(all.gates > t.gates);
        assert!(all.depth > t.depth);
    }

    #[test]
    fn test_uncalibrated_cipher_costs_nothing() {
        let cipher = Cipher::new("Unknown", 128, 0, 128, CipherType::EvenMansour);
        let cost = evaluate_grover(&CalibrationStore::new(), &cipher, CostModel::default());
        assert_eq!(cost, QuantumCost::empty());
    }

    #[test]
    fn test_zero_block_size() {
        let cipher = Cipher::new("Broken", 0, 0, 8, CipherType::EvenMansour);
        let cost = evaluate_grover(&CalibrationStore::new(), &cipher, CostModel::default());
        assert_eq!(cost, QuantumCost::max_cost());
    }
}
