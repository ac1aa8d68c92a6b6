//! Resource tuples for quantum sub-circuits and the algebra that combines them.
//!
//! A [`QuantumCost`] is never mutated after it has been composed: every
//! combinator returns a fresh value. Which scalar a cost reduces to, and which
//! gate family is counted, is decided by an explicit [`CostModel`] passed in by
//! the caller.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::log_math::{log_add, LOG_ZERO};

/// Which gates are counted in `gates` and `depth`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CostMetric {
    /// CNOT, single-qubit Clifford, measurement and T gates.
    #[default]
    AllGates,
    /// T gates and T-depth only.
    TGates,
}

impl CostMetric {
    /// Suffix carried by calibration file names for this metric.
    pub fn file_suffix(&self) -> &'static str {
        match self {
            CostMetric::AllGates => "-all-gates",
            CostMetric::TGates => "",
        }
    }
}

/// How a [`QuantumCost`] is reduced to a single comparable number.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CostProjection {
    /// Total gate count.
    #[default]
    GateCount,
    /// Larger of gate count and depth times total qubits.
    DepthWidthProduct,
}

impl FromStr for CostProjection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gate-count" | "gates" => Ok(CostProjection::GateCount),
            "depth-width" | "depth-width-product" | "dw" => Ok(CostProjection::DepthWidthProduct),
            other => Err(format!("unknown cost projection: {other}")),
        }
    }
}

/// Metric and projection used for one evaluation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CostModel {
    pub metric: CostMetric,
    pub projection: CostProjection,
}

impl CostModel {
    pub fn new(metric: CostMetric, projection: CostProjection) -> Self {
        Self { metric, projection }
    }

    /// Same projection, different metric.
    pub fn with_metric(self, metric: CostMetric) -> Self {
        Self { metric, ..self }
    }

    /// Scalar cost used for comparisons.
    pub fn cost(&self, cost: &QuantumCost) -> f64 {
        match self.projection {
            CostProjection::GateCount => cost.gates,
            CostProjection::DepthWidthProduct => {
                cost.gates.max(cost.depth + cost.total_qubits())
            }
        }
    }

    /// Strict less-than on [`CostModel::cost`].
    pub fn is_cheaper(&self, a: &QuantumCost, b: &QuantumCost) -> bool {
        self.cost(a) < self.cost(b)
    }
}

/// Depth, width, gate count and ancilla count of a circuit, all as base-2 logs.
///
/// `width` counts qubits that hold logical input and output; `ancilla` counts
/// temporary qubits.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct QuantumCost {
    pub depth: f64,
    pub width: f64,
    pub gates: f64,
    pub ancilla: f64,
}

impl QuantumCost {
    pub fn new(depth: f64, width: f64, gates: f64, ancilla: f64) -> Self {
        Self {
            depth,
            width,
            gates,
            ancilla,
        }
    }

    /// The zero cost; identity for both [`sequential`](Self::sequential) and
    /// [`parallel`](Self::parallel).
    pub fn empty() -> Self {
        Self::new(LOG_ZERO, LOG_ZERO, LOG_ZERO, LOG_ZERO)
    }

    /// Worse than any real cost. Seeds minimum searches.
    pub fn max_cost() -> Self {
        Self::new(f64::INFINITY, f64::INFINITY, f64::INFINITY, f64::INFINITY)
    }

    /// No gates or depth, only `width` qubits held.
    pub fn width_only(width: f64) -> Self {
        Self {
            width,
            ..Self::empty()
        }
    }

    /// `self` followed by `next` on the same qubits.
    pub fn sequential(&self, next: &QuantumCost) -> Self {
        Self {
            depth: log_add(self.depth, next.depth),
            width: self.width.max(next.width),
            gates: log_add(self.gates, next.gates),
            ancilla: self.ancilla.max(next.ancilla),
        }
    }

    /// `self` and `other` side by side on disjoint qubits.
    pub fn parallel(&self, other: &QuantumCost) -> Self {
        Self {
            depth: self.depth.max(other.depth),
            width: log_add(self.width, other.width),
            gates: log_add(self.gates, other.gates),
            ancilla: log_add(self.ancilla, other.ancilla),
        }
    }

    /// `2^log_iterations` runs one after another, inputs feeding outputs.
    ///
    /// A count of `-inf` asks for no extra repetitions and leaves the cost as is.
    pub fn sequential_repeat(&self, log_iterations: f64) -> Self {
        if log_iterations == LOG_ZERO {
            return *self;
        }
        Self {
            depth: log_iterations + self.depth,
            gates: log_iterations + self.gates,
            ..*self
        }
    }

    /// `2^log_iterations` independent copies running at once.
    ///
    /// A count of `-inf` asks for no extra copies and leaves the cost as is.
    pub fn parallel_repeat(&self, log_iterations: f64) -> Self {
        if log_iterations == LOG_ZERO {
            return *self;
        }
        Self {
            depth: self.depth,
            width: log_iterations + self.width,
            gates: log_iterations + self.gates,
            ancilla: log_iterations + self.ancilla,
        }
    }

    /// Width plus ancilla.
    pub fn total_qubits(&self) -> f64 {
        log_add(self.width, self.ancilla)
    }
}

impl Default for QuantumCost {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Display for QuantumCost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  Gates:      {:.2}", self.gates)?;
        writeln!(f, "  Depth:      {:.2}", self.depth)?;
        writeln!(f, "  Qubits")?;
        writeln!(f, "    Width:    {:.2}", self.width)?;
        writeln!(f, "    Ancilla:  {:.2}", self.ancilla)?;
        writeln!(f, "    Total:    {:.2}", self.total_qubits())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log_math::log2;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha20Rng;

    fn random_field(rng: &mut ChaCha20Rng) -> f64 {
        if rng.gen_bool(0.1) {
            LOG_ZERO
        } else {
            rng.gen_range(-5.0..150.0)
        }
    }

    fn random_cost(rng: &mut ChaCha20Rng) -> QuantumCost {
        let depth = random_field(rng);
        let width = random_field(rng);
        let gates = random_field(rng);
        let ancilla = random_field(rng);
        QuantumCost::new(depth, width, gates, ancilla)
    }

    #[test]
    fn test_empty_is_identity_for_composition() {
        let mut rng = ChaCha20Rng::seed_from_u64(7);
        for _ in 0..200 {
            let c = random_cost(&mut rng);
            assert_eq!(QuantumCost::empty().sequential(&c), c);
            assert_eq!(c.sequential(&QuantumCost::empty()), c);
            assert_eq!(QuantumCost::empty().parallel(&c), c);
            assert_eq!(c.parallel(&QuantumCost::empty()), c);
        }
    }

    #[test]
    fn test_repeat_identities() {
        let mut rng = ChaCha20Rng::seed_from_u64(11);
        for _ in 0..200 {
            let c = random_cost(&mut rng);
            assert_eq!(c.sequential_repeat(0.0), c);
            assert_eq!(c.sequential_repeat(LOG_ZERO), c);
            assert_eq!(c.parallel_repeat(LOG_ZERO), c);
        }
    }

    #[test]
    fn test_sequential_composition() {
        let a = QuantumCost::new(log2(3.0), 4.0, log2(10.0), 2.0);
        let b = QuantumCost::new(log2(5.0), 6.0, log2(6.0), 1.0);
        let s = a.sequential(&b);
        assert!((s.depth - 3.0).abs() < 1e-12);
        assert!((s.gates - 4.0).abs() < 1e-12);
        assert_eq!(s.width, 6.0);
        assert_eq!(s.ancilla, 2.0);
    }

    #[test]
    fn test_parallel_composition() {
        let a = QuantumCost::new(3.0, log2(3.0), log2(10.0), log2(2.0));
        let b = QuantumCost::new(5.0, log2(5.0), log2(6.0), log2(6.0));
        let p = a.parallel(&b);
        assert_eq!(p.depth, 5.0);
        assert!((p.width - 3.0).abs() < 1e-12);
        assert!((p.gates - 4.0).abs() < 1e-12);
        assert!((p.ancilla - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_repeat_scales_linear_quantities() {
        let c = QuantumCost::new(10.0, 20.0, 30.0, 5.0);
        let seq = c.sequential_repeat(4.0);
        assert_eq!(seq, QuantumCost::new(14.0, 20.0, 34.0, 5.0));
        let par = c.parallel_repeat(4.0);
        assert_eq!(par, QuantumCost::new(10.0, 24.0, 34.0, 9.0));
    }

    #[test]
    fn test_gate_count_projection_monotonic() {
        let model = CostModel::default();
        let low = QuantumCost::new(50.0, 10.0, 40.0, 8.0);
        let high = QuantumCost { gates: 41.0, ..low };
        assert!(model.cost(&high) > model.cost(&low));
        assert!(model.is_cheaper(&low, &high));
        assert!(!model.is_cheaper(&low, &low));
        // depth and qubits are ignored under gate count
        let deeper = QuantumCost { depth: 90.0, width: 60.0, ..low };
        assert_eq!(model.cost(&deeper), model.cost(&low));
    }

    #[test]
    fn test_depth_width_projection() {
        let model = CostModel::new(CostMetric::AllGates, CostProjection::DepthWidthProduct);
        let c = QuantumCost::new(30.0, 10.0, 35.0, 10.0);
        // depth + log2(2^10 + 2^10) = 41 dominates the gate count
        assert!((model.cost(&c) - 41.0).abs() < 1e-12);

        let deeper = QuantumCost { depth: 31.0, ..c };
        assert!(model.cost(&deeper) > model.cost(&c));
        let wider = QuantumCost { ancilla: 12.0, ..c };
        assert!(model.cost(&wider) > model.cost(&c));

        let gate_bound = QuantumCost { gates: 60.0, ..c };
        assert_eq!(model.cost(&gate_bound), 60.0);
    }

    #[test]
    fn test_max_cost_never_cheaper() {
        let mut rng = ChaCha20Rng::seed_from_u64(3);
        for projection in [CostProjection::GateCount, CostProjection::DepthWidthProduct] {
            let model = CostModel::new(CostMetric::AllGates, projection);
            assert_eq!(model.cost(&QuantumCost::max_cost()), f64::INFINITY);
            for _ in 0..50 {
                let c = random_cost(&mut rng);
                assert!(!model.is_cheaper(&QuantumCost::max_cost(), &c));
            }
        }
    }

    #[test]
    fn test_total_qubits() {
        let c = QuantumCost::new(0.0, log2(12.0), 0.0, log2(4.0));
        assert!((c.total_qubits() - 4.0).abs() < 1e-12);
        assert_eq!(QuantumCost::width_only(7.0).total_qubits(), 7.0);
    }

    #[test]
    fn test_projection_from_str() {
        assert_eq!("gate-count".parse::<CostProjection>(), Ok(CostProjection::GateCount));
        assert_eq!("dw".parse::<CostProjection>(), Ok(CostProjection::DepthWidthProduct));
        assert!("area".parse::<CostProjection>().is_err());
    }
}
