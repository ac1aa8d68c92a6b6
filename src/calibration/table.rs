use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::cost::{CostMetric, QuantumCost};
use crate::gates::GateCosts;
use crate::log_math::{log2, log_add};

/// Which family of simulator output a table holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TableKind {
    /// Per-query cost of a cipher oracle, keyed by (parameter, guess size).
    CipherCosts,
    /// Rank test of a binary matrix, keyed by (width, height).
    RankCalculation,
    /// Cipher evaluations for exhaustive search, keyed by (parameter, queries).
    GroverCosts,
}

impl TableKind {
    pub const ALL: [TableKind; 3] = [
        TableKind::CipherCosts,
        TableKind::RankCalculation,
        TableKind::GroverCosts,
    ];

    pub fn dir_name(&self) -> &'static str {
        match self {
            TableKind::CipherCosts => "CipherCosts",
            TableKind::RankCalculation => "RankCalculation",
            TableKind::GroverCosts => "GroverCosts",
        }
    }
}

/// Circuit optimisation target the simulator output was produced under.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Subfolder {
    #[default]
    LowT,
    LowDepth,
    LowWidth,
}

impl Subfolder {
    pub fn dir_name(&self) -> &'static str {
        match self {
            Subfolder::LowT => "LowT",
            Subfolder::LowDepth => "LowDepth",
            Subfolder::LowWidth => "LowWidth",
        }
    }
}

impl FromStr for Subfolder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lowt" | "low-t" => Ok(Subfolder::LowT),
            "lowdepth" | "low-depth" => Ok(Subfolder::LowDepth),
            "lowwidth" | "low-width" => Ok(Subfolder::LowWidth),
            _ => Err(format!("unknown subfolder: {s}")),
        }
    }
}

/// Identifies one calibration table.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TableId {
    pub kind: TableKind,
    pub name: String,
    pub metric: CostMetric,
}

impl TableId {
    pub fn new(kind: TableKind, name: impl Into<String>, metric: CostMetric) -> Self {
        Self {
            kind,
            name: name.into(),
            metric,
        }
    }

    pub fn cipher(name: impl Into<String>, metric: CostMetric) -> Self {
        Self::new(TableKind::CipherCosts, name, metric)
    }

    pub fn rank(metric: CostMetric) -> Self {
        Self::new(TableKind::RankCalculation, "Rank", metric)
    }

    pub fn grover(name: impl Into<String>, metric: CostMetric) -> Self {
        Self::new(TableKind::GroverCosts, name, metric)
    }

    /// File name under `<kind>/<subfolder>/`.
    pub fn file_name(&self) -> String {
        format!("{}{}.csv", self.name, self.metric.file_suffix())
    }
}

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind.dir_name(), self.file_name())
    }
}

/// One simulated circuit: the two key columns and linear resource counts.
///
/// Field names follow the column headers of the estimator output; columns
/// not listed here are ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct CalibrationRow {
    #[serde(rename = "first arg")]
    pub first_arg: String,
    #[serde(rename = "second arg", default)]
    pub second_arg: String,
    #[serde(rename = "Full width")]
    pub full_width: u64,
    #[serde(rename = "Full depth")]
    pub full_depth: u64,
    #[serde(rename = "CNOT count")]
    pub cnot_count: u64,
    #[serde(rename = "1-qubit Clifford count")]
    pub clifford_count: u64,
    #[serde(rename = "M count")]
    pub measure_count: u64,
    #[serde(rename = "T count")]
    pub t_count: u64,
    #[serde(rename = "T depth")]
    pub t_depth: u64,
}

impl CalibrationRow {
    /// Converts the linear counts to a log-domain cost.
    ///
    /// `input_size_log` qubits of the full width are inputs; the rest are ancilla.
    pub fn to_cost(&self, metric: CostMetric, input_size_log: f64) -> QuantumCost {
        let ancilla = log2(self.full_width as f64 - input_size_log.exp2());
        let (depth, gates) = match metric {
            CostMetric::AllGates => {
                let g = GateCosts::all_gates();
                let cnot = g.cnot_gates + log2(self.cnot_count as f64);
                let clifford = g.clifford_gates
                    + log2(self.clifford_count as f64 + self.measure_count as f64);
                let gates = log_add(log_add(cnot, clifford), log2(self.t_count as f64));
                (log2(self.full_depth as f64), gates)
            }
            CostMetric::TGates => (log2(self.t_depth as f64), log2(self.t_count as f64)),
        };
        QuantumCost::new(depth, input_size_log, gates, ancilla)
    }
}

/// Read-only source of previously simulated costs.
///
/// Implementors only provide [`rows`](Self::rows); the matching rules live in
/// the provided [`lookup`](Self::lookup).
pub trait CalibrationSource: Send + Sync {
    /// Rows of `table` in file order, or an empty slice if the table is absent.
    fn rows(&self, table: &TableId) -> &[CalibrationRow];

    /// Finds the cost recorded for `primary` (and preferably `secondary`).
    ///
    /// Rows are scanned in order. A row matching both keys is returned at once;
    /// otherwise the last row matching `primary` is the fallback. `strict`
    /// lookups return `None` unless both keys matched. Non-strict lookups with
    /// no `primary` match return a cost holding only `input_size_log` width.
    fn lookup(
        &self,
        table: &TableId,
        primary: &str,
        secondary: Option<&str>,
        input_size_log: f64,
        strict: bool,
    ) -> Option<QuantumCost> {
        let mut fallback = None;
        for row in self.rows(table) {
            if row.first_arg != primary {
                continue;
            }
            let cost = row.to_cost(table.metric, input_size_log);
            if secondary.is_some_and(|s| row.second_arg == s) {
                return Some(cost);
            }
            fallback = Some(cost);
        }
        if strict {
            return None;
        }
        Some(fallback.unwrap_or_else(|| QuantumCost::width_only(input_size_log)))
    }
}

/// Formats a numeric key the way calibration files write it.
pub fn table_key(value: f64) -> String {
    format!("{value}")
}
