//! Batch comparison of the offline Simon attack against Grover search over a
//! cipher catalog.

use std::fmt::Write as _;

use serde::Serialize;
use tracing::{info, warn};

use crate::calibration::CalibrationSource;
use crate::cipher::Cipher;
use crate::config::EstimatorConfig;
use crate::cost::{CostMetric, QuantumCost};
use crate::grover::evaluate_grover;
use crate::simon::{SimonAttack, SimonError};

/// One cipher's attack cost. All costs are log2.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ReportRow {
    pub name: String,
    pub parameter: u32,
    pub block_size: u32,
    /// Query limit the search ran under; `None` for Grover rows.
    pub query_limit: Option<u32>,
    pub u: u32,
    pub gates: f64,
    pub t_gates: f64,
    pub depth: f64,
    pub t_depth: f64,
    /// Width plus ancilla of the all-gates total.
    pub qubits: f64,
    /// Equations in the linear system; `None` for Grover rows.
    pub linear_system_size: Option<f64>,
}

impl ReportRow {
    fn new(cipher: &Cipher, u: u32, all: &QuantumCost, t: &QuantumCost) -> Self {
        Self {
            name: cipher.name.clone(),
            parameter: cipher.parameter_exp(),
            block_size: cipher.block_size_exp,
            query_limit: None,
            u,
            gates: all.gates,
            t_gates: t.gates,
            depth: all.depth,
            t_depth: t.depth,
            qubits: all.total_qubits(),
            linear_system_size: None,
        }
    }

    /// `name & block & u & gates & t-gates & depth & t-depth & qubits \\`
    pub fn to_tex(&self) -> String {
        format!(
            "{} & {} & {} & {:.1} & {:.1} & {:.1} & {:.1} & {:.1}\\\\",
            self.name,
            self.block_size,
            self.u,
            self.gates,
            self.t_gates,
            self.depth,
            self.t_depth,
            self.qubits
        )
    }
}

/// Picks `u` for `cipher` by all-gates cost, then re-costs that `u` under T gates.
pub fn offline_row(
    calibration: &dyn CalibrationSource,
    config: &EstimatorConfig,
    cipher: &Cipher,
    query_limit: u32,
) -> Result<ReportRow, SimonError> {
    let model = config.search_model();
    let attack = SimonAttack::new(calibration, model)
        .with_depth_limit(config.depth_limit)
        .with_success_prob(config.success_prob_exp)
        .with_parallel_search(config.parallel_search);

    let best = attack.best_offline(cipher, Some(query_limit))?;
    let t_cost = attack
        .with_model(model.with_metric(CostMetric::TGates))
        .evaluate_single(cipher, best.u)?;
    info!(
        cipher = %cipher.label(),
        query_limit,
        u = best.u,
        gates = best.total.gates,
        "selected guess size"
    );

    Ok(ReportRow {
        query_limit: Some(query_limit),
        linear_system_size: Some(best.linear_system_size),
        ..ReportRow::new(cipher, best.u, &best.total, &t_cost.total)
    })
}

/// Offline Simon rows: every cipher under its own query limit, then every
/// cipher under the unrestricted limit. Ciphers that fail are logged and left
/// out.
pub fn run_offline_report(
    calibration: &dyn CalibrationSource,
    config: &EstimatorConfig,
) -> Vec<ReportRow> {
    let mut rows = Vec::new();
    for limited in [true, false] {
        for cipher in &config.ciphers {
            let query_limit = if limited {
                cipher.query_limit_exp
            } else {
                config.unrestricted_query_limit
            };
            match offline_row(calibration, config, cipher, query_limit) {
                Ok(row) => rows.push(row),
                Err(err) => warn!(cipher = %cipher.label(), query_limit, %err, "skipping cipher"),
            }
        }
    }
    rows
}

/// Grover rows for every cipher in the config, with `u = 0`.
pub fn run_grover_report(
    calibration: &dyn CalibrationSource,
    config: &EstimatorConfig,
) -> Vec<ReportRow> {
    let model = config.search_model();
    config
        .ciphers
        .iter()
        .map(|cipher| {
            let all = evaluate_grover(calibration, cipher, model);
            let t = evaluate_grover(calibration, cipher, model.with_metric(CostMetric::TGates));
            ReportRow::new(cipher, 0, &all, &t)
        })
        .collect()
}

pub fn render_tex(rows: &[ReportRow]) -> String {
    rows.iter().fold(String::new(), |mut out, row| {
        out.push_str(&row.to_tex());
        out.push('\n');
        out
    })
}

const TABLE_HEADER: [&str; 11] = [
    "cipher", "param", "block", "limit", "u", "gates", "t-gates", "depth", "t-depth", "qubits",
    "lin-size",
];

/// Plain aligned table for terminals.
pub fn render_table(rows: &[ReportRow]) -> String {
    let cells: Vec<[String; 11]> = rows
        .iter()
        .map(|row| {
            [
                row.name.clone(),
                row.parameter.to_string(),
                row.block_size.to_string(),
                row.query_limit.map_or_else(|| "-".to_string(), |q| q.to_string()),
                row.u.to_string(),
                format!("{:.1}", row.gates),
                format!("{:.1}", row.t_gates),
                format!("{:.1}", row.depth),
                format!("{:.1}", row.t_depth),
                format!("{:.1}", row.qubits),
                row.linear_system_size
                    .map_or_else(|| "-".to_string(), |n| n.to_string()),
            ]
        })
        .collect();

    let mut widths = TABLE_HEADER.map(str::len);
    for line in &cells {
        for (width, cell) in widths.iter_mut().zip(line) {
            *width = (*width).max(cell.len());
        }
    }

    let mut out = String::new();
    let header = TABLE_HEADER.map(String::from);
    for line in std::iter::once(&header).chain(&cells) {
        let mut fields = line.iter().zip(widths);
        if let Some((name, width)) = fields.next() {
            let _ = write!(out, "{name:<width$}");
        }
        for (cell, width) in fields {
            let _ = write!(out, "  {cell:>width$}");
        }
        out.push('\n');
    }
    out
}

pub fn render_json(rows: &[ReportRow]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(rows)
}
