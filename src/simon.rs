//! Offline Simon attack: cost at a fixed number of guessed bits, and the
//! search for the cheapest choice.
//!
//! The attack queries the cipher on `2^u` inputs once, stores the answers in a
//! superposed database, then runs Grover over the remaining key bits. Each
//! Grover iterate evaluates the cipher on a linear system's worth of
//! instances in parallel and tests the resulting matrix for full rank.
//! Iterates that do not fit in the depth budget are spread over parallel
//! machines.

use std::f64::consts::{E, PI};

use rayon::prelude::*;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::calibration::{table_key, CalibrationSource, TableId};
use crate::cipher::{Cipher, CipherType};
use crate::cost::{CostModel, QuantumCost};
use crate::estimators::{dummy_key_cost, lookup_cost, rank_cost};
use crate::log_math::{log2, log_subtract, LOG_ZERO};

/// Default depth budget, log2.
pub const DEFAULT_DEPTH_LIMIT: f64 = 1000.0;

/// Default failure probability, log2.
pub const DEFAULT_SUCCESS_PROB_EXP: f64 = -2.0;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimonError {
    #[error("success probability exponent must be negative, got {0}")]
    InvalidSuccessProbability(f64),

    #[error("cipher query depth 2^{depth:.2} exceeds depth limit 2^{limit:.2}")]
    CipherExceedsDepthLimit { depth: f64, limit: f64 },

    #[error("u = {u} exceeds block size {block_size}")]
    InvalidQueryParameter { u: u32, block_size: u32 },

    #[error("{0}: unknown cipher type")]
    UnknownCipherType(String),

    #[error("setup depth 2^{setup_depth:.2} uses the whole depth limit 2^{limit:.2}")]
    DepthBudgetExhausted { setup_depth: f64, limit: f64 },

    #[error("{cipher}: no u in 0..={max_u} fits the depth limit")]
    NoFeasibleCandidate { cipher: String, max_u: u32 },
}

impl SimonError {
    /// True for errors that rule out one choice of u but say nothing about
    /// the others.
    pub fn is_candidate_infeasible(&self) -> bool {
        matches!(
            self,
            SimonError::CipherExceedsDepthLimit { .. } | SimonError::DepthBudgetExhausted { .. }
        )
    }
}

/// Cost breakdown of one attack.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SimonAttackCost {
    /// Guessed bits; the attack makes `2^u` classical queries.
    pub u: u32,
    pub setup: QuantumCost,
    pub rank: QuantumCost,
    pub total: QuantumCost,
    /// Cipher instances per oracle call, i.e. equations in the linear system.
    pub linear_system_size: f64,
}

/// Equations needed for the linear system to have full rank with failure
/// probability `2^success_prob_exp`.
pub fn linear_system_size(cipher: &Cipher, success_prob_exp: f64) -> f64 {
    f64::from(cipher.block_size_exp) + f64::from(cipher.key_size_exp) - success_prob_exp + 4.0
}

/// Bits per stored database word for a system of `linear_system_size` equations.
pub fn word_size(linear_system_size: f64) -> f64 {
    (4.0 * E * linear_system_size).log2().ceil()
}

/// Offline Simon estimator bound to a calibration source and cost model.
#[derive(Clone, Copy)]
pub struct SimonAttack<'a> {
    calibration: &'a dyn CalibrationSource,
    model: CostModel,
    depth_limit: f64,
    success_prob_exp: f64,
    parallel: bool,
}

impl<'a> SimonAttack<'a> {
    pub fn new(calibration: &'a dyn CalibrationSource, model: CostModel) -> Self {
        Self {
            calibration,
            model,
            depth_limit: DEFAULT_DEPTH_LIMIT,
            success_prob_exp: DEFAULT_SUCCESS_PROB_EXP,
            parallel: true,
        }
    }

    pub fn with_depth_limit(mut self, depth_limit: f64) -> Self {
        self.depth_limit = depth_limit;
        self
    }

    pub fn with_success_prob(mut self, success_prob_exp: f64) -> Self {
        self.success_prob_exp = success_prob_exp;
        self
    }

    /// Spread the u scan over the rayon pool. Results do not depend on it.
    pub fn with_parallel_search(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Same settings under a different model.
    pub fn with_model(mut self, model: CostModel) -> Self {
        self.model = model;
        self
    }

    pub fn model(&self) -> CostModel {
        self.model
    }

    /// Cost of one superposed cipher query after `u` bits have been guessed.
    ///
    /// Key qubits are excluded from the ancilla; [`dummy_key_cost`] holds them.
    pub fn query_cost(&self, cipher: &Cipher, u: u32, word_size: f64) -> QuantumCost {
        let input_size_log = log2(f64::from(u) + word_size);
        let mut cost = self
            .calibration
            .lookup(
                &TableId::cipher(cipher.name.as_str(), self.model.metric),
                &cipher.parameter_exp().to_string(),
                Some(&table_key(f64::from(u))),
                input_size_log,
                false,
            )
            .unwrap_or_else(|| QuantumCost::width_only(input_size_log));
        cost.ancilla = log_subtract(cost.ancilla, log2(f64::from(cipher.key_size_exp)));
        cost
    }

    /// Full attack cost for a fixed `u`.
    pub fn evaluate_single(&self, cipher: &Cipher, u: u32) -> Result<SimonAttackCost, SimonError> {
        // NaN fails this too
        if !(self.success_prob_exp < 0.0) {
            return Err(SimonError::InvalidSuccessProbability(self.success_prob_exp));
        }

        let lin = linear_system_size(cipher, self.success_prob_exp);
        let word = word_size(lin);
        let query = self.query_cost(cipher, u, word);

        if query.depth > self.depth_limit {
            return Err(SimonError::CipherExceedsDepthLimit {
                depth: query.depth,
                limit: self.depth_limit,
            });
        }
        if u > cipher.block_size_exp {
            return Err(SimonError::InvalidQueryParameter {
                u,
                block_size: cipher.block_size_exp,
            });
        }

        let block = f64::from(cipher.block_size_exp);
        let guessed = f64::from(u);
        let total_iterates = match cipher.cipher_type {
            CipherType::EvenMansour => {
                if cipher.key_size_exp > 0 {
                    warn!(
                        cipher = %cipher.label(),
                        key_size = cipher.key_size_exp,
                        "Even-Mansour cipher given a non-zero key size"
                    );
                }
                (block - guessed) / 2.0 + log2(PI / 2.0)
            }
            CipherType::Fx => {
                (block - guessed + f64::from(cipher.key_size_exp)) / 2.0 + log2(PI / 2.0)
            }
            CipherType::Unknown => return Err(SimonError::UnknownCipherType(cipher.label())),
        };

        let log_lin = log2(lin);
        let setup = lookup_cost(guessed, word, self.model.metric).parallel_repeat(log_lin);

        let rank = rank_cost(self.calibration, self.model.metric, log_lin, log2(guessed));
        let oracle = dummy_key_cost(cipher)
            .parallel(&query.parallel_repeat(log_lin))
            .sequential(&rank);

        let remaining = log_subtract(self.depth_limit, setup.depth);
        if remaining == LOG_ZERO {
            return Err(SimonError::DepthBudgetExhausted {
                setup_depth: setup.depth,
                limit: self.depth_limit,
            });
        }
        let grover_depth = (remaining - oracle.depth).min(total_iterates);
        // k times fewer sequential iterates needs k^2 machines
        let machines = 2.0 * (total_iterates - grover_depth);
        let grover = oracle.sequential_repeat(grover_depth).parallel_repeat(machines);

        Ok(SimonAttackCost {
            u,
            setup,
            rank,
            total: setup.sequential(&grover),
            linear_system_size: lin,
        })
    }

    /// Cheapest attack over `u` in `0..=min(query_limit_exp, block size)`.
    ///
    /// Ties go to the smaller `u`. Choices of `u` that do not fit the depth
    /// limit are skipped; any other error aborts the search.
    pub fn best_offline(
        &self,
        cipher: &Cipher,
        query_limit_exp: Option<u32>,
    ) -> Result<SimonAttackCost, SimonError> {
        let max_u = query_limit_exp.map_or(cipher.block_size_exp, |q| q.min(cipher.block_size_exp));
        let evaluate = |u: u32| (u, self.evaluate_single(cipher, u));
        let results: Vec<_> = if self.parallel {
            (0..=max_u).into_par_iter().map(evaluate).collect()
        } else {
            (0..=max_u).map(evaluate).collect()
        };

        let mut best: Option<SimonAttackCost> = None;
        let mut best_total = QuantumCost::max_cost();
        for (u, result) in results {
            match result {
                Ok(cost) => {
                    if self.model.is_cheaper(&cost.total, &best_total) {
                        best_total = cost.total;
                        best = Some(cost);
                    }
                }
                Err(err) if err.is_candidate_infeasible() => {
                    debug!(cipher = %cipher.label(), u, %err, "skipping u");
                }
                Err(err) => return Err(err),
            }
        }
        best.ok_or_else(|| SimonError::NoFeasibleCandidate {
            cipher: cipher.label(),
            max_u,
        })
    }
}
