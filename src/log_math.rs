//! Base-2 log-domain arithmetic.
//!
//! Gate counts in this crate run well past 2^100, so every count, depth and
//! probability is carried as its base-2 logarithm. `f64::NEG_INFINITY`
//! encodes the linear value zero and `f64::INFINITY` an unbounded quantity.
//! Sums and differences of such values must go through [`log_add`] and
//! [`log_subtract`]; plain `+` on two logs multiplies the linear values.

use tracing::warn;

/// Once two terms differ by more than this many bits the smaller one is dropped.
pub const LOG_ADD_THRESHOLD: f64 = 10.0;

/// Log-domain encoding of a linear zero.
pub const LOG_ZERO: f64 = f64::NEG_INFINITY;

/// Base-2 logarithm with `log2(x) = -inf` for every `x <= 0`.
pub fn log2(x: f64) -> f64 {
    if x <= 0.0 {
        LOG_ZERO
    } else {
        x.log2()
    }
}

/// Computes `log2(2^x + 2^y)` without leaving the log domain.
pub fn log_add(x: f64, y: f64) -> f64 {
    let (hi, lo) = if x >= y { (x, y) } else { (y, x) };
    if lo == LOG_ZERO || hi == f64::INFINITY {
        return hi;
    }
    if hi - lo > LOG_ADD_THRESHOLD {
        return hi;
    }
    hi + log2(1.0 + (lo - hi).exp2())
}

/// Computes `log2(2^x - 2^y)`.
///
/// A non-positive linear result is clamped to [`LOG_ZERO`]. When `x < y`
/// strictly a warning is emitted; `x == y` is treated as exact cancellation.
pub fn log_subtract(x: f64, y: f64) -> f64 {
    if x < y {
        warn!(
            minuend = x,
            subtrahend = y,
            "negative result from log-domain subtraction, clamping to zero"
        );
    }
    if x <= y {
        return LOG_ZERO;
    }
    if x - y > LOG_ADD_THRESHOLD {
        return x;
    }
    x + log2(1.0 - (y - x).exp2())
}
