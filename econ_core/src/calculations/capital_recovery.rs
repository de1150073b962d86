//! # Capital Recovery Factor
//!
//! Converts a present lump sum into an equivalent uniform annual payment
//! series over a fixed number of periods at a given discount rate.
//!
//! ## Example
//!
//! ```rust
//! use econ_core::calculations::capital_recovery::capital_recovery_factor;
//!
//! // 30 years at 2.75%
//! let crf = capital_recovery_factor(0.0275, 30).unwrap();
//! assert!(crf > 0.0275 && crf < 0.06);
//! ```

use crate::errors::{EconError, EconResult};

/// Compute the capital recovery factor for a discount rate and period count.
///
/// `rate` is a decimal fraction (0.05 for 5%), not a percentage.
///
/// For a zero rate the factor degenerates to `1 / periods`. As the period
/// count grows, the factor approaches the rate itself.
///
/// # Errors
///
/// Returns [`EconError::InvalidInput`] when `periods == 0`; there is no
/// payment series to recover over, and the zero-rate branch would divide
/// by zero.
pub fn capital_recovery_factor(rate: f64, periods: u32) -> EconResult<f64> {
    if periods == 0 {
        return Err(EconError::invalid_input(
            "periods",
            periods.to_string(),
            "Period count must be at least 1",
        ));
    }
    if rate == 0.0 {
        return Ok(1.0 / periods as f64);
    }
    let growth = (1.0 + rate).powi(periods as i32);
    Ok(rate * growth / (growth - 1.0))
}
