//! # Interest During Construction
//!
//! Interest that accrues on capital expenditures made before a project is
//! complete, computed by carrying each expenditure at the monthly rate for
//! the months remaining in the construction window.
//!
//! Two methods are retained as distinct, selectable behaviors:
//!
//! - the per-month accrual loop (default), applied to either an explicit
//!   expenditure schedule or an even spread of the total cost;
//! - a legacy closed-form average-balance approximation
//!   (`total * rate * years / 8`), kept for parity with the simplified
//!   spreadsheet method and reached with `normalize = false` and no
//!   explicit schedule.

use serde::{Deserialize, Serialize};

use crate::errors::{EconError, EconResult};

/// When within its month an expenditure is incurred.
///
/// The tag decides how many months the expenditure accrues interest for:
/// a `Beginning` payment in month `i` of `n` carries for `n - i + 1`
/// months, `End` for `n - i`, and `Middle` for `n - i + 0.5`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Timing {
    /// Payment at the start of the month
    Beginning,
    /// Payment mid-month (the default when no tag is supplied)
    #[default]
    Middle,
    /// Payment at the end of the month
    End,
}

impl Timing {
    fn remaining_months(self, total_months: i32, month: usize) -> f64 {
        let base = (total_months as f64) - (month as f64);
        match self {
            Timing::Beginning => base + 1.0,
            Timing::Middle => base + 0.5,
            Timing::End => base,
        }
    }
}

/// Compute total interest accrued during the construction window.
///
/// * `annual_rate` is a decimal fraction; the accrual uses `annual_rate / 12`
///   per month.
/// * `months <= 0` returns `0.0` by policy - a project with no construction
///   window accrues nothing; this is never an error.
/// * With no `costs`, the total cost is spread evenly over the window: month
///   1 tagged [`Timing::Beginning`], the rest [`Timing::Middle`]. Passing
///   `normalize = false` in this case selects the legacy closed form
///   instead and skips the loop entirely.
/// * With `costs` but no `timings`, every month defaults to
///   [`Timing::Middle`].
///
/// # Errors
///
/// Returns [`EconError::LengthMismatch`] when `costs` and `timings` are both
/// supplied with different lengths.
///
/// # Example
///
/// ```rust
/// use econ_core::calculations::idc::interest_during_construction;
///
/// // Legacy approximation: 1200 * 0.06 * 1 year / 8
/// let idc = interest_during_construction(1200.0, 0.06, 12, None, None, false).unwrap();
/// assert_eq!(idc, 9.0);
/// ```
pub fn interest_during_construction(
    total_initial_cost: f64,
    annual_rate: f64,
    months: i32,
    costs: Option<&[f64]>,
    timings: Option<&[Timing]>,
    normalize: bool,
) -> EconResult<f64> {
    if months <= 0 {
        return Ok(0.0);
    }
    let monthly_rate = annual_rate / 12.0;

    let (schedule_costs, schedule_timings): (Vec<f64>, Vec<Timing>) = match (costs, timings) {
        (None, _) => {
            if !normalize {
                let years = months as f64 / 12.0;
                return Ok(total_initial_cost * annual_rate * years / 8.0);
            }
            let monthly_cost = total_initial_cost / months as f64;
            let mut tags = vec![Timing::Middle; months as usize];
            tags[0] = Timing::Beginning;
            (vec![monthly_cost; months as usize], tags)
        }
        (Some(costs), None) => (costs.to_vec(), vec![Timing::Middle; costs.len()]),
        (Some(costs), Some(timings)) => {
            if costs.len() != timings.len() {
                return Err(EconError::length_mismatch(
                    "timings",
                    costs.len(),
                    timings.len(),
                ));
            }
            (costs.to_vec(), timings.to_vec())
        }
    };

    let mut idc = 0.0;
    for (i, (cost, timing)) in schedule_costs.iter().zip(&schedule_timings).enumerate() {
        let remaining = timing.remaining_months(months, i + 1);
        idc += cost * monthly_rate * remaining;
    }
    Ok(idc)
}
