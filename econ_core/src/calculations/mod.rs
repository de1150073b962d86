//! # Economic Calculations
//!
//! All calculation modules follow the same pattern:
//!
//! - plain functions over scalars and slices for the closed-form formulas
//!   (capital recovery, EAD integration, storage cost, IDC);
//! - `*Input` / `*Result` pairs with a pure `calculate(input)` for the
//!   composite workflows (annualizer, UDV, water demand, storage
//!   reallocation).
//!
//! Every function is stateless and side-effect free; inputs are never
//! mutated and calls are independent, so the module is safe to use from
//! any number of threads without synchronization.
//!
//! ## Available Calculations
//!
//! - [`capital_recovery`] - present value to uniform annual payment series
//! - [`ead`] - expected annual damage (trapezoidal integration)
//! - [`storage_cost`] - reservoir storage cost reallocation
//! - [`idc`] - interest during construction
//! - [`annualizer`] - project cost annualization and benefit-cost ratio
//! - [`storage`] - the updated-cost-of-storage workflow
//! - [`udv`] - Unit Day Value recreation benefits
//! - [`water_demand`] - municipal & industrial demand forecasting

pub mod annualizer;
pub mod capital_recovery;
pub mod ead;
pub mod idc;
pub mod storage;
pub mod storage_cost;
pub mod udv;
pub mod water_demand;

// Re-export the four core formulas at the module root
pub use capital_recovery::capital_recovery_factor;
pub use ead::ead_trapezoidal;
pub use idc::{interest_during_construction, Timing};
pub use storage_cost::updated_storage_cost;
