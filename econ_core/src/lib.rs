//! # econ_core - Water Resources Economics Calculation Engine
//!
//! `econ_core` is the computational heart of EconToolbox, providing the
//! planning-economics calculations used in water resources studies:
//! expected annual damage, storage cost reallocation, interest during
//! construction, cost annualization, recreation benefits, and water
//! demand forecasting. All inputs and outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Fixed Export Layout**: the workbook builder reproduces the
//!   spreadsheet layout analysts already review, cell for cell
//!
//! ## Quick Start
//!
//! ```rust
//! use econ_core::capital_recovery_factor;
//! use econ_core::session::EconSession;
//!
//! // 5% over 30 years
//! let crf = capital_recovery_factor(0.05, 30)?;
//! assert!((crf - 0.0650514).abs() < 1e-6);
//!
//! // Sessions collect inputs and results for export
//! let session = EconSession::new("Jane Analyst", "Reallocation Study");
//! let json = serde_json::to_string_pretty(&session).unwrap();
//! # Ok::<(), econ_core::errors::EconError>(())
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - All economic calculation types
//! - [`session`] - Typed session container for one analysis
//! - [`workbook`] - In-memory workbook model and the fixed export layout
//! - [`export`] - CSV workbook writer with atomic saves
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod errors;
pub mod export;
pub mod session;
pub mod workbook;

// Re-export commonly used types at crate root for convenience
pub use calculations::{
    capital_recovery_factor, ead_trapezoidal, interest_during_construction,
    updated_storage_cost, Timing,
};
pub use errors::{EconError, EconResult};
pub use export::write_workbook;
pub use session::EconSession;
pub use workbook::{build_workbook, Workbook};
