//! # Updated Storage Cost
//!
//! Joint-cost reallocation for reservoir storage: the share of updated
//! construction cost assigned to a volume of reallocated storage.

use crate::errors::{EconError, EconResult};

/// Compute the updated cost of reallocated storage.
///
/// `(total_cost - storage_price) * storage_reallocated / total_usable_storage`
///
/// Negative inputs are mathematically valid and are not rejected; a
/// negative result simply means the updated cost fell below the original
/// storage price.
///
/// # Errors
///
/// Returns [`EconError::InvalidInput`] when `total_usable_storage == 0`,
/// surfaced explicitly rather than propagated as infinity or NaN.
///
/// # Example
///
/// ```rust
/// use econ_core::calculations::storage_cost::updated_storage_cost;
///
/// let cost = updated_storage_cost(100.0, 20.0, 50.0, 100.0).unwrap();
/// assert_eq!(cost, 40.0);
/// ```
pub fn updated_storage_cost(
    total_cost: f64,
    storage_price: f64,
    storage_reallocated: f64,
    total_usable_storage: f64,
) -> EconResult<f64> {
    if total_usable_storage == 0.0 {
        return Err(EconError::invalid_input(
            "total_usable_storage",
            total_usable_storage.to_string(),
            "Total usable storage must be non-zero",
        ));
    }
    Ok((total_cost - storage_price) * storage_reallocated / total_usable_storage)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_value() {
        assert_eq!(updated_storage_cost(100.0, 20.0, 50.0, 100.0).unwrap(), 40.0);
    }

    #[test]
    fn test_zero_usable_storage_is_an_error() {
        let err = updated_storage_cost(100.0, 20.0, 50.0, 0.0).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_negative_inputs_pass_through() {
        // Storage price above total cost gives a negative reallocated cost.
        let cost = updated_storage_cost(100.0, 150.0, 50.0, 100.0).unwrap();
        assert_eq!(cost, -25.0);
    }
}
