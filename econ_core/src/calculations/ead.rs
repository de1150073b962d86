//! # Expected Annual Damage
//!
//! Trapezoidal integration of a damage-vs-exceedance-frequency curve, the
//! USACE EM 1110-2-1619 method for flood risk economics.
//!
//! Two layers live here:
//!
//! - [`ead_trapezoidal`] - the bare integration. Deliberately permissive: it
//!   consumes the sequences in the order given and performs no sortedness or
//!   range validation.
//! - [`analyze`] - the dashboard-grade wrapper. Sorts rows by frequency,
//!   collects warnings for suspicious curves, appends a synthetic
//!   zero-frequency tail point when the curve does not reach zero, and
//!   compares every damage scenario against the base scenario.

use serde::{Deserialize, Serialize};

use crate::errors::{EconError, EconResult};

/// Integrate damages over exceedance probabilities with the trapezoidal rule.
///
/// By convention `probabilities` descend from 1.0 toward 0.0; callers that
/// cannot guarantee ordering should go through [`analyze`] instead. With an
/// ascending segment the corresponding term is negative, which is left to
/// the caller to interpret.
///
/// # Errors
///
/// * [`EconError::LengthMismatch`] when the sequences differ in length.
/// * [`EconError::InvalidInput`] when fewer than two points are supplied
///   (no interval to integrate).
///
/// # Example
///
/// ```rust
/// use econ_core::calculations::ead::ead_trapezoidal;
///
/// // Triangle: damage ramps to 100 as frequency falls from 1 to 0.
/// let ead = ead_trapezoidal(&[1.0, 0.0], &[0.0, 100.0]).unwrap();
/// assert_eq!(ead, 50.0);
/// ```
pub fn ead_trapezoidal(probabilities: &[f64], damages: &[f64]) -> EconResult<f64> {
    if probabilities.len() != damages.len() {
        return Err(EconError::length_mismatch(
            "damages",
            probabilities.len(),
            damages.len(),
        ));
    }
    if probabilities.len() < 2 {
        return Err(EconError::invalid_input(
            "probabilities",
            probabilities.len().to_string(),
            "At least two paired points are required",
        ));
    }
    let mut sum = 0.0;
    for i in 0..probabilities.len() - 1 {
        sum += 0.5 * (damages[i] + damages[i + 1]) * (probabilities[i] - probabilities[i + 1]);
    }
    Ok(sum)
}

/// One damage scenario: a named column of damages paired with the shared
/// frequency column.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DamageColumn {
    /// Scenario label (e.g., "Damage 1", "With Project")
    pub name: String,
    /// Damage at each frequency ordinate, in dollars
    pub damages: Vec<f64>,
}

/// Input for a multi-scenario EAD analysis.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EadAnalysisInput {
    /// Exceedance frequencies, one per curve ordinate
    pub frequencies: Vec<f64>,
    /// One or more damage scenarios sharing the frequency column
    pub columns: Vec<DamageColumn>,
}

/// EAD for one scenario, with comparisons against the base (first) scenario.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EadColumnResult {
    /// Scenario label
    pub name: String,
    /// Expected annual damage in dollars
    pub ead: f64,
    /// `ead - base_ead`; `None` for the base scenario itself
    pub difference_from_base: Option<f64>,
    /// Percent change from the base scenario; `None` for the base scenario
    /// or when the base EAD is zero
    pub percent_change_from_base: Option<f64>,
}

/// Results of [`analyze`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EadAnalysis {
    /// Per-scenario results, in input order
    pub columns: Vec<EadColumnResult>,
    /// Label of the base scenario the others are compared against
    pub base_column: String,
    /// Non-fatal data quality warnings
    pub warnings: Vec<String>,
    /// Whether a synthetic zero-frequency point was appended
    pub zero_tail_appended: bool,
}

/// Run the full dashboard EAD workflow on one or more damage scenarios.
///
/// Rows are sorted by frequency, descending. When the smallest frequency is
/// not zero, a zero-frequency point repeating each column's last damage is
/// appended so the integration covers the whole curve. A warning (not an
/// error) is recorded when the largest frequency is not 1.0.
pub fn analyze(input: &EadAnalysisInput) -> EconResult<EadAnalysis> {
    if input.columns.is_empty() {
        return Err(EconError::invalid_input(
            "columns",
            "0",
            "At least one damage column is required",
        ));
    }
    for column in &input.columns {
        if column.damages.len() != input.frequencies.len() {
            return Err(EconError::length_mismatch(
                &column.name,
                input.frequencies.len(),
                column.damages.len(),
            ));
        }
    }

    // Sort row indices by frequency, descending, so out-of-order entry in a
    // form grid cannot flip the sign of the integral.
    let mut order: Vec<usize> = (0..input.frequencies.len()).collect();
    order.sort_by(|&a, &b| {
        input.frequencies[b]
            .partial_cmp(&input.frequencies[a])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut frequencies: Vec<f64> = order.iter().map(|&i| input.frequencies[i]).collect();

    let mut warnings = Vec::new();
    if let Some(&first) = frequencies.first() {
        if (first - 1.0).abs() > 1e-9 {
            warnings.push(format!(
                "Frequencies should start at 1 and decrease to 0; largest frequency is {first}"
            ));
        }
    }

    let zero_tail_appended = frequencies.last().is_some_and(|&f| f != 0.0);
    if zero_tail_appended {
        frequencies.push(0.0);
    }

    let mut results = Vec::with_capacity(input.columns.len());
    for column in &input.columns {
        let mut damages: Vec<f64> = order.iter().map(|&i| column.damages[i]).collect();
        if zero_tail_appended {
            // Repeat the rarest-event damage so the tail trapezoid is flat.
            let last = *damages.last().unwrap_or(&0.0);
            damages.push(last);
        }
        let ead = ead_trapezoidal(&frequencies, &damages)?;
        results.push((column.name.clone(), ead));
    }

    let base_ead = results[0].1;
    let base_column = results[0].0.clone();
    let columns = results
        .into_iter()
        .enumerate()
        .map(|(i, (name, ead))| {
            let (difference, percent) = if i == 0 {
                (None, None)
            } else {
                let diff = ead - base_ead;
                let pct = if base_ead != 0.0 {
                    Some(diff / base_ead * 100.0)
                } else {
                    None
                };
                (Some(diff), pct)
            };
            EadColumnResult {
                name,
                ead,
                difference_from_base: difference,
                percent_change_from_base: percent,
            }
        })
        .collect();

    Ok(EadAnalysis {
        columns,
        base_column,
        warnings,
        zero_tail_appended,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_trapezoid_triangle_area() {
        let ead = ead_trapezoidal(&[1.0, 0.0], &[0.0, 100.0]).unwrap();
        assert_eq!(ead, 50.0);
    }

    #[test]
    fn test_multi_point_curve() {
        let probabilities = [1.0, 0.5, 0.2, 0.0];
        let damages = [0.0, 10_000.0, 40_000.0, 80_000.0];
        // 0.5*(0+10000)*0.5 + 0.5*(10000+40000)*0.3 + 0.5*(40000+80000)*0.2
        let expected = 2_500.0 + 7_500.0 + 12_000.0;
        let ead = ead_trapezoidal(&probabilities, &damages).unwrap();
        assert!((ead - expected).abs() < 1e-9);
    }

    #[test]
    fn test_reversed_sequences_flip_sign() {
        let probabilities = [1.0, 0.5, 0.0];
        let damages = [0.0, 40.0, 100.0];
        let forward = ead_trapezoidal(&probabilities, &damages).unwrap();

        let rev_p: Vec<f64> = probabilities.iter().rev().copied().collect();
        let rev_d: Vec<f64> = damages.iter().rev().copied().collect();
        let backward = ead_trapezoidal(&rev_p, &rev_d).unwrap();

        assert!((forward + backward).abs() < 1e-12);
    }

    #[test]
    fn test_length_mismatch_is_an_error() {
        let err = ead_trapezoidal(&[1.0, 0.5, 0.0], &[0.0, 10.0]).unwrap_err();
        assert_eq!(err.error_code(), "LENGTH_MISMATCH");
    }

    #[test]
    fn test_too_few_points_is_an_error() {
        let err = ead_trapezoidal(&[1.0], &[0.0]).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    fn sample_input() -> EadAnalysisInput {
        EadAnalysisInput {
            frequencies: vec![1.0, 0.5, 0.2, 0.1],
            columns: vec![
                DamageColumn {
                    name: "Damage 1".to_string(),
                    damages: vec![0.0, 10_000.0, 40_000.0, 80_000.0],
                },
                DamageColumn {
                    name: "Damage 2".to_string(),
                    damages: vec![0.0, 12_000.0, 48_000.0, 96_000.0],
                },
            ],
        }
    }

    #[test]
    fn test_analyze_appends_zero_tail() {
        let analysis = analyze(&sample_input()).unwrap();
        assert!(analysis.zero_tail_appended);

        // Tail trapezoid is flat at the last damage value:
        // base curve + 0.5*(80000+80000)*(0.1-0.0)
        let base_ead =
            ead_trapezoidal(&[1.0, 0.5, 0.2, 0.1], &[0.0, 10_000.0, 40_000.0, 80_000.0]).unwrap();
        let expected = base_ead + 8_000.0;
        assert!((analysis.columns[0].ead - expected).abs() < 1e-9);
    }

    #[test]
    fn test_analyze_compares_against_base() {
        let analysis = analyze(&sample_input()).unwrap();
        assert_eq!(analysis.base_column, "Damage 1");
        assert!(analysis.columns[0].difference_from_base.is_none());

        let base = analysis.columns[0].ead;
        let other = &analysis.columns[1];
        // Damage 2 is the base curve scaled by 1.2.
        assert!((other.ead - base * 1.2).abs() < 1e-9);
        assert!((other.difference_from_base.unwrap() - base * 0.2).abs() < 1e-9);
        assert!((other.percent_change_from_base.unwrap() - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_analyze_sorts_rows_and_warns_on_partial_curve() {
        let input = EadAnalysisInput {
            frequencies: vec![0.2, 0.5],
            columns: vec![DamageColumn {
                name: "Damage 1".to_string(),
                damages: vec![40_000.0, 10_000.0],
            }],
        };
        let analysis = analyze(&input).unwrap();
        assert_eq!(analysis.warnings.len(), 1);

        // Sorted descending with a zero tail: [0.5, 0.2, 0.0] against
        // [10000, 40000, 40000].
        let expected =
            ead_trapezoidal(&[0.5, 0.2, 0.0], &[10_000.0, 40_000.0, 40_000.0]).unwrap();
        assert!((analysis.columns[0].ead - expected).abs() < 1e-9);
    }

    #[test]
    fn test_analyze_column_length_mismatch() {
        let mut input = sample_input();
        input.columns[1].damages.pop();
        assert!(analyze(&input).is_err());
    }

    #[test]
    fn test_serialization() {
        let analysis = analyze(&sample_input()).unwrap();
        let json = serde_json::to_string_pretty(&analysis).unwrap();
        let roundtrip: EadAnalysis = serde_json::from_str(&json).unwrap();
        assert_eq!(analysis, roundtrip);
    }
}
