//! # Storage Reallocation Workflow
//!
//! The multi-step "Updated Cost of Storage" workflow: storage capacity
//! percentages, joint O&M, cost updates to the current price level, RR&R
//! and mitigation annualization, and the combined total annual cost of a
//! reallocation under two discounting scenarios.

use serde::{Deserialize, Serialize};

use crate::calculations::capital_recovery::capital_recovery_factor;
use crate::errors::EconResult;

/// Conservation storage volumes for the reallocation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StorageCapacity {
    /// Total usable conservation storage (STot), acre-feet
    pub total_usable_af: f64,
    /// Storage volume proposed for reallocation (SRec), acre-feet
    pub recommendation_af: f64,
}

impl StorageCapacity {
    /// Percent of total conservation storage (P), as a fraction.
    ///
    /// Zero when no usable storage is entered, so a blank form does not
    /// divide by zero.
    pub fn conservation_fraction(&self) -> f64 {
        if self.total_usable_af == 0.0 {
            0.0
        } else {
            self.recommendation_af / self.total_usable_af
        }
    }
}

/// Annual joint operations and maintenance costs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JointOm {
    /// Joint operations cost, dollars per year
    pub operations: f64,
    /// Joint maintenance cost, dollars per year
    pub maintenance: f64,
}

impl JointOm {
    /// Total joint O&M per year.
    pub fn total(&self) -> f64 {
        self.operations + self.maintenance
    }
}

/// One joint-use cost category updated to the current price level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdatedCostEntry {
    /// Cost category (e.g., "Lands and Damages", "Relocations", "Dam")
    pub category: String,
    /// Original cost in actual dollars
    pub actual_cost: f64,
    /// CWCCIS update factor to the current price level
    pub update_factor: f64,
}

impl UpdatedCostEntry {
    /// Actual cost carried to the current price level.
    pub fn updated_cost(&self) -> f64 {
        self.actual_cost * self.update_factor
    }
}

/// Total updated cost of storage (CTot) across all categories.
pub fn total_updated_cost(entries: &[UpdatedCostEntry]) -> f64 {
    entries.iter().map(|e| e.updated_cost()).sum()
}

/// A future rehabilitation, replacement, or mitigation cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RrrCostEntry {
    pub item: String,
    /// Cost in dollars at the year incurred
    pub future_cost: f64,
    /// Calendar year the cost is incurred
    pub year: i32,
}

/// Inputs for RR&R and mitigation annualization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RrrInput {
    /// Federal discount rate, percent
    pub discount_rate_pct: f64,
    /// Analysis period in years
    pub analysis_years: u32,
    /// CWCCI ratio applied to the total present value
    pub cwcci_ratio: f64,
    /// Year the costs are discounted to
    pub base_year: i32,
    pub entries: Vec<RrrCostEntry>,
}

/// An RR&R entry discounted to the base year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RrrEntryDetail {
    pub item: String,
    pub future_cost: f64,
    pub year: i32,
    /// `(1 + rate)^-(year - base_year)`
    pub pv_factor: f64,
    pub present_value: f64,
}

/// Results of RR&R annualization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RrrResult {
    pub details: Vec<RrrEntryDetail>,
    /// Sum of present values
    pub total_pv: f64,
    /// `total_pv * cwcci_ratio`
    pub updated_cost: f64,
    /// `updated_cost * CRF(rate, analysis_years)`
    pub annualized: f64,
}

/// Discount every RR&R entry to the base year and annualize the updated
/// total with a capital recovery factor.
///
/// # Errors
///
/// Returns [`crate::errors::EconError::InvalidInput`] when
/// `analysis_years == 0` (propagated from the capital recovery factor).
pub fn annualize_rrr(input: &RrrInput) -> EconResult<RrrResult> {
    let rate = input.discount_rate_pct / 100.0;
    let details: Vec<RrrEntryDetail> = input
        .entries
        .iter()
        .map(|entry| {
            let pv_factor = (1.0 + rate).powi(-(entry.year - input.base_year));
            RrrEntryDetail {
                item: entry.item.clone(),
                future_cost: entry.future_cost,
                year: entry.year,
                pv_factor,
                present_value: entry.future_cost * pv_factor,
            }
        })
        .collect();
    let total_pv: f64 = details.iter().map(|d| d.present_value).sum();
    let updated_cost = total_pv * input.cwcci_ratio;
    let crf = capital_recovery_factor(rate, input.analysis_years)?;
    Ok(RrrResult {
        details,
        total_pv,
        updated_cost,
        annualized: updated_cost * crf,
    })
}

/// Discounting assumptions for one total-annual-cost scenario.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostScenario {
    /// Discount rate used to annualize storage costs, percent
    pub discount_rate_pct: f64,
    /// Years over which storage costs are annualized
    pub analysis_years: u32,
}

/// Two-scenario input for the total annual cost of reallocation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TotalAnnualCostInput {
    pub scenario1: CostScenario,
    pub scenario2: CostScenario,
}

/// Annual cost components for one scenario.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioCost {
    /// Annualized storage capital cost: `CTot * P * CRF`
    pub capital: f64,
    /// Joint O&M scaled by the storage fraction
    pub om: f64,
    /// Annualized RR&R/mitigation scaled by the storage fraction
    pub rrr: f64,
    /// Sum of the above
    pub total: f64,
}

/// Combined total annual cost of the reallocation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TotalAnnualCostResult {
    /// Percent of total conservation storage (P), as a fraction
    pub conservation_fraction: f64,
    /// Cost of the storage recommendation: `CTot * P`
    pub storage_recommendation_cost: f64,
    pub scenario1: ScenarioCost,
    pub scenario2: ScenarioCost,
}

/// Combine capital, O&M, and RR&R/mitigation into the annual cost of the
/// reallocation. RR&R enters scenario 1 only; scenario 2 is the
/// no-mitigation comparison, as on the source spreadsheet.
pub fn total_annual_cost(
    conservation_fraction: f64,
    updated_cost_total: f64,
    joint_om_total: f64,
    rrr_annualized: f64,
    input: &TotalAnnualCostInput,
) -> EconResult<TotalAnnualCostResult> {
    let p = conservation_fraction;
    let om_scaled = joint_om_total * p;

    let scenario = |s: &CostScenario, rrr_scaled: f64| -> EconResult<ScenarioCost> {
        let crf = capital_recovery_factor(s.discount_rate_pct / 100.0, s.analysis_years)?;
        let capital = updated_cost_total * p * crf;
        Ok(ScenarioCost {
            capital,
            om: om_scaled,
            rrr: rrr_scaled,
            total: capital + om_scaled + rrr_scaled,
        })
    };

    Ok(TotalAnnualCostResult {
        conservation_fraction: p,
        storage_recommendation_cost: updated_cost_total * p,
        scenario1: scenario(&input.scenario1, rrr_annualized * p)?,
        scenario2: scenario(&input.scenario2, 0.0)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conservation_fraction() {
        let capacity = StorageCapacity {
            total_usable_af: 100.0,
            recommendation_af: 50.0,
        };
        assert_eq!(capacity.conservation_fraction(), 0.5);

        let empty = StorageCapacity {
            total_usable_af: 0.0,
            recommendation_af: 50.0,
        };
        assert_eq!(empty.conservation_fraction(), 0.0);
    }

    #[test]
    fn test_joint_om_total() {
        let om = JointOm {
            operations: 10.0,
            maintenance: 5.0,
        };
        assert_eq!(om.total(), 15.0);
    }

    #[test]
    fn test_updated_cost_table() {
        let entries = vec![
            UpdatedCostEntry {
                category: "Lands and Damages".to_string(),
                actual_cost: 1000.0,
                update_factor: 2.5,
            },
            UpdatedCostEntry {
                category: "Dam".to_string(),
                actual_cost: 4000.0,
                update_factor: 3.0,
            },
        ];
        assert_eq!(entries[0].updated_cost(), 2500.0);
        assert_eq!(total_updated_cost(&entries), 14_500.0);
    }

    #[test]
    fn test_rrr_discounting_and_annualization() {
        let input = RrrInput {
            discount_rate_pct: 5.0,
            analysis_years: 30,
            cwcci_ratio: 1.2,
            base_year: 2020,
            entries: vec![
                RrrCostEntry {
                    item: "Gate replacement".to_string(),
                    future_cost: 100_000.0,
                    year: 2030,
                },
                RrrCostEntry {
                    item: "Mitigation".to_string(),
                    future_cost: 50_000.0,
                    year: 2020,
                },
            ],
        };
        let result = annualize_rrr(&input).unwrap();

        let pv_factor = 1.0 / 1.05_f64.powi(10);
        assert!((result.details[0].pv_factor - pv_factor).abs() < 1e-12);
        // A base-year cost is not discounted at all.
        assert_eq!(result.details[1].pv_factor, 1.0);

        let total_pv = 100_000.0 * pv_factor + 50_000.0;
        assert!((result.total_pv - total_pv).abs() < 1e-6);
        assert!((result.updated_cost - total_pv * 1.2).abs() < 1e-6);

        let crf = capital_recovery_factor(0.05, 30).unwrap();
        assert!((result.annualized - result.updated_cost * crf).abs() < 1e-9);
    }

    #[test]
    fn test_rrr_zero_analysis_years_is_an_error() {
        let input = RrrInput {
            discount_rate_pct: 5.0,
            analysis_years: 0,
            cwcci_ratio: 1.0,
            base_year: 2020,
            entries: vec![],
        };
        assert!(annualize_rrr(&input).is_err());
    }

    #[test]
    fn test_total_annual_cost_scenarios() {
        let input = TotalAnnualCostInput {
            scenario1: CostScenario {
                discount_rate_pct: 5.0,
                analysis_years: 30,
            },
            scenario2: CostScenario {
                discount_rate_pct: 6.0,
                analysis_years: 40,
            },
        };
        let result = total_annual_cost(0.5, 3.0, 15.0, 10.0, &input).unwrap();

        assert_eq!(result.conservation_fraction, 0.5);
        assert_eq!(result.storage_recommendation_cost, 1.5);

        let crf1 = capital_recovery_factor(0.05, 30).unwrap();
        let crf2 = capital_recovery_factor(0.06, 40).unwrap();
        assert!((result.scenario1.capital - 1.5 * crf1).abs() < 1e-12);
        assert!((result.scenario2.capital - 1.5 * crf2).abs() < 1e-12);

        // O&M is scaled into both scenarios; RR&R only into the first.
        assert_eq!(result.scenario1.om, 7.5);
        assert_eq!(result.scenario2.om, 7.5);
        assert_eq!(result.scenario1.rrr, 5.0);
        assert_eq!(result.scenario2.rrr, 0.0);

        assert!(
            (result.scenario1.total - (result.scenario1.capital + 7.5 + 5.0)).abs() < 1e-12
        );
        assert!((result.scenario2.total - (result.scenario2.capital + 7.5)).abs() < 1e-12);
    }

    #[test]
    fn test_serialization() {
        let input = RrrInput {
            discount_rate_pct: 5.0,
            analysis_years: 30,
            cwcci_ratio: 1.0,
            base_year: 2020,
            entries: vec![RrrCostEntry {
                item: "A".to_string(),
                future_cost: 100.0,
                year: 2020,
            }],
        };
        let result = annualize_rrr(&input).unwrap();
        let json = serde_json::to_string_pretty(&result).unwrap();
        let roundtrip: RrrResult = serde_json::from_str(&json).unwrap();
        assert_eq!(result, roundtrip);
    }
}
