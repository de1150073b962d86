//! # Project Cost Annualizer
//!
//! Rolls first costs, interest during construction, and discounted future
//! costs into a total investment, annualizes it with a capital recovery
//! factor, and reports the benefit-cost ratio.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::calculations::capital_recovery::capital_recovery_factor;
use crate::calculations::idc::{interest_during_construction, Timing};
use crate::errors::EconResult;

/// How construction expenditures are distributed for the IDC accrual.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum IdcDistribution {
    /// Spread the initial cost evenly over the construction window
    Normalized,
    /// Explicit per-month expenditures with timing tags
    PerPeriod {
        costs: Vec<f64>,
        timings: Vec<Timing>,
    },
}

impl fmt::Display for IdcDistribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdcDistribution::Normalized => write!(f, "Normalize over construction period"),
            IdcDistribution::PerPeriod { .. } => write!(f, "Specify per-period costs"),
        }
    }
}

/// A planned expenditure after the base year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FutureCost {
    /// Cost in dollars at the year incurred
    pub cost: f64,
    /// Calendar year the cost is incurred
    pub year: i32,
}

/// A future cost discounted back to the base year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FutureCostDetail {
    pub cost: f64,
    pub year: i32,
    /// `(1 + rate)^-(year - base_year)`
    pub pv_factor: f64,
    pub present_value: f64,
}

/// Input parameters for the annualizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnualizerInput {
    /// Project first cost in dollars
    pub first_cost: f64,
    /// Real estate cost in dollars
    pub real_estate_cost: f64,
    /// Planning, engineering, and design cost in dollars
    pub ped_cost: f64,
    /// Monitoring cost in dollars
    pub monitoring_cost: f64,
    /// Interest rate for IDC, in percent
    pub idc_rate_pct: f64,
    /// Construction period in months
    pub construction_months: i32,
    /// IDC expenditure distribution
    pub idc_distribution: IdcDistribution,
    /// Annual operations and maintenance cost in dollars
    pub annual_om: f64,
    /// Annual benefits in dollars
    pub annual_benefits: f64,
    /// Base year costs are discounted to
    pub base_year: i32,
    /// Discount rate for future costs and annualization, in percent
    pub discount_rate_pct: f64,
    /// Period of analysis in years
    pub analysis_years: u32,
    /// Planned future costs
    pub future_costs: Vec<FutureCost>,
}

impl AnnualizerInput {
    /// Sum of the four up-front cost components.
    pub fn initial_cost(&self) -> f64 {
        self.first_cost + self.real_estate_cost + self.ped_cost + self.monitoring_cost
    }
}

/// Results of the annualizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnualizerResult {
    /// Interest during construction in dollars
    pub idc: f64,
    /// Future costs discounted to the base year
    pub future_details: Vec<FutureCostDetail>,
    /// Sum of future-cost present values
    pub pv_future: f64,
    /// Initial cost + IDC + PV of future costs
    pub total_investment: f64,
    /// Capital recovery factor used for annualization
    pub crf: f64,
    /// Annualized investment plus annual O&M
    pub annual_cost: f64,
    /// Benefit-cost ratio; `None` when the annual cost is zero
    pub bcr: Option<f64>,
}

/// Annualize a project's costs and compute its benefit-cost ratio.
///
/// The period of analysis is floored at one year, matching the source
/// spreadsheet, so a degenerate input cannot make the capital recovery
/// factor undefined.
pub fn calculate(input: &AnnualizerInput) -> EconResult<AnnualizerResult> {
    let initial_cost = input.initial_cost();
    let idc_rate = input.idc_rate_pct / 100.0;

    let idc = match &input.idc_distribution {
        IdcDistribution::Normalized => interest_during_construction(
            initial_cost,
            idc_rate,
            input.construction_months,
            None,
            None,
            true,
        )?,
        IdcDistribution::PerPeriod { costs, timings } => interest_during_construction(
            initial_cost,
            idc_rate,
            input.construction_months,
            Some(costs),
            Some(timings),
            false,
        )?,
    };

    let discount_rate = input.discount_rate_pct / 100.0;
    let future_details: Vec<FutureCostDetail> = input
        .future_costs
        .iter()
        .map(|fc| {
            let pv_factor = (1.0 + discount_rate).powi(-(fc.year - input.base_year));
            FutureCostDetail {
                cost: fc.cost,
                year: fc.year,
                pv_factor,
                present_value: fc.cost * pv_factor,
            }
        })
        .collect();
    let pv_future: f64 = future_details.iter().map(|d| d.present_value).sum();

    let total_investment = initial_cost + idc + pv_future;
    let crf = capital_recovery_factor(discount_rate, input.analysis_years.max(1))?;
    let annual_cost = total_investment * crf + input.annual_om;
    let bcr = if annual_cost == 0.0 {
        None
    } else {
        Some(input.annual_benefits / annual_cost)
    };

    Ok(AnnualizerResult {
        idc,
        future_details,
        pv_future,
        total_investment,
        crf,
        annual_cost,
        bcr,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_input() -> AnnualizerInput {
        AnnualizerInput {
            first_cost: 1_000_000.0,
            real_estate_cost: 100_000.0,
            ped_cost: 50_000.0,
            monitoring_cost: 0.0,
            idc_rate_pct: 6.0,
            construction_months: 12,
            idc_distribution: IdcDistribution::Normalized,
            annual_om: 25_000.0,
            annual_benefits: 120_000.0,
            base_year: 2025,
            discount_rate_pct: 5.0,
            analysis_years: 50,
            future_costs: vec![],
        }
    }

    #[test]
    fn test_initial_cost_sums_components() {
        assert_eq!(base_input().initial_cost(), 1_150_000.0);
    }

    #[test]
    fn test_idc_matches_core_routine() {
        let input = base_input();
        let result = calculate(&input).unwrap();
        let expected =
            interest_during_construction(1_150_000.0, 0.06, 12, None, None, true).unwrap();
        assert_eq!(result.idc, expected);
    }

    #[test]
    fn test_future_costs_are_discounted() {
        let mut input = base_input();
        input.future_costs = vec![FutureCost {
            cost: 100_000.0,
            year: 2035,
        }];
        let result = calculate(&input).unwrap();

        let pv_factor = 1.0 / 1.05_f64.powi(10);
        assert!((result.future_details[0].pv_factor - pv_factor).abs() < 1e-12);
        assert!((result.pv_future - 100_000.0 * pv_factor).abs() < 1e-6);
        assert!(
            (result.total_investment - (1_150_000.0 + result.idc + result.pv_future)).abs()
                < 1e-9
        );
    }

    #[test]
    fn test_annual_cost_and_bcr() {
        let input = base_input();
        let result = calculate(&input).unwrap();
        let expected_annual = result.total_investment * result.crf + 25_000.0;
        assert!((result.annual_cost - expected_annual).abs() < 1e-9);
        let bcr = result.bcr.unwrap();
        assert!((bcr - 120_000.0 / expected_annual).abs() < 1e-12);
    }

    #[test]
    fn test_zero_annual_cost_gives_no_bcr() {
        let input = AnnualizerInput {
            first_cost: 0.0,
            real_estate_cost: 0.0,
            ped_cost: 0.0,
            monitoring_cost: 0.0,
            idc_rate_pct: 0.0,
            construction_months: 0,
            idc_distribution: IdcDistribution::Normalized,
            annual_om: 0.0,
            annual_benefits: 50_000.0,
            base_year: 2025,
            discount_rate_pct: 5.0,
            analysis_years: 50,
            future_costs: vec![],
        };
        let result = calculate(&input).unwrap();
        assert_eq!(result.annual_cost, 0.0);
        assert!(result.bcr.is_none());
    }

    #[test]
    fn test_zero_analysis_years_is_floored_to_one() {
        let mut input = base_input();
        input.analysis_years = 0;
        let result = calculate(&input).unwrap();
        assert!((result.crf - 1.05).abs() < 1e-12);
    }

    #[test]
    fn test_per_period_schedule() {
        let mut input = base_input();
        input.construction_months = 3;
        input.idc_distribution = IdcDistribution::PerPeriod {
            costs: vec![500_000.0, 400_000.0, 250_000.0],
            timings: vec![Timing::Beginning, Timing::Middle, Timing::End],
        };
        let result = calculate(&input).unwrap();

        let monthly = 0.06 / 12.0;
        let expected = 500_000.0 * monthly * 3.0
            + 400_000.0 * monthly * 1.5
            + 250_000.0 * monthly * 0.0;
        assert!((result.idc - expected).abs() < 1e-9);
    }

    #[test]
    fn test_distribution_labels() {
        assert_eq!(
            IdcDistribution::Normalized.to_string(),
            "Normalize over construction period"
        );
        let per_period = IdcDistribution::PerPeriod {
            costs: vec![],
            timings: vec![],
        };
        assert_eq!(per_period.to_string(), "Specify per-period costs");
    }

    #[test]
    fn test_serialization() {
        let mut input = base_input();
        input.idc_distribution = IdcDistribution::PerPeriod {
            costs: vec![100.0],
            timings: vec![Timing::Beginning],
        };
        let json = serde_json::to_string_pretty(&input).unwrap();
        let roundtrip: AnnualizerInput = serde_json::from_str(&json).unwrap();
        assert_eq!(input, roundtrip);
    }
}
