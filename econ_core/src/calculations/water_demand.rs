//! # Municipal & Industrial Water Demand Forecast
//!
//! Projects water demand from a base population using per-year growth,
//! industrial, loss, and conservation factors, following the ER 1105-2-100
//! methodology. Demands are reported in million gallons per year (MGY).

use serde::{Deserialize, Serialize};

use crate::errors::{EconError, EconResult};

/// Input assumptions for a demand forecast.
///
/// The base year is year zero; `growth_rates_pct` has one entry per
/// projected year, while the factor vectors have one entry per forecast
/// year including the base year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterDemandInput {
    /// First year of the forecast
    pub base_year: i32,
    /// Population in the base year
    pub base_population: f64,
    /// Municipal demand in gallons per person per day
    pub per_capita_gpd: f64,
    /// Annual population growth, percent, one per projected year
    pub growth_rates_pct: Vec<f64>,
    /// Industrial demand as a percent of municipal, one per forecast year
    pub industrial_factors_pct: Vec<f64>,
    /// Distribution losses as a percent of total demand, one per forecast year
    pub loss_factors_pct: Vec<f64>,
    /// Demand reduction from conservation, percent, one per forecast year
    pub conservation_pct: Vec<f64>,
}

impl WaterDemandInput {
    /// Build an input with the same rates applied to every year, the way
    /// the dashboard's default-value fields do.
    pub fn uniform(
        base_year: i32,
        projection_years: usize,
        base_population: f64,
        per_capita_gpd: f64,
        growth_pct: f64,
        industrial_pct: f64,
        loss_pct: f64,
        conservation_pct: f64,
    ) -> Self {
        WaterDemandInput {
            base_year,
            base_population,
            per_capita_gpd,
            growth_rates_pct: vec![growth_pct; projection_years],
            industrial_factors_pct: vec![industrial_pct; projection_years + 1],
            loss_factors_pct: vec![loss_pct; projection_years + 1],
            conservation_pct: vec![conservation_pct; projection_years + 1],
        }
    }

    /// Number of forecast years including the base year.
    pub fn forecast_len(&self) -> usize {
        self.growth_rates_pct.len() + 1
    }

    fn validate(&self) -> EconResult<()> {
        let expected = self.forecast_len();
        for (field, len) in [
            ("industrial_factors_pct", self.industrial_factors_pct.len()),
            ("loss_factors_pct", self.loss_factors_pct.len()),
            ("conservation_pct", self.conservation_pct.len()),
        ] {
            if len != expected {
                return Err(EconError::length_mismatch(field, expected, len));
            }
        }
        Ok(())
    }
}

/// One forecast year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaterDemandYear {
    pub year: i32,
    /// Projected population, rounded to whole persons
    pub population: i64,
    pub municipal_mgy: f64,
    pub industrial_mgy: f64,
    pub total_mgy: f64,
}

/// Run the forecast.
///
/// Population compounds year over year; each year's municipal demand is
/// `population * per_capita * (1 - conservation) * 365 / 1e6` MGY,
/// industrial demand is a percentage of municipal, and system losses are
/// applied to the sum.
pub fn calculate(input: &WaterDemandInput) -> EconResult<Vec<WaterDemandYear>> {
    input.validate()?;

    let mut populations = Vec::with_capacity(input.forecast_len());
    populations.push(input.base_population);
    for growth_pct in &input.growth_rates_pct {
        let prev = *populations.last().unwrap_or(&input.base_population);
        populations.push(prev * (1.0 + growth_pct / 100.0));
    }

    let forecast = populations
        .iter()
        .enumerate()
        .map(|(k, &population)| {
            let conservation = input.conservation_pct[k] / 100.0;
            let industrial_factor = input.industrial_factors_pct[k] / 100.0;
            let losses = input.loss_factors_pct[k] / 100.0;

            let per_capita = input.per_capita_gpd * (1.0 - conservation);
            let municipal_mgy = population * per_capita * 365.0 / 1e6;
            let industrial_mgy = municipal_mgy * industrial_factor;
            let total_mgy = (municipal_mgy + industrial_mgy) * (1.0 + losses);

            WaterDemandYear {
                year: input.base_year + k as i32,
                population: population.round() as i64,
                municipal_mgy,
                industrial_mgy,
                total_mgy,
            }
        })
        .collect();

    Ok(forecast)
}
