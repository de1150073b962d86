//! # Unit Day Value Recreation Benefit
//!
//! Estimates annual recreation benefits from USACE Unit Day Values: a
//! 0-100 ranking score is converted to a dollar value per user day by
//! linear interpolation in the published point-to-dollar table, then
//! multiplied out by expected use.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::{EconError, EconResult};

/// One row of the point-to-dollar conversion table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointValueRow {
    pub points: u32,
    pub general_recreation: f64,
    pub general_fishing_hunting: f64,
    pub specialized_fishing_hunting: f64,
    pub specialized_recreation: f64,
}

/// The published UDV schedule, points 0-100 in steps of ten.
pub static POINT_VALUE_TABLE: Lazy<Vec<PointValueRow>> = Lazy::new(|| {
    let rows = [
        (0, 4.87, 7.00, 34.09, 19.79),
        (10, 5.78, 7.91, 35.01, 21.00),
        (20, 6.39, 8.52, 35.62, 22.53),
        (30, 7.31, 9.44, 36.53, 24.35),
        (40, 9.13, 10.35, 37.44, 25.88),
        (50, 10.35, 11.26, 41.10, 29.22),
        (60, 11.26, 12.48, 44.75, 32.27),
        (70, 11.87, 13.09, 47.49, 38.97),
        (80, 13.09, 14.00, 51.14, 45.36),
        (90, 14.00, 14.31, 54.80, 51.75),
        (100, 14.61, 14.61, 57.84, 57.84),
    ];
    rows.iter()
        .map(
            |&(points, gr, gfh, sfh, sr)| PointValueRow {
                points,
                general_recreation: gr,
                general_fishing_hunting: gfh,
                specialized_fishing_hunting: sfh,
                specialized_recreation: sr,
            },
        )
        .collect()
});

/// Recreation category, selecting a column of the conversion table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecreationCategory {
    GeneralRecreation,
    GeneralFishingHunting,
    SpecializedFishingHunting,
    /// Specialized recreation other than fishing and hunting (e.g., boating)
    SpecializedOther,
}

impl RecreationCategory {
    /// "General" or "Specialized", as shown on the dashboard.
    pub fn recreation_type(self) -> &'static str {
        match self {
            RecreationCategory::GeneralRecreation | RecreationCategory::GeneralFishingHunting => {
                "General"
            }
            RecreationCategory::SpecializedFishingHunting | RecreationCategory::SpecializedOther => {
                "Specialized"
            }
        }
    }

    /// Activity label, as shown on the dashboard.
    pub fn activity_label(self) -> &'static str {
        match self {
            RecreationCategory::GeneralRecreation => "General Recreation",
            RecreationCategory::GeneralFishingHunting
            | RecreationCategory::SpecializedFishingHunting => "Fishing and Hunting",
            RecreationCategory::SpecializedOther => "Other (e.g., Boating)",
        }
    }

    fn column_value(self, row: &PointValueRow) -> f64 {
        match self {
            RecreationCategory::GeneralRecreation => row.general_recreation,
            RecreationCategory::GeneralFishingHunting => row.general_fishing_hunting,
            RecreationCategory::SpecializedFishingHunting => row.specialized_fishing_hunting,
            RecreationCategory::SpecializedOther => row.specialized_recreation,
        }
    }
}

/// Interpolate a unit day value from the conversion table.
///
/// Points outside the table range are clamped to the first or last row.
///
/// # Errors
///
/// Returns [`EconError::InvalidInput`] for an empty table.
pub fn unit_day_value(
    table: &[PointValueRow],
    category: RecreationCategory,
    points: f64,
) -> EconResult<f64> {
    if table.is_empty() {
        return Err(EconError::invalid_input(
            "table",
            "0 rows",
            "Point value table cannot be empty",
        ));
    }
    let first = &table[0];
    let last = &table[table.len() - 1];
    if points <= first.points as f64 {
        return Ok(category.column_value(first));
    }
    if points >= last.points as f64 {
        return Ok(category.column_value(last));
    }
    for pair in table.windows(2) {
        let (lo, hi) = (&pair[0], &pair[1]);
        let (x0, x1) = (lo.points as f64, hi.points as f64);
        if points >= x0 && points <= x1 {
            let t = (points - x0) / (x1 - x0);
            let (y0, y1) = (category.column_value(lo), category.column_value(hi));
            return Ok(y0 + t * (y1 - y0));
        }
    }
    Ok(category.column_value(last))
}

/// Input for a recreation benefit estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UdvInput {
    /// Recreation category (table column)
    pub category: RecreationCategory,
    /// Ranking points, 0-100
    pub points: f64,
    /// Override for the interpolated unit day value, when updated UDV
    /// schedules are available
    pub unit_day_value_override: Option<f64>,
    /// Expected annual user days
    pub annual_user_days: f64,
    /// Visitation multiplier applied to the user days
    pub visitation: f64,
}

/// Results of a recreation benefit estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UdvResult {
    /// Unit day value used, in dollars per user day
    pub unit_day_value: f64,
    /// `annual_user_days * visitation`
    pub adjusted_user_days: f64,
    /// Annual recreation benefit in dollars
    pub benefit: f64,
}

/// Estimate the annual recreation benefit for an input against the
/// built-in conversion table.
pub fn calculate(input: &UdvInput) -> EconResult<UdvResult> {
    let udv = match input.unit_day_value_override {
        Some(value) => value,
        None => unit_day_value(&POINT_VALUE_TABLE, input.category, input.points)?,
    };
    let adjusted_user_days = input.annual_user_days * input.visitation;
    Ok(UdvResult {
        unit_day_value: udv,
        adjusted_user_days,
        benefit: udv * adjusted_user_days,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_at_table_knots() {
        let udv =
            unit_day_value(&POINT_VALUE_TABLE, RecreationCategory::GeneralRecreation, 50.0)
                .unwrap();
        assert_eq!(udv, 10.35);
        let udv = unit_day_value(
            &POINT_VALUE_TABLE,
            RecreationCategory::SpecializedFishingHunting,
            100.0,
        )
        .unwrap();
        assert_eq!(udv, 57.84);
    }

    #[test]
    fn test_midpoint_interpolation() {
        // Halfway between 4.87 and 5.78.
        let udv =
            unit_day_value(&POINT_VALUE_TABLE, RecreationCategory::GeneralRecreation, 5.0)
                .unwrap();
        assert!((udv - 5.325).abs() < 1e-9);
    }

    #[test]
    fn test_clamped_outside_range() {
        let low =
            unit_day_value(&POINT_VALUE_TABLE, RecreationCategory::SpecializedOther, -10.0)
                .unwrap();
        assert_eq!(low, 19.79);
        let high =
            unit_day_value(&POINT_VALUE_TABLE, RecreationCategory::SpecializedOther, 250.0)
                .unwrap();
        assert_eq!(high, 57.84);
    }

    #[test]
    fn test_empty_table_is_an_error() {
        assert!(unit_day_value(&[], RecreationCategory::GeneralRecreation, 50.0).is_err());
    }

    #[test]
    fn test_benefit_multiplies_out() {
        let input = UdvInput {
            category: RecreationCategory::GeneralRecreation,
            points: 50.0,
            unit_day_value_override: None,
            annual_user_days: 10_000.0,
            visitation: 1.5,
        };
        let result = calculate(&input).unwrap();
        assert_eq!(result.adjusted_user_days, 15_000.0);
        assert!((result.benefit - 10.35 * 15_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_override_wins() {
        let input = UdvInput {
            category: RecreationCategory::GeneralRecreation,
            points: 50.0,
            unit_day_value_override: Some(12.0),
            annual_user_days: 100.0,
            visitation: 1.0,
        };
        let result = calculate(&input).unwrap();
        assert_eq!(result.unit_day_value, 12.0);
        assert_eq!(result.benefit, 1200.0);
    }

    #[test]
    fn test_category_labels() {
        assert_eq!(
            RecreationCategory::SpecializedOther.recreation_type(),
            "Specialized"
        );
        assert_eq!(
            RecreationCategory::GeneralFishingHunting.activity_label(),
            "Fishing and Hunting"
        );
    }
}
