//! # Session Data Structures
//!
//! The `EconSession` struct is the root container for one analysis
//! session: every dashboard section's inputs and computed results, held as
//! explicit typed records rather than the ambient key/value state the
//! dashboards juggle.
//!
//! ## Structure
//!
//! ```text
//! EconSession
//! ├── meta: SessionMeta (version, analyst, study, timestamps)
//! └── one Option<_Section> per dashboard section
//! ```
//!
//! Setter methods run the matching calculation, store both input and
//! result, and stamp the modified time, so a session handed to the
//! workbook builder is always internally consistent.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::calculations::annualizer::{self, AnnualizerInput, AnnualizerResult};
use crate::calculations::ead::{self, EadAnalysis, EadAnalysisInput};
use crate::calculations::storage::{
    annualize_rrr, total_annual_cost, JointOm, RrrInput, RrrResult, StorageCapacity,
    TotalAnnualCostInput, TotalAnnualCostResult, UpdatedCostEntry,
};
use crate::calculations::udv::{self, UdvInput, UdvResult};
use crate::calculations::water_demand::{self, WaterDemandInput, WaterDemandYear};
use crate::errors::EconResult;

/// Current schema version for serialized sessions
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Session metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionMeta {
    /// Schema version (for migration compatibility)
    pub version: String,
    /// Name of the responsible analyst
    pub analyst: String,
    /// Study or project name
    pub study: String,
    /// When the session was created
    pub created: DateTime<Utc>,
    /// When the session was last modified
    pub modified: DateTime<Utc>,
}

/// EAD inputs and analysis results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EadSection {
    pub input: EadAnalysisInput,
    pub analysis: EadAnalysis,
}

/// RR&R and mitigation inputs and results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RrrSection {
    pub input: RrrInput,
    pub result: RrrResult,
}

/// Total annual cost inputs and results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TotalAnnualCostSection {
    pub input: TotalAnnualCostInput,
    pub result: TotalAnnualCostResult,
}

/// Annualizer inputs and results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnualizerSection {
    pub input: AnnualizerInput,
    pub result: AnnualizerResult,
}

/// UDV inputs and results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UdvSection {
    pub input: UdvInput,
    pub result: UdvResult,
}

/// Water demand inputs and forecast.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaterDemandSection {
    pub input: WaterDemandInput,
    pub forecast: Vec<WaterDemandYear>,
}

/// Root session container.
///
/// Sections are `None` until their calculator has been run; the workbook
/// builder emits a sheet only for populated sections.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EconSession {
    pub meta: SessionMeta,
    pub ead: Option<EadSection>,
    pub storage_capacity: Option<StorageCapacity>,
    pub joint_om: Option<JointOm>,
    pub updated_storage: Option<Vec<UpdatedCostEntry>>,
    pub rrr: Option<RrrSection>,
    pub total_annual_cost: Option<TotalAnnualCostSection>,
    pub annualizer: Option<AnnualizerSection>,
    pub udv: Option<UdvSection>,
    pub water_demand: Option<WaterDemandSection>,
}

impl EconSession {
    /// Create a new empty session.
    pub fn new(analyst: impl Into<String>, study: impl Into<String>) -> Self {
        let now = Utc::now();
        EconSession {
            meta: SessionMeta {
                version: SCHEMA_VERSION.to_string(),
                analyst: analyst.into(),
                study: study.into(),
                created: now,
                modified: now,
            },
            ead: None,
            storage_capacity: None,
            joint_om: None,
            updated_storage: None,
            rrr: None,
            total_annual_cost: None,
            annualizer: None,
            udv: None,
            water_demand: None,
        }
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    /// Run the EAD analysis and store it.
    pub fn set_ead(&mut self, input: EadAnalysisInput) -> EconResult<&EadAnalysis> {
        let analysis = ead::analyze(&input)?;
        self.ead = Some(EadSection { input, analysis });
        self.touch();
        Ok(&self.ead.as_ref().unwrap().analysis)
    }

    /// Store storage capacity volumes.
    pub fn set_storage_capacity(&mut self, capacity: StorageCapacity) {
        self.storage_capacity = Some(capacity);
        self.touch();
    }

    /// Store joint O&M costs.
    pub fn set_joint_om(&mut self, joint_om: JointOm) {
        self.joint_om = Some(joint_om);
        self.touch();
    }

    /// Store the updated storage cost table.
    pub fn set_updated_storage(&mut self, entries: Vec<UpdatedCostEntry>) {
        self.updated_storage = Some(entries);
        self.touch();
    }

    /// Run the RR&R annualization and store it.
    pub fn set_rrr(&mut self, input: RrrInput) -> EconResult<&RrrResult> {
        let result = annualize_rrr(&input)?;
        self.rrr = Some(RrrSection { input, result });
        self.touch();
        Ok(&self.rrr.as_ref().unwrap().result)
    }

    /// Percent of total conservation storage, zero when capacity is unset.
    pub fn conservation_fraction(&self) -> f64 {
        self.storage_capacity
            .map(|c| c.conservation_fraction())
            .unwrap_or(0.0)
    }

    /// Total updated cost of storage (CTot), zero when the table is unset.
    pub fn updated_cost_total(&self) -> f64 {
        self.updated_storage
            .as_deref()
            .map(crate::calculations::storage::total_updated_cost)
            .unwrap_or(0.0)
    }

    /// Combine the storage sections into the total annual cost under the
    /// given scenarios and store the result. Missing upstream sections
    /// contribute zero, as on the dashboard.
    pub fn set_total_annual_cost(
        &mut self,
        input: TotalAnnualCostInput,
    ) -> EconResult<&TotalAnnualCostResult> {
        let om_total = self.joint_om.map(|om| om.total()).unwrap_or(0.0);
        let rrr_annualized = self.rrr.as_ref().map(|r| r.result.annualized).unwrap_or(0.0);
        let result = total_annual_cost(
            self.conservation_fraction(),
            self.updated_cost_total(),
            om_total,
            rrr_annualized,
            &input,
        )?;
        self.total_annual_cost = Some(TotalAnnualCostSection { input, result });
        self.touch();
        Ok(&self.total_annual_cost.as_ref().unwrap().result)
    }

    /// Run the annualizer and store it.
    pub fn set_annualizer(&mut self, input: AnnualizerInput) -> EconResult<&AnnualizerResult> {
        let result = annualizer::calculate(&input)?;
        self.annualizer = Some(AnnualizerSection { input, result });
        self.touch();
        Ok(&self.annualizer.as_ref().unwrap().result)
    }

    /// Run the UDV benefit estimate and store it.
    pub fn set_udv(&mut self, input: UdvInput) -> EconResult<&UdvResult> {
        let result = udv::calculate(&input)?;
        self.udv = Some(UdvSection { input, result });
        self.touch();
        Ok(&self.udv.as_ref().unwrap().result)
    }

    /// Run the water demand forecast and store it.
    pub fn set_water_demand(
        &mut self,
        input: WaterDemandInput,
    ) -> EconResult<&[WaterDemandYear]> {
        let forecast = water_demand::calculate(&input)?;
        self.water_demand = Some(WaterDemandSection { input, forecast });
        self.touch();
        Ok(&self.water_demand.as_ref().unwrap().forecast)
    }
}

impl Default for EconSession {
    fn default() -> Self {
        EconSession::new("", "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::storage::CostScenario;

    #[test]
    fn test_new_session_is_empty() {
        let session = EconSession::new("Jane Analyst", "Reallocation Study");
        assert_eq!(session.meta.version, SCHEMA_VERSION);
        assert!(session.ead.is_none());
        assert!(session.total_annual_cost.is_none());
        assert_eq!(session.conservation_fraction(), 0.0);
        assert_eq!(session.updated_cost_total(), 0.0);
    }

    #[test]
    fn test_total_annual_cost_pulls_from_sections() {
        let mut session = EconSession::new("Jane", "Study");
        session.set_storage_capacity(StorageCapacity {
            total_usable_af: 100.0,
            recommendation_af: 50.0,
        });
        session.set_joint_om(JointOm {
            operations: 10.0,
            maintenance: 5.0,
        });
        session.set_updated_storage(vec![
            UpdatedCostEntry {
                category: "A".to_string(),
                actual_cost: 1.0,
                update_factor: 1.0,
            },
            UpdatedCostEntry {
                category: "B".to_string(),
                actual_cost: 2.0,
                update_factor: 1.0,
            },
        ]);

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
        let result = *session.set_total_annual_cost(input).unwrap();
        assert_eq!(result.conservation_fraction, 0.5);
        assert_eq!(result.storage_recommendation_cost, 1.5);
        assert_eq!(result.scenario1.om, 7.5);
        // No RR&R section: scenario 1 carries zero RR&R.
        assert_eq!(result.scenario1.rrr, 0.0);
    }

    #[test]
    fn test_touch_advances_modified() {
        let mut session = EconSession::new("Jane", "Study");
        let before = session.meta.modified;
        session.set_joint_om(JointOm {
            operations: 1.0,
            maintenance: 2.0,
        });
        assert!(session.meta.modified >= before);
    }

    #[test]
    fn test_serialization_roundtrip() {
        let mut session = EconSession::new("Jane", "Study");
        session.set_storage_capacity(StorageCapacity {
            total_usable_af: 100.0,
            recommendation_af: 50.0,
        });
        session
            .set_udv(UdvInput {
                category: crate::calculations::udv::RecreationCategory::GeneralRecreation,
                points: 50.0,
                unit_day_value_override: None,
                annual_user_days: 100.0,
                visitation: 1.0,
            })
            .unwrap();

        let json = serde_json::to_string_pretty(&session).unwrap();
        let roundtrip: EconSession = serde_json::from_str(&json).unwrap();
        assert_eq!(
            roundtrip.storage_capacity.unwrap().recommendation_af,
            50.0
        );
        assert_eq!(roundtrip.udv.unwrap().result.unit_day_value, 10.35);
    }
}
