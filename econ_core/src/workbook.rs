//! # Workbook Model
//!
//! An in-memory workbook (sheets of rows of cells) plus the builder that
//! serializes a session into the fixed export layout. Sheet names and
//! row/column positions are an external contract shared with the source
//! spreadsheets; the layout tests below pin every asserted cell.
//!
//! The model is deliberately format-agnostic - [`crate::export`] writes it
//! to disk.

use serde::{Deserialize, Serialize};

use crate::session::EconSession;

/// A single workbook cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum Cell {
    /// An empty cell (padding inside a sparse row)
    Empty,
    Text(String),
    Number(f64),
    Int(i64),
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    pub fn number(value: f64) -> Self {
        Cell::Number(value)
    }

    pub fn int(value: i64) -> Self {
        Cell::Int(value)
    }

    /// Number cell, or empty when the value is absent.
    pub fn opt_number(value: Option<f64>) -> Self {
        value.map(Cell::Number).unwrap_or(Cell::Empty)
    }

    /// Numeric view of the cell, when it has one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Number(n) => Some(*n),
            Cell::Int(i) => Some(*i as f64),
            _ => None,
        }
    }
}

/// A named sheet: an ordered list of rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sheet {
    pub name: String,
    pub rows: Vec<Vec<Cell>>,
}

impl Sheet {
    pub fn new(name: impl Into<String>) -> Self {
        Sheet {
            name: name.into(),
            rows: Vec::new(),
        }
    }

    /// Append a row of cells.
    pub fn push_row(&mut self, row: Vec<Cell>) {
        self.rows.push(row);
    }

    /// Append a two-cell label/value row.
    pub fn push_pair(&mut self, label: impl Into<String>, value: Cell) {
        self.rows.push(vec![Cell::text(label), value]);
    }

    /// Append an empty spacer row.
    pub fn push_blank(&mut self) {
        self.rows.push(Vec::new());
    }

    /// Look up a cell by spreadsheet-style reference ("A1", "C7").
    ///
    /// Returns `None` for an unparsable reference or a position outside
    /// the sheet's populated area.
    pub fn cell(&self, reference: &str) -> Option<&Cell> {
        let (row, col) = parse_a1(reference)?;
        self.rows.get(row)?.get(col)
    }
}

/// Parse an A1-style reference into zero-based (row, column) indices.
fn parse_a1(reference: &str) -> Option<(usize, usize)> {
    let split = reference.find(|c: char| c.is_ascii_digit())?;
    let (letters, digits) = reference.split_at(split);
    if letters.is_empty() {
        return None;
    }
    let mut col = 0usize;
    for c in letters.chars() {
        if !c.is_ascii_alphabetic() {
            return None;
        }
        col = col * 26 + (c.to_ascii_uppercase() as usize - 'A' as usize + 1);
    }
    let row: usize = digits.parse().ok()?;
    if row == 0 {
        return None;
    }
    Some((row - 1, col - 1))
}

/// An ordered collection of sheets.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Workbook {
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    /// Look up a sheet by name.
    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    /// Sheet names, in workbook order.
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }
}

/// Serialize a session into the fixed workbook layout.
///
/// The first sheet is always "EAD Inputs" and the last is always "README";
/// in between, one sheet is emitted per populated session section, in the
/// dashboard's section order. `readme` is split into one cell per line.
pub fn build_workbook(session: &EconSession, readme: &str) -> Workbook {
    let mut workbook = Workbook::default();

    workbook.sheets.push(ead_inputs_sheet(session));
    if let Some(sheet) = ead_results_sheet(session) {
        workbook.sheets.push(sheet);
    }
    if let Some(sheet) = storage_capacity_sheet(session) {
        workbook.sheets.push(sheet);
    }
    if let Some(sheet) = joint_om_sheet(session) {
        workbook.sheets.push(sheet);
    }
    if let Some(sheet) = updated_storage_sheet(session) {
        workbook.sheets.push(sheet);
    }
    if let Some(sheet) = rrr_sheet(session) {
        workbook.sheets.push(sheet);
    }
    if let Some(sheet) = total_annual_cost_sheet(session) {
        workbook.sheets.push(sheet);
    }
    if let Some(sheet) = annualizer_sheet(session) {
        workbook.sheets.push(sheet);
    }
    if let Some(sheet) = udv_sheet(session) {
        workbook.sheets.push(sheet);
    }
    if let Some(sheet) = water_demand_sheet(session) {
        workbook.sheets.push(sheet);
    }

    let mut readme_sheet = Sheet::new("README");
    for line in readme.lines() {
        readme_sheet.push_row(vec![Cell::text(line)]);
    }
    workbook.sheets.push(readme_sheet);

    workbook
}

fn ead_inputs_sheet(session: &EconSession) -> Sheet {
    let mut sheet = Sheet::new("EAD Inputs");
    if let Some(ead) = &session.ead {
        let mut header = vec![Cell::text("Frequency")];
        header.extend(ead.input.columns.iter().map(|c| Cell::text(&c.name)));
        sheet.push_row(header);
        for (i, frequency) in ead.input.frequencies.iter().enumerate() {
            let mut row = vec![Cell::number(*frequency)];
            row.extend(ead.input.columns.iter().map(|c| Cell::number(c.damages[i])));
            sheet.push_row(row);
        }
    }
    sheet
}

fn ead_results_sheet(session: &EconSession) -> Option<Sheet> {
    let ead = session.ead.as_ref()?;
    let mut sheet = Sheet::new("EAD Results");
    for column in &ead.analysis.columns {
        sheet.push_pair(&column.name, Cell::number(column.ead));
    }
    let comparisons: Vec<_> = ead
        .analysis
        .columns
        .iter()
        .filter(|c| c.difference_from_base.is_some())
        .collect();
    if !comparisons.is_empty() {
        sheet.push_blank();
        for column in &comparisons {
            sheet.push_pair(
                format!("{} - {}", column.name, ead.analysis.base_column),
                Cell::opt_number(column.difference_from_base),
            );
        }
        sheet.push_blank();
        for column in &comparisons {
            sheet.push_pair(
                format!(
                    "{} % change from {}",
                    column.name, ead.analysis.base_column
                ),
                Cell::opt_number(column.percent_change_from_base),
            );
        }
    }
    Some(sheet)
}

fn storage_capacity_sheet(session: &EconSession) -> Option<Sheet> {
    let capacity = session.storage_capacity.as_ref()?;
    let mut sheet = Sheet::new("Storage Capacity");
    sheet.push_pair(
        "Total Usable Storage (STot)",
        Cell::number(capacity.total_usable_af),
    );
    sheet.push_pair(
        "Storage Recommendation (SRec)",
        Cell::number(capacity.recommendation_af),
    );
    sheet.push_pair(
        "Percent of Total Conservation Storage (P)",
        Cell::number(capacity.conservation_fraction()),
    );
    Some(sheet)
}

fn joint_om_sheet(session: &EconSession) -> Option<Sheet> {
    let joint_om = session.joint_om.as_ref()?;
    let mut sheet = Sheet::new("Joint Costs O&M");
    sheet.push_pair(
        "Joint Operations Cost ($/year)",
        Cell::number(joint_om.operations),
    );
    sheet.push_pair(
        "Joint Maintenance Cost ($/year)",
        Cell::number(joint_om.maintenance),
    );
    sheet.push_pair("Total Joint O&M", Cell::number(joint_om.total()));
    Some(sheet)
}

fn updated_storage_sheet(session: &EconSession) -> Option<Sheet> {
    let entries = session.updated_storage.as_ref()?;
    let mut sheet = Sheet::new("Updated Storage Costs");
    sheet.push_row(vec![
        Cell::text("Category"),
        Cell::text("Actual Cost"),
        Cell::text("Update Factor"),
        Cell::text("Updated Cost"),
    ]);
    for entry in entries {
        sheet.push_row(vec![
            Cell::text(&entry.category),
            Cell::number(entry.actual_cost),
            Cell::number(entry.update_factor),
            Cell::number(entry.updated_cost()),
        ]);
    }
    sheet.push_blank();
    sheet.push_pair(
        "Total Updated Cost of Storage",
        Cell::number(session.updated_cost_total()),
    );
    Some(sheet)
}

fn rrr_sheet(session: &EconSession) -> Option<Sheet> {
    let rrr = session.rrr.as_ref()?;
    let mut sheet = Sheet::new("RR&R and Mitigation");
    sheet.push_pair(
        "Federal Discount Rate (%)",
        Cell::number(rrr.input.discount_rate_pct),
    );
    sheet.push_pair(
        "Analysis Years (Periods)",
        Cell::int(rrr.input.analysis_years as i64),
    );
    sheet.push_pair("CWCCI Ratio", Cell::number(rrr.input.cwcci_ratio));
    sheet.push_pair("Base Year", Cell::int(rrr.input.base_year as i64));
    if !rrr.result.details.is_empty() {
        sheet.push_blank();
        sheet.push_row(vec![
            Cell::text("Item"),
            Cell::text("Future Cost"),
            Cell::text("Year"),
            Cell::text("PV Factor"),
            Cell::text("Present Value"),
        ]);
        for detail in &rrr.result.details {
            sheet.push_row(vec![
                Cell::text(&detail.item),
                Cell::number(detail.future_cost),
                Cell::int(detail.year as i64),
                Cell::number(detail.pv_factor),
                Cell::number(detail.present_value),
            ]);
        }
        sheet.push_blank();
    }
    sheet.push_pair(
        "Total Present Value Cost",
        Cell::number(rrr.result.total_pv),
    );
    sheet.push_pair("Updated Cost", Cell::number(rrr.result.updated_cost));
    sheet.push_pair(
        "Annualized RR&R and Mitigation",
        Cell::number(rrr.result.annualized),
    );
    Some(sheet)
}

fn total_annual_cost_sheet(session: &EconSession) -> Option<Sheet> {
    let section = session.total_annual_cost.as_ref()?;
    let result = &section.result;
    let input = &section.input;
    let mut sheet = Sheet::new("Total Annual Cost");

    let metric = |label: &str, v1: Cell, v2: Cell| vec![Cell::text(label), v1, v2];

    sheet.push_row(metric(
        "Metric",
        Cell::text("Scenario 1"),
        Cell::text("Scenario 2"),
    ));
    sheet.push_row(metric(
        "Percent of Total Conservation Storage (P)",
        Cell::number(result.conservation_fraction),
        Cell::number(result.conservation_fraction),
    ));
    sheet.push_row(metric(
        "Cost of Storage Recommendation",
        Cell::number(result.storage_recommendation_cost),
        Cell::number(result.storage_recommendation_cost),
    ));
    sheet.push_row(metric(
        "Annualized Storage Cost",
        Cell::number(result.scenario1.capital),
        Cell::number(result.scenario2.capital),
    ));
    sheet.push_row(metric(
        "Joint O&M",
        Cell::number(result.scenario1.om),
        Cell::number(result.scenario2.om),
    ));
    sheet.push_row(metric(
        "Annualized RR&R/Mitigation",
        Cell::number(result.scenario1.rrr),
        Cell::number(result.scenario2.rrr),
    ));
    sheet.push_row(metric(
        "Total Annual Cost",
        Cell::number(result.scenario1.total),
        Cell::number(result.scenario2.total),
    ));
    sheet.push_row(metric(
        "Discount Rate (%) for Storage Cost",
        Cell::number(input.scenario1.discount_rate_pct),
        Cell::number(input.scenario2.discount_rate_pct),
    ));
    sheet.push_row(metric(
        "Analysis Period (years)",
        Cell::int(input.scenario1.analysis_years as i64),
        Cell::int(input.scenario2.analysis_years as i64),
    ));
    Some(sheet)
}

fn annualizer_sheet(session: &EconSession) -> Option<Sheet> {
    let section = session.annualizer.as_ref()?;
    let input = &section.input;
    let result = &section.result;
    let mut sheet = Sheet::new("Annualizer");

    sheet.push_pair("Project First Cost ($)", Cell::number(input.first_cost));
    sheet.push_pair("Real Estate Cost ($)", Cell::number(input.real_estate_cost));
    sheet.push_pair("PED Cost ($)", Cell::number(input.ped_cost));
    sheet.push_pair("Monitoring Cost ($)", Cell::number(input.monitoring_cost));
    sheet.push_pair("Interest Rate (%)", Cell::number(input.idc_rate_pct));
    sheet.push_pair(
        "Construction Period (Months)",
        Cell::int(input.construction_months as i64),
    );
    sheet.push_pair(
        "IDC Cost Distribution",
        Cell::text(input.idc_distribution.to_string()),
    );
    sheet.push_pair("Annual O&M Cost ($)", Cell::number(input.annual_om));
    sheet.push_pair("Benefits (Annual, $)", Cell::number(input.annual_benefits));
    sheet.push_pair("Base Year", Cell::int(input.base_year as i64));
    sheet.push_pair("Discount Rate (%)", Cell::number(input.discount_rate_pct));
    sheet.push_pair(
        "Period of Analysis (Years)",
        Cell::int(input.analysis_years as i64),
    );
    sheet.push_blank();

    if !result.future_details.is_empty() {
        sheet.push_row(vec![
            Cell::text("Cost"),
            Cell::text("Year"),
            Cell::text("PV Factor"),
            Cell::text("Present Value"),
        ]);
        for detail in &result.future_details {
            sheet.push_row(vec![
                Cell::number(detail.cost),
                Cell::int(detail.year as i64),
                Cell::number(detail.pv_factor),
                Cell::number(detail.present_value),
            ]);
        }
        sheet.push_blank();
    }

    sheet.push_pair("Interest During Construction", Cell::number(result.idc));
    sheet.push_pair(
        "Total Cost/Investment",
        Cell::number(result.total_investment),
    );
    sheet.push_pair("Capital Recovery Factor", Cell::number(result.crf));
    sheet.push_pair(
        "Annual Cost including O&M",
        Cell::number(result.annual_cost),
    );
    sheet.push_pair("Benefit-Cost Ratio", Cell::opt_number(result.bcr));
    Some(sheet)
}

fn udv_sheet(session: &EconSession) -> Option<Sheet> {
    let section = session.udv.as_ref()?;
    let input = &section.input;
    let result = &section.result;
    let mut sheet = Sheet::new("UDV Analysis");
    sheet.push_pair(
        "Recreation Type",
        Cell::text(input.category.recreation_type()),
    );
    sheet.push_pair("Activity Type", Cell::text(input.category.activity_label()));
    sheet.push_pair("Point Value", Cell::number(input.points));
    sheet.push_pair("Unit Day Value", Cell::number(result.unit_day_value));
    sheet.push_pair(
        "Expected Annual User Days",
        Cell::number(input.annual_user_days),
    );
    sheet.push_pair("Expected Visitation", Cell::number(input.visitation));
    sheet.push_pair(
        "Adjusted Annual User Days",
        Cell::number(result.adjusted_user_days),
    );
    sheet.push_pair(
        "Annual Recreation Benefit",
        Cell::number(result.benefit),
    );
    Some(sheet)
}

fn water_demand_sheet(session: &EconSession) -> Option<Sheet> {
    let section = session.water_demand.as_ref()?;
    let mut sheet = Sheet::new("Water Demand");
    sheet.push_row(vec![
        Cell::text("Year"),
        Cell::text("Population"),
        Cell::text("Municipal Demand (MGY)"),
        Cell::text("Industrial Demand (MGY)"),
        Cell::text("Total Demand (MGY)"),
    ]);
    for year in &section.forecast {
        sheet.push_row(vec![
            Cell::int(year.year as i64),
            Cell::int(year.population),
            Cell::number(year.municipal_mgy),
            Cell::number(year.industrial_mgy),
            Cell::number(year.total_mgy),
        ]);
    }
    Some(sheet)
}
