//! # Workbook Export
//!
//! Writes a [`Workbook`] to disk as one CSV file per sheet. Writes are
//! atomic: each sheet goes to a `.tmp` file, is synced, and is renamed
//! into place, so an interrupted export never leaves a half-written file.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use crate::errors::{EconError, EconResult};
use crate::workbook::{Cell, Sheet, Workbook};

/// Turn a sheet name into a safe file stem.
///
/// Characters that are awkward in file names (slashes, ampersands,
/// spaces) become underscores; runs collapse to a single underscore.
/// "RR&R and Mitigation" becomes "RR_R_and_Mitigation".
pub fn sheet_file_stem(name: &str) -> String {
    let mut stem = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() || c == '-' || c == '.' {
            stem.push(c);
        } else if !stem.ends_with('_') {
            stem.push('_');
        }
    }
    stem.trim_matches('_').to_string()
}

fn cell_to_field(cell: &Cell) -> String {
    match cell {
        Cell::Empty => String::new(),
        Cell::Text(s) => s.clone(),
        Cell::Number(n) => n.to_string(),
        Cell::Int(i) => i.to_string(),
    }
}

/// Write one sheet as CSV to `path` with temp-file-then-rename semantics.
fn write_sheet(sheet: &Sheet, path: &Path) -> EconResult<()> {
    let tmp_path = path.with_extension("csv.tmp");

    // Rows in a sheet are ragged; pad every record to the widest row so
    // the CSV stays rectangular.
    let width = sheet.rows.iter().map(Vec::len).max().unwrap_or(0).max(1);

    let tmp_file = File::create(&tmp_path).map_err(|e| {
        EconError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;
    let mut writer = csv::WriterBuilder::new()
        .flexible(false)
        .from_writer(tmp_file);

    for row in &sheet.rows {
        let mut record: Vec<String> = row.iter().map(cell_to_field).collect();
        record.resize(width, String::new());
        writer.write_record(&record).map_err(|e| {
            EconError::file_error("write row", tmp_path.display().to_string(), e.to_string())
        })?;
    }

    let tmp_file = writer.into_inner().map_err(|e| {
        EconError::file_error("flush", tmp_path.display().to_string(), e.to_string())
    })?;
    tmp_file.sync_all().map_err(|e| {
        EconError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        // Clean up temp file if rename fails
        let _ = fs::remove_file(&tmp_path);
        EconError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    Ok(())
}

/// Write every sheet of `workbook` into `dir` as `<sheet>.csv`.
///
/// The directory is created if it does not exist. Returns the written
/// paths in workbook order.
///
/// # Example
///
/// ```rust,no_run
/// use econ_core::session::EconSession;
/// use econ_core::workbook::build_workbook;
/// use econ_core::export::write_workbook;
/// use std::path::Path;
///
/// let session = EconSession::new("Analyst", "Reallocation Study");
/// let workbook = build_workbook(&session, "# Notes\n");
/// let paths = write_workbook(&workbook, Path::new("export"))?;
/// println!("wrote {} sheets", paths.len());
/// # Ok::<(), econ_core::errors::EconError>(())
/// ```
pub fn write_workbook(workbook: &Workbook, dir: &Path) -> EconResult<Vec<PathBuf>> {
    fs::create_dir_all(dir).map_err(|e| {
        EconError::file_error("create directory", dir.display().to_string(), e.to_string())
    })?;

    let mut paths = Vec::with_capacity(workbook.sheets.len());
    for sheet in &workbook.sheets {
        let path = dir.join(format!("{}.csv", sheet_file_stem(&sheet.name)));
        write_sheet(sheet, &path)?;
        paths.push(path);
    }
    Ok(paths)
}
