// 📤 Table export - write dashboard tables as CSV

use crate::dataset::Dataset;
use crate::error::SelectorError;
use crate::selection::Selection;
use crate::series::{Outcome, Table};
use crate::transforms::{employment, poverty};
use anyhow::{Context, Result};
use serde::Serialize;
use std::fmt;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportTable {
    /// National year-over-year poverty variation
    Variation,
    /// Provincial poverty for the selected year
    Provincial,
    PovertySignificance,
    EmploymentSignificance,
}

impl ExportTable {
    pub const ALL: [ExportTable; 4] = [
        ExportTable::Variation,
        ExportTable::Provincial,
        ExportTable::PovertySignificance,
        ExportTable::EmploymentSignificance,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ExportTable::Variation => "variacion",
            ExportTable::Provincial => "provincial",
            ExportTable::PovertySignificance => "significancia-pobreza",
            ExportTable::EmploymentSignificance => "significancia-empleo",
        }
    }
}

impl fmt::Display for ExportTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ExportTable {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ExportTable::ALL
            .into_iter()
            .find(|t| t.name() == s.trim())
            .ok_or_else(|| SelectorError::UnknownTable(s.to_string()))
    }
}

fn write_rows<R: Serialize, W: Write>(outcome: Outcome<Table<R>>, writer: W) -> Result<usize> {
    let rows = outcome.into_ready().map(|t| t.rows).unwrap_or_default();
    let mut wtr = csv::Writer::from_writer(writer);
    for row in &rows {
        wtr.serialize(row).context("Failed to write CSV row")?;
    }
    wtr.flush().context("Failed to flush CSV output")?;
    Ok(rows.len())
}

/// Write `table` as CSV and return the number of data rows. A table with
/// no data produces an empty file.
pub fn export_table<W: Write>(dataset: &Dataset, selection: &Selection, table: ExportTable, writer: W) -> Result<usize> {
    let count = match table {
        ExportTable::Variation => write_rows(poverty::national_variation(dataset), writer)?,
        ExportTable::Provincial => write_rows(poverty::provincial_table(dataset, selection.province_year), writer)?,
        ExportTable::PovertySignificance => write_rows(poverty::significance_table(dataset), writer)?,
        ExportTable::EmploymentSignificance => write_rows(employment::significance_table(dataset), writer)?,
    };
    tracing::info!(table = %table, rows = count, "table exported");
    Ok(count)
}

pub fn export_table_to_path(dataset: &Dataset, selection: &Selection, table: ExportTable, path: &Path) -> Result<usize> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    export_table(dataset, selection, table, file)
}
