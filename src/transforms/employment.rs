// 💼 Employment transforms

use crate::aggregate::group_by;
use crate::dataset::{Dataset, SignificanceRecord, Year};
use crate::metrics;
use crate::selection::YearRange;
use crate::series::{cross_section, latest_cross_section, single_series, time_series, BarOrder, CrossSection, Outcome, Table, TimeSeries};
use serde::{Deserialize, Serialize};

pub const AFFILIATES_LABEL: &str = "Afiliados al IESS";

pub fn indicator_series(dataset: &Dataset) -> Outcome<TimeSeries> {
    time_series(&dataset.employment_series, |r| r.indicator.clone())
}

/// Social security affiliates per year.
pub fn affiliates_series(dataset: &Dataset) -> Outcome<TimeSeries> {
    single_series(&dataset.iess_affiliates, AFFILIATES_LABEL)
}

/// Values accepted by the demographic dimension selector, first-seen order.
pub fn demographic_dimensions(dataset: &Dataset) -> Vec<String> {
    group_by(&dataset.employment_demographics, |r| r.category_type.clone())
        .into_iter()
        .map(|g| g.key)
        .collect()
}

/// Adequate employment rate per category of `dimension` in the latest year,
/// highest first.
pub fn demographic_latest(dataset: &Dataset, dimension: &str) -> Outcome<CrossSection> {
    latest_cross_section(
        dataset
            .employment_demographics
            .iter()
            .filter(|r| r.category_type == dimension),
        |r| r.category.clone(),
        BarOrder::Descending,
    )
}

/// Employment growth by sector as bars, highest first.
pub fn sector_growth(dataset: &Dataset, period: Option<YearRange>) -> Outcome<CrossSection> {
    let Some(period) = period else {
        return Outcome::NoData;
    };
    metrics::sector_growth(&dataset.sector_employment, period).map(|rows| {
        cross_section(
            None,
            rows.into_iter().map(|r| (r.sector, r.growth)).collect(),
            BarOrder::Natural,
        )
    })
}

// ============================================================================
// SIGNIFICANCE TABLE
// ============================================================================

/// Verdict column of the significance tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Significant,
    NotSignificant,
    Inconclusive,
}

impl Verdict {
    pub fn from_label(label: Option<&str>) -> Verdict {
        match label {
            Some(l) if l.starts_with("Sí") => Verdict::Significant,
            Some("No") => Verdict::NotSignificant,
            _ => Verdict::Inconclusive,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignificanceRow {
    pub year: Year,
    pub indicator: String,
    pub value: Option<f64>,
    pub previous_value: Option<f64>,
    pub variation_pp: Option<f64>,
    pub significant: Option<String>,
    pub verdict: Verdict,
}

impl From<&SignificanceRecord> for SignificanceRow {
    fn from(record: &SignificanceRecord) -> Self {
        SignificanceRow {
            year: record.year,
            indicator: record.indicator.clone(),
            value: record.value,
            previous_value: record.previous_value,
            variation_pp: record.variation_pp,
            significant: record.significant.clone(),
            verdict: Verdict::from_label(record.significant.as_deref()),
        }
    }
}

/// Rows newest year first; rows of one year keep their input order.
pub(crate) fn significance_rows(records: &[SignificanceRecord]) -> Outcome<Table<SignificanceRow>> {
    if records.is_empty() {
        return Outcome::NoData;
    }
    let mut rows: Vec<SignificanceRow> = records.iter().map(SignificanceRow::from).collect();
    rows.sort_by(|a, b| b.year.cmp(&a.year));
    Outcome::Ready(Table { rows })
}

pub fn significance_table(dataset: &Dataset) -> Outcome<Table<SignificanceRow>> {
    significance_rows(&dataset.employment_significance)
}
