// 📈 Chart-ready shapes
//
// Transforms hand one of three shapes to the presentation layer: a time
// series aligned to a shared year axis, a single-year cross-section, or a
// table of typed rows. Each is wrapped in an Outcome so "no data" and
// "invalid year range" are explicit results instead of NaN bars.

use crate::aggregate::{align_to_years, group_by, latest_year, unique_sorted_years};
use crate::dataset::{Observation, Year};
use serde::Serialize;

/// Label of the single placeholder bar shown when a chart has no data.
pub const NO_DATA_LABEL: &str = "Sin datos";

/// Label shown when a year range is empty or reversed.
pub const SELECT_DISTINCT_YEARS_LABEL: &str = "Seleccione años distintos";

// ============================================================================
// OUTCOME
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum Outcome<T> {
    /// Data was found and shaped
    Ready(T),

    /// The filter matched nothing (or the collection is missing)
    NoData,

    /// Start year is not before end year; nothing was computed
    SelectDistinctYears,
}

impl<T> Outcome<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            Outcome::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_ready(self) -> Option<T> {
        match self {
            Outcome::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Outcome<U> {
        match self {
            Outcome::Ready(value) => Outcome::Ready(f(value)),
            Outcome::NoData => Outcome::NoData,
            Outcome::SelectDistinctYears => Outcome::SelectDistinctYears,
        }
    }
}

// ============================================================================
// SHAPES
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub label: String,
    /// One entry per year of the owning axis; `None` where unobserved
    pub values: Vec<Option<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSeries {
    pub years: Vec<Year>,
    pub series: Vec<Series>,
}

impl TimeSeries {
    pub fn series(&self, label: &str) -> Option<&Series> {
        self.series.iter().find(|s| s.label == label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrossSection {
    /// Year of the snapshot, when the bars come from one year
    pub year: Option<Year>,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl CrossSection {
    pub fn value_of(&self, label: &str) -> Option<f64> {
        self.labels
            .iter()
            .position(|l| l == label)
            .map(|i| self.values[i])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table<R> {
    pub rows: Vec<R>,
}

/// How the bars of a cross-section are ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarOrder {
    /// Order in which categories first appear in the data
    Natural,
    Descending,
}

// ============================================================================
// BUILDERS
// ============================================================================

/// Build a time series with one line per `label`. Records without a value
/// are dropped before the year axis is computed.
pub fn time_series<'a, T, I, F>(records: I, label: F) -> Outcome<TimeSeries>
where
    I: IntoIterator<Item = &'a T>,
    T: Observation + 'a,
    F: Fn(&T) -> String,
{
    let observed: Vec<&T> = records.into_iter().filter(|r| r.value().is_some()).collect();
    if observed.is_empty() {
        return Outcome::NoData;
    }

    let years = unique_sorted_years(observed.iter().copied());
    let series = group_by(observed.iter().copied(), label)
        .into_iter()
        .map(|group| Series {
            values: align_to_years(&years, group.records.iter().copied()),
            label: group.key,
        })
        .collect();

    Outcome::Ready(TimeSeries { years, series })
}

/// Build a single-line time series labelled `label`.
pub fn single_series<'a, T, I>(records: I, label: &str) -> Outcome<TimeSeries>
where
    I: IntoIterator<Item = &'a T>,
    T: Observation + 'a,
{
    time_series(records, |_| label.to_string())
}

/// Combine independently filtered lines onto one shared year axis.
pub fn merge_series(lines: Vec<(String, Vec<(Year, f64)>)>) -> Outcome<TimeSeries> {
    let mut years: Vec<Year> = lines
        .iter()
        .flat_map(|(_, points)| points.iter().map(|(y, _)| *y))
        .collect();
    years.sort_unstable();
    years.dedup();
    if years.is_empty() {
        return Outcome::NoData;
    }

    let series = lines
        .into_iter()
        .map(|(label, points)| {
            let values = years
                .iter()
                .map(|y| points.iter().rev().find(|(py, _)| py == y).map(|(_, v)| *v))
                .collect();
            Series { label, values }
        })
        .collect();

    Outcome::Ready(TimeSeries { years, series })
}

/// Observed (year, value) points of `records`.
pub fn points<'a, T, I>(records: I) -> Vec<(Year, f64)>
where
    I: IntoIterator<Item = &'a T>,
    T: Observation + 'a,
{
    records
        .into_iter()
        .filter_map(|r| r.value().map(|v| (r.year(), v)))
        .collect()
}

/// Snapshot of the most recent year: one bar per `label`. When a label
/// repeats inside that year the last record wins.
pub fn latest_cross_section<'a, T, I, F>(records: I, label: F, order: BarOrder) -> Outcome<CrossSection>
where
    I: IntoIterator<Item = &'a T>,
    T: Observation + 'a,
    F: Fn(&T) -> String,
{
    let observed: Vec<&T> = records.into_iter().filter(|r| r.value().is_some()).collect();
    let year = match latest_year(observed.iter().copied()) {
        Some(year) => year,
        None => return Outcome::NoData,
    };

    let bars: Vec<(String, f64)> = group_by(observed.iter().copied().filter(|r| r.year() == year), label)
        .into_iter()
        .filter_map(|group| {
            let last = group.records.last()?;
            last.value().map(|v| (group.key, v))
        })
        .collect();

    Outcome::Ready(cross_section(Some(year), bars, order))
}

/// Build a cross-section from (label, value) bars.
pub fn cross_section(year: Option<Year>, mut bars: Vec<(String, f64)>, order: BarOrder) -> CrossSection {
    match order {
        BarOrder::Natural => {}
        BarOrder::Descending => bars.sort_by(|a, b| b.1.total_cmp(&a.1)),
    }
    let (labels, values) = bars.into_iter().unzip();
    CrossSection { year, labels, values }
}
