// 💵 Wage transforms

use crate::dataset::{Dataset, WageGapRecord};
use crate::selection::WageGapDimension;
use crate::series::{latest_cross_section, time_series, BarOrder, CrossSection, Outcome, TimeSeries};

pub fn wage_series(dataset: &Dataset) -> Outcome<TimeSeries> {
    time_series(&dataset.wage_series, |r| r.wage_type.clone())
}

/// Rows of the selected sheet that carry a category for that dimension.
fn gap_rows<'a>(dataset: &'a Dataset, dimension: WageGapDimension) -> impl Iterator<Item = &'a WageGapRecord> {
    dimension
        .sheet(&dataset.wage_gaps)
        .iter()
        .filter(move |r| dimension.category(r).is_some())
}

fn category_label(dimension: WageGapDimension, record: &WageGapRecord) -> String {
    dimension.category(record).unwrap_or_default().to_string()
}

/// Average wage per category in the latest year, in data order.
pub fn wage_gap_latest(dataset: &Dataset, selector: &str) -> Outcome<CrossSection> {
    let Some(dimension) = WageGapDimension::from_selector(selector) else {
        return Outcome::NoData;
    };
    latest_cross_section(
        gap_rows(dataset, dimension),
        |r| category_label(dimension, r),
        BarOrder::Natural,
    )
}

/// Average wage per category over time.
pub fn wage_gap_trend(dataset: &Dataset, selector: &str) -> Outcome<TimeSeries> {
    let Some(dimension) = WageGapDimension::from_selector(selector) else {
        return Outcome::NoData;
    };
    time_series(gap_rows(dataset, dimension), |r| category_label(dimension, r))
}
