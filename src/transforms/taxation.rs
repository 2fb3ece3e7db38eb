// 🧾 Taxation transforms

use crate::aggregate::{latest_year, unique_sorted_years};
use crate::dataset::{Dataset, Year};
use crate::series::{cross_section, time_series, BarOrder, CrossSection, Outcome, TimeSeries};

/// Tax revenue as % of GDP by tax type.
pub fn composition_series(dataset: &Dataset) -> Outcome<TimeSeries> {
    time_series(&dataset.tax_charts.composition, |r| r.tax_type.clone())
}

/// Years offered by the tax burden year selector.
pub fn burden_years(dataset: &Dataset) -> Vec<Year> {
    unique_sorted_years(&dataset.tax_charts.burden)
}

/// Tax burden per income decile for `year` (latest when `None`), deciles
/// ascending.
pub fn burden_by_decile(dataset: &Dataset, year: Option<Year>) -> Outcome<CrossSection> {
    let Some(year) = year.or_else(|| latest_year(&dataset.tax_charts.burden)) else {
        return Outcome::NoData;
    };

    let mut rows: Vec<(i32, f64)> = dataset
        .tax_charts
        .burden
        .iter()
        .filter(|r| r.year == year)
        .filter_map(|r| r.burden_pct.map(|v| (r.decile, v)))
        .collect();
    if rows.is_empty() {
        return Outcome::NoData;
    }
    rows.sort_by_key(|(decile, _)| *decile);

    let bars = rows
        .into_iter()
        .map(|(decile, v)| (format!("Decil {}", decile), v))
        .collect();
    Outcome::Ready(cross_section(Some(year), bars, BarOrder::Natural))
}
