// 🌱 Growth distribution transforms

use crate::aggregate::unique_sorted_years;
use crate::dataset::{Dataset, Year};
use crate::metrics::growth_incidence;
use crate::selection::YearRange;
use crate::series::{cross_section, BarOrder, CrossSection, Outcome};

/// Years offered by the GIC start/end selectors.
pub fn gic_years(dataset: &Dataset) -> Vec<Year> {
    unique_sorted_years(&dataset.decile_income)
}

/// Default GIC period: first to last available year.
pub fn default_gic_range(dataset: &Dataset) -> Option<YearRange> {
    let years = gic_years(dataset);
    Some(YearRange::new(*years.first()?, *years.last()?))
}

/// Growth incidence curve between `start` and `end`; either endpoint left
/// as `None` falls back to the default range.
pub fn growth_incidence_curve(dataset: &Dataset, start: Option<Year>, end: Option<Year>) -> Outcome<CrossSection> {
    let Some(default) = default_gic_range(dataset) else {
        return Outcome::NoData;
    };
    let range = YearRange::new(start.unwrap_or(default.start), end.unwrap_or(default.end));

    growth_incidence(&dataset.decile_income, range).map(|points| {
        cross_section(
            None,
            points
                .into_iter()
                .map(|p| (format!("Decil {}", p.decile), p.growth))
                .collect(),
            BarOrder::Natural,
        )
    })
}

/// Average income per demographic group, labelled `dimension: category`.
/// Groups without an income value are left out.
pub fn demographic_income(dataset: &Dataset) -> Outcome<CrossSection> {
    let bars: Vec<(String, f64)> = dataset
        .demographic_income
        .iter()
        .filter_map(|r| {
            let income = r.income?;
            let label = [r.dimension.as_deref(), r.category.as_deref()]
                .into_iter()
                .flatten()
                .filter(|part| !part.is_empty())
                .collect::<Vec<_>>()
                .join(": ");
            Some((label, income))
        })
        .collect();

    if bars.is_empty() {
        Outcome::NoData
    } else {
        Outcome::Ready(cross_section(None, bars, BarOrder::Natural))
    }
}
