// ⚖️ Inequality transforms - Gini, top income shares, percentile incomes

use crate::aggregate::group_by;
use crate::dataset::{Dataset, ShareRecord, Year};
use crate::selection::ShareVariable;
use crate::series::{single_series, time_series, Outcome, Table, TimeSeries};
use serde::{Deserialize, Serialize};

/// Panel category excluded from the national Gini chart.
pub const REGIONAL_AGGREGATE: &str = "LAC";

pub const HOME_COUNTRY: &str = "Ecuador";

/// The regional comparison starts here.
pub const LATAM_FIRST_YEAR: Year = 1980;

/// Gini before taxes and after each tax stage.
pub fn gini_tax_series(dataset: &Dataset) -> Outcome<TimeSeries> {
    time_series(&dataset.gini_tax_impact, |r| r.category.clone())
}

/// National, urban and rural Gini.
pub fn gini_panel_series(dataset: &Dataset) -> Outcome<TimeSeries> {
    time_series(
        dataset
            .gini_panel
            .iter()
            .filter(|r| r.category != REGIONAL_AGGREGATE),
        |r| r.category.clone(),
    )
}

/// National Gini only, for the home page.
pub fn gini_home_series(dataset: &Dataset) -> Outcome<TimeSeries> {
    single_series(
        dataset.gini_panel.iter().filter(|r| r.category == HOME_COUNTRY),
        "Gini",
    )
}

/// Countries available in the Gini comparison, alphabetical.
pub fn gini_countries(dataset: &Dataset) -> Vec<String> {
    let mut countries: Vec<String> = group_by(&dataset.gini_lac, |r| r.country.clone())
        .into_iter()
        .map(|g| g.key)
        .collect();
    countries.sort();
    countries
}

pub fn gini_comparison(dataset: &Dataset, countries: &[String]) -> Outcome<TimeSeries> {
    time_series(
        dataset.gini_lac.iter().filter(|r| countries.contains(&r.country)),
        |r| r.country.clone(),
    )
}

/// Monthly income of taxpayers at selected percentiles.
pub fn taxpayer_income_series(dataset: &Dataset) -> Outcome<TimeSeries> {
    time_series(&dataset.taxpayer_income, |r| r.percentile.clone())
}

/// National income or wealth share per percentile group.
pub fn national_shares(dataset: &Dataset, variable: ShareVariable) -> Outcome<TimeSeries> {
    let records: &[ShareRecord] = match variable {
        ShareVariable::Income => &dataset.income_shares,
        ShareVariable::Wealth => &dataset.wealth_shares,
    };
    time_series(records, |r| r.percentile.clone())
}

/// Share held by `percentile` in each selected country, from 1980 on. An
/// unknown variable selector matches nothing.
pub fn latam_shares(
    dataset: &Dataset,
    selector: &str,
    percentile: &str,
    countries: &[String],
) -> Outcome<TimeSeries> {
    let Some(variable) = ShareVariable::from_selector(selector) else {
        return Outcome::NoData;
    };
    let records: &[ShareRecord] = match variable {
        ShareVariable::Income => &dataset.income_shares_latam,
        ShareVariable::Wealth => &dataset.wealth_shares_latam,
    };
    time_series(
        records.iter().filter(|r| {
            r.percentile == percentile
                && r.year >= LATAM_FIRST_YEAR
                && r.country.as_ref().map_or(false, |c| countries.contains(c))
        }),
        |r| r.country.clone().unwrap_or_default(),
    )
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopulationCard {
    pub percentile: String,
    pub year: Year,
    pub population: Option<f64>,
}

/// Population living in each top percentile group.
pub fn population_cards(dataset: &Dataset) -> Outcome<Table<PopulationCard>> {
    if dataset.population_percentiles.is_empty() {
        return Outcome::NoData;
    }
    let rows = dataset
        .population_percentiles
        .iter()
        .map(|r| PopulationCard {
            percentile: r.percentile.clone(),
            year: r.year,
            population: r.population,
        })
        .collect();
    Outcome::Ready(Table { rows })
}
