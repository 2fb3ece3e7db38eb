// 📉 Poverty transforms
//
// The indicator selector drives every chart on the page. Each chart reads
// its own collection, so the UI label goes through `stored_label` first.

use super::employment::{significance_rows, SignificanceRow};
use crate::aggregate::{group_by, latest_year, unique_sorted_years};
use crate::dataset::{Collection, Dataset, ProvincialRecord, Year};
use crate::indicators::{self, stored_label};
use crate::metrics::{sort_variation_rows, year_over_year, VariationRow};
use crate::series::{
    latest_cross_section, merge_series, points, time_series, BarOrder, CrossSection, Outcome, Table, TimeSeries,
};
use serde::{Deserialize, Serialize};

/// Level whose series feeds the national variation table.
pub const NATIONAL_LEVEL: &str = "Nacional";

const SEX: &str = "sexo";
const ETHNICITY: &str = "etnia";

// ============================================================================
// BY LEVEL (pobrezaTableau)
// ============================================================================

pub fn level_series(dataset: &Dataset, indicator: &str) -> Outcome<TimeSeries> {
    let stored = stored_label(Collection::PovertyLevels, indicator);
    time_series(
        dataset.poverty_levels.iter().filter(|r| r.indicator == stored),
        |r| r.level.clone(),
    )
}

pub fn level_latest(dataset: &Dataset, indicator: &str) -> Outcome<CrossSection> {
    let stored = stored_label(Collection::PovertyLevels, indicator);
    latest_cross_section(
        dataset.poverty_levels.iter().filter(|r| r.indicator == stored),
        |r| r.level.clone(),
        BarOrder::Natural,
    )
}

// ============================================================================
// BY SEX / ETHNICITY (pobrezaSexoEtnia)
// ============================================================================

pub fn sex_series(dataset: &Dataset, indicator: &str) -> Outcome<TimeSeries> {
    let stored = stored_label(Collection::PovertySexEthnicity, indicator);
    time_series(
        dataset
            .poverty_sex_ethnicity
            .iter()
            .filter(|r| r.group_type == SEX && r.indicator == stored),
        |r| r.group.clone(),
    )
}

pub fn sex_latest(dataset: &Dataset, indicator: &str) -> Outcome<CrossSection> {
    let stored = stored_label(Collection::PovertySexEthnicity, indicator);
    latest_cross_section(
        dataset
            .poverty_sex_ethnicity
            .iter()
            .filter(|r| r.group_type == SEX && r.indicator == stored),
        |r| r.group.clone(),
        BarOrder::Natural,
    )
}

/// Latest-year poverty by ethnicity, highest first.
pub fn ethnicity_latest(dataset: &Dataset, indicator: &str) -> Outcome<CrossSection> {
    let stored = stored_label(Collection::PovertySexEthnicity, indicator);
    latest_cross_section(
        dataset
            .poverty_sex_ethnicity
            .iter()
            .filter(|r| r.group_type == ETHNICITY && r.indicator == stored),
        |r| r.group.clone(),
        BarOrder::Descending,
    )
}

// ============================================================================
// BY EDUCATION / AGE / REGION
// ============================================================================

pub fn education_series(dataset: &Dataset, indicator: &str) -> Outcome<TimeSeries> {
    let stored = stored_label(Collection::PovertyEducation, indicator);
    time_series(
        dataset.poverty_education.iter().filter(|r| r.indicator == stored),
        |r| r.education_level.clone(),
    )
}

pub fn education_latest(dataset: &Dataset, indicator: &str) -> Outcome<CrossSection> {
    let stored = stored_label(Collection::PovertyEducation, indicator);
    latest_cross_section(
        dataset.poverty_education.iter().filter(|r| r.indicator == stored),
        |r| r.education_level.clone(),
        BarOrder::Natural,
    )
}

pub fn age_series(dataset: &Dataset, indicator: &str) -> Outcome<TimeSeries> {
    let stored = stored_label(Collection::PovertyAge, indicator);
    time_series(
        dataset.poverty_age.iter().filter(|r| r.indicator == stored),
        |r| r.age_group.clone(),
    )
}

pub fn age_latest(dataset: &Dataset, indicator: &str) -> Outcome<CrossSection> {
    let stored = stored_label(Collection::PovertyAge, indicator);
    latest_cross_section(
        dataset.poverty_age.iter().filter(|r| r.indicator == stored),
        |r| r.age_group.clone(),
        BarOrder::Natural,
    )
}

pub fn region_series(dataset: &Dataset, indicator: &str) -> Outcome<TimeSeries> {
    let stored = stored_label(Collection::PovertyRegion, indicator);
    time_series(
        dataset.poverty_region.iter().filter(|r| r.indicator == stored),
        |r| r.region.clone(),
    )
}

pub fn region_latest(dataset: &Dataset, indicator: &str) -> Outcome<CrossSection> {
    let stored = stored_label(Collection::PovertyRegion, indicator);
    latest_cross_section(
        dataset.poverty_region.iter().filter(|r| r.indicator == stored),
        |r| r.region.clone(),
        BarOrder::Natural,
    )
}

// ============================================================================
// HISTORICAL SERIES
// ============================================================================

/// Income poverty and extreme poverty on one axis.
pub fn historical_combined(dataset: &Dataset) -> Outcome<TimeSeries> {
    let extreme = stored_label(Collection::HistoricalSeries, indicators::EXTREME_POVERTY_UI);
    let poverty_points = points(
        dataset
            .historical_series
            .iter()
            .filter(|r| r.indicator == indicators::POVERTY),
    );
    let extreme_points = points(dataset.historical_series.iter().filter(|r| r.indicator == extreme));
    merge_series(vec![
        (indicators::POVERTY.to_string(), poverty_points),
        (extreme.to_string(), extreme_points),
    ])
}

/// Income poverty against multidimensional poverty.
pub fn income_vs_multidimensional(dataset: &Dataset) -> Outcome<TimeSeries> {
    let income = points(
        dataset
            .historical_series
            .iter()
            .filter(|r| r.indicator == indicators::POVERTY),
    );
    let multi = points(
        dataset
            .multidimensional_series
            .iter()
            .filter(|r| r.indicator == indicators::MULTIDIMENSIONAL_POVERTY),
    );
    merge_series(vec![
        ("Pobreza por ingreso".to_string(), income),
        (indicators::MULTIDIMENSIONAL_POVERTY.to_string(), multi),
    ])
}

// ============================================================================
// PROVINCIAL TABLE
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProvinceRow {
    pub province: String,
    pub poverty: Option<f64>,
    pub extreme_poverty: Option<f64>,
}

/// Years offered by the provincial table's year selector.
pub fn province_years(dataset: &Dataset) -> Vec<Year> {
    unique_sorted_years(&dataset.poverty_provincial)
}

/// Poverty and extreme poverty per province for `year` (latest when
/// `None`), highest poverty first; provinces without a poverty value last.
pub fn provincial_table(dataset: &Dataset, year: Option<Year>) -> Outcome<Table<ProvinceRow>> {
    let year = match year.or_else(|| latest_year(&dataset.poverty_provincial)) {
        Some(year) => year,
        None => return Outcome::NoData,
    };
    let extreme = stored_label(Collection::PovertyProvincial, indicators::EXTREME_POVERTY_UI);

    let value_of = |records: &[&ProvincialRecord], indicator: &str| {
        records
            .iter()
            .rev()
            .find(|r| r.indicator == indicator)
            .and_then(|r| r.value)
    };

    let mut rows: Vec<ProvinceRow> = group_by(
        dataset.poverty_provincial.iter().filter(|r| r.year == year),
        |r| r.province.clone(),
    )
    .into_iter()
    .map(|group| ProvinceRow {
        poverty: value_of(&group.records, indicators::POVERTY),
        extreme_poverty: value_of(&group.records, extreme),
        province: group.key,
    })
    .collect();

    if rows.is_empty() {
        return Outcome::NoData;
    }

    rows.sort_by(|a, b| match (a.poverty, b.poverty) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });

    Outcome::Ready(Table { rows })
}

// ============================================================================
// VARIATION TABLES
// ============================================================================

/// Year-over-year change of the national poverty and extreme poverty
/// series, newest year first.
pub fn national_variation(dataset: &Dataset) -> Outcome<Table<VariationRow>> {
    let mut rows = Vec::new();
    for ui_label in [indicators::POVERTY, indicators::EXTREME_POVERTY_UI] {
        let stored = stored_label(Collection::PovertyLevels, ui_label);
        let national = points(
            dataset
                .poverty_levels
                .iter()
                .filter(|r| r.indicator == stored && r.level == NATIONAL_LEVEL),
        );
        rows.extend(year_over_year(ui_label, &national));
    }

    if rows.is_empty() {
        return Outcome::NoData;
    }
    sort_variation_rows(&mut rows);
    Outcome::Ready(Table { rows })
}

/// Published poverty variations with their significance verdict.
pub fn significance_table(dataset: &Dataset) -> Outcome<Table<SignificanceRow>> {
    significance_rows(&dataset.poverty_significance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::sample_dataset;

    #[test]
    fn test_level_series_by_indicator() {
        let dataset = sample_dataset();
        let ts = level_series(&dataset, "Pobreza").into_ready().unwrap();
        assert_eq!(ts.years, vec![2022, 2023]);
        let labels: Vec<&str> = ts.series.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["Nacional", "Urbano", "Rural"]);

        let extreme = level_series(&dataset, "Pobreza Extrema").into_ready().unwrap();
        assert_eq!(extreme.series("Rural").unwrap().values, vec![None, Some(20.0)]);
    }

    #[test]
    fn test_level_latest_natural_order() {
        let dataset = sample_dataset();
        let bars = level_latest(&dataset, "Pobreza").into_ready().unwrap();
        assert_eq!(bars.year, Some(2023));
        assert_eq!(bars.labels, vec!["Nacional", "Urbano", "Rural"]);
        assert_eq!(bars.values, vec![26.0, 18.0, 46.4]);
    }

    #[test]
    fn test_nbi_latest_skips_null_year() {
        let dataset = sample_dataset();
        let bars = level_latest(&dataset, "NBI").into_ready().unwrap();
        assert_eq!(bars.year, Some(2023));
        assert_eq!(bars.value_of("Nacional"), Some(30.5));
    }

    #[test]
    fn test_ethnicity_latest_sorted_descending() {
        let dataset = sample_dataset();
        let bars = ethnicity_latest(&dataset, "Pobreza").into_ready().unwrap();
        assert_eq!(bars.year, Some(2023));
        assert_eq!(bars.labels, vec!["Indígena", "Montubio", "Mestizo"]);
        assert!(bars.values.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_breakdowns_map_extreme_poverty_label() {
        let dataset = sample_dataset();
        let sex = sex_latest(&dataset, "Pobreza Extrema").into_ready().unwrap();
        assert_eq!(sex.labels, vec!["Hombre"]);
        assert_eq!(sex.values, vec![9.5]);

        let edu = education_latest(&dataset, "Pobreza Extrema").into_ready().unwrap();
        assert_eq!(edu.value_of("Superior"), Some(1.5));
    }

    #[test]
    fn test_unknown_indicator_is_no_data() {
        let dataset = sample_dataset();
        assert_eq!(ethnicity_latest(&dataset, "Indigencia"), Outcome::NoData);
        assert_eq!(region_series(&dataset, "Indigencia"), Outcome::NoData);
        assert_eq!(age_latest(&dataset, "Pobreza Extrema"), Outcome::NoData);
    }

    #[test]
    fn test_region_series_and_latest() {
        let dataset = sample_dataset();
        let ts = region_series(&dataset, "Pobreza").into_ready().unwrap();
        assert_eq!(ts.series("Costa").unwrap().values, vec![Some(27.0), Some(29.0)]);
        assert_eq!(ts.series("Sierra").unwrap().values, vec![None, Some(20.0)]);

        let bars = region_latest(&dataset, "Pobreza").into_ready().unwrap();
        assert_eq!(bars.labels, vec!["Costa", "Sierra", "Oriente"]);
    }

    #[test]
    fn test_sex_series_and_age_series() {
        let dataset = sample_dataset();
        let sex = sex_series(&dataset, "Pobreza").into_ready().unwrap();
        assert_eq!(sex.series("Mujer").unwrap().values, vec![Some(25.4), Some(26.5)]);

        let age = age_series(&dataset, "Pobreza").into_ready().unwrap();
        assert_eq!(age.years, vec![2023]);
        assert_eq!(age.series.len(), 2);

        let edu = education_series(&dataset, "Pobreza").into_ready().unwrap();
        assert_eq!(edu.series("Menos que superior").unwrap().values, vec![Some(30.0)]);
    }

    #[test]
    fn test_historical_series() {
        let dataset = sample_dataset();
        let combined = historical_combined(&dataset).into_ready().unwrap();
        assert_eq!(combined.years, vec![2007, 2010, 2024]);
        assert_eq!(
            combined.series("Pobreza extrema").unwrap().values,
            vec![Some(16.5), None, Some(12.7)]
        );

        let multi = income_vs_multidimensional(&dataset).into_ready().unwrap();
        assert_eq!(multi.years, vec![2007, 2009, 2010, 2023, 2024]);
        assert_eq!(
            multi.series("Pobreza Multidimensional").unwrap().values,
            vec![None, Some(51.0), Some(46.1), Some(38.1), None]
        );
    }

    #[test]
    fn test_provincial_table_latest_year() {
        let dataset = sample_dataset();
        assert_eq!(province_years(&dataset), vec![2022, 2023]);

        let table = provincial_table(&dataset, None).into_ready().unwrap();
        let order: Vec<&str> = table.rows.iter().map(|r| r.province.as_str()).collect();
        assert_eq!(order, vec!["Morona Santiago", "Guayas", "Azuay", "Galápagos"]);
        assert_eq!(table.rows[1].extreme_poverty, Some(6.0));
        assert_eq!(table.rows[2].extreme_poverty, None);
        assert_eq!(table.rows[3].poverty, None);
        assert_eq!(table.rows[3].extreme_poverty, Some(1.0));
    }

    #[test]
    fn test_provincial_table_selected_year() {
        let dataset = sample_dataset();
        let table = provincial_table(&dataset, Some(2022)).into_ready().unwrap();
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].poverty, Some(20.0));

        assert_eq!(provincial_table(&dataset, Some(1990)), Outcome::NoData);
    }

    #[test]
    fn test_national_variation_table() {
        let dataset = sample_dataset();
        let table = national_variation(&dataset).into_ready().unwrap();
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].indicator, "Pobreza");
        assert_eq!(table.rows[0].year, 2023);
        assert!((table.rows[0].var_pp - 0.8).abs() < 1e-9);
        assert_eq!(table.rows[1].indicator, "Pobreza Extrema");
        assert!((table.rows[1].var_pp - 1.6).abs() < 1e-9);

        assert_eq!(national_variation(&Dataset::default()), Outcome::NoData);
    }

    #[test]
    fn test_transforms_are_idempotent() {
        let dataset = sample_dataset();
        assert_eq!(level_series(&dataset, "Pobreza"), level_series(&dataset, "Pobreza"));
        assert_eq!(ethnicity_latest(&dataset, "Pobreza"), ethnicity_latest(&dataset, "Pobreza"));
        assert_eq!(provincial_table(&dataset, None), provincial_table(&dataset, None));
        assert_eq!(national_variation(&dataset), national_variation(&dataset));
    }
}
