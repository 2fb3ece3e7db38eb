// 📐 Derived-Metric Calculators
//
//   var_pp  = curr - prev
//   var_pct = var_pp / prev * 100            (None when prev == 0)
//   growth  = (end - start) / start * 100    (sector employment)
//   gic     = ((end / start)^(1 / n) - 1) * 100, n = end_year - start_year
//
// Missing inputs exclude the row; they are never read as zero.

use crate::aggregate::group_by;
use crate::dataset::{DecileIncomeRecord, SectorEmploymentRecord, Year};
use crate::selection::YearRange;
use crate::series::Outcome;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Sector growth charts show at most this many sectors.
pub const TOP_SECTORS: usize = 10;

/// Deciles covered by the growth incidence curve.
pub const DECILES: std::ops::RangeInclusive<i32> = 1..=10;

// ============================================================================
// YEAR-OVER-YEAR VARIATION
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariationRow {
    pub year: Year,
    pub indicator: String,
    pub value: f64,
    pub previous_value: f64,
    /// Percentage-point difference
    pub var_pp: f64,
    /// Relative change in percent; `None` when the previous value is zero
    pub var_pct: Option<f64>,
}

/// Relative change in percent, or `None` when the base is zero.
pub fn percent_change(previous: f64, current: f64) -> Option<f64> {
    if previous == 0.0 {
        None
    } else {
        Some((current - previous) / previous * 100.0)
    }
}

/// Rows for each consecutive pair of `points` (sorted ascending by year
/// first). The first point has no predecessor and yields no row.
pub fn year_over_year(indicator: &str, points: &[(Year, f64)]) -> Vec<VariationRow> {
    let mut sorted = points.to_vec();
    sorted.sort_by_key(|(year, _)| *year);

    sorted
        .windows(2)
        .map(|pair| {
            let (_, prev) = pair[0];
            let (year, curr) = pair[1];
            VariationRow {
                year,
                indicator: indicator.to_string(),
                value: curr,
                previous_value: prev,
                var_pp: curr - prev,
                var_pct: percent_change(prev, curr),
            }
        })
        .collect()
}

/// Newest year first; ties ordered by indicator name.
pub fn sort_variation_rows(rows: &mut [VariationRow]) {
    rows.sort_by(|a, b| b.year.cmp(&a.year).then_with(|| a.indicator.cmp(&b.indicator)));
}

// ============================================================================
// SECTOR EMPLOYMENT GROWTH
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorGrowth {
    pub sector: String,
    pub start_value: f64,
    pub end_value: f64,
    /// Percent change between the two years
    pub growth: f64,
}

/// Percent change of employment per sector between `range.start` and
/// `range.end`, highest first, at most [`TOP_SECTORS`] rows. Sectors missing
/// either endpoint, or with zero start employment, are left out. A zero end
/// value is kept and reported as -100%, where the published dashboard drops
/// the sector for a zero at either endpoint.
pub fn sector_growth(records: &[SectorEmploymentRecord], range: YearRange) -> Outcome<Vec<SectorGrowth>> {
    if range.span().is_none() {
        return Outcome::SelectDistinctYears;
    }

    let mut results: Vec<SectorGrowth> = group_by(records, |r| r.sector.clone())
        .into_iter()
        .filter_map(|group| {
            let at = |year: Year| {
                group
                    .records
                    .iter()
                    .rev()
                    .find(|r| r.year == year)
                    .and_then(|r| r.employment_thousands)
            };
            let start = at(range.start)?;
            let end = at(range.end)?;
            let growth = percent_change(start, end)?;
            Some(SectorGrowth {
                sector: group.key,
                start_value: start,
                end_value: end,
                growth,
            })
        })
        .collect();

    tracing::debug!(%range, sectors = results.len(), "sector growth computed");

    if results.is_empty() {
        return Outcome::NoData;
    }

    results.sort_by(|a, b| b.growth.total_cmp(&a.growth));
    results.truncate(TOP_SECTORS);
    Outcome::Ready(results)
}

// ============================================================================
// GROWTH INCIDENCE CURVE
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecileGrowth {
    pub decile: i32,
    pub start_income: f64,
    pub end_income: f64,
    /// Annualized growth in percent
    pub growth: f64,
}

/// Compound annual growth rate in percent over `periods` years.
pub fn annualized_growth(start: f64, end: f64, periods: i32) -> Option<f64> {
    if periods <= 0 || start <= 0.0 || end < 0.0 {
        return None;
    }
    let rate = (end / start).powf(1.0 / periods as f64) - 1.0;
    rate.is_finite().then_some(rate * 100.0)
}

/// Annualized income growth per decile between the two years of `range`.
pub fn growth_incidence(records: &[DecileIncomeRecord], range: YearRange) -> Outcome<Vec<DecileGrowth>> {
    let periods = match range.span() {
        Some(n) => n,
        None => return Outcome::SelectDistinctYears,
    };

    let mut start_by_decile: HashMap<i32, f64> = HashMap::new();
    let mut end_by_decile: HashMap<i32, f64> = HashMap::new();
    for record in records {
        let Some(income) = record.average_income else {
            continue;
        };
        if record.year == range.start {
            start_by_decile.insert(record.decile, income);
        } else if record.year == range.end {
            end_by_decile.insert(record.decile, income);
        }
    }

    let points: Vec<DecileGrowth> = DECILES
        .filter_map(|decile| {
            let start = *start_by_decile.get(&decile)?;
            let end = *end_by_decile.get(&decile)?;
            let growth = annualized_growth(start, end, periods)?;
            Some(DecileGrowth {
                decile,
                start_income: start,
                end_income: end,
                growth,
            })
        })
        .collect();

    if points.is_empty() {
        Outcome::NoData
    } else {
        Outcome::Ready(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sector(name: &str, year: Year, value: Option<f64>) -> SectorEmploymentRecord {
        SectorEmploymentRecord {
            sector: name.to_string(),
            year,
            employment_thousands: value,
        }
    }

    fn decile(d: i32, year: Year, income: Option<f64>) -> DecileIncomeRecord {
        DecileIncomeRecord {
            year,
            decile: d,
            average_income: income,
        }
    }

    #[test]
    fn test_year_over_year_rows() {
        let rows = year_over_year("Pobreza", &[(2010, 10.0), (2011, 9.0), (2012, 9.0)]);
        assert_eq!(rows.len(), 2);

        assert_eq!(rows[0].year, 2011);
        assert!((rows[0].var_pp - -1.0).abs() < 1e-9);
        assert!((rows[0].var_pct.unwrap() - -10.0).abs() < 1e-9);

        assert_eq!(rows[1].year, 2012);
        assert_eq!(rows[1].var_pp, 0.0);
        assert_eq!(rows[1].var_pct, Some(0.0));
    }

    #[test]
    fn test_year_over_year_zero_base() {
        let rows = year_over_year("Pobreza", &[(2020, 0.0), (2021, 5.0)]);
        assert_eq!(rows[0].var_pp, 5.0);
        assert_eq!(rows[0].var_pct, None);
    }

    #[test]
    fn test_year_over_year_sorts_input() {
        let rows = year_over_year("Pobreza", &[(2012, 9.0), (2010, 10.0)]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].previous_value, 10.0);
    }

    #[test]
    fn test_sort_variation_rows() {
        let mut rows = year_over_year("Pobreza", &[(2020, 30.0), (2021, 27.0)]);
        rows.extend(year_over_year("Pobreza Extrema", &[(2020, 10.0), (2021, 9.0)]));
        rows.extend(year_over_year("Pobreza", &[(2018, 23.0), (2019, 25.0)]));
        sort_variation_rows(&mut rows);

        let order: Vec<(Year, &str)> = rows.iter().map(|r| (r.year, r.indicator.as_str())).collect();
        assert_eq!(order, vec![(2021, "Pobreza"), (2021, "Pobreza Extrema"), (2019, "Pobreza")]);
    }

    #[test]
    fn test_sector_growth_basic() {
        let records = vec![
            sector("Comercio", 2019, Some(100.0)),
            sector("Comercio", 2023, Some(120.0)),
            sector("Turismo", 2023, Some(80.0)),
        ];
        let result = sector_growth(&records, YearRange::new(2019, 2023)).into_ready().unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].sector, "Comercio");
        assert!((result[0].growth - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_sector_growth_excludes_missing_and_zero_start() {
        let records = vec![
            sector("Minería", 2019, Some(0.0)),
            sector("Minería", 2023, Some(10.0)),
            sector("Pesca", 2019, None),
            sector("Pesca", 2023, Some(10.0)),
        ];
        assert_eq!(sector_growth(&records, YearRange::new(2019, 2023)), Outcome::NoData);
    }

    #[test]
    fn test_sector_growth_keeps_zero_end() {
        let records = vec![sector("Minería", 2019, Some(40.0)), sector("Minería", 2023, Some(0.0))];
        let result = sector_growth(&records, YearRange::new(2019, 2023)).into_ready().unwrap();
        assert_eq!(result[0].end_value, 0.0);
        assert!((result[0].growth + 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_sector_growth_top_ten_descending() {
        let mut records = Vec::new();
        for i in 0..12 {
            let name = format!("Sector {}", i);
            records.push(sector(&name, 2019, Some(100.0)));
            records.push(sector(&name, 2023, Some(100.0 + i as f64)));
        }
        let result = sector_growth(&records, YearRange::new(2019, 2023)).into_ready().unwrap();
        assert_eq!(result.len(), TOP_SECTORS);
        assert_eq!(result[0].sector, "Sector 11");
        assert!(result.windows(2).all(|w| w[0].growth >= w[1].growth));
    }

    #[test]
    fn test_sector_growth_reversed_range() {
        let records = vec![sector("Comercio", 2019, Some(100.0))];
        assert_eq!(
            sector_growth(&records, YearRange::new(2023, 2019)),
            Outcome::SelectDistinctYears
        );
    }

    #[test]
    fn test_annualized_growth() {
        let g = annualized_growth(1000.0, 1210.0, 2).unwrap();
        assert!((g - 10.0).abs() < 1e-6);
        assert_eq!(annualized_growth(0.0, 1210.0, 2), None);
        assert_eq!(annualized_growth(1000.0, 1210.0, 0), None);
    }

    #[test]
    fn test_growth_incidence_curve() {
        let records = vec![
            decile(1, 2019, Some(1000.0)),
            decile(1, 2021, Some(1210.0)),
            decile(2, 2019, Some(2000.0)),
            decile(2, 2021, None),
            decile(3, 2019, Some(-5.0)),
            decile(3, 2021, Some(100.0)),
            decile(4, 2021, Some(100.0)),
        ];
        let points = growth_incidence(&records, YearRange::new(2019, 2021)).into_ready().unwrap();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].decile, 1);
        assert!((points[0].growth - 10.0).abs() < 1e-6);
    }

    #[test]
    fn test_growth_incidence_requires_distinct_years() {
        let records = vec![decile(1, 2019, Some(1000.0))];
        assert_eq!(
            growth_incidence(&records, YearRange::new(2019, 2019)),
            Outcome::SelectDistinctYears
        );
        assert_eq!(
            growth_incidence(&records, YearRange::new(2021, 2019)),
            Outcome::SelectDistinctYears
        );
    }
}
