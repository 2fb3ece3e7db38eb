// 🏠 Home page - headline scorecards

use crate::dataset::{Dataset, IndicatorRecord, Observation, Year};
use crate::indicators::{EXTREME_POVERTY_STORED, MULTIDIMENSIONAL_POVERTY, NBI, POVERTY};
use crate::transforms::inequality::HOME_COUNTRY;
use crate::transforms::poverty::NATIONAL_LEVEL;
use serde::{Deserialize, Serialize};

pub const TOP_PERCENTILE: &str = "Top 1%";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreUnit {
    Percent,
    Index,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scorecard {
    pub label: String,
    pub value: Option<f64>,
    pub year: Option<Year>,
    pub unit: ScoreUnit,
}

impl Scorecard {
    /// Value as shown on the card: `28.0%`, `0.455`, or `—` when missing.
    pub fn display_value(&self) -> String {
        match (self.value, self.unit) {
            (Some(v), ScoreUnit::Percent) => format!("{:.1}%", v),
            (Some(v), ScoreUnit::Index) => format!("{:.3}", v),
            (None, _) => "—".to_string(),
        }
    }
}

/// Most recent observed value; the last record wins within that year.
fn latest<'a, T, I>(records: I) -> (Option<f64>, Option<Year>)
where
    I: IntoIterator<Item = &'a T>,
    T: Observation + 'a,
{
    let mut best: Option<(Year, f64)> = None;
    for record in records {
        if let Some(value) = record.value() {
            if best.map_or(true, |(year, _)| record.year() >= year) {
                best = Some((record.year(), value));
            }
        }
    }
    (best.map(|(_, v)| v), best.map(|(y, _)| y))
}

fn card(label: &str, unit: ScoreUnit, (value, year): (Option<f64>, Option<Year>)) -> Scorecard {
    Scorecard {
        label: label.to_string(),
        value,
        year,
        unit,
    }
}

fn indicator<'a>(records: &'a [IndicatorRecord], name: &'a str) -> impl Iterator<Item = &'a IndicatorRecord> {
    records.iter().filter(move |r| r.indicator == name)
}

/// Headline cards, in page order.
pub fn scorecards(dataset: &Dataset) -> Vec<Scorecard> {
    vec![
        card(POVERTY, ScoreUnit::Percent, latest(indicator(&dataset.scorecards, POVERTY))),
        card(
            "Pobreza Extrema",
            ScoreUnit::Percent,
            latest(indicator(&dataset.scorecards, EXTREME_POVERTY_STORED)),
        ),
        card(
            NBI,
            ScoreUnit::Percent,
            latest(
                dataset
                    .poverty_levels
                    .iter()
                    .filter(|r| r.indicator == NBI && r.level == NATIONAL_LEVEL),
            ),
        ),
        card(
            MULTIDIMENSIONAL_POVERTY,
            ScoreUnit::Percent,
            latest(indicator(&dataset.multidimensional_scorecard, MULTIDIMENSIONAL_POVERTY)),
        ),
        card(
            "Empleo no adecuado",
            ScoreUnit::Percent,
            latest(indicator(&dataset.employment_scorecard, "Empleo no adecuado")),
        ),
        card(
            "Desempleo",
            ScoreUnit::Percent,
            latest(indicator(&dataset.employment_scorecard, "Desempleo")),
        ),
        card(
            "Gini (Ecuador)",
            ScoreUnit::Index,
            latest(dataset.gini_panel.iter().filter(|r| r.category == HOME_COUNTRY)),
        ),
        card(
            "Top 1% Ingreso",
            ScoreUnit::Percent,
            latest(dataset.income_shares.iter().filter(|r| r.percentile == TOP_PERCENTILE)),
        ),
    ]
}
