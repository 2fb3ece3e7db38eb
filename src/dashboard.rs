// 🧩 Presentation binding
//
// Turns the transforms of one topic into titled panels. This is the only
// layer that knows panel ids and titles; renderers take a TopicView and
// draw it without reaching back into the dataset.

use crate::dataset::Dataset;
use crate::error::SelectorError;
use crate::indicators;
use crate::selection::{Selection, ShareVariable, WageGapDimension};
use crate::series::{CrossSection, Outcome, NO_DATA_LABEL, SELECT_DISTINCT_YEARS_LABEL};
use crate::transforms::{employment, growth, home, inequality, poverty, taxation, wages};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// TOPICS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Topic {
    #[serde(rename = "inicio")]
    Home,
    #[serde(rename = "pobreza")]
    Poverty,
    #[serde(rename = "empleo")]
    Employment,
    #[serde(rename = "salarios")]
    Wages,
    #[serde(rename = "crecimiento")]
    Growth,
    #[serde(rename = "desigualdad")]
    Inequality,
    #[serde(rename = "tributacion")]
    Taxation,
}

impl Topic {
    pub const ALL: [Topic; 7] = [
        Topic::Home,
        Topic::Poverty,
        Topic::Employment,
        Topic::Wages,
        Topic::Growth,
        Topic::Inequality,
        Topic::Taxation,
    ];

    /// Identifier used in URLs and on the command line.
    pub fn slug(&self) -> &'static str {
        match self {
            Topic::Home => "inicio",
            Topic::Poverty => "pobreza",
            Topic::Employment => "empleo",
            Topic::Wages => "salarios",
            Topic::Growth => "crecimiento",
            Topic::Inequality => "desigualdad",
            Topic::Taxation => "tributacion",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Topic::Home => "Inicio",
            Topic::Poverty => "Pobreza",
            Topic::Employment => "Empleo",
            Topic::Wages => "Salarios",
            Topic::Growth => "Crecimiento",
            Topic::Inequality => "Desigualdad",
            Topic::Taxation => "Tributación",
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Topic {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Topic::ALL
            .into_iter()
            .find(|t| t.slug() == s.trim().to_lowercase())
            .ok_or_else(|| SelectorError::UnknownTopic(s.to_string()))
    }
}

// ============================================================================
// PANELS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelKind {
    LineChart,
    BarChart,
    Table,
    Cards,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Panel {
    pub id: String,
    pub title: String,
    pub kind: PanelKind,

    /// Text of the single placeholder bar/row when there is nothing to draw
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,

    pub body: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopicView {
    pub topic: Topic,
    pub title: String,
    pub panels: Vec<Panel>,
}

impl TopicView {
    pub fn panel(&self, id: &str) -> Option<&Panel> {
        self.panels.iter().find(|p| p.id == id)
    }
}

fn placeholder_for<T>(outcome: &Outcome<T>) -> Option<String> {
    match outcome {
        Outcome::Ready(_) => None,
        Outcome::NoData => Some(NO_DATA_LABEL.to_string()),
        Outcome::SelectDistinctYears => Some(SELECT_DISTINCT_YEARS_LABEL.to_string()),
    }
}

/// Collects panels for one topic.
struct ViewBuilder {
    panels: Vec<Panel>,
}

impl ViewBuilder {
    fn new() -> Self {
        ViewBuilder { panels: Vec::new() }
    }

    fn outcome<T: Serialize>(&mut self, id: &str, title: impl Into<String>, kind: PanelKind, outcome: Outcome<T>) -> Result<()> {
        let body = serde_json::to_value(&outcome).with_context(|| format!("Failed to serialize panel {}", id))?;
        self.panels.push(Panel {
            id: id.to_string(),
            title: title.into(),
            kind,
            placeholder: placeholder_for(&outcome),
            body,
        });
        Ok(())
    }

    /// Panels that are always present, such as selector options and cards.
    fn value<T: Serialize>(&mut self, id: &str, title: impl Into<String>, kind: PanelKind, value: &T) -> Result<()> {
        let body = serde_json::to_value(value).with_context(|| format!("Failed to serialize panel {}", id))?;
        self.panels.push(Panel {
            id: id.to_string(),
            title: title.into(),
            kind,
            placeholder: None,
            body,
        });
        Ok(())
    }

    fn finish(self, topic: Topic) -> TopicView {
        TopicView {
            topic,
            title: topic.title().to_string(),
            panels: self.panels,
        }
    }
}

/// "`title` (`year`)" when the bars come from one year.
fn with_year(title: &str, outcome: &Outcome<CrossSection>) -> String {
    match outcome.ready().and_then(|c| c.year) {
        Some(year) => format!("{} ({})", title, year),
        None => title.to_string(),
    }
}

// ============================================================================
// BINDING
// ============================================================================

/// Build every panel of `topic` for the current selection.
pub fn render_topic(dataset: &Dataset, selection: &Selection, topic: Topic) -> Result<TopicView> {
    let mut view = ViewBuilder::new();
    match topic {
        Topic::Home => bind_home(dataset, &mut view)?,
        Topic::Poverty => bind_poverty(dataset, selection, &mut view)?,
        Topic::Employment => bind_employment(dataset, selection, &mut view)?,
        Topic::Wages => bind_wages(dataset, selection, &mut view)?,
        Topic::Growth => bind_growth(dataset, selection, &mut view)?,
        Topic::Inequality => bind_inequality(dataset, selection, &mut view)?,
        Topic::Taxation => bind_taxation(dataset, selection, &mut view)?,
    }
    tracing::debug!(topic = %topic, panels = view.panels.len(), "topic rendered");
    Ok(view.finish(topic))
}

fn bind_home(dataset: &Dataset, view: &mut ViewBuilder) -> Result<()> {
    view.value("home-scorecards", "Indicadores principales", PanelKind::Cards, &home::scorecards(dataset))?;
    view.outcome(
        "home-gini",
        "Coeficiente de Gini (Ecuador)",
        PanelKind::LineChart,
        inequality::gini_home_series(dataset),
    )
}

fn bind_poverty(dataset: &Dataset, selection: &Selection, view: &mut ViewBuilder) -> Result<()> {
    let indicator = selection.poverty_indicator.as_str();

    view.value("pov-indicadores", "Indicador", PanelKind::Table, &indicators::POVERTY_INDICATOR_OPTIONS)?;
    view.outcome(
        "pov-line-nivel",
        format!("{} por Nivel", indicator),
        PanelKind::LineChart,
        poverty::level_series(dataset, indicator),
    )?;
    let bars = poverty::level_latest(dataset, indicator);
    view.outcome(
        "pov-bar-nivel",
        with_year(&format!("{} por Nivel", indicator), &bars),
        PanelKind::BarChart,
        bars,
    )?;

    view.outcome(
        "pov-line-sexo",
        format!("{} por Sexo", indicator),
        PanelKind::LineChart,
        poverty::sex_series(dataset, indicator),
    )?;
    let bars = poverty::sex_latest(dataset, indicator);
    view.outcome(
        "pov-bar-sexo",
        with_year(&format!("{} por Sexo", indicator), &bars),
        PanelKind::BarChart,
        bars,
    )?;

    let bars = poverty::ethnicity_latest(dataset, indicator);
    view.outcome(
        "pov-bar-etnia",
        with_year(&format!("{} por Etnia", indicator), &bars),
        PanelKind::BarChart,
        bars,
    )?;

    view.outcome(
        "pov-line-educ",
        format!("{} por Educación", indicator),
        PanelKind::LineChart,
        poverty::education_series(dataset, indicator),
    )?;
    let bars = poverty::education_latest(dataset, indicator);
    view.outcome(
        "pov-bar-educ",
        with_year(&format!("{} por Educación", indicator), &bars),
        PanelKind::BarChart,
        bars,
    )?;

    view.outcome(
        "pov-line-edad",
        format!("{} por Grupo Etario", indicator),
        PanelKind::LineChart,
        poverty::age_series(dataset, indicator),
    )?;
    let bars = poverty::age_latest(dataset, indicator);
    view.outcome(
        "pov-bar-edad",
        with_year(&format!("{} por Grupo Etario", indicator), &bars),
        PanelKind::BarChart,
        bars,
    )?;

    view.outcome(
        "pov-line-region",
        format!("{} por Región", indicator),
        PanelKind::LineChart,
        poverty::region_series(dataset, indicator),
    )?;
    let bars = poverty::region_latest(dataset, indicator);
    view.outcome(
        "pov-bar-region",
        with_year(&format!("{} por Región", indicator), &bars),
        PanelKind::BarChart,
        bars,
    )?;

    view.outcome(
        "pov-historico",
        "Pobreza y Pobreza Extrema (serie histórica)",
        PanelKind::LineChart,
        poverty::historical_combined(dataset),
    )?;
    view.outcome(
        "pov-multidimensional",
        "Pobreza por Ingreso vs Multidimensional",
        PanelKind::LineChart,
        poverty::income_vs_multidimensional(dataset),
    )?;

    let year = selection.province_year.or_else(|| poverty::province_years(dataset).last().copied());
    let title = match year {
        Some(year) => format!("Pobreza Provincial — {}", year),
        None => "Pobreza Provincial".to_string(),
    };
    view.value("prov-years", "Años disponibles", PanelKind::Table, &poverty::province_years(dataset))?;
    view.outcome("prov-table", title, PanelKind::Table, poverty::provincial_table(dataset, year))?;

    view.outcome(
        "pov-variacion",
        "Variación Anual Nacional",
        PanelKind::Table,
        poverty::national_variation(dataset),
    )?;
    view.outcome(
        "pov-significancia",
        "Significancia Estadística de la Variación",
        PanelKind::Table,
        poverty::significance_table(dataset),
    )
}

fn bind_employment(dataset: &Dataset, selection: &Selection, view: &mut ViewBuilder) -> Result<()> {
    view.outcome(
        "emp-series",
        "Indicadores de Empleo",
        PanelKind::LineChart,
        employment::indicator_series(dataset),
    )?;
    view.outcome(
        "emp-iess",
        employment::AFFILIATES_LABEL,
        PanelKind::LineChart,
        employment::affiliates_series(dataset),
    )?;

    view.value(
        "emp-dimensiones",
        "Dimensiones disponibles",
        PanelKind::Table,
        &employment::demographic_dimensions(dataset),
    )?;
    let bars = employment::demographic_latest(dataset, &selection.employment_dimension);
    view.outcome(
        "emp-demografico",
        with_year("Empleo Adecuado por Grupo", &bars),
        PanelKind::BarChart,
        bars,
    )?;

    let title = match selection.employment_period {
        Some(period) => format!("Crecimiento del Empleo por Sector ({})", period),
        None => "Crecimiento del Empleo por Sector".to_string(),
    };
    view.outcome(
        "emp-sectores",
        title,
        PanelKind::BarChart,
        employment::sector_growth(dataset, selection.employment_period),
    )?;

    view.outcome(
        "emp-significancia",
        "Significancia Estadística de la Variación",
        PanelKind::Table,
        employment::significance_table(dataset),
    )
}

fn bind_wages(dataset: &Dataset, selection: &Selection, view: &mut ViewBuilder) -> Result<()> {
    view.outcome("sal-series", "Salarios", PanelKind::LineChart, wages::wage_series(dataset))?;

    let dimension = WageGapDimension::from_selector(&selection.wage_gap)
        .map(|d| d.display_name())
        .unwrap_or("Grupo");
    let bars = wages::wage_gap_latest(dataset, &selection.wage_gap);
    view.outcome(
        "sal-brecha",
        with_year(&format!("Salario Promedio por {}", dimension), &bars),
        PanelKind::BarChart,
        bars,
    )?;
    view.outcome(
        "sal-brecha-tendencia",
        format!("Evolución del Salario Promedio por {}", dimension),
        PanelKind::LineChart,
        wages::wage_gap_trend(dataset, &selection.wage_gap),
    )
}

fn bind_growth(dataset: &Dataset, selection: &Selection, view: &mut ViewBuilder) -> Result<()> {
    view.value("gic-years", "Años disponibles", PanelKind::Table, &growth::gic_years(dataset))?;

    let default = growth::default_gic_range(dataset);
    let start = selection.gic_start.or(default.map(|r| r.start));
    let end = selection.gic_end.or(default.map(|r| r.end));
    let title = match (start, end) {
        (Some(s), Some(e)) => format!("Curva de Incidencia del Crecimiento ({}–{})", s, e),
        _ => "Curva de Incidencia del Crecimiento".to_string(),
    };
    view.outcome(
        "gic",
        title,
        PanelKind::BarChart,
        growth::growth_incidence_curve(dataset, start, end),
    )?;

    view.outcome(
        "crec-demografico",
        "Ingreso Promedio por Grupo Demográfico",
        PanelKind::BarChart,
        growth::demographic_income(dataset),
    )?;

    let title = match selection.growth_period {
        Some(period) => format!("Crecimiento del Empleo por Sector ({})", period),
        None => "Crecimiento del Empleo por Sector".to_string(),
    };
    view.outcome(
        "crec-sectores",
        title,
        PanelKind::BarChart,
        employment::sector_growth(dataset, selection.growth_period),
    )
}

fn bind_inequality(dataset: &Dataset, selection: &Selection, view: &mut ViewBuilder) -> Result<()> {
    view.outcome(
        "gini-impuestos",
        "Gini antes y después de Impuestos",
        PanelKind::LineChart,
        inequality::gini_tax_series(dataset),
    )?;
    view.outcome(
        "gini-panel",
        "Coeficiente de Gini: Nacional, Urbano y Rural",
        PanelKind::LineChart,
        inequality::gini_panel_series(dataset),
    )?;

    view.value("gini-paises", "Países disponibles", PanelKind::Table, &inequality::gini_countries(dataset))?;
    view.outcome(
        "gini-lac",
        "Gini en América Latina",
        PanelKind::LineChart,
        inequality::gini_comparison(dataset, &selection.gini_countries),
    )?;

    view.outcome(
        "sri-percentiles",
        "Ingreso Mensual por Percentil (SRI)",
        PanelKind::LineChart,
        inequality::taxpayer_income_series(dataset),
    )?;

    view.outcome(
        "wid-ingreso",
        "Participación en el Ingreso Nacional",
        PanelKind::LineChart,
        inequality::national_shares(dataset, ShareVariable::Income),
    )?;
    view.outcome(
        "wid-riqueza",
        "Participación en la Riqueza Nacional",
        PanelKind::LineChart,
        inequality::national_shares(dataset, ShareVariable::Wealth),
    )?;

    let latam_title = match ShareVariable::from_selector(&selection.latam_variable) {
        Some(variable) => format!(
            "Participación del {} en el {} Nacional",
            selection.latam_percentile,
            variable.display_name()
        ),
        None => format!("Participación del {}", selection.latam_percentile),
    };
    view.outcome(
        "latam-chart",
        latam_title,
        PanelKind::LineChart,
        inequality::latam_shares(
            dataset,
            &selection.latam_variable,
            &selection.latam_percentile,
            &selection.latam_countries,
        ),
    )?;

    view.outcome(
        "poblacion-percentiles",
        "Población por Percentil",
        PanelKind::Cards,
        inequality::population_cards(dataset),
    )
}

fn bind_taxation(dataset: &Dataset, selection: &Selection, view: &mut ViewBuilder) -> Result<()> {
    view.outcome(
        "trib-composicion",
        "Composición de la Recaudación (% del PIB)",
        PanelKind::LineChart,
        taxation::composition_series(dataset),
    )?;

    view.value("trib-anios", "Años disponibles", PanelKind::Table, &taxation::burden_years(dataset))?;
    let bars = taxation::burden_by_decile(dataset, selection.tax_burden_year);
    view.outcome(
        "trib-carga",
        with_year("Carga Tributaria por Decil", &bars),
        PanelKind::BarChart,
        bars,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::sample_dataset;
    use crate::selection::YearRange;

    #[test]
    fn test_topic_parse() {
        assert_eq!("pobreza".parse::<Topic>().unwrap(), Topic::Poverty);
        assert_eq!(" Empleo ".parse::<Topic>().unwrap(), Topic::Employment);
        assert_eq!(
            "ventas".parse::<Topic>(),
            Err(SelectorError::UnknownTopic("ventas".to_string()))
        );
        for topic in Topic::ALL {
            assert_eq!(topic.slug().parse::<Topic>().unwrap(), topic);
        }
    }

    #[test]
    fn test_poverty_titles_carry_latest_year() {
        let dataset = sample_dataset();
        let view = render_topic(&dataset, &Selection::default(), Topic::Poverty).unwrap();

        assert_eq!(view.panel("pov-bar-nivel").unwrap().title, "Pobreza por Nivel (2023)");
        assert_eq!(view.panel("prov-table").unwrap().title, "Pobreza Provincial — 2023");
        assert_eq!(view.panel("pov-bar-nivel").unwrap().placeholder, None);

        let options = view.panel("pov-indicadores").unwrap();
        assert_eq!(options.body, serde_json::json!(["Pobreza", "Pobreza Extrema", "NBI"]));
    }

    #[test]
    fn test_poverty_indicator_selection() {
        let dataset = sample_dataset();
        let selection = Selection {
            poverty_indicator: "Pobreza Extrema".to_string(),
            ..Selection::default()
        };
        let view = render_topic(&dataset, &selection, Topic::Poverty).unwrap();

        let bars = view.panel("pov-bar-nivel").unwrap();
        assert_eq!(bars.title, "Pobreza Extrema por Nivel (2023)");
        assert_eq!(bars.body["data"]["labels"], serde_json::json!(["Nacional", "Rural"]));

        // extreme poverty is stored lowercase in the group collections
        let sex = view.panel("pov-bar-sexo").unwrap();
        assert_eq!(sex.body["data"]["values"], serde_json::json!([9.5]));
    }

    #[test]
    fn test_missing_data_gets_placeholder() {
        let view = render_topic(&Dataset::default(), &Selection::default(), Topic::Poverty).unwrap();
        let bars = view.panel("pov-bar-nivel").unwrap();
        assert_eq!(bars.title, "Pobreza por Nivel");
        assert_eq!(bars.placeholder.as_deref(), Some(NO_DATA_LABEL));
        assert_eq!(bars.body["status"], "no_data");
    }

    #[test]
    fn test_reversed_period_asks_for_distinct_years() {
        let dataset = sample_dataset();
        let selection = Selection {
            growth_period: Some(YearRange::new(2023, 2019)),
            gic_start: Some(2021),
            gic_end: Some(2021),
            ..Selection::default()
        };
        let view = render_topic(&dataset, &selection, Topic::Growth).unwrap();
        assert_eq!(
            view.panel("crec-sectores").unwrap().placeholder.as_deref(),
            Some(SELECT_DISTINCT_YEARS_LABEL)
        );
        assert_eq!(view.panel("gic").unwrap().placeholder.as_deref(), Some(SELECT_DISTINCT_YEARS_LABEL));
    }

    #[test]
    fn test_latam_title_follows_selection() {
        let dataset = sample_dataset();
        let view = render_topic(&dataset, &Selection::default(), Topic::Inequality).unwrap();
        assert_eq!(
            view.panel("latam-chart").unwrap().title,
            "Participación del Top 1% en el Ingreso Nacional"
        );

        let selection = Selection {
            latam_variable: "gdp".to_string(),
            ..Selection::default()
        };
        let view = render_topic(&dataset, &selection, Topic::Inequality).unwrap();
        let latam = view.panel("latam-chart").unwrap();
        assert_eq!(latam.title, "Participación del Top 1%");
        assert_eq!(latam.body["status"], "no_data");
        assert_eq!(latam.placeholder.as_deref(), Some(NO_DATA_LABEL));
    }

    #[test]
    fn test_taxation_panel_kinds() {
        let view = render_topic(&sample_dataset(), &Selection::default(), Topic::Taxation).unwrap();
        assert_eq!(view.panel("trib-composicion").unwrap().kind, PanelKind::LineChart);
        assert_eq!(view.panel("trib-carga").unwrap().kind, PanelKind::BarChart);
    }

    #[test]
    fn test_every_topic_renders_and_is_idempotent() {
        let dataset = sample_dataset();
        let selection = Selection::default();
        for topic in Topic::ALL {
            let first = render_topic(&dataset, &selection, topic).unwrap();
            let second = render_topic(&dataset, &selection, topic).unwrap();
            assert!(!first.panels.is_empty(), "{} has no panels", topic);
            assert_eq!(first, second);
        }
    }
}
