// 🗂️ Dataset Access Layer - named record collections loaded once at startup
//
// The dataset arrives as one JSON object (or the generated `data.js` wrapper
// around it) with one array per topic. Every collection is read-only after
// load. Collections that are missing or malformed come back empty so that the
// rest of the dashboard keeps working.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::Path;

/// Calendar year as stored in the source tables.
pub type Year = i32;

// ============================================================================
// OBSERVATION TRAIT
// ============================================================================

/// A record carrying one metric value tagged by a year.
pub trait Observation {
    fn year(&self) -> Year;

    /// `None` means "no observation"; never treat it as zero.
    fn value(&self) -> Option<f64>;
}

macro_rules! observation {
    ($ty:ty, $year:ident, $value:ident) => {
        impl Observation for $ty {
            fn year(&self) -> Year {
                self.$year
            }

            fn value(&self) -> Option<f64> {
                self.$value
            }
        }
    };
}

// ============================================================================
// RECORDS - POVERTY
// ============================================================================

/// Indicator-only series (scorecards, historical series, employment series).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorRecord {
    #[serde(rename = "indicador", default)]
    pub indicator: String,

    #[serde(rename = "anio", deserialize_with = "lenient::year")]
    pub year: Year,

    #[serde(rename = "valor", default, deserialize_with = "lenient::number")]
    pub value: Option<f64>,
}
observation!(IndicatorRecord, year, value);

/// Poverty by level (Nacional / Urbano / Rural). This collection uses `ano`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PovertyLevelRecord {
    #[serde(rename = "indicador", default)]
    pub indicator: String,

    #[serde(rename = "nivel", default)]
    pub level: String,

    #[serde(rename = "ano", deserialize_with = "lenient::year")]
    pub year: Year,

    #[serde(rename = "valor", default, deserialize_with = "lenient::number")]
    pub value: Option<f64>,
}
observation!(PovertyLevelRecord, year, value);

/// Poverty by sex or ethnicity; `group_type` is `sexo` or `etnia`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PovertyGroupRecord {
    #[serde(rename = "tipoGrupo", default)]
    pub group_type: String,

    #[serde(rename = "grupo", default)]
    pub group: String,

    #[serde(rename = "indicador", default)]
    pub indicator: String,

    #[serde(rename = "anio", deserialize_with = "lenient::year")]
    pub year: Year,

    #[serde(rename = "valor", default, deserialize_with = "lenient::number")]
    pub value: Option<f64>,
}
observation!(PovertyGroupRecord, year, value);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PovertyEducationRecord {
    #[serde(rename = "nivelEducativo", default)]
    pub education_level: String,

    #[serde(rename = "indicador", default)]
    pub indicator: String,

    #[serde(rename = "anio", deserialize_with = "lenient::year")]
    pub year: Year,

    #[serde(rename = "valor", default, deserialize_with = "lenient::number")]
    pub value: Option<f64>,
}
observation!(PovertyEducationRecord, year, value);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PovertyAgeRecord {
    #[serde(rename = "grupoEtario", default)]
    pub age_group: String,

    #[serde(rename = "indicador", default)]
    pub indicator: String,

    #[serde(rename = "anio", deserialize_with = "lenient::year")]
    pub year: Year,

    #[serde(rename = "valor", default, deserialize_with = "lenient::number")]
    pub value: Option<f64>,
}
observation!(PovertyAgeRecord, year, value);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PovertyRegionRecord {
    #[serde(default)]
    pub region: String,

    #[serde(rename = "indicador", default)]
    pub indicator: String,

    #[serde(rename = "anio", deserialize_with = "lenient::year")]
    pub year: Year,

    #[serde(rename = "valor", default, deserialize_with = "lenient::number")]
    pub value: Option<f64>,
}
observation!(PovertyRegionRecord, year, value);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProvincialRecord {
    #[serde(rename = "provincia", default)]
    pub province: String,

    #[serde(rename = "indicador", default)]
    pub indicator: String,

    #[serde(rename = "anio", deserialize_with = "lenient::year")]
    pub year: Year,

    #[serde(rename = "valor", default, deserialize_with = "lenient::number")]
    pub value: Option<f64>,
}
observation!(ProvincialRecord, year, value);

/// Pre-computed variation with a statistical significance verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignificanceRecord {
    #[serde(rename = "anio", deserialize_with = "lenient::year")]
    pub year: Year,

    #[serde(rename = "indicador", default)]
    pub indicator: String,

    #[serde(rename = "valor", default, deserialize_with = "lenient::number")]
    pub value: Option<f64>,

    #[serde(rename = "valorAnterior", default, deserialize_with = "lenient::number")]
    pub previous_value: Option<f64>,

    #[serde(rename = "variacionPp", default, deserialize_with = "lenient::number")]
    pub variation_pp: Option<f64>,

    #[serde(rename = "significativo", default)]
    pub significant: Option<String>,
}
observation!(SignificanceRecord, year, value);

// ============================================================================
// RECORDS - EMPLOYMENT & WAGES
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmploymentDemographicRecord {
    #[serde(rename = "tipoCategoria", default)]
    pub category_type: String,

    #[serde(rename = "categoria", default)]
    pub category: String,

    #[serde(rename = "anio", deserialize_with = "lenient::year")]
    pub year: Year,

    #[serde(rename = "empleoAdecuado", default, deserialize_with = "lenient::number")]
    pub adequate_employment: Option<f64>,
}
observation!(EmploymentDemographicRecord, year, adequate_employment);

/// Social security (IESS) affiliates per year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffiliatesRecord {
    #[serde(rename = "anio", deserialize_with = "lenient::year")]
    pub year: Year,

    #[serde(rename = "afiliados", default, deserialize_with = "lenient::number")]
    pub affiliates: Option<f64>,
}
observation!(AffiliatesRecord, year, affiliates);

/// Employment (thousands of people) by economic sector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorEmploymentRecord {
    #[serde(default)]
    pub sector: String,

    #[serde(rename = "anio", deserialize_with = "lenient::year")]
    pub year: Year,

    #[serde(rename = "empleoMiles", default, deserialize_with = "lenient::number")]
    pub employment_thousands: Option<f64>,
}
observation!(SectorEmploymentRecord, year, employment_thousands);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WageRecord {
    #[serde(rename = "tipo", default)]
    pub wage_type: String,

    #[serde(rename = "anio", deserialize_with = "lenient::year")]
    pub year: Year,

    #[serde(rename = "valor", default, deserialize_with = "lenient::number")]
    pub value: Option<f64>,
}
observation!(WageRecord, year, value);

/// Average wage for one category of one wage-gap sheet. Each sheet fills
/// exactly one of the category fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WageGapRecord {
    #[serde(rename = "anio", deserialize_with = "lenient::year")]
    pub year: Year,

    #[serde(rename = "salarioPromedio", default, deserialize_with = "lenient::number")]
    pub average_wage: Option<f64>,

    #[serde(rename = "nivelEducativo", default, skip_serializing_if = "Option::is_none")]
    pub education_level: Option<String>,

    #[serde(rename = "sexo", default, skip_serializing_if = "Option::is_none")]
    pub sex: Option<String>,

    #[serde(rename = "etnia", default, skip_serializing_if = "Option::is_none")]
    pub ethnicity: Option<String>,

    #[serde(rename = "grupoEdad", default, skip_serializing_if = "Option::is_none")]
    pub age_group: Option<String>,

    #[serde(rename = "grupo", default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}
observation!(WageGapRecord, year, average_wage);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WageGapSheets {
    #[serde(rename = "educacion", default, deserialize_with = "lenient::collection")]
    pub education: Vec<WageGapRecord>,

    #[serde(rename = "genero", default, deserialize_with = "lenient::collection")]
    pub gender: Vec<WageGapRecord>,

    #[serde(rename = "etnia", default, deserialize_with = "lenient::collection")]
    pub ethnicity: Vec<WageGapRecord>,

    #[serde(rename = "edad", default, deserialize_with = "lenient::collection")]
    pub age: Vec<WageGapRecord>,

    #[serde(rename = "generoCivil", default, deserialize_with = "lenient::collection")]
    pub marital_status: Vec<WageGapRecord>,
}

// ============================================================================
// RECORDS - GROWTH
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecileIncomeRecord {
    #[serde(rename = "anio", deserialize_with = "lenient::year")]
    pub year: Year,

    #[serde(rename = "decil", deserialize_with = "lenient::year")]
    pub decile: i32,

    #[serde(rename = "ingresoPromedio", default, deserialize_with = "lenient::number")]
    pub average_income: Option<f64>,
}
observation!(DecileIncomeRecord, year, average_income);

/// Average income by demographic group. No year dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemographicIncomeRecord {
    #[serde(default)]
    pub dimension: Option<String>,

    #[serde(rename = "categoria", default)]
    pub category: Option<String>,

    #[serde(rename = "ingreso", default, deserialize_with = "lenient::number")]
    pub income: Option<f64>,
}

// ============================================================================
// RECORDS - INEQUALITY
// ============================================================================

/// Gini panel (Ecuador, urban, rural, LAC). This collection uses `ano`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GiniPanelRecord {
    #[serde(rename = "categoria", default)]
    pub category: String,

    #[serde(rename = "ano", deserialize_with = "lenient::year")]
    pub year: Year,

    #[serde(rename = "valor", default, deserialize_with = "lenient::number")]
    pub value: Option<f64>,
}
observation!(GiniPanelRecord, year, value);

/// Gini before and after each tax stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GiniTaxRecord {
    #[serde(rename = "categoria", default)]
    pub category: String,

    #[serde(rename = "anio", deserialize_with = "lenient::year")]
    pub year: Year,

    #[serde(default, deserialize_with = "lenient::number")]
    pub gini: Option<f64>,
}
observation!(GiniTaxRecord, year, gini);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GiniCountryRecord {
    #[serde(rename = "pais", default)]
    pub country: String,

    #[serde(rename = "ano", deserialize_with = "lenient::year")]
    pub year: Year,

    #[serde(default, deserialize_with = "lenient::number")]
    pub gini: Option<f64>,
}
observation!(GiniCountryRecord, year, gini);

/// Tax-authority (SRI) monthly nominal income by percentile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxpayerIncomeRecord {
    #[serde(rename = "percentil", default)]
    pub percentile: String,

    #[serde(rename = "anio", deserialize_with = "lenient::year")]
    pub year: Year,

    #[serde(rename = "ingresoMensualNominal", default, deserialize_with = "lenient::number")]
    pub monthly_income: Option<f64>,
}
observation!(TaxpayerIncomeRecord, year, monthly_income);

/// Share of national income or wealth held by a percentile group. The four
/// WID collections share this shape; `country` is only set in the regional
/// ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShareRecord {
    #[serde(rename = "pais", default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    #[serde(rename = "percentil", default)]
    pub percentile: String,

    #[serde(rename = "ano", deserialize_with = "lenient::year")]
    pub year: Year,

    #[serde(
        rename = "participacionEnElIngresoNacional(%)",
        alias = "participacionEnLaRiquezaNacional(%)",
        default,
        deserialize_with = "lenient::number"
    )]
    pub share: Option<f64>,
}
observation!(ShareRecord, year, share);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopulationPercentileRecord {
    #[serde(rename = "percentil", default)]
    pub percentile: String,

    #[serde(rename = "anio", deserialize_with = "lenient::year")]
    pub year: Year,

    #[serde(rename = "poblacion", default, deserialize_with = "lenient::number")]
    pub population: Option<f64>,
}
observation!(PopulationPercentileRecord, year, population);

// ============================================================================
// RECORDS - TAXATION
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxCompositionRecord {
    #[serde(rename = "tipoImpuesto", default)]
    pub tax_type: String,

    #[serde(rename = "anio", deserialize_with = "lenient::year")]
    pub year: Year,

    #[serde(rename = "porcentajePib", default, deserialize_with = "lenient::number")]
    pub percent_gdp: Option<f64>,
}
observation!(TaxCompositionRecord, year, percent_gdp);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxBurdenRecord {
    #[serde(rename = "decil", deserialize_with = "lenient::year")]
    pub decile: i32,

    #[serde(rename = "anio", deserialize_with = "lenient::year")]
    pub year: Year,

    #[serde(rename = "cargaTributariaPct", default, deserialize_with = "lenient::number")]
    pub burden_pct: Option<f64>,
}
observation!(TaxBurdenRecord, year, burden_pct);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaxCharts {
    #[serde(rename = "grafico16Composicion", default, deserialize_with = "lenient::collection")]
    pub composition: Vec<TaxCompositionRecord>,

    #[serde(rename = "grafico17Carga", default, deserialize_with = "lenient::collection")]
    pub burden: Vec<TaxBurdenRecord>,
}

// ============================================================================
// DATASET
// ============================================================================

/// All named collections. Missing keys deserialize to empty collections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(rename = "scorecards", default, deserialize_with = "lenient::collection")]
    pub scorecards: Vec<IndicatorRecord>,

    #[serde(rename = "seriesHistoricas", default, deserialize_with = "lenient::collection")]
    pub historical_series: Vec<IndicatorRecord>,

    #[serde(rename = "pobrezaTableau", default, deserialize_with = "lenient::collection")]
    pub poverty_levels: Vec<PovertyLevelRecord>,

    #[serde(rename = "pobrezaSexoEtnia", default, deserialize_with = "lenient::collection")]
    pub poverty_sex_ethnicity: Vec<PovertyGroupRecord>,

    #[serde(rename = "pobrezaEducacion", default, deserialize_with = "lenient::collection")]
    pub poverty_education: Vec<PovertyEducationRecord>,

    #[serde(rename = "pobrezaEdad", default, deserialize_with = "lenient::collection")]
    pub poverty_age: Vec<PovertyAgeRecord>,

    #[serde(rename = "pobrezaRegion", default, deserialize_with = "lenient::collection")]
    pub poverty_region: Vec<PovertyRegionRecord>,

    #[serde(rename = "pobrezaProvincial", default, deserialize_with = "lenient::collection")]
    pub poverty_provincial: Vec<ProvincialRecord>,

    #[serde(rename = "pobrezaMultidimensionalScorecard", default, deserialize_with = "lenient::collection")]
    pub multidimensional_scorecard: Vec<IndicatorRecord>,

    #[serde(rename = "pobrezaMultidimensionalSeries", default, deserialize_with = "lenient::collection")]
    pub multidimensional_series: Vec<IndicatorRecord>,

    #[serde(rename = "variacionPobrezaSignificancia", default, deserialize_with = "lenient::collection")]
    pub poverty_significance: Vec<SignificanceRecord>,

    #[serde(rename = "empleoSeries", default, deserialize_with = "lenient::collection")]
    pub employment_series: Vec<IndicatorRecord>,

    #[serde(rename = "empleoScorecard", default, deserialize_with = "lenient::collection")]
    pub employment_scorecard: Vec<IndicatorRecord>,

    #[serde(rename = "empleoDemografico", default, deserialize_with = "lenient::collection")]
    pub employment_demographics: Vec<EmploymentDemographicRecord>,

    #[serde(rename = "variacionEmpleoSignificancia", default, deserialize_with = "lenient::collection")]
    pub employment_significance: Vec<SignificanceRecord>,

    #[serde(rename = "iessAfiliados", default, deserialize_with = "lenient::collection")]
    pub iess_affiliates: Vec<AffiliatesRecord>,

    #[serde(rename = "crecimientoEmpleoSector", default, deserialize_with = "lenient::collection")]
    pub sector_employment: Vec<SectorEmploymentRecord>,

    #[serde(rename = "salariosSeries", default, deserialize_with = "lenient::collection")]
    pub wage_series: Vec<WageRecord>,

    #[serde(rename = "brechasSalariales", default, deserialize_with = "lenient::object")]
    pub wage_gaps: WageGapSheets,

    #[serde(rename = "decilesIngresoAnual", default, deserialize_with = "lenient::collection")]
    pub decile_income: Vec<DecileIncomeRecord>,

    #[serde(rename = "crecimientoDemografico", default, deserialize_with = "lenient::collection")]
    pub demographic_income: Vec<DemographicIncomeRecord>,

    #[serde(rename = "giniPanel", default, deserialize_with = "lenient::collection")]
    pub gini_panel: Vec<GiniPanelRecord>,

    #[serde(rename = "giniTaxImpact", default, deserialize_with = "lenient::collection")]
    pub gini_tax_impact: Vec<GiniTaxRecord>,

    #[serde(rename = "giniLacComparison", default, deserialize_with = "lenient::collection")]
    pub gini_lac: Vec<GiniCountryRecord>,

    #[serde(rename = "sriPercentilesIngreso", default, deserialize_with = "lenient::collection")]
    pub taxpayer_income: Vec<TaxpayerIncomeRecord>,

    #[serde(rename = "widIngresoPercentiles", default, deserialize_with = "lenient::collection")]
    pub income_shares: Vec<ShareRecord>,

    #[serde(rename = "widRiquezaPercentiles", default, deserialize_with = "lenient::collection")]
    pub wealth_shares: Vec<ShareRecord>,

    #[serde(rename = "widIngresoPercentilesALC", default, deserialize_with = "lenient::collection")]
    pub income_shares_latam: Vec<ShareRecord>,

    #[serde(rename = "widRiquezaPercentilesALC", default, deserialize_with = "lenient::collection")]
    pub wealth_shares_latam: Vec<ShareRecord>,

    #[serde(rename = "poblacionPercentiles", default, deserialize_with = "lenient::collection")]
    pub population_percentiles: Vec<PopulationPercentileRecord>,

    #[serde(rename = "tributacionGraficos", default, deserialize_with = "lenient::object")]
    pub tax_charts: TaxCharts,
}

/// Collection keys as they appear in the source object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Collection {
    Scorecards,
    HistoricalSeries,
    PovertyLevels,
    PovertySexEthnicity,
    PovertyEducation,
    PovertyAge,
    PovertyRegion,
    PovertyProvincial,
    MultidimensionalScorecard,
    MultidimensionalSeries,
    PovertySignificance,
    EmploymentSeries,
    EmploymentScorecard,
    EmploymentDemographics,
    EmploymentSignificance,
    IessAffiliates,
    SectorEmployment,
    WageSeries,
    WageGaps,
    DecileIncome,
    DemographicIncome,
    GiniPanel,
    GiniTaxImpact,
    GiniLac,
    TaxpayerIncome,
    IncomeShares,
    WealthShares,
    IncomeSharesLatam,
    WealthSharesLatam,
    PopulationPercentiles,
    TaxCharts,
}

impl Collection {
    pub const ALL: [Collection; 31] = [
        Collection::Scorecards,
        Collection::HistoricalSeries,
        Collection::PovertyLevels,
        Collection::PovertySexEthnicity,
        Collection::PovertyEducation,
        Collection::PovertyAge,
        Collection::PovertyRegion,
        Collection::PovertyProvincial,
        Collection::MultidimensionalScorecard,
        Collection::MultidimensionalSeries,
        Collection::PovertySignificance,
        Collection::EmploymentSeries,
        Collection::EmploymentScorecard,
        Collection::EmploymentDemographics,
        Collection::EmploymentSignificance,
        Collection::IessAffiliates,
        Collection::SectorEmployment,
        Collection::WageSeries,
        Collection::WageGaps,
        Collection::DecileIncome,
        Collection::DemographicIncome,
        Collection::GiniPanel,
        Collection::GiniTaxImpact,
        Collection::GiniLac,
        Collection::TaxpayerIncome,
        Collection::IncomeShares,
        Collection::WealthShares,
        Collection::IncomeSharesLatam,
        Collection::WealthSharesLatam,
        Collection::PopulationPercentiles,
        Collection::TaxCharts,
    ];

    /// Key of the collection in the source object.
    pub fn key(&self) -> &'static str {
        match self {
            Collection::Scorecards => "scorecards",
            Collection::HistoricalSeries => "seriesHistoricas",
            Collection::PovertyLevels => "pobrezaTableau",
            Collection::PovertySexEthnicity => "pobrezaSexoEtnia",
            Collection::PovertyEducation => "pobrezaEducacion",
            Collection::PovertyAge => "pobrezaEdad",
            Collection::PovertyRegion => "pobrezaRegion",
            Collection::PovertyProvincial => "pobrezaProvincial",
            Collection::MultidimensionalScorecard => "pobrezaMultidimensionalScorecard",
            Collection::MultidimensionalSeries => "pobrezaMultidimensionalSeries",
            Collection::PovertySignificance => "variacionPobrezaSignificancia",
            Collection::EmploymentSeries => "empleoSeries",
            Collection::EmploymentScorecard => "empleoScorecard",
            Collection::EmploymentDemographics => "empleoDemografico",
            Collection::EmploymentSignificance => "variacionEmpleoSignificancia",
            Collection::IessAffiliates => "iessAfiliados",
            Collection::SectorEmployment => "crecimientoEmpleoSector",
            Collection::WageSeries => "salariosSeries",
            Collection::WageGaps => "brechasSalariales",
            Collection::DecileIncome => "decilesIngresoAnual",
            Collection::DemographicIncome => "crecimientoDemografico",
            Collection::GiniPanel => "giniPanel",
            Collection::GiniTaxImpact => "giniTaxImpact",
            Collection::GiniLac => "giniLacComparison",
            Collection::TaxpayerIncome => "sriPercentilesIngreso",
            Collection::IncomeShares => "widIngresoPercentiles",
            Collection::WealthShares => "widRiquezaPercentiles",
            Collection::IncomeSharesLatam => "widIngresoPercentilesALC",
            Collection::WealthSharesLatam => "widRiquezaPercentilesALC",
            Collection::PopulationPercentiles => "poblacionPercentiles",
            Collection::TaxCharts => "tributacionGraficos",
        }
    }

    pub fn from_key(key: &str) -> Option<Collection> {
        Collection::ALL.iter().copied().find(|c| c.key() == key)
    }
}

impl Dataset {
    /// Parse a JSON object of collections.
    pub fn from_json_str(text: &str) -> Result<Dataset> {
        let dataset = serde_json::from_str(text).context("Failed to parse dataset JSON")?;
        Ok(dataset)
    }

    /// Number of rows in a collection. Multi-sheet collections count the
    /// rows of all their sheets.
    pub fn row_count(&self, collection: Collection) -> usize {
        match collection {
            Collection::Scorecards => self.scorecards.len(),
            Collection::HistoricalSeries => self.historical_series.len(),
            Collection::PovertyLevels => self.poverty_levels.len(),
            Collection::PovertySexEthnicity => self.poverty_sex_ethnicity.len(),
            Collection::PovertyEducation => self.poverty_education.len(),
            Collection::PovertyAge => self.poverty_age.len(),
            Collection::PovertyRegion => self.poverty_region.len(),
            Collection::PovertyProvincial => self.poverty_provincial.len(),
            Collection::MultidimensionalScorecard => self.multidimensional_scorecard.len(),
            Collection::MultidimensionalSeries => self.multidimensional_series.len(),
            Collection::PovertySignificance => self.poverty_significance.len(),
            Collection::EmploymentSeries => self.employment_series.len(),
            Collection::EmploymentScorecard => self.employment_scorecard.len(),
            Collection::EmploymentDemographics => self.employment_demographics.len(),
            Collection::EmploymentSignificance => self.employment_significance.len(),
            Collection::IessAffiliates => self.iess_affiliates.len(),
            Collection::SectorEmployment => self.sector_employment.len(),
            Collection::WageSeries => self.wage_series.len(),
            Collection::WageGaps => {
                let sheets = &self.wage_gaps;
                sheets.education.len()
                    + sheets.gender.len()
                    + sheets.ethnicity.len()
                    + sheets.age.len()
                    + sheets.marital_status.len()
            }
            Collection::DecileIncome => self.decile_income.len(),
            Collection::DemographicIncome => self.demographic_income.len(),
            Collection::GiniPanel => self.gini_panel.len(),
            Collection::GiniTaxImpact => self.gini_tax_impact.len(),
            Collection::GiniLac => self.gini_lac.len(),
            Collection::TaxpayerIncome => self.taxpayer_income.len(),
            Collection::IncomeShares => self.income_shares.len(),
            Collection::WealthShares => self.wealth_shares.len(),
            Collection::IncomeSharesLatam => self.income_shares_latam.len(),
            Collection::WealthSharesLatam => self.wealth_shares_latam.len(),
            Collection::PopulationPercentiles => self.population_percentiles.len(),
            Collection::TaxCharts => self.tax_charts.composition.len() + self.tax_charts.burden.len(),
        }
    }
}

// ============================================================================
// LOADING
// ============================================================================

/// Where a dataset came from and what exactly was read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSource {
    pub origin: String,
    /// SHA-256 of the raw text, hex encoded
    pub sha256: String,
    pub bytes: usize,
    pub loaded_at: DateTime<Utc>,
}

/// A parsed dataset plus the raw JSON tree it came from. The raw tree is
/// kept for structural validation.
#[derive(Debug, Clone)]
pub struct LoadedDataset {
    pub dataset: Dataset,
    pub raw: serde_json::Value,
    pub source: DatasetSource,
}

/// Strip the `const DATA = ...;` wrapper and leading `//` comment lines that
/// the data.js generator emits. Plain JSON passes through unchanged.
pub fn strip_js_wrapper(text: &str) -> &str {
    let mut body = text.trim_start_matches('\u{feff}').trim();
    while body.starts_with("//") {
        body = match body.find('\n') {
            Some(newline) => body[newline + 1..].trim_start(),
            None => "",
        };
    }
    for prefix in ["const DATA =", "var DATA =", "let DATA ="] {
        if let Some(rest) = body.strip_prefix(prefix) {
            body = rest.trim();
            break;
        }
    }
    body.trim_end_matches(';').trim_end()
}

/// Parse dataset text (JSON or data.js) coming from `origin`.
pub fn parse_dataset(text: &str, origin: &str) -> Result<LoadedDataset> {
    let body = strip_js_wrapper(text);
    let raw: serde_json::Value = serde_json::from_str(body)
        .with_context(|| format!("Failed to parse dataset from {}", origin))?;
    if !raw.is_object() {
        anyhow::bail!("Dataset in {} is not a JSON object of collections", origin);
    }
    let dataset: Dataset = serde_json::from_value(raw.clone())
        .with_context(|| format!("Failed to read collections from {}", origin))?;

    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());

    let source = DatasetSource {
        origin: origin.to_string(),
        sha256: format!("{:x}", hasher.finalize()),
        bytes: text.len(),
        loaded_at: Utc::now(),
    };

    tracing::info!(
        origin,
        collections = raw.as_object().map(|o| o.len()).unwrap_or(0),
        sha256 = %source.sha256,
        "dataset loaded"
    );

    Ok(LoadedDataset { dataset, raw, source })
}

/// Load a dataset file from disk.
pub fn load_dataset(path: &Path) -> Result<LoadedDataset> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read dataset file {}", path.display()))?;
    parse_dataset(&text, &path.display().to_string())
}

// ============================================================================
// LENIENT DESERIALIZERS
// ============================================================================

/// The converter emits years and values as numbers in some collections and
/// as strings in others; rows it cannot read are skipped.
mod lenient {
    use super::Year;
    use serde::de::{DeserializeOwned, Error};
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Int(i64),
        Float(f64),
        Text(String),
    }

    pub fn parse_year(text: &str) -> Option<Year> {
        let text = text.trim();
        if let Ok(year) = text.parse::<Year>() {
            return Some(year);
        }
        match text.parse::<f64>() {
            Ok(f) if f.fract() == 0.0 && f.abs() < Year::MAX as f64 => Some(f as Year),
            _ => None,
        }
    }

    pub fn year<'de, D>(deserializer: D) -> Result<Year, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Scalar::deserialize(deserializer)? {
            Scalar::Int(i) => Year::try_from(i).map_err(|_| D::Error::custom(format!("year out of range: {}", i))),
            Scalar::Float(f) if f.fract() == 0.0 && f.abs() < Year::MAX as f64 => Ok(f as Year),
            Scalar::Float(f) => Err(D::Error::custom(format!("not a whole year: {}", f))),
            Scalar::Text(s) => parse_year(&s).ok_or_else(|| D::Error::custom(format!("not a year: '{}'", s))),
        }
    }

    pub fn number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let scalar: Option<Scalar> = Option::deserialize(deserializer)?;
        Ok(match scalar {
            None => None,
            Some(Scalar::Int(i)) => Some(i as f64),
            Some(Scalar::Float(f)) if f.is_finite() => Some(f),
            Some(Scalar::Float(_)) => None,
            Some(Scalar::Text(s)) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        })
    }

    pub fn collection<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        let value = Value::deserialize(deserializer)?;
        let rows = match value {
            Value::Array(rows) => rows,
            Value::Null => return Ok(Vec::new()),
            other => {
                tracing::warn!(
                    kind = std::any::type_name::<T>(),
                    found = %json_kind(&other),
                    "collection is not an array; treating as empty"
                );
                return Ok(Vec::new());
            }
        };

        let total = rows.len();
        let parsed: Vec<T> = rows
            .into_iter()
            .filter_map(|row| serde_json::from_value(row).ok())
            .collect();
        if parsed.len() < total {
            tracing::warn!(
                kind = std::any::type_name::<T>(),
                skipped = total - parsed.len(),
                total,
                "skipped unreadable rows"
            );
        }
        Ok(parsed)
    }

    pub fn object<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned + Default,
    {
        let value = Value::deserialize(deserializer)?;
        match serde_json::from_value(value) {
            Ok(parsed) => Ok(parsed),
            Err(err) => {
                tracing::warn!(kind = std::any::type_name::<T>(), error = %err, "unreadable sheet object; treating as empty");
                Ok(T::default())
            }
        }
    }

    fn json_kind(value: &Value) -> &'static str {
        match value {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }
}

pub use lenient::parse_year;
