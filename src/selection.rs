// 🎛️ Selection state - every UI control value, passed explicitly into transforms
//
// Dimension selectors map to typed accessors instead of looking up record
// fields by name.

use crate::dataset::{Year, WageGapRecord, WageGapSheets};
use crate::error::SelectorError;
use crate::indicators;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// YEAR RANGE
// ============================================================================

/// Inclusive endpoints of a comparison period, written `START-END`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    pub start: Year,
    pub end: Year,
}

impl YearRange {
    pub fn new(start: Year, end: Year) -> Self {
        YearRange { start, end }
    }

    /// Number of periods between the endpoints, when start is before end.
    pub fn span(&self) -> Option<i32> {
        if self.start < self.end {
            Some(self.end - self.start)
        } else {
            None
        }
    }
}

impl FromStr for YearRange {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SelectorError::InvalidYearRange(s.to_string());
        let (start, end) = s.trim().split_once('-').ok_or_else(invalid)?;
        let start = crate::dataset::parse_year(start).ok_or_else(invalid)?;
        let end = crate::dataset::parse_year(end).ok_or_else(invalid)?;
        Ok(YearRange { start, end })
    }
}

impl fmt::Display for YearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

// ============================================================================
// WAGE GAP DIMENSION
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WageGapDimension {
    Education,
    Gender,
    Ethnicity,
    Age,
    MaritalStatus,
}

impl WageGapDimension {
    pub const ALL: [WageGapDimension; 5] = [
        WageGapDimension::Education,
        WageGapDimension::Gender,
        WageGapDimension::Ethnicity,
        WageGapDimension::Age,
        WageGapDimension::MaritalStatus,
    ];

    /// Parse the value of the wage-gap selector; unknown values are `None`.
    pub fn from_selector(value: &str) -> Option<Self> {
        match value {
            "educacion" => Some(WageGapDimension::Education),
            "genero" => Some(WageGapDimension::Gender),
            "etnia" => Some(WageGapDimension::Ethnicity),
            "edad" => Some(WageGapDimension::Age),
            "estado_civil" => Some(WageGapDimension::MaritalStatus),
            _ => None,
        }
    }

    pub fn selector(&self) -> &'static str {
        match self {
            WageGapDimension::Education => "educacion",
            WageGapDimension::Gender => "genero",
            WageGapDimension::Ethnicity => "etnia",
            WageGapDimension::Age => "edad",
            WageGapDimension::MaritalStatus => "estado_civil",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            WageGapDimension::Education => "Educación",
            WageGapDimension::Gender => "Género",
            WageGapDimension::Ethnicity => "Etnia",
            WageGapDimension::Age => "Edad",
            WageGapDimension::MaritalStatus => "Estado civil",
        }
    }

    /// Sheet holding this dimension's rows.
    pub fn sheet<'a>(&self, sheets: &'a WageGapSheets) -> &'a [WageGapRecord] {
        match self {
            WageGapDimension::Education => &sheets.education,
            WageGapDimension::Gender => &sheets.gender,
            WageGapDimension::Ethnicity => &sheets.ethnicity,
            WageGapDimension::Age => &sheets.age,
            WageGapDimension::MaritalStatus => &sheets.marital_status,
        }
    }

    /// Category of a row in this dimension's sheet.
    pub fn category<'a>(&self, record: &'a WageGapRecord) -> Option<&'a str> {
        let field = match self {
            WageGapDimension::Education => &record.education_level,
            WageGapDimension::Gender => &record.sex,
            WageGapDimension::Ethnicity => &record.ethnicity,
            WageGapDimension::Age => &record.age_group,
            WageGapDimension::MaritalStatus => &record.group,
        };
        field.as_deref()
    }
}

// ============================================================================
// SHARE VARIABLE
// ============================================================================

/// Income or wealth shares in the Latin America comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShareVariable {
    Income,
    Wealth,
}

impl ShareVariable {
    /// Parse the value of the Latin America variable selector; unknown
    /// values are `None`.
    pub fn from_selector(value: &str) -> Option<Self> {
        match value {
            "income" => Some(ShareVariable::Income),
            "wealth" => Some(ShareVariable::Wealth),
            _ => None,
        }
    }

    pub fn selector(&self) -> &'static str {
        match self {
            ShareVariable::Income => "income",
            ShareVariable::Wealth => "wealth",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ShareVariable::Income => "Ingreso",
            ShareVariable::Wealth => "Riqueza",
        }
    }
}

// ============================================================================
// SELECTION
// ============================================================================

/// Current value of every dashboard control. Year fields left as `None`
/// resolve to the latest (or first/last) year available in the data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Selection {
    /// Poverty indicator as shown in the UI ("Pobreza", "Pobreza Extrema", ...)
    pub poverty_indicator: String,

    /// Year of the provincial poverty table
    pub province_year: Option<Year>,

    /// `tipoCategoria` of the employment-by-demographics chart
    pub employment_dimension: String,

    /// Period of the employment page's sector growth chart
    pub employment_period: Option<YearRange>,

    /// Period of the growth page's sector growth chart
    pub growth_period: Option<YearRange>,

    /// Wage-gap selector value ("educacion", "genero", ...)
    pub wage_gap: String,

    pub gic_start: Option<Year>,
    pub gic_end: Option<Year>,

    /// Countries in the Gini Latin America comparison
    pub gini_countries: Vec<String>,

    /// Latin America variable selector value ("income" or "wealth")
    pub latam_variable: String,
    pub latam_percentile: String,
    pub latam_countries: Vec<String>,

    /// Year of the tax burden by decile chart
    pub tax_burden_year: Option<Year>,
}

impl Default for Selection {
    fn default() -> Self {
        Selection {
            poverty_indicator: indicators::POVERTY.to_string(),
            province_year: None,
            employment_dimension: "sexo".to_string(),
            employment_period: Some(YearRange::new(2019, 2023)),
            growth_period: Some(YearRange::new(2019, 2023)),
            wage_gap: WageGapDimension::Education.selector().to_string(),
            gic_start: None,
            gic_end: None,
            gini_countries: ["Ecuador", "Colombia", "Peru", "Chile", "Brazil"]
                .iter()
                .map(|c| c.to_string())
                .collect(),
            latam_variable: ShareVariable::Income.selector().to_string(),
            latam_percentile: "Top 1%".to_string(),
            latam_countries: vec!["Ecuador".to_string()],
            tax_burden_year: None,
        }
    }
}
