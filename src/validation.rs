// ✅ Dataset validation - structural checks before the dashboard is published
//
// Works on the raw JSON tree so it can report what the typed loader
// silently skipped: missing collections, renamed fields, missing sheets
// and unreadable rows.

use crate::dataset::{Collection, LoadedDataset};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// EXPECTATIONS
// ============================================================================

/// Collections each dashboard page needs.
pub const REQUIRED_COLLECTIONS: &[(&str, &[&str])] = &[
    (
        "Pobreza",
        &[
            "pobrezaTableau",
            "pobrezaSexoEtnia",
            "pobrezaEducacion",
            "pobrezaEdad",
            "pobrezaRegion",
            "variacionPobrezaSignificancia",
            "pobrezaProvincial",
        ],
    ),
    (
        "Empleo",
        &[
            "empleoSeries",
            "empleoDemografico",
            "crecimientoEmpleoSector",
            "variacionEmpleoSignificancia",
        ],
    ),
    ("Salarios", &["salariosSeries", "brechasSalariales"]),
    (
        "Crecimiento",
        &["decilesIngresoAnual", "crecimientoDemografico", "crecimientoEmpleoSector"],
    ),
    ("Desigualdad", &["giniPanel"]),
];

/// Field names expected in the rows of key collections.
pub const EXPECTED_FIELDS: &[(&str, &[&str])] = &[
    ("pobrezaTableau", &["ano", "indicador", "nivel", "valor"]),
    ("pobrezaEducacion", &["anio", "nivelEducativo", "indicador", "valor"]),
    ("pobrezaEdad", &["anio", "grupoEtario", "indicador", "valor"]),
    ("pobrezaSexoEtnia", &["anio", "grupo", "tipoGrupo", "indicador", "valor"]),
    ("empleoDemografico", &["anio", "tipoCategoria", "categoria", "empleoAdecuado"]),
    ("empleoSeries", &["anio", "indicador", "valor"]),
    ("salariosSeries", &["anio", "tipo", "valor"]),
    ("giniPanel", &["ano", "categoria", "valor"]),
];

/// Sheets expected in multi-sheet collections.
pub const EXPECTED_SHEETS: &[(&str, &[&str])] = &[
    ("brechasSalariales", &["educacion", "genero", "etnia"]),
    ("tributacionGraficos", &["grafico16Composicion", "grafico17Carga"]),
];

// ============================================================================
// REPORT
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Critical, // A page cannot render at all
    Warning,  // Some charts will be empty or wrong
    Info,     // Harmless drift in the source
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub severity: Severity,
    pub collection: String,
    pub issue: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionCount {
    pub collection: String,
    /// Rows in the source, all sheets included
    pub raw_rows: usize,
    /// Rows the typed loader could read
    pub loaded_rows: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub origin: String,
    pub sha256: String,
    pub collections: Vec<CollectionCount>,
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn summary(&self) -> String {
        format!(
            "Collections: {}, Issues: {} ({} critical, {} warnings)",
            self.collections.len(),
            self.issues.len(),
            self.count(Severity::Critical),
            self.count(Severity::Warning),
        )
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.issues.iter().filter(|i| i.severity == severity).count()
    }

    pub fn has_critical_issues(&self) -> bool {
        self.count(Severity::Critical) > 0
    }

    pub fn is_clean(&self) -> bool {
        self.issues.iter().all(|i| i.severity == Severity::Info)
    }
}

// ============================================================================
// CHECKS
// ============================================================================

fn issue(severity: Severity, collection: &str, text: String) -> ValidationIssue {
    ValidationIssue {
        severity,
        collection: collection.to_string(),
        issue: text,
    }
}

/// Rows of an array collection, or of every sheet of an object collection.
fn raw_rows(value: &Value) -> usize {
    match value {
        Value::Array(rows) => rows.len(),
        Value::Object(sheets) => sheets.values().filter_map(Value::as_array).map(Vec::len).sum(),
        _ => 0,
    }
}

fn check_required(root: &serde_json::Map<String, Value>, issues: &mut Vec<ValidationIssue>) {
    for (page, keys) in REQUIRED_COLLECTIONS {
        for key in *keys {
            match root.get(*key) {
                None => issues.push(issue(
                    Severity::Critical,
                    key,
                    format!("required by page {} but missing", page),
                )),
                Some(Value::Array(_)) | Some(Value::Object(_)) => {}
                Some(_) => issues.push(issue(
                    Severity::Critical,
                    key,
                    format!("required by page {} but is neither a list nor an object", page),
                )),
            }
        }
    }
}

fn check_fields(root: &serde_json::Map<String, Value>, issues: &mut Vec<ValidationIssue>) {
    for (key, expected) in EXPECTED_FIELDS {
        let Some(first) = root.get(*key).and_then(Value::as_array).and_then(|rows| rows.first()) else {
            continue;
        };
        let Some(row) = first.as_object() else {
            issues.push(issue(Severity::Warning, key, "first row is not an object".to_string()));
            continue;
        };

        let missing: Vec<&str> = expected.iter().copied().filter(|f| !row.contains_key(*f)).collect();
        if !missing.is_empty() {
            issues.push(issue(
                Severity::Warning,
                key,
                format!("missing fields: {}", missing.join(", ")),
            ));
        }

        let extra: Vec<&str> = row
            .keys()
            .map(String::as_str)
            .filter(|f| !expected.contains(f))
            .collect();
        if !extra.is_empty() {
            issues.push(issue(Severity::Info, key, format!("extra fields: {}", extra.join(", "))));
        }
    }
}

fn check_sheets(root: &serde_json::Map<String, Value>, issues: &mut Vec<ValidationIssue>) {
    for (key, expected) in EXPECTED_SHEETS {
        let Some(sheets) = root.get(*key).and_then(Value::as_object) else {
            continue;
        };
        let missing: Vec<&str> = expected.iter().copied().filter(|s| !sheets.contains_key(*s)).collect();
        if !missing.is_empty() {
            issues.push(issue(
                Severity::Warning,
                key,
                format!("missing sheets: {}", missing.join(", ")),
            ));
        }
    }
}

/// Run every structural check against a loaded dataset.
pub fn validate(loaded: &LoadedDataset) -> ValidationReport {
    let mut issues = Vec::new();
    let mut collections = Vec::new();

    if let Some(root) = loaded.raw.as_object() {
        check_required(root, &mut issues);
        check_fields(root, &mut issues);
        check_sheets(root, &mut issues);

        for (key, value) in root {
            let raw = raw_rows(value);
            match Collection::from_key(key) {
                Some(collection) => {
                    let loaded_rows = loaded.dataset.row_count(collection);
                    if loaded_rows < raw {
                        issues.push(issue(
                            Severity::Warning,
                            key,
                            format!("{} of {} rows could not be read", raw - loaded_rows, raw),
                        ));
                    }
                    collections.push(CollectionCount {
                        collection: key.clone(),
                        raw_rows: raw,
                        loaded_rows,
                    });
                }
                None => issues.push(issue(Severity::Info, key, "collection not used by any page".to_string())),
            }
        }
    }

    issues.sort_by_key(|i| i.severity);

    for i in issues.iter().filter(|i| i.severity == Severity::Critical) {
        tracing::warn!(collection = %i.collection, issue = %i.issue, "dataset validation");
    }

    ValidationReport {
        origin: loaded.source.origin.clone(),
        sha256: loaded.source.sha256.clone(),
        collections,
        issues,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::parse_dataset;
    use crate::fixtures::SAMPLE_JSON;

    fn issues_for<'a>(report: &'a ValidationReport, collection: &str) -> Vec<&'a ValidationIssue> {
        report.issues.iter().filter(|i| i.collection == collection).collect()
    }

    #[test]
    fn test_sample_has_no_critical_issues() {
        let loaded = parse_dataset(SAMPLE_JSON, "fixture").unwrap();
        let report = validate(&loaded);

        assert!(!report.has_critical_issues(), "{:?}", report.issues);
        assert_eq!(report.collections.len(), Collection::ALL.len());

        // the fixture omits the ethnicity wage sheet
        let wages = issues_for(&report, "brechasSalariales");
        assert_eq!(wages.len(), 1);
        assert_eq!(wages[0].severity, Severity::Warning);
        assert!(wages[0].issue.contains("etnia"));
    }

    #[test]
    fn test_missing_required_collection_is_critical() {
        let loaded = parse_dataset(r#"{"giniPanel": []}"#, "partial").unwrap();
        let report = validate(&loaded);

        assert!(report.has_critical_issues());
        assert!(issues_for(&report, "pobrezaTableau")
            .iter()
            .any(|i| i.severity == Severity::Critical));
        assert!(issues_for(&report, "giniPanel").is_empty());
        assert!(report.summary().contains("critical"));
    }

    #[test]
    fn test_field_drift_and_unreadable_rows() {
        let text = r#"{
            "giniPanel": [
                {"ano": 2023, "categoria": "Ecuador", "valor": 0.45, "fuente": "INEC"},
                {"ano": "sin año", "categoria": "Ecuador", "valor": 0.46}
            ],
            "salariosSeries": [{"anio": 2023, "valor": 450.0}],
            "hojaNueva": []
        }"#;
        let report = validate(&parse_dataset(text, "drift").unwrap());

        let gini = issues_for(&report, "giniPanel");
        assert!(gini.iter().any(|i| i.severity == Severity::Info && i.issue.contains("fuente")));
        assert!(gini
            .iter()
            .any(|i| i.severity == Severity::Warning && i.issue.contains("1 of 2 rows")));

        let wages = issues_for(&report, "salariosSeries");
        assert!(wages.iter().any(|i| i.issue == "missing fields: tipo"));

        assert_eq!(issues_for(&report, "hojaNueva")[0].severity, Severity::Info);
        // critical issues sort first
        assert_eq!(report.issues[0].severity, Severity::Critical);
    }
}
