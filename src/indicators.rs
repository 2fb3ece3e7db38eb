// 🏷️ Indicator labels
//
// The UI offers one list of poverty indicators, but the source tables spell
// them differently: `pobrezaTableau` stores "Pobreza Extrema" while the
// breakdown tables store "Pobreza extrema". The mapping is fixed per
// collection; no general normalization rule is inferred.

use crate::dataset::Collection;

pub const POVERTY: &str = "Pobreza";
pub const EXTREME_POVERTY_UI: &str = "Pobreza Extrema";
pub const EXTREME_POVERTY_STORED: &str = "Pobreza extrema";
pub const NBI: &str = "NBI";
pub const MULTIDIMENSIONAL_POVERTY: &str = "Pobreza Multidimensional";

/// Indicators offered by the poverty selector, as shown in the UI.
pub const POVERTY_INDICATOR_OPTIONS: [&str; 3] = [POVERTY, EXTREME_POVERTY_UI, NBI];

/// (collection, UI label, stored label). Pairs not listed map to themselves.
const LABEL_TABLE: &[(Collection, &str, &str)] = &[
    (Collection::PovertySexEthnicity, EXTREME_POVERTY_UI, EXTREME_POVERTY_STORED),
    (Collection::PovertyEducation, EXTREME_POVERTY_UI, EXTREME_POVERTY_STORED),
    (Collection::PovertyAge, EXTREME_POVERTY_UI, EXTREME_POVERTY_STORED),
    (Collection::PovertyRegion, EXTREME_POVERTY_UI, EXTREME_POVERTY_STORED),
    (Collection::PovertyProvincial, EXTREME_POVERTY_UI, EXTREME_POVERTY_STORED),
    (Collection::HistoricalSeries, EXTREME_POVERTY_UI, EXTREME_POVERTY_STORED),
    (Collection::Scorecards, EXTREME_POVERTY_UI, EXTREME_POVERTY_STORED),
];

/// Label under which `collection` stores the indicator shown as `ui_label`.
pub fn stored_label<'a>(collection: Collection, ui_label: &'a str) -> &'a str {
    LABEL_TABLE
        .iter()
        .find(|(c, ui, _)| *c == collection && *ui == ui_label)
        .map(|(_, _, stored)| *stored)
        .unwrap_or(ui_label)
}
