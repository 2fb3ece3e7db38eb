// Socioeconomic Dashboard - Core Library
// Exposes the dataset, transforms and panel binding for the CLI, API server, and tests

pub mod error;
pub mod dataset;     // Dataset access - typed collections, data.js loading
pub mod aggregate;   // Grouping, year axes, alignment
pub mod series;      // Chart-ready shapes and outcomes
pub mod indicators;  // UI label → stored label table
pub mod selection;   // Explicit selection state
pub mod metrics;     // Year-over-year variation, sector growth, GIC
pub mod transforms;  // One module per dashboard topic
pub mod dashboard;   // Presentation binding - titled panels per topic
pub mod validation;  // Structural dataset checks
pub mod export;      // CSV export of tables
pub mod config;      // dashboard.toml + tracing setup

#[cfg(test)]
mod fixtures;

// Re-export commonly used types
pub use error::SelectorError;
pub use dataset::{
    Collection, Dataset, DatasetSource, LoadedDataset, Observation, Year,
    load_dataset, parse_dataset, strip_js_wrapper,
};
pub use series::{
    CrossSection, Outcome, Series, Table, TimeSeries,
    NO_DATA_LABEL, SELECT_DISTINCT_YEARS_LABEL,
};
pub use selection::{Selection, ShareVariable, WageGapDimension, YearRange};
pub use metrics::{DecileGrowth, SectorGrowth, VariationRow};
pub use transforms::{PopulationCard, ProvinceRow, Scorecard, ScoreUnit, SignificanceRow, Verdict};
pub use dashboard::{render_topic, Panel, PanelKind, Topic, TopicView};
pub use validation::{validate, Severity, ValidationIssue, ValidationReport};
pub use export::{export_table, export_table_to_path, ExportTable};
pub use config::{load_config, Config};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
