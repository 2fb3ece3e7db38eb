// Socioeconomic Dashboard - Web Server
// REST API with Axum: one JSON topic view per dashboard page

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use socio_dashboard::config::{self, init_tracing};
use socio_dashboard::dataset::parse_year;
use socio_dashboard::transforms::home;
use socio_dashboard::{
    load_dataset, render_topic, validate, LoadedDataset, Selection, SelectorError, Topic, YearRange,
};

/// Shared application state
#[derive(Clone)]
struct AppState {
    loaded: Arc<LoadedDataset>,
    /// Selection every request starts from before applying its query
    defaults: Arc<Selection>,
}

/// API Response wrapper
#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
            error: None,
        }
    }
}

impl ApiResponse<()> {
    fn err(message: String) -> Self {
        Self {
            success: false,
            data: (),
            error: Some(message),
        }
    }
}

fn error_response(status: StatusCode, message: String) -> Response {
    (status, Json(ApiResponse::err(message))).into_response()
}

#[derive(Serialize)]
struct TopicSummary {
    id: &'static str,
    title: &'static str,
}

/// Selector values accepted as query parameters. Lists are comma-separated.
#[derive(Debug, Default, Deserialize)]
struct SelectionQuery {
    indicator: Option<String>,
    province_year: Option<String>,
    employment_dimension: Option<String>,
    employment_period: Option<String>,
    growth_period: Option<String>,
    wage_gap: Option<String>,
    gic_start: Option<String>,
    gic_end: Option<String>,
    gini_countries: Option<String>,
    latam_variable: Option<String>,
    latam_percentile: Option<String>,
    latam_countries: Option<String>,
    tax_burden_year: Option<String>,
}

fn year(value: &str) -> Result<i32, SelectorError> {
    parse_year(value).ok_or_else(|| SelectorError::InvalidYear(value.to_string()))
}

fn list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

impl SelectionQuery {
    fn apply(self, mut selection: Selection) -> Result<Selection, SelectorError> {
        if let Some(v) = self.indicator {
            selection.poverty_indicator = v;
        }
        if let Some(v) = self.province_year {
            selection.province_year = Some(year(&v)?);
        }
        if let Some(v) = self.employment_dimension {
            selection.employment_dimension = v;
        }
        if let Some(v) = self.employment_period {
            selection.employment_period = Some(v.parse::<YearRange>()?);
        }
        if let Some(v) = self.growth_period {
            selection.growth_period = Some(v.parse::<YearRange>()?);
        }
        if let Some(v) = self.wage_gap {
            selection.wage_gap = v;
        }
        if let Some(v) = self.gic_start {
            selection.gic_start = Some(year(&v)?);
        }
        if let Some(v) = self.gic_end {
            selection.gic_end = Some(year(&v)?);
        }
        if let Some(v) = self.gini_countries {
            selection.gini_countries = list(&v);
        }
        if let Some(v) = self.latam_variable {
            selection.latam_variable = v;
        }
        if let Some(v) = self.latam_percentile {
            selection.latam_percentile = v;
        }
        if let Some(v) = self.latam_countries {
            selection.latam_countries = list(&v);
        }
        if let Some(v) = self.tax_burden_year {
            selection.tax_burden_year = Some(year(&v)?);
        }
        Ok(selection)
    }
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// GET /api/topics - Available dashboard pages
async fn list_topics() -> impl IntoResponse {
    let topics: Vec<TopicSummary> = Topic::ALL
        .iter()
        .map(|t| TopicSummary {
            id: t.slug(),
            title: t.title(),
        })
        .collect();
    Json(ApiResponse::ok(topics))
}

/// GET /api/topics/:topic - Panels of one page for the selection in the query
async fn get_topic(
    State(state): State<AppState>,
    Path(topic): Path<String>,
    Query(query): Query<SelectionQuery>,
) -> Response {
    let topic: Topic = match topic.parse() {
        Ok(topic) => topic,
        Err(e) => return error_response(StatusCode::NOT_FOUND, e.to_string()),
    };
    let selection = match query.apply(state.defaults.as_ref().clone()) {
        Ok(selection) => selection,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, e.to_string()),
    };

    match render_topic(&state.loaded.dataset, &selection, topic) {
        Ok(view) => (StatusCode::OK, Json(ApiResponse::ok(view))).into_response(),
        Err(e) => {
            tracing::error!("Error rendering topic {}: {:#}", topic, e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

/// GET /api/scorecards - Home page cards
async fn get_scorecards(State(state): State<AppState>) -> impl IntoResponse {
    Json(ApiResponse::ok(home::scorecards(&state.loaded.dataset)))
}

/// GET /api/validation - Structural report of the loaded dataset
async fn get_validation(State(state): State<AppState>) -> impl IntoResponse {
    Json(ApiResponse::ok(validate(&state.loaded)))
}

fn app(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/topics", get(list_topics))
        .route("/topics/:topic", get(get_topic))
        .route("/scorecards", get(get_scorecards))
        .route("/validation", get(get_validation))
        .with_state(state);

    Router::new()
        .nest("/api", api_routes)
        .layer(CorsLayer::permissive())
}

// ============================================================================
// Main Server
// ============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_arg = std::env::args()
        .skip_while(|a| a != "--config")
        .nth(1)
        .map(std::path::PathBuf::from);
    let config = config::load_config(config_arg.as_deref())?;
    init_tracing(&config.logging);

    let data_path = config::dataset_path(&config, std::env::var(config::DATA_ENV).ok());
    let loaded = load_dataset(&data_path)?;

    let state = AppState {
        loaded: Arc::new(loaded),
        defaults: Arc::new(config.initial_selection()),
    };

    let listener = tokio::net::TcpListener::bind(&config.server.bind).await?;
    tracing::info!("🚀 Server running on http://{}", config.server.bind);
    tracing::info!("   API: http://{}/api/topics", config.server.bind);

    axum::serve(listener, app(state)).await?;
    Ok(())
}
