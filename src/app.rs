#![cfg(feature = "web")]

use axum::{
    Json, Router,
    extract::{Query, Request, State},
    http::{StatusCode, header},
    middleware::{self, Next},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use handlebars::Handlebars;
use log::{error, info};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::services::ServeDir;

use crate::auth::{self, Accounts};
use crate::config::Config;
use crate::dataset::Dataset;
use crate::figure::violin_figure;
use crate::graph::{GraphOptions, render_box_plot};
use crate::loader;
use crate::readout::{Readout, readouts};
use crate::record::{FEATURES, Feature};
use crate::series::series_for;
use crate::stats::{CropSummary, aggregate};

/// Crop preselected on the dashboard when the dataset has it
pub const DEFAULT_CROP: &str = "rice";

/// Feature preselected in the violin plot picker
pub const DEFAULT_FEATURE: Feature = Feature::N;

const DATASET_URL: &str = "https://www.kaggle.com/atharvaingle/crop-recommendation-dataset";

pub struct AppState {
    pub dataset: Arc<Dataset>,
    pub accounts: Accounts,
    templates: Handlebars<'static>,
}

impl AppState {
    pub fn new(dataset: Dataset, accounts: Accounts) -> Result<Self, handlebars::TemplateError> {
        let mut templates = Handlebars::new();
        templates.register_template_string("login", include_str!("./static/login.html"))?;
        templates.register_template_string("register", include_str!("./static/register.html"))?;
        templates.register_template_string("dashboard", include_str!("./static/dashboard.html"))?;

        Ok(AppState {
            dataset: Arc::new(dataset),
            accounts,
            templates,
        })
    }

    pub(crate) fn render_page<T: Serialize>(&self, name: &str, data: &T) -> Response {
        match self.templates.render(name, data) {
            Ok(page) => Html(page).into_response(),
            Err(e) => {
                error!("Failed to render template '{}': {}", name, e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Template error").into_response()
            }
        }
    }
}

/// Option entry for a selection control
#[derive(Serialize)]
struct SelectOption {
    label: String,
    value: String,
}

#[derive(Serialize)]
struct OptionsResponse {
    crops: Vec<SelectOption>,
    features: Vec<SelectOption>,
}

#[derive(Deserialize)]
struct StatisticsQuery {
    crop: String,
}

#[derive(Serialize)]
struct StatisticsResponse {
    crop: String,
    matched: bool,
    statistics: CropSummary,
    readouts: Vec<Readout>,
}

#[derive(Deserialize)]
struct FeatureQuery {
    feature: String,
}

#[derive(Serialize)]
struct ErrorResponse {
    status: String,
    message: String,
}

fn error_response(code: StatusCode, message: impl ToString) -> Response {
    (
        code,
        Json(ErrorResponse {
            status: "error".to_string(),
            message: message.to_string(),
        }),
    )
        .into_response()
}

/// Load the dataset, then serve the dashboard until the process exits
///
/// A dataset that fails to load aborts startup before the socket is bound.
pub async fn run(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let dataset = loader::load(&config.data)?;

    let accounts = Accounts::new(config.session_ttl());
    for (username, password) in &config.users {
        accounts.register(username, password)?;
    }

    let state = Arc::new(AppState::new(dataset, accounts)?);
    let app = router(state).nest_service("/static", ServeDir::new(&config.static_dir));

    let listener = TcpListener::bind(config.bind).await?;
    info!("Listening on http://{}", config.bind);
    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the application routes around shared state
pub fn router(state: Arc<AppState>) -> Router {
    let dashboard = Router::new()
        .route("/dashboard/", get(serve_dashboard))
        .route("/dashboard/api/options", get(get_options))
        .route("/dashboard/api/statistics", get(get_statistics))
        .route("/dashboard/api/violin", get(get_violin))
        .route("/dashboard/api/violin.png", get(get_violin_png))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_auth,
        ));

    Router::new()
        .route("/", get(auth::serve_login_page))
        .route("/login", post(auth::handle_login))
        .route("/logout", get(auth::handle_logout))
        .route(
            "/register",
            get(auth::serve_register_page).post(auth::handle_register),
        )
        .route("/dashboard", get(|| async { Redirect::permanent("/dashboard/") }))
        .merge(dashboard)
        .layer(ServiceBuilder::new().layer(middleware::from_fn(log_requests)))
        .with_state(state)
}

async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(request).await;
    info!(
        "{} {} -> {} ({:?})",
        method,
        path,
        response.status().as_u16(),
        started.elapsed()
    );
    response
}

async fn serve_dashboard(State(state): State<Arc<AppState>>) -> Response {
    let dataset = &state.dataset;
    let selected = if dataset.contains_crop(DEFAULT_CROP) {
        DEFAULT_CROP
    } else {
        dataset.crop_labels().first().map(String::as_str).unwrap_or("")
    };

    let crops: Vec<_> = dataset
        .crop_labels()
        .iter()
        .map(|crop| {
            serde_json::json!({
                "value": crop,
                "selected": crop == selected,
            })
        })
        .collect();
    let features: Vec<_> = FEATURES
        .iter()
        .map(|feature| {
            serde_json::json!({
                "value": feature.name(),
                "selected": *feature == DEFAULT_FEATURE,
            })
        })
        .collect();

    let page = serde_json::json!({
        "dataset_url": DATASET_URL,
        "crops": crops,
        "features": features,
        "readouts": readouts(&aggregate(dataset, selected)),
    });
    state.render_page("dashboard", &page)
}

async fn get_options(State(state): State<Arc<AppState>>) -> Json<OptionsResponse> {
    let crops = state
        .dataset
        .crop_labels()
        .iter()
        .map(|crop| SelectOption {
            label: crop.clone(),
            value: crop.clone(),
        })
        .collect();
    let features = state
        .dataset
        .feature_names()
        .iter()
        .map(|name| SelectOption {
            label: name.to_string(),
            value: name.to_string(),
        })
        .collect();

    Json(OptionsResponse { crops, features })
}

async fn get_statistics(
    State(state): State<Arc<AppState>>,
    Query(params): Query<StatisticsQuery>,
) -> Json<StatisticsResponse> {
    let statistics = aggregate(&state.dataset, &params.crop);

    Json(StatisticsResponse {
        matched: !statistics.is_empty(),
        readouts: readouts(&statistics),
        crop: params.crop,
        statistics,
    })
}

async fn get_violin(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FeatureQuery>,
) -> Response {
    match violin_figure(&state.dataset, &params.feature) {
        Ok(figure) => Json(figure).into_response(),
        Err(e) => error_response(StatusCode::BAD_REQUEST, e),
    }
}

async fn get_violin_png(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FeatureQuery>,
) -> Response {
    let feature: Feature = match params.feature.parse() {
        Ok(feature) => feature,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, e),
    };

    let series = series_for(&state.dataset, feature);
    match render_box_plot(&series, &GraphOptions::for_feature(feature)) {
        Ok(png) => ([(header::CONTENT_TYPE, "image/png")], png).into_response(),
        Err(e) => {
            error!("Failed to render chart for {}: {}", feature, e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e)
        }
    }
}
