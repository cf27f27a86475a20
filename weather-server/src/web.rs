use std::{any::Any, sync::Arc};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};
use weather_core::{WeatherRecord, WeatherResolver};

use crate::page;

#[derive(Debug, Clone)]
pub struct AppState {
    resolver: Arc<WeatherResolver>,
    default_city: Arc<str>,
}

impl AppState {
    pub fn new(resolver: Arc<WeatherResolver>, default_city: String) -> Self {
        Self {
            resolver,
            default_city: default_city.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub city: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ErrorBody {
    pub error: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/search", post(search))
        .route("/api/weather/{city}", get(weather_for_city))
        .fallback(not_found)
        .layer(CatchPanicLayer::custom(internal_error))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(state: AppState, host: &str, port: u16) -> anyhow::Result<()> {
    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Web server running at http://{}", addr);
    axum::serve(listener, router(state)).await?;
    Ok(())
}

async fn home(State(state): State<AppState>) -> Html<String> {
    let record = state.resolver.resolve(&state.default_city).await;
    Html(page::index(&record))
}

async fn search(State(state): State<AppState>, Json(req): Json<SearchRequest>) -> Response {
    let city = req.city.as_deref().unwrap_or_default().trim();

    if city.is_empty() {
        let body = ErrorBody {
            error: "City name is required".to_string(),
        };
        return (StatusCode::BAD_REQUEST, Json(body)).into_response();
    }

    Json(state.resolver.resolve(city).await).into_response()
}

async fn weather_for_city(
    State(state): State<AppState>,
    Path(city): Path<String>,
) -> Json<WeatherRecord> {
    Json(state.resolver.resolve(&city).await)
}

async fn not_found() -> (StatusCode, Html<String>) {
    (StatusCode::NOT_FOUND, Html(page::not_found()))
}

fn internal_error(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!(detail, "request handler panicked");

    (StatusCode::INTERNAL_SERVER_ERROR, Html(page::internal_error())).into_response()
}
