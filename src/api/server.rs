//! API Server module
//!
//! This module hosts a materialized report over HTTP: the rendered page for
//! browsing, plus the page model as JSON for other renderers.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::html::render_page;
use crate::report::{GroupingAxis, ReportPage};

/// Server configuration
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub address: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: ([127, 0, 0, 1], 3000).into(),
        }
    }
}

/// API responses
#[derive(Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message),
        }
    }
}

/// The report being served; rendered once, shared by every request
#[derive(Clone)]
pub struct ReportState {
    page: Arc<ReportPage>,
    html: Arc<String>,
}

impl ReportState {
    pub fn new(page: ReportPage) -> Self {
        let html = render_page(&page);
        Self {
            page: Arc::new(page),
            html: Arc::new(html),
        }
    }
}

/// Builds the router serving `state`
pub fn router(state: ReportState) -> Router {
    Router::new()
        .route("/", get(|| async { Redirect::temporary("/report") }))
        .route("/report", get(report_html_handler))
        .route("/api/report", get(report_json_handler))
        .route("/api/report/:axis", get(report_tree_handler))
        .with_state(state)
}

/// Starts the API server
pub async fn serve(
    page: ReportPage,
    config: ServerConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = router(ReportState::new(page))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    tracing::info!("Serving report on http://{}/report", config.address);
    let listener = TcpListener::bind(config.address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn report_html_handler(State(state): State<ReportState>) -> impl IntoResponse {
    Html(state.html.as_str().to_string())
}

async fn report_json_handler(State(state): State<ReportState>) -> impl IntoResponse {
    Json(ApiResponse::success(state.page.as_ref().clone()))
}

async fn report_tree_handler(
    State(state): State<ReportState>,
    Path(axis): Path<String>,
) -> Response {
    match GroupingAxis::from_name(&axis) {
        Some(axis) => (
            StatusCode::OK,
            Json(ApiResponse::success(state.page.tree(axis).clone())),
        )
            .into_response(),
        None => {
            tracing::warn!("Unknown grouping axis requested: {}", axis);
            (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<()>::error(format!(
                    "Unknown grouping '{}', expected 'message' or 'task'",
                    axis
                ))),
            )
                .into_response()
        }
    }
}
