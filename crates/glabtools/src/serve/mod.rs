//! HTTP service exposing the GitLab operations
//!
//! A thin axum front-end: request shapes map 1:1 onto the CLI's data
//! functions, success becomes 200 and every structured failure becomes 400
//! with the outcome body verbatim.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use tower_http::cors::{Any, CorsLayer};

use glabtools_core::outcome::Outcome;

use crate::gitlab::{items, permission, GitLabConfig};
use crate::prelude::{eprintln, *};


/// Serve module app - options for the HTTP service
#[derive(Debug, clap::Args)]
pub struct App {
    /// Port to listen on
    #[arg(short, long, default_value = "5000")]
    pub port: u16,

    /// Host to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Ceiling on pages fetched per listing request (unbounded if unset)
    #[arg(long, env = "GITLAB_MAX_PAGES")]
    pub max_pages: Option<u32>,
}

/// Shared state for the request handlers
#[derive(Debug, Clone)]
pub struct ServeState {
    pub config: GitLabConfig,
    pub max_pages: Option<u32>,
}

/// Module entry point
pub async fn run(app: App, global: crate::Global) -> Result<()> {
    let config = GitLabConfig::from_env().with_overrides(global.base_url, global.token);

    if global.verbose {
        eprintln!(
            "Starting GitLab proxy service on {}:{}...",
            app.host, app.port
        );
    }

    let addr = format!("{}:{}", app.host, app.port);
    let state = Arc::new(ServeState {
        config,
        max_pages: app.max_pages,
    });
    let app_router = router(state);

    log::info!("service listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| eyre!("Failed to bind to {}: {}", addr, e))?;

    axum::serve(listener, app_router)
        .await
        .map_err(|e| eyre!("Server error: {e}"))?;

    Ok(())
}

/// Build the service router; extracted so tests can drive it directly.
pub fn router(state: Arc<ServeState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .route("/permission", post(permission_handler))
        .route("/items", get(items_handler))
        .layer(cors)
        .with_state(state)
}

/// Root endpoint with usage instructions
async fn index_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "service": "glabtools",
        "endpoints": {
            "/health": "Health check endpoint",
            "/permission": "POST endpoint to modify user permissions",
            "/items": "GET endpoint to retrieve issues or merge requests by year"
        }
    }))
}

/// Simple health check endpoint
async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Body of the permission endpoint; everything optional so missing fields
/// are reported as their own error class instead of a deserialization
/// failure.
#[derive(Debug, Deserialize)]
pub struct PermissionRequest {
    pub username: Option<String>,
    pub target: Option<String>,
    pub role: Option<String>,
}

impl PermissionRequest {
    /// Names of required fields absent from the body, in declaration order.
    pub fn missing_parameters(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.username.is_none() {
            missing.push("username");
        }
        if self.target.is_none() {
            missing.push("target");
        }
        if self.role.is_none() {
            missing.push("role");
        }
        missing
    }
}

fn bad_request(message: String) -> (StatusCode, Json<Outcome>) {
    log::error!("{message}");
    (StatusCode::BAD_REQUEST, Json(Outcome::failure(message)))
}

async fn permission_handler(
    State(state): State<Arc<ServeState>>,
    payload: Result<Json<PermissionRequest>, JsonRejection>,
) -> (StatusCode, Json<Outcome>) {
    let Ok(Json(request)) = payload else {
        return bad_request("No JSON data provided".to_string());
    };

    let missing = request.missing_parameters();
    if !missing.is_empty() {
        return bad_request(format!(
            "Missing required parameters: {}",
            missing.join(", ")
        ));
    }

    let username = request.username.as_deref().unwrap_or_default();
    let target = request.target.as_deref().unwrap_or_default();
    let role = request.role.as_deref().unwrap_or_default();

    log::info!("modifying permission for user {username} on {target} to {role}");
    match permission::set_role_data(&state.config, username, target, role).await {
        Ok(output) => (
            StatusCode::OK,
            Json(Outcome::success(output.message, output.data)),
        ),
        Err(err) => {
            log::error!("{err}");
            (StatusCode::BAD_REQUEST, Json(err.outcome()))
        }
    }
}

/// Query string of the items endpoint.
#[derive(Debug, Deserialize)]
pub struct ItemsQuery {
    #[serde(rename = "type")]
    pub item_type: Option<String>,
    pub year: Option<String>,
}

async fn items_handler(
    State(state): State<Arc<ServeState>>,
    Query(query): Query<ItemsQuery>,
) -> (StatusCode, Json<Outcome>) {
    let Some(item_type) = query.item_type else {
        return bad_request("Missing required parameter: type".to_string());
    };
    let Some(year) = query.year else {
        return bad_request("Missing required parameter: year".to_string());
    };

    log::info!("retrieving {item_type} for year {year}");
    match items::list_items_data(&state.config, &item_type, &year, state.max_pages, None).await {
        Ok(output) => {
            let data = serde_json::to_value(&output.items).unwrap_or_default();
            (StatusCode::OK, Json(Outcome::success(output.message, data)))
        }
        Err(err) => {
            log::error!("{err}");
            (StatusCode::BAD_REQUEST, Json(err.outcome()))
        }
    }
}
