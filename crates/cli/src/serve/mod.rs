//! `resmock serve` -- HTTP JSON API server around the provider.
//!
//! Exposes the provider's CRUD lifecycle as an async HTTP service using
//! `axum` + `tokio`, standing in for the host engine's plugin transport.
//! Resources ride the wire in the same tagged-union document form they are
//! persisted in.
//!
//! Endpoints:
//! - GET    /health                          - Server status
//! - GET    /types                           - Served resource type names
//! - GET    /types/{type}/schema             - Schema for one type
//! - GET    /resources/{type}                - List resources (`?id=`, `?limit=`)
//! - POST   /resources/{type}                - Create a resource
//! - GET    /resources/{type}/{id}           - Read a resource
//! - PUT    /resources/{type}/{id}           - Update a resource
//! - DELETE /resources/{type}/{id}           - Delete a resource
//! - GET    /datasources/{type}/{id}         - Read a data source document
//!
//! All responses use Content-Type: application/json.

mod handlers;
mod state;

use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use axum::http::{Method, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use resmock_provider::{Provider, ProviderConfig};
use tower_http::cors::{Any, CorsLayer};

use self::handlers::{
    handle_create, handle_data_source, handle_delete, handle_get_schema, handle_health,
    handle_list, handle_list_types, handle_not_found, handle_read, handle_update,
};
use self::state::AppState;

use crate::{report_error, OutputFormat};

/// Construct a JSON error response with the given status code and message.
fn json_error(status: StatusCode, message: &str) -> impl IntoResponse {
    (status, Json(serde_json::json!({"error": message})))
}

pub(crate) fn cmd_serve(
    port: u16,
    resource_dir: Option<PathBuf>,
    data_dir: Option<PathBuf>,
    dynamic_resources: Option<PathBuf>,
    use_only_state: bool,
    output: OutputFormat,
    quiet: bool,
) {
    let mut config = ProviderConfig {
        use_only_state,
        dynamic_resources_file: dynamic_resources,
        ..ProviderConfig::default()
    };
    if let Some(dir) = resource_dir {
        config.resource_directory = dir;
    }
    if let Some(dir) = data_dir {
        config.data_directory = dir;
    }

    let provider = match Provider::new(config) {
        Ok(provider) => provider,
        Err(err) => {
            report_error(&err.to_string(), output, quiet);
            process::exit(1);
        }
    };

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(err) => {
            report_error(&format!("failed to start runtime: {}", err), output, quiet);
            process::exit(1);
        }
    };

    if let Err(err) = runtime.block_on(start_server(port, provider)) {
        report_error(&err.to_string(), output, quiet);
        process::exit(1);
    }
}

async fn start_server(
    port: u16,
    provider: Provider,
) -> Result<(), Box<dyn std::error::Error>> {
    let state = Arc::new(AppState { provider });

    // Permissive CORS for local use; this server fronts a mock.
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_origin(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/health", get(handle_health))
        .route("/types", get(handle_list_types))
        .route("/types/{type_name}/schema", get(handle_get_schema))
        .route(
            "/resources/{type_name}",
            get(handle_list).post(handle_create),
        )
        .route(
            "/resources/{type_name}/{id}",
            get(handle_read).put(handle_update).delete(handle_delete),
        )
        .route("/datasources/{type_name}/{id}", get(handle_data_source))
        .fallback(handle_not_found)
        .layer(cors)
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    eprintln!("resmock provider listening on http://0.0.0.0:{}", port);
    axum::serve(listener, app).await?;
    Ok(())
}
