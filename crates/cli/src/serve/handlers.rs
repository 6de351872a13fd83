//! HTTP route handlers for the provider CRUD surface.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use resmock_core::{Resource, Value};
use resmock_provider::ProviderError;
use resmock_store::StoreError;
use serde::Deserialize;

use super::json_error;
use super::state::AppState;

/// Fallback handler for unmatched routes.
pub(crate) async fn handle_not_found() -> impl IntoResponse {
    json_error(StatusCode::NOT_FOUND, "not found")
}

/// GET /health
pub(crate) async fn handle_health() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({"status": "ok"})))
}

/// GET /types
pub(crate) async fn handle_list_types(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let types: Vec<&str> = state.provider.resource_types().collect();
    (
        StatusCode::OK,
        Json(serde_json::json!({"resource_types": types})),
    )
}

/// GET /types/{type}/schema
pub(crate) async fn handle_get_schema(
    State(state): State<Arc<AppState>>,
    Path(type_name): Path<String>,
) -> impl IntoResponse {
    match state.provider.schema(&type_name) {
        Ok(schema) => (StatusCode::OK, Json(serde_json::json!(schema))).into_response(),
        Err(err) => error_response(err).into_response(),
    }
}

/// POST /resources/{type}
pub(crate) async fn handle_create(
    State(state): State<Arc<AppState>>,
    Path(type_name): Path<String>,
    Json(body): Json<serde_json::Value>,
) -> impl IntoResponse {
    let resource = match parse_resource(body) {
        Ok(resource) => resource,
        Err(message) => return json_error(StatusCode::BAD_REQUEST, &message).into_response(),
    };

    let handler = match state.provider.resource(&type_name) {
        Ok(handler) => handler,
        Err(err) => return error_response(err).into_response(),
    };

    match handler.create(resource) {
        Ok(created) => (StatusCode::CREATED, Json(serde_json::json!(created))).into_response(),
        Err(err) => error_response(err).into_response(),
    }
}

/// GET /resources/{type}/{id}
pub(crate) async fn handle_read(
    State(state): State<Arc<AppState>>,
    Path((type_name, id)): Path<(String, String)>,
) -> impl IntoResponse {
    let handler = match state.provider.resource(&type_name) {
        Ok(handler) => handler,
        Err(err) => return error_response(err).into_response(),
    };

    // The HTTP caller carries no state of its own, so the state handed to
    // the read is just the identifier.
    let mut values = BTreeMap::new();
    values.insert("id".to_string(), Value::string(id));

    match handler.read(Resource::new(values)) {
        Ok(Some(resource)) => (StatusCode::OK, Json(serde_json::json!(resource))).into_response(),
        Ok(None) => json_error(StatusCode::NOT_FOUND, "resource not found").into_response(),
        Err(err) => error_response(err).into_response(),
    }
}

/// PUT /resources/{type}/{id}
pub(crate) async fn handle_update(
    State(state): State<Arc<AppState>>,
    Path((type_name, id)): Path<(String, String)>,
    Json(body): Json<serde_json::Value>,
) -> impl IntoResponse {
    let mut resource = match parse_resource(body) {
        Ok(resource) => resource,
        Err(message) => return json_error(StatusCode::BAD_REQUEST, &message).into_response(),
    };

    let body_id = resource.id().map(str::to_string);
    match body_id.as_deref() {
        None => {
            resource
                .values
                .insert("id".to_string(), Value::string(id.clone()));
        }
        Some(body_id) if body_id != id => {
            return json_error(
                StatusCode::BAD_REQUEST,
                "resource id in the document does not match the path",
            )
            .into_response();
        }
        Some(_) => {}
    }

    let handler = match state.provider.resource(&type_name) {
        Ok(handler) => handler,
        Err(err) => return error_response(err).into_response(),
    };

    match handler.update(resource) {
        Ok(updated) => (StatusCode::OK, Json(serde_json::json!(updated))).into_response(),
        Err(err) => error_response(err).into_response(),
    }
}

/// DELETE /resources/{type}/{id}
pub(crate) async fn handle_delete(
    State(state): State<Arc<AppState>>,
    Path((type_name, id)): Path<(String, String)>,
) -> impl IntoResponse {
    let handler = match state.provider.resource(&type_name) {
        Ok(handler) => handler,
        Err(err) => return error_response(err).into_response(),
    };

    match handler.delete(&id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(err).into_response(),
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ListParams {
    id: Option<String>,
    limit: Option<u64>,
}

/// GET /resources/{type}?id=&limit=
pub(crate) async fn handle_list(
    State(state): State<Arc<AppState>>,
    Path(type_name): Path<String>,
    Query(params): Query<ListParams>,
) -> impl IntoResponse {
    let handler = match state.provider.resource(&type_name) {
        Ok(handler) => handler,
        Err(err) => return error_response(err).into_response(),
    };

    let mut resources = Vec::new();
    let mut errors = Vec::new();
    let result = handler.list(params.id.as_deref(), params.limit, &mut |item| {
        match item {
            Ok(resource) => resources.push(resource),
            Err(err) => errors.push(err.to_string()),
        }
        true
    });

    match result {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({"resources": resources, "errors": errors})),
        )
            .into_response(),
        Err(err) => error_response(err).into_response(),
    }
}

/// GET /datasources/{type}/{id}
pub(crate) async fn handle_data_source(
    State(state): State<Arc<AppState>>,
    Path((type_name, id)): Path<(String, String)>,
) -> impl IntoResponse {
    let handler = match state.provider.resource(&type_name) {
        Ok(handler) => handler,
        Err(err) => return error_response(err).into_response(),
    };

    match handler.read_data_source(&id) {
        Ok(resource) => (StatusCode::OK, Json(serde_json::json!(resource))).into_response(),
        Err(err) => error_response(err).into_response(),
    }
}

fn parse_resource(body: serde_json::Value) -> Result<Resource, String> {
    serde_json::from_value(body).map_err(|err| format!("invalid resource document: {}", err))
}

fn error_response(err: ProviderError) -> impl IntoResponse {
    let status = match &err {
        ProviderError::UnknownType { .. } => StatusCode::NOT_FOUND,
        ProviderError::Store(StoreError::AlreadyExists { .. }) => StatusCode::CONFLICT,
        ProviderError::Store(store) if store.is_not_found() => StatusCode::NOT_FOUND,
        ProviderError::MissingId
        | ProviderError::Generate(_)
        | ProviderError::Conversion(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    json_error(status, &err.to_string())
}
