use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::debug;

use common::types::Deleted;
use models::{NewProduct, Product, ProductPatch};
use service::pagination::apply_limit;

use crate::errors::ApiError;
use crate::params::{display_id, parse_int};
use crate::state::AppState;

/// Query string as ordered pairs, so a repeated key is kept instead of rejected.
pub type QueryPairs = Vec<(String, String)>;

/// The `limit` value as the list route sees it: repeated keys are joined with
/// `,` the way an array is stringified, so two or more values never read as
/// a number.
pub fn limit_param(pairs: &[(String, String)]) -> Option<String> {
    let values: Vec<&str> = pairs
        .iter()
        .filter(|(k, _)| k == "limit")
        .map(|(_, v)| v.as_str())
        .collect();
    (!values.is_empty()).then(|| values.join(","))
}

/// Resolve a raw `:pid` into a store id, or the 404 the client should see.
fn resolve_id(raw: &str) -> Result<u64, ApiError> {
    let parsed = parse_int(raw);
    parsed
        .and_then(|v| u64::try_from(v).ok())
        .ok_or_else(|| ApiError::ProductNotFound(display_id(parsed)))
}

/// All products, cut to `?limit=` when given.
pub async fn list_products(
    State(state): State<AppState>,
    Query(pairs): Query<QueryPairs>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let limit = limit_param(&pairs);
    let products = state.catalog.list().await?;
    debug!(total = products.len(), limit = ?limit, "list products");
    Ok(Json(apply_limit(products, limit.as_deref())))
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(pid): Path<String>,
) -> Result<Json<Product>, ApiError> {
    let id = resolve_id(&pid)?;
    match state.catalog.get_by_id(id).await? {
        Some(product) => Ok(Json(product)),
        None => Err(ApiError::ProductNotFound(id.to_string())),
    }
}

pub async fn create_product(
    State(state): State<AppState>,
    body: Result<Json<NewProduct>, JsonRejection>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let Json(candidate) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let created = state.catalog.insert(candidate).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_product(
    State(state): State<AppState>,
    Path(pid): Path<String>,
    body: Result<Json<ProductPatch>, JsonRejection>,
) -> Result<Json<Product>, ApiError> {
    let id = resolve_id(&pid)?;
    let Json(patch) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let updated = state.catalog.update(id, patch).await?;
    Ok(Json(updated))
}

pub async fn delete_product(
    State(state): State<AppState>,
    Path(pid): Path<String>,
) -> Result<Json<Deleted>, ApiError> {
    let id = resolve_id(&pid)?;
    let deleted = state.catalog.delete(id).await?;
    Ok(Json(Deleted { deleted }))
}
