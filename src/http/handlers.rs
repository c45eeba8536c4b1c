//! Route handlers for the product API.

use std::collections::BTreeMap;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::Value;

use crate::catalog::{ListParams, ListQuery, Product, ProductPage, ProductPayload};
use crate::http::error::{ApiError, ApiResult};
use crate::http::server::AppState;

pub const WELCOME_MESSAGE: &str = "Welcome to the Product API! Go to /products to view products.";

pub async fn welcome() -> &'static str {
    WELCOME_MESSAGE
}

pub async fn list_products(
    State(state): State<AppState>,
    pairs: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> ApiResult<Json<ProductPage>> {
    let Query(pairs) = pairs?;
    let params = ListParams::from_pairs(pairs);
    let query = ListQuery::from_params(params, &state.config.pagination);
    Ok(Json(state.store.query(&query)))
}

pub async fn product_stats(State(state): State<AppState>) -> Json<BTreeMap<String, usize>> {
    Json(state.store.category_counts())
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Product>> {
    state.store.find_by_id(&id).map(Json).ok_or(ApiError::NotFound)
}

pub async fn create_product(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(body) = body?;
    let payload = ProductPayload::from_json(&body)?;

    let product = state.store.create(payload.into_new_product());
    tracing::info!(id = %product.id, name = %product.name, "Product created");

    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<Product>> {
    let Json(body) = body?;
    let patch = ProductPayload::from_json(&body)?.into_patch();

    let product = state.store.update(&id, patch).ok_or(ApiError::NotFound)?;
    tracing::info!(id = %product.id, "Product updated");

    Ok(Json(product))
}

pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    if !state.store.delete(&id) {
        return Err(ApiError::NotFound);
    }
    tracing::info!(id = %id, "Product deleted");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn route_not_found() -> ApiError {
    ApiError::RouteNotFound
}
