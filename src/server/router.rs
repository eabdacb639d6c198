//! Route table for the catalog

use super::handlers::{
    AppState, index, product_add, product_add_form, product_delete, product_delete_confirm,
    product_detail, product_update, product_update_form, products_by_category,
};
use axum::{Json, Router, routing::get};
use serde_json::{Value, json};

/// Name reported by the health routes
pub const SERVICE_NAME: &str = "market-rs";

/// Build the catalog routes
///
/// - GET /                              - all visible products
/// - GET /products/{category}/          - visible products in one category
/// - GET|POST /product/add/             - creation form / submit
/// - GET /product/{id}                  - product detail
/// - GET|POST /product/{id}/edit/       - update form / submit
/// - GET|POST /product/{id}/delete/     - confirmation / delete
pub fn build_product_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/products/{category}/", get(products_by_category))
        .route("/product/add/", get(product_add_form).post(product_add))
        .route("/product/{id}", get(product_detail))
        .route(
            "/product/{id}/edit/",
            get(product_update_form).post(product_update),
        )
        .route(
            "/product/{id}/delete/",
            get(product_delete_confirm).post(product_delete),
        )
        .with_state(state)
}

/// Build health check routes
pub fn health_routes() -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": SERVICE_NAME
    }))
}
