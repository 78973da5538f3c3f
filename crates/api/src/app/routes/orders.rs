use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::Extension;
use axum::response::Response;
use axum::routing::get;
use axum::{Json, Router};

use stockhub_purchasing::{NewInboundOrder, NewPurchaseOrder};

use super::{id, IdPath};
use crate::app::errors::{blocking, created, ok, ApiResult};
use crate::app::services::AppServices;

type Services = Extension<Arc<AppServices>>;

pub fn purchase_orders() -> Router {
    Router::new()
        .route("/", get(list_purchase_orders).post(create_purchase_order))
        .route("/:id", get(get_purchase_order))
}

pub fn inbound_orders() -> Router {
    Router::new()
        .route("/", get(list_inbound_orders).post(create_inbound_order))
        .route("/:id", get(get_inbound_order))
}

async fn list_purchase_orders(Extension(s): Services) -> ApiResult<Response> {
    blocking(move || s.purchase_orders.get_all()).await.map(ok)
}

async fn get_purchase_order(Extension(s): Services, path: IdPath) -> ApiResult<Response> {
    let id = id(path)?;
    blocking(move || s.purchase_orders.get_by_id(id)).await.map(ok)
}

async fn create_purchase_order(
    Extension(s): Services,
    body: Result<Json<NewPurchaseOrder>, JsonRejection>,
) -> ApiResult<Response> {
    let Json(input) = body?;
    blocking(move || s.purchase_orders.create(input)).await.map(created)
}

async fn list_inbound_orders(Extension(s): Services) -> ApiResult<Response> {
    blocking(move || s.inbound_orders.get_all()).await.map(ok)
}

async fn get_inbound_order(Extension(s): Services, path: IdPath) -> ApiResult<Response> {
    let id = id(path)?;
    blocking(move || s.inbound_orders.get_by_id(id)).await.map(ok)
}

async fn create_inbound_order(
    Extension(s): Services,
    body: Result<Json<NewInboundOrder>, JsonRejection>,
) -> ApiResult<Response> {
    let Json(input) = body?;
    blocking(move || s.inbound_orders.create(input)).await.map(created)
}
