use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::Extension;
use axum::response::Response;
use axum::routing::get;
use axum::{Json, Router};

use stockhub_products::{NewProduct, NewProductBatch, NewProductRecord, ProductPatch};

use super::{id, report_id, IdPath, ReportParams};
use crate::app::errors::{blocking, created, no_content, ok, ApiResult};
use crate::app::services::AppServices;

type Services = Extension<Arc<AppServices>>;

pub fn products() -> Router {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/reportRecords", get(report_records))
        .route(
            "/:id",
            get(get_product).patch(update_product).delete(delete_product),
        )
}

pub fn records() -> Router {
    Router::new()
        .route("/", get(list_records).post(create_record))
        .route("/:id", get(get_record))
}

pub fn batches() -> Router {
    Router::new()
        .route("/", get(list_batches).post(create_batch))
        .route("/:id", get(get_batch))
}

async fn list_products(Extension(s): Services) -> ApiResult<Response> {
    blocking(move || s.products.get_all()).await.map(ok)
}

async fn get_product(Extension(s): Services, path: IdPath) -> ApiResult<Response> {
    let id = id(path)?;
    blocking(move || s.products.get_by_id(id)).await.map(ok)
}

async fn create_product(
    Extension(s): Services,
    body: Result<Json<NewProduct>, JsonRejection>,
) -> ApiResult<Response> {
    let Json(input) = body?;
    blocking(move || s.products.create(input)).await.map(created)
}

async fn update_product(
    Extension(s): Services,
    path: IdPath,
    body: Result<Json<ProductPatch>, JsonRejection>,
) -> ApiResult<Response> {
    let id = id(path)?;
    let Json(patch) = body?;
    blocking(move || s.products.update(id, patch)).await.map(ok)
}

async fn delete_product(Extension(s): Services, path: IdPath) -> ApiResult<Response> {
    let id = id(path)?;
    blocking(move || s.products.delete(id)).await?;
    Ok(no_content())
}

async fn report_records(Extension(s): Services, query: ReportParams) -> ApiResult<Response> {
    let id = report_id(query)?;
    blocking(move || s.products.report_records(id)).await.map(ok)
}

async fn list_records(Extension(s): Services) -> ApiResult<Response> {
    blocking(move || s.product_records.get_all()).await.map(ok)
}

async fn get_record(Extension(s): Services, path: IdPath) -> ApiResult<Response> {
    let id = id(path)?;
    blocking(move || s.product_records.get_by_id(id)).await.map(ok)
}

async fn create_record(
    Extension(s): Services,
    body: Result<Json<NewProductRecord>, JsonRejection>,
) -> ApiResult<Response> {
    let Json(input) = body?;
    blocking(move || s.product_records.create(input)).await.map(created)
}

async fn list_batches(Extension(s): Services) -> ApiResult<Response> {
    blocking(move || s.product_batches.get_all()).await.map(ok)
}

async fn get_batch(Extension(s): Services, path: IdPath) -> ApiResult<Response> {
    let id = id(path)?;
    blocking(move || s.product_batches.get_by_id(id)).await.map(ok)
}

async fn create_batch(
    Extension(s): Services,
    body: Result<Json<NewProductBatch>, JsonRejection>,
) -> ApiResult<Response> {
    let Json(input) = body?;
    blocking(move || s.product_batches.create(input)).await.map(created)
}
