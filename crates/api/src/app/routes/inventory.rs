use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::Extension;
use axum::response::Response;
use axum::routing::get;
use axum::{Json, Router};

use stockhub_inventory::{NewSection, NewWarehouse, SectionPatch, WarehousePatch};

use super::{id, report_id, IdPath, ReportParams};
use crate::app::errors::{blocking, created, no_content, ok, ApiResult};
use crate::app::services::AppServices;

type Services = Extension<Arc<AppServices>>;

pub fn warehouses() -> Router {
    Router::new()
        .route("/", get(list_warehouses).post(create_warehouse))
        .route(
            "/:id",
            get(get_warehouse)
                .patch(update_warehouse)
                .delete(delete_warehouse),
        )
}

pub fn sections() -> Router {
    Router::new()
        .route("/", get(list_sections).post(create_section))
        .route("/reportProducts", get(report_products))
        .route(
            "/:id",
            get(get_section).patch(update_section).delete(delete_section),
        )
}

pub fn product_types() -> Router {
    Router::new()
        .route("/", get(list_product_types))
        .route("/:id", get(get_product_type))
}

async fn list_warehouses(Extension(s): Services) -> ApiResult<Response> {
    blocking(move || s.warehouses.get_all()).await.map(ok)
}

async fn get_warehouse(Extension(s): Services, path: IdPath) -> ApiResult<Response> {
    let id = id(path)?;
    blocking(move || s.warehouses.get_by_id(id)).await.map(ok)
}

async fn create_warehouse(
    Extension(s): Services,
    body: Result<Json<NewWarehouse>, JsonRejection>,
) -> ApiResult<Response> {
    let Json(input) = body?;
    blocking(move || s.warehouses.create(input)).await.map(created)
}

async fn update_warehouse(
    Extension(s): Services,
    path: IdPath,
    body: Result<Json<WarehousePatch>, JsonRejection>,
) -> ApiResult<Response> {
    let id = id(path)?;
    let Json(patch) = body?;
    blocking(move || s.warehouses.update(id, patch)).await.map(ok)
}

async fn delete_warehouse(Extension(s): Services, path: IdPath) -> ApiResult<Response> {
    let id = id(path)?;
    blocking(move || s.warehouses.delete(id)).await?;
    Ok(no_content())
}

async fn list_sections(Extension(s): Services) -> ApiResult<Response> {
    blocking(move || s.sections.get_all()).await.map(ok)
}

async fn get_section(Extension(s): Services, path: IdPath) -> ApiResult<Response> {
    let id = id(path)?;
    blocking(move || s.sections.get_by_id(id)).await.map(ok)
}

async fn create_section(
    Extension(s): Services,
    body: Result<Json<NewSection>, JsonRejection>,
) -> ApiResult<Response> {
    let Json(input) = body?;
    blocking(move || s.sections.create(input)).await.map(created)
}

async fn update_section(
    Extension(s): Services,
    path: IdPath,
    body: Result<Json<SectionPatch>, JsonRejection>,
) -> ApiResult<Response> {
    let id = id(path)?;
    let Json(patch) = body?;
    blocking(move || s.sections.update(id, patch)).await.map(ok)
}

async fn delete_section(Extension(s): Services, path: IdPath) -> ApiResult<Response> {
    let id = id(path)?;
    blocking(move || s.sections.delete(id)).await?;
    Ok(no_content())
}

async fn report_products(Extension(s): Services, query: ReportParams) -> ApiResult<Response> {
    let id = report_id(query)?;
    blocking(move || s.sections.report_products(id)).await.map(ok)
}

async fn list_product_types(Extension(s): Services) -> ApiResult<Response> {
    blocking(move || s.product_types.get_all()).await.map(ok)
}

async fn get_product_type(Extension(s): Services, path: IdPath) -> ApiResult<Response> {
    let id = id(path)?;
    blocking(move || s.product_types.get_by_id(id)).await.map(ok)
}
