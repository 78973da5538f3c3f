use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::Extension;
use axum::response::Response;
use axum::routing::get;
use axum::{Json, Router};

use stockhub_parties::{
    BuyerPatch, EmployeePatch, NewBuyer, NewCarry, NewEmployee, NewSeller, SellerPatch,
};

use super::{id, report_id, IdPath, ReportParams};
use crate::app::errors::{blocking, created, no_content, ok, ApiResult};
use crate::app::services::AppServices;

type Services = Extension<Arc<AppServices>>;

pub fn employees() -> Router {
    Router::new()
        .route("/", get(list_employees).post(create_employee))
        .route("/reportInboundOrders", get(report_inbound_orders))
        .route(
            "/:id",
            get(get_employee).patch(update_employee).delete(delete_employee),
        )
}

pub fn buyers() -> Router {
    Router::new()
        .route("/", get(list_buyers).post(create_buyer))
        .route("/reportPurchaseOrders", get(report_purchase_orders))
        .route(
            "/:id",
            get(get_buyer).patch(update_buyer).delete(delete_buyer),
        )
}

pub fn sellers() -> Router {
    Router::new()
        .route("/", get(list_sellers).post(create_seller))
        .route(
            "/:id",
            get(get_seller).patch(update_seller).delete(delete_seller),
        )
}

pub fn carries() -> Router {
    Router::new()
        .route("/", get(list_carries).post(create_carry))
        .route("/:id", get(get_carry))
}

// Employees

async fn list_employees(Extension(s): Services) -> ApiResult<Response> {
    blocking(move || s.employees.get_all()).await.map(ok)
}

async fn get_employee(Extension(s): Services, path: IdPath) -> ApiResult<Response> {
    let id = id(path)?;
    blocking(move || s.employees.get_by_id(id)).await.map(ok)
}

async fn create_employee(
    Extension(s): Services,
    body: Result<Json<NewEmployee>, JsonRejection>,
) -> ApiResult<Response> {
    let Json(input) = body?;
    blocking(move || s.employees.create(input)).await.map(created)
}

async fn update_employee(
    Extension(s): Services,
    path: IdPath,
    body: Result<Json<EmployeePatch>, JsonRejection>,
) -> ApiResult<Response> {
    let id = id(path)?;
    let Json(patch) = body?;
    blocking(move || s.employees.update(id, patch)).await.map(ok)
}

async fn delete_employee(Extension(s): Services, path: IdPath) -> ApiResult<Response> {
    let id = id(path)?;
    blocking(move || s.employees.delete(id)).await?;
    Ok(no_content())
}

async fn report_inbound_orders(Extension(s): Services, query: ReportParams) -> ApiResult<Response> {
    let id = report_id(query)?;
    blocking(move || s.employees.report_inbound_orders(id)).await.map(ok)
}

// Buyers

async fn list_buyers(Extension(s): Services) -> ApiResult<Response> {
    blocking(move || s.buyers.get_all()).await.map(ok)
}

async fn get_buyer(Extension(s): Services, path: IdPath) -> ApiResult<Response> {
    let id = id(path)?;
    blocking(move || s.buyers.get_by_id(id)).await.map(ok)
}

async fn create_buyer(
    Extension(s): Services,
    body: Result<Json<NewBuyer>, JsonRejection>,
) -> ApiResult<Response> {
    let Json(input) = body?;
    blocking(move || s.buyers.create(input)).await.map(created)
}

async fn update_buyer(
    Extension(s): Services,
    path: IdPath,
    body: Result<Json<BuyerPatch>, JsonRejection>,
) -> ApiResult<Response> {
    let id = id(path)?;
    let Json(patch) = body?;
    blocking(move || s.buyers.update(id, patch)).await.map(ok)
}

async fn delete_buyer(Extension(s): Services, path: IdPath) -> ApiResult<Response> {
    let id = id(path)?;
    blocking(move || s.buyers.delete(id)).await?;
    Ok(no_content())
}

async fn report_purchase_orders(Extension(s): Services, query: ReportParams) -> ApiResult<Response> {
    let id = report_id(query)?;
    blocking(move || s.buyers.report_purchase_orders(id)).await.map(ok)
}

// Sellers

async fn list_sellers(Extension(s): Services) -> ApiResult<Response> {
    blocking(move || s.sellers.get_all()).await.map(ok)
}

async fn get_seller(Extension(s): Services, path: IdPath) -> ApiResult<Response> {
    let id = id(path)?;
    blocking(move || s.sellers.get_by_id(id)).await.map(ok)
}

async fn create_seller(
    Extension(s): Services,
    body: Result<Json<NewSeller>, JsonRejection>,
) -> ApiResult<Response> {
    let Json(input) = body?;
    blocking(move || s.sellers.create(input)).await.map(created)
}

async fn update_seller(
    Extension(s): Services,
    path: IdPath,
    body: Result<Json<SellerPatch>, JsonRejection>,
) -> ApiResult<Response> {
    let id = id(path)?;
    let Json(patch) = body?;
    blocking(move || s.sellers.update(id, patch)).await.map(ok)
}

async fn delete_seller(Extension(s): Services, path: IdPath) -> ApiResult<Response> {
    let id = id(path)?;
    blocking(move || s.sellers.delete(id)).await?;
    Ok(no_content())
}

// Carries

async fn list_carries(Extension(s): Services) -> ApiResult<Response> {
    blocking(move || s.carries.get_all()).await.map(ok)
}

async fn get_carry(Extension(s): Services, path: IdPath) -> ApiResult<Response> {
    let id = id(path)?;
    blocking(move || s.carries.get_by_id(id)).await.map(ok)
}

async fn create_carry(
    Extension(s): Services,
    body: Result<Json<NewCarry>, JsonRejection>,
) -> ApiResult<Response> {
    let Json(input) = body?;
    blocking(move || s.carries.create(input)).await.map(created)
}
