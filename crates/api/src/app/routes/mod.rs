use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query};
use axum::{routing::get, Router};
use serde::Deserialize;

use crate::app::errors::ApiResult;

pub mod inventory;
pub mod locations;
pub mod orders;
pub mod parties;
pub mod products;
pub mod system;

/// Router for every `/api/v1` resource.
pub fn router() -> Router {
    Router::new()
        .nest("/localities", locations::router())
        .nest("/warehouses", inventory::warehouses())
        .nest("/sections", inventory::sections())
        .nest("/productTypes", inventory::product_types())
        .nest("/employees", parties::employees())
        .nest("/buyers", parties::buyers())
        .nest("/sellers", parties::sellers())
        .nest("/carries", parties::carries())
        .nest("/products", products::products())
        .nest("/productRecords", products::records())
        .nest("/productBatches", products::batches())
        .nest("/purchaseOrders", orders::purchase_orders())
        .nest("/inboundOrders", orders::inbound_orders())
}

pub fn system_router() -> Router {
    Router::new().route("/health", get(system::health))
}

type IdPath = Result<Path<i64>, PathRejection>;

type ReportParams = Result<Query<ReportQuery>, QueryRejection>;

/// `?id=` filter shared by the report endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct ReportQuery {
    pub id: Option<i64>,
}

fn id(path: IdPath) -> ApiResult<i64> {
    let Path(id) = path?;
    Ok(id)
}

fn report_id(query: ReportParams) -> ApiResult<Option<i64>> {
    let Query(q) = query?;
    Ok(q.id)
}
