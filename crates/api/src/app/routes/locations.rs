use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::Extension;
use axum::response::Response;
use axum::routing::get;
use axum::{Json, Router};

use stockhub_locations::NewLocality;

use super::{id, report_id, IdPath, ReportParams};
use crate::app::errors::{blocking, created, ok, ApiResult};
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list).post(create))
        .route("/reportSellers", get(report_sellers))
        .route("/reportCarries", get(report_carries))
        .route("/:id", get(fetch))
}

async fn list(Extension(s): Extension<Arc<AppServices>>) -> ApiResult<Response> {
    blocking(move || s.localities.get_all()).await.map(ok)
}

async fn fetch(Extension(s): Extension<Arc<AppServices>>, path: IdPath) -> ApiResult<Response> {
    let id = id(path)?;
    blocking(move || s.localities.get_by_id(id)).await.map(ok)
}

async fn create(
    Extension(s): Extension<Arc<AppServices>>,
    body: Result<Json<NewLocality>, JsonRejection>,
) -> ApiResult<Response> {
    let Json(input) = body?;
    blocking(move || s.localities.save(input)).await.map(created)
}

async fn report_sellers(
    Extension(s): Extension<Arc<AppServices>>,
    query: ReportParams,
) -> ApiResult<Response> {
    let id = report_id(query)?;
    blocking(move || s.localities.report_sellers(id)).await.map(ok)
}

async fn report_carries(
    Extension(s): Extension<Arc<AppServices>>,
    query: ReportParams,
) -> ApiResult<Response> {
    let id = report_id(query)?;
    blocking(move || s.localities.report_carries(id)).await.map(ok)
}
