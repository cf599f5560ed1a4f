use axum::extract::{Extension, Json};

use crate::api::{DynAPI, ExportAPI, OptimizeAPI, StopAPI};
use crate::entities::{Route, RouteMetrics};
use crate::error::Error;

pub async fn current(Extension(api): Extension<DynAPI>) -> Json<Route> {
    api.current_route().await.into()
}

pub async fn optimize(Extension(api): Extension<DynAPI>) -> Result<Json<RouteMetrics>, Error> {
    let metrics = api.optimize().await?;

    Ok(metrics.into())
}

pub async fn export(Extension(api): Extension<DynAPI>) -> Result<String, Error> {
    api.export_gpx().await
}
