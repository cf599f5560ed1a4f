use axum::extract::{Extension, Json, Path};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::{DynAPI, StopAPI};
use crate::entities::{Coordinates, Stop};
use crate::error::Error;

#[derive(Serialize, Deserialize)]
pub struct PositionParams {
    lat: f64,
    lng: f64,
}

pub async fn create(
    Extension(api): Extension<DynAPI>,
    Json(params): Json<PositionParams>,
) -> Result<Json<Stop>, Error> {
    let stop = api
        .add_stop(Coordinates {
            lat: params.lat,
            lng: params.lng,
        })
        .await?;

    Ok(stop.into())
}

pub async fn remove(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<Uuid>,
) -> Result<(), Error> {
    api.remove_stop(id).await
}

pub async fn update_position(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<Uuid>,
    Json(params): Json<PositionParams>,
) -> Result<(), Error> {
    api.move_stop(
        id,
        Coordinates {
            lat: params.lat,
            lng: params.lng,
        },
    )
    .await
}

pub async fn clear(Extension(api): Extension<DynAPI>) -> Result<(), Error> {
    api.clear_stops().await
}
