use std::sync::Arc;

use async_channel::Sender;
use axum::extract::{Extension, Json};
use axum::http::StatusCode;

use crate::error::{unexpected_error, Error};
use crate::map::{MapEvent, RenderState, StateSurface};

pub async fn state(Extension(surface): Extension<Arc<StateSurface>>) -> Json<RenderState> {
    surface.state().into()
}

/// Interaction intake from the map surface: clicks, marker drag-ends and
/// provisional-pin confirmations. Accepted, then applied by the planner's
/// event loop.
pub async fn submit_event(
    Extension(events): Extension<Sender<MapEvent>>,
    Json(event): Json<MapEvent>,
) -> Result<StatusCode, Error> {
    events.send(event).await.map_err(|_| unexpected_error())?;

    Ok(StatusCode::ACCEPTED)
}
