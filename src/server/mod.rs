mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use async_channel::Sender;
use axum::{
    extract::Extension,
    routing::{delete, get, post, put},
    Router,
};

use crate::api::DynAPI;
use crate::map::{MapEvent, StateSurface};
use crate::server::handlers::{map, route, search, stops};

pub async fn serve(api: DynAPI, surface: Arc<StateSurface>, events: Sender<MapEvent>) {
    tracing_subscriber::fmt::init();

    let app = Router::new()
        .route("/route", get(route::current))
        .route("/stops", post(stops::create))
        .route("/stops/:id", delete(stops::remove))
        .route("/stops/:id/position", put(stops::update_position))
        .route("/clear", post(stops::clear))
        .route("/optimize", post(route::optimize))
        .route("/search", post(search::search))
        .route("/export", get(route::export))
        .route("/map/state", get(map::state))
        .route("/map/events", post(map::submit_event))
        .layer(Extension(api))
        .layer(Extension(surface))
        .layer(Extension(events));

    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));

    tracing::info!("listening on {}", addr);

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await
        .unwrap();
}
