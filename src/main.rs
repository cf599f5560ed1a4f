use std::sync::Arc;

use routesmart::api::DynAPI;
use routesmart::engine::Planner;
use routesmart::external::{Nominatim, RemoteOptimizer};
use routesmart::map::StateSurface;
use routesmart::server::serve;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    let surface = Arc::new(StateSurface::new());

    let planner = Arc::new(Planner::new(
        surface.clone(),
        Arc::new(Nominatim),
        Arc::new(RemoteOptimizer),
    ));

    let (events_tx, events_rx) = async_channel::unbounded();

    let dispatcher = planner.clone();
    tokio::spawn(async move { dispatcher.run(events_rx).await });

    let api: DynAPI = planner;
    serve(api, surface, events_tx).await;
}
