mod export_api;
mod optimize_api;
mod search_api;
mod stop_api;

use async_channel::Receiver;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::api::{StopAPI, API};
use crate::entities::Coordinates;
use crate::error::Error;
use crate::external::{Geocoder, Optimizer};
use crate::map::{MapEvent, MapSurface, Viewport, DEFAULT_CENTER, DEFAULT_ZOOM};
use crate::store::StopStore;
use crate::view::{MarkerSync, RouteRenderer};

/// Owns the stop store and drives the view components from it. All
/// mutations go through the store's atomic operations under one lock.
pub struct Planner {
    store: Arc<Mutex<StopStore>>,
    markers: MarkerSync,
    renderer: RouteRenderer,
    surface: Arc<dyn MapSurface>,
    geocoder: Arc<dyn Geocoder>,
    optimizer: Arc<dyn Optimizer>,
    // the optimize trigger is rejected while a request is outstanding
    optimizing: AtomicBool,
}

impl Planner {
    pub fn new(
        surface: Arc<dyn MapSurface>,
        geocoder: Arc<dyn Geocoder>,
        optimizer: Arc<dyn Optimizer>,
    ) -> Self {
        surface.set_viewport(Viewport::Center {
            at: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
        });

        Self {
            store: Arc::new(Mutex::new(StopStore::new())),
            markers: MarkerSync::new(surface.clone()),
            renderer: RouteRenderer::new(surface.clone()),
            surface,
            geocoder,
            optimizer,
            optimizing: AtomicBool::new(false),
        }
    }

    /// Rebuilds markers and the drawn path from the store's current order.
    pub(crate) async fn refresh(&self) {
        let route = self.store.lock().await.snapshot();

        self.markers.resync(&route);
        self.renderer.render(&route);
    }

    /// Fire-and-forget label resolution. The response applies by stop id,
    /// so a lookup that outlives its stop is dropped and a lookup for a
    /// moved stop still lands on the right one. Overlapping lookups are
    /// not coalesced; the last response to arrive wins.
    pub(crate) fn resolve_label(&self, id: Uuid, at: Coordinates) {
        let store = self.store.clone();
        let geocoder = self.geocoder.clone();

        tokio::spawn(async move {
            let label = geocoder.label(at).await;

            if !store.lock().await.set_label(id, label) {
                tracing::info!("label resolved for a stop that no longer exists");
            }
        });
    }

    /// Consumes interaction events reported by the map surface.
    #[tracing::instrument(skip(self, events))]
    pub async fn run(&self, events: Receiver<MapEvent>) {
        while let Ok(event) = events.recv().await {
            if let Err(err) = self.dispatch(event).await {
                tracing::warn!("map event rejected: {}", err.message);
            }
        }
    }

    async fn dispatch(&self, event: MapEvent) -> Result<(), Error> {
        match event {
            MapEvent::Click { at } => {
                self.surface.clear_provisional();
                self.add_stop(at).await?;
            }
            MapEvent::MarkerDragged { stop_id, to } => {
                self.move_stop(stop_id, to).await?;
            }
            MapEvent::ProvisionalConfirmed { at } => {
                self.surface.clear_provisional();
                self.add_stop(at).await?;
            }
        }

        Ok(())
    }
}

impl API for Planner {}

#[test]
fn map_events_drive_the_planner() {
    use crate::api::StopAPI;
    use crate::engine::testing::{coordinates, planner, ScriptedOptimizer};
    use std::sync::Arc;
    use tokio_test::block_on;

    let (_surface, planner) = planner(Arc::new(ScriptedOptimizer::default()));
    let planner = Arc::new(planner);

    block_on(async {
        let (tx, rx) = async_channel::unbounded();

        let loop_planner = planner.clone();
        let handle = tokio::spawn(async move { loop_planner.run(rx).await });

        tx.send(MapEvent::Click {
            at: coordinates(19.07, 72.87),
        })
        .await
        .unwrap();
        tx.send(MapEvent::ProvisionalConfirmed {
            at: coordinates(19.08, 72.88),
        })
        .await
        .unwrap();

        drop(tx);
        handle.await.unwrap();

        let route = planner.current_route().await;
        assert_eq!(route.len(), 2);

        // a drag-end reported for the first stop moves exactly that stop
        let dragged = route.stops[0].id;
        let (tx, rx) = async_channel::unbounded();

        let loop_planner = planner.clone();
        let handle = tokio::spawn(async move { loop_planner.run(rx).await });

        tx.send(MapEvent::MarkerDragged {
            stop_id: dragged,
            to: coordinates(19.09, 72.89),
        })
        .await
        .unwrap();

        drop(tx);
        handle.await.unwrap();

        let route = planner.current_route().await;
        let moved = route.stops.iter().find(|stop| stop.id == dragged).unwrap();
        assert_eq!(moved.coordinates, coordinates(19.09, 72.89));
    });
}

#[cfg(test)]
pub(crate) mod testing {
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::Planner;
    use crate::entities::Coordinates;
    use crate::error::{optimization_unavailable_error, Error};
    use crate::external::{Geocoder, OptimizedTour, Optimizer, SearchHit};
    use crate::map::StateSurface;

    #[derive(Default)]
    pub struct StaticGeocoder {
        pub hit: Option<SearchHit>,
    }

    #[async_trait]
    impl Geocoder for StaticGeocoder {
        async fn label(&self, at: Coordinates) -> String {
            format!("near {:.2},{:.2}", at.lat, at.lng)
        }

        async fn search(&self, _query: &str) -> Result<Option<SearchHit>, Error> {
            Ok(self.hit.clone())
        }
    }

    #[derive(Default)]
    pub struct ScriptedOptimizer {
        pub tour: Option<OptimizedTour>,
        pub calls: AtomicUsize,
    }

    #[async_trait]
    impl Optimizer for ScriptedOptimizer {
        async fn optimize(&self, _stops: &[Coordinates]) -> Result<OptimizedTour, Error> {
            self.calls.fetch_add(1, Ordering::SeqCst);

            self.tour
                .clone()
                .ok_or_else(|| optimization_unavailable_error())
        }
    }

    pub fn coordinates(lat: f64, lng: f64) -> Coordinates {
        Coordinates { lat, lng }
    }

    pub fn planner(optimizer: Arc<ScriptedOptimizer>) -> (Arc<StateSurface>, Planner) {
        let surface = Arc::new(StateSurface::new());
        let planner = Planner::new(
            surface.clone(),
            Arc::new(StaticGeocoder::default()),
            optimizer,
        );

        (surface, planner)
    }
}
