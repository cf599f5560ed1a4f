use std::sync::Arc;
use uuid::Uuid;

use crate::entities::{Coordinates, Route};
use crate::map::{MapSurface, MarkerSpec};
use crate::store::StopStore;

/// Keeps the surface's markers in 1:1 correspondence with the stops.
/// Every change tears down and rebuilds the full set; O(n) per mutation
/// is deliberate at interactive stop counts.
pub struct MarkerSync {
    surface: Arc<dyn MapSurface>,
}

impl MarkerSync {
    pub fn new(surface: Arc<dyn MapSurface>) -> Self {
        Self { surface }
    }

    /// Idempotent: one marker per stop, numbered by 1-based position.
    pub fn resync(&self, route: &Route) {
        self.surface.clear_markers();

        for (index, stop) in route.stops.iter().enumerate() {
            self.surface.place_marker(MarkerSpec {
                stop_id: stop.id,
                number: index + 1,
                at: stop.coordinates,
            });
        }
    }

    /// Drag-end intent for a marker: forward the new position to the
    /// store. Returns false when the stop no longer exists, in which
    /// case the caller has nothing to re-render or re-resolve.
    pub fn apply_drag(&self, store: &mut StopStore, stop_id: Uuid, to: Coordinates) -> bool {
        store.set_position(stop_id, to)
    }
}

#[test]
fn resync_is_idempotent_and_numbers_by_position() {
    use crate::entities::Stop;
    use crate::map::StateSurface;

    let surface = Arc::new(StateSurface::new());
    let sync = MarkerSync::new(surface.clone());

    let route = Route {
        stops: vec![
            Stop::new(Coordinates {
                lat: 19.07,
                lng: 72.87,
            }),
            Stop::new(Coordinates {
                lat: 19.08,
                lng: 72.88,
            }),
        ],
    };

    sync.resync(&route);
    sync.resync(&route);

    let markers = surface.state().markers;
    assert_eq!(markers.len(), 2);
    assert_eq!(markers[0].number, 1);
    assert_eq!(markers[0].stop_id, route.stops[0].id);
    assert_eq!(markers[1].number, 2);
    assert_eq!(markers[1].stop_id, route.stops[1].id);
}

#[test]
fn apply_drag_moves_the_right_stop() {
    use crate::map::StateSurface;

    let surface = Arc::new(StateSurface::new());
    let sync = MarkerSync::new(surface);

    let mut store = StopStore::new();
    let stop = store.add(Coordinates {
        lat: 19.07,
        lng: 72.87,
    });

    let to = Coordinates {
        lat: 19.09,
        lng: 72.89,
    };

    assert!(sync.apply_drag(&mut store, stop.id, to));
    assert_eq!(store.find(stop.id).unwrap().coordinates, to);

    assert!(!sync.apply_drag(&mut store, Uuid::new_v4(), to));
}
