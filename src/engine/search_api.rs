use super::Planner;

use async_trait::async_trait;

use crate::api::SearchAPI;
use crate::error::{location_not_found_error, Error};
use crate::external::SearchHit;
use crate::map::{Viewport, SEARCH_ZOOM};

#[async_trait]
impl SearchAPI for Planner {
    #[tracing::instrument(skip(self))]
    async fn search(&self, query: String) -> Result<Option<SearchHit>, Error> {
        let query = query.trim().to_owned();
        if query.is_empty() {
            return Ok(None);
        }

        self.surface.clear_provisional();

        match self.geocoder.search(&query).await? {
            Some(hit) => {
                self.surface.set_viewport(Viewport::Center {
                    at: hit.at,
                    zoom: SEARCH_ZOOM,
                });
                // a provisional pin only; it becomes a stop on an explicit
                // confirmation event
                self.surface.show_provisional(hit.at, hit.label.clone());

                Ok(Some(hit))
            }
            None => Err(location_not_found_error()),
        }
    }
}

#[test]
fn empty_query_is_a_noop() {
    use crate::engine::testing::StaticGeocoder;
    use crate::external::RemoteOptimizer;
    use crate::map::StateSurface;
    use std::sync::Arc;
    use tokio_test::block_on;

    let surface = Arc::new(StateSurface::new());
    let planner = Planner::new(
        surface.clone(),
        Arc::new(StaticGeocoder::default()),
        Arc::new(RemoteOptimizer),
    );

    let viewport_before = surface.state().viewport;

    block_on(async {
        assert!(planner.search("   ".into()).await.unwrap().is_none());
    });

    assert_eq!(surface.state().viewport, viewport_before);
    assert!(surface.state().provisional.is_none());
}

#[test]
fn a_hit_recenters_and_pins_a_provisional_marker() {
    use crate::engine::testing::{coordinates, StaticGeocoder};
    use crate::external::RemoteOptimizer;
    use crate::map::StateSurface;
    use std::sync::Arc;
    use tokio_test::block_on;

    let surface = Arc::new(StateSurface::new());
    let planner = Planner::new(
        surface.clone(),
        Arc::new(StaticGeocoder {
            hit: Some(SearchHit {
                at: coordinates(18.92, 72.83),
                label: "Gateway of India".into(),
            }),
        }),
        Arc::new(RemoteOptimizer),
    );

    block_on(async {
        let hit = planner.search("gateway".into()).await.unwrap().unwrap();
        assert_eq!(hit.label, "Gateway of India");
    });

    let state = surface.state();
    assert_eq!(
        state.viewport,
        Some(Viewport::Center {
            at: coordinates(18.92, 72.83),
            zoom: SEARCH_ZOOM,
        })
    );
    assert_eq!(state.provisional.unwrap().label, "Gateway of India");

    // the route itself is untouched until the pin is confirmed
    block_on(async {
        use crate::api::StopAPI;
        assert!(planner.current_route().await.is_empty());
    });
}

#[test]
fn a_miss_is_reported_without_state_change() {
    use crate::engine::testing::StaticGeocoder;
    use crate::external::RemoteOptimizer;
    use crate::map::StateSurface;
    use std::sync::Arc;
    use tokio_test::block_on;

    let surface = Arc::new(StateSurface::new());
    let planner = Planner::new(
        surface.clone(),
        Arc::new(StaticGeocoder::default()),
        Arc::new(RemoteOptimizer),
    );

    block_on(async {
        use crate::api::StopAPI;

        assert_eq!(planner.search("nowhere".into()).await.unwrap_err().code, 102);
        assert!(planner.current_route().await.is_empty());
    });

    assert!(surface.state().provisional.is_none());
}
