use super::Planner;

use async_trait::async_trait;
use uuid::Uuid;

use crate::api::StopAPI;
use crate::entities::{Coordinates, Route, Stop};
use crate::error::{invalid_input_error, Error};
use crate::map::{Viewport, DEFAULT_CENTER, DEFAULT_ZOOM};

#[async_trait]
impl StopAPI for Planner {
    #[tracing::instrument(skip(self))]
    async fn add_stop(&self, at: Coordinates) -> Result<Stop, Error> {
        let stop = self.store.lock().await.add(at);

        self.resolve_label(stop.id, at);
        self.refresh().await;

        Ok(stop)
    }

    #[tracing::instrument(skip(self))]
    async fn remove_stop(&self, id: Uuid) -> Result<(), Error> {
        // unknown ids are a silent no-op per the store contract
        self.store.lock().await.remove(id);
        self.refresh().await;

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn move_stop(&self, id: Uuid, to: Coordinates) -> Result<(), Error> {
        {
            let mut store = self.store.lock().await;

            if !self.markers.apply_drag(&mut store, id, to) {
                return Err(invalid_input_error());
            }
        }

        self.resolve_label(id, to);
        self.refresh().await;

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn clear_stops(&self) -> Result<(), Error> {
        self.store.lock().await.clear();
        self.refresh().await;

        self.surface.clear_provisional();
        self.surface.set_viewport(Viewport::Center {
            at: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
        });

        Ok(())
    }

    async fn current_route(&self) -> Route {
        self.store.lock().await.snapshot()
    }
}

#[test]
fn label_resolution_lands_by_id_after_a_drag() {
    use crate::engine::testing::{coordinates, planner, ScriptedOptimizer};
    use std::sync::Arc;
    use tokio_test::block_on;

    let (_surface, planner) = planner(Arc::new(ScriptedOptimizer::default()));

    block_on(async {
        let first = planner.add_stop(coordinates(19.07, 72.87)).await.unwrap();
        let second = planner.add_stop(coordinates(19.08, 72.88)).await.unwrap();

        planner
            .move_stop(first.id, coordinates(19.09, 72.89))
            .await
            .unwrap();

        // let the spawned resolutions land
        for _ in 0..4 {
            tokio::task::yield_now().await;
        }

        let route = planner.current_route().await;
        let moved = route.stops.iter().find(|stop| stop.id == first.id).unwrap();
        let kept = route
            .stops
            .iter()
            .find(|stop| stop.id == second.id)
            .unwrap();

        assert_eq!(moved.label.as_deref(), Some("near 19.09,72.89"));
        assert_eq!(kept.label.as_deref(), Some("near 19.08,72.88"));
    });
}

#[test]
fn late_label_for_a_removed_stop_does_not_resurrect_it() {
    use crate::engine::testing::{coordinates, planner, ScriptedOptimizer};
    use std::sync::Arc;
    use tokio_test::block_on;

    let (_surface, planner) = planner(Arc::new(ScriptedOptimizer::default()));

    block_on(async {
        let stop = planner.add_stop(coordinates(19.07, 72.87)).await.unwrap();
        planner.remove_stop(stop.id).await.unwrap();

        for _ in 0..4 {
            tokio::task::yield_now().await;
        }

        assert!(planner.current_route().await.is_empty());
    });
}

#[test]
fn removing_down_to_one_stop_clears_the_rendering() {
    use crate::engine::testing::{coordinates, planner, ScriptedOptimizer};
    use std::sync::Arc;
    use tokio_test::block_on;

    let (surface, planner) = planner(Arc::new(ScriptedOptimizer::default()));

    block_on(async {
        planner.add_stop(coordinates(19.07, 72.87)).await.unwrap();
        let second = planner.add_stop(coordinates(19.08, 72.88)).await.unwrap();

        assert!(surface.state().path.is_some());

        planner.remove_stop(second.id).await.unwrap();

        let state = surface.state();
        assert!(state.path.is_none());
        assert!(state.hud.is_none());
        assert_eq!(state.markers.len(), 1);
    });
}

#[test]
fn clear_removes_markers_path_and_hud() {
    use crate::engine::testing::{coordinates, planner, ScriptedOptimizer};
    use crate::map::{Viewport, DEFAULT_CENTER, DEFAULT_ZOOM};
    use std::sync::Arc;
    use tokio_test::block_on;

    let (surface, planner) = planner(Arc::new(ScriptedOptimizer::default()));

    block_on(async {
        planner.add_stop(coordinates(19.07, 72.87)).await.unwrap();
        planner.add_stop(coordinates(19.08, 72.88)).await.unwrap();

        planner.clear_stops().await.unwrap();

        let state = surface.state();
        assert!(planner.current_route().await.is_empty());
        assert!(state.markers.is_empty());
        assert!(state.path.is_none());
        assert!(state.hud.is_none());
        assert_eq!(
            state.viewport,
            Some(Viewport::Center {
                at: DEFAULT_CENTER,
                zoom: DEFAULT_ZOOM,
            })
        );
    });
}
