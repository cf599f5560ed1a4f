use super::Planner;

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use uuid::Uuid;

use crate::api::OptimizeAPI;
use crate::entities::{Coordinates, RouteMetrics, Stop};
use crate::error::{
    insufficient_stops_error, optimize_in_flight_error, reconciliation_mismatch_error, Error,
};

/// Maps the optimizer's identity-agnostic coordinate list back onto stop
/// ids. Matching is exact floating-point equality on the values as
/// received, and each stop is claimed at most once so coincident stops
/// cannot collapse onto one id. Any unmatched coordinate fails the whole
/// permutation; a best-effort guess is never applied.
fn reconcile(stops: &[Stop], tour: &[Coordinates]) -> Result<Vec<Uuid>, Error> {
    if tour.len() != stops.len() {
        return Err(reconciliation_mismatch_error());
    }

    let mut unclaimed: Vec<&Stop> = stops.iter().collect();
    let mut order = Vec::with_capacity(tour.len());

    for at in tour {
        let found = unclaimed
            .iter()
            .position(|stop| stop.coordinates.lat == at.lat && stop.coordinates.lng == at.lng);

        match found {
            Some(index) => order.push(unclaimed.swap_remove(index).id),
            None => return Err(reconciliation_mismatch_error()),
        }
    }

    Ok(order)
}

struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

#[async_trait]
impl OptimizeAPI for Planner {
    #[tracing::instrument(skip(self))]
    async fn optimize(&self) -> Result<RouteMetrics, Error> {
        if self.optimizing.swap(true, Ordering::SeqCst) {
            return Err(optimize_in_flight_error());
        }
        let _in_flight = InFlight(&self.optimizing);

        let snapshot = self.store.lock().await.snapshot();
        if snapshot.len() < 2 {
            return Err(insufficient_stops_error());
        }

        // identity and labels are stripped; the service sees coordinates only
        let coordinates: Vec<Coordinates> = snapshot
            .stops
            .iter()
            .map(|stop| stop.coordinates)
            .collect();

        let tour = self.optimizer.optimize(&coordinates).await?;

        {
            // reconcile against the store as it is now; stops edited while
            // the request was in flight make the response stale and the
            // whole operation fails closed
            let mut store = self.store.lock().await;
            let order = reconcile(&store.snapshot().stops, &tour.optimized_route)?;
            store.replace_order(&order)?;
        }

        self.refresh().await;

        Ok(RouteMetrics::from_degrees(tour.total_distance))
    }
}

#[test]
fn reconcile_follows_the_tour_order() {
    let stops: Vec<Stop> = [(19.07, 72.87), (19.08, 72.88), (19.06, 72.86)]
        .iter()
        .map(|&(lat, lng)| Stop::new(Coordinates { lat, lng }))
        .collect();

    let tour = vec![
        Coordinates {
            lat: 19.06,
            lng: 72.86,
        },
        Coordinates {
            lat: 19.07,
            lng: 72.87,
        },
        Coordinates {
            lat: 19.08,
            lng: 72.88,
        },
    ];

    let order = reconcile(&stops, &tour).unwrap();

    assert_eq!(order, vec![stops[2].id, stops[0].id, stops[1].id]);
}

#[test]
fn reconcile_keeps_coincident_stops_distinct() {
    let at = Coordinates {
        lat: 19.07,
        lng: 72.87,
    };

    let stops = vec![Stop::new(at), Stop::new(at)];
    let tour = vec![at, at];

    let order = reconcile(&stops, &tour).unwrap();

    assert_eq!(order.len(), 2);
    assert_ne!(order[0], order[1]);
}

#[test]
fn reconcile_rejects_unknown_coordinates() {
    let stops = vec![
        Stop::new(Coordinates {
            lat: 19.07,
            lng: 72.87,
        }),
        Stop::new(Coordinates {
            lat: 19.08,
            lng: 72.88,
        }),
    ];

    // rounding drift on the second pair
    let tour = vec![
        Coordinates {
            lat: 19.07,
            lng: 72.87,
        },
        Coordinates {
            lat: 19.080001,
            lng: 72.88,
        },
    ];

    assert_eq!(reconcile(&stops, &tour).unwrap_err().code, 101);
}

#[test]
fn optimize_reorders_by_identity_and_reports_metrics() {
    use crate::api::{OptimizeAPI, StopAPI};
    use crate::engine::testing::{coordinates, planner, ScriptedOptimizer};
    use crate::external::OptimizedTour;
    use std::sync::atomic::Ordering;
    use std::sync::Arc;
    use tokio_test::block_on;

    let optimizer = Arc::new(ScriptedOptimizer {
        tour: Some(OptimizedTour {
            optimized_route: vec![
                coordinates(19.06, 72.86),
                coordinates(19.07, 72.87),
                coordinates(19.08, 72.88),
            ],
            total_distance: 0.05,
        }),
        ..ScriptedOptimizer::default()
    });

    let (surface, planner) = planner(optimizer.clone());

    block_on(async {
        let a = planner.add_stop(coordinates(19.07, 72.87)).await.unwrap();
        let b = planner.add_stop(coordinates(19.08, 72.88)).await.unwrap();
        let c = planner.add_stop(coordinates(19.06, 72.86)).await.unwrap();

        let metrics = planner.optimize().await.unwrap();

        let ids: Vec<_> = planner
            .current_route()
            .await
            .stops
            .iter()
            .map(|stop| stop.id)
            .collect();

        assert_eq!(ids, vec![c.id, a.id, b.id]);
        assert_eq!(optimizer.calls.load(Ordering::SeqCst), 1);
        assert!((metrics.distance_km - 5.566).abs() < 1e-9);

        // markers renumbered against the adopted order
        let markers = surface.state().markers;
        assert_eq!(markers[0].stop_id, c.id);
        assert_eq!(markers[0].number, 1);
    });
}

#[test]
fn optimize_with_too_few_stops_never_calls_the_service() {
    use crate::api::{OptimizeAPI, StopAPI};
    use crate::engine::testing::{coordinates, planner, ScriptedOptimizer};
    use std::sync::atomic::Ordering;
    use std::sync::Arc;
    use tokio_test::block_on;

    let optimizer = Arc::new(ScriptedOptimizer::default());
    let (_surface, planner) = planner(optimizer.clone());

    block_on(async {
        assert_eq!(planner.optimize().await.unwrap_err().code, 100);

        planner.add_stop(coordinates(19.07, 72.87)).await.unwrap();
        assert_eq!(planner.optimize().await.unwrap_err().code, 100);

        assert_eq!(optimizer.calls.load(Ordering::SeqCst), 0);
    });
}

#[test]
fn mismatched_response_leaves_the_order_untouched() {
    use crate::api::{OptimizeAPI, StopAPI};
    use crate::engine::testing::{coordinates, planner, ScriptedOptimizer};
    use crate::external::OptimizedTour;
    use std::sync::Arc;
    use tokio_test::block_on;

    let optimizer = Arc::new(ScriptedOptimizer {
        tour: Some(OptimizedTour {
            optimized_route: vec![coordinates(19.08, 72.88), coordinates(1.0, 1.0)],
            total_distance: 0.05,
        }),
        ..ScriptedOptimizer::default()
    });

    let (_surface, planner) = planner(optimizer);

    block_on(async {
        let a = planner.add_stop(coordinates(19.07, 72.87)).await.unwrap();
        let b = planner.add_stop(coordinates(19.08, 72.88)).await.unwrap();

        assert_eq!(planner.optimize().await.unwrap_err().code, 101);

        let ids: Vec<_> = planner
            .current_route()
            .await
            .stops
            .iter()
            .map(|stop| stop.id)
            .collect();
        assert_eq!(ids, vec![a.id, b.id]);
    });
}

#[test]
fn unavailable_service_is_reported_and_state_kept() {
    use crate::api::{OptimizeAPI, StopAPI};
    use crate::engine::testing::{coordinates, planner, ScriptedOptimizer};
    use std::sync::Arc;
    use tokio_test::block_on;

    // no scripted tour: every call fails as unavailable
    let optimizer = Arc::new(ScriptedOptimizer::default());
    let (surface, planner) = planner(optimizer);

    block_on(async {
        let a = planner.add_stop(coordinates(19.07, 72.87)).await.unwrap();
        planner.add_stop(coordinates(19.08, 72.88)).await.unwrap();

        assert_eq!(planner.optimize().await.unwrap_err().code, 104);

        let route = planner.current_route().await;
        assert_eq!(route.stops[0].id, a.id);

        // previous rendering is still in place and interactable
        assert_eq!(surface.state().markers.len(), 2);
        assert!(surface.state().path.is_some());
    });
}

#[test]
fn a_second_optimize_while_one_is_outstanding_is_rejected() {
    use crate::api::{OptimizeAPI, StopAPI};
    use crate::engine::testing::{coordinates, planner, ScriptedOptimizer};
    use std::sync::atomic::Ordering;
    use std::sync::Arc;
    use tokio_test::block_on;

    let (_surface, planner) = planner(Arc::new(ScriptedOptimizer::default()));

    block_on(async {
        planner.add_stop(coordinates(19.07, 72.87)).await.unwrap();
        planner.add_stop(coordinates(19.08, 72.88)).await.unwrap();

        planner.optimizing.store(true, Ordering::SeqCst);
        assert_eq!(planner.optimize().await.unwrap_err().code, 105);

        // the rejected call must not clear the outstanding flag
        assert!(planner.optimizing.load(Ordering::SeqCst));
    });
}
