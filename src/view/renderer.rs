use std::sync::Arc;

use crate::entities::{Coordinates, Route};
use crate::external::UNKNOWN_LOCATION;
use crate::map::{MapSurface, PathStyle, Viewport, FIT_PADDING};

/// Draws the closed-loop path and its derived HUD text. Purely visual;
/// never mutates the store.
pub struct RouteRenderer {
    surface: Arc<dyn MapSurface>,
}

impl RouteRenderer {
    pub fn new(surface: Arc<dyn MapSurface>) -> Self {
        Self { surface }
    }

    pub fn render(&self, route: &Route) {
        if !route.is_loop() {
            self.clear();
            return;
        }

        self.surface
            .draw_path(&route.closed_line(), PathStyle::default());

        if let Some(bounds) = route.bounds() {
            self.surface.set_viewport(Viewport::Fit {
                south_west: Coordinates {
                    lat: bounds.min().y,
                    lng: bounds.min().x,
                },
                north_east: Coordinates {
                    lat: bounds.max().y,
                    lng: bounds.max().x,
                },
                padding: FIT_PADDING,
            });
        }

        let hud = route.next_stop().map(|stop| {
            format!(
                "Next stop: {}",
                stop.label.as_deref().unwrap_or(UNKNOWN_LOCATION)
            )
        });
        self.surface.set_hud(hud);
    }

    /// Safe to call when nothing is drawn.
    pub fn clear(&self) {
        self.surface.clear_path();
        self.surface.set_hud(None);
    }
}

#[test]
fn trivial_route_clears_path_and_hud() {
    use crate::entities::Stop;
    use crate::map::StateSurface;

    let surface = Arc::new(StateSurface::new());
    let renderer = RouteRenderer::new(surface.clone());

    let two_stops = Route {
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

    renderer.render(&two_stops);
    assert!(surface.state().path.is_some());
    assert!(surface.state().hud.is_some());

    let one_stop = Route {
        stops: two_stops.stops[..1].to_vec(),
    };

    renderer.render(&one_stop);
    assert!(surface.state().path.is_none());
    assert!(surface.state().hud.is_none());
}

#[test]
fn loop_closes_and_hud_names_the_second_stop() {
    use crate::entities::Stop;
    use crate::map::StateSurface;
    use uuid::Uuid;

    let surface = Arc::new(StateSurface::new());
    let renderer = RouteRenderer::new(surface.clone());

    let route = Route {
        stops: vec![
            Stop {
                id: Uuid::new_v4(),
                coordinates: Coordinates {
                    lat: 19.07,
                    lng: 72.87,
                },
                label: Some("Fort".into()),
            },
            Stop {
                id: Uuid::new_v4(),
                coordinates: Coordinates {
                    lat: 19.08,
                    lng: 72.88,
                },
                label: Some("Bandra".into()),
            },
            Stop {
                id: Uuid::new_v4(),
                coordinates: Coordinates {
                    lat: 19.06,
                    lng: 72.86,
                },
                label: None,
            },
        ],
    };

    renderer.render(&route);

    let state = surface.state();
    let path = state.path.unwrap();

    assert_eq!(path.points.len(), 4);
    assert_eq!(path.points[0], path.points[3]);
    assert!(path.style.arrows);
    assert_eq!(state.hud.as_deref(), Some("Next stop: Bandra"));

    match state.viewport.unwrap() {
        Viewport::Fit {
            south_west,
            north_east,
            padding,
        } => {
            assert_eq!(south_west.lat, 19.06);
            assert_eq!(north_east.lng, 72.88);
            assert_eq!(padding, FIT_PADDING);
        }
        other => panic!("expected fitted viewport, got {:?}", other),
    }
}
