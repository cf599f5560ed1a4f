use chrono::Duration;
use geo_types::{Coord, LineString, Rect};
use serde::{Deserialize, Serialize};

use crate::entities::Stop;

/// Rough flat-earth conversion used for display figures only.
pub const DEGREES_TO_KM: f64 = 111.32;
pub const AVERAGE_SPEED_KMPH: f64 = 40.0;

/// Ordered snapshot of the current stops, interpreted as a closed loop
/// (last stop connects back to the first) once it has 2 or more stops.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Route {
    pub stops: Vec<Stop>,
}

impl Route {
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn is_loop(&self) -> bool {
        self.stops.len() >= 2
    }

    /// The path to draw, closing back on stop 1. x is longitude, y latitude.
    pub fn closed_line(&self) -> LineString<f64> {
        let mut coords: Vec<Coord<f64>> = self
            .stops
            .iter()
            .map(|stop| Coord {
                x: stop.coordinates.lng,
                y: stop.coordinates.lat,
            })
            .collect();

        if let Some(first) = coords.first().copied() {
            coords.push(first);
        }

        LineString::new(coords)
    }

    pub fn bounds(&self) -> Option<Rect<f64>> {
        let first = self.stops.first()?;

        let mut min = first.coordinates;
        let mut max = first.coordinates;
        for stop in &self.stops {
            min.lat = min.lat.min(stop.coordinates.lat);
            min.lng = min.lng.min(stop.coordinates.lng);
            max.lat = max.lat.max(stop.coordinates.lat);
            max.lng = max.lng.max(stop.coordinates.lng);
        }

        Some(Rect::new(
            Coord {
                x: min.lng,
                y: min.lat,
            },
            Coord {
                x: max.lng,
                y: max.lat,
            },
        ))
    }

    /// The stop the loop heads to after departure, position index 1.
    pub fn next_stop(&self) -> Option<&Stop> {
        self.stops.get(1)
    }
}

/// Display figures derived from the optimizer's decimal-degree total.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RouteMetrics {
    pub distance_km: f64,
    pub hours: i64,
    pub minutes: i64,
}

impl RouteMetrics {
    pub fn from_degrees(total_distance: f64) -> Self {
        let distance_km = total_distance * DEGREES_TO_KM;

        let travel = Duration::seconds((distance_km / AVERAGE_SPEED_KMPH * 3600.0).round() as i64);

        Self {
            distance_km,
            hours: travel.num_hours(),
            minutes: travel.num_minutes() % 60,
        }
    }
}

#[test]
fn closed_line_loops_back_to_start() {
    use crate::entities::Coordinates;

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

    let line = route.closed_line();
    let coords: Vec<_> = line.coords().copied().collect();

    assert_eq!(coords.len(), 3);
    assert_eq!(coords[0], coords[2]);
}

#[test]
fn bounds_cover_every_stop() {
    use crate::entities::Coordinates;

    let route = Route {
        stops: vec![
            Stop::new(Coordinates {
                lat: 19.07,
                lng: 72.88,
            }),
            Stop::new(Coordinates {
                lat: 19.08,
                lng: 72.86,
            }),
            Stop::new(Coordinates {
                lat: 19.06,
                lng: 72.87,
            }),
        ],
    };

    let bounds = route.bounds().unwrap();

    assert_eq!(bounds.min().y, 19.06);
    assert_eq!(bounds.min().x, 72.86);
    assert_eq!(bounds.max().y, 19.08);
    assert_eq!(bounds.max().x, 72.88);
}

#[test]
fn metrics_from_example_distance() {
    let metrics = RouteMetrics::from_degrees(0.05);

    assert!((metrics.distance_km - 5.566).abs() < 1e-9);
    assert_eq!(metrics.hours, 0);
    assert_eq!(metrics.minutes, 8);
}
