use crate::entities::Route;
use crate::external::UNKNOWN_LOCATION;

const GPX_CREATOR: &str = "RouteSmart";
const TRACK_NAME: &str = "Optimized Route";

/// GPX 1.1 loop track: one trkpt per stop, in visiting order. Stops with
/// a pending label export the sentinel name.
pub fn to_gpx(route: &Route) -> String {
    let mut gpx = format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <gpx version=\"1.1\" creator=\"{}\" xmlns=\"http://www.topografix.com/GPX/1/1\">\n\
         <metadata><name>{}</name></metadata>\n\
         <trk><name>{}</name><trkseg>",
        GPX_CREATOR, TRACK_NAME, TRACK_NAME
    );

    for stop in &route.stops {
        gpx.push_str(&format!(
            "<trkpt lat=\"{}\" lon=\"{}\"><name>{}</name></trkpt>",
            stop.coordinates.lat,
            stop.coordinates.lng,
            stop.label.as_deref().unwrap_or(UNKNOWN_LOCATION)
        ));
    }

    gpx.push_str("</trkseg></trk></gpx>");
    gpx
}

#[test]
fn trkpts_follow_visiting_order() {
    use crate::entities::{Coordinates, Stop};
    use uuid::Uuid;

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
                label: None,
            },
        ],
    };

    let gpx = to_gpx(&route);

    let first = gpx.find("<trkpt lat=\"19.07\" lon=\"72.87\"><name>Fort</name></trkpt>");
    let second = gpx.find(&format!(
        "<trkpt lat=\"19.08\" lon=\"72.88\"><name>{}</name></trkpt>",
        UNKNOWN_LOCATION
    ));

    assert!(first.is_some());
    assert!(second.is_some());
    assert!(first.unwrap() < second.unwrap());
    assert!(gpx.ends_with("</trkseg></trk></gpx>"));
}
