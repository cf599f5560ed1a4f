use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// A point to visit. The id is assigned once at creation and survives
/// reordering; coordinates are never an identity key, two stops may
/// coincide.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Stop {
    pub id: Uuid,
    pub coordinates: Coordinates,
    // filled asynchronously by reverse geocoding, may be pending
    pub label: Option<String>,
}

impl Stop {
    pub fn new(coordinates: Coordinates) -> Self {
        Self {
            id: Uuid::new_v4(),
            coordinates,
            label: None,
        }
    }
}
