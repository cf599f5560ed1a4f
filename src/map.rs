use geo_types::LineString;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use uuid::Uuid;

use crate::entities::Coordinates;

pub const DEFAULT_CENTER: Coordinates = Coordinates {
    lat: 19.0760,
    lng: 72.8777,
};
pub const DEFAULT_ZOOM: u8 = 11;
pub const SEARCH_ZOOM: u8 = 14;
pub const FIT_PADDING: u32 = 50;

/// One numbered visual proxy for exactly one stop.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarkerSpec {
    pub stop_id: Uuid,
    // 1-based position in the current visiting order
    pub number: usize,
    pub at: Coordinates,
}

/// Interaction reported by the map surface back to the planner.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MapEvent {
    Click { at: Coordinates },
    MarkerDragged { stop_id: Uuid, to: Coordinates },
    ProvisionalConfirmed { at: Coordinates },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Viewport {
    Center {
        at: Coordinates,
        zoom: u8,
    },
    Fit {
        south_west: Coordinates,
        north_east: Coordinates,
        padding: u32,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PathStyle {
    pub color: String,
    pub weight: u32,
    pub opacity: f64,
    // directional arrowheads along the line
    pub arrows: bool,
}

impl Default for PathStyle {
    fn default() -> Self {
        Self {
            color: "#4a90e2".into(),
            weight: 5,
            opacity: 0.8,
            arrows: true,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PathSpec {
    pub points: Vec<Coordinates>,
    pub style: PathStyle,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProvisionalPin {
    pub at: Coordinates,
    pub label: String,
}

/// Capability interface over the rendering engine. The planner only ever
/// issues these directives; it never reads anything back from the surface.
pub trait MapSurface: Send + Sync {
    fn place_marker(&self, marker: MarkerSpec);
    fn clear_markers(&self);
    fn draw_path(&self, line: &LineString<f64>, style: PathStyle);
    fn clear_path(&self);
    fn set_viewport(&self, viewport: Viewport);
    fn set_hud(&self, text: Option<String>);
    fn show_provisional(&self, at: Coordinates, label: String);
    fn clear_provisional(&self);
}

/// Everything currently drawn, as a serializable value. A thin client
/// polls this and renders it verbatim.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RenderState {
    pub markers: Vec<MarkerSpec>,
    pub path: Option<PathSpec>,
    pub viewport: Option<Viewport>,
    pub hud: Option<String>,
    pub provisional: Option<ProvisionalPin>,
}

/// In-memory `MapSurface` backing the HTTP bridge; also the surface the
/// view tests observe.
#[derive(Debug, Default)]
pub struct StateSurface {
    state: Mutex<RenderState>,
}

impl StateSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> RenderState {
        self.state.lock().unwrap().clone()
    }
}

impl MapSurface for StateSurface {
    fn place_marker(&self, marker: MarkerSpec) {
        self.state.lock().unwrap().markers.push(marker);
    }

    fn clear_markers(&self) {
        self.state.lock().unwrap().markers.clear();
    }

    fn draw_path(&self, line: &LineString<f64>, style: PathStyle) {
        let points = line
            .coords()
            .map(|coord| Coordinates {
                lat: coord.y,
                lng: coord.x,
            })
            .collect();

        self.state.lock().unwrap().path = Some(PathSpec { points, style });
    }

    fn clear_path(&self) {
        self.state.lock().unwrap().path = None;
    }

    fn set_viewport(&self, viewport: Viewport) {
        self.state.lock().unwrap().viewport = Some(viewport);
    }

    fn set_hud(&self, text: Option<String>) {
        self.state.lock().unwrap().hud = text;
    }

    fn show_provisional(&self, at: Coordinates, label: String) {
        self.state.lock().unwrap().provisional = Some(ProvisionalPin { at, label });
    }

    fn clear_provisional(&self) {
        self.state.lock().unwrap().provisional = None;
    }
}
