mod nominatim;
mod optimizer;

pub use nominatim::{Nominatim, UNKNOWN_LOCATION};
pub use optimizer::{OptimizedTour, RemoteOptimizer};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::entities::Coordinates;
use crate::error::Error;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchHit {
    pub at: Coordinates,
    pub label: String,
}

/// Reverse and forward geocoding. Reverse lookups are best-effort
/// enrichment and degrade to the sentinel label instead of erroring.
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn label(&self, at: Coordinates) -> String;
    async fn search(&self, query: &str) -> Result<Option<SearchHit>, Error>;
}

/// The external visiting-order service. It sees coordinates only, never
/// ids or labels, and returns a reordered coordinate list plus a total
/// distance in decimal degrees.
#[async_trait]
pub trait Optimizer: Send + Sync {
    async fn optimize(&self, stops: &[Coordinates]) -> Result<OptimizedTour, Error>;
}
