use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::entities::{Coordinates, Route, RouteMetrics, Stop};
use crate::error::Error;
use crate::external::SearchHit;

#[async_trait]
pub trait StopAPI {
    async fn add_stop(&self, at: Coordinates) -> Result<Stop, Error>;

    async fn remove_stop(&self, id: Uuid) -> Result<(), Error>;

    async fn move_stop(&self, id: Uuid, to: Coordinates) -> Result<(), Error>;

    async fn clear_stops(&self) -> Result<(), Error>;

    async fn current_route(&self) -> Route;
}

#[async_trait]
pub trait OptimizeAPI {
    async fn optimize(&self) -> Result<RouteMetrics, Error>;
}

#[async_trait]
pub trait SearchAPI {
    /// `Ok(None)` is the empty-query no-op; a miss is reported as
    /// `location_not_found`.
    async fn search(&self, query: String) -> Result<Option<SearchHit>, Error>;
}

#[async_trait]
pub trait ExportAPI {
    async fn export_gpx(&self) -> Result<String, Error>;
}

pub trait API: StopAPI + OptimizeAPI + SearchAPI + ExportAPI {}

pub type DynAPI = Arc<dyn API + Send + Sync>;
