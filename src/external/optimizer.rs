use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::env;

use crate::entities::Coordinates;
use crate::error::{optimization_unavailable_error, Error};
use crate::external::Optimizer;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OptimizedTour {
    pub optimized_route: Vec<Coordinates>,
    pub total_distance: f64,
}

#[derive(Clone, Debug, Serialize)]
struct OptimizeRequest<'a> {
    stops: &'a [Coordinates],
}

#[derive(Debug, Default)]
pub struct RemoteOptimizer;

#[async_trait]
impl Optimizer for RemoteOptimizer {
    #[tracing::instrument(skip(self, stops))]
    async fn optimize(&self, stops: &[Coordinates]) -> Result<OptimizedTour, Error> {
        let api_base = env::var("OPTIMIZER_API_BASE")?;
        let url = format!("{}/api/optimize-route", api_base);

        let res = reqwest::Client::new()
            .post(url)
            .json(&OptimizeRequest { stops })
            .send()
            .await
            .map_err(|_| optimization_unavailable_error())?;

        if res.status().as_u16() != 200 {
            return Err(optimization_unavailable_error());
        }

        let tour = res
            .json()
            .await
            .map_err(|_| optimization_unavailable_error())?;

        Ok(tour)
    }
}
