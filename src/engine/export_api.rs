use super::Planner;

use async_trait::async_trait;

use crate::api::ExportAPI;
use crate::error::Error;
use crate::export;

#[async_trait]
impl ExportAPI for Planner {
    #[tracing::instrument(skip(self))]
    async fn export_gpx(&self) -> Result<String, Error> {
        let route = self.store.lock().await.snapshot();

        Ok(export::to_gpx(&route))
    }
}

#[test]
fn export_reflects_the_current_visiting_order() {
    use crate::api::StopAPI;
    use crate::engine::testing::{coordinates, planner, ScriptedOptimizer};
    use std::sync::Arc;
    use tokio_test::block_on;

    let (_surface, planner) = planner(Arc::new(ScriptedOptimizer::default()));

    block_on(async {
        planner.add_stop(coordinates(19.07, 72.87)).await.unwrap();
        planner.add_stop(coordinates(19.08, 72.88)).await.unwrap();

        let gpx = planner.export_gpx().await.unwrap();

        let first = gpx.find("lat=\"19.07\"").unwrap();
        let second = gpx.find("lat=\"19.08\"").unwrap();
        assert!(first < second);
    });
}
