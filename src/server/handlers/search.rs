use axum::extract::{Extension, Json};
use serde::{Deserialize, Serialize};

use crate::api::{DynAPI, SearchAPI};
use crate::error::Error;
use crate::external::SearchHit;

#[derive(Serialize, Deserialize)]
pub struct SearchParams {
    query: String,
}

pub async fn search(
    Extension(api): Extension<DynAPI>,
    Json(params): Json<SearchParams>,
) -> Result<Json<Option<SearchHit>>, Error> {
    let hit = api.search(params.query).await?;

    Ok(hit.into())
}
