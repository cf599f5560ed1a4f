use async_trait::async_trait;
use serde::Deserialize;
use std::env;

use crate::entities::Coordinates;
use crate::error::{upstream_error, Error};
use crate::external::{Geocoder, SearchHit};

pub const UNKNOWN_LOCATION: &str = "Unknown Location";

#[derive(Clone, Debug, Deserialize)]
struct ReverseResponse {
    address: Option<Address>,
}

#[derive(Clone, Debug, Default, Deserialize)]
struct Address {
    road: Option<String>,
    neighbourhood: Option<String>,
    suburb: Option<String>,
    city: Option<String>,
    town: Option<String>,
    state: Option<String>,
}

impl Address {
    // most specific available field wins
    fn best_name(self) -> Option<String> {
        self.road
            .or(self.neighbourhood)
            .or(self.suburb)
            .or(self.city)
            .or(self.town)
            .or(self.state)
    }
}

// nominatim serializes coordinates as strings
#[derive(Clone, Debug, Deserialize)]
struct SearchResult {
    lat: String,
    lon: String,
    display_name: String,
}

#[derive(Debug, Default)]
pub struct Nominatim;

impl Nominatim {
    #[tracing::instrument]
    async fn reverse(at: Coordinates) -> Result<Option<String>, Error> {
        let api_base = env::var("NOMINATIM_API_BASE")?;
        let url = format!("{}/reverse", api_base);

        let res = reqwest::Client::new()
            .get(url)
            .query(&[("format", "json")])
            .query(&[("lat", at.lat)])
            .query(&[("lon", at.lng)])
            .query(&[("zoom", 18)])
            .send()
            .await?;

        if res.status().as_u16() != 200 {
            return Err(upstream_error());
        }

        let data: ReverseResponse = res.json().await?;

        Ok(data.address.and_then(Address::best_name))
    }
}

#[async_trait]
impl Geocoder for Nominatim {
    async fn label(&self, at: Coordinates) -> String {
        match Self::reverse(at).await {
            Ok(Some(name)) => name,
            Ok(None) => UNKNOWN_LOCATION.into(),
            Err(err) => {
                tracing::warn!("reverse geocoding failed: {}", err.message);
                UNKNOWN_LOCATION.into()
            }
        }
    }

    #[tracing::instrument(skip(self))]
    async fn search(&self, query: &str) -> Result<Option<SearchHit>, Error> {
        let api_base = env::var("NOMINATIM_API_BASE")?;
        let url = format!("{}/search", api_base);

        let res = reqwest::Client::new()
            .get(url)
            .query(&[("format", "json")])
            .query(&[("q", query)])
            .send()
            .await?;

        if res.status().as_u16() != 200 {
            return Err(upstream_error());
        }

        let results: Vec<SearchResult> = res.json().await?;

        match results.into_iter().next() {
            Some(first) => {
                let lat = first.lat.parse().map_err(|_| upstream_error())?;
                let lng = first.lon.parse().map_err(|_| upstream_error())?;

                Ok(Some(SearchHit {
                    at: Coordinates { lat, lng },
                    label: first.display_name,
                }))
            }
            None => Ok(None),
        }
    }
}

#[test]
fn best_name_prefers_the_most_specific_field() {
    let address = Address {
        road: None,
        neighbourhood: None,
        suburb: Some("Dadar".into()),
        city: Some("Mumbai".into()),
        ..Address::default()
    };

    assert_eq!(address.best_name().as_deref(), Some("Dadar"));
    assert_eq!(Address::default().best_name(), None);
}
