use crate::{data::payload::Payload, source::PayloadSource, MapError, Result};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

/// Shared HTTP client, built once for every search request.
pub(crate) static HTTP_CLIENT: Lazy<Client> = Lazy::new(|| {
    Client::builder()
        .user_agent(concat!("coverage-map/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_else(|err| {
            log::warn!("custom HTTP client unavailable ({err}), using defaults");
            Client::new()
        })
});

/// Query parameters of the search form.
///
/// Values are passed through as typed in the numeric inputs, without range
/// checks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchParams {
    /// Center latitude
    pub lat_centre: String,
    /// Center longitude
    pub lon_centre: String,
    /// Radius around the center
    pub r_centre: String,
    /// Antenna search radius
    pub rayon: String,
    /// Route distance
    pub dist: String,
}

impl SearchParams {
    pub fn new(
        lat_centre: impl ToString,
        lon_centre: impl ToString,
        r_centre: impl ToString,
        rayon: impl ToString,
        dist: impl ToString,
    ) -> Self {
        Self {
            lat_centre: lat_centre.to_string(),
            lon_centre: lon_centre.to_string(),
            r_centre: r_centre.to_string(),
            rayon: rayon.to_string(),
            dist: dist.to_string(),
        }
    }

    /// Parameters in the order the endpoint receives them
    pub fn query_pairs(&self) -> [(&'static str, &str); 5] {
        [
            ("lat_centre", self.lat_centre.as_str()),
            ("lon_centre", self.lon_centre.as_str()),
            ("r_centre", self.r_centre.as_str()),
            ("rayon", self.rayon.as_str()),
            ("dist", self.dist.as_str()),
        ]
    }
}

/// One GET against the search endpoint
#[derive(Debug, Clone)]
pub struct NetworkSource {
    endpoint: String,
    params: SearchParams,
}

impl NetworkSource {
    pub fn new(endpoint: impl Into<String>, params: SearchParams) -> Self {
        Self {
            endpoint: endpoint.into(),
            params,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn params(&self) -> &SearchParams {
        &self.params
    }
}

#[async_trait]
impl PayloadSource for NetworkSource {
    fn describe(&self) -> String {
        format!("search endpoint {}", self.endpoint)
    }

    async fn fetch(&self) -> Result<Payload> {
        log::debug!("GET {} {:?}", self.endpoint, self.params);

        let response = HTTP_CLIENT
            .get(&self.endpoint)
            .query(&self.params.query_pairs())
            .send()
            .await
            .map_err(|err| {
                log::error!("search request to {} failed: {err}", self.endpoint);
                MapError::Network(err)
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            let url = response.url().to_string();
            log::error!("search request to {url} answered HTTP {status}");
            return Err(MapError::Transport {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.text().await?;
        log::info!("received search payload ({} bytes)", body.len());
        Payload::from_response_body(&body).map_err(|err| {
            log::error!("search payload from {} is not valid JSON: {err}", self.endpoint);
            err
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_pairs_order() {
        let params = SearchParams::new(49.25, "4.03", 10, 5, "2");
        let keys: Vec<_> = params.query_pairs().iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec!["lat_centre", "lon_centre", "r_centre", "rayon", "dist"]);
        assert_eq!(params.query_pairs()[0].1, "49.25");
    }

    #[test]
    fn test_describe() {
        let source = NetworkSource::new("http://localhost/search", SearchParams::default());
        assert_eq!(source.describe(), "search endpoint http://localhost/search");
    }
}
