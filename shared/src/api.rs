use crate::config::ServiceConfig;
use crate::protocol::{CreateRaceRequest, CreatedRace, RaceSnapshot, Racer, Track};
use anyhow::{Context, Result};
use reqwest::header::{ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_TYPE};
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use tracing::{debug, error};

/// The remote race service, one HTTP round trip per call.
#[allow(async_fn_in_trait)]
pub trait RaceApi {
    async fn fetch_tracks(&self) -> Result<Vec<Track>>;
    async fn fetch_racers(&self) -> Result<Vec<Racer>>;
    async fn create_race(&self, player_id: u32, track_id: u32) -> Result<CreatedRace>;
    async fn start_race(&self, race_id: u32) -> Result<()>;
    async fn accelerate(&self, race_id: u32) -> Result<()>;
    async fn get_race(&self, race_id: u32) -> Result<RaceSnapshot>;
}

#[derive(Clone)]
pub struct HttpRaceService {
    client: reqwest::Client,
    base_url: String,
}

impl HttpRaceService {
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .context("failed to build race service client")?;
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Every request, GET or POST, carries the JSON content type and the
    /// cross-origin allow header.
    fn with_service_headers(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header(CONTENT_TYPE, "application/json")
            .header(ACCESS_CONTROL_ALLOW_ORIGIN, self.base_url.as_str())
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path);
        debug!("GET {}", url);
        let response = self
            .with_service_headers(self.client.get(&url))
            .send()
            .await
            .with_context(|| format!("GET {url}"))?
            .error_for_status()
            .with_context(|| format!("GET {url}"))?;
        response
            .json::<T>()
            .await
            .with_context(|| format!("decoding response from {url}"))
    }

    async fn post(&self, path: &str, body: Option<String>) -> Result<reqwest::Response> {
        let url = self.url(path);
        debug!("POST {}", url);
        let mut request = self.with_service_headers(self.client.post(&url));
        if let Some(body) = body {
            request = request.body(body);
        }
        request
            .send()
            .await
            .with_context(|| format!("POST {url}"))?
            .error_for_status()
            .with_context(|| format!("POST {url}"))
    }
}

fn logged<T>(operation: &str, result: Result<T>) -> Result<T> {
    if let Err(e) = &result {
        error!("Could not connect to endpoint ({}): {:#}", operation, e);
    }
    result
}

impl RaceApi for HttpRaceService {
    async fn fetch_tracks(&self) -> Result<Vec<Track>> {
        logged("fetch_tracks", self.get_json("/api/tracks").await)
    }

    async fn fetch_racers(&self) -> Result<Vec<Racer>> {
        logged("fetch_racers", self.get_json("/api/cars").await)
    }

    async fn create_race(&self, player_id: u32, track_id: u32) -> Result<CreatedRace> {
        let result = async {
            let body = serde_json::to_string(&CreateRaceRequest { player_id, track_id })?;
            let response = self.post("/api/races", Some(body)).await?;
            response
                .json::<CreatedRace>()
                .await
                .context("decoding created race")
        }
        .await;
        logged("create_race", result)
    }

    async fn start_race(&self, race_id: u32) -> Result<()> {
        let result = self.post(&format!("/api/races/{race_id}/start"), None).await;
        logged("start_race", result.map(|_| ()))
    }

    async fn accelerate(&self, race_id: u32) -> Result<()> {
        let result = self.post(&format!("/api/races/{race_id}/accelerate"), None).await;
        logged("accelerate", result.map(|_| ()))
    }

    async fn get_race(&self, race_id: u32) -> Result<RaceSnapshot> {
        logged("get_race", self.get_json(&format!("/api/races/{race_id}")).await)
    }
}
