mod config;
pub use config::{GatewayConfig, DEFAULT_BASE_URL};
mod error;
pub use error::Error;
mod station;
pub use station::{OpenStatus, StationRecord, PLACEHOLDER};
mod parse_stations;
pub use parse_stations::parse_stations;
mod stations;
pub use stations::Stations;
mod get_closest_station;
mod get_stations;
pub mod display;
use tracing::{debug, warn};

pub struct Gateway {
    client: reqwest::Client,
    config: GatewayConfig,
}

impl Gateway {
    pub fn new(config: GatewayConfig) -> Result<Gateway, Error> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            "Accept",
            reqwest::header::HeaderValue::from_static("application/xml, text/xml"),
        );

        let mut builder = reqwest::ClientBuilder::new().default_headers(headers);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        if !config.use_proxy {
            builder = builder.no_proxy();
        }

        let client = match builder.build() {
            Ok(r) => r,
            Err(err) => {
                return Err(Error::Unspecified(format!(
                    "Could not create reqwest client ({}).",
                    err
                )))
            }
        };

        Ok(Gateway { client, config })
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Downloads the raw station feed. One attempt, the whole body or an error.
    pub async fn get_feed(&self) -> Result<String, Error> {
        self.get_string(&self.config.stations_url()).await
    }

    async fn get_string(&self, url: &str) -> Result<String, Error> {
        debug!(base_url = %self.config.base_url, "requesting station feed");

        let res = match self.client.get(url).send().await {
            Ok(r) => r,
            Err(err) => {
                return Err(Error::FetchError(format!(
                    "Could not send request ({}).",
                    err.without_url()
                )))
            }
        };

        let status = res.status().as_u16();
        if !(200..=299).contains(&status) {
            let text = res
                .text()
                .await
                .unwrap_or_else(|_| String::from("Could not retrieve body text."));
            warn!(status, "station feed request failed");
            return Err(Error::ApiError(status, text));
        }

        let text = match res.text().await {
            Ok(text) => text,
            Err(err) => {
                return Err(Error::FetchError(format!(
                    "Could not read response body ({}).",
                    err.without_url()
                )))
            }
        };

        debug!(bytes = text.len(), "received station feed");
        Ok(text)
    }
}
