use std::time::Duration;

/// Default base URL of the SelfServiceBicycleService.
pub const DEFAULT_BASE_URL: &str = "http://data.goteborg.se/SelfServiceBicycleService/v1.0";

/// Settings for a [`Gateway`](crate::Gateway).
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayConfig {
    /// Application key issued by the open data portal.
    pub app_key: String,
    /// Base URL of the service, without trailing slash.
    pub base_url: String,
    /// Request timeout. `None` waits for as long as the server takes.
    pub timeout: Option<Duration>,
    /// Whether to honour proxy settings from the environment.
    pub use_proxy: bool,
}

impl GatewayConfig {
    pub fn new(app_key: impl Into<String>) -> Self {
        Self {
            app_key: app_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
            use_proxy: true,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn without_proxy(mut self) -> Self {
        self.use_proxy = false;
        self
    }

    /// The URL of the station feed, asking for XML including closing periods.
    pub fn stations_url(&self) -> String {
        format!(
            "{}/Stations/{}?getclosingperiods=true&format=Xml",
            self.base_url, self.app_key
        )
    }
}
