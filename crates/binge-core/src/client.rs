//! HTTP client for the IMDb metadata API
//!
//! Rate-limited JSON client for the two read-only endpoints the session
//! core depends on: the season list of a title and the episode list of one
//! season. Failures are classified, never retried; the session layer
//! decides what a failure means (see `session`).

use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;
use tracing::debug;

use crate::api::{EpisodesResponse, SeasonsResponse};
use crate::error::{BingeError, Result};

/// Base URL of the metadata API
const DEFAULT_BASE_URL: &str = "https://api.imdbapi.dev";

/// Page size for the episodes endpoint. Exactly one page is fetched per
/// season; seasons with more episodes than this have an unreachable tail.
/// Known limitation, kept intentionally.
const EPISODES_PAGE_SIZE: u32 = 40;

/// Rate limiter to control request frequency
///
/// Ensures that requests are spaced at least `min_interval` apart
/// to stay polite toward the public metadata API.
pub struct RateLimiter {
    /// Minimum interval between requests
    min_interval: Duration,
    /// Timestamp of the last request
    last_request: Arc<Mutex<Instant>>,
}

impl RateLimiter {
    /// Create a new rate limiter with the specified requests per second
    ///
    /// # Example
    /// ```
    /// use binge_core::client::RateLimiter;
    ///
    /// let limiter = RateLimiter::new(2.0); // 2 requests per second
    /// ```
    pub fn new(requests_per_second: f64) -> Self {
        let min_interval = Duration::from_secs_f64(1.0 / requests_per_second);
        Self {
            min_interval,
            last_request: Arc::new(Mutex::new(Instant::now() - min_interval)),
        }
    }

    /// Acquire permission to make a request, waiting if necessary to keep
    /// the minimum interval between requests.
    pub async fn acquire(&self) {
        let mut last = self.last_request.lock().await;
        let elapsed = last.elapsed();

        if elapsed < self.min_interval {
            let wait_time = self.min_interval - elapsed;
            sleep(wait_time).await;
        }

        *last = Instant::now();
    }

    /// Get the minimum interval between requests
    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }
}

/// Configuration for the metadata API client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the API (default: `https://api.imdbapi.dev`);
    /// overridable for tests against a local mock server
    pub base_url: String,
    /// Maximum requests per second (default: 2.0)
    pub requests_per_second: f64,
    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            requests_per_second: 2.0,
            timeout_secs: 30,
        }
    }
}

/// JSON client for the IMDb metadata API
///
/// This client automatically:
/// - limits request rate to avoid hammering the public API
/// - classifies non-success statuses into [`BingeError`] variants
///
/// It deliberately does not retry: per the orchestration contract a failed
/// fetch is terminal until the next triggering event (season or title
/// change) re-issues it.
pub struct ImdbClient {
    /// Underlying HTTP client
    client: reqwest::Client,
    /// Base URL, without trailing slash
    base_url: String,
    /// Rate limiter for request throttling
    rate_limiter: RateLimiter,
}

impl ImdbClient {
    /// Create a new client with default configuration.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("binge/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            rate_limiter: RateLimiter::new(config.requests_per_second),
        })
    }

    /// Fetch the season list of a title.
    ///
    /// # Arguments
    /// * `title_id` - IMDb title id, e.g. `tt0903747`
    ///
    /// # Errors
    /// - `BingeError::InvalidTitleId` - empty or whitespace-only id
    /// - `BingeError::NotFound` - the API answered 404
    /// - `BingeError::Api` - any other non-success status
    /// - `BingeError::Http` - transport failure or undecodable body
    pub async fn fetch_seasons(&self, title_id: &str) -> Result<SeasonsResponse> {
        let title_id = validate_title_id(title_id)?;
        let path = format!("/titles/{title_id}/seasons");
        self.get_json(&path).await
    }

    /// Fetch one page of a season's episode list.
    ///
    /// Only the first page (up to 40 episodes) is requested; there is no
    /// pagination loop.
    ///
    /// # Arguments
    /// * `title_id` - IMDb title id
    /// * `season` - season number to fetch episodes for
    ///
    /// # Errors
    /// Same classification as [`fetch_seasons`](Self::fetch_seasons).
    pub async fn fetch_episodes(&self, title_id: &str, season: u32) -> Result<EpisodesResponse> {
        let title_id = validate_title_id(title_id)?;
        let path = format!(
            "/titles/{title_id}/episodes?season={season}&pageSize={EPISODES_PAGE_SIZE}"
        );
        self.get_json(&path).await
    }

    /// GET a path and decode the JSON body.
    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.rate_limiter.acquire().await;

        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "fetching");

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(BingeError::NotFound(url));
        }

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(BingeError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }
}

/// Validate and normalize a title id.
fn validate_title_id(title_id: &str) -> Result<&str> {
    let trimmed = title_id.trim();
    if trimmed.is_empty() {
        return Err(BingeError::InvalidTitleId(title_id.to_string()));
    }
    Ok(trimmed)
}
