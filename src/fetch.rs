//! Page fetching with an optional exponential-backoff retry layer.
//!
//! # Architecture
//!
//! - [`Fetch`]: core trait, one page address in, page markup out
//! - [`HttpFetcher`]: `reqwest` implementation issuing a single GET
//! - [`RetryFetch`]: decorator that retries transient failures of any [`Fetch`]
//!
//! # Retry Strategy
//!
//! Only errors for which [`NewsError::is_retryable`] holds are retried
//! (transport failures, HTTP 429 and 5xx). The delay between attempts is
//!
//! ```text
//! delay = min(base_delay * 2^(attempt-1), max_delay) + random_jitter(0..=jitter)
//! ```
//!
//! With the default policy (`max_retries = 0`) the first failure is returned
//! as-is and aborts the run.

use crate::config::{FetchConfig, RetryPolicy};
use crate::error::{NewsError, Result};
use rand::{Rng, rng};
use std::fmt;
use std::time::{Duration, Instant};
use tokio::time::sleep;
use tracing::{debug, error, instrument, warn};

/// Something that can turn a page address into page markup.
pub trait Fetch {
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// Plain HTTP GET via a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Create a fetcher with its own connection pool.
    ///
    /// # Arguments
    ///
    /// * `config` - Supplies the `User-Agent` header and the optional per-request timeout
    ///
    /// # Returns
    ///
    /// The fetcher, or [`NewsError::Config`] if the TLS backend fails to initialize.
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.clone());
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| NewsError::Config(format!("cannot build HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    #[instrument(level = "info", skip_all, fields(%url))]
    async fn fetch(&self, url: &str) -> Result<String> {
        let t0 = Instant::now();
        let network = |source: reqwest::Error| NewsError::Network {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url).send().await.map_err(network)?;
        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "Non-success HTTP status");
            return Err(NewsError::Http {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await.map_err(network)?;
        debug!(
            bytes = body.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Fetched page"
        );
        Ok(body)
    }
}

/// Wraps a [`Fetch`] implementation with the retry behavior of a [`RetryPolicy`].
pub struct RetryFetch<T> {
    inner: T,
    policy: RetryPolicy,
}

impl<T: Fetch> RetryFetch<T> {
    pub fn new(inner: T, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    fn backoff(&self, attempt: usize) -> Duration {
        let factor = 2u32.saturating_pow((attempt - 1) as u32);
        let delay = self
            .policy
            .base_delay()
            .saturating_mul(factor)
            .min(self.policy.max_delay());
        if self.policy.jitter_ms == 0 {
            delay
        } else {
            delay + Duration::from_millis(rng().random_range(0..=self.policy.jitter_ms))
        }
    }
}

impl<T> fmt::Debug for RetryFetch<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryFetch")
            .field("max_retries", &self.policy.max_retries)
            .field("base_delay_ms", &self.policy.base_delay_ms)
            .field("max_delay_ms", &self.policy.max_delay_ms)
            .finish()
    }
}

impl<T: Fetch> Fetch for RetryFetch<T> {
    #[instrument(level = "info", skip_all, fields(%url))]
    async fn fetch(&self, url: &str) -> Result<String> {
        let total_t0 = Instant::now();
        let mut attempt = 0usize;

        loop {
            match self.inner.fetch(url).await {
                Ok(body) => return Ok(body),
                Err(e) if !e.is_retryable() => {
                    error!(error = %e, "fetch failed with non-retryable error");
                    return Err(e);
                }
                Err(e) => {
                    attempt += 1;
                    let total_dt = total_t0.elapsed();

                    if attempt > self.policy.max_retries {
                        error!(
                            attempt,
                            max = self.policy.max_retries,
                            elapsed_ms_total = total_dt.as_millis() as u64,
                            error = %e,
                            "fetch exhausted retries"
                        );
                        return Err(e);
                    }

                    let delay = self.backoff(attempt);
                    warn!(
                        attempt,
                        max = self.policy.max_retries,
                        elapsed_ms_total = total_dt.as_millis() as u64,
                        ?delay,
                        error = %e,
                        "fetch attempt failed; backing off"
                    );
                    sleep(delay).await;
                }
            }
        }
    }
}

/// Build the fetcher a scrape run uses: HTTP behind the configured retry policy.
///
/// # Arguments
///
/// * `config` - User agent, timeout and retry policy
///
/// # Returns
///
/// A [`RetryFetch`] around an [`HttpFetcher`], or a `Config` error if the
/// HTTP client cannot be built.
pub fn http_fetcher(config: &FetchConfig) -> Result<RetryFetch<HttpFetcher>> {
    Ok(RetryFetch::new(HttpFetcher::new(config)?, config.retry))
}
