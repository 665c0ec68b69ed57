//! Single best-effort HTTP probes against the three UCP endpoints.
//!
//! A probe never returns an error: transport failures are folded into the
//! returned [`ProbeResult`] so the scorer can treat them as findings.

use crate::error::{Result, ScanError};
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::redirect::Policy;
use reqwest::Client;
use std::collections::BTreeMap;
use std::time::Duration;
use ucp_core::ScanningConfig;

/// The three fixed probe call sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// `/robots.txt`
    Robots,
    /// `/.well-known/ucp`
    WellKnownConfig,
    /// The origin itself
    Homepage,
}

impl Endpoint {
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Robots => "/robots.txt",
            Self::WellKnownConfig => "/.well-known/ucp",
            Self::Homepage => "",
        }
    }

    #[must_use]
    pub fn accept(self) -> &'static str {
        match self {
            Self::Robots => "text/plain, */*",
            Self::WellKnownConfig => "application/json, */*",
            Self::Homepage => "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
        }
    }

    /// Probed URL for an origin. The origin never ends in `/`, so this is plain concatenation.
    #[must_use]
    pub fn url(self, origin_url: &str) -> String {
        format!("{origin_url}{}", self.path())
    }
}

/// Outcome of one probe.
///
/// `body` and `headers` are always present (possibly empty). A transport
/// failure always has `status_code == 0`. Header names are lower-cased.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProbeResult {
    status_code: u16,
    body: String,
    headers: BTreeMap<String, String>,
    transport_error: Option<String>,
}

impl ProbeResult {
    /// A completed HTTP exchange.
    ///
    /// Repeated header names are merged into one comma-separated value.
    pub fn response<I, K, V>(status_code: u16, body: impl Into<String>, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut merged: BTreeMap<String, String> = BTreeMap::new();
        for (name, value) in headers {
            let value = value.into();
            merged
                .entry(name.as_ref().to_ascii_lowercase())
                .and_modify(|existing| {
                    existing.push_str(", ");
                    existing.push_str(&value);
                })
                .or_insert(value);
        }

        Self {
            status_code,
            body: body.into(),
            headers: merged,
            transport_error: None,
        }
    }

    /// A probe that never produced a response (DNS, connect, TLS, timeout).
    pub fn transport_failure(error: impl Into<String>) -> Self {
        Self {
            transport_error: Some(error.into()),
            ..Self::default()
        }
    }

    /// HTTP status, `0` on transport failure.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    #[must_use]
    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    #[must_use]
    pub fn transport_error(&self) -> Option<&str> {
        self.transport_error.as_deref()
    }

    #[must_use]
    pub fn is_transport_failure(&self) -> bool {
        self.transport_error.is_some()
    }
}

/// Something that can perform a single GET against an origin.
#[async_trait]
pub trait EndpointProber: Send + Sync {
    /// Fetch `origin_url + path` once. Must not fail; failures are encoded in the result.
    async fn probe(&self, origin_url: &str, path: &str, accept: &str) -> ProbeResult;

    /// Probe one of the fixed endpoints.
    async fn probe_endpoint(&self, origin_url: &str, endpoint: Endpoint) -> ProbeResult {
        self.probe(origin_url, endpoint.path(), endpoint.accept())
            .await
    }
}

/// `reqwest`-backed prober.
pub struct HttpProber {
    client: Client,
    timeout: Duration,
}

impl HttpProber {
    /// Build a prober from transport settings.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn new(config: &ScanningConfig) -> Result<Self> {
        let redirect = if config.follow_redirects {
            Policy::limited(config.max_redirects)
        } else {
            Policy::none()
        };

        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout())
            .redirect(redirect)
            .build()
            .map_err(|e| ScanError::HttpClient(e.to_string()))?;

        Ok(Self {
            client,
            timeout: config.timeout(),
        })
    }

    fn describe_error(&self, err: &reqwest::Error) -> String {
        if err.is_timeout() {
            format!("request timed out after {}s", self.timeout.as_secs())
        } else if err.is_connect() {
            format!("connection failed: {err}")
        } else if err.is_redirect() {
            format!("redirect error: {err}")
        } else if err.is_body() || err.is_decode() {
            format!("failed to read response body: {err}")
        } else {
            err.to_string()
        }
    }
}

#[async_trait]
impl EndpointProber for HttpProber {
    async fn probe(&self, origin_url: &str, path: &str, accept: &str) -> ProbeResult {
        let url = format!("{origin_url}{path}");
        tracing::debug!("Requesting URL: {}", url);

        let response = match self.client.get(&url).header(ACCEPT, accept).send().await {
            Ok(response) => response,
            Err(e) => {
                let error = self.describe_error(&e);
                tracing::warn!("Request failed for {}: {}", url, error);
                return ProbeResult::transport_failure(error);
            }
        };

        let status = response.status().as_u16();
        let headers: Vec<(String, String)> = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();

        match response.text().await {
            Ok(body) => {
                tracing::debug!("{} answered HTTP {} ({} bytes)", url, status, body.len());
                ProbeResult::response(status, body, headers)
            }
            Err(e) => {
                let error = self.describe_error(&e);
                tracing::warn!("Reading body failed for {}: {}", url, error);
                ProbeResult::transport_failure(error)
            }
        }
    }
}
