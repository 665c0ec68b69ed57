//! Scan orchestrator: normalize, probe the three endpoints concurrently, score.
//!
//! Probes share no mutable state and each runs under its own deadline, so a
//! slow endpoint cannot hold up the other two. Scoring only starts once all
//! three results are in.

use crate::error::Result;
use crate::normalizer::{normalize, NormalizedTarget};
use crate::probe::{Endpoint, EndpointProber, HttpProber, ProbeResult};
use crate::scorer::{ScoreReport, Scorer};
use std::sync::Arc;
use std::time::Duration;
use ucp_core::AppConfig;

/// Default per-probe deadline in seconds.
const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 30;

/// Raw results of the three probes for one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeSet {
    /// `/robots.txt`
    pub robots: ProbeResult,
    /// `/.well-known/ucp`
    pub well_known: ProbeResult,
    /// The origin itself
    pub homepage: ProbeResult,
}

/// Runs the probe-and-score pipeline for one input at a time.
pub struct ScanOrchestrator {
    /// Prober used for every endpoint
    prober: Arc<dyn EndpointProber>,
    /// Scorer with its injected policy
    scorer: Scorer,
    /// Deadline applied to each probe independently
    probe_timeout: Duration,
}

impl ScanOrchestrator {
    /// Create a new scan orchestrator.
    #[must_use]
    pub fn new(prober: Arc<dyn EndpointProber>, scorer: Scorer) -> Self {
        Self {
            prober,
            scorer,
            probe_timeout: Duration::from_secs(DEFAULT_PROBE_TIMEOUT_SECS),
        }
    }

    /// Build an orchestrator with an HTTP prober and scorer from configuration.
    ///
    /// # Errors
    /// Returns error if the configuration is invalid or the HTTP client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let scorer = Scorer::new(config)?;
        let prober = HttpProber::new(&config.scanning)?;
        Ok(Self::new(Arc::new(prober), scorer).with_probe_timeout(config.scanning.timeout()))
    }

    /// Set the per-probe deadline.
    #[must_use]
    pub fn with_probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout = timeout;
        self
    }

    /// Scan raw user input and return the score report.
    ///
    /// Probe failures never fail the scan; they show up as failing components.
    ///
    /// # Errors
    /// Returns [`crate::ScanError::Normalization`] if the input cannot be
    /// normalized. No probe is issued in that case.
    pub async fn scan(&self, raw_input: &str) -> Result<ScoreReport> {
        let target = normalize(raw_input)?;
        tracing::info!("Scanning {}...", target.origin_url());

        let probes = self.probe_all(&target).await;
        Ok(self.scorer.score(
            &target,
            &probes.robots,
            &probes.well_known,
            &probes.homepage,
        ))
    }

    /// Run the three probes concurrently and wait for all of them.
    pub async fn probe_all(&self, target: &NormalizedTarget) -> ProbeSet {
        let origin = target.origin_url();

        let (robots, well_known, homepage) = futures::join!(
            self.probe_with_deadline(origin, Endpoint::Robots),
            self.probe_with_deadline(origin, Endpoint::WellKnownConfig),
            self.probe_with_deadline(origin, Endpoint::Homepage),
        );

        ProbeSet {
            robots,
            well_known,
            homepage,
        }
    }

    async fn probe_with_deadline(&self, origin: &str, endpoint: Endpoint) -> ProbeResult {
        let probe = self.prober.probe_endpoint(origin, endpoint);
        if let Ok(result) = tokio::time::timeout(self.probe_timeout, probe).await {
            result
        } else {
            let error = format!(
                "request timed out after {}s",
                self.probe_timeout.as_secs()
            );
            tracing::warn!("Probe of {} abandoned: {}", endpoint.url(origin), error);
            ProbeResult::transport_failure(error)
        }
    }
}
