//! Compliance scoring.
//!
//! Turns three resolved probe results into a [`ScoreReport`]. Scoring is pure
//! and deterministic: the only input that varies between two calls with the
//! same probes is the review timestamp.
//!
//! Each component is binary. It awards either `0` or its full configured
//! weight, so the aggregate is always the plain sum of the component scores.
//! Detection is a case-insensitive substring search for `ucp` in the robots
//! body and in the homepage header set; the well-known config must parse as a
//! JSON object.

use crate::normalizer::NormalizedTarget;
use crate::probe::{Endpoint, ProbeResult};
use serde::Serialize;
use ucp_core::{
    AppConfig, ComplianceStatus, ComponentKey, ConfigError, DisclaimerConfig, Jurisdiction,
    ReportMeta, ScoringConfig, Timestamp,
};

/// Score for one compliance criterion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentScore {
    /// Which criterion this is
    pub key: ComponentKey,
    /// Display label from configuration
    pub label: String,
    /// Configured weight, also the maximum score
    pub weight: u32,
    /// Either `0` or `weight`
    pub awarded_score: u32,
    /// `awarded_score > 0`
    pub passed: bool,
    /// Human summary
    pub finding: String,
    /// Diagnostic including the probed URL and status
    pub endpoint_detail: String,
}

/// Aggregate result of one scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreReport {
    /// Origin that was probed
    pub target_origin: String,
    /// Hostname of the target
    pub hostname: String,
    /// When the score was computed (UTC)
    pub review_timestamp: Timestamp,
    /// Robots, well-known config, headers, in that order
    pub components: Vec<ComponentScore>,
    /// Sum of awarded scores, within `0..=100`
    pub aggregate_score: u32,
    /// Verdict derived from the thresholds
    pub compliance_status: ComplianceStatus,
    /// Configured display label for the verdict
    pub status_label: String,
    /// Jurisdiction guess used to pick the disclaimer
    pub jurisdiction: Jurisdiction,
    /// Cross-border disclaimer wording
    pub jurisdiction_disclaimer: String,
    /// Where the review ran from
    pub reviewer_location: String,
    /// Report metadata
    pub meta: ReportMeta,
}

impl ScoreReport {
    /// Look up a component by key.
    #[must_use]
    pub fn component(&self, key: ComponentKey) -> Option<&ComponentScore> {
        self.components.iter().find(|c| c.key == key)
    }

    /// Suggested base file name for a rendered copy of this report.
    #[must_use]
    pub fn file_stem(&self) -> String {
        format!(
            "UCP_Report_{}_{}",
            self.hostname.replace('.', "_"),
            self.review_timestamp.timestamp()
        )
    }
}

/// Scores probe results against an injected, validated policy.
#[derive(Debug, Clone)]
pub struct Scorer {
    scoring: ScoringConfig,
    disclaimer: DisclaimerConfig,
    meta: ReportMeta,
}

impl Scorer {
    /// Create a scorer from configuration.
    ///
    /// # Errors
    /// Returns error if the configuration fails validation. The scorer never
    /// runs with weights or thresholds that could misstate a status.
    pub fn new(config: &AppConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            scoring: config.scoring.clone(),
            disclaimer: config.disclaimer.clone(),
            meta: config.meta.clone(),
        })
    }

    /// Score a target, stamping the report with the current time.
    #[must_use]
    pub fn score(
        &self,
        target: &NormalizedTarget,
        robots: &ProbeResult,
        well_known: &ProbeResult,
        homepage: &ProbeResult,
    ) -> ScoreReport {
        self.score_at(target, robots, well_known, homepage, Timestamp::now())
    }

    /// Score a target with an explicit review timestamp.
    #[must_use]
    pub fn score_at(
        &self,
        target: &NormalizedTarget,
        robots: &ProbeResult,
        well_known: &ProbeResult,
        homepage: &ProbeResult,
        reviewed_at: Timestamp,
    ) -> ScoreReport {
        tracing::info!("Calculating compliance score for {}", target.hostname());
        let origin = target.origin_url();

        let components = vec![
            self.score_robots(origin, robots),
            self.score_well_known(origin, well_known),
            self.score_headers(origin, homepage),
        ];

        let aggregate_score = components
            .iter()
            .map(|c| c.awarded_score)
            .sum::<u32>()
            .min(100);
        let compliance_status = self.scoring.thresholds.classify(aggregate_score);

        tracing::info!(
            host = target.hostname(),
            score = aggregate_score,
            status = %compliance_status,
            "Compliance score computed"
        );

        ScoreReport {
            target_origin: origin.to_string(),
            hostname: target.hostname().to_string(),
            review_timestamp: reviewed_at,
            components,
            aggregate_score,
            compliance_status,
            status_label: self.scoring.labels.label(compliance_status).to_string(),
            jurisdiction: target.jurisdiction(),
            jurisdiction_disclaimer: self
                .disclaimer
                .cross_border(target.jurisdiction())
                .to_string(),
            reviewer_location: self.disclaimer.reviewer_location.clone(),
            meta: self.meta.clone(),
        }
    }

    fn score_robots(&self, origin: &str, robots: &ProbeResult) -> ComponentScore {
        let detail = self.detail(ComponentKey::Robots, Endpoint::Robots.url(origin), robots);

        if robots.is_transport_failure() || robots.body().is_empty() {
            return self.component(
                ComponentKey::Robots,
                false,
                "robots.txt unreachable or empty",
                detail,
            );
        }

        let body = robots.body().to_lowercase();
        if body.contains("ucp") || body.contains(".well-known/ucp") {
            self.component(
                ComponentKey::Robots,
                true,
                "UCP reference found in robots.txt",
                detail,
            )
        } else {
            self.component(
                ComponentKey::Robots,
                false,
                "No UCP directive in robots.txt",
                detail,
            )
        }
    }

    fn score_well_known(&self, origin: &str, well_known: &ProbeResult) -> ComponentScore {
        let key = ComponentKey::WellKnownConfig;
        let url = Endpoint::WellKnownConfig.url(origin);

        if well_known.is_transport_failure() || well_known.status_code() == 0 {
            return self.component(
                key,
                false,
                "UCP config unreachable (timeout or error)",
                self.detail(key, url, well_known),
            );
        }

        let status = well_known.status_code();
        if status != 200 {
            return self.component(
                key,
                false,
                format!("UCP config missing or blocked (HTTP {status})"),
                self.detail(key, url, well_known),
            );
        }

        let is_object = match serde_json::from_str::<serde_json::Value>(well_known.body()) {
            Ok(value) => value.is_object(),
            Err(e) => {
                tracing::debug!("JSON parsing failed for UCP config: {}", e);
                false
            }
        };

        let detail = format!(
            "{}; JSON: {}",
            self.detail(key, url, well_known),
            if is_object { "valid" } else { "invalid/unknown" }
        );

        if is_object {
            self.component(key, true, "UCP config found (valid JSON)", detail)
        } else {
            self.component(
                key,
                false,
                "UCP config found but invalid (JSON validation error)",
                detail,
            )
        }
    }

    fn score_headers(&self, origin: &str, homepage: &ProbeResult) -> ComponentScore {
        let key = ComponentKey::Headers;
        let detail = self.detail(key, Endpoint::Homepage.url(origin), homepage);

        if homepage.is_transport_failure() || homepage.status_code() == 0 {
            return self.component(
                key,
                false,
                "Homepage unreachable (timeout or error)",
                detail,
            );
        }

        let status = homepage.status_code();
        if !(200..400).contains(&status) {
            return self.component(
                key,
                false,
                format!("Homepage returned unexpected status (HTTP {status})"),
                detail,
            );
        }

        let headers = serialize_headers(homepage).to_lowercase();
        if headers.contains("ucp") || headers.contains("universal-content-protocol") {
            self.component(key, true, "UCP-related headers detected", detail)
        } else {
            self.component(key, false, "No UCP-related headers detected", detail)
        }
    }

    fn component(
        &self,
        key: ComponentKey,
        passed: bool,
        finding: impl Into<String>,
        endpoint_detail: String,
    ) -> ComponentScore {
        let weight = self.scoring.weights.weight(key);
        let awarded_score = if passed { weight } else { 0 };
        let finding = finding.into();

        tracing::debug!(component = %key, awarded_score, "{}", finding);

        ComponentScore {
            key,
            label: self.scoring.components.get(key).label.clone(),
            weight,
            awarded_score,
            passed: awarded_score > 0,
            finding,
            endpoint_detail,
        }
    }

    fn detail(&self, key: ComponentKey, url: String, result: &ProbeResult) -> String {
        let status = match result.status_code() {
            0 => "N/A".to_string(),
            code => code.to_string(),
        };
        let mut detail = format!(
            "{}. Endpoint: {url}; Status: {status}",
            self.scoring.components.get(key).description
        );
        if let Some(error) = result.transport_error() {
            detail.push_str("; Error: ");
            detail.push_str(error);
        }
        detail
    }
}

/// Flatten the header set into one searchable blob, one `name: value` per line.
fn serialize_headers(result: &ProbeResult) -> String {
    result
        .headers()
        .iter()
        .map(|(name, value)| format!("{name}: {value}"))
        .collect::<Vec<_>>()
        .join("\n")
}
