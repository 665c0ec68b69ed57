//! Shared types used across the UCP auditor.
//!
//! This module defines the small enums and newtypes that the scanner, the
//! scorer and the report consumers agree on.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Best-effort jurisdiction guess derived from the top-level label of a hostname.
///
/// This is a static heuristic, not geolocation. It only selects disclaimer wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Jurisdiction {
    /// Hostname ends in `.us` (or is exactly `us`)
    Us,
    /// Anything else
    Other,
}

impl Jurisdiction {
    /// Guess the jurisdiction from a lower-cased top-level label.
    #[must_use]
    pub fn from_top_level_label(label: &str) -> Self {
        if label == "us" {
            Self::Us
        } else {
            Self::Other
        }
    }

    /// Whether this guess selects the US cross-border wording.
    #[must_use]
    pub fn is_us(self) -> bool {
        matches!(self, Self::Us)
    }
}

impl fmt::Display for Jurisdiction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Us => write!(f, "US"),
            Self::Other => write!(f, "OTHER"),
        }
    }
}

/// The three independently scored compliance criteria, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ComponentKey {
    /// UCP directive in `/robots.txt`
    #[serde(rename = "robots")]
    Robots,
    /// JSON object served at `/.well-known/ucp`
    #[serde(rename = "ucpConfig")]
    WellKnownConfig,
    /// UCP-related response headers on the homepage
    #[serde(rename = "headers")]
    Headers,
}

impl ComponentKey {
    /// All components in the fixed order they appear in a report.
    pub const ALL: [ComponentKey; 3] = [Self::Robots, Self::WellKnownConfig, Self::Headers];

    /// Stable key used in configuration and serialized reports.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Robots => "robots",
            Self::WellKnownConfig => "ucpConfig",
            Self::Headers => "headers",
        }
    }
}

impl fmt::Display for ComponentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Overall verdict derived from the aggregate score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComplianceStatus {
    /// Aggregate score at or above the compliant threshold
    Compliant,
    /// Aggregate score at or above the partial threshold
    Partial,
    /// Everything below the partial threshold
    NonCompliant,
}

impl fmt::Display for ComplianceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Compliant => write!(f, "COMPLIANT"),
            Self::Partial => write!(f, "PARTIAL"),
            Self::NonCompliant => write!(f, "NON_COMPLIANT"),
        }
    }
}

/// Wrapper around `chrono::DateTime<Utc>` for consistent timestamp handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Create a timestamp representing the current moment.
    #[must_use]
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Format as RFC3339 string.
    #[must_use]
    pub fn to_rfc3339(&self) -> String {
        self.0.to_rfc3339()
    }

    /// Unix timestamp in seconds.
    #[must_use]
    pub fn timestamp(&self) -> i64 {
        self.0.timestamp()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_rfc3339())
    }
}
