//! Configuration management for the UCP auditor.
//!
//! Provides TOML-based configuration with XDG-compliant paths and
//! environment variable overrides. Scoring policy (weights, thresholds,
//! labels and copy) lives here so it can change without touching the
//! scoring algorithm.

use crate::error::{ConfigError, ConfigResult};
use crate::types::{ComplianceStatus, ComponentKey, Jurisdiction};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main application configuration.
///
/// This is loaded from `~/.config/ucp-audit/config.toml` (or platform equivalent).
/// If the file doesn't exist, default values are used. Every loader validates
/// the result before returning it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Report metadata
    pub meta: ReportMeta,
    /// Probe transport settings
    pub scanning: ScanningConfig,
    /// Scoring policy
    pub scoring: ScoringConfig,
    /// Disclaimer copy
    pub disclaimer: DisclaimerConfig,
}

impl AppConfig {
    /// Load configuration from the default location, falling back to defaults if not found.
    ///
    /// # Errors
    /// Returns error if:
    /// - Config directory cannot be determined
    /// - File exists but cannot be read
    /// - File contents are not valid TOML
    /// - The resulting configuration fails validation
    pub fn load() -> ConfigResult<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::debug!("Config file not found, using defaults");
            let config = Self::default();
            config.validate()?;
            Ok(config)
        }
    }

    /// Load configuration from an explicit file.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.display().to_string(),
            });
        }

        tracing::debug!("Loading config from {}", path.display());
        let contents = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with environment variable overrides.
    ///
    /// Supports the following environment variables:
    /// - `UCP_TIMEOUT_SECS`: Override the per-probe timeout
    /// - `UCP_USER_AGENT`: Override the probe user agent
    pub fn load_with_env() -> ConfigResult<Self> {
        let mut config = Self::load()?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply overrides from a key lookup (the environment, in production) and revalidate.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("UCP_TIMEOUT_SECS") {
            let secs: u64 = val.trim().parse().map_err(|_| {
                ConfigError::invalid("UCP_TIMEOUT_SECS", format!("not a number: '{val}'"))
            })?;
            self.scanning.timeout_secs = secs;
            tracing::debug!("Override scanning.timeout_secs from env: {}", secs);
        }

        if let Some(val) = lookup("UCP_USER_AGENT") {
            tracing::debug!("Override scanning.user_agent from env");
            self.scanning.user_agent = val;
        }

        self.validate()
    }

    /// Save configuration to disk.
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        let config_dir = path
            .parent()
            .ok_or_else(|| ConfigError::invalid("config_path", "no parent directory"))?;

        fs::create_dir_all(config_dir)?;
        tracing::debug!("Saving config to {}", path.display());

        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Get the path to the configuration file.
    ///
    /// Uses XDG base directories: `~/.config/ucp-audit/config.toml`
    pub fn config_path() -> ConfigResult<PathBuf> {
        let dirs =
            ProjectDirs::from("org", "ucp", "ucp-audit").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Check every invariant the scorer relies on.
    ///
    /// Weights must sum to exactly 100 so the aggregate score equals the sum of
    /// the component scores without clamping.
    pub fn validate(&self) -> ConfigResult<()> {
        self.scanning.validate()?;
        self.scoring.validate()
    }
}

/// Report metadata carried into every score report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportMeta {
    /// Report title
    pub title: String,
    /// Report subtitle
    pub subtitle: String,
    /// Name of the generating tool
    pub generator_name: String,
    /// Methodology version
    pub version: String,
}

impl Default for ReportMeta {
    fn default() -> Self {
        Self {
            title: "UCP Compliance Audit Report".to_string(),
            subtitle: "Universal Content Protocol Technical Assessment".to_string(),
            generator_name: "UCP Compliance Scanner".to_string(),
            version: "2.4".to_string(),
        }
    }
}

/// Probe transport settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanningConfig {
    /// Per-probe timeout in seconds
    pub timeout_secs: u64,
    /// User agent string sent with every probe
    pub user_agent: String,
    /// Whether redirects are followed
    pub follow_redirects: bool,
    /// Maximum redirect hops when following
    pub max_redirects: usize,
}

impl ScanningConfig {
    /// Per-probe timeout as a `Duration`.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    fn validate(&self) -> ConfigResult<()> {
        if self.timeout_secs == 0 {
            return Err(ConfigError::invalid(
                "scanning.timeout_secs",
                "must be greater than 0",
            ));
        }
        if self.user_agent.trim().is_empty() {
            return Err(ConfigError::invalid("scanning.user_agent", "must not be empty"));
        }
        Ok(())
    }
}

impl Default for ScanningConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36"
                .to_string(),
            follow_redirects: true,
            max_redirects: 10,
        }
    }
}

/// Scoring policy: weights, thresholds and the copy attached to each result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Points awarded per passing component
    pub weights: ScoringWeights,
    /// Status classification thresholds
    pub thresholds: ScoringThresholds,
    /// Display labels per status
    pub labels: StatusLabels,
    /// Label and description per component
    pub components: ComponentsCopy,
}

impl ScoringConfig {
    fn validate(&self) -> ConfigResult<()> {
        self.weights.validate()?;
        self.thresholds.validate()?;
        self.labels.validate()?;
        self.components.validate()
    }
}

/// Component weights.
///
/// No container-level default: once `[scoring.weights]` is present, every
/// weight must be spelled out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringWeights {
    /// Robots.txt directive
    pub robots: u32,
    /// Well-known config file
    pub ucp_config: u32,
    /// Homepage headers
    pub headers: u32,
}

impl ScoringWeights {
    /// Weight of a single component.
    #[must_use]
    pub fn weight(&self, key: ComponentKey) -> u32 {
        match key {
            ComponentKey::Robots => self.robots,
            ComponentKey::WellKnownConfig => self.ucp_config,
            ComponentKey::Headers => self.headers,
        }
    }

    /// Sum of all weights.
    #[must_use]
    pub fn total(&self) -> u32 {
        ComponentKey::ALL.iter().map(|key| self.weight(*key)).sum()
    }

    fn validate(&self) -> ConfigResult<()> {
        for key in ComponentKey::ALL {
            let weight = self.weight(key);
            if weight > 100 {
                return Err(ConfigError::invalid(
                    &format!("scoring.weights.{}", field_name(key)),
                    format!("must be between 0 and 100, got {weight}"),
                ));
            }
        }

        let total = self.total();
        if total != 100 {
            return Err(ConfigError::invalid(
                "scoring.weights",
                format!("must sum to 100, got {total}"),
            ));
        }
        Ok(())
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            robots: 20,
            ucp_config: 50,
            headers: 30,
        }
    }
}

/// Ordered status thresholds. Both bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringThresholds {
    /// Minimum aggregate score for `Compliant`
    pub compliant_min: u32,
    /// Minimum aggregate score for `Partial`
    pub partial_min: u32,
}

impl ScoringThresholds {
    /// Classify an aggregate score.
    #[must_use]
    pub fn classify(&self, score: u32) -> ComplianceStatus {
        if score >= self.compliant_min {
            ComplianceStatus::Compliant
        } else if score >= self.partial_min {
            ComplianceStatus::Partial
        } else {
            ComplianceStatus::NonCompliant
        }
    }

    fn validate(&self) -> ConfigResult<()> {
        if self.compliant_min > 100 {
            return Err(ConfigError::invalid(
                "scoring.thresholds.compliant_min",
                format!("must be at most 100, got {}", self.compliant_min),
            ));
        }
        if self.partial_min > self.compliant_min {
            return Err(ConfigError::invalid(
                "scoring.thresholds.partial_min",
                format!(
                    "must not exceed compliant_min ({}), got {}",
                    self.compliant_min, self.partial_min
                ),
            ));
        }
        Ok(())
    }
}

impl Default for ScoringThresholds {
    fn default() -> Self {
        Self {
            compliant_min: 70,
            partial_min: 50,
        }
    }
}

/// Display labels per compliance status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusLabels {
    /// Label for `Compliant`
    pub compliant: String,
    /// Label for `Partial`
    pub partial: String,
    /// Label for `NonCompliant`
    pub non_compliant: String,
}

impl StatusLabels {
    /// Label for a status.
    #[must_use]
    pub fn label(&self, status: ComplianceStatus) -> &str {
        match status {
            ComplianceStatus::Compliant => &self.compliant,
            ComplianceStatus::Partial => &self.partial,
            ComplianceStatus::NonCompliant => &self.non_compliant,
        }
    }

    fn validate(&self) -> ConfigResult<()> {
        for (field, value) in [
            ("compliant", &self.compliant),
            ("partial", &self.partial),
            ("non_compliant", &self.non_compliant),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::invalid(
                    &format!("scoring.labels.{field}"),
                    "must not be empty",
                ));
            }
        }
        Ok(())
    }
}

impl Default for StatusLabels {
    fn default() -> Self {
        Self {
            compliant: "UCP COMPLIANT".to_string(),
            partial: "PARTIALLY COMPLIANT".to_string(),
            non_compliant: "NON-COMPLIANT".to_string(),
        }
    }
}

/// Label and description for one component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentCopy {
    /// Short component name
    pub label: String,
    /// What the component checks
    pub description: String,
}

impl ComponentCopy {
    fn new(label: &str, description: &str) -> Self {
        Self {
            label: label.to_string(),
            description: description.to_string(),
        }
    }
}

/// Copy for all three components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComponentsCopy {
    /// Robots.txt copy
    pub robots: ComponentCopy,
    /// Well-known config copy
    pub ucp_config: ComponentCopy,
    /// Headers copy
    pub headers: ComponentCopy,
}

impl ComponentsCopy {
    /// Copy for a single component.
    #[must_use]
    pub fn get(&self, key: ComponentKey) -> &ComponentCopy {
        match key {
            ComponentKey::Robots => &self.robots,
            ComponentKey::WellKnownConfig => &self.ucp_config,
            ComponentKey::Headers => &self.headers,
        }
    }

    fn validate(&self) -> ConfigResult<()> {
        for key in ComponentKey::ALL {
            if self.get(key).label.trim().is_empty() {
                return Err(ConfigError::invalid(
                    &format!("scoring.components.{}.label", field_name(key)),
                    "must not be empty",
                ));
            }
        }
        Ok(())
    }
}

impl Default for ComponentsCopy {
    fn default() -> Self {
        Self {
            robots: ComponentCopy::new(
                "Robots.txt UCP directive",
                "Presence of UCP references in robots.txt",
            ),
            ucp_config: ComponentCopy::new(
                "UCP configuration file",
                "Accessibility and format of /.well-known/ucp",
            ),
            headers: ComponentCopy::new(
                "UCP HTTP headers",
                "Presence of UCP-related headers in HTTP response",
            ),
        }
    }
}

/// Privacy and cross-border disclaimer copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisclaimerConfig {
    /// Section title
    pub title: String,
    /// Where the review is executed from
    pub reviewer_location: String,
    /// Fixed notice paragraphs
    pub paragraphs: Vec<String>,
    /// Cross-border note for US-facing sites
    pub cross_border_us: String,
    /// Cross-border note for everything else
    pub cross_border_generic: String,
}

impl DisclaimerConfig {
    /// Select the cross-border note for a jurisdiction guess.
    #[must_use]
    pub fn cross_border(&self, jurisdiction: Jurisdiction) -> &str {
        match jurisdiction {
            Jurisdiction::Us => &self.cross_border_us,
            Jurisdiction::Other => &self.cross_border_generic,
        }
    }
}

impl Default for DisclaimerConfig {
    fn default() -> Self {
        Self {
            title: "Privacy & data protection notice".to_string(),
            reviewer_location: "Netherlands (EU)".to_string(),
            paragraphs: vec![
                "GDPR alignment: This automated technical assessment is designed to follow \
                 data minimization and purpose limitation principles."
                    .to_string(),
                "No data storage: The service is intended to run with zero data retention \
                 (in-memory processing only) and does not store site content or results \
                 after the report is generated."
                    .to_string(),
                "Automated processing: The scan is fully automated and checks only publicly \
                 accessible endpoints (robots.txt, /.well-known/ucp, HTTP headers)."
                    .to_string(),
                "Informational use: This report is provided for informational purposes and \
                 should be complemented with your own validation."
                    .to_string(),
            ],
            cross_border_us: "Cross-border note: This assessment is executed from the \
                              Netherlands (EU) while reviewing a US-facing site. The scan is \
                              limited to public technical endpoints and performed in a \
                              compliance-oriented manner."
                .to_string(),
            cross_border_generic: "Cross-border note: This assessment is executed from the \
                                   Netherlands (EU) while reviewing websites hosted in other \
                                   jurisdictions. The scan is limited to public technical \
                                   endpoints and performed in a compliance-oriented manner."
                .to_string(),
        }
    }
}

fn field_name(key: ComponentKey) -> &'static str {
    match key {
        ComponentKey::Robots => "robots",
        ComponentKey::WellKnownConfig => "ucp_config",
        ComponentKey::Headers => "headers",
    }
}
