//! UCP Core - Foundation crate for the UCP compliance auditor.
//!
//! This crate provides the shared types, error handling and configuration
//! management that the scanner and the command-line shell depend on.
//!
//! # Modules
//!
//! - [`error`] - Configuration errors using thiserror
//! - [`config`] - TOML-based configuration (weights, thresholds, copy, transport settings)
//! - [`types`] - Shared enums and newtypes (`Jurisdiction`, `ComponentKey`, `ComplianceStatus`, `Timestamp`)
//!
//! # Example
//!
//! ```rust
//! use ucp_core::{AppConfig, ComplianceStatus};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::default();
//! config.validate()?;
//!
//! let status = config.scoring.thresholds.classify(70);
//! assert_eq!(status, ComplianceStatus::Compliant);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use config::{
    AppConfig, ComponentCopy, ComponentsCopy, DisclaimerConfig, ReportMeta, ScanningConfig,
    ScoringConfig, ScoringThresholds, ScoringWeights, StatusLabels,
};
pub use error::{ConfigError, ConfigResult};
pub use types::{ComplianceStatus, ComponentKey, Jurisdiction, Timestamp};
