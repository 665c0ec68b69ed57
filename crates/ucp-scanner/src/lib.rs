//! UCP Scanner - Probe-and-score pipeline for Universal Content Protocol audits.
//!
//! This crate turns a user-supplied URL into a deterministic compliance report.
//! It normalizes the input to a bare origin, probes three well-known endpoints
//! concurrently and scores the responses against an injected policy.
//!
//! # Features
//!
//! - URL normalization that fails explicitly instead of guessing a host
//! - Concurrent single-attempt probes, each with its own deadline
//! - Transport failures reported as findings, never as errors
//! - Pure, deterministic scoring with binary per-component weights
//!
//! # Example
//!
//! ```rust,ignore
//! use ucp_core::AppConfig;
//! use ucp_scanner::ScanOrchestrator;
//!
//! let config = AppConfig::load_with_env()?;
//! let orchestrator = ScanOrchestrator::from_config(&config)?;
//!
//! let report = orchestrator.scan("example.com").await?;
//! println!("{} ({})", report.aggregate_score, report.status_label);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

#[allow(missing_docs)]
pub mod error;
#[allow(missing_docs)]
pub mod normalizer;
pub mod orchestrator;
#[allow(missing_docs)]
pub mod probe;
pub mod scorer;

// Re-export commonly used types
pub use error::{NormalizationError, Result, ScanError};
pub use normalizer::{normalize, NormalizedTarget};
pub use orchestrator::{ProbeSet, ScanOrchestrator};
pub use probe::{Endpoint, EndpointProber, HttpProber, ProbeResult};
pub use scorer::{ComponentScore, ScoreReport, Scorer};
