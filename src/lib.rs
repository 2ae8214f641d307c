//! advisory-recon
//!
//! Reconciles a local directory of vulnerability-advisory records against
//! two external sources: security-advisory issues in the upstream .NET
//! announcement repositories on GitHub, and the NVD CVE lookup API.
//!
//! The tool detects drift in both directions: upstream advisories with no
//! corresponding local record, and local records whose CVE the NVD has not
//! substantively evaluated yet. Drift fails the run with a non-zero exit
//! status, which is how CI consumes it.

pub mod config;
pub mod domain;
pub mod github;
pub mod nvd;
pub mod reconcile;
pub mod store;

pub use domain::*;
