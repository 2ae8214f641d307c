//! Run configuration: repositories to scan, record directory, NVD credential

mod exclusions;

pub use exclusions::ExclusionSet;

use std::path::PathBuf;

use crate::domain::RepoRef;

/// Number of issues requested per page from the GitHub issues API. A page
/// with fewer items signals the last page.
pub const PAGE_SIZE: usize = 20;

/// Environment variable holding the optional NVD API key. Its presence only
/// raises the permitted NVD request rate; it never changes decision logic.
pub const NVD_API_KEY_VAR: &str = "NVD_API_KEY";

/// Everything one reconciliation run needs, resolved once at startup.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Upstream issue trackers to scan for security advisories.
    pub repos: Vec<RepoRef>,
    /// Root of the local advisory-record tree.
    pub records_dir: PathBuf,
    /// NVD API key, if supplied via the environment.
    pub nvd_api_key: Option<String>,
}

impl RunConfig {
    /// Build a config for the standard pair of .NET announcement repos.
    pub fn with_defaults(records_dir: impl Into<PathBuf>) -> Self {
        Self {
            repos: vec![
                RepoRef::new("dotnet", "announcements"),
                RepoRef::new("aspnet", "Announcements"),
            ],
            records_dir: records_dir.into(),
            nvd_api_key: std::env::var(NVD_API_KEY_VAR).ok(),
        }
    }
}
