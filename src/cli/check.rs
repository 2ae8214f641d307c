//! Check command implementation

use std::path::Path;

use anyhow::Result;

use advisory_recon::config::{ExclusionSet, RunConfig};
use advisory_recon::github::IssueClient;
use advisory_recon::nvd::{self, NvdClient, Pacer};
use advisory_recon::reconcile::{self, ReconcileReport};
use advisory_recon::store::RecordStore;

/// Run one full reconciliation pass: fetch upstream advisories, subtract
/// local coverage and exclusions, validate leftover CVEs against the NVD,
/// and print every unaccounted-for link.
pub async fn check_command(records_dir: &Path) -> Result<ReconcileReport> {
    let config = RunConfig::with_defaults(records_dir);
    let exclusions = ExclusionSet::builtin();

    let client = IssueClient::new();
    let advisories = client.fetch_advisories(&config.repos)?;

    let records = RecordStore::new(&config.records_dir).load()?;
    tracing::info!(records = records.len(), "loaded local advisory records");

    let evaluator = NvdClient::new(config.nvd_api_key.clone());
    let mut pacer = Pacer::new(nvd::rate_limit_interval(config.nvd_api_key.is_some()));

    let report =
        reconcile::run(advisories, &records, &exclusions, &evaluator, &mut pacer).await?;

    if report.is_clean() {
        tracing::info!("All upstream advisories are accounted for");
    } else {
        for link in &report.unaccounted {
            tracing::error!("Unaccounted for issue: {link}");
        }
    }

    Ok(report)
}
