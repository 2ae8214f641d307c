//! Lint command implementation
//!
//! Validates that every local record file parses and carries the fields a
//! complete record needs. Meant to run in CI next to `check`.

use std::path::Path;

use anyhow::{Result, ensure};

use advisory_recon::store::RecordStore;

/// Parse every record under `records_dir` and fail on the first incomplete
/// one.
pub async fn lint_command(records_dir: &Path) -> Result<()> {
    let records = RecordStore::new(records_dir).load()?;

    for located in &records {
        let record = &located.record;
        let path = located.path.display();
        ensure!(!record.id.trim().is_empty(), "Record {path} has an empty id");
        ensure!(
            !record.link.trim().is_empty(),
            "Record {path} has an empty link"
        );
        ensure!(
            !record.affected_packages.is_empty(),
            "Record {path} has no affected packages"
        );
    }

    println!("{} record(s) OK", records.len());
    Ok(())
}
