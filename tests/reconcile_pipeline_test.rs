//! End-to-end reconciliation scenarios
//!
//! Each scenario drives the full pipeline with a fixture record directory
//! and a scripted NVD evaluator, covering the pass/fail decision matrix:
//! drift reported, drift explained by an exclusion, drift explained by an
//! unevaluated CVE, and the fatal unknown-record abort.

use std::cell::RefCell;
use std::fs;
use std::path::Path;
use std::time::Duration;

use advisory_recon::config::ExclusionSet;
use advisory_recon::domain::Advisory;
use advisory_recon::nvd::{CveEvaluator, NvdError, Pacer};
use advisory_recon::reconcile;
use advisory_recon::store::RecordStore;

const L1: &str = "https://github.com/dotnet/announcements/issues/1";
const L2: &str = "https://github.com/aspnet/Announcements/issues/2";

/// Evaluator with scripted verdicts that records every call it receives.
struct ScriptedEvaluator {
    verdicts: Vec<(&'static str, bool)>,
    calls: RefCell<Vec<String>>,
}

impl ScriptedEvaluator {
    fn new(verdicts: Vec<(&'static str, bool)>) -> Self {
        Self {
            verdicts,
            calls: RefCell::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl CveEvaluator for ScriptedEvaluator {
    fn is_evaluated(&self, cve: &str) -> Result<bool, NvdError> {
        self.calls.borrow_mut().push(cve.to_string());
        self.verdicts
            .iter()
            .find(|(id, _)| *id == cve)
            .map(|(_, verdict)| Ok(*verdict))
            .unwrap_or_else(|| {
                Err(NvdError::Ambiguous {
                    cve: cve.to_string(),
                    count: 0,
                })
            })
    }
}

fn upstream_advisories() -> Vec<Advisory> {
    vec![
        Advisory {
            link: L1.to_string(),
            cve: Some("CVE-2020-0001".to_string()),
        },
        Advisory {
            link: L2.to_string(),
            cve: None,
        },
    ]
}

fn write_record(dir: &Path, name: &str, link: &str) {
    let content = format!(
        "id: {}\nlink: {}\naffectedPackages:\n  - vulnerable: true\n    cpe23Uri: \"cpe:2.3:a:microsoft:.net_core:*:*:*:*:*:*:*:*\"\n",
        name.trim_end_matches(".yaml"),
        link
    );
    fs::write(dir.join(name), content).unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_uncovered_link_with_evaluated_cve_fails_the_run() {
    let dir = tempfile::tempdir().unwrap();
    write_record(dir.path(), "CVE-2019-9999.yaml", L2);
    let records = RecordStore::new(dir.path()).load().unwrap();

    let evaluator = ScriptedEvaluator::new(vec![("CVE-2020-0001", true)]);
    let mut pacer = Pacer::new(Duration::from_secs(6));

    let report = reconcile::run(
        upstream_advisories(),
        &records,
        &ExclusionSet::empty(),
        &evaluator,
        &mut pacer,
    )
    .await
    .unwrap();

    assert_eq!(report.unaccounted, vec![L1.to_string()]);
    assert!(!report.is_clean());
    assert_eq!(evaluator.calls(), vec!["CVE-2020-0001".to_string()]);
}

#[tokio::test(start_paused = true)]
async fn test_excluded_link_passes_without_an_nvd_call() {
    let dir = tempfile::tempdir().unwrap();
    write_record(dir.path(), "CVE-2019-9999.yaml", L2);
    let records = RecordStore::new(dir.path()).load().unwrap();

    let evaluator = ScriptedEvaluator::new(vec![("CVE-2020-0001", true)]);
    let mut pacer = Pacer::new(Duration::from_secs(6));
    let exclusions = ExclusionSet::from_links(vec![L1.to_string()]);

    let report = reconcile::run(
        upstream_advisories(),
        &records,
        &exclusions,
        &evaluator,
        &mut pacer,
    )
    .await
    .unwrap();

    assert!(report.is_clean());
    // The exclusion removes the link before CVE validation runs.
    assert!(evaluator.calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_unevaluated_cve_resolves_the_link() {
    let dir = tempfile::tempdir().unwrap();
    write_record(dir.path(), "CVE-2019-9999.yaml", L2);
    let records = RecordStore::new(dir.path()).load().unwrap();

    let evaluator = ScriptedEvaluator::new(vec![("CVE-2020-0001", false)]);
    let mut pacer = Pacer::new(Duration::from_secs(6));

    let report = reconcile::run(
        upstream_advisories(),
        &records,
        &ExclusionSet::empty(),
        &evaluator,
        &mut pacer,
    )
    .await
    .unwrap();

    assert!(report.is_clean());
    assert_eq!(evaluator.calls(), vec!["CVE-2020-0001".to_string()]);
}

#[tokio::test(start_paused = true)]
async fn test_unknown_record_link_aborts_before_any_nvd_call() {
    let dir = tempfile::tempdir().unwrap();
    write_record(dir.path(), "CVE-2019-9999.yaml", L2);
    write_record(
        dir.path(),
        "CVE-2099-0001.yaml",
        "https://github.com/dotnet/announcements/issues/404",
    );
    let records = RecordStore::new(dir.path()).load().unwrap();

    let evaluator = ScriptedEvaluator::new(vec![("CVE-2020-0001", true)]);
    let mut pacer = Pacer::new(Duration::from_secs(6));

    let err = reconcile::run(
        upstream_advisories(),
        &records,
        &ExclusionSet::empty(),
        &evaluator,
        &mut pacer,
    )
    .await
    .unwrap_err();

    assert!(err.to_string().contains("issues/404"));
    assert!(err.to_string().contains("CVE-2099-0001.yaml"));
    assert!(evaluator.calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_ambiguous_cve_lookup_aborts_the_run() {
    let dir = tempfile::tempdir().unwrap();
    write_record(dir.path(), "CVE-2019-9999.yaml", L2);
    let records = RecordStore::new(dir.path()).load().unwrap();

    // Evaluator has no verdict for the CVE and reports it ambiguous.
    let evaluator = ScriptedEvaluator::new(Vec::new());
    let mut pacer = Pacer::new(Duration::from_secs(6));

    let err = reconcile::run(
        upstream_advisories(),
        &records,
        &ExclusionSet::empty(),
        &evaluator,
        &mut pacer,
    )
    .await
    .unwrap_err();

    assert!(err.to_string().contains("CVE-2020-0001"));
}
