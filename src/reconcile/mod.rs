//! Reconciler: builds the universe of upstream advisory links, subtracts
//! local coverage and curated exclusions, validates what is left against the
//! NVD, and decides pass/fail.
//!
//! The five stages run strictly in order with no branching back:
//! collect → match_local → apply_exclusions → validate_cves → decide.
//! Each stage is a function over the working link map so it can be tested
//! in isolation.

use std::collections::BTreeMap;

use anyhow::{Context, Result, bail};

use crate::config::ExclusionSet;
use crate::domain::{Advisory, LinkStatus};
use crate::nvd::{CveEvaluator, Pacer};
use crate::store::LocatedRecord;

/// Working set of one reconciliation run, keyed by advisory link. A BTreeMap
/// keeps reported links deterministically ordered.
pub type LinkMap = BTreeMap<String, LinkStatus>;

/// Outcome of a run. A non-empty `unaccounted` list is the designed failure
/// mode of the tool, distinct from the fatal abort cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Links still unexplained after all reductions, sorted.
    pub unaccounted: Vec<String>,
}

impl ReconcileReport {
    pub fn is_clean(&self) -> bool {
        self.unaccounted.is_empty()
    }
}

/// Stage 1: seed the working map from the fetched advisories, every link
/// still needed.
pub fn collect(advisories: Vec<Advisory>) -> LinkMap {
    advisories
        .into_iter()
        .map(|a| (a.link, LinkStatus::new(a.cve)))
        .collect()
}

/// Stage 2: flip `still_needed` off for every link covered by a local
/// record.
///
/// A record whose link is unknown upstream is a referential inconsistency
/// and aborts the run immediately, naming the offending file.
pub fn match_local(links: &mut LinkMap, records: &[LocatedRecord]) -> Result<()> {
    for located in records {
        match links.get_mut(&located.record.link) {
            Some(status) => status.still_needed = false,
            None => bail!(
                "Unknown link {} - {}",
                located.record.link,
                located.path.display()
            ),
        }
    }
    Ok(())
}

/// Stage 3: delete every excluded link from the map, regardless of its
/// current status. Idempotent and order-independent.
pub fn apply_exclusions(links: &mut LinkMap, exclusions: &ExclusionSet) {
    for link in exclusions.iter() {
        links.remove(link);
    }
}

/// Stage 4: for each remaining needed link carrying a CVE identifier, ask
/// the evaluator whether the CVE has been substantively evaluated. Links
/// whose CVE is not yet evaluated are dropped from the map (treated as
/// resolved, not a failure).
///
/// Calls are strictly sequential; the pacer blocks before each one to honor
/// the NVD rate limit.
pub async fn validate_cves(
    links: &mut LinkMap,
    evaluator: &impl CveEvaluator,
    pacer: &mut Pacer,
) -> Result<()> {
    let candidates: Vec<(String, String)> = links
        .iter()
        .filter(|(_, status)| status.still_needed)
        .filter_map(|(link, status)| {
            status.cve.as_ref().map(|cve| (link.clone(), cve.clone()))
        })
        .collect();

    for (link, cve) in candidates {
        pacer.admit().await;
        let evaluated = evaluator
            .is_evaluated(&cve)
            .with_context(|| format!("Could not validate NVD CVE {cve}"))?;
        if !evaluated {
            tracing::debug!(%link, %cve, "CVE not yet evaluated, dropping link");
            links.remove(&link);
        }
    }
    Ok(())
}

/// Stage 5: anything still needed is an unaccounted-for advisory.
pub fn decide(links: &LinkMap) -> ReconcileReport {
    let unaccounted = links
        .iter()
        .filter(|(_, status)| status.still_needed)
        .map(|(link, _)| link.clone())
        .collect();
    ReconcileReport { unaccounted }
}

/// Run all five stages in order over already-fetched inputs.
pub async fn run(
    advisories: Vec<Advisory>,
    records: &[LocatedRecord],
    exclusions: &ExclusionSet,
    evaluator: &impl CveEvaluator,
    pacer: &mut Pacer,
) -> Result<ReconcileReport> {
    let mut links = collect(advisories);
    tracing::info!(advisories = links.len(), "collected upstream advisory links");

    match_local(&mut links, records)?;
    apply_exclusions(&mut links, exclusions);
    validate_cves(&mut links, evaluator, pacer).await?;

    Ok(decide(&links))
}
