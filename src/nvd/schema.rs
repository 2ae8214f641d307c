//! Subset of the NVD CVE API 2.0 response schema read by this tool.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CveResponse {
    pub total_results: u64,
    #[serde(default)]
    pub vulnerabilities: Vec<Vulnerability>,
}

#[derive(Debug, Deserialize)]
pub struct Vulnerability {
    pub cve: CveItem,
}

#[derive(Debug, Deserialize)]
pub struct CveItem {
    #[serde(default)]
    pub metrics: Option<Metrics>,
}

/// Severity metric blocks, one array per supported CVSS schema version.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    #[serde(default)]
    pub cvss_metric_v2: Vec<Metric>,
    #[serde(default)]
    pub cvss_metric_v30: Vec<Metric>,
    #[serde(default)]
    pub cvss_metric_v31: Vec<Metric>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metric {
    /// Present when the CVE carries actual CVSS scoring data.
    #[serde(default)]
    pub cvss_data: Option<serde_json::Value>,
}

impl Metrics {
    /// True if any metric block of any schema version carries scoring data.
    pub fn has_cvss_data(&self) -> bool {
        self.cvss_metric_v2
            .iter()
            .chain(&self.cvss_metric_v30)
            .chain(&self.cvss_metric_v31)
            .any(|m| m.cvss_data.is_some())
    }
}
