use serde::{Deserialize, Serialize};

/// A locally tracked advisory record as stored on disk (one YAML file each).
///
/// Reconciliation only reads `link`; the remaining fields are carried so the
/// `lint` command can validate record completeness.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvisoryRecord {
    pub id: String,
    pub link: String,
    #[serde(default)]
    pub affected_packages: Vec<CpeMatch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// CVSS impact block copied from the NVD feed; opaque to this tool.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact: Option<serde_yaml::Value>,
}

/// One affected-package entry in NVD CPE match form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CpeMatch {
    #[serde(default)]
    pub vulnerable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpe23_uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_start_including: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_start_excluding: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_end_including: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_end_excluding: Option<String>,
}
