//! CVE Evaluator: queries the NVD CVE API 2.0 and reports whether a CVE has
//! been substantively evaluated (carries at least one severity metric).
//!
//! NVD rate limits requests to 5 per rolling 30-second window, or 50 per
//! window with an API key. See <https://nvd.nist.gov/developers/start-here>.

pub mod schema;

use std::time::Duration;

use tokio::time::Instant;

use schema::CveResponse;

/// NVD's CVE lookup endpoint.
const NVD_API_URL: &str = "https://services.nvd.nist.gov/rest/json/cves/2.0";

const USER_AGENT: &str = "advisory-recon";

/// Rolling window NVD enforces its request quota over.
const RATE_WINDOW: Duration = Duration::from_secs(30);

#[derive(Debug, thiserror::Error)]
pub enum NvdError {
    #[error("NVD request failed: {0}")]
    Transport(#[source] Box<ureq::Error>),

    #[error("NVD API returned status {status}: {body:?}")]
    Status { status: u16, body: String },

    #[error("Failed to decode NVD response: {0}")]
    Decode(#[from] std::io::Error),

    /// Should never happen for a well-formed CVE id; treated as an upstream
    /// data anomaly and fatal to the run.
    #[error("Unexpected number of CVE items ({count}) for {cve}")]
    Ambiguous { cve: String, count: u64 },
}

/// Seam between the reconciler and the vulnerability database, so the
/// pipeline is testable without the network.
pub trait CveEvaluator {
    /// True if the CVE exists in the database and carries at least one
    /// severity metric block with scoring data.
    fn is_evaluated(&self, cve: &str) -> Result<bool, NvdError>;
}

/// Blocking NVD client. The optional API key raises the permitted request
/// rate only; it never changes decision logic.
pub struct NvdClient {
    agent: ureq::Agent,
    api_key: Option<String>,
}

impl NvdClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            agent: ureq::Agent::new(),
            api_key,
        }
    }
}

impl CveEvaluator for NvdClient {
    fn is_evaluated(&self, cve: &str) -> Result<bool, NvdError> {
        let mut request = self
            .agent
            .get(NVD_API_URL)
            .query("cveId", cve)
            .set("User-Agent", USER_AGENT);
        if let Some(key) = &self.api_key {
            request = request.set("apiKey", key);
        }

        let response = match request.call() {
            Ok(response) => response,
            Err(ureq::Error::Status(status, response)) => {
                return Err(NvdError::Status {
                    status,
                    body: response.into_string().unwrap_or_default(),
                });
            }
            Err(err) => return Err(NvdError::Transport(Box::new(err))),
        };

        let result: CveResponse = response.into_json()?;
        evaluate_response(cve, &result)
    }
}

/// Decision table over a decoded lookup response:
/// zero results → not evaluated; more than one → ambiguous (fatal); one
/// result → evaluated iff a severity metric block with scoring data exists.
fn evaluate_response(cve: &str, response: &CveResponse) -> Result<bool, NvdError> {
    if response.total_results == 0 {
        return Ok(false);
    }
    if response.total_results > 1 {
        return Err(NvdError::Ambiguous {
            cve: cve.to_string(),
            count: response.total_results,
        });
    }

    let evaluated = response
        .vulnerabilities
        .first()
        .and_then(|v| v.cve.metrics.as_ref())
        .is_some_and(|metrics| metrics.has_cvss_data());
    Ok(evaluated)
}

/// Interval between successive NVD requests so the rolling-window quota is
/// honored: 50 requests per 30s with an API key, 5 per 30s without.
pub fn rate_limit_interval(has_api_key: bool) -> Duration {
    if has_api_key {
        RATE_WINDOW / 50
    } else {
        RATE_WINDOW / 5
    }
}

/// Spaces sequential NVD calls by a fixed interval. The first call is
/// admitted immediately; every later call waits out the remainder of the
/// interval since the previous admission.
pub struct Pacer {
    interval: Duration,
    last: Option<Instant>,
}

impl Pacer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    /// Block until the next request is admitted.
    pub async fn admit(&mut self) {
        if let Some(last) = self.last {
            let elapsed = last.elapsed();
            if elapsed < self.interval {
                tokio::time::sleep(self.interval - elapsed).await;
            }
        }
        self.last = Some(Instant::now());
    }
}
