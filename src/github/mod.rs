//! Advisory Source: fetches labeled security-advisory issues from the
//! upstream GitHub repositories, paginating until exhausted.

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use crate::config::PAGE_SIZE;
use crate::domain::{Advisory, RepoRef};

const API_BASE: &str = "https://api.github.com";
const USER_AGENT: &str = "advisory-recon";

/// Issues whose trimmed title does not begin with this marker are not
/// security advisories and are skipped.
const TITLE_MARKER: &str = "Microsoft Security Advisory";

/// Label that upstream applies to advisory issues.
const SECURITY_LABEL: &str = "security";

static CVE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"CVE-\d{4}-\d{4,7}").expect("CVE regex must compile"));

/// The subset of the GitHub issue payload this tool reads.
#[derive(Debug, Deserialize)]
struct Issue {
    /// Canonical API URL of the issue (api.github.com form).
    url: String,
    title: String,
}

/// Blocking client for the GitHub issues API.
pub struct IssueClient {
    agent: ureq::Agent,
}

impl Default for IssueClient {
    fn default() -> Self {
        Self::new()
    }
}

impl IssueClient {
    pub fn new() -> Self {
        Self {
            agent: ureq::Agent::new(),
        }
    }

    /// Fetch the complete advisory set across all configured repositories.
    ///
    /// Any transport or decode error aborts the whole run; no partial
    /// results are produced.
    pub fn fetch_advisories(&self, repos: &[RepoRef]) -> Result<Vec<Advisory>> {
        let mut advisories = Vec::new();
        for repo in repos {
            let issues = self
                .list_security_issues(repo)
                .with_context(|| format!("Could not fetch issues for {repo}"))?;
            tracing::debug!(repo = %repo, issues = issues.len(), "fetched labeled issues");
            advisories.extend(issues.iter().filter_map(issue_to_advisory));
        }
        Ok(advisories)
    }

    /// List every issue labeled `security` in one repository. A page with
    /// fewer than `PAGE_SIZE` items signals the last page.
    fn list_security_issues(&self, repo: &RepoRef) -> Result<Vec<Issue>> {
        let url = format!("{API_BASE}/repos/{}/{}/issues", repo.owner, repo.name);

        let mut issues = Vec::new();
        let mut page = 1usize;
        loop {
            let response = self
                .agent
                .get(&url)
                .query("labels", SECURITY_LABEL)
                .query("per_page", &PAGE_SIZE.to_string())
                .query("page", &page.to_string())
                .set("User-Agent", USER_AGENT)
                .set("Accept", "application/vnd.github.v3+json")
                .call()
                .with_context(|| format!("Failed to list issues (page {page})"))?;

            let paged: Vec<Issue> = response
                .into_json()
                .with_context(|| format!("Failed to decode issue page {page}"))?;

            let last_page = paged.len() < PAGE_SIZE;
            issues.extend(paged);
            if last_page {
                break;
            }
            page += 1;
        }

        Ok(issues)
    }
}

/// Convert one issue into an advisory, or drop it.
///
/// Keeps the issue only if its trimmed title starts with the advisory
/// marker; extracts the first CVE identifier from the title; rewrites the
/// API URL into its public HTML form to produce the advisory link.
fn issue_to_advisory(issue: &Issue) -> Option<Advisory> {
    let title = issue.title.trim();
    if !title.starts_with(TITLE_MARKER) {
        return None;
    }

    let cve = CVE_REGEX.find(title).map(|m| m.as_str().to_string());
    let link = issue.url.replace("api.github.com/repos", "github.com");

    Some(Advisory { link, cve })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue(url: &str, title: &str) -> Issue {
        Issue {
            url: url.to_string(),
            title: title.to_string(),
        }
    }

    #[test]
    fn test_issue_without_marker_is_dropped() {
        let issue = issue(
            "https://api.github.com/repos/dotnet/announcements/issues/1",
            "Welcome to the announcements repo",
        );
        assert!(issue_to_advisory(&issue).is_none());
    }

    #[test]
    fn test_marker_match_ignores_surrounding_whitespace() {
        let issue = issue(
            "https://api.github.com/repos/dotnet/announcements/issues/157",
            "  Microsoft Security Advisory CVE-2020-1108 | .NET Core Denial of Service Vulnerability",
        );
        let advisory = issue_to_advisory(&issue).unwrap();
        assert_eq!(advisory.cve.as_deref(), Some("CVE-2020-1108"));
    }

    #[test]
    fn test_api_url_is_rewritten_to_html_form() {
        let issue = issue(
            "https://api.github.com/repos/aspnet/Announcements/issues/300",
            "Microsoft Security Advisory ASPNETCore-Mar18: ASP.NET Core Denial Of Service Vulnerability",
        );
        let advisory = issue_to_advisory(&issue).unwrap();
        assert_eq!(
            advisory.link,
            "https://github.com/aspnet/Announcements/issues/300"
        );
        assert!(advisory.cve.is_none());
    }

    #[test]
    fn test_first_cve_in_title_wins() {
        let issue = issue(
            "https://api.github.com/repos/dotnet/announcements/issues/99",
            "Microsoft Security Advisory CVE-2019-0820, also relates to CVE-2019-0980",
        );
        let advisory = issue_to_advisory(&issue).unwrap();
        assert_eq!(advisory.cve.as_deref(), Some("CVE-2019-0820"));
    }

    #[test]
    fn test_cve_regex_accepts_long_sequence_numbers() {
        assert!(CVE_REGEX.is_match("CVE-2021-1234567"));
        assert!(!CVE_REGEX.is_match("CVE-21-1234"));
        assert!(!CVE_REGEX.is_match("CVE-2021-123"));
    }
}
