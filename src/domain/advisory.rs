use std::fmt;

/// One upstream issue tracker to scan for security advisories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

impl RepoRef {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// A security advisory issue fetched from an upstream repository.
///
/// `link` is the normalized public HTML URL of the issue (not the API URL)
/// and is the unique key for the advisory throughout a reconciliation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Advisory {
    pub link: String,
    /// First `CVE-YYYY-NNNN` identifier found in the issue title, if any.
    pub cve: Option<String>,
}

/// Reconciliation state tracked per advisory link.
///
/// `still_needed` starts true and flips to false once a local record covering
/// the link is found. Entries live only for the duration of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkStatus {
    pub still_needed: bool,
    pub cve: Option<String>,
}

impl LinkStatus {
    pub fn new(cve: Option<String>) -> Self {
        Self {
            still_needed: true,
            cve,
        }
    }
}
