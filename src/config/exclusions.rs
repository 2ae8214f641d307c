//! Curated list of advisory links that legitimately have no local record.
//!
//! Each entry documents why it is excluded at its point of declaration:
//! duplicate CVE definitions between the dotnet and aspnet repos, issues
//! without attributed CVEs, and advisories that do not apply to the runtime
//! on Linux. Reviewed by hand; keep the reasons next to the links.

use std::collections::BTreeSet;

/// Links present in the upstream repos that are intentionally untracked.
const EXCLUDED_LINKS: &[&str] = &[
    // ASP.NET Announcement Repo

    // Microsoft Security Advisory: iOS12 breaks social, WSFed and OIDC logins #318
    "https://github.com/aspnet/Announcements/issues/318",
    // Microsoft Security Advisory ASPNETCore-July18: ASP.NET Core Denial Of Service Vulnerability
    "https://github.com/aspnet/Announcements/issues/311",
    // Microsoft Security Advisory ASPNETCore-Mar18: ASP.NET Core Denial Of Service Vulnerability
    "https://github.com/aspnet/Announcements/issues/300",
    // Microsoft Security Advisory CVE-2019-0815: ASP.NET Core denial of service vulnerability
    // Strange module
    "https://github.com/aspnet/Announcements/issues/352",
    // Microsoft Security Advisory 4021279: Vulnerabilities in .NET Core, ASP.NET Core Could Allow Elevation of Privilege
    // Duplicate of https://github.com/dotnet/announcements/issues/12
    "https://github.com/aspnet/Announcements/issues/239",
    // Microsoft Security Advisory CVE-2018-0808: ASP.NET Core Denial Of Service Vulnerability
    // IIS vuln
    "https://github.com/aspnet/Announcements/issues/294",
    // Microsoft Security Advisory CVE-2019-0548: ASP.NET Core Denial Of Service Vulnerability
    // IIS vuln
    "https://github.com/aspnet/Announcements/issues/335",
    // Ignoring MSAs for now
    "https://github.com/aspnet/Announcements/issues/203",
    "https://github.com/aspnet/Announcements/issues/216",
    // Affects .NET SDK
    "https://github.com/aspnet/Announcements/issues/284",
    "https://github.com/aspnet/Announcements/issues/285",
    // Affects MVC in version <2.1 (could not download 2.0 on Linux)
    "https://github.com/aspnet/Announcements/issues/278",
    // Affects MVC in version <2.1 (could not download 2.0 on Linux)
    "https://github.com/aspnet/Announcements/issues/279",
    // Affects MessagePack which is a non-runtime package
    "https://github.com/aspnet/Announcements/issues/359",
    "https://github.com/aspnet/Announcements/issues/405",

    // .NET Announcement Repo

    // Microsoft Security Advisory CVE-2020-1597 | ASP.NET Core Denial of Service Vulnerability
    // Duplicate of https://github.com/aspnet/Announcements/issues/431
    "https://github.com/dotnet/announcements/issues/162",
    // Microsoft Security Advisory CVE-2018-8409: .NET Core Denial Of Service Vulnerability
    // Duplicate of https://github.com/aspnet/Announcements/issues/316
    "https://github.com/dotnet/announcements/issues/83",
    // Microsoft Security Advisory CVE-2020-1108 | .NET Core Denial of Service Vulnerability
    // Duplicate of https://github.com/dotnet/announcements/issues/157
    "https://github.com/dotnet/announcements/issues/156",
    // Affects .NET 1
    "https://github.com/dotnet/announcements/issues/12",
    // Affects service model and not the core runtime
    "https://github.com/dotnet/announcements/issues/73",
    // Duplicate of https://github.com/aspnet/Announcements/issues/449
    "https://github.com/dotnet/announcements/issues/170",
    // Affects System.DirectoryServices.Protocols, which is not generically fixed by upgrading .NET core
    "https://github.com/dotnet/announcements/issues/202",
    // Vulnerability only affects IIS hosted applications which is not available on Linux
    "https://github.com/dotnet/announcements/issues/206",
    // Vulnerability only affects NuGet packages
    "https://github.com/dotnet/announcements/issues/239",
    // Duplicate of https://github.com/dotnet/announcements/issues/250
    "https://github.com/dotnet/announcements/issues/258",
    // Duplicate of https://github.com/dotnet/announcements/issues/282
    "https://github.com/dotnet/announcements/issues/277",
    // Duplicate of https://github.com/dotnet/announcements/issues/281
    "https://github.com/dotnet/announcements/issues/278",
    // Duplicate of https://github.com/dotnet/announcements/issues/280
    "https://github.com/dotnet/announcements/issues/279",
    // Only affects release candidates for .NET 8.0; the analyzer ignores
    // release candidate versions
    "https://github.com/dotnet/announcements/issues/286",
];

/// Immutable set of advisory links curated out of reconciliation.
///
/// Built once at startup and passed by reference into the reconciler; there
/// is no mutable global state behind it.
#[derive(Debug, Clone, Default)]
pub struct ExclusionSet {
    links: BTreeSet<String>,
}

impl ExclusionSet {
    /// The reviewed built-in list.
    pub fn builtin() -> Self {
        Self::from_links(EXCLUDED_LINKS.iter().map(|s| s.to_string()))
    }

    /// An empty set; useful in tests.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_links(links: impl IntoIterator<Item = String>) -> Self {
        Self {
            links: links.into_iter().collect(),
        }
    }

    pub fn contains(&self, link: &str) -> bool {
        self.links.contains(link)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.links.iter().map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}
