//! Release sources.
//!
//! A source knows how to fetch the latest published release of one
//! repository from a release-hosting API.

mod github;

use async_trait::async_trait;
use std::fmt;
use std::str::FromStr;

use crate::http::FetchError;
use crate::release::ReleaseDescriptor;

pub use github::GitHubSource;

/// Repository identifier (owner/repo format).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoId {
    pub owner: String,
    pub repo: String,
}

impl RepoId {
    /// API base for this repository, e.g. `https://api.github.com/repos/owner/repo`.
    pub fn api_base(&self, api_url: &str) -> String {
        format!(
            "{}/repos/{}/{}",
            api_url.trim_end_matches('/'),
            self.owner,
            self.repo
        )
    }

    /// Human-facing page listing the latest release.
    pub fn latest_release_page(&self) -> String {
        format!(
            "https://github.com/{}/{}/releases/latest",
            self.owner, self.repo
        )
    }
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

impl FromStr for RepoId {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('/').collect();
        if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
            anyhow::bail!("Invalid repository format. Expected 'owner/repo'.")
        } else {
            Ok(RepoId {
                owner: parts[0].to_string(),
                repo: parts[1].to_string(),
            })
        }
    }
}

/// Trait for release-hosting APIs.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReleaseSource: Send + Sync {
    /// Base URL requests are issued against.
    fn api_base(&self) -> &str;

    /// Fetch the latest published release.
    async fn fetch_latest_release(&self) -> Result<ReleaseDescriptor, FetchError>;
}
