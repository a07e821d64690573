use anyhow::{Context, Result};
use log::debug;

use crate::source::RepoId;

pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Settings shared by every command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub repo: RepoId,
    pub api_url: String,
    pub token: Option<String>,
}

impl Config {
    pub fn new(repo: &str, api_url: Option<String>, token: Option<String>) -> Result<Self> {
        let repo = repo
            .parse::<RepoId>()
            .with_context(|| format!("Invalid repository: {}", repo))?;
        let api_url = api_url.unwrap_or_else(|| DEFAULT_API_URL.to_string());
        // An empty GITHUB_TOKEN means no token.
        let token = token.filter(|t| !t.trim().is_empty());

        debug!(
            "Using repository {} via {} (authenticated: {})",
            repo,
            api_url,
            token.is_some()
        );

        Ok(Self {
            repo,
            api_url,
            token,
        })
    }

    /// Where download controls point when no asset can be offered.
    pub fn fallback_url(&self) -> String {
        self.repo.latest_release_page()
    }
}
