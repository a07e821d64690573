//! Service factory for building command dependencies.
//!
//! Services are built from configuration values but are not part of the
//! configuration itself.

use anyhow::Result;
use log::debug;
use reqwest::{
    Client,
    header::{AUTHORIZATION, HeaderMap, HeaderValue},
};

use crate::{http::HttpClient, source::GitHubSource};

use super::config::Config;

/// Build an HTTP client with optional authentication token
pub fn build_http_client(token: Option<&str>) -> Result<HttpClient> {
    let mut headers = HeaderMap::new();

    if let Some(token) = token {
        let mut auth_value = HeaderValue::from_str(&format!("Bearer {}", token))?;
        auth_value.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth_value);
        debug!("HTTP client configured with authentication");
    }

    let client = Client::builder()
        .user_agent("release-binder")
        .default_headers(headers)
        .build()?;

    Ok(HttpClient::new(client))
}

/// Build the GitHub release source from configuration
pub fn build_source(config: &Config) -> Result<GitHubSource> {
    let http_client = build_http_client(config.token.as_deref())?;
    Ok(GitHubSource::from_http_client(
        http_client,
        &config.repo,
        &config.api_url,
    ))
}
