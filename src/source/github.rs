//! GitHub source implementation.

use async_trait::async_trait;
use log::debug;
use reqwest::Client;

use crate::http::{FetchError, HttpClient};
use crate::release::{Asset, ReleaseDescriptor};

use super::{ReleaseSource, RepoId};

/// GitHub API response types (internal).
mod api {
    use chrono::{DateTime, Utc};
    use serde::Deserialize;

    #[derive(Deserialize, Debug)]
    pub struct Release {
        pub tag_name: String,
        pub published_at: Option<DateTime<Utc>>,
        pub html_url: String,
        #[serde(default)]
        pub assets: Vec<Asset>,
    }

    #[derive(Deserialize, Debug)]
    pub struct Asset {
        pub name: String,
        pub browser_download_url: String,
        #[serde(default)]
        pub size: u64,
        #[serde(default)]
        pub download_count: u64,
    }
}

/// GitHub source for one repository.
pub struct GitHubSource {
    http_client: HttpClient,
    api_base: String,
}

impl GitHubSource {
    /// Create a source for `repo` against the public GitHub API.
    pub fn new(client: Client, repo: &RepoId) -> Self {
        Self::with_api_url(client, repo, "https://api.github.com")
    }

    /// Create a source for `repo` against a custom API URL.
    pub fn with_api_url(client: Client, repo: &RepoId, api_url: &str) -> Self {
        Self::from_http_client(HttpClient::new(client), repo, api_url)
    }

    /// Create from an existing HttpClient.
    pub fn from_http_client(http_client: HttpClient, repo: &RepoId, api_url: &str) -> Self {
        Self {
            http_client,
            api_base: repo.api_base(api_url),
        }
    }
}

#[async_trait]
impl ReleaseSource for GitHubSource {
    fn api_base(&self) -> &str {
        &self.api_base
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_latest_release(&self) -> Result<ReleaseDescriptor, FetchError> {
        let url = format!("{}/releases/latest", self.api_base);
        debug!("Fetching latest release from {}...", url);
        let release: api::Release = self.http_client.get_json(&url).await?;
        Ok(release.into())
    }
}

impl From<api::Release> for ReleaseDescriptor {
    fn from(r: api::Release) -> Self {
        ReleaseDescriptor {
            tag: r.tag_name,
            published_at: r.published_at,
            html_url: r.html_url,
            assets: r.assets.into_iter().map(|a| a.into()).collect(),
        }
    }
}

impl From<api::Asset> for Asset {
    fn from(a: api::Asset) -> Self {
        Asset {
            name: a.name,
            browser_download_url: a.browser_download_url,
            size: a.size,
            download_count: a.download_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn repo() -> RepoId {
        "test-owner/test-repo".parse().unwrap()
    }

    #[test]
    fn test_github_source_api_base() {
        let source = GitHubSource::new(Client::new(), &repo());
        assert_eq!(
            source.api_base(),
            "https://api.github.com/repos/test-owner/test-repo"
        );

        let custom = GitHubSource::with_api_url(Client::new(), &repo(), "https://custom.api");
        assert_eq!(custom.api_base(), "https://custom.api/repos/test-owner/test-repo");
    }

    #[tokio::test]
    async fn test_fetch_latest_release() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();

        let mock = server
            .mock("GET", "/repos/test-owner/test-repo/releases/latest")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "tag_name": "v1.0.0",
                    "published_at": "2024-01-15T10:30:00Z",
                    "html_url": "https://github.com/test-owner/test-repo/releases/tag/v1.0.0",
                    "prerelease": false,
                    "assets": [
                        {
                            "name": "app-windows-setup.exe",
                            "browser_download_url": "https://example.com/app-windows-setup.exe",
                            "size": 1536,
                            "download_count": 10,
                            "content_type": "application/octet-stream"
                        },
                        {
                            "name": "app-linux.AppImage",
                            "browser_download_url": "https://example.com/app-linux.AppImage",
                            "size": 2048,
                            "download_count": 25
                        }
                    ]
                }"#,
            )
            .create_async()
            .await;

        let source = GitHubSource::with_api_url(Client::new(), &repo(), &url);
        let release = source.fetch_latest_release().await.unwrap();

        mock.assert_async().await;
        assert_eq!(release.tag, "v1.0.0");
        assert_eq!(
            release.published_at,
            Some(Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap())
        );
        assert_eq!(
            release.html_url,
            "https://github.com/test-owner/test-repo/releases/tag/v1.0.0"
        );
        assert_eq!(release.assets.len(), 2);
        assert_eq!(release.assets[0].name, "app-windows-setup.exe");
        assert_eq!(release.assets[0].size, 1536);
        assert_eq!(release.total_downloads(), 35);
    }

    #[tokio::test]
    async fn test_fetch_latest_release_without_assets() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();

        let _mock = server
            .mock("GET", "/repos/test-owner/test-repo/releases/latest")
            .with_status(200)
            .with_body(
                r#"{"tag_name": "v0.1.0", "published_at": null, "html_url": "https://example.com/r"}"#,
            )
            .create_async()
            .await;

        let source = GitHubSource::with_api_url(Client::new(), &repo(), &url);
        let release = source.fetch_latest_release().await.unwrap();

        assert_eq!(release.tag, "v0.1.0");
        assert!(release.published_at.is_none());
        assert!(release.assets.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_latest_release_not_found() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();

        let mock = server
            .mock("GET", "/repos/test-owner/test-repo/releases/latest")
            .with_status(404)
            .create_async()
            .await;

        let source = GitHubSource::with_api_url(Client::new(), &repo(), &url);
        let err = source.fetch_latest_release().await.unwrap_err();

        mock.assert_async().await;
        assert_eq!(err.status(), Some(404));
    }

    #[tokio::test]
    async fn test_fetch_latest_release_missing_fields() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();

        let _mock = server
            .mock("GET", "/repos/test-owner/test-repo/releases/latest")
            .with_status(200)
            .with_body(r#"{"message": "ok"}"#)
            .create_async()
            .await;

        let source = GitHubSource::with_api_url(Client::new(), &repo(), &url);
        let err = source.fetch_latest_release().await.unwrap_err();

        assert!(matches!(err, FetchError::Parse(_)));
    }
}
