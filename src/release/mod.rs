//! Release model shared by the source, the pickers and the binder.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A downloadable artifact attached to a release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    pub name: String,
    pub browser_download_url: String,
    pub size: u64,
    pub download_count: u64,
}

/// Snapshot of a published release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ReleaseDescriptor {
    /// Version tag (e.g., "v1.0.0")
    pub tag: String,
    pub published_at: Option<DateTime<Utc>>,
    /// Release page on the hosting site
    pub html_url: String,
    /// Assets in the order the API listed them
    pub assets: Vec<Asset>,
}

impl ReleaseDescriptor {
    /// Sum of download counts across every asset, saturating at `u64::MAX`.
    pub fn total_downloads(&self) -> u64 {
        self.assets
            .iter()
            .fold(0u64, |acc, a| acc.saturating_add(a.download_count))
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn test_total_downloads() {
        let release = ReleaseDescriptor {
            assets: vec![asset("a", 1, 10), asset("b", 1, 25)],
            ..Default::default()
        };
        assert_eq!(release.total_downloads(), 35);
    }

    #[test]
    fn test_total_downloads_saturates() {
        let release = ReleaseDescriptor {
            assets: vec![asset("a", 1, u64::MAX), asset("b", 1, 2)],
            ..Default::default()
        };
        assert_eq!(release.total_downloads(), u64::MAX);
    }

    #[test]
    fn test_total_downloads_no_assets() {
        assert_eq!(ReleaseDescriptor::default().total_downloads(), 0);
    }

    #[test]
    fn test_full_release_fixture_is_ordered() {
        let release = full_release();
        assert_eq!(release.assets.len(), 5);
        assert!(release.assets[0].name.ends_with("android-arm64.apk"));
    }
}
