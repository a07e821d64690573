use crate::release::{Asset, ReleaseDescriptor};

use super::PlatformTag;

/// Filename suffix each platform's primary asset ends with.
///
/// Platforms missing from the table (ios, unknown) never resolve to an asset.
pub const PATTERN_TABLE: &[(PlatformTag, &str)] = &[
    (PlatformTag::Android, "android-arm64.apk"),
    (PlatformTag::Windows, "windows-setup.exe"),
    (PlatformTag::Macos, "macos.dmg"),
    (PlatformTag::Linux, "linux.AppImage"),
];

/// Look up the filename rule for a platform.
pub fn pattern_for(tag: PlatformTag) -> Option<&'static str> {
    PATTERN_TABLE
        .iter()
        .find(|(t, _)| *t == tag)
        .map(|(_, suffix)| *suffix)
}

/// Trait for selecting an asset from a list of available assets
pub trait AssetPicker: Send + Sync {
    /// Pick the most appropriate asset from the given list
    ///
    /// Returns `None` if no suitable asset is found
    fn pick<'a>(&self, assets: &'a [Asset]) -> Option<&'a Asset>;
}

/// Picks the first asset matching a platform's entry in [`PATTERN_TABLE`].
pub struct PlatformAssetPicker {
    tag: PlatformTag,
}

impl PlatformAssetPicker {
    pub fn new(tag: PlatformTag) -> Self {
        Self { tag }
    }
}

impl AssetPicker for PlatformAssetPicker {
    fn pick<'a>(&self, assets: &'a [Asset]) -> Option<&'a Asset> {
        let suffix = pattern_for(self.tag)?;
        assets.iter().find(|a| a.name.ends_with(suffix))
    }
}

/// Picks the first asset whose name contains a fixed substring.
pub struct SubstringAssetPicker {
    needle: String,
}

impl SubstringAssetPicker {
    pub fn new(needle: impl Into<String>) -> Self {
        Self {
            needle: needle.into(),
        }
    }
}

impl AssetPicker for SubstringAssetPicker {
    fn pick<'a>(&self, assets: &'a [Asset]) -> Option<&'a Asset> {
        assets.iter().find(|a| a.name.contains(&self.needle))
    }
}

/// Resolve the primary download asset of `release` for `tag`.
pub fn resolve_asset_for_platform(tag: PlatformTag, release: &ReleaseDescriptor) -> Option<&Asset> {
    PlatformAssetPicker::new(tag).pick(&release.assets)
}
