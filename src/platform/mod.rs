//! Platform detection and asset selection module
//!
//! This module maps a visitor's reported identity (user agent and platform
//! hint) to a [`PlatformTag`] and selects which release asset belongs to that
//! platform.

mod detection;
mod picker;

#[cfg(test)]
pub use detection::MockPlatformDetector;
pub use detection::{
    ClientIdentity, IdentityDetector, PlatformDetector, PlatformTag, resolve_platform,
};
pub use picker::{
    AssetPicker, PATTERN_TABLE, PlatformAssetPicker, SubstringAssetPicker, pattern_for,
    resolve_asset_for_platform,
};
