//! Binds the latest release to the page.
//!
//! [`ReleaseBinder`] owns everything that outlives one fetch: the resolved
//! platform, the cached release, and the event channel.

mod controller;
mod events;

pub use controller::ReleaseBinder;
pub use events::ReleaseEvent;

/// Filename substrings and the controls they rewire, in lookup order.
pub const DOWNLOAD_TARGETS: &[(&str, &str)] = &[
    ("android-arm64.apk", ".download-android .btn-primary"),
    ("android-arm.apk", ".download-android .btn-secondary"),
    ("windows-setup.exe", ".download-windows .btn-primary"),
    ("macos.dmg", ".download-macos .btn-primary"),
    ("linux.AppImage", ".download-linux .btn-primary"),
];
