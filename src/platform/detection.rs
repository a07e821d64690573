use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Client operating system category used to select a download asset and label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PlatformTag {
    Android,
    Ios,
    Windows,
    Macos,
    Linux,
    #[default]
    Unknown,
}

impl PlatformTag {
    pub const ALL: [PlatformTag; 6] = [
        PlatformTag::Android,
        PlatformTag::Ios,
        PlatformTag::Windows,
        PlatformTag::Macos,
        PlatformTag::Linux,
        PlatformTag::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PlatformTag::Android => "android",
            PlatformTag::Ios => "ios",
            PlatformTag::Windows => "windows",
            PlatformTag::Macos => "macos",
            PlatformTag::Linux => "linux",
            PlatformTag::Unknown => "unknown",
        }
    }

    /// CSS class placed on the page root, e.g. `platform-linux`.
    pub fn marker_class(&self) -> String {
        format!("platform-{}", self.as_str())
    }
}

impl fmt::Display for PlatformTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlatformTag {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "android" => Ok(PlatformTag::Android),
            "ios" => Ok(PlatformTag::Ios),
            "windows" => Ok(PlatformTag::Windows),
            "macos" => Ok(PlatformTag::Macos),
            "linux" => Ok(PlatformTag::Linux),
            "unknown" => Ok(PlatformTag::Unknown),
            _ => anyhow::bail!(
                "Unknown platform: {}. Expected android, ios, windows, macos, linux, or unknown.",
                s
            ),
        }
    }
}

/// Resolve a platform tag from navigator-style strings.
///
/// First match wins:
/// - user agent contains `android` -> android
/// - user agent contains `iphone` or `ipad` -> ios
/// - platform hint contains `win` / `mac` / `linux` -> windows / macos / linux
///
/// Anything else is `unknown`. Matching is case-insensitive.
pub fn resolve_platform(user_agent: &str, platform_hint: &str) -> PlatformTag {
    let user_agent = user_agent.to_lowercase();
    let platform = platform_hint.to_lowercase();

    if user_agent.contains("android") {
        PlatformTag::Android
    } else if user_agent.contains("iphone") || user_agent.contains("ipad") {
        PlatformTag::Ios
    } else if platform.contains("win") {
        PlatformTag::Windows
    } else if platform.contains("mac") {
        PlatformTag::Macos
    } else if platform.contains("linux") {
        PlatformTag::Linux
    } else {
        PlatformTag::Unknown
    }
}

/// The identity a client reports about itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientIdentity {
    pub user_agent: String,
    pub platform: String,
}

impl ClientIdentity {
    pub fn new(user_agent: impl Into<String>, platform: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
            platform: platform.into(),
        }
    }

    pub fn platform_tag(&self) -> PlatformTag {
        resolve_platform(&self.user_agent, &self.platform)
    }

    /// Identity of the machine this binary runs on, phrased the way a
    /// browser on it would report itself.
    pub fn host() -> Self {
        Self::new(
            concat!("release-binder/", env!("RELEASE_BINDER_VERSION")),
            Self::host_platform_hint(),
        )
    }

    fn host_platform_hint() -> String {
        #[cfg(target_os = "windows")]
        {
            "Win32".to_string()
        }
        #[cfg(target_os = "macos")]
        {
            "MacIntel".to_string()
        }
        #[cfg(target_os = "linux")]
        {
            format!("Linux {}", std::env::consts::ARCH)
        }
        #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
        {
            std::env::consts::OS.to_string()
        }
    }
}

/// Trait for platform detection (useful for testing)
#[cfg_attr(test, mockall::automock)]
pub trait PlatformDetector: Send + Sync {
    fn detect(&self) -> PlatformTag;
}

/// Detector backed by a fixed client identity.
pub struct IdentityDetector {
    identity: ClientIdentity,
}

impl IdentityDetector {
    pub fn new(identity: ClientIdentity) -> Self {
        Self { identity }
    }
}

impl PlatformDetector for IdentityDetector {
    fn detect(&self) -> PlatformTag {
        self.identity.platform_tag()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PIXEL_UA: &str =
        "Mozilla/5.0 (Linux; Android 14; Pixel 8) AppleWebKit/537.36 Chrome/120.0 Mobile";
    const IPHONE_UA: &str =
        "Mozilla/5.0 (iPhone; CPU iPhone OS 17_2 like Mac OS X) AppleWebKit/605.1.15";
    const IPAD_UA: &str = "Mozilla/5.0 (iPad; CPU OS 17_2 like Mac OS X) AppleWebKit/605.1.15";
    const DESKTOP_UA: &str = "Mozilla/5.0 (X11; Linux x86_64) Gecko/20100101 Firefox/121.0";

    #[test]
    fn test_resolve_android() {
        assert_eq!(resolve_platform(PIXEL_UA, "Linux armv8l"), PlatformTag::Android);
    }

    #[test]
    fn test_resolve_ios() {
        assert_eq!(resolve_platform(IPHONE_UA, "iPhone"), PlatformTag::Ios);
        assert_eq!(resolve_platform(IPAD_UA, "MacIntel"), PlatformTag::Ios);
    }

    #[test]
    fn test_resolve_desktop_from_hint() {
        assert_eq!(resolve_platform(DESKTOP_UA, "Win32"), PlatformTag::Windows);
        assert_eq!(resolve_platform(DESKTOP_UA, "MacIntel"), PlatformTag::Macos);
        assert_eq!(resolve_platform(DESKTOP_UA, "Linux x86_64"), PlatformTag::Linux);
    }

    #[test]
    fn test_resolve_unknown() {
        assert_eq!(resolve_platform("", ""), PlatformTag::Unknown);
        assert_eq!(resolve_platform(DESKTOP_UA, "FreeBSD amd64"), PlatformTag::Unknown);
    }

    #[test]
    fn test_resolve_case_insensitive() {
        assert_eq!(resolve_platform("ANDROID", ""), PlatformTag::Android);
        assert_eq!(resolve_platform("android", ""), PlatformTag::Android);
        assert_eq!(resolve_platform("IPHONE", ""), PlatformTag::Ios);
        assert_eq!(resolve_platform("", "WIN64"), PlatformTag::Windows);
        assert_eq!(resolve_platform("", "LINUX"), PlatformTag::Linux);
    }

    #[test]
    fn test_user_agent_rules_take_precedence_over_hint() {
        // Android devices report a Linux platform hint
        assert_eq!(resolve_platform("android", "linux"), PlatformTag::Android);
        // iPads report MacIntel
        assert_eq!(resolve_platform("ipad", "macintel"), PlatformTag::Ios);
        // hint is only consulted for the desktop rules
        assert_eq!(resolve_platform("windows nt 10.0", ""), PlatformTag::Unknown);
    }

    #[test]
    fn test_resolve_always_one_of_six() {
        let inputs = [
            ("", ""),
            (PIXEL_UA, ""),
            (IPHONE_UA, ""),
            ("", "win"),
            ("", "darwin mac"),
            ("", "linux"),
            ("curl/8.0", "sunos"),
        ];
        for (ua, hint) in inputs {
            assert!(PlatformTag::ALL.contains(&resolve_platform(ua, hint)));
        }
    }

    #[test]
    fn test_platform_tag_parse_and_display() {
        for tag in PlatformTag::ALL {
            assert_eq!(tag.to_string().parse::<PlatformTag>().unwrap(), tag);
        }
        assert_eq!("MacOS".parse::<PlatformTag>().unwrap(), PlatformTag::Macos);
        assert!("beos".parse::<PlatformTag>().is_err());
    }

    #[test]
    fn test_marker_class() {
        assert_eq!(PlatformTag::Linux.marker_class(), "platform-linux");
        assert_eq!(PlatformTag::Unknown.marker_class(), "platform-unknown");
    }

    #[test]
    fn test_identity_detector() {
        let detector = IdentityDetector::new(ClientIdentity::new(DESKTOP_UA, "MacIntel"));
        assert_eq!(detector.detect(), PlatformTag::Macos);
    }

    #[test]
    fn test_host_identity() {
        let identity = ClientIdentity::host();
        assert!(identity.user_agent.starts_with("release-binder/"));

        #[cfg(target_os = "linux")]
        assert_eq!(identity.platform_tag(), PlatformTag::Linux);

        #[cfg(target_os = "macos")]
        assert_eq!(identity.platform_tag(), PlatformTag::Macos);

        #[cfg(target_os = "windows")]
        assert_eq!(identity.platform_tag(), PlatformTag::Windows);
    }

    #[test]
    fn test_mock_detector() {
        let mut detector = MockPlatformDetector::new();
        detector.expect_detect().return_const(PlatformTag::Ios);
        assert_eq!(detector.detect(), PlatformTag::Ios);
    }
}
