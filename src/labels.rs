//! Localized button labels and notices.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::platform::PlatformTag;

/// Page languages with translated strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Es,
    Pt,
}

impl Locale {
    /// Parse a page `lang` attribute.
    ///
    /// Only the primary subtag is considered, so `pt-BR` is Portuguese rather
    /// than an unknown key that falls back to English. Missing or untranslated
    /// languages fall back to English.
    pub fn from_lang(lang: Option<&str>) -> Self {
        let primary = lang
            .and_then(|l| l.split(['-', '_']).next())
            .map(|l| l.trim().to_lowercase())
            .unwrap_or_default();

        match primary.as_str() {
            "es" => Locale::Es,
            "pt" => Locale::Pt,
            _ => Locale::En,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locale::En => write!(f, "en"),
            Locale::Es => write!(f, "es"),
            Locale::Pt => write!(f, "pt"),
        }
    }
}

/// Text for the primary download button.
pub fn platform_label(locale: Locale, tag: PlatformTag) -> Option<&'static str> {
    let label = match (locale, tag) {
        (_, PlatformTag::Unknown) => return None,

        (Locale::En, PlatformTag::Android) => "Download for Android",
        (Locale::En, PlatformTag::Windows) => "Download for Windows",
        (Locale::En, PlatformTag::Macos) => "Download for macOS",
        (Locale::En, PlatformTag::Linux) => "Download for Linux",
        (Locale::En, PlatformTag::Ios) => "Coming Soon for iOS",

        (Locale::Es, PlatformTag::Android) => "Descargar para Android",
        (Locale::Es, PlatformTag::Windows) => "Descargar para Windows",
        (Locale::Es, PlatformTag::Macos) => "Descargar para macOS",
        (Locale::Es, PlatformTag::Linux) => "Descargar para Linux",
        (Locale::Es, PlatformTag::Ios) => "Próximamente para iOS",

        (Locale::Pt, PlatformTag::Android) => "Baixar para Android",
        (Locale::Pt, PlatformTag::Windows) => "Baixar para Windows",
        (Locale::Pt, PlatformTag::Macos) => "Baixar para macOS",
        (Locale::Pt, PlatformTag::Linux) => "Baixar para Linux",
        (Locale::Pt, PlatformTag::Ios) => "Em breve para iOS",
    };
    Some(label)
}

/// Notice shown instead of navigating when the iOS button is used.
pub fn ios_notice(locale: Locale) -> &'static str {
    match locale {
        Locale::En => "iOS support is coming soon! Sign up for updates at hello@libredrop.org",
        Locale::Es => {
            "¡El soporte para iOS llegará pronto! Regístrate para actualizaciones en hello@libredrop.org"
        }
        Locale::Pt => {
            "Suporte para iOS em breve! Cadastre-se para atualizações em hello@libredrop.org"
        }
    }
}
