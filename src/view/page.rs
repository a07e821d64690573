//! In-memory page model.
//!
//! [`PageLayout`] declares which elements a page has; [`PageModel`] applies
//! view-adapter writes to them and can be snapshotted as a [`PageState`].

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Mutex, MutexGuard};

use super::{DISABLED_CLASS, LOADING_CLASS, NEUTRAL_HREF, ViewAdapter};

fn default_true() -> bool {
    true
}

fn default_href() -> String {
    NEUTRAL_HREF.to_string()
}

/// A control addressed by a fixed selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetSlot {
    pub selector: String,
    #[serde(default = "default_true")]
    pub size_slot: bool,
}

impl TargetSlot {
    pub fn new(selector: &str) -> Self {
        Self {
            selector: selector.to_string(),
            size_slot: true,
        }
    }
}

/// Which elements a page contains.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLayout {
    #[serde(default)]
    pub lang: Option<String>,
    /// Whether the page has a primary download button.
    #[serde(default = "default_true")]
    pub primary_button: bool,
    /// Whether the primary button has a size slot.
    #[serde(default = "default_true")]
    pub primary_size_slot: bool,
    /// Initial target of the primary button.
    #[serde(default = "default_href")]
    pub primary_href: String,
    /// Initial text of the primary button.
    #[serde(default)]
    pub primary_label: String,
    #[serde(default = "default_targets")]
    pub targets: Vec<TargetSlot>,
    /// `data-platform` attribute values, one per link.
    #[serde(default)]
    pub platform_links: Vec<String>,
}

fn default_targets() -> Vec<TargetSlot> {
    crate::binder::DOWNLOAD_TARGETS
        .iter()
        .map(|(_, selector)| TargetSlot::new(selector))
        .collect()
}

impl Default for PageLayout {
    fn default() -> Self {
        Self {
            lang: None,
            primary_button: true,
            primary_size_slot: true,
            primary_href: default_href(),
            primary_label: String::new(),
            targets: default_targets(),
            platform_links: Vec::new(),
        }
    }
}

impl PageLayout {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse page layout")
    }
}

/// The primary download button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimaryButton {
    pub href: String,
    pub label: String,
    pub size: Option<String>,
    pub classes: BTreeSet<String>,
    /// Shown instead of navigating, when set.
    pub notice: Option<String>,
    #[serde(skip)]
    has_size_slot: bool,
}

impl PrimaryButton {
    pub fn is_loading(&self) -> bool {
        self.classes.contains(LOADING_CLASS)
    }

    pub fn is_disabled(&self) -> bool {
        self.classes.contains(DISABLED_CLASS)
    }
}

/// A rewired download control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetLink {
    pub href: String,
    pub size: Option<String>,
    #[serde(skip)]
    has_size_slot: bool,
}

/// Visible state of the page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageState {
    pub lang: Option<String>,
    pub root_classes: BTreeSet<String>,
    pub primary: Option<PrimaryButton>,
    pub version: Option<String>,
    pub release_date: Option<String>,
    pub download_count: Option<String>,
    pub release_notes_href: Option<String>,
    pub targets: BTreeMap<String, TargetLink>,
    pub platform_links: BTreeMap<String, String>,
}

impl From<PageLayout> for PageState {
    fn from(layout: PageLayout) -> Self {
        let primary = layout.primary_button.then(|| PrimaryButton {
            href: layout.primary_href,
            label: layout.primary_label,
            size: None,
            classes: BTreeSet::new(),
            notice: None,
            has_size_slot: layout.primary_size_slot,
        });

        let targets = layout
            .targets
            .into_iter()
            .map(|slot| {
                let link = TargetLink {
                    href: default_href(),
                    size: None,
                    has_size_slot: slot.size_slot,
                };
                (slot.selector, link)
            })
            .collect();

        let platform_links = layout
            .platform_links
            .into_iter()
            .map(|platform| (platform, default_href()))
            .collect();

        PageState {
            lang: layout.lang,
            primary,
            targets,
            platform_links,
            ..Default::default()
        }
    }
}

/// [`ViewAdapter`] over an in-memory [`PageState`].
pub struct PageModel {
    state: Mutex<PageState>,
}

impl PageModel {
    pub fn new(layout: PageLayout) -> Self {
        Self {
            state: Mutex::new(layout.into()),
        }
    }

    /// Copy of the current page state.
    pub fn snapshot(&self) -> PageState {
        self.state().clone()
    }

    fn state(&self) -> MutexGuard<'_, PageState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn with_primary(&self, f: impl FnOnce(&mut PrimaryButton)) {
        if let Some(primary) = self.state().primary.as_mut() {
            f(primary);
        }
    }
}

impl Default for PageModel {
    fn default() -> Self {
        Self::new(PageLayout::default())
    }
}

impl ViewAdapter for PageModel {
    fn lang(&self) -> Option<String> {
        self.state().lang.clone()
    }

    fn set_primary_label(&self, label: &str) {
        self.with_primary(|p| p.label = label.to_string());
    }

    fn set_primary_target(&self, url: &str) {
        self.with_primary(|p| p.href = url.to_string());
    }

    fn set_primary_size(&self, size: Option<String>) {
        self.with_primary(|p| {
            if p.has_size_slot {
                p.size = size;
            }
        });
    }

    fn set_primary_loading(&self, loading: bool) {
        self.with_primary(|p| {
            if loading {
                p.classes.insert(LOADING_CLASS.to_string());
            } else {
                p.classes.remove(LOADING_CLASS);
            }
        });
    }

    fn disable_primary(&self, notice: &str) {
        self.with_primary(|p| {
            p.classes.insert(DISABLED_CLASS.to_string());
            p.href = NEUTRAL_HREF.to_string();
            p.size = None;
            p.notice = Some(notice.to_string());
        });
    }

    fn add_root_class(&self, class: &str) {
        self.state().root_classes.insert(class.to_string());
    }

    fn set_metadata_displays(&self, version: &str, date: Option<String>, count: &str) {
        let mut state = self.state();
        state.version = Some(version.to_string());
        if date.is_some() {
            state.release_date = date;
        }
        state.download_count = Some(count.to_string());
    }

    fn set_release_notes_links(&self, url: &str) {
        self.state().release_notes_href = Some(url.to_string());
    }

    fn set_download_target(&self, selector: &str, url: &str, size: Option<String>) {
        if let Some(link) = self.state().targets.get_mut(selector) {
            link.href = url.to_string();
            if link.has_size_slot {
                link.size = size;
            }
        }
    }

    fn platform_links(&self) -> Vec<String> {
        self.state().platform_links.keys().cloned().collect()
    }

    fn set_platform_link(&self, platform: &str, url: &str) {
        if let Some(href) = self.state().platform_links.get_mut(platform) {
            *href = url.to_string();
        }
    }
}
