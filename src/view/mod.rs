//! View adapter abstraction.
//!
//! The binder never touches page elements directly. Every read and write goes
//! through [`ViewAdapter`], which keeps the mapping logic testable without a
//! rendering target.

mod page;

pub use page::{PageLayout, PageModel, PageState, PrimaryButton, TargetLink, TargetSlot};

/// Class marking the primary button while a fetch is outstanding.
pub const LOADING_CLASS: &str = "loading";
/// Class marking the primary button as unavailable.
pub const DISABLED_CLASS: &str = "btn-disabled";
/// Target written when a control must not navigate anywhere.
pub const NEUTRAL_HREF: &str = "#";

/// Page operations the binder needs.
///
/// Writes addressing elements the page does not have are no-ops.
#[cfg_attr(test, mockall::automock)]
pub trait ViewAdapter: Send + Sync {
    /// The page `lang` attribute, if set.
    fn lang(&self) -> Option<String>;

    fn set_primary_label(&self, label: &str);
    fn set_primary_target(&self, url: &str);
    /// Writes into the primary button's size slot, when it has one. `None`
    /// clears it.
    fn set_primary_size(&self, size: Option<String>);
    fn set_primary_loading(&self, loading: bool);
    /// Disables the primary button: neutral target, and `notice` is shown
    /// instead of navigating.
    fn disable_primary(&self, notice: &str);

    /// Adds a class to the page root. Adding an existing class changes nothing.
    fn add_root_class(&self, class: &str);

    /// Broadcasts release metadata to every version, date and count display.
    fn set_metadata_displays(&self, version: &str, date: Option<String>, count: &str);
    fn set_release_notes_links(&self, url: &str);

    /// Rewires the control matched by `selector`. Its size label is replaced,
    /// so `None` clears it.
    fn set_download_target(&self, selector: &str, url: &str, size: Option<String>);

    /// Values of every `data-platform` attribute on the page.
    fn platform_links(&self) -> Vec<String>;
    fn set_platform_link(&self, platform: &str, url: &str);
}
