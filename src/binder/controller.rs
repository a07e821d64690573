use log::{debug, info, warn};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use tokio::sync::broadcast;

use crate::format::{format_byte_size, format_count, format_release_date};
use crate::http::FetchError;
use crate::labels::{Locale, ios_notice, platform_label};
use crate::platform::{
    AssetPicker, PlatformDetector, PlatformTag, SubstringAssetPicker, resolve_asset_for_platform,
};
use crate::release::ReleaseDescriptor;
use crate::source::ReleaseSource;
use crate::view::ViewAdapter;

use super::{DOWNLOAD_TARGETS, ReleaseEvent};

const EVENT_CAPACITY: usize = 16;

/// Keeps a page's download controls in sync with the latest release.
///
/// The platform is detected once, at construction. Each [`refresh`] takes a
/// sequence number; a completion is applied only when no newer fetch has been
/// applied before it, so concurrent refreshes settle on the most recently
/// started one.
///
/// [`refresh`]: ReleaseBinder::refresh
pub struct ReleaseBinder<S: ReleaseSource, V: ViewAdapter> {
    source: S,
    view: V,
    platform: PlatformTag,
    locale: Locale,
    fallback_url: String,
    release: RwLock<Option<Arc<ReleaseDescriptor>>>,
    started: AtomicU64,
    applied: Mutex<u64>,
    events: broadcast::Sender<ReleaseEvent>,
}

impl<S: ReleaseSource, V: ViewAdapter> ReleaseBinder<S, V> {
    /// `fallback_url` is where download controls point until a release is known.
    pub fn new(
        source: S,
        view: V,
        detector: &dyn PlatformDetector,
        fallback_url: impl Into<String>,
    ) -> Self {
        let platform = detector.detect();
        let locale = Locale::from_lang(view.lang().as_deref());
        debug!("Resolved platform {} with locale {}", platform, locale);

        let (events, _) = broadcast::channel(EVENT_CAPACITY);

        Self {
            source,
            view,
            platform,
            locale,
            fallback_url: fallback_url.into(),
            release: RwLock::new(None),
            started: AtomicU64::new(0),
            applied: Mutex::new(0),
            events,
        }
    }

    pub fn detect_platform(&self) -> PlatformTag {
        self.platform
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    /// The last applied release, if any fetch has succeeded.
    pub fn latest_release(&self) -> Option<Arc<ReleaseDescriptor>> {
        self.release
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Receives one [`ReleaseEvent`] per applied fetch.
    pub fn subscribe(&self) -> broadcast::Receiver<ReleaseEvent> {
        self.events.subscribe()
    }

    /// Synchronous first pass, before anything is known about the release.
    pub fn initialize(&self) {
        self.update_download_affordances(self.platform, None);
    }

    /// [`initialize`](Self::initialize) followed by one [`refresh`](Self::refresh).
    pub async fn run(&self) -> Result<Arc<ReleaseDescriptor>, FetchError> {
        self.initialize();
        self.refresh().await
    }

    /// Fetch the latest release and apply it to the page.
    ///
    /// Failures are reported through the result and a [`ReleaseEvent::Failed`];
    /// the page keeps working with its fallback targets.
    #[tracing::instrument(skip(self))]
    pub async fn refresh(&self) -> Result<Arc<ReleaseDescriptor>, FetchError> {
        let seq = self.started.fetch_add(1, Ordering::SeqCst) + 1;
        self.view.set_primary_loading(true);

        let result = self.source.fetch_latest_release().await.map(Arc::new);

        let mut applied = self.applied.lock().unwrap_or_else(|e| e.into_inner());
        if seq < *applied {
            debug!("Discarding fetch #{}, #{} already applied", seq, *applied);
            return result;
        }
        *applied = seq;

        match &result {
            Ok(release) => self.apply_release(release),
            Err(e) => self.apply_failure(e),
        }

        if seq == self.started.load(Ordering::SeqCst) {
            self.view.set_primary_loading(false);
        }

        let event = match &result {
            Ok(release) => ReleaseEvent::Loaded(release.clone()),
            Err(e) => ReleaseEvent::Failed(e.clone()),
        };
        // No subscribers is fine.
        let _ = self.events.send(event);

        result
    }

    fn apply_release(&self, release: &Arc<ReleaseDescriptor>) {
        info!("Latest release info loaded: {}", release.tag);

        *self.release.write().unwrap_or_else(|e| e.into_inner()) = Some(release.clone());

        self.update_release_metadata_displays(release);
        self.update_download_affordances(self.platform, Some(release.as_ref()));
        self.update_all_download_targets(release);
    }

    fn apply_failure(&self, error: &FetchError) {
        warn!("Could not fetch latest release info: {}", error);

        let cached = self.latest_release();
        self.update_download_affordances(self.platform, cached.as_deref());
    }

    /// Point the primary download control at the right place for `tag`.
    ///
    /// Without a release the control points at the fallback URL. iOS has no
    /// build: the control is disabled and no asset is looked up.
    pub fn update_download_affordances(
        &self,
        tag: PlatformTag,
        release: Option<&ReleaseDescriptor>,
    ) {
        if let Some(label) = platform_label(self.locale, tag) {
            self.view.set_primary_label(label);
        }

        if tag == PlatformTag::Ios {
            self.view.disable_primary(ios_notice(self.locale));
        } else {
            match release {
                Some(release) => match resolve_asset_for_platform(tag, release) {
                    Some(asset) => {
                        self.view.set_primary_target(&asset.browser_download_url);
                        self.view.set_primary_size(size_label(asset.size));
                    }
                    None => {
                        debug!("No {} asset in {}, using release page", tag, release.tag);
                        self.view.set_primary_target(&release.html_url);
                        self.view.set_primary_size(None);
                    }
                },
                None => {
                    self.view.set_primary_target(&self.fallback_url);
                    self.view.set_primary_size(None);
                }
            }
        }

        self.view.add_root_class(&tag.marker_class());
    }

    /// Version, publish date, download total and release-notes links.
    pub fn update_release_metadata_displays(&self, release: &ReleaseDescriptor) {
        let date = release
            .published_at
            .as_ref()
            .map(|d| format_release_date(d, self.locale));
        let count = format_count(release.total_downloads(), self.locale);

        self.view.set_metadata_displays(&release.tag, date, &count);
        self.view.set_release_notes_links(&release.html_url);
    }

    /// Rewire the fixed per-platform controls and every `data-platform` link.
    ///
    /// Controls with no matching asset point at the release page, so nothing
    /// keeps a link from an earlier release.
    pub fn update_all_download_targets(&self, release: &ReleaseDescriptor) {
        for (needle, selector) in DOWNLOAD_TARGETS {
            match SubstringAssetPicker::new(*needle).pick(&release.assets) {
                Some(asset) => self.view.set_download_target(
                    selector,
                    &asset.browser_download_url,
                    size_label(asset.size).map(|size| format!("({})", size)),
                ),
                None => {
                    debug!("No asset matches {}, using release page", needle);
                    self.view
                        .set_download_target(selector, &release.html_url, None);
                }
            }
        }

        for platform in self.view.platform_links() {
            match SubstringAssetPicker::new(platform.as_str()).pick(&release.assets) {
                Some(asset) => self
                    .view
                    .set_platform_link(&platform, &asset.browser_download_url),
                None => {
                    debug!("No asset matches data-platform={}", platform);
                    self.view.set_platform_link(&platform, &release.html_url);
                }
            }
        }
    }
}

/// Size text for an asset; unknown (zero) sizes show nothing.
fn size_label(bytes: u64) -> Option<String> {
    (bytes > 0).then(|| format_byte_size(bytes))
}
