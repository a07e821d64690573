use anyhow::{Context, Result};
use log::{info, warn};
use std::path::Path;

use crate::{
    binder::{ReleaseBinder, ReleaseEvent},
    platform::{ClientIdentity, IdentityDetector},
    source::ReleaseSource,
    view::{PageLayout, PageModel, PageState},
};

use super::{config::Config, services::build_source};

/// Load a page layout from a JSON file, or use the default layout
pub fn load_layout(path: Option<&Path>, lang: Option<String>) -> Result<PageLayout> {
    let mut layout = match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read page layout {:?}", path))?;
            PageLayout::from_json(&json)?
        }
        None => PageLayout::default(),
    };

    if lang.is_some() {
        layout.lang = lang;
    }

    Ok(layout)
}

/// Bind the latest release to a page and print the resulting page state
#[tracing::instrument(skip(config, layout))]
pub async fn render(config: &Config, identity: &ClientIdentity, layout: PageLayout) -> Result<()> {
    let source = build_source(config)?;
    let state = render_with(source, &config.fallback_url(), identity, layout).await;
    println!("{}", serde_json::to_string_pretty(&state)?);
    Ok(())
}

/// Run the binder once against an in-memory page.
///
/// A failed fetch is not an error here: the page keeps its fallback targets.
pub async fn render_with<S: ReleaseSource>(
    source: S,
    fallback_url: &str,
    identity: &ClientIdentity,
    layout: PageLayout,
) -> PageState {
    let detector = IdentityDetector::new(identity.clone());
    let binder = ReleaseBinder::new(source, PageModel::new(layout), &detector, fallback_url);
    let mut events = binder.subscribe();

    let _ = binder.run().await;

    while let Ok(event) = events.try_recv() {
        match event {
            ReleaseEvent::Loaded(release) => info!("{}: {}", ReleaseEvent::LOADED, release.tag),
            ReleaseEvent::Failed(e) => warn!("{}: {}", ReleaseEvent::FAILED, e),
        }
    }

    binder.view().snapshot()
}
