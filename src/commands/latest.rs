use anyhow::{Context, Result};
use log::debug;

use crate::{
    format::{format_byte_size, format_count},
    labels::Locale,
    platform::{ClientIdentity, resolve_asset_for_platform},
    release::ReleaseDescriptor,
    source::ReleaseSource,
};

use super::{config::Config, services::build_source};

/// Print the latest release and the asset offered to a client
#[tracing::instrument(skip(config))]
pub async fn latest(config: &Config, identity: &ClientIdentity) -> Result<()> {
    let source = build_source(config)?;
    let summary = latest_with(&source, identity).await?;
    print!("{}", summary);
    Ok(())
}

pub async fn latest_with<S: ReleaseSource>(
    source: &S,
    identity: &ClientIdentity,
) -> Result<String> {
    debug!("Fetching latest release from {}", source.api_base());
    let release = source
        .fetch_latest_release()
        .await
        .with_context(|| format!("Could not fetch latest release from {}", source.api_base()))?;
    Ok(summarize(&release, identity))
}

fn summarize(release: &ReleaseDescriptor, identity: &ClientIdentity) -> String {
    let tag = identity.platform_tag();
    let mut out = String::new();

    out.push_str(&format!("Version: {}\n", release.tag));
    if let Some(published_at) = release.published_at {
        out.push_str(&format!("Published: {}\n", published_at.format("%Y-%m-%d")));
    }
    out.push_str(&format!("Release page: {}\n", release.html_url));
    out.push_str(&format!(
        "Downloads: {}\n",
        format_count(release.total_downloads(), Locale::En)
    ));
    out.push_str(&format!("Platform: {}\n", tag));

    match resolve_asset_for_platform(tag, release) {
        Some(asset) => out.push_str(&format!(
            "Asset: {} ({})\nDownload: {}\n",
            asset.name,
            format_byte_size(asset.size),
            asset.browser_download_url
        )),
        None => out.push_str(&format!("Asset: none\nDownload: {}\n", release.html_url)),
    }

    out
}
