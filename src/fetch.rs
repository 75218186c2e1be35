use std::path::Path;

use anyhow::{anyhow, Context};
use futures_util::TryStreamExt;
use reqwest::header::CONTENT_TYPE;
use tokio::fs;
use url::Url;

use crate::error::Result;
use crate::session::HttpSession;

const MAX_IMAGE_BYTES: usize = 20 * 1024 * 1024;

/// Image bytes fetched for a resolved URL.
#[derive(Debug)]
pub struct DownloadedImage {
    /// URL after redirects; the provider answers seeded URLs with a redirect to its CDN.
    pub final_url: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Fetch the image behind a resolved URL.
pub async fn download_image(session: &HttpSession, image_url: &str) -> Result<DownloadedImage> {
    let url = Url::parse(image_url).with_context(|| format!("invalid image url `{image_url}`"))?;

    tracing::debug!("fetching {url} as {}", session.user_agent());
    let response = session
        .client()
        .get(url)
        .send()
        .await
        .with_context(|| format!("requesting {image_url}"))?;

    let status = response.status();
    if !status.is_success() {
        tracing::warn!("image download failed with HTTP {status} for {image_url}");
        return Err(anyhow!("image request failed: {status}"));
    }

    let final_url = response.url().to_string();
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);

    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.try_next().await.context("reading image body")? {
        if bytes.len() + chunk.len() > MAX_IMAGE_BYTES {
            return Err(anyhow!(
                "image body exceeds {MAX_IMAGE_BYTES} bytes; refusing to buffer it"
            ));
        }
        bytes.extend_from_slice(&chunk);
    }

    tracing::info!(
        "downloaded {} bytes ({}) from {final_url}",
        bytes.len(),
        content_type.as_deref().unwrap_or("unknown type")
    );

    Ok(DownloadedImage {
        final_url,
        content_type,
        bytes,
    })
}

pub async fn save_image(image: &DownloadedImage, path: &Path) -> Result<()> {
    fs::write(path, &image.bytes)
        .await
        .with_context(|| format!("writing image to {}", path.display()))
}
