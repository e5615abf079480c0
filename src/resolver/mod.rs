//! Media link resolution for the two supported hosts (YouTube, Google Drive).
//!
//! Every function here is total: when an identifier cannot be extracted the
//! input comes back unchanged, so malformed operator input never breaks a page.
//! Host detection happens once in [`classify_host`]; everything else dispatches
//! on the resulting [`MediaHost`].

mod patterns;

use crate::media::model::{MediaReference, MediaType};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Drive blocks hot-linking originals, so the thumbnail endpoint at this
/// width stands in for "full resolution".
pub const FULL_SCREEN_WIDTH: u32 = 4000;

/// Width used for gallery tiles and category cards.
pub const DEFAULT_THUMBNAIL_WIDTH: u32 = 800;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaHost {
    YouTube,
    GoogleDrive,
    Other,
}

/// YouTube still-image sizes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThumbnailQuality {
    Default,
    Medium,
    #[default]
    High,
    MaxRes,
}

impl ThumbnailQuality {
    pub fn token(self) -> &'static str {
        match self {
            ThumbnailQuality::Default => "default",
            ThumbnailQuality::Medium => "mqdefault",
            ThumbnailQuality::High => "hqdefault",
            ThumbnailQuality::MaxRes => "maxresdefault",
        }
    }
}

impl FromStr for ThumbnailQuality {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" => Ok(ThumbnailQuality::Default),
            "medium" => Ok(ThumbnailQuality::Medium),
            "high" => Ok(ThumbnailQuality::High),
            "maxres" => Ok(ThumbnailQuality::MaxRes),
            other => Err(format!("unknown thumbnail quality: {}", other)),
        }
    }
}

/// Classify on the link's host, so a query string that merely mentions
/// another host cannot change the answer. Scheme-less links are read as
/// https; text that does not parse at all falls back to substring checks.
pub fn classify_host(url: &str) -> MediaHost {
    match link_host(url) {
        Some(host) => host_kind(&host),
        None => substring_kind(url),
    }
}

fn link_host(url: &str) -> Option<String> {
    let trimmed = url.trim();
    let parsed = reqwest::Url::parse(trimmed)
        .ok()
        .filter(|u| u.has_host())
        .or_else(|| reqwest::Url::parse(&format!("https://{}", trimmed)).ok())?;
    parsed.host_str().map(|h| h.to_ascii_lowercase())
}

fn host_kind(host: &str) -> MediaHost {
    let is = |domain: &str| host == domain || host.ends_with(&format!(".{}", domain));
    if is("youtube.com") || is("youtu.be") {
        MediaHost::YouTube
    } else if host == "drive.google.com" {
        MediaHost::GoogleDrive
    } else {
        MediaHost::Other
    }
}

fn substring_kind(url: &str) -> MediaHost {
    if url.contains("youtube.com") || url.contains("youtu.be") {
        MediaHost::YouTube
    } else if url.contains("drive.google.com") {
        MediaHost::GoogleDrive
    } else {
        MediaHost::Other
    }
}

fn is_canonical_embed(url: &str) -> bool {
    match classify_host(url) {
        MediaHost::YouTube => url.contains("youtube.com/embed/"),
        MediaHost::GoogleDrive => url.contains("drive.google.com/file/d/") && url.contains("/preview"),
        MediaHost::Other => false,
    }
}

/// Rewrite a share link into the host's canonical embeddable form.
///
/// Idempotent: canonical embed URLs are returned untouched.
pub fn to_embed_url(url: &str) -> String {
    if is_canonical_embed(url) {
        return url.to_string();
    }
    let embed = match classify_host(url) {
        MediaHost::YouTube => patterns::youtube_video_id(url)
            .map(|id| format!("https://www.youtube.com/embed/{}", id)),
        MediaHost::GoogleDrive => patterns::drive_file_id(url)
            .map(|id| format!("https://drive.google.com/file/d/{}/preview", id)),
        MediaHost::Other => None,
    };
    embed.unwrap_or_else(|| url.to_string())
}

/// Still image for a YouTube link, or `None` when the link is not a
/// recognisable YouTube video. Callers treat `None` as "use the source".
pub fn to_video_thumbnail(url: &str, quality: ThumbnailQuality) -> Option<String> {
    if classify_host(url) != MediaHost::YouTube {
        return None;
    }
    let embed = to_embed_url(url);
    let id = patterns::youtube_video_id(&embed)?;
    Some(format!("https://img.youtube.com/vi/{}/{}.jpg", id, quality.token()))
}

fn drive_thumbnail(url: &str, width: u32) -> Option<String> {
    patterns::drive_file_id(url)
        .map(|id| format!("https://drive.google.com/thumbnail?id={}&sz=w{}", id, width))
}

/// Lightweight preview image for a grid tile or card.
pub fn to_thumbnail_url(url: &str, media_type: MediaType, width: u32) -> String {
    let thumbnail = match (classify_host(url), media_type) {
        (MediaHost::YouTube, _) => to_video_thumbnail(url, ThumbnailQuality::High),
        (MediaHost::GoogleDrive, MediaType::Photo) => drive_thumbnail(url, width),
        _ => None,
    };
    thumbnail.unwrap_or_else(|| url.to_string())
}

/// Best available highest-quality rendition for the lightbox.
pub fn to_full_screen_url(item: &MediaReference) -> String {
    match item.media_type {
        MediaType::Video => to_embed_url(&item.raw_url),
        MediaType::Photo => {
            if let Some(full) = item
                .full_resolution_url
                .as_deref()
                .filter(|u| !u.trim().is_empty())
            {
                return full.to_string();
            }
            let drive = match classify_host(&item.raw_url) {
                MediaHost::GoogleDrive => drive_thumbnail(&item.raw_url, FULL_SCREEN_WIDTH),
                _ => None,
            };
            drive.unwrap_or_else(|| to_embed_url(&item.raw_url))
        }
    }
}

/// Player URL with autoplay switched on.
pub fn with_autoplay(embed_url: &str) -> String {
    let separator = if embed_url.contains('?') { '&' } else { '?' };
    format!("{}{}autoplay=1", embed_url, separator)
}
