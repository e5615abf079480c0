use crate::lightbox::session::{ItemPhase, LightboxSession};
use crate::media::model::MediaType;
use crate::resolver::{
    to_embed_url, to_full_screen_url, to_thumbnail_url, to_video_thumbnail, with_autoplay,
    ThumbnailQuality, DEFAULT_THUMBNAIL_WIDTH,
};
use serde::Serialize;

/// Mobile indicator shows at most this many dots plus an overflow count.
pub const NAV_DOT_LIMIT: usize = 10;

pub const LOAD_FAILED_MESSAGE: &str = "Full resolution unavailable, showing preview";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MediaSurface {
    Photo {
        /// What to draw right now: the thumbnail until the full asset lands.
        display_url: String,
        thumbnail_url: String,
        full_url: String,
        phase: PhaseLabel,
        zoomed: bool,
        zoom_available: bool,
        error: Option<String>,
    },
    Video {
        poster_url: Option<String>,
        embed_url: String,
        /// Set once playback starts; autoplay is on.
        player_url: Option<String>,
        playing: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseLabel {
    ThumbnailShown,
    FullResolutionLoading,
    FullResolutionShown,
    LoadFailed,
}

impl From<ItemPhase> for PhaseLabel {
    fn from(phase: ItemPhase) -> Self {
        match phase {
            ItemPhase::ThumbnailShown => PhaseLabel::ThumbnailShown,
            ItemPhase::FullResolutionLoading => PhaseLabel::FullResolutionLoading,
            ItemPhase::FullResolutionShown => PhaseLabel::FullResolutionShown,
            ItemPhase::LoadFailed => PhaseLabel::LoadFailed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavDots {
    pub shown: usize,
    /// `None` when the current item sits past the last dot.
    pub active: Option<usize>,
    pub overflow: usize,
}

impl NavDots {
    pub fn new(current: usize, len: usize) -> Self {
        let shown = len.min(NAV_DOT_LIMIT);
        Self {
            shown,
            active: (current < shown).then_some(current),
            overflow: len.saturating_sub(NAV_DOT_LIMIT),
        }
    }
}

/// Everything a renderer needs for the current item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LightboxView {
    pub item_id: String,
    pub index: usize,
    pub total: usize,
    pub title: Option<String>,
    pub position_label: String,
    pub surface: MediaSurface,
    pub dots: NavDots,
}

impl LightboxView {
    pub fn from_session(session: &LightboxSession) -> Self {
        let item = session.current_item();
        let playback = session.playback();
        let load = session.load_state();

        let surface = match item.media_type {
            MediaType::Photo => {
                let thumbnail_url =
                    to_thumbnail_url(&item.raw_url, MediaType::Photo, DEFAULT_THUMBNAIL_WIDTH);
                let full_url = to_full_screen_url(item);
                let show_full = load.full_image_loaded && !load.image_error;
                MediaSurface::Photo {
                    display_url: if show_full {
                        full_url.clone()
                    } else {
                        thumbnail_url.clone()
                    },
                    thumbnail_url,
                    full_url,
                    phase: session.phase().into(),
                    zoomed: playback.is_zoomed,
                    zoom_available: show_full,
                    error: load.image_error.then(|| LOAD_FAILED_MESSAGE.to_string()),
                }
            }
            MediaType::Video => {
                let embed_url = to_embed_url(&item.raw_url);
                MediaSurface::Video {
                    poster_url: to_video_thumbnail(&item.raw_url, ThumbnailQuality::MaxRes),
                    player_url: playback.is_playing.then(|| with_autoplay(&embed_url)),
                    embed_url,
                    playing: playback.is_playing,
                }
            }
        };

        let index = session.current_index();
        let total = session.len();
        Self {
            item_id: item.id.clone(),
            index,
            total,
            title: item.title.clone(),
            position_label: format!("{} / {}", index + 1, total),
            surface,
            dots: NavDots::new(index, total),
        }
    }
}
