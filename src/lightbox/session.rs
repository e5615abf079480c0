use crate::lightbox::input::SwipeTracker;
use crate::lightbox::scroll::ScrollGuard;
use crate::media::model::{MediaReference, MediaType};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum LightboxError {
    #[error("cannot open a lightbox with no items")]
    EmptyItems,
    #[error("start index {index} out of range for {len} items")]
    IndexOutOfRange { index: usize, len: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Prev,
    Next,
}

/// Reset on every index change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlaybackState {
    pub is_playing: bool,
    pub is_zoomed: bool,
}

/// Reset on every index change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadState {
    pub full_image_loaded: bool,
    pub image_error: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemPhase {
    ThumbnailShown,
    FullResolutionLoading,
    FullResolutionShown,
    LoadFailed,
}

/// One open viewing session. Owns the scroll guard, so the page lock lives
/// exactly as long as the session does.
#[derive(Debug)]
pub struct LightboxSession {
    items: Vec<MediaReference>,
    current_index: usize,
    playback: PlaybackState,
    load: LoadState,
    full_requested: bool,
    generation: u64,
    pub(crate) swipe: SwipeTracker,
    _scroll: ScrollGuard,
}

impl LightboxSession {
    pub(crate) fn check(items: &[MediaReference], start: usize) -> Result<(), LightboxError> {
        if items.is_empty() {
            return Err(LightboxError::EmptyItems);
        }
        if start >= items.len() {
            return Err(LightboxError::IndexOutOfRange {
                index: start,
                len: items.len(),
            });
        }
        Ok(())
    }

    pub(crate) fn new(
        items: Vec<MediaReference>,
        start: usize,
        generation: u64,
        scroll: ScrollGuard,
    ) -> Result<Self, LightboxError> {
        Self::check(&items, start)?;
        Ok(Self {
            items,
            current_index: start,
            playback: PlaybackState::default(),
            load: LoadState::default(),
            full_requested: false,
            generation,
            swipe: SwipeTracker::default(),
            _scroll: scroll,
        })
    }

    pub fn items(&self) -> &[MediaReference] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_item(&self) -> &MediaReference {
        &self.items[self.current_index]
    }

    pub fn playback(&self) -> PlaybackState {
        self.playback
    }

    pub fn load_state(&self) -> LoadState {
        self.load
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_video(&self) -> bool {
        self.current_item().media_type == MediaType::Video
    }

    pub fn phase(&self) -> ItemPhase {
        if self.load.image_error {
            ItemPhase::LoadFailed
        } else if self.load.full_image_loaded {
            ItemPhase::FullResolutionShown
        } else if self.full_requested {
            ItemPhase::FullResolutionLoading
        } else {
            ItemPhase::ThumbnailShown
        }
    }

    /// Move one step with wraparound and start a new generation.
    pub(crate) fn step(&mut self, direction: Direction, generation: u64) -> usize {
        let n = self.items.len();
        self.current_index = match direction {
            Direction::Prev => (self.current_index + n - 1) % n,
            Direction::Next => (self.current_index + 1) % n,
        };
        self.generation = generation;
        self.playback = PlaybackState::default();
        self.load = LoadState::default();
        self.full_requested = false;
        self.current_index
    }

    pub(crate) fn mark_full_requested(&mut self) {
        self.full_requested = true;
    }

    pub(crate) fn mark_loaded(&mut self) {
        self.load.full_image_loaded = true;
    }

    pub(crate) fn mark_failed(&mut self) {
        self.load.image_error = true;
        self.playback.is_zoomed = false;
    }

    /// Start the current video. False when not a video or already playing.
    pub(crate) fn play_video(&mut self) -> bool {
        if !self.is_video() || self.playback.is_playing {
            return false;
        }
        self.playback.is_playing = true;
        true
    }

    /// Zoom only operates on a loaded full-resolution photo.
    pub(crate) fn toggle_zoom(&mut self) -> bool {
        if self.is_video() || !self.load.full_image_loaded || self.load.image_error {
            return false;
        }
        self.playback.is_zoomed = !self.playback.is_zoomed;
        true
    }
}
