use crate::lightbox::input::{InputEvent, Key};
use crate::lightbox::prefetch::{plan_requests, AssetKind, LoadOutcome, LoadResult, LoadTicket, Prefetcher};
use crate::lightbox::scroll::{ScrollGuard, ScrollLock};
use crate::lightbox::session::{Direction, LightboxError, LightboxSession};
use crate::lightbox::view::LightboxView;
use crate::media::model::{MediaReference, MediaType};
use std::rc::Rc;

/// Notifications for the host page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightboxEvent {
    Navigated { index: usize },
    Closed,
}

/// Owns at most one [`LightboxSession`]; `None` is the Closed state.
///
/// The generation counter outlives sessions, so a completion that was issued
/// for a closed or replaced session can never match the live one.
pub struct LightboxController<P: Prefetcher> {
    session: Option<LightboxSession>,
    prefetcher: P,
    scroll_lock: Rc<dyn ScrollLock>,
    generation: u64,
}

impl<P: Prefetcher> LightboxController<P> {
    pub fn new(prefetcher: P, scroll_lock: Rc<dyn ScrollLock>) -> Self {
        Self {
            session: None,
            prefetcher,
            scroll_lock,
            generation: 0,
        }
    }

    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&LightboxSession> {
        self.session.as_ref()
    }

    pub fn view(&self) -> Option<LightboxView> {
        self.session.as_ref().map(LightboxView::from_session)
    }

    fn next_generation(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    /// Open a session over `items` at `start`. An invalid request leaves the
    /// controller exactly as it was.
    pub fn open(&mut self, items: Vec<MediaReference>, start: usize) -> Result<(), LightboxError> {
        LightboxSession::check(&items, start)?;
        // Release the previous session's lock before taking a new one.
        self.session = None;
        let generation = self.next_generation();
        let guard = ScrollGuard::acquire(self.scroll_lock.clone());
        let session = LightboxSession::new(items, start, generation, guard)?;
        tracing::info!(
            "lightbox open: items={} start={} generation={}",
            session.len(),
            start,
            generation
        );
        self.session = Some(session);
        self.schedule_prefetch();
        Ok(())
    }

    /// Drop the session and everything tied to it. Returns false if already closed.
    pub fn close(&mut self) -> bool {
        match self.session.take() {
            Some(session) => {
                tracing::info!("lightbox close: index={}", session.current_index());
                // Anything still in flight now carries a dead generation.
                self.next_generation();
                true
            }
            None => false,
        }
    }

    pub fn navigate(&mut self, direction: Direction) -> Option<usize> {
        self.session.as_ref()?;
        let generation = self.next_generation();
        let session = self.session.as_mut()?;
        let index = session.step(direction, generation);
        tracing::debug!("lightbox navigate: {:?} -> {} (gen {})", direction, index, generation);
        self.schedule_prefetch();
        Some(index)
    }

    pub fn play_video(&mut self) -> bool {
        self.session.as_mut().is_some_and(|s| s.play_video())
    }

    pub fn toggle_zoom(&mut self) -> bool {
        self.session.as_mut().is_some_and(|s| s.toggle_zoom())
    }

    /// Apply a finished load. Returns true only when the result changed what
    /// is on screen; stale and prefetch-only results are dropped.
    pub fn apply_load_result(&mut self, result: LoadResult) -> bool {
        let Some(session) = self.session.as_mut() else {
            tracing::debug!("load result after close dropped: {:?}", result.ticket);
            return false;
        };
        if !is_current_ticket(session, &result.ticket) {
            tracing::debug!(
                "stale load result dropped: {:?} (current index={} gen={})",
                result.ticket,
                session.current_index(),
                session.generation()
            );
            return false;
        }
        match result.outcome {
            LoadOutcome::Loaded => session.mark_loaded(),
            LoadOutcome::Failed(reason) => {
                tracing::warn!(
                    "full resolution load failed for item {}: {}",
                    session.current_item().id,
                    reason
                );
                session.mark_failed();
            }
        }
        true
    }

    pub fn on_load_complete(&mut self, ticket: LoadTicket) -> bool {
        self.apply_load_result(LoadResult {
            ticket,
            outcome: LoadOutcome::Loaded,
        })
    }

    pub fn on_load_failed(&mut self, ticket: LoadTicket, reason: impl Into<String>) -> bool {
        self.apply_load_result(LoadResult {
            ticket,
            outcome: LoadOutcome::Failed(reason.into()),
        })
    }

    pub fn handle_input(&mut self, event: InputEvent) -> Option<LightboxEvent> {
        self.session.as_ref()?;
        match event {
            InputEvent::Key(Key::Escape)
            | InputEvent::CloseClicked
            | InputEvent::BackgroundClicked => self.close().then_some(LightboxEvent::Closed),
            InputEvent::Key(Key::ArrowLeft) | InputEvent::PrevClicked => self.navigated(Direction::Prev),
            InputEvent::Key(Key::ArrowRight) | InputEvent::NextClicked => self.navigated(Direction::Next),
            InputEvent::TouchStart { x } => {
                self.session.as_mut()?.swipe.start(x);
                None
            }
            InputEvent::TouchEnd { x } => {
                let direction = self.session.as_mut()?.swipe.finish(x)?;
                self.navigated(direction)
            }
            InputEvent::PlayClicked => {
                self.play_video();
                None
            }
            InputEvent::ImageClicked => {
                self.toggle_zoom();
                None
            }
            InputEvent::SurfaceClicked | InputEvent::Key(Key::Other) => None,
        }
    }

    fn navigated(&mut self, direction: Direction) -> Option<LightboxEvent> {
        self.navigate(direction)
            .map(|index| LightboxEvent::Navigated { index })
    }

    fn schedule_prefetch(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let requests = plan_requests(session.items(), session.current_index(), session.generation());
        if session.current_item().media_type == MediaType::Photo {
            session.mark_full_requested();
        }
        for request in requests {
            tracing::debug!("prefetch: {:?} {}", request.ticket, request.url);
            self.prefetcher.prefetch(request);
        }
    }
}

fn is_current_ticket(session: &LightboxSession, ticket: &LoadTicket) -> bool {
    ticket.generation == session.generation()
        && ticket.index == session.current_index()
        && ticket.kind == AssetKind::FullImage
        && session.current_item().media_type == MediaType::Photo
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lightbox::prefetch::LoadRequest;
    use crate::lightbox::scroll::CountingScrollLock;
    use crate::lightbox::session::{ItemPhase, LoadState, PlaybackState};
    use crate::lightbox::view::{MediaSurface, PhaseLabel, LOAD_FAILED_MESSAGE};
    use crate::media::model::Category;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingPrefetcher {
        requests: RefCell<Vec<LoadRequest>>,
    }

    impl RecordingPrefetcher {
        fn drain(&self) -> Vec<LoadRequest> {
            std::mem::take(&mut *self.requests.borrow_mut())
        }
    }

    impl Prefetcher for RecordingPrefetcher {
        fn prefetch(&self, request: LoadRequest) {
            self.requests.borrow_mut().push(request);
        }
    }

    struct Harness {
        controller: LightboxController<Rc<RecordingPrefetcher>>,
        prefetcher: Rc<RecordingPrefetcher>,
        lock: Rc<CountingScrollLock>,
    }

    fn harness() -> Harness {
        let prefetcher = Rc::new(RecordingPrefetcher::default());
        let lock = Rc::new(CountingScrollLock::default());
        Harness {
            controller: LightboxController::new(prefetcher.clone(), lock.clone()),
            prefetcher,
            lock,
        }
    }

    fn photo(n: usize) -> MediaReference {
        MediaReference {
            id: format!("photo-{}", n),
            media_type: MediaType::Photo,
            category: Category::Wedding,
            raw_url: format!("https://drive.google.com/file/d/file{}/view", n),
            full_resolution_url: None,
            title: Some(format!("Photo {}", n)),
            created_at: "2024-01-01T00:00:00.000000Z".to_string(),
        }
    }

    fn video(n: usize) -> MediaReference {
        MediaReference {
            id: format!("video-{}", n),
            media_type: MediaType::Video,
            category: Category::Wedding,
            raw_url: format!("https://youtu.be/vid{}", n),
            full_resolution_url: None,
            title: None,
            created_at: "2024-01-01T00:00:00.000000Z".to_string(),
        }
    }

    fn photos(n: usize) -> Vec<MediaReference> {
        (0..n).map(photo).collect()
    }

    fn current_ticket(h: &Harness) -> LoadTicket {
        let session = h.controller.session().unwrap();
        LoadTicket {
            index: session.current_index(),
            generation: session.generation(),
            kind: AssetKind::FullImage,
        }
    }

    fn index(h: &Harness) -> usize {
        h.controller.session().unwrap().current_index()
    }

    // ── Open / close ─────────────────────────────────────────────────────────

    #[test]
    fn test_open_rejects_empty_and_out_of_range() {
        let mut h = harness();
        assert_eq!(h.controller.open(vec![], 0), Err(LightboxError::EmptyItems));
        assert_eq!(
            h.controller.open(photos(3), 3),
            Err(LightboxError::IndexOutOfRange { index: 3, len: 3 })
        );
        assert!(!h.controller.is_open());
        assert!(!h.lock.is_locked());
        assert!(h.prefetcher.drain().is_empty());
    }

    #[test]
    fn test_invalid_open_keeps_existing_session() {
        let mut h = harness();
        h.controller.open(photos(3), 1).unwrap();
        assert!(h.controller.open(vec![], 0).is_err());
        assert!(h.controller.is_open());
        assert_eq!(index(&h), 1);
        assert_eq!(h.lock.depth(), 1);
    }

    #[test]
    fn test_open_prefetches_current_then_neighbours() {
        let mut h = harness();
        h.controller.open(photos(5), 2).unwrap();
        let indices: Vec<usize> = h.prefetcher.drain().iter().map(|r| r.ticket.index).collect();
        assert_eq!(indices, vec![2, 1, 3]);
        assert_eq!(
            h.controller.session().unwrap().phase(),
            ItemPhase::FullResolutionLoading
        );
    }

    #[test]
    fn test_open_and_close_manage_scroll_lock() {
        let mut h = harness();
        h.controller.open(photos(2), 0).unwrap();
        assert!(h.lock.is_locked());
        assert!(h.controller.close());
        assert!(!h.lock.is_locked());
        assert!(!h.controller.close(), "second close is a no-op");
    }

    #[test]
    fn test_reopen_does_not_leak_lock() {
        let mut h = harness();
        h.controller.open(photos(2), 0).unwrap();
        h.controller.open(photos(4), 3).unwrap();
        assert_eq!(h.lock.depth(), 1);
    }

    #[test]
    fn test_dropping_controller_releases_lock() {
        let mut h = harness();
        h.controller.open(photos(2), 0).unwrap();
        let lock = h.lock.clone();
        drop(h);
        assert!(!lock.is_locked());
    }

    // ── Navigation ───────────────────────────────────────────────────────────

    #[test]
    fn test_navigation_wraps_both_ways() {
        let mut h = harness();
        h.controller.open(photos(5), 2).unwrap();
        assert_eq!(h.controller.navigate(Direction::Prev), Some(1));
        h.controller.navigate(Direction::Prev);
        h.controller.navigate(Direction::Prev);
        assert_eq!(h.controller.navigate(Direction::Prev), Some(3));

        h.controller.navigate(Direction::Next);
        assert_eq!(index(&h), 4);
        assert_eq!(h.controller.navigate(Direction::Next), Some(0));
    }

    #[test]
    fn test_navigate_when_closed_is_none() {
        let mut h = harness();
        assert_eq!(h.controller.navigate(Direction::Next), None);
    }

    #[test]
    fn test_single_item_navigation_stays_put() {
        let mut h = harness();
        h.controller.open(photos(1), 0).unwrap();
        assert_eq!(h.controller.navigate(Direction::Next), Some(0));
        assert_eq!(h.controller.navigate(Direction::Prev), Some(0));
    }

    #[test]
    fn test_navigate_resets_transient_state() {
        let mut h = harness();
        h.controller.open(photos(3), 0).unwrap();
        let ticket = current_ticket(&h);
        assert!(h.controller.on_load_complete(ticket));
        assert!(h.controller.toggle_zoom());
        assert!(h.controller.session().unwrap().playback().is_zoomed);

        h.controller.navigate(Direction::Next);
        let session = h.controller.session().unwrap();
        assert_eq!(session.playback(), PlaybackState::default());
        assert_eq!(session.load_state(), LoadState::default());

        let mut h = harness();
        h.controller.open(vec![video(0), video(1)], 0).unwrap();
        assert!(h.controller.play_video());
        h.controller.navigate(Direction::Prev);
        assert!(!h.controller.session().unwrap().playback().is_playing);
    }

    #[test]
    fn test_navigate_retriggers_prefetch() {
        let mut h = harness();
        h.controller.open(photos(5), 0).unwrap();
        h.prefetcher.drain();
        h.controller.navigate(Direction::Next);
        let requests = h.prefetcher.drain();
        let indices: Vec<usize> = requests.iter().map(|r| r.ticket.index).collect();
        assert_eq!(indices, vec![1, 0, 2]);
        let generation = h.controller.session().unwrap().generation();
        assert!(requests.iter().all(|r| r.ticket.generation == generation));
    }

    // ── Loading ──────────────────────────────────────────────────────────────

    #[test]
    fn test_load_completion_swaps_to_full_image() {
        let mut h = harness();
        h.controller.open(photos(3), 0).unwrap();
        assert!(h.controller.on_load_complete(current_ticket(&h)));

        let view = h.controller.view().unwrap();
        match view.surface {
            MediaSurface::Photo { display_url, full_url, phase, zoom_available, .. } => {
                assert_eq!(display_url, full_url);
                assert_eq!(full_url, "https://drive.google.com/thumbnail?id=file0&sz=w4000");
                assert_eq!(phase, PhaseLabel::FullResolutionShown);
                assert!(zoom_available);
            }
            other => panic!("expected photo surface, got {:?}", other),
        }
    }

    #[test]
    fn test_stale_completion_is_discarded() {
        let mut h = harness();
        h.controller.open(photos(5), 2).unwrap();
        let old = current_ticket(&h);
        h.controller.navigate(Direction::Next);

        assert!(!h.controller.on_load_complete(old));
        assert!(!h.controller.session().unwrap().load_state().full_image_loaded);
        assert!(!h.controller.on_load_failed(old, "timeout"));
        assert!(!h.controller.session().unwrap().load_state().image_error);
    }

    #[test]
    fn test_completion_for_same_index_previous_visit_is_stale() {
        let mut h = harness();
        h.controller.open(photos(3), 0).unwrap();
        let first_visit = current_ticket(&h);
        h.controller.navigate(Direction::Next);
        h.controller.navigate(Direction::Prev);
        assert_eq!(index(&h), 0);
        assert!(!h.controller.on_load_complete(first_visit));
    }

    #[test]
    fn test_neighbour_completion_changes_nothing_visible() {
        let mut h = harness();
        h.controller.open(photos(5), 2).unwrap();
        let requests = h.prefetcher.drain();
        let neighbour = requests.iter().find(|r| r.ticket.index == 3).unwrap().ticket;
        assert!(!h.controller.on_load_complete(neighbour));
        assert!(!h.controller.session().unwrap().load_state().full_image_loaded);
    }

    #[test]
    fn test_completion_after_close_is_discarded() {
        let mut h = harness();
        h.controller.open(photos(3), 0).unwrap();
        let ticket = current_ticket(&h);
        h.controller.close();
        assert!(!h.controller.on_load_complete(ticket));

        h.controller.open(photos(3), 0).unwrap();
        assert!(
            !h.controller.on_load_complete(ticket),
            "a ticket from a previous session must not match a new one"
        );
    }

    #[test]
    fn test_load_failure_keeps_thumbnail_and_blocks_zoom() {
        let mut h = harness();
        h.controller.open(photos(2), 0).unwrap();
        assert!(h.controller.on_load_failed(current_ticket(&h), "HTTP 403"));
        assert!(!h.controller.toggle_zoom());

        let view = h.controller.view().unwrap();
        match view.surface {
            MediaSurface::Photo { display_url, thumbnail_url, phase, error, zoomed, .. } => {
                assert_eq!(display_url, thumbnail_url);
                assert_eq!(phase, PhaseLabel::LoadFailed);
                assert_eq!(error.as_deref(), Some(LOAD_FAILED_MESSAGE));
                assert!(!zoomed);
            }
            other => panic!("expected photo surface, got {:?}", other),
        }
        // Still navigable
        assert_eq!(h.controller.navigate(Direction::Next), Some(1));
    }

    // ── Zoom / playback ──────────────────────────────────────────────────────

    #[test]
    fn test_toggle_zoom_requires_loaded_full_image() {
        let mut h = harness();
        h.controller.open(photos(2), 0).unwrap();
        let before = h.controller.session().unwrap().playback();
        assert!(!h.controller.toggle_zoom());
        assert_eq!(h.controller.session().unwrap().playback(), before);

        h.controller.on_load_complete(current_ticket(&h));
        assert!(h.controller.toggle_zoom());
        assert!(h.controller.toggle_zoom());
        assert!(!h.controller.session().unwrap().playback().is_zoomed);
    }

    #[test]
    fn test_play_video_only_for_videos_and_once() {
        let mut h = harness();
        h.controller.open(vec![photo(0), video(1)], 0).unwrap();
        assert!(!h.controller.play_video());

        h.controller.navigate(Direction::Next);
        assert_eq!(h.controller.session().unwrap().phase(), ItemPhase::ThumbnailShown);
        assert!(h.controller.play_video());
        assert!(!h.controller.play_video(), "already playing");

        match h.controller.view().unwrap().surface {
            MediaSurface::Video { player_url, poster_url, playing, .. } => {
                assert!(playing);
                assert_eq!(
                    player_url.as_deref(),
                    Some("https://www.youtube.com/embed/vid1?autoplay=1")
                );
                assert_eq!(
                    poster_url.as_deref(),
                    Some("https://img.youtube.com/vi/vid1/maxresdefault.jpg")
                );
            }
            other => panic!("expected video surface, got {:?}", other),
        }
    }

    #[test]
    fn test_video_poster_completion_is_not_visible_state() {
        let mut h = harness();
        h.controller.open(vec![video(0)], 0).unwrap();
        let requests = h.prefetcher.drain();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].ticket.kind, AssetKind::VideoPoster);
        assert!(!h.controller.on_load_complete(requests[0].ticket));
        assert!(!h.controller.toggle_zoom());
    }

    // ── Input mapping ────────────────────────────────────────────────────────

    #[test]
    fn test_keyboard_mapping() {
        let mut h = harness();
        h.controller.open(photos(3), 0).unwrap();
        assert_eq!(
            h.controller.handle_input(InputEvent::Key(Key::ArrowLeft)),
            Some(LightboxEvent::Navigated { index: 2 })
        );
        assert_eq!(
            h.controller.handle_input(InputEvent::Key(Key::ArrowRight)),
            Some(LightboxEvent::Navigated { index: 0 })
        );
        assert_eq!(h.controller.handle_input(InputEvent::Key(Key::Other)), None);
        assert_eq!(
            h.controller.handle_input(InputEvent::Key(Key::Escape)),
            Some(LightboxEvent::Closed)
        );
        assert!(!h.controller.is_open());
        assert_eq!(h.controller.handle_input(InputEvent::Key(Key::ArrowRight)), None);
    }

    #[test]
    fn test_click_mapping() {
        let mut h = harness();
        h.controller.open(photos(3), 1).unwrap();
        assert_eq!(
            h.controller.handle_input(InputEvent::NextClicked),
            Some(LightboxEvent::Navigated { index: 2 })
        );
        assert_eq!(
            h.controller.handle_input(InputEvent::PrevClicked),
            Some(LightboxEvent::Navigated { index: 1 })
        );
        assert_eq!(h.controller.handle_input(InputEvent::SurfaceClicked), None);
        assert!(h.controller.is_open(), "surface clicks never close");
        assert_eq!(
            h.controller.handle_input(InputEvent::BackgroundClicked),
            Some(LightboxEvent::Closed)
        );
        assert!(!h.lock.is_locked());
    }

    #[test]
    fn test_swipe_mapping() {
        let mut h = harness();
        h.controller.open(photos(4), 1).unwrap();

        h.controller.handle_input(InputEvent::TouchStart { x: 300.0 });
        assert_eq!(
            h.controller.handle_input(InputEvent::TouchEnd { x: 120.0 }),
            Some(LightboxEvent::Navigated { index: 2 })
        );

        h.controller.handle_input(InputEvent::TouchStart { x: 100.0 });
        assert_eq!(
            h.controller.handle_input(InputEvent::TouchEnd { x: 260.0 }),
            Some(LightboxEvent::Navigated { index: 1 })
        );

        h.controller.handle_input(InputEvent::TouchStart { x: 100.0 });
        assert_eq!(h.controller.handle_input(InputEvent::TouchEnd { x: 140.0 }), None);
        assert_eq!(index(&h), 1);
    }

    #[test]
    fn test_image_click_toggles_zoom_and_play_click_plays() {
        let mut h = harness();
        h.controller.open(vec![photo(0), video(1)], 0).unwrap();
        h.controller.on_load_complete(current_ticket(&h));
        h.controller.handle_input(InputEvent::ImageClicked);
        assert!(h.controller.session().unwrap().playback().is_zoomed);

        h.controller.handle_input(InputEvent::NextClicked);
        h.controller.handle_input(InputEvent::PlayClicked);
        assert!(h.controller.session().unwrap().playback().is_playing);
    }

    #[test]
    fn test_view_position_and_title() {
        let mut h = harness();
        h.controller.open(photos(5), 2).unwrap();
        let view = h.controller.view().unwrap();
        assert_eq!(view.position_label, "3 / 5");
        assert_eq!(view.title.as_deref(), Some("Photo 2"));
        assert_eq!(view.item_id, "photo-2");
        h.controller.close();
        assert!(h.controller.view().is_none());
    }
}
