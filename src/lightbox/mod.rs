//! Full-screen gallery viewer: one open session over an ordered list of
//! media items, with wraparound navigation, neighbour prefetch and guarded
//! application of asynchronous load results.

pub mod controller;
pub mod input;
pub mod prefetch;
pub mod scroll;
pub mod session;
pub mod view;

pub use controller::{LightboxController, LightboxEvent};
pub use input::{InputEvent, Key, SwipeTracker, SWIPE_THRESHOLD_PX};
pub use prefetch::{
    AssetKind, HttpPrefetcher, LoadOutcome, LoadRequest, LoadResult, LoadTicket, Prefetcher,
};
pub use scroll::{CountingScrollLock, NoScrollLock, ScrollGuard, ScrollLock};
pub use session::{Direction, ItemPhase, LightboxError, LightboxSession, LoadState, PlaybackState};
pub use view::{LightboxView, MediaSurface, NavDots, PhaseLabel};
