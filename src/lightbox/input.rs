use crate::lightbox::session::Direction;

/// Horizontal travel a touch must exceed to count as a swipe.
pub const SWIPE_THRESHOLD_PX: f32 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    ArrowLeft,
    ArrowRight,
    Other,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` name.
    pub fn from_name(name: &str) -> Key {
        match name {
            "Escape" | "Esc" => Key::Escape,
            "ArrowLeft" | "Left" => Key::ArrowLeft,
            "ArrowRight" | "Right" => Key::ArrowRight,
            _ => Key::Other,
        }
    }
}

/// Raw interactions a host forwards to the controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Key(Key),
    TouchStart { x: f32 },
    TouchEnd { x: f32 },
    PrevClicked,
    NextClicked,
    CloseClicked,
    /// Click on the backdrop outside the media surface.
    BackgroundClicked,
    /// Click inside the media surface; never reaches the close handler.
    SurfaceClicked,
    PlayClicked,
    ImageClicked,
}

/// Tracks one touch interaction from start to end.
#[derive(Debug, Default, Clone)]
pub struct SwipeTracker {
    start_x: Option<f32>,
}

impl SwipeTracker {
    pub fn start(&mut self, x: f32) {
        self.start_x = Some(x);
    }

    /// Finish the gesture. Leftward travel means "next", rightward "prev";
    /// anything within the threshold is a tap, not a swipe.
    pub fn finish(&mut self, x: f32) -> Option<Direction> {
        let start = self.start_x.take()?;
        let diff = start - x;
        if diff.abs() <= SWIPE_THRESHOLD_PX {
            return None;
        }
        Some(if diff > 0.0 {
            Direction::Next
        } else {
            Direction::Prev
        })
    }
}
