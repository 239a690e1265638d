use std::time::Instant;

use crate::content::lyrics::{LyricLine, active_line};

/// Tracks the highlighted lyric line and decides when the lyric list
/// should scroll to it.
#[derive(Debug, Clone, Default)]
pub struct LyricSync {
    active: Option<usize>,
    visible: bool,
    suppressed_until: Option<Instant>,
    scroll_request: Option<usize>,
}

impl LyricSync {
    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn toggle_visible(&mut self) -> bool {
        self.visible = !self.visible;
        self.visible
    }

    pub fn is_suppressed(&self, now: Instant) -> bool {
        self.suppressed_until.is_some_and(|until| now < until)
    }

    pub fn suppress_until(&mut self, until: Instant) {
        self.suppressed_until = Some(until);
        self.scroll_request = None;
    }

    pub fn update(&mut self, lyrics: &[LyricLine], position: f64, now: Instant) {
        self.active = active_line(lyrics, position);
        if self.visible && !self.is_suppressed(now) {
            self.scroll_request = self.active;
        }
    }

    pub fn take_scroll_request(&mut self) -> Option<usize> {
        self.scroll_request.take()
    }

    pub fn reset(&mut self) {
        self.active = None;
        self.scroll_request = None;
    }
}
