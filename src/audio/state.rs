use std::sync::Arc;

use crate::content::music::Track;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackStatus {
    #[default]
    Stopped,
    Playing,
    Paused,
}

/// Which track is current and where it sits in the playlist it was started
/// from. `index` always points at `current` while a track is loaded.
#[derive(Debug, Clone, Default)]
pub struct PlaybackState {
    pub status: PlaybackStatus,
    pub current: Option<Arc<Track>>,
    pub playlist: Vec<Arc<Track>>,
    pub index: usize,
}

impl PlaybackState {
    pub fn is_playing(&self) -> bool {
        self.status == PlaybackStatus::Playing
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.current.as_deref()
    }
}
