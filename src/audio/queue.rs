use std::sync::Arc;

use crate::content::music::Track;

/// Circular successor of `index` in a list of `len` items.
pub fn next_index(index: usize, len: usize) -> Option<usize> {
    (len > 0).then(|| (index + 1) % len)
}

/// Circular predecessor of `index` in a list of `len` items.
pub fn prev_index(index: usize, len: usize) -> Option<usize> {
    (len > 0).then(|| (index % len + len - 1) % len)
}

/// Position of `track` in `playlist`: the same allocation first, then an
/// equal track.
pub fn position_of(playlist: &[Arc<Track>], track: &Arc<Track>) -> Option<usize> {
    playlist
        .iter()
        .position(|t| Arc::ptr_eq(t, track))
        .or_else(|| playlist.iter().position(|t| t == track))
}
