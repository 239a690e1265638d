use std::time::Duration;

#[derive(Debug, Clone)]
pub struct AudioConfig {
    /// How long a manual lyric scroll pauses auto-scrolling.
    pub scroll_suppress: Duration,
    pub seek_step_secs: u64,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            scroll_suppress: Duration::from_secs(5),
            seek_step_secs: 5,
        }
    }
}
