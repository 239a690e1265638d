/// Position and duration of the current load, both in seconds.
///
/// `generation` identifies the load; it advances on every reset so media
/// events raised for an earlier load can be told apart.
#[derive(Debug, Clone, Default)]
pub struct TrackProgress {
    position: f64,
    duration: Option<f64>,
    generation: u64,
}

impl TrackProgress {
    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn duration(&self) -> Option<f64> {
        self.duration
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn set_position(&mut self, position: f64) {
        if position.is_finite() {
            self.position = position.max(0.0);
        }
    }

    pub fn set_duration(&mut self, duration: f64) {
        self.duration = (duration.is_finite() && duration > 0.0).then_some(duration);
    }

    pub fn clamp(&self, target: f64) -> f64 {
        let target = if target.is_finite() { target.max(0.0) } else { 0.0 };
        match self.duration {
            Some(duration) => target.min(duration),
            None => target,
        }
    }

    pub fn ratio(&self) -> f64 {
        match self.duration {
            Some(duration) => (self.position / duration).clamp(0.0, 1.0),
            None => 0.0,
        }
    }

    pub fn reset(&mut self) -> u64 {
        self.generation += 1;
        self.position = 0.0;
        self.duration = None;
        self.generation
    }
}

/// `m:ss`, as shown next to the progress bar.
pub fn format_time(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    format!("{}:{:02}", total / 60, total % 60)
}
