use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::{
    audio::{
        config::AudioConfig,
        error::AudioError,
        lyrics::LyricSync,
        progress::TrackProgress,
        queue,
        state::{PlaybackState, PlaybackStatus},
        traits::MediaElement,
    },
    config::PanelConfig,
    content::music::Track,
    event::{
        bus::{EventBus, Subscription},
        events::{MediaEvent, PointerEvent},
    },
    sidebar::{PanelLayout, Sidebar, Visibility},
    util::clock::Clock,
};

/// A transient, dismissable message about a failed external call.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub id: u64,
    pub message: String,
}

pub struct AudioController {
    media: Box<dyn MediaElement>,
    media_bus: EventBus<MediaEvent>,
    media_events: Subscription<MediaEvent>,
    state: PlaybackState,
    loaded: bool,
    progress: TrackProgress,
    lyrics: LyricSync,
    notices: Vec<Notice>,
    next_notice_id: u64,
    sidebar: Sidebar,
    clock: Arc<dyn Clock>,
    config: AudioConfig,
}

impl AudioController {
    pub fn new(
        media: Box<dyn MediaElement>,
        config: AudioConfig,
        panel: PanelConfig,
        pointer_bus: EventBus<PointerEvent>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let media_bus = EventBus::new();
        let media_events = media_bus.subscribe();
        Self {
            media,
            media_events,
            media_bus,
            state: PlaybackState::default(),
            loaded: false,
            progress: TrackProgress::default(),
            lyrics: LyricSync::default(),
            notices: Vec::new(),
            next_notice_id: 0,
            sidebar: Sidebar::new(panel, pointer_bus, clock.clone()),
            clock,
            config,
        }
    }

    pub fn media_bus(&self) -> EventBus<MediaEvent> {
        self.media_bus.clone()
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn status(&self) -> PlaybackStatus {
        self.state.status
    }

    pub fn is_playing(&self) -> bool {
        self.state.is_playing()
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.state.current_track()
    }

    pub fn progress(&self) -> &TrackProgress {
        &self.progress
    }

    pub fn active_lyric(&self) -> Option<usize> {
        self.lyrics.active()
    }

    pub fn shows_lyrics(&self) -> bool {
        self.lyrics.is_visible()
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn sidebar(&self) -> &Sidebar {
        &self.sidebar
    }

    pub fn panel_layout(&self) -> PanelLayout {
        self.sidebar.layout()
    }

    pub fn dismiss_notice(&mut self, id: u64) {
        self.notices.retain(|notice| notice.id != id);
    }

    fn notify(&mut self, error: &AudioError) {
        warn!("Playback failed: {error}");
        self.next_notice_id += 1;
        self.notices.push(Notice {
            id: self.next_notice_id,
            message: error.to_string(),
        });
    }

    /// Makes `track` current within `playlist` and starts it. A track that
    /// is not part of `playlist` plays as a playlist of its own.
    pub fn play(&mut self, track: Arc<Track>, playlist: Vec<Arc<Track>>) {
        let (playlist, index) = match queue::position_of(&playlist, &track) {
            Some(index) => (playlist, index),
            None => (vec![track.clone()], 0),
        };

        info!(track = %track.name, index, len = playlist.len(), "Playing track");
        self.state.playlist = playlist;
        self.state.index = index;
        self.state.current = Some(track);
        self.sidebar.show();
        self.start_current();
    }

    fn start_current(&mut self) {
        let Some(track) = self.state.current.clone() else {
            return;
        };
        let generation = self.progress.reset();
        self.lyrics.reset();
        self.loaded = false;

        let started = if track.url.trim().is_empty() {
            Err(AudioError::MissingUrl)
        } else {
            self.media.load(&track.url, generation).and_then(|()| {
                self.loaded = true;
                self.media.play()
            })
        };

        match started {
            Ok(()) => self.state.status = PlaybackStatus::Playing,
            Err(e) => {
                self.notify(&e);
                self.state.status = PlaybackStatus::Paused;
            }
        }
    }

    /// Continues a loaded track; a track whose load failed is started over.
    fn resume(&mut self) {
        if !self.loaded {
            self.start_current();
            return;
        }
        match self.media.play() {
            Ok(()) => self.state.status = PlaybackStatus::Playing,
            Err(e) => {
                self.notify(&e);
                self.state.status = PlaybackStatus::Paused;
            }
        }
    }

    /// Playing and paused swap without touching progress. A stopped
    /// controller restarts its current track.
    pub fn toggle_play(&mut self) -> Result<PlaybackStatus, AudioError> {
        if self.state.current.is_none() {
            return Err(AudioError::NoTrack);
        }
        match self.state.status {
            PlaybackStatus::Playing => {
                self.media.pause();
                self.state.status = PlaybackStatus::Paused;
            }
            PlaybackStatus::Paused => self.resume(),
            PlaybackStatus::Stopped => self.start_current(),
        }
        Ok(self.state.status)
    }

    pub fn seek(&mut self, seconds: f64) -> Result<f64, AudioError> {
        let track = self.state.current.clone().ok_or(AudioError::NoTrack)?;
        let target = self.progress.clamp(seconds);
        self.media.seek(target);
        self.progress.set_position(target);
        self.lyrics
            .update(&track.lrc, self.progress.position(), self.clock.now());
        Ok(target)
    }

    pub fn seek_forward(&mut self) -> Result<f64, AudioError> {
        self.seek(self.progress.position() + self.config.seek_step_secs as f64)
    }

    pub fn seek_backward(&mut self) -> Result<f64, AudioError> {
        self.seek(self.progress.position() - self.config.seek_step_secs as f64)
    }

    fn jump_to(&mut self, index: Option<usize>) -> Result<usize, AudioError> {
        let index = index.ok_or(AudioError::EmptyPlaylist)?;
        let track = self
            .state
            .playlist
            .get(index)
            .cloned()
            .ok_or(AudioError::EmptyPlaylist)?;

        debug!(index, track = %track.name, "Switching track");
        self.state.index = index;
        self.state.current = Some(track);
        self.start_current();
        Ok(index)
    }

    pub fn next(&mut self) -> Result<usize, AudioError> {
        let index = queue::next_index(self.state.index, self.state.playlist.len());
        self.jump_to(index)
    }

    pub fn prev(&mut self) -> Result<usize, AudioError> {
        let index = queue::prev_index(self.state.index, self.state.playlist.len());
        self.jump_to(index)
    }

    pub fn on_track_ended(&mut self) -> Result<usize, AudioError> {
        self.next()
    }

    pub fn handle_media_event(&mut self, event: MediaEvent) {
        if event.generation() != self.progress.generation() {
            debug!(
                stale = event.generation(),
                current = self.progress.generation(),
                "Ignoring media event from a replaced load"
            );
            return;
        }

        match event {
            MediaEvent::TimeUpdate { position, .. } => {
                self.progress.set_position(position);
                if let Some(track) = self.state.current.clone() {
                    self.lyrics
                        .update(&track.lrc, self.progress.position(), self.clock.now());
                }
            }
            MediaEvent::LoadedMetadata { duration, .. } => {
                self.progress.set_duration(duration);
            }
            MediaEvent::Ended { .. } => {
                if let Err(e) = self.on_track_ended() {
                    debug!("Track ended with nothing to advance to: {e}");
                }
            }
            MediaEvent::Error { message, .. } => {
                self.notify(&AudioError::Media(message));
                self.state.status = PlaybackStatus::Paused;
            }
        }
    }

    pub fn pump_media_events(&mut self) -> usize {
        let events = self.media_events.drain();
        let count = events.len();
        for event in events {
            self.handle_media_event(event);
        }
        count
    }

    pub fn toggle_lyrics(&mut self) -> bool {
        self.lyrics.toggle_visible()
    }

    pub fn on_user_scroll(&mut self) {
        self.lyrics
            .suppress_until(self.clock.now() + self.config.scroll_suppress);
    }

    pub fn take_scroll_request(&mut self) -> Option<usize> {
        self.lyrics.take_scroll_request()
    }

    /// Seeks to the start of lyric line `index`, resuming if paused.
    pub fn seek_to_lyric(&mut self, index: usize) -> Result<f64, AudioError> {
        let time = self
            .state
            .current
            .as_ref()
            .ok_or(AudioError::NoTrack)?
            .lrc
            .get(index)
            .map(|line| line.time)
            .ok_or(AudioError::LyricOutOfRange(index))?;

        let target = self.seek(time)?;
        if self.state.status == PlaybackStatus::Paused {
            self.resume();
        }
        Ok(target)
    }

    pub fn download_target(&self) -> Option<(String, String)> {
        let track = self.state.current.as_ref()?;
        if track.url.trim().is_empty() {
            return None;
        }
        Some((track.url.clone(), track.download_name()))
    }

    pub fn set_viewport_width(&mut self, width_px: f64) {
        self.sidebar.set_viewport_width(width_px);
    }

    pub fn begin_resize(&mut self) -> bool {
        self.sidebar.begin_resize()
    }

    pub fn pump_pointer(&mut self) -> Option<f64> {
        self.sidebar.pump_pointer()
    }

    pub fn resize(&mut self, percent: f64) -> f64 {
        self.sidebar.set_width_percent(percent)
    }

    /// Pauses and hides the player. In the bottom-sheet layout the reset to
    /// `Stopped` waits for [`Self::poll_transition`].
    pub fn close(&mut self) {
        if self.sidebar.visibility() == Visibility::Hidden && self.state.current.is_none() {
            return;
        }
        self.media.pause();
        if self.state.status == PlaybackStatus::Playing {
            self.state.status = PlaybackStatus::Paused;
        }

        let animated = self.sidebar.geometry().is_mobile_layout();
        if self.sidebar.close(animated) {
            self.stop();
        }
    }

    pub fn poll_transition(&mut self) -> bool {
        if self.sidebar.poll_transition() {
            self.stop();
            true
        } else {
            false
        }
    }

    fn stop(&mut self) {
        self.media.stop();
        self.progress.reset();
        self.lyrics.reset();
        self.loaded = false;
        self.state = PlaybackState::default();
        info!("Player closed");
    }

    pub fn tick(&mut self) {
        self.pump_media_events();
        self.pump_pointer();
        self.poll_transition();
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::Mutex, time::Duration};

    use super::*;
    use crate::{content::lyrics::LyricLine, util::clock::ManualClock};

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Load(String, u64),
        Play,
        Pause,
        Seek(f64),
        Stop,
    }

    #[derive(Clone, Default)]
    struct FakeMedia {
        calls: Arc<Mutex<Vec<Call>>>,
        fail_play: bool,
    }

    impl FakeMedia {
        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: Call) {
            self.calls.lock().unwrap().push(call);
        }
    }

    impl MediaElement for FakeMedia {
        fn load(&mut self, url: &str, generation: u64) -> Result<(), AudioError> {
            self.record(Call::Load(url.to_string(), generation));
            Ok(())
        }

        fn play(&mut self) -> Result<(), AudioError> {
            self.record(Call::Play);
            if self.fail_play {
                Err(AudioError::Media("autoplay blocked".into()))
            } else {
                Ok(())
            }
        }

        fn pause(&mut self) {
            self.record(Call::Pause);
        }

        fn seek(&mut self, position: f64) {
            self.record(Call::Seek(position));
        }

        fn stop(&mut self) {
            self.record(Call::Stop);
        }
    }

    fn track(name: &str) -> Arc<Track> {
        Arc::new(Track {
            name: name.into(),
            url: format!("http://a/{name}.mp3"),
            lrc: vec![
                LyricLine {
                    time: 1.0,
                    text: "one".into(),
                },
                LyricLine {
                    time: 3.0,
                    text: "three".into(),
                },
            ],
            ..Track::default()
        })
    }

    fn controller(media: FakeMedia) -> (AudioController, ManualClock) {
        let clock = ManualClock::new();
        let mut audio = AudioController::new(
            Box::new(media),
            AudioConfig::default(),
            PanelConfig::default(),
            EventBus::new(),
            Arc::new(clock.clone()),
        );
        audio.set_viewport_width(1200.0);
        (audio, clock)
    }

    #[test]
    fn play_finds_track_by_identity() {
        let media = FakeMedia::default();
        let (mut audio, _) = controller(media.clone());
        let playlist = vec![track("a"), track("b"), track("c")];

        audio.play(playlist[1].clone(), playlist.clone());
        assert_eq!(audio.state().index, 1);
        assert_eq!(audio.status(), PlaybackStatus::Playing);
        assert_eq!(
            media.calls(),
            vec![Call::Load("http://a/b.mp3".into(), 1), Call::Play]
        );
    }

    #[test]
    fn foreign_track_plays_alone() {
        let (mut audio, _) = controller(FakeMedia::default());
        audio.play(track("x"), vec![track("a")]);
        assert_eq!(audio.state().playlist.len(), 1);
        assert_eq!(audio.current_track().unwrap().name, "x");
    }

    #[test]
    fn navigation_wraps_and_autoplays() {
        let (mut audio, _) = controller(FakeMedia::default());
        let playlist = vec![track("a"), track("b"), track("c")];
        audio.play(playlist[2].clone(), playlist.clone());

        assert_eq!(audio.next(), Ok(0));
        assert_eq!(audio.prev(), Ok(2));
        assert_eq!(audio.prev(), Ok(1));
        assert!(audio.is_playing());
    }

    #[test]
    fn toggle_keeps_progress() {
        let media = FakeMedia::default();
        let (mut audio, _) = controller(media.clone());
        audio.play(track("a"), Vec::new());
        audio.handle_media_event(MediaEvent::TimeUpdate {
            generation: 1,
            position: 12.0,
        });

        assert_eq!(audio.toggle_play(), Ok(PlaybackStatus::Paused));
        assert_eq!(audio.toggle_play(), Ok(PlaybackStatus::Playing));
        assert_eq!(audio.progress().position(), 12.0);
        assert_eq!(media.calls().last(), Some(&Call::Play));
    }

    #[test]
    fn stale_media_events_are_ignored() {
        let (mut audio, _) = controller(FakeMedia::default());
        let playlist = vec![track("a"), track("b")];
        audio.play(playlist[0].clone(), playlist.clone());
        let bus = audio.media_bus();
        audio.next().unwrap();

        bus.publish(MediaEvent::Ended { generation: 1 });
        bus.publish(MediaEvent::TimeUpdate {
            generation: 1,
            position: 99.0,
        });
        bus.publish(MediaEvent::TimeUpdate {
            generation: 2,
            position: 3.5,
        });
        assert_eq!(audio.pump_media_events(), 3);
        assert_eq!(audio.state().index, 1);
        assert_eq!(audio.progress().position(), 3.5);
        assert_eq!(audio.active_lyric(), Some(1));
    }

    #[test]
    fn ended_advances() {
        let (mut audio, _) = controller(FakeMedia::default());
        let playlist = vec![track("a"), track("b")];
        audio.play(playlist[1].clone(), playlist.clone());
        audio.handle_media_event(MediaEvent::Ended { generation: 1 });
        assert_eq!(audio.state().index, 0);
    }

    #[test]
    fn play_failure_becomes_notice() {
        let media = FakeMedia {
            fail_play: true,
            ..FakeMedia::default()
        };
        let (mut audio, _) = controller(media);
        audio.play(track("a"), Vec::new());

        assert_eq!(audio.status(), PlaybackStatus::Paused);
        assert_eq!(audio.current_track().unwrap().name, "a");
        let id = audio.notices()[0].id;
        audio.dismiss_notice(id);
        assert!(audio.notices().is_empty());
    }

    #[test]
    fn seek_clamps_and_syncs_lyrics() {
        let (mut audio, _) = controller(FakeMedia::default());
        audio.play(track("a"), Vec::new());
        audio.handle_media_event(MediaEvent::LoadedMetadata {
            generation: 1,
            duration: 120.0,
        });

        assert_eq!(audio.seek(500.0), Ok(120.0));
        assert_eq!(audio.seek(-3.0), Ok(0.0));
        assert_eq!(audio.active_lyric(), None);
        assert_eq!(audio.seek(2.0), Ok(2.0));
        assert_eq!(audio.active_lyric(), Some(0));
    }

    #[test]
    fn seek_to_lyric_resumes() {
        let (mut audio, _) = controller(FakeMedia::default());
        audio.play(track("a"), Vec::new());
        audio.toggle_play().unwrap();

        assert_eq!(audio.seek_to_lyric(1), Ok(3.0));
        assert!(audio.is_playing());
        assert_eq!(audio.seek_to_lyric(7), Err(AudioError::LyricOutOfRange(7)));
    }

    #[test]
    fn manual_scroll_suppresses_for_five_seconds() {
        let (mut audio, clock) = controller(FakeMedia::default());
        audio.play(track("a"), Vec::new());
        audio.toggle_lyrics();
        audio.on_user_scroll();

        let update = |position| MediaEvent::TimeUpdate {
            generation: 1,
            position,
        };
        audio.handle_media_event(update(1.5));
        assert_eq!(audio.take_scroll_request(), None);

        clock.advance(Duration::from_secs(5));
        audio.handle_media_event(update(3.5));
        assert_eq!(audio.take_scroll_request(), Some(1));
    }

    #[test]
    fn empty_url_is_a_notice() {
        let (mut audio, _) = controller(FakeMedia::default());
        audio.play(Arc::new(Track::default()), Vec::new());
        assert_eq!(audio.notices().len(), 1);
        assert_eq!(audio.download_target(), None);
    }

    #[test]
    fn toggle_after_failed_load_retries_instead_of_playing() {
        let media = FakeMedia::default();
        let (mut audio, _) = controller(media.clone());
        audio.play(Arc::new(Track::default()), Vec::new());
        assert_eq!(audio.status(), PlaybackStatus::Paused);

        assert_eq!(audio.toggle_play(), Ok(PlaybackStatus::Paused));
        assert_eq!(audio.notices().len(), 2);
        assert!(!media.calls().contains(&Call::Play));
    }

    #[test]
    fn download_target_uses_track_name() {
        let (mut audio, _) = controller(FakeMedia::default());
        audio.play(track("Song"), Vec::new());
        assert_eq!(
            audio.download_target(),
            Some(("http://a/Song.mp3".into(), "Song.mp3".into()))
        );
    }

    #[test]
    fn mobile_close_resets_after_transition() {
        let media = FakeMedia::default();
        let (mut audio, clock) = controller(media.clone());
        audio.set_viewport_width(600.0);
        audio.play(track("a"), Vec::new());

        audio.close();
        assert_eq!(audio.status(), PlaybackStatus::Paused);
        assert!(audio.current_track().is_some());

        clock.advance(Duration::from_millis(300));
        assert!(audio.poll_transition());
        assert_eq!(audio.status(), PlaybackStatus::Stopped);
        assert!(audio.current_track().is_none());
        assert_eq!(media.calls().last(), Some(&Call::Stop));
    }
}
