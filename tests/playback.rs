use std::sync::Arc;

use aimeshare::{
    audio::{AudioController, AudioError, MediaElement, config::AudioConfig},
    config::PanelConfig,
    content::{
        lyrics::{LyricLine, active_line},
        music::Track,
    },
    event::EventBus,
    util::clock::ManualClock,
};
use proptest::prelude::*;

struct SilentMedia;

impl MediaElement for SilentMedia {
    fn load(&mut self, _url: &str, _generation: u64) -> Result<(), AudioError> {
        Ok(())
    }

    fn play(&mut self) -> Result<(), AudioError> {
        Ok(())
    }

    fn pause(&mut self) {}

    fn seek(&mut self, _position: f64) {}

    fn stop(&mut self) {}
}

fn controller() -> AudioController {
    AudioController::new(
        Box::new(SilentMedia),
        AudioConfig::default(),
        PanelConfig::default(),
        EventBus::new(),
        Arc::new(ManualClock::new()),
    )
}

fn playlist(len: usize) -> Vec<Arc<Track>> {
    (0..len)
        .map(|i| {
            Arc::new(Track {
                name: format!("track {i}"),
                url: format!("http://a/{i}.mp3"),
                ..Track::default()
            })
        })
        .collect()
}

proptest! {
    #[test]
    fn navigation_is_circular(len in 1usize..12, start in 0usize..12) {
        let start = start % len;
        let tracks = playlist(len);

        let mut audio = controller();
        audio.play(tracks[start].clone(), tracks.clone());
        prop_assert_eq!(audio.next(), Ok((start + 1) % len));

        audio.play(tracks[start].clone(), tracks.clone());
        prop_assert_eq!(audio.prev(), Ok((start + len - 1) % len));
        prop_assert_eq!(
            audio.current_track().map(|t| t.name.clone()),
            Some(format!("track {}", (start + len - 1) % len))
        );
    }

    #[test]
    fn active_lyric_is_monotonic(
        mut times in prop::collection::vec(0.0f64..300.0, 1..20),
        mut positions in prop::collection::vec(0.0f64..320.0, 1..20),
    ) {
        times.sort_by(f64::total_cmp);
        positions.sort_by(f64::total_cmp);
        let lyrics: Vec<LyricLine> = times
            .iter()
            .map(|&time| LyricLine { time, text: "x".into() })
            .collect();

        let mut previous: Option<usize> = None;
        for position in positions {
            let active = active_line(&lyrics, position);
            if position < lyrics[0].time {
                prop_assert_eq!(active, None);
            }
            prop_assert!(active >= previous);
            previous = active;
        }
    }
}

#[test]
fn wraps_at_both_ends() {
    let tracks = playlist(3);
    let mut audio = controller();

    audio.play(tracks[2].clone(), tracks.clone());
    assert_eq!(audio.next(), Ok(0));

    audio.play(tracks[0].clone(), tracks.clone());
    assert_eq!(audio.prev(), Ok(2));
}

#[test]
fn navigation_without_playlist_fails() {
    let mut audio = controller();
    assert_eq!(audio.next(), Err(AudioError::EmptyPlaylist));
    assert_eq!(audio.toggle_play(), Err(AudioError::NoTrack));
}
