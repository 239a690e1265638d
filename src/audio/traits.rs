use crate::audio::error::AudioError;

/// The single media-playback resource owned by the audio controller.
///
/// Implementations report progress asynchronously by publishing
/// [`MediaEvent`](crate::event::events::MediaEvent)s tagged with the
/// `generation` passed to the load that produced them.
pub trait MediaElement: Send {
    fn load(&mut self, url: &str, generation: u64) -> Result<(), AudioError>;
    fn play(&mut self) -> Result<(), AudioError>;
    fn pause(&mut self);
    fn seek(&mut self, position: f64);
    fn stop(&mut self);
}
