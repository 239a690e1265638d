pub mod config;
pub mod controller;
pub mod error;
pub mod lyrics;
pub mod progress;
pub mod queue;
pub mod state;
pub mod traits;

pub use controller::{AudioController, Notice};
pub use error::AudioError;
pub use state::{PlaybackState, PlaybackStatus};
pub use traits::MediaElement;
