pub mod console;
pub mod controller;
pub mod error;
pub mod sandbox;

pub use controller::{DeviceMode, PreviewController, PreviewRequest, PreviewTab};
pub use error::PreviewError;
