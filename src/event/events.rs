use serde::Deserialize;

/// Notifications raised by the media element backing the audio controller.
///
/// `generation` identifies the load that produced the event; the controller
/// ignores anything from a load it has since replaced.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEvent {
    TimeUpdate { generation: u64, position: f64 },
    LoadedMetadata { generation: u64, duration: f64 },
    Ended { generation: u64 },
    Error { generation: u64, message: String },
}

impl MediaEvent {
    pub fn generation(&self) -> u64 {
        match self {
            MediaEvent::TimeUpdate { generation, .. }
            | MediaEvent::LoadedMetadata { generation, .. }
            | MediaEvent::Ended { generation }
            | MediaEvent::Error { generation, .. } => *generation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Move { x: f64 },
    Up,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsoleKind {
    Error,
}

/// A one-way notification posted by a sandboxed preview document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SandboxMessage {
    pub render_key: u64,
    pub kind: ConsoleKind,
    pub message: String,
}

#[derive(Deserialize)]
struct Envelope {
    source: String,
    #[serde(flatten)]
    message: SandboxMessage,
}

pub const SANDBOX_MESSAGE_SOURCE: &str = "aime-preview";

impl SandboxMessage {
    /// Decodes a raw `postMessage` payload. Anything that is not one of ours
    /// yields `None`.
    pub fn from_json(raw: &str) -> Option<Self> {
        let envelope: Envelope = serde_json::from_str(raw).ok()?;
        (envelope.source == SANDBOX_MESSAGE_SOURCE).then_some(envelope.message)
    }
}
