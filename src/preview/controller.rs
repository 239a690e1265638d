use std::sync::Arc;

use tracing::{debug, info, warn};

use super::{
    console::{ConsoleEntry, ConsoleLog},
    error::PreviewError,
    sandbox::{self, SandboxDocument, SandboxPolicy},
};
use crate::{
    config::PanelConfig,
    event::{
        bus::{EventBus, Subscription},
        events::{PointerEvent, SandboxMessage},
    },
    sidebar::{PanelLayout, Sidebar, Visibility},
    util::clock::Clock,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewTab {
    Preview,
    Source,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeviceMode {
    #[default]
    Desktop,
    Mobile,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewRequest {
    pub content: String,
    pub tab: PreviewTab,
    pub source_content: Option<String>,
    pub show_controls: bool,
    pub web_analysis_mode: bool,
    pub preview_url: Option<String>,
}

impl PreviewRequest {
    pub fn new(content: impl Into<String>, tab: PreviewTab) -> Self {
        Self {
            content: content.into(),
            tab,
            source_content: None,
            show_controls: true,
            web_analysis_mode: false,
            preview_url: None,
        }
    }

    pub fn source_content(mut self, source: impl Into<String>) -> Self {
        self.source_content = Some(source.into());
        self
    }

    pub fn show_controls(mut self, show: bool) -> Self {
        self.show_controls = show;
        self
    }

    pub fn web_analysis(mut self, url: impl Into<String>) -> Self {
        self.web_analysis_mode = true;
        self.preview_url = Some(url.into());
        self
    }
}

/// The one open preview. Owns the subscription to sandbox messages, so
/// replacing or dropping the session stops listening.
pub struct PreviewSession {
    request: PreviewRequest,
    active_tab: PreviewTab,
    device_mode: DeviceMode,
    render_key: u64,
    console: ConsoleLog,
    messages: Subscription<SandboxMessage>,
}

impl PreviewSession {
    pub fn active_tab(&self) -> PreviewTab {
        self.active_tab
    }

    pub fn device_mode(&self) -> DeviceMode {
        self.device_mode
    }

    pub fn render_key(&self) -> u64 {
        self.render_key
    }

    pub fn content(&self) -> &str {
        &self.request.content
    }

    pub fn show_controls(&self) -> bool {
        self.request.show_controls
    }

    pub fn web_analysis_mode(&self) -> bool {
        self.request.web_analysis_mode
    }

    pub fn preview_url(&self) -> Option<&str> {
        self.request.preview_url.as_deref()
    }

    pub fn console(&self) -> &[ConsoleEntry] {
        self.console.entries()
    }
}

pub struct PreviewController {
    session: Option<PreviewSession>,
    sidebar: Sidebar,
    sandbox_bus: EventBus<SandboxMessage>,
    policy: SandboxPolicy,
    next_render_key: u64,
}

impl PreviewController {
    pub fn new(
        panel: PanelConfig,
        policy: SandboxPolicy,
        pointer_bus: EventBus<PointerEvent>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            session: None,
            sidebar: Sidebar::new(panel, pointer_bus, clock),
            sandbox_bus: EventBus::new(),
            policy,
            next_render_key: 0,
        }
    }

    pub fn sandbox_bus(&self) -> EventBus<SandboxMessage> {
        self.sandbox_bus.clone()
    }

    pub fn session(&self) -> Option<&PreviewSession> {
        self.session.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.session.is_some() && self.sidebar.visibility() == Visibility::Open
    }

    pub fn sidebar(&self) -> &Sidebar {
        &self.sidebar
    }

    pub fn panel_layout(&self) -> PanelLayout {
        self.sidebar.layout()
    }

    fn bump_render_key(&mut self) -> u64 {
        self.next_render_key += 1;
        self.next_render_key
    }

    /// Replaces any current session, including one that is still closing.
    pub fn open(&mut self, request: PreviewRequest) {
        let render_key = self.bump_render_key();
        info!(
            tab = ?request.tab,
            web_analysis = request.web_analysis_mode,
            render_key,
            "Opening preview"
        );

        self.session = Some(PreviewSession {
            active_tab: request.tab,
            device_mode: DeviceMode::default(),
            render_key,
            console: ConsoleLog::default(),
            messages: self.sandbox_bus.subscribe(),
            request,
        });
        self.sidebar.show();
    }

    fn session_mut(&mut self) -> Result<&mut PreviewSession, PreviewError> {
        match self.sidebar.visibility() {
            Visibility::Open => self.session.as_mut().ok_or(PreviewError::NotOpen),
            _ => Err(PreviewError::NotOpen),
        }
    }

    pub fn change_tab(&mut self, tab: PreviewTab) -> Result<(), PreviewError> {
        self.session_mut()?.active_tab = tab;
        Ok(())
    }

    pub fn set_device_mode(&mut self, mode: DeviceMode) -> Result<(), PreviewError> {
        self.session_mut()?.device_mode = mode;
        Ok(())
    }

    /// Discards the current document instance and starts a fresh one.
    /// Returns the new render key.
    pub fn refresh(&mut self) -> Result<u64, PreviewError> {
        if self.session_mut()?.active_tab != PreviewTab::Preview {
            return Err(PreviewError::RefreshUnavailable);
        }
        let render_key = self.bump_render_key();
        let session = self.session_mut()?;
        session.render_key = render_key;
        session.console.clear();
        debug!(render_key, "Preview refreshed");
        Ok(render_key)
    }

    pub fn set_viewport_width(&mut self, width_px: f64) {
        self.sidebar.set_viewport_width(width_px);
    }

    pub fn begin_resize(&mut self) -> bool {
        self.session.is_some() && self.sidebar.begin_resize()
    }

    pub fn end_resize(&mut self) {
        self.sidebar.end_resize();
    }

    pub fn pump_pointer(&mut self) -> Option<f64> {
        self.sidebar.pump_pointer()
    }

    pub fn resize(&mut self, percent: f64) -> f64 {
        self.sidebar.set_width_percent(percent)
    }

    /// Closes the preview. In the bottom-sheet layout the session survives
    /// until [`Self::poll_transition`] observes the end of the animation.
    pub fn close(&mut self) {
        if self.session.is_none() {
            return;
        }
        let animated = self.sidebar.geometry().is_mobile_layout();
        if self.sidebar.close(animated) {
            self.session = None;
            info!("Preview closed");
        } else {
            debug!("Preview closing");
        }
    }

    pub fn poll_transition(&mut self) -> bool {
        if self.sidebar.poll_transition() {
            self.session = None;
            info!("Preview closed");
            true
        } else {
            false
        }
    }

    /// Decodes a raw message posted by a preview frame and publishes it.
    /// Payloads that are not sandbox notifications are ignored.
    pub fn post_raw(&self, raw: &str) -> bool {
        match SandboxMessage::from_json(raw) {
            Some(message) => {
                self.sandbox_bus.publish(message);
                true
            }
            None => {
                debug!("Ignoring foreign window message");
                false
            }
        }
    }

    /// Moves received sandbox messages into the console. Messages from a
    /// document instance older than the current render key are dropped.
    /// Returns how many entries were appended.
    pub fn pump_sandbox_messages(&mut self) -> usize {
        let Some(session) = self.session.as_mut() else {
            return 0;
        };

        let mut appended = 0;
        for message in session.messages.drain() {
            if message.render_key != session.render_key {
                debug!(
                    stale = message.render_key,
                    current = session.render_key,
                    "Dropping message from superseded preview document"
                );
                continue;
            }
            warn!(message = %message.message, "Preview document error");
            session.console.push(message);
            appended += 1;
        }
        appended
    }

    pub fn tick(&mut self) {
        self.pump_pointer();
        self.poll_transition();
        self.pump_sandbox_messages();
    }

    pub fn console(&self) -> &[ConsoleEntry] {
        self.session
            .as_ref()
            .map(PreviewSession::console)
            .unwrap_or_default()
    }

    pub fn sandbox_document(&self) -> Option<SandboxDocument> {
        let session = self.session.as_ref()?;
        if session.active_tab != PreviewTab::Preview {
            return None;
        }
        let hide_scrollbars = self.sidebar.geometry().is_mobile_layout()
            || session.device_mode == DeviceMode::Mobile;
        Some(sandbox::build_document(
            &session.request.content,
            session.render_key,
            hide_scrollbars,
            &self.policy,
        ))
    }

    pub fn source_text(&self) -> Option<&str> {
        let session = self.session.as_ref()?;
        Some(
            session
                .request
                .source_content
                .as_deref()
                .unwrap_or(&session.request.content),
        )
    }
}
