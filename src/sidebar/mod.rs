//! Panel chrome shared by the preview and music player panels: width
//! geometry, drag-to-resize and the bottom-sheet close transition.

pub mod drag;
pub mod geometry;

use std::sync::Arc;
use std::time::Instant;

use tracing::debug;

use crate::{
    config::PanelConfig,
    event::{bus::EventBus, events::PointerEvent},
    util::clock::Clock,
};

pub use drag::ResizeDrag;
pub use geometry::{PanelLayout, SidebarGeometry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Hidden,
    Open,
    /// Close requested; the panel stays mounted until the transition ends.
    Closing { until: Instant },
}

pub struct Sidebar {
    config: PanelConfig,
    geometry: SidebarGeometry,
    pointer_bus: EventBus<PointerEvent>,
    drag: Option<ResizeDrag>,
    visibility: Visibility,
    clock: Arc<dyn Clock>,
}

impl Sidebar {
    pub fn new(config: PanelConfig, pointer_bus: EventBus<PointerEvent>, clock: Arc<dyn Clock>) -> Self {
        Self {
            config,
            geometry: SidebarGeometry::new(config),
            pointer_bus,
            drag: None,
            visibility: Visibility::Hidden,
            clock,
        }
    }

    pub fn geometry(&self) -> &SidebarGeometry {
        &self.geometry
    }

    pub fn layout(&self) -> PanelLayout {
        self.geometry.layout()
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn set_viewport_width(&mut self, width_px: f64) {
        self.geometry.set_viewport_width(width_px);
        if self.geometry.is_mobile_layout() {
            self.end_resize();
        }
    }

    pub fn set_width_percent(&mut self, percent: f64) -> f64 {
        self.geometry.set_width_percent(percent)
    }

    pub fn show(&mut self) {
        self.visibility = Visibility::Open;
    }

    /// Pointer-down on the resize handle. No-op in the bottom-sheet layout or
    /// while hidden.
    pub fn begin_resize(&mut self) -> bool {
        if self.geometry.is_mobile_layout() || self.visibility != Visibility::Open {
            return false;
        }
        if self.drag.is_none() {
            self.drag = Some(ResizeDrag::begin(&self.pointer_bus));
        }
        true
    }

    pub fn is_resizing(&self) -> bool {
        self.drag.is_some()
    }

    pub fn end_resize(&mut self) {
        if self.drag.take().is_some() {
            debug!("Resize gesture released");
        }
    }

    pub fn pump_pointer(&mut self) -> Option<f64> {
        let update = self.drag.as_ref()?.poll();
        let width = update
            .last_x
            .and_then(|x| self.geometry.width_for_pointer(x))
            .map(|percent| self.geometry.set_width_percent(percent));
        if update.ended {
            self.end_resize();
        }
        width
    }

    /// Starts closing. Returns `true` when the panel is hidden right away,
    /// `false` when an animated close is now pending.
    pub fn close(&mut self, animated: bool) -> bool {
        self.end_resize();
        if animated && self.visibility == Visibility::Open {
            self.visibility = Visibility::Closing {
                until: self.clock.now() + self.config.sheet_transition,
            };
            false
        } else {
            self.visibility = Visibility::Hidden;
            true
        }
    }

    /// Finishes a pending close once its transition has elapsed. Returns
    /// `true` on the call that hides the panel.
    pub fn poll_transition(&mut self) -> bool {
        match self.visibility {
            Visibility::Closing { until } if self.clock.now() >= until => {
                self.visibility = Visibility::Hidden;
                true
            }
            _ => false,
        }
    }
}
