use crate::config::PanelConfig;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PanelLayout {
    /// Docked to the right edge, `width_percent` of the viewport wide.
    Sidebar { width_percent: f64 },
    /// Full-width sheet rising from the bottom; width settings are ignored.
    BottomSheet,
}

#[derive(Debug, Clone)]
pub struct SidebarGeometry {
    config: PanelConfig,
    width_percent: f64,
    viewport_width: f64,
    is_mobile_layout: bool,
}

impl SidebarGeometry {
    pub fn new(config: PanelConfig) -> Self {
        let width_percent = config
            .default_width_percent
            .clamp(config.min_width_percent, config.max_width_percent);
        Self {
            config,
            width_percent,
            viewport_width: 0.0,
            is_mobile_layout: false,
        }
    }

    pub fn width_percent(&self) -> f64 {
        self.width_percent
    }

    pub fn is_mobile_layout(&self) -> bool {
        self.is_mobile_layout
    }

    pub fn viewport_width(&self) -> f64 {
        self.viewport_width
    }

    pub fn set_viewport_width(&mut self, width_px: f64) {
        if !width_px.is_finite() || width_px <= 0.0 {
            return;
        }
        self.viewport_width = width_px;
        self.is_mobile_layout = width_px <= self.config.mobile_breakpoint_px;
    }

    /// Stores `percent` clamped to the configured bounds. NaN is ignored.
    pub fn set_width_percent(&mut self, percent: f64) -> f64 {
        if !percent.is_nan() {
            self.width_percent =
                percent.clamp(self.config.min_width_percent, self.config.max_width_percent);
        }
        self.width_percent
    }

    /// Width implied by a pointer at `pointer_x`, measured from the right
    /// edge of the viewport. `None` until the viewport width is known.
    pub fn width_for_pointer(&self, pointer_x: f64) -> Option<f64> {
        if self.viewport_width <= 0.0 || pointer_x.is_nan() {
            return None;
        }
        let percent = (self.viewport_width - pointer_x) / self.viewport_width * 100.0;
        Some(percent.clamp(self.config.min_width_percent, self.config.max_width_percent))
    }

    pub fn layout(&self) -> PanelLayout {
        if self.is_mobile_layout {
            PanelLayout::BottomSheet
        } else {
            PanelLayout::Sidebar {
                width_percent: self.width_percent,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry(viewport: f64) -> SidebarGeometry {
        let mut geometry = SidebarGeometry::new(PanelConfig::default());
        geometry.set_viewport_width(viewport);
        geometry
    }

    #[test]
    fn pointer_width_is_measured_from_right_edge() {
        assert_eq!(geometry(1000.0).width_for_pointer(750.0), Some(25.0));
    }

    #[test]
    fn pointer_width_is_clamped() {
        let geometry = geometry(1000.0);
        assert_eq!(geometry.width_for_pointer(-500.0), Some(80.0));
        assert_eq!(geometry.width_for_pointer(5000.0), Some(20.0));
        assert_eq!(geometry.width_for_pointer(f64::INFINITY), Some(20.0));
        assert_eq!(geometry.width_for_pointer(f64::NAN), None);
    }

    #[test]
    fn breakpoint_switches_to_bottom_sheet() {
        assert_eq!(geometry(768.0).layout(), PanelLayout::BottomSheet);
        assert_eq!(
            geometry(769.0).layout(),
            PanelLayout::Sidebar {
                width_percent: 40.0
            }
        );
    }

    #[test]
    fn unknown_viewport_has_no_pointer_width() {
        let geometry = SidebarGeometry::new(PanelConfig::default());
        assert_eq!(geometry.width_for_pointer(10.0), None);
    }

    #[test]
    fn explicit_width_is_clamped() {
        let mut geometry = geometry(1200.0);
        assert_eq!(geometry.set_width_percent(95.0), 80.0);
        assert_eq!(geometry.set_width_percent(f64::NAN), 80.0);
        assert_eq!(geometry.set_width_percent(5.0), 20.0);
    }
}
