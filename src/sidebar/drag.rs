use crate::event::{
    bus::{EventBus, Subscription},
    events::PointerEvent,
};

/// Outcome of draining the pointer events seen by a drag.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DragUpdate {
    /// Last pointer x seen before the drag ended (or so far).
    pub last_x: Option<f64>,
    pub ended: bool,
}

/// One resize gesture, from pointer-down on the handle to pointer-up.
///
/// Holds the only subscription to the global pointer bus; dropping the
/// gesture releases it.
pub struct ResizeDrag {
    pointer: Subscription<PointerEvent>,
}

impl ResizeDrag {
    pub fn begin(bus: &EventBus<PointerEvent>) -> Self {
        Self {
            pointer: bus.subscribe(),
        }
    }

    pub fn poll(&self) -> DragUpdate {
        let mut update = DragUpdate::default();
        for event in self.pointer.drain() {
            match event {
                PointerEvent::Move { x } => update.last_x = Some(x),
                PointerEvent::Up => {
                    update.ended = true;
                    break;
                }
            }
        }
        update
    }
}
