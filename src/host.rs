use std::time::Duration;

use crate::geometry::{PanelBox, Viewport};

/// Viewport-relative bounding edges of the anchor element (the in-flow
/// placeholder while the panel is detached). Negative values are above the
/// viewport top.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnchorRect {
    pub top: f64,
    pub bottom: f64,
}

impl AnchorRect {
    pub const fn new(top: f64, bottom: f64) -> Self {
        Self { top, bottom }
    }

    pub fn height(&self) -> f64 {
        (self.bottom - self.top).max(0.0)
    }
}

/// Read side of the host contract: everything the controller samples per
/// frame. `anchor_bounds` returning `None` means the host view is still being
/// built, not an error.
pub trait HostView {
    fn viewport(&self) -> Viewport;
    fn scroll_y(&self) -> f64;
    fn anchor_bounds(&self) -> Option<AnchorRect>;
    /// Whether the current path is the detail view the panel applies to.
    fn on_detail_view(&self) -> bool;
    /// The host's own fullscreen/alternate-layout mode. The panel never
    /// fights it.
    fn alternate_layout_active(&self) -> bool;
}

/// Write side of the host contract: the visual mutations the controller
/// drives and the signals it emits back to the host.
pub trait PanelSurface {
    fn set_floating_box(&mut self, panel_box: PanelBox);
    /// Strips explicit positioning, returning the panel to document flow.
    fn clear_floating_box(&mut self);
    fn set_minimized(&mut self, minimized: bool);
    /// Synthetic resize notification so host layout consumers relayout
    /// without bespoke integration.
    fn emit_resize(&mut self);
    /// Arms the host timer that later calls
    /// [`PanelController::finish_settle`](crate::controller::PanelController::finish_settle).
    fn schedule_settle(&mut self, settle: Duration);
    /// Keeps the in-flow placeholder the same height as the detached panel so
    /// the page does not reflow. Hosts without a placeholder ignore this.
    fn set_placeholder_height(&mut self, _height: f64) {}
}
