//! Applies panel geometry to the host surface, keeping the panel inside the
//! viewport. Clamping mutates the caller's geometry so every collaborator
//! observes the corrected values.

use crate::geometry::{PanelGeometry, Viewport};
use crate::host::PanelSurface;

pub fn apply_floating_box(
    viewport: Viewport,
    geometry: &mut PanelGeometry,
    surface: &mut dyn PanelSurface,
) {
    geometry.clamp_to(viewport);
    if let Some(panel_box) = geometry.floating_box() {
        surface.set_floating_box(panel_box);
    }
}

pub fn reset_to_flow(surface: &mut dyn PanelSurface) {
    surface.clear_floating_box();
}
