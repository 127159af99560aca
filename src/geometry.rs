//! Geometric primitives for the floating panel: its persisted box, the host
//! viewport, and the corner-resize math.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Resolved on-screen box, produced once a geometry has been placed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelBox {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// The persisted panel geometry. `left`/`top` are `None` until the panel has
/// been placed for the first time; after that they stay finite and clamped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PanelGeometry {
    pub width: f64,
    pub height: f64,
    pub left: Option<f64>,
    pub top: Option<f64>,
}

impl PanelGeometry {
    pub const fn unplaced(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            left: None,
            top: None,
        }
    }

    pub fn is_placed(&self) -> bool {
        self.left.is_some() && self.top.is_some()
    }

    pub fn position(&self) -> Option<(f64, f64)> {
        Some((self.left?, self.top?))
    }

    /// Whether a deserialized geometry is usable at all. Defense happens on
    /// read; writers only ever persist geometries that pass this.
    pub fn is_valid(&self) -> bool {
        let sizes_ok = self.width.is_finite()
            && self.height.is_finite()
            && self.width > 0.0
            && self.height > 0.0;
        let position_ok =
            self.left.is_none_or(f64::is_finite) && self.top.is_none_or(f64::is_finite);
        sizes_ok && position_ok
    }

    /// Computes the first-placement default position: the bottom-right corner
    /// of the viewport, inset by `margin`. Does nothing once placed.
    pub fn ensure_placed(&mut self, viewport: Viewport, margin: f64) {
        if self.is_placed() {
            return;
        }
        self.left = Some(viewport.width - self.width - margin);
        self.top = Some(viewport.height - self.height - margin);
    }

    /// Clamps the position into the viewport in place, so callers observe the
    /// corrected values. Unplaced geometries are left alone.
    pub fn clamp_to(&mut self, viewport: Viewport) {
        if let Some(left) = self.left {
            self.left = Some(clamp(left, 0.0, viewport.width - self.width));
        }
        if let Some(top) = self.top {
            self.top = Some(clamp(top, 0.0, viewport.height - self.height));
        }
    }

    pub fn floating_box(&self) -> Option<PanelBox> {
        let (left, top) = self.position()?;
        Some(PanelBox {
            left,
            top,
            width: self.width,
            height: self.height,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeCorner {
    NorthWest,
    NorthEast,
    SouthWest,
    SouthEast,
}

impl ResizeCorner {
    pub const fn pulls_west(self) -> bool {
        matches!(self, Self::NorthWest | Self::SouthWest)
    }

    pub const fn pulls_north(self) -> bool {
        matches!(self, Self::NorthWest | Self::NorthEast)
    }
}

/// Applies a corner-resize gesture to a start-of-gesture snapshot. Width
/// follows the pointer (`+dx` on east corners, `-dx` on west), floored at
/// `min_width`; height is derived from the aspect ratio rather than tracking
/// the pointer. West/north corners keep the opposite edge stationary.
pub fn resize_from_corner(
    start: &PanelGeometry,
    corner: ResizeCorner,
    dx: f64,
    min_width: f64,
    aspect_ratio: f64,
) -> PanelGeometry {
    let width_delta = if corner.pulls_west() { -dx } else { dx };
    let new_width = (start.width + width_delta).max(min_width);
    let new_height = new_width / aspect_ratio;
    let (start_left, start_top) = start.position().unwrap_or((0.0, 0.0));

    let left = if corner.pulls_west() {
        start_left + start.width - new_width
    } else {
        start_left
    };
    let top = if corner.pulls_north() {
        start_top + start.height - new_height
    } else {
        start_top
    };

    PanelGeometry {
        width: new_width,
        height: new_height,
        left: Some(left),
        top: Some(top),
    }
}

/// Moves a start-of-gesture snapshot by a pointer delta.
pub fn offset_from(start: &PanelGeometry, dx: f64, dy: f64) -> PanelGeometry {
    let (start_left, start_top) = start.position().unwrap_or((0.0, 0.0));
    PanelGeometry {
        left: Some(start_left + dx),
        top: Some(start_top + dy),
        ..*start
    }
}

pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.min(max).max(min)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placed(width: f64, height: f64, left: f64, top: f64) -> PanelGeometry {
        PanelGeometry {
            width,
            height,
            left: Some(left),
            top: Some(top),
        }
    }

    #[test]
    fn ensure_placed_defaults_to_bottom_right_inset_by_margin() {
        let mut geometry = PanelGeometry::unplaced(400.0, 225.0);
        geometry.ensure_placed(Viewport::new(1920.0, 1080.0), 20.0);
        assert_eq!(geometry.left, Some(1500.0));
        assert_eq!(geometry.top, Some(835.0));
    }

    #[test]
    fn ensure_placed_keeps_existing_position() {
        let mut geometry = placed(400.0, 225.0, 10.0, 10.0);
        geometry.ensure_placed(Viewport::new(1920.0, 1080.0), 20.0);
        assert_eq!(geometry.position(), Some((10.0, 10.0)));
    }

    #[test]
    fn clamp_to_keeps_panel_inside_viewport() {
        let viewport = Viewport::new(1280.0, 720.0);
        let mut geometry = placed(400.0, 225.0, -50.0, 700.0);
        geometry.clamp_to(viewport);
        assert_eq!(geometry.left, Some(0.0));
        assert_eq!(geometry.top, Some(495.0));
    }

    #[test]
    fn clamp_to_pins_oversized_panel_at_origin() {
        let viewport = Viewport::new(300.0, 200.0);
        let mut geometry = placed(400.0, 225.0, 150.0, 100.0);
        geometry.clamp_to(viewport);
        assert_eq!(geometry.left, Some(0.0));
        assert_eq!(geometry.top, Some(0.0));
    }

    #[test]
    fn resize_from_north_west_keeps_south_east_edges_stationary() {
        let start = placed(400.0, 225.0, 300.0, 200.0);
        let resized =
            resize_from_corner(&start, ResizeCorner::NorthWest, -160.0, 200.0, 16.0 / 9.0);
        assert_eq!(resized.width, 560.0);
        assert_eq!(resized.height, 315.0);
        assert_eq!(resized.left, Some(300.0 + 400.0 - 560.0));
        assert_eq!(resized.top, Some(200.0 + 225.0 - 315.0));
    }

    #[test]
    fn resize_from_south_east_keeps_origin_stationary() {
        let start = placed(400.0, 225.0, 300.0, 200.0);
        let resized = resize_from_corner(&start, ResizeCorner::SouthEast, 80.0, 200.0, 16.0 / 9.0);
        assert_eq!(resized.width, 480.0);
        assert_eq!(resized.height, 270.0);
        assert_eq!(resized.position(), Some((300.0, 200.0)));
    }

    #[test]
    fn resize_floors_width_at_minimum() {
        let start = placed(400.0, 225.0, 300.0, 200.0);
        let resized =
            resize_from_corner(&start, ResizeCorner::SouthEast, -900.0, 200.0, 16.0 / 9.0);
        assert_eq!(resized.width, 200.0);
        assert_eq!(resized.height, 112.5);
    }

    #[test]
    fn invalid_geometries_are_rejected_on_read() {
        assert!(!PanelGeometry::unplaced(0.0, 225.0).is_valid());
        assert!(!PanelGeometry::unplaced(400.0, -1.0).is_valid());
        assert!(!placed(400.0, 225.0, f64::NAN, 0.0).is_valid());
        assert!(PanelGeometry::unplaced(400.0, 225.0).is_valid());
        assert!(placed(400.0, 225.0, 0.0, 0.0).is_valid());
    }
}
