use crate::geometry::PanelGeometry;

/// Pointer travel below this (on both axes) still counts as a click.
const DRAG_SLOP: f64 = 3.0;

/// Press-move-release gesture tracker.
///
/// A press captures the pointer for one handle along with a snapshot of the
/// geometry at press time. Motions are forwarded verbatim as deltas from the
/// press point; release always yields exactly one [`DragEnd`], even when no
/// motion arrived in between. A second press while a gesture is live never
/// steals the first gesture's capture.
#[derive(Debug, Default)]
pub struct DragTracker<H> {
    active: Option<Gesture<H>>,
}

#[derive(Debug)]
struct Gesture<H> {
    handle: H,
    press_x: f64,
    press_y: f64,
    start: PanelGeometry,
    moved: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSample<H> {
    pub handle: H,
    pub dx: f64,
    pub dy: f64,
    pub start: PanelGeometry,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragEnd<H> {
    pub handle: H,
    pub start: PanelGeometry,
    /// True once any sample left the click slop on either axis.
    pub moved: bool,
}

impl<H: Copy + PartialEq + std::fmt::Debug> DragTracker<H> {
    pub fn new() -> Self {
        Self { active: None }
    }

    pub fn is_tracking(&self) -> bool {
        self.active.is_some()
    }

    /// Begins a gesture. Returns false when another gesture already owns the
    /// pointer; the press is ignored rather than rebinding capture.
    pub fn press(&mut self, handle: H, x: f64, y: f64, start: PanelGeometry) -> bool {
        if let Some(active) = &self.active {
            tracing::debug!(?handle, holding = ?active.handle, "press ignored while gesture live");
            return false;
        }
        self.active = Some(Gesture {
            handle,
            press_x: x,
            press_y: y,
            start,
            moved: false,
        });
        true
    }

    pub fn motion(&mut self, x: f64, y: f64) -> Option<DragSample<H>> {
        let gesture = self.active.as_mut()?;
        let dx = x - gesture.press_x;
        let dy = y - gesture.press_y;
        if dx.abs() > DRAG_SLOP || dy.abs() > DRAG_SLOP {
            gesture.moved = true;
        }
        Some(DragSample {
            handle: gesture.handle,
            dx,
            dy,
            start: gesture.start,
        })
    }

    /// Ends the live gesture. Yields its completion record exactly once; a
    /// release with no live gesture is a no-op.
    pub fn release(&mut self) -> Option<DragEnd<H>> {
        let gesture = self.active.take()?;
        Some(DragEnd {
            handle: gesture.handle,
            start: gesture.start,
            moved: gesture.moved,
        })
    }

    /// Drops a live gesture without completing it. Used when the view the
    /// gesture belonged to is discarded.
    pub fn cancel(&mut self) {
        if let Some(gesture) = self.active.take() {
            tracing::debug!(handle = ?gesture.handle, "gesture cancelled");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Handle {
        Move,
        Corner,
    }

    fn snapshot() -> PanelGeometry {
        PanelGeometry {
            width: 400.0,
            height: 225.0,
            left: Some(100.0),
            top: Some(50.0),
        }
    }

    #[test]
    fn motion_reports_deltas_from_press_point() {
        let mut tracker = DragTracker::new();
        assert!(tracker.press(Handle::Move, 10.0, 20.0, snapshot()));

        let sample = tracker.motion(25.0, 14.0).unwrap();
        assert_eq!(sample.handle, Handle::Move);
        assert_eq!(sample.dx, 15.0);
        assert_eq!(sample.dy, -6.0);
        assert_eq!(sample.start, snapshot());
    }

    #[test]
    fn release_completes_exactly_once_even_without_motion() {
        let mut tracker = DragTracker::new();
        tracker.press(Handle::Move, 0.0, 0.0, snapshot());

        let end = tracker.release().unwrap();
        assert_eq!(end.handle, Handle::Move);
        assert!(!end.moved);
        assert!(tracker.release().is_none());
        assert!(!tracker.is_tracking());
    }

    #[test]
    fn second_press_does_not_steal_a_live_gesture() {
        let mut tracker = DragTracker::new();
        assert!(tracker.press(Handle::Move, 0.0, 0.0, snapshot()));
        assert!(!tracker.press(Handle::Corner, 50.0, 50.0, snapshot()));

        let sample = tracker.motion(10.0, 0.0).unwrap();
        assert_eq!(sample.handle, Handle::Move);
        assert_eq!(sample.dx, 10.0);
    }

    #[test]
    fn moved_flag_is_sticky_once_slop_is_exceeded() {
        let mut tracker = DragTracker::new();
        tracker.press(Handle::Move, 0.0, 0.0, snapshot());

        tracker.motion(2.0, 1.0);
        assert!(!tracker.release().unwrap().moved);

        tracker.press(Handle::Move, 0.0, 0.0, snapshot());
        tracker.motion(0.0, 8.0);
        tracker.motion(1.0, 1.0);
        assert!(tracker.release().unwrap().moved);
    }

    #[test]
    fn motion_without_gesture_yields_nothing() {
        let mut tracker: DragTracker<Handle> = DragTracker::new();
        assert!(tracker.motion(5.0, 5.0).is_none());
    }

    #[test]
    fn cancel_discards_the_gesture_without_completion() {
        let mut tracker = DragTracker::new();
        tracker.press(Handle::Corner, 0.0, 0.0, snapshot());
        tracker.cancel();
        assert!(tracker.release().is_none());
    }
}
