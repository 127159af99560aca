use crate::config::PanelConfig;
use crate::drag::DragTracker;
use crate::geometry::{self, PanelGeometry, ResizeCorner};
use crate::host::{HostView, PanelSurface};
use crate::lifecycle::{LifecycleMachine, LifecycleState, PanelEvent, PanelPhase};
use crate::positioner;
use crate::scroll::ScrollSignalSource;
use crate::store::{GeometryStore, StorageBackend};

/// The draggable regions the host wires pointer events to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelHandle {
    /// The panel's drag area; moves the whole panel.
    Move,
    /// One of the four corner handles; resizes around the opposite corner.
    Resize(ResizeCorner),
    /// The restore button shown while minimized. Draggable; a plain click
    /// restores the panel.
    Restore,
}

/// Bounded wait for host DOM that has not been built yet. Late-arriving
/// anchors are normal on single-page hosts, so absence schedules a retry on
/// the next frame instead of failing; only exhaustion gives up until the next
/// navigation.
#[derive(Debug, Default)]
struct ReadinessProbe {
    misses: u32,
    exhausted: bool,
}

impl ReadinessProbe {
    fn note_absent(&mut self, limit: u32) {
        if self.exhausted {
            return;
        }
        self.misses += 1;
        if self.misses >= limit {
            self.exhausted = true;
            tracing::warn!(frames = self.misses, "anchor element never appeared; giving up until navigation");
        }
    }

    fn note_found(&mut self) {
        self.misses = 0;
        self.exhausted = false;
    }

    fn wants_frame(&self) -> bool {
        self.misses > 0 && !self.exhausted
    }

    fn reset(&mut self) {
        self.misses = 0;
        self.exhausted = false;
    }
}

/// Owns the panel lifecycle end to end: scroll-driven enter/exit with
/// hysteresis, explicit minimize/restore, drag and corner-resize gestures,
/// and geometry persistence. All placement mutations funnel through here, so
/// nothing can race an in-flight transition.
#[derive(Debug)]
pub struct PanelController<B> {
    config: PanelConfig,
    machine: LifecycleMachine,
    store: GeometryStore<B>,
    geometry: PanelGeometry,
    drags: DragTracker<PanelHandle>,
    scroll: ScrollSignalSource,
    probe: ReadinessProbe,
}

impl<B: StorageBackend> PanelController<B> {
    pub fn new(config: PanelConfig, backend: B) -> Self {
        let geometry = config.default_geometry();
        let store = GeometryStore::new(backend, config.storage_key.clone(), geometry);
        Self {
            config,
            machine: LifecycleMachine::new(),
            store,
            geometry,
            drags: DragTracker::new(),
            scroll: ScrollSignalSource::new(),
            probe: ReadinessProbe::default(),
        }
    }

    pub fn phase(&self) -> PanelPhase {
        self.machine.phase()
    }

    pub fn lifecycle_state(&self) -> LifecycleState {
        self.machine.state()
    }

    pub fn geometry(&self) -> PanelGeometry {
        self.geometry
    }

    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    pub fn anchor_probe_exhausted(&self) -> bool {
        self.probe.exhausted
    }

    /// Host scroll listener hook. Cheap and coalescing; the actual evaluation
    /// runs from [`Self::on_frame`].
    pub fn note_scroll(&mut self) {
        self.scroll.note_scroll();
    }

    /// Host animation-frame hook. Evaluates at most one scroll check per
    /// frame; also drives retries while the anchor element is still absent.
    pub fn on_frame(&mut self, host: &dyn HostView, surface: &mut dyn PanelSurface) {
        let scroll_due = self.scroll.take_frame();
        if !scroll_due && !self.probe.wants_frame() {
            return;
        }
        self.evaluate(host, surface);
    }

    /// Host navigation-finished hook. The lifecycle state encodes
    /// viewport-relative facts that lose meaning across a navigation, so it
    /// is discarded outright and rebuilt for the new view.
    pub fn handle_navigation(&mut self, surface: &mut dyn PanelSurface) {
        let was = self.machine.phase();
        self.machine.reset();
        self.probe.reset();
        self.drags.cancel();
        if was != PanelPhase::Inactive {
            positioner::reset_to_flow(surface);
            surface.set_minimized(false);
            surface.emit_resize();
        }
    }

    /// Host settle-timer hook; clears the transition guard and re-emits the
    /// resize signal so dependent layout settles on final geometry.
    pub fn finish_settle(&mut self, surface: &mut dyn PanelSurface) {
        if self.machine.finish_settle() {
            surface.emit_resize();
        }
    }

    pub fn minimize(&mut self, surface: &mut dyn PanelSurface) {
        match self.machine.apply(PanelEvent::Minimize) {
            Ok(_) => {
                surface.set_minimized(true);
                surface.schedule_settle(self.config.settle_time());
            }
            Err(err) => tracing::debug!(%err, "minimize ignored"),
        }
    }

    pub fn restore(&mut self, host: &dyn HostView, surface: &mut dyn PanelSurface) {
        match self.machine.apply(PanelEvent::Restore) {
            Ok(_) => {
                surface.set_minimized(false);
                positioner::apply_floating_box(host.viewport(), &mut self.geometry, surface);
                surface.schedule_settle(self.config.settle_time());
            }
            Err(err) => tracing::debug!(%err, "restore ignored"),
        }
    }

    pub fn pointer_press(&mut self, handle: PanelHandle, x: f64, y: f64) {
        let allowed = match handle {
            PanelHandle::Move | PanelHandle::Resize(_) => self.machine.phase() == PanelPhase::Active,
            PanelHandle::Restore => self.machine.phase() == PanelPhase::Minimized,
        };
        if !allowed {
            tracing::debug!(?handle, phase = ?self.machine.phase(), "press ignored in current phase");
            return;
        }
        self.drags.press(handle, x, y, self.geometry);
    }

    pub fn pointer_motion(
        &mut self,
        host: &dyn HostView,
        surface: &mut dyn PanelSurface,
        x: f64,
        y: f64,
    ) {
        let Some(sample) = self.drags.motion(x, y) else {
            return;
        };
        match sample.handle {
            PanelHandle::Move => {
                self.geometry = geometry::offset_from(&sample.start, sample.dx, sample.dy);
                positioner::apply_floating_box(host.viewport(), &mut self.geometry, surface);
            }
            PanelHandle::Resize(corner) => {
                self.geometry = geometry::resize_from_corner(
                    &sample.start,
                    corner,
                    sample.dx,
                    self.config.min_width,
                    self.config.aspect_ratio,
                );
                positioner::apply_floating_box(host.viewport(), &mut self.geometry, surface);
                surface.emit_resize();
            }
            PanelHandle::Restore => {
                // The panel box is hidden while minimized; only the stored
                // position follows the button.
                self.geometry = geometry::offset_from(&sample.start, sample.dx, sample.dy);
                self.geometry.clamp_to(host.viewport());
            }
        }
    }

    pub fn pointer_release(&mut self, host: &dyn HostView, surface: &mut dyn PanelSurface) {
        let Some(end) = self.drags.release() else {
            return;
        };
        self.store.save(&self.geometry);
        match end.handle {
            PanelHandle::Move | PanelHandle::Resize(_) => surface.emit_resize(),
            PanelHandle::Restore => {
                if !end.moved {
                    self.restore(host, surface);
                }
            }
        }
    }

    fn evaluate(&mut self, host: &dyn HostView, surface: &mut dyn PanelSurface) {
        if !host.on_detail_view() || host.alternate_layout_active() {
            self.force_deactivate(surface);
            return;
        }
        match self.machine.phase() {
            PanelPhase::Inactive => self.try_enter(host, surface),
            PanelPhase::Active | PanelPhase::Minimized => self.try_exit(host, surface),
        }
    }

    fn try_enter(&mut self, host: &dyn HostView, surface: &mut dyn PanelSurface) {
        let Some(rect) = host.anchor_bounds() else {
            self.probe.note_absent(self.config.probe_frame_limit);
            return;
        };
        self.probe.note_found();

        if rect.bottom >= -self.config.enter_threshold {
            return;
        }

        // Anchor in document space: survives further scrolling, unlike the
        // viewport-relative bottom edge.
        let anchor = host.scroll_y() + rect.bottom;
        if let Err(err) = self.machine.apply(PanelEvent::Enter) {
            tracing::debug!(%err, "enter ignored");
            return;
        }
        self.machine.set_anchor(anchor);

        self.geometry = self.store.load();
        self.geometry
            .ensure_placed(host.viewport(), self.config.placement_margin);
        surface.set_placeholder_height(rect.height());
        positioner::apply_floating_box(host.viewport(), &mut self.geometry, surface);
        surface.emit_resize();
        surface.schedule_settle(self.config.settle_time());
    }

    fn try_exit(&mut self, host: &dyn HostView, surface: &mut dyn PanelSurface) {
        let Some(anchor) = self.machine.anchor() else {
            return;
        };
        if host.scroll_y() > anchor + self.config.exit_threshold {
            return;
        }
        match self.machine.apply(PanelEvent::Exit) {
            Ok(_) => {
                self.drags.cancel();
                positioner::reset_to_flow(surface);
                surface.set_minimized(false);
                surface.emit_resize();
                surface.schedule_settle(self.config.settle_time());
            }
            Err(err) => tracing::debug!(%err, "exit ignored"),
        }
    }

    fn force_deactivate(&mut self, surface: &mut dyn PanelSurface) {
        match self.machine.apply(PanelEvent::ForceDeactivate) {
            Ok(transition) if transition.changed() => {
                self.drags.cancel();
                positioner::reset_to_flow(surface);
                surface.set_minimized(false);
                surface.emit_resize();
            }
            Ok(_) => {}
            Err(err) => tracing::debug!(%err, "forced deactivation ignored"),
        }
    }
}
