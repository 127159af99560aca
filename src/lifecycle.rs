use thiserror::Error;

pub type TransitionResult<T> = std::result::Result<T, TransitionError>;

#[derive(Debug, Error)]
pub enum TransitionError {
    #[error("invalid transition: from {from:?} using event {event:?}")]
    Invalid { from: PanelPhase, event: PanelEvent },
    #[error("transition blocked while settling: from {from:?} using event {event:?}")]
    Blocked { from: PanelPhase, event: PanelEvent },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelPhase {
    #[default]
    Inactive,
    Active,
    Minimized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelEvent {
    Enter,
    Exit,
    Minimize,
    Restore,
    /// Wrong view, alternate layout, or navigation. Always legal, always
    /// lands on `Inactive`, and ignores the settle guard.
    ForceDeactivate,
}

/// How a phase actually changed; `from == to` only for a forced deactivation
/// that was already inactive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: PanelPhase,
    pub to: PanelPhase,
}

impl Transition {
    pub fn changed(&self) -> bool {
        self.from != self.to
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LifecycleState {
    pub phase: PanelPhase,
    pub transitioning: bool,
    /// Absolute document-space scroll reference recorded at entry.
    pub anchor: Option<f64>,
}

impl Default for LifecycleState {
    fn default() -> Self {
        Self {
            phase: PanelPhase::Inactive,
            transitioning: false,
            anchor: None,
        }
    }
}

/// The panel lifecycle as an explicit transition table.
///
/// `transitioning` is the sole re-entrancy guard: while a visual transition
/// settles, every event except [`PanelEvent::ForceDeactivate`] is refused.
/// Phase and guard can never drift apart the way free-floating booleans can.
#[derive(Debug, Default)]
pub struct LifecycleMachine {
    state: LifecycleState,
    history: Vec<(PanelEvent, Transition)>,
}

impl LifecycleMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn phase(&self) -> PanelPhase {
        self.state.phase
    }

    pub fn is_transitioning(&self) -> bool {
        self.state.transitioning
    }

    pub fn anchor(&self) -> Option<f64> {
        self.state.anchor
    }

    pub fn set_anchor(&mut self, anchor: f64) {
        self.state.anchor = Some(anchor);
    }

    pub fn can_apply(&self, event: PanelEvent) -> bool {
        self.next_phase(event).is_some()
    }

    pub fn next_phase(&self, event: PanelEvent) -> Option<PanelPhase> {
        use PanelEvent::*;
        match (self.state.phase, event) {
            (_, ForceDeactivate) => Some(PanelPhase::Inactive),
            (PanelPhase::Inactive, Enter) => Some(PanelPhase::Active),
            (PanelPhase::Active, Exit) => Some(PanelPhase::Inactive),
            (PanelPhase::Minimized, Exit) => Some(PanelPhase::Inactive),
            (PanelPhase::Active, Minimize) => Some(PanelPhase::Minimized),
            (PanelPhase::Minimized, Restore) => Some(PanelPhase::Active),
            _ => None,
        }
    }

    pub fn apply(&mut self, event: PanelEvent) -> TransitionResult<Transition> {
        tracing::debug!(from = ?self.state.phase, ?event, "requesting panel transition");

        if event == PanelEvent::ForceDeactivate {
            let transition = Transition {
                from: self.state.phase,
                to: PanelPhase::Inactive,
            };
            self.state = LifecycleState::default();
            self.history.push((event, transition));
            return Ok(transition);
        }

        if self.state.transitioning {
            return Err(TransitionError::Blocked {
                from: self.state.phase,
                event,
            });
        }

        let to = self.next_phase(event).ok_or(TransitionError::Invalid {
            from: self.state.phase,
            event,
        })?;

        let transition = Transition {
            from: self.state.phase,
            to,
        };
        self.state.phase = to;
        self.state.transitioning = true;
        if to == PanelPhase::Inactive {
            self.state.anchor = None;
        }
        self.history.push((event, transition));
        Ok(transition)
    }

    /// Clears the settle guard. Returns whether a transition was in flight,
    /// so the caller knows to re-emit its resize signal.
    pub fn finish_settle(&mut self) -> bool {
        std::mem::take(&mut self.state.transitioning)
    }

    /// Discards the state outright, as on host navigation. Viewport-relative
    /// facts lose meaning across a navigation, so nothing is carried over.
    pub fn reset(&mut self) {
        self.state = LifecycleState::default();
        self.history.clear();
    }
}

#[cfg(test)]
impl LifecycleMachine {
    fn history(&self) -> &[(PanelEvent, Transition)] {
        &self.history
    }
}
