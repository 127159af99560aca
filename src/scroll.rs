/// Frame-coalesced scroll signal.
///
/// Hosts call [`ScrollSignalSource::note_scroll`] from their scroll listener
/// and [`ScrollSignalSource::take_frame`] from their animation-frame
/// callback. However many scroll events land between two frames, at most one
/// evaluation fires; events are coalesced, never queued.
#[derive(Debug, Default)]
pub struct ScrollSignalSource {
    pending: bool,
    coalesced: u64,
}

impl ScrollSignalSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn note_scroll(&mut self) {
        if self.pending {
            self.coalesced += 1;
        }
        self.pending = true;
    }

    /// Consumes the pending marker. True at most once per burst of scroll
    /// events.
    pub fn take_frame(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }

    /// Scroll events absorbed into an already-pending frame, for diagnostics.
    pub fn coalesced_count(&self) -> u64 {
        self.coalesced
    }
}
