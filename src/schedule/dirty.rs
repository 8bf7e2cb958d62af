use crate::foundation::core::RectId;

/// The host's layout rebuild registry.
pub trait RebuildHost {
    /// True while the host is inside a layout rebuild.
    fn is_rebuilding_layout(&self) -> bool;

    fn mark_layout_for_rebuild(&mut self, rect: RectId);
}

/// Reference rebuild registry: a de-duplicated queue plus the "rebuilding" flag.
#[derive(Clone, Debug, Default)]
pub struct RebuildQueue {
    rebuilding: bool,
    pending: Vec<RectId>,
}

impl RebuildQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_rebuild(&mut self) {
        self.rebuilding = true;
    }

    pub fn end_rebuild(&mut self) {
        self.rebuilding = false;
    }

    pub fn is_pending(&self, rect: RectId) -> bool {
        self.pending.contains(&rect)
    }

    pub fn pending(&self) -> &[RectId] {
        &self.pending
    }

    /// Pending rects in request order; the queue is left empty.
    pub fn take_pending(&mut self) -> Vec<RectId> {
        std::mem::take(&mut self.pending)
    }
}

impl RebuildHost for RebuildQueue {
    fn is_rebuilding_layout(&self) -> bool {
        self.rebuilding
    }

    fn mark_layout_for_rebuild(&mut self, rect: RectId) {
        if !self.pending.contains(&rect) {
            self.pending.push(rect);
        }
    }
}

/// What [`DirtyScheduler::mark_dirty`] did with a request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DirtyOutcome {
    /// The group is inactive.
    Ignored,
    Immediate,
    /// Held until the next tick because a rebuild is in progress.
    Deferred,
}

/// Turns "this group is dirty" into a rebuild request without re-entering a running rebuild.
///
/// This is the only place a layout request is postponed. Several deferrals within one tick
/// collapse into a single request.
#[derive(Clone, Debug)]
pub struct DirtyScheduler {
    rect: RectId,
    deferred: bool,
}

impl DirtyScheduler {
    pub fn new(rect: RectId) -> Self {
        Self {
            rect,
            deferred: false,
        }
    }

    pub fn has_deferred(&self) -> bool {
        self.deferred
    }

    pub fn mark_dirty<H: RebuildHost + ?Sized>(
        &mut self,
        host: &mut H,
        active: bool,
    ) -> DirtyOutcome {
        if !active {
            return DirtyOutcome::Ignored;
        }
        if host.is_rebuilding_layout() {
            if !self.deferred {
                tracing::debug!(rect = %self.rect, "dirty during rebuild, deferring to next tick");
            }
            self.deferred = true;
            return DirtyOutcome::Deferred;
        }
        host.mark_layout_for_rebuild(self.rect);
        DirtyOutcome::Immediate
    }

    /// Tick boundary: hand a deferred request to the host. Returns whether one was flushed.
    pub fn on_tick<H: RebuildHost + ?Sized>(&mut self, host: &mut H) -> bool {
        if !self.deferred || host.is_rebuilding_layout() {
            return false;
        }
        self.deferred = false;
        host.mark_layout_for_rebuild(self.rect);
        true
    }

    /// Request a rebuild now, bypassing deferral.
    pub fn force_rebuild<H: RebuildHost + ?Sized>(&mut self, host: &mut H) {
        self.deferred = false;
        host.mark_layout_for_rebuild(self.rect);
    }

    pub fn cancel_deferred(&mut self) {
        self.deferred = false;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/dirty.rs"]
mod tests;
