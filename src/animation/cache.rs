use std::collections::BTreeMap;

use crate::{
    animation::directive::{AnimationDirective, AnimationKind},
    animation::engine::{AnimationEngine, TweenEvent, TweenId, TweenProperty, TweenRequest},
    foundation::core::{Axis, PlayMode, RectId, Vec2, approx_eq},
    scene::store::RectStore,
};

/// A layout-driven move of one rect along one axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransitionRequest {
    pub rect: RectId,
    pub axis: Axis,
    /// Target anchored-position component.
    pub target: f64,
    pub directive: AnimationDirective,
}

/// The live transition for a `(rect, axis)` key.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransitionHandle {
    pub rect: RectId,
    pub axis: Axis,
    pub tween: TweenId,
    pub kind: AnimationKind,
    pub target: f64,
}

/// Lifecycle notifications, recorded when journaling is on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TransitionEvent {
    Started(TransitionHandle),
    Completed(TransitionHandle),
    Cancelled(TransitionHandle),
}

impl TransitionEvent {
    pub fn handle(&self) -> &TransitionHandle {
        match self {
            Self::Started(h) | Self::Completed(h) | Self::Cancelled(h) => h,
        }
    }
}

/// At most one live transition per `(rect, axis)`.
///
/// A newer request cancels the live one before starting its own tween. Engine events are
/// matched by tween id through a reverse index, so a late event for a superseded tween finds
/// nothing and is dropped.
#[derive(Debug, Default)]
pub struct TweenCache {
    slots: [BTreeMap<RectId, TransitionHandle>; 2],
    owners: BTreeMap<TweenId, (Axis, RectId)>,
    journaling: bool,
    journal: Vec<TransitionEvent>,
}

impl TweenCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record [`TransitionEvent`]s for [`TweenCache::drain_events`].
    pub fn set_journaling(&mut self, on: bool) {
        self.journaling = on;
        if !on {
            self.journal.clear();
        }
    }

    pub fn drain_events(&mut self) -> Vec<TransitionEvent> {
        std::mem::take(&mut self.journal)
    }

    pub fn get(&self, rect: RectId, axis: Axis) -> Option<&TransitionHandle> {
        self.slots[axis.index()].get(&rect)
    }

    pub fn len(&self) -> usize {
        self.slots.iter().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(BTreeMap::is_empty)
    }

    pub fn handles(&self) -> impl Iterator<Item = &TransitionHandle> {
        self.slots.iter().flat_map(BTreeMap::values)
    }

    pub fn owns(&self, tween: TweenId) -> bool {
        self.owners.contains_key(&tween)
    }

    fn record(&mut self, event: TransitionEvent) {
        if self.journaling {
            self.journal.push(event);
        }
    }

    fn insert(&mut self, handle: TransitionHandle) {
        self.slots[handle.axis.index()].insert(handle.rect, handle);
        self.owners.insert(handle.tween, (handle.axis, handle.rect));
        self.record(TransitionEvent::Started(handle));
    }

    fn scale_live(&self, rect: RectId) -> bool {
        Axis::BOTH
            .iter()
            .filter_map(|axis| self.get(rect, *axis))
            .any(|h| h.kind == AnimationKind::Scale)
    }

    /// Move `request.rect` toward `request.target`, animated or not.
    ///
    /// Snaps (and cancels whatever is live for the key) when `mode` is not playing or the
    /// directive has no positive finite duration. A snap that involves Scale, by request or
    /// by cutting a Scale transition, also leaves the rect at scale 1. Returns the handle now
    /// live for the key, if any.
    pub fn request_transition<S, E>(
        &mut self,
        store: &mut S,
        engine: &mut E,
        mode: PlayMode,
        request: TransitionRequest,
    ) -> Option<TransitionHandle>
    where
        S: RectStore + ?Sized,
        E: AnimationEngine + ?Sized,
    {
        let TransitionRequest {
            rect: id,
            axis,
            target,
            directive,
        } = request;
        let rect = *store.rect(id)?;
        let current = axis.of(rect.anchored_position);

        if !mode.is_playing() || directive.is_instant() {
            let cut = self.cancel(engine, id, axis);
            if let Some(cut) = cut {
                tracing::debug!(%id, ?axis, from = cut.target, to = target, "snap cut transition");
            }
            // Scale is one property shared by both axes: settle it at 1 and stop the other
            // axis from animating it further.
            let settle_scale = directive.kind == AnimationKind::Scale
                || cut.is_some_and(|h| h.kind == AnimationKind::Scale);
            if settle_scale
                && self
                    .get(id, axis.cross())
                    .is_some_and(|h| h.kind == AnimationKind::Scale)
            {
                self.cancel(engine, id, axis.cross());
            }
            let rect = store.rect_mut(id)?;
            axis.set(&mut rect.anchored_position, target);
            if settle_scale {
                rect.local_scale = Vec2::new(1.0, 1.0);
            }
            tracing::trace!(%id, ?axis, target, "snapped");
            return None;
        }

        match self.get(id, axis) {
            Some(live) if live.kind == directive.kind && approx_eq(live.target, target) => {
                return Some(*live);
            }
            Some(_) => {}
            None => {
                let settled = match directive.kind {
                    AnimationKind::Move => approx_eq(current, target),
                    AnimationKind::Scale => {
                        approx_eq(current, target) && rect.local_scale == Vec2::new(1.0, 1.0)
                    }
                };
                if settled {
                    return None;
                }
            }
        }

        let zero_scale = directive.kind == AnimationKind::Scale && !self.scale_live(id);
        if let Some(replaced) = self.cancel(engine, id, axis) {
            tracing::debug!(%id, ?axis, from = replaced.target, to = target, "transition replaced");
        }

        let tween = match directive.kind {
            AnimationKind::Move => engine.animate(TweenRequest {
                rect: id,
                property: TweenProperty::AnchoredPosition(axis),
                from: current,
                to: target,
                duration: directive.duration,
                ease: directive.ease,
            }),
            AnimationKind::Scale => {
                let rect = store.rect_mut(id)?;
                axis.set(&mut rect.anchored_position, target);
                if zero_scale {
                    rect.local_scale = Vec2::ZERO;
                }
                engine.animate(TweenRequest {
                    rect: id,
                    property: TweenProperty::Scale,
                    from: rect.local_scale.x,
                    to: 1.0,
                    duration: directive.duration,
                    ease: directive.ease,
                })
            }
        };

        let handle = TransitionHandle {
            rect: id,
            axis,
            tween,
            kind: directive.kind,
            target,
        };
        self.insert(handle);
        Some(handle)
    }

    /// Cancel the live transition for `(rect, axis)`, if any.
    pub fn cancel<E: AnimationEngine + ?Sized>(
        &mut self,
        engine: &mut E,
        rect: RectId,
        axis: Axis,
    ) -> Option<TransitionHandle> {
        let handle = self.slots[axis.index()].remove(&rect)?;
        self.owners.remove(&handle.tween);
        engine.cancel(handle.tween);
        self.record(TransitionEvent::Cancelled(handle));
        Some(handle)
    }

    /// Apply an engine event. Events for tweens this cache no longer owns are ignored.
    pub fn handle_event(&mut self, event: TweenEvent) -> Option<TransitionEvent> {
        let Some((axis, rect)) = self.owners.remove(&event.id()) else {
            tracing::trace!(tween = ?event.id(), "stale tween event ignored");
            return None;
        };
        let handle = self.slots[axis.index()].remove(&rect)?;
        let out = match event {
            TweenEvent::Completed(_) => TransitionEvent::Completed(handle),
            TweenEvent::Cancelled(_) => TransitionEvent::Cancelled(handle),
        };
        self.record(out);
        Some(out)
    }

    /// Cancel everything. No event for a torn-down handle is delivered afterwards.
    pub fn teardown<E: AnimationEngine + ?Sized>(&mut self, engine: &mut E) -> usize {
        let handles: Vec<TransitionHandle> = self
            .slots
            .iter_mut()
            .flat_map(|slot| std::mem::take(slot).into_values())
            .collect();
        self.owners.clear();
        for handle in &handles {
            engine.cancel(handle.tween);
            self.record(TransitionEvent::Cancelled(*handle));
        }
        if !handles.is_empty() {
            tracing::debug!(count = handles.len(), "tween cache torn down");
        }
        handles.len()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/cache.rs"]
mod tests;
