use std::collections::BTreeMap;

use crate::{
    animation::ease::Ease,
    foundation::core::{Axis, RectId, Vec2},
    scene::store::RectStore,
};

/// Engine-assigned id of one running tween.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct TweenId(pub u64);

/// Rect field a tween writes to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum TweenProperty {
    /// One component of the anchored position.
    AnchoredPosition(Axis),
    /// Uniform local scale.
    Scale,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TweenRequest {
    pub rect: RectId,
    pub property: TweenProperty,
    pub from: f64,
    pub to: f64,
    /// Seconds.
    pub duration: f64,
    pub ease: Ease,
}

/// Outcome reported by an engine for a tween it started.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TweenEvent {
    Completed(TweenId),
    /// Stopped before reaching its target (e.g. its rect went away).
    Cancelled(TweenId),
}

impl TweenEvent {
    pub fn id(self) -> TweenId {
        match self {
            Self::Completed(id) | Self::Cancelled(id) => id,
        }
    }
}

/// The tweening service a layout group animates through.
///
/// Completion and engine-side cancellation are reported as [`TweenEvent`]s which the host feeds
/// back to the owning group. A tween stopped through [`AnimationEngine::cancel`] must not be
/// reported afterwards; the caller already knows.
pub trait AnimationEngine {
    fn animate(&mut self, request: TweenRequest) -> TweenId;

    /// Stop `id` without reporting it. Returns whether it was still running.
    fn cancel(&mut self, id: TweenId) -> bool;
}

#[derive(Clone, Debug)]
struct ActiveTween {
    request: TweenRequest,
    elapsed: f64,
}

/// Reference engine that advances tweens on an explicit clock.
#[derive(Clone, Debug, Default)]
pub struct TweenEngine {
    next_id: u64,
    tweens: BTreeMap<TweenId, ActiveTween>,
    pending: Vec<TweenEvent>,
}

impl TweenEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_live(&self, id: TweenId) -> bool {
        self.tweens.contains_key(&id)
    }

    pub fn live_count(&self) -> usize {
        self.tweens.len()
    }

    pub fn request(&self, id: TweenId) -> Option<&TweenRequest> {
        self.tweens.get(&id).map(|t| &t.request)
    }

    /// Stop every tween targeting `rect`, reporting each as cancelled on the next advance.
    pub fn kill_rect(&mut self, rect: RectId) -> usize {
        let ids: Vec<TweenId> = self
            .tweens
            .iter()
            .filter(|(_, t)| t.request.rect == rect)
            .map(|(id, _)| *id)
            .collect();
        for id in &ids {
            self.tweens.remove(id);
            self.pending.push(TweenEvent::Cancelled(*id));
        }
        ids.len()
    }

    /// Move every tween forward by `dt` seconds, writing interpolated values into `store`.
    ///
    /// Returns the events produced since the last call, completions in tween-id order.
    pub fn advance<S: RectStore + ?Sized>(&mut self, dt: f64, store: &mut S) -> Vec<TweenEvent> {
        let mut events = std::mem::take(&mut self.pending);
        let mut finished = Vec::new();

        for (id, tween) in self.tweens.iter_mut() {
            let req = tween.request;
            let Some(rect) = store.rect_mut(req.rect) else {
                finished.push(*id);
                events.push(TweenEvent::Cancelled(*id));
                continue;
            };

            tween.elapsed += dt.max(0.0);
            let t = if req.duration > 0.0 {
                tween.elapsed / req.duration
            } else {
                1.0
            };
            let done = t >= 1.0;
            let value = if done {
                req.to
            } else {
                req.from + (req.to - req.from) * req.ease.apply(t)
            };

            match req.property {
                TweenProperty::AnchoredPosition(axis) => {
                    axis.set(&mut rect.anchored_position, value);
                }
                TweenProperty::Scale => rect.local_scale = Vec2::new(value, value),
            }

            if done {
                finished.push(*id);
                events.push(TweenEvent::Completed(*id));
            }
        }

        for id in finished {
            self.tweens.remove(&id);
        }
        events
    }
}

impl AnimationEngine for TweenEngine {
    fn animate(&mut self, request: TweenRequest) -> TweenId {
        let id = TweenId(self.next_id);
        self.next_id += 1;
        self.tweens.insert(
            id,
            ActiveTween {
                request,
                elapsed: 0.0,
            },
        );
        id
    }

    fn cancel(&mut self, id: TweenId) -> bool {
        self.tweens.remove(&id).is_some()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/engine.rs"]
mod tests;
