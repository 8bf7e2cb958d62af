use crate::{
    animation::cache::{TransitionEvent, TransitionHandle, TransitionRequest, TweenCache},
    animation::directive::{AnimationDirective, resolve_directive},
    animation::engine::{AnimationEngine, TweenEvent},
    foundation::core::{Axis, PlayMode, RectId, Vec2},
    layout::config::GroupConfig,
    layout::element::{LayoutElement, LayoutElementContribution},
    layout::solver::{AxisSizeSolver, ChildBox, ChildMeasure, TotalAxisSize},
    layout::tracker::{DrivenProperties, DrivenTracker},
    schedule::dirty::{DirtyOutcome, DirtyScheduler, RebuildHost},
    scene::store::RectStore,
};

/// Everything the set phases write through.
pub struct LayoutContext<'a, S: ?Sized, E: ?Sized> {
    pub store: &'a mut S,
    pub engine: &'a mut E,
    pub mode: PlayMode,
}

impl<'a, S: ?Sized, E: ?Sized> LayoutContext<'a, S, E> {
    pub fn new(store: &'a mut S, engine: &'a mut E, mode: PlayMode) -> Self {
        Self {
            store,
            engine,
            mode,
        }
    }
}

/// A row or column of child rects whose positions follow layout changes with transitions.
///
/// A pass runs four phases in fixed order: [`calculate_layout_input_horizontal`],
/// [`calculate_layout_input_vertical`], [`set_layout_horizontal`], [`set_layout_vertical`].
/// Both calc phases must complete before either set phase so that nested groups see full size
/// information before anything is positioned.
///
/// [`calculate_layout_input_horizontal`]: LayoutGroup::calculate_layout_input_horizontal
/// [`calculate_layout_input_vertical`]: LayoutGroup::calculate_layout_input_vertical
/// [`set_layout_horizontal`]: LayoutGroup::set_layout_horizontal
/// [`set_layout_vertical`]: LayoutGroup::set_layout_vertical
#[derive(Debug)]
pub struct LayoutGroup {
    rect: RectId,
    config: GroupConfig,
    enabled: bool,
    destroyed: bool,
    children: Vec<RectId>,
    totals: [TotalAxisSize; 2],
    tweens: TweenCache,
    dirty: DirtyScheduler,
    tracker: DrivenTracker,
}

impl LayoutGroup {
    /// A disabled group on `rect`; call [`LayoutGroup::on_enable`] to start laying out.
    pub fn new(rect: RectId, config: GroupConfig) -> Self {
        Self {
            rect,
            config: config.sanitized(),
            enabled: false,
            destroyed: false,
            children: Vec::new(),
            totals: [TotalAxisSize::default(); 2],
            tweens: TweenCache::new(),
            dirty: DirtyScheduler::new(rect),
            tracker: DrivenTracker::default(),
        }
    }

    pub fn rect(&self) -> RectId {
        self.rect
    }

    pub fn config(&self) -> &GroupConfig {
        &self.config
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Children gathered by the last horizontal calc phase.
    pub fn children(&self) -> &[RectId] {
        &self.children
    }

    pub fn tweens(&self) -> &TweenCache {
        &self.tweens
    }

    pub fn tweens_mut(&mut self) -> &mut TweenCache {
        &mut self.tweens
    }

    pub fn tracker(&self) -> &DrivenTracker {
        &self.tracker
    }

    pub fn scheduler(&self) -> &DirtyScheduler {
        &self.dirty
    }

    pub fn totals(&self, axis: Axis) -> TotalAxisSize {
        self.totals[axis.index()]
    }

    pub fn min_size(&self, axis: Axis) -> f64 {
        self.totals[axis.index()].min
    }

    pub fn preferred_size(&self, axis: Axis) -> f64 {
        self.totals[axis.index()].preferred
    }

    pub fn flexible_size(&self, axis: Axis) -> f64 {
        self.totals[axis.index()].flexible
    }

    pub fn layout_priority(&self) -> i32 {
        0
    }

    /// This group's own size contribution, for whatever group contains it.
    pub fn as_layout_element(&self) -> LayoutElement {
        LayoutElement::from_totals(self.totals[0], self.totals[1])
            .with_priority(self.layout_priority())
    }

    /// Enabled, not destroyed, and active in the host hierarchy.
    pub fn is_active<S: RectStore + ?Sized>(&self, store: &S) -> bool {
        self.enabled && !self.destroyed && store.is_active(self.rect)
    }

    pub fn mark_dirty<S, H>(&mut self, store: &S, host: &mut H) -> DirtyOutcome
    where
        S: RectStore + ?Sized,
        H: RebuildHost + ?Sized,
    {
        let active = self.is_active(store);
        self.dirty.mark_dirty(host, active)
    }

    pub fn on_enable<S, H>(&mut self, store: &S, host: &mut H) -> DirtyOutcome
    where
        S: RectStore + ?Sized,
        H: RebuildHost + ?Sized,
    {
        if self.destroyed {
            return DirtyOutcome::Ignored;
        }
        self.enabled = true;
        self.mark_dirty(store, host)
    }

    /// Stop driving children and have the parent re-layout without this group right away.
    pub fn on_disable<H: RebuildHost + ?Sized>(&mut self, host: &mut H) {
        self.enabled = false;
        self.tracker.clear();
        self.dirty.cancel_deferred();
        self.dirty.force_rebuild(host);
    }

    pub fn on_validate<S, H>(&mut self, store: &S, host: &mut H) -> DirtyOutcome
    where
        S: RectStore + ?Sized,
        H: RebuildHost + ?Sized,
    {
        self.mark_dirty(store, host)
    }

    pub fn on_children_changed<S, H>(&mut self, store: &S, host: &mut H) -> DirtyOutcome
    where
        S: RectStore + ?Sized,
        H: RebuildHost + ?Sized,
    {
        self.mark_dirty(store, host)
    }

    pub fn on_did_apply_animation_properties<S, H>(
        &mut self,
        store: &S,
        host: &mut H,
    ) -> DirtyOutcome
    where
        S: RectStore + ?Sized,
        H: RebuildHost + ?Sized,
    {
        self.mark_dirty(store, host)
    }

    /// Own size changed. Only a root group (no group on its parent) reacts; a nested group is
    /// re-laid out by its parent anyway.
    pub fn on_dimensions_changed<S, H>(
        &mut self,
        store: &S,
        host: &mut H,
        is_root: bool,
    ) -> DirtyOutcome
    where
        S: RectStore + ?Sized,
        H: RebuildHost + ?Sized,
    {
        if !is_root {
            return DirtyOutcome::Ignored;
        }
        self.mark_dirty(store, host)
    }

    /// Tick boundary; flushes a request deferred during a rebuild.
    pub fn on_tick<H: RebuildHost + ?Sized>(&mut self, host: &mut H) -> bool {
        self.dirty.on_tick(host)
    }

    /// Edit the config; the group is marked dirty only if something actually changed.
    pub fn update_config<S, H>(
        &mut self,
        store: &S,
        host: &mut H,
        edit: impl FnOnce(&mut GroupConfig),
    ) -> bool
    where
        S: RectStore + ?Sized,
        H: RebuildHost + ?Sized,
    {
        let mut next = self.config;
        edit(&mut next);
        let next = next.sanitized();
        if next == self.config {
            return false;
        }
        self.config = next;
        self.mark_dirty(store, host);
        true
    }

    /// Cancel every running transition; the group does nothing afterwards.
    pub fn destroy<E: AnimationEngine + ?Sized>(&mut self, engine: &mut E) -> usize {
        self.destroyed = true;
        self.enabled = false;
        self.dirty.cancel_deferred();
        self.tracker.clear();
        self.tweens.teardown(engine)
    }

    /// Route an engine event to the transition cache.
    pub fn handle_tween_event(&mut self, event: TweenEvent) -> Option<TransitionEvent> {
        self.tweens.handle_event(event)
    }

    /// Children in sibling order that participate in layout.
    ///
    /// Skipped: inactive rects, nodes without a rect transform, and rects whose ignore-layout
    /// capabilities all report `true`. A single `false` report keeps the rect in.
    pub fn gather_children<S: RectStore + ?Sized>(&self, store: &S) -> Vec<RectId> {
        store
            .children(self.rect)
            .iter()
            .copied()
            .filter(|id| store.rect(*id).is_some() && store.is_active(*id))
            .filter(|id| {
                let reports = store.ignore_layout_reports(*id);
                reports.is_empty() || reports.iter().any(|ignore| !ignore)
            })
            .collect()
    }

    #[tracing::instrument(level = "trace", skip_all, fields(rect = %self.rect))]
    pub fn calculate_layout_input_horizontal<S: RectStore + ?Sized>(&mut self, store: &S) {
        self.children = self.gather_children(store);
        self.tracker.clear();
        self.calc_along_axis(store, Axis::Horizontal);
    }

    #[tracing::instrument(level = "trace", skip_all, fields(rect = %self.rect))]
    pub fn calculate_layout_input_vertical<S: RectStore + ?Sized>(&mut self, store: &S) {
        self.calc_along_axis(store, Axis::Vertical);
    }

    #[tracing::instrument(level = "trace", skip_all, fields(rect = %self.rect))]
    pub fn set_layout_horizontal<S, E>(&mut self, cx: &mut LayoutContext<'_, S, E>)
    where
        S: RectStore + ?Sized,
        E: AnimationEngine + ?Sized,
    {
        self.set_children_along_axis(cx, Axis::Horizontal);
    }

    #[tracing::instrument(level = "trace", skip_all, fields(rect = %self.rect))]
    pub fn set_layout_vertical<S, E>(&mut self, cx: &mut LayoutContext<'_, S, E>)
    where
        S: RectStore + ?Sized,
        E: AnimationEngine + ?Sized,
    {
        self.set_children_along_axis(cx, Axis::Vertical);
    }

    /// All four phases of a pass for this group alone.
    pub fn run_pass<S, E>(&mut self, cx: &mut LayoutContext<'_, S, E>)
    where
        S: RectStore + ?Sized,
        E: AnimationEngine + ?Sized,
    {
        self.calculate_layout_input_horizontal(&*cx.store);
        self.calculate_layout_input_vertical(&*cx.store);
        self.set_layout_horizontal(cx);
        self.set_layout_vertical(cx);
    }

    fn measure<S: RectStore + ?Sized>(&self, store: &S, axis: Axis) -> Vec<ChildMeasure> {
        self.children
            .iter()
            .map(|id| {
                let contribution =
                    LayoutElementContribution::resolve(store.layout_elements(*id), axis);
                let (length, scale) = store
                    .rect(*id)
                    .map_or((0.0, 1.0), |r| (axis.of(r.size_delta), axis.of(r.local_scale)));
                ChildMeasure::new(contribution)
                    .with_current_length(length)
                    .with_scale(scale)
            })
            .collect()
    }

    fn calc_along_axis<S: RectStore + ?Sized>(&mut self, store: &S, axis: Axis) {
        let solver = AxisSizeSolver::new(axis, &self.config);
        let measures = self.measure(store, axis);
        self.totals[axis.index()] = solver.compute_totals(&measures);
    }

    fn set_children_along_axis<S, E>(&mut self, cx: &mut LayoutContext<'_, S, E>, axis: Axis)
    where
        S: RectStore + ?Sized,
        E: AnimationEngine + ?Sized,
    {
        if self.destroyed {
            return;
        }
        let available = cx.store.rect_size(self.rect).map_or(0.0, |s| axis.of(s));
        let solver = AxisSizeSolver::new(axis, &self.config);
        let measures = self.measure(&*cx.store, axis);
        let boxes = solver.compute_child_boxes(&measures, self.totals[axis.index()], available);

        let children = std::mem::take(&mut self.children);
        for (child, placed) in children.iter().zip(boxes) {
            self.set_child_along_axis(cx, *child, axis, placed);
        }
        self.children = children;
    }

    fn set_child_along_axis<S, E>(
        &mut self,
        cx: &mut LayoutContext<'_, S, E>,
        child: RectId,
        axis: Axis,
        placed: ChildBox,
    ) where
        S: RectStore + ?Sized,
        E: AnimationEngine + ?Sized,
    {
        let Some(rect) = cx.store.rect_mut(child) else {
            return;
        };

        let mut driven = DrivenProperties::ANCHORS | DrivenProperties::position(axis);
        if placed.length.is_some() {
            driven |= DrivenProperties::size(axis);
        }
        self.tracker.add(child, driven);

        // Single top-left anchor point so the anchored position is a plain offset.
        rect.anchor_min = Vec2::new(0.0, 1.0);
        rect.anchor_max = Vec2::new(0.0, 1.0);
        if let Some(length) = placed.length {
            axis.set(&mut rect.size_delta, length);
        }

        let size = axis.of(rect.size_delta);
        let pivot = axis.of(rect.pivot);
        let target = match axis {
            Axis::Horizontal => placed.offset + size * pivot * placed.scale_factor,
            Axis::Vertical => -placed.offset - size * (1.0 - pivot) * placed.scale_factor,
        };
        tracing::trace!(%child, ?axis, offset = placed.offset, size, target, "child placed");

        let directive = resolve_directive(cx.store.child_override(child), self.config.animation);
        self.set_position(cx, child, axis, target, directive);
    }

    /// Write one anchored-position component, snapping or animating per `cx.mode`.
    pub fn set_position<S, E>(
        &mut self,
        cx: &mut LayoutContext<'_, S, E>,
        child: RectId,
        axis: Axis,
        target: f64,
        directive: AnimationDirective,
    ) -> Option<TransitionHandle>
    where
        S: RectStore + ?Sized,
        E: AnimationEngine + ?Sized,
    {
        self.tweens.request_transition(
            &mut *cx.store,
            &mut *cx.engine,
            cx.mode,
            TransitionRequest {
                rect: child,
                axis,
                target,
                directive,
            },
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/group.rs"]
mod tests;
