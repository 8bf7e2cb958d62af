//! Reference host: owns a scene, its layout groups, a tween engine and the rebuild queue, and
//! drives them the way a UI framework's per-frame update would.

use std::collections::BTreeMap;

use crate::{
    animation::cache::TransitionEvent,
    animation::engine::TweenEngine,
    foundation::core::{PlayMode, RectId, Vec2},
    foundation::error::{LayoutError, LayoutResult},
    layout::config::GroupConfig,
    layout::group::{LayoutContext, LayoutGroup},
    schedule::dirty::RebuildQueue,
    scene::graph::Scene,
    scene::store::RectStore,
};

/// Minimal UI-framework stand-in around [`LayoutGroup`]s.
///
/// Dirty groups queue their rect; [`LayoutHost::rebuild`] lays out each queued subtree from its
/// outermost group with the phase order calc H, calc V (children first), set H, set V (parents
/// first).
pub struct LayoutHost {
    scene: Scene,
    groups: BTreeMap<RectId, LayoutGroup>,
    engine: TweenEngine,
    rebuild: RebuildQueue,
    mode: PlayMode,
}

impl LayoutHost {
    pub fn new(scene: Scene, mode: PlayMode) -> Self {
        Self {
            scene,
            groups: BTreeMap::new(),
            engine: TweenEngine::new(),
            rebuild: RebuildQueue::new(),
            mode,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Direct scene access. Structural edits made here must be followed by the matching
    /// `notify_*` call.
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn engine(&self) -> &TweenEngine {
        &self.engine
    }

    pub fn rebuild_queue(&self) -> &RebuildQueue {
        &self.rebuild
    }

    pub fn mode(&self) -> PlayMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: PlayMode) {
        self.mode = mode;
    }

    pub fn group(&self, rect: RectId) -> Option<&LayoutGroup> {
        self.groups.get(&rect)
    }

    pub fn group_mut(&mut self, rect: RectId) -> Option<&mut LayoutGroup> {
        self.groups.get_mut(&rect)
    }

    /// Attach and enable a layout group on `rect`. One group per rect.
    pub fn add_group(&mut self, rect: RectId, config: GroupConfig) -> LayoutResult<()> {
        if !self.scene.contains(rect) {
            return Err(LayoutError::UnknownRect(rect));
        }
        if self.groups.contains_key(&rect) {
            return Err(LayoutError::DuplicateGroup(rect));
        }
        let mut group = LayoutGroup::new(rect, config);
        group.on_enable(&self.scene, &mut self.rebuild);
        self.groups.insert(rect, group);
        Ok(())
    }

    /// Disable and destroy the group on `rect`, cancelling its transitions.
    pub fn remove_group(&mut self, rect: RectId) -> LayoutResult<LayoutGroup> {
        let mut group = self
            .groups
            .remove(&rect)
            .ok_or(LayoutError::UnknownRect(rect))?;
        group.on_disable(&mut self.rebuild);
        group.destroy(&mut self.engine);
        self.scene.clear_group_element(rect)?;
        Ok(group)
    }

    pub fn set_group_enabled(&mut self, rect: RectId, enabled: bool) -> LayoutResult<()> {
        let group = self
            .groups
            .get_mut(&rect)
            .ok_or(LayoutError::UnknownRect(rect))?;
        if enabled == group.is_enabled() {
            return Ok(());
        }
        if enabled {
            group.on_enable(&self.scene, &mut self.rebuild);
        } else {
            group.on_disable(&mut self.rebuild);
            self.scene.clear_group_element(rect)?;
        }
        Ok(())
    }

    /// Edit a group's config. Returns whether anything changed.
    pub fn update_group_config(
        &mut self,
        rect: RectId,
        edit: impl FnOnce(&mut GroupConfig),
    ) -> LayoutResult<bool> {
        let group = self
            .groups
            .get_mut(&rect)
            .ok_or(LayoutError::UnknownRect(rect))?;
        Ok(group.update_config(&self.scene, &mut self.rebuild, edit))
    }

    /// Swap two children of `parent` and schedule the resulting re-layout.
    pub fn swap_children(&mut self, parent: RectId, a: usize, b: usize) -> LayoutResult<()> {
        self.scene.swap_children(parent, a, b)?;
        self.notify_children_changed(parent);
        Ok(())
    }

    pub fn set_active(&mut self, rect: RectId, active: bool) -> LayoutResult<()> {
        self.scene.set_active(rect, active)?;
        if let Some(parent) = self.scene.parent(rect) {
            self.notify_children_changed(parent);
        }
        Ok(())
    }

    /// Resize `rect` by writing its size delta. Groups further down whose size follows (through
    /// stretched anchors) are notified as well.
    pub fn set_size(&mut self, rect: RectId, size: Vec2) -> LayoutResult<()> {
        let below = self.group_sizes(rect, &[rect]);
        let transform = self
            .scene
            .rect_mut(rect)
            .ok_or(LayoutError::UnknownRect(rect))?;
        transform.size_delta = size;
        self.notify_dimensions_changed(rect);
        self.notify_resized(below);
        Ok(())
    }

    /// Remove `rect` and its subtree, killing their tweens and destroying hosted groups.
    pub fn remove_rect(&mut self, rect: RectId) -> LayoutResult<()> {
        let parent = self.scene.parent(rect);
        let removed = self.scene.remove(rect)?;
        for id in &removed {
            self.engine.kill_rect(*id);
            if let Some(mut group) = self.groups.remove(id) {
                group.destroy(&mut self.engine);
            }
        }
        if let Some(parent) = parent {
            self.notify_children_changed(parent);
        }
        Ok(())
    }

    pub fn notify_children_changed(&mut self, rect: RectId) {
        if let Some(group) = self.groups.get_mut(&rect) {
            group.on_children_changed(&self.scene, &mut self.rebuild);
        }
    }

    pub fn notify_dimensions_changed(&mut self, rect: RectId) {
        let is_root = self.is_root_group(rect);
        if let Some(group) = self.groups.get_mut(&rect) {
            group.on_dimensions_changed(&self.scene, &mut self.rebuild, is_root);
        }
    }

    fn has_enabled_group(&self, rect: RectId) -> bool {
        self.groups.get(&rect).is_some_and(LayoutGroup::is_enabled)
    }

    fn is_root_group(&self, rect: RectId) -> bool {
        self.scene
            .parent(rect)
            .is_none_or(|parent| !self.has_enabled_group(parent))
    }

    /// Current sizes of the groups under `root` (inclusive), minus those in `skip`.
    fn group_sizes(&self, root: RectId, skip: &[RectId]) -> Vec<(RectId, Option<Vec2>)> {
        self.scene
            .descendants(root)
            .into_iter()
            .filter(|id| self.groups.contains_key(id) && !skip.contains(id))
            .map(|id| (id, self.scene.rect_size(id)))
            .collect()
    }

    /// Send a dimensions change to every group whose size differs from the recorded one.
    fn notify_resized(&mut self, before: Vec<(RectId, Option<Vec2>)>) {
        for (id, size) in before {
            if self.scene.rect_size(id) != size {
                self.notify_dimensions_changed(id);
            }
        }
    }

    /// Active groups reachable from `root` through a chain of active groups, in pre-order.
    ///
    /// A group below a rect without one is its own layout root and is not included.
    fn group_chain(&self, root: RectId) -> Vec<RectId> {
        let mut out = Vec::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            if !self.groups.get(&id).is_some_and(|g| g.is_active(&self.scene)) {
                continue;
            }
            out.push(id);
            stack.extend(self.scene.children(id).iter().rev().copied());
        }
        out
    }

    /// Outermost rect of the chain of enabled groups above `rect`.
    fn layout_root(&self, rect: RectId) -> RectId {
        let mut root = rect;
        while let Some(parent) = self.scene.parent(root) {
            if !self.has_enabled_group(parent) {
                break;
            }
            root = parent;
        }
        root
    }

    /// Transition events recorded by every group with journaling on.
    pub fn drain_transition_events(&mut self) -> Vec<TransitionEvent> {
        self.groups
            .values_mut()
            .flat_map(|g| g.tweens_mut().drain_events())
            .collect()
    }

    /// Lay out every pending subtree. Returns the number of subtrees rebuilt.
    #[tracing::instrument(
        level = "debug",
        skip(self),
        fields(pending = self.rebuild.pending().len())
    )]
    pub fn rebuild(&mut self) -> usize {
        let pending = self.rebuild.take_pending();
        if pending.is_empty() {
            return 0;
        }

        let mut roots: Vec<RectId> = Vec::with_capacity(pending.len());
        for rect in pending {
            let root = self.layout_root(rect);
            if !roots.contains(&root) {
                roots.push(root);
            }
        }

        self.rebuild.begin_rebuild();
        for root in &roots {
            self.rebuild_subtree(*root);
        }
        self.rebuild.end_rebuild();
        roots.len()
    }

    fn rebuild_subtree(&mut self, root: RectId) {
        let order = self.group_chain(root);
        if order.is_empty() {
            return;
        }
        let outside = self.group_sizes(root, &order);

        // Children before parents, so each parent measures its nested groups' fresh totals.
        for id in order.iter().rev() {
            if let Some(group) = self.groups.get_mut(id) {
                group.calculate_layout_input_horizontal(&self.scene);
                let element = group.as_layout_element();
                let _ = self.scene.set_group_element(*id, element);
            }
        }
        for id in order.iter().rev() {
            if let Some(group) = self.groups.get_mut(id) {
                group.calculate_layout_input_vertical(&self.scene);
                let element = group.as_layout_element();
                let _ = self.scene.set_group_element(*id, element);
            }
        }

        // Parents before children, so a nested group is placed before it places its own.
        let mut cx = LayoutContext::new(&mut self.scene, &mut self.engine, self.mode);
        for id in &order {
            if let Some(group) = self.groups.get_mut(id) {
                group.set_layout_horizontal(&mut cx);
            }
        }
        for id in &order {
            if let Some(group) = self.groups.get_mut(id) {
                group.set_layout_vertical(&mut cx);
            }
        }

        // Still inside the rebuild, so these land on the deferred path.
        self.notify_resized(outside);
    }

    /// One frame: advance animations, deliver their events, flush deferred dirties at the tick
    /// boundary, then rebuild whatever is pending. Returns the number of subtrees rebuilt.
    pub fn update(&mut self, dt: f64) -> usize {
        let events = self.engine.advance(dt, &mut self.scene);
        for event in events {
            for group in self.groups.values_mut() {
                if group.tweens().owns(event.id()) {
                    group.handle_tween_event(event);
                    break;
                }
            }
        }

        for group in self.groups.values_mut() {
            group.on_tick(&mut self.rebuild);
        }
        self.rebuild()
    }

    /// Cancel all transitions of every group.
    pub fn teardown(&mut self) -> usize {
        let mut cancelled = 0;
        for group in self.groups.values_mut() {
            cancelled += group.destroy(&mut self.engine);
        }
        self.groups.clear();
        cancelled
    }
}

#[cfg(test)]
#[path = "../tests/unit/host.rs"]
mod tests;
