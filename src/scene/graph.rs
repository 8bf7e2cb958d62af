use std::collections::BTreeMap;

use smallvec::SmallVec;

use crate::{
    animation::directive::ChildOverride,
    foundation::core::{RectId, Vec2},
    foundation::error::{LayoutError, LayoutResult},
    layout::element::LayoutElement,
    scene::store::{RectStore, RectTransform},
};

#[derive(Clone, Debug)]
struct Node {
    rect: Option<RectTransform>,
    parent: Option<RectId>,
    children: Vec<RectId>,
    active_self: bool,
    ignore_layout: SmallVec<[bool; 2]>,
    elements: Vec<LayoutElement>,
    // Index into `elements` of the entry published by a layout group hosted on this node.
    group_element: Option<usize>,
    child_override: Option<ChildOverride>,
}

impl Node {
    fn new(rect: Option<RectTransform>, parent: Option<RectId>) -> Self {
        Self {
            rect,
            parent,
            children: Vec::new(),
            active_self: true,
            ignore_layout: SmallVec::new(),
            elements: Vec::new(),
            group_element: None,
            child_override: None,
        }
    }
}

/// In-memory scene graph implementing [`RectStore`].
///
/// Ids are allocated monotonically and never reused, so a stale id held after removal simply
/// resolves to nothing.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    nodes: BTreeMap<RectId, Node>,
    next_id: u64,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    fn alloc(&mut self, rect: Option<RectTransform>, parent: Option<RectId>) -> RectId {
        let id = RectId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(id, Node::new(rect, parent));
        id
    }

    fn node(&self, id: RectId) -> LayoutResult<&Node> {
        self.nodes.get(&id).ok_or(LayoutError::UnknownRect(id))
    }

    fn node_mut(&mut self, id: RectId) -> LayoutResult<&mut Node> {
        self.nodes.get_mut(&id).ok_or(LayoutError::UnknownRect(id))
    }

    pub fn contains(&self, id: RectId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn add_root(&mut self, rect: RectTransform) -> RectId {
        self.alloc(Some(rect), None)
    }

    /// Append a child as the last sibling of `parent`.
    pub fn add_child(&mut self, parent: RectId, rect: RectTransform) -> LayoutResult<RectId> {
        self.attach(parent, Some(rect))
    }

    /// Append a child node that carries no rect transform. Layout groups skip such nodes.
    pub fn add_bare_child(&mut self, parent: RectId) -> LayoutResult<RectId> {
        self.attach(parent, None)
    }

    fn attach(&mut self, parent: RectId, rect: Option<RectTransform>) -> LayoutResult<RectId> {
        self.node(parent)?;
        let id = self.alloc(rect, Some(parent));
        self.node_mut(parent)?.children.push(id);
        Ok(id)
    }

    /// Remove `id` and its whole subtree. Returns the removed ids, `id` first.
    pub fn remove(&mut self, id: RectId) -> LayoutResult<Vec<RectId>> {
        let parent = self.node(id)?.parent;
        if let Some(parent) = parent {
            self.node_mut(parent)?.children.retain(|c| *c != id);
        }

        let mut removed = Vec::new();
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            if let Some(node) = self.nodes.remove(&next) {
                stack.extend(node.children.iter().rev().copied());
                removed.push(next);
            }
        }
        Ok(removed)
    }

    pub fn set_active(&mut self, id: RectId, active: bool) -> LayoutResult<()> {
        self.node_mut(id)?.active_self = active;
        Ok(())
    }

    pub fn add_layout_element(&mut self, id: RectId, element: LayoutElement) -> LayoutResult<()> {
        self.node_mut(id)?.elements.push(element);
        Ok(())
    }

    /// Attach one layout-ignore capability reporting `ignore`.
    pub fn add_layout_ignorer(&mut self, id: RectId, ignore: bool) -> LayoutResult<()> {
        self.node_mut(id)?.ignore_layout.push(ignore);
        Ok(())
    }

    pub fn set_child_override(
        &mut self,
        id: RectId,
        child_override: Option<ChildOverride>,
    ) -> LayoutResult<()> {
        self.node_mut(id)?.child_override = child_override;
        Ok(())
    }

    /// Publish (or replace) the size contribution of a layout group hosted on `id`.
    pub fn set_group_element(&mut self, id: RectId, element: LayoutElement) -> LayoutResult<()> {
        let node = self.node_mut(id)?;
        match node.group_element {
            Some(idx) => node.elements[idx] = element,
            None => {
                node.group_element = Some(node.elements.len());
                node.elements.push(element);
            }
        }
        Ok(())
    }

    pub fn clear_group_element(&mut self, id: RectId) -> LayoutResult<()> {
        let node = self.node_mut(id)?;
        if let Some(idx) = node.group_element.take() {
            node.elements.remove(idx);
        }
        Ok(())
    }

    /// Exchange the sibling positions of children `a` and `b` of `parent`.
    ///
    /// Either index out of range rejects the whole request and leaves the order untouched.
    pub fn swap_children(&mut self, parent: RectId, a: usize, b: usize) -> LayoutResult<()> {
        let children = &mut self.node_mut(parent)?.children;
        let len = children.len();
        for index in [a, b] {
            if index >= len {
                tracing::warn!(%parent, index, len, "sibling swap rejected");
                return Err(LayoutError::out_of_range(index, len));
            }
        }
        children.swap(a, b);
        Ok(())
    }

    /// Descendants of `root` (inclusive) in pre-order.
    pub fn descendants(&self, root: RectId) -> Vec<RectId> {
        let mut out = Vec::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let Some(node) = self.nodes.get(&id) else {
                continue;
            };
            out.push(id);
            stack.extend(node.children.iter().rev().copied());
        }
        out
    }
}

impl RectStore for Scene {
    fn rect(&self, id: RectId) -> Option<&RectTransform> {
        self.nodes.get(&id)?.rect.as_ref()
    }

    fn rect_mut(&mut self, id: RectId) -> Option<&mut RectTransform> {
        self.nodes.get_mut(&id)?.rect.as_mut()
    }

    fn rect_size(&self, id: RectId) -> Option<Vec2> {
        let node = self.nodes.get(&id)?;
        let rect = node.rect.as_ref()?;
        let parent_size = node
            .parent
            .and_then(|p| self.rect_size(p))
            .unwrap_or(Vec2::ZERO);
        Some(rect.size_in(parent_size))
    }

    fn parent(&self, id: RectId) -> Option<RectId> {
        self.nodes.get(&id)?.parent
    }

    fn children(&self, id: RectId) -> &[RectId] {
        self.nodes
            .get(&id)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    fn is_active(&self, id: RectId) -> bool {
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            match self.nodes.get(&current) {
                Some(node) if node.active_self => cursor = node.parent,
                _ => return false,
            }
        }
        true
    }

    fn ignore_layout_reports(&self, id: RectId) -> SmallVec<[bool; 2]> {
        self.nodes
            .get(&id)
            .map(|n| n.ignore_layout.clone())
            .unwrap_or_default()
    }

    fn layout_elements(&self, id: RectId) -> &[LayoutElement] {
        self.nodes
            .get(&id)
            .map(|n| n.elements.as_slice())
            .unwrap_or(&[])
    }

    fn child_override(&self, id: RectId) -> Option<&ChildOverride> {
        self.nodes.get(&id)?.child_override.as_ref()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/graph.rs"]
mod tests;
