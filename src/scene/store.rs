use smallvec::SmallVec;

use crate::{
    animation::directive::ChildOverride,
    foundation::core::{RectId, Vec2},
    layout::element::LayoutElement,
};

/// Placement state of one host rectangle.
///
/// Anchors and pivot are fractions of the parent rect (anchors) or of the rect itself (pivot),
/// with `y = 1` at the top edge. `size_delta` is the size beyond what the anchors already span.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RectTransform {
    pub anchor_min: Vec2,
    pub anchor_max: Vec2,
    pub anchored_position: Vec2,
    pub size_delta: Vec2,
    pub pivot: Vec2,
    pub local_scale: Vec2,
}

impl Default for RectTransform {
    fn default() -> Self {
        Self {
            anchor_min: Vec2::new(0.5, 0.5),
            anchor_max: Vec2::new(0.5, 0.5),
            anchored_position: Vec2::ZERO,
            size_delta: Vec2::new(100.0, 100.0),
            pivot: Vec2::new(0.5, 0.5),
            local_scale: Vec2::new(1.0, 1.0),
        }
    }
}

impl RectTransform {
    /// Point-anchored rect of the given size.
    pub fn sized(width: f64, height: f64) -> Self {
        Self {
            size_delta: Vec2::new(width, height),
            ..Self::default()
        }
    }

    /// Rect that stretches over its whole parent.
    pub fn stretched() -> Self {
        Self {
            anchor_min: Vec2::ZERO,
            anchor_max: Vec2::new(1.0, 1.0),
            size_delta: Vec2::ZERO,
            ..Self::default()
        }
    }

    pub fn with_pivot(mut self, pivot: Vec2) -> Self {
        self.pivot = pivot;
        self
    }

    pub fn with_scale(mut self, scale: Vec2) -> Self {
        self.local_scale = scale;
        self
    }

    /// Actual size given the parent's size.
    pub fn size_in(&self, parent_size: Vec2) -> Vec2 {
        let span = self.anchor_max - self.anchor_min;
        Vec2::new(
            self.size_delta.x + span.x * parent_size.x,
            self.size_delta.y + span.y * parent_size.y,
        )
    }
}

/// The host scene graph as seen by a layout group.
///
/// Lookups on unknown ids answer "absent" (`None`, empty, inactive) instead of failing; a layout
/// pass skips whatever it cannot find.
pub trait RectStore {
    /// Transform of `id`, or `None` when the node has no rect transform.
    fn rect(&self, id: RectId) -> Option<&RectTransform>;

    fn rect_mut(&mut self, id: RectId) -> Option<&mut RectTransform>;

    /// Resolved size of `id`, taking stretched anchors into account.
    fn rect_size(&self, id: RectId) -> Option<Vec2>;

    fn parent(&self, id: RectId) -> Option<RectId>;

    /// Children in sibling order.
    fn children(&self, id: RectId) -> &[RectId];

    /// Active in hierarchy: the node and every ancestor are active.
    fn is_active(&self, id: RectId) -> bool;

    /// One entry per layout-ignore capability attached to `id`.
    fn ignore_layout_reports(&self, id: RectId) -> SmallVec<[bool; 2]>;

    /// Size-contribution providers attached to `id`.
    fn layout_elements(&self, id: RectId) -> &[LayoutElement];

    fn child_override(&self, id: RectId) -> Option<&ChildOverride>;
}
