use std::collections::BTreeMap;

use crate::foundation::core::{Axis, RectId};

bitflags::bitflags! {
    /// Rect properties a layout group has taken control of.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct DrivenProperties: u8 {
        const ANCHORS = 1 << 0;
        const ANCHORED_POSITION_X = 1 << 1;
        const ANCHORED_POSITION_Y = 1 << 2;
        const SIZE_DELTA_X = 1 << 3;
        const SIZE_DELTA_Y = 1 << 4;
    }
}

impl DrivenProperties {
    pub fn position(axis: Axis) -> Self {
        match axis {
            Axis::Horizontal => Self::ANCHORED_POSITION_X,
            Axis::Vertical => Self::ANCHORED_POSITION_Y,
        }
    }

    pub fn size(axis: Axis) -> Self {
        match axis {
            Axis::Horizontal => Self::SIZE_DELTA_X,
            Axis::Vertical => Self::SIZE_DELTA_Y,
        }
    }
}

/// Which child properties are currently driven by the owning group.
///
/// Rebuilt every pass: cleared when horizontal input is calculated, then filled in as children
/// are placed. Hosts use it to lock those fields against manual edits.
#[derive(Clone, Debug, Default)]
pub struct DrivenTracker {
    driven: BTreeMap<RectId, DrivenProperties>,
}

impl DrivenTracker {
    pub fn add(&mut self, rect: RectId, props: DrivenProperties) {
        *self.driven.entry(rect).or_default() |= props;
    }

    pub fn clear(&mut self) {
        self.driven.clear();
    }

    pub fn get(&self, rect: RectId) -> DrivenProperties {
        self.driven.get(&rect).copied().unwrap_or_default()
    }

    pub fn is_driven(&self, rect: RectId, props: DrivenProperties) -> bool {
        self.get(rect).contains(props)
    }

    pub fn len(&self) -> usize {
        self.driven.len()
    }

    pub fn is_empty(&self) -> bool {
        self.driven.is_empty()
    }
}
