use crate::{
    foundation::core::Axis,
    layout::config::{ChildAlignment, GroupConfig, Padding},
    layout::element::LayoutElementContribution,
};

/// Aggregate size of a whole group along one axis, padding included.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct TotalAxisSize {
    pub min: f64,
    pub preferred: f64,
    pub flexible: f64,
}

/// Solver input for one child along one axis.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ChildMeasure {
    pub contribution: LayoutElementContribution,
    /// Current size delta on the axis; used when the group does not control child size.
    pub current_length: f64,
    /// Local scale on the axis.
    pub scale: f64,
}

impl ChildMeasure {
    pub fn new(contribution: LayoutElementContribution) -> Self {
        Self {
            contribution,
            current_length: 0.0,
            scale: 1.0,
        }
    }

    pub fn with_current_length(mut self, length: f64) -> Self {
        self.current_length = length;
        self
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }
}

/// Solver output for one child: where its leading edge goes and, when controlled, its length.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ChildBox {
    /// Distance from the group's leading edge (left or top) to the child's leading edge.
    pub offset: f64,
    pub length: Option<f64>,
    /// Scale applied to the length when converting to an anchored position.
    pub scale_factor: f64,
}

/// Two-stage sizing along a single axis.
///
/// The same solver serves both the stacking axis and the cross axis; `is_vertical` says which
/// direction children are stacked in, `axis` which component is being solved.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisSizeSolver {
    pub axis: Axis,
    pub is_vertical: bool,
    pub spacing: f64,
    pub padding: Padding,
    pub alignment: ChildAlignment,
    pub control_size: bool,
    pub force_expand: bool,
    pub use_scale: bool,
    pub reverse: bool,
}

impl AxisSizeSolver {
    pub fn new(axis: Axis, config: &GroupConfig) -> Self {
        Self {
            axis,
            is_vertical: config.direction.is_vertical(),
            spacing: config.spacing,
            padding: config.padding,
            alignment: config.child_alignment,
            control_size: config.child_controls_size.get(axis),
            force_expand: config.child_force_expand.get(axis),
            use_scale: config.child_scale.get(axis),
            reverse: config.reverse_arrangement,
        }
    }

    /// True when `axis` is perpendicular to the stacking direction.
    pub fn along_other_axis(&self) -> bool {
        self.is_vertical ^ (self.axis == Axis::Vertical)
    }

    pub fn alignment_fraction(&self) -> f64 {
        self.alignment.fraction(self.axis)
    }

    fn child_sizes(&self, child: &ChildMeasure) -> (f64, f64, f64) {
        let (min, preferred, mut flexible) = if self.control_size {
            let c = child.contribution;
            (c.min, c.preferred.max(c.min), c.flexible)
        } else {
            (child.current_length, child.current_length, 0.0)
        };
        if self.force_expand {
            flexible = flexible.max(1.0);
        }
        (min, preferred, flexible)
    }

    fn scale_of(&self, child: &ChildMeasure) -> f64 {
        if self.use_scale { child.scale } else { 1.0 }
    }

    /// Sum (stacking axis) or max (cross axis) of the children's sizes, plus padding.
    pub fn compute_totals(&self, children: &[ChildMeasure]) -> TotalAxisSize {
        let padding = self.padding.along(self.axis);
        let along_other = self.along_other_axis();
        let mut total = TotalAxisSize {
            min: padding,
            preferred: padding,
            flexible: 0.0,
        };

        for child in children {
            let (min, preferred, flexible) = self.child_sizes(child);
            let scale = self.scale_of(child);
            let (min, preferred, flexible) = (min * scale, preferred * scale, flexible * scale);

            if along_other {
                total.min = total.min.max(min + padding);
                total.preferred = total.preferred.max(preferred + padding);
                total.flexible = total.flexible.max(flexible);
            } else {
                total.min += min + self.spacing;
                total.preferred += preferred + self.spacing;
                total.flexible += flexible;
            }
        }

        if !along_other && !children.is_empty() {
            total.min -= self.spacing;
            total.preferred -= self.spacing;
        }
        total.preferred = total.preferred.max(total.min);
        total
    }

    /// Leading position of content that needs `required_without_padding` inside `available`.
    ///
    /// Surplus is clamped at zero, so content that does not fit starts at the leading padding
    /// whatever the alignment.
    pub fn start_offset(&self, available: f64, required_without_padding: f64) -> f64 {
        let required = required_without_padding + self.padding.along(self.axis);
        let surplus = (available - required).max(0.0);
        self.padding.leading(self.axis) + surplus * self.alignment_fraction()
    }

    /// Per-child boxes for a group of size `available`, in the same order as `children`.
    pub fn compute_child_boxes(
        &self,
        children: &[ChildMeasure],
        totals: TotalAxisSize,
        available: f64,
    ) -> Vec<ChildBox> {
        let mut boxes = vec![ChildBox::default(); children.len()];
        let order: Vec<usize> = if self.reverse {
            (0..children.len()).rev().collect()
        } else {
            (0..children.len()).collect()
        };
        let fraction = self.alignment_fraction();

        if self.along_other_axis() {
            let inner = available - self.padding.along(self.axis);
            for idx in order {
                let child = &children[idx];
                let (min, preferred, flexible) = self.child_sizes(child);
                let scale = self.scale_of(child);
                let upper = if flexible > 0.0 { available } else { preferred };
                let length = clamp_low_first(inner, min, upper);
                let start = self.start_offset(available, length * scale);
                boxes[idx] = self.place(child, start, length, scale, fraction);
            }
            return boxes;
        }

        let padding = self.padding.along(self.axis);
        let mut pos = self.padding.leading(self.axis);
        let mut flexible_multiplier = 0.0;
        let surplus = available - totals.preferred;
        if surplus > 0.0 {
            if totals.flexible == 0.0 {
                pos = self.start_offset(available, totals.preferred - padding);
            } else if totals.flexible > 0.0 {
                flexible_multiplier = surplus / totals.flexible;
            }
        }

        let min_max_lerp = if totals.min != totals.preferred {
            ((available - totals.min) / (totals.preferred - totals.min)).clamp(0.0, 1.0)
        } else {
            0.0
        };

        for idx in order {
            let child = &children[idx];
            let (min, preferred, flexible) = self.child_sizes(child);
            let scale = self.scale_of(child);
            let length = min + (preferred - min) * min_max_lerp + flexible * flexible_multiplier;
            boxes[idx] = self.place(child, pos, length, scale, fraction);
            pos += length * scale + self.spacing;
        }
        boxes
    }

    fn place(
        &self,
        child: &ChildMeasure,
        start: f64,
        length: f64,
        scale: f64,
        fraction: f64,
    ) -> ChildBox {
        if self.control_size {
            ChildBox {
                offset: start,
                length: Some(length),
                scale_factor: scale,
            }
        } else {
            ChildBox {
                offset: start + (length - child.current_length) * fraction,
                length: None,
                scale_factor: scale,
            }
        }
    }
}

// Below `lo` wins over above `hi`, so an inverted range yields `lo`.
fn clamp_low_first(value: f64, lo: f64, hi: f64) -> f64 {
    if value < lo {
        lo
    } else if value > hi {
        hi
    } else {
        value
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/solver.rs"]
mod tests;
