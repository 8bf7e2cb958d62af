use crate::{
    animation::directive::AnimationDirective,
    foundation::core::Axis,
    foundation::error::LayoutResult,
};

/// Inner padding of a layout group, in whole units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Padding {
    pub left: i32,
    pub right: i32,
    pub top: i32,
    pub bottom: i32,
}

impl Padding {
    pub fn new(left: i32, right: i32, top: i32, bottom: i32) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    pub fn uniform(v: i32) -> Self {
        Self::new(v, v, v, v)
    }

    /// Total padding along `axis` (left + right or top + bottom).
    pub fn along(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => f64::from(self.left) + f64::from(self.right),
            Axis::Vertical => f64::from(self.top) + f64::from(self.bottom),
        }
    }

    /// Padding at the start edge of `axis` (left or top).
    pub fn leading(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => f64::from(self.left),
            Axis::Vertical => f64::from(self.top),
        }
    }
}

/// Nine-way anchor used to align the children when they do not fill the group.
///
/// Variant order matters: the horizontal fraction is `(index % 3) / 2` and the vertical
/// fraction is `(index / 3) / 2`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChildAlignment {
    #[default]
    UpperLeft,
    UpperCenter,
    UpperRight,
    MiddleLeft,
    MiddleCenter,
    MiddleRight,
    LowerLeft,
    LowerCenter,
    LowerRight,
}

impl ChildAlignment {
    pub const ALL: [ChildAlignment; 9] = [
        Self::UpperLeft,
        Self::UpperCenter,
        Self::UpperRight,
        Self::MiddleLeft,
        Self::MiddleCenter,
        Self::MiddleRight,
        Self::LowerLeft,
        Self::LowerCenter,
        Self::LowerRight,
    ];

    pub fn index(self) -> u8 {
        self as u8
    }

    /// Alignment on `axis` as a fraction: 0 is left/top, 0.5 is middle, 1 is right/bottom.
    pub fn fraction(self, axis: Axis) -> f64 {
        let idx = self.index();
        match axis {
            Axis::Horizontal => f64::from(idx % 3) * 0.5,
            Axis::Vertical => f64::from(idx / 3) * 0.5,
        }
    }
}

/// Direction the children are stacked in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutDirection {
    #[default]
    Horizontal,
    Vertical,
}

impl LayoutDirection {
    pub fn is_vertical(self) -> bool {
        matches!(self, Self::Vertical)
    }
}

/// A boolean per axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AxisFlags {
    pub width: bool,
    pub height: bool,
}

impl AxisFlags {
    pub fn both(value: bool) -> Self {
        Self {
            width: value,
            height: value,
        }
    }

    pub fn get(&self, axis: Axis) -> bool {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }
}

/// Inspector-editable settings of a layout group.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GroupConfig {
    pub padding: Padding,
    pub child_alignment: ChildAlignment,
    pub direction: LayoutDirection,
    /// Gap between consecutive children along the stacking direction.
    pub spacing: f64,
    /// Whether the group writes child lengths (otherwise children keep their size).
    pub child_controls_size: AxisFlags,
    /// Treat every child as at least flexible weight 1.
    pub child_force_expand: AxisFlags,
    /// Multiply child sizes by their local scale.
    pub child_scale: AxisFlags,
    pub reverse_arrangement: bool,
    /// Default transition for children without an override.
    pub animation: AnimationDirective,
}

impl Default for GroupConfig {
    fn default() -> Self {
        Self {
            padding: Padding::default(),
            child_alignment: ChildAlignment::default(),
            direction: LayoutDirection::default(),
            spacing: 0.0,
            child_controls_size: AxisFlags::both(true),
            child_force_expand: AxisFlags::both(false),
            child_scale: AxisFlags::both(false),
            reverse_arrangement: false,
            animation: AnimationDirective::default(),
        }
    }
}

impl GroupConfig {
    pub fn horizontal() -> Self {
        Self::default()
    }

    pub fn vertical() -> Self {
        Self {
            direction: LayoutDirection::Vertical,
            ..Self::default()
        }
    }

    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_alignment(mut self, alignment: ChildAlignment) -> Self {
        self.child_alignment = alignment;
        self
    }

    pub fn with_spacing(mut self, spacing: f64) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn with_animation(mut self, animation: AnimationDirective) -> Self {
        self.animation = animation;
        self
    }

    /// Parse a serialized config; missing fields take their defaults.
    pub fn from_json(s: &str) -> LayoutResult<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        Ok(cfg.sanitized())
    }

    pub fn to_json(&self) -> LayoutResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Replace values a layout pass cannot use (NaN spacing, negative or NaN duration) with 0.
    pub fn sanitized(self) -> Self {
        Self {
            spacing: if self.spacing.is_finite() {
                self.spacing
            } else {
                0.0
            },
            animation: self.animation.sanitized(),
            ..self
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/config.rs"]
mod tests;
