use crate::{foundation::core::Axis, layout::solver::TotalAxisSize};

/// One size-contribution provider attached to a rectangle.
///
/// A rect may carry several providers (intrinsic content size, an explicit override, a nested
/// layout group). Unset (`None`) or negative values do not participate in resolution.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LayoutElement {
    pub min_width: Option<f64>,
    pub preferred_width: Option<f64>,
    pub flexible_width: Option<f64>,
    pub min_height: Option<f64>,
    pub preferred_height: Option<f64>,
    pub flexible_height: Option<f64>,
    pub layout_priority: i32,
}

impl LayoutElement {
    /// Provider that only states a preferred size.
    pub fn preferred(width: f64, height: f64) -> Self {
        Self {
            preferred_width: Some(width),
            preferred_height: Some(height),
            ..Self::default()
        }
    }

    pub fn with_min(mut self, axis: Axis, value: f64) -> Self {
        match axis {
            Axis::Horizontal => self.min_width = Some(value),
            Axis::Vertical => self.min_height = Some(value),
        }
        self
    }

    pub fn with_preferred(mut self, axis: Axis, value: f64) -> Self {
        match axis {
            Axis::Horizontal => self.preferred_width = Some(value),
            Axis::Vertical => self.preferred_height = Some(value),
        }
        self
    }

    pub fn with_flexible(mut self, axis: Axis, value: f64) -> Self {
        match axis {
            Axis::Horizontal => self.flexible_width = Some(value),
            Axis::Vertical => self.flexible_height = Some(value),
        }
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.layout_priority = priority;
        self
    }

    pub fn min(&self, axis: Axis) -> Option<f64> {
        match axis {
            Axis::Horizontal => self.min_width,
            Axis::Vertical => self.min_height,
        }
    }

    pub fn preferred_on(&self, axis: Axis) -> Option<f64> {
        match axis {
            Axis::Horizontal => self.preferred_width,
            Axis::Vertical => self.preferred_height,
        }
    }

    pub fn flexible(&self, axis: Axis) -> Option<f64> {
        match axis {
            Axis::Horizontal => self.flexible_width,
            Axis::Vertical => self.flexible_height,
        }
    }

    /// The contribution a layout group exposes to its own parent.
    pub fn from_totals(horizontal: TotalAxisSize, vertical: TotalAxisSize) -> Self {
        Self {
            min_width: Some(horizontal.min),
            preferred_width: Some(horizontal.preferred),
            flexible_width: Some(horizontal.flexible),
            min_height: Some(vertical.min),
            preferred_height: Some(vertical.preferred),
            flexible_height: Some(vertical.flexible),
            layout_priority: 0,
        }
    }
}

/// Resolved `{min, preferred, flexible}` of one rectangle along one axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct LayoutElementContribution {
    pub min: f64,
    pub preferred: f64,
    pub flexible: f64,
}

impl LayoutElementContribution {
    pub fn new(min: f64, preferred: f64, flexible: f64) -> Self {
        Self {
            min,
            preferred,
            flexible,
        }
    }

    /// Merge every provider of a rect into a single contribution for `axis`.
    ///
    /// Per property the highest `layout_priority` that sets a value wins; ties keep the larger
    /// value. Preferred never falls below min.
    pub fn resolve(elements: &[LayoutElement], axis: Axis) -> Self {
        let min = resolve_property(elements, |e| e.min(axis));
        let preferred = resolve_property(elements, |e| e.preferred_on(axis)).max(min);
        let flexible = resolve_property(elements, |e| e.flexible(axis));
        Self {
            min,
            preferred,
            flexible,
        }
    }
}

fn resolve_property(
    elements: &[LayoutElement],
    get: impl Fn(&LayoutElement) -> Option<f64>,
) -> f64 {
    let mut best = 0.0;
    let mut best_priority = i32::MIN;
    for element in elements {
        let Some(value) = get(element) else {
            continue;
        };
        if value.is_nan() || value < 0.0 || element.layout_priority < best_priority {
            continue;
        }
        if element.layout_priority > best_priority {
            best = value;
            best_priority = element.layout_priority;
        } else if value > best {
            best = value;
        }
    }
    best
}

#[cfg(test)]
#[path = "../../tests/unit/layout/element.rs"]
mod tests;
