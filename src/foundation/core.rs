use std::fmt;

pub use kurbo::Vec2;

/// Stable identity of a host rectangle.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct RectId(pub u64);

impl fmt::Display for RectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Layout axis. `Horizontal` is axis 0, `Vertical` is axis 1.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum Axis {
    /// Left to right, index 0.
    Horizontal,
    /// Top to bottom, index 1.
    Vertical,
}

impl Axis {
    /// Both axes in pass order.
    pub const BOTH: [Axis; 2] = [Axis::Horizontal, Axis::Vertical];

    /// Numeric index (0 or 1).
    pub fn index(self) -> usize {
        match self {
            Self::Horizontal => 0,
            Self::Vertical => 1,
        }
    }

    /// The other axis.
    pub fn cross(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }

    /// Component of `v` along this axis.
    pub fn of(self, v: Vec2) -> f64 {
        match self {
            Self::Horizontal => v.x,
            Self::Vertical => v.y,
        }
    }

    /// Overwrite the component of `v` along this axis.
    pub fn set(self, v: &mut Vec2, value: f64) {
        match self {
            Self::Horizontal => v.x = value,
            Self::Vertical => v.y = value,
        }
    }
}

/// Whether the host is running (transitions animate) or being edited (everything snaps).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum PlayMode {
    /// Design-time editing; positions are written synchronously.
    #[default]
    Editing,
    /// Live runtime; position changes are animated.
    Playing,
}

impl PlayMode {
    pub fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }
}

/// Equality within the tolerance used for "already settled" checks.
pub(crate) fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-6
}
