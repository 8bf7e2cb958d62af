use crate::animation::ease::Ease;

/// What a transition animates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationKind {
    /// Slide the anchored position toward the target.
    #[default]
    Move,
    /// Jump to the target position and grow the scale back to 1.
    Scale,
}

/// How a single rectangle transitions to a new layout position.
///
/// Resolved per child: a [`ChildOverride`] on the child wins, otherwise the group default from
/// `GroupConfig::animation` applies.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AnimationDirective {
    pub kind: AnimationKind,
    /// Seconds. Zero, negative or non-finite means "snap".
    pub duration: f64,
    pub ease: Ease,
}

impl Default for AnimationDirective {
    fn default() -> Self {
        Self {
            kind: AnimationKind::Move,
            duration: 1.0,
            ease: Ease::default(),
        }
    }
}

impl AnimationDirective {
    pub fn new(kind: AnimationKind, duration: f64) -> Self {
        Self {
            kind,
            duration,
            ease: Ease::default(),
        }
    }

    pub fn with_ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    /// True when this directive cannot produce a transition that finishes.
    pub fn is_instant(&self) -> bool {
        !self.duration.is_finite() || self.duration <= 0.0
    }

    /// Same directive with a non-finite or negative duration replaced by zero.
    pub fn sanitized(self) -> Self {
        let duration = if self.duration.is_finite() && self.duration > 0.0 {
            self.duration
        } else {
            0.0
        };
        Self { duration, ..self }
    }
}

/// Per-rectangle animation settings that take precedence over the group default.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ChildOverride {
    pub directive: AnimationDirective,
}

impl ChildOverride {
    pub fn new(directive: AnimationDirective) -> Self {
        Self { directive }
    }
}

/// Pick the child override when present, the group default otherwise.
pub fn resolve_directive(
    child: Option<&ChildOverride>,
    group_default: AnimationDirective,
) -> AnimationDirective {
    child.map_or(group_default, |o| o.directive)
}
