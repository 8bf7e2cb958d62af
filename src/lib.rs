//! Animated row/column layout groups.
//!
//! A [`LayoutGroup`] stacks the child rects of its own rect horizontally or vertically, sizing
//! them from their min/preferred/flexible contributions, and moves them to their new places with
//! cancellable transitions instead of snapping.
//!
//! # Pass overview
//!
//! 1. **Dirty**: a trigger (enable, config edit, children changed, resize) reaches the group's
//!    [`DirtyScheduler`], which asks the host for a rebuild, or defers to the next tick if a
//!    rebuild is already running.
//! 2. **Calc** (horizontal, then vertical): the [`AxisSizeSolver`] aggregates the children into a
//!    [`TotalAxisSize`], which is also the group's own contribution to its parent.
//! 3. **Set** (horizontal, then vertical): the solver yields a [`ChildBox`] per child, converted
//!    into a target anchored position.
//! 4. **Transition**: the target goes to the group's [`TweenCache`], which snaps in editing mode
//!    and otherwise keeps exactly one live tween per `(rect, axis)` on the [`AnimationEngine`].
//!
//! The host side (scene graph, rebuild registry, tween engine) is abstracted behind
//! [`RectStore`], [`RebuildHost`] and [`AnimationEngine`]; [`Scene`], [`RebuildQueue`],
//! [`TweenEngine`] and [`LayoutHost`] are in-crate implementations of them.
//!
//! Everything runs on one thread. Layout passes never fail; bad inputs degrade to snapping or to
//! padding-only sizes.
#![forbid(unsafe_code)]

mod animation;
mod foundation;
mod host;
mod layout;
mod scene;
mod schedule;

pub use animation::cache::{TransitionEvent, TransitionHandle, TransitionRequest, TweenCache};
pub use animation::directive::{
    AnimationDirective, AnimationKind, ChildOverride, resolve_directive,
};
pub use animation::ease::Ease;
pub use animation::engine::{
    AnimationEngine, TweenEngine, TweenEvent, TweenId, TweenProperty, TweenRequest,
};
pub use foundation::core::{Axis, PlayMode, RectId, Vec2};
pub use foundation::error::{LayoutError, LayoutResult};
pub use host::LayoutHost;
pub use layout::config::{AxisFlags, ChildAlignment, GroupConfig, LayoutDirection, Padding};
pub use layout::element::{LayoutElement, LayoutElementContribution};
pub use layout::group::{LayoutContext, LayoutGroup};
pub use layout::solver::{AxisSizeSolver, ChildBox, ChildMeasure, TotalAxisSize};
pub use layout::tracker::{DrivenProperties, DrivenTracker};
pub use scene::graph::Scene;
pub use scene::store::{RectStore, RectTransform};
pub use schedule::dirty::{DirtyOutcome, DirtyScheduler, RebuildHost, RebuildQueue};
