use super::*;
use crate::layout::config::{AxisFlags, LayoutDirection};

fn preferred(values: &[f64]) -> Vec<ChildMeasure> {
    values
        .iter()
        .map(|p| ChildMeasure::new(LayoutElementContribution::new(0.0, *p, 0.0)))
        .collect()
}

fn row(config: GroupConfig) -> AxisSizeSolver {
    AxisSizeSolver::new(Axis::Horizontal, &config)
}

fn offsets(boxes: &[ChildBox]) -> Vec<f64> {
    boxes.iter().map(|b| b.offset).collect()
}

fn lengths(boxes: &[ChildBox]) -> Vec<f64> {
    boxes.iter().map(|b| b.length.unwrap_or(f64::NAN)).collect()
}

#[test]
fn preferred_sizes_leave_surplus_unallocated() {
    let solver = row(GroupConfig::horizontal());
    let children = preferred(&[10.0, 20.0, 30.0]);
    let totals = solver.compute_totals(&children);
    assert_eq!(totals.preferred, 60.0);
    assert_eq!(totals.flexible, 0.0);

    let boxes = solver.compute_child_boxes(&children, totals, 100.0);
    assert_eq!(offsets(&boxes), vec![0.0, 10.0, 30.0]);
    assert_eq!(lengths(&boxes), vec![10.0, 20.0, 30.0]);
}

#[test]
fn flexible_child_absorbs_surplus() {
    let solver = row(GroupConfig::horizontal());
    let mut children = preferred(&[10.0, 20.0, 30.0]);
    children[1].contribution.flexible = 1.0;
    let totals = solver.compute_totals(&children);
    assert_eq!(totals.flexible, 1.0);

    let boxes = solver.compute_child_boxes(&children, totals, 100.0);
    assert_eq!(lengths(&boxes), vec![10.0, 60.0, 30.0]);
    assert_eq!(offsets(&boxes), vec![0.0, 10.0, 70.0]);
}

#[test]
fn flexible_weights_share_proportionally() {
    let solver = row(GroupConfig::horizontal());
    let mut children = preferred(&[0.0, 0.0]);
    children[0].contribution.flexible = 1.0;
    children[1].contribution.flexible = 3.0;
    let totals = solver.compute_totals(&children);
    let boxes = solver.compute_child_boxes(&children, totals, 80.0);
    assert_eq!(lengths(&boxes), vec![20.0, 60.0]);
}

#[test]
fn short_space_interpolates_between_min_and_preferred() {
    let solver = row(GroupConfig::horizontal());
    let children = vec![
        ChildMeasure::new(LayoutElementContribution::new(10.0, 30.0, 0.0)),
        ChildMeasure::new(LayoutElementContribution::new(10.0, 30.0, 0.0)),
    ];
    let totals = solver.compute_totals(&children);
    assert_eq!(totals.min, 20.0);
    assert_eq!(totals.preferred, 60.0);

    let boxes = solver.compute_child_boxes(&children, totals, 40.0);
    assert_eq!(lengths(&boxes), vec![20.0, 20.0]);

    let boxes = solver.compute_child_boxes(&children, totals, 5.0);
    assert_eq!(lengths(&boxes), vec![10.0, 10.0]);
}

#[test]
fn lengths_fit_whenever_min_fits() {
    let config = GroupConfig::horizontal()
        .with_spacing(3.0)
        .with_padding(Padding::new(2, 4, 0, 0));
    let solver = row(config);
    let children = vec![
        ChildMeasure::new(LayoutElementContribution::new(5.0, 25.0, 0.0)),
        ChildMeasure::new(LayoutElementContribution::new(0.0, 40.0, 2.0)),
        ChildMeasure::new(LayoutElementContribution::new(8.0, 8.0, 1.0)),
    ];
    let totals = solver.compute_totals(&children);
    let fixed = 3.0 * 2.0 + 6.0;
    for available in [totals.min, 30.0, 50.0, totals.preferred, 150.0] {
        let boxes = solver.compute_child_boxes(&children, totals, available);
        let used: f64 = boxes.iter().filter_map(|b| b.length).sum();
        assert!(used + fixed <= available + 1e-9, "{available}: {used}");
    }
}

#[test]
fn no_children_is_padding_only() {
    let config = GroupConfig::horizontal()
        .with_spacing(10.0)
        .with_padding(Padding::new(3, 7, 1, 1));
    let solver = row(config);
    let totals = solver.compute_totals(&[]);
    assert_eq!(
        totals,
        TotalAxisSize {
            min: 10.0,
            preferred: 10.0,
            flexible: 0.0
        }
    );
    assert!(solver.compute_child_boxes(&[], totals, 50.0).is_empty());
}

#[test]
fn spacing_is_counted_between_children_only() {
    let solver = row(GroupConfig::horizontal().with_spacing(5.0));
    let children = preferred(&[10.0, 10.0, 10.0]);
    let totals = solver.compute_totals(&children);
    assert_eq!(totals.preferred, 40.0);
    let boxes = solver.compute_child_boxes(&children, totals, 40.0);
    assert_eq!(offsets(&boxes), vec![0.0, 15.0, 30.0]);
}

#[test]
fn alignment_shifts_unused_space() {
    let children = preferred(&[10.0, 20.0]);
    let cases = [
        (ChildAlignment::UpperLeft, 0.0),
        (ChildAlignment::MiddleCenter, 35.0),
        (ChildAlignment::LowerRight, 70.0),
    ];
    for (alignment, first) in cases {
        let solver = row(GroupConfig::horizontal().with_alignment(alignment));
        let totals = solver.compute_totals(&children);
        let boxes = solver.compute_child_boxes(&children, totals, 100.0);
        assert_eq!(offsets(&boxes), vec![first, first + 10.0], "{alignment:?}");
    }
}

#[test]
fn overflow_starts_at_leading_padding() {
    let config = GroupConfig::horizontal()
        .with_alignment(ChildAlignment::MiddleRight)
        .with_padding(Padding::new(4, 4, 0, 0));
    let solver = row(config);
    assert_eq!(solver.start_offset(10.0, 50.0), 4.0);
    assert_eq!(solver.start_offset(68.0, 50.0), 14.0);
}

#[test]
fn cross_axis_takes_max_and_clamps_to_inner_size() {
    let config = GroupConfig::horizontal().with_padding(Padding::new(0, 0, 2, 2));
    let solver = AxisSizeSolver::new(Axis::Vertical, &config);
    assert!(solver.along_other_axis());

    let mut children = preferred(&[10.0, 30.0, 50.0]);
    children[0].contribution.flexible = 1.0;
    let totals = solver.compute_totals(&children);
    assert_eq!(totals.preferred, 54.0);
    assert_eq!(totals.min, 4.0);
    assert_eq!(totals.flexible, 1.0);

    let boxes = solver.compute_child_boxes(&children, totals, 44.0);
    assert_eq!(lengths(&boxes), vec![40.0, 30.0, 40.0]);
    assert_eq!(offsets(&boxes), vec![2.0, 2.0, 2.0]);
}

#[test]
fn cross_axis_aligns_each_child() {
    let config = GroupConfig::horizontal().with_alignment(ChildAlignment::LowerLeft);
    let solver = AxisSizeSolver::new(Axis::Vertical, &config);
    let children = preferred(&[10.0, 30.0]);
    let totals = solver.compute_totals(&children);
    let boxes = solver.compute_child_boxes(&children, totals, 50.0);
    assert_eq!(offsets(&boxes), vec![40.0, 20.0]);
}

#[test]
fn vertical_group_stacks_on_vertical_axis() {
    let config = GroupConfig::vertical();
    assert_eq!(config.direction, LayoutDirection::Vertical);
    let solver = AxisSizeSolver::new(Axis::Vertical, &config);
    assert!(!solver.along_other_axis());
    assert!(AxisSizeSolver::new(Axis::Horizontal, &config).along_other_axis());

    let children = preferred(&[10.0, 20.0]);
    let totals = solver.compute_totals(&children);
    assert_eq!(totals.preferred, 30.0);
}

#[test]
fn uncontrolled_size_uses_current_length() {
    let config = GroupConfig {
        child_controls_size: AxisFlags::both(false),
        ..GroupConfig::horizontal()
    };
    let solver = row(config);
    let children = vec![
        ChildMeasure::new(LayoutElementContribution::new(0.0, 99.0, 5.0)).with_current_length(15.0),
        ChildMeasure::new(LayoutElementContribution::default()).with_current_length(25.0),
    ];
    let totals = solver.compute_totals(&children);
    assert_eq!(totals.preferred, 40.0);
    assert_eq!(totals.flexible, 0.0);

    let boxes = solver.compute_child_boxes(&children, totals, 100.0);
    assert!(boxes.iter().all(|b| b.length.is_none()));
    assert_eq!(offsets(&boxes), vec![0.0, 15.0]);
}

#[test]
fn force_expand_spreads_surplus_evenly() {
    let config = GroupConfig {
        child_force_expand: AxisFlags::both(true),
        ..GroupConfig::horizontal()
    };
    let solver = row(config);
    let children = preferred(&[10.0, 30.0]);
    let totals = solver.compute_totals(&children);
    assert_eq!(totals.flexible, 2.0);
    let boxes = solver.compute_child_boxes(&children, totals, 100.0);
    assert_eq!(lengths(&boxes), vec![40.0, 60.0]);
}

#[test]
fn reverse_arrangement_places_last_child_first() {
    let config = GroupConfig {
        reverse_arrangement: true,
        ..GroupConfig::horizontal()
    };
    let solver = row(config);
    let children = preferred(&[10.0, 20.0, 30.0]);
    let totals = solver.compute_totals(&children);
    let boxes = solver.compute_child_boxes(&children, totals, 60.0);
    assert_eq!(offsets(&boxes), vec![50.0, 30.0, 0.0]);
}

#[test]
fn child_scale_multiplies_footprint() {
    let config = GroupConfig {
        child_scale: AxisFlags::both(true),
        ..GroupConfig::horizontal()
    };
    let solver = row(config);
    let children = vec![
        ChildMeasure::new(LayoutElementContribution::new(0.0, 10.0, 0.0)).with_scale(2.0),
        ChildMeasure::new(LayoutElementContribution::new(0.0, 10.0, 0.0)),
    ];
    let totals = solver.compute_totals(&children);
    assert_eq!(totals.preferred, 30.0);
    let boxes = solver.compute_child_boxes(&children, totals, 30.0);
    assert_eq!(offsets(&boxes), vec![0.0, 20.0]);
    assert_eq!(boxes[0].scale_factor, 2.0);
}
