use super::*;

const ALL: [Ease; 5] = [
    Ease::Linear,
    Ease::InQuad,
    Ease::OutQuad,
    Ease::InOutQuad,
    Ease::OutCubic,
];

#[test]
fn endpoints_are_exact() {
    for ease in ALL {
        assert_eq!(ease.apply(0.0), 0.0, "{ease:?}");
        assert_eq!(ease.apply(1.0), 1.0, "{ease:?}");
    }
}

#[test]
fn out_of_range_time_is_clamped() {
    for ease in ALL {
        assert_eq!(ease.apply(-3.0), 0.0);
        assert_eq!(ease.apply(4.0), 1.0);
        assert_eq!(ease.apply(f64::NAN), 1.0);
    }
}

#[test]
fn curves_are_monotonic() {
    for ease in ALL {
        let mut prev = 0.0;
        for step in 1..=20 {
            let v = ease.apply(f64::from(step) / 20.0);
            assert!(v >= prev, "{ease:?} decreased at step {step}");
            prev = v;
        }
    }
}

#[test]
fn out_quad_leads_linear() {
    assert!(Ease::OutQuad.apply(0.5) > Ease::Linear.apply(0.5));
    assert!(Ease::InQuad.apply(0.5) < Ease::Linear.apply(0.5));
    assert_eq!(Ease::InOutQuad.apply(0.5), 0.5);
}
