use super::*;
use crate::scene::{graph::Scene, store::RectTransform};

fn scene_with_rect() -> (Scene, RectId) {
    let mut scene = Scene::new();
    let id = scene.add_root(RectTransform::sized(10.0, 10.0));
    (scene, id)
}

fn move_x(rect: RectId, from: f64, to: f64, duration: f64) -> TweenRequest {
    TweenRequest {
        rect,
        property: TweenProperty::AnchoredPosition(Axis::Horizontal),
        from,
        to,
        duration,
        ease: Ease::Linear,
    }
}

#[test]
fn advance_interpolates_then_completes() {
    let (mut scene, id) = scene_with_rect();
    let mut engine = TweenEngine::new();
    let tween = engine.animate(move_x(id, 0.0, 10.0, 1.0));

    assert!(engine.advance(0.5, &mut scene).is_empty());
    assert_eq!(scene.rect(id).unwrap().anchored_position.x, 5.0);
    assert!(engine.is_live(tween));

    let events = engine.advance(0.75, &mut scene);
    assert_eq!(events, vec![TweenEvent::Completed(tween)]);
    assert_eq!(scene.rect(id).unwrap().anchored_position.x, 10.0);
    assert_eq!(engine.live_count(), 0);
}

#[test]
fn scale_tweens_write_both_components() {
    let (mut scene, id) = scene_with_rect();
    let mut engine = TweenEngine::new();
    engine.animate(TweenRequest {
        rect: id,
        property: TweenProperty::Scale,
        from: 0.0,
        to: 1.0,
        duration: 2.0,
        ease: Ease::Linear,
    });
    engine.advance(1.0, &mut scene);
    assert_eq!(scene.rect(id).unwrap().local_scale, Vec2::new(0.5, 0.5));
}

#[test]
fn cancelled_tweens_are_never_reported() {
    let (mut scene, id) = scene_with_rect();
    let mut engine = TweenEngine::new();
    let tween = engine.animate(move_x(id, 0.0, 10.0, 1.0));

    assert!(engine.cancel(tween));
    assert!(!engine.cancel(tween));
    assert!(engine.advance(5.0, &mut scene).is_empty());
    assert_eq!(scene.rect(id).unwrap().anchored_position.x, 0.0);
}

#[test]
fn missing_rect_reports_cancelled() {
    let (mut scene, id) = scene_with_rect();
    let mut engine = TweenEngine::new();
    let tween = engine.animate(move_x(id, 0.0, 10.0, 1.0));
    scene.remove(id).unwrap();

    assert_eq!(
        engine.advance(0.1, &mut scene),
        vec![TweenEvent::Cancelled(tween)]
    );
    assert!(!engine.is_live(tween));
}

#[test]
fn kill_rect_only_touches_that_rect() {
    let (mut scene, a) = scene_with_rect();
    let b = scene.add_root(RectTransform::default());
    let mut engine = TweenEngine::new();
    let ta = engine.animate(move_x(a, 0.0, 10.0, 1.0));
    let tb = engine.animate(move_x(b, 0.0, 10.0, 1.0));

    assert_eq!(engine.kill_rect(a), 1);
    assert!(engine.is_live(tb));
    assert_eq!(engine.request(tb).map(|r| r.rect), Some(b));

    let events = engine.advance(0.1, &mut scene);
    assert_eq!(events, vec![TweenEvent::Cancelled(ta)]);
}

#[test]
fn ids_are_not_reused() {
    let (_, id) = scene_with_rect();
    let mut engine = TweenEngine::new();
    let first = engine.animate(move_x(id, 0.0, 1.0, 1.0));
    engine.cancel(first);
    let second = engine.animate(move_x(id, 0.0, 1.0, 1.0));
    assert_ne!(first, second);
}
