// Host-side tests for the per-frame uniform pipeline.

use gallery_core::*;
use glam::Vec2;

fn frame<'a>(elapsed: f32, dt: f32, speed: f32, transitions: &'a [HoverTransition], hover: HoverState) -> UniformFrame<'a> {
    UniformFrame {
        elapsed,
        dt,
        scroll_speed: speed,
        transitions,
        hover,
    }
}

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() <= 1e-5
}

#[test]
fn ease_out_quad_endpoints() {
    assert_eq!(ease_out_quad(0.0), 0.0);
    assert_eq!(ease_out_quad(1.0), 1.0);
    assert_eq!(ease_out_quad(0.5), 0.75);
    assert_eq!(ease_out_quad(3.0), 1.0);
}

#[test]
fn hover_enter_tweens_to_one_over_duration() {
    let mut p = UniformPipeline::new(1.0, 1.0);
    let id = ObjectId(0);
    p.register(id);

    let hover = HoverState {
        active: Some(id),
        surface_uv: Some(Vec2::new(0.2, 0.8)),
    };
    p.push(&frame(0.05, 0.5, 0.0, &[HoverTransition::Enter(id)], hover)).unwrap();
    let u = p.object(id).unwrap();
    assert!(approx(u.hover_state, 0.75));
    assert_eq!(u.hover_target(), 1.0);

    p.push(&frame(0.10, 0.5, 0.0, &[], hover)).unwrap();
    assert_eq!(p.object(id).unwrap().hover_state, 1.0);

    // Settled: further frames hold the value.
    p.push(&frame(0.15, 0.5, 0.0, &[], hover)).unwrap();
    assert_eq!(p.object(id).unwrap().hover_state, 1.0);
}

#[test]
fn exit_mid_tween_starts_from_current_value() {
    let mut p = UniformPipeline::new(1.0, 1.0);
    let id = ObjectId(3);
    p.register(id);
    let active = HoverState {
        active: Some(id),
        surface_uv: None,
    };
    p.push(&frame(0.05, 0.5, 0.0, &[HoverTransition::Enter(id)], active)).unwrap();
    p.push(&frame(0.10, 0.5, 0.0, &[HoverTransition::Exit(id)], HoverState::default()))
        .unwrap();
    // 0.75 → 0 with k = ease_out_quad(0.5)
    assert!(approx(p.object(id).unwrap().hover_state, 0.75 - 0.75 * 0.75));
    assert_eq!(p.object(id).unwrap().hover_target(), 0.0);
}

#[test]
fn switch_moves_highlight_between_objects() {
    let mut p = UniformPipeline::new(1.0, 1.0);
    let (a, b) = (ObjectId(0), ObjectId(1));
    p.register(a);
    p.register(b);
    let on_a = HoverState {
        active: Some(a),
        surface_uv: None,
    };
    p.push(&frame(0.05, 1.0, 0.0, &[HoverTransition::Enter(a)], on_a)).unwrap();

    let on_b = HoverState {
        active: Some(b),
        surface_uv: None,
    };
    p.push(&frame(
        0.10,
        0.0,
        0.0,
        &[HoverTransition::Exit(a), HoverTransition::Enter(b)],
        on_b,
    ))
    .unwrap();
    assert_eq!(p.object(a).unwrap().hover_target(), 0.0);
    assert_eq!(p.object(b).unwrap().hover_target(), 1.0);
}

#[test]
fn hover_uv_reaches_only_the_active_object() {
    let mut p = UniformPipeline::new(1.0, 1.0);
    let (a, b) = (ObjectId(0), ObjectId(1));
    p.register(a);
    p.register(b);
    let hover = HoverState {
        active: Some(a),
        surface_uv: Some(Vec2::new(0.1, 0.9)),
    };
    p.push(&frame(0.05, 0.016, 0.0, &[HoverTransition::Enter(a)], hover)).unwrap();
    assert_eq!(p.object(a).unwrap().hover_uv, Vec2::new(0.1, 0.9));
    assert_eq!(p.object(b).unwrap().hover_uv, Vec2::new(0.5, 0.5));
}

#[test]
fn time_and_speed_reach_every_consumer() {
    let mut p = UniformPipeline::new(1.0, 2.0);
    for i in 0..4 {
        p.register(ObjectId(i));
    }
    p.push(&frame(1.25, 0.016, 30.0, &[], HoverState::default())).unwrap();
    for i in 0..4 {
        assert_eq!(p.object(ObjectId(i)).unwrap().time, 1.25);
    }
    assert_eq!(p.distortion().time, 1.25);
    assert_eq!(p.distortion().scroll_speed, 60.0);
}

#[test]
fn non_finite_speed_is_skipped_and_reported() {
    let mut p = UniformPipeline::new(1.0, 1.0);
    p.register(ObjectId(0));
    p.push(&frame(0.05, 0.016, 12.0, &[], HoverState::default())).unwrap();

    let err = p
        .push(&frame(0.10, 0.016, f32::NAN, &[], HoverState::default()))
        .unwrap_err();
    assert_eq!(err, UniformError::NonFinite("scroll_speed"));
    // Other writes still happened; the bad one kept its previous value.
    assert_eq!(p.distortion().scroll_speed, 12.0);
    assert_eq!(p.distortion().time, 0.10);
    assert_eq!(p.object(ObjectId(0)).unwrap().time, 0.10);
}

#[test]
fn transitions_for_unknown_objects_are_ignored() {
    let mut p = UniformPipeline::new(1.0, 1.0);
    p.register(ObjectId(0));
    let res = p.push(&frame(
        0.05,
        0.016,
        0.0,
        &[HoverTransition::Enter(ObjectId(99))],
        HoverState::default(),
    ));
    assert!(res.is_ok());
    assert!(p.object(ObjectId(99)).is_none());
    assert_eq!(p.object(ObjectId(0)).unwrap().hover_state, 0.0);
}

#[test]
fn hover_tween_retarget_is_continuous() {
    let mut t = HoverTween::new(1.0);
    t.retarget(1.0);
    let v = t.advance(0.25);
    t.retarget(0.0);
    // No jump on retarget.
    assert_eq!(t.advance(0.0), v);
    assert!(!t.is_settled());
    t.advance(5.0);
    assert!(t.is_settled());
    assert_eq!(t.value(), 0.0);
}
