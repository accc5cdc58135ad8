// Host-side tests for scene presets and validation.

use gallery_core::*;
use std::time::Duration;

#[test]
fn presets_are_valid() {
    assert_eq!(SceneConfig::gallery().validate(), Ok(()));
    assert_eq!(SceneConfig::playground().validate(), Ok(()));
    assert_eq!(SceneConfig::default(), SceneConfig::gallery());
}

#[test]
fn gallery_defaults() {
    let c = SceneConfig::gallery();
    assert_eq!(c.scroll_ease, 0.1);
    assert_eq!(c.time_step, 0.05);
    assert_eq!(c.hover_duration_sec, 1.0);
    assert_eq!(c.spin_per_frame, 0.0);
    assert_eq!(c.readiness_timeout, Some(Duration::from_secs(5)));
    assert!(c.distortion.enabled);
    assert_eq!(c.camera.eye.z, 600.0);
}

#[test]
fn playground_spins_without_distortion() {
    let c = SceneConfig::playground();
    assert_eq!(c.spin_per_frame, 0.0005);
    assert!(!c.distortion.enabled);
    assert_eq!(c.camera.znear, 10.0);
    assert_eq!(c.camera.zfar, 1000.0);
}

#[test]
fn rejects_out_of_range_values() {
    let bad = |f: fn(&mut SceneConfig)| {
        let mut c = SceneConfig::gallery();
        f(&mut c);
        c.validate()
    };
    assert_eq!(bad(|c| c.scroll_ease = 0.0), Err(ConfigError::ScrollEase(0.0)));
    assert_eq!(bad(|c| c.scroll_ease = 1.5), Err(ConfigError::ScrollEase(1.5)));
    assert_eq!(
        bad(|c| c.time_step = -0.05),
        Err(ConfigError::NonPositive {
            field: "time_step",
            value: -0.05
        })
    );
    assert_eq!(
        bad(|c| c.hover_duration_sec = f32::NAN),
        Err(ConfigError::NonFinite {
            field: "hover_duration_sec"
        })
    );
    assert_eq!(
        bad(|c| c.camera.znear = 3000.0),
        Err(ConfigError::DepthRange {
            near: 3000.0,
            far: 2000.0
        })
    );
    assert_eq!(
        bad(|c| c.distortion.blend_high = c.distortion.blend_low),
        Err(ConfigError::DegenerateEdges {
            field: "distortion.blend"
        })
    );
    assert!(bad(|c| c.camera.eye.x = f32::INFINITY).is_err());
}
