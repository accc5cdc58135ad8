// Host-side tests for page settings parsing.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod settings {
    include!("../src/settings.rs");
}

use settings::*;
use std::collections::HashMap;
use std::time::Duration;

fn attrs(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name| map.get(name).cloned()
}

#[test]
fn no_attributes_gives_gallery_defaults() {
    let s = read_settings(attrs(&[]));
    assert_eq!(s.mode, SceneMode::Gallery);
    assert_eq!(s.config, gallery_core::SceneConfig::gallery());
    assert_eq!(s.fonts, vec!["Open Sans".to_string(), "Playfair Display".to_string()]);
}

#[test]
fn playground_mode_waits_on_no_fonts() {
    let s = read_settings(attrs(&[("data-scene", "playground")]));
    assert_eq!(s.mode, SceneMode::Playground);
    assert!(s.fonts.is_empty());
    assert!(!s.config.distortion.enabled);
}

#[test]
fn unknown_scene_falls_back_to_gallery() {
    assert_eq!(SceneMode::parse(Some("carousel")), SceneMode::Gallery);
    assert_eq!(SceneMode::parse(Some(" playground ")), SceneMode::Playground);
    assert_eq!(SceneMode::parse(None), SceneMode::Gallery);
}

#[test]
fn overrides_are_applied() {
    let s = read_settings(attrs(&[
        ("data-scroll-ease", "0.25"),
        ("data-time-step", "0.02"),
        ("data-hover-duration", "0.5"),
        ("data-readiness-timeout-ms", "1500"),
        ("data-distortion", "off"),
        ("data-fonts", " Inter , ,Lora"),
    ]));
    assert_eq!(s.config.scroll_ease, 0.25);
    assert_eq!(s.config.time_step, 0.02);
    assert_eq!(s.config.hover_duration_sec, 0.5);
    assert_eq!(s.config.readiness_timeout, Some(Duration::from_millis(1500)));
    assert!(!s.config.distortion.enabled);
    assert_eq!(s.fonts, vec!["Inter".to_string(), "Lora".to_string()]);
}

#[test]
fn timeout_none_waits_forever() {
    let s = read_settings(attrs(&[("data-readiness-timeout-ms", "none")]));
    assert_eq!(s.config.readiness_timeout, None);
}

#[test]
fn unparseable_values_are_ignored() {
    let s = read_settings(attrs(&[
        ("data-scroll-ease", "fast"),
        ("data-distortion", "maybe"),
        ("data-readiness-timeout-ms", "-3"),
    ]));
    assert_eq!(s.config, gallery_core::SceneConfig::gallery());
}

#[test]
fn invalid_combination_falls_back_to_preset() {
    let s = read_settings(attrs(&[("data-scene", "playground"), ("data-scroll-ease", "4")]));
    assert_eq!(s.config, gallery_core::SceneConfig::playground());
}

#[test]
fn empty_font_list_is_allowed() {
    let s = read_settings(attrs(&[("data-fonts", "")]));
    assert!(s.fonts.is_empty());
}
