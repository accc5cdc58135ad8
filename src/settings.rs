// Page-level settings read from the container's `data-*` attributes.
//
// Every attribute is optional. Unparseable values are logged and ignored;
// a combination that fails validation falls back to the scene preset.

use crate::constants::DEFAULT_FONTS;
use gallery_core::SceneConfig;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SceneMode {
    Gallery,
    Playground,
}

impl SceneMode {
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("playground") => SceneMode::Playground,
            Some("gallery") | Some("") | None => SceneMode::Gallery,
            Some(other) => {
                log::warn!("[settings] unknown data-scene `{}`; using gallery", other);
                SceneMode::Gallery
            }
        }
    }

    pub fn preset(self) -> SceneConfig {
        match self {
            SceneMode::Gallery => SceneConfig::gallery(),
            SceneMode::Playground => SceneConfig::playground(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PageSettings {
    pub mode: SceneMode,
    pub config: SceneConfig,
    /// Font families awaited by the readiness barrier.
    pub fonts: Vec<String>,
}

fn parse_f32(name: &str, raw: &str) -> Option<f32> {
    match raw.trim().parse::<f32>() {
        Ok(v) if v.is_finite() => Some(v),
        _ => {
            log::warn!("[settings] ignoring {}=`{}`: not a number", name, raw);
            None
        }
    }
}

fn parse_flag(name: &str, raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "on" | "true" | "1" => Some(true),
        "off" | "false" | "0" => Some(false),
        _ => {
            log::warn!("[settings] ignoring {}=`{}`: expected on/off", name, raw);
            None
        }
    }
}

fn parse_timeout(raw: &str) -> Option<Option<Duration>> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("none") {
        return Some(None);
    }
    match raw.parse::<u64>() {
        Ok(ms) => Some(Some(Duration::from_millis(ms))),
        Err(_) => {
            log::warn!("[settings] ignoring data-readiness-timeout-ms=`{}`", raw);
            None
        }
    }
}

/// Build settings from an attribute lookup (`name -> value`).
pub fn read_settings(attr: impl Fn(&str) -> Option<String>) -> PageSettings {
    let mode = SceneMode::parse(attr("data-scene").as_deref());
    let preset = mode.preset();
    let mut config = preset.clone();

    if let Some(v) = attr("data-scroll-ease").and_then(|s| parse_f32("data-scroll-ease", &s)) {
        config.scroll_ease = v;
    }
    if let Some(v) = attr("data-time-step").and_then(|s| parse_f32("data-time-step", &s)) {
        config.time_step = v;
    }
    if let Some(v) = attr("data-hover-duration").and_then(|s| parse_f32("data-hover-duration", &s)) {
        config.hover_duration_sec = v;
    }
    if let Some(v) = attr("data-readiness-timeout-ms").and_then(|s| parse_timeout(&s)) {
        config.readiness_timeout = v;
    }
    if let Some(v) = attr("data-distortion").and_then(|s| parse_flag("data-distortion", &s)) {
        config.distortion.enabled = v;
    }

    if let Err(e) = config.validate() {
        log::warn!("[settings] {}; using {:?} defaults", e, mode);
        config = preset;
    }

    let fonts = match attr("data-fonts") {
        Some(list) => list
            .split(',')
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .map(str::to_string)
            .collect(),
        None if mode == SceneMode::Gallery => DEFAULT_FONTS.iter().map(|f| f.to_string()).collect(),
        None => Vec::new(),
    };

    PageSettings { mode, config, fonts }
}
