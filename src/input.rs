use glam::Vec2;

/// Client pixel position to normalised device coordinates of the area at
/// `origin` with `size` (x right, y up, `[-1, 1]` across the area).
///
/// `None` when the area has no size yet.
#[inline]
pub fn client_to_ndc(client: Vec2, origin: Vec2, size: Vec2) -> Option<Vec2> {
    if !(size.x > 0.0 && size.y > 0.0) || !client.is_finite() {
        return None;
    }
    let local = client - origin;
    Some(Vec2::new(
        local.x / size.x * 2.0 - 1.0,
        -(local.y / size.y) * 2.0 + 1.0,
    ))
}

/// True when `ndc` lies on the area.
#[inline]
pub fn ndc_inside(ndc: Vec2) -> bool {
    (-1.0..=1.0).contains(&ndc.x) && (-1.0..=1.0).contains(&ndc.y)
}

/// Backing-store size for a CSS size at the given device pixel ratio.
#[inline]
pub fn backing_size(css_width: f64, css_height: f64, dpr: f64) -> (u32, u32) {
    let dpr = if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 };
    let px = |v: f64| if v.is_finite() && v > 0.0 { (v * dpr) as u32 } else { 0 };
    (px(css_width).max(1), px(css_height).max(1))
}
