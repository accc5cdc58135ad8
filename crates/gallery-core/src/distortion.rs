//! CPU reference of the scroll distortion post pass.
//!
//! `shaders/distortion.wgsl` mirrors these functions; keeping them here lets
//! the mask/noise/blend behaviour be checked without a GPU.
//!
//! Per fragment at `uv` (origin bottom-left):
//!
//! 1. `mask = smoothstep(mask_start, mask_end, uv.y) * 2 - 1`, in `[-1, 1]`.
//! 2. `noise = 0.5 * (cnoise(vec3(uv * noise_scale, time)) + 1)`.
//! 3. `uv.x -= (uv.x - 0.5) * warp_strength * mask * scroll_speed`.
//! 4. `blend = smoothstep(blend_low, blend_high, noise + mask)` and the
//!    output is `mix(flat_color, sample(uv), blend)`.

use crate::config::DistortionParams;
use glam::{Vec2, Vec3, Vec4};

/// GLSL `smoothstep`, defined for `edge0 > edge1` as well.
#[inline]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    if edge0 == edge1 {
        return if x < edge0 { 0.0 } else { 1.0 };
    }
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

#[inline]
fn fract(v: Vec4) -> Vec4 {
    v - v.floor()
}

#[inline]
fn mod289(v: Vec4) -> Vec4 {
    v - (v * (1.0 / 289.0)).floor() * 289.0
}

#[inline]
fn permute(v: Vec4) -> Vec4 {
    mod289((v * 34.0 + Vec4::ONE) * v)
}

#[inline]
fn taylor_inv_sqrt(r: Vec4) -> Vec4 {
    Vec4::splat(1.792_842_9) - r * 0.853_734_7
}

#[inline]
fn fade(t: Vec3) -> Vec3 {
    t * t * t * (t * (t * 6.0 - Vec3::splat(15.0)) + Vec3::splat(10.0))
}

#[inline]
fn step_zero(v: Vec4) -> Vec4 {
    // step(v, 0.0): 1 where v <= 0
    Vec4::new(
        (v.x <= 0.0) as u8 as f32,
        (v.y <= 0.0) as u8 as f32,
        (v.z <= 0.0) as u8 as f32,
        (v.w <= 0.0) as u8 as f32,
    )
}

#[inline]
fn step_positive(v: Vec4) -> Vec4 {
    // step(0.0, v): 1 where v >= 0
    Vec4::new(
        (v.x >= 0.0) as u8 as f32,
        (v.y >= 0.0) as u8 as f32,
        (v.z >= 0.0) as u8 as f32,
        (v.w >= 0.0) as u8 as f32,
    )
}

fn gradients(ixy: Vec4) -> (Vec4, Vec4, Vec4) {
    let mut gx = ixy * (1.0 / 7.0);
    let mut gy = fract(gx.floor() * (1.0 / 7.0)) - Vec4::splat(0.5);
    gx = fract(gx);
    let gz = Vec4::splat(0.5) - gx.abs() - gy.abs();
    let sz = step_zero(gz);
    gx -= sz * (step_positive(gx) - Vec4::splat(0.5));
    gy -= sz * (step_positive(gy) - Vec4::splat(0.5));
    (gx, gy, gz)
}

/// Classic 3D Perlin noise (Gustavson), roughly in `[-1, 1]`.
pub fn cnoise(p: Vec3) -> f32 {
    let pi0 = p.floor();
    let pi1 = pi0 + Vec3::ONE;
    let pi0 = mod289(pi0.extend(0.0)).truncate();
    let pi1 = mod289(pi1.extend(0.0)).truncate();
    let pf0 = p - p.floor();
    let pf1 = pf0 - Vec3::ONE;

    let ix = Vec4::new(pi0.x, pi1.x, pi0.x, pi1.x);
    let iy = Vec4::new(pi0.y, pi0.y, pi1.y, pi1.y);
    let iz0 = Vec4::splat(pi0.z);
    let iz1 = Vec4::splat(pi1.z);

    let ixy = permute(permute(ix) + iy);
    let ixy0 = permute(ixy + iz0);
    let ixy1 = permute(ixy + iz1);

    let (gx0, gy0, gz0) = gradients(ixy0);
    let (gx1, gy1, gz1) = gradients(ixy1);

    let mut g000 = Vec3::new(gx0.x, gy0.x, gz0.x);
    let mut g100 = Vec3::new(gx0.y, gy0.y, gz0.y);
    let mut g010 = Vec3::new(gx0.z, gy0.z, gz0.z);
    let mut g110 = Vec3::new(gx0.w, gy0.w, gz0.w);
    let mut g001 = Vec3::new(gx1.x, gy1.x, gz1.x);
    let mut g101 = Vec3::new(gx1.y, gy1.y, gz1.y);
    let mut g011 = Vec3::new(gx1.z, gy1.z, gz1.z);
    let mut g111 = Vec3::new(gx1.w, gy1.w, gz1.w);

    let norm0 = taylor_inv_sqrt(Vec4::new(
        g000.dot(g000),
        g010.dot(g010),
        g100.dot(g100),
        g110.dot(g110),
    ));
    g000 *= norm0.x;
    g010 *= norm0.y;
    g100 *= norm0.z;
    g110 *= norm0.w;
    let norm1 = taylor_inv_sqrt(Vec4::new(
        g001.dot(g001),
        g011.dot(g011),
        g101.dot(g101),
        g111.dot(g111),
    ));
    g001 *= norm1.x;
    g011 *= norm1.y;
    g101 *= norm1.z;
    g111 *= norm1.w;

    let n000 = g000.dot(pf0);
    let n100 = g100.dot(Vec3::new(pf1.x, pf0.y, pf0.z));
    let n010 = g010.dot(Vec3::new(pf0.x, pf1.y, pf0.z));
    let n110 = g110.dot(Vec3::new(pf1.x, pf1.y, pf0.z));
    let n001 = g001.dot(Vec3::new(pf0.x, pf0.y, pf1.z));
    let n101 = g101.dot(Vec3::new(pf1.x, pf0.y, pf1.z));
    let n011 = g011.dot(Vec3::new(pf0.x, pf1.y, pf1.z));
    let n111 = g111.dot(pf1);

    let f = fade(pf0);
    let n_z = Vec4::new(n000, n100, n010, n110).lerp(Vec4::new(n001, n101, n011, n111), f.z);
    let n_yz = Vec2::new(n_z.x, n_z.y).lerp(Vec2::new(n_z.z, n_z.w), f.y);
    2.2 * (n_yz.x + (n_yz.y - n_yz.x) * f.x)
}

/// Vertical falloff remapped to `[-1, 1]`.
#[inline]
pub fn vertical_mask(y: f32, params: &DistortionParams) -> f32 {
    smoothstep(params.mask_start, params.mask_end, y) * 2.0 - 1.0
}

/// Warped sample coordinate and blend weight for one fragment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DistortionSample {
    pub uv: Vec2,
    pub blend: f32,
}

pub fn distort(uv: Vec2, time: f32, scroll_speed: f32, params: &DistortionParams) -> DistortionSample {
    if !params.enabled {
        return DistortionSample { uv, blend: 1.0 };
    }
    let mask = vertical_mask(uv.y, params);
    let noise = 0.5 * (cnoise((uv * params.noise_scale).extend(time)) + 1.0);
    let blend = smoothstep(params.blend_low, params.blend_high, noise + mask);
    let mut warped = uv;
    warped.x -= (uv.x - 0.5) * params.warp_strength * mask * scroll_speed;
    DistortionSample {
        uv: warped,
        // NaN inputs fall back to the flat colour
        blend: if blend.is_finite() { blend } else { 0.0 },
    }
}

/// Final colour: `mix(flat_color, sample(warped_uv), blend)`.
pub fn shade(
    uv: Vec2,
    time: f32,
    scroll_speed: f32,
    params: &DistortionParams,
    sample: impl Fn(Vec2) -> Vec4,
) -> Vec4 {
    let s = distort(uv, time, scroll_speed, params);
    Vec4::from(params.flat_color).lerp(sample(s.uv), s.blend)
}
