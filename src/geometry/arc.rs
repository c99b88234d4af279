//! Polar helpers shared by geometry, hit testing and painting.
//!
//! Angles follow the diagram convention: 0 at twelve o'clock, increasing
//! clockwise on a y-down canvas.

use std::f32::consts::{PI, TAU};

/// Polar → cartesian, origin at the diagram center.
#[inline]
pub fn polar_to_cartesian(radius: f32, angle: f32) -> [f32; 2] {
    [radius * angle.sin(), -radius * angle.cos()]
}

/// Cartesian → (radius, angle in [0, 2π)).
#[inline]
pub fn cartesian_to_polar(x: f32, y: f32) -> (f32, f32) {
    let radius = x.hypot(y);
    (radius, wrap_angle(x.atan2(-y)))
}

/// Wrap any angle into [0, 2π).
#[inline]
pub fn wrap_angle(angle: f32) -> f32 {
    let a = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if a >= TAU {
        0.0
    } else {
        a
    }
}

/// True when text at `angle` would read upside down and should be flipped.
#[inline]
pub fn in_lower_half(angle: f32) -> bool {
    let a = wrap_angle(angle);
    a > PI * 0.5 && a < PI * 1.5
}

/// Number of straight segments needed to approximate `span` radians.
pub fn segment_count(span: f32, max_step: f32) -> usize {
    let step = if max_step > 0.0 { max_step } else { TAU / 64.0 };
    ((span.abs() / step).ceil() as usize).max(1)
}

/// Points along an arc from `start` to `end`, both ends included.
pub fn arc_points(radius: f32, start: f32, end: f32, max_step: f32) -> Vec<[f32; 2]> {
    let n = segment_count(end - start, max_step);
    let inv_n = 1.0 / n as f32;
    (0..=n)
        .map(|i| {
            let a = start + (end - start) * i as f32 * inv_n;
            polar_to_cartesian(radius, a)
        })
        .collect()
}

/// Closed outline of an annular sector: outer arc forward, inner arc back.
pub fn annular_sector(
    inner: f32,
    outer: f32,
    start: f32,
    end: f32,
    max_step: f32,
) -> Vec<[f32; 2]> {
    let mut pts = arc_points(outer, start, end, max_step);
    let mut inner_pts = arc_points(inner, start, end, max_step);
    inner_pts.reverse();
    pts.extend(inner_pts);
    pts
}

/// Paired (inner, outer) vertices for filling an annular sector as a strip.
pub fn sector_strip(
    inner: f32,
    outer: f32,
    start: f32,
    end: f32,
    max_step: f32,
) -> Vec<([f32; 2], [f32; 2])> {
    let n = segment_count(end - start, max_step);
    let inv_n = 1.0 / n as f32;
    (0..=n)
        .map(|i| {
            let a = start + (end - start) * i as f32 * inv_n;
            (polar_to_cartesian(inner, a), polar_to_cartesian(outer, a))
        })
        .collect()
}
