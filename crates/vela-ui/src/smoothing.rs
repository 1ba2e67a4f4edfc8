//! Time-based interpolation of resolved property values.
//!
//! Smoothing is an exponential ease-out: each frame moves the current value
//! a fixed fraction of the remaining distance toward the target, so values
//! approach asymptotically and never overshoot or oscillate.

use glam::Vec2;

use crate::color::Color;
use crate::primitives::Inset;

/// Distance below which an approaching value snaps to its target
const SNAP_DISTANCE: f32 = 1e-3;

/// Linearly interpolable value with a scalar distance measure
pub trait Lerp: Copy + PartialEq {
    fn lerp(a: Self, b: Self, t: f32) -> Self;

    /// Largest per-component distance, used for the convergence snap
    fn distance(a: Self, b: Self) -> f32;
}

impl Lerp for f32 {
    fn lerp(a: Self, b: Self, t: f32) -> Self {
        a + (b - a) * t
    }

    fn distance(a: Self, b: Self) -> f32 {
        (a - b).abs()
    }
}

impl Lerp for Vec2 {
    fn lerp(a: Self, b: Self, t: f32) -> Self {
        a + (b - a) * t
    }

    fn distance(a: Self, b: Self) -> f32 {
        (a - b).abs().max_element()
    }
}

impl Lerp for Color {
    fn lerp(a: Self, b: Self, t: f32) -> Self {
        Color {
            r: f32::lerp(a.r, b.r, t),
            g: f32::lerp(a.g, b.g, t),
            b: f32::lerp(a.b, b.b, t),
            a: f32::lerp(a.a, b.a, t),
        }
    }

    fn distance(a: Self, b: Self) -> f32 {
        f32::distance(a.r, b.r)
            .max(f32::distance(a.g, b.g))
            .max(f32::distance(a.b, b.b))
            .max(f32::distance(a.a, b.a))
    }
}

impl Lerp for Inset {
    fn lerp(a: Self, b: Self, t: f32) -> Self {
        Inset {
            left: f32::lerp(a.left, b.left, t),
            right: f32::lerp(a.right, b.right, t),
            top: f32::lerp(a.top, b.top, t),
            bottom: f32::lerp(a.bottom, b.bottom, t),
        }
    }

    fn distance(a: Self, b: Self) -> f32 {
        f32::distance(a.left, b.left)
            .max(f32::distance(a.right, b.right))
            .max(f32::distance(a.top, b.top))
            .max(f32::distance(a.bottom, b.bottom))
    }
}

/// Move `current` toward `target` over one frame.
///
/// `smooth_time` is the time constant of the exponential blend; values at or
/// below zero snap immediately. A value already at its target is a no-op.
pub fn approach<T: Lerp>(current: T, target: T, delta_time: f32, smooth_time: f32) -> T {
    if current == target || smooth_time <= 0.0 {
        return target;
    }
    let t = 1.0 - (-delta_time / smooth_time).exp();
    let next = T::lerp(current, target, t);
    if T::distance(next, target) < SNAP_DISTANCE {
        target
    } else {
        next
    }
}
