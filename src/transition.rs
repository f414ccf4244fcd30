//! Per-frame linear-interpolation toward target values
//!
//! There is no timer and no frame delta: a rendered value converges on its
//! target one `step_toward` per render call, so animation duration follows
//! frame rate. Controls that disable animation snap straight to the target
//! instead of stepping.

use crate::color::Color;
use crate::geometry::Vec2;

/// Linear interpolation between `a` and `b` at parameter `t`
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// A value that can take one interpolation step toward a target.
pub trait Interpolate: Copy {
    /// One interpolation step with the given factor. A factor of 1 lands
    /// exactly on the target; factors in (0, 1) never overshoot.
    fn step_toward(self, target: Self, factor: f32) -> Self;
}

impl Interpolate for f32 {
    fn step_toward(self, target: Self, factor: f32) -> Self {
        let stepped = lerp(self, target, factor);
        // near the target the increment can round below half an ulp and
        // stall the value short of it; land exactly instead
        if stepped == self && factor > 0.0 {
            target
        } else {
            stepped
        }
    }
}

impl Interpolate for Vec2 {
    fn step_toward(self, target: Self, factor: f32) -> Self {
        Vec2::new(
            self.x.step_toward(target.x, factor),
            self.y.step_toward(target.y, factor),
        )
    }
}

impl Interpolate for Color {
    /// Channels interpolate independently. Each step rounds toward the
    /// target so byte quantization cannot stall short of it: any nonzero
    /// factor makes strict progress, and the channel lands exactly on the
    /// target rather than oscillating around it.
    fn step_toward(self, target: Self, factor: f32) -> Self {
        Color::rgba(
            step_channel(self.r, target.r, factor),
            step_channel(self.g, target.g, factor),
            step_channel(self.b, target.b, factor),
            step_channel(self.a, target.a, factor),
        )
    }
}

fn step_channel(current: u8, target: u8, factor: f32) -> u8 {
    let stepped = lerp(f32::from(current), f32::from(target), factor);
    if target >= current {
        stepped.ceil().min(f32::from(target)) as u8
    } else {
        stepped.floor().max(f32::from(target)) as u8
    }
}
