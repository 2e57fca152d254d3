use bevy::prelude::*;

use super::lifecycle::Lifecycle;
use super::zones::{Proximity, ProximityZoneSet};
use crate::math;

/// External per-frame input.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameInput {
    /// Scroll fraction from the host; negative values floor to 0.
    pub raw_offset: f32,
    /// Seconds since the previous frame.
    pub delta_secs: f32,
}

/// Smoothed scroll progress and the camera-rail perturbation derived from it.
#[derive(Clone, Copy, Debug, PartialEq, Reflect)]
pub struct ScrollDrivenState {
    /// Last raw scroll fraction, floored at 0.
    pub raw_offset: f32,
    /// Lagged progress along the route, in `[0, 1]`.
    pub smoothed_offset: f32,
    /// Current smoothing multiplier, in `[0.1, 1]`.
    pub friction: f32,
    /// Lateral displacement of the camera from the route centerline.
    pub rail_offset: Vec3,
    /// Zone currently slowing the journey down, if any.
    pub active_zone: Option<usize>,
}

impl Default for ScrollDrivenState {
    fn default() -> Self {
        Self {
            raw_offset: 0.0,
            smoothed_offset: 0.0,
            friction: 1.0,
            rail_offset: Vec3::ZERO,
            active_zone: None,
        }
    }
}

impl ScrollDrivenState {
    /// Advances one frame.
    ///
    /// `previous_camera` is last frame's camera position; proximity is judged
    /// from it. Nothing moves once the journey ended or before play starts,
    /// although the raw offset is still recorded.
    pub fn update(
        self,
        input: &FrameInput,
        lifecycle: &Lifecycle,
        zones: &ProximityZoneSet,
        previous_camera: Vec3,
    ) -> Self {
        let raw_offset = input.raw_offset.max(0.0);
        if !lifecycle.in_motion() {
            return Self { raw_offset, ..self };
        }

        let dt = input.delta_secs;
        let Proximity {
            friction,
            rail_target,
            zone,
        } = zones.probe(previous_camera);

        // Rail drift is not slowed by friction, so the camera keeps looking
        // around while forward progress stalls.
        let rail_offset = math::damp_vec3(self.rail_offset, rail_target, 1.0, dt);
        let smoothed_offset =
            math::damp(self.smoothed_offset, raw_offset, friction, dt).clamp(0.0, 1.0);

        Self {
            raw_offset,
            smoothed_offset,
            friction,
            rail_offset,
            active_zone: zone,
        }
    }
}
