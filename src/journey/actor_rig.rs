use bevy::prelude::*;

use super::camera_rig::{facing, look_direction};
use super::path::PathCurve;
use super::tuning::RigTuning;
use crate::math;

/// Local orientation of the flying actor inside the camera group.
#[derive(Clone, Copy, Debug, PartialEq, Reflect)]
pub struct ActorTransform {
    /// Current rotation; only the roll is driven by the route.
    pub rotation: Quat,
}

impl Default for ActorTransform {
    fn default() -> Self {
        Self {
            rotation: Quat::IDENTITY,
        }
    }
}

impl ActorTransform {
    /// Slerps the roll toward the route's bank at `offset`, holding pitch and yaw.
    pub fn update(self, path: &PathCurve, offset: f32, tuning: &RigTuning, dt: f32) -> Self {
        let bank = target_bank(path, offset, tuning);
        let (pitch, yaw, _) = self.rotation.to_euler(EulerRot::XYZ);
        let target = Quat::from_euler(EulerRot::XYZ, pitch, yaw, bank);
        Self {
            rotation: self
                .rotation
                .slerp(target, math::damp_factor(tuning.bank_rate, dt)),
        }
    }

    /// Current roll in radians.
    pub fn roll(&self) -> f32 {
        self.rotation.to_euler(EulerRot::XYZ).2
    }
}

/// Target roll in radians for the actor at `offset`.
///
/// The tangent ahead of the actor is expressed relative to the *unsmoothed*
/// camera heading, so camera lag never leaks into the bank.
pub fn target_bank(path: &PathCurve, offset: f32, tuning: &RigTuning) -> f32 {
    let tangent = path.tangent_at(offset + tuning.actor_look_ahead);
    let heading = facing(look_direction(path, offset, tuning.camera_look_ahead));
    let (yaw, _, _) = heading.to_euler(EulerRot::YXZ);
    let local = Quat::from_rotation_y(-yaw) * tangent;
    math::bank_angle(local, tuning.bank_exaggeration, tuning.max_bank_degrees)
}
