use bevy::prelude::*;

use super::path::PathCurve;
use super::tuning::RigTuning;
use crate::math;

/// World placement of the camera group that rides the route.
#[derive(Clone, Copy, Debug, PartialEq, Reflect)]
pub struct CameraTransform {
    /// Smoothed world position of the group.
    pub position: Vec3,
    /// Smoothed unit forward direction.
    pub look_dir: Vec3,
}

impl CameraTransform {
    /// Placement at the very start of the route, already looking ahead.
    pub fn at_start(path: &PathCurve, tuning: &RigTuning) -> Self {
        Self {
            position: path.point_at(0.0),
            look_dir: look_direction(path, 0.0, tuning.camera_look_ahead),
        }
    }

    /// Eases position and direction toward the route point at `offset`.
    pub fn update(self, path: &PathCurve, offset: f32, tuning: &RigTuning, dt: f32) -> Self {
        let target = path.point_at(offset);
        let target_dir = look_direction(path, offset, tuning.camera_look_ahead);
        let blend = math::damp_factor(tuning.camera_rate, dt);

        let look_dir = self
            .look_dir
            .lerp(target_dir, blend)
            .try_normalize()
            .unwrap_or(target_dir);

        Self {
            position: self.position.lerp(target, blend),
            look_dir,
        }
    }

    /// Orientation whose forward (`-Z`) points along [`Self::look_dir`].
    pub fn rotation(&self) -> Quat {
        facing(self.look_dir)
    }

    /// Whether the group has flown past the end of the route.
    ///
    /// The route heads toward `-Z`; the journey ends once the group is
    /// within `end_margin` of the final control point's depth.
    pub fn reached_end(&self, path: &PathCurve, end_margin: f32) -> bool {
        self.position.z < path.end().z + end_margin
    }
}

/// Unsmoothed unit direction from the route point at `offset` to a point
/// slightly ahead. Falls back to the tangent at the very end of the route.
pub fn look_direction(path: &PathCurve, offset: f32, look_ahead: f32) -> Vec3 {
    let offset = offset.clamp(0.0, 1.0);
    let current = path.point_at(offset);
    let ahead = path.point_at((offset + look_ahead).min(1.0));
    (ahead - current)
        .try_normalize()
        .unwrap_or_else(|| path.tangent_at(offset))
}

/// Rotation that turns the default forward (`-Z`) toward `dir`, with `+Y` up.
pub fn facing(dir: Vec3) -> Quat {
    Transform::IDENTITY.looking_to(dir, Vec3::Y).rotation
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_route() -> PathCurve {
        PathCurve::new(vec![
            Vec3::ZERO,
            Vec3::new(0.0, 0.0, -250.0),
            Vec3::new(100.0, 0.0, -500.0),
        ])
        .unwrap()
    }

    #[test]
    fn starts_on_the_route_looking_down_it() {
        let path = scenario_route();
        let cam = CameraTransform::at_start(&path, &RigTuning::default());
        assert!(cam.position.length() < 1e-4);
        assert!(cam.look_dir.z < -0.9);
    }

    #[test]
    fn converges_to_point_at_offset() {
        let path = scenario_route();
        let tuning = RigTuning::default();
        let mut cam = CameraTransform::at_start(&path, &tuning);
        for _ in 0..600 {
            cam = cam.update(&path, 0.5, &tuning, 1.0 / 60.0);
        }
        assert!((cam.position - path.point_at(0.5)).length() < 1e-2);
        let expected_dir = look_direction(&path, 0.5, tuning.camera_look_ahead);
        assert!(cam.look_dir.dot(expected_dir) > 0.9999);
    }

    #[test]
    fn catches_up_within_a_fraction_of_a_second() {
        let path = scenario_route();
        let tuning = RigTuning::default();
        let mut cam = CameraTransform::at_start(&path, &tuning);
        let target = path.point_at(0.1);
        for _ in 0..15 {
            cam = cam.update(&path, 0.1, &tuning, 1.0 / 60.0);
        }
        let remaining = (cam.position - target).length() / target.length();
        assert!(remaining < 0.01, "still {remaining} of the way off");
    }

    #[test]
    fn look_direction_at_route_end_uses_tangent() {
        let path = scenario_route();
        let dir = look_direction(&path, 1.0, 0.008);
        assert!((dir - path.tangent_at(1.0)).length() < 1e-5);
    }

    #[test]
    fn rotation_faces_look_direction() {
        let cam = CameraTransform {
            position: Vec3::ZERO,
            look_dir: Vec3::new(1.0, 0.0, -1.0).normalize(),
        };
        let forward = cam.rotation() * Vec3::NEG_Z;
        assert!((forward - cam.look_dir).length() < 1e-5);
    }

    #[test]
    fn end_detection_uses_margin_before_final_point() {
        let path = scenario_route();
        let mut cam = CameraTransform {
            position: Vec3::new(100.0, 0.0, -399.0),
            look_dir: Vec3::NEG_Z,
        };
        assert!(!cam.reached_end(&path, 100.0));
        cam.position.z = -401.0;
        assert!(cam.reached_end(&path, 100.0));
    }
}
