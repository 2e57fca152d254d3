//! Static scenery around the route.
//!
//! Spawns the gradient sky dome that rides with the camera group, the trail
//! ribbon under the route, the clouds, and the light. Keeps the sky gradient
//! in sync with the narrative timeline and fades the trail and clouds with
//! the scene opacity.

mod entities;
mod systems;

pub use entities::{Cloud, SkyDome, Trail};

use bevy::prelude::*;

use crate::journey::JourneySet;

/// Placement of one cloud, relative to a route control point or the origin.
#[derive(Clone, Debug, Reflect)]
pub struct CloudPlacement {
    /// Route control point the offset is measured from; `None` for world origin.
    pub anchor: Option<usize>,
    /// Offset from the anchor.
    pub offset: Vec3,
    /// Uniform scale.
    pub scale: f32,
    /// Euler XYZ rotation in radians.
    pub rotation: Vec3,
}

impl CloudPlacement {
    fn at(anchor: usize, offset: Vec3, scale: f32) -> Self {
        Self {
            anchor: Some(anchor),
            offset,
            scale,
            rotation: Vec3::ZERO,
        }
    }

    fn rotated(self, x: f32, y: f32, z: f32) -> Self {
        Self {
            rotation: Vec3::new(x, y, z),
            ..self
        }
    }
}

/// Per-plugin configuration for the scenery.
#[derive(Resource, Clone, Debug, Reflect)]
pub struct SceneryConfig {
    /// Radius of the sky dome around the camera group.
    pub sky_radius: f32,
    /// Sky dome tessellation (sectors, stacks).
    pub sky_resolution: UVec2,
    /// Colour behind everything.
    pub clear_color: Color,
    /// Number of route samples along the trail ribbon.
    pub trail_samples: usize,
    /// Half width of the trail ribbon.
    pub trail_half_width: f32,
    /// How far below the route the trail runs.
    pub trail_drop: f32,
    /// Position the directional light shines from, toward the origin.
    pub light_position: Vec3,
    /// Directional light illuminance (lux).
    pub light_illuminance: f32,
    /// Spheres per cloud.
    pub cloud_puffs: usize,
    /// Seed for cloud puff layout.
    pub cloud_seed: u32,
    /// Cloud placements.
    pub clouds: Vec<CloudPlacement>,
}

impl Default for SceneryConfig {
    fn default() -> Self {
        use std::f32::consts::PI;

        let origin = |offset: Vec3, scale: f32| CloudPlacement {
            anchor: None,
            offset,
            scale,
            rotation: Vec3::ZERO,
        };
        let clouds = vec![
            origin(Vec3::new(-3.5, -3.2, -6.0), 1.0),
            origin(Vec3::new(3.5, -4.0, -10.0), 1.5),
            origin(Vec3::new(-20.0, 0.2, -68.0), 7.0).rotated(-PI / 5.0, PI / 6.0, 0.0),
            origin(Vec3::new(10.0, -1.2, -52.0), 2.5),
            CloudPlacement::at(1, Vec3::new(10.0, -4.0, 64.0), 4.0),
            CloudPlacement::at(1, Vec3::new(-20.0, 4.0, 28.0), 3.0).rotated(0.0, PI / 7.0, 0.0),
            CloudPlacement::at(1, Vec3::new(-13.0, 4.0, -62.0), 5.0).rotated(0.0, PI / 7.0, PI / 5.0),
            CloudPlacement::at(1, Vec3::new(8.0, -14.0, -22.0), 5.0),
            CloudPlacement::at(2, Vec3::new(6.0, -7.0, 50.0), 3.0),
            CloudPlacement::at(2, Vec3::new(-2.0, 4.0, -26.0), 2.0),
            CloudPlacement::at(2, Vec3::new(12.0, 1.0, -86.0), 4.0).rotated(PI / 4.0, 0.0, PI / 3.0),
            CloudPlacement::at(3, Vec3::new(3.0, -10.0, 50.0), 3.0),
            CloudPlacement::at(3, Vec3::new(-10.0, 0.0, 30.0), 3.0).rotated(PI / 4.0, 0.0, PI / 5.0),
            CloudPlacement::at(3, Vec3::new(-20.0, -5.0, -8.0), 4.0).rotated(PI, 0.0, PI / 5.0),
            CloudPlacement::at(3, Vec3::new(0.0, -5.0, -98.0), 5.0).rotated(0.0, PI / 3.0, 0.0),
            CloudPlacement::at(4, Vec3::new(3.0, -10.0, 2.0), 2.0),
            CloudPlacement::at(4, Vec3::new(24.0, -6.0, -42.0), 3.0).rotated(PI / 4.0, 0.0, PI / 5.0),
            CloudPlacement::at(4, Vec3::new(-4.0, 9.0, -62.0), 3.0).rotated(PI / 3.0, 0.0, PI / 3.0),
            CloudPlacement::at(7, Vec3::new(12.0, -5.0, 60.0), 3.0).rotated(-PI / 4.0, -PI / 6.0, 0.0),
            CloudPlacement::at(7, Vec3::new(-12.0, 5.0, 120.0), 3.0).rotated(PI / 4.0, PI / 6.0, 0.0),
            CloudPlacement::at(7, Vec3::ZERO, 4.0),
        ];

        Self {
            sky_radius: 100.0,
            sky_resolution: UVec2::new(48, 24),
            clear_color: Color::srgb_u8(0xec, 0xec, 0xec),
            trail_samples: 1000,
            trail_half_width: 0.08,
            trail_drop: 2.0,
            light_position: Vec3::new(0.0, 3.0, 1.0),
            light_illuminance: 4_000.0,
            cloud_puffs: 5,
            cloud_seed: 42,
            clouds,
        }
    }
}

/// Sky, trail, clouds, and light.
pub struct SceneryPlugin(pub SceneryConfig);

impl Plugin for SceneryPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<SceneryConfig>()
            .register_type::<SkyDome>()
            .register_type::<Trail>()
            .register_type::<Cloud>()
            .insert_resource(self.0.clone())
            .insert_resource(ClearColor(self.0.clear_color))
            .init_resource::<entities::FadeMaterials>()
            .add_systems(Startup, (systems::spawn_light, systems::spawn_trail, systems::spawn_clouds))
            .add_systems(PostStartup, systems::spawn_sky)
            .add_systems(
                Update,
                (systems::paint_sky, systems::fade_scenery).after(JourneySet::Advance),
            );
    }
}
