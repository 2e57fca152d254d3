//! The paper glider riding with the camera.
//!
//! The glider body hangs under the journey's [`Actor`](crate::journey::Actor)
//! pivot, which carries the bank. This plugin moves the pivot through the
//! fly-in and fly-out clips, lifts the camera rail during the fly-out, and
//! adds a noise-driven hover to the body.

mod entities;
mod systems;

pub use entities::{FlightPhase, FlightPose, Glider, GliderFlight};

use bevy::prelude::*;

use crate::journey::JourneySet;

/// Per-plugin configuration for the glider.
#[derive(Resource, Clone, Debug, Reflect)]
pub struct GliderConfig {
    /// Pivot offset the glider flies in from (below and behind the camera).
    pub fly_in_from: Vec3,
    /// Duration of the fly-in clip (seconds).
    pub fly_in_duration: f32,
    /// Pivot offset reached by the climb at the end of the route.
    pub climb_to: Vec3,
    /// Duration of the climb (seconds).
    pub climb_duration: f32,
    /// Height the camera rail rises to while the glider climbs away.
    pub rail_lift: f32,
    /// Duration of the rail lift (seconds).
    pub rail_lift_duration: f32,
    /// Depth of the final dash into the distance.
    pub dash_depth: f32,
    /// Duration of the final dash (seconds).
    pub dash_duration: f32,
    /// Hover noise frequency.
    pub hover_speed: f32,
    /// Hover wobble scale.
    pub hover_rotation: f32,
    /// Hover bob scale.
    pub hover_height: f32,
    /// Seed for the hover noise.
    pub noise_seed: u32,
    /// Wingspan in world units.
    pub wingspan: f32,
    /// Body colour.
    pub color: Color,
}

impl Default for GliderConfig {
    fn default() -> Self {
        Self {
            fly_in_from: Vec3::new(0.0, -2.0, 5.0),
            fly_in_duration: 3.0,
            climb_to: Vec3::new(0.0, 10.0, -250.0),
            climb_duration: 10.0,
            rail_lift: 12.0,
            rail_lift_duration: 8.0,
            dash_depth: -1000.0,
            dash_duration: 1.0,
            hover_speed: 1.5,
            hover_rotation: 0.5,
            hover_height: 1.0,
            noise_seed: 7,
            wingspan: 0.6,
            color: Color::srgb(0.95, 0.95, 1.0),
        }
    }
}

/// Glider mesh, flight clips, and hover.
pub struct GliderPlugin(pub GliderConfig);

impl Plugin for GliderPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<Glider>()
            .register_type::<GliderConfig>()
            .insert_resource(self.0.clone())
            .insert_resource(entities::HoverNoise::new(self.0.noise_seed))
            .init_resource::<GliderFlight>()
            .add_systems(PostStartup, systems::spawn_glider)
            .add_systems(
                Update,
                (systems::cue_clips, systems::fly)
                    .chain()
                    .after(JourneySet::Apply),
            );
    }
}
