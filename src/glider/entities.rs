use bevy::prelude::*;
use noise::Perlin;

use super::GliderConfig;
use crate::math;

/// Marker for the glider body mesh (child of the actor pivot).
#[derive(Component, Reflect)]
pub struct Glider;

/// Noise source for the hover bob and wobble.
#[derive(Resource)]
pub struct HoverNoise(pub(super) Perlin);

impl HoverNoise {
    pub(super) fn new(seed: u32) -> Self {
        Self(Perlin::new(seed))
    }
}

/// Which clip the glider is in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Reflect)]
pub enum FlightPhase {
    /// Waiting out of view for the journey to start.
    #[default]
    Parked,
    /// Rising into place in front of the camera.
    FlyingIn,
    /// Riding along with the camera.
    Cruising,
    /// Climbing away at the end of the route.
    FlyingOut,
    /// Gone into the distance.
    Departed,
}

/// Pivot offset and camera-rail lift for one frame of the clips.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlightPose {
    /// Offset of the actor pivot inside the camera group.
    pub offset: Vec3,
    /// Extra height added to the camera rail.
    pub rail_lift: f32,
}

/// Time-based clip player for the glider.
#[derive(Resource, Clone, Copy, Debug, Default, PartialEq, Reflect)]
pub struct GliderFlight {
    phase: FlightPhase,
    elapsed: f32,
}

impl GliderFlight {
    /// Current clip.
    pub fn phase(&self) -> FlightPhase {
        self.phase
    }

    /// Back out of view, waiting for the next start.
    pub fn park(&mut self) {
        *self = Self::default();
    }

    /// (Re)starts the fly-in clip.
    pub fn fly_in(&mut self) {
        self.phase = FlightPhase::FlyingIn;
        self.elapsed = 0.0;
    }

    /// Starts the fly-out clip unless it already ran.
    pub fn fly_out(&mut self) {
        if matches!(self.phase, FlightPhase::FlyingOut | FlightPhase::Departed) {
            return;
        }
        self.phase = FlightPhase::FlyingOut;
        self.elapsed = 0.0;
    }

    /// Advances the current clip by `dt` and returns the resulting pose.
    pub fn tick(&mut self, dt: f32, cfg: &GliderConfig) -> FlightPose {
        self.elapsed += dt.max(0.0);
        match self.phase {
            FlightPhase::FlyingIn if self.elapsed >= cfg.fly_in_duration => {
                self.phase = FlightPhase::Cruising;
            }
            FlightPhase::FlyingOut
                if self.elapsed >= cfg.climb_duration.max(cfg.rail_lift_duration) + cfg.dash_duration =>
            {
                self.phase = FlightPhase::Departed;
            }
            _ => {}
        }
        self.pose(cfg)
    }

    /// Pose at the current clip time.
    pub fn pose(&self, cfg: &GliderConfig) -> FlightPose {
        let t = self.elapsed;
        match self.phase {
            FlightPhase::Parked => FlightPose {
                offset: cfg.fly_in_from,
                rail_lift: 0.0,
            },
            FlightPhase::FlyingIn => FlightPose {
                offset: cfg
                    .fly_in_from
                    .lerp(Vec3::ZERO, progress(t, cfg.fly_in_duration)),
                rail_lift: 0.0,
            },
            FlightPhase::Cruising => FlightPose {
                offset: Vec3::ZERO,
                rail_lift: 0.0,
            },
            FlightPhase::FlyingOut | FlightPhase::Departed => {
                // The dash starts once the climb has finished.
                let mut offset = Vec3::ZERO.lerp(cfg.climb_to, progress(t, cfg.climb_duration));
                let dash = progress(t - cfg.climb_duration, cfg.dash_duration);
                offset.z += (cfg.dash_depth - cfg.climb_to.z) * dash;
                FlightPose {
                    offset,
                    rail_lift: cfg.rail_lift * progress(t, cfg.rail_lift_duration),
                }
            }
        }
    }
}

/// Eased completion of a clip of `duration` seconds at time `t`.
fn progress(t: f32, duration: f32) -> f32 {
    if duration <= 0.0 {
        return if t >= 0.0 { 1.0 } else { 0.0 };
    }
    math::ease_out_quad(t / duration)
}
