use bevy::prelude::*;

/// Constants shaping how the rigs chase the route.
///
/// Rates are exponential smoothing rates in 1/seconds.
#[derive(Clone, Debug, PartialEq, Reflect)]
pub struct RigTuning {
    /// How fast the camera group catches up with the route point.
    pub camera_rate: f32,
    /// Parametric look-ahead for the camera direction.
    pub camera_look_ahead: f32,
    /// Parametric look-ahead for the actor's banking tangent.
    pub actor_look_ahead: f32,
    /// Multiplier on the raw bank angle in degrees.
    pub bank_exaggeration: f32,
    /// Bank angle limit in degrees.
    pub max_bank_degrees: f32,
    /// Slerp rate of the actor roll.
    pub bank_rate: f32,
    /// Scene fade-in rate while playing.
    pub fade_in_rate: f32,
    /// Scene fade-out rate after the end.
    pub fade_out_rate: f32,
    /// Distance before the final control point at which the journey ends.
    pub end_margin: f32,
}

impl Default for RigTuning {
    fn default() -> Self {
        Self {
            camera_rate: 24.0,
            camera_look_ahead: 0.008,
            actor_look_ahead: 0.02,
            bank_exaggeration: 2.4,
            max_bank_degrees: 35.0,
            bank_rate: 2.0,
            fade_in_rate: 0.1,
            fade_out_rate: 1.0,
            end_margin: 100.0,
        }
    }
}
