use bevy::prelude::*;

use crate::math;

/// Narrative flags observed by the overlay.
///
/// `journey_ended` is a one-way latch: once set it is never cleared for the
/// lifetime of a journey. A restart builds a fresh [`Lifecycle`] instead.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Reflect)]
pub struct Lifecycle {
    /// The user pressed EXPLORE; motion and fade-in are enabled.
    pub playing: bool,
    /// The camera reached the end of the route.
    pub journey_ended: bool,
    /// Latched the first time the raw scroll offset went from `<= 0` to `> 0`.
    pub has_scrolled: bool,
}

impl Lifecycle {
    /// Whether the scroll-driven motion may advance this frame.
    pub fn in_motion(&self) -> bool {
        self.playing && !self.journey_ended
    }

    /// Sets the end latch. Returns `true` only on the transition.
    pub fn end(&mut self) -> bool {
        let first = !self.journey_ended;
        self.journey_ended = true;
        first
    }

    /// Latches `has_scrolled` on the first `<= 0` → `> 0` raw offset change.
    /// Returns `true` only on the transition.
    pub fn observe_scroll(&mut self, previous_raw: f32, raw: f32) -> bool {
        if !self.has_scrolled && previous_raw <= 0.0 && raw > 0.0 {
            self.has_scrolled = true;
            return true;
        }
        false
    }
}

/// Scene-wide fade applied to every translucent material.
#[derive(Clone, Copy, Debug, Default, PartialEq, Reflect)]
pub struct SceneOpacity(pub f32);

impl SceneOpacity {
    /// Ramps toward 1 at `fade_in_rate` while playing, toward 0 at
    /// `fade_out_rate` once the journey ended, and holds otherwise.
    pub fn update(self, lifecycle: &Lifecycle, fade_in_rate: f32, fade_out_rate: f32, dt: f32) -> Self {
        let opacity = if lifecycle.journey_ended {
            math::damp(self.0, 0.0, fade_out_rate, dt)
        } else if lifecycle.playing {
            math::damp(self.0, 1.0, fade_in_rate, dt)
        } else {
            self.0
        };
        Self(opacity.clamp(0.0, 1.0))
    }
}
