#![warn(missing_docs)]
//! Scroll-driven flight through the sky.
//!
//! A camera and a paper glider ride a smooth route as the user scrolls.
//! Text sections along the route slow the flight down and nudge the camera
//! aside, the sky gradient follows progress, and the glider banks into turns
//! and climbs away at the end.

pub mod glider;
pub mod journey;
pub mod math;
pub mod overlay;
pub mod scenery;

use bevy::prelude::*;

/// Application-wide game state, used for system scheduling.
#[derive(States, Default, Debug, Clone, PartialEq, Eq, Hash, Reflect)]
pub enum GameState {
    /// Intro card shown, nothing moves yet.
    #[default]
    Intro,
    /// Flying: scroll drives the journey.
    Running,
    /// Inspector open, journey frozen (Tab to toggle).
    Debugging,
}
