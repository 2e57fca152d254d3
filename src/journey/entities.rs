use bevy::prelude::*;

/// Root of the camera rig; follows the route position and heading.
#[derive(Component, Reflect)]
pub struct CameraGroup;

/// Child of [`CameraGroup`] carrying the zone-driven lateral drift.
#[derive(Component, Reflect)]
pub struct CameraRail;

/// The rendering camera inside [`CameraRail`].
#[derive(Component, Reflect)]
pub struct FlightCamera;

/// Pivot of the flying actor; its rotation carries the bank.
#[derive(Component, Reflect)]
pub struct Actor;

/// Emulated scroll container position, fed by wheel and keyboard.
#[derive(Resource, Clone, Copy, Debug, Default, PartialEq, Reflect)]
pub struct ScrollInput {
    /// Scrolled distance in logical pixels.
    pub pixels: f32,
    /// Height of one page (the window) in logical pixels.
    pub page_height: f32,
}

impl ScrollInput {
    /// Scrollable distance of a container `pages` screens tall.
    pub fn max_pixels(&self, pages: f32) -> f32 {
        ((pages - 1.0) * self.page_height).max(0.0)
    }

    /// Scrolls by `delta` pixels, clamped to the container.
    pub fn scroll_by(&mut self, delta: f32, pages: f32) {
        self.pixels = (self.pixels + delta).clamp(0.0, self.max_pixels(pages));
    }

    /// Tracks a window resize, keeping the scrolled fraction.
    pub fn set_page_height(&mut self, height: f32) {
        if self.page_height > 0.0 && height > 0.0 {
            self.pixels *= height / self.page_height;
        }
        self.page_height = height.max(0.0);
    }

    /// Scrolled fraction in `[0, 1]`.
    pub fn fraction(&self, pages: f32) -> f32 {
        let max = self.max_pixels(pages);
        if max <= 0.0 {
            return 0.0;
        }
        (self.pixels / max).clamp(0.0, 1.0)
    }
}

/// Request to start playing from the intro screen.
#[derive(Message, Clone, Copy, Debug)]
pub struct StartJourney;

/// Emitted once when the camera reaches the end of the route.
#[derive(Message, Clone, Copy, Debug)]
pub struct JourneyCompleted;

/// Request to rewind to the start and play again.
#[derive(Message, Clone, Copy, Debug)]
pub struct RestartJourney;
