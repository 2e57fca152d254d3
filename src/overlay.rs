//! Screen overlay: intro card, outro card, and the zone texts.
//!
//! The intro card starts the journey, the outro card restarts it. Zone titles
//! and subtitles are projected from their world anchors onto the screen.

mod systems;

use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

use crate::GameState;

/// Per-plugin configuration for the overlay.
#[derive(Resource, Clone, Debug, Reflect)]
pub struct OverlayConfig {
    /// Headline of the intro card.
    pub title: String,
    /// Hint under the headline, hidden after the first scroll.
    pub scroll_hint: String,
    /// Label of the start button.
    pub start_label: String,
    /// Text of the outro card.
    pub outro: String,
    /// Label of the restart button.
    pub restart_label: String,
    /// Zone texts farther than this from the camera are hidden.
    pub label_range: f32,
    /// Zone title font size (points).
    pub title_size: f32,
    /// Zone subtitle font size (points).
    pub subtitle_size: f32,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            title: "SKY JOURNEY".into(),
            scroll_hint: "Scroll to begin the journey".into(),
            start_label: "EXPLORE".into(),
            outro: "Thank you for flying along.\nWe hope you enjoyed the view.".into(),
            restart_label: "EXPLORE AGAIN".into(),
            label_range: 60.0,
            title_size: 28.0,
            subtitle_size: 18.0,
        }
    }
}

/// egui overlay on top of the 3D scene.
pub struct OverlayPlugin(pub OverlayConfig);

impl Plugin for OverlayPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<OverlayConfig>()
            .insert_resource(self.0.clone())
            .add_systems(
                EguiPrimaryContextPass,
                (
                    systems::draw_intro.run_if(in_state(GameState::Intro)),
                    systems::draw_outro,
                    systems::draw_zone_labels,
                ),
            );
    }
}
