use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use super::OverlayConfig;
use crate::journey::{FlightCamera, Journey, JourneyFrame, RestartJourney, StartJourney};

/// Intro card with the start button.
pub fn draw_intro(
    mut contexts: EguiContexts,
    cfg: Res<OverlayConfig>,
    frame: Res<JourneyFrame>,
    mut starts: MessageWriter<StartJourney>,
) {
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    egui::Area::new(egui::Id::new("journey_intro"))
        .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.label(
                    egui::RichText::new(&cfg.title)
                        .size(48.0)
                        .strong()
                        .color(egui::Color32::WHITE),
                );
                if !frame.lifecycle.has_scrolled {
                    ui.label(egui::RichText::new(&cfg.scroll_hint).color(egui::Color32::WHITE));
                }
                ui.add_space(16.0);
                let button = egui::Button::new(egui::RichText::new(&cfg.start_label).size(20.0));
                if ui.add(button).clicked() {
                    starts.write(StartJourney);
                }
            });
        });
}

/// Outro card with the restart button, once the route is done.
pub fn draw_outro(
    mut contexts: EguiContexts,
    cfg: Res<OverlayConfig>,
    frame: Res<JourneyFrame>,
    mut restarts: MessageWriter<RestartJourney>,
) {
    if !frame.lifecycle.journey_ended {
        return;
    }
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    egui::Area::new(egui::Id::new("journey_outro"))
        .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.label(
                    egui::RichText::new(&cfg.outro)
                        .size(24.0)
                        .color(egui::Color32::WHITE),
                );
                ui.add_space(16.0);
                let button =
                    egui::Button::new(egui::RichText::new(&cfg.restart_label).size(20.0));
                if ui.add(button).clicked() {
                    restarts.write(RestartJourney);
                }
            });
        });
}

/// Projects each nearby zone's title and subtitle onto the screen.
pub fn draw_zone_labels(
    mut contexts: EguiContexts,
    cfg: Res<OverlayConfig>,
    journey: Res<Journey>,
    frame: Res<JourneyFrame>,
    camera_q: Query<(&Camera, &GlobalTransform), With<FlightCamera>>,
) {
    if frame.opacity.0 <= 0.0 {
        return;
    }
    let Ok((camera, cam_gt)) = camera_q.single() else {
        return;
    };
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };
    let cam_pos = cam_gt.translation();
    let painter = ctx.layer_painter(egui::LayerId::background());

    for zone in journey.zones.zones() {
        let alpha = label_alpha(
            cam_pos.distance(zone.anchor),
            cfg.label_range,
            frame.opacity.0,
        );
        if alpha == 0 {
            continue;
        }
        let Ok(viewport) = camera.world_to_viewport(cam_gt, zone.anchor) else {
            continue;
        };
        let color = egui::Color32::from_rgba_unmultiplied(255, 255, 255, alpha);
        let at = egui::pos2(viewport.x, viewport.y);
        painter.text(
            at,
            egui::Align2::LEFT_CENTER,
            &zone.title,
            egui::FontId::proportional(cfg.title_size),
            color,
        );
        painter.text(
            at + egui::vec2(0.0, cfg.title_size * 0.8),
            egui::Align2::LEFT_TOP,
            &zone.subtitle,
            egui::FontId::proportional(cfg.subtitle_size),
            color,
        );
    }
}

/// Label alpha: scene opacity, faded out linearly toward `range`.
fn label_alpha(distance: f32, range: f32, opacity: f32) -> u8 {
    if range <= 0.0 || distance >= range {
        return 0;
    }
    let fade = 1.0 - distance / range;
    (fade * opacity.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_vanish_out_of_range() {
        assert_eq!(label_alpha(60.0, 60.0, 1.0), 0);
        assert_eq!(label_alpha(100.0, 60.0, 1.0), 0);
        assert_eq!(label_alpha(1.0, 0.0, 1.0), 0);
    }

    #[test]
    fn labels_follow_scene_opacity() {
        assert_eq!(label_alpha(0.0, 60.0, 1.0), 255);
        assert_eq!(label_alpha(0.0, 60.0, 0.0), 0);
        assert_eq!(label_alpha(30.0, 60.0, 1.0), 128);
        assert!(label_alpha(0.0, 60.0, 0.5) < label_alpha(0.0, 60.0, 1.0));
    }
}
