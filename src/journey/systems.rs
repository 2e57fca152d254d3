use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::post_process::bloom::{Bloom, BloomCompositeMode};
use bevy::prelude::*;
use bevy::render::view::Hdr;
use bevy::window::PrimaryWindow;

use super::entities::{
    Actor, CameraGroup, CameraRail, FlightCamera, JourneyCompleted, RestartJourney, ScrollInput,
    StartJourney,
};
use super::{FrameInput, Journey, JourneyConfig, JourneyFrame};
use crate::GameState;

/// Spawns the camera group with its rail, camera, and actor pivot.
pub fn spawn_rig(mut commands: Commands, cfg: Res<JourneyConfig>, frame: Res<JourneyFrame>) {
    commands.spawn((
        Name::new("CameraGroup"),
        CameraGroup,
        Transform::from_translation(frame.camera.position).with_rotation(frame.camera.rotation()),
        Visibility::default(),
        children![
            (
                Name::new("CameraRail"),
                CameraRail,
                Transform::default(),
                Visibility::default(),
                children![(
                    Name::new("FlightCamera"),
                    FlightCamera,
                    Camera3d::default(),
                    Hdr,
                    Tonemapping::TonyMcMapface,
                    Bloom {
                        intensity: cfg.camera.bloom_intensity,
                        composite_mode: BloomCompositeMode::Additive,
                        ..Bloom::NATURAL
                    },
                    Projection::from(PerspectiveProjection {
                        fov: cfg.camera.fov_degrees.to_radians(),
                        ..default()
                    }),
                    Transform::from_xyz(0.0, 0.0, cfg.camera.follow_distance),
                )],
            ),
            (
                Name::new("Actor"),
                Actor,
                Transform::default(),
                Visibility::default(),
            ),
        ],
    ));
}

/// Mouse wheel and arrow/page keys move the emulated scroll container.
pub fn read_scroll_input(
    mut wheel: MessageReader<MouseWheel>,
    keys: Res<ButtonInput<KeyCode>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cfg: Res<JourneyConfig>,
    mut input: ResMut<ScrollInput>,
) {
    if let Ok(window) = windows.single() {
        input.set_page_height(window.height());
    }

    let mut delta = 0.0;
    for ev in wheel.read() {
        // Positive wheel y scrolls toward the top of the page.
        delta -= match ev.unit {
            MouseScrollUnit::Line => ev.y * cfg.scroll.line_height,
            MouseScrollUnit::Pixel => ev.y,
        };
    }

    let page = input.page_height;
    if keys.just_pressed(KeyCode::ArrowDown) {
        delta += page * cfg.scroll.arrow_step;
    }
    if keys.just_pressed(KeyCode::ArrowUp) {
        delta -= page * cfg.scroll.arrow_step;
    }
    if keys.just_pressed(KeyCode::PageDown) {
        delta += page;
    }
    if keys.just_pressed(KeyCode::PageUp) {
        delta -= page;
    }

    if delta != 0.0 {
        input.scroll_by(delta, cfg.scroll.pages);
    }
}

/// Enter or Space on the intro screen starts the journey.
pub fn start_on_key(keys: Res<ButtonInput<KeyCode>>, mut starts: MessageWriter<StartJourney>) {
    if keys.any_just_pressed([KeyCode::Enter, KeyCode::Space]) {
        starts.write(StartJourney);
    }
}

pub fn start_journey(
    mut starts: MessageReader<StartJourney>,
    mut frame: ResMut<JourneyFrame>,
    mut next: ResMut<NextState<GameState>>,
) {
    if starts.read().count() == 0 || frame.lifecycle.playing {
        return;
    }
    frame.lifecycle.playing = true;
    next.set(GameState::Running);
    info!("journey started");
}

/// Rewinds to a fresh frame and the intro card, with the scroll container at the top.
pub fn restart_journey(
    mut restarts: MessageReader<RestartJourney>,
    journey: Res<Journey>,
    mut frame: ResMut<JourneyFrame>,
    mut input: ResMut<ScrollInput>,
    mut next: ResMut<NextState<GameState>>,
) {
    if restarts.read().count() == 0 {
        return;
    }
    *frame = journey.initial_frame();
    input.pixels = 0.0;
    next.set(GameState::Intro);
    info!("journey restarted");
}

/// Runs one [`Journey::advance`] step and reports its transitions.
pub fn advance_journey(
    time: Res<Time>,
    input: Res<ScrollInput>,
    cfg: Res<JourneyConfig>,
    journey: Res<Journey>,
    mut frame: ResMut<JourneyFrame>,
    mut completed: MessageWriter<JourneyCompleted>,
) {
    let frame_input = FrameInput {
        raw_offset: input.fraction(cfg.scroll.pages),
        delta_secs: time.delta_secs(),
    };
    let (next, events) = journey.advance(*frame, frame_input);

    if events.first_scroll {
        info!("first scroll at {:.3}", frame_input.raw_offset);
    }
    if events.zone_changed {
        match next
            .scroll
            .active_zone
            .and_then(|i| journey.zones.zones().get(i))
        {
            Some(zone) => debug!("entered zone {:?}", zone.title),
            None => debug!("left zone"),
        }
    }
    if events.journey_completed {
        info!(
            "journey completed at offset {:.3}",
            next.scroll.smoothed_offset
        );
        completed.write(JourneyCompleted);
    }

    *frame = next;
}

/// Copies the frame onto the camera group, rail, and actor pivot.
pub fn apply_rig(
    frame: Res<JourneyFrame>,
    mut transforms: ParamSet<(
        Query<&mut Transform, With<CameraGroup>>,
        Query<&mut Transform, With<CameraRail>>,
        Query<&mut Transform, With<Actor>>,
    )>,
) {
    let mut groups = transforms.p0();
    if let Ok(mut tf) = groups.single_mut() {
        tf.translation = frame.camera.position;
        tf.rotation = frame.camera.rotation();
    }

    let mut rails = transforms.p1();
    if let Ok(mut tf) = rails.single_mut() {
        tf.translation = frame.scroll.rail_offset;
    }

    let mut actors = transforms.p2();
    if let Ok(mut tf) = actors.single_mut() {
        tf.rotation = frame.actor.rotation;
    }
}

/// Route polyline and zone reach, shown while inspecting.
pub fn draw_route_gizmos(mut gizmos: Gizmos, journey: Res<Journey>) {
    gizmos.linestrip(journey.path.sample(400), Color::srgb(1.0, 0.2, 0.8));
    for &point in journey.path.control_points() {
        gizmos.sphere(Isometry3d::from_translation(point), 2.0, Color::WHITE);
    }
    for zone in journey.zones.zones() {
        gizmos.sphere(
            Isometry3d::from_translation(zone.anchor),
            journey.zones.threshold(),
            Color::srgb(0.0, 0.8, 1.0),
        );
    }
}
