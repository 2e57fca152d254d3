//! Scroll-driven flight along a fixed route.
//!
//! The pure core (route curve, proximity zones, scroll smoothing, camera and
//! actor rigs, colour timeline) is composed by [`Journey::advance`], a pure
//! `frame -> frame` step. The plugin owns the ECS side: it turns mouse-wheel
//! input into a scroll fraction, advances one frame per `Update`, and copies
//! the result onto the camera group, rail, and actor entities.

mod actor_rig;
mod camera_rig;
mod entities;
mod error;
mod lifecycle;
mod path;
mod scroll;
mod systems;
mod timeline;
mod tuning;
mod zones;

pub use actor_rig::{ActorTransform, target_bank};
pub use camera_rig::{CameraTransform, look_direction};
pub use entities::{
    Actor, CameraGroup, CameraRail, FlightCamera, JourneyCompleted, RestartJourney, ScrollInput,
    StartJourney,
};
pub use error::JourneyError;
pub use lifecycle::{Lifecycle, SceneOpacity};
pub use path::PathCurve;
pub use scroll::{FrameInput, ScrollDrivenState};
pub use timeline::{Ease, GradientColors, NarrativeTimeline, TimelineSegment};
pub use tuning::RigTuning;
pub use zones::{Proximity, ProximityZone, ProximityZoneSet};

use bevy::prelude::*;

use crate::GameState;

/// Spacing between consecutive route control points along `-Z`.
const CURVE_DISTANCE: f32 = 250.0;

/// Nested configuration for the journey.
#[derive(Resource, Clone, Debug, Reflect)]
pub struct JourneyConfig {
    /// Route control points.
    pub route: Vec<Vec3>,
    /// Text sections and their reach.
    pub zones: ZoneSettings,
    /// Background colour keyframes.
    pub palette: PaletteSettings,
    /// Rig smoothing and banking constants.
    pub rig: RigTuning,
    /// Scroll container emulation.
    pub scroll: ScrollSettings,
    /// Camera lens and placement inside the rail.
    pub camera: CameraSettings,
}

/// Proximity zones along the route.
#[derive(Clone, Debug, Reflect)]
pub struct ZoneSettings {
    /// Distance at which a zone starts slowing the journey down.
    pub threshold: f32,
    /// The text sections.
    pub sections: Vec<ProximityZone>,
}

/// Background gradient keyframes.
#[derive(Clone, Debug, Reflect)]
pub struct PaletteSettings {
    /// Colours at the start of the route.
    pub start: GradientColors,
    /// Segments spread evenly over the route.
    pub segments: Vec<TimelineSegment>,
}

/// Emulated scroll container.
#[derive(Clone, Debug, Reflect)]
pub struct ScrollSettings {
    /// Height of the scrollable content in screens.
    pub pages: f32,
    /// Pixels per mouse-wheel line.
    pub line_height: f32,
    /// Fraction of a screen scrolled by arrow keys (page keys scroll a full screen).
    pub arrow_step: f32,
}

/// Camera lens and offset.
#[derive(Clone, Debug, Reflect)]
pub struct CameraSettings {
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    /// Distance of the camera behind the rail origin.
    pub follow_distance: f32,
    /// Bloom post-processing intensity.
    pub bloom_intensity: f32,
}

impl Default for JourneyConfig {
    fn default() -> Self {
        let route: Vec<Vec3> = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, -CURVE_DISTANCE),
            Vec3::new(100.0, 0.0, -2.0 * CURVE_DISTANCE),
            Vec3::new(-100.0, 0.0, -3.0 * CURVE_DISTANCE),
            Vec3::new(100.0, 0.0, -4.0 * CURVE_DISTANCE),
            Vec3::new(0.0, 0.0, -5.0 * CURVE_DISTANCE),
            Vec3::new(0.0, 0.0, -6.0 * CURVE_DISTANCE),
            Vec3::new(0.0, 0.0, -7.0 * CURVE_DISTANCE),
        ];
        let section = |point: usize, offset: Vec3, rail_bias: f32, title: &str, subtitle: &str| {
            ProximityZone {
                anchor: route[point] + offset,
                rail_bias,
                title: title.into(),
                subtitle: subtitle.into(),
            }
        };
        let sections = vec![
            section(
                1,
                Vec3::new(-3.0, 0.0, 0.0),
                -1.0,
                "Welcome aboard!",
                "Settle in, relax and enjoy the flight",
            ),
            section(
                2,
                Vec3::new(2.0, 0.0, 0.0),
                1.5,
                "Scroll to fly",
                "Glide through the sky\nat the pace of your own scrolling",
            ),
            section(
                3,
                Vec3::new(-3.0, 0.0, 0.0),
                -1.0,
                "Take the controls",
                "Slow down near each waypoint\nand look around before moving on",
            ),
            section(
                4,
                Vec3::new(3.5, 0.0, -12.0),
                1.5,
                "Any screen, any speed",
                "The flight adapts to your frame rate,\nso every device gets the same smooth ride",
            ),
            section(
                5,
                Vec3::new(-5.5, 0.0, -10.0),
                -1.0,
                "Skybound",
                "Where every scroll takes you higher",
            ),
        ];

        Self {
            route,
            zones: ZoneSettings {
                threshold: 42.0,
                sections,
            },
            palette: PaletteSettings {
                start: GradientColors::from_rgb(0x3535cc, 0xabaadd),
                segments: vec![
                    TimelineSegment::to(GradientColors::from_rgb(0x6f35cc, 0xffad30)),
                    TimelineSegment::to(GradientColors::from_rgb(0x424242, 0xffcc00)),
                    TimelineSegment::to(GradientColors::from_rgb(0x81318b, 0x55ab8f)),
                ],
            },
            rig: RigTuning::default(),
            scroll: ScrollSettings {
                pages: 40.0,
                line_height: 40.0,
                arrow_step: 0.1,
            },
            camera: CameraSettings {
                fov_degrees: 30.0,
                follow_distance: 5.0,
                bloom_intensity: 0.15,
            },
        }
    }
}

/// The immutable pieces of the experience: route, zones, timeline, tuning.
#[derive(Resource, Clone, Debug, Reflect)]
pub struct Journey {
    /// Route followed by the camera group.
    pub path: PathCurve,
    /// Text sections that slow the camera down.
    pub zones: ProximityZoneSet,
    /// Background colours keyed to progress.
    pub timeline: NarrativeTimeline,
    /// Rig constants.
    pub tuning: RigTuning,
}

/// Everything that changes from one frame to the next.
#[derive(Resource, Clone, Copy, Debug, PartialEq, Reflect)]
pub struct JourneyFrame {
    /// Smoothed scroll progress and camera rail.
    pub scroll: ScrollDrivenState,
    /// Camera group placement.
    pub camera: CameraTransform,
    /// Actor banking.
    pub actor: ActorTransform,
    /// Current background gradient.
    pub colors: GradientColors,
    /// Scene-wide fade.
    pub opacity: SceneOpacity,
    /// Narrative flags.
    pub lifecycle: Lifecycle,
}

/// Transitions that happened during one [`Journey::advance`] step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameEvents {
    /// The user scrolled for the first time.
    pub first_scroll: bool,
    /// The camera reached the end of the route on this frame.
    pub journey_completed: bool,
    /// A different zone (or none) became the active one.
    pub zone_changed: bool,
}

impl Journey {
    /// Validates `cfg` and builds the immutable journey data.
    pub fn from_config(cfg: &JourneyConfig) -> Result<Self, JourneyError> {
        Ok(Self {
            path: PathCurve::new(cfg.route.clone())?,
            zones: ProximityZoneSet::new(cfg.zones.sections.clone(), cfg.zones.threshold)?,
            timeline: NarrativeTimeline::new(cfg.palette.start, cfg.palette.segments.clone())?,
            tuning: cfg.rig.clone(),
        })
    }

    /// Frame state before anything happened: at the start of the route,
    /// invisible, not playing.
    pub fn initial_frame(&self) -> JourneyFrame {
        JourneyFrame {
            scroll: ScrollDrivenState::default(),
            camera: CameraTransform::at_start(&self.path, &self.tuning),
            actor: ActorTransform::default(),
            colors: self.timeline.start(),
            opacity: SceneOpacity(0.0),
            lifecycle: Lifecycle::default(),
        }
    }

    /// Advances the whole experience by one frame.
    ///
    /// Order: lifecycle latches and opacity, then the scroll state, then the
    /// timeline scrub and both rigs (which only read the fresh scroll state),
    /// and finally end-of-route detection.
    pub fn advance(&self, frame: JourneyFrame, input: FrameInput) -> (JourneyFrame, FrameEvents) {
        let dt = input.delta_secs;
        let mut lifecycle = frame.lifecycle;
        let mut events = FrameEvents {
            first_scroll: lifecycle.observe_scroll(frame.scroll.raw_offset, input.raw_offset),
            ..default()
        };
        let opacity = frame.opacity.update(
            &lifecycle,
            self.tuning.fade_in_rate,
            self.tuning.fade_out_rate,
            dt,
        );
        let scroll = frame
            .scroll
            .update(&input, &lifecycle, &self.zones, frame.camera.position);

        if !lifecycle.in_motion() {
            let next = JourneyFrame {
                scroll,
                opacity,
                lifecycle,
                ..frame
            };
            return (next, events);
        }

        let offset = scroll.smoothed_offset;
        let colors = self.timeline.scrub(offset);
        let camera = frame.camera.update(&self.path, offset, &self.tuning, dt);
        let actor = frame.actor.update(&self.path, offset, &self.tuning, dt);

        events.zone_changed = scroll.active_zone != frame.scroll.active_zone;
        if camera.reached_end(&self.path, self.tuning.end_margin) {
            events.journey_completed = lifecycle.end();
        }

        let next = JourneyFrame {
            scroll,
            camera,
            actor,
            colors,
            opacity,
            lifecycle,
        };
        (next, events)
    }
}

/// Ordering of the per-frame journey systems.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum JourneySet {
    /// Scroll input and lifecycle messages.
    Input,
    /// The single [`Journey::advance`] step.
    Advance,
    /// Copy the frame onto entities.
    Apply,
}

/// Scroll-driven camera flight: input, per-frame advance, transform sync.
pub struct JourneyPlugin {
    config: JourneyConfig,
    journey: Journey,
}

impl JourneyPlugin {
    /// Validates the configuration up front so a bad route fails before the
    /// window opens.
    pub fn new(config: JourneyConfig) -> Result<Self, JourneyError> {
        let journey = Journey::from_config(&config)?;
        Ok(Self { config, journey })
    }
}

impl Plugin for JourneyPlugin {
    fn build(&self, app: &mut App) {
        let frame = self.journey.initial_frame();
        app.register_type::<JourneyConfig>()
            .register_type::<Journey>()
            .register_type::<JourneyFrame>()
            .register_type::<CameraGroup>()
            .register_type::<CameraRail>()
            .register_type::<Actor>()
            .insert_resource(self.config.clone())
            .insert_resource(self.journey.clone())
            .insert_resource(frame)
            .init_resource::<ScrollInput>()
            .add_message::<StartJourney>()
            .add_message::<JourneyCompleted>()
            .add_message::<RestartJourney>()
            .configure_sets(
                Update,
                (JourneySet::Input, JourneySet::Advance, JourneySet::Apply).chain(),
            )
            .add_systems(Startup, systems::spawn_rig)
            .add_systems(
                Update,
                (
                    systems::read_scroll_input.run_if(not(in_state(GameState::Debugging))),
                    systems::start_on_key.run_if(in_state(GameState::Intro)),
                    systems::start_journey,
                    systems::restart_journey,
                )
                    .in_set(JourneySet::Input),
            )
            .add_systems(
                Update,
                systems::advance_journey
                    .in_set(JourneySet::Advance)
                    .run_if(not(in_state(GameState::Debugging))),
            )
            .add_systems(Update, systems::apply_rig.in_set(JourneySet::Apply))
            .add_systems(
                Update,
                systems::draw_route_gizmos.run_if(in_state(GameState::Debugging)),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_journey() -> Journey {
        let cfg = JourneyConfig {
            route: vec![
                Vec3::ZERO,
                Vec3::new(0.0, 0.0, -250.0),
                Vec3::new(100.0, 0.0, -500.0),
            ],
            zones: ZoneSettings {
                threshold: 42.0,
                sections: vec![],
            },
            ..default()
        };
        Journey::from_config(&cfg).unwrap()
    }

    fn playing(journey: &Journey) -> JourneyFrame {
        let mut frame = journey.initial_frame();
        frame.lifecycle.playing = true;
        frame
    }

    fn input(raw_offset: f32) -> FrameInput {
        FrameInput {
            raw_offset,
            delta_secs: 1.0 / 60.0,
        }
    }

    // ── configuration ───────────────────────────────────────────────

    #[test]
    fn default_config_is_valid() {
        let journey = Journey::from_config(&JourneyConfig::default()).unwrap();
        assert_eq!(journey.path.control_points().len(), 8);
        assert_eq!(journey.zones.zones().len(), 5);
        assert_eq!(journey.timeline.total_duration(), 3.0);
    }

    #[test]
    fn degenerate_config_fails_fast() {
        let cfg = JourneyConfig {
            route: vec![Vec3::ZERO],
            ..default()
        };
        assert_eq!(
            Journey::from_config(&cfg).unwrap_err(),
            JourneyError::TooFewControlPoints { count: 1 }
        );

        let mut cfg = JourneyConfig::default();
        cfg.zones.threshold = 0.0;
        assert_eq!(
            Journey::from_config(&cfg).unwrap_err(),
            JourneyError::InvalidThreshold(0.0)
        );
    }

    #[test]
    fn default_zones_sit_near_the_route() {
        let journey = Journey::from_config(&JourneyConfig::default()).unwrap();
        for zone in journey.zones.zones() {
            let nearest = (0..=1000)
                .map(|i| journey.path.point_at(i as f32 / 1000.0).distance(zone.anchor))
                .fold(f32::INFINITY, f32::min);
            assert!(nearest < journey.zones.threshold());
        }
    }

    // ── scenarios ───────────────────────────────────────────────────

    #[test]
    fn held_scroll_converges_to_route_point() {
        let journey = scenario_journey();
        let mut frame = playing(&journey);
        for _ in 0..3600 {
            frame = journey.advance(frame, input(0.5)).0;
        }
        assert!((frame.scroll.smoothed_offset - 0.5).abs() < 1e-4);
        assert!((frame.camera.position - journey.path.point_at(0.5)).length() < 0.1);
        assert!(!frame.lifecycle.journey_ended);
    }

    #[test]
    fn nothing_moves_until_play() {
        let journey = scenario_journey();
        let start = journey.initial_frame();
        let mut frame = start;
        for _ in 0..100 {
            frame = journey.advance(frame, input(0.5)).0;
        }
        assert_eq!(frame.camera, start.camera);
        assert_eq!(frame.scroll.smoothed_offset, 0.0);
        assert_eq!(frame.opacity.0, 0.0);
        assert!(frame.lifecycle.has_scrolled);
    }

    #[test]
    fn first_scroll_is_reported_once() {
        let journey = scenario_journey();
        let frame = playing(&journey);
        let (frame, events) = journey.advance(frame, input(0.0));
        assert!(!events.first_scroll);
        let (frame, events) = journey.advance(frame, input(0.1));
        assert!(events.first_scroll);
        assert!(frame.lifecycle.has_scrolled);
        let (_, events) = journey.advance(frame, input(0.2));
        assert!(!events.first_scroll);
    }

    #[test]
    fn reaching_the_end_latches_and_freezes() {
        let journey = scenario_journey();
        let mut frame = playing(&journey);
        let mut completions = 0;
        for _ in 0..6000 {
            let (next, events) = journey.advance(frame, input(1.0));
            completions += usize::from(events.journey_completed);
            frame = next;
            if frame.lifecycle.journey_ended {
                break;
            }
        }
        assert!(frame.lifecycle.journey_ended);
        assert_eq!(completions, 1);

        let frozen = frame;
        for i in 0..500 {
            let raw = if i % 2 == 0 { 0.0 } else { 1.0 };
            let (next, events) = journey.advance(frame, input(raw));
            assert!(!events.journey_completed);
            frame = next;
            assert!(frame.lifecycle.journey_ended);
            assert_eq!(frame.scroll.smoothed_offset, frozen.scroll.smoothed_offset);
            assert_eq!(frame.scroll.rail_offset, frozen.scroll.rail_offset);
            assert_eq!(frame.camera, frozen.camera);
        }
        assert!(frame.opacity.0 < frozen.opacity.0);
    }

    #[test]
    fn colours_follow_smoothed_offset_both_ways() {
        let journey = scenario_journey();
        let mut frame = playing(&journey);
        for _ in 0..3000 {
            frame = journey.advance(frame, input(0.6)).0;
        }
        assert_eq!(frame.colors, journey.timeline.scrub(frame.scroll.smoothed_offset));
        for _ in 0..3000 {
            frame = journey.advance(frame, input(0.1)).0;
        }
        assert!((frame.scroll.smoothed_offset - 0.1).abs() < 1e-3);
        assert_eq!(frame.colors, journey.timeline.scrub(frame.scroll.smoothed_offset));
    }

    #[test]
    fn zone_entry_is_reported() {
        let cfg = JourneyConfig {
            route: vec![Vec3::ZERO, Vec3::new(0.0, 0.0, -500.0)],
            zones: ZoneSettings {
                threshold: 42.0,
                sections: vec![ProximityZone {
                    anchor: Vec3::new(0.0, 0.0, -250.0),
                    rail_bias: 1.5,
                    title: "Midway".into(),
                    subtitle: String::new(),
                }],
            },
            ..default()
        };
        let journey = Journey::from_config(&cfg).unwrap();
        let mut frame = playing(&journey);
        let mut entered = false;
        for _ in 0..3000 {
            let (next, events) = journey.advance(frame, input(0.5));
            if events.zone_changed && next.scroll.active_zone == Some(0) {
                entered = true;
            }
            frame = next;
        }
        assert!(entered);
        assert!(frame.scroll.friction < 1.0);
        assert!(frame.scroll.rail_offset.x > 0.0);
    }
}
