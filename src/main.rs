//! Sky journey viewer.

use bevy::app::AppExit;
use bevy::prelude::*;
use bevy_inspector_egui::quick::WorldInspectorPlugin;
#[cfg(feature = "native")]
use sky_journey::journey::{ScrollSettings, StartJourney};
use sky_journey::journey::{JourneyConfig, JourneyError, JourneyPlugin};
use sky_journey::{GameState, glider, overlay, scenery};

/// Command-line overrides.
#[cfg(feature = "native")]
#[derive(clap::Parser, Debug)]
#[command(version, about = "Scroll-driven flight through the sky")]
struct Cli {
    /// Height of the emulated scroll container, in screens.
    #[arg(long, default_value_t = 40.0)]
    pages: f32,
    /// Skip the intro card and start flying right away.
    #[arg(long)]
    autoplay: bool,
    /// Do not start the remote inspection endpoint.
    #[arg(long)]
    no_remote: bool,
}

fn main() -> Result<(), JourneyError> {
    #[cfg(feature = "native")]
    let cli = <Cli as clap::Parser>::parse();

    let config = JourneyConfig::default();
    #[cfg(feature = "native")]
    let config = JourneyConfig {
        scroll: ScrollSettings {
            pages: cli.pages,
            ..config.scroll
        },
        ..config
    };
    let journey = JourneyPlugin::new(config)?;

    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Sky Journey".into(),
            ..default()
        }),
        ..default()
    }))
    .register_type::<GameState>()
    .init_state::<GameState>()
    .add_plugins(bevy_egui::EguiPlugin::default())
    .add_plugins(journey)
    .add_plugins(glider::GliderPlugin(glider::GliderConfig::default()))
    .add_plugins(scenery::SceneryPlugin(scenery::SceneryConfig::default()))
    .add_plugins(overlay::OverlayPlugin(overlay::OverlayConfig::default()))
    .add_systems(Update, exit_on_esc)
    .add_systems(Update, toggle_inspector)
    .add_plugins(WorldInspectorPlugin::new().run_if(in_state(GameState::Debugging)));

    #[cfg(feature = "native")]
    {
        if !cli.no_remote {
            app.add_plugins(bevy::remote::RemotePlugin::default())
                .add_plugins(bevy::remote::http::RemoteHttpPlugin::default());
        }
        if cli.autoplay {
            app.add_systems(Startup, autoplay);
        }
    }

    app.run();
    Ok(())
}

#[cfg(feature = "native")]
fn autoplay(mut starts: MessageWriter<StartJourney>) {
    starts.write(StartJourney);
}

fn toggle_inspector(
    keys: Res<ButtonInput<KeyCode>>,
    state: Res<State<GameState>>,
    mut next: ResMut<NextState<GameState>>,
) {
    if keys.just_pressed(KeyCode::Tab) {
        let new_state = match state.get() {
            GameState::Running => GameState::Debugging,
            GameState::Debugging => GameState::Running,
            _ => return,
        };
        info!("switching to {new_state:?}");
        next.set(new_state);
    }
}

fn exit_on_esc(keys: Res<ButtonInput<KeyCode>>, mut exit: MessageWriter<AppExit>) {
    if keys.just_pressed(KeyCode::Escape) {
        exit.write(AppExit::Success);
    }
}
