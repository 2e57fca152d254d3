use bevy::asset::RenderAssetUsages;
use bevy::mesh::Indices;
use bevy::prelude::*;
use bevy::render::render_resource::PrimitiveTopology;
use noise::NoiseFn;

use super::GliderConfig;
use super::entities::{Glider, GliderFlight, HoverNoise};
use crate::journey::{Actor, CameraRail, JourneyCompleted, RestartJourney, StartJourney};
use crate::math;

/// Attaches the glider body to the actor pivot spawned by the journey rig.
pub fn spawn_glider(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    cfg: Res<GliderConfig>,
    flight: Res<GliderFlight>,
    mut actors: Query<(Entity, &mut Transform), With<Actor>>,
) {
    let Ok((actor, mut pivot)) = actors.single_mut() else {
        warn!("no actor pivot to attach the glider to");
        return;
    };
    pivot.translation = flight.pose(&cfg).offset;

    let material = materials.add(StandardMaterial {
        base_color: cfg.color,
        perceptual_roughness: 0.8,
        cull_mode: None,
        double_sided: true,
        ..default()
    });

    commands.entity(actor).with_children(|parent| {
        parent.spawn((
            Name::new("Glider"),
            Glider,
            Mesh3d(meshes.add(glider_mesh(cfg.wingspan))),
            MeshMaterial3d(material),
            Transform::default(),
        ));
    });
}

/// Fly-in on play, fly-out on completion, back to parked on restart.
pub fn cue_clips(
    mut starts: MessageReader<StartJourney>,
    mut restarts: MessageReader<RestartJourney>,
    mut completions: MessageReader<JourneyCompleted>,
    mut flight: ResMut<GliderFlight>,
) {
    if restarts.read().count() > 0 {
        flight.park();
    }
    if starts.read().count() > 0 {
        flight.fly_in();
        debug!("glider flying in");
    }
    if completions.read().count() > 0 {
        flight.fly_out();
        debug!("glider flying out");
    }
}

/// Plays the clips on the actor pivot and rail, and hovers the body.
pub fn fly(
    time: Res<Time>,
    cfg: Res<GliderConfig>,
    noise: Res<HoverNoise>,
    mut flight: ResMut<GliderFlight>,
    mut transforms: ParamSet<(
        Query<&mut Transform, With<Actor>>,
        Query<&mut Transform, With<CameraRail>>,
        Query<&mut Transform, With<Glider>>,
    )>,
) {
    let pose = flight.tick(time.delta_secs(), &cfg);

    let mut actors = transforms.p0();
    if let Ok(mut tf) = actors.single_mut() {
        tf.translation = pose.offset;
    }

    let mut rails = transforms.p1();
    if let Ok(mut tf) = rails.single_mut() {
        tf.translation.y += pose.rail_lift;
    }

    let t = f64::from(time.elapsed_secs() * cfg.hover_speed);
    let sample = |lane: f64| noise.0.get([t, lane]);
    let bob = math::map_noise_to_range(sample(0.5), -0.1, 0.1) * cfg.hover_height;
    let wobble = 0.1 * cfg.hover_rotation;

    let mut bodies = transforms.p2();
    if let Ok(mut tf) = bodies.single_mut() {
        tf.translation = Vec3::Y * bob;
        tf.rotation = Quat::from_euler(
            EulerRot::XYZ,
            math::map_noise_to_range(sample(10.5), -wobble, wobble),
            math::map_noise_to_range(sample(20.5), -wobble, wobble),
            math::map_noise_to_range(sample(30.5), -wobble, wobble),
        );
    }
}

/// Flat-shaded paper glider pointing down `-Z`.
pub fn glider_mesh(wingspan: f32) -> Mesh {
    let half = wingspan / 2.0;
    let length = wingspan * 0.9;
    let nose = Vec3::new(0.0, 0.0, -length / 2.0);
    let tail = length / 2.0;
    let keel = Vec3::new(0.0, -wingspan * 0.12, tail);
    let spine = Vec3::new(0.0, 0.0, tail);
    let left = Vec3::new(-half, wingspan * 0.04, tail);
    let right = Vec3::new(half, wingspan * 0.04, tail);

    let faces = [
        [nose, left, spine],
        [nose, spine, right],
        [nose, spine, keel],
    ];

    let mut positions = Vec::with_capacity(faces.len() * 3);
    let mut normals = Vec::with_capacity(faces.len() * 3);
    for [a, b, c] in faces {
        let n = math::compute_normal(a, b, c);
        for v in [a, b, c] {
            positions.push(v.to_array());
            normals.push(n.to_array());
        }
    }
    let indices: Vec<u16> = (0..positions.len() as u16).collect();

    Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::RENDER_WORLD,
    )
    .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
    .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, normals)
    .with_inserted_indices(Indices::U16(indices))
}
