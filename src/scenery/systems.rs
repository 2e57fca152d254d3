use bevy::asset::RenderAssetUsages;
use bevy::mesh::{Indices, VertexAttributeValues};
use bevy::prelude::*;
use bevy::render::render_resource::{Face, PrimitiveTopology};
use noise::{NoiseFn, Perlin};

use super::SceneryConfig;
use super::entities::{Cloud, FadeMaterials, SkyDome, Trail};
use crate::journey::{CameraGroup, GradientColors, Journey, JourneyFrame, PathCurve};
use crate::math;

pub fn spawn_light(mut commands: Commands, cfg: Res<SceneryConfig>) {
    commands.spawn((
        Name::new("Sun"),
        DirectionalLight {
            illuminance: cfg.light_illuminance,
            ..default()
        },
        Transform::from_translation(cfg.light_position).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

/// Spawns the ribbon that traces the route a little below the camera.
pub fn spawn_trail(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut fades: ResMut<FadeMaterials>,
    cfg: Res<SceneryConfig>,
    journey: Res<Journey>,
) {
    let material = materials.add(StandardMaterial {
        base_color: Color::WHITE.with_alpha(0.0),
        alpha_mode: AlphaMode::Blend,
        cull_mode: None,
        ..default()
    });
    fades.0.push(material.clone());

    commands.spawn((
        Name::new("Trail"),
        Trail,
        Mesh3d(meshes.add(trail_mesh(
            &journey.path,
            cfg.trail_samples,
            cfg.trail_half_width,
        ))),
        MeshMaterial3d(material),
        Transform::from_xyz(0.0, -cfg.trail_drop, 0.0),
    ));
}

/// Spawns puffy clouds at their placements along the route.
pub fn spawn_clouds(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut fades: ResMut<FadeMaterials>,
    cfg: Res<SceneryConfig>,
    journey: Res<Journey>,
) {
    let puff_mesh = meshes.add(Sphere::new(1.0).mesh().uv(16, 12));
    let material = materials.add(StandardMaterial {
        base_color: Color::WHITE.with_alpha(0.0),
        alpha_mode: AlphaMode::Blend,
        perceptual_roughness: 1.0,
        ..default()
    });
    fades.0.push(material.clone());

    let perlin = Perlin::new(cfg.cloud_seed);
    let points = journey.path.control_points();
    for (index, placement) in cfg.clouds.iter().enumerate() {
        let base = match placement.anchor {
            None => Vec3::ZERO,
            Some(i) => match points.get(i) {
                Some(&p) => p,
                None => {
                    warn!("cloud {index} anchored to missing route point {i}");
                    continue;
                }
            },
        };
        let rotation = Quat::from_euler(
            EulerRot::XYZ,
            placement.rotation.x,
            placement.rotation.y,
            placement.rotation.z,
        );

        commands
            .spawn((
                Name::new(format!("Cloud {index}")),
                Cloud,
                Transform::from_translation(base + placement.offset)
                    .with_rotation(rotation)
                    .with_scale(Vec3::splat(placement.scale)),
                Visibility::default(),
            ))
            .with_children(|parent| {
                for (offset, radius) in cloud_puffs(&perlin, index, cfg.cloud_puffs) {
                    parent.spawn((
                        Mesh3d(puff_mesh.clone()),
                        MeshMaterial3d(material.clone()),
                        Transform::from_translation(offset).with_scale(Vec3::splat(radius)),
                    ));
                }
            });
    }
    info!("spawned {} clouds", cfg.clouds.len());
}

/// Spawns the sky sphere inside the camera group so it never gets closer.
pub fn spawn_sky(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    cfg: Res<SceneryConfig>,
    frame: Res<JourneyFrame>,
    groups: Query<Entity, With<CameraGroup>>,
) {
    let Ok(group) = groups.single() else {
        warn!("no camera group to attach the sky to");
        return;
    };

    let mut mesh = Sphere::new(1.0)
        .mesh()
        .uv(cfg.sky_resolution.x, cfg.sky_resolution.y);
    paint_gradient(&mut mesh, &frame.colors);

    let material = materials.add(StandardMaterial {
        base_color: Color::WHITE,
        unlit: true,
        cull_mode: Some(Face::Front),
        fog_enabled: false,
        ..default()
    });

    commands.entity(group).with_children(|parent| {
        parent.spawn((
            Name::new("Sky"),
            SkyDome,
            Mesh3d(meshes.add(mesh)),
            MeshMaterial3d(material),
            Transform::from_scale(Vec3::splat(cfg.sky_radius)),
        ));
    });
}

/// Repaints the sky whenever the timeline colours move.
pub fn paint_sky(
    frame: Res<JourneyFrame>,
    sky: Query<&Mesh3d, With<SkyDome>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut painted: Local<Option<GradientColors>>,
) {
    if *painted == Some(frame.colors) {
        return;
    }
    let Ok(handle) = sky.single() else {
        return;
    };
    if let Some(mesh) = meshes.get_mut(&handle.0) {
        paint_gradient(mesh, &frame.colors);
        *painted = Some(frame.colors);
    }
}

/// Trail and cloud alpha follow the scene opacity.
pub fn fade_scenery(
    frame: Res<JourneyFrame>,
    fades: Res<FadeMaterials>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut applied: Local<Option<f32>>,
) {
    let alpha = frame.opacity.0;
    if *applied == Some(alpha) {
        return;
    }
    for handle in &fades.0 {
        if let Some(mat) = materials.get_mut(handle) {
            mat.base_color.set_alpha(alpha);
        }
    }
    *applied = Some(alpha);
}

// ── Mesh builders ──────────────────────────────────────────────────

/// Writes a vertical gradient into the vertex colours: `color_a` at the top,
/// `color_b` at the bottom.
fn paint_gradient(mesh: &mut Mesh, colors: &GradientColors) {
    let Some(VertexAttributeValues::Float32x3(positions)) = mesh.attribute(Mesh::ATTRIBUTE_POSITION)
    else {
        return;
    };
    let painted: Vec<[f32; 4]> = positions
        .iter()
        .map(|p| {
            let c = gradient_at(colors, p[1]);
            [c.red, c.green, c.blue, c.alpha]
        })
        .collect();
    mesh.insert_attribute(Mesh::ATTRIBUTE_COLOR, painted);
}

/// Linear gradient colour at height `y` on a unit sphere.
fn gradient_at(colors: &GradientColors, y: f32) -> LinearRgba {
    let t = ((y + 1.0) / 2.0).clamp(0.0, 1.0);
    let (bottom, top) = (LinearRgba::from(colors.color_b), LinearRgba::from(colors.color_a));
    LinearRgba::new(
        bottom.red + (top.red - bottom.red) * t,
        bottom.green + (top.green - bottom.green) * t,
        bottom.blue + (top.blue - bottom.blue) * t,
        bottom.alpha + (top.alpha - bottom.alpha) * t,
    )
}

/// Flat ribbon of width `2 * half_width` lying along the route.
fn trail_mesh(path: &PathCurve, samples: usize, half_width: f32) -> Mesh {
    let samples = samples.max(1);
    let mut positions = Vec::with_capacity((samples + 1) * 2);
    let mut normals = Vec::with_capacity((samples + 1) * 2);
    let mut uvs = Vec::with_capacity((samples + 1) * 2);

    for (i, center) in path.sample(samples).into_iter().enumerate() {
        let t = i as f32 / samples as f32;
        let side = path
            .tangent_at(t)
            .cross(Vec3::Y)
            .try_normalize()
            .unwrap_or(Vec3::X)
            * half_width;
        let (left, right) = (center - side, center + side);
        let up = math::compute_normal(left, right, center + path.tangent_at(t));
        for v in [left, right] {
            positions.push(v.to_array());
            normals.push(if up.y < 0.0 { -up } else { up }.to_array());
        }
        uvs.push([0.0, t]);
        uvs.push([1.0, t]);
    }

    let mut indices = Vec::with_capacity(samples * 6);
    for i in 0..samples as u32 {
        let (a, b, c, d) = (2 * i, 2 * i + 1, 2 * i + 2, 2 * i + 3);
        indices.extend_from_slice(&[a, c, b, b, c, d]);
    }

    Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::RENDER_WORLD,
    )
    .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
    .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, normals)
    .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, uvs)
    .with_inserted_indices(Indices::U32(indices))
}

/// Offsets and radii of the spheres making up cloud `index`, in cloud space.
fn cloud_puffs(perlin: &Perlin, index: usize, count: usize) -> Vec<(Vec3, f32)> {
    let lane = index as f64 * 3.7;
    let centre = (count.max(1) - 1) as f32 / 2.0;
    (0..count)
        .map(|i| {
            let s = i as f64 * 0.61 + 0.5;
            let jitter = |axis: f64| perlin.get([s, lane + axis]);
            let offset = Vec3::new(
                (i as f32 - centre) * 0.6
                    + math::map_noise_to_range(jitter(0.1), -0.15, 0.15).clamp(-0.15, 0.15),
                math::map_noise_to_range(jitter(1.3), -0.2, 0.3),
                math::map_noise_to_range(jitter(2.9), -0.3, 0.3),
            );
            let radius = math::map_noise_to_range(jitter(4.1), 0.5, 0.9).clamp(0.5, 0.9);
            (offset, radius)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route() -> PathCurve {
        PathCurve::new(vec![
            Vec3::ZERO,
            Vec3::new(0.0, 0.0, -250.0),
            Vec3::new(100.0, 0.0, -500.0),
        ])
        .unwrap()
    }

    // ── trail_mesh ──────────────────────────────────────────────────

    #[test]
    fn trail_has_two_vertices_per_sample() {
        let mesh = trail_mesh(&route(), 100, 0.08);
        assert_eq!(mesh.count_vertices(), 202);
        assert_eq!(mesh.indices().map(|i| i.len()), Some(600));
    }

    #[test]
    fn trail_straddles_the_route_at_constant_width() {
        let path = route();
        let mesh = trail_mesh(&path, 50, 0.08);
        let Some(VertexAttributeValues::Float32x3(positions)) =
            mesh.attribute(Mesh::ATTRIBUTE_POSITION)
        else {
            panic!("missing positions");
        };
        for (i, pair) in positions.chunks(2).enumerate() {
            let left = Vec3::from_array(pair[0]);
            let right = Vec3::from_array(pair[1]);
            assert!((left.distance(right) - 0.16).abs() < 1e-4);
            let mid = (left + right) / 2.0;
            assert!(mid.distance(path.point_at(i as f32 / 50.0)) < 1e-3);
        }
    }

    #[test]
    fn trail_faces_up() {
        let mesh = trail_mesh(&route(), 20, 0.08);
        let Some(VertexAttributeValues::Float32x3(normals)) =
            mesh.attribute(Mesh::ATTRIBUTE_NORMAL)
        else {
            panic!("missing normals");
        };
        assert!(normals.iter().all(|n| n[1] > 0.99));
    }

    // ── gradient ────────────────────────────────────────────────────

    #[test]
    fn gradient_runs_from_bottom_to_top() {
        let colors = GradientColors::from_rgb(0xff0000, 0x0000ff);
        let top = gradient_at(&colors, 1.0);
        let bottom = gradient_at(&colors, -1.0);
        assert!((top.red - 1.0).abs() < 1e-5 && top.blue.abs() < 1e-5);
        assert!((bottom.blue - 1.0).abs() < 1e-5 && bottom.red.abs() < 1e-5);
    }

    #[test]
    fn paint_gradient_colours_every_vertex() {
        let mut mesh = Sphere::new(1.0).mesh().uv(8, 6);
        paint_gradient(&mut mesh, &GradientColors::from_rgb(0x3535cc, 0xabaadd));
        let Some(VertexAttributeValues::Float32x4(colors)) = mesh.attribute(Mesh::ATTRIBUTE_COLOR)
        else {
            panic!("missing colours");
        };
        assert_eq!(colors.len(), mesh.count_vertices());
    }

    // ── cloud_puffs ─────────────────────────────────────────────────

    #[test]
    fn cloud_puffs_are_deterministic_and_bounded() {
        let perlin = Perlin::new(42);
        let a = cloud_puffs(&perlin, 3, 5);
        let b = cloud_puffs(&perlin, 3, 5);
        assert_eq!(a, b);
        assert_eq!(a.len(), 5);
        for (offset, radius) in a {
            assert!((0.5..=0.9).contains(&radius));
            assert!(offset.x.abs() <= 1.2 + 0.15 + 1e-5);
        }
    }
}
