use bevy::prelude::*;

/// Marker for the gradient sky sphere (child of the camera group).
#[derive(Component, Reflect)]
pub struct SkyDome;

/// Marker for the ribbon that traces the route.
#[derive(Component, Reflect)]
pub struct Trail;

/// Marker for a cloud root entity.
#[derive(Component, Reflect)]
pub struct Cloud;

/// Materials whose alpha follows the scene opacity.
#[derive(Resource, Default)]
pub struct FadeMaterials(pub(super) Vec<Handle<StandardMaterial>>);
