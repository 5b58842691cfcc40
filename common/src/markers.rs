use bevy_ecs::prelude::*;

// Marker components to disambiguate entity archetypes in queries.
#[derive(Component, Debug, Default)]
pub struct PlayerMarker;

#[derive(Component, Debug, Default)]
pub struct BalloonMarker;

#[derive(Component, Debug, Default)]
pub struct ProjectileMarker;

// Terrain coins, hearts and katana pickups.
#[derive(Component, Debug, Default)]
pub struct PickupMarker;

#[derive(Component, Debug, Default)]
pub struct FlyingCoinMarker;
