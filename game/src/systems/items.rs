use bevy_ecs::prelude::*;
use bevy_math::Vec2;
use bevy_time::Time;
use rand::rngs::StdRng;
use tracing::{debug, info};

use crate::{
    components::{FlyingCoin, Pickup},
    constants::{COIN_COLOR, COIN_SCALE, HEART_COLOR, KATANA_COLOR, PICKUP_SCALE},
    messages::{ParticleKind, RenderCommand, VisualKind},
    resources::{GameRng, GameSession},
};
use common::{
    collision::overlap_player_vs_pickup,
    config::{GameConfig, PickupTuning},
    markers::*,
    players::PlayerState,
    spawning::random_ground_position,
    types::{PickupKind, Position, WeaponType},
};

// ============================================================================
// Pickup Spawning
// ============================================================================

const fn pickup_visual(kind: PickupKind) -> (VisualKind, [f32; 4], f32) {
    match kind {
        PickupKind::Coin => (VisualKind::Coin, COIN_COLOR, COIN_SCALE),
        PickupKind::Heart => (VisualKind::Heart, HEART_COLOR, PICKUP_SCALE),
        PickupKind::Katana => (VisualKind::KatanaPickup, KATANA_COLOR, PICKUP_SCALE),
    }
}

// Extent of the square a pickup kind is scattered over.
const fn pickup_extent(kind: PickupKind, tuning: &PickupTuning) -> f32 {
    match kind {
        PickupKind::Coin => tuning.coin_extent,
        PickupKind::Heart | PickupKind::Katana => tuning.extent,
    }
}

const fn pickup_radius(kind: PickupKind, tuning: &PickupTuning) -> f32 {
    match kind {
        PickupKind::Coin => tuning.coin_radius,
        PickupKind::Heart => tuning.heart_radius,
        PickupKind::Katana => tuning.katana_radius,
    }
}

// Places one pickup of `kind` at a random ground point away from `avoid`.
pub fn spawn_pickup(
    commands: &mut Commands,
    render: &mut MessageWriter<RenderCommand>,
    rng: &mut StdRng,
    kind: PickupKind,
    tuning: &PickupTuning,
    avoid: Vec2,
) -> Entity {
    let planar = random_ground_position(rng, pickup_extent(kind, tuning), avoid, tuning.spawn_clearance);
    let position = Position::new(planar.x, tuning.height, planar.y);
    let entity = commands
        .spawn((
            PickupMarker,
            Pickup {
                kind,
                radius: pickup_radius(kind, tuning),
            },
            position,
        ))
        .id();

    let (visual, color, scale) = pickup_visual(kind);
    render.write(RenderCommand::SpawnVisual {
        entity,
        kind: visual,
        position: position.0,
        color,
        scale,
    });
    entity
}

pub fn spawn_round_pickups(
    commands: &mut Commands,
    render: &mut MessageWriter<RenderCommand>,
    rng: &mut StdRng,
    tuning: &PickupTuning,
    avoid: Vec2,
) {
    let batches = [
        (PickupKind::Coin, tuning.coin_count),
        (PickupKind::Heart, tuning.heart_count),
        (PickupKind::Katana, tuning.katana_count),
    ];
    for (kind, count) in batches {
        for _ in 0..count {
            spawn_pickup(commands, render, rng, kind, tuning, avoid);
        }
    }
    debug!(
        "spawned {} coins, {} hearts, {} katanas",
        tuning.coin_count, tuning.heart_count, tuning.katana_count
    );
}

// ============================================================================
// Pickup Collection
// ============================================================================

// Coins and hearts respawn elsewhere once collected. A heart touched at full
// health stays where it is. A katana pickup is single use.
pub fn pickup_collection_system(
    mut commands: Commands,
    config: Res<GameConfig>,
    mut rng: ResMut<GameRng>,
    mut session: ResMut<GameSession>,
    pickups: Query<(Entity, &Pickup, &Position), (With<PickupMarker>, Without<PlayerMarker>)>,
    mut players: Query<(&Position, &mut PlayerState), With<PlayerMarker>>,
    mut render: MessageWriter<RenderCommand>,
) {
    let Ok((player_pos, mut player)) = players.single_mut() else {
        return;
    };
    let tuning = &config.pickups;

    let touched: Vec<(Entity, PickupKind, Position)> = pickups
        .iter()
        .filter(|(_, pickup, position)| overlap_player_vs_pickup(player_pos, position, pickup.radius))
        .map(|(entity, pickup, position)| (entity, pickup.kind, *position))
        .collect();

    for (entity, kind, position) in touched {
        let collected = match kind {
            PickupKind::Coin => {
                session.coins += tuning.coin_value;
                session.stats.coins_collected += tuning.coin_value;
                render.write(RenderCommand::Particle {
                    kind: ParticleKind::CoinSparkle,
                    position: position.0,
                    color: COIN_COLOR,
                });
                debug!("coin collected, {} coins", session.coins);
                true
            }
            PickupKind::Heart => {
                let healed = player.heal(1);
                if healed {
                    render.write(RenderCommand::Particle {
                        kind: ParticleKind::HeartSparkle,
                        position: position.0,
                        color: HEART_COLOR,
                    });
                    info!("heart collected, health {}/{}", player.health, player.max_health);
                }
                healed
            }
            PickupKind::Katana => {
                if session.loadout.current() == WeaponType::Katana {
                    false
                } else {
                    session.loadout.unlock(WeaponType::Katana);
                    session.loadout.equip(WeaponType::Katana);
                    render.write(RenderCommand::EquipWeapon(WeaponType::Katana));
                    render.write(RenderCommand::Particle {
                        kind: ParticleKind::UpgradeSparkle,
                        position: position.0,
                        color: KATANA_COLOR,
                    });
                    info!("katana picked up");
                    true
                }
            }
        };
        if !collected {
            continue;
        }

        render.write(RenderCommand::DestroyVisual { entity });
        commands.entity(entity).despawn();
        if kind != PickupKind::Katana {
            spawn_pickup(&mut commands, &mut render, &mut rng.0, kind, tuning, player_pos.planar());
        }
    }
}

// ============================================================================
// Flying Coins
// ============================================================================

pub fn flying_coin_system(
    mut commands: Commands,
    time: Res<Time>,
    config: Res<GameConfig>,
    mut session: ResMut<GameSession>,
    mut coins: Query<(Entity, &mut FlyingCoin, &mut Position), With<FlyingCoinMarker>>,
    mut render: MessageWriter<RenderCommand>,
) {
    let delta = time.delta_secs();
    let value = config.pickups.flying_coin_value;

    for (entity, mut coin, mut position) in &mut coins {
        let (next, arrived) = coin.advance(delta);
        position.0 = next;
        if !arrived {
            continue;
        }

        session.coins += value;
        session.stats.coins_collected += value;
        render.write(RenderCommand::Particle {
            kind: ParticleKind::CoinSparkle,
            position: next,
            color: COIN_COLOR,
        });
        render.write(RenderCommand::DestroyVisual { entity });
        commands.entity(entity).despawn();
    }
}
