use bevy_ecs::prelude::*;
use bevy_time::Time;

use crate::systems::balloons::BalloonPopper;
use common::{
    balloons::Balloon,
    collision::{projectile_beyond_range, projectile_hits_balloon},
    config::GameConfig,
    markers::*,
    types::Position,
    weapons::Projectile,
};

// ============================================================================
// Projectile Flight
// ============================================================================

// Moves darts, resolves the first balloon each one touches and drops darts
// that strayed too far from the player.
pub fn projectiles_movement_system(
    time: Res<Time>,
    config: Res<GameConfig>,
    mut projectiles: Query<(Entity, &Projectile, &mut Position), (With<ProjectileMarker>, Without<BalloonMarker>)>,
    mut balloons: Query<(Entity, &mut Balloon, &Position), (With<BalloonMarker>, Without<ProjectileMarker>)>,
    players: Query<&Position, (With<PlayerMarker>, Without<ProjectileMarker>)>,
    mut popper: BalloonPopper,
) {
    let Ok(player) = players.single() else {
        return;
    };
    let delta = time.delta_secs();
    let dart = &config.weapons.dart;

    for (entity, projectile, mut position) in &mut projectiles {
        position.0 = projectile.step(position.0, delta);

        let hit = balloons
            .iter_mut()
            .find(|(_, balloon, balloon_pos)| {
                !balloon.is_popped() && projectile_hits_balloon(position.0, balloon_pos.0, dart.hit_radius)
            });
        if let Some((balloon_entity, mut balloon, balloon_pos)) = hit {
            popper.damage(balloon_entity, &mut balloon, balloon_pos.0, projectile.damage, player.0);
            popper.discard(entity);
            continue;
        }

        if projectile_beyond_range(position.0, player.0, dart.max_distance) {
            popper.discard(entity);
        }
    }
}
