use bevy_ecs::prelude::*;
use bevy_input::ButtonInput;
use bevy_time::Time;
use tracing::debug;

use crate::{
    constants::{DART_COLOR, DART_SCALE},
    input::{Action, MouseRay},
    messages::{MeleeSwing, ParticleKind, RenderCommand, VisualKind},
    resources::GameSession,
    systems::balloons::BalloonPopper,
};
use common::{
    balloons::Balloon,
    collision::collect_melee_hits,
    config::GameConfig,
    constants::MUZZLE_FLASH_OFFSET,
    markers::*,
    movement::planar_forward,
    players::PlayerState,
    types::{Position, WeaponType},
    weapons::{Projectile, weapon_cooldown, weapon_damage},
};

// ============================================================================
// Attack Input
// ============================================================================

// Fires the equipped weapon on a shoot press, gated by the cooldown of the
// weapon that made the previous attack.
pub fn attack_system(
    mut commands: Commands,
    time: Res<Time>,
    input: Res<ButtonInput<Action>>,
    config: Res<GameConfig>,
    mouse: Res<MouseRay>,
    mut session: ResMut<GameSession>,
    players: Query<(&Position, &PlayerState), With<PlayerMarker>>,
    mut render: MessageWriter<RenderCommand>,
    mut swings: MessageWriter<MeleeSwing>,
) {
    if !input.just_pressed(Action::Shoot) {
        return;
    }
    let Ok((position, player)) = players.single() else {
        return;
    };

    let now = time.elapsed_secs();
    if !session.shot_clock.can_shoot(now) {
        return;
    }

    let weapon = session.loadout.current();
    session.shot_clock.record_shot(now, weapon_cooldown(weapon, &config.weapons));
    session.stats.shots_fired += 1;

    match weapon {
        WeaponType::Dart => {
            let (origin, direction) = player.aim(position.0, mouse.0, &config.player);
            let projectile = Projectile::dart(direction, &config.weapons);
            let entity = commands
                .spawn((ProjectileMarker, projectile, Position(origin)))
                .id();

            render.write(RenderCommand::SpawnVisual {
                entity,
                kind: VisualKind::Dart,
                position: origin,
                color: DART_COLOR,
                scale: DART_SCALE,
            });
            render.write(RenderCommand::Particle {
                kind: ParticleKind::MuzzleFlash,
                position: origin + projectile.direction * MUZZLE_FLASH_OFFSET,
                color: DART_COLOR,
            });
        }
        WeaponType::Katana => {
            render.write(RenderCommand::SwingKatana);
            swings.write(MeleeSwing {
                origin: position.planar(),
                facing: planar_forward(player.heading),
                damage: weapon_damage(weapon, &config.weapons),
            });
        }
    }
}

// ============================================================================
// Melee Resolution
// ============================================================================

// Every live balloon inside the cone takes the swing's damage.
pub fn melee_hit_system(
    mut swings: MessageReader<MeleeSwing>,
    config: Res<GameConfig>,
    mut balloons: Query<(Entity, &mut Balloon, &Position), With<BalloonMarker>>,
    players: Query<&Position, With<PlayerMarker>>,
    mut popper: BalloonPopper,
) {
    let Ok(player) = players.single() else {
        swings.clear();
        return;
    };
    let katana = &config.weapons.katana;

    for swing in swings.read() {
        let targets = balloons
            .iter()
            .filter(|(_, balloon, _)| !balloon.is_popped())
            .map(|(entity, _, position)| (entity, position.planar()));
        let hits = collect_melee_hits(swing.origin, swing.facing, targets, katana.range, katana.cone_half_angle);
        debug!("katana swing hit {} balloons", hits.len());

        for entity in hits {
            if let Ok((entity, mut balloon, position)) = balloons.get_mut(entity) {
                popper.damage(entity, &mut balloon, position.0, swing.damage, player.0);
            }
        }
    }
}
