use bevy_ecs::{prelude::*, system::SystemParam};
use bevy_math::Vec3;
use bevy_time::Time;
use rand::Rng;
use std::time::Duration;
use tracing::{debug, info};

use crate::{
    components::FlyingCoin,
    constants::{COIN_COLOR, COIN_SCALE},
    messages::{ParticleKind, RenderCommand, UiUpdate, VisualKind},
    resources::{BalloonSpawner, GameRng, GameSession, TimedEffect, TimedEvents},
    systems::session::camera_policy_update,
};
use common::{
    balloons::{Balloon, DamageOutcome, balloon_speed, spawn_cap, step_balloon},
    config::GameConfig,
    markers::*,
    players::PlayerState,
    spawning::balloon_spawn_position,
    types::{GameState, Position},
};

// ============================================================================
// Balloon Popper
// ============================================================================

// Shared damage path for darts and katana swings, so a pop is scored the
// same way whichever weapon caused it.
#[derive(SystemParam)]
pub struct BalloonPopper<'w, 's> {
    commands: Commands<'w, 's>,
    session: ResMut<'w, GameSession>,
    rng: ResMut<'w, GameRng>,
    config: Res<'w, GameConfig>,
    render: MessageWriter<'w, RenderCommand>,
    ui: MessageWriter<'w, UiUpdate>,
}

impl BalloonPopper<'_, '_> {
    pub fn damage(&mut self, entity: Entity, balloon: &mut Balloon, at: Vec3, damage: u32, player: Vec3) -> DamageOutcome {
        let outcome = balloon.take_damage(damage);
        match outcome {
            DamageOutcome::Hit => {
                self.render.write(RenderCommand::UpdateVisual {
                    entity,
                    scale: balloon.visual_scale(),
                    opacity: balloon.opacity(),
                });
            }
            DamageOutcome::Popped { points } => {
                self.session.award(points);
                self.session.stats.balloons_popped += 1;
                self.render.write(RenderCommand::Particle {
                    kind: ParticleKind::BalloonPop,
                    position: at,
                    color: balloon.color.rgba,
                });
                self.render.write(RenderCommand::DestroyVisual { entity });
                self.ui.write(UiUpdate::RemoveMarker { entity });
                self.commands.entity(entity).despawn();
                debug!("{} balloon popped for {} points", balloon.color.name, points);

                if self.rng.0.random_bool(self.config.balloons.coin_drop_chance) {
                    self.drop_coin(at, player);
                }
            }
            DamageOutcome::AlreadyPopped => {}
        }
        outcome
    }

    pub fn discard(&mut self, entity: Entity) {
        self.render.write(RenderCommand::DestroyVisual { entity });
        self.commands.entity(entity).despawn();
    }

    fn drop_coin(&mut self, from: Vec3, target: Vec3) {
        let flight = FlyingCoin::new(from, target, self.config.pickups.flying_coin_flight_time);
        let entity = self
            .commands
            .spawn((FlyingCoinMarker, flight, Position(from)))
            .id();
        self.render.write(RenderCommand::SpawnVisual {
            entity,
            kind: VisualKind::FlyingCoin,
            position: from,
            color: COIN_COLOR,
            scale: COIN_SCALE,
        });
    }
}

// ============================================================================
// Spawning & Growth
// ============================================================================

// One balloon per elapsed interval while the population is under the
// score-dependent cap. The interval is consumed even when the cap blocks a spawn.
pub fn balloon_spawn_system(
    mut commands: Commands,
    time: Res<Time>,
    config: Res<GameConfig>,
    session: Res<GameSession>,
    mut spawner: ResMut<BalloonSpawner>,
    mut rng: ResMut<GameRng>,
    balloons: Query<(), With<BalloonMarker>>,
    players: Query<&Position, With<PlayerMarker>>,
    mut render: MessageWriter<RenderCommand>,
) {
    let tuning = &config.balloons;
    let interval = Duration::from_secs_f32(tuning.spawn_interval);
    spawner.spawn_timer += time.delta();
    if spawner.spawn_timer < interval {
        return;
    }
    // Carry the overshoot so the cadence does not drift with the frame rate
    spawner.spawn_timer -= interval;

    let alive = balloons.iter().count() as u32;
    let cap = spawn_cap(session.score, tuning);
    if alive >= cap {
        return;
    }
    let Ok(player) = players.single() else {
        return;
    };

    let position = balloon_spawn_position(&mut rng.0, player.0, tuning, config.player.play_bound);
    let balloon = Balloon::random(&mut rng.0);
    let (color, scale) = (balloon.color, balloon.visual_scale());
    let entity = commands
        .spawn((BalloonMarker, balloon, Position(position)))
        .id();

    render.write(RenderCommand::SpawnVisual {
        entity,
        kind: VisualKind::Balloon,
        position,
        color: color.rgba,
        scale,
    });
    debug!("spawned {} balloon ({}/{})", color.name, alive + 1, cap);
}

// Every growth interval each live balloon gets one more hit point and a
// bigger model.
pub fn balloon_growth_system(
    time: Res<Time>,
    config: Res<GameConfig>,
    mut spawner: ResMut<BalloonSpawner>,
    mut balloons: Query<(Entity, &mut Balloon), With<BalloonMarker>>,
    mut render: MessageWriter<RenderCommand>,
) {
    let tuning = &config.balloons;
    let interval = Duration::from_secs_f32(tuning.growth_interval);
    spawner.growth_timer += time.delta();
    if spawner.growth_timer < interval {
        return;
    }
    spawner.growth_timer -= interval;

    let mut grown = 0;
    for (entity, mut balloon) in &mut balloons {
        balloon.grow(tuning.growth_factor, tuning.max_scale);
        render.write(RenderCommand::UpdateVisual {
            entity,
            scale: balloon.visual_scale(),
            opacity: balloon.opacity(),
        });
        grown += 1;
    }
    debug!("{} balloons grew", grown);
}

// ============================================================================
// Movement & Contact
// ============================================================================

pub fn balloon_movement_system(
    time: Res<Time>,
    config: Res<GameConfig>,
    session: Res<GameSession>,
    mut balloons: Query<(&Balloon, &mut Position), (With<BalloonMarker>, Without<PlayerMarker>)>,
    players: Query<&Position, (With<PlayerMarker>, Without<BalloonMarker>)>,
) {
    let Ok(player) = players.single() else {
        return;
    };
    let tuning = &config.balloons;
    let (elapsed, delta) = (time.elapsed_secs(), time.delta_secs());

    for (balloon, mut position) in &mut balloons {
        let speed = balloon_speed(session.score, balloon.speed_multiplier, tuning);
        position.0 = step_balloon(position.0, player.0, speed, elapsed, delta, tuning);
    }
}

// A balloon touching the player costs one heart, then the player is briefly
// invulnerable. Losing the last heart ends the round.
pub fn balloon_contact_system(
    config: Res<GameConfig>,
    mut session: ResMut<GameSession>,
    mut timed: ResMut<TimedEvents>,
    balloons: Query<&Position, (With<BalloonMarker>, Without<PlayerMarker>)>,
    mut players: Query<(&Position, &mut PlayerState), With<PlayerMarker>>,
    mut render: MessageWriter<RenderCommand>,
    mut ui: MessageWriter<UiUpdate>,
) {
    let Ok((player_pos, mut player)) = players.single_mut() else {
        return;
    };
    let radius = config.balloons.contact_radius;
    let touching = balloons
        .iter()
        .any(|position| position.0.distance_squared(player_pos.0) < radius * radius);
    if !touching || !player.take_damage(1) {
        return;
    }

    let tuning = &config.player;
    session.stats.damage_taken += 1;
    player.invulnerable = true;
    timed.schedule(TimedEffect::Invulnerability, tuning.invulnerability_time);
    timed.schedule(TimedEffect::CameraTilt, tuning.camera_tilt_time);
    render.write(RenderCommand::CameraTilt {
        roll: tuning.camera_tilt_roll,
    });
    info!("player hit by a balloon, health {}/{}", player.health, player.max_health);

    if player.is_dead() {
        session.state = GameState::GameOver;
        ui.write(UiUpdate::StateChanged(GameState::GameOver));
        ui.write(camera_policy_update(player.camera.mode, false));
        info!(
            "game over: score {}, {} balloons popped",
            session.score, session.stats.balloons_popped
        );
    }
}
