use bevy_ecs::prelude::*;
use bevy_input::ButtonInput;
use tracing::{debug, info, warn};

use crate::{
    constants::{KATANA_COLOR, PLAYER_COLOR},
    input::Action,
    map::{generate_scenery, scenery_color},
    messages::{ParticleKind, RenderCommand, RoundStarted, SessionCommand, UiUpdate, VisualKind},
    resources::{BalloonSpawner, GameRng, GameSession, ObstacleRegistry, TimedEvents},
    systems::items::spawn_round_pickups,
};
use common::{
    camera::{CameraMode, weapon_holder_position},
    config::GameConfig,
    markers::*,
    players::PlayerState,
    types::{GameState, Position, WeaponType},
    weapons::PurchaseOutcome,
};

// Cursor and crosshair policy for a camera mode; menus always show the cursor.
#[must_use]
pub const fn camera_policy_update(mode: CameraMode, playing: bool) -> UiUpdate {
    let policy = mode.policy();
    UiUpdate::CameraPolicy {
        mode,
        cursor_visible: policy.cursor_visible || !playing,
        crosshair_visible: policy.crosshair_visible && playing,
    }
}

// ============================================================================
// Scene Setup
// ============================================================================

pub fn setup_scene_system(
    mut commands: Commands,
    config: Res<GameConfig>,
    mut rng: ResMut<GameRng>,
    mut obstacles: ResMut<ObstacleRegistry>,
    mut render: MessageWriter<RenderCommand>,
    mut ui: MessageWriter<UiUpdate>,
) {
    obstacles.0 = generate_scenery(&mut rng.0, &config.scene);
    for obstacle in &obstacles.0 {
        render.write(RenderCommand::Scenery {
            obstacle: *obstacle,
            color: scenery_color(obstacle.kind),
        });
    }
    info!("generated {} obstacles", obstacles.0.len());

    let position = Position::default();
    let entity = commands
        .spawn((PlayerMarker, PlayerState::new(&config.player), position))
        .id();
    render.write(RenderCommand::SpawnVisual {
        entity,
        kind: VisualKind::Player,
        position: position.0,
        color: PLAYER_COLOR,
        scale: 1.0,
    });

    ui.write(UiUpdate::StateChanged(GameState::Menu));
    ui.write(camera_policy_update(CameraMode::FirstPerson, false));
}

// ============================================================================
// Session Commands
// ============================================================================

pub fn session_command_system(
    mut session: ResMut<GameSession>,
    mut session_commands: MessageReader<SessionCommand>,
    input: Res<ButtonInput<Action>>,
    config: Res<GameConfig>,
    players: Query<(&Position, &PlayerState), With<PlayerMarker>>,
    mut rounds: MessageWriter<RoundStarted>,
    mut render: MessageWriter<RenderCommand>,
    mut ui: MessageWriter<UiUpdate>,
) {
    let pause_key = input
        .just_pressed(Action::Pause)
        .then_some(SessionCommand::TogglePause);
    let camera_mode = players
        .single()
        .map_or(CameraMode::FirstPerson, |(_, player)| player.camera.mode);

    for command in session_commands.read().copied().chain(pause_key) {
        match command {
            SessionCommand::StartGame | SessionCommand::RestartGame => {
                session.start();
                rounds.write(RoundStarted);
                ui.write(UiUpdate::StateChanged(GameState::Playing));
                info!("round started");
            }
            SessionCommand::ReturnToMenu => {
                session.state = GameState::Menu;
                ui.write(UiUpdate::StateChanged(GameState::Menu));
                ui.write(camera_policy_update(camera_mode, false));
                info!("returned to menu");
            }
            SessionCommand::TogglePause => {
                if let Some(state) = session.toggle_pause() {
                    ui.write(UiUpdate::StateChanged(state));
                    ui.write(camera_policy_update(camera_mode, state == GameState::Playing));
                    info!("game {:?}", state);
                }
            }
            SessionCommand::BuyKatana => {
                if !matches!(session.state, GameState::Playing | GameState::Paused) {
                    warn!("katana purchase ignored outside a round");
                    continue;
                }
                let price = config.weapons.katana.price;
                let GameSession { loadout, coins, .. } = &mut *session;
                match loadout.purchase(WeaponType::Katana, price, coins) {
                    PurchaseOutcome::Purchased { remaining_coins } => {
                        render.write(RenderCommand::EquipWeapon(WeaponType::Katana));
                        if let Ok((position, player)) = players.single() {
                            render.write(RenderCommand::Particle {
                                kind: ParticleKind::UpgradeSparkle,
                                position: weapon_holder_position(position.0, player.heading),
                                color: KATANA_COLOR,
                            });
                        }
                        info!("katana purchased, {} coins left", remaining_coins);
                    }
                    PurchaseOutcome::AlreadyOwned => debug!("katana already owned"),
                    PurchaseOutcome::InsufficientCoins { needed } => {
                        warn!("katana purchase rejected, {} more coins needed", needed);
                    }
                }
            }
            SessionCommand::SelectWeapon(weapon) => {
                if let Some(weapon) = session.loadout.equip(weapon) {
                    render.write(RenderCommand::EquipWeapon(weapon));
                    debug!("selected {}", weapon.name());
                }
            }
        }
    }
}

// ============================================================================
// Round Reset
// ============================================================================

pub fn round_setup_system(
    mut commands: Commands,
    mut rounds: MessageReader<RoundStarted>,
    config: Res<GameConfig>,
    mut rng: ResMut<GameRng>,
    mut spawner: ResMut<BalloonSpawner>,
    mut timed: ResMut<TimedEvents>,
    mut players: Query<(&mut Position, &mut PlayerState), With<PlayerMarker>>,
    stale: Query<
        (Entity, Has<BalloonMarker>),
        Or<(
            With<BalloonMarker>,
            With<ProjectileMarker>,
            With<PickupMarker>,
            With<FlyingCoinMarker>,
        )>,
    >,
    mut render: MessageWriter<RenderCommand>,
    mut ui: MessageWriter<UiUpdate>,
) {
    if rounds.is_empty() {
        return;
    }
    rounds.clear();

    for (entity, is_balloon) in &stale {
        render.write(RenderCommand::DestroyVisual { entity });
        if is_balloon {
            ui.write(UiUpdate::RemoveMarker { entity });
        }
        commands.entity(entity).despawn();
    }

    spawner.reset();
    timed.0.clear();

    let Ok((mut position, mut player)) = players.single_mut() else {
        warn!("round started without a player");
        return;
    };
    *position = Position::default();
    player.reset(&config.player);

    render.write(RenderCommand::EquipWeapon(WeaponType::Dart));
    render.write(RenderCommand::FieldOfView(player.camera.fov));
    render.write(RenderCommand::CameraTilt { roll: 0.0 });
    ui.write(camera_policy_update(player.camera.mode, true));
    ui.write(UiUpdate::Alert(None));

    spawn_round_pickups(&mut commands, &mut render, &mut rng.0, &config.pickups, position.planar());
    debug!("round reset complete");
}
