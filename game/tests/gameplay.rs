use bevy_app::prelude::*;
use bevy_ecs::prelude::*;
use bevy_input::ButtonInput;
use bevy_math::Vec3;
use std::time::Duration;

use common::{
    balloons::{BALLOON_PALETTE, Balloon, BalloonSize},
    config::GameConfig,
    markers::*,
    players::PlayerState,
    types::{GameState, PickupKind, Position, WeaponType},
    weapons::Projectile,
};
use monkey_dart::{
    FrameClock,
    autopilot::Autopilot,
    build_app,
    components::Pickup,
    input::Action,
    messages::{RenderCommand, SessionCommand, UiUpdate},
    resources::GameSession,
    step,
};

const TICK: Duration = Duration::from_millis(10);
const SEED: u64 = 42;

// ============================================================================
// Harness
// ============================================================================

#[derive(Resource, Default)]
struct Captured {
    render: Vec<RenderCommand>,
    ui: Vec<UiUpdate>,
}

fn capture_system(
    mut captured: ResMut<Captured>,
    mut render: MessageReader<RenderCommand>,
    mut ui: MessageReader<UiUpdate>,
) {
    captured.render.extend(render.read().cloned());
    captured.ui.extend(ui.read().cloned());
}

// An app that has run its startup frame in the menu, with message capture.
fn menu_app(config: GameConfig) -> App {
    let mut app = build_app(config, Some(SEED)).expect("valid config");
    app.init_resource::<Captured>().add_systems(Last, capture_system);
    step(&mut app, TICK);
    app
}

fn command(app: &mut App, command: SessionCommand) {
    app.world_mut().write_message(command).expect("session commands registered");
}

// Starts a round; the start frame itself is one gameplay tick.
fn playing_app(config: GameConfig) -> App {
    let mut app = menu_app(config);
    command(&mut app, SessionCommand::StartGame);
    step(&mut app, TICK);
    app
}

fn run(app: &mut App, ticks: usize) {
    for _ in 0..ticks {
        step(app, TICK);
    }
}

fn balloon_count(app: &mut App) -> usize {
    let world = app.world_mut();
    world.query_filtered::<(), With<BalloonMarker>>().iter(world).count()
}

fn pickup_count(app: &mut App, kind: PickupKind) -> usize {
    let world = app.world_mut();
    world
        .query::<&Pickup>()
        .iter(world)
        .filter(|pickup| pickup.kind == kind)
        .count()
}

fn session(app: &App) -> &GameSession {
    app.world().resource::<GameSession>()
}

fn player(app: &mut App) -> (Entity, Position, PlayerState) {
    let world = app.world_mut();
    let (entity, position, state) = world
        .query_filtered::<(Entity, &Position, &PlayerState), With<PlayerMarker>>()
        .single(world)
        .expect("one player");
    (entity, *position, state.clone())
}

fn spawn_balloon(app: &mut App, at: Vec3, size: BalloonSize) -> Entity {
    app.world_mut()
        .spawn((BalloonMarker, Balloon::new(BALLOON_PALETTE[0], size), Position(at)))
        .id()
}

fn spawn_pickup_at_player(app: &mut App, kind: PickupKind, radius: f32) -> Entity {
    app.world_mut()
        .spawn((PickupMarker, Pickup { kind, radius }, Position::new(0.0, 0.5, 0.0)))
        .id()
}

fn press(app: &mut App, action: Action) {
    app.world_mut().resource_mut::<ButtonInput<Action>>().press(action);
}

// ============================================================================
// Session
// ============================================================================

#[test]
fn startup_builds_scene_and_waits_in_menu() {
    let mut app = menu_app(GameConfig::default());
    assert_eq!(session(&app).state, GameState::Menu);

    let captured = app.world().resource::<Captured>();
    let scenery = captured
        .render
        .iter()
        .filter(|c| matches!(c, RenderCommand::Scenery { .. }))
        .count();
    assert_eq!(scenery, 150);
    assert!(captured.ui.contains(&UiUpdate::StateChanged(GameState::Menu)));

    // Nothing simulates outside a round
    run(&mut app, 200);
    assert_eq!(balloon_count(&mut app), 0);
}

#[test]
fn round_start_places_pickups_and_resets_player() {
    let mut app = playing_app(GameConfig::default());
    assert!(session(&app).is_playing());
    assert_eq!(pickup_count(&mut app, PickupKind::Coin), 20);
    assert_eq!(pickup_count(&mut app, PickupKind::Heart), 3);
    assert_eq!(pickup_count(&mut app, PickupKind::Katana), 2);

    let (_, position, state) = player(&mut app);
    assert_eq!(position, Position::default());
    assert_eq!(state.health, 3);
}

#[test]
fn restart_clears_previous_round() {
    let mut app = playing_app(GameConfig::default());
    run(&mut app, 300);
    assert!(balloon_count(&mut app) > 0);

    command(&mut app, SessionCommand::RestartGame);
    step(&mut app, TICK);
    assert_eq!(balloon_count(&mut app), 0);
    assert_eq!(pickup_count(&mut app, PickupKind::Coin), 20);
    assert_eq!(session(&app).score, 0);
}

#[test]
fn pause_freezes_the_simulation() {
    let mut app = playing_app(GameConfig::default());
    run(&mut app, 49);

    command(&mut app, SessionCommand::TogglePause);
    step(&mut app, TICK);
    assert_eq!(session(&app).state, GameState::Paused);
    run(&mut app, 200);
    assert_eq!(balloon_count(&mut app), 0);

    // The unpause frame is a gameplay tick again: 50 + 49 ticks, still short of one second
    command(&mut app, SessionCommand::TogglePause);
    step(&mut app, TICK);
    run(&mut app, 48);
    assert_eq!(balloon_count(&mut app), 0);
    step(&mut app, TICK);
    assert_eq!(balloon_count(&mut app), 1);
}

// ============================================================================
// Balloons
// ============================================================================

#[test]
fn one_balloon_per_second() {
    let mut app = playing_app(GameConfig::default());
    run(&mut app, 98);
    assert_eq!(balloon_count(&mut app), 0);
    step(&mut app, TICK);
    assert_eq!(balloon_count(&mut app), 1);
}

#[test]
fn one_balloon_per_second_at_sixty_hertz() {
    let mut app = menu_app(GameConfig::default());
    command(&mut app, SessionCommand::StartGame);
    let mut clock = FrameClock::new(60);
    for _ in 0..59 {
        step(&mut app, clock.next_delta());
    }
    assert_eq!(balloon_count(&mut app), 0);
    step(&mut app, clock.next_delta());
    assert_eq!(balloon_count(&mut app), 1);

    // The cadence holds over later seconds too
    for _ in 0..120 {
        step(&mut app, clock.next_delta());
    }
    assert_eq!(balloon_count(&mut app), 3);
}

#[test]
fn population_never_exceeds_cap() {
    let mut config = GameConfig::default();
    config.balloons.spawn_interval = 0.01;
    config.balloons.base_cap = 3;
    let mut app = playing_app(config);
    run(&mut app, 100);
    assert_eq!(balloon_count(&mut app), 3);
}

#[test]
fn balloon_contact_costs_hearts_until_game_over() {
    let mut app = playing_app(GameConfig::default());
    spawn_balloon(&mut app, Vec3::new(0.0, 1.0, 0.0), BalloonSize::Large);

    step(&mut app, TICK);
    let (_, _, state) = player(&mut app);
    assert_eq!(state.health, 2);
    assert!(state.invulnerable);

    // Invulnerability spaces the remaining hits 1.5 s apart
    run(&mut app, 100);
    assert_eq!(player(&mut app).2.health, 2);

    run(&mut app, 300);
    assert_eq!(session(&app).state, GameState::GameOver);
    assert_eq!(session(&app).stats.damage_taken, 3);
    let captured = app.world().resource::<Captured>();
    assert!(captured.ui.contains(&UiUpdate::StateChanged(GameState::GameOver)));
    assert!(captured.render.contains(&RenderCommand::CameraTilt { roll: 10.0 }));
}

// ============================================================================
// Combat
// ============================================================================

#[test]
fn two_darts_on_one_balloon_score_once() {
    let mut app = playing_app(GameConfig::default());
    let at = Vec3::new(0.0, 2.0, 10.0);
    let balloon = spawn_balloon(&mut app, at, BalloonSize::Large);
    app.world_mut().get_mut::<Balloon>(balloon).expect("balloon").health = 1;

    let dart = Projectile::dart(Vec3::Z, &GameConfig::default().weapons);
    for _ in 0..2 {
        app.world_mut().spawn((ProjectileMarker, dart, Position(at)));
    }
    step(&mut app, TICK);

    assert!(app.world().get_entity(balloon).is_err());
    assert_eq!(session(&app).score, BalloonSize::Large.points());
    assert_eq!(session(&app).stats.balloons_popped, 1);
}

#[test]
fn popped_balloon_drops_a_coin_that_flies_to_the_player() {
    let mut config = GameConfig::default();
    config.balloons.coin_drop_chance = 1.0;
    config.balloons.base_cap = 0;
    let mut app = playing_app(config);

    let at = Vec3::new(0.0, 2.0, 10.0);
    let balloon = spawn_balloon(&mut app, at, BalloonSize::Large);
    app.world_mut().get_mut::<Balloon>(balloon).expect("balloon").health = 1;
    let dart = Projectile::dart(Vec3::Z, &GameConfig::default().weapons);
    app.world_mut().spawn((ProjectileMarker, dart, Position(at)));
    step(&mut app, TICK);

    let points = BalloonSize::Large.points();
    assert_eq!(session(&app).coins, points);
    let flying = |app: &mut App| {
        let world = app.world_mut();
        world.query_filtered::<(), With<FlyingCoinMarker>>().iter(world).count()
    };
    assert_eq!(flying(&mut app), 1);

    // Still in the air just before the flight time ends
    run(&mut app, 90);
    assert_eq!(flying(&mut app), 1);
    assert_eq!(session(&app).coins, points);

    run(&mut app, 20);
    assert_eq!(flying(&mut app), 0);
    assert_eq!(session(&app).coins, points + 3);
    assert_eq!(session(&app).stats.coins_collected, 3);
}

#[test]
fn dart_is_removed_beyond_range() {
    let mut config = GameConfig::default();
    config.balloons.base_cap = 0;
    let mut app = playing_app(config);

    let dart = Projectile::dart(Vec3::Z, &GameConfig::default().weapons);
    let entity = app
        .world_mut()
        .spawn((ProjectileMarker, dart, Position::new(0.0, 1.7, 0.0)))
        .id();

    // 30 units per second: 45 units after 1.5 s, 54 after 1.8 s
    run(&mut app, 150);
    assert!(app.world().get_entity(entity).is_ok());
    run(&mut app, 30);
    assert!(app.world().get_entity(entity).is_err());
    let captured = app.world().resource::<Captured>();
    assert!(captured.render.contains(&RenderCommand::DestroyVisual { entity }));
}

#[test]
fn dart_shot_spawns_a_projectile_and_respects_cooldown() {
    let mut app = playing_app(GameConfig::default());
    press(&mut app, Action::Shoot);
    step(&mut app, TICK);

    let world = app.world_mut();
    let darts = world.query_filtered::<(), With<ProjectileMarker>>().iter(world).count();
    assert_eq!(darts, 1);
    assert_eq!(session(&app).stats.shots_fired, 1);

    // Still cooling down 0.1 s later
    run(&mut app, 9);
    let mut input = app.world_mut().resource_mut::<ButtonInput<Action>>();
    input.release(Action::Shoot);
    input.press(Action::Shoot);
    step(&mut app, TICK);
    assert_eq!(session(&app).stats.shots_fired, 1);
}

#[test]
fn katana_hits_only_balloons_inside_the_cone() {
    let mut app = playing_app(GameConfig::default());
    {
        let mut session = app.world_mut().resource_mut::<GameSession>();
        session.loadout.unlock(WeaponType::Katana);
        session.loadout.equip(WeaponType::Katana);
    }
    let ahead = spawn_balloon(&mut app, Vec3::new(0.0, 2.0, 5.0), BalloonSize::Small);
    let behind = spawn_balloon(&mut app, Vec3::new(0.0, 2.0, -5.0), BalloonSize::Small);
    let wide = spawn_balloon(&mut app, Vec3::new(7.0, 2.0, 3.0), BalloonSize::Small);
    let far = spawn_balloon(&mut app, Vec3::new(0.0, 2.0, 9.0), BalloonSize::Small);

    press(&mut app, Action::Shoot);
    step(&mut app, TICK);

    let world = app.world();
    assert!(world.get_entity(ahead).is_err());
    for survivor in [behind, wide, far] {
        assert!(world.get_entity(survivor).is_ok());
    }
    assert!(world.resource::<Captured>().render.contains(&RenderCommand::SwingKatana));
    assert_eq!(session(&app).score, BalloonSize::Small.points());
}

#[test]
fn katana_purchase_needs_enough_coins() {
    let mut app = playing_app(GameConfig::default());
    app.world_mut().resource_mut::<GameSession>().coins = 49;
    command(&mut app, SessionCommand::BuyKatana);
    step(&mut app, TICK);
    assert!(!session(&app).loadout.owns(WeaponType::Katana));
    assert_eq!(session(&app).coins, 49);

    app.world_mut().resource_mut::<GameSession>().coins = 62;
    command(&mut app, SessionCommand::BuyKatana);
    step(&mut app, TICK);
    assert_eq!(session(&app).loadout.current(), WeaponType::Katana);
    assert_eq!(session(&app).coins, 12);
    let captured = app.world().resource::<Captured>();
    assert!(captured.render.contains(&RenderCommand::EquipWeapon(WeaponType::Katana)));
}

// ============================================================================
// Pickups
// ============================================================================

#[test]
fn coin_is_collected_and_replaced() {
    let mut app = playing_app(GameConfig::default());
    let coin = spawn_pickup_at_player(&mut app, PickupKind::Coin, 2.5);
    step(&mut app, TICK);

    assert!(app.world().get_entity(coin).is_err());
    assert_eq!(session(&app).coins, 5);
    assert_eq!(pickup_count(&mut app, PickupKind::Coin), 21);
}

#[test]
fn heart_at_full_health_stays_put() {
    let mut app = playing_app(GameConfig::default());
    let heart = spawn_pickup_at_player(&mut app, PickupKind::Heart, 1.5);
    step(&mut app, TICK);
    assert!(app.world().get_entity(heart).is_ok());

    let (entity, _, _) = player(&mut app);
    app.world_mut().get_mut::<PlayerState>(entity).expect("player").health = 2;
    step(&mut app, TICK);

    assert!(app.world().get_entity(heart).is_err());
    assert_eq!(player(&mut app).2.health, 3);
    assert_eq!(pickup_count(&mut app, PickupKind::Heart), 4);
}

#[test]
fn katana_pickup_unlocks_and_is_consumed() {
    let mut app = playing_app(GameConfig::default());
    let pickup = spawn_pickup_at_player(&mut app, PickupKind::Katana, 1.5);
    step(&mut app, TICK);

    assert!(app.world().get_entity(pickup).is_err());
    assert_eq!(session(&app).loadout.current(), WeaponType::Katana);
    assert_eq!(pickup_count(&mut app, PickupKind::Katana), 2);
}

// ============================================================================
// Presentation & Autopilot
// ============================================================================

#[test]
fn hud_reports_only_changes() {
    let mut app = playing_app(GameConfig::default());
    run(&mut app, 10);
    let huds = |app: &App| {
        app.world()
            .resource::<Captured>()
            .ui
            .iter()
            .filter(|u| matches!(u, UiUpdate::Hud(_)))
            .count()
    };
    let before = huds(&app);
    run(&mut app, 10);
    assert_eq!(huds(&app), before);

    spawn_pickup_at_player(&mut app, PickupKind::Coin, 2.5);
    step(&mut app, TICK);
    assert_eq!(huds(&app), before + 1);
}

#[test]
fn autopilot_plays_a_round() {
    let mut app = menu_app(GameConfig::default());
    app.insert_resource(Autopilot::enabled());
    command(&mut app, SessionCommand::StartGame);
    for _ in 0..300 {
        step(&mut app, Duration::from_secs_f32(1.0 / 60.0));
    }
    assert!(session(&app).stats.shots_fired > 0);
}
