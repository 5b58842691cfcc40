pub mod autopilot;
pub mod components;
pub mod config;
pub mod constants;
pub mod input;
pub mod map;
pub mod messages;
pub mod resources;
pub mod systems;

use anyhow::{Context, Result};
use bevy_app::prelude::*;
use bevy_ecs::prelude::*;
use bevy_input::ButtonInput;
use bevy_time::Time;
use std::time::Duration;

use autopilot::{Autopilot, autopilot_system};
use common::config::GameConfig;
use input::{Action, LookInput, MouseRay, clear_input_system};
use messages::{MeleeSwing, RenderCommand, RoundStarted, SessionCommand, UiUpdate};
use resources::{BalloonSpawner, GameRng, GameSession, ObstacleRegistry, TimedEvents, session_is_playing};
use systems::{
    balloons::*, combat::*, effects::*, items::*, players::*, presentation::*, projectiles::*, session::*,
};

// ============================================================================
// Game Plugin
// ============================================================================

// The whole gameplay core. The host owns the clock: it advances `Time` and
// calls `App::update` once per frame.
pub struct MonkeyDartPlugin {
    pub config: GameConfig,
    pub seed: Option<u64>,
}

impl Plugin for MonkeyDartPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(self.config.clone())
            .insert_resource(GameRng::new(self.seed))
            .init_resource::<Time>()
            .init_resource::<GameSession>()
            .init_resource::<ObstacleRegistry>()
            .init_resource::<BalloonSpawner>()
            .init_resource::<TimedEvents>()
            .init_resource::<Autopilot>()
            .init_resource::<ButtonInput<Action>>()
            .init_resource::<LookInput>()
            .init_resource::<MouseRay>()
            .add_message::<RenderCommand>()
            .add_message::<UiUpdate>()
            .add_message::<SessionCommand>()
            .add_message::<RoundStarted>()
            .add_message::<MeleeSwing>()
            .add_systems(Startup, setup_scene_system)
            .add_systems(First, autopilot_system)
            .add_systems(PreUpdate, (session_command_system, round_setup_system).chain())
            .add_systems(
                Update,
                (
                    // Player
                    player_look_system,
                    camera_toggle_system,
                    zoom_system,
                    player_movement_system,
                    weapon_switch_system,
                    // Combat
                    attack_system,
                    melee_hit_system,
                    projectiles_movement_system,
                    // Balloons
                    balloon_spawn_system,
                    balloon_growth_system,
                    balloon_movement_system,
                    balloon_contact_system,
                    // Items & effects
                    flying_coin_system,
                    pickup_collection_system,
                    timed_events_system,
                    balloon_alert_system,
                )
                    .chain()
                    .distributive_run_if(session_is_playing),
            )
            .add_systems(PostUpdate, (hud_system, minimap_system, log_presentation_system).chain())
            .add_systems(Last, clear_input_system);
    }
}

// Builds a ready-to-step app from a validated config. A fixed seed makes a
// run reproducible.
pub fn build_app(config: GameConfig, seed: Option<u64>) -> Result<App> {
    config.validate().context("invalid game config")?;
    let mut app = App::new();
    app.add_plugins(MonkeyDartPlugin { config, seed });
    app.finish();
    app.cleanup();
    Ok(app)
}

// ============================================================================
// Frame Clock
// ============================================================================

// Fixed-rate frame durations whose sum over `hz` frames is exactly one second.
// Each frame takes its share of the nanosecond remainder instead of truncating.
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    hz: u64,
    frame: u64,
}

impl FrameClock {
    const NANOS_PER_SEC: u64 = 1_000_000_000;

    #[must_use]
    pub fn new(hz: u32) -> Self {
        Self {
            hz: u64::from(hz.max(1)),
            frame: 0,
        }
    }

    // Nominal frame length, used as the tick budget.
    #[must_use]
    pub const fn budget(&self) -> Duration {
        Duration::from_nanos(Self::NANOS_PER_SEC / self.hz)
    }

    pub fn next_delta(&mut self) -> Duration {
        let start = self.frame * Self::NANOS_PER_SEC / self.hz;
        self.frame += 1;
        let end = self.frame * Self::NANOS_PER_SEC / self.hz;
        Duration::from_nanos(end - start)
    }
}

// Advances the game clock by `delta` and runs one frame.
pub fn step(app: &mut App, delta: Duration) {
    app.world_mut().resource_mut::<Time>().advance_by(delta);
    app.update();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_clock_sums_to_whole_seconds() {
        let mut clock = FrameClock::new(60);
        let second: Duration = (0..60).map(|_| clock.next_delta()).sum();
        assert_eq!(second, Duration::from_secs(1));
        let two: Duration = (0..60).map(|_| clock.next_delta()).sum();
        assert_eq!(two, Duration::from_secs(1));
        assert_eq!(clock.budget(), Duration::from_nanos(16_666_666));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut config = GameConfig::default();
        config.balloons.coin_drop_chance = 1.5;
        assert!(build_app(config, Some(1)).is_err());
    }
}
