use bevy_ecs::prelude::*;
use rand::{SeedableRng, rngs::StdRng};
use std::time::Duration;

use common::{
    types::{GameState, Obstacle},
    weapons::{Loadout, ShotClock},
};

// ============================================================================
// Session
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub balloons_popped: u32,
    pub shots_fired: u32,
    pub damage_taken: u32,
    pub coins_collected: u32,
}

// Global game state owned by the orchestrator. Systems receive it as a resource.
#[derive(Resource, Debug, Clone, Default)]
pub struct GameSession {
    pub state: GameState,
    pub score: u32,
    pub coins: u32,
    pub loadout: Loadout,
    pub shot_clock: ShotClock,
    pub stats: SessionStats,
}

impl GameSession {
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.state == GameState::Playing
    }

    pub fn start(&mut self) {
        *self = Self {
            state: GameState::Playing,
            ..Default::default()
        };
    }

    // Playing <-> Paused; other states ignore the toggle.
    pub fn toggle_pause(&mut self) -> Option<GameState> {
        self.state = match self.state {
            GameState::Playing => GameState::Paused,
            GameState::Paused => GameState::Playing,
            GameState::Menu | GameState::GameOver => return None,
        };
        Some(self.state)
    }

    pub const fn award(&mut self, points: u32) {
        self.score += points;
        self.coins += points;
    }
}

pub fn session_is_playing(session: Res<GameSession>) -> bool {
    session.is_playing()
}

// ============================================================================
// World Resources
// ============================================================================

// Static obstacle colliders generated once at scene setup.
#[derive(Resource, Debug, Default)]
pub struct ObstacleRegistry(pub Vec<Obstacle>);

// Accumulated time toward the next balloon spawn and the next growth wave.
#[derive(Resource, Debug, Default)]
pub struct BalloonSpawner {
    pub spawn_timer: Duration,
    pub growth_timer: Duration,
}

impl BalloonSpawner {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimedEffect {
    Invulnerability,
    CameraTilt,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimedEvent {
    pub effect: TimedEffect,
    pub remaining: f32,
}

// Delayed effects ticked by the orchestrator instead of host-scheduled callbacks.
#[derive(Resource, Debug, Default)]
pub struct TimedEvents(pub Vec<TimedEvent>);

impl TimedEvents {
    // Restarts an effect's countdown, or schedules it if it is not pending.
    pub fn schedule(&mut self, effect: TimedEffect, duration: f32) {
        if let Some(event) = self.0.iter_mut().find(|e| e.effect == effect) {
            event.remaining = duration;
        } else {
            self.0.push(TimedEvent {
                effect,
                remaining: duration,
            });
        }
    }

    // Ticks every pending effect and drains the ones that expired.
    pub fn tick(&mut self, delta: f32) -> Vec<TimedEffect> {
        let mut expired = Vec::new();
        self.0.retain_mut(|event| {
            event.remaining -= delta;
            if event.remaining <= 0.0 {
                expired.push(event.effect);
                false
            } else {
                true
            }
        });
        expired
    }

    #[must_use]
    pub fn is_pending(&self, effect: TimedEffect) -> bool {
        self.0.iter().any(|e| e.effect == effect)
    }
}

#[derive(Resource, Debug)]
pub struct GameRng(pub StdRng);

impl GameRng {
    #[must_use]
    pub fn new(seed: Option<u64>) -> Self {
        Self(seed.map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pause_only_toggles_while_in_a_round() {
        let mut session = GameSession::default();
        assert_eq!(session.toggle_pause(), None);
        session.start();
        assert_eq!(session.toggle_pause(), Some(GameState::Paused));
        assert_eq!(session.toggle_pause(), Some(GameState::Playing));
    }

    #[test]
    fn start_resets_score_coins_and_loadout() {
        let mut session = GameSession::default();
        session.award(12);
        session.loadout.unlock(common::types::WeaponType::Katana);
        session.start();
        assert_eq!((session.score, session.coins), (0, 0));
        assert_eq!(session.loadout, Loadout::default());
        assert!(session.is_playing());
    }

    #[test]
    fn timed_events_expire_and_reschedule() {
        let mut events = TimedEvents::default();
        events.schedule(TimedEffect::CameraTilt, 0.3);
        events.schedule(TimedEffect::Invulnerability, 1.5);
        assert!(events.tick(0.2).is_empty());
        assert_eq!(events.tick(0.2), vec![TimedEffect::CameraTilt]);

        events.schedule(TimedEffect::Invulnerability, 1.5);
        assert!(events.tick(1.4).is_empty());
        assert_eq!(events.tick(0.2), vec![TimedEffect::Invulnerability]);
        assert!(!events.is_pending(TimedEffect::Invulnerability));
    }
}
