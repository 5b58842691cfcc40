use bevy_ecs::prelude::*;
use bevy_math::{Ray3d, Vec2, Vec3};

use crate::{
    camera::{CameraRig, Look, aim_ray, apply_look},
    config::PlayerTuning,
    movement::{JumpState, MoveIntent, advance_player},
    types::Obstacle,
};

// ============================================================================
// Player State
// ============================================================================

// Everything about the player except its world position, which lives in the
// `Position` component next to it.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct PlayerState {
    pub heading: f32, // degrees
    pub pitch: f32,   // degrees
    pub jump: JumpState,
    pub health: u32,
    pub max_health: u32,
    pub invulnerable: bool,
    pub camera: CameraRig,
}

impl PlayerState {
    #[must_use]
    pub fn new(tuning: &PlayerTuning) -> Self {
        Self {
            heading: 0.0,
            pitch: 0.0,
            jump: JumpState::default(),
            health: tuning.max_health,
            max_health: tuning.max_health,
            invulnerable: false,
            camera: CameraRig::new(tuning),
        }
    }

    pub fn reset(&mut self, tuning: &PlayerTuning) {
        *self = Self::new(tuning);
    }

    #[must_use]
    pub const fn is_dead(&self) -> bool {
        self.health == 0
    }

    // Returns false while invulnerable or already dead.
    pub const fn take_damage(&mut self, amount: u32) -> bool {
        if self.invulnerable || self.health == 0 {
            return false;
        }
        self.health = self.health.saturating_sub(amount);
        true
    }

    // Returns false at full health, leaving health untouched.
    pub fn heal(&mut self, amount: u32) -> bool {
        if self.health >= self.max_health {
            return false;
        }
        self.health = (self.health + amount).min(self.max_health);
        true
    }

    pub fn look(&mut self, delta: Vec2, tuning: &PlayerTuning) {
        let look = apply_look(
            Look {
                heading: self.heading,
                pitch: self.pitch,
            },
            &mut self.camera,
            delta,
            tuning,
        );
        self.heading = look.heading;
        self.pitch = look.pitch;
    }

    #[must_use]
    pub fn advance(
        &mut self,
        position: Vec3,
        intent: MoveIntent,
        jump_held: bool,
        delta: f32,
        obstacles: &[Obstacle],
        tuning: &PlayerTuning,
    ) -> Vec3 {
        advance_player(position, self.heading, &mut self.jump, intent, jump_held, delta, obstacles, tuning)
    }

    #[must_use]
    pub fn aim(&self, position: Vec3, mouse_ray: Option<Ray3d>, tuning: &PlayerTuning) -> (Vec3, Vec3) {
        aim_ray(self.camera.mode, position, self.heading, self.pitch, mouse_ray, tuning.eye_height)
    }
}
