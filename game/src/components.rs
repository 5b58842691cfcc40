use bevy_ecs::prelude::*;
use bevy_math::Vec3;

use common::types::PickupKind;

// World-placed collectible tested against the player every frame.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Pickup {
    pub kind: PickupKind,
    pub radius: f32,
}

// Coin dropped by a popped balloon, eased toward where the player stood.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct FlyingCoin {
    pub start: Vec3,
    pub target: Vec3,
    pub elapsed: f32,
    pub duration: f32,
}

impl FlyingCoin {
    #[must_use]
    pub const fn new(start: Vec3, target: Vec3, duration: f32) -> Self {
        Self {
            start,
            target,
            elapsed: 0.0,
            duration,
        }
    }

    // Advances the flight; returns the new position and whether it arrived.
    pub fn advance(&mut self, delta: f32) -> (Vec3, bool) {
        self.elapsed += delta;
        let t = if self.duration > 0.0 {
            (self.elapsed / self.duration).min(1.0)
        } else {
            1.0
        };
        // Ease-in
        let eased = t * t;
        (self.start.lerp(self.target, eased), t >= 1.0)
    }
}
