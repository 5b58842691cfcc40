use bevy_ecs::prelude::*;
use bevy_math::Vec3;
use rand::Rng;

use crate::{config::BalloonTuning, constants::PHYSICS_EPSILON};

// ============================================================================
// Palette & Sizes
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BalloonColor {
    pub name: &'static str,
    pub rgba: [f32; 4],
    pub health: u32,
    pub chance: f32,
    pub speed_multiplier: f32,
}

pub const BALLOON_PALETTE: [BalloonColor; 6] = [
    BalloonColor {
        name: "red",
        rgba: [1.0, 0.0, 0.0, 1.0],
        health: 2,
        chance: 0.20,
        speed_multiplier: 1.0,
    },
    BalloonColor {
        name: "green",
        rgba: [0.0, 1.0, 0.0, 1.0],
        health: 2,
        chance: 0.20,
        speed_multiplier: 1.2,
    },
    BalloonColor {
        name: "blue",
        rgba: [0.0, 0.0, 1.0, 1.0],
        health: 3,
        chance: 0.20,
        speed_multiplier: 0.9,
    },
    BalloonColor {
        name: "yellow",
        rgba: [1.0, 1.0, 0.0, 1.0],
        health: 3,
        chance: 0.20,
        speed_multiplier: 1.1,
    },
    BalloonColor {
        name: "purple",
        rgba: [1.0, 0.0, 1.0, 1.0],
        health: 4,
        chance: 0.15,
        speed_multiplier: 0.8,
    },
    BalloonColor {
        name: "cyan",
        rgba: [0.0, 1.0, 1.0, 1.0],
        health: 6,
        chance: 0.05,
        speed_multiplier: 0.7,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BalloonSize {
    Small,
    Medium,
    Large,
}

impl BalloonSize {
    pub const ALL: [Self; 3] = [Self::Small, Self::Medium, Self::Large];

    #[must_use]
    pub const fn scale(self) -> f32 {
        match self {
            Self::Small => 0.2,
            Self::Medium => 0.3,
            Self::Large => 0.4,
        }
    }

    #[must_use]
    pub const fn points(self) -> u32 {
        match self {
            Self::Small => 1,
            Self::Medium => 2,
            Self::Large => 3,
        }
    }

    #[must_use]
    pub const fn speed_multiplier(self) -> f32 {
        match self {
            Self::Small => 1.2,
            Self::Medium => 1.0,
            Self::Large => 0.8,
        }
    }
}

// Cumulative-threshold lookup: the first color whose running chance sum reaches `roll`.
#[must_use]
pub fn color_for_roll(roll: f32) -> &'static BalloonColor {
    let mut sum = 0.0;
    for color in &BALLOON_PALETTE {
        sum += color.chance;
        if roll <= sum {
            return color;
        }
    }
    &BALLOON_PALETTE[BALLOON_PALETTE.len() - 1]
}

pub fn draw_balloon_color<R: Rng + ?Sized>(rng: &mut R) -> &'static BalloonColor {
    let total: f32 = BALLOON_PALETTE.iter().map(|c| c.chance).sum();
    color_for_roll(rng.random_range(0.0..total))
}

pub fn draw_balloon_size<R: Rng + ?Sized>(rng: &mut R) -> BalloonSize {
    BalloonSize::ALL[rng.random_range(0..BalloonSize::ALL.len())]
}

// ============================================================================
// Balloon Component
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    Hit,
    Popped { points: u32 },
    // Health already reached zero earlier this tick; nothing is awarded twice.
    AlreadyPopped,
}

#[derive(Component, Debug, Clone, PartialEq)]
pub struct Balloon {
    pub color: BalloonColor,
    pub size: BalloonSize,
    pub health: u32,
    pub max_health: u32,
    pub points: u32,
    pub speed_multiplier: f32,
    pub growth_scale: f32, // accumulated difficulty growth, 1.0 at spawn
}

impl Balloon {
    #[must_use]
    pub fn new(color: BalloonColor, size: BalloonSize) -> Self {
        Self {
            color,
            size,
            health: color.health,
            max_health: color.health,
            points: size.points(),
            speed_multiplier: size.speed_multiplier() * color.speed_multiplier,
            growth_scale: 1.0,
        }
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let color = *draw_balloon_color(rng);
        let size = draw_balloon_size(rng);
        Self::new(color, size)
    }

    #[must_use]
    pub const fn is_popped(&self) -> bool {
        self.health == 0
    }

    pub const fn take_damage(&mut self, damage: u32) -> DamageOutcome {
        if self.health == 0 {
            return DamageOutcome::AlreadyPopped;
        }
        self.health = self.health.saturating_sub(damage);
        if self.health == 0 {
            DamageOutcome::Popped { points: self.points }
        } else {
            DamageOutcome::Hit
        }
    }

    #[must_use]
    pub fn health_ratio(&self) -> f32 {
        if self.max_health == 0 {
            return 0.0;
        }
        self.health as f32 / self.max_health as f32
    }

    // Shrinks toward half size as health drops.
    #[must_use]
    pub fn visual_scale(&self) -> f32 {
        self.size.scale() * self.growth_scale * 0.5f32.mul_add(self.health_ratio(), 0.5)
    }

    // Fades from opaque to 0.3 as health drops.
    #[must_use]
    pub fn opacity(&self) -> f32 {
        0.7f32.mul_add(self.health_ratio(), 0.3)
    }

    // Periodic difficulty growth: one more hit to pop, and a bigger model until it is huge.
    pub fn grow(&mut self, factor: f32, max_scale: f32) {
        if self.is_popped() {
            return;
        }
        self.health += 1;
        self.max_health += 1;
        if self.size.scale() * self.growth_scale <= max_scale {
            self.growth_scale *= factor;
        }
    }
}

// ============================================================================
// Population & Movement
// ============================================================================

#[must_use]
pub const fn spawn_cap(score: u32, tuning: &BalloonTuning) -> u32 {
    tuning.base_cap + score / tuning.score_per_extra
}

#[must_use]
pub fn balloon_speed(score: u32, speed_multiplier: f32, tuning: &BalloonTuning) -> f32 {
    (tuning.base_speed + score as f32 / tuning.score_speed_divisor) * speed_multiplier
}

// Seek the player in 3D, then add the bob and keep above the minimum height.
#[must_use]
pub fn step_balloon(position: Vec3, target: Vec3, speed: f32, elapsed: f32, delta: f32, tuning: &BalloonTuning) -> Vec3 {
    let to_target = target - position;
    let mut next = if to_target.length_squared() > PHYSICS_EPSILON {
        position + to_target.normalize() * speed * delta
    } else {
        position
    };
    next.y += (elapsed * tuning.bob_frequency).sin() * tuning.bob_amplitude;
    next.y = next.y.max(tuning.min_height);
    next
}
