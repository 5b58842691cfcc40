use bevy_math::{Vec2, Vec3};
use rand::Rng;
use std::f32::consts::TAU;

use crate::config::BalloonTuning;

// ============================================================================
// Balloon Placement
// ============================================================================

// Random point on a ring around the player, clamped to the play area, at a
// randomized float height.
pub fn balloon_spawn_position<R: Rng + ?Sized>(
    rng: &mut R,
    player: Vec3,
    tuning: &BalloonTuning,
    play_bound: f32,
) -> Vec3 {
    let angle = rng.random_range(0.0..TAU);
    let distance = if tuning.spawn_distance_max > tuning.spawn_distance_min {
        rng.random_range(tuning.spawn_distance_min..tuning.spawn_distance_max)
    } else {
        tuning.spawn_distance_min
    };
    let height = if tuning.spawn_height_variation > 0.0 {
        tuning.spawn_height + rng.random_range(0.0..tuning.spawn_height_variation)
    } else {
        tuning.spawn_height
    };

    Vec3::new(
        distance.mul_add(angle.cos(), player.x).clamp(-play_bound, play_bound),
        height,
        distance.mul_add(angle.sin(), player.z).clamp(-play_bound, play_bound),
    )
}

// ============================================================================
// Pickup & Scenery Placement
// ============================================================================

// Uniform point in the ±extent square that keeps `clearance` away from `avoid`.
// Gives up after a bounded number of draws and keeps the last candidate.
pub fn random_ground_position<R: Rng + ?Sized>(rng: &mut R, extent: f32, avoid: Vec2, clearance: f32) -> Vec2 {
    const MAX_ATTEMPTS: usize = 100;
    let mut candidate = avoid;
    for _ in 0..MAX_ATTEMPTS {
        candidate = Vec2::new(rng.random_range(-extent..=extent), rng.random_range(-extent..=extent));
        if candidate.distance_squared(avoid) >= clearance * clearance {
            break;
        }
    }
    candidate
}
