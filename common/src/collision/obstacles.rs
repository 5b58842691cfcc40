use bevy_math::{Vec2, Vec3};

use crate::{constants::*, types::Obstacle};

// Result of testing a candidate player position against the obstacle registry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ObstacleContact {
    // No obstacle under the candidate position, ground is the terrain.
    Open,
    // Entered an obstacle from outside while below its top; the move must be reverted.
    Blocked,
    // Standing over (or already inside) an obstacle, its top is the walkable surface.
    Surface(f32),
}

impl ObstacleContact {
    #[must_use]
    pub const fn is_blocked(self) -> bool {
        matches!(self, Self::Blocked)
    }

    #[must_use]
    pub const fn ground_height(self) -> f32 {
        match self {
            Self::Surface(height) => height,
            Self::Open | Self::Blocked => GROUND_LEVEL,
        }
    }
}

// Only the first obstacle containing the candidate is considered, overlapping
// colliders are not resolved against each other.
#[must_use]
pub fn check_obstacles(old: Vec3, candidate: Vec3, obstacles: &[Obstacle]) -> ObstacleContact {
    let candidate_planar = Vec2::new(candidate.x, candidate.z);
    let Some(obstacle) = obstacles.iter().find(|o| o.contains(candidate_planar)) else {
        return ObstacleContact::Open;
    };

    let was_inside = obstacle.contains(Vec2::new(old.x, old.z));
    let feet = candidate.y + GROUND_EPSILON;
    if !was_inside && feet < obstacle.height {
        ObstacleContact::Blocked
    } else {
        ObstacleContact::Surface(obstacle.height)
    }
}

// Height of the walkable surface under a planar point.
#[must_use]
pub fn ground_height_at(point: Vec2, obstacles: &[Obstacle]) -> f32 {
    obstacles
        .iter()
        .find(|o| o.contains(point))
        .map_or(GROUND_LEVEL, |o| o.height)
}
