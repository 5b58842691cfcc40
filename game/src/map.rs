use bevy_math::Vec2;
use rand::Rng;

use crate::constants::{BUSH_COLOR, ROCK_COLOR, TREE_COLOR};
use common::{
    config::{ObstacleShape, SceneTuning},
    spawning::random_ground_position,
    types::{Obstacle, ObstacleKind},
};

// ============================================================================
// Scenery Generation
// ============================================================================

// Scatters one tree, rock and bush per set across the scene, keeping the
// player's spawn point clear.
pub fn generate_scenery<R: Rng + ?Sized>(rng: &mut R, tuning: &SceneTuning) -> Vec<Obstacle> {
    let kinds = [
        (ObstacleKind::Tree, tuning.tree),
        (ObstacleKind::Rock, tuning.rock),
        (ObstacleKind::Bush, tuning.bush),
    ];

    let mut obstacles = Vec::with_capacity(tuning.obstacle_sets as usize * kinds.len());
    for _ in 0..tuning.obstacle_sets {
        for (kind, ObstacleShape { radius, height }) in kinds {
            // The clearance is measured to the footprint edge, not the center
            let clearance = tuning.spawn_clearance + radius;
            let position = random_ground_position(rng, tuning.extent, Vec2::ZERO, clearance);
            obstacles.push(Obstacle::new(kind, position, radius, height));
        }
    }
    obstacles
}

#[must_use]
pub const fn scenery_color(kind: ObstacleKind) -> [f32; 4] {
    match kind {
        ObstacleKind::Tree => TREE_COLOR,
        ObstacleKind::Rock => ROCK_COLOR,
        ObstacleKind::Bush => BUSH_COLOR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn scenery_has_every_kind_and_a_clear_spawn() {
        let mut rng = StdRng::seed_from_u64(1);
        let tuning = SceneTuning::default();
        let obstacles = generate_scenery(&mut rng, &tuning);

        assert_eq!(obstacles.len(), 150);
        for kind in [ObstacleKind::Tree, ObstacleKind::Rock, ObstacleKind::Bush] {
            assert_eq!(obstacles.iter().filter(|o| o.kind == kind).count(), 50);
        }
        assert!(obstacles.iter().all(|o| !o.contains(Vec2::ZERO)));
        assert!(obstacles.iter().all(|o| o.position.x.abs() <= 75.0 && o.position.y.abs() <= 75.0));
    }
}
