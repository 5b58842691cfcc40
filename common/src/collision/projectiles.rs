use bevy_math::Vec3;

#[must_use]
pub fn projectile_hits_balloon(projectile: Vec3, balloon: Vec3, hit_radius: f32) -> bool {
    projectile.distance_squared(balloon) < hit_radius * hit_radius
}

// Range is measured from the player, not from the muzzle.
#[must_use]
pub fn projectile_beyond_range(projectile: Vec3, player: Vec3, max_distance: f32) -> bool {
    projectile.distance_squared(player) > max_distance * max_distance
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_radius_is_exclusive() {
        let balloon = Vec3::new(0.0, 2.0, 10.0);
        assert!(projectile_hits_balloon(Vec3::new(0.0, 2.0, 8.6), balloon, 1.5));
        assert!(!projectile_hits_balloon(Vec3::new(0.0, 2.0, 8.5), balloon, 1.5));
    }

    #[test]
    fn range_follows_the_player() {
        let dart = Vec3::new(0.0, 1.0, 55.0);
        assert!(projectile_beyond_range(dart, Vec3::ZERO, 50.0));
        assert!(!projectile_beyond_range(dart, Vec3::new(0.0, 0.0, 20.0), 50.0));
    }
}
