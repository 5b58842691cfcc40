use crate::types::Position;

// Collection radius test on the ground plane, height is ignored.
#[must_use]
pub fn overlap_player_vs_pickup(player_pos: &Position, pickup_pos: &Position, collection_radius: f32) -> bool {
    let dx = player_pos.0.x - pickup_pos.0.x;
    let dz = player_pos.0.z - pickup_pos.0.z;
    let dist_sq = dx.mul_add(dx, dz * dz);
    dist_sq <= collection_radius * collection_radius
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlap_ignores_height() {
        let player = Position::new(0.0, 3.0, 0.0);
        let coin = Position::new(2.0, 0.5, 1.0);
        assert!(overlap_player_vs_pickup(&player, &coin, 2.5));
        assert!(!overlap_player_vs_pickup(&player, &coin, 2.0));
    }
}
