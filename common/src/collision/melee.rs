use bevy_math::Vec2;

use crate::constants::PHYSICS_EPSILON;

// Planar cone hit-test: the target must be closer than `range` and within
// `half_angle_deg` of the facing direction.
#[must_use]
pub fn in_melee_cone(origin: Vec2, facing: Vec2, target: Vec2, range: f32, half_angle_deg: f32) -> bool {
    let offset = target - origin;
    let dist_sq = offset.length_squared();
    if dist_sq >= range * range {
        return false;
    }
    if dist_sq < PHYSICS_EPSILON {
        return true;
    }

    let Some(facing) = facing.try_normalize() else {
        return false;
    };
    let cos_angle = facing.dot(offset / dist_sq.sqrt()).clamp(-1.0, 1.0);
    cos_angle.acos().to_degrees() <= half_angle_deg
}

// Every target inside the cone, in iteration order. A single swing hits all of them.
#[must_use]
pub fn collect_melee_hits<T>(
    origin: Vec2,
    facing: Vec2,
    targets: impl IntoIterator<Item = (T, Vec2)>,
    range: f32,
    half_angle_deg: f32,
) -> Vec<T> {
    targets
        .into_iter()
        .filter(|(_, position)| in_melee_cone(origin, facing, *position, range, half_angle_deg))
        .map(|(target, _)| target)
        .collect()
}
