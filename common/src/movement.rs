use bevy_math::{Vec2, Vec3};

use crate::{
    collision::{check_obstacles, ground_height_at},
    config::PlayerTuning,
    constants::*,
    types::Obstacle,
};

// ============================================================================
// Direction Vectors
// ============================================================================

// Headings are in degrees: heading 0 faces +Z, heading 90 faces +X.
#[must_use]
pub fn forward_vector(heading: f32) -> Vec3 {
    let h = heading.to_radians();
    Vec3::new(h.sin(), 0.0, h.cos())
}

#[must_use]
pub fn right_vector(heading: f32) -> Vec3 {
    let h = heading.to_radians();
    Vec3::new(-h.cos(), 0.0, h.sin())
}

#[must_use]
pub fn planar_forward(heading: f32) -> Vec2 {
    let forward = forward_vector(heading);
    Vec2::new(forward.x, forward.z)
}

// Unit look direction including pitch (positive pitch looks up).
#[must_use]
pub fn aim_vector(heading: f32, pitch: f32) -> Vec3 {
    let h = heading.to_radians();
    let p = pitch.to_radians();
    Vec3::new(h.sin() * p.cos(), p.sin(), h.cos() * p.cos())
}

// ============================================================================
// Horizontal Movement
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveIntent {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
}

impl MoveIntent {
    #[must_use]
    pub const fn is_idle(self) -> bool {
        !(self.forward || self.backward || self.left || self.right)
    }
}

// Each held direction contributes a full-speed step. Diagonals are not
// normalized, so forward+left covers more ground than forward alone.
#[must_use]
pub fn horizontal_step(heading: f32, intent: MoveIntent, speed: f32, delta: f32) -> Vec3 {
    let forward = forward_vector(heading);
    let right = right_vector(heading);

    let mut step = Vec3::ZERO;
    if intent.forward {
        step += forward;
    }
    if intent.backward {
        step -= forward;
    }
    if intent.left {
        step -= right;
    }
    if intent.right {
        step += right;
    }
    step * speed * delta
}

// ============================================================================
// Jump State Machine
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct JumpState {
    pub vertical_velocity: f32,
    pub is_jumping: bool,
    pub jump_timer: f32,        // time since launch
    pub jump_buffer_timer: f32, // length of the current release gap
    pub hold_released: bool,    // release gap exceeded the buffer, no more floaty ascent this jump
}

impl JumpState {
    #[must_use]
    pub fn is_airborne(&self, y: f32, ground: f32) -> bool {
        self.is_jumping || self.vertical_velocity > 0.0 || y > ground + GROUND_EPSILON
    }

    fn launch(&mut self, jump_speed: f32) {
        self.vertical_velocity = jump_speed;
        self.is_jumping = true;
        self.jump_timer = 0.0;
        self.jump_buffer_timer = 0.0;
        self.hold_released = false;
    }

    fn land(&mut self) {
        *self = Self::default();
    }

    // Advances the vertical axis by one tick and returns the new height.
    pub fn step(&mut self, y: f32, ground: f32, jump_held: bool, delta: f32, tuning: &PlayerTuning) -> f32 {
        if !self.is_airborne(y, ground) {
            if jump_held {
                // Launch tick integrates the full jump speed without gravity
                self.launch(tuning.jump_speed);
                return y.max(ground) + self.vertical_velocity * delta;
            }
            self.vertical_velocity = 0.0;
            return y.max(ground);
        }

        if self.is_jumping {
            self.jump_timer += delta;
            if jump_held {
                self.jump_buffer_timer = 0.0;
            } else {
                self.jump_buffer_timer += delta;
                if self.jump_buffer_timer > tuning.max_jump_buffer_time {
                    self.hold_released = true;
                }
            }
        }

        let floaty =
            self.is_jumping && jump_held && !self.hold_released && self.jump_timer < tuning.max_jump_hold_time;
        let gravity = if floaty {
            tuning.gravity * tuning.jump_hold_gravity_scale
        } else {
            tuning.gravity
        };

        self.vertical_velocity -= gravity * delta;
        let new_y = y + self.vertical_velocity * delta;

        if new_y <= ground + GROUND_EPSILON && self.vertical_velocity <= 0.0 {
            self.land();
            return ground;
        }
        new_y
    }
}

// ============================================================================
// Full Player Step
// ============================================================================

// Horizontal move with hard-revert obstacle collision, then the vertical step
// against whatever surface is underneath, then the play-area clamp.
#[must_use]
pub fn advance_player(
    position: Vec3,
    heading: f32,
    jump: &mut JumpState,
    intent: MoveIntent,
    jump_held: bool,
    delta: f32,
    obstacles: &[Obstacle],
    tuning: &PlayerTuning,
) -> Vec3 {
    if delta <= 0.0 {
        return position;
    }

    let mut next = position;
    if !intent.is_idle() {
        let candidate = position + horizontal_step(heading, intent, tuning.speed, delta);
        if !check_obstacles(position, candidate, obstacles).is_blocked() {
            next = candidate;
        }
    }

    let ground = ground_height_at(Vec2::new(next.x, next.z), obstacles);
    next.y = jump.step(next.y, ground, jump_held, delta, tuning);

    next.x = next.x.clamp(-tuning.play_bound, tuning.play_bound);
    next.z = next.z.clamp(-tuning.play_bound, tuning.play_bound);
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ObstacleKind;

    const DT: f32 = 1.0 / 60.0;

    fn tuning() -> PlayerTuning {
        PlayerTuning::default()
    }

    #[test]
    fn idle_input_never_moves_a_resting_player() {
        let obstacles = vec![
            Obstacle::new(ObstacleKind::Rock, Vec2::new(3.0, 0.0), 2.0, 0.5),
            Obstacle::new(ObstacleKind::Tree, Vec2::new(-10.0, 4.0), 1.5, 3.0),
        ];
        for start in [Vec3::ZERO, Vec3::new(3.0, 0.5, 0.0), Vec3::new(20.0, 0.0, -7.0)] {
            for delta in [0.0, DT, 0.5, 3.0] {
                let mut jump = JumpState::default();
                let next = advance_player(start, 37.0, &mut jump, MoveIntent::default(), false, delta, &obstacles, &tuning());
                assert_eq!(next, start, "start {start:?} delta {delta}");
            }
        }
    }

    #[test]
    fn diagonal_movement_is_not_normalized() {
        let straight = horizontal_step(0.0, MoveIntent { forward: true, ..Default::default() }, 8.0, 1.0);
        let diagonal = horizontal_step(
            0.0,
            MoveIntent {
                forward: true,
                left: true,
                ..Default::default()
            },
            8.0,
            1.0,
        );
        assert!((straight.length() - 8.0).abs() < 1e-4);
        assert!((diagonal.length() - 8.0 * 2f32.sqrt()).abs() < 1e-4);
    }

    #[test]
    fn forward_and_right_are_perpendicular() {
        for heading in [0.0, 45.0, 90.0, 213.0] {
            assert!(forward_vector(heading).dot(right_vector(heading)).abs() < 1e-5);
        }
        assert!((forward_vector(90.0) - Vec3::X).length() < 1e-5);
        assert!((right_vector(0.0) - Vec3::NEG_X).length() < 1e-5);
    }

    #[test]
    fn tapped_jump_follows_full_gravity_arc() {
        let tuning = tuning();
        let mut jump = JumpState::default();
        let mut y = jump.step(0.0, 0.0, true, DT, &tuning);
        assert_eq!(jump.vertical_velocity, tuning.jump_speed);
        assert!(jump.is_jumping);

        let mut elapsed = DT;
        let mut apex = None;
        let mut last_velocity = jump.vertical_velocity;
        while jump.is_jumping {
            y = jump.step(y, 0.0, false, DT, &tuning);
            elapsed += DT;
            if jump.is_jumping {
                assert!(jump.vertical_velocity < last_velocity, "velocity must keep decreasing");
                last_velocity = jump.vertical_velocity;
            }
            if apex.is_none() && jump.vertical_velocity <= 0.0 {
                apex = Some(elapsed);
            }
            assert!(elapsed < 2.0, "jump never landed");
        }

        assert_eq!(y, 0.0);
        assert_eq!(jump.vertical_velocity, 0.0);
        let apex = apex.expect("apex reached");
        assert!((apex - 7.0 / 22.0).abs() < 0.05, "apex at {apex}");
        assert!((elapsed - 14.0 / 22.0).abs() < 0.05, "airtime {elapsed}");
    }

    fn apex_height(hold_ticks: usize) -> f32 {
        let tuning = tuning();
        let mut jump = JumpState::default();
        let mut y = 0.0;
        let mut best: f32 = 0.0;
        for tick in 0..200 {
            y = jump.step(y, 0.0, tick < hold_ticks, DT, &tuning);
            best = best.max(y);
        }
        best
    }

    #[test]
    fn holding_jump_goes_higher() {
        let tapped = apex_height(1);
        let held = apex_height(24);
        assert!(held > tapped + 0.5, "held {held} vs tapped {tapped}");
    }

    #[test]
    fn short_release_gap_keeps_floaty_ascent() {
        let tuning = tuning();
        let mut buffered = JumpState::default();
        let mut y = buffered.step(0.0, 0.0, true, DT, &tuning);
        // release for 6 ticks (0.1 s), then press again
        for _ in 0..6 {
            y = buffered.step(y, 0.0, false, DT, &tuning);
        }
        let _ = buffered.step(y, 0.0, true, DT, &tuning);
        assert!(!buffered.hold_released);

        let mut lapsed = JumpState::default();
        let mut y = lapsed.step(0.0, 0.0, true, DT, &tuning);
        for _ in 0..15 {
            y = lapsed.step(y, 0.0, false, DT, &tuning);
        }
        let _ = lapsed.step(y, 0.0, true, DT, &tuning);
        assert!(lapsed.hold_released);
    }

    #[test]
    fn obstacle_blocks_entry_from_outside() {
        let obstacles = vec![Obstacle::new(ObstacleKind::Tree, Vec2::new(0.0, 3.0), 1.5, 3.0)];
        let mut jump = JumpState::default();
        let forward = MoveIntent { forward: true, ..Default::default() };

        let mut position = Vec3::ZERO;
        for _ in 0..60 {
            position = advance_player(position, 0.0, &mut jump, forward, false, DT, &obstacles, &tuning());
        }
        // Stopped just outside the trunk
        assert!(position.z < 1.5 + 0.2, "walked into the tree: {position:?}");
        assert!(position.z > 1.0);

        let blocked = advance_player(position, 0.0, &mut jump, forward, false, DT, &obstacles, &tuning());
        assert_eq!(blocked, position);
    }

    #[test]
    fn player_on_a_rock_walks_on_top_and_falls_off() {
        let obstacles = vec![Obstacle::new(ObstacleKind::Rock, Vec2::ZERO, 2.0, 0.5)];
        let mut jump = JumpState::default();
        let mut position = Vec3::new(0.0, 0.5, 0.0);
        let forward = MoveIntent { forward: true, ..Default::default() };

        position = advance_player(position, 0.0, &mut jump, forward, false, DT, &obstacles, &tuning());
        assert_eq!(position.y, 0.5);

        for _ in 0..60 {
            position = advance_player(position, 0.0, &mut jump, forward, false, DT, &obstacles, &tuning());
        }
        assert!(position.z > 2.0);
        assert_eq!(position.y, 0.0);
        assert!(!jump.is_airborne(position.y, 0.0));
    }

    #[test]
    fn position_is_clamped_to_play_area() {
        let mut jump = JumpState::default();
        let start = Vec3::new(74.9, 0.0, 0.0);
        let next = advance_player(
            start,
            90.0,
            &mut jump,
            MoveIntent { forward: true, ..Default::default() },
            false,
            1.0,
            &[],
            &tuning(),
        );
        assert_eq!(next.x, PLAY_BOUND);
    }
}
