use bevy_ecs::prelude::*;
use bevy_input::ButtonInput;
use bevy_math::{Dir3, Ray3d, Vec2, Vec3};
use bevy_time::Time;
use tracing::debug;

use crate::{
    constants::{AUTOPILOT_CAMERA_PERIOD, AUTOPILOT_JUMP_PERIOD, AUTOPILOT_TURN_GAIN},
    input::{Action, LookInput, MouseRay},
    messages::SessionCommand,
    resources::GameSession,
};
use common::{
    balloons::Balloon,
    camera::{CameraMode, weapon_holder_position},
    config::GameConfig,
    markers::*,
    players::PlayerState,
    types::{Position, WeaponType},
};

// Heading error under which a shot is taken.
const AIM_TOLERANCE: f32 = 5.0; // degrees

// ============================================================================
// Autopilot
// ============================================================================

// Scripted stand-in for a human at the keyboard, used by the headless binary.
// It only acts through the same inputs and session commands a host would send.
#[derive(Resource, Debug, Default)]
pub struct Autopilot {
    pub enabled: bool,
    last_jump: f32,
    last_camera_switch: f32,
}

impl Autopilot {
    #[must_use]
    pub fn enabled() -> Self {
        Self {
            enabled: true,
            ..Default::default()
        }
    }
}

// Degrees in (-180, 180].
fn wrap_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    if wrapped > 180.0 { wrapped - 360.0 } else { wrapped }
}

// Heading that faces `target` from `from` on the ground plane.
#[must_use]
pub fn heading_towards(from: Vec2, target: Vec2) -> f32 {
    let to = target - from;
    to.x.atan2(to.y).to_degrees()
}

pub fn autopilot_system(
    mut autopilot: ResMut<Autopilot>,
    time: Res<Time>,
    config: Res<GameConfig>,
    session: Res<GameSession>,
    mut input: ResMut<ButtonInput<Action>>,
    mut look: ResMut<LookInput>,
    mut mouse: ResMut<MouseRay>,
    balloons: Query<(&Balloon, &Position), With<BalloonMarker>>,
    players: Query<(&Position, &PlayerState), With<PlayerMarker>>,
    mut session_commands: MessageWriter<SessionCommand>,
) {
    if !autopilot.enabled || !session.is_playing() {
        return;
    }
    let Ok((player_pos, player)) = players.single() else {
        return;
    };
    let now = time.elapsed_secs();
    let sensitivity = config.player.mouse_sensitivity;

    // Taps last a single frame
    for action in [Action::Shoot, Action::Jump, Action::SwitchCamera] {
        if input.pressed(action) {
            input.release(action);
        }
    }

    if now - autopilot.last_jump >= AUTOPILOT_JUMP_PERIOD {
        autopilot.last_jump = now;
        input.press(Action::Jump);
    }
    if now - autopilot.last_camera_switch >= AUTOPILOT_CAMERA_PERIOD {
        autopilot.last_camera_switch = now;
        input.press(Action::SwitchCamera);
        debug!("autopilot switching camera");
    }

    let katana = &config.weapons.katana;
    if !session.loadout.owns(WeaponType::Katana) && session.coins >= katana.price {
        session_commands.write(SessionCommand::BuyKatana);
    }

    let nearest = balloons
        .iter()
        .filter(|(balloon, _)| !balloon.is_popped())
        .map(|(_, position)| position.0)
        .min_by(|a, b| {
            a.distance_squared(player_pos.0)
                .total_cmp(&b.distance_squared(player_pos.0))
        });
    let Some(target) = nearest else {
        mouse.0 = None;
        return;
    };

    // Turn toward the target
    let eye = player_pos.0 + Vec3::Y * config.player.eye_height;
    let planar_distance = player_pos.planar().distance(Vec2::new(target.x, target.z));
    let heading_error = wrap_degrees(heading_towards(player_pos.planar(), Vec2::new(target.x, target.z)) - player.heading);
    let pitch_error = (target.y - eye.y).atan2(planar_distance).to_degrees() - player.pitch;
    look.0 = Vec2::new(-heading_error, pitch_error) * AUTOPILOT_TURN_GAIN / sensitivity;

    // Point the cursor at the target for the modes that aim with the mouse
    let holder = weapon_holder_position(player_pos.0, player.heading);
    mouse.0 = match player.camera.mode {
        CameraMode::FirstPerson => None,
        CameraMode::ThirdPerson => Dir3::new(target - holder).ok().map(|dir| Ray3d::new(holder, dir)),
        CameraMode::TopDown => Some(Ray3d::new(Vec3::new(target.x, holder.y + 10.0, target.z), Dir3::NEG_Y)),
    };

    let in_reach = planar_distance <= katana.range;
    let preferred = if session.loadout.owns(WeaponType::Katana) && in_reach {
        WeaponType::Katana
    } else {
        WeaponType::Dart
    };
    if session.loadout.current() != preferred {
        session_commands.write(SessionCommand::SelectWeapon(preferred));
    }

    let aligned = match player.camera.mode {
        CameraMode::TopDown => preferred == WeaponType::Dart || heading_error.abs() < katana.cone_half_angle,
        CameraMode::FirstPerson | CameraMode::ThirdPerson => heading_error.abs() < AIM_TOLERANCE,
    };
    if aligned && !input.just_released(Action::Shoot) {
        input.press(Action::Shoot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heading_matches_forward_vector_convention() {
        assert!((heading_towards(Vec2::ZERO, Vec2::new(0.0, 5.0))).abs() < 1e-4);
        assert!((heading_towards(Vec2::ZERO, Vec2::new(5.0, 0.0)) - 90.0).abs() < 1e-4);
    }

    #[test]
    fn wrap_keeps_shortest_turn() {
        assert!((wrap_degrees(350.0) + 10.0).abs() < 1e-4);
        assert!((wrap_degrees(-190.0) - 170.0).abs() < 1e-4);
        assert!((wrap_degrees(90.0) - 90.0).abs() < 1e-4);
    }
}
