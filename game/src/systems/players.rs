use bevy_ecs::prelude::*;
use bevy_input::ButtonInput;
use bevy_math::Vec2;
use bevy_time::Time;
use tracing::debug;

use crate::{
    input::{Action, LookInput, move_intent},
    messages::{RenderCommand, UiUpdate},
    resources::{GameSession, ObstacleRegistry},
    systems::session::camera_policy_update,
};
use common::{config::GameConfig, markers::PlayerMarker, players::PlayerState, types::Position};

// ============================================================================
// Look & Camera
// ============================================================================

pub fn player_look_system(
    look: Res<LookInput>,
    config: Res<GameConfig>,
    mut players: Query<&mut PlayerState, With<PlayerMarker>>,
) {
    if look.0 == Vec2::ZERO {
        return;
    }
    if let Ok(mut player) = players.single_mut() {
        player.look(look.0, &config.player);
    }
}

pub fn camera_toggle_system(
    input: Res<ButtonInput<Action>>,
    mut players: Query<&mut PlayerState, With<PlayerMarker>>,
    mut ui: MessageWriter<UiUpdate>,
) {
    if !input.just_pressed(Action::SwitchCamera) {
        return;
    }
    let Ok(mut player) = players.single_mut() else {
        return;
    };
    let mode = player.camera.cycle_mode();
    ui.write(camera_policy_update(mode, true));
    debug!("camera switched to {}", mode.name());
}

// Zoom follows the held button; the field of view snaps on press and release.
pub fn zoom_system(
    input: Res<ButtonInput<Action>>,
    config: Res<GameConfig>,
    mut players: Query<&mut PlayerState, With<PlayerMarker>>,
    mut render: MessageWriter<RenderCommand>,
) {
    let Ok(mut player) = players.single_mut() else {
        return;
    };
    if let Some(fov) = player.camera.set_zoom(input.pressed(Action::Zoom), &config.player) {
        render.write(RenderCommand::FieldOfView(fov));
    }
}

// ============================================================================
// Movement
// ============================================================================

pub fn player_movement_system(
    time: Res<Time>,
    input: Res<ButtonInput<Action>>,
    config: Res<GameConfig>,
    obstacles: Res<ObstacleRegistry>,
    mut players: Query<(&mut Position, &mut PlayerState), With<PlayerMarker>>,
) {
    let delta = time.delta_secs();
    let intent = move_intent(&input);
    let jump_held = input.pressed(Action::Jump);

    for (mut position, mut player) in &mut players {
        let next = player.advance(position.0, intent, jump_held, delta, &obstacles.0, &config.player);
        position.set_if_neq(Position(next));
    }
}

// ============================================================================
// Weapon Switching
// ============================================================================

pub fn weapon_switch_system(
    input: Res<ButtonInput<Action>>,
    mut session: ResMut<GameSession>,
    mut render: MessageWriter<RenderCommand>,
) {
    if !input.just_pressed(Action::SwitchWeapon) {
        return;
    }
    if let Some(weapon) = session.loadout.cycle() {
        render.write(RenderCommand::EquipWeapon(weapon));
        debug!("switched to {}", weapon.name());
    }
}
