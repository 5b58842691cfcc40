use bevy_ecs::prelude::*;
use bevy_input::ButtonInput;
use bevy_math::{Ray3d, Vec2};

use common::movement::MoveIntent;

// ============================================================================
// Input Actions
// ============================================================================

// Logical buttons the host maps its keyboard and mouse onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Forward,
    Backward,
    Left,
    Right,
    Jump,
    Zoom,
    Shoot,
    SwitchCamera,
    SwitchWeapon,
    Pause,
}

// Mouse motion accumulated since the last frame. Positive y is mouse up.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct LookInput(pub Vec2);

// World-space ray under the mouse cursor, None when the pointer is outside the window.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct MouseRay(pub Option<Ray3d>);

#[must_use]
pub fn move_intent(input: &ButtonInput<Action>) -> MoveIntent {
    MoveIntent {
        forward: input.pressed(Action::Forward),
        backward: input.pressed(Action::Backward),
        left: input.pressed(Action::Left),
        right: input.pressed(Action::Right),
    }
}

// Clears edge state and consumed mouse motion at the end of every frame.
pub fn clear_input_system(mut input: ResMut<ButtonInput<Action>>, mut look: ResMut<LookInput>) {
    input.clear();
    look.0 = Vec2::ZERO;
}
