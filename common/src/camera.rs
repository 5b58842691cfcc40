use bevy_math::{Dir3, Ray3d, Vec2, Vec3, primitives::InfinitePlane3d};

use crate::{
    config::PlayerTuning,
    constants::*,
    movement::{aim_vector, forward_vector, right_vector},
};

// ============================================================================
// Camera Modes & Policy Table
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CameraMode {
    #[default]
    FirstPerson,
    ThirdPerson,
    TopDown,
}

// Where a ranged shot takes its direction from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AimSource {
    CameraForward,
    MouseRay,
    MouseGroundPlane,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CameraPolicy {
    pub cursor_visible: bool,
    pub crosshair_visible: bool,
    pub aim: AimSource,
}

impl CameraMode {
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::FirstPerson => Self::ThirdPerson,
            Self::ThirdPerson => Self::TopDown,
            Self::TopDown => Self::FirstPerson,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::FirstPerson => "First-Person",
            Self::ThirdPerson => "Third-Person",
            Self::TopDown => "Top-Down",
        }
    }

    #[must_use]
    pub const fn policy(self) -> CameraPolicy {
        match self {
            Self::FirstPerson => CameraPolicy {
                cursor_visible: false,
                crosshair_visible: true,
                aim: AimSource::CameraForward,
            },
            Self::ThirdPerson => CameraPolicy {
                cursor_visible: true,
                crosshair_visible: false,
                aim: AimSource::MouseRay,
            },
            Self::TopDown => CameraPolicy {
                cursor_visible: true,
                crosshair_visible: false,
                aim: AimSource::MouseGroundPlane,
            },
        }
    }
}

// ============================================================================
// Camera Rig
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraRig {
    pub mode: CameraMode,
    pub fov: f32,
    pub zoomed: bool,
    pub third_person_height: f32,
    pub top_down_height: f32,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self {
            mode: CameraMode::FirstPerson,
            fov: FOV_NORMAL,
            zoomed: false,
            third_person_height: THIRD_PERSON_HEIGHT,
            top_down_height: TOP_DOWN_HEIGHT,
        }
    }
}

impl CameraRig {
    #[must_use]
    pub fn new(tuning: &PlayerTuning) -> Self {
        Self {
            fov: tuning.fov_normal,
            ..Default::default()
        }
    }

    pub const fn cycle_mode(&mut self) -> CameraMode {
        self.mode = self.mode.next();
        self.mode
    }

    // Zoom snaps between the two field-of-view values; returns the new FOV if it changed.
    pub fn set_zoom(&mut self, zoomed: bool, tuning: &PlayerTuning) -> Option<f32> {
        if self.zoomed == zoomed {
            return None;
        }
        self.zoomed = zoomed;
        self.fov = if zoomed { tuning.fov_zoomed } else { tuning.fov_normal };
        Some(self.fov)
    }
}

// Heading/pitch after applying one frame of mouse delta. Vertical motion also
// moves the third-person and top-down camera heights.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Look {
    pub heading: f32,
    pub pitch: f32,
}

pub fn apply_look(look: Look, rig: &mut CameraRig, delta: Vec2, tuning: &PlayerTuning) -> Look {
    let sensitivity = tuning.mouse_sensitivity;
    let height_step = delta.y * sensitivity * 0.1;
    match rig.mode {
        CameraMode::FirstPerson => Look {
            heading: delta.x.mul_add(-sensitivity, look.heading),
            pitch: delta.y.mul_add(sensitivity, look.pitch).clamp(-tuning.max_pitch, tuning.max_pitch),
        },
        CameraMode::ThirdPerson => {
            rig.third_person_height =
                (rig.third_person_height - height_step).clamp(THIRD_PERSON_HEIGHT_MIN, THIRD_PERSON_HEIGHT_MAX);
            Look {
                heading: delta.x.mul_add(-sensitivity, look.heading),
                pitch: delta.y.mul_add(sensitivity, look.pitch).clamp(-tuning.max_pitch, tuning.max_pitch),
            }
        }
        CameraMode::TopDown => {
            rig.top_down_height = (rig.top_down_height - height_step).clamp(TOP_DOWN_HEIGHT_MIN, TOP_DOWN_HEIGHT_MAX);
            look
        }
    }
}

// ============================================================================
// Aiming
// ============================================================================

#[must_use]
pub fn weapon_holder_position(player: Vec3, heading: f32) -> Vec3 {
    player
        + right_vector(heading) * WEAPON_HOLDER_RIGHT
        + Vec3::Y * WEAPON_HOLDER_UP
        + forward_vector(heading) * WEAPON_HOLDER_FORWARD
}

// Origin and unit direction of a ranged shot under the current camera policy.
// Without a mouse ray the shot falls back to the player's forward direction.
#[must_use]
pub fn aim_ray(
    mode: CameraMode,
    player: Vec3,
    heading: f32,
    pitch: f32,
    mouse_ray: Option<Ray3d>,
    eye_height: f32,
) -> (Vec3, Vec3) {
    match mode.policy().aim {
        AimSource::CameraForward => (player + Vec3::Y * eye_height, aim_vector(heading, pitch)),
        AimSource::MouseRay => {
            let origin = weapon_holder_position(player, heading);
            let direction = mouse_ray.map_or_else(|| forward_vector(heading), |ray| *ray.direction);
            (origin, direction)
        }
        AimSource::MouseGroundPlane => {
            let origin = weapon_holder_position(player, heading);
            let direction = mouse_ray
                .and_then(|ray| {
                    let distance = ray.intersect_plane(origin, InfinitePlane3d { normal: Dir3::Y })?;
                    (ray.get_point(distance) - origin).try_normalize()
                })
                .unwrap_or_else(|| forward_vector(heading));
            (origin, direction)
        }
    }
}
