use bevy_math::Vec2;

// ============================================================================
// Host Loop
// ============================================================================

pub const FRAME_RATE: u32 = 60; // default headless tick rate (Hz)
pub const LOG_FILTER: &str = "info";

// ============================================================================
// Minimap
// ============================================================================

pub const MINIMAP_CENTER: Vec2 = Vec2::new(0.15, -0.15); // screen-space frame center
pub const MINIMAP_RADIUS: f32 = 0.14; // screen-space half extent
pub const MINIMAP_SCALE: f32 = MINIMAP_RADIUS / common::constants::PLAY_BOUND;

// ============================================================================
// Cosmetics
// ============================================================================

pub const PLAYER_COLOR: [f32; 4] = [0.6, 0.45, 0.3, 1.0];
pub const DART_COLOR: [f32; 4] = [0.8, 0.8, 0.0, 1.0];
pub const COIN_COLOR: [f32; 4] = [1.0, 0.84, 0.0, 1.0];
pub const HEART_COLOR: [f32; 4] = [1.0, 0.2, 0.3, 1.0];
pub const KATANA_COLOR: [f32; 4] = [0.8, 0.8, 0.8, 1.0];
pub const TREE_COLOR: [f32; 4] = [0.2, 0.6, 0.2, 1.0];
pub const ROCK_COLOR: [f32; 4] = [0.5, 0.5, 0.5, 1.0];
pub const BUSH_COLOR: [f32; 4] = [0.6, 0.1, 0.2, 1.0];
pub const DART_SCALE: f32 = 0.5;
pub const COIN_SCALE: f32 = 0.5;
pub const PICKUP_SCALE: f32 = 0.6;

// Autopilot
pub const AUTOPILOT_TURN_GAIN: f32 = 0.25; // fraction of the heading error corrected per frame
pub const AUTOPILOT_CAMERA_PERIOD: f32 = 15.0; // seconds between camera switches
pub const AUTOPILOT_JUMP_PERIOD: f32 = 3.0; // seconds between jumps
