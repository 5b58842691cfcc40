// ============================================================================
// Floating-Point Comparisons
// ============================================================================

// Small value for floating-point comparisons (near-zero checks, division guards).
pub const PHYSICS_EPSILON: f32 = 1e-6;

// Tolerance used when deciding whether feet rest on a surface.
pub const GROUND_EPSILON: f32 = 0.01;

// ============================================================================
// Play Area
// ============================================================================

pub const PLAY_BOUND: f32 = 75.0; // Player and balloons stay within ±PLAY_BOUND on X and Z
pub const GROUND_LEVEL: f32 = 0.0;

// ============================================================================
// Player
// ============================================================================

pub const PLAYER_SPEED: f32 = 8.0; // meters per second, per held direction
pub const PLAYER_MAX_HEALTH: u32 = 3;
pub const PLAYER_EYE_HEIGHT: f32 = 1.7;
pub const PLAYER_INVULNERABILITY_TIME: f32 = 1.5; // seconds after a balloon contact
pub const CAMERA_TILT_TIME: f32 = 0.3; // seconds
pub const CAMERA_TILT_ROLL: f32 = 10.0; // degrees

// Weapon holder offset relative to the player root (right, up, forward)
pub const WEAPON_HOLDER_RIGHT: f32 = 0.4;
pub const WEAPON_HOLDER_UP: f32 = 1.2;
pub const WEAPON_HOLDER_FORWARD: f32 = 0.3;

// Jumping
pub const JUMP_SPEED: f32 = 7.0; // initial vertical velocity
pub const GRAVITY: f32 = 22.0; // meters per second squared
pub const JUMP_HOLD_GRAVITY_SCALE: f32 = 0.3; // gravity multiplier while jump is held early in the jump
pub const MAX_JUMP_HOLD_TIME: f32 = 0.4; // seconds of floaty ascent
pub const MAX_JUMP_BUFFER_TIME: f32 = 0.2; // release gap still counted as holding

// ============================================================================
// Camera
// ============================================================================

pub const MOUSE_SENSITIVITY: f32 = 0.2;
pub const MAX_PITCH: f32 = 80.0; // degrees
pub const FOV_NORMAL: f32 = 60.0; // degrees
pub const FOV_ZOOMED: f32 = 30.0; // degrees
pub const ZOOM_SPEED: f32 = 8.0; // configuration only, zoom snaps instantly

pub const THIRD_PERSON_HEIGHT: f32 = 3.0;
pub const THIRD_PERSON_HEIGHT_MIN: f32 = 2.0;
pub const THIRD_PERSON_HEIGHT_MAX: f32 = 6.0;
pub const TOP_DOWN_HEIGHT: f32 = 15.0;
pub const TOP_DOWN_HEIGHT_MIN: f32 = 5.0;
pub const TOP_DOWN_HEIGHT_MAX: f32 = 20.0;

// ============================================================================
// Weapons
// ============================================================================

pub const DART_DAMAGE: u32 = 1;
pub const DART_SPEED: f32 = 30.0; // meters per second
pub const DART_COOLDOWN: f32 = 0.3; // seconds

pub const KATANA_DAMAGE: u32 = 2;
pub const KATANA_COOLDOWN: f32 = 0.6; // seconds
pub const KATANA_RANGE: f32 = 8.0; // meters
pub const KATANA_CONE_HALF_ANGLE: f32 = 30.0; // degrees
pub const KATANA_PRICE: u32 = 50; // coins

pub const PROJECTILE_MAX_DISTANCE: f32 = 50.0; // from the player
pub const PROJECTILE_HIT_RADIUS: f32 = 1.5;
pub const MUZZLE_FLASH_OFFSET: f32 = 0.5;

// ============================================================================
// Balloons
// ============================================================================

pub const BALLOON_SPAWN_INTERVAL: f32 = 1.0; // seconds
pub const BALLOON_BASE_CAP: u32 = 10;
pub const BALLOON_SCORE_PER_EXTRA: u32 = 10; // one more balloon allowed per this many points
pub const BALLOON_SPAWN_DISTANCE_MIN: f32 = 40.0;
pub const BALLOON_SPAWN_DISTANCE_MAX: f32 = 60.0;
pub const BALLOON_SPAWN_HEIGHT: f32 = 2.0;
pub const BALLOON_SPAWN_HEIGHT_VARIATION: f32 = 4.0;
pub const BALLOON_MIN_HEIGHT: f32 = 1.0;
pub const BALLOON_BASE_SPEED: f32 = 2.0;
pub const BALLOON_SCORE_SPEED_DIVISOR: f32 = 100.0;
pub const BALLOON_CONTACT_RADIUS: f32 = 1.5;
pub const BALLOON_BOB_AMPLITUDE: f32 = 0.02;
pub const BALLOON_BOB_FREQUENCY: f32 = 2.0;
pub const BALLOON_GROWTH_INTERVAL: f32 = 10.0; // seconds
pub const BALLOON_GROWTH_FACTOR: f32 = 1.1;
pub const BALLOON_MAX_SCALE: f32 = 10.0;
pub const BALLOON_COIN_DROP_CHANCE: f64 = 0.3;
pub const BALLOON_ALERT_DISTANCE: f32 = 6.0;
pub const BALLOON_ALERT_PULSE_SPEED: f32 = 2.0;

// ============================================================================
// Pickups
// ============================================================================

pub const PICKUP_HEIGHT: f32 = 0.5;
pub const PICKUP_SPAWN_CLEARANCE: f32 = 4.0; // keep fresh pickups away from the player

pub const TERRAIN_COIN_COUNT: u32 = 20;
pub const TERRAIN_COIN_EXTENT: f32 = 35.0;
pub const TERRAIN_COIN_RADIUS: f32 = 2.5;
pub const TERRAIN_COIN_VALUE: u32 = 5;

pub const FLYING_COIN_VALUE: u32 = 3;
pub const FLYING_COIN_FLIGHT_TIME: f32 = 1.0; // seconds

pub const HEART_COUNT: u32 = 3;
pub const HEART_RADIUS: f32 = 1.5;

pub const KATANA_PICKUP_COUNT: u32 = 2;
pub const KATANA_PICKUP_RADIUS: f32 = 1.5;

pub const PICKUP_EXTENT: f32 = 75.0;

// ============================================================================
// Scene
// ============================================================================

pub const SCENE_EXTENT: f32 = 75.0;
pub const SCENE_OBSTACLE_SETS: u32 = 50; // one tree, rock and bush per set
pub const SCENE_SPAWN_CLEARANCE: f32 = 4.0;

pub const TREE_RADIUS: f32 = 1.5;
pub const TREE_HEIGHT: f32 = 3.0;
pub const ROCK_RADIUS: f32 = 2.0;
pub const ROCK_HEIGHT: f32 = 0.5;
pub const BUSH_RADIUS: f32 = 2.0;
pub const BUSH_HEIGHT: f32 = 1.7;
