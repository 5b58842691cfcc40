use anyhow::{Context, Result, ensure};
use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::constants::*;

// ============================================================================
// Tunable Game Configuration
// ============================================================================

// Every gameplay tunable, loadable from a JSON file that overrides any subset.
#[derive(Resource, Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub player: PlayerTuning,
    pub weapons: WeaponTuning,
    pub balloons: BalloonTuning,
    pub pickups: PickupTuning,
    pub scene: SceneTuning,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub speed: f32,
    pub jump_speed: f32,
    pub gravity: f32,
    pub jump_hold_gravity_scale: f32,
    pub max_jump_hold_time: f32,
    pub max_jump_buffer_time: f32,
    pub play_bound: f32,
    pub max_health: u32,
    pub eye_height: f32,
    pub invulnerability_time: f32,
    pub camera_tilt_time: f32,
    pub camera_tilt_roll: f32,
    pub mouse_sensitivity: f32,
    pub max_pitch: f32,
    pub fov_normal: f32,
    pub fov_zoomed: f32,
    pub zoom_speed: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            speed: PLAYER_SPEED,
            jump_speed: JUMP_SPEED,
            gravity: GRAVITY,
            jump_hold_gravity_scale: JUMP_HOLD_GRAVITY_SCALE,
            max_jump_hold_time: MAX_JUMP_HOLD_TIME,
            max_jump_buffer_time: MAX_JUMP_BUFFER_TIME,
            play_bound: PLAY_BOUND,
            max_health: PLAYER_MAX_HEALTH,
            eye_height: PLAYER_EYE_HEIGHT,
            invulnerability_time: PLAYER_INVULNERABILITY_TIME,
            camera_tilt_time: CAMERA_TILT_TIME,
            camera_tilt_roll: CAMERA_TILT_ROLL,
            mouse_sensitivity: MOUSE_SENSITIVITY,
            max_pitch: MAX_PITCH,
            fov_normal: FOV_NORMAL,
            fov_zoomed: FOV_ZOOMED,
            zoom_speed: ZOOM_SPEED,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponTuning {
    pub dart: RangedWeapon,
    pub katana: MeleeWeapon,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RangedWeapon {
    pub damage: u32,
    pub speed: f32,
    pub cooldown: f32,
    pub max_distance: f32,
    pub hit_radius: f32,
}

impl Default for RangedWeapon {
    fn default() -> Self {
        Self {
            damage: DART_DAMAGE,
            speed: DART_SPEED,
            cooldown: DART_COOLDOWN,
            max_distance: PROJECTILE_MAX_DISTANCE,
            hit_radius: PROJECTILE_HIT_RADIUS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeleeWeapon {
    pub damage: u32,
    pub cooldown: f32,
    pub range: f32,
    pub cone_half_angle: f32, // degrees
    pub price: u32,
}

impl Default for MeleeWeapon {
    fn default() -> Self {
        Self {
            damage: KATANA_DAMAGE,
            cooldown: KATANA_COOLDOWN,
            range: KATANA_RANGE,
            cone_half_angle: KATANA_CONE_HALF_ANGLE,
            price: KATANA_PRICE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BalloonTuning {
    pub spawn_interval: f32,
    pub base_cap: u32,
    pub score_per_extra: u32,
    pub spawn_distance_min: f32,
    pub spawn_distance_max: f32,
    pub spawn_height: f32,
    pub spawn_height_variation: f32,
    pub min_height: f32,
    pub base_speed: f32,
    pub score_speed_divisor: f32,
    pub contact_radius: f32,
    pub bob_amplitude: f32,
    pub bob_frequency: f32,
    pub growth_interval: f32,
    pub growth_factor: f32,
    pub max_scale: f32,
    pub coin_drop_chance: f64,
    pub alert_distance: f32,
    pub alert_pulse_speed: f32,
}

impl Default for BalloonTuning {
    fn default() -> Self {
        Self {
            spawn_interval: BALLOON_SPAWN_INTERVAL,
            base_cap: BALLOON_BASE_CAP,
            score_per_extra: BALLOON_SCORE_PER_EXTRA,
            spawn_distance_min: BALLOON_SPAWN_DISTANCE_MIN,
            spawn_distance_max: BALLOON_SPAWN_DISTANCE_MAX,
            spawn_height: BALLOON_SPAWN_HEIGHT,
            spawn_height_variation: BALLOON_SPAWN_HEIGHT_VARIATION,
            min_height: BALLOON_MIN_HEIGHT,
            base_speed: BALLOON_BASE_SPEED,
            score_speed_divisor: BALLOON_SCORE_SPEED_DIVISOR,
            contact_radius: BALLOON_CONTACT_RADIUS,
            bob_amplitude: BALLOON_BOB_AMPLITUDE,
            bob_frequency: BALLOON_BOB_FREQUENCY,
            growth_interval: BALLOON_GROWTH_INTERVAL,
            growth_factor: BALLOON_GROWTH_FACTOR,
            max_scale: BALLOON_MAX_SCALE,
            coin_drop_chance: BALLOON_COIN_DROP_CHANCE,
            alert_distance: BALLOON_ALERT_DISTANCE,
            alert_pulse_speed: BALLOON_ALERT_PULSE_SPEED,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickupTuning {
    pub height: f32,
    pub spawn_clearance: f32,
    pub extent: f32,
    pub coin_count: u32,
    pub coin_extent: f32,
    pub coin_radius: f32,
    pub coin_value: u32,
    pub flying_coin_value: u32,
    pub flying_coin_flight_time: f32,
    pub heart_count: u32,
    pub heart_radius: f32,
    pub katana_count: u32,
    pub katana_radius: f32,
}

impl Default for PickupTuning {
    fn default() -> Self {
        Self {
            height: PICKUP_HEIGHT,
            spawn_clearance: PICKUP_SPAWN_CLEARANCE,
            extent: PICKUP_EXTENT,
            coin_count: TERRAIN_COIN_COUNT,
            coin_extent: TERRAIN_COIN_EXTENT,
            coin_radius: TERRAIN_COIN_RADIUS,
            coin_value: TERRAIN_COIN_VALUE,
            flying_coin_value: FLYING_COIN_VALUE,
            flying_coin_flight_time: FLYING_COIN_FLIGHT_TIME,
            heart_count: HEART_COUNT,
            heart_radius: HEART_RADIUS,
            katana_count: KATANA_PICKUP_COUNT,
            katana_radius: KATANA_PICKUP_RADIUS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstacleShape {
    pub radius: f32,
    pub height: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneTuning {
    pub extent: f32,
    pub obstacle_sets: u32,
    pub spawn_clearance: f32,
    pub tree: ObstacleShape,
    pub rock: ObstacleShape,
    pub bush: ObstacleShape,
}

impl Default for SceneTuning {
    fn default() -> Self {
        Self {
            extent: SCENE_EXTENT,
            obstacle_sets: SCENE_OBSTACLE_SETS,
            spawn_clearance: SCENE_SPAWN_CLEARANCE,
            tree: ObstacleShape {
                radius: TREE_RADIUS,
                height: TREE_HEIGHT,
            },
            rock: ObstacleShape {
                radius: ROCK_RADIUS,
                height: ROCK_HEIGHT,
            },
            bush: ObstacleShape {
                radius: BUSH_RADIUS,
                height: BUSH_HEIGHT,
            },
        }
    }
}

// ============================================================================
// Loading & Validation
// ============================================================================

impl GameConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
        let config = Self::from_json(&text).with_context(|| format!("Invalid config in {}", path.display()))?;
        Ok(config)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text).context("Failed to parse config JSON")?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize config")
    }

    pub fn validate(&self) -> Result<()> {
        let player = &self.player;
        ensure!(player.speed >= 0.0, "player.speed must not be negative");
        ensure!(player.gravity > 0.0, "player.gravity must be positive");
        ensure!(player.jump_speed > 0.0, "player.jump_speed must be positive");
        ensure!(
            (0.0..=1.0).contains(&player.jump_hold_gravity_scale),
            "player.jump_hold_gravity_scale must be within [0, 1]"
        );
        ensure!(player.play_bound > 0.0, "player.play_bound must be positive");
        ensure!(player.max_health > 0, "player.max_health must be at least 1");
        ensure!(
            player.fov_zoomed > 0.0 && player.fov_normal > 0.0,
            "field of view values must be positive"
        );

        let weapons = &self.weapons;
        ensure!(weapons.dart.speed > 0.0, "weapons.dart.speed must be positive");
        ensure!(
            weapons.dart.cooldown >= 0.0 && weapons.katana.cooldown >= 0.0,
            "weapon cooldowns must not be negative"
        );
        ensure!(weapons.katana.range > 0.0, "weapons.katana.range must be positive");
        ensure!(
            weapons.katana.cone_half_angle > 0.0 && weapons.katana.cone_half_angle < 180.0,
            "weapons.katana.cone_half_angle must be within (0, 180) degrees"
        );

        let balloons = &self.balloons;
        ensure!(balloons.spawn_interval > 0.0, "balloons.spawn_interval must be positive");
        ensure!(balloons.growth_interval > 0.0, "balloons.growth_interval must be positive");
        ensure!(balloons.score_per_extra > 0, "balloons.score_per_extra must be at least 1");
        ensure!(balloons.score_speed_divisor > 0.0, "balloons.score_speed_divisor must be positive");
        ensure!(
            balloons.spawn_distance_min <= balloons.spawn_distance_max,
            "balloons.spawn_distance_min ({}) exceeds spawn_distance_max ({})",
            balloons.spawn_distance_min,
            balloons.spawn_distance_max
        );
        ensure!(
            (0.0..=1.0).contains(&balloons.coin_drop_chance),
            "balloons.coin_drop_chance must be a probability"
        );

        let pickups = &self.pickups;
        ensure!(
            pickups.flying_coin_flight_time > 0.0,
            "pickups.flying_coin_flight_time must be positive"
        );
        ensure!(
            pickups.extent > 0.0 && pickups.coin_extent > 0.0,
            "pickup extents must be positive"
        );

        ensure!(self.scene.extent > 0.0, "scene.extent must be positive");
        Ok(())
    }
}
