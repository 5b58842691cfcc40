use bevy_ecs::component::Component;
use bevy_math::{Vec2, Vec3};

// ============================================================================
// Common Data Types
// ============================================================================

// World position in meters. Y is up, the ground plane is XZ.
#[derive(Debug, Clone, Copy, Component, PartialEq, Default)]
pub struct Position(pub Vec3);

impl Position {
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self(Vec3::new(x, y, z))
    }

    #[must_use]
    pub const fn planar(&self) -> Vec2 {
        Vec2::new(self.0.x, self.0.z)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameState {
    #[default]
    Menu,
    Playing,
    Paused,
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WeaponType {
    #[default]
    Dart,
    Katana,
}

impl WeaponType {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Dart => "Dart",
            Self::Katana => "Katana",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PickupKind {
    Coin,
    Heart,
    Katana,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObstacleKind {
    Tree,
    Rock,
    Bush,
}

// Static cylinder collider placed once at scene setup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    pub position: Vec2, // footprint center on the XZ plane
    pub collision_radius: f32,
    pub height: f32,
}

impl Obstacle {
    #[must_use]
    pub const fn new(kind: ObstacleKind, position: Vec2, collision_radius: f32, height: f32) -> Self {
        Self {
            kind,
            position,
            collision_radius,
            height,
        }
    }

    #[must_use]
    pub fn contains(&self, point: Vec2) -> bool {
        point.distance_squared(self.position) < self.collision_radius * self.collision_radius
    }
}
