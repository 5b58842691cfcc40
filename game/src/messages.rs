use bevy_ecs::prelude::*;
use bevy_math::{Vec2, Vec3};

use common::{
    camera::CameraMode,
    types::{GameState, Obstacle, WeaponType},
};

// ============================================================================
// Render Collaborator
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisualKind {
    Player,
    Balloon,
    Dart,
    Coin,
    FlyingCoin,
    Heart,
    KatanaPickup,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleKind {
    MuzzleFlash,
    BalloonPop,
    CoinSparkle,
    HeartSparkle,
    UpgradeSparkle,
}

// Requests to the renderer. Continuous motion is read from `Position` components.
#[derive(Message, Debug, Clone, PartialEq)]
pub enum RenderCommand {
    SpawnVisual {
        entity: Entity,
        kind: VisualKind,
        position: Vec3,
        color: [f32; 4],
        scale: f32,
    },
    UpdateVisual {
        entity: Entity,
        scale: f32,
        opacity: f32,
    },
    DestroyVisual {
        entity: Entity,
    },
    Scenery {
        obstacle: Obstacle,
        color: [f32; 4],
    },
    Particle {
        kind: ParticleKind,
        position: Vec3,
        color: [f32; 4],
    },
    EquipWeapon(WeaponType),
    SwingKatana,
    FieldOfView(f32),
    CameraTilt {
        roll: f32,
    },
}

// ============================================================================
// UI Collaborator
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HudSnapshot {
    pub score: u32,
    pub coins: u32,
    pub weapon: &'static str,
    pub camera: &'static str,
    pub hearts: u32,
    pub state: GameState,
    pub katana_for_sale: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    Player,
    Balloon,
}

#[derive(Message, Debug, Clone, PartialEq)]
pub enum UiUpdate {
    Hud(HudSnapshot),
    MinimapMarker {
        entity: Entity,
        kind: MarkerKind,
        map_position: Vec2,
        heading: f32,
    },
    RemoveMarker {
        entity: Entity,
    },
    CameraPolicy {
        mode: CameraMode,
        cursor_visible: bool,
        crosshair_visible: bool,
    },
    StateChanged(GameState),
    // Pulse intensity in [0.2, 1.0] while a balloon is close, None once clear.
    Alert(Option<f32>),
}

// ============================================================================
// Host Commands
// ============================================================================

#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    StartGame,
    RestartGame,
    ReturnToMenu,
    TogglePause,
    BuyKatana,
    SelectWeapon(WeaponType),
}

// ============================================================================
// Internal Messages
// ============================================================================

// A new round began; entities and the player get reset.
#[derive(Message, Debug, Clone, Copy)]
pub struct RoundStarted;

// A katana swing to resolve against live balloons.
#[derive(Message, Debug, Clone, Copy)]
pub struct MeleeSwing {
    pub origin: Vec2,
    pub facing: Vec2,
    pub damage: u32,
}
