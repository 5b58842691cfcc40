use bevy_ecs::prelude::*;
use bevy_math::Vec2;
use tracing::trace;

use crate::{
    constants::{MINIMAP_CENTER, MINIMAP_SCALE},
    messages::{HudSnapshot, MarkerKind, RenderCommand, UiUpdate},
    resources::GameSession,
};
use common::{
    config::GameConfig,
    markers::*,
    players::PlayerState,
    types::{Position, WeaponType},
};

// ============================================================================
// HUD
// ============================================================================

// Screen-space minimap point for a world position; north (+Z) is up.
#[must_use]
pub fn minimap_position(world: &Position) -> Vec2 {
    MINIMAP_CENTER + Vec2::new(world.0.x, -world.0.z) * MINIMAP_SCALE
}

// Sends a HUD snapshot whenever any displayed value changed.
pub fn hud_system(
    session: Res<GameSession>,
    config: Res<GameConfig>,
    players: Query<&PlayerState, With<PlayerMarker>>,
    mut last: Local<Option<HudSnapshot>>,
    mut ui: MessageWriter<UiUpdate>,
) {
    let Ok(player) = players.single() else {
        return;
    };
    let snapshot = HudSnapshot {
        score: session.score,
        coins: session.coins,
        weapon: session.loadout.current().name(),
        camera: player.camera.mode.name(),
        hearts: player.health,
        state: session.state,
        katana_for_sale: !session.loadout.owns(WeaponType::Katana) && session.coins >= config.weapons.katana.price,
    };
    if *last == Some(snapshot) {
        return;
    }
    *last = Some(snapshot);
    ui.write(UiUpdate::Hud(snapshot));
}

pub fn minimap_system(
    players: Query<(Entity, &Position, &PlayerState), (With<PlayerMarker>, Changed<Position>)>,
    balloons: Query<(Entity, &Position), (With<BalloonMarker>, Changed<Position>)>,
    mut ui: MessageWriter<UiUpdate>,
) {
    for (entity, position, player) in &players {
        ui.write(UiUpdate::MinimapMarker {
            entity,
            kind: MarkerKind::Player,
            map_position: minimap_position(position),
            heading: player.heading,
        });
    }
    for (entity, position) in &balloons {
        ui.write(UiUpdate::MinimapMarker {
            entity,
            kind: MarkerKind::Balloon,
            map_position: minimap_position(position),
            heading: 0.0,
        });
    }
}

// ============================================================================
// Diagnostics
// ============================================================================

// Mirrors collaborator traffic into the trace log for headless runs.
pub fn log_presentation_system(mut render: MessageReader<RenderCommand>, mut ui: MessageReader<UiUpdate>) {
    for command in render.read() {
        trace!("render: {:?}", command);
    }
    for update in ui.read() {
        trace!("ui: {:?}", update);
    }
}
