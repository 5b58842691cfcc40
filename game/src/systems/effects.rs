use bevy_ecs::prelude::*;
use bevy_time::Time;
use tracing::debug;

use crate::{
    messages::{RenderCommand, UiUpdate},
    resources::{TimedEffect, TimedEvents},
};
use common::{config::GameConfig, markers::*, players::PlayerState, types::Position};

// ============================================================================
// Timed Effects
// ============================================================================

pub fn timed_events_system(
    time: Res<Time>,
    mut timed: ResMut<TimedEvents>,
    mut players: Query<&mut PlayerState, With<PlayerMarker>>,
    mut render: MessageWriter<RenderCommand>,
) {
    for effect in timed.tick(time.delta_secs()) {
        match effect {
            TimedEffect::Invulnerability => {
                if let Ok(mut player) = players.single_mut() {
                    player.invulnerable = false;
                    debug!("invulnerability ended");
                }
            }
            TimedEffect::CameraTilt => {
                render.write(RenderCommand::CameraTilt { roll: 0.0 });
            }
        }
    }
}

// ============================================================================
// Proximity Alert
// ============================================================================

// Pulses while any balloon is within the alert distance and clears once when
// the last one leaves.
pub fn balloon_alert_system(
    time: Res<Time>,
    config: Res<GameConfig>,
    balloons: Query<&Position, (With<BalloonMarker>, Without<PlayerMarker>)>,
    players: Query<&Position, With<PlayerMarker>>,
    mut alerting: Local<bool>,
    mut ui: MessageWriter<UiUpdate>,
) {
    let Ok(player) = players.single() else {
        return;
    };
    let tuning = &config.balloons;
    let limit = tuning.alert_distance * tuning.alert_distance;
    let near = balloons
        .iter()
        .any(|position| position.0.distance_squared(player.0) < limit);

    if near {
        let pulse = (time.elapsed_secs() * tuning.alert_pulse_speed).sin();
        ui.write(UiUpdate::Alert(Some(0.8f32.mul_add(pulse * pulse, 0.2))));
        *alerting = true;
    } else if *alerting {
        ui.write(UiUpdate::Alert(None));
        *alerting = false;
    }
}
