use anyhow::{Context, Result};
use clap::Parser;
use std::{
    path::PathBuf,
    thread,
    time::{Duration, Instant},
};
use tracing::{info, warn};

use common::{config::GameConfig, types::GameState};
use monkey_dart::{
    FrameClock,
    autopilot::Autopilot,
    build_app,
    config::{init_tracing, load_config},
    constants::FRAME_RATE,
    messages::SessionCommand,
    resources::GameSession,
    step,
};

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(author, version, about = "Monkey Dart headless runner", long_about = None)]
struct Args {
    // JSON file overriding any subset of the game tunables
    #[arg(short, long)]
    config: Option<PathBuf>,

    // Print the effective configuration as JSON and exit
    #[arg(long, default_value_t = false)]
    print_config: bool,

    // Seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    // Simulated seconds to play before stopping
    #[arg(long, default_value_t = 60.0)]
    seconds: f32,

    // Frames per simulated second
    #[arg(long, default_value_t = FRAME_RATE)]
    hz: u32,

    // Sleep between frames so the run takes wall-clock time
    #[arg(long, default_value_t = false)]
    realtime: bool,
}

// ============================================================================
// Main
// ============================================================================

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing();

    let config = load_config(args.config.as_deref())?;
    if args.print_config {
        println!("{}", config.to_json_pretty()?);
        return Ok(());
    }
    anyhow::ensure!(args.hz > 0, "--hz must be positive");
    anyhow::ensure!(args.seconds > 0.0, "--seconds must be positive");

    run(config, &args)
}

fn run(config: GameConfig, args: &Args) -> Result<()> {
    let mut app = build_app(config, args.seed)?;
    app.insert_resource(Autopilot::enabled());
    app.world_mut().write_message(SessionCommand::StartGame).context("session commands are not registered")?;

    let mut clock = FrameClock::new(args.hz);
    let tick_duration = clock.budget();
    let frames = (args.seconds * args.hz as f32).ceil() as u64;
    info!("running {} frames at {} Hz", frames, args.hz);

    let mut frame: u64 = 0;
    while frame < frames {
        let update_start = Instant::now();
        let delta = clock.next_delta();
        step(&mut app, delta);
        let update_elapsed = update_start.elapsed();

        if update_elapsed > tick_duration {
            warn!(
                "tick {} took {:.2}ms (exceeded {:.2}ms budget)",
                frame,
                update_elapsed.as_secs_f64() * 1000.0,
                tick_duration.as_secs_f64() * 1000.0
            );
        } else if args.realtime {
            thread::sleep(delta.saturating_sub(update_elapsed));
        }

        frame += 1;
        if app.world().resource::<GameSession>().state == GameState::GameOver {
            break;
        }
    }

    let session = app.world().resource::<GameSession>();
    info!(
        "finished after {:.1}s: state {:?}, score {}, coins {}, {} balloons popped, {} shots fired, {} damage taken, {} coins collected",
        frame as f32 / args.hz as f32,
        session.state,
        session.score,
        session.coins,
        session.stats.balloons_popped,
        session.stats.shots_fired,
        session.stats.damage_taken,
        session.stats.coins_collected
    );
    Ok(())
}
