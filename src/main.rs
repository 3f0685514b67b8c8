//! Neon Runner headless driver
//!
//! Plays a scripted run through the simulation, logs what happens, and
//! checks that replaying the same inputs reproduces the final state hash.

use anyhow::{bail, Context, Result};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use neon_runner::{
    FRAME_RATE, VERSION,
    InputFrame, SimConfig, Vec2, WorldSnapshot,
    game::{
        events::GameEventData,
        tick::{new_game, replay, start_game, tick},
    },
};

/// Frames in the demo run (one minute of play).
const DEMO_FRAMES: u32 = 3600;

/// Env var naming a JSON config file.
const CONFIG_ENV: &str = "NEON_RUNNER_CONFIG";

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    info!("Neon Runner Sim v{}", VERSION);

    let config = load_config()?;
    info!(
        "Seed: {} | Viewport: {}x{} | Frame: {} ms ({} Hz nominal)",
        config.seed, config.bounds.width, config.bounds.height, config.frame_ms, FRAME_RATE
    );

    demo_run(&config)
}

fn load_config() -> Result<SimConfig> {
    match std::env::var(CONFIG_ENV) {
        Ok(path) => {
            let config = SimConfig::from_json_file(&path)
                .with_context(|| format!("loading config from {path}"))?;
            info!("Loaded config from {}", path);
            Ok(config)
        }
        Err(_) => Ok(SimConfig::default()),
    }
}

/// Input for frame `t` of the demo: run right, swing, shoot ahead, jump
/// now and then, and dip into bullet-time.
fn demo_input(t: u32, config: &SimConfig) -> InputFrame {
    let mut input = InputFrame::new();
    input.set_right(t % 240 < 200);
    input.set_left(t % 240 >= 220);
    input.set_jump(t % 90 < 10);
    input.set_melee(t % 20 < 2);
    input.set_ranged(t % 45 == 0);
    input.set_bullet_time(t % 600 >= 500);
    input.set_grapple(t % 300 == 150);
    input.aim = Vec2::new(config.bounds.width * 0.8, config.bounds.height * 0.4);
    input
}

fn demo_run(config: &SimConfig) -> Result<()> {
    info!("=== Starting Demo Run ===");

    let mut state = new_game(config);
    start_game(&mut state);

    let inputs: Vec<InputFrame> = (0..DEMO_FRAMES).map(|t| demo_input(t, config)).collect();
    let mut total_events = 0;

    for (t, input) in inputs.iter().enumerate() {
        let result = tick(&mut state, input, config);
        total_events += result.events.len();

        // Report every 10 seconds
        if t % 600 == 0 {
            info!(
                "Frame {}: level {}, {} enemies, health {:.0}, score {}, {} particles",
                state.frame,
                state.level,
                state.enemies.len(),
                state.player.health,
                state.score,
                state.particles.len()
            );
        }

        for event in &result.events {
            match &event.data {
                GameEventData::EnemyKilled { enemy_id, kind, .. } => {
                    info!("Frame {}: enemy #{} ({:?}) destroyed", event.frame, enemy_id, kind);
                }
                GameEventData::BossPhaseChanged { phase } => {
                    info!("Frame {}: boss entered phase {}", event.frame, phase);
                }
                GameEventData::BossDefeated { .. } => {
                    info!("Frame {}: boss defeated", event.frame);
                }
                GameEventData::LevelCompleted { completed, next } => {
                    info!("Frame {}: level {} cleared, entering {}", event.frame, completed, next);
                }
                GameEventData::GameOver { final_score, level } => {
                    warn!("Frame {}: game over on level {} with {} points", event.frame, level, final_score);
                }
                _ => {}
            }
        }

        if result.game_over {
            break;
        }
    }

    // Print final results
    info!("=== Run Results ===");
    let hash = state.compute_hash();
    info!("Final State Hash: {}", hex::encode(hash));
    info!("Frames: {} | Level: {} | Score: {} | Events: {}", state.frame, state.level, state.score, total_events);

    let snapshot = WorldSnapshot::capture(&state).to_json()?;
    info!("Snapshot: {} bytes of JSON", snapshot.len());

    // Verify determinism by replaying
    info!("=== Verifying Determinism ===");
    let (replayed, _) = replay(new_game(config), &inputs, config);
    let replay_hash = replayed.compute_hash();
    info!("Replay State Hash: {}", hex::encode(replay_hash));

    if hash != replay_hash {
        bail!("determinism failure: replay hash differs");
    }
    info!("DETERMINISM VERIFIED: Hashes match!");
    Ok(())
}
