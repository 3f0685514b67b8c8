//! Frame Tick & Game Lifecycle
//!
//! One call to [`tick`] advances the world by one display frame. Given the
//! same seed, config and input sequence the world evolves identically, which
//! is what [`replay`] and the state hash rely on.

use tracing::debug;

use crate::game::ai;
use crate::game::boss;
use crate::game::combat;
use crate::game::config::{CommandError, SimConfig};
use crate::game::events::GameEvent;
use crate::game::input::InputFrame;
use crate::game::level;
use crate::game::particles;
use crate::game::physics;
use crate::game::scroll;
use crate::game::state::{GamePhase, Player, WorldBounds, WorldState};
use crate::game::time_scale::{update_bullet_time, FrameStep};

/// Result of a tick.
#[derive(Debug, Default)]
pub struct TickResult {
    /// Events generated this frame
    pub events: Vec<GameEvent>,
    /// Whether the game is over (set on the frame the player dies and after)
    pub game_over: bool,
    /// Time scale the frame ran at
    pub time_scale: f32,
}

/// Run one simulation frame.
///
/// Nothing moves outside [`GamePhase::Playing`].
pub fn tick(state: &mut WorldState, input: &InputFrame, config: &SimConfig) -> TickResult {
    let mut result = TickResult {
        time_scale: 1.0,
        ..TickResult::default()
    };

    match state.phase {
        GamePhase::Title => return result,
        GamePhase::GameOver => {
            result.game_over = true;
            return result;
        }
        GamePhase::Playing => {}
    }

    // 0. Advance clocks
    state.frame += 1;
    state.clock_ms += config.frame_ms as f64;

    // 1. Bullet-time decides the scale for everything below
    let scale = update_bullet_time(
        &mut state.player,
        input.bullet_time(),
        state.clock_ms,
        &config.bullet_time,
    );
    let step = FrameStep::new(config.frame_ms, scale);
    result.time_scale = scale;

    // 2. Player movement, platforms, hook
    physics::update_player(state, input, scale);

    // 3. Player attacks
    combat::update_combo_timeout(state, config.combo_timeout_ms);
    combat::try_melee(state, input);
    combat::try_shoot(state, input);
    combat::tick_attack_cooldown(state, step);

    // 4. Hostiles act
    ai::update_enemies(state, step);
    boss::update_boss(state, step, config.boss_missile_interval_ms);
    combat::update_boss_missiles(state, step);

    // 5. Damage resolution
    combat::resolve_player_attacks(state);
    combat::resolve_hostile_attacks(state);
    combat::resolve_body_contact(state);
    combat::update_projectiles(state, step);

    // 6. Deaths and hitbox expiry
    boss::resolve_boss_state(state);
    combat::remove_dead_enemies(state, config.pickup_drop_chance);
    combat::update_area_attacks(state, step);

    // 7. Particles and pickups
    particles::update_particles(state, scale);

    // 8. Camera
    scroll::update_scroll(state);

    // 9. End conditions
    if state.player.is_dead() {
        end_game(state, &mut result);
    } else {
        level::check_completion(state);
    }

    result.events = state.take_events();
    result
}

fn end_game(state: &mut WorldState, result: &mut TickResult) {
    state.phase = GamePhase::GameOver;
    result.game_over = true;
    state.push_event(GameEvent::game_over(state.frame, state.score, state.level));
    debug!(frame = state.frame, score = state.score, level = state.level, "game over");
}

// =============================================================================
// LIFECYCLE
// =============================================================================

/// Build a world for `config` with level 1 generated, waiting on the title.
pub fn new_game(config: &SimConfig) -> WorldState {
    let mut state = WorldState::new(config.seed, config.bounds);
    level::generate_level(&mut state, 1);
    state
}

/// Leave the title screen and start playing.
///
/// The player respawns at full health and the score resets. The current
/// level layout is kept; one is generated if none exists yet. A finished
/// game needs [`restart_game`].
pub fn start_game(state: &mut WorldState) {
    if !matches!(state.phase, GamePhase::Title) {
        return;
    }
    if state.platforms.is_empty() {
        let current = state.level;
        level::generate_level(state, current);
    }

    let spawn = Player::spawn_point(&state.bounds);
    let player = &mut state.player;
    player.body.x = spawn.x;
    player.body.y = spawn.y;
    player.health = player.max_health;

    state.score = 0;
    state.phase = GamePhase::Playing;
    debug!(level = state.level, "game started");
}

/// Regenerate the current level and reset the player, score and combo.
pub fn restart_game(state: &mut WorldState) {
    let current = state.level;
    state.particles.clear();
    state.burst_requests.clear();
    level::generate_level(state, current);

    let skin = state.player.skin;
    state.player = Player::new(Player::spawn_point(&state.bounds));
    state.player.skin = skin;

    state.score = 0;
    state.combo = 0;
    state.last_combo_at = state.clock_ms;
    state.phase = GamePhase::Playing;
    debug!(level = current, "game restarted");
}

/// Skip straight to the next level.
pub fn advance_level(state: &mut WorldState) -> Result<(), CommandError> {
    if !state.is_playing() {
        return Err(CommandError::WrongPhase {
            command: "advance_level",
            phase: state.phase,
        });
    }

    let next = state.level + 1;
    level::generate_level(state, next);
    Ok(())
}

/// Change the viewport size.
///
/// A running game puts the player back on the quarter-width line.
pub fn resize(state: &mut WorldState, bounds: WorldBounds) {
    state.bounds = bounds;
    if state.is_playing() {
        state.player.body.x = bounds.width / 4.0;
    }
}

/// Replay a recorded input sequence.
///
/// Starts the game if it is still on the title and stops early on game over.
pub fn replay(
    initial_state: WorldState,
    inputs: &[InputFrame],
    config: &SimConfig,
) -> (WorldState, Vec<GameEvent>) {
    let mut state = initial_state;
    let mut all_events = Vec::new();

    if matches!(state.phase, GamePhase::Title) {
        start_game(&mut state);
    }

    for input in inputs {
        let result = tick(&mut state, input, config);
        all_events.extend(result.events);

        if result.game_over {
            break;
        }
    }

    (state, all_events)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::*;
    use crate::core::rect::Rect;
    use crate::core::vec2::Vec2;
    use crate::game::events::GameEventData;
    use crate::game::state::{Boss, ColorTag, Enemy, EnemyKind, ParticleKind, PickupSize, Platform};

    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    /// Flat arena with one enemy parked far away so the level never completes.
    fn arena() -> WorldState {
        let bounds = WorldBounds::default();
        let mut state = WorldState::new(7, bounds);
        state.platforms.push(Platform {
            body: Rect::new(0.0, bounds.height - 50.0, bounds.width * 2.0, 50.0),
            color: ColorTag::Ground,
        });
        state.enemies.push(Enemy::new(99, EnemyKind::MeleeBot, Vec2::new(5000.0, 600.0), 30.0, 1500.0));
        state.phase = GamePhase::Playing;
        state
    }

    fn held(flags: u8) -> InputFrame {
        InputFrame::with_flags(flags, Vec2::ZERO)
    }

    #[test]
    fn test_title_and_game_over_do_nothing() {
        let config = SimConfig::default();
        let mut state = new_game(&config);
        let before = state.compute_hash();

        let result = tick(&mut state, &held(InputFrame::FLAG_RIGHT), &config);
        assert!(!result.game_over);
        assert_eq!(state.frame, 0);
        assert_eq!(state.compute_hash(), before);

        state.phase = GamePhase::GameOver;
        let result = tick(&mut state, &InputFrame::new(), &config);
        assert!(result.game_over);
        assert_eq!(state.frame, 0);
    }

    #[test]
    fn test_sword_hit_then_kill() {
        let config = SimConfig {
            pickup_drop_chance: 1.0,
            ..SimConfig::default()
        };
        let mut state = arena();
        // Hurt, so the kill rolls for a pickup
        state.player.health = 80.0;
        let player = state.player.body;
        state.enemies.push(Enemy::new(
            0,
            EnemyKind::MeleeBot,
            Vec2::new(player.right() + 10.0, player.y + 5.0),
            30.0,
            1500.0,
        ));

        // First frame: 20 damage at combo 0, scored at the new combo of 1
        let result = tick(&mut state, &held(InputFrame::FLAG_MELEE), &config);
        let enemy = state.enemies.iter().find(|e| e.id == 0).unwrap();
        assert_eq!(enemy.health, 10.0);
        assert_eq!(state.combo, 1);
        assert_eq!(state.score, SCORE_MELEE_HIT);
        assert!(result
            .events
            .iter()
            .any(|e| e.data == GameEventData::ScoreChanged { delta: 10, score: 10 }));

        // Second frame: the same swing lands again and kills
        let result = tick(&mut state, &InputFrame::new(), &config);
        assert!(state.enemies.iter().all(|e| e.id != 0));
        assert_eq!(state.score, SCORE_MELEE_HIT * 2 + SCORE_ENEMY_KILL);

        let killed_at = result
            .events
            .iter()
            .find_map(|e| match e.data {
                GameEventData::EnemyKilled { enemy_id: 0, position, .. } => Some(position),
                _ => None,
            })
            .unwrap();
        let pickup = state.particles.iter().find(|p| p.is_pickup()).unwrap();
        assert_eq!(pickup.kind, ParticleKind::Health(PickupSize::Small));
        assert_eq!(pickup.position, killed_at);
    }

    #[test]
    fn test_bullet_time_drains_to_lockout() {
        let config = SimConfig::default();
        let mut state = arena();
        let input = held(InputFrame::FLAG_BULLET_TIME);

        let mut last = state.player.bullet_time;
        let mut frames = 0;
        loop {
            let result = tick(&mut state, &input, &config);
            frames += 1;
            let gauge = state.player.bullet_time;
            assert!(gauge < last, "gauge must drop every held frame");
            last = gauge;

            if gauge <= 0.0 {
                assert!(!state.player.bullet_time_active);
                assert_eq!(state.player.bullet_time_ended_at, Some(state.clock_ms));
                assert_eq!(result.time_scale, 1.0);
                break;
            }
            assert!(state.player.bullet_time_active);
            assert_eq!(result.time_scale, BULLET_TIME_SCALE);
            assert!(frames < 1000);
        }
        assert_eq!(frames, (BULLET_TIME_MAX / BULLET_TIME_DRAIN) as u32);

        // Still locked out on the next frame
        let result = tick(&mut state, &input, &config);
        assert_eq!(result.time_scale, 1.0);
        assert_eq!(state.player.bullet_time, 0.0);
    }

    #[test]
    fn test_boss_phase_two_at_half_health() {
        let config = SimConfig::default();
        let mut state = arena();
        let mut boss = Boss::new(Vec2::new(1000.0, 400.0), 400.0);
        boss.health = 200.0;
        state.boss = Some(boss);
        state.boss_active = true;

        let result = tick(&mut state, &InputFrame::new(), &config);
        let boss = state.boss.as_ref().unwrap();
        assert_eq!(boss.phase, 2);
        assert_eq!(boss.attack_rate, BOSS_ATTACK_RATE_PHASE2);
        assert!(result
            .events
            .iter()
            .any(|e| matches!(e.data, GameEventData::ParticleBurst { count: 50, .. })));
        assert!(result
            .events
            .iter()
            .any(|e| e.data == GameEventData::BossPhaseChanged { phase: 2 }));
    }

    #[test]
    fn test_fall_off_ends_game() {
        let config = SimConfig::default();
        let mut state = arena();
        state.score = 120;
        state.player.body.y = state.bounds.height + 10.0;

        let result = tick(&mut state, &InputFrame::new(), &config);
        assert!(result.game_over);
        assert_eq!(state.player.health, 0.0);
        assert!(state.is_game_over());
        assert!(result
            .events
            .iter()
            .any(|e| e.data == GameEventData::GameOver { final_score: 120, level: 1 }));
    }

    #[test]
    fn test_cleared_level_advances() {
        let config = SimConfig::default();
        let mut state = arena();
        state.enemies.clear();

        let result = tick(&mut state, &InputFrame::new(), &config);
        assert_eq!(state.level, 2);
        assert_eq!(state.enemies.len(), level::enemy_count(2) as usize);
        assert!(result
            .events
            .iter()
            .any(|e| e.data == GameEventData::LevelCompleted { completed: 1, next: 2 }));
    }

    #[test]
    fn test_start_restart_and_advance() {
        let config = SimConfig::default();
        let mut state = new_game(&config);
        assert_eq!(advance_level(&mut state), Err(CommandError::WrongPhase {
            command: "advance_level",
            phase: GamePhase::Title,
        }));

        start_game(&mut state);
        assert!(state.is_playing());
        assert_eq!(state.player.body.position(), Player::spawn_point(&state.bounds));

        advance_level(&mut state).unwrap();
        assert_eq!(state.level, 2);

        state.score = 900;
        state.combo = 4;
        state.player.health = 0.0;
        state.player.bullet_time = 10.0;
        state.phase = GamePhase::GameOver;

        start_game(&mut state);
        assert!(state.is_game_over());

        restart_game(&mut state);
        assert!(state.is_playing());
        assert_eq!(state.level, 2);
        assert_eq!(state.score, 0);
        assert_eq!(state.combo, 0);
        assert_eq!(state.player.health, PLAYER_MAX_HEALTH);
        assert_eq!(state.player.bullet_time, BULLET_TIME_MAX);
        assert!(state.particles.is_empty());
    }

    #[test]
    fn test_resize_recenters_running_player() {
        let mut state = arena();
        let bounds = WorldBounds { width: 800.0, height: 600.0 };
        resize(&mut state, bounds);
        assert_eq!(state.bounds, bounds);
        assert_eq!(state.player.body.x, 200.0);

        let mut idle = WorldState::new(1, WorldBounds::default());
        let x = idle.player.body.x;
        resize(&mut idle, bounds);
        assert_eq!(idle.player.body.x, x);
    }

    // =========================================================================
    // Determinism
    // =========================================================================

    fn scripted_inputs(seed: u64, frames: usize) -> Vec<InputFrame> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..frames)
            .map(|_| {
                let aim = Vec2::new(rng.gen_range(0.0..1280.0), rng.gen_range(0.0..720.0));
                InputFrame::with_flags(rng.gen::<u8>() & 0x7F, aim)
            })
            .collect()
    }

    #[test]
    fn test_tick_determinism() {
        let config = SimConfig::default();
        let inputs = scripted_inputs(42, 600);

        let mut a = new_game(&config);
        let mut b = new_game(&config);
        start_game(&mut a);
        start_game(&mut b);

        for input in &inputs {
            let ra = tick(&mut a, input, &config);
            let rb = tick(&mut b, input, &config);
            assert_eq!(ra.events, rb.events);
            assert_eq!(a.compute_hash(), b.compute_hash());
        }
    }

    #[test]
    fn test_replay_determinism() {
        let config = SimConfig::default();
        let inputs = scripted_inputs(7, 900);

        let (final1, events1) = replay(new_game(&config), &inputs, &config);
        let (final2, events2) = replay(new_game(&config), &inputs, &config);

        assert_eq!(final1.compute_hash(), final2.compute_hash());
        assert_eq!(events1, events2);
    }

    #[test]
    fn test_different_seeds_diverge() {
        let inputs = scripted_inputs(3, 120);
        let config_a = SimConfig { seed: 1, ..SimConfig::default() };
        let config_b = SimConfig { seed: 2, ..SimConfig::default() };

        let (a, _) = replay(new_game(&config_a), &inputs, &config_a);
        let (b, _) = replay(new_game(&config_b), &inputs, &config_b);
        assert_ne!(a.compute_hash(), b.compute_hash());
    }

    #[test]
    fn test_random_play_keeps_invariants() {
        let config = SimConfig::default();
        for seed in 0..8u64 {
            let config = SimConfig { seed, ..config.clone() };
            let mut state = new_game(&config);
            start_game(&mut state);
            let mut boss_phase = 0u8;

            for input in scripted_inputs(seed, 1500) {
                let result = tick(&mut state, &input, &config);
                assert!((0.0..=PLAYER_MAX_HEALTH).contains(&state.player.health));
                assert!((0.0..=BULLET_TIME_MAX).contains(&state.player.bullet_time));
                assert!(state.player.body.x >= 0.0);
                assert!(result.time_scale == 1.0 || result.time_scale == BULLET_TIME_SCALE);

                match &state.boss {
                    Some(boss) => {
                        assert!(boss.phase >= boss_phase);
                        boss_phase = boss.phase;
                    }
                    None => boss_phase = 0,
                }
                if result.game_over {
                    break;
                }
            }
        }
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn input_strategy() -> impl Strategy<Value = InputFrame> {
            (0u8..0x80, 0.0f32..1280.0, 0.0f32..720.0)
                .prop_map(|(flags, x, y)| InputFrame::with_flags(flags, Vec2::new(x, y)))
        }

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(32))]

            #[test]
            fn test_gauges_stay_in_range(
                seed in any::<u64>(),
                inputs in prop::collection::vec(input_strategy(), 1..300),
            ) {
                let config = SimConfig { seed, ..SimConfig::default() };
                let mut state = new_game(&config);
                start_game(&mut state);

                for input in &inputs {
                    let score_before = state.score;
                    let result = tick(&mut state, input, &config);

                    prop_assert!(state.player.health >= 0.0);
                    prop_assert!(state.player.health <= state.player.max_health);
                    prop_assert!(state.player.bullet_time >= 0.0);
                    prop_assert!(state.player.bullet_time <= BULLET_TIME_MAX);
                    prop_assert!(state.score >= score_before);
                    prop_assert!(state.particles.iter().all(|p| p.life > 0.0));
                    prop_assert!(state.burst_requests.is_empty());
                    if result.game_over {
                        break;
                    }
                }
            }

            #[test]
            fn test_replay_matches_live_run(
                seed in any::<u64>(),
                inputs in prop::collection::vec(input_strategy(), 1..200),
            ) {
                let config = SimConfig { seed, ..SimConfig::default() };
                let mut live = new_game(&config);
                start_game(&mut live);
                for input in &inputs {
                    if tick(&mut live, input, &config).game_over {
                        break;
                    }
                }

                let (replayed, _) = replay(new_game(&config), &inputs, &config);
                prop_assert_eq!(live.compute_hash(), replayed.compute_hash());
            }
        }
    }
}
