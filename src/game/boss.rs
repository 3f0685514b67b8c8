//! Boss Controller
//!
//! Two-phase state machine:
//!
//! ```text
//! Phase 1 ──(health ≤ 50%)──► Phase 2 ──(health ≤ 0)──► Defeated
//!   │                           │
//!   └─ missile barrage          └─ tracking laser
//! ```
//!
//! Barrage missiles are not fired immediately. Each one is queued in the
//! world [`Schedule`](crate::game::schedule::Schedule) and launched on the
//! first frame whose clock reaches its slot, aimed at wherever the player is
//! at that moment.

use tracing::debug;

use crate::core::constants::*;
use crate::core::rect::Rect;
use crate::core::vec2::Vec2;
use crate::game::combat::laser_anchor;
use crate::game::events::{GameEvent, GameEventData};
use crate::game::schedule::ScheduledAction;
use crate::game::state::{AreaAttack, AttackKind, Boss, ColorTag, Particle, PickupSize, Projectile, WorldState};
use crate::game::time_scale::FrameStep;

/// Run the attack timer, patrol, then fire due scheduled attacks.
///
/// The schedule drains after the attack decision, so a barrage slot due
/// right away launches on the decision frame.
pub fn update_boss(state: &mut WorldState, step: FrameStep, missile_interval_ms: f32) {
    let now = state.clock_ms;
    let width = state.bounds.width;

    if let Some(boss) = state.boss.as_mut() {
        if boss.attack_cooldown <= 0.0 {
            boss.attack_cooldown = boss.attack_rate;
            boss.attack_pattern = boss.attack_pattern.wrapping_add(1);

            if boss.phase == 1 {
                for i in 0..BOSS_BARRAGE_SIZE {
                    let at = now + (i as f64) * missile_interval_ms as f64;
                    state.schedule.schedule(at, ScheduledAction::BossMissile);
                }
            } else {
                boss.attacks.push(fire_laser(boss, width));
            }
        } else {
            boss.attack_cooldown -= step.dt_ms;
        }

        patrol(boss, width, step.scale);
    }

    for action in state.schedule.drain_due(now) {
        match action {
            ScheduledAction::BossMissile => fire_missile(state),
        }
    }
}

/// Launch one missile from the boss toward the player's current position.
pub fn fire_missile(state: &mut WorldState) {
    let target = state.player.body.position();
    if let Some(boss) = state.boss.as_mut() {
        let origin = Vec2::new(boss.body.center().x, boss.body.y + 50.0);
        let velocity = boss.body.position().toward(target, MISSILE_SPEED);
        boss.missiles.push(Projectile::missile(origin, velocity));
    }
}

/// Laser spanning the viewport plus 100 on each side.
pub fn fire_laser(boss: &Boss, viewport_width: f32) -> AreaAttack {
    let anchor = laser_anchor(&boss.body);
    AreaAttack::new(
        AttackKind::Laser,
        Rect::new(anchor.x, anchor.y, viewport_width + 200.0, LASER_HEIGHT),
        LASER_DAMAGE,
        None,
    )
}

/// Turn around at 30% / 70% of the viewport width.
pub fn patrol(boss: &mut Boss, viewport_width: f32, time_scale: f32) {
    if boss.body.x > viewport_width * 0.7 {
        boss.velocity.x = -BOSS_SPEED;
    } else if boss.body.x < viewport_width * 0.3 {
        boss.velocity.x = BOSS_SPEED;
    }
    boss.body.x += boss.velocity.x * time_scale;
}

/// Apply the phase transition and death checks after damage resolution.
pub fn resolve_boss_state(state: &mut WorldState) {
    let Some(boss) = state.boss.as_mut() else {
        return;
    };

    if boss.phase == 1 && boss.below_half() {
        boss.phase = 2;
        boss.attack_rate = BOSS_ATTACK_RATE_PHASE2;
        boss.color = ColorTag::Red;
        let center = boss.body.center();

        debug!(frame = state.frame, health = boss.health, "boss entered phase 2");
        state.request_burst(center, 50, ColorTag::Red);
        state.push_event(GameEvent::new(state.frame, GameEventData::BossPhaseChanged { phase: 2 }));
    }

    let defeated = state.boss.as_ref().is_some_and(|b| b.is_dead());
    if !defeated {
        return;
    }

    if let Some(boss) = state.boss.take() {
        let center = boss.body.center();
        state.boss_active = false;
        state.schedule.cancel(ScheduledAction::BossMissile);

        state.request_burst(center, 100, boss.color);
        state.add_combo_score(SCORE_BOSS_KILL);
        state.particles.push(Particle::health_pickup(state.player.center(), PickupSize::Big));
        state.push_event(GameEvent::new(state.frame, GameEventData::BossDefeated { position: center }));

        debug!(frame = state.frame, level = state.level, "boss defeated");
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::state::WorldBounds;

    fn boss_world() -> WorldState {
        let mut state = WorldState::new(11, WorldBounds::default());
        state.player.body.x = 300.0;
        state.player.body.y = 400.0;
        state.boss = Some(Boss::new(Vec2::new(700.0, 420.0), 350.0));
        state.boss_active = true;
        state
    }

    #[test]
    fn test_phase1_schedules_staggered_barrage() {
        let mut state = boss_world();
        let step = FrameStep::normal(FRAME_MS);

        // The 0 ms slot launches on the decision frame itself
        update_boss(&mut state, step, BOSS_MISSILE_INTERVAL_MS);
        assert_eq!(state.boss.as_ref().unwrap().missiles.len(), 1);
        assert_eq!(state.schedule.len(), BOSS_BARRAGE_SIZE as usize - 1);

        // Walk the clock forward frame by frame and count launches
        let mut launched = vec![0];
        for frame in 1..=80 {
            state.clock_ms = frame as f64 * FRAME_MS as f64;
            let before = state.boss.as_ref().unwrap().missiles.len();
            update_boss(&mut state, step, BOSS_MISSILE_INTERVAL_MS);
            if state.boss.as_ref().unwrap().missiles.len() > before {
                launched.push(frame);
            }
        }

        // 0, 300, 600, 900, 1200 ms land on frames 0, 19, 38, 57, 75
        assert_eq!(launched, vec![0, 19, 38, 57, 75]);
    }

    #[test]
    fn test_missile_aims_at_player_at_fire_time() {
        let mut state = boss_world();
        fire_missile(&mut state);
        let missile = &state.boss.as_ref().unwrap().missiles[0];
        assert!(missile.velocity.x < 0.0);
        assert!((missile.velocity.length() - MISSILE_SPEED).abs() < 1e-5);
    }

    #[test]
    fn test_phase2_fires_laser() {
        let mut state = boss_world();
        {
            let boss = state.boss.as_mut().unwrap();
            boss.phase = 2;
        }
        update_boss(&mut state, FrameStep::normal(FRAME_MS), BOSS_MISSILE_INTERVAL_MS);

        let boss = state.boss.as_ref().unwrap();
        assert!(state.schedule.is_empty());
        assert_eq!(boss.attacks.len(), 1);
        assert_eq!(boss.attacks[0].body.width, state.bounds.width + 200.0);
    }

    #[test]
    fn test_patrol_turns_at_edges() {
        let mut boss = Boss::new(Vec2::new(1000.0, 420.0), 300.0);
        patrol(&mut boss, 1280.0, 1.0);
        assert_eq!(boss.velocity.x, -BOSS_SPEED);

        boss.body.x = 300.0;
        patrol(&mut boss, 1280.0, 0.4);
        assert_eq!(boss.velocity.x, BOSS_SPEED);
        assert!((boss.body.x - 300.4).abs() < 1e-4);
    }

    #[test]
    fn test_phase_change_exactly_at_half() {
        let mut state = boss_world();
        state.boss.as_mut().unwrap().health = 175.0;

        resolve_boss_state(&mut state);
        let boss = state.boss.as_ref().unwrap();
        assert_eq!(boss.phase, 2);
        assert_eq!(boss.attack_rate, BOSS_ATTACK_RATE_PHASE2);
        assert!(state.burst_requests.iter().any(|b| b.count == 50));

        // Never transitions twice
        state.burst_requests.clear();
        resolve_boss_state(&mut state);
        assert!(state.burst_requests.is_empty());
        assert_eq!(state.boss.as_ref().unwrap().phase, 2);
    }

    #[test]
    fn test_boss_death_clears_everything() {
        let mut state = boss_world();
        state.combo = 2;
        update_boss(&mut state, FrameStep::normal(FRAME_MS), BOSS_MISSILE_INTERVAL_MS);
        assert!(!state.schedule.is_empty());

        state.boss.as_mut().unwrap().health = 0.0;
        resolve_boss_state(&mut state);

        assert!(state.boss.is_none());
        assert!(!state.boss_active);
        assert!(state.schedule.is_empty());
        assert_eq!(state.score, 2 * SCORE_BOSS_KILL);
        assert!(state.particles.iter().any(|p| p.kind == crate::game::state::ParticleKind::Health(PickupSize::Big)));
    }
}
