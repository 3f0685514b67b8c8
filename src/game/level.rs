//! Level Generation & Progression
//!
//! Procedural layout: ground slab, floating platforms, two boundary walls,
//! a cosmetic skyline, a wave of enemies, and a boss every third level.
//! All randomness comes from the world RNG, so a seed fully determines
//! every level.

use tracing::debug;

use crate::core::rect::Rect;
use crate::core::vec2::Vec2;
use crate::game::events::{GameEvent, GameEventData};
use crate::game::state::{
    BackgroundElement, Boss, ColorTag, Enemy, EnemyKind, Platform, WorldState,
};

/// Skyline blocks per level.
const BACKGROUND_ELEMENTS: usize = 20;

/// Ground slab thickness.
const GROUND_HEIGHT: f32 = 50.0;

/// Boundary wall thickness.
const WALL_WIDTH: f32 = 50.0;

/// Floating platforms on level `n`.
#[inline]
pub fn platform_count(level: u32) -> u32 {
    5 + 2 * level
}

/// Enemies spawned on level `n`.
#[inline]
pub fn enemy_count(level: u32) -> u32 {
    3 + 2 * level
}

/// Whether level `n` has a boss.
#[inline]
pub fn is_boss_level(level: u32) -> bool {
    level % 3 == 0
}

/// Replace terrain, skyline, enemies and boss with a fresh layout for `level`.
///
/// Live projectiles, hitboxes, pending boss events and cosmetic particles
/// from the previous layout are dropped. Health pickups carry over, so a
/// boss drop survives the level change.
pub fn generate_level(state: &mut WorldState, level: u32) {
    state.level = level;
    let w = state.bounds.width;
    let h = state.bounds.height;

    let mut platforms = Vec::with_capacity(platform_count(level) as usize + 3);
    platforms.push(Platform {
        body: Rect::new(0.0, h - GROUND_HEIGHT, w * 2.0, GROUND_HEIGHT),
        color: ColorTag::Ground,
    });

    for _ in 0..platform_count(level) {
        let width = state.rng.range_f32(100.0, 250.0);
        let x = 200.0 + state.rng.next_f32() * (w * 1.5 - 200.0);
        let y = spawn_height(state);
        let hue = state.rng.range_f32(200.0, 260.0) as u16;
        platforms.push(Platform {
            body: Rect::new(x, y, width, 20.0),
            color: ColorTag::Hue(hue),
        });
    }

    platforms.push(Platform {
        body: Rect::new(-WALL_WIDTH, 0.0, WALL_WIDTH, h),
        color: ColorTag::Wall,
    });
    platforms.push(Platform {
        body: Rect::new(w * 2.0, 0.0, WALL_WIDTH, h),
        color: ColorTag::Wall,
    });
    state.platforms = platforms;

    let mut background = Vec::with_capacity(BACKGROUND_ELEMENTS);
    for _ in 0..BACKGROUND_ELEMENTS {
        let x = state.rng.next_f32() * w * 2.0;
        let y = state.rng.next_f32() * h * 0.7;
        let width = state.rng.range_f32(50.0, 200.0);
        let height = state.rng.range_f32(100.0, 400.0);
        let hue = state.rng.range_f32(0.0, 360.0) as u16;
        let brightness = state.rng.range_f32(0.1, 0.6);
        background.push(BackgroundElement {
            body: Rect::new(x, y, width, height),
            hue,
            brightness,
        });
    }
    state.background = background;

    state.enemies.clear();
    state.next_enemy_id = 0;
    for _ in 0..enemy_count(level) {
        spawn_enemy(state);
    }

    state.projectiles.clear();
    state.player.attacks.clear();
    state.schedule.clear();
    state.particles.retain(|p| p.is_pickup());
    state.burst_requests.clear();

    if is_boss_level(level) {
        spawn_boss(state);
    } else {
        state.boss = None;
        state.boss_active = false;
    }

    debug!(
        level,
        platforms = state.platforms.len(),
        enemies = state.enemies.len(),
        boss = state.boss_active,
        "level generated"
    );
}

/// Random platform/enemy height: `h − 150 − r·(h − 300)`.
fn spawn_height(state: &mut WorldState) -> f32 {
    let h = state.bounds.height;
    h - 150.0 - state.rng.next_f32() * (h - 300.0)
}

/// Spawn one enemy of random kind off the right of the viewport.
pub fn spawn_enemy(state: &mut WorldState) {
    let w = state.bounds.width;
    let kind = state
        .rng
        .choose(&EnemyKind::ALL)
        .copied()
        .unwrap_or(EnemyKind::Drone);
    let x = w + state.rng.next_f32() * w;
    let y = spawn_height(state);
    let health = 30.0 + 10.0 * state.level as f32;
    let attack_rate = state.rng.range_f32(1000.0, 2000.0);
    let drift = -1.0 - state.rng.next_f32() * 2.0;

    let id = state.alloc_enemy_id();
    let mut enemy = Enemy::new(id, kind, Vec2::new(x, y), health, attack_rate);
    enemy.velocity.x = drift;
    state.enemies.push(enemy);
}

/// Spawn the level boss at `(1.5w, h − 300)`.
pub fn spawn_boss(state: &mut WorldState) {
    let position = Vec2::new(state.bounds.width * 1.5, state.bounds.height - 300.0);
    let health = 200.0 + 50.0 * state.level as f32;
    state.boss = Some(Boss::new(position, health));
    state.boss_active = true;
}

/// Advance to the next level once every enemy and the boss are gone.
///
/// Returns true when a new level was generated.
pub fn check_completion(state: &mut WorldState) -> bool {
    if !state.enemies.is_empty() || state.boss_active {
        return false;
    }

    let completed = state.level;
    let next = completed + 1;
    generate_level(state, next);
    state.push_event(GameEvent::new(
        state.frame,
        GameEventData::LevelCompleted { completed, next },
    ));
    debug!(completed, next, "level completed");
    true
}

// =============================================================================
// TESTS
// =============================================================================
