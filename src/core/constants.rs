//! Game Constants
//!
//! Velocities are in world units per reference frame (16 ms) and are
//! multiplied by the frame's time scale when integrated. Timers and cooldowns
//! are in milliseconds unless the name says otherwise.

// =============================================================================
// TIMING
// =============================================================================

/// Reference frame duration in milliseconds (~60 Hz).
pub const FRAME_MS: f32 = 16.0;

/// Time scale while bullet-time is active.
pub const BULLET_TIME_SCALE: f32 = 0.4;

/// Bullet-time gauge maximum.
pub const BULLET_TIME_MAX: f32 = 100.0;

/// Gauge drained per frame while bullet-time is active.
pub const BULLET_TIME_DRAIN: f32 = 0.5;

/// Gauge recharged per frame while inactive and off cooldown.
pub const BULLET_TIME_RECHARGE: f32 = 0.1;

/// Lockout after the gauge empties before it may activate or recharge.
pub const BULLET_TIME_COOLDOWN_MS: f32 = 3000.0;

/// Combo resets when no melee attack is created within this window.
pub const COMBO_TIMEOUT_MS: f32 = 2000.0;

// =============================================================================
// PLAYER
// =============================================================================

/// Player body width.
pub const PLAYER_WIDTH: f32 = 40.0;

/// Player body height.
pub const PLAYER_HEIGHT: f32 = 60.0;

/// Player starting and maximum health.
pub const PLAYER_MAX_HEALTH: f32 = 100.0;

/// Horizontal run speed.
pub const PLAYER_SPEED: f32 = 5.0;

/// Upward impulse of a ground jump.
pub const PLAYER_JUMP_FORCE: f32 = 12.0;

/// Gravity added to vertical velocity per frame.
pub const GRAVITY: f32 = 0.5;

/// Upward and outward impulse of a wall jump.
pub const WALL_JUMP_FORCE: f32 = 8.0;

/// Capped fall speed while wall sliding.
pub const WALL_SLIDE_SPEED: f32 = 1.0;

/// Melee cooldown after a swing.
pub const ATTACK_COOLDOWN_MS: f32 = 300.0;

/// Minimum delay between blaster shots.
pub const SHOT_COOLDOWN_MS: f32 = 300.0;

// =============================================================================
// GRAPPLING HOOK
// =============================================================================

/// Tip advance per frame while extending.
pub const HOOK_SPEED: f32 = 15.0;

/// Maximum rope length.
pub const HOOK_MAX_LENGTH: f32 = 300.0;

/// Fraction of the tip offset applied as a pull impulse on attach.
pub const HOOK_PULL_FORCE: f32 = 0.2;

// =============================================================================
// COMBAT
// =============================================================================

/// Sword hitbox width.
pub const SWORD_WIDTH: f32 = 80.0;

/// Sword hitbox height.
pub const SWORD_HEIGHT: f32 = 60.0;

/// Sword base damage (plus `SWORD_COMBO_BONUS` per combo step).
pub const SWORD_DAMAGE: f32 = 20.0;

/// Extra sword damage per current combo step.
pub const SWORD_COMBO_BONUS: f32 = 2.0;

/// Lifetime of every melee hitbox and laser.
pub const AREA_ATTACK_TIMER_MS: f32 = 100.0;

/// Player bullet speed.
pub const BULLET_SPEED: f32 = 10.0;

/// Bullet side length.
pub const BULLET_SIZE: f32 = 8.0;

/// Player bullet damage.
pub const BULLET_DAMAGE: f32 = 15.0;

/// Knockback factor applied to incoming projectile velocity.
pub const PROJECTILE_KNOCKBACK: f32 = 0.5;

/// Projectiles are culled this far beyond the world bounds.
pub const CULL_MARGIN: f32 = 100.0;

/// Score per sword hit on an enemy (times combo).
pub const SCORE_MELEE_HIT: u32 = 10;

/// Score per hit on the boss or a bullet hit on an enemy (times combo).
pub const SCORE_MINOR_HIT: u32 = 5;

/// Score per enemy killed (times combo).
pub const SCORE_ENEMY_KILL: u32 = 50;

/// Score for defeating the boss (times combo).
pub const SCORE_BOSS_KILL: u32 = 500;

// =============================================================================
// ENEMIES
// =============================================================================

/// Enemy body width.
pub const ENEMY_WIDTH: f32 = 40.0;

/// Enemy body height.
pub const ENEMY_HEIGHT: f32 = 60.0;

/// Enemy pursuit speed.
pub const ENEMY_SPEED: f32 = 1.0;

/// Enemies fall at this fraction of player gravity.
pub const ENEMY_GRAVITY_FACTOR: f32 = 0.5;

/// Enemies attack when closer than this to the player.
pub const ENEMY_ATTACK_RANGE: f32 = 150.0;

/// Drone bullet speed.
pub const DRONE_BULLET_SPEED: f32 = 5.0;

/// Drone bullet damage.
pub const DRONE_BULLET_DAMAGE: f32 = 10.0;

/// Enemy melee hitbox side length.
pub const ENEMY_MELEE_SIZE: f32 = 60.0;

/// Enemy melee damage.
pub const ENEMY_MELEE_DAMAGE: f32 = 15.0;

// =============================================================================
// BOSS
// =============================================================================

/// Boss body width.
pub const BOSS_WIDTH: f32 = 120.0;

/// Boss body height.
pub const BOSS_HEIGHT: f32 = 180.0;

/// Boss patrol speed.
pub const BOSS_SPEED: f32 = 1.0;

/// Phase 1 attack interval.
pub const BOSS_ATTACK_RATE_PHASE1: f32 = 1500.0;

/// Phase 2 attack interval.
pub const BOSS_ATTACK_RATE_PHASE2: f32 = 1000.0;

/// Missiles per phase 1 barrage.
pub const BOSS_BARRAGE_SIZE: u32 = 5;

/// Delay between consecutive barrage missiles.
pub const BOSS_MISSILE_INTERVAL_MS: f32 = 300.0;

/// Missile speed.
pub const MISSILE_SPEED: f32 = 3.0;

/// Missile side length.
pub const MISSILE_SIZE: f32 = 20.0;

/// Missile damage.
pub const MISSILE_DAMAGE: f32 = 15.0;

/// Laser beam height.
pub const LASER_HEIGHT: f32 = 20.0;

/// Laser damage.
pub const LASER_DAMAGE: f32 = 20.0;

// =============================================================================
// CONTACT DAMAGE
// =============================================================================

/// Enemy body contact damage per frame.
pub const ENEMY_CONTACT_DAMAGE: f32 = 1.0;

/// Boss body contact damage per frame.
pub const BOSS_CONTACT_DAMAGE: f32 = 2.0;

// =============================================================================
// PICKUPS
// =============================================================================

/// Chance for a killed enemy to drop a small health pickup.
pub const PICKUP_DROP_CHANCE: f32 = 0.2;

/// Heal amount of a small pickup.
pub const HEAL_SMALL: f32 = 10.0;

/// Heal amount of a large pickup.
pub const HEAL_BIG: f32 = 30.0;

/// Lifetime of a pickup, in frames.
pub const PICKUP_LIFE: f32 = 300.0;

// =============================================================================
// WORLD
// =============================================================================

/// Player starts scrolling the world once past this fraction of the width.
pub const SCROLL_THRESHOLD: f32 = 0.6;

/// Default viewport width.
pub const DEFAULT_WIDTH: f32 = 1280.0;

/// Default viewport height.
pub const DEFAULT_HEIGHT: f32 = 720.0;
