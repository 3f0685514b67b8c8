//! Bullet-Time Controller
//!
//! Owns the player's bullet-time gauge and produces the frame's time scale.
//! The scale is computed once per frame before any motion is integrated and
//! every velocity and cooldown in that frame is multiplied by it.

use serde::{Serialize, Deserialize};

use crate::core::constants::{
    BULLET_TIME_COOLDOWN_MS, BULLET_TIME_DRAIN, BULLET_TIME_MAX,
    BULLET_TIME_RECHARGE, BULLET_TIME_SCALE,
};
use crate::game::state::Player;

/// Bullet-time tunables.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BulletTimeConfig {
    /// Time scale while active
    pub slow_scale: f32,
    /// Gauge drained per active frame
    pub drain: f32,
    /// Gauge recharged per idle frame
    pub recharge: f32,
    /// Lockout after the gauge empties (ms)
    pub cooldown_ms: f32,
}

impl Default for BulletTimeConfig {
    fn default() -> Self {
        Self {
            slow_scale: BULLET_TIME_SCALE,
            drain: BULLET_TIME_DRAIN,
            recharge: BULLET_TIME_RECHARGE,
            cooldown_ms: BULLET_TIME_COOLDOWN_MS,
        }
    }
}

/// Per-frame timing shared by every system.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameStep {
    /// Multiplier applied to velocities
    pub scale: f32,
    /// Scaled milliseconds to subtract from timers and cooldowns
    pub dt_ms: f32,
}

impl FrameStep {
    /// Step for a frame of `frame_ms` at `scale`.
    pub fn new(frame_ms: f32, scale: f32) -> Self {
        Self {
            scale,
            dt_ms: frame_ms * scale,
        }
    }

    /// Unscaled step.
    pub fn normal(frame_ms: f32) -> Self {
        Self::new(frame_ms, 1.0)
    }
}

/// Whether the post-depletion lockout has elapsed.
#[inline]
pub fn cooldown_elapsed(player: &Player, now_ms: f64, config: &BulletTimeConfig) -> bool {
    match player.bullet_time_ended_at {
        Some(ended) => now_ms - ended > config.cooldown_ms as f64,
        None => true,
    }
}

/// Update the gauge for this frame and return the time scale.
///
/// Activation needs the intent held, gauge left, and the lockout elapsed.
/// Emptying the gauge deactivates immediately, so the frame that drains the
/// last unit already runs at normal speed.
pub fn update_bullet_time(
    player: &mut Player,
    held: bool,
    now_ms: f64,
    config: &BulletTimeConfig,
) -> f32 {
    let ready = cooldown_elapsed(player, now_ms, config);

    if held && player.bullet_time > 0.0 && ready {
        player.bullet_time_active = true;
        player.bullet_time -= config.drain;

        if player.bullet_time <= 0.0 {
            player.bullet_time = 0.0;
            player.bullet_time_active = false;
            player.bullet_time_ended_at = Some(now_ms);
        }
    } else {
        player.bullet_time_active = false;

        if ready && player.bullet_time < BULLET_TIME_MAX {
            player.bullet_time = (player.bullet_time + config.recharge).min(BULLET_TIME_MAX);
        }
    }

    current_scale(player, config)
}

/// Time scale implied by the player's active flag.
#[inline]
pub fn current_scale(player: &Player, config: &BulletTimeConfig) -> f32 {
    if player.bullet_time_active {
        config.slow_scale
    } else {
        1.0
    }
}

// =============================================================================
// TESTS
// =============================================================================
