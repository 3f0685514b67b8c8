//! Presentation Snapshot
//!
//! Borrowed, serializable view of everything a renderer or HUD needs after a
//! frame. Building one copies nothing.

use serde::Serialize;

use crate::game::state::{
    BackgroundElement, Boss, Enemy, GamePhase, Particle, Platform, Player,
    Projectile, WorldBounds, WorldState,
};

/// Read-only view of the world after a frame.
#[derive(Debug, Serialize)]
pub struct WorldSnapshot<'a> {
    pub frame: u64,
    pub phase: GamePhase,
    pub level: u32,
    pub score: u32,
    pub combo: u32,
    /// Player health, 0 to 100
    pub health_percent: f32,
    /// Bullet-time gauge, 0 to 100
    pub bullet_time_percent: f32,
    pub bullet_time_active: bool,
    pub bounds: WorldBounds,
    pub player: &'a Player,
    pub platforms: &'a [Platform],
    pub background: &'a [BackgroundElement],
    pub enemies: &'a [Enemy],
    pub boss: Option<&'a Boss>,
    pub projectiles: &'a [Projectile],
    pub particles: &'a [Particle],
}

impl<'a> WorldSnapshot<'a> {
    /// Borrow a snapshot of `state`.
    pub fn capture(state: &'a WorldState) -> Self {
        Self {
            frame: state.frame,
            phase: state.phase,
            level: state.level,
            score: state.score,
            combo: state.combo,
            health_percent: state.player.health_percent(),
            bullet_time_percent: state.bullet_time_percent(),
            bullet_time_active: state.player.bullet_time_active,
            bounds: state.bounds,
            player: &state.player,
            platforms: &state.platforms,
            background: &state.background,
            enemies: &state.enemies,
            boss: state.boss.as_ref(),
            projectiles: &state.projectiles,
            particles: &state.particles,
        }
    }

    /// Serialize to a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
