//! Game Logic Module
//!
//! All simulation code. Deterministic for a given seed and input script.
//!
//! ## Module Structure
//!
//! - `input`: Per-frame input intents
//! - `state`: World aggregate and entity types
//! - `tick`: Frame loop and lifecycle commands
//! - `time_scale`: Bullet-time gauge and frame scale
//! - `physics`: Player/enemy movement, platforms, grappling hook
//! - `collision`: Overlap tests and penetration resolution
//! - `combat`: Attacks, projectiles, damage, deaths
//! - `ai`: Regular enemy pursuit and attacks
//! - `boss`: Boss attack cycle and phase machine
//! - `schedule`: Delayed boss sub-attacks
//! - `particles`: Bursts and health pickups
//! - `level`: Procedural levels and progression
//! - `scroll`: World scroll
//! - `config`: Tunables and error types
//! - `snapshot`: Read-only presentation view
//! - `events`: Game events for presentation and replay

pub mod input;
pub mod state;
pub mod tick;
pub mod time_scale;
pub mod physics;
pub mod collision;
pub mod combat;
pub mod ai;
pub mod boss;
pub mod schedule;
pub mod particles;
pub mod level;
pub mod scroll;
pub mod config;
pub mod snapshot;
pub mod events;

// Re-export key types
pub use input::InputFrame;
pub use state::{WorldState, WorldBounds, GamePhase, Player, Enemy, EnemyKind, Boss};
pub use tick::{TickResult, tick, replay, new_game, start_game, restart_game, advance_level, resize};
pub use config::{SimConfig, ConfigError, CommandError};
pub use snapshot::WorldSnapshot;
pub use events::{GameEvent, GameEventData};
