//! # Neon Runner Simulation Core
//!
//! Real-time simulation for a neon side-scrolling action game: platforming,
//! sword and blaster combat, enemy AI, a two-phase boss, bullet-time and a
//! scrolling procedurally generated world.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    NEON RUNNER SIM                           │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/            - Primitives                               │
//! │  ├── vec2.rs      - 2D f32 vector                            │
//! │  ├── rect.rs      - Axis-aligned rectangle                   │
//! │  ├── rng.rs       - Deterministic Xorshift128+ PRNG          │
//! │  ├── hash.rs      - State hashing for replay checks          │
//! │  └── constants.rs - Gameplay tunables                        │
//! │                                                              │
//! │  game/            - Simulation                               │
//! │  ├── tick.rs      - Frame loop and lifecycle commands        │
//! │  ├── state.rs     - World aggregate and entities             │
//! │  ├── time_scale.rs- Bullet-time                              │
//! │  ├── physics.rs   - Movement, platforms, grappling hook      │
//! │  ├── combat.rs    - Attacks, projectiles, damage             │
//! │  ├── ai.rs        - Enemy controllers                        │
//! │  ├── boss.rs      - Boss phase machine                       │
//! │  ├── schedule.rs  - Delayed boss events                      │
//! │  ├── particles.rs - Bursts and pickups                       │
//! │  ├── level.rs     - Level generation                         │
//! │  ├── scroll.rs    - World scroll                             │
//! │  └── snapshot.rs  - Presentation view                        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism
//!
//! Time advances by a fixed frame duration and all randomness comes from the
//! world's seeded RNG. Given identical seed, config and inputs the
//! simulation produces identical state hashes, so runs can be replayed.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod game;

// Re-export commonly used types
pub use core::rng::DeterministicRng;
pub use core::vec2::Vec2;
pub use core::rect::Rect;
pub use game::input::InputFrame;
pub use game::state::{WorldState, WorldBounds};
pub use game::config::SimConfig;
pub use game::snapshot::WorldSnapshot;
pub use game::tick::{tick, TickResult};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Nominal frame rate (Hz)
pub const FRAME_RATE: u32 = 60;
