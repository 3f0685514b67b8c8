//! Core primitives.
//!
//! Geometry, randomness and hashing shared by every simulation system.
//! Nothing in here knows about players, enemies or levels.

pub mod constants;
pub mod vec2;
pub mod rect;
pub mod rng;
pub mod hash;

// Re-export core types
pub use vec2::Vec2;
pub use rect::Rect;
pub use rng::DeterministicRng;
pub use hash::{StateHash, StateHasher, compute_state_hash};
