//! Game Events
//!
//! Side effects produced during a frame for presentation, audio and UI hooks.
//! The simulation never depends on anyone consuming them.

use serde::{Serialize, Deserialize};
use crate::core::vec2::Vec2;
use crate::game::state::{ColorTag, EnemyKind, PickupSize};

/// Game event data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameEventData {
    /// A particle burst was requested
    ParticleBurst {
        position: Vec2,
        count: u32,
        color: ColorTag,
    },

    /// Score changed
    ScoreChanged {
        delta: u32,
        score: u32,
    },

    /// Combo counter changed (increment or timeout reset)
    ComboChanged {
        combo: u32,
    },

    /// An enemy was destroyed
    EnemyKilled {
        enemy_id: u32,
        kind: EnemyKind,
        position: Vec2,
    },

    /// Boss entered a new phase
    BossPhaseChanged {
        phase: u8,
    },

    /// Boss was destroyed
    BossDefeated {
        position: Vec2,
    },

    /// Player picked up health
    PlayerHealed {
        amount: f32,
        size: PickupSize,
        health: f32,
    },

    /// Level cleared, next level generated
    LevelCompleted {
        completed: u32,
        next: u32,
    },

    /// Player died
    GameOver {
        final_score: u32,
        level: u32,
    },
}

/// A game event stamped with the frame it occurred on.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameEvent {
    /// Frame when event occurred
    pub frame: u64,

    /// Event data
    pub data: GameEventData,
}

impl GameEvent {
    /// Create a new event.
    pub fn new(frame: u64, data: GameEventData) -> Self {
        Self { frame, data }
    }

    /// Create particle burst event.
    pub fn particle_burst(frame: u64, position: Vec2, count: u32, color: ColorTag) -> Self {
        Self::new(frame, GameEventData::ParticleBurst { position, count, color })
    }

    /// Create score changed event.
    pub fn score_changed(frame: u64, delta: u32, score: u32) -> Self {
        Self::new(frame, GameEventData::ScoreChanged { delta, score })
    }

    /// Create combo changed event.
    pub fn combo_changed(frame: u64, combo: u32) -> Self {
        Self::new(frame, GameEventData::ComboChanged { combo })
    }

    /// Create game over event.
    pub fn game_over(frame: u64, final_score: u32, level: u32) -> Self {
        Self::new(frame, GameEventData::GameOver { final_score, level })
    }
}
