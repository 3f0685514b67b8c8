//! Scheduled Event Queue
//!
//! Delayed sub-attacks keyed by world-clock target time. Entries are drained
//! at the start of the frame whose clock first reaches their target, in
//! (target, insertion) order.

use serde::{Serialize, Deserialize};

/// Action to perform when a scheduled entry fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScheduledAction {
    /// Fire one boss missile at the player's current position
    BossMissile,
}

/// A queued action with its target time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScheduledEvent {
    /// World clock time (ms) at which the action fires
    pub fire_at_ms: f64,
    /// Insertion sequence, breaks ties
    pub seq: u64,
    /// What to do
    pub action: ScheduledAction,
}

/// Ordered queue of scheduled events.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    entries: Vec<ScheduledEvent>,
    next_seq: u64,
}

impl Schedule {
    /// Create an empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an action at an absolute clock time.
    pub fn schedule(&mut self, fire_at_ms: f64, action: ScheduledAction) {
        let seq = self.next_seq;
        self.next_seq += 1;

        // Keep sorted by (time, seq); equal times stay in insertion order
        let index = self
            .entries
            .partition_point(|e| e.fire_at_ms <= fire_at_ms);
        self.entries.insert(index, ScheduledEvent { fire_at_ms, seq, action });
    }

    /// Remove and return every action due at or before `now_ms`.
    pub fn drain_due(&mut self, now_ms: f64) -> Vec<ScheduledAction> {
        let due = self.entries.partition_point(|e| e.fire_at_ms <= now_ms);
        self.entries.drain(..due).map(|e| e.action).collect()
    }

    /// Drop every entry matching `action`.
    pub fn cancel(&mut self, action: ScheduledAction) {
        self.entries.retain(|e| e.action != action);
    }

    /// Drop all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of pending entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
