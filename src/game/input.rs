//! Input Intents
//!
//! Abstract per-frame intents produced by the (external) input layer.
//! Keyboard/mouse/touch mapping happens outside the simulation; the core only
//! sees a snapshot of level-triggered flags plus an aim point in world
//! coordinates.

use serde::{Serialize, Deserialize};
use crate::core::vec2::Vec2;

/// Intent snapshot for a single frame.
///
/// All flags are sampled once at the start of the frame. Every flag is
/// level-triggered except `FLAG_GRAPPLE`, which the input layer raises only
/// on the frame the button goes down.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct InputFrame {
    /// Action flags (packed bits):
    /// - Bit 0: Move left
    /// - Bit 1: Move right
    /// - Bit 2: Jump
    /// - Bit 3: Melee attack (held)
    /// - Bit 4: Ranged attack (held)
    /// - Bit 5: Bullet-time (held)
    /// - Bit 6: Grapple fire (edge)
    /// - Bit 7: Reserved
    pub flags: u8,

    /// Aim point in world coordinates (mouse / touch position).
    pub aim: Vec2,
}

impl InputFrame {
    /// Move-left flag bit
    pub const FLAG_LEFT: u8 = 0x01;

    /// Move-right flag bit
    pub const FLAG_RIGHT: u8 = 0x02;

    /// Jump flag bit
    pub const FLAG_JUMP: u8 = 0x04;

    /// Melee flag bit
    pub const FLAG_MELEE: u8 = 0x08;

    /// Ranged flag bit
    pub const FLAG_RANGED: u8 = 0x10;

    /// Bullet-time flag bit
    pub const FLAG_BULLET_TIME: u8 = 0x20;

    /// Grapple flag bit
    pub const FLAG_GRAPPLE: u8 = 0x40;

    /// Create a new empty input frame.
    pub const fn new() -> Self {
        Self {
            flags: 0,
            aim: Vec2::ZERO,
        }
    }

    /// Create input with the given flags and aim point.
    pub const fn with_flags(flags: u8, aim: Vec2) -> Self {
        Self { flags, aim }
    }

    #[inline]
    fn has(&self, flag: u8) -> bool {
        self.flags & flag != 0
    }

    #[inline]
    fn set(&mut self, flag: u8, on: bool) {
        if on {
            self.flags |= flag;
        } else {
            self.flags &= !flag;
        }
    }

    /// Move-left held.
    #[inline]
    pub fn left(&self) -> bool {
        self.has(Self::FLAG_LEFT)
    }

    /// Move-right held.
    #[inline]
    pub fn right(&self) -> bool {
        self.has(Self::FLAG_RIGHT)
    }

    /// Jump held.
    #[inline]
    pub fn jump(&self) -> bool {
        self.has(Self::FLAG_JUMP)
    }

    /// Melee attack held.
    #[inline]
    pub fn melee(&self) -> bool {
        self.has(Self::FLAG_MELEE)
    }

    /// Ranged attack held.
    #[inline]
    pub fn ranged(&self) -> bool {
        self.has(Self::FLAG_RANGED)
    }

    /// Bullet-time activation held.
    #[inline]
    pub fn bullet_time(&self) -> bool {
        self.has(Self::FLAG_BULLET_TIME)
    }

    /// Grapple fired this frame.
    #[inline]
    pub fn grapple(&self) -> bool {
        self.has(Self::FLAG_GRAPPLE)
    }

    /// Set move-left.
    pub fn set_left(&mut self, on: bool) {
        self.set(Self::FLAG_LEFT, on);
    }

    /// Set move-right.
    pub fn set_right(&mut self, on: bool) {
        self.set(Self::FLAG_RIGHT, on);
    }

    /// Set jump.
    pub fn set_jump(&mut self, on: bool) {
        self.set(Self::FLAG_JUMP, on);
    }

    /// Set melee.
    pub fn set_melee(&mut self, on: bool) {
        self.set(Self::FLAG_MELEE, on);
    }

    /// Set ranged.
    pub fn set_ranged(&mut self, on: bool) {
        self.set(Self::FLAG_RANGED, on);
    }

    /// Set bullet-time.
    pub fn set_bullet_time(&mut self, on: bool) {
        self.set(Self::FLAG_BULLET_TIME, on);
    }

    /// Set grapple.
    pub fn set_grapple(&mut self, on: bool) {
        self.set(Self::FLAG_GRAPPLE, on);
    }
}

// =============================================================================
// TESTS
// =============================================================================
