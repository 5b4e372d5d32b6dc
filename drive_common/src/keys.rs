//! Logical control keys and the per-tick held-key set

use std::fmt;

/// Bit assignments for each logical key (up to 8 keys fit in a `HeldKeys`)
pub mod key_bit {
    pub const FORWARD:    u8 = 1 << 0;
    pub const BACKWARD:   u8 = 1 << 1;
    pub const TURN_LEFT:  u8 = 1 << 2;
    pub const TURN_RIGHT: u8 = 1 << 3;
    pub const BRAKE:      u8 = 1 << 4;

    /// Every bit that maps to a logical key
    pub const ALL: u8 = FORWARD | BACKWARD | TURN_LEFT | TURN_RIGHT | BRAKE;
}

/// Keys the input mapper understands, independent of the physical keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalKey {
    Forward,
    Backward,
    TurnLeft,
    TurnRight,
    Brake,
}

impl LogicalKey {
    pub const ALL: [LogicalKey; 5] = [
        LogicalKey::Forward,
        LogicalKey::Backward,
        LogicalKey::TurnLeft,
        LogicalKey::TurnRight,
        LogicalKey::Brake,
    ];

    #[inline]
    pub const fn mask(self) -> u8 {
        match self {
            LogicalKey::Forward => key_bit::FORWARD,
            LogicalKey::Backward => key_bit::BACKWARD,
            LogicalKey::TurnLeft => key_bit::TURN_LEFT,
            LogicalKey::TurnRight => key_bit::TURN_RIGHT,
            LogicalKey::Brake => key_bit::BRAKE,
        }
    }
}

/// Snapshot of the logical keys held during one tick, packed into a bitmask
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct HeldKeys(u8);

impl HeldKeys {
    pub const fn empty() -> Self {
        HeldKeys(0)
    }

    /// Build from raw bits; bits without a logical key are dropped
    pub const fn from_bits(bits: u8) -> Self {
        HeldKeys(bits & key_bit::ALL)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Builder-style press, handy for tests and scripted input
    #[must_use]
    pub const fn with(self, key: LogicalKey) -> Self {
        HeldKeys(self.0 | key.mask())
    }

    pub fn press(&mut self, key: LogicalKey) {
        self.0 |= key.mask();
    }

    pub fn release(&mut self, key: LogicalKey) {
        self.0 &= !key.mask();
    }

    #[inline]
    pub const fn is_held(self, key: LogicalKey) -> bool {
        self.0 & key.mask() != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterate over held keys in declaration order
    pub fn iter(self) -> impl Iterator<Item = LogicalKey> {
        LogicalKey::ALL.into_iter().filter(move |k| self.is_held(*k))
    }
}

impl FromIterator<LogicalKey> for HeldKeys {
    fn from_iter<I: IntoIterator<Item = LogicalKey>>(iter: I) -> Self {
        iter.into_iter().fold(HeldKeys::empty(), HeldKeys::with)
    }
}

impl fmt::Display for HeldKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self
            .iter()
            .map(|k| match k {
                LogicalKey::Forward => "forward",
                LogicalKey::Backward => "backward",
                LogicalKey::TurnLeft => "left",
                LogicalKey::TurnRight => "right",
                LogicalKey::Brake => "brake",
            })
            .collect();
        if names.is_empty() {
            write!(f, "-")
        } else {
            write!(f, "{}", names.join("+"))
        }
    }
}
