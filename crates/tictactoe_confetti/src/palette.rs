//! Confetti colors.

use serde::{Deserialize, Serialize};
use strum::{EnumCount, IntoEnumIterator};

/// One of the fixed confetti colors.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::EnumCount,
)]
pub enum ConfettiColor {
    /// `#06b6d4`
    Cyan,
    /// `#f43f5e`
    Rose,
    /// `#3b82f6`
    Blue,
    /// `#8b5cf6`
    Violet,
    /// `#ffffff`
    White,
}

impl ConfettiColor {
    /// Red, green and blue channels.
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            ConfettiColor::Cyan => (0x06, 0xb6, 0xd4),
            ConfettiColor::Rose => (0xf4, 0x3f, 0x5e),
            ConfettiColor::Blue => (0x3b, 0x82, 0xf6),
            ConfettiColor::Violet => (0x8b, 0x5c, 0xf6),
            ConfettiColor::White => (0xff, 0xff, 0xff),
        }
    }

    /// CSS-style hex string.
    pub fn hex(self) -> String {
        let (r, g, b) = self.rgb();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// Palette entry by index, wrapping around.
    pub fn nth(index: usize) -> Self {
        Self::iter()
            .nth(index % Self::COUNT)
            .unwrap_or(ConfettiColor::White)
    }
}
