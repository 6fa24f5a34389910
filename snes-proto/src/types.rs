//! SNES button bitfield.

use core::ops::{BitAnd, BitOr};

/// One sample of the SNES pad, one bit per button, set = pressed.
///
/// Bit positions follow the order the pad shifts them out: the first bit on
/// the wire is bit 15. The four trailing bits are unused by a standard pad
/// and always read as released.
///
/// # Example
///
/// ```
/// use snes_proto::SnesButtons;
///
/// let buttons = SnesButtons::B | SnesButtons::START;
/// assert!(buttons.contains(SnesButtons::START));
/// assert!(!buttons.contains(SnesButtons::A));
/// ```
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SnesButtons(pub u16);

impl SnesButtons {
    pub const B: Self = Self(0x8000);
    pub const Y: Self = Self(0x4000);
    pub const SELECT: Self = Self(0x2000);
    pub const START: Self = Self(0x1000);
    pub const UP: Self = Self(0x0800);
    pub const DOWN: Self = Self(0x0400);
    pub const LEFT: Self = Self(0x0200);
    pub const RIGHT: Self = Self(0x0100);
    pub const A: Self = Self(0x0080);
    pub const X: Self = Self(0x0040);
    pub const L: Self = Self(0x0020);
    pub const R: Self = Self(0x0010);

    /// No buttons pressed.
    pub const NONE: Self = Self(0);

    /// Every button a standard pad reports.
    pub const ALL: Self = Self(0xFFF0);

    /// Build a sample from the two raw bytes shifted in from the bus.
    ///
    /// The wire is active-low, so the bytes are inverted here.
    #[inline]
    #[must_use]
    pub const fn from_wire(bytes: [u8; 2]) -> Self {
        Self(!u16::from_be_bytes(bytes))
    }

    /// Check if all the given button(s) are pressed.
    #[inline]
    #[must_use]
    pub const fn contains(self, button: SnesButtons) -> bool {
        (self.0 & button.0) == button.0
    }

    /// Get the raw u16 value.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }
}

impl BitOr for SnesButtons {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl BitAnd for SnesButtons {
    type Output = Self;

    #[inline]
    fn bitand(self, rhs: Self) -> Self::Output {
        Self(self.0 & rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_wire_all_released() {
        // Pull-up on the data line: nothing connected reads all ones.
        assert_eq!(SnesButtons::from_wire([0xFF, 0xFF]), SnesButtons::NONE);
    }

    #[test]
    fn test_from_wire_first_byte_is_high() {
        // B is the first bit shifted out, pressed pulls it low.
        let buttons = SnesButtons::from_wire([0x7F, 0xFF]);
        assert_eq!(buttons, SnesButtons::B);

        let buttons = SnesButtons::from_wire([0xFF, 0xEF]);
        assert_eq!(buttons, SnesButtons::R);
    }

    #[test]
    fn test_buttons_bitwise_or() {
        let buttons = SnesButtons::A | SnesButtons::L;
        assert!(buttons.contains(SnesButtons::A));
        assert!(buttons.contains(SnesButtons::L));
        assert!(!buttons.contains(SnesButtons::R));
    }

    #[test]
    fn test_buttons_bitwise_and_masks() {
        let held = SnesButtons::UP | SnesButtons::START | SnesButtons::R;
        let masked = held & (SnesButtons::START | SnesButtons::SELECT);
        assert_eq!(masked, SnesButtons::START);
        assert_eq!(held & SnesButtons::A, SnesButtons::NONE);
    }

    #[test]
    fn test_all_covers_twelve_buttons() {
        assert_eq!(SnesButtons::ALL.raw().count_ones(), 12);
        assert_eq!(SnesButtons::ALL.raw() & 0x000F, 0);
    }
}
