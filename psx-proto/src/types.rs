//! Core PlayStation pad types: PsxButtons, PressureField, OutputFrame, DeviceIdentity.

use core::ops::BitOr;

/// Number of pressure-sensitive button fields in an extended reply.
pub const PRESSURE_FIELDS: usize = 12;

/// PlayStation button bitfield, set = pressed.
///
/// The low byte is the first status byte on the wire. On the wire itself the
/// buttons are active-low, see [`OutputFrame::status`].
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PsxButtons(pub u16);

impl PsxButtons {
    pub const SELECT: Self = Self(1 << 0);
    pub const L3: Self = Self(1 << 1);
    pub const R3: Self = Self(1 << 2);
    pub const START: Self = Self(1 << 3);
    pub const UP: Self = Self(1 << 4);
    pub const RIGHT: Self = Self(1 << 5);
    pub const DOWN: Self = Self(1 << 6);
    pub const LEFT: Self = Self(1 << 7);
    pub const L2: Self = Self(1 << 8);
    pub const R2: Self = Self(1 << 9);
    pub const L1: Self = Self(1 << 10);
    pub const R1: Self = Self(1 << 11);
    pub const TRIANGLE: Self = Self(1 << 12);
    pub const CIRCLE: Self = Self(1 << 13);
    pub const CROSS: Self = Self(1 << 14);
    pub const SQUARE: Self = Self(1 << 15);

    /// No buttons pressed.
    pub const NONE: Self = Self(0);

    /// Check if all the given button(s) are pressed.
    #[inline]
    #[must_use]
    pub const fn contains(self, button: PsxButtons) -> bool {
        (self.0 & button.0) == button.0
    }

    /// Get the raw u16 value.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// The active-low status word for these buttons.
    #[inline]
    #[must_use]
    pub const fn to_status(self) -> u16 {
        !self.0
    }

    /// Decode an active-low status word.
    #[inline]
    #[must_use]
    pub const fn from_status(status: u16) -> Self {
        Self(!status)
    }
}

impl BitOr for PsxButtons {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

/// Slot of a pressure-sensitive button in the extended reply, in transmit order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum PressureField {
    Right = 0,
    Left,
    Up,
    Down,
    Triangle,
    Circle,
    Cross,
    Square,
    L1,
    R1,
    L2,
    R2,
}

impl PressureField {
    /// Position of this field in [`OutputFrame::pressure`].
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Everything the pad reports in one poll.
///
/// Written by the main cycle, read byte by byte by the responder.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OutputFrame {
    /// Status word, active-low: a cleared bit is a pressed button.
    pub status: u16,
    /// Pressure per [`PressureField`]: `0xFF` fully pressed, `0x00` released.
    pub pressure: [u8; PRESSURE_FIELDS],
}

impl OutputFrame {
    /// Pressure value of a fully pressed button.
    pub const PRESSED: u8 = 0xFF;

    /// Pressure value of a released button.
    pub const RELEASED: u8 = 0x00;

    /// A frame with nothing pressed.
    #[must_use]
    pub const fn released() -> Self {
        Self {
            status: 0xFFFF,
            pressure: [Self::RELEASED; PRESSURE_FIELDS],
        }
    }

    /// The buttons pressed in this frame.
    #[inline]
    #[must_use]
    pub const fn buttons(&self) -> PsxButtons {
        PsxButtons::from_status(self.status)
    }

    /// First status byte on the wire.
    #[inline]
    #[must_use]
    pub const fn status_low(&self) -> u8 {
        self.status.to_le_bytes()[0]
    }

    /// Second status byte on the wire.
    #[inline]
    #[must_use]
    pub const fn status_high(&self) -> u8 {
        self.status.to_le_bytes()[1]
    }

    /// Pressure of one field.
    #[inline]
    #[must_use]
    pub const fn pressure_of(&self, field: PressureField) -> u8 {
        self.pressure[field.index()]
    }
}

impl Default for OutputFrame {
    fn default() -> Self {
        Self::released()
    }
}

/// The pad type reported to the host, fixed at boot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DeviceIdentity {
    /// Digital pad: two status bytes only.
    #[default]
    Digital,
    /// DualShock 2: status bytes, neutral sticks and button pressures.
    DualShock2,
}

impl DeviceIdentity {
    /// The ID byte answered to the begin command.
    #[inline]
    #[must_use]
    pub const fn id(self) -> u8 {
        match self {
            DeviceIdentity::Digital => 0x41,
            DeviceIdentity::DualShock2 => 0x79,
        }
    }

    /// Whether the extended stick and pressure bytes follow the status word.
    #[inline]
    #[must_use]
    pub const fn is_extended(self) -> bool {
        matches!(self, DeviceIdentity::DualShock2)
    }
}
