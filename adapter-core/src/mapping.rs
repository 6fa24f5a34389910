//! SNES-to-PlayStation button mapping.
//!
//! A [`MappingTable`] is a fixed list of [`MappingEntry`] records. Seven
//! tables exist, one per [`MappingKind`]; they only differ in which
//! PlayStation button (and pressure slot) each SNES button lands on.
//!
//! Customize a layout at compile time by adding another `const` table.

use psx_proto::{OutputFrame, PressureField, PsxButtons};
use snes_proto::SnesButtons;

/// One SNES button and where it goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MappingEntry {
    /// Source button (single bit).
    pub source: SnesButtons,
    /// Destination button (single bit).
    pub dest: PsxButtons,
    /// Pressure slot mirrored by this button, if it has one.
    pub pressure: Option<PressureField>,
}

impl MappingEntry {
    /// Entry with a pressure slot.
    #[must_use]
    pub const fn analog(source: SnesButtons, dest: PsxButtons, pressure: PressureField) -> Self {
        Self {
            source,
            dest,
            pressure: Some(pressure),
        }
    }

    /// Entry for a button the DualShock 2 does not report pressure for.
    #[must_use]
    pub const fn digital(source: SnesButtons, dest: PsxButtons) -> Self {
        Self {
            source,
            dest,
            pressure: None,
        }
    }
}

/// An immutable button layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MappingTable {
    /// Short name for logs.
    pub name: &'static str,
    /// Entries, applied independently of each other.
    pub entries: &'static [MappingEntry],
}

use MappingEntry as E;
use PressureField as P;
use PsxButtons as Psx;
use SnesButtons as Snes;

/// Type 1: B=Cross, Y=Square, A=Circle, X=Triangle, L/R=L1/R1.
pub const TYPE1: MappingTable = MappingTable {
    name: "type1",
    entries: &[
        E::analog(Snes::B, Psx::CROSS, P::Cross),
        E::analog(Snes::Y, Psx::SQUARE, P::Square),
        E::digital(Snes::SELECT, Psx::SELECT),
        E::digital(Snes::START, Psx::START),
        E::analog(Snes::UP, Psx::UP, P::Up),
        E::analog(Snes::DOWN, Psx::DOWN, P::Down),
        E::analog(Snes::LEFT, Psx::LEFT, P::Left),
        E::analog(Snes::RIGHT, Psx::RIGHT, P::Right),
        E::analog(Snes::A, Psx::CIRCLE, P::Circle),
        E::analog(Snes::X, Psx::TRIANGLE, P::Triangle),
        E::analog(Snes::R, Psx::R1, P::R1),
        E::analog(Snes::L, Psx::L1, P::L1),
    ],
};

/// Type 2: B=Circle, Y=Cross, A=R2, X=Triangle, L=Square.
pub const TYPE2: MappingTable = MappingTable {
    name: "type2",
    entries: &[
        E::analog(Snes::B, Psx::CIRCLE, P::Circle),
        E::analog(Snes::Y, Psx::CROSS, P::Cross),
        E::digital(Snes::SELECT, Psx::SELECT),
        E::digital(Snes::START, Psx::START),
        E::analog(Snes::UP, Psx::UP, P::Up),
        E::analog(Snes::DOWN, Psx::DOWN, P::Down),
        E::analog(Snes::LEFT, Psx::LEFT, P::Left),
        E::analog(Snes::RIGHT, Psx::RIGHT, P::Right),
        E::analog(Snes::A, Psx::R2, P::R2),
        E::analog(Snes::X, Psx::TRIANGLE, P::Triangle),
        E::analog(Snes::R, Psx::R1, P::R1),
        E::analog(Snes::L, Psx::SQUARE, P::Square),
    ],
};

/// Type 3: B=Triangle, Y=Circle, A=Cross, X=Square.
pub const TYPE3: MappingTable = MappingTable {
    name: "type3",
    entries: &[
        E::analog(Snes::B, Psx::TRIANGLE, P::Triangle),
        E::analog(Snes::Y, Psx::CIRCLE, P::Circle),
        E::digital(Snes::SELECT, Psx::SELECT),
        E::digital(Snes::START, Psx::START),
        E::analog(Snes::UP, Psx::UP, P::Up),
        E::analog(Snes::DOWN, Psx::DOWN, P::Down),
        E::analog(Snes::LEFT, Psx::LEFT, P::Left),
        E::analog(Snes::RIGHT, Psx::RIGHT, P::Right),
        E::analog(Snes::A, Psx::CROSS, P::Cross),
        E::analog(Snes::X, Psx::SQUARE, P::Square),
        E::analog(Snes::R, Psx::R1, P::R1),
        E::analog(Snes::L, Psx::L1, P::L1),
    ],
};

/// Type 4: B=Square, Y=Cross, A=Triangle, X=Circle.
pub const TYPE4: MappingTable = MappingTable {
    name: "type4",
    entries: &[
        E::analog(Snes::B, Psx::SQUARE, P::Square),
        E::analog(Snes::Y, Psx::CROSS, P::Cross),
        E::digital(Snes::SELECT, Psx::SELECT),
        E::digital(Snes::START, Psx::START),
        E::analog(Snes::UP, Psx::UP, P::Up),
        E::analog(Snes::DOWN, Psx::DOWN, P::Down),
        E::analog(Snes::LEFT, Psx::LEFT, P::Left),
        E::analog(Snes::RIGHT, Psx::RIGHT, P::Right),
        E::analog(Snes::A, Psx::TRIANGLE, P::Triangle),
        E::analog(Snes::X, Psx::CIRCLE, P::Circle),
        E::analog(Snes::R, Psx::R1, P::R1),
        E::analog(Snes::L, Psx::L1, P::L1),
    ],
};

/// Type 5: B=Circle, Y=Triangle, A=Square, X=Cross, shoulders swapped.
pub const TYPE5: MappingTable = MappingTable {
    name: "type5",
    entries: &[
        E::analog(Snes::B, Psx::CIRCLE, P::Circle),
        E::analog(Snes::Y, Psx::TRIANGLE, P::Triangle),
        E::digital(Snes::SELECT, Psx::SELECT),
        E::digital(Snes::START, Psx::START),
        E::analog(Snes::UP, Psx::UP, P::Up),
        E::analog(Snes::DOWN, Psx::DOWN, P::Down),
        E::analog(Snes::LEFT, Psx::LEFT, P::Left),
        E::analog(Snes::RIGHT, Psx::RIGHT, P::Right),
        E::analog(Snes::A, Psx::SQUARE, P::Square),
        E::analog(Snes::X, Psx::CROSS, P::Cross),
        E::analog(Snes::R, Psx::L1, P::L1),
        E::analog(Snes::L, Psx::R1, P::R1),
    ],
};

/// Type 6: type 1 with the shoulders on L2/R2.
pub const TYPE6: MappingTable = MappingTable {
    name: "type6",
    entries: &[
        E::analog(Snes::B, Psx::CROSS, P::Cross),
        E::analog(Snes::Y, Psx::SQUARE, P::Square),
        E::digital(Snes::SELECT, Psx::SELECT),
        E::digital(Snes::START, Psx::START),
        E::analog(Snes::UP, Psx::UP, P::Up),
        E::analog(Snes::DOWN, Psx::DOWN, P::Down),
        E::analog(Snes::LEFT, Psx::LEFT, P::Left),
        E::analog(Snes::RIGHT, Psx::RIGHT, P::Right),
        E::analog(Snes::A, Psx::CIRCLE, P::Circle),
        E::analog(Snes::X, Psx::TRIANGLE, P::Triangle),
        E::analog(Snes::R, Psx::R2, P::R2),
        E::analog(Snes::L, Psx::L2, P::L2),
    ],
};

/// Type 7: type 1 with the d-pad rotated 180° and shoulders swapped, for a
/// stick mounted on the right.
pub const TYPE7: MappingTable = MappingTable {
    name: "type7",
    entries: &[
        E::analog(Snes::B, Psx::CROSS, P::Cross),
        E::analog(Snes::Y, Psx::SQUARE, P::Square),
        E::digital(Snes::SELECT, Psx::SELECT),
        E::digital(Snes::START, Psx::START),
        E::analog(Snes::UP, Psx::DOWN, P::Down),
        E::analog(Snes::DOWN, Psx::UP, P::Up),
        E::analog(Snes::LEFT, Psx::RIGHT, P::Right),
        E::analog(Snes::RIGHT, Psx::LEFT, P::Left),
        E::analog(Snes::A, Psx::CIRCLE, P::Circle),
        E::analog(Snes::X, Psx::TRIANGLE, P::Triangle),
        E::analog(Snes::R, Psx::L1, P::L1),
        E::analog(Snes::L, Psx::R1, P::R1),
    ],
};

/// The selectable layouts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MappingKind {
    #[default]
    Type1,
    Type2,
    Type3,
    Type4,
    Type5,
    Type6,
    Type7,
}

impl MappingKind {
    /// Every layout, in catalogue order.
    pub const ALL: [MappingKind; 7] = [
        MappingKind::Type1,
        MappingKind::Type2,
        MappingKind::Type3,
        MappingKind::Type4,
        MappingKind::Type5,
        MappingKind::Type6,
        MappingKind::Type7,
    ];

    /// The table for this layout.
    #[must_use]
    pub const fn table(self) -> &'static MappingTable {
        match self {
            MappingKind::Type1 => &TYPE1,
            MappingKind::Type2 => &TYPE2,
            MappingKind::Type3 => &TYPE3,
            MappingKind::Type4 => &TYPE4,
            MappingKind::Type5 => &TYPE5,
            MappingKind::Type6 => &TYPE6,
            MappingKind::Type7 => &TYPE7,
        }
    }

    /// The button to hold at power-up to pick this layout.
    #[must_use]
    pub const fn modifier(self) -> SnesButtons {
        match self {
            MappingKind::Type1 => SnesButtons::START,
            MappingKind::Type2 => SnesButtons::SELECT,
            MappingKind::Type3 => SnesButtons::A,
            MappingKind::Type4 => SnesButtons::B,
            MappingKind::Type5 => SnesButtons::X,
            MappingKind::Type6 => SnesButtons::Y,
            MappingKind::Type7 => SnesButtons::L,
        }
    }
}

/// Translate one SNES sample into `frame`.
///
/// The status word is rebuilt from scratch. Pressure slots named by the
/// table are overwritten; slots the table never names keep their value.
pub fn translate(sample: SnesButtons, table: &MappingTable, frame: &mut OutputFrame) {
    // All ones: nothing pressed on the active-low status word.
    let mut status = 0xFFFF_u16;

    for entry in table.entries {
        let pressed = sample.contains(entry.source);
        if pressed {
            status &= !entry.dest.raw();
        }
        if let Some(field) = entry.pressure {
            frame.pressure[field.index()] = if pressed {
                OutputFrame::PRESSED
            } else {
                OutputFrame::RELEASED
            };
        }
    }

    frame.status = status;
}
