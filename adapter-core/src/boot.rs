//! Power-up configuration from the buttons held at boot.
//!
//! Two independent choices are made once from the first sample:
//!
//! - exactly one modifier button held picks a [`MappingKind`]
//!   (see [`MappingKind::modifier`]), anything else keeps type 1;
//! - Up held picks the DualShock 2 identity, otherwise digital.

use psx_proto::DeviceIdentity;
use snes_proto::SnesButtons;

use crate::mapping::{MappingKind, MappingTable};

/// Buttons that take part in layout selection.
pub const MODIFIER_MASK: SnesButtons = SnesButtons(
    SnesButtons::START.raw()
        | SnesButtons::SELECT.raw()
        | SnesButtons::A.raw()
        | SnesButtons::B.raw()
        | SnesButtons::X.raw()
        | SnesButtons::Y.raw()
        | SnesButtons::L.raw(),
);

/// Button that selects the extended identity.
pub const IDENTITY_BUTTON: SnesButtons = SnesButtons::UP;

/// What the adapter pretends to be until the next power cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BootConfig {
    pub mapping: MappingKind,
    pub identity: DeviceIdentity,
}

impl BootConfig {
    #[must_use]
    pub const fn new(mapping: MappingKind, identity: DeviceIdentity) -> Self {
        Self { mapping, identity }
    }

    /// Derive the configuration from the sample taken at power-up.
    #[must_use]
    pub fn from_sample(sample: SnesButtons) -> Self {
        let held = sample & MODIFIER_MASK;
        let mapping = MappingKind::ALL
            .into_iter()
            .find(|kind| kind.modifier() == held)
            .unwrap_or_default();

        let identity = if sample.contains(IDENTITY_BUTTON) {
            DeviceIdentity::DualShock2
        } else {
            DeviceIdentity::Digital
        };

        Self { mapping, identity }
    }

    /// The selected table.
    #[inline]
    #[must_use]
    pub fn table(&self) -> &'static MappingTable {
        self.mapping.table()
    }
}
