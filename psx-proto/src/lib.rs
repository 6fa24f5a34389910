//! Device side of the PlayStation controller port protocol.
//!
//! This crate provides everything needed to impersonate a pad on the
//! PlayStation controller bus:
//!
//! - **Types**: [`PsxButtons`], [`PressureField`], [`OutputFrame`],
//!   [`DeviceIdentity`]
//! - **State machine**: [`Responder`], fed one received command byte at a
//!   time, returning the [`Reply`] to shift out next
//! - **Acknowledge**: [`AckPulse`], the open-collector pulse that tells the
//!   host another byte follows
//!
//! # Protocol
//!
//! The host selects the pad (ATT low) and clocks bytes LSB-first, full
//! duplex. A poll looks like this (host / pad, logical values):
//!
//! ```text
//! host: 01  42  xx  xx  xx  [xx * 16]
//! pad : ff  ID  5a  lo  hi  [7f * 4, pressure * 12]
//! ```
//!
//! The bracketed part is only sent with the [`DeviceIdentity::DualShock2`]
//! identity. After every byte but the last the pad pulses ACK low. Bytes the
//! host sends after `42` are don't-care.
//!
//! Every value this crate hands to the shift register is the bitwise inverse
//! of the logical value ([`to_wire`]), because the output stage inverts.
//!
//! # No-std Support
//!
//! This crate is `#![no_std]` by default and uses no heap allocations, so the
//! responder can run straight from an interrupt handler.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

pub mod ack;
pub mod responder;
pub mod types;

pub use ack::{AckPulse, AckTiming, PSX_ACK_TIMING};
pub use responder::{FrameSource, Phase, Reply, Responder};
pub use types::{DeviceIdentity, OutputFrame, PressureField, PsxButtons, PRESSURE_FIELDS};

/// Host command opening a transaction addressed to a pad.
pub const CMD_BEGIN: u8 = 0x01;

/// Host command requesting button data.
pub const CMD_GET_DATA: u8 = 0x42;

/// Pad reply marking the start of button data.
pub const REPLY_DATA_START: u8 = 0x5A;

/// Logical value of a centred analog stick axis.
pub const NEUTRAL_AXIS: u8 = 0x7F;

/// Number of analog stick bytes in an extended reply.
pub const AXIS_BYTES: u8 = 4;

/// Shift register value that leaves the data line released.
///
/// The host reads it as `0xFF`.
pub const WIRE_FILLER: u8 = 0x00;

/// Convert a logical byte to the value loaded into the shift register.
#[inline]
#[must_use]
pub const fn to_wire(logical: u8) -> u8 {
    !logical
}
