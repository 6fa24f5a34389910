//! SNES controller bus: button layout and a bit-banged bus sampler.
//!
//! The SNES pad is a pair of 8-bit parallel-in shift registers. A latch
//! pulse captures the buttons, then 16 clock pulses shift them out on a
//! single data line, active-low, in the order:
//!
//! ```text
//! B Y Select Start Up Down Left Right A X L R 1 1 1 1
//! ```
//!
//! This crate knows nothing about the chip it runs on. [`SnesBus`] is generic
//! over the `embedded-hal` 1.0 [`OutputPin`](embedded_hal::digital::OutputPin),
//! [`InputPin`](embedded_hal::digital::InputPin) and
//! [`DelayNs`](embedded_hal::delay::DelayNs) traits, so it runs against real
//! GPIOs on target and against mock pins in host tests.
//!
//! # Example
//!
//! ```ignore
//! use snes_proto::{SnesBus, SnesButtons};
//!
//! let mut bus = SnesBus::new(latch, clock, data, delay);
//! let buttons = bus.read()?;
//! if buttons.contains(SnesButtons::START) {
//!     // ...
//! }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

pub mod bus;
pub mod types;

pub use bus::{BusError, BusTiming, SnesBus, SNES_TIMING};
pub use types::SnesButtons;
