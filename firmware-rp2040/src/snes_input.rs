//! SNES pad on three GPIOs.
//!
//! # Pins
//!
//! | Signal | GPIO | Direction |
//! |--------|------|-----------|
//! | DATA   | 10   | in, pull-up |
//! | LATCH  | 11   | out |
//! | CLOCK  | 12   | out |
//!
//! The pull-up on DATA makes an unplugged pad read as nothing pressed.

use embassy_rp::gpio::{Input, Output};
use embassy_time::Delay;
use snes_proto::SnesBus;

/// The pad reader used by the main cycle.
pub type SnesPad<'d> = SnesBus<Output<'d>, Output<'d>, Input<'d>, Delay>;

/// Build the reader and put the bus in its idle state.
pub fn snes_pad<'d>(latch: Output<'d>, clock: Output<'d>, data: Input<'d>) -> SnesPad<'d> {
    let mut pad = SnesBus::new(latch, clock, data, Delay);
    // GPIO errors are infallible on the RP2040.
    let _ = pad.set_idle();
    pad
}
