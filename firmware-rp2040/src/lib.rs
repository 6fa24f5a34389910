//! SNES pad to PlayStation controller port adapter for RP2040.
//!
//! This crate provides the board glue around [`adapter_core`]: the SNES pad
//! on GPIOs, the controller port on PIO0 and the state the two share.
//!
//! # Overview
//!
//! The firmware runs on a Raspberry Pi Pico (RP2040) and:
//! 1. Samples the SNES pad at power-up and picks a layout and identity
//! 2. Samples, translates and publishes the pad state in a tight loop
//! 3. Answers the console byte by byte from a PIO shifter
//!
//! # Hardware Configuration
//!
//! | Function   | GPIO | Description |
//! |------------|------|-------------|
//! | PSX CMD    | 2    | Command from console |
//! | PSX CLK    | 3    | Clock from console |
//! | PSX DAT    | 4    | Data to console (open-drain) |
//! | PSX ATT    | 5    | Attention from console, fixed (read by the PIO program) |
//! | PSX ACK    | 6    | Acknowledge to console (open-drain) |
//! | SNES DATA  | 10   | Serial data from pad |
//! | SNES LATCH | 11   | Latch to pad |
//! | SNES CLOCK | 12   | Clock to pad |
//!
//! The console side is 3.3 V on the PlayStation 2 and needs level shifting
//! on the original PlayStation.
//!
//! # Architecture
//!
//! Two contexts on one core:
//!
//! - **Port task**: runs on an interrupt executor, handles every byte the
//!   console clocks and pulses ACK
//! - **Main cycle**: runs in thread mode, never awaits, samples the pad and
//!   publishes the translated frame
//!
//! They share one [`PortState`]: a lock-free [`SharedFrame`](adapter_core::SharedFrame)
//! for the frame and a critical-section mutex around the responder.
//!
//! # Features
//!
//! - **`dev-panic`** (default): Use `panic-probe` for development (prints panic info via RTT)
//! - **`prod-panic`**: Use `panic-reset` for production (silent reset)
//!
//! # Re-exports
//!
//! This crate re-exports the public items of [`adapter_core`] that the
//! binary needs, so it only depends on this crate.

#![no_std]

#[cfg(all(feature = "dev-panic", feature = "prod-panic"))]
compile_error!("Cannot enable both `dev-panic` and `prod-panic` features - they install conflicting panic handlers");

// Re-export core types for convenience
pub use adapter_core::{
    translate, AdapterBridge, BootConfig, BridgeError, HostLink, MappingKind, MappingTable,
    SampleError, SampleSource, SharedFrame,
};
pub use psx_proto::DeviceIdentity;
pub use snes_proto::SnesButtons;

pub mod host_link;
pub mod psx_port;
pub mod snes_input;

pub use host_link::PortLink;
pub use psx_port::{PortState, PortTask};
pub use snes_input::{snes_pad, SnesPad};
