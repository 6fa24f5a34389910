//! Platform-agnostic core of the SNES to PlayStation pad adapter.
//!
//! This crate ties the two protocol crates together without any
//! chip-specific dependencies. It can be used both in embedded `no_std`
//! environments and on host for testing.
//!
//! # Overview
//!
//! - [`mapping`]: the fixed table catalogue and [`translate`]
//! - [`boot`]: one-shot selection of table and identity ([`BootConfig`])
//! - [`frame`]: lock-free hand-over of the translated frame ([`SharedFrame`])
//! - [`input`]: pad sample source trait ([`SampleSource`])
//! - [`output`]: host port trait ([`HostLink`])
//! - [`bridge`]: the main cycle ([`AdapterBridge`])
//!
//! # Data flow
//!
//! ```text
//! SnesBus -> translate(table) -> SharedFrame -> Responder (per host byte) -> host
//! ```
//!
//! The main cycle writes the [`SharedFrame`]; the responder, running at
//! interrupt priority, snapshots it when the host asks for data.
//!
//! # Example
//!
//! ```rust
//! use adapter_core::{translate, BootConfig, SharedFrame};
//! use psx_proto::{DeviceIdentity, OutputFrame, PsxButtons, Responder};
//! use snes_proto::SnesButtons;
//!
//! let config = BootConfig::from_sample(SnesButtons::NONE);
//! let shared = SharedFrame::new();
//!
//! let mut frame = OutputFrame::released();
//! translate(SnesButtons::B, config.table(), &mut frame);
//! shared.publish(&frame);
//! assert!(frame.buttons().contains(PsxButtons::CROSS));
//!
//! let mut responder = Responder::new(config.identity);
//! let id = responder.on_byte(0x01, &shared);
//! assert_eq!(id.byte, !0x41);
//! ```
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Enable defmt formatting (for embedded logging)

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

pub mod boot;
pub mod bridge;
pub mod frame;
pub mod input;
pub mod mapping;
pub mod output;

// Re-export main types at crate root
pub use boot::{BootConfig, IDENTITY_BUTTON, MODIFIER_MASK};
pub use bridge::{AdapterBridge, BridgeError};
pub use frame::SharedFrame;
pub use input::{SampleError, SampleSource};
pub use mapping::{translate, MappingEntry, MappingKind, MappingTable};
pub use output::HostLink;
