//! AdapterBridge: the main cycle.

use psx_proto::OutputFrame;
use snes_proto::SnesButtons;

use crate::boot::BootConfig;
use crate::frame::SharedFrame;
use crate::input::{SampleError, SampleSource};
use crate::mapping::{translate, MappingTable};
use crate::output::HostLink;

/// Samples the pad, translates it and publishes the result for the responder.
///
/// The layout is fixed at construction from a [`BootConfig`]. The bridge owns
/// the working copy of the frame; the responder only ever sees what has been
/// published to the [`SharedFrame`].
///
/// # Error Handling
///
/// On a sample error the bridge publishes a frame with nothing pressed, so
/// that a failing pad cannot leave a button stuck down.
pub struct AdapterBridge<'a, S, L> {
    source: S,
    link: L,
    table: &'static MappingTable,
    frame: OutputFrame,
    shared: &'a SharedFrame,
}

impl<'a, S: SampleSource, L: HostLink> AdapterBridge<'a, S, L> {
    /// Create a bridge using the table chosen by `config`.
    pub fn new(source: S, link: L, config: &BootConfig, shared: &'a SharedFrame) -> Self {
        Self {
            source,
            link,
            table: config.table(),
            frame: OutputFrame::released(),
            shared,
        }
    }

    /// One iteration of the main cycle.
    ///
    /// Ends the host transaction if attention is released, then samples,
    /// translates and publishes. Sampling happens whether or not the host is
    /// selecting the adapter, so the frame is fresh when the next poll starts.
    pub fn cycle(&mut self) -> Result<SnesButtons, BridgeError> {
        if !self.link.is_selected() {
            self.link.end_transaction();
        }

        match self.source.sample() {
            Ok(sample) => {
                translate(sample, self.table, &mut self.frame);
                self.shared.publish(&self.frame);
                Ok(sample)
            }
            Err(e) => {
                translate(SnesButtons::NONE, self.table, &mut self.frame);
                self.shared.publish(&self.frame);
                Err(BridgeError::Sample(e))
            }
        }
    }

    /// The layout in use.
    pub fn table(&self) -> &'static MappingTable {
        self.table
    }

    /// The last frame translated (and published).
    pub fn frame(&self) -> &OutputFrame {
        &self.frame
    }

    /// Get a reference to the host link.
    pub fn link(&self) -> &L {
        &self.link
    }

    /// Get a mutable reference to the host link.
    pub fn link_mut(&mut self) -> &mut L {
        &mut self.link
    }

    /// Decompose the bridge into its source and link.
    pub fn into_parts(self) -> (S, L) {
        (self.source, self.link)
    }
}

/// Error type for bridge operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BridgeError {
    /// Error from the sample source.
    Sample(SampleError),
}
