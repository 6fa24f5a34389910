//! Main-cycle view of the controller port.

use adapter_core::HostLink;

use crate::psx_port::PortState;

/// [`HostLink`] over the state shared with the port task.
///
/// Attention is tracked by the port task, which owns the ATT pin.
#[derive(Clone, Copy)]
pub struct PortLink {
    state: &'static PortState,
}

impl PortLink {
    #[must_use]
    pub fn new(state: &'static PortState) -> Self {
        Self { state }
    }
}

impl HostLink for PortLink {
    fn is_selected(&mut self) -> bool {
        self.state.is_selected()
    }

    fn end_transaction(&mut self) {
        self.state.end_transaction();
    }
}
