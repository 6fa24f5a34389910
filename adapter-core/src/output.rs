//! Host port trait.

/// The side of the host port the main cycle can see.
///
/// The byte exchange itself runs in the responder at interrupt priority.
/// The main cycle only needs to know whether the adapter is selected and
/// to end a transaction once the host lets go of attention.
pub trait HostLink {
    /// `true` while the host holds attention low.
    fn is_selected(&mut self) -> bool;

    /// Return the responder to idle and release ACK.
    ///
    /// Called every cycle the port is deselected, so it must be cheap and
    /// idempotent.
    fn end_transaction(&mut self);
}
