//! Lock-free hand-over of the translated frame.
//!
//! The main cycle is the only writer and the responder the only reader.
//! Two slots alternate: the writer fills the slot that is not published and
//! then flips the index with `Release`; the reader loads the index with
//! `Acquire` and copies that slot.
//!
//! A copy is coherent as long as the writer does not publish twice while
//! the copy is in progress. On a single core, with the reader running at
//! interrupt priority above the writer, that cannot happen.

use portable_atomic::{AtomicU16, AtomicU8, Ordering};
use psx_proto::{FrameSource, OutputFrame, PRESSURE_FIELDS};

struct Slot {
    status: AtomicU16,
    pressure: [AtomicU8; PRESSURE_FIELDS],
}

impl Slot {
    #[allow(clippy::declare_interior_mutable_const)]
    const RELEASED_FIELD: AtomicU8 = AtomicU8::new(OutputFrame::RELEASED);

    const fn new() -> Self {
        Self {
            status: AtomicU16::new(0xFFFF),
            pressure: [Self::RELEASED_FIELD; PRESSURE_FIELDS],
        }
    }

    fn store(&self, frame: &OutputFrame) {
        self.status.store(frame.status, Ordering::Relaxed);
        for (cell, &value) in self.pressure.iter().zip(frame.pressure.iter()) {
            cell.store(value, Ordering::Relaxed);
        }
    }

    fn load(&self) -> OutputFrame {
        let mut frame = OutputFrame::released();
        frame.status = self.status.load(Ordering::Relaxed);
        for (value, cell) in frame.pressure.iter_mut().zip(self.pressure.iter()) {
            *value = cell.load(Ordering::Relaxed);
        }
        frame
    }
}

/// Double-buffered [`OutputFrame`] shared between the main cycle and the responder.
///
/// Starts out as [`OutputFrame::released`]. Suitable for a `static`.
pub struct SharedFrame {
    slots: [Slot; 2],
    published: AtomicU8,
}

impl SharedFrame {
    /// Create a shared frame with nothing pressed.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slots: [Slot::new(), Slot::new()],
            published: AtomicU8::new(0),
        }
    }

    /// Make `frame` the current frame.
    ///
    /// Single writer only: call from the main cycle and nowhere else.
    pub fn publish(&self, frame: &OutputFrame) {
        let next = self.published.load(Ordering::Relaxed) ^ 1;
        self.slots[usize::from(next)].store(frame);
        self.published.store(next, Ordering::Release);
    }

    /// Copy out the current frame.
    #[must_use]
    pub fn load(&self) -> OutputFrame {
        let current = self.published.load(Ordering::Acquire) & 1;
        self.slots[usize::from(current)].load()
    }
}

impl Default for SharedFrame {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameSource for SharedFrame {
    fn snapshot(&self) -> OutputFrame {
        self.load()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use psx_proto::{DeviceIdentity, PressureField, PsxButtons, Responder};

    fn frame_with(status: u16, fill: u8) -> OutputFrame {
        OutputFrame {
            status,
            pressure: [fill; PRESSURE_FIELDS],
        }
    }

    #[test]
    fn test_starts_released() {
        let shared = SharedFrame::new();
        assert_eq!(shared.load(), OutputFrame::released());
    }

    #[test]
    fn test_publish_then_load() {
        let shared = SharedFrame::new();
        let frame = frame_with(0x1234, 0xFF);
        shared.publish(&frame);
        assert_eq!(shared.load(), frame);
    }

    #[test]
    fn test_alternates_slots() {
        let shared = SharedFrame::new();
        for i in 0..5u16 {
            let frame = frame_with(i, i as u8);
            shared.publish(&frame);
            assert_eq!(shared.load(), frame);
        }
    }

    #[test]
    fn test_load_does_not_see_unpublished_slot() {
        let shared = SharedFrame::new();
        let first = frame_with(0xAAAA, 0x11);
        shared.publish(&first);

        // Scribble on the spare slot the way an interrupted publish would.
        shared.slots[0].status.store(0x5555, Ordering::Relaxed);
        shared.slots[0].pressure[3].store(0x99, Ordering::Relaxed);

        assert_eq!(shared.load(), first);
    }

    #[test]
    fn test_responder_reads_published_frame() {
        let shared = SharedFrame::new();
        let mut frame = OutputFrame::released();
        frame.status = (PsxButtons::START | PsxButtons::L1).to_status();
        frame.pressure[PressureField::L1.index()] = OutputFrame::PRESSED;
        shared.publish(&frame);

        let mut responder = Responder::new(DeviceIdentity::Digital);
        responder.on_byte(0x01, &shared);
        responder.on_byte(0x42, &shared);
        let low = responder.on_byte(0x00, &shared);
        let high = responder.on_byte(0x00, &shared);

        assert_eq!(low.byte, !frame.status_low());
        assert_eq!(high.byte, !frame.status_high());
    }
}
