//! Byte-driven pad responder.
//!
//! The host bus is full duplex: while the host shifts command byte `n` in,
//! the pad shifts out the reply it prepared after byte `n - 1`. The
//! [`Responder`] is called once per received byte and returns that prepared
//! reply together with whether to acknowledge.
//!
//! ```text
//! Idle --01--> Ready --42--> SendStatus0 -> SendStatus1 -+-> Done
//!                                                        |
//!            (DualShock2) SendExtendedAxes x4 -> SendExtendedButtons x12 -> Done
//! ```
//!
//! From `SendStatus0` on the received byte is ignored: some games send
//! non-zero bytes there and still expect the pad to answer.

use crate::types::{DeviceIdentity, OutputFrame, PRESSURE_FIELDS};
use crate::{to_wire, AXIS_BYTES, CMD_BEGIN, CMD_GET_DATA, NEUTRAL_AXIS, REPLY_DATA_START, WIRE_FILLER};

/// Where the responder is within the current transaction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Waiting for the begin command.
    #[default]
    Idle,
    /// ID sent, waiting for get-data.
    Ready,
    /// Data-start marker sent, low status byte next.
    SendStatus0,
    /// High status byte next.
    SendStatus1,
    /// Neutral stick bytes next.
    SendExtendedAxes,
    /// Pressure bytes next.
    SendExtendedButtons,
    /// Transaction complete, only filler until deselected.
    Done,
}

/// What to do after receiving one byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Reply {
    /// Shift register value for the next byte (already inverted).
    pub byte: u8,
    /// Pulse the acknowledge line once `byte` is loaded.
    pub ack: bool,
}

impl Reply {
    /// Queue a logical value and acknowledge.
    #[inline]
    #[must_use]
    pub const fn send(logical: u8) -> Self {
        Self {
            byte: to_wire(logical),
            ack: true,
        }
    }

    /// Leave the data line released and do not acknowledge.
    #[inline]
    #[must_use]
    pub const fn filler() -> Self {
        Self {
            byte: WIRE_FILLER,
            ack: false,
        }
    }
}

/// Where the responder takes the frame from when the host asks for data.
pub trait FrameSource {
    /// Copy out the latest complete frame.
    fn snapshot(&self) -> OutputFrame;
}

impl FrameSource for OutputFrame {
    fn snapshot(&self) -> OutputFrame {
        *self
    }
}

/// The pad side of one controller port.
///
/// Not reentrant: call [`on_byte`](Self::on_byte) from exactly one context
/// and [`reset`](Self::reset) whenever the host releases ATT.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Responder {
    identity: DeviceIdentity,
    phase: Phase,
    /// The transaction is for another device on the bus.
    draining: bool,
    /// Frame latched when get-data was accepted.
    frame: OutputFrame,
    axes_left: u8,
    pressure_index: u8,
}

impl Responder {
    /// Create an idle responder reporting the given identity.
    #[must_use]
    pub const fn new(identity: DeviceIdentity) -> Self {
        Self {
            identity,
            phase: Phase::Idle,
            draining: false,
            frame: OutputFrame::released(),
            axes_left: AXIS_BYTES,
            pressure_index: 0,
        }
    }

    /// Drop all transaction state. Call when the host deselects the pad.
    pub fn reset(&mut self) {
        self.phase = Phase::Idle;
        self.draining = false;
        self.axes_left = AXIS_BYTES;
        self.pressure_index = 0;
    }

    /// Handle one byte received from the host.
    pub fn on_byte<F>(&mut self, cmd: u8, source: &F) -> Reply
    where
        F: FrameSource + ?Sized,
    {
        match self.phase {
            Phase::Idle => {
                if self.draining {
                    Reply::filler()
                } else if cmd == CMD_BEGIN {
                    self.phase = Phase::Ready;
                    Reply::send(self.identity.id())
                } else {
                    // Someone else's transaction (memory card): stay off the
                    // bus until ATT goes high.
                    self.draining = true;
                    Reply::filler()
                }
            }
            Phase::Ready => {
                if cmd == CMD_GET_DATA {
                    self.frame = source.snapshot();
                    self.phase = Phase::SendStatus0;
                    Reply::send(REPLY_DATA_START)
                } else {
                    Reply::filler()
                }
            }
            Phase::SendStatus0 => {
                self.phase = Phase::SendStatus1;
                Reply::send(self.frame.status_low())
            }
            Phase::SendStatus1 => {
                self.phase = if self.identity.is_extended() {
                    Phase::SendExtendedAxes
                } else {
                    Phase::Done
                };
                Reply::send(self.frame.status_high())
            }
            Phase::SendExtendedAxes => {
                self.axes_left = self.axes_left.saturating_sub(1);
                if self.axes_left == 0 {
                    self.phase = Phase::SendExtendedButtons;
                }
                Reply::send(NEUTRAL_AXIS)
            }
            Phase::SendExtendedButtons => {
                let value = self.frame.pressure[usize::from(self.pressure_index)];
                self.pressure_index += 1;
                if usize::from(self.pressure_index) >= PRESSURE_FIELDS {
                    self.phase = Phase::Done;
                }
                Reply::send(value)
            }
            Phase::Done => Reply::filler(),
        }
    }

    /// Current phase.
    #[inline]
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether the current transaction is being ignored.
    #[inline]
    #[must_use]
    pub fn is_draining(&self) -> bool {
        self.draining
    }

    /// The identity this responder reports.
    #[inline]
    #[must_use]
    pub fn identity(&self) -> DeviceIdentity {
        self.identity
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::types::{PressureField, PsxButtons};
    use std::vec::Vec;

    fn run(responder: &mut Responder, frame: &OutputFrame, cmds: &[u8]) -> Vec<Reply> {
        cmds.iter().map(|&c| responder.on_byte(c, frame)).collect()
    }

    fn bytes(replies: &[Reply]) -> Vec<u8> {
        replies.iter().map(|r| r.byte).collect()
    }

    fn up_frame() -> OutputFrame {
        OutputFrame {
            status: PsxButtons::UP.to_status(),
            ..OutputFrame::released()
        }
    }

    fn extended_frame() -> OutputFrame {
        let mut frame = OutputFrame::released();
        for (i, p) in frame.pressure.iter_mut().enumerate() {
            *p = i as u8 + 1;
        }
        frame
    }

    #[test]
    fn test_digital_poll() {
        let mut responder = Responder::new(DeviceIdentity::Digital);
        let frame = up_frame();

        let replies = run(&mut responder, &frame, &[0x01, 0x42, 0x00, 0x00, 0x00]);
        // 0xEF has only bit 4 (Up) clear.
        assert_eq!(bytes(&replies), [0xBE, 0xA5, 0x10, 0x00, 0x00]);
        assert_eq!(
            replies.iter().map(|r| r.ack).collect::<Vec<_>>(),
            [true, true, true, true, false]
        );
        assert_eq!(responder.phase(), Phase::Done);
    }

    #[test]
    fn test_data_phase_ignores_payload() {
        let frame = up_frame();
        let mut a = Responder::new(DeviceIdentity::Digital);
        let mut b = Responder::new(DeviceIdentity::Digital);

        let quiet = run(&mut a, &frame, &[0x01, 0x42, 0x00, 0x00, 0x00]);
        // Einhander-style and Rollcage-style placeholder bytes.
        let noisy = run(&mut b, &frame, &[0x01, 0x42, 0x01, 0x40, 0xFF]);
        assert_eq!(quiet, noisy);
    }

    #[test]
    fn test_foreign_transaction_is_drained() {
        let mut responder = Responder::new(DeviceIdentity::Digital);
        let frame = up_frame();

        // Memory card access, with a stray 0x01 later on.
        let replies = run(&mut responder, &frame, &[0x81, 0x52, 0x01, 0x42, 0x00]);
        assert!(replies.iter().all(|r| *r == Reply::filler()));
        assert!(responder.is_draining());
        assert_eq!(responder.phase(), Phase::Idle);

        responder.reset();
        assert!(!responder.is_draining());
        let replies = run(&mut responder, &frame, &[0x01]);
        assert_eq!(replies[0], Reply::send(0x41));
    }

    #[test]
    fn test_ready_ignores_unknown_command() {
        let mut responder = Responder::new(DeviceIdentity::Digital);
        let frame = up_frame();

        run(&mut responder, &frame, &[0x01]);
        let reply = responder.on_byte(0x43, &frame);
        assert_eq!(reply, Reply::filler());
        assert_eq!(responder.phase(), Phase::Ready);

        // Still answers a later get-data.
        let reply = responder.on_byte(0x42, &frame);
        assert_eq!(reply, Reply::send(0x5A));
    }

    #[test]
    fn test_dualshock2_poll() {
        let mut responder = Responder::new(DeviceIdentity::DualShock2);
        let frame = extended_frame();

        let mut cmds = [0u8; 21];
        cmds[0] = 0x01;
        cmds[1] = 0x42;
        let replies = run(&mut responder, &frame, &cmds);

        assert_eq!(replies[0], Reply::send(0x79));
        assert_eq!(replies[1], Reply::send(0x5A));
        assert_eq!(replies[2], Reply::send(0xFF));
        assert_eq!(replies[3], Reply::send(0xFF));
        for reply in &replies[4..8] {
            assert_eq!(*reply, Reply::send(0x7F));
            assert_eq!(reply.byte, 0x80);
        }
        for (i, reply) in replies[8..20].iter().enumerate() {
            assert_eq!(*reply, Reply::send(i as u8 + 1));
        }
        // The last byte of the transaction is not acknowledged.
        assert_eq!(replies[20], Reply::filler());
        assert_eq!(responder.phase(), Phase::Done);
    }

    #[test]
    fn test_done_stays_quiet() {
        let mut responder = Responder::new(DeviceIdentity::Digital);
        let frame = up_frame();

        run(&mut responder, &frame, &[0x01, 0x42, 0x00, 0x00]);
        let replies = run(&mut responder, &frame, &[0x01, 0x42, 0x00]);
        assert!(replies.iter().all(|r| *r == Reply::filler()));
    }

    #[test]
    fn test_reset_mid_transaction() {
        let mut responder = Responder::new(DeviceIdentity::DualShock2);
        let frame = extended_frame();

        // Abort inside the pressure bytes.
        let mut cmds = [0u8; 12];
        cmds[0] = 0x01;
        cmds[1] = 0x42;
        run(&mut responder, &frame, &cmds);
        assert_eq!(responder.phase(), Phase::SendExtendedButtons);

        responder.reset();
        assert_eq!(responder.phase(), Phase::Idle);

        let mut cmds = [0u8; 21];
        cmds[0] = 0x01;
        cmds[1] = 0x42;
        let replies = run(&mut responder, &frame, &cmds);
        assert_eq!(replies[0], Reply::send(0x79));
        assert_eq!(replies[4..8].iter().filter(|r| r.byte == 0x80).count(), 4);
        assert_eq!(replies[8], Reply::send(frame.pressure_of(PressureField::Right)));
        assert_eq!(replies[19], Reply::send(frame.pressure_of(PressureField::R2)));
    }

    #[test]
    fn test_frame_latched_at_get_data() {
        struct Changing(core::cell::Cell<u16>);

        impl FrameSource for Changing {
            fn snapshot(&self) -> OutputFrame {
                let status = self.0.get();
                self.0.set(status.wrapping_sub(1));
                OutputFrame {
                    status,
                    ..OutputFrame::released()
                }
            }
        }

        let source = Changing(core::cell::Cell::new(0xABCD));
        let mut responder = Responder::new(DeviceIdentity::Digital);
        let replies: Vec<Reply> = [0x01, 0x42, 0x00, 0x00]
            .iter()
            .map(|&c| responder.on_byte(c, &source))
            .collect();

        assert_eq!(replies[2], Reply::send(0xCD));
        assert_eq!(replies[3], Reply::send(0xAB));
    }
}
