//! PlayStation controller port on PIO0.
//!
//! A PIO state machine does the bit-level work: it shifts in each command
//! bit on the rising clock edge and shifts out the queued reply bit on the
//! falling edge, LSB first. DAT is driven open-drain through the pin
//! direction, so a `1` in the reply register pulls the line low. When no
//! reply is queued the machine shifts out zeros and leaves DAT released.
//!
//! The machine is armed while ATT is high and waits for ATT to fall before
//! its first bit, so byte alignment never depends on how quickly the task
//! wakes up. ATT is read by GPIO number inside the program and must stay on
//! GPIO 5.
//!
//! The [`PortTask`] turns each received byte into a reply through the
//! [`Responder`], queues it for the next byte and pulses ACK. It is meant to
//! run on an interrupt executor so it preempts the main cycle.
//!
//! # Pins
//!
//! | Signal | GPIO | Direction |
//! |--------|------|-----------|
//! | CMD    | 2    | in (PIO)  |
//! | CLK    | 3    | in (PIO)  |
//! | DAT    | 4    | open-drain out (PIO) |
//! | ATT    | 5    | in, pull-up |
//! | ACK    | 6    | open-drain out |

use core::cell::RefCell;

use adapter_core::SharedFrame;
use defmt::{trace, warn};
use embassy_futures::select::{select, Either};
use embassy_rp::gpio::{Input, Level, OutputOpenDrain};
use embassy_rp::peripherals::PIO0;
use embassy_rp::pio::program::pio_asm;
use embassy_rp::pio::{Common, Config, Direction, Pin, ShiftConfig, ShiftDirection, StateMachine};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_time::Delay;
use fixed::traits::ToFixed;
use portable_atomic::{AtomicBool, Ordering};
use psx_proto::{AckPulse, DeviceIdentity, Reply, Responder};

/// State shared between the port task and the main cycle.
///
/// Lives for the whole program in a `static`.
pub struct PortState {
    responder: Mutex<CriticalSectionRawMutex, RefCell<Responder>>,
    selected: AtomicBool,
    frame: SharedFrame,
}

impl PortState {
    #[must_use]
    pub const fn new(identity: DeviceIdentity) -> Self {
        Self {
            responder: Mutex::new(RefCell::new(Responder::new(identity))),
            selected: AtomicBool::new(false),
            frame: SharedFrame::new(),
        }
    }

    /// The frame the main cycle publishes to.
    pub fn frame(&self) -> &SharedFrame {
        &self.frame
    }

    /// `true` between ATT falling and ATT rising, as seen by the port task.
    pub fn is_selected(&self) -> bool {
        self.selected.load(Ordering::Acquire)
    }

    /// Reset the responder unless a transaction is running.
    ///
    /// The check and the reset happen in one critical section, so a
    /// transaction that starts concurrently is never cut short.
    pub fn end_transaction(&self) {
        self.responder.lock(|responder| {
            if !self.selected.load(Ordering::Acquire) {
                responder.borrow_mut().reset();
            }
        });
    }

    fn on_byte(&self, cmd: u8) -> Reply {
        self.responder
            .lock(|responder| responder.borrow_mut().on_byte(cmd, &self.frame))
    }

    fn set_selected(&self, selected: bool) {
        self.responder.lock(|responder| {
            self.selected.store(selected, Ordering::Release);
            if !selected {
                responder.borrow_mut().reset();
            }
        });
    }
}

/// Byte shifter, attention input and acknowledge line of the port.
pub struct PortTask<'d> {
    sm: StateMachine<'d, PIO0, 0>,
    origin: u8,
    att: Input<'d>,
    ack: AckPulse<OutputOpenDrain<'d>, Delay>,
    dat: Pin<'d, PIO0>,
    _inputs: [Pin<'d, PIO0>; 2],
}

impl<'d> PortTask<'d> {
    /// Load the shifter program and configure the state machine.
    ///
    /// `cmd` and `clk` must be consecutive GPIOs, `cmd` first.
    pub fn new(
        common: &mut Common<'d, PIO0>,
        mut sm: StateMachine<'d, PIO0, 0>,
        cmd: Pin<'d, PIO0>,
        clk: Pin<'d, PIO0>,
        dat: Pin<'d, PIO0>,
        att: Input<'d>,
        ack: OutputOpenDrain<'d>,
    ) -> Self {
        // in pins: 0 = CMD, 1 = CLK. out/set pins: DAT, as pin direction.
        // Entry waits for a full ATT high-to-low edge on GPIO 5.
        let program = pio_asm!(
            "    wait 1 gpio 5",
            "    wait 0 gpio 5",
            ".wrap_target",
            "    set y, 7",
            "    wait 0 pin 1",
            "    pull noblock",
            "bit:",
            "    out pindirs, 1",
            "    wait 1 pin 1",
            "    in pins, 1",
            "    jmp y-- next",
            "    set pindirs, 0",
            "    push noblock",
            ".wrap",
            "next:",
            "    wait 0 pin 1",
            "    jmp bit",
        );
        let loaded = common.load_program(&program.program);

        let mut cfg = Config::default();
        cfg.use_program(&loaded, &[]);
        cfg.set_in_pins(&[&cmd, &clk]);
        cfg.set_out_pins(&[&dat]);
        cfg.set_set_pins(&[&dat]);
        cfg.clock_divider = 1.to_fixed();
        cfg.shift_in = ShiftConfig {
            threshold: 8,
            direction: ShiftDirection::Right,
            auto_fill: false,
        };
        cfg.shift_out = ShiftConfig {
            threshold: 32,
            direction: ShiftDirection::Right,
            auto_fill: false,
        };

        sm.set_config(&cfg);
        sm.set_pins(Level::Low, &[&dat]);
        sm.set_pin_dirs(Direction::In, &[&cmd, &clk, &dat]);

        let mut ack = AckPulse::new(ack, Delay);
        let _ = ack.release();

        Self {
            sm,
            origin: loaded.origin,
            att,
            ack,
            dat,
            _inputs: [cmd, clk],
        }
    }

    /// Serve the port forever.
    pub async fn run(&mut self, state: &PortState) -> ! {
        self.rearm();
        loop {
            self.att.wait_for_low().await;
            state.set_selected(true);

            let mut bytes = 0u32;
            loop {
                match select(self.sm.rx().wait_pull(), self.att.wait_for_high()).await {
                    Either::First(word) => {
                        self.exchange(state, (word >> 24) as u8);
                        bytes += 1;
                    }
                    Either::Second(()) => break,
                }
            }

            self.rearm();
            state.set_selected(false);
            trace!("transaction ended after {} bytes", bytes);
        }
    }

    fn exchange(&mut self, state: &PortState, cmd: u8) {
        let reply = state.on_byte(cmd);
        if !self.sm.tx().try_push(u32::from(reply.byte)) {
            warn!("reply {=u8:#x} dropped, TX FIFO full", reply.byte);
        }
        if reply.ack {
            let _ = self.ack.pulse();
        }
    }

    /// Put the shifter back at the ATT edge wait with nothing queued.
    ///
    /// Only called while ATT is high.
    fn rearm(&mut self) {
        self.sm.set_enable(false);
        self.sm.clear_fifos();
        self.sm.restart();
        self.sm.set_pin_dirs(Direction::In, &[&self.dat]);
        self.sm.exec_jmp(self.origin);
        self.sm.set_enable(true);
    }
}
