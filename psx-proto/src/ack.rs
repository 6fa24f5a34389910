//! Acknowledge pulse on the open-collector ACK line.
//!
//! The host waits for ACK after each byte before clocking the next one. A
//! pad that stays silent ends the transaction; that is also how the last
//! byte and foreign transactions are handled.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

/// Durations of one acknowledge pulse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AckTiming {
    /// Delay between loading the reply and pulling ACK low.
    pub setup_us: u32,
    /// How long ACK is held low.
    pub low_us: u32,
}

/// Pulse timing that console hosts accept (1 µs setup, 3 µs low).
pub const PSX_ACK_TIMING: AckTiming = AckTiming {
    setup_us: 1,
    low_us: 3,
};

/// Drives the ACK line through an open-drain pin.
///
/// `set_low` must pull the line low and `set_high` must release it to high
/// impedance, as an open-drain output does. The line is shared with other
/// devices on the port and is never driven high.
pub struct AckPulse<P, D> {
    line: P,
    delay: D,
    timing: AckTiming,
}

impl<P, D> AckPulse<P, D>
where
    P: OutputPin,
    D: DelayNs,
{
    /// Create an acknowledge driver with the standard timing.
    #[must_use]
    pub fn new(line: P, delay: D) -> Self {
        Self::with_timing(line, delay, PSX_ACK_TIMING)
    }

    /// Create an acknowledge driver with custom timing.
    #[must_use]
    pub fn with_timing(line: P, delay: D, timing: AckTiming) -> Self {
        Self {
            line,
            delay,
            timing,
        }
    }

    /// Release the line.
    pub fn release(&mut self) -> Result<(), P::Error> {
        self.line.set_high()
    }

    /// Emit one pulse. Blocks for `setup_us + low_us`.
    pub fn pulse(&mut self) -> Result<(), P::Error> {
        self.delay.delay_us(self.timing.setup_us);
        self.line.set_low()?;
        self.delay.delay_us(self.timing.low_us);
        self.line.set_high()
    }

    /// Give the pin and delay back.
    pub fn into_parts(self) -> (P, D) {
        (self.line, self.delay)
    }
}
