//! Bit-banged SNES bus sampler.
//!
//! One latch line, one clock line and one data line. A read is:
//!
//! 1. latch high for [`BusTiming::latch_us`], then low
//! 2. 16 times: wait, clock low, sample data, wait, clock high
//!
//! The sampler never fails on its own. A missing pad reads as all-ones
//! through the data pull-up, which [`SnesButtons::from_wire`] turns into
//! "nothing pressed". The only error path is the HAL pin error, which is
//! `Infallible` on most chips.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use crate::types::SnesButtons;

/// Busy-wait durations of one bus read.
///
/// These are real-time bounds of the pad's shift registers, not cycle
/// counts. A port to a different clock must keep the microseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BusTiming {
    /// Latch high time.
    pub latch_us: u32,
    /// Settle time before each falling clock edge.
    pub bit_setup_us: u32,
    /// Hold time between sampling and the rising clock edge.
    pub bit_hold_us: u32,
}

/// Timing of the original SNES console (12 µs latch, 12 µs clock period).
pub const SNES_TIMING: BusTiming = BusTiming {
    latch_us: 12,
    bit_setup_us: 6,
    bit_hold_us: 6,
};

/// Error from one of the bus pins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusError<E> {
    /// Driving the latch line failed.
    Latch(E),
    /// Driving the clock line failed.
    Clock(E),
    /// Reading the data line failed.
    Data(E),
}

/// SNES pad reader over three GPIOs and a blocking delay.
///
/// Must only be driven from one context at a time; it owns the pins.
pub struct SnesBus<LATCH, CLOCK, DATA, D> {
    latch: LATCH,
    clock: CLOCK,
    data: DATA,
    delay: D,
    timing: BusTiming,
}

impl<LATCH, CLOCK, DATA, D, E> SnesBus<LATCH, CLOCK, DATA, D>
where
    LATCH: OutputPin<Error = E>,
    CLOCK: OutputPin<Error = E>,
    DATA: InputPin<Error = E>,
    D: DelayNs,
{
    /// Create a reader with the standard console timing.
    #[must_use]
    pub fn new(latch: LATCH, clock: CLOCK, data: DATA, delay: D) -> Self {
        Self::with_timing(latch, clock, data, delay, SNES_TIMING)
    }

    /// Create a reader with custom timing.
    #[must_use]
    pub fn with_timing(latch: LATCH, clock: CLOCK, data: DATA, delay: D, timing: BusTiming) -> Self {
        Self {
            latch,
            clock,
            data,
            delay,
            timing,
        }
    }

    /// Drive the idle levels: latch low, clock high.
    pub fn set_idle(&mut self) -> Result<(), BusError<E>> {
        self.latch.set_low().map_err(BusError::Latch)?;
        self.clock.set_high().map_err(BusError::Clock)?;
        Ok(())
    }

    /// Latch the pad and shift in both bytes exactly as they appear on the wire.
    ///
    /// Bits are active-low and MSB-first.
    pub fn read_raw(&mut self) -> Result<[u8; 2], BusError<E>> {
        self.latch.set_high().map_err(BusError::Latch)?;
        self.delay.delay_us(self.timing.latch_us);
        self.latch.set_low().map_err(BusError::Latch)?;

        let mut bytes = [0u8; 2];
        for byte in bytes.iter_mut() {
            for _ in 0..8 {
                self.delay.delay_us(self.timing.bit_setup_us);
                self.clock.set_low().map_err(BusError::Clock)?;

                *byte <<= 1;
                if self.data.is_high().map_err(BusError::Data)? {
                    *byte |= 1;
                }

                self.delay.delay_us(self.timing.bit_hold_us);
                self.clock.set_high().map_err(BusError::Clock)?;
            }
        }

        Ok(bytes)
    }

    /// Read the pad and decode it into pressed buttons.
    #[inline]
    pub fn read(&mut self) -> Result<SnesButtons, BusError<E>> {
        self.read_raw().map(SnesButtons::from_wire)
    }

    /// Get the timing in use.
    #[must_use]
    pub fn timing(&self) -> BusTiming {
        self.timing
    }

    /// Give the pins and delay back.
    pub fn into_parts(self) -> (LATCH, CLOCK, DATA, D) {
        (self.latch, self.clock, self.data, self.delay)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use embedded_hal::digital::{Error, ErrorKind, ErrorType};
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::rc::Rc;
    use std::vec;
    use std::vec::Vec;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Event {
        LatchHigh,
        LatchLow,
        ClockHigh,
        ClockLow,
        Sample,
        DelayUs(u32),
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct MockError;

    impl Error for MockError {
        fn kind(&self) -> ErrorKind {
            ErrorKind::Other
        }
    }

    type Log = Rc<RefCell<Vec<Event>>>;

    struct MockOutput {
        log: Log,
        high: Event,
        low: Event,
    }

    impl ErrorType for MockOutput {
        type Error = MockError;
    }

    impl OutputPin for MockOutput {
        fn set_low(&mut self) -> Result<(), MockError> {
            self.log.borrow_mut().push(self.low);
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), MockError> {
            self.log.borrow_mut().push(self.high);
            Ok(())
        }
    }

    // Plays back wire levels; an empty queue reads high like the pull-up.
    struct MockData {
        log: Log,
        levels: VecDeque<bool>,
        fail: bool,
    }

    impl ErrorType for MockData {
        type Error = MockError;
    }

    impl InputPin for MockData {
        fn is_high(&mut self) -> Result<bool, MockError> {
            if self.fail {
                return Err(MockError);
            }
            self.log.borrow_mut().push(Event::Sample);
            Ok(self.levels.pop_front().unwrap_or(true))
        }

        fn is_low(&mut self) -> Result<bool, MockError> {
            self.is_high().map(|high| !high)
        }
    }

    struct MockDelay {
        log: Log,
    }

    impl DelayNs for MockDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.log.borrow_mut().push(Event::DelayUs(ns / 1000));
        }

        fn delay_us(&mut self, us: u32) {
            self.log.borrow_mut().push(Event::DelayUs(us));
        }
    }

    fn levels_of(bytes: [u8; 2]) -> VecDeque<bool> {
        let mut levels = VecDeque::new();
        for byte in bytes {
            for bit in (0..8).rev() {
                levels.push_back(byte & (1 << bit) != 0);
            }
        }
        levels
    }

    fn mock_bus(
        levels: VecDeque<bool>,
        fail: bool,
    ) -> (SnesBus<MockOutput, MockOutput, MockData, MockDelay>, Log) {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let bus = SnesBus::new(
            MockOutput {
                log: log.clone(),
                high: Event::LatchHigh,
                low: Event::LatchLow,
            },
            MockOutput {
                log: log.clone(),
                high: Event::ClockHigh,
                low: Event::ClockLow,
            },
            MockData {
                log: log.clone(),
                levels,
                fail,
            },
            MockDelay { log: log.clone() },
        );
        (bus, log)
    }

    #[test]
    fn test_read_raw_msb_first() {
        let (mut bus, _log) = mock_bus(levels_of([0xA5, 0x3C]), false);
        assert_eq!(bus.read_raw(), Ok([0xA5, 0x3C]));
    }

    #[test]
    fn test_read_decodes_active_low() {
        // B and R held: first bit and bit 4 of the second byte low.
        let (mut bus, _log) = mock_bus(levels_of([0x7F, 0xEF]), false);
        assert_eq!(bus.read(), Ok(SnesButtons::B | SnesButtons::R));
    }

    #[test]
    fn test_unplugged_pad_reads_released() {
        let (mut bus, _log) = mock_bus(VecDeque::new(), false);
        assert_eq!(bus.read(), Ok(SnesButtons::NONE));
    }

    #[test]
    fn test_latch_pulse_then_sixteen_clocks() {
        let (mut bus, log) = mock_bus(VecDeque::new(), false);
        bus.read_raw().unwrap();

        let log = log.borrow();
        assert_eq!(
            &log[..3],
            &[Event::LatchHigh, Event::DelayUs(12), Event::LatchLow]
        );

        let bit = vec![
            Event::DelayUs(6),
            Event::ClockLow,
            Event::Sample,
            Event::DelayUs(6),
            Event::ClockHigh,
        ];
        let rest = &log[3..];
        assert_eq!(rest.len(), 16 * bit.len());
        for chunk in rest.chunks(bit.len()) {
            assert_eq!(chunk, bit.as_slice());
        }
    }

    #[test]
    fn test_custom_timing() {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let timing = BusTiming {
            latch_us: 20,
            bit_setup_us: 3,
            bit_hold_us: 4,
        };
        let mut bus = SnesBus::with_timing(
            MockOutput {
                log: log.clone(),
                high: Event::LatchHigh,
                low: Event::LatchLow,
            },
            MockOutput {
                log: log.clone(),
                high: Event::ClockHigh,
                low: Event::ClockLow,
            },
            MockData {
                log: log.clone(),
                levels: VecDeque::new(),
                fail: false,
            },
            MockDelay { log: log.clone() },
            timing,
        );
        bus.read_raw().unwrap();

        let total: u32 = log
            .borrow()
            .iter()
            .filter_map(|e| match e {
                Event::DelayUs(us) => Some(*us),
                _ => None,
            })
            .sum();
        assert_eq!(total, 20 + 16 * (3 + 4));
        assert_eq!(bus.timing(), timing);
    }

    #[test]
    fn test_set_idle_levels() {
        let (mut bus, log) = mock_bus(VecDeque::new(), false);
        bus.set_idle().unwrap();
        assert_eq!(log.borrow().as_slice(), &[Event::LatchLow, Event::ClockHigh]);
    }

    #[test]
    fn test_data_pin_error_propagates() {
        let (mut bus, _log) = mock_bus(VecDeque::new(), true);
        assert_eq!(bus.read(), Err(BusError::Data(MockError)));
    }
}
